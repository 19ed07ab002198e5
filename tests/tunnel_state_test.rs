use flow_tunnel::{
    config::TunnelConfig,
    controller::{FilterMenu, Input, MenuCursor, SpecialKey, input_for_click, input_for_key},
    data_structures::texture::MinFilter,
    flow::Out,
    render::DrawCommand,
    tunnel::TunnelState,
};
use winit::{event::MouseButton, keyboard::KeyCode};

fn apply(state: &mut TunnelState, input: Input) -> Out {
    match input {
        Input::Key(key) => state.on_special_key(key),
        Input::Menu(index) => match state.on_menu_select(index) {
            Some(_) => Out::Redraw,
            None => Out::Empty,
        },
    }
}

fn mvp_of(commands: &[DrawCommand]) -> cgmath::Matrix4<f32> {
    commands
        .iter()
        .find_map(|c| match c {
            DrawCommand::UseTextureReplace { mvp, .. } => Some(*mvp),
            _ => None,
        })
        .expect("every frame selects the pipeline")
}

#[test]
fn walking_in_and_out_returns_to_the_same_frame() {
    let mut state = TunnelState::new(&TunnelConfig::default());
    let start = state.frame();

    for _ in 0..10 {
        let input = input_for_key(KeyCode::ArrowUp).unwrap();
        assert_eq!(apply(&mut state, input), Out::Redraw);
    }
    assert_eq!(state.camera.depth, -60.0);
    assert_ne!(mvp_of(&state.frame()), mvp_of(&start));

    for _ in 0..10 {
        state.on_special_key(SpecialKey::Down);
    }
    assert_eq!(state.frame(), start);
}

#[test]
fn right_clicks_walk_the_filter_menu() {
    let mut state = TunnelState::new(&TunnelConfig::default());
    let mut cursor = MenuCursor::default();

    let expected = [
        MinFilter::Nearest,
        MinFilter::Linear,
        MinFilter::NearestMipmapNearest,
        MinFilter::NearestMipmapLinear,
        MinFilter::LinearMipmapNearest,
        MinFilter::LinearMipmapLinear,
    ];
    for min_filter in expected {
        let input = input_for_click(MouseButton::Right, &mut cursor).unwrap();
        assert_eq!(apply(&mut state, input), Out::Redraw);
        assert_eq!(state.sampler.min_filter, min_filter);
        assert_eq!(state.sampler.anisotropy, 1);
    }

    // Anisotropic on keeps the trilinear min filter.
    let input = input_for_click(MouseButton::Right, &mut cursor).unwrap();
    apply(&mut state, input);
    assert_eq!(state.sampler.anisotropy, 16);
    assert_eq!(state.sampler.min_filter, MinFilter::LinearMipmapLinear);

    let input = input_for_click(MouseButton::Right, &mut cursor).unwrap();
    apply(&mut state, input);
    assert_eq!(state.sampler.anisotropy, 1);
}

#[test]
fn filter_changes_do_not_move_the_camera() {
    let mut state = TunnelState::new(&TunnelConfig::default());
    let before = state.frame();
    for entry in FilterMenu::ALL {
        state.on_menu_select(entry.index());
    }
    assert_eq!(state.frame(), before);
}

#[test]
fn resizing_changes_only_the_projection() {
    let mut state = TunnelState::new(&TunnelConfig::default());
    let before = state.frame();
    assert_eq!(state.on_resize(1024, 0), Out::Redraw);
    let after = state.frame();
    assert_ne!(after[1], before[1]);
    assert_eq!(after[2..], before[2..]);
}

#[test]
fn minimizing_keeps_the_last_frame() {
    let mut state = TunnelState::new(&TunnelConfig::default());
    let before = state.frame();
    assert_eq!(state.on_resize(0, 600), Out::Redraw);
    assert_eq!(state.frame(), before);
    state.on_resize(0, 0);
    state.on_special_key(SpecialKey::Up);
    assert_ne!(mvp_of(&state.frame()), mvp_of(&before));
}
