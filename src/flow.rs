//! Application event loop.
//!
//! This module drives the tunnel from winit events. The window is created on
//! `resumed`, GPU setup and asset loading run to completion on a tokio runtime
//! before the first frame, and every input handler reports through [`Out`]
//! whether a new frame is needed.
//!
//! # Lifecycle Flow
//!
//! 1. `resumed` creates the window, the [`Context`] and the [`Tunnel`]
//! 2. `Resized`, arrow keys and menu input update the tunnel state
//! 3. a redraw is requested whenever a handler returns [`Out::Redraw`]
//! 4. `RedrawRequested` renders and presents exactly one frame
//! 5. `exiting` releases the textures

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::Window,
};

use crate::{
    config::TunnelConfig,
    context::Context,
    controller::{Input, MenuCursor, input_for_click, input_for_key},
    tunnel::Tunnel,
};

/// Output of every input handler.
///
/// `Redraw` asks the event loop for a new frame. `Empty` is the default when
/// nothing visible changed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Out {
    Redraw,
    #[default]
    Empty,
}

pub struct AppState {
    pub(crate) ctx: Context,
    tunnel: Tunnel,
}

impl AppState {
    async fn new(window: Arc<Window>, config: &TunnelConfig) -> anyhow::Result<Self> {
        let ctx = Context::new(window).await?;
        let tunnel = Tunnel::on_init(&ctx, config).await?;
        Ok(Self { ctx, tunnel })
    }

    fn handle_input(&mut self, input: Input) -> Out {
        match input {
            Input::Key(key) => self.tunnel.on_special_key(key),
            Input::Menu(index) => self.tunnel.on_menu_select(&self.ctx, index),
        }
    }

    fn handle_output(&self, out: Out) {
        match out {
            Out::Redraw => self.ctx.window.request_redraw(),
            Out::Empty => (),
        }
    }

    fn render(&mut self) {
        match self.tunnel.on_render(&self.ctx) {
            Ok(()) => (),
            // Reconfigure the surface if it's lost or outdated
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let size = self.ctx.window.inner_size();
                let out = self.tunnel.on_resize(&mut self.ctx, size.width, size.height);
                self.handle_output(out);
            }
            Err(e) => {
                log::error!("Unable to render {}", e);
            }
        }
    }
}

pub struct App {
    async_runtime: tokio::runtime::Runtime,
    config: TunnelConfig,
    menu: MenuCursor,
    state: Option<AppState>,
    // Set when initialization fails; returned from `run`.
    error: Option<anyhow::Error>,
}

impl App {
    fn new(config: TunnelConfig) -> anyhow::Result<Self> {
        let async_runtime = tokio::runtime::Runtime::new()?;
        Ok(Self {
            async_runtime,
            config,
            menu: MenuCursor::default(),
            state: None,
            error: None,
        })
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        log::error!("{:#}", error);
        self.error = Some(error);
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        let (width, height) = self.config.window_size;
        let window_attributes = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(PhysicalSize::new(width, height));

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => return self.fail(event_loop, e.into()),
        };

        let init_future = AppState::new(window, &self.config);
        match self.async_runtime.block_on(init_future) {
            Ok(app_state) => {
                app_state.handle_output(Out::Redraw);
                self.state = Some(app_state);
            }
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let state = match &mut self.state {
            Some(state) => state,
            None => return,
        };

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                let out = state.tunnel.on_resize(&mut state.ctx, size.width, size.height);
                state.handle_output(out);
            }
            WindowEvent::RedrawRequested => state.render(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                if let Some(input) = input_for_key(code) {
                    if let Input::Menu(index) = input {
                        self.menu.sync(index);
                    }
                    let out = state.handle_input(input);
                    state.handle_output(out);
                }
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button,
                ..
            } => {
                if let Some(input) = input_for_click(button, &mut self.menu) {
                    let out = state.handle_input(input);
                    state.handle_output(out);
                }
            }
            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = self.state.take() {
            state.tunnel.on_shutdown();
        }
    }
}

/// Opens the tunnel window and runs until it is closed.
pub fn run(config: TunnelConfig) -> anyhow::Result<()> {
    if let Err(e) = env_logger::try_init() {
        println!("Warning: Could not initialize logger: {}", e);
    };

    let event_loop = EventLoop::new()?;
    // Frames are only drawn on request.
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(config)?;
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_is_the_default_output() {
        assert_eq!(Out::default(), Out::Empty);
    }
}
