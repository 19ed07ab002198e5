//! Keyboard and menu input.
//!
//! Only two kinds of input mean anything to the tunnel: the up/down arrow keys
//! that move the camera, and the eight entries of the filter menu. winit has no
//! native popup menu, so the menu is driven by the right mouse button (advance
//! to the next entry) and the digit keys `1`-`8` (pick an entry directly).

use winit::{event::MouseButton, keyboard::KeyCode};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SpecialKey {
    Up,
    Down,
}

/// The texture filter menu, in menu order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FilterMenu {
    Nearest,
    Linear,
    NearestMipmapNearest,
    NearestMipmapLinear,
    LinearMipmapNearest,
    LinearMipmapLinear,
    AnisotropicOn,
    AnisotropicOff,
}

impl FilterMenu {
    pub const ALL: [FilterMenu; 8] = [
        FilterMenu::Nearest,
        FilterMenu::Linear,
        FilterMenu::NearestMipmapNearest,
        FilterMenu::NearestMipmapLinear,
        FilterMenu::LinearMipmapNearest,
        FilterMenu::LinearMipmapLinear,
        FilterMenu::AnisotropicOn,
        FilterMenu::AnisotropicOff,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            FilterMenu::Nearest => "Nearest",
            FilterMenu::Linear => "Linear",
            FilterMenu::NearestMipmapNearest => "Nearest, nearest mipmap",
            FilterMenu::NearestMipmapLinear => "Nearest, linear between mipmaps",
            FilterMenu::LinearMipmapNearest => "Linear, nearest mipmap",
            FilterMenu::LinearMipmapLinear => "Trilinear",
            FilterMenu::AnisotropicOn => "Anisotropic filter",
            FilterMenu::AnisotropicOff => "Anisotropic off",
        }
    }
}

/// A recognised input, already translated from winit.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Input {
    Key(SpecialKey),
    /// Index into [`FilterMenu::ALL`].
    Menu(usize),
}

/// Walks the filter menu one entry per right click, wrapping after the last one.
#[derive(Debug, Default)]
pub struct MenuCursor {
    next: usize,
}

impl MenuCursor {
    pub fn advance(&mut self) -> usize {
        let current = self.next;
        self.next = (self.next + 1) % FilterMenu::ALL.len();
        current
    }

    /// Keeps cycling from whatever entry was picked last.
    pub fn sync(&mut self, picked: usize) {
        self.next = (picked + 1) % FilterMenu::ALL.len();
    }
}

pub fn input_for_key(code: KeyCode) -> Option<Input> {
    let menu = |index: usize| Some(Input::Menu(index));
    match code {
        KeyCode::ArrowUp => Some(Input::Key(SpecialKey::Up)),
        KeyCode::ArrowDown => Some(Input::Key(SpecialKey::Down)),
        KeyCode::Digit1 => menu(0),
        KeyCode::Digit2 => menu(1),
        KeyCode::Digit3 => menu(2),
        KeyCode::Digit4 => menu(3),
        KeyCode::Digit5 => menu(4),
        KeyCode::Digit6 => menu(5),
        KeyCode::Digit7 => menu(6),
        KeyCode::Digit8 => menu(7),
        _ => None,
    }
}

pub fn input_for_click(button: MouseButton, cursor: &mut MenuCursor) -> Option<Input> {
    match button {
        MouseButton::Right => Some(Input::Menu(cursor.advance())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrows_map_to_depth_keys() {
        assert_eq!(
            input_for_key(KeyCode::ArrowUp),
            Some(Input::Key(SpecialKey::Up))
        );
        assert_eq!(
            input_for_key(KeyCode::ArrowDown),
            Some(Input::Key(SpecialKey::Down))
        );
        assert_eq!(input_for_key(KeyCode::ArrowLeft), None);
        assert_eq!(input_for_key(KeyCode::KeyW), None);
    }

    #[test]
    fn digits_pick_menu_entries() {
        assert_eq!(input_for_key(KeyCode::Digit1), Some(Input::Menu(0)));
        assert_eq!(input_for_key(KeyCode::Digit8), Some(Input::Menu(7)));
        assert_eq!(input_for_key(KeyCode::Digit9), None);
    }

    #[test]
    fn right_click_cycles_through_the_menu() {
        let mut cursor = MenuCursor::default();
        let picked: Vec<usize> = (0..10)
            .filter_map(|_| match input_for_click(MouseButton::Right, &mut cursor) {
                Some(Input::Menu(index)) => Some(index),
                _ => None,
            })
            .collect();
        assert_eq!(picked, vec![0, 1, 2, 3, 4, 5, 6, 7, 0, 1]);
        assert_eq!(input_for_click(MouseButton::Left, &mut cursor), None);
    }

    #[test]
    fn cursor_continues_after_a_direct_pick() {
        let mut cursor = MenuCursor::default();
        cursor.sync(7);
        assert_eq!(cursor.advance(), 0);
        cursor.sync(3);
        assert_eq!(cursor.advance(), 4);
    }

    #[test]
    fn menu_indices_round_trip() {
        for (i, entry) in FilterMenu::ALL.iter().enumerate() {
            assert_eq!(entry.index(), i);
        }
        assert_eq!(FilterMenu::from_index(8), None);
    }
}
