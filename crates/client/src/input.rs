//! Keyboard handling for the action menu.
//!
//! This module owns the keyboard-to-menu mapping so the provider can remain
//! agnostic about concrete key bindings or the specifics of `crossterm`
//! events.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Menu-level meaning of a key press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuKey {
    Up,
    Down,
    Confirm,
    /// Back out of the menu; the engine re-prompts.
    Cancel,
    /// Jump straight to an entry by its zero-based index.
    Pick(usize),
    /// Hand the rest of the run to the auto-pilot.
    Quit,
    None,
}

/// Translates `KeyEvent`s into menu commands.
#[derive(Clone, Copy, Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key(&self, key: KeyEvent) -> MenuKey {
        if key.kind == KeyEventKind::Release {
            return MenuKey::None;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return MenuKey::Quit;
        }

        match key.code {
            KeyCode::Char(ch) => self.handle_char(ch),
            KeyCode::Up => MenuKey::Up,
            KeyCode::Down | KeyCode::Tab => MenuKey::Down,
            KeyCode::Enter => MenuKey::Confirm,
            KeyCode::Esc | KeyCode::Backspace => MenuKey::Cancel,
            _ => MenuKey::None,
        }
    }

    fn handle_char(&self, raw: char) -> MenuKey {
        match raw.to_ascii_lowercase() {
            'q' => MenuKey::Quit,
            'k' | 'w' => MenuKey::Up,
            'j' | 's' => MenuKey::Down,
            ' ' => MenuKey::Confirm,
            // 1-9 select the first nine entries, 0 the tenth
            '0' => MenuKey::Pick(9),
            digit @ '1'..='9' => MenuKey::Pick(digit as usize - '1' as usize),
            _ => MenuKey::None,
        }
    }
}

/// Result of feeding a key to a [`MenuCursor`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuCommand {
    /// Still choosing; redraw.
    Pending,
    Choose(usize),
    Cancel,
    Quit,
}

/// Highlighted entry of a menu with wrap-around navigation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MenuCursor {
    selected: usize,
    len: usize,
}

impl MenuCursor {
    pub fn new(len: usize) -> Self {
        Self { selected: 0, len }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn apply(&mut self, key: MenuKey) -> MenuCommand {
        if self.len == 0 {
            return match key {
                MenuKey::Quit => MenuCommand::Quit,
                MenuKey::None | MenuKey::Up | MenuKey::Down => MenuCommand::Pending,
                _ => MenuCommand::Cancel,
            };
        }

        match key {
            MenuKey::Up => {
                self.selected = self.selected.checked_sub(1).unwrap_or(self.len - 1);
                MenuCommand::Pending
            }
            MenuKey::Down => {
                self.selected = (self.selected + 1) % self.len;
                MenuCommand::Pending
            }
            MenuKey::Confirm => MenuCommand::Choose(self.selected),
            MenuKey::Pick(index) if index < self.len => {
                self.selected = index;
                MenuCommand::Choose(index)
            }
            MenuKey::Pick(_) | MenuKey::None => MenuCommand::Pending,
            MenuKey::Cancel => MenuCommand::Cancel,
            MenuKey::Quit => MenuCommand::Quit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::empty(),
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn maps_navigation_keys() {
        let handler = InputHandler::new();
        assert_eq!(handler.handle_key(key(KeyCode::Up)), MenuKey::Up);
        assert_eq!(handler.handle_key(key(KeyCode::Char('J'))), MenuKey::Down);
        assert_eq!(handler.handle_key(key(KeyCode::Enter)), MenuKey::Confirm);
        assert_eq!(handler.handle_key(key(KeyCode::Esc)), MenuKey::Cancel);
    }

    #[test]
    fn maps_digits_to_indices() {
        let handler = InputHandler::new();
        assert_eq!(handler.handle_key(key(KeyCode::Char('1'))), MenuKey::Pick(0));
        assert_eq!(handler.handle_key(key(KeyCode::Char('9'))), MenuKey::Pick(8));
        assert_eq!(handler.handle_key(key(KeyCode::Char('0'))), MenuKey::Pick(9));
    }

    #[test]
    fn maps_quit_and_ignores_releases() {
        let handler = InputHandler::new();
        assert_eq!(handler.handle_key(key(KeyCode::Char('q'))), MenuKey::Quit);

        let ctrl_c = KeyEvent {
            modifiers: KeyModifiers::CONTROL,
            ..key(KeyCode::Char('c'))
        };
        assert_eq!(handler.handle_key(ctrl_c), MenuKey::Quit);

        let release = KeyEvent {
            kind: KeyEventKind::Release,
            ..key(KeyCode::Enter)
        };
        assert_eq!(handler.handle_key(release), MenuKey::None);
        assert_eq!(handler.handle_key(key(KeyCode::Char('x'))), MenuKey::None);
    }

    #[test]
    fn cursor_wraps_both_ways() {
        let mut cursor = MenuCursor::new(3);
        assert_eq!(cursor.apply(MenuKey::Up), MenuCommand::Pending);
        assert_eq!(cursor.selected(), 2);
        cursor.apply(MenuKey::Down);
        assert_eq!(cursor.selected(), 0);
        assert_eq!(cursor.apply(MenuKey::Confirm), MenuCommand::Choose(0));
    }

    #[test]
    fn cursor_ignores_out_of_range_picks() {
        let mut cursor = MenuCursor::new(4);
        assert_eq!(cursor.apply(MenuKey::Pick(7)), MenuCommand::Pending);
        assert_eq!(cursor.apply(MenuKey::Pick(3)), MenuCommand::Choose(3));
        assert_eq!(cursor.selected(), 3);
        assert_eq!(cursor.apply(MenuKey::Cancel), MenuCommand::Cancel);
    }

    #[test]
    fn empty_menu_cancels_on_confirm() {
        let mut cursor = MenuCursor::new(0);
        assert_eq!(cursor.apply(MenuKey::Confirm), MenuCommand::Cancel);
        assert_eq!(cursor.apply(MenuKey::Down), MenuCommand::Pending);
    }
}
