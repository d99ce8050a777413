//! Keyboard input handling.
//!
//! Key events decode into a [`KeyMsg`] carrying a [`KeyType`] and, for
//! plain character input, the typed runes. The `Display` form of a key
//! ("ctrl+c", "enter", "q") is the canonical spelling used by key
//! bindings.

use std::fmt;

/// Keyboard key event message.
///
/// Sent to the update function for every key press.
///
/// # Example
///
/// ```rust
/// use tea::{KeyMsg, KeyType};
///
/// fn is_quit(key: &KeyMsg) -> bool {
///     matches!(key.key_type, KeyType::CtrlC)
///         || (key.key_type == KeyType::Runes && key.runes == ['q'])
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMsg {
    /// The type of key pressed.
    pub key_type: KeyType,
    /// For [`KeyType::Runes`], the characters typed.
    pub runes: Vec<char>,
    /// Whether Alt was held.
    pub alt: bool,
}

impl KeyMsg {
    /// Create a key message from a key type.
    pub fn from_type(key_type: KeyType) -> Self {
        Self {
            key_type,
            runes: Vec::new(),
            alt: false,
        }
    }

    /// Create a key message from a single character.
    pub fn from_char(c: char) -> Self {
        Self {
            key_type: KeyType::Runes,
            runes: vec![c],
            alt: false,
        }
    }

    /// Set the alt modifier.
    pub fn with_alt(mut self) -> Self {
        self.alt = true;
        self
    }
}

impl fmt::Display for KeyMsg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.alt {
            write!(f, "alt+")?;
        }
        if self.key_type == KeyType::Runes {
            for c in &self.runes {
                write!(f, "{c}")?;
            }
        } else {
            write!(f, "{}", self.key_type)?;
        }
        Ok(())
    }
}

/// Key type enumeration.
///
/// Control keys keep their ASCII values; special keys use negative values
/// to avoid collision. Control combinations the runtime has no binding
/// vocabulary for decode as [`KeyType::Runes`] with the bare character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i16)]
pub enum KeyType {
    /// Ctrl+A.
    CtrlA = 1,
    /// Break/Interrupt (Ctrl+C).
    CtrlC = 3,
    /// Ctrl+D (EOF).
    CtrlD = 4,
    /// Ctrl+E.
    CtrlE = 5,
    /// Tab (Ctrl+I).
    Tab = 9,
    /// Ctrl+K.
    CtrlK = 11,
    /// Enter (Ctrl+M, carriage return).
    Enter = 13,
    /// Ctrl+N.
    CtrlN = 14,
    /// Ctrl+P.
    CtrlP = 16,
    /// Ctrl+U.
    CtrlU = 21,
    /// Ctrl+W.
    CtrlW = 23,
    /// Escape (Ctrl+[).
    Esc = 27,
    /// Delete (127).
    Backspace = 127,

    /// Regular character(s) input.
    Runes = -1,
    /// Up arrow.
    Up = -2,
    /// Down arrow.
    Down = -3,
    /// Right arrow.
    Right = -4,
    /// Left arrow.
    Left = -5,
    /// Shift+Tab.
    ShiftTab = -6,
    /// Home key.
    Home = -7,
    /// End key.
    End = -8,
    /// Page Up.
    PgUp = -9,
    /// Page Down.
    PgDown = -10,
    /// Delete key.
    Delete = -11,
    /// Space key.
    Space = -12,
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            KeyType::CtrlA => "ctrl+a",
            KeyType::CtrlC => "ctrl+c",
            KeyType::CtrlD => "ctrl+d",
            KeyType::CtrlE => "ctrl+e",
            KeyType::Tab => "tab",
            KeyType::CtrlK => "ctrl+k",
            KeyType::Enter => "enter",
            KeyType::CtrlN => "ctrl+n",
            KeyType::CtrlP => "ctrl+p",
            KeyType::CtrlU => "ctrl+u",
            KeyType::CtrlW => "ctrl+w",
            KeyType::Esc => "esc",
            KeyType::Backspace => "backspace",
            KeyType::Runes => "runes",
            KeyType::Up => "up",
            KeyType::Down => "down",
            KeyType::Right => "right",
            KeyType::Left => "left",
            KeyType::ShiftTab => "shift+tab",
            KeyType::Home => "home",
            KeyType::End => "end",
            KeyType::PgUp => "pgup",
            KeyType::PgDown => "pgdown",
            KeyType::Delete => "delete",
            KeyType::Space => " ",
        };
        write!(f, "{name}")
    }
}

impl KeyType {
    /// Check whether this key type is a control character.
    pub fn is_ctrl(&self) -> bool {
        let val = *self as i16;
        (0..=31).contains(&val) || val == 127
    }
}

/// Convert a crossterm key event into a [`KeyMsg`].
pub fn from_crossterm_key(
    code: crossterm::event::KeyCode,
    modifiers: crossterm::event::KeyModifiers,
) -> KeyMsg {
    use crossterm::event::{KeyCode, KeyModifiers};

    let ctrl = modifiers.contains(KeyModifiers::CONTROL);
    let shift = modifiers.contains(KeyModifiers::SHIFT);
    let alt = modifiers.contains(KeyModifiers::ALT);

    let (key_type, runes) = match code {
        KeyCode::Char(c) if ctrl => {
            let kt = match c.to_ascii_lowercase() {
                'a' => KeyType::CtrlA,
                'c' => KeyType::CtrlC,
                'd' => KeyType::CtrlD,
                'e' => KeyType::CtrlE,
                'i' => KeyType::Tab,
                'k' => KeyType::CtrlK,
                'm' => KeyType::Enter,
                'n' => KeyType::CtrlN,
                'p' => KeyType::CtrlP,
                'u' => KeyType::CtrlU,
                'w' => KeyType::CtrlW,
                _ => {
                    return KeyMsg {
                        key_type: KeyType::Runes,
                        runes: vec![c],
                        alt,
                    };
                }
            };
            (kt, Vec::new())
        }
        KeyCode::Char(' ') => (KeyType::Space, Vec::new()),
        KeyCode::Char(c) => (KeyType::Runes, vec![c]),
        KeyCode::Enter => (KeyType::Enter, Vec::new()),
        KeyCode::Backspace => (KeyType::Backspace, Vec::new()),
        KeyCode::Tab if shift => (KeyType::ShiftTab, Vec::new()),
        KeyCode::Tab => (KeyType::Tab, Vec::new()),
        KeyCode::BackTab => (KeyType::ShiftTab, Vec::new()),
        KeyCode::Esc => (KeyType::Esc, Vec::new()),
        KeyCode::Delete => (KeyType::Delete, Vec::new()),
        KeyCode::Up => (KeyType::Up, Vec::new()),
        KeyCode::Down => (KeyType::Down, Vec::new()),
        KeyCode::Left => (KeyType::Left, Vec::new()),
        KeyCode::Right => (KeyType::Right, Vec::new()),
        KeyCode::Home => (KeyType::Home, Vec::new()),
        KeyCode::End => (KeyType::End, Vec::new()),
        KeyCode::PageUp => (KeyType::PgUp, Vec::new()),
        KeyCode::PageDown => (KeyType::PgDown, Vec::new()),
        _ => (KeyType::Runes, Vec::new()),
    };

    KeyMsg {
        key_type,
        runes,
        alt,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    #[test]
    fn test_key_msg_display() {
        assert_eq!(KeyMsg::from_type(KeyType::Enter).to_string(), "enter");
        assert_eq!(KeyMsg::from_char('q').to_string(), "q");
        assert_eq!(KeyMsg::from_char('x').with_alt().to_string(), "alt+x");
        assert_eq!(KeyMsg::from_type(KeyType::Space).to_string(), " ");
    }

    #[test]
    fn test_key_type_display() {
        assert_eq!(KeyType::CtrlC.to_string(), "ctrl+c");
        assert_eq!(KeyType::ShiftTab.to_string(), "shift+tab");
        assert_eq!(KeyType::PgDown.to_string(), "pgdown");
    }

    #[test]
    fn test_is_ctrl() {
        assert!(KeyType::CtrlC.is_ctrl());
        assert!(KeyType::Enter.is_ctrl());
        assert!(KeyType::Backspace.is_ctrl());
        assert!(!KeyType::Up.is_ctrl());
        assert!(!KeyType::Runes.is_ctrl());
    }

    #[test]
    fn test_from_crossterm_plain_char() {
        let key = from_crossterm_key(KeyCode::Char('j'), KeyModifiers::NONE);
        assert_eq!(key.key_type, KeyType::Runes);
        assert_eq!(key.runes, vec!['j']);
        assert!(!key.alt);
    }

    #[test]
    fn test_from_crossterm_ctrl_combo() {
        let key = from_crossterm_key(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(key.key_type, KeyType::CtrlC);
        assert!(key.runes.is_empty());
    }

    #[test]
    fn test_from_crossterm_unmapped_ctrl_falls_back_to_runes() {
        let key = from_crossterm_key(KeyCode::Char('g'), KeyModifiers::CONTROL);
        assert_eq!(key.key_type, KeyType::Runes);
        assert_eq!(key.runes, vec!['g']);
    }

    #[test]
    fn test_from_crossterm_space() {
        let key = from_crossterm_key(KeyCode::Char(' '), KeyModifiers::NONE);
        assert_eq!(key.key_type, KeyType::Space);
    }

    #[test]
    fn test_from_crossterm_shift_tab() {
        let key = from_crossterm_key(KeyCode::Tab, KeyModifiers::SHIFT);
        assert_eq!(key.key_type, KeyType::ShiftTab);
        let key = from_crossterm_key(KeyCode::BackTab, KeyModifiers::NONE);
        assert_eq!(key.key_type, KeyType::ShiftTab);
    }

    #[test]
    fn test_from_crossterm_navigation_keys() {
        for (code, expected) in [
            (KeyCode::Up, KeyType::Up),
            (KeyCode::Down, KeyType::Down),
            (KeyCode::Left, KeyType::Left),
            (KeyCode::Right, KeyType::Right),
            (KeyCode::Home, KeyType::Home),
            (KeyCode::End, KeyType::End),
            (KeyCode::PageUp, KeyType::PgUp),
            (KeyCode::PageDown, KeyType::PgDown),
        ] {
            assert_eq!(from_crossterm_key(code, KeyModifiers::NONE).key_type, expected);
        }
    }
}
