//! Single-line text input.
//!
//! A minimal editable text field: prompt, placeholder, cursor movement,
//! character and word deletion, and an optional character limit. The
//! host model decides when the input is focused; an unfocused input
//! ignores key messages.
//!
//! # Example
//!
//! ```rust
//! use trinkets::textinput::TextInput;
//!
//! let mut input = TextInput::new();
//! input.set_placeholder("search dispatches");
//! input.set_value("transfer");
//! assert_eq!(input.value(), "transfer");
//! ```

use tea::{KeyMsg, KeyType, Message, Style};
use unicode_width::UnicodeWidthChar;

/// Single-line text input model.
///
/// Unlike the other widgets the editing keys are fixed: the input
/// consumes plain characters, so rebindable letter keys would shadow
/// typing.
#[derive(Debug, Clone)]
pub struct TextInput {
    /// Prompt rendered before the text.
    pub prompt: String,
    /// Placeholder shown while the value is empty.
    pub placeholder: String,
    /// Maximum characters accepted (0 = no limit).
    pub char_limit: usize,
    /// Maximum display width in columns (0 = no limit).
    pub width: usize,
    /// Style for the prompt.
    pub prompt_style: Style,
    /// Style for the text.
    pub text_style: Style,
    /// Style for the placeholder.
    pub placeholder_style: Style,
    /// Style for the cursor cell.
    pub cursor_style: Style,

    value: Vec<char>,
    pos: usize,
    focus: bool,
}

impl Default for TextInput {
    fn default() -> Self {
        Self::new()
    }
}

impl TextInput {
    /// Create an empty input with a `"> "` prompt.
    #[must_use]
    pub fn new() -> Self {
        Self {
            prompt: "> ".to_string(),
            placeholder: String::new(),
            char_limit: 0,
            width: 0,
            prompt_style: Style::new(),
            text_style: Style::new(),
            placeholder_style: Style::new().faint(),
            cursor_style: Style::new().reverse(),
            value: Vec::new(),
            pos: 0,
            focus: false,
        }
    }

    /// Set the prompt string.
    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    /// Set the placeholder text.
    pub fn set_placeholder(&mut self, placeholder: impl Into<String>) {
        self.placeholder = placeholder.into();
    }

    /// Replace the value, clamping to the character limit, and move the
    /// cursor to the end.
    pub fn set_value(&mut self, s: &str) {
        let mut runes: Vec<char> = s.chars().filter(|c| !c.is_control()).collect();
        if self.char_limit > 0 && runes.len() > self.char_limit {
            runes.truncate(self.char_limit);
        }
        self.value = runes;
        self.pos = self.value.len();
    }

    /// The current value.
    #[must_use]
    pub fn value(&self) -> String {
        self.value.iter().collect()
    }

    /// The cursor position in characters.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Whether the input currently receives key messages.
    #[must_use]
    pub fn focused(&self) -> bool {
        self.focus
    }

    /// Start receiving key messages.
    pub fn focus(&mut self) {
        self.focus = true;
    }

    /// Stop receiving key messages.
    pub fn blur(&mut self) {
        self.focus = false;
    }

    /// Clear the value and reset the cursor.
    pub fn reset(&mut self) {
        self.value.clear();
        self.pos = 0;
    }

    fn insert_chars(&mut self, chars: &[char]) {
        for &c in chars {
            if c.is_control() {
                continue;
            }
            if self.char_limit > 0 && self.value.len() >= self.char_limit {
                break;
            }
            self.value.insert(self.pos, c);
            self.pos += 1;
        }
    }

    fn delete_backward(&mut self) {
        if self.pos > 0 {
            self.pos -= 1;
            self.value.remove(self.pos);
        }
    }

    fn delete_forward(&mut self) {
        if self.pos < self.value.len() {
            self.value.remove(self.pos);
        }
    }

    fn delete_word_backward(&mut self) {
        // Skip trailing spaces, then the word itself.
        let mut i = self.pos;
        while i > 0 && self.value[i - 1] == ' ' {
            i -= 1;
        }
        while i > 0 && self.value[i - 1] != ' ' {
            i -= 1;
        }
        self.value.drain(i..self.pos);
        self.pos = i;
    }

    fn delete_before_cursor(&mut self) {
        self.value.drain(..self.pos);
        self.pos = 0;
    }

    fn delete_after_cursor(&mut self) {
        self.value.truncate(self.pos);
    }

    /// Handle a key message, returning whether the value changed.
    ///
    /// Navigation keys move the cursor without changing the value; an
    /// unfocused input ignores everything.
    pub fn update(&mut self, msg: &Message) -> bool {
        if !self.focus {
            return false;
        }
        let Some(key) = msg.downcast_ref::<KeyMsg>() else {
            return false;
        };

        match key.key_type {
            KeyType::Runes => {
                self.insert_chars(&key.runes);
                true
            }
            KeyType::Space => {
                self.insert_chars(&[' ']);
                true
            }
            KeyType::Backspace => {
                let had = !self.value.is_empty() && self.pos > 0;
                self.delete_backward();
                had
            }
            KeyType::Delete => {
                let had = self.pos < self.value.len();
                self.delete_forward();
                had
            }
            KeyType::CtrlW => {
                let before = self.value.len();
                self.delete_word_backward();
                self.value.len() != before
            }
            KeyType::CtrlU => {
                let before = self.value.len();
                self.delete_before_cursor();
                self.value.len() != before
            }
            KeyType::CtrlK => {
                let before = self.value.len();
                self.delete_after_cursor();
                self.value.len() != before
            }
            KeyType::Left => {
                self.pos = self.pos.saturating_sub(1);
                false
            }
            KeyType::Right => {
                self.pos = (self.pos + 1).min(self.value.len());
                false
            }
            KeyType::Home | KeyType::CtrlA => {
                self.pos = 0;
                false
            }
            KeyType::End | KeyType::CtrlE => {
                self.pos = self.value.len();
                false
            }
            _ => false,
        }
    }

    /// Render the input as a single line.
    #[must_use]
    pub fn view(&self) -> String {
        let prompt = self.prompt_style.render(&self.prompt);

        if self.value.is_empty() && !self.focus {
            return format!("{prompt}{}", self.placeholder_style.render(&self.placeholder));
        }

        let (start, visible) = self.visible_window();
        let text: String = visible.iter().collect();

        if !self.focus {
            return format!("{prompt}{}", self.text_style.render(&text));
        }

        // Split around the cursor so the cursor cell can be reversed.
        let cursor_idx = self.pos.saturating_sub(start).min(visible.len());
        let before: String = visible[..cursor_idx].iter().collect();
        let (at, after): (String, String) = if cursor_idx < visible.len() {
            (
                visible[cursor_idx].to_string(),
                visible[cursor_idx + 1..].iter().collect(),
            )
        } else {
            (" ".to_string(), String::new())
        };

        format!(
            "{prompt}{}{}{}",
            self.text_style.render(&before),
            self.cursor_style.render(&at),
            self.text_style.render(&after),
        )
    }

    /// The slice of the value that fits the configured width, with the
    /// index of its first character.
    fn visible_window(&self) -> (usize, Vec<char>) {
        if self.width == 0 {
            return (0, self.value.clone());
        }

        let mut end = self.value.len();
        let mut total: usize = self.value.iter().map(|c| c.width().unwrap_or(0)).sum();
        // Drop characters from the tail until the text fits, keeping the
        // cursor inside the window.
        while total > self.width && end > self.pos {
            end -= 1;
            total -= self.value[end].width().unwrap_or(0);
        }
        let mut start = 0;
        while total > self.width && start < end {
            total -= self.value[start].width().unwrap_or(0);
            start += 1;
        }
        (start, self.value[start..end].to_vec())
    }
}
