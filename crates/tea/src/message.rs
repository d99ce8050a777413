//! Message types for the Elm Architecture.
//!
//! Messages are the only way state enters the model: key presses, window
//! resizes, timer ticks, and the results of commands all arrive as
//! messages through the update function.

use std::any::Any;
use std::fmt;

/// A type-erased message container.
///
/// Any `Send + 'static` type can be a message. Use [`Message::new`] to
/// wrap one and [`Message::downcast`] to recover the original type in an
/// update function.
///
/// # Example
///
/// ```rust
/// use tea::Message;
///
/// struct RowsLoaded(Vec<String>);
///
/// let msg = Message::new(RowsLoaded(vec!["a".into()]));
/// if let Some(loaded) = msg.downcast::<RowsLoaded>() {
///     assert_eq!(loaded.0.len(), 1);
/// }
/// ```
pub struct Message(Box<dyn Any + Send>);

impl Message {
    /// Wrap any sendable value as a message.
    pub fn new<M: Any + Send + 'static>(msg: M) -> Self {
        Self(Box::new(msg))
    }

    /// Try to downcast to a concrete message type, consuming the message.
    pub fn downcast<M: Any + Send + 'static>(self) -> Option<M> {
        self.0.downcast::<M>().ok().map(|b| *b)
    }

    /// Try to borrow the message as a concrete type.
    pub fn downcast_ref<M: Any + Send + 'static>(&self) -> Option<&M> {
        self.0.downcast_ref::<M>()
    }

    /// Check whether the message holds a value of type `M`.
    pub fn is<M: Any + Send + 'static>(&self) -> bool {
        self.0.is::<M>()
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Message").finish_non_exhaustive()
    }
}

// Built-in message types

/// Message that quits the program gracefully.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuitMsg;

/// Message for a Ctrl+C interrupt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterruptMsg;

/// Message carrying the terminal window size.
///
/// Sent once at startup and again on every resize event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSizeMsg {
    /// Terminal width in columns.
    pub width: u16,
    /// Terminal height in rows.
    pub height: u16,
}

/// Internal message to set the terminal window title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SetWindowTitleMsg(pub String);

/// Internal message for concurrent command execution.
pub(crate) struct BatchMsg(pub Vec<super::Cmd>);

/// Internal message for sequential command execution.
pub(crate) struct SequenceMsg(pub Vec<super::Cmd>);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_downcast_roundtrip() {
        struct Loaded(u32);

        let msg = Message::new(Loaded(7));
        assert!(msg.is::<Loaded>());
        assert_eq!(msg.downcast::<Loaded>().unwrap().0, 7);
    }

    #[test]
    fn test_downcast_wrong_type() {
        struct A;
        struct B;

        let msg = Message::new(A);
        assert!(!msg.is::<B>());
        assert!(msg.downcast::<B>().is_none());
    }

    #[test]
    fn test_downcast_ref_leaves_message_intact() {
        let msg = Message::new(41i64);
        assert_eq!(msg.downcast_ref::<i64>(), Some(&41));
        assert_eq!(msg.downcast::<i64>(), Some(41));
    }

    #[test]
    fn test_window_size_msg() {
        let msg = Message::new(WindowSizeMsg {
            width: 120,
            height: 40,
        });
        let size = msg.downcast_ref::<WindowSizeMsg>().unwrap();
        assert_eq!((size.width, size.height), (120, 40));
    }
}
