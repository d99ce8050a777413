//! Commands for side effects.
//!
//! A command is a deferred IO operation that produces a message. Update
//! functions stay pure by returning commands instead of performing IO;
//! the program executes each command on a worker thread and feeds the
//! resulting message back into the update loop.

use std::time::{Duration, Instant};

use crate::message::{BatchMsg, Message, QuitMsg, SequenceMsg, SetWindowTitleMsg};

/// A command that produces a message when executed.
///
/// Commands are lazy: nothing runs until the program executes them. A
/// blocking call (an HTTP request, a timer sleep) belongs inside the
/// closure, never inside update itself.
///
/// # Example
///
/// ```rust
/// use tea::{Cmd, Message};
///
/// struct Fetched(&'static str);
///
/// fn fetch() -> Cmd {
///     Cmd::new(|| Message::new(Fetched("two rows")))
/// }
/// ```
pub struct Cmd(Box<dyn FnOnce() -> Option<Message> + Send + 'static>);

impl Cmd {
    /// Create a command from a closure.
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce() -> Message + Send + 'static,
    {
        Self(Box::new(move || Some(f())))
    }

    /// Create a command that may not produce a message.
    pub fn new_optional<F>(f: F) -> Self
    where
        F: FnOnce() -> Option<Message> + Send + 'static,
    {
        Self(Box::new(f))
    }

    /// The empty command.
    pub fn none() -> Option<Self> {
        None
    }

    /// Execute the command and return the resulting message.
    pub fn execute(self) -> Option<Message> {
        (self.0)()
    }
}

/// Batch commands to run concurrently, with no ordering guarantees.
///
/// Returns `None` when the batch is empty and the single command itself
/// when the batch holds exactly one.
pub fn batch(cmds: Vec<Option<Cmd>>) -> Option<Cmd> {
    let valid_cmds: Vec<Cmd> = cmds.into_iter().flatten().collect();

    match valid_cmds.len() {
        0 => None,
        1 => valid_cmds.into_iter().next(),
        _ => Some(Cmd::new_optional(move || {
            Some(Message::new(BatchMsg(valid_cmds)))
        })),
    }
}

/// Sequence commands to run one at a time, in order.
///
/// Use this over [`batch`] when a later command must observe the effects
/// of an earlier one.
pub fn sequence(cmds: Vec<Option<Cmd>>) -> Option<Cmd> {
    let valid_cmds: Vec<Cmd> = cmds.into_iter().flatten().collect();

    match valid_cmds.len() {
        0 => None,
        1 => valid_cmds.into_iter().next(),
        _ => Some(Cmd::new_optional(move || {
            Some(Message::new(SequenceMsg(valid_cmds)))
        })),
    }
}

/// Command that signals the program to quit.
pub fn quit() -> Cmd {
    Cmd::new(|| Message::new(QuitMsg))
}

/// Command that produces a message after a delay.
///
/// The delay runs once, from the moment the command executes. For
/// periodic ticks, return another tick command from the update function
/// when the tick message arrives.
///
/// # Example
///
/// ```rust,ignore
/// use std::time::{Duration, Instant};
/// use tea::{Cmd, Message, tick};
///
/// struct DebounceFired(Instant);
///
/// fn arm_debounce() -> Cmd {
///     tick(Duration::from_millis(400), |t| Message::new(DebounceFired(t)))
/// }
/// ```
pub fn tick<F>(duration: Duration, f: F) -> Cmd
where
    F: FnOnce(Instant) -> Message + Send + 'static,
{
    Cmd::new(move || {
        std::thread::sleep(duration);
        f(Instant::now())
    })
}

/// Command to set the terminal window title.
pub fn set_window_title(title: impl Into<String>) -> Cmd {
    let title = title.into();
    Cmd::new(move || Message::new(SetWindowTitleMsg(title)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cmd_produces_message() {
        let cmd = Cmd::new(|| Message::new(3u8));
        assert_eq!(cmd.execute().unwrap().downcast::<u8>(), Some(3));
    }

    #[test]
    fn test_cmd_optional_none() {
        let cmd = Cmd::new_optional(|| None);
        assert!(cmd.execute().is_none());
    }

    #[test]
    fn test_batch_empty_is_none() {
        assert!(batch(vec![]).is_none());
        assert!(batch(vec![None, None]).is_none());
    }

    #[test]
    fn test_batch_single_unwraps() {
        let cmd = batch(vec![Some(Cmd::new(|| Message::new(1u8)))]).unwrap();
        // A single-element batch executes directly, no wrapper message.
        assert_eq!(cmd.execute().unwrap().downcast::<u8>(), Some(1));
    }

    #[test]
    fn test_batch_many_wraps() {
        let cmd = batch(vec![
            Some(Cmd::new(|| Message::new(1u8))),
            Some(Cmd::new(|| Message::new(2u8))),
        ])
        .unwrap();
        assert!(cmd.execute().unwrap().is::<BatchMsg>());
    }

    #[test]
    fn test_sequence_empty_is_none() {
        assert!(sequence(vec![]).is_none());
    }

    #[test]
    fn test_quit() {
        let msg = quit().execute().unwrap();
        assert!(msg.is::<QuitMsg>());
    }

    #[test]
    fn test_tick_delivers_after_delay() {
        struct Ticked;

        let start = Instant::now();
        let cmd = tick(Duration::from_millis(5), |_| Message::new(Ticked));
        let msg = cmd.execute().unwrap();
        assert!(msg.is::<Ticked>());
        assert!(start.elapsed() >= Duration::from_millis(5));
    }

    #[test]
    fn test_set_window_title() {
        let msg = set_window_title("electroscope").execute().unwrap();
        assert!(msg.is::<SetWindowTitleMsg>());
    }
}
