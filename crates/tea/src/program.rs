//! Program lifecycle and event loop.
//!
//! The [`Program`] runner owns the terminal for the lifetime of the
//! application: it enables raw mode, optionally enters the alternate
//! screen, decodes input events into messages, executes commands on
//! worker threads, and re-renders at a capped frame rate.

use std::io::{self, Write};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{
        self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
        enable_raw_mode,
    },
};
use tracing::{debug, trace};

use crate::command::Cmd;
use crate::key::{KeyType, from_crossterm_key};
use crate::message::{
    BatchMsg, InterruptMsg, Message, QuitMsg, SequenceMsg, SetWindowTitleMsg, WindowSizeMsg,
};

/// Errors that can occur while running a program.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O error during terminal operations.
    ///
    /// Typically the terminal is not available (running in a pipe), was
    /// closed unexpectedly, or a control sequence failed to write.
    #[error("terminal io error: {0}")]
    Io(#[from] io::Error),

    /// Failed to enable or disable raw mode.
    ///
    /// Raw mode disables line buffering and echo; without it a TUI
    /// cannot read single key presses. Usually means stdin is not a TTY.
    #[error("failed to {action} raw mode: {source}")]
    RawModeFailure {
        /// Whether we were trying to enable or disable raw mode.
        action: &'static str,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Failed to enter or exit the alternate screen.
    ///
    /// Try running without [`Program::with_alt_screen`] on terminals
    /// that lack alternate screen support.
    #[error("failed to {action} alternate screen: {source}")]
    AltScreenFailure {
        /// Whether we were trying to enter or exit the alt screen.
        action: &'static str,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Failed to poll for terminal events.
    ///
    /// The terminal connection may be lost; save state and exit.
    #[error("failed to poll terminal events: {0}")]
    EventPoll(io::Error),

    /// Failed to render the view to the terminal.
    ///
    /// Typically a broken pipe or disconnected terminal.
    #[error("failed to render view: {0}")]
    Render(io::Error),
}

/// A specialized [`Result`] type for program operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The Model trait for terminal applications.
///
/// # Example
///
/// ```rust
/// use tea::{Cmd, Message, Model};
///
/// struct Counter { count: i64 }
///
/// impl Model for Counter {
///     fn init(&self) -> Option<Cmd> { None }
///
///     fn update(&mut self, msg: Message) -> Option<Cmd> {
///         if let Some(n) = msg.downcast_ref::<i64>() {
///             self.count += n;
///         }
///         None
///     }
///
///     fn view(&self) -> String {
///         format!("count: {}", self.count)
///     }
/// }
/// ```
pub trait Model: Send + 'static {
    /// Initialize the model and return an optional startup command.
    ///
    /// Called once when the program starts.
    fn init(&self) -> Option<Cmd>;

    /// Process a message and return a follow-up command.
    ///
    /// This is the pure update function at the heart of the Elm
    /// Architecture; side effects belong in the returned command.
    fn update(&mut self, msg: Message) -> Option<Cmd>;

    /// Render the model as a string for display.
    ///
    /// Must be a pure function of the model state.
    fn view(&self) -> String;
}

/// Program options.
#[derive(Debug, Clone)]
pub struct ProgramOptions {
    /// Use the alternate screen buffer.
    pub alt_screen: bool,
    /// Target frames per second for rendering.
    pub fps: u32,
}

impl Default for ProgramOptions {
    fn default() -> Self {
        Self {
            alt_screen: false,
            fps: 60,
        }
    }
}

/// The program runner.
///
/// Manages the entire lifecycle of a terminal application: terminal
/// setup and teardown, event polling, command execution, and rendering.
///
/// # Example
///
/// ```rust,ignore
/// use tea::Program;
///
/// let final_model = Program::new(model)
///     .with_alt_screen()
///     .run()?;
/// ```
pub struct Program<M: Model> {
    model: M,
    options: ProgramOptions,
    output: Option<Box<dyn Write + Send>>,
}

impl<M: Model> Program<M> {
    /// Create a new program with the given model.
    pub fn new(model: M) -> Self {
        Self {
            model,
            options: ProgramOptions::default(),
            output: None,
        }
    }

    /// Use the alternate screen buffer (full-screen mode).
    pub fn with_alt_screen(mut self) -> Self {
        self.options.alt_screen = true;
        self
    }

    /// Set the target frames per second.
    ///
    /// Default is 60. Valid range is 1-120.
    pub fn with_fps(mut self, fps: u32) -> Self {
        self.options.fps = fps.clamp(1, 120);
        self
    }

    /// Write render output to a custom writer instead of stdout.
    pub fn with_output<W: Write + Send + 'static>(mut self, output: W) -> Self {
        self.output = Some(Box::new(output));
        self
    }

    /// Run the program and return the final model state.
    pub fn run(mut self) -> Result<M> {
        if let Some(output) = self.output.take() {
            return self.run_with_writer(output);
        }

        let stdout = io::stdout();
        self.run_with_writer(stdout)
    }

    /// Run the program with a custom writer.
    pub fn run_with_writer<W: Write + Send + 'static>(self, mut writer: W) -> Result<M> {
        // Keep a copy for teardown; self moves into the event loop.
        let options = self.options.clone();

        enable_raw_mode().map_err(|source| Error::RawModeFailure {
            action: "enable",
            source,
        })?;

        if options.alt_screen {
            execute!(writer, EnterAlternateScreen).map_err(|source| Error::AltScreenFailure {
                action: "enter",
                source,
            })?;
        }

        execute!(writer, Hide)?;
        debug!(alt_screen = options.alt_screen, fps = options.fps, "terminal initialized");

        let result = self.event_loop(&mut writer);

        // Teardown is best-effort; the first error already wins.
        let _ = execute!(writer, Show);
        if options.alt_screen {
            let _ = execute!(writer, LeaveAlternateScreen);
        }
        let _ = disable_raw_mode();

        result
    }

    fn event_loop<W: Write>(mut self, writer: &mut W) -> Result<M> {
        let (tx, rx): (Sender<Message>, Receiver<Message>) = mpsc::channel();

        // Seed the model with the current window size.
        if let Ok((width, height)) = terminal::size() {
            let _ = tx.send(Message::new(WindowSizeMsg { width, height }));
        }

        if let Some(cmd) = self.model.init() {
            self.handle_command(cmd, tx.clone());
        }

        let mut last_view = String::new();
        self.render(writer, &mut last_view)?;

        let frame_duration = Duration::from_secs_f64(1.0 / f64::from(self.options.fps));

        loop {
            // Poll with the frame budget as the timeout, so an idle loop
            // sleeps instead of spinning.
            if event::poll(frame_duration).map_err(Error::EventPoll)? {
                match event::read().map_err(Error::EventPoll)? {
                    Event::Key(key_event) => {
                        if key_event.kind != KeyEventKind::Press {
                            continue;
                        }

                        let key_msg = from_crossterm_key(key_event.code, key_event.modifiers);

                        if key_msg.key_type == KeyType::CtrlC {
                            let _ = tx.send(Message::new(InterruptMsg));
                        } else {
                            let _ = tx.send(Message::new(key_msg));
                        }
                    }
                    Event::Resize(width, height) => {
                        let _ = tx.send(Message::new(WindowSizeMsg { width, height }));
                    }
                    _ => {}
                }
            }

            let mut needs_render = false;
            while let Ok(msg) = rx.try_recv() {
                if msg.is::<QuitMsg>() || msg.is::<InterruptMsg>() {
                    return Ok(self.model);
                }

                // Already unpacked in handle_command.
                if msg.is::<BatchMsg>() || msg.is::<SequenceMsg>() {
                    continue;
                }

                if let Some(title_msg) = msg.downcast_ref::<SetWindowTitleMsg>() {
                    execute!(writer, terminal::SetTitle(&title_msg.0))?;
                    continue;
                }

                if let Some(cmd) = self.model.update(msg) {
                    self.handle_command(cmd, tx.clone());
                }
                needs_render = true;
            }

            if needs_render {
                self.render(writer, &mut last_view)?;
            }
        }
    }

    fn handle_command(&self, cmd: Cmd, tx: Sender<Message>) {
        thread::spawn(move || {
            let Some(msg) = cmd.execute() else {
                trace!("command produced no message");
                return;
            };

            if msg.is::<BatchMsg>() {
                if let Some(batch) = msg.downcast::<BatchMsg>() {
                    for cmd in batch.0 {
                        let tx_clone = tx.clone();
                        thread::spawn(move || {
                            if let Some(msg) = cmd.execute() {
                                let _ = tx_clone.send(msg);
                            }
                        });
                    }
                }
            } else if msg.is::<SequenceMsg>() {
                if let Some(seq) = msg.downcast::<SequenceMsg>() {
                    for cmd in seq.0 {
                        if let Some(msg) = cmd.execute() {
                            let _ = tx.send(msg);
                        }
                    }
                }
            } else {
                let _ = tx.send(msg);
            }
        });
    }

    fn render<W: Write>(&self, writer: &mut W, last_view: &mut String) -> Result<()> {
        let view = self.model.view();

        // Skip the write entirely when nothing changed.
        if view == *last_view {
            return Ok(());
        }

        execute!(writer, MoveTo(0, 0), Clear(ClearType::All)).map_err(Error::Render)?;
        write!(writer, "{view}").map_err(Error::Render)?;
        writer.flush().map_err(Error::Render)?;

        *last_view = view;
        Ok(())
    }
}
