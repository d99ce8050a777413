#![forbid(unsafe_code)]
// Allow pedantic lints for early-stage API ergonomics.
#![allow(clippy::doc_markdown)]
#![allow(clippy::nursery)]
#![allow(clippy::pedantic)]

//! # Tea
//!
//! A small Elm Architecture runtime for terminal applications.
//!
//! Applications are built from three parts:
//!
//! - a **model** holding all state,
//! - an **update** function that consumes [`Message`]s and may return
//!   [`Cmd`]s for side effects,
//! - a **view** function rendering the model to a string.
//!
//! The [`Program`] runner owns the terminal: raw mode, the alternate
//! screen, event decoding, frame-limited rendering, and a worker thread
//! per command. The [`simulator::Simulator`] drives the same model
//! lifecycle without a terminal for tests.
//!
//! ## Example
//!
//! ```rust,ignore
//! use tea::{Cmd, Message, Model, Program};
//!
//! struct Counter { count: i64 }
//!
//! impl Model for Counter {
//!     fn init(&self) -> Option<Cmd> { None }
//!     fn update(&mut self, msg: Message) -> Option<Cmd> {
//!         if let Some(n) = msg.downcast_ref::<i64>() {
//!             self.count += n;
//!         }
//!         None
//!     }
//!     fn view(&self) -> String { format!("count: {}", self.count) }
//! }
//!
//! let finished = Program::new(Counter { count: 0 }).with_alt_screen().run()?;
//! ```

pub mod command;
pub mod key;
pub mod message;
pub mod program;
pub mod simulator;
pub mod style;

pub use command::{Cmd, batch, quit, sequence, set_window_title, tick};
pub use key::{KeyMsg, KeyType, from_crossterm_key};
pub use message::{InterruptMsg, Message, QuitMsg, WindowSizeMsg};
pub use program::{Error, Model, Program, Result};
pub use style::{Color, Style};
