//! Animated loading indicator.
//!
//! The spinner advances one frame per [`TickMsg`] and schedules its own
//! next tick. Each spinner instance has a unique id, and each tick
//! carries a tag; ticks with a stale id or tag are rejected so a
//! restarted spinner cannot be double-driven by leftover timers.
//!
//! # Example
//!
//! ```rust
//! use trinkets::spinner::{SpinnerModel, spinners};
//!
//! let spinner = SpinnerModel::with_spinner(spinners::mini_dot());
//! let first_tick = spinner.tick();
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tea::{Cmd, Message, Style};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

fn next_id() -> u64 {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

/// A spinner animation: its frames and playback rate.
#[derive(Debug, Clone)]
pub struct Spinner {
    /// The frames of the animation.
    pub frames: Vec<String>,
    /// Frames per second.
    pub fps: u32,
}

impl Spinner {
    /// Create a spinner from frames and a playback rate.
    #[must_use]
    pub fn new(frames: Vec<&str>, fps: u32) -> Self {
        Self {
            frames: frames.into_iter().map(String::from).collect(),
            fps,
        }
    }

    /// The delay between frames.
    #[must_use]
    pub fn frame_duration(&self) -> Duration {
        if self.fps == 0 {
            Duration::from_secs(1)
        } else {
            Duration::from_secs_f64(1.0 / f64::from(self.fps))
        }
    }
}

/// Predefined spinner styles.
pub mod spinners {
    use super::Spinner;

    /// Line spinner: `| / - \`
    #[must_use]
    pub fn line() -> Spinner {
        Spinner::new(vec!["|", "/", "-", "\\"], 10)
    }

    /// Braille dot spinner.
    #[must_use]
    pub fn dot() -> Spinner {
        Spinner::new(vec!["⣾ ", "⣽ ", "⣻ ", "⢿ ", "⡿ ", "⣟ ", "⣯ ", "⣷ "], 10)
    }

    /// Compact braille spinner.
    #[must_use]
    pub fn mini_dot() -> Spinner {
        Spinner::new(vec!["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"], 12)
    }

    /// Points spinner.
    #[must_use]
    pub fn points() -> Spinner {
        Spinner::new(vec!["∙∙∙", "●∙∙", "∙●∙", "∙∙●"], 7)
    }
}

/// Message advancing a spinner to its next frame.
#[derive(Debug, Clone)]
pub struct TickMsg {
    /// The spinner this tick is for.
    pub id: u64,
    tag: u64,
}

/// The spinner model.
#[derive(Debug, Clone)]
pub struct SpinnerModel {
    /// The animation to play.
    pub spinner: Spinner,
    /// Render style.
    pub style: Style,

    frame: usize,
    id: u64,
    tag: u64,
}

impl Default for SpinnerModel {
    fn default() -> Self {
        Self::new()
    }
}

impl SpinnerModel {
    /// Create a spinner with the default line animation.
    #[must_use]
    pub fn new() -> Self {
        Self::with_spinner(spinners::line())
    }

    /// Create a spinner with the given animation.
    #[must_use]
    pub fn with_spinner(spinner: Spinner) -> Self {
        Self {
            spinner,
            style: Style::new(),
            frame: 0,
            id: next_id(),
            tag: 0,
        }
    }

    /// Set the render style.
    #[must_use]
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// This spinner's unique id.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// The tick message that starts (or continues) the animation.
    #[must_use]
    pub fn tick(&self) -> Message {
        Message::new(TickMsg {
            id: self.id,
            tag: self.tag,
        })
    }

    fn tick_cmd(&self) -> Cmd {
        let id = self.id;
        let tag = self.tag;
        let duration = self.spinner.frame_duration();

        tea::tick(duration, move |_| Message::new(TickMsg { id, tag }))
    }

    /// Advance on a matching tick, scheduling the next one.
    ///
    /// Ticks addressed to another spinner or carrying an outdated tag
    /// are ignored.
    pub fn update(&mut self, msg: &Message) -> Option<Cmd> {
        let tick = msg.downcast_ref::<TickMsg>()?;

        if tick.id != self.id || tick.tag != self.tag {
            return None;
        }

        self.frame = (self.frame + 1) % self.spinner.frames.len().max(1);
        self.tag = self.tag.wrapping_add(1);
        Some(self.tick_cmd())
    }

    /// Render the current frame.
    #[must_use]
    pub fn view(&self) -> String {
        match self.spinner.frames.get(self.frame) {
            Some(frame) => self.style.render(frame),
            None => String::new(),
        }
    }
}
