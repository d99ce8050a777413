//! Terminal-free program simulation for tests.
//!
//! The [`Simulator`] drives a [`Model`] through the same
//! init/update/view lifecycle as [`crate::Program`], but messages are
//! queued by the test instead of decoded from a terminal, and commands
//! execute inline. Batch and sequence commands are unpacked so a test
//! observes every message an update produces.

use std::collections::VecDeque;

use crate::command::Cmd;
use crate::key::KeyMsg;
use crate::message::{BatchMsg, Message, QuitMsg, SequenceMsg};
use crate::program::Model;

/// Counters tracked during simulation.
#[derive(Debug, Clone, Default)]
pub struct SimulationStats {
    /// Number of times init() was called.
    pub init_calls: usize,
    /// Number of times update() was called.
    pub update_calls: usize,
    /// Number of times view() was called.
    pub view_calls: usize,
    /// Commands returned from init/update.
    pub commands_returned: usize,
    /// Whether quit was requested.
    pub quit_requested: bool,
}

/// A simulator for exercising models without a terminal.
///
/// # Example
///
/// ```rust
/// use tea::{Cmd, Message, Model, simulator::Simulator};
///
/// struct Counter { count: i64 }
///
/// impl Model for Counter {
///     fn init(&self) -> Option<Cmd> { None }
///     fn update(&mut self, msg: Message) -> Option<Cmd> {
///         if let Some(n) = msg.downcast::<i64>() {
///             self.count += n;
///         }
///         None
///     }
///     fn view(&self) -> String { format!("count: {}", self.count) }
/// }
///
/// let mut sim = Simulator::new(Counter { count: 0 });
/// sim.send(Message::new(5i64));
/// sim.run_until_empty();
/// assert_eq!(sim.model().count, 5);
/// ```
pub struct Simulator<M: Model> {
    model: M,
    input_queue: VecDeque<Message>,
    output_views: Vec<String>,
    stats: SimulationStats,
    initialized: bool,
}

impl<M: Model> Simulator<M> {
    /// Create a new simulator around the given model.
    pub fn new(model: M) -> Self {
        Self {
            model,
            input_queue: VecDeque::new(),
            output_views: Vec::new(),
            stats: SimulationStats::default(),
            initialized: false,
        }
    }

    /// Initialize the model, executing the startup command if any.
    pub fn init(&mut self) {
        if self.initialized {
            return;
        }
        self.initialized = true;
        self.stats.init_calls += 1;

        let cmd = self.model.init();
        if let Some(cmd) = cmd {
            self.stats.commands_returned += 1;
            self.run_cmd(cmd);
        }

        self.stats.view_calls += 1;
        self.output_views.push(self.model.view());
    }

    /// Queue a message for processing.
    pub fn send(&mut self, msg: Message) {
        self.input_queue.push_back(msg);
    }

    /// Queue a key press.
    pub fn send_key(&mut self, key: KeyMsg) {
        self.input_queue.push_back(Message::new(key));
    }

    /// Process one message from the queue, calling update and view.
    ///
    /// Returns the command returned by update, if any. The command is
    /// NOT executed; use [`Simulator::run_until_empty`] to let commands
    /// feed their messages back into the queue.
    pub fn step(&mut self) -> Option<Cmd> {
        if !self.initialized {
            self.init();
        }

        let msg = self.input_queue.pop_front()?;

        if msg.is::<QuitMsg>() {
            self.stats.quit_requested = true;
            return None;
        }

        self.stats.update_calls += 1;
        let cmd = self.model.update(msg);
        if cmd.is_some() {
            self.stats.commands_returned += 1;
        }

        self.stats.view_calls += 1;
        self.output_views.push(self.model.view());

        cmd
    }

    /// Process messages until the queue drains or quit is requested,
    /// executing every returned command and feeding the results back in.
    ///
    /// Returns the number of messages processed.
    pub fn run_until_empty(&mut self) -> usize {
        let mut processed = 0;
        while !self.input_queue.is_empty() && !self.stats.quit_requested {
            if let Some(cmd) = self.step() {
                self.run_cmd(cmd);
            }
            processed += 1;
        }
        processed
    }

    /// Execute a command inline and queue whatever messages it yields.
    ///
    /// Batch and sequence wrappers are unpacked recursively, so the
    /// queue only ever holds messages an update function can see.
    pub fn run_cmd(&mut self, cmd: Cmd) {
        if let Some(msg) = cmd.execute() {
            self.enqueue(msg);
        }
    }

    fn enqueue(&mut self, msg: Message) {
        if msg.is::<BatchMsg>() {
            if let Some(batch) = msg.downcast::<BatchMsg>() {
                for cmd in batch.0 {
                    self.run_cmd(cmd);
                }
            }
        } else if msg.is::<SequenceMsg>() {
            if let Some(seq) = msg.downcast::<SequenceMsg>() {
                for cmd in seq.0 {
                    self.run_cmd(cmd);
                }
            }
        } else {
            self.input_queue.push_back(msg);
        }
    }

    /// Borrow the current model state.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Mutably borrow the current model state.
    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    /// Consume the simulator and return the final model.
    pub fn into_model(self) -> M {
        self.model
    }

    /// Simulation statistics so far.
    pub fn stats(&self) -> &SimulationStats {
        &self.stats
    }

    /// All captured view outputs, oldest first.
    pub fn views(&self) -> &[String] {
        &self.output_views
    }

    /// The most recent view output.
    pub fn last_view(&self) -> Option<&str> {
        self.output_views.last().map(String::as_str)
    }

    /// Whether quit has been requested.
    pub fn is_quit(&self) -> bool {
        self.stats.quit_requested
    }

    /// Number of messages still queued.
    pub fn pending_count(&self) -> usize {
        self.input_queue.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::batch;

    #[derive(Default)]
    struct Counter {
        count: i64,
        batched: bool,
    }

    struct Add(i64);
    struct FanOut;

    impl Model for Counter {
        fn init(&self) -> Option<Cmd> {
            None
        }

        fn update(&mut self, msg: Message) -> Option<Cmd> {
            if let Some(Add(n)) = msg.downcast_ref::<Add>() {
                self.count += n;
                return None;
            }
            if msg.is::<FanOut>() {
                self.batched = true;
                return batch(vec![
                    Some(Cmd::new(|| Message::new(Add(1)))),
                    Some(Cmd::new(|| Message::new(Add(2)))),
                ]);
            }
            None
        }

        fn view(&self) -> String {
            format!("count: {}", self.count)
        }
    }

    #[test]
    fn test_init_called_once() {
        let mut sim = Simulator::new(Counter::default());
        sim.init();
        sim.init();
        assert_eq!(sim.stats().init_calls, 1);
        assert_eq!(sim.views().len(), 1);
    }

    #[test]
    fn test_step_updates_and_renders() {
        let mut sim = Simulator::new(Counter::default());
        sim.send(Message::new(Add(5)));
        sim.send(Message::new(Add(3)));
        sim.step();
        sim.step();

        assert_eq!(sim.model().count, 8);
        assert_eq!(sim.stats().update_calls, 2);
        assert_eq!(sim.last_view(), Some("count: 8"));
    }

    #[test]
    fn test_quit_stops_processing() {
        let mut sim = Simulator::new(Counter::default());
        sim.send(Message::new(Add(1)));
        sim.send(Message::new(QuitMsg));
        sim.send(Message::new(Add(2)));

        sim.run_until_empty();

        assert!(sim.is_quit());
        assert_eq!(sim.model().count, 1);
    }

    #[test]
    fn test_batch_commands_are_unpacked() {
        let mut sim = Simulator::new(Counter::default());
        sim.send(Message::new(FanOut));
        sim.run_until_empty();

        assert!(sim.model().batched);
        assert_eq!(sim.model().count, 3);
        assert_eq!(sim.pending_count(), 0);
    }

    #[test]
    fn test_into_model() {
        let mut sim = Simulator::new(Counter::default());
        sim.send(Message::new(Add(42)));
        sim.run_until_empty();
        assert_eq!(sim.into_model().count, 42);
    }

    #[test]
    fn test_implicit_init_on_step() {
        let mut sim = Simulator::new(Counter::default());
        sim.send(Message::new(Add(1)));
        sim.step();
        assert_eq!(sim.stats().init_calls, 1);
    }
}
