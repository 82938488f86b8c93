use std::collections::VecDeque;

use crate::action::Command;

/// FIFO of commands received between frames.
///
/// Producers push at any time; the animator drains the whole queue at the
/// start of a frame so every cell in that frame sees the same state.
#[derive(Debug, Default)]
pub struct CommandQueue {
    pending: VecDeque<Command>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: Command) {
        tracing::trace!(?command, "command queued");
        self.pending.push_back(command);
    }

    /// Take every pending command in arrival order.
    pub fn drain(&mut self) -> impl Iterator<Item = Command> + '_ {
        self.pending.drain(..)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl Extend<Command> for CommandQueue {
    fn extend<T: IntoIterator<Item = Command>>(&mut self, iter: T) {
        for command in iter {
            self.push(command);
        }
    }
}
