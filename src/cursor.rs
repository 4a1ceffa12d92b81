//! Step navigation.
//!
//! A cursor over a narrative's steps for the presentation layer. It only
//! tracks an index and an auto-play flag; it never touches the steps.
//!
//! Auto-play is driven by the host: a timer calls [`NavigationCursor::tick`]
//! every [`NavigationCursor::interval_ms`]. Any manual navigation cancels
//! auto-play, and so does reaching the last step.

use serde::{Deserialize, Serialize};

use crate::narrative::ExplanationStep;

/// Default auto-play period.
pub const DEFAULT_INTERVAL_MS: u64 = 1500;

/// Position within a step sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationCursor {
    total_steps: usize,
    current_index: usize,
    auto_play: bool,
    interval_ms: u64,
}

impl NavigationCursor {
    /// Creates a cursor on the first of `total_steps` steps.
    pub fn new(total_steps: usize) -> Self {
        Self {
            total_steps,
            current_index: 0,
            auto_play: false,
            interval_ms: DEFAULT_INTERVAL_MS,
        }
    }

    /// Sets the auto-play period.
    pub fn with_interval_ms(mut self, interval_ms: u64) -> Self {
        self.interval_ms = interval_ms;
        self
    }

    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    pub fn is_auto_playing(&self) -> bool {
        self.auto_play
    }

    /// Whether the cursor is on the last step.
    pub fn is_at_end(&self) -> bool {
        self.current_index == self.last_index()
    }

    /// Step under the cursor.
    pub fn current<'a>(&self, steps: &'a [ExplanationStep]) -> Option<&'a ExplanationStep> {
        steps.get(self.current_index)
    }

    /// Jumps to `index`, clamped to the valid range.
    pub fn go_to(&mut self, index: usize) {
        self.auto_play = false;
        self.current_index = index.min(self.last_index());
    }

    /// Moves one step forward.
    pub fn next(&mut self) {
        self.auto_play = false;
        self.advance();
    }

    /// Moves one step back.
    pub fn previous(&mut self) {
        self.auto_play = false;
        self.current_index = self.current_index.saturating_sub(1);
    }

    /// Returns to the first step.
    pub fn reset(&mut self) {
        self.auto_play = false;
        self.current_index = 0;
    }

    /// Starts or stops auto-play. Starting on the last step is a no-op.
    pub fn toggle_auto_play(&mut self) {
        self.auto_play = !self.auto_play && !self.is_at_end();
    }

    /// Timer callback. Advances while auto-playing and stops at the end.
    ///
    /// Returns whether the cursor moved.
    pub fn tick(&mut self) -> bool {
        if !self.auto_play {
            return false;
        }
        let moved = self.advance();
        if self.is_at_end() {
            self.auto_play = false;
        }
        moved
    }

    fn advance(&mut self) -> bool {
        if self.current_index < self.last_index() {
            self.current_index += 1;
            true
        } else {
            false
        }
    }

    fn last_index(&self) -> usize {
        self.total_steps.saturating_sub(1)
    }
}
