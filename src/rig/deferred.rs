//! Fixed-latency view of a signal.

use std::collections::VecDeque;

/// Delays a value by a fixed number of update ticks.
///
/// Each [`push`](Deferred::push) stores the current source value and
/// returns the one pushed `delay` ticks earlier (or the initial value while
/// the buffer is still filling). A delay of zero passes values through.
#[derive(Debug, Clone)]
pub struct Deferred<T: Copy> {
    initial: T,
    pending: VecDeque<T>,
    delay: usize,
    current: T,
}

impl<T: Copy> Deferred<T> {
    /// Create a buffer that reports `initial` for the first `delay` ticks.
    #[must_use]
    pub fn new(initial: T, delay: usize) -> Self {
        Self {
            initial,
            pending: std::iter::repeat_n(initial, delay).collect(),
            delay,
            current: initial,
        }
    }

    /// Record this tick's source value and return the delayed one.
    pub fn push(&mut self, value: T) -> T {
        self.pending.push_back(value);
        self.current = self.pending.pop_front().unwrap_or(value);
        self.current
    }

    /// Value returned by the most recent [`push`](Deferred::push).
    #[must_use]
    pub fn value(&self) -> T {
        self.current
    }

    /// Number of ticks values lag behind their source.
    #[must_use]
    pub fn delay(&self) -> usize {
        self.delay
    }

    /// Forget buffered values and start over from the initial value.
    pub fn reset(&mut self) {
        *self = Self::new(self.initial, self.delay);
    }
}
