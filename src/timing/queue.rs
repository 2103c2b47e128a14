//! Virtual-clock timer queue.
//!
//! Deadlines are kept in a deque ordered by `(due, sequence)`. Timers due at
//! the same instant fire in the order they were scheduled.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Monotonic identifier assigned to each scheduled timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerId(pub u64);

impl std::fmt::Display for TimerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Timer({})", self.0)
    }
}

/// A timer waiting to fire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledTimer<E> {
    /// Identifier, also the tie-breaker for equal deadlines.
    pub id: TimerId,
    /// Absolute deadline on the virtual clock.
    pub due: Duration,
    /// Payload handed back when the timer fires.
    pub event: E,
}

/// Single-threaded timer queue driven by an explicit clock.
///
/// Nothing fires on its own: the owner calls `pop_due` with a horizon and
/// handles each returned event before asking for the next one, so handlers
/// may schedule follow-up timers relative to the firing deadline.
///
/// ```
/// use std::time::Duration;
/// use simon_says::timing::TimerQueue;
///
/// let mut queue = TimerQueue::new();
/// queue.schedule(Duration::from_millis(600), "second");
/// queue.schedule(Duration::ZERO, "first");
///
/// let horizon = Duration::from_millis(1000);
/// assert_eq!(queue.pop_due(horizon).map(|t| t.event), Some("first"));
/// assert_eq!(queue.pop_due(horizon).map(|t| t.event), Some("second"));
/// assert_eq!(queue.now(), Duration::from_millis(600));
/// assert!(queue.pop_due(horizon).is_none());
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TimerQueue<E> {
    /// Current virtual time.
    now: Duration,
    /// Pending timers, earliest first.
    pending: VecDeque<ScheduledTimer<E>>,
    /// Next timer ID.
    next_id: u64,
}

impl<E> Default for TimerQueue<E> {
    fn default() -> Self {
        Self {
            now: Duration::ZERO,
            pending: VecDeque::new(),
            next_id: 0,
        }
    }
}

impl<E> TimerQueue<E> {
    /// Create an empty queue at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of pending timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Check if no timers are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Schedule `event` to fire `delay` after the current time.
    ///
    /// Deadlines saturate at `Duration::MAX`.
    pub fn schedule(&mut self, delay: Duration, event: E) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;

        let due = self.now.saturating_add(delay);
        // Equal deadlines keep insertion order
        let position = self.pending.partition_point(|t| t.due <= due);
        self.pending.insert(position, ScheduledTimer { id, due, event });

        id
    }

    /// Absolute deadline of the earliest pending timer.
    #[must_use]
    pub fn next_due(&self) -> Option<Duration> {
        self.pending.front().map(|t| t.due)
    }

    /// Time left until the earliest pending timer fires.
    #[must_use]
    pub fn until_next(&self) -> Option<Duration> {
        self.next_due().map(|due| due.saturating_sub(self.now))
    }

    /// Pop the earliest timer if it is due at or before `horizon`.
    ///
    /// The clock moves to the timer's deadline (never backwards).
    pub fn pop_due(&mut self, horizon: Duration) -> Option<ScheduledTimer<E>> {
        if self.pending.front()?.due > horizon {
            return None;
        }
        let timer = self.pending.pop_front()?;
        self.now = self.now.max(timer.due);
        Some(timer)
    }

    /// Move the clock forward without firing anything.
    pub fn advance_to(&mut self, time: Duration) {
        self.now = self.now.max(time);
    }

    /// Drop every pending timer. Returns how many were cancelled.
    pub fn clear(&mut self) -> usize {
        let cancelled = self.pending.len();
        self.pending.clear();
        cancelled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_new_queue() {
        let queue: TimerQueue<u32> = TimerQueue::new();
        assert!(queue.is_empty());
        assert_eq!(queue.now(), Duration::ZERO);
        assert_eq!(queue.next_due(), None);
        assert_eq!(queue.until_next(), None);
    }

    #[test]
    fn test_fires_in_deadline_order() {
        let mut queue = TimerQueue::new();
        queue.schedule(ms(1200), 3);
        queue.schedule(ms(0), 1);
        queue.schedule(ms(600), 2);

        let fired: Vec<_> = std::iter::from_fn(|| queue.pop_due(ms(5000)))
            .map(|t| t.event)
            .collect();
        assert_eq!(fired, vec![1, 2, 3]);
        assert_eq!(queue.now(), ms(1200));
    }

    #[test]
    fn test_equal_deadlines_keep_schedule_order() {
        let mut queue = TimerQueue::new();
        for i in 0..5 {
            queue.schedule(ms(100), i);
        }
        let fired: Vec<_> = std::iter::from_fn(|| queue.pop_due(ms(100)))
            .map(|t| t.event)
            .collect();
        assert_eq!(fired, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_horizon_respected() {
        let mut queue = TimerQueue::new();
        queue.schedule(ms(500), "a");
        queue.schedule(ms(1500), "b");

        assert_eq!(queue.pop_due(ms(1000)).map(|t| t.event), Some("a"));
        assert!(queue.pop_due(ms(1000)).is_none());
        queue.advance_to(ms(1000));

        assert_eq!(queue.now(), ms(1000));
        assert_eq!(queue.until_next(), Some(ms(500)));
    }

    #[test]
    fn test_schedule_relative_to_now() {
        let mut queue = TimerQueue::new();
        queue.advance_to(ms(2000));
        queue.schedule(ms(300), ());
        assert_eq!(queue.next_due(), Some(ms(2300)));
    }

    #[test]
    fn test_deadlines_saturate() {
        let mut queue = TimerQueue::new();
        queue.advance_to(ms(5));
        queue.schedule(Duration::MAX, "late");
        assert_eq!(queue.next_due(), Some(Duration::MAX));

        assert_eq!(queue.pop_due(Duration::MAX).map(|t| t.event), Some("late"));
        assert_eq!(queue.now(), Duration::MAX);

        queue.schedule(ms(10), "after");
        assert_eq!(queue.until_next(), Some(Duration::ZERO));
    }

    #[test]
    fn test_clock_never_goes_backwards() {
        let mut queue: TimerQueue<()> = TimerQueue::new();
        queue.advance_to(ms(1000));
        queue.advance_to(ms(10));
        assert_eq!(queue.now(), ms(1000));
    }

    #[test]
    fn test_ids_are_monotonic() {
        let mut queue = TimerQueue::new();
        let a = queue.schedule(ms(10), ());
        let b = queue.schedule(ms(0), ());
        assert!(a < b);
        assert_eq!(format!("{}", a), "Timer(0)");
    }

    #[test]
    fn test_clear() {
        let mut queue = TimerQueue::new();
        queue.schedule(ms(10), 1);
        queue.schedule(ms(20), 2);
        assert_eq!(queue.clear(), 2);
        assert!(queue.is_empty());
        assert!(queue.pop_due(ms(100)).is_none());
    }
}
