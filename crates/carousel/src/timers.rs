//! Deterministic repeating timers.
//!
//! The queue owns its own clock. Hosts move time forward explicitly and pull
//! due timers one at a time, so a callback that re-arms a timer is scheduled
//! relative to the instant it fired, not the end of the advance window.

use std::fmt;

/// Milliseconds on the queue's clock.
pub type Millis = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

#[derive(Clone, Debug)]
struct Interval<T> {
    id: TimerId,
    period: Millis,
    due: Millis,
    payload: T,
}

#[derive(Clone, Debug)]
pub struct TimerQueue<T> {
    now: Millis,
    next_id: u64,
    intervals: Vec<Interval<T>>,
}

impl<T: Copy> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            now: 0,
            next_id: 1,
            intervals: Vec::new(),
        }
    }

    pub fn now(&self) -> Millis {
        self.now
    }

    /// Number of armed intervals.
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn is_active(&self, id: TimerId) -> bool {
        self.intervals.iter().any(|i| i.id == id)
    }

    /// Arm a repeating timer that first fires `period` ms from now.
    /// A zero period is clamped to 1 ms so a single advance always terminates.
    /// A timer whose first firing lies past the end of the clock is never armed.
    pub fn set_interval(&mut self, period: Millis, payload: T) -> TimerId {
        let period = period.max(1);
        let id = TimerId(self.next_id);
        self.next_id += 1;
        if let Some(due) = self.now.checked_add(period) {
            self.intervals.push(Interval {
                id,
                period,
                due,
                payload,
            });
        }
        id
    }

    /// Returns `true` if the timer was armed.
    pub fn clear_interval(&mut self, id: TimerId) -> bool {
        let before = self.intervals.len();
        self.intervals.retain(|i| i.id != id);
        self.intervals.len() != before
    }

    /// Fire the earliest interval due at or before `deadline`.
    ///
    /// Moves the clock to the firing instant and reschedules the interval one
    /// period later, or drops it when that would overflow the clock. Ties fire
    /// in arming order.
    pub fn pop_due(&mut self, deadline: Millis) -> Option<(TimerId, T)> {
        let index = self
            .intervals
            .iter()
            .enumerate()
            .filter(|(_, i)| i.due <= deadline)
            .min_by_key(|(_, i)| (i.due, i.id))
            .map(|(index, _)| index)?;
        let interval = &mut self.intervals[index];
        let fired = (interval.id, interval.payload);
        self.now = self.now.max(interval.due);
        match interval.due.checked_add(interval.period) {
            Some(next) => interval.due = next,
            None => {
                self.intervals.swap_remove(index);
            }
        }
        Some(fired)
    }

    /// Move the clock to `deadline` once nothing more is due.
    pub fn settle(&mut self, deadline: Millis) {
        self.now = self.now.max(deadline);
    }
}

impl<T: Copy> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(queue: &mut TimerQueue<char>, elapsed: Millis) -> Vec<(Millis, char)> {
        let deadline = queue.now() + elapsed;
        let mut fired = Vec::new();
        while let Some((_, payload)) = queue.pop_due(deadline) {
            fired.push((queue.now(), payload));
        }
        queue.settle(deadline);
        fired
    }

    #[test]
    fn interval_repeats_every_period() {
        let mut queue = TimerQueue::new();
        queue.set_interval(100, 'a');
        assert!(drain(&mut queue, 99).is_empty());
        assert_eq!(drain(&mut queue, 1), vec![(100, 'a')]);
        assert_eq!(drain(&mut queue, 250), vec![(200, 'a'), (300, 'a')]);
        assert_eq!(queue.now(), 350);
    }

    #[test]
    fn interleaves_by_due_time_then_arming_order() {
        let mut queue = TimerQueue::new();
        queue.set_interval(30, 'a');
        queue.set_interval(20, 'b');
        queue.set_interval(60, 'c');
        assert_eq!(
            drain(&mut queue, 60),
            vec![(20, 'b'), (30, 'a'), (40, 'b'), (60, 'a'), (60, 'b'), (60, 'c')]
        );
    }

    #[test]
    fn cleared_timer_never_fires() {
        let mut queue = TimerQueue::new();
        let id = queue.set_interval(10, 'a');
        assert!(queue.is_active(id));
        assert!(queue.clear_interval(id));
        assert!(!queue.clear_interval(id));
        assert!(queue.is_empty());
        assert!(drain(&mut queue, 100).is_empty());
    }

    #[test]
    fn rearming_during_drain_uses_firing_instant() {
        let mut queue = TimerQueue::new();
        let mut current = queue.set_interval(100, 'a');
        let deadline = 250;
        let mut fired_at = Vec::new();
        while let Some((id, _)) = queue.pop_due(deadline) {
            fired_at.push(queue.now());
            queue.clear_interval(id);
            current = queue.set_interval(100, 'a');
        }
        queue.settle(deadline);
        assert_eq!(fired_at, vec![100, 200]);
        assert!(queue.is_active(current));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn interval_reaching_end_of_clock_fires_once() {
        let mut queue = TimerQueue::new();
        let id = queue.set_interval(Millis::MAX, 'm');
        assert_eq!(queue.pop_due(Millis::MAX), Some((id, 'm')));
        assert_eq!(queue.now(), Millis::MAX);
        assert_eq!(queue.pop_due(Millis::MAX), None);
        assert!(queue.is_empty());

        let late = queue.set_interval(5, 'n');
        assert!(!queue.is_active(late));
        assert_eq!(queue.pop_due(Millis::MAX), None);
    }

    #[test]
    fn zero_period_is_clamped() {
        let mut queue = TimerQueue::new();
        queue.set_interval(0, 'z');
        assert_eq!(drain(&mut queue, 3).len(), 3);
    }
}
