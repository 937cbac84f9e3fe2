use std::time::{Duration, Instant};

/// Identifies one armed timer.
///
/// Handles are never reused, so a handle kept from an earlier game can
/// never match a timer armed later.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone, Copy)]
enum TimerKind {
    Interval(Duration),
    OneShot,
}

#[derive(Debug, Clone, Copy)]
struct Timer {
    handle: TimerHandle,
    deadline: Instant,
    kind: TimerKind,
}

/// A timer that came due, with the deadline it was due at.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Fired {
    pub handle: TimerHandle,
    pub at: Instant,
}

/// Interval and one-shot timers driven by an externally supplied clock.
///
/// Nothing fires on its own: the owner calls [`Scheduler::next_due`] with
/// the current time and dispatches whatever comes back. That keeps every
/// callback on the caller's thread and makes virtual time trivial in tests.
#[derive(Debug, Default)]
pub struct Scheduler {
    timers: Vec<Timer>,
    next_id: u64,
}

impl Scheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms a repeating timer whose first firing is one `period` after `now`.
    pub fn start_interval(&mut self, now: Instant, period: Duration) -> TimerHandle {
        debug_assert!(!period.is_zero());
        self.arm(now + period, TimerKind::Interval(period))
    }

    /// Arms a timer that fires once, `delay` after `now`.
    pub fn start_oneshot(&mut self, now: Instant, delay: Duration) -> TimerHandle {
        self.arm(now + delay, TimerKind::OneShot)
    }

    /// Disarms a timer. Returns false when it had already fired or been cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.timers.len();
        self.timers.retain(|timer| timer.handle != handle);
        self.timers.len() != before
    }

    /// Returns true while `handle` is armed.
    #[must_use]
    pub fn is_active(&self, handle: TimerHandle) -> bool {
        self.timers.iter().any(|timer| timer.handle == handle)
    }

    /// Time left until `handle` next fires, if it is armed.
    #[must_use]
    pub fn remaining(&self, handle: TimerHandle, now: Instant) -> Option<Duration> {
        self.timers
            .iter()
            .find(|timer| timer.handle == handle)
            .map(|timer| timer.deadline.saturating_duration_since(now))
    }

    /// Pops the earliest timer due at or before `now`.
    ///
    /// One-shots are removed. Intervals are re-armed one period later, or one
    /// period after `now` when the owner has fallen behind, so a stalled loop
    /// gets a single late firing instead of a burst.
    pub fn next_due(&mut self, now: Instant) -> Option<Fired> {
        let index = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, timer)| timer.deadline <= now)
            .min_by_key(|(_, timer)| (timer.deadline, timer.handle.0))
            .map(|(index, _)| index)?;

        let timer = self.timers[index];
        let fired = Fired {
            handle: timer.handle,
            at: timer.deadline,
        };

        match timer.kind {
            TimerKind::OneShot => {
                self.timers.swap_remove(index);
            }
            TimerKind::Interval(period) => {
                let mut deadline = timer.deadline + period;
                if deadline <= now {
                    deadline = now + period;
                }
                self.timers[index].deadline = deadline;
            }
        }

        Some(fired)
    }

    fn arm(&mut self, deadline: Instant, kind: TimerKind) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;

        self.timers.push(Timer {
            handle,
            deadline,
            kind,
        });
        handle
    }
}
