//! Tick schedule arithmetic
//!
//! Deadline math for the periodic task runner. Ticks are wall-clock
//! aligned: a task scheduled at interval `d` runs at `start + d`,
//! `start + 2d`, `start + 3d`, and so on. If an invocation overruns one or
//! more intervals, the schedule skips the missed ticks and lands on the
//! next future boundary instead of bursting to catch up.
//!
//! This module is pure arithmetic; the firmware's runner turns the
//! deadlines into timer waits.

/// Wall-clock-aligned tick schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickSchedule {
    interval_ms: u64,
    next_ms: u64,
}

impl TickSchedule {
    /// Start a schedule at `now_ms` with the given interval
    ///
    /// The first deadline is one interval after `now_ms`; callers that
    /// want an immediate first invocation run the task once before
    /// waiting on the schedule.
    pub fn new(now_ms: u64, interval_ms: u64) -> Self {
        debug_assert!(interval_ms > 0);
        let interval_ms = interval_ms.max(1);
        Self {
            interval_ms,
            next_ms: now_ms + interval_ms,
        }
    }

    /// Scheduling interval in milliseconds
    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    /// Deadline of the next pending tick
    pub fn next_deadline_ms(&self) -> u64 {
        self.next_ms
    }

    /// Advance past `now_ms` and return the next future deadline
    ///
    /// If `now_ms` has already passed one or more deadlines, the
    /// intermediate ticks are dropped and the returned deadline is the
    /// next boundary strictly after `now_ms`.
    pub fn next_after(&mut self, now_ms: u64) -> u64 {
        if now_ms >= self.next_ms {
            let missed = (now_ms - self.next_ms) / self.interval_ms + 1;
            self.next_ms += missed * self.interval_ms;
        }
        self.next_ms
    }

    /// Number of ticks that would be dropped if advanced past `now_ms`
    pub fn missed_ticks(&self, now_ms: u64) -> u64 {
        if now_ms >= self.next_ms {
            (now_ms - self.next_ms) / self.interval_ms
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn on_time_task_keeps_the_grid() {
        let mut sched = TickSchedule::new(0, 5);
        // Task finishes well within the interval each time.
        assert_eq!(sched.next_after(1), 5);
        assert_eq!(sched.next_after(6), 10);
        assert_eq!(sched.next_after(12), 15);
    }

    #[test]
    fn overrun_skips_missed_ticks_without_bursting() {
        // interval=5, task invoked at t=0 runs for 12: the t=5 and t=10
        // ticks are dropped and the next invocation lands at t=15.
        let mut sched = TickSchedule::new(0, 5);
        assert_eq!(sched.missed_ticks(12), 1);
        assert_eq!(sched.next_after(12), 15);
        // The following tick is back on the grid.
        assert_eq!(sched.next_after(15), 20);
    }

    #[test]
    fn exact_boundary_moves_to_the_next_tick() {
        let mut sched = TickSchedule::new(0, 5);
        // Finishing exactly on a deadline schedules the one after it.
        assert_eq!(sched.next_after(5), 10);
    }

    #[test]
    fn deadlines_stay_aligned_to_start() {
        let mut sched = TickSchedule::new(100, 7);
        assert_eq!(sched.next_after(100), 107);
        assert_eq!(sched.next_after(130), 135); // 100 + 5*7
        assert_eq!((sched.next_deadline_ms() - 100) % 7, 0);
    }

    #[test]
    fn failing_ticks_do_not_stall_the_schedule() {
        // Model a task that fails on every invocation: the runner logs the
        // error and asks for the next deadline regardless. Five ticks fire
        // within five intervals plus the initial run.
        let mut sched = TickSchedule::new(0, 5);
        let mut now = 0u64;
        let mut ticks = 0u32;
        for _ in 0..5 {
            // task runs (and fails) for 1ms
            now += 1;
            ticks += 1;
            now = sched.next_after(now);
        }
        assert_eq!(ticks, 5);
        assert_eq!(now, 25);
    }
}
