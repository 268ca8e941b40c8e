//! Periodic task runner
//!
//! One runner drives one [`PeriodicTask`] on a wall-clock-aligned cadence:
//! the first invocation fires immediately, every later one lands on a
//! `start + n * interval` boundary. An invocation runs to completion
//! before the next deadline is awaited; if it overruns, the missed ticks
//! are dropped rather than fired back-to-back. Errors are logged with the
//! task name and never stop the loop.

use defmt::{info, warn, Format};
use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Instant, Timer};

use solarium_core::schedule::TickSchedule;

/// Cooperative shutdown handshake for a runner
///
/// `request` asks the runner to stop; it exits after any in-flight
/// invocation completes and acknowledges through `wait`.
pub struct ShutdownToken {
    stop: Signal<CriticalSectionRawMutex, ()>,
    done: Signal<CriticalSectionRawMutex, ()>,
}

impl ShutdownToken {
    pub const fn new() -> Self {
        Self {
            stop: Signal::new(),
            done: Signal::new(),
        }
    }

    /// Ask the runner to stop
    pub fn request(&self) {
        self.stop.signal(());
    }

    /// Wait until the runner has exited
    pub async fn wait(&self) {
        self.done.wait().await;
    }

    fn is_requested(&self) -> bool {
        self.stop.signaled()
    }

    fn acknowledge(&self) {
        self.done.signal(());
    }
}

/// A named unit of work driven on a fixed cadence
pub trait PeriodicTask {
    /// Name used in log lines
    const NAME: &'static str;

    /// Error reported when an invocation fails
    type Error: Format;

    /// One invocation of the task
    async fn tick(&mut self) -> Result<(), Self::Error>;
}

/// Drive `task` every `interval` until shutdown is requested
pub async fn run_periodic<T: PeriodicTask>(
    interval: Duration,
    shutdown: &ShutdownToken,
    mut task: T,
) {
    info!(
        "{} runner started ({}ms interval)",
        T::NAME,
        interval.as_millis()
    );

    let mut schedule = TickSchedule::new(Instant::now().as_millis(), interval.as_millis());

    loop {
        if let Err(e) = task.tick().await {
            warn!("{} tick failed: {}", T::NAME, e);
        }

        if shutdown.is_requested() {
            break;
        }

        let now = Instant::now().as_millis();
        let missed = schedule.missed_ticks(now);
        if missed > 0 {
            warn!("{} overran its interval, dropping {} tick(s)", T::NAME, missed);
        }
        let deadline = Instant::from_millis(schedule.next_after(now));

        match select(Timer::at(deadline), shutdown.stop.wait()).await {
            Either::First(()) => {}
            Either::Second(()) => break,
        }
    }

    info!("{} runner stopped", T::NAME);
    shutdown.acknowledge();
}
