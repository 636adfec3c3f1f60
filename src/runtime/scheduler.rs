//! Fixed-period tick thread.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use super::Session;
use crate::error::{LadderError, Result};

/// Counters reported when a scheduler stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SchedulerStats {
    /// Periods in which a tick ran
    pub ticks: u64,
    /// Periods in which run mode was off
    pub idle: u64,
    /// Periods dropped because a tick overran
    pub skipped: u64,
}

/// Calls [`Session::tick`] once per scan period on a dedicated thread.
///
/// The period is the session's own, so timers advance in step with the
/// wall clock. Dropping the scheduler stops it.
pub struct Scheduler {
    handle: Option<JoinHandle<SchedulerStats>>,
    shutdown: Arc<AtomicBool>,
}

impl Scheduler {
    /// Start ticking `session` every [`Session::scan_period`].
    pub fn start(session: Arc<Session>) -> Result<Self> {
        let period = session.scan_period();
        let shutdown = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&shutdown);
        let handle = thread::Builder::new()
            .name("ladder-scan".to_string())
            .spawn(move || run(&session, period, &flag))
            .map_err(|source| LadderError::SchedulerSpawn { source })?;

        debug!(period_ms = period.as_millis() as u64, "scheduler started");
        Ok(Self {
            handle: Some(handle),
            shutdown,
        })
    }

    /// Stop the thread and wait for it to exit.
    ///
    /// A tick in progress is allowed to finish.
    pub fn stop(mut self) -> SchedulerStats {
        self.shutdown()
    }

    fn shutdown(&mut self) -> SchedulerStats {
        self.shutdown.store(true, Ordering::Release);
        match self.handle.take() {
            Some(handle) => {
                handle.thread().unpark();
                handle.join().unwrap_or_default()
            }
            None => SchedulerStats::default(),
        }
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run(session: &Session, period: Duration, shutdown: &AtomicBool) -> SchedulerStats {
    let mut stats = SchedulerStats::default();
    let mut deadline = Instant::now() + period;

    loop {
        if shutdown.load(Ordering::Acquire) {
            break;
        }

        let now = Instant::now();
        if now < deadline {
            // Unparked early on shutdown
            thread::park_timeout(deadline - now);
            continue;
        }

        match session.tick() {
            Some(_) => stats.ticks += 1,
            None => stats.idle += 1,
        }

        deadline += period;
        let now = Instant::now();
        if deadline <= now {
            let missed = missed_periods(now - deadline, period);
            stats.skipped += missed;
            deadline += period * missed as u32;
            warn!(missed, "scan overran its period, skipping missed ticks");
        }
    }

    debug!(
        ticks = stats.ticks,
        idle = stats.idle,
        skipped = stats.skipped,
        "scheduler stopped"
    );
    stats
}

/// Number of whole periods to drop so the next deadline is in the future.
fn missed_periods(late: Duration, period: Duration) -> u64 {
    (late.as_nanos() / period.as_nanos()) as u64 + 1
}
