pub mod clock;
pub mod live;
pub mod worker;

use std::time::{Duration, Instant};
use log::{debug, error, info, warn};
use crate::data::snapshot::Snapshot;
use crate::errors::FeedError;
use crate::rendering::MapSurface;
use self::clock::Clock;
use self::live::LiveSnapshot;

#[derive(Clone, Debug, PartialEq)]
pub enum RetryPolicy {
    /// Stop refreshing after the first failure; the map keeps its last snapshot
    FailStop,

    /// Re-arm after `initial * 2^(n-1)` for the n-th consecutive failure, capped at `max`.
    /// Halts once `max_attempts` consecutive failures have been retried, if set.
    Backoff { initial: Duration, max: Duration, max_attempts: Option<u32> }
}

impl RetryPolicy {
    pub fn delay(&self, failures: u32) -> Option<Duration> {
        match *self {
            RetryPolicy::FailStop => None,
            RetryPolicy::Backoff { initial, max, max_attempts } => {
                if failures == 0 || max_attempts.map_or(false, |limit| failures > limit) {
                    return None;
                }

                let factor = 1u32.checked_shl(failures - 1).unwrap_or(u32::MAX);
                Some(initial.checked_mul(factor).unwrap_or(max).min(max))
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RefreshState {
    Fetching,
    Waiting { due: Instant },
    Halted
}

/// Drives the fetch, transform and swap cycle. The scheduler never fetches by itself: the event
/// loop polls it and performs a fetch whenever it enters `Fetching`, then hands the result back
/// through `complete`. Only one fetch is ever outstanding.
pub struct RefreshScheduler<C: Clock> {
    clock: C,
    interval: Duration,
    retry: RetryPolicy,

    state: RefreshState,
    failures: u32,
    cycles: u64
}

impl<C: Clock> RefreshScheduler<C> {
    pub fn new(clock: C, interval: Duration, retry: RetryPolicy) -> Self {
        Self { clock, interval, retry, state: RefreshState::Fetching, failures: 0, cycles: 0 }
    }

    #[cfg(test)]
    pub fn state(&self) -> RefreshState {
        self.state
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    #[cfg(test)]
    pub fn consecutive_failures(&self) -> u32 {
        self.failures
    }

    /// Moves from `Waiting` to `Fetching` once the timer has elapsed. Returns true exactly when
    /// a fetch should be started.
    pub fn poll(&mut self) -> bool {
        match self.state {
            RefreshState::Waiting { due } if self.clock.now() >= due => {
                self.state = RefreshState::Fetching;
                true
            },
            _ => false
        }
    }

    /// Time left before the next fetch; None while fetching or halted.
    pub fn until_due(&self) -> Option<Duration> {
        match self.state {
            RefreshState::Waiting { due } => Some(due.saturating_duration_since(self.clock.now())),
            _ => None
        }
    }

    pub fn halt(&mut self) {
        self.state = RefreshState::Halted;
    }

    /// Takes the outcome of the outstanding fetch. On success the new snapshot is swapped onto
    /// the surface before the next timer is armed. A failure is returned to the caller after the
    /// retry policy has decided between re-arming and halting.
    pub fn complete<M>(&mut self, outcome: Result<Snapshot, FeedError>, live: &mut LiveSnapshot, surface: &mut M) -> Result<(), FeedError>
        where M: MapSurface + ?Sized
    {
        if self.state != RefreshState::Fetching {
            warn!("Discarding telemetry received while {:?}", self.state);
            return Ok(());
        }

        match outcome {
            Ok(snapshot) => {
                if snapshot.is_empty() {
                    debug!("Feed reported no positioned aircraft");
                }

                let (count, time) = (snapshot.len(), snapshot.time());
                live.swap(snapshot, surface);

                self.cycles += 1;
                self.failures = 0;
                self.state = RefreshState::Waiting { due: self.clock.now() + self.interval };

                match time {
                    Some(t) => info!("Refresh {}: {} aircraft as of {}", self.cycles, count, t.format("%H:%M:%S")),
                    None => info!("Refresh {}: {} aircraft", self.cycles, count)
                }
                Ok(())
            },
            Err(e) => {
                self.failures += 1;
                match self.retry.delay(self.failures) {
                    Some(delay) => {
                        warn!("Refresh failed ({} consecutive): {}; retrying in {:?}", self.failures, e, delay);
                        self.state = RefreshState::Waiting { due: self.clock.now() + delay };
                    },
                    None => {
                        error!("Refresh failed: {}; no further refreshes will be attempted", e);
                        self.state = RefreshState::Halted;
                    }
                }
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::refresh::clock::ManualClock;
    use crate::testing::{entity, RecordingSurface};

    const INTERVAL: Duration = Duration::from_millis(5000);

    fn snapshot(n: usize) -> Snapshot {
        Snapshot::from((0..n).map(|i| entity("TEST", i as f64 + 1.0, 1.0, 90.0)).collect::<Vec<_>>())
    }

    fn failure() -> FeedError {
        FeedError::Transport { url: "http://localhost/".to_string(), reason: "refused".to_string() }
    }

    fn backoff(max_attempts: Option<u32>) -> RetryPolicy {
        RetryPolicy::Backoff { initial: Duration::from_secs(5), max: Duration::from_secs(60), max_attempts }
    }

    #[test]
    fn test_backoff_delays() {
        let policy = backoff(None);
        let delays = (1..=6).map(|n| policy.delay(n).unwrap().as_secs()).collect::<Vec<_>>();
        assert_eq!(delays, vec![5, 10, 20, 40, 60, 60]);
        assert_eq!(policy.delay(200), Some(Duration::from_secs(60)));

        assert_eq!(backoff(Some(2)).delay(2), Some(Duration::from_secs(10)));
        assert_eq!(backoff(Some(2)).delay(3), None);
        assert_eq!(RetryPolicy::FailStop.delay(1), None);
    }

    #[test]
    fn test_cycle_waits_for_interval() {
        let clock = ManualClock::new();
        let mut scheduler = RefreshScheduler::new(clock.clone(), INTERVAL, RetryPolicy::FailStop);
        let (mut live, mut surface) = (LiveSnapshot::new(), RecordingSurface::new());

        assert_eq!(scheduler.state(), RefreshState::Fetching);
        assert!(!scheduler.poll());

        scheduler.complete(Ok(snapshot(2)), &mut live, &mut surface).unwrap();
        assert_eq!(live.current().len(), 2);
        assert_eq!(scheduler.until_due(), Some(INTERVAL));

        clock.advance(Duration::from_millis(4999));
        assert!(!scheduler.poll());
        assert_eq!(scheduler.until_due(), Some(Duration::from_millis(1)));

        clock.advance(Duration::from_millis(1));
        assert!(scheduler.poll());
        assert_eq!(scheduler.state(), RefreshState::Fetching);
        assert_eq!(scheduler.until_due(), None);
        assert!(!scheduler.poll());
    }

    #[test]
    fn test_fail_stop_halts_and_keeps_last_snapshot() {
        let clock = ManualClock::new();
        let mut scheduler = RefreshScheduler::new(clock.clone(), INTERVAL, RetryPolicy::FailStop);
        let (mut live, mut surface) = (LiveSnapshot::new(), RecordingSurface::new());

        scheduler.complete(Ok(snapshot(3)), &mut live, &mut surface).unwrap();
        clock.advance(INTERVAL);
        assert!(scheduler.poll());

        assert!(scheduler.complete(Err(failure()), &mut live, &mut surface).is_err());
        assert_eq!(scheduler.state(), RefreshState::Halted);
        assert_eq!(live.current().len(), 3);

        clock.advance(INTERVAL * 10);
        assert!(!scheduler.poll());
        assert_eq!(scheduler.until_due(), None);
    }

    #[test]
    fn test_backoff_rearms_and_success_resets() {
        let clock = ManualClock::new();
        let mut scheduler = RefreshScheduler::new(clock.clone(), INTERVAL, backoff(None));
        let (mut live, mut surface) = (LiveSnapshot::new(), RecordingSurface::new());

        assert!(scheduler.complete(Err(failure()), &mut live, &mut surface).is_err());
        assert_eq!(scheduler.until_due(), Some(Duration::from_secs(5)));

        clock.advance(Duration::from_secs(5));
        assert!(scheduler.poll());
        assert!(scheduler.complete(Err(failure()), &mut live, &mut surface).is_err());
        assert_eq!(scheduler.consecutive_failures(), 2);
        assert_eq!(scheduler.until_due(), Some(Duration::from_secs(10)));

        clock.advance(Duration::from_secs(10));
        assert!(scheduler.poll());
        scheduler.complete(Ok(snapshot(1)), &mut live, &mut surface).unwrap();
        assert_eq!(scheduler.consecutive_failures(), 0);
        assert_eq!(scheduler.cycles(), 1);
        assert_eq!(scheduler.until_due(), Some(INTERVAL));
    }

    #[test]
    fn test_backoff_gives_up_after_max_attempts() {
        let clock = ManualClock::new();
        let mut scheduler = RefreshScheduler::new(clock.clone(), INTERVAL, backoff(Some(1)));
        let (mut live, mut surface) = (LiveSnapshot::new(), RecordingSurface::new());

        assert!(scheduler.complete(Err(failure()), &mut live, &mut surface).is_err());
        clock.advance(Duration::from_secs(5));
        assert!(scheduler.poll());
        assert!(scheduler.complete(Err(failure()), &mut live, &mut surface).is_err());
        assert_eq!(scheduler.state(), RefreshState::Halted);
    }

    #[test]
    fn test_results_outside_fetching_are_discarded() {
        let clock = ManualClock::new();
        let mut scheduler = RefreshScheduler::new(clock.clone(), INTERVAL, RetryPolicy::FailStop);
        let (mut live, mut surface) = (LiveSnapshot::new(), RecordingSurface::new());

        scheduler.complete(Ok(snapshot(1)), &mut live, &mut surface).unwrap();
        scheduler.complete(Ok(snapshot(4)), &mut live, &mut surface).unwrap();
        assert_eq!(live.current().len(), 1);
        assert_eq!(scheduler.cycles(), 1);

        scheduler.halt();
        clock.advance(INTERVAL);
        assert!(!scheduler.poll());
        assert!(scheduler.complete(Err(failure()), &mut live, &mut surface).is_ok());
        assert_eq!(scheduler.state(), RefreshState::Halted);
    }
}
