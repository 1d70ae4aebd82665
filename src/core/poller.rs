use crate::core::aggregator;
use crate::core::counter::CounterStore;
use crate::core::testimonials::TestimonialStore;
use crate::domain::model::StatsSnapshot;
use crate::domain::ports::{StatsBackend, TestimonialBackend};
use std::future::Future;
use std::time::Duration;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(3);

/// Re-reads the statistics on a fixed interval, the way the site refreshes its banner.
#[derive(Debug, Clone)]
pub struct StatsPoller {
    interval: Duration,
    max_polls: Option<usize>,
}

impl Default for StatsPoller {
    fn default() -> Self {
        Self::new(DEFAULT_POLL_INTERVAL)
    }
}

impl StatsPoller {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            max_polls: None,
        }
    }

    /// Stop after `max_polls` snapshots instead of waiting for shutdown.
    pub fn with_max_polls(mut self, max_polls: usize) -> Self {
        self.max_polls = Some(max_polls);
        self
    }

    /// Polls immediately, then every interval, until `shutdown` resolves.
    /// Returns the number of snapshots delivered.
    pub async fn run<S, T, F, Fut>(
        &self,
        counter: &CounterStore<S>,
        testimonials: &TestimonialStore<T>,
        shutdown: Fut,
        mut on_snapshot: F,
    ) -> usize
    where
        S: StatsBackend,
        T: TestimonialBackend,
        F: FnMut(&StatsSnapshot),
        Fut: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        let mut polls = 0usize;

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    tracing::debug!("Stats poller stopped after {} polls", polls);
                    break;
                }
                _ = ticker.tick() => {
                    let snapshot = aggregator::snapshot(counter, testimonials).await;
                    on_snapshot(&snapshot);
                    polls += 1;

                    if self.max_polls.is_some_and(|max| polls >= max) {
                        break;
                    }
                }
            }
        }

        polls
    }
}
