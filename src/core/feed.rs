// Scheduled market feed: generate or fetch, then publish, on a fixed cadence

use crate::clients::TradingApiClient;
use crate::config::Config;
use crate::core::generator::FeedGenerator;
use crate::core::pair_store::PairStore;
use crate::core::publisher::{DisplayTarget, FeedPublisher};
use crate::core::types::{seed_pairs, Tick, TradingPair};
use crate::error::{FeedError, FeedResult};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Where tick values come from
#[derive(Debug)]
pub enum FeedSource {
    /// Local random walk, no network
    Simulated(FeedGenerator),
    /// Poll the backend's trading data endpoint
    Remote(TradingApiClient),
}

impl FeedSource {
    pub fn kind(&self) -> &'static str {
        match self {
            FeedSource::Simulated(_) => "simulated",
            FeedSource::Remote(_) => "remote",
        }
    }
}

#[derive(Debug)]
struct FeedView {
    store: PairStore,
    publisher: FeedPublisher,
    sequence: u64,
    latest: Option<Tick>,
}

impl FeedView {
    /// Snapshot the store as the next tick and publish it
    fn complete_tick(&mut self) -> Tick {
        self.sequence += 1;
        let tick = Tick::new(self.sequence, self.store.current().to_vec());
        self.publisher.publish(&tick);
        self.latest = Some(tick.clone());
        tick
    }
}

#[derive(Debug)]
struct FeedShared {
    source: tokio::sync::Mutex<FeedSource>,
    view: Mutex<FeedView>,
    updates: watch::Sender<Option<Tick>>,
    log_ticks: bool,
}

impl FeedShared {
    fn lock_view(&self) -> MutexGuard<'_, FeedView> {
        self.view.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Owns the pair state, the tick source and the display targets for one
/// session. Cheap to clone; clones share state.
#[derive(Debug, Clone)]
pub struct MarketFeed {
    shared: Arc<FeedShared>,
}

impl MarketFeed {
    pub fn new(source: FeedSource, config: &Config) -> Self {
        // Remote feeds hold nothing until the first successful poll
        let mut store = PairStore::new();
        if let FeedSource::Simulated(_) = source {
            store.initialize(seed_pairs());
        }

        let publisher = FeedPublisher::new(config.display.clone())
            .with_publish_logging(config.logging.enable_publish_logging);

        let (updates, _) = watch::channel(None);

        Self {
            shared: Arc::new(FeedShared {
                source: tokio::sync::Mutex::new(source),
                view: Mutex::new(FeedView {
                    store,
                    publisher,
                    sequence: 0,
                    latest: None,
                }),
                updates,
                log_ticks: config.logging.enable_tick_logging,
            }),
        }
    }

    /// Local simulation seeded with the fixed starting values
    pub fn simulated(config: &Config) -> Self {
        Self::new(FeedSource::Simulated(FeedGenerator::new(config.feed.clone())), config)
    }

    /// Backend-driven feed polling `GET /api/trading/data`. The pair list
    /// stays empty until a poll succeeds.
    pub fn remote(config: &Config) -> FeedResult<Self> {
        let client = TradingApiClient::from_config(&config.backend)?;
        Ok(Self::new(FeedSource::Remote(client), config))
    }

    /// Remote when the backend is enabled, simulated otherwise
    pub fn from_config(config: &Config) -> FeedResult<Self> {
        if config.backend.enabled {
            Self::remote(config)
        } else {
            Ok(Self::simulated(config))
        }
    }

    pub fn register_target(&self, target: Box<dyn DisplayTarget>) {
        self.shared.lock_view().publisher.register(target);
    }

    pub fn unregister_target(&self, name: &str) -> bool {
        self.shared.lock_view().publisher.unregister(name)
    }

    /// Pair values as of the latest completed tick
    pub fn current(&self) -> Vec<TradingPair> {
        self.shared.lock_view().store.current().to_vec()
    }

    pub fn latest_tick(&self) -> Option<Tick> {
        self.shared.lock_view().latest.clone()
    }

    /// Number of completed ticks
    pub fn tick_count(&self) -> u64 {
        self.shared.lock_view().sequence
    }

    /// Latest tick for programmatic consumers; intermediate ticks are not queued
    pub fn subscribe(&self) -> watch::Receiver<Option<Tick>> {
        self.shared.updates.subscribe()
    }

    /// Run one tick. A failed backend poll leaves the store and every display
    /// untouched.
    pub async fn run_cycle(&self) -> FeedResult<Tick> {
        let mut source = self.shared.source.lock().await;

        let tick = match &mut *source {
            FeedSource::Simulated(generator) => self.apply_generated(generator),
            FeedSource::Remote(client) => {
                let data = match client.fetch_trading_data().await {
                    Ok(data) => data,
                    Err(err) => {
                        warn!("⚠️  Failed to load trading data from {}: {}", client.base_url(), err);
                        return Err(FeedError::Api(err));
                    }
                };
                self.apply_fetched(data.pairs)
            }
        };
        drop(source);

        if self.shared.log_ticks {
            let summary: Vec<String> = tick
                .pairs
                .iter()
                .map(|p| format!("{} {:.2}", p.pair, p.value))
                .collect();
            debug!("🎲 Tick #{}: {}", tick.sequence, summary.join(" | "));
        }

        self.shared.updates.send_replace(Some(tick.clone()));
        Ok(tick)
    }

    // Guards stay in these sync helpers so the cycle future remains Send.
    fn apply_generated(&self, generator: &mut FeedGenerator) -> Tick {
        let mut view = self.shared.lock_view();
        generator.tick(view.store.pairs_mut());
        view.complete_tick()
    }

    fn apply_fetched(&self, pairs: Vec<TradingPair>) -> Tick {
        let mut view = self.shared.lock_view();
        view.store.replace(pairs);
        view.complete_tick()
    }

    /// Publish one tick now, then one every `interval` until the handle is
    /// stopped or dropped.
    pub async fn start(&self, interval: Duration) -> FeedHandle {
        let interval = interval.max(Duration::from_millis(1));
        let kind = self.shared.source.lock().await.kind();
        info!("🚀 Starting {} feed, interval {}ms", kind, interval.as_millis());

        // Failures are already logged; the schedule starts regardless.
        let _ = self.run_cycle().await;

        let (stop_tx, mut stop_rx) = watch::channel(false);
        let feed = self.clone();

        let task = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    biased;
                    changed = stop_rx.changed() => {
                        if changed.is_err() || *stop_rx.borrow() {
                            break;
                        }
                    }
                    _ = ticker.tick() => {
                        // Failures are already logged; keep the cadence.
                        let _ = feed.run_cycle().await;
                    }
                }
            }

            info!("🛑 {} feed stopped", kind);
        });

        FeedHandle {
            state: FeedState::Running,
            stop_tx: Some(stop_tx),
            task: Some(task),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedState {
    Unstarted,
    Running,
    Stopped,
}

/// Cancellation handle for a running feed. Dropping it stops the schedule.
#[derive(Debug)]
pub struct FeedHandle {
    state: FeedState,
    stop_tx: Option<watch::Sender<bool>>,
    task: Option<JoinHandle<()>>,
}

impl FeedHandle {
    /// Placeholder for a view that has not activated the feed yet
    pub fn unstarted() -> Self {
        Self {
            state: FeedState::Unstarted,
            stop_tx: None,
            task: None,
        }
    }

    pub fn state(&self) -> FeedState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == FeedState::Running
    }

    /// Cancel future ticks. A tick already in progress completes. Safe to
    /// call any number of times.
    pub fn stop(&mut self) {
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(true);
        }
        if self.state == FeedState::Running {
            self.state = FeedState::Stopped;
        }
    }

    /// Stop and wait for the background task to exit
    pub async fn shutdown(mut self) {
        self.stop();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                warn!("Feed task ended abnormally: {}", e);
            }
        }
    }
}

impl Default for FeedHandle {
    fn default() -> Self {
        Self::unstarted()
    }
}

impl Drop for FeedHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FeedConfig;
    use crate::core::publisher::GridRegion;

    fn seeded_config() -> Config {
        Config {
            feed: FeedConfig {
                seed: Some(11),
                ..FeedConfig::default()
            },
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn test_only_simulated_feed_starts_seeded() {
        let config = seeded_config();
        let simulated = MarketFeed::simulated(&config);
        assert_eq!(simulated.current(), seed_pairs());

        let client = TradingApiClient::from_config(&config.backend).unwrap();
        let remote = MarketFeed::new(FeedSource::Remote(client), &config);
        assert!(remote.current().is_empty());
        assert!(remote.latest_tick().is_none());
    }

    #[tokio::test]
    async fn test_run_cycle_updates_every_pair() {
        let feed = MarketFeed::simulated(&seeded_config());
        let before = feed.current();

        let tick = feed.run_cycle().await.unwrap();

        assert_eq!(tick.sequence, 1);
        assert_eq!(tick.pairs.len(), before.len());
        assert_eq!(feed.current(), tick.pairs);
        for (old, new) in before.iter().zip(&tick.pairs) {
            assert_eq!(old.pair, new.pair);
            assert_ne!(old.value, new.value);
        }
    }

    #[tokio::test]
    async fn test_subscriber_sees_latest_tick() {
        let feed = MarketFeed::simulated(&seeded_config());
        let rx = feed.subscribe();
        assert!(rx.borrow().is_none());

        feed.run_cycle().await.unwrap();
        feed.run_cycle().await.unwrap();

        let latest = rx.borrow().clone().unwrap();
        assert_eq!(latest.sequence, 2);
        assert_eq!(feed.latest_tick(), Some(latest));
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_publishes_before_first_interval() {
        let feed = MarketFeed::simulated(&seeded_config());
        let region = GridRegion::new("tradingGrid");
        feed.register_target(Box::new(region.clone()));

        let handle = feed.start(Duration::from_millis(4000)).await;

        assert_eq!(region.render_count(), 1);
        assert_eq!(region.cards().len(), 4);
        assert!(handle.is_running());
        handle.shutdown().await;
    }

    #[test]
    fn test_unstarted_handle_stop_is_noop() {
        let mut handle = FeedHandle::unstarted();
        handle.stop();
        handle.stop();
        assert_eq!(handle.state(), FeedState::Unstarted);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_is_idempotent() {
        let feed = MarketFeed::simulated(&seeded_config());
        let mut handle = feed.start(Duration::from_millis(4000)).await;

        handle.stop();
        handle.stop();
        assert_eq!(handle.state(), FeedState::Stopped);
    }
}
