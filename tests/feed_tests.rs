// Integration tests for the scheduled feed and its display targets

mod common;

use common::create_test_config;
use std::time::Duration;
use tokio::time::sleep;
use trading_feed::{FeedHandle, FeedState, GridRegion, MarketFeed};

const INTERVAL: Duration = Duration::from_millis(4000);

#[tokio::test(start_paused = true)]
async fn test_first_tick_is_immediate() {
    let feed = MarketFeed::simulated(&create_test_config());
    let region = GridRegion::new("tradingGrid");
    feed.register_target(Box::new(region.clone()));

    let handle = feed.start(INTERVAL).await;

    // Display is filled before the first interval elapses
    assert_eq!(region.render_count(), 1);
    assert_eq!(region.cards().len(), 4);
    assert_eq!(feed.tick_count(), 1);

    sleep(INTERVAL - Duration::from_millis(10)).await;
    assert_eq!(region.render_count(), 1);

    handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_ticks_on_fixed_interval() {
    let feed = MarketFeed::simulated(&create_test_config());
    let region = GridRegion::new("tradingGrid");
    feed.register_target(Box::new(region.clone()));

    let handle = feed.start(INTERVAL).await;
    sleep(INTERVAL * 3 + Duration::from_millis(10)).await;

    assert_eq!(region.render_count(), 4);
    assert_eq!(feed.tick_count(), 4);

    handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_stop_prevents_future_ticks() {
    let feed = MarketFeed::simulated(&create_test_config());
    let region = GridRegion::new("tradingGrid");
    feed.register_target(Box::new(region.clone()));

    let mut handle = feed.start(INTERVAL).await;
    sleep(INTERVAL + Duration::from_millis(10)).await;
    assert_eq!(region.render_count(), 2);

    handle.stop();
    assert_eq!(handle.state(), FeedState::Stopped);

    sleep(INTERVAL * 5).await;
    assert_eq!(region.render_count(), 2);
    assert_eq!(feed.tick_count(), 2);

    // Stopping again is harmless
    handle.stop();
}

#[tokio::test(start_paused = true)]
async fn test_dropping_handle_stops_feed() {
    let feed = MarketFeed::simulated(&create_test_config());
    let region = GridRegion::new("tradingGrid");
    feed.register_target(Box::new(region.clone()));

    {
        let _handle = feed.start(INTERVAL).await;
        sleep(INTERVAL + Duration::from_millis(10)).await;
    }

    sleep(INTERVAL * 4).await;
    assert_eq!(region.render_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_restart_creates_independent_handle() {
    let feed = MarketFeed::simulated(&create_test_config());
    let region = GridRegion::new("tradingGrid");
    feed.register_target(Box::new(region.clone()));

    let first = feed.start(INTERVAL).await;
    first.shutdown().await;

    let second = feed.start(INTERVAL).await;
    assert!(second.is_running());
    assert_eq!(feed.tick_count(), 2);

    sleep(INTERVAL + Duration::from_millis(10)).await;
    assert_eq!(feed.tick_count(), 3);

    second.shutdown().await;
}

#[test]
fn test_stop_without_start() {
    let mut handle = FeedHandle::default();
    handle.stop();
    assert_eq!(handle.state(), FeedState::Unstarted);
}

#[tokio::test]
async fn test_every_pair_updated_each_tick() {
    let feed = MarketFeed::simulated(&create_test_config());
    let mut previous = feed.current();

    for expected_sequence in 1..=20 {
        let tick = feed.run_cycle().await.unwrap();
        assert_eq!(tick.sequence, expected_sequence);
        assert_eq!(tick.pairs.len(), previous.len());

        for (old, new) in previous.iter().zip(&tick.pairs) {
            assert_eq!(old.pair, new.pair);
            assert_ne!(old.value, new.value, "{} kept a stale value", new.pair);
            assert!(new.value >= 1000.0);
            assert!((-5.0..5.0).contains(&new.change_percent));
        }
        previous = tick.pairs;
    }
}

#[tokio::test(start_paused = true)]
async fn test_missing_target_tolerated_and_resumes() {
    let feed = MarketFeed::simulated(&create_test_config());
    let landing = GridRegion::new("tradingGrid");
    let dashboard = GridRegion::detached("dashboardTradingGrid");
    feed.register_target(Box::new(landing.clone()));
    feed.register_target(Box::new(dashboard.clone()));

    let handle = feed.start(INTERVAL).await;
    sleep(INTERVAL * 2 + Duration::from_millis(10)).await;

    assert_eq!(landing.render_count(), 3);
    assert_eq!(dashboard.render_count(), 0);

    // User navigates to the dashboard
    dashboard.mount();
    landing.unmount();
    sleep(INTERVAL).await;

    assert_eq!(dashboard.render_count(), 1);
    assert!(landing.cards().is_empty());

    let latest = feed.latest_tick().unwrap();
    let cards = dashboard.cards();
    assert_eq!(cards.len(), latest.pairs.len());
    for (card, pair) in cards.iter().zip(&latest.pairs) {
        assert_eq!(card.pair, pair.pair);
        assert_eq!(card.change_text, trading_feed::format_change_percent(pair.change_percent));
        assert_eq!(card.leverage, pair.leverage.label());
    }

    handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_unregistered_target_stops_receiving() {
    let feed = MarketFeed::simulated(&create_test_config());
    let region = GridRegion::new("tradingGrid");
    feed.register_target(Box::new(region.clone()));

    let handle = feed.start(INTERVAL).await;
    assert!(feed.unregister_target("tradingGrid"));

    sleep(INTERVAL * 2 + Duration::from_millis(10)).await;
    assert_eq!(region.render_count(), 1);
    assert_eq!(feed.tick_count(), 3);

    handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_subscriber_gets_latest_only() {
    let feed = MarketFeed::simulated(&create_test_config());
    let mut rx = feed.subscribe();

    let handle = feed.start(INTERVAL).await;
    sleep(INTERVAL * 3 + Duration::from_millis(10)).await;

    assert!(rx.has_changed().unwrap());
    let latest = rx.borrow_and_update().clone().unwrap();
    assert_eq!(latest.sequence, 4);
    assert!(!rx.has_changed().unwrap());

    handle.shutdown().await;
}
