// Feed command implementations
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};
use trading_feed::display::{render_cards, render_grid_text};
use trading_feed::{Config, ConsoleGrid, FeedResult, MarketFeed};

pub fn init_config(path: &str, force: bool) -> FeedResult<()> {
    if Path::new(path).exists() && !force {
        warn!("⚠️  {} already exists (use --force to overwrite)", path);
        return Ok(());
    }

    Config::default().to_file(path)?;
    info!("✅ Wrote default configuration to {}", path);
    Ok(())
}

pub async fn run_simulation(
    mut config: Config,
    interval_ms: Option<u64>,
    duration_secs: Option<u64>,
    seed: Option<u64>,
) -> FeedResult<()> {
    if let Some(ms) = interval_ms {
        config.feed.interval_ms = ms;
    }
    if seed.is_some() {
        config.feed.seed = seed;
    }
    config.validate()?;

    info!("🎲 Local simulation (no backend)");
    let feed = MarketFeed::simulated(&config);
    run_feed(feed, &config, duration_secs).await
}

pub async fn run_polling(
    mut config: Config,
    url: Option<String>,
    interval_ms: Option<u64>,
    duration_secs: Option<u64>,
) -> FeedResult<()> {
    if let Some(url) = url {
        config.backend.base_url = url.trim_end_matches('/').to_string();
    }
    if let Some(ms) = interval_ms {
        config.feed.interval_ms = ms;
    }
    config.backend.enabled = true;
    config.validate()?;

    info!("🔗 Polling {}", config.backend.base_url);
    let feed = MarketFeed::remote(&config)?;
    run_feed(feed, &config, duration_secs).await
}

/// Print one tick from the configured source
pub async fn snapshot(config: Config, json: bool) -> FeedResult<()> {
    let feed = MarketFeed::from_config(&config)?;
    let tick = feed.run_cycle().await?;

    if json {
        let out = serde_json::to_string_pretty(&tick)?;
        println!("{}", out);
    } else {
        print!("{}", render_grid_text(&render_cards(&tick.pairs, &config.display)));
    }
    Ok(())
}

async fn run_feed(feed: MarketFeed, config: &Config, duration_secs: Option<u64>) -> FeedResult<()> {
    feed.register_target(Box::new(ConsoleGrid::new("Trading en Vivo")));

    let interval = Duration::from_millis(config.feed.interval_ms);
    let handle = feed.start(interval).await;

    match duration_secs {
        Some(secs) => {
            tokio::select! {
                _ = tokio::time::sleep(Duration::from_secs(secs)) => {
                    info!("⏰ Session completed after {}s", secs);
                }
                _ = tokio::signal::ctrl_c() => {
                    info!("👋 Interrupted");
                }
            }
        }
        None => {
            tokio::signal::ctrl_c().await?;
            info!("👋 Interrupted");
        }
    }

    handle.shutdown().await;
    info!("📊 {} ticks published", feed.tick_count());
    Ok(())
}
