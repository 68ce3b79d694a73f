// Fan-out of completed ticks to display targets

use crate::config::DisplayConfig;
use crate::core::types::Tick;
use crate::display::{render_cards, render_grid_text, TradingCard};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;

/// A UI region that shows the trading grid.
///
/// `render` receives the complete card list of the latest tick and must
/// replace whatever the target showed before.
pub trait DisplayTarget: Send {
    fn name(&self) -> &str;

    /// Unmounted targets are skipped without error
    fn is_mounted(&self) -> bool {
        true
    }

    fn render(&mut self, cards: &[TradingCard]);
}

#[derive(Debug, Default)]
struct RegionState {
    mounted: bool,
    cards: Vec<TradingCard>,
    render_count: u64,
}

/// In-memory grid region. Clones share the same state, so a view can keep
/// one handle while the publisher owns another.
#[derive(Debug, Clone)]
pub struct GridRegion {
    name: String,
    state: Arc<Mutex<RegionState>>,
}

impl GridRegion {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            state: Arc::new(Mutex::new(RegionState {
                mounted: true,
                ..RegionState::default()
            })),
        }
    }

    /// Region that exists but is not currently on screen
    pub fn detached(name: &str) -> Self {
        let region = Self::new(name);
        region.unmount();
        region
    }

    pub fn mount(&self) {
        self.with_state(|s| s.mounted = true);
    }

    /// Drop the rendered content along with the region
    pub fn unmount(&self) {
        self.with_state(|s| {
            s.mounted = false;
            s.cards.clear();
        });
    }

    pub fn cards(&self) -> Vec<TradingCard> {
        self.with_state(|s| s.cards.clone())
    }

    pub fn render_count(&self) -> u64 {
        self.with_state(|s| s.render_count)
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut RegionState) -> T) -> T {
        let mut guard = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }
}

impl DisplayTarget for GridRegion {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_mounted(&self) -> bool {
        self.with_state(|s| s.mounted)
    }

    fn render(&mut self, cards: &[TradingCard]) {
        self.with_state(|s| {
            s.cards = cards.to_vec();
            s.render_count += 1;
        });
    }
}

/// Prints the grid to stdout on every tick
#[derive(Debug, Clone)]
pub struct ConsoleGrid {
    name: String,
}

impl ConsoleGrid {
    pub fn new(name: &str) -> Self {
        Self { name: name.to_string() }
    }
}

impl DisplayTarget for ConsoleGrid {
    fn name(&self) -> &str {
        &self.name
    }

    fn render(&mut self, cards: &[TradingCard]) {
        println!("\n📈 {}", self.name);
        print!("{}", render_grid_text(cards));
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PublishReport {
    pub rendered: usize,
    pub skipped: usize,
}

pub struct FeedPublisher {
    targets: Vec<Box<dyn DisplayTarget>>,
    display: DisplayConfig,
    log_publishes: bool,
}

impl FeedPublisher {
    pub fn new(display: DisplayConfig) -> Self {
        Self {
            targets: Vec::new(),
            display,
            log_publishes: false,
        }
    }

    pub fn with_publish_logging(mut self, enabled: bool) -> Self {
        self.log_publishes = enabled;
        self
    }

    /// A target registered under an existing name replaces the old one
    pub fn register(&mut self, target: Box<dyn DisplayTarget>) {
        self.targets.retain(|t| t.name() != target.name());
        self.targets.push(target);
    }

    pub fn unregister(&mut self, name: &str) -> bool {
        let before = self.targets.len();
        self.targets.retain(|t| t.name() != name);
        self.targets.len() != before
    }

    pub fn target_names(&self) -> Vec<String> {
        self.targets.iter().map(|t| t.name().to_string()).collect()
    }

    /// Render the full tick into every mounted target
    pub fn publish(&mut self, tick: &Tick) -> PublishReport {
        let cards = render_cards(&tick.pairs, &self.display);
        let mut report = PublishReport::default();

        for target in self.targets.iter_mut() {
            if !target.is_mounted() {
                debug!("⏭️  Target '{}' not mounted, skipping tick #{}", target.name(), tick.sequence);
                report.skipped += 1;
                continue;
            }
            target.render(&cards);
            report.rendered += 1;
        }

        if self.log_publishes {
            debug!(
                "🖥️  Published tick #{} to {} target(s), {} skipped",
                tick.sequence, report.rendered, report.skipped
            );
        }

        report
    }
}

impl std::fmt::Debug for FeedPublisher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedPublisher")
            .field("targets", &self.target_names())
            .field("display", &self.display)
            .finish()
    }
}
