//! Gallery state and event handling
//!
//! [`Gallery`] owns everything the widget knows: the catalog, the on-screen
//! cards, visibility bookkeeping, the latest network snapshot, location state
//! and the status board. It is driven by one [`GalleryEvent`] at a time;
//! each call to [`Gallery::handle`] runs to completion and returns the
//! [`Followup`]s the host should schedule (timers, idle ticks, location
//! requests).

pub mod card;
pub mod catalog;
pub mod quality;
pub mod status;
pub mod visibility;

use std::time::Duration;

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::platform::geolocation::{LocationError, Position, PositionOptions};
use crate::platform::idle::IdleDeadline;
use crate::platform::intersection::{IntersectionEntry, IntersectionObserver, IntersectionObserverInit};
use crate::platform::network::NetworkCondition;
use crate::rendering::layout::{GridLayout, Rect};
use crate::rendering::paint::DrawingSurface;
use crate::rendering::placeholder::render_placeholder;
use crate::{Error, GalleryConfig, Result};

pub use card::{CardSummary, PhotoCard, SurfaceSlot};
pub use catalog::{Catalog, GalleryItem, Location, LOCATIONS};
pub use quality::QualityTier;
pub use status::{ButtonState, StatusBoard};
pub use visibility::{VisibilityState, VisibilityTracker};

/// A discrete signal from the host or the user
#[derive(Debug, Clone)]
pub enum GalleryEvent {
    /// The page finished loading
    Loaded,
    /// The user asked for more photos
    GenerateRequested,
    /// The simulated batch delay elapsed
    BatchReady,
    /// The viewport scrolled to a new document offset
    Scrolled { offset_y: f64 },
    /// Intersection changes delivered directly by the host
    Intersections(Vec<IntersectionEntry>),
    /// The user pressed "Enable Location"
    LocationRequested,
    LocationResolved(std::result::Result<Position, LocationError>),
    /// `None` means the host has no network information
    NetworkChanged(Option<NetworkCondition>),
    IdleTick(Option<IdleDeadline>),
    ToggleOptimization,
    Shutdown,
}

/// Deferred work the gallery asks its host to perform
#[derive(Debug, Clone)]
pub enum Followup {
    /// Deliver the event after the delay
    After(Duration, GalleryEvent),
    /// Schedule the next idle tick; `initial` marks the first one
    Idle { initial: bool },
    RequestLocation(PositionOptions),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LocationState {
    Disabled,
    Pending,
    Enabled(Position),
}

/// Serializable view of the whole gallery
#[derive(Debug, Clone, Serialize)]
pub struct GallerySnapshot {
    pub items: Vec<GalleryItem>,
    pub cards: Vec<CardSummary>,
    pub quality: QualityTier,
    pub visible_items: usize,
    pub rendered_items: usize,
    pub status: StatusBoard,
}

pub struct Gallery<S> {
    config: GalleryConfig,
    layout: GridLayout,
    catalog: Catalog,
    cards: Vec<PhotoCard<S>>,
    tracker: VisibilityTracker,
    observer: IntersectionObserver,
    network: Option<NetworkCondition>,
    location: LocationState,
    optimized: bool,
    scroll_y: f64,
    status: StatusBoard,
    rng: StdRng,
}

impl<S: DrawingSurface> Gallery<S> {
    pub fn new(config: GalleryConfig) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let layout = GridLayout {
            columns: config.columns,
            card_width: config.surface_width as f64,
            card_height: config.surface_height as f64 + config.info_height,
            gap: config.gap,
            top_offset: config.header_height,
        };
        let observer = IntersectionObserver::new(IntersectionObserverInit {
            root_margin: config.root_margin,
            threshold: config.threshold,
        });
        Ok(Self {
            config,
            layout,
            catalog: Catalog::new(),
            cards: Vec::new(),
            tracker: VisibilityTracker::new(),
            observer,
            network: None,
            location: LocationState::Disabled,
            optimized: false,
            scroll_y: 0.0,
            status: StatusBoard::default(),
            rng,
        })
    }

    /// Process one event to completion
    pub fn handle(&mut self, event: GalleryEvent) -> Vec<Followup> {
        match event {
            GalleryEvent::Loaded => vec![
                Followup::After(
                    Duration::from_millis(self.config.initial_load_delay_ms),
                    GalleryEvent::GenerateRequested,
                ),
                Followup::Idle { initial: true },
            ],
            GalleryEvent::GenerateRequested => {
                self.status.loading_more = true;
                vec![Followup::After(
                    Duration::from_millis(self.config.batch_delay_ms),
                    GalleryEvent::BatchReady,
                )]
            }
            GalleryEvent::BatchReady => {
                self.append_batch(self.config.batch_size);
                Vec::new()
            }
            GalleryEvent::Scrolled { offset_y } => {
                self.scroll_to(offset_y);
                Vec::new()
            }
            GalleryEvent::Intersections(batch) => {
                self.apply_intersections(&batch);
                Vec::new()
            }
            GalleryEvent::LocationRequested => self.request_location(),
            GalleryEvent::LocationResolved(outcome) => {
                self.resolve_location(outcome);
                Vec::new()
            }
            GalleryEvent::NetworkChanged(condition) => {
                self.network = condition;
                self.status.network_changed(self.network.as_ref());
                Vec::new()
            }
            GalleryEvent::IdleTick(deadline) => {
                if deadline.map_or(true, |d| !d.did_timeout()) {
                    self.status.performance(self.optimized);
                }
                vec![Followup::Idle { initial: false }]
            }
            GalleryEvent::ToggleOptimization => {
                self.optimized = !self.optimized;
                self.status.optimization_toggled(self.optimized);
                Vec::new()
            }
            GalleryEvent::Shutdown => Vec::new(),
        }
    }

    /// Append `count` items, lay out and observe their cards in creation
    /// order, then re-evaluate visibility. Returns the new item ids.
    pub fn append_batch(&mut self, count: usize) -> Vec<u64> {
        let quality = self.quality();
        let located = matches!(self.location, LocationState::Enabled(_));
        let mut ids = Vec::with_capacity(count);
        for item in self.catalog.append_batch(count, quality) {
            let rect = self.layout.card_rect(item.id as usize);
            self.cards.push(PhotoCard::new(item, rect, located));
            self.observer.observe(item.id, rect);
            self.tracker.register(item.id);
            ids.push(item.id);
        }
        self.status.loading_more = false;
        debug!("generated {} photos total", self.catalog.len());
        self.refresh_visibility();
        ids
    }

    /// Move the viewport, clamped to the content. Non-finite offsets are ignored.
    pub fn scroll_to(&mut self, offset_y: f64) {
        if !offset_y.is_finite() {
            debug!("ignoring non-finite scroll offset {}", offset_y);
            return;
        }
        let max = (self.layout.content_height(self.cards.len()) - self.config.viewport.height as f64).max(0.0);
        self.scroll_y = offset_y.clamp(0.0, max);
        self.refresh_visibility();
    }

    fn refresh_visibility(&mut self) {
        let viewport = self.viewport_rect();
        let records = self.observer.take_records(&viewport);
        if !records.is_empty() {
            self.apply_intersections(&records);
        }
    }

    fn apply_intersections(&mut self, batch: &[IntersectionEntry]) {
        for id in self.tracker.observe(batch) {
            if let Err(e) = self.render_item(id) {
                warn!("skipping render for item {}: {}", id, e);
            }
        }
        self.status.visible_items(self.tracker.visible_count());
    }

    /// Replace the card's placeholder with a freshly generated image
    fn render_item(&mut self, id: u64) -> Result<()> {
        let tier = self.quality();
        let (w, h) = (self.config.surface_width, self.config.surface_height);
        let card = usize::try_from(id)
            .ok()
            .and_then(|i| self.cards.get_mut(i))
            .ok_or(Error::MissingSurface(id))?;
        if !matches!(card.slot, SurfaceSlot::Placeholder) {
            return Err(Error::MissingSurface(id));
        }

        let mut surface = S::blank(w, h);
        render_placeholder(&mut surface, w, h, tier, &mut self.rng);
        card.slot = SurfaceSlot::Rendered(surface);
        self.tracker.mark_rendered(id);
        debug!("canvas image generated for item {}: {}x{} quality {}", id, w, h, tier);
        Ok(())
    }

    fn request_location(&mut self) -> Vec<Followup> {
        match self.location {
            LocationState::Disabled => {
                self.location = LocationState::Pending;
                self.status.location_pending();
                vec![Followup::RequestLocation(PositionOptions::default())]
            }
            LocationState::Pending | LocationState::Enabled(_) => {
                debug!("location request ignored in state {:?}", self.location);
                Vec::new()
            }
        }
    }

    fn resolve_location(&mut self, outcome: std::result::Result<Position, LocationError>) {
        match outcome {
            Ok(pos) => {
                info!("location enabled at {:.4}, {:.4}", pos.lat, pos.lng);
                self.location = LocationState::Enabled(pos);
                self.status.location_enabled(&pos);
                for card in &mut self.cards {
                    card.relabel(true);
                }
            }
            Err(e) => {
                warn!("location request failed: {}", e);
                if !matches!(self.location, LocationState::Enabled(_)) {
                    self.location = LocationState::Disabled;
                    self.status.location_failed(&e);
                }
            }
        }
    }

    /// The host removed the placeholder element of this card
    pub fn remove_placeholder(&mut self, id: u64) -> bool {
        match usize::try_from(id).ok().and_then(|i| self.cards.get_mut(i)) {
            Some(card) if matches!(card.slot, SurfaceSlot::Placeholder) => {
                card.slot = SurfaceSlot::Missing;
                true
            }
            _ => false,
        }
    }

    /// Tier the generator would use right now
    pub fn quality(&self) -> QualityTier {
        quality::select(self.network.as_ref())
    }

    pub fn viewport_rect(&self) -> Rect {
        Rect::new(
            0.0,
            self.scroll_y,
            self.config.viewport.width as f64,
            self.config.viewport.height as f64,
        )
    }

    pub fn config(&self) -> &GalleryConfig {
        &self.config
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cards(&self) -> &[PhotoCard<S>] {
        &self.cards
    }

    pub fn card(&self, id: u64) -> Option<&PhotoCard<S>> {
        self.cards.get(usize::try_from(id).ok()?)
    }

    pub fn tracker(&self) -> &VisibilityTracker {
        &self.tracker
    }

    pub fn status(&self) -> &StatusBoard {
        &self.status
    }

    pub fn network(&self) -> Option<&NetworkCondition> {
        self.network.as_ref()
    }

    pub fn location(&self) -> LocationState {
        self.location
    }

    pub fn is_optimized(&self) -> bool {
        self.optimized
    }

    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    pub fn snapshot(&self) -> GallerySnapshot {
        GallerySnapshot {
            items: self.catalog.items().to_vec(),
            cards: self.cards.iter().map(PhotoCard::summary).collect(),
            quality: self.quality(),
            visible_items: self.tracker.visible_count(),
            rendered_items: self.cards.iter().filter(|c| c.is_rendered()).count(),
            status: self.status.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::network::EffectiveType;
    use crate::rendering::paint::RecordingSurface;

    fn gallery() -> Gallery<RecordingSurface> {
        Gallery::new(GalleryConfig {
            seed: Some(11),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn loaded_schedules_first_batch_and_idle_work() {
        let mut g = gallery();
        let f = g.handle(GalleryEvent::Loaded);
        assert_eq!(f.len(), 2);
        assert!(matches!(
            &f[0],
            Followup::After(d, GalleryEvent::GenerateRequested) if *d == Duration::from_millis(500)
        ));
        assert!(matches!(f[1], Followup::Idle { initial: true }));
    }

    #[test]
    fn generate_then_batch_ready_appends_six() {
        let mut g = gallery();
        let f = g.handle(GalleryEvent::GenerateRequested);
        assert!(g.status().loading_more);
        assert!(matches!(&f[0], Followup::After(d, GalleryEvent::BatchReady) if *d == Duration::from_millis(800)));

        g.handle(GalleryEvent::BatchReady);
        assert!(!g.status().loading_more);
        assert_eq!(g.catalog().len(), 6);
        // the default viewport shows both rows of the first batch
        assert_eq!(g.tracker().visible_count(), 6);
        assert!(g.cards().iter().all(|c| c.is_rendered()));
        assert_eq!(g.status().visibility, "Visible items: 6");
    }

    #[test]
    fn render_uses_current_quality() {
        let mut g = gallery();
        g.handle(GalleryEvent::NetworkChanged(Some(NetworkCondition::new(
            EffectiveType::FourG,
            10.0,
            40.0,
        ))));
        g.append_batch(1);
        assert_eq!(g.card(0).unwrap().surface().unwrap().circle_count(), 20);
        assert_eq!(g.catalog().get(0).unwrap().quality_at_creation, QualityTier::High);
    }

    #[test]
    fn missing_placeholder_is_skipped() {
        let mut g = gallery();
        g.handle(GalleryEvent::Scrolled { offset_y: 0.0 });
        g.append_batch(6);
        g.append_batch(6);
        assert!(g.remove_placeholder(6));
        g.scroll_to(700.0);
        assert!(g.card(6).unwrap().surface().is_none());
        assert!(g.card(7).unwrap().is_rendered());
        assert!(!g.tracker().state(6).unwrap().has_rendered);
    }

    #[test]
    fn non_finite_scroll_keeps_previous_offset() {
        let mut g = gallery();
        g.append_batch(6);
        g.append_batch(6);
        g.handle(GalleryEvent::Scrolled { offset_y: 700.0 });
        assert_eq!(g.scroll_y(), 700.0);
        let visible = g.tracker().visible_count();

        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            g.handle(GalleryEvent::Scrolled { offset_y: bad });
            assert_eq!(g.scroll_y(), 700.0);
            assert_eq!(g.tracker().visible_count(), visible);
        }
        assert!(g.viewport_rect().y.is_finite());
    }

    #[test]
    fn location_request_is_not_repeated_while_pending() {
        let mut g = gallery();
        assert_eq!(g.handle(GalleryEvent::LocationRequested).len(), 1);
        assert!(g.handle(GalleryEvent::LocationRequested).is_empty());
        g.handle(GalleryEvent::LocationResolved(Err(LocationError::Timeout)));
        assert_eq!(g.location(), LocationState::Disabled);
        assert_eq!(g.status().location, "Location: Error - Timeout expired");
        // retry allowed after failure
        assert_eq!(g.handle(GalleryEvent::LocationRequested).len(), 1);
    }

    #[test]
    fn idle_tick_without_time_left_skips_status_update() {
        let mut g = gallery();
        g.handle(GalleryEvent::ToggleOptimization);
        let f = g.handle(GalleryEvent::IdleTick(Some(IdleDeadline::new(Duration::ZERO))));
        assert_eq!(g.status().performance, "Performance: Standard mode");
        assert!(matches!(f[0], Followup::Idle { initial: false }));

        g.handle(GalleryEvent::IdleTick(None));
        assert_eq!(g.status().performance, "Performance: Optimized mode");
    }
}
