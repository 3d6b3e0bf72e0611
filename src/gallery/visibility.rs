//! Visibility tracking and render-once dispatch.
//!
//! # Invariants
//! - Once an entry has rendered it is never dispatched again, however many
//!   `is_intersecting = true` reports follow.
//! - `visible_count` equals the number of registered entries whose last
//!   report was intersecting, so it can never go negative.

use std::collections::HashMap;

use log::debug;

use crate::platform::intersection::IntersectionEntry;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VisibilityState {
    pub is_visible: bool,
    pub has_rendered: bool,
}

#[derive(Debug, Default)]
pub struct VisibilityTracker {
    states: HashMap<u64, VisibilityState>,
    visible: usize,
}

impl VisibilityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking `id`. Registering twice keeps the existing state.
    pub fn register(&mut self, id: u64) {
        self.states.entry(id).or_default();
    }

    pub fn is_registered(&self, id: u64) -> bool {
        self.states.contains_key(&id)
    }

    pub fn state(&self, id: u64) -> Option<VisibilityState> {
        self.states.get(&id).copied()
    }

    pub fn visible_count(&self) -> usize {
        self.visible
    }

    /// Apply a batch of intersection changes and return the entries that
    /// should be rendered now, in batch order.
    pub fn observe(&mut self, batch: &[IntersectionEntry]) -> Vec<u64> {
        let mut to_render = Vec::new();
        for entry in batch {
            let Some(state) = self.states.get_mut(&entry.target) else {
                debug!("ignoring intersection for unregistered entry {}", entry.target);
                continue;
            };
            match (state.is_visible, entry.is_intersecting) {
                (false, true) => {
                    state.is_visible = true;
                    self.visible += 1;
                    if !state.has_rendered && !to_render.contains(&entry.target) {
                        to_render.push(entry.target);
                    }
                }
                (true, false) => {
                    state.is_visible = false;
                    self.visible = self.visible.saturating_sub(1);
                }
                _ => {}
            }
        }
        to_render
    }

    /// Record a successful render. Returns false when `id` is unknown.
    pub fn mark_rendered(&mut self, id: u64) -> bool {
        match self.states.get_mut(&id) {
            Some(state) => {
                state.has_rendered = true;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(target: u64, is_intersecting: bool) -> IntersectionEntry {
        IntersectionEntry {
            target,
            is_intersecting,
            intersection_ratio: if is_intersecting { 1.0 } else { 0.0 },
        }
    }

    #[test]
    fn first_visible_report_dispatches_render() {
        let mut t = VisibilityTracker::new();
        t.register(0);
        assert_eq!(t.observe(&[entry(0, true)]), vec![0]);
        assert_eq!(t.visible_count(), 1);
        assert_eq!(t.state(0), Some(VisibilityState { is_visible: true, has_rendered: false }));
    }

    #[test]
    fn rendered_entry_is_never_dispatched_again() {
        let mut t = VisibilityTracker::new();
        t.register(3);
        assert_eq!(t.observe(&[entry(3, true)]), vec![3]);
        assert!(t.mark_rendered(3));
        assert!(t.observe(&[entry(3, true)]).is_empty());
        assert!(t.observe(&[entry(3, false)]).is_empty());
        assert!(t.observe(&[entry(3, true)]).is_empty());
        assert_eq!(t.visible_count(), 1);
    }

    #[test]
    fn oscillation_within_a_batch_dispatches_once() {
        let mut t = VisibilityTracker::new();
        t.register(1);
        let batch = [entry(1, true), entry(1, false), entry(1, true)];
        assert_eq!(t.observe(&batch), vec![1]);
        assert_eq!(t.visible_count(), 1);
    }

    #[test]
    fn counter_tracks_last_reports_and_never_underflows() {
        let mut t = VisibilityTracker::new();
        for id in 0..3 {
            t.register(id);
        }
        t.observe(&[entry(0, false), entry(1, false)]);
        assert_eq!(t.visible_count(), 0);
        t.observe(&[entry(0, true), entry(1, true), entry(2, true)]);
        assert_eq!(t.visible_count(), 3);
        t.observe(&[entry(1, false), entry(1, false)]);
        assert_eq!(t.visible_count(), 2);
    }

    #[test]
    fn unregistered_entries_are_ignored() {
        let mut t = VisibilityTracker::new();
        assert!(t.observe(&[entry(9, true)]).is_empty());
        assert_eq!(t.visible_count(), 0);
        assert!(!t.mark_rendered(9));
    }
}
