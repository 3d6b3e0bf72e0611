/// Viewport intersection tracking for observed gallery cards

use std::collections::HashMap;

use crate::rendering::layout::Rect;

/// Observer options. The root is always the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionObserverInit {
    /// Growth of the root on every side, in CSS pixels
    pub root_margin: f64,
    /// Minimum visible fraction of a target's area
    pub threshold: f64,
}

impl Default for IntersectionObserverInit {
    fn default() -> Self {
        Self {
            root_margin: 50.0,
            threshold: 0.1,
        }
    }
}

/// One record in a change batch
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    pub target: u64,
    pub is_intersecting: bool,
    pub intersection_ratio: f64,
}

struct Target {
    id: u64,
    rect: Rect,
    last: Option<bool>,
}

pub struct IntersectionObserver {
    init: IntersectionObserverInit,
    targets: Vec<Target>,
    index: HashMap<u64, usize>,
}

impl IntersectionObserver {
    pub fn new(init: IntersectionObserverInit) -> Self {
        Self {
            init,
            targets: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn init(&self) -> IntersectionObserverInit {
        self.init
    }

    /// Start observing `id` at document-space `rect`. Re-observing moves the
    /// target and forces a fresh initial record.
    pub fn observe(&mut self, id: u64, rect: Rect) {
        if let Some(&i) = self.index.get(&id) {
            self.targets[i].rect = rect;
            self.targets[i].last = None;
            return;
        }
        self.index.insert(id, self.targets.len());
        self.targets.push(Target { id, rect, last: None });
    }

    pub fn unobserve(&mut self, id: u64) {
        if self.index.remove(&id).is_some() {
            self.targets.retain(|t| t.id != id);
            self.index = self.targets.iter().enumerate().map(|(i, t)| (t.id, i)).collect();
        }
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Fraction of `target` inside the margin-expanded `viewport`
    pub fn ratio(&self, target: &Rect, viewport: &Rect) -> Option<f64> {
        let root = viewport.inflate(self.init.root_margin);
        let overlap = target.intersection(&root)?;
        let area = target.area();
        if area <= 0.0 {
            return Some(1.0);
        }
        Some(overlap.area() / area)
    }

    /// Evaluate every target against `viewport` and return the records that
    /// changed since the last evaluation. New targets always report.
    pub fn take_records(&mut self, viewport: &Rect) -> Vec<IntersectionEntry> {
        let mut records = Vec::new();
        for i in 0..self.targets.len() {
            let ratio = self.ratio(&self.targets[i].rect, viewport);
            let is_intersecting = match ratio {
                Some(r) => r >= self.init.threshold,
                None => false,
            };
            let target = &mut self.targets[i];
            if target.last != Some(is_intersecting) {
                target.last = Some(is_intersecting);
                records.push(IntersectionEntry {
                    target: target.id,
                    is_intersecting,
                    intersection_ratio: ratio.unwrap_or(0.0),
                });
            }
        }
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport(scroll_y: f64) -> Rect {
        Rect::new(0.0, scroll_y, 1000.0, 600.0)
    }

    #[test]
    fn first_evaluation_reports_every_target() {
        let mut o = IntersectionObserver::new(IntersectionObserverInit::default());
        o.observe(0, Rect::new(0.0, 0.0, 300.0, 300.0));
        o.observe(1, Rect::new(0.0, 5000.0, 300.0, 300.0));
        let recs = o.take_records(&viewport(0.0));
        assert_eq!(recs.len(), 2);
        assert!(recs[0].is_intersecting);
        assert!(!recs[1].is_intersecting);
        assert!(o.take_records(&viewport(0.0)).is_empty());
    }

    #[test]
    fn root_margin_preloads_targets_just_below_the_fold() {
        let mut o = IntersectionObserver::new(IntersectionObserverInit::default());
        // starts 40px below the viewport bottom
        o.observe(7, Rect::new(0.0, 640.0, 300.0, 300.0));
        let recs = o.take_records(&viewport(0.0));
        assert_eq!(recs.len(), 1);
        // only 10px of 300px is inside the expanded root
        assert!(!recs[0].is_intersecting);

        let recs = o.take_records(&viewport(30.0));
        // 40px of 300px is inside now (ratio 0.133)
        assert_eq!(recs.len(), 1);
        assert!(recs[0].is_intersecting);
        assert!(recs[0].intersection_ratio >= 0.1);
    }

    #[test]
    fn threshold_zero_counts_any_overlap() {
        let mut o = IntersectionObserver::new(IntersectionObserverInit {
            root_margin: 0.0,
            threshold: 0.0,
        });
        o.observe(1, Rect::new(0.0, 599.0, 100.0, 100.0));
        assert!(o.take_records(&viewport(0.0))[0].is_intersecting);
    }

    #[test]
    fn unobserve_stops_reports() {
        let mut o = IntersectionObserver::new(IntersectionObserverInit::default());
        o.observe(1, Rect::new(0.0, 0.0, 10.0, 10.0));
        o.observe(2, Rect::new(0.0, 0.0, 10.0, 10.0));
        o.unobserve(1);
        assert_eq!(o.len(), 1);
        let recs = o.take_records(&viewport(0.0));
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].target, 2);
    }
}
