/// Gallery cards: the on-screen entry for one catalog item

use serde::Serialize;

use crate::gallery::catalog::{location_for, GalleryItem, Location};
use crate::rendering::layout::Rect;

/// What currently occupies the card's image area
#[derive(Debug)]
pub enum SurfaceSlot<S> {
    /// "Loading image..." placeholder waiting to be replaced
    Placeholder,
    Rendered(S),
    /// The host removed the placeholder element
    Missing,
}

#[derive(Debug)]
pub struct PhotoCard<S> {
    pub item_id: u64,
    pub title: String,
    pub details: String,
    pub location: &'static Location,
    pub location_text: String,
    pub rect: Rect,
    pub slot: SurfaceSlot<S>,
}

impl<S> PhotoCard<S> {
    pub fn new(item: &GalleryItem, rect: Rect, located: bool) -> Self {
        let location = location_for(item.id);
        Self {
            item_id: item.id,
            title: format!("Photo {}", item.id + 1),
            details: format!(
                "Generated • {} • Quality: {}",
                item.created_at.format("%Y-%m-%d"),
                item.quality_at_creation
            ),
            location,
            location_text: location.label(located),
            rect,
            slot: SurfaceSlot::Placeholder,
        }
    }

    pub fn relabel(&mut self, located: bool) {
        self.location_text = self.location.label(located);
    }

    pub fn surface(&self) -> Option<&S> {
        match &self.slot {
            SurfaceSlot::Rendered(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_rendered(&self) -> bool {
        matches!(self.slot, SurfaceSlot::Rendered(_))
    }

    pub fn summary(&self) -> CardSummary {
        CardSummary {
            id: self.item_id,
            title: self.title.clone(),
            location: self.location_text.clone(),
            details: self.details.clone(),
            rendered: self.is_rendered(),
        }
    }
}

/// Serializable view of a card without its pixels
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardSummary {
    pub id: u64,
    pub title: String,
    pub location: String,
    pub details: String,
    pub rendered: bool,
}
