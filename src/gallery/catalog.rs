/// Append-only photo catalog and the static location table

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::gallery::quality::QualityTier;

/// A generated photo record. Never changes after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryItem {
    pub id: u64,
    pub created_at: DateTime<Utc>,
    pub quality_at_creation: QualityTier,
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<GalleryItem>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `count` items with ids continuing from the current length and
    /// return the new slice. `quality` is recorded as-is on every item.
    pub fn append_batch(&mut self, count: usize, quality: QualityTier) -> &[GalleryItem] {
        let start = self.items.len();
        let now = Utc::now();
        self.items.extend((start..start + count).map(|i| GalleryItem {
            id: i as u64,
            created_at: now,
            quality_at_creation: quality,
        }));
        &self.items[start..]
    }

    pub fn items(&self) -> &[GalleryItem] {
        &self.items
    }

    pub fn get(&self, id: u64) -> Option<&GalleryItem> {
        self.items.get(usize::try_from(id).ok()?)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// A named place with a precomputed distance from the user
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Location {
    pub name: &'static str,
    pub distance_km: f64,
}

pub const LOCATIONS: [Location; 6] = [
    Location { name: "Knowledge Park-II, GB", distance_km: 2.5 },
    Location { name: "Venice,Greater Noida", distance_km: 45.2 },
    Location { name: "Delhi, India", distance_km: 1.8 },
    Location { name: "Venice Beach, India", distance_km: 32.1 },
    Location { name: "Naini Bridge, India", distance_km: 3.2 },
    Location { name: "Lombard Street, noida", distance_km: 46.8 },
];

/// Location shown on the card at `index`
pub fn location_for(index: u64) -> &'static Location {
    &LOCATIONS[(index % LOCATIONS.len() as u64) as usize]
}

impl Location {
    /// Card label, with the distance once the user's position is known
    pub fn label(&self, located: bool) -> String {
        if located {
            format!("📍 {} ({}km away)", self.name, self.distance_km)
        } else {
            format!("📍 {}", self.name)
        }
    }
}
