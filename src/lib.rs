//! Smart Gallery
//!
//! A headless photo gallery widget that lazily renders procedural placeholder
//! images as cards scroll into view, choosing the level of detail from the
//! current network conditions.
//!
//! # Features
//!
//! - **Lazy loading**: cards render the first time they come within a
//!   proximity margin of the viewport, and never again
//! - **Network-aware quality**: the number of shapes drawn follows the
//!   connection class and downlink estimate
//! - **Emulated platform**: geolocation, network information and idle
//!   scheduling are traits with in-memory implementations for tests
//! - **Software rendering**: placeholders rasterize to RGBA buffers and PNG
//!   (feature `raster`, on by default)
//!
//! # Example
//!
//! ```
//! use smartgallery::gallery::{Gallery, GalleryEvent};
//! use smartgallery::rendering::RecordingSurface;
//! use smartgallery::GalleryConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = GalleryConfig {
//!     seed: Some(7),
//!     ..Default::default()
//! };
//!
//! let mut gallery: Gallery<RecordingSurface> = Gallery::new(config)?;
//! gallery.handle(GalleryEvent::BatchReady);
//! assert_eq!(gallery.catalog().len(), 6);
//! println!("{}", gallery.status().visibility);
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

pub mod error;
pub use error::{Error, Result};

pub mod gallery;
pub mod platform;
pub mod rendering;
pub mod runtime;

pub use gallery::{Gallery, GalleryEvent, QualityTier};
pub use platform::IdleSource;
pub use runtime::{GalleryHandle, GalleryRuntime};

/// Configuration for a gallery instance
///
/// The defaults reproduce the stock widget: a 1280x720 viewport, three columns
/// of 300x250 canvases, a 50px pre-load margin with a 10% visibility
/// threshold, and batches of six photos.
///
/// Config files are JSON; missing fields take their default.
///
/// # Examples
///
/// ```
/// let cfg = smartgallery::GalleryConfig::default();
/// assert_eq!(cfg.batch_size, 6);
/// assert!(cfg.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    /// Viewport dimensions
    pub viewport: Viewport,
    /// Logical canvas size of each rendered image
    pub surface_width: u32,
    pub surface_height: u32,
    /// Height of the caption block under each image
    pub info_height: f64,
    /// Grid columns
    pub columns: u32,
    /// Spacing between cards and around the grid
    pub gap: f64,
    /// Space above the grid (title, status bar, controls)
    pub header_height: f64,
    /// How far outside the viewport cards start loading
    pub root_margin: f64,
    /// Visible fraction of a card needed to count as visible
    pub threshold: f64,
    /// Photos appended per generate request
    pub batch_size: usize,
    /// Delay between page load and the first batch, in milliseconds
    pub initial_load_delay_ms: u64,
    /// Simulated loading time of one batch, in milliseconds
    pub batch_delay_ms: u64,
    /// Spacing of background status refreshes, in milliseconds
    pub idle_interval_ms: u64,
    /// Event source for background ticks
    pub idle_source: IdleSource,
    /// Fixed RNG seed for reproducible images; `None` uses OS entropy
    pub seed: Option<u64>,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            surface_width: 300,
            surface_height: 250,
            info_height: 110.0,
            columns: 3,
            gap: 20.0,
            header_height: 240.0,
            root_margin: 50.0,
            threshold: 0.1,
            batch_size: 6,
            initial_load_delay_ms: 500,
            batch_delay_ms: 800,
            idle_interval_ms: 2000,
            idle_source: IdleSource::default(),
            seed: None,
        }
    }
}

impl GalleryConfig {
    /// Load a JSON config file and validate it
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: GalleryConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.viewport.width == 0 || self.viewport.height == 0 {
            return Err(Error::ConfigError("viewport must be non-empty".into()));
        }
        if self.surface_width == 0 || self.surface_height == 0 {
            return Err(Error::ConfigError("surface size must be positive".into()));
        }
        if self.columns == 0 {
            return Err(Error::ConfigError("columns must be at least 1".into()));
        }
        if self.batch_size == 0 {
            return Err(Error::ConfigError("batch_size must be at least 1".into()));
        }
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(Error::ConfigError(format!("threshold {} outside [0, 1]", self.threshold)));
        }
        if !self.root_margin.is_finite() || self.root_margin < 0.0 {
            return Err(Error::ConfigError(format!("root_margin {} must be >= 0", self.root_margin)));
        }
        if self.gap < 0.0 || self.info_height < 0.0 || self.header_height < 0.0 {
            return Err(Error::ConfigError("layout lengths must be >= 0".into()));
        }
        Ok(())
    }
}

/// Viewport dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

/// Create a gallery that rasterizes into RGBA pixel buffers
#[cfg(feature = "raster")]
pub fn new_gallery(config: GalleryConfig) -> Result<Gallery<rendering::RasterSurface>> {
    Gallery::new(config)
}
