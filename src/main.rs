use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use flexi_logger::Logger;
use log::info;

use smartgallery::platform::{
    EffectiveType, EmulatedGeolocation, EmulatedPlatform, LocationError, NetworkCondition, Position,
};
use smartgallery::{GalleryConfig, GalleryRuntime, IdleSource};

/// Run an emulated gallery session and print a JSON snapshot of the result
#[derive(Parser, Debug)]
#[command(name = "smartgallery", version, about)]
struct Args {
    /// JSON config file; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for reproducible images
    #[arg(long)]
    seed: Option<u64>,

    /// Batches to generate, including the initial one
    #[arg(long, default_value_t = 2)]
    batches: usize,

    /// Scroll offset added per step, in pixels
    #[arg(long, default_value_t = 400.0)]
    scroll_step: f64,

    /// Number of scroll steps after generating
    #[arg(long, default_value_t = 4)]
    scroll_steps: usize,

    /// Connection class (slow-2g, 2g, 3g, 4g); omit to emulate a host without network information
    #[arg(long)]
    effective_type: Option<String>,

    /// Downlink estimate in Mbps
    #[arg(long, default_value_t = 10.0)]
    downlink: f64,

    /// Round-trip time in milliseconds
    #[arg(long, default_value_t = 50.0)]
    rtt: f64,

    /// Emulated latitude (needs --lng)
    #[arg(long, requires = "lng", allow_negative_numbers = true)]
    lat: Option<f64>,

    /// Emulated longitude (needs --lat)
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    lng: Option<f64>,

    /// Deny the location permission prompt
    #[arg(long, conflicts_with = "lat")]
    deny_location: bool,

    #[arg(long, value_enum)]
    idle_source: Option<IdleArg>,

    /// Write one PNG per rendered card into this directory
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Log level when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum IdleArg {
    Idle,
    Timer,
}

impl From<IdleArg> for IdleSource {
    fn from(a: IdleArg) -> Self {
        match a {
            IdleArg::Idle => IdleSource::IdleCallback,
            IdleArg::Timer => IdleSource::Timer,
        }
    }
}

fn build_platform(args: &Args) -> EmulatedPlatform {
    let mut platform = EmulatedPlatform::new();
    if let Some(t) = &args.effective_type {
        let effective_type: EffectiveType = t.parse().unwrap_or(EffectiveType::Unknown);
        platform = platform.with_network(NetworkCondition::new(effective_type, args.downlink, args.rtt));
    }
    if let (Some(lat), Some(lng)) = (args.lat, args.lng) {
        let pos = Position { lat, lng, accuracy_meters: 25.0 };
        platform = platform.with_geolocation(EmulatedGeolocation::new(Ok(pos)));
    } else if args.deny_location {
        platform = platform.with_geolocation(EmulatedGeolocation::new(Err(LocationError::PermissionDenied)));
    }
    platform
}

async fn run_session(args: Args) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => GalleryConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => GalleryConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if let Some(src) = args.idle_source {
        config.idle_source = src.into();
    }

    let platform = Arc::new(build_platform(&args));
    let gallery = smartgallery::new_gallery(config.clone())?;
    let (runtime, handle) = GalleryRuntime::new(gallery, platform);
    let task = tokio::spawn(runtime.run());

    let settle = Duration::from_millis(50);
    tokio::time::sleep(Duration::from_millis(config.initial_load_delay_ms + config.batch_delay_ms) + settle).await;
    for _ in 1..args.batches {
        handle.generate()?;
        tokio::time::sleep(Duration::from_millis(config.batch_delay_ms) + settle).await;
    }

    handle.request_location()?;
    for step in 1..=args.scroll_steps {
        handle.scroll_to(step as f64 * args.scroll_step)?;
    }
    tokio::time::sleep(settle).await;

    handle.shutdown()?;
    let gallery = task.await.context("gallery runtime panicked")?;
    let snapshot = gallery.snapshot();
    info!(
        "{} photos, {} rendered, quality {}",
        snapshot.items.len(),
        snapshot.rendered_items,
        snapshot.quality
    );
    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    if let Some(dir) = &args.out_dir {
        std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
        for card in gallery.cards() {
            if let Some(surface) = card.surface() {
                let path = dir.join(format!("photo-{}.png", card.item_id));
                std::fs::write(&path, surface.to_png()?).with_context(|| format!("writing {}", path.display()))?;
            }
        }
        info!("wrote PNGs to {}", dir.display());
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let _logger = Logger::try_with_env_or_str(&args.log_level)?.start()?;

    let rt = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
    rt.block_on(run_session(args))
}
