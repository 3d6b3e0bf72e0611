use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use smartgallery::gallery::{Gallery, GalleryEvent};
use smartgallery::rendering::{render_placeholder, DrawingSurface, RecordingSurface};
use smartgallery::{GalleryConfig, QualityTier};

fn bench_placeholder_commands(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(7);
    c.bench_function("placeholder_record_high", |b| {
        b.iter(|| {
            let mut s = RecordingSurface::blank(300, 250);
            render_placeholder(&mut s, 300, 250, black_box(QualityTier::High), &mut rng);
            s
        })
    });
}

#[cfg(feature = "raster")]
fn bench_placeholder_raster(c: &mut Criterion) {
    use smartgallery::rendering::RasterSurface;

    let mut rng = StdRng::seed_from_u64(7);
    for tier in [QualityTier::Low, QualityTier::Medium, QualityTier::High] {
        c.bench_function(&format!("placeholder_raster_{}", tier), |b| {
            b.iter(|| {
                let mut s = RasterSurface::blank(300, 250);
                render_placeholder(&mut s, 300, 250, tier, &mut rng);
                s
            })
        });
    }
}

#[cfg(not(feature = "raster"))]
fn bench_placeholder_raster(_c: &mut Criterion) {}

fn bench_scroll_through_gallery(c: &mut Criterion) {
    c.bench_function("scroll_60_recorded_cards", |b| {
        b.iter(|| {
            let mut g: Gallery<RecordingSurface> = Gallery::new(GalleryConfig {
                seed: Some(1),
                ..Default::default()
            })
            .expect("valid config");
            for _ in 0..10 {
                g.handle(GalleryEvent::BatchReady);
            }
            let mut y = 0.0;
            while y < 8000.0 {
                g.handle(GalleryEvent::Scrolled { offset_y: y });
                y += 400.0;
            }
            g.tracker().visible_count()
        })
    });
}

criterion_group!(
    benches,
    bench_placeholder_commands,
    bench_placeholder_raster,
    bench_scroll_through_gallery
);
criterion_main!(benches);
