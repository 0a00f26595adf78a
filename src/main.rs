//! Headless demo: lays out a small patchbay, plays a scripted session of
//! clicks, drags and zooms against an in-memory surface, and logs the result.
//!
//! `RUST_LOG=patchbay=debug cargo run` shows every gesture decision.

use anyhow::{Context, Result};
use kurbo::{Point, Rect};
use patchbay::Patchbay;
use patchbay::input::PointerButton;
use patchbay::layout::{PatchGroupSpec, aggregate_rect, layout};
use patchbay::settings::Settings;
use patchbay::settings_watcher::{SettingsEvent, SettingsWatcher, default_settings_path};
use patchbay::surface::{DrawingSurface, SvgSurface};
use patchbay::timer::millis;
use patchbay::viewport::{PanDirection, Viewport};
use std::time::Duration;
use tracing::{info, warn};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("patchbay=info".parse()?),
        )
        .init();

    let settings = Settings::load();
    let mut watcher = default_settings_path()
        .filter(|path| path.parent().is_some_and(|dir| dir.exists()))
        .and_then(|path| SettingsWatcher::new(path).ok());

    let diagram = layout(&demo_rows());
    info!(
        groups = diagram.groups.len(),
        jacks = diagram.jacks().count(),
        "Laid out diagram"
    );

    let surface = SvgSurface::attached(
        Viewport::new(0.0, 0.0, 1.0, 1.0),
        Rect::new(0.0, 0.0, 1280.0, 720.0),
    );
    let mut patchbay = Patchbay::from_layout(surface, &diagram, settings);
    info!(view_box = %patchbay.surface().view_box(), "Initial view");

    let mut now = Duration::ZERO;
    let double_click = patchbay.settings().timing.double_click_ms;

    // Patch OUT of the oscillator into IN of the filter
    for key in ["1-1-0", "1-3-1"] {
        let jack = patchbay
            .jacks()
            .by_key(key)
            .with_context(|| format!("demo jack {key} missing"))?;
        let screen = to_screen(&patchbay, jack.position())?;
        now = click(&mut patchbay, screen, now);
        now += millis(double_click + 1);
        patchbay.tick(now);
        run_frames(&mut patchbay, 240);
    }

    // Drag the background to pan, then zoom in on the filter
    let start = Point::new(640.0, 360.0);
    patchbay.pointer_press(PointerButton::Primary, start, now);
    now += millis(60);
    patchbay.pointer_move(Point::new(600.0, 340.0), now);
    patchbay.pointer_release(PointerButton::Primary, Point::new(600.0, 340.0), now);
    info!(view_box = %patchbay.surface().view_box(), "After pan");

    if let Some(rect) = aggregate_rect(diagram.find("VCF").map(|g| g.rect)) {
        patchbay.fit_rectangle(rect)?;
        info!(view_box = %patchbay.surface().view_box(), "Framed VCF");
    }
    patchbay.pan_button(PanDirection::Left)?;
    patchbay.zoom_out(None, None)?;
    info!(view_box = %patchbay.surface().view_box(), "After buttons");

    for cable in patchbay.cables() {
        info!(cable = %cable.id(), color = cable.color(), path = %cable.path_data(), "Cable");
    }
    let overview = patchbay.overview();
    info!(indicator = %overview.indicator(), size = ?overview.size(), "Overview");
    drop(overview);

    let report = patchbay.frames().report();
    info!(
        frames = report.frames,
        mean_ms = format!("{:.3}", report.mean_ms),
        busiest = report.busiest_frame,
        "Animation frames"
    );

    if let Some(watcher) = watcher.as_mut() {
        match watcher.poll() {
            Some(SettingsEvent::Created | SettingsEvent::Modified) => {
                patchbay.apply_settings(Settings::load_from(watcher.path()));
            }
            Some(SettingsEvent::Deleted) => warn!("Settings file deleted"),
            Some(SettingsEvent::Error(e)) => warn!("Settings watch error: {}", e),
            None => {}
        }
    }
    Ok(())
}

fn demo_rows() -> Vec<Vec<PatchGroupSpec>> {
    vec![
        vec![
            PatchGroupSpec::new("VCO", 2).with_color("orange"),
            PatchGroupSpec::new("$", 1),
            PatchGroupSpec::new("VCF", 2).with_color("skyblue"),
        ],
        vec![
            PatchGroupSpec::new("^MIX", 3).with_color("white"),
            PatchGroupSpec::new("*OUT", 1).with_color("grey"),
        ],
    ]
}

fn to_screen(patchbay: &Patchbay<SvgSurface>, logical: Point) -> Result<Point> {
    let bounds = patchbay
        .surface()
        .bounds()
        .context("demo surface is attached")?;
    let view = patchbay.viewport();
    let ctx = patchbay::input::coords::CoordinateContext::new(&bounds, &view);
    Ok(patchbay::input::coords::CoordinateConverter::logical_to_screen(logical, &ctx))
}

fn click(patchbay: &mut Patchbay<SvgSurface>, at: Point, now: Duration) -> Duration {
    patchbay.pointer_press(PointerButton::Primary, at, now);
    let now = now + millis(10);
    patchbay.pointer_release(PointerButton::Primary, at, now);
    now
}

fn run_frames(patchbay: &mut Patchbay<SvgSurface>, frames: usize) {
    for _ in 0..frames {
        if !patchbay.is_animating() {
            break;
        }
        patchbay.animate_frame();
    }
}
