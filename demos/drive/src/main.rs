//! drive — play a route back through the rsim engine.
//!
//! Usage:
//!
//! ```text
//! drive [POLYLINE] [CONFIG.json]
//! ```
//!
//! With no polyline the built-in route is used.  The optional JSON config
//! overrides any of the defaults in [`DriveConfig`].  The run uses a fast
//! tick, pauses once halfway, writes every fix to `output/drive/fixes.csv`,
//! and prints a JSON summary on completion.

mod route;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;

use rsim_core::{EngineConfig, GeoPoint};
use rsim_engine::SimulationEngine;
use rsim_output::TracePublisher;
use rsim_route::{RoutePolicy, StaticRouteSource, resolve_route};

use route::{builtin_endpoints, builtin_waypoints};

// ── Constants ─────────────────────────────────────────────────────────────────

const FAST_TICK_MS: u64  = 20;
const SEED:         u64  = 42;
const OUTPUT_DIR:   &str = "output/drive";
/// How long to stay paused at the halfway mark (wall clock).
const PAUSE_FOR:    Duration = Duration::from_millis(500);

// ── Config ────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(default)]
struct DriveConfig {
    engine:     EngineConfig,
    route:      RoutePolicy,
    output_dir: PathBuf,
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig {
                tick_period_ms: FAST_TICK_MS,
                seed: Some(SEED),
                ..EngineConfig::default()
            },
            route: RoutePolicy::default(),
            output_dir: PathBuf::from(OUTPUT_DIR),
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<DriveConfig> {
    let Some(path) = path else {
        return Ok(DriveConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config: DriveConfig = serde_json::from_str(&text)
        .with_context(|| format!("parsing config {}", path.display()))?;
    Ok(config)
}

// ── main ──────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let mut args = std::env::args().skip(1);
    let polyline_arg = args.next();
    let config_path = args.next().map(PathBuf::from);
    let config = load_config(config_path.as_deref())?;

    // 1. Route: either the caller's polyline or the built-in drive.
    let (polyline, start, end) = match polyline_arg {
        Some(p) => {
            let points = rsim_polyline::try_decode(&p).context("decoding polyline argument")?;
            let (Some(&first), Some(&last)) = (points.first(), points.last()) else {
                bail!("polyline decodes to no points");
            };
            (p, first, last)
        }
        None => {
            let (start, end) = builtin_endpoints();
            (rsim_polyline::encode(&builtin_waypoints()), start, end)
        }
    };
    info!(%start, %end, polyline = %polyline, "route requested");

    let source = StaticRouteSource::new(polyline);
    let route = resolve_route(&source, start, end, &config.route).await?;
    info!(
        points = route.len(),
        segments = route.segment_count(),
        total_m = route.total_m(),
        "route built"
    );

    // 2. Engine writing a CSV trace.
    let trace = Arc::new(TracePublisher::csv(&config.output_dir)?);
    let mut engine = SimulationEngine::new(Arc::clone(&trace), config.engine.clone())?;

    // 3. Run, pausing once at the halfway mark.
    let t0 = Instant::now();
    let run = engine.start(route).await?;
    let mut status = engine.subscribe();
    let mut paused_at: Option<GeoPoint> = None;

    loop {
        let snapshot = status.borrow_and_update().clone();
        if snapshot.state.is_terminal() {
            break;
        }
        if paused_at.is_none() && snapshot.progress_percent() >= 50 && engine.pause() {
            paused_at = snapshot.position;
            info!(progress = snapshot.progress_percent(), "pausing at halfway");
            tokio::time::sleep(PAUSE_FOR).await;
            engine.resume();
        }
        if status.changed().await.is_err() {
            break;
        }
    }

    let outcome = engine
        .wait()
        .await?
        .context("run vanished before completing")?;
    trace.finish()?;
    if let Some(e) = trace.take_error() {
        eprintln!("output error: {e}");
    }

    // 4. Summary.
    let summary = json!({
        "run": outcome.run.0,
        "state": outcome.state.as_str(),
        "ticks": outcome.ticks,
        "traveled_m": (outcome.traveled_m * 10.0).round() / 10.0,
        "simulated_s": outcome.simulated.as_secs_f64(),
        "wall_clock_s": t0.elapsed().as_secs_f64(),
        "paused_at": paused_at.map(|p| [p.lat, p.lon]),
        "final_position": [outcome.final_position.lat, outcome.final_position.lon],
        "fixes_written": trace.rows_written(),
        "trace": config.output_dir.join(rsim_output::csv::FIXES_FILE),
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);

    info!(%run, "done");
    Ok(())
}
