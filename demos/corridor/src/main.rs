//! corridor: runs a lighted Main Street corridor for ten simulated minutes.
//!
//! ```text
//! corridor [NETWORK_FILE] [CONFIG_JSON] [OUTPUT_DIR]
//! ```
//!
//! Without arguments the embedded `networks/corridor.txt` is used with the
//! built-in configuration, and output goes to `output/corridor`.  Set
//! `RUST_LOG=debug` to see lifecycle logging from the library crates.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};

use tms_core::{SimConfig, Tick, TrafficSignal};
use tms_network::Network;
use tms_output::{CsvWriter, OutputWriter, SimOutputObserver};
use tms_persist::{load_network, parse_network, save_network};
use tms_sim::{RandomWalkCongestion, Sim, SimObserver};

// ── Constants ─────────────────────────────────────────────────────────────────

const EMBEDDED_NETWORK:      &str = include_str!("../networks/corridor.txt");
const DEFAULT_OUTPUT_DIR:    &str = "output/corridor";
const SEED:                  u64  = 42;
const SIM_SECONDS:           u64  = 600;
const OUTPUT_INTERVAL_TICKS: u64  = 30;
const SLOWDOWN_THRESHOLD:    u32  = 70;
/// Largest per-second congestion change reported by the random walk.
const CONGESTION_STEP:       u32  = 3;

// ── Observer wrapper to count rows ────────────────────────────────────────────

struct CountingObserver<W: OutputWriter> {
    inner:         SimOutputObserver<W>,
    snapshot_rows: usize,
    summary_rows:  usize,
    light_changes: usize,
    last_green:    Vec<bool>,
}

impl<W: OutputWriter> CountingObserver<W> {
    fn new(inner: SimOutputObserver<W>) -> Self {
        Self { inner, snapshot_rows: 0, summary_rows: 0, light_changes: 0, last_green: Vec::new() }
    }
}

impl<W: OutputWriter> SimObserver for CountingObserver<W> {
    fn on_tick_end(&mut self, tick: Tick, network: &Network) {
        self.summary_rows += 1;
        let green: Vec<bool> = network
            .routes()
            .map(|r| r.signal() == Some(TrafficSignal::Green))
            .collect();
        if !self.last_green.is_empty() {
            self.light_changes += green.iter().zip(&self.last_green).filter(|(a, b)| a != b).count();
        }
        self.last_green = green;
        self.inner.on_tick_end(tick, network);
    }

    fn on_snapshot(&mut self, tick: Tick, network: &Network) {
        self.snapshot_rows += network.route_count();
        self.inner.on_snapshot(tick, network);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.inner.on_sim_end(final_tick);
    }
}

// ── Inputs ────────────────────────────────────────────────────────────────────

fn read_network(path: Option<&Path>) -> Result<Network> {
    match path {
        Some(path) => load_network(path).with_context(|| format!("loading {}", path.display())),
        None => parse_network(EMBEDDED_NETWORK).context("parsing embedded corridor network"),
    }
}

fn read_config(path: Option<&Path>) -> Result<SimConfig> {
    let Some(path) = path else {
        return Ok(SimConfig {
            total_ticks:           SIM_SECONDS,
            seed:                  SEED,
            output_interval_ticks: OUTPUT_INTERVAL_TICKS,
            slowdown_threshold:    Some(SLOWDOWN_THRESHOLD),
        });
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
}

fn print_routes(network: &Network) {
    println!("{:<10} {:<8} {:>6} {:>10}", "Route", "Signal", "Speed", "Congestion");
    println!("{}", "-".repeat(37));
    for route in network.routes() {
        let signal = route.signal().map_or("-", |s| s.as_str());
        println!(
            "{:<10} {:<8} {:>6} {:>10}",
            route.id(),
            signal,
            route.speed(),
            route.congestion()
        );
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let network_path = args.first().map(PathBuf::from);
    let config_path = args.get(1).map(PathBuf::from);
    let output_dir = PathBuf::from(args.get(2).map_or(DEFAULT_OUTPUT_DIR, String::as_str));

    println!("=== corridor: traffic management network ===");

    // 1. Load network.
    let network = read_network(network_path.as_deref())?;
    println!(
        "Network: {} intersections, {} routes, default yellow {} s",
        network.len(),
        network.route_count(),
        network.yellow_time()
    );
    for intersection in network.intersections().filter(|i| i.has_traffic_lights()) {
        println!("  lights at {intersection}");
    }

    // 2. Sim config.
    let config = read_config(config_path.as_deref())?;
    println!(
        "Sim: {} s, seed {}, snapshot every {} s, slowdown at {:?}",
        config.total_ticks, config.seed, config.output_interval_ticks, config.slowdown_threshold
    );
    println!();

    // 3. Build sim.
    let mut sim = Sim::new(config, network, RandomWalkCongestion::new(CONGESTION_STEP))?;

    // 4. Set up output.
    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("creating {}", output_dir.display()))?;
    let writer = CsvWriter::new(&output_dir)?;
    let mut obs = CountingObserver::new(SimOutputObserver::new(writer));

    // 5. Run.
    let t0 = Instant::now();
    sim.run(&mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }

    // 6. Summary.
    println!("Simulation complete in {:.3} s ({})", elapsed.as_secs_f64(), sim.clock);
    println!("  route_snapshots.csv : {} rows", obs.snapshot_rows);
    println!("  tick_summaries.csv  : {} rows", obs.summary_rows);
    println!("  green/not-green transitions: {}", obs.light_changes);
    println!();

    // 7. Save the final network next to the output.
    let final_path = output_dir.join("final_network.txt");
    save_network(&sim.network, &final_path)
        .with_context(|| format!("saving {}", final_path.display()))?;
    log::info!("final network saved to {}", final_path.display());

    // 8. Final route table.
    print_routes(&sim.network);

    Ok(())
}
