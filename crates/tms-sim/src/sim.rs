//! The `Sim` struct and its tick loop.

use tms_core::{SimClock, SimConfig, SimRng, Tick};
use tms_network::route::MAX_CONGESTION;
use tms_network::{Network, NetworkError};

use crate::{CongestionModel, SimError, SimObserver, SimResult};

/// The simulation runner.
///
/// `Sim<C>` owns the network and drives it one second per tick:
///
/// 1. **Congestion**: ask the model for a new reading on every route, in
///    creation order.
/// 2. **Slowdown**: if `config.slowdown_threshold` is set, every
///    intersection whose mean incoming congestion has reached it lowers its
///    incoming speed signs.
/// 3. **Lights**: [`Network::tick`] advances every set of lights.
pub struct Sim<C: CongestionModel> {
    /// Run configuration (total ticks, seed, snapshot interval, slowdown).
    pub config: SimConfig,

    /// Current tick.
    pub clock: SimClock,

    /// The network under simulation.
    pub network: Network,

    /// Seeded from `config.seed`; only the congestion model draws from it.
    pub rng: SimRng,

    pub congestion: C,
}

impl<C: CongestionModel> Sim<C> {
    /// Validate `config` and assemble a simulation starting at tick 0.
    ///
    /// # Errors
    ///
    /// [`SimError::Config`] if `slowdown_threshold` exceeds 100.
    pub fn new(config: SimConfig, network: Network, congestion: C) -> SimResult<Self> {
        if let Some(threshold) = config.slowdown_threshold.filter(|&t| t > MAX_CONGESTION) {
            return Err(SimError::Config(format!(
                "slowdown threshold must be at most {MAX_CONGESTION}, got {threshold}"
            )));
        }
        log::debug!(
            "sim ready: {} intersections, {} routes, {} ticks, seed {}",
            network.len(),
            network.route_count(),
            config.total_ticks,
            config.seed
        );
        Ok(Self {
            rng: SimRng::new(config.seed),
            config,
            clock: SimClock::new(),
            network,
            congestion,
        })
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Run from the current tick to `config.end_tick()`, then fire
    /// `on_sim_end`.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        log::debug!("sim start at {}", self.clock);
        while self.clock.current_tick < self.config.end_tick() {
            self.step(observer)?;
        }
        log::debug!("sim end at {}", self.clock);
        observer.on_sim_end(self.clock.current_tick);
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step(observer)?;
        }
        Ok(())
    }

    /// Process one tick with observer callbacks and advance the clock.
    pub fn step<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);
        self.process_tick(now)?;
        observer.on_tick_end(now, &self.network);
        if self.config.is_snapshot_tick(now) {
            observer.on_snapshot(now, &self.network);
        }
        self.clock.advance();
        Ok(())
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn process_tick(&mut self, now: Tick) -> SimResult<()> {
        self.update_congestion(now)?;
        if let Some(threshold) = self.config.slowdown_threshold {
            self.apply_slowdown(now, threshold)?;
        }
        self.network.tick();
        Ok(())
    }

    fn update_congestion(&mut self, now: Tick) -> SimResult<()> {
        // Explicit field borrows so the closure can hold them alongside the
        // network borrow.
        let model = &mut self.congestion;
        let rng = &mut self.rng;
        let mut failure: Option<NetworkError> = None;

        self.network.for_each_route_mut(|route| {
            if failure.is_some() {
                return;
            }
            if let Some(level) = model.next_level(route, now, rng) {
                failure = route.set_congestion(level).err();
            }
        });

        match failure {
            Some(e) => Err(e.into()),
            None => Ok(()),
        }
    }

    fn apply_slowdown(&mut self, now: Tick, threshold: u32) -> SimResult<()> {
        let congested: Vec<String> = self
            .network
            .intersections()
            .filter(|i| i.mean_incoming_congestion().is_some_and(|mean| mean >= threshold))
            .map(|i| i.id().to_owned())
            .collect();
        for id in &congested {
            log::trace!("{now}: intersection {id:?} congested, reducing speed signs");
            self.network.reduce_incoming_speed_signs(id)?;
        }
        Ok(())
    }
}
