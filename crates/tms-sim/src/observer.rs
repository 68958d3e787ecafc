//! Simulation observer trait for progress reporting and data collection.

use tms_core::Tick;
use tms_network::Network;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] and
/// [`Sim::run_ticks`][crate::Sim::run_ticks] at key points in the tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
pub trait SimObserver {
    /// Called at the very start of each tick, before congestion is updated.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called after the lights have advanced for `tick`.
    fn on_tick_end(&mut self, _tick: Tick, _network: &Network) {}

    /// Called on snapshot ticks (every `config.output_interval_ticks`),
    /// after [`on_tick_end`][Self::on_tick_end].
    fn on_snapshot(&mut self, _tick: Tick, _network: &Network) {}

    /// Called once when [`Sim::run`][crate::Sim::run] reaches its end tick.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
