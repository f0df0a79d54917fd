//! Control loop: the hexagonal core.
//!
//! [`ControlLoop`] owns the cooldown gate, the pump actuator, and the link
//! state machine. All I/O flows through port traits injected at call sites,
//! making the whole loop testable with mock adapters.
//!
//! ```text
//!   LinkPort ──▶ ┌──────────────────────────┐ ──▶ MetricsPort
//!                │       ControlLoop         │ ──▶ TelemetryPort
//!   TimePort ◀──▶│ parse · policy · fallback │ ──▶ EventSink
//!   GpioPort ◀── └──────────────────────────┘
//! ```
//!
//! ## Link states
//!
//! ```text
//! AwaitingLink ──reading──▶ LinkActive ◀──reading── LinkDown
//!       │                       │                      ▲
//!       └────────closed─────────┴───────closed─────────┘
//! ```
//!
//! One iteration reads one chunk, makes one decision, and runs at most one
//! (blocking) actuation cycle. Nothing here is fatal.

use log::{debug, info, warn};

use crate::config::SystemConfig;
use crate::control::{CooldownGate, Decision, apply_cooldown, decide, decide_fallback};
use crate::drivers::pump::PumpActuator;
use crate::drivers::watchdog::Watchdog;
use crate::error::{Error, LinkError, ParseError};
use crate::sensors::{self, MAX_CHUNK_LEN, Reading};

use super::events::{AppEvent, DecisionSource};
use super::ports::{EventSink, GpioPort, LinkPort, MetricsPort, TelemetryPort, TimePort};

// ───────────────────────────────────────────────────────────────
// Link state
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkState {
    /// No frame accepted yet.
    AwaitingLink,
    /// Frames are arriving.
    LinkActive,
    /// Transport reported closed; fallback timer in charge.
    LinkDown,
}

/// Counters for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopStats {
    pub cycles: u64,
    pub frames_accepted: u64,
    pub frames_rejected: u64,
    pub idle_reads: u64,
    pub fallback_cycles: u64,
    pub activations: u64,
    pub suppressions: u64,
}

// ───────────────────────────────────────────────────────────────
// ControlLoop
// ───────────────────────────────────────────────────────────────

pub struct ControlLoop {
    config: SystemConfig,
    gate: CooldownGate,
    pump: PumpActuator,
    watchdog: Watchdog,
    link: LinkState,
    /// Fallback has asked for water during the current outage.
    fallback_engaged: bool,
    last_reading: Option<Reading>,
    stats: LoopStats,
}

impl ControlLoop {
    /// Construct the loop with a fresh "never activated" pump state.
    ///
    /// Does **not** touch hardware; call [`start`](Self::start) next.
    pub fn new(config: SystemConfig) -> Self {
        Self::with_gate(config, CooldownGate::default())
    }

    /// Construct the loop around an existing gate (seeded state in tests).
    pub fn with_gate(config: SystemConfig, gate: CooldownGate) -> Self {
        let pump = PumpActuator::new(config.pump_pin, config.metric_key.clone());
        let watchdog = Watchdog::new(0, config.watchdog_grace_secs);
        Self {
            config,
            gate,
            pump,
            watchdog,
            link: LinkState::AwaitingLink,
            fallback_engaged: false,
            last_reading: None,
            stats: LoopStats::default(),
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Drive the pump pin low and arm the startup watchdog.
    pub fn start(
        &mut self,
        gpio: &mut impl GpioPort,
        clock: &impl TimePort,
        sink: &mut impl EventSink,
    ) {
        self.pump.init(gpio);
        self.watchdog = Watchdog::new(clock.now_secs(), self.config.watchdog_grace_secs);
        sink.emit(&AppEvent::Started {
            pump_pin: self.pump.pin(),
        });
        info!("Control loop started, pump on GPIO {}", self.pump.pin());
    }

    /// Run forever. There is no terminal state.
    pub fn run<H, T, M, E>(&mut self, hw: &mut H, clock: &mut T, metrics: &mut M, sink: &mut E) -> !
    where
        H: LinkPort + GpioPort + TelemetryPort,
        T: TimePort,
        M: MetricsPort,
        E: EventSink,
    {
        loop {
            self.tick(hw, clock, metrics, sink);
        }
    }

    // ── Per-iteration orchestration ───────────────────────────

    /// Run one iteration: read → decide → (actuate) → report.
    ///
    /// The `hw` parameter satisfies the link, GPIO, and telemetry ports at
    /// once, mirroring how a single board adapter owns all three.
    pub fn tick<H, T, M, E>(&mut self, hw: &mut H, clock: &mut T, metrics: &mut M, sink: &mut E) -> Decision
    where
        H: LinkPort + GpioPort + TelemetryPort,
        T: TimePort,
        M: MetricsPort,
        E: EventSink,
    {
        self.stats.cycles += 1;
        let now = clock.now_secs();

        if let Some(elapsed_secs) = self.watchdog.check(now, self.stats.frames_accepted > 0) {
            sink.emit(&AppEvent::WatchdogExpired { elapsed_secs });
        }

        let mut buf = [0u8; MAX_CHUNK_LEN];
        let len = self.config.frame_chunk_len.min(MAX_CHUNK_LEN);

        match hw.read(&mut buf[..len]) {
            Ok(0) => {
                self.stats.idle_reads += 1;
                debug!("Serial read timed out with no data");
                Decision::Skip
            }
            Ok(n) => match sensors::parse(&buf[..n]) {
                Ok(reading) => self.on_reading(reading, hw, clock, metrics, sink),
                Err(e) => self.on_rejected(e, sink),
            },
            Err(e) => self.on_link_down(e, hw, clock, metrics, sink),
        }
    }

    fn on_reading<H, T, M, E>(
        &mut self,
        reading: Reading,
        hw: &mut H,
        clock: &mut T,
        metrics: &mut M,
        sink: &mut E,
    ) -> Decision
    where
        H: GpioPort + TelemetryPort,
        T: TimePort,
        M: MetricsPort,
        E: EventSink,
    {
        self.stats.frames_accepted += 1;
        self.set_link_state(LinkState::LinkActive, sink);
        self.last_reading = Some(reading);

        debug!("Reading: {:?}", reading);
        hw.publish(&reading);
        sink.emit(&AppEvent::ReadingAccepted(reading));

        let t = &self.config.thresholds;
        let decision = apply_cooldown(decide(&reading, t), &self.gate, clock.now_secs(), t.cooldown_seconds);
        self.execute(decision, DecisionSource::Sensor, hw, clock, metrics, sink);
        decision
    }

    fn on_rejected(&mut self, e: ParseError, sink: &mut impl EventSink) -> Decision {
        self.stats.frames_rejected += 1;
        warn!("Could not extract values ({e}), ignoring frame");
        sink.emit(&AppEvent::ReadFailed(Error::Parse(e)));
        Decision::Skip
    }

    fn on_link_down<H, T, M, E>(
        &mut self,
        e: LinkError,
        hw: &mut H,
        clock: &mut T,
        metrics: &mut M,
        sink: &mut E,
    ) -> Decision
    where
        H: GpioPort,
        T: TimePort,
        M: MetricsPort,
        E: EventSink,
    {
        if self.link != LinkState::LinkDown {
            warn!("Serial link lost ({e}), falling back to timer logic");
        }
        self.set_link_state(LinkState::LinkDown, sink);
        self.stats.fallback_cycles += 1;
        sink.emit(&AppEvent::ReadFailed(Error::Link(e)));

        let t = self.config.thresholds;
        let now = clock.now_secs();
        let wanted = decide_fallback(now, self.gate.state(), t.fallback_idle_seconds);
        if wanted.requires_watering() && !self.fallback_engaged {
            self.fallback_engaged = true;
            let idle_secs = self.gate.state().idle_secs(now);
            warn!("Fallback timer watering while link is down (pump idle {:?}s)", idle_secs);
            sink.emit(&AppEvent::FallbackEngaged { idle_secs });
        }
        let decision = apply_cooldown(wanted, &self.gate, now, t.cooldown_seconds);
        self.execute(decision, DecisionSource::Fallback, hw, clock, metrics, sink);

        clock.sleep_secs(self.config.link_retry_secs);
        decision
    }

    /// Turn a gated decision into an actuation or a zero-valued report.
    fn execute(
        &mut self,
        decision: Decision,
        source: DecisionSource,
        gpio: &mut impl GpioPort,
        clock: &mut impl TimePort,
        metrics: &mut impl MetricsPort,
        sink: &mut impl EventSink,
    ) {
        sink.emit(&AppEvent::Decided { source, decision });

        if let Some(hold_secs) = decision.pump_seconds(&self.config.thresholds) {
            self.pump.activate(gpio, clock, metrics, hold_secs);
            self.stats.activations += 1;
            sink.emit(&AppEvent::PumpCycleCompleted { hold_secs });
        } else if decision == Decision::Suppressed {
            metrics.send(&self.config.metric_key, 0);
            self.stats.suppressions += 1;
        }
    }

    fn set_link_state(&mut self, to: LinkState, sink: &mut impl EventSink) {
        if self.link == to {
            return;
        }
        let from = self.link;
        self.link = to;
        if to == LinkState::LinkActive {
            self.fallback_engaged = false;
        }
        info!("Link {:?} -> {:?}", from, to);
        sink.emit(&AppEvent::LinkChanged { from, to });
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn link_state(&self) -> LinkState {
        self.link
    }

    pub fn stats(&self) -> LoopStats {
        self.stats
    }

    pub fn last_reading(&self) -> Option<Reading> {
        self.last_reading
    }

    pub fn gate(&self) -> &CooldownGate {
        &self.gate
    }

    pub fn watchdog_fired(&self) -> bool {
        self.watchdog.has_fired()
    }
}
