//! Integration tests for the link → parse → policy → gate → pump pipeline.
//!
//! Each test drives [`ControlLoop::tick`] with a scripted [`MockBoard`] and
//! a [`FakeClock`], then asserts on pin writes, metrics and events.

use super::mock_hw::{FakeClock, MockBoard, PinCall, Read, RecordingMetrics, RecordingSink};

use irrigator::app::events::{AppEvent, DecisionSource};
use irrigator::app::ports::Level;
use irrigator::app::service::{ControlLoop, LinkState};
use irrigator::config::SystemConfig;
use irrigator::control::{CooldownGate, Decision, PumpState};
use irrigator::drivers::pump::SETTLE_SECS;
use irrigator::error::{Error, ParseError};

struct Rig {
    control: ControlLoop,
    board: MockBoard,
    clock: FakeClock,
    metrics: RecordingMetrics,
    sink: RecordingSink,
}

impl Rig {
    fn new(board: MockBoard) -> Self {
        Self::with_gate(board, CooldownGate::default())
    }

    fn with_gate(board: MockBoard, gate: CooldownGate) -> Self {
        let mut rig = Self {
            control: ControlLoop::with_gate(SystemConfig::default(), gate),
            board,
            clock: FakeClock::at(10_000),
            metrics: RecordingMetrics::default(),
            sink: RecordingSink::default(),
        };
        rig.control.start(&mut rig.board, &rig.clock, &mut rig.sink);
        rig.board.clear_pins();
        rig
    }

    fn tick(&mut self) -> Decision {
        self.control
            .tick(&mut self.board, &mut self.clock, &mut self.metrics, &mut self.sink)
    }
}

// ── Startup ───────────────────────────────────────────────────

#[test]
fn start_drives_pump_pin_low() {
    let mut board = MockBoard::new();
    let mut sink = RecordingSink::default();
    let mut control = ControlLoop::new(SystemConfig::default());

    control.start(&mut board, &FakeClock::default(), &mut sink);

    assert_eq!(board.pin_calls, [PinCall::Mode(17), PinCall::Set(17, Level::Low)]);
    assert!(matches!(sink.events[0], AppEvent::Started { pump_pin: 17 }));
    assert_eq!(control.link_state(), LinkState::AwaitingLink);
}

// ── Sensor policy through the loop ────────────────────────────

#[test]
fn dry_soil_runs_a_normal_cycle() {
    let mut rig = Rig::new(MockBoard::with_frames(&["30 80 0\r\n"]));

    assert_eq!(rig.tick(), Decision::NormalWater);

    assert_eq!(rig.board.levels(), [Level::High, Level::Low]);
    assert_eq!(rig.clock.sleeps, [6, 6, SETTLE_SECS]);
    assert_eq!(rig.metrics.sent, [("pump.activation".to_owned(), 1)]);
    assert_eq!(rig.control.link_state(), LinkState::LinkActive);
    assert_eq!(rig.control.gate().state().last_activation(), Some(10_000));
}

#[test]
fn slightly_dry_soil_runs_a_minimal_cycle() {
    let mut rig = Rig::new(MockBoard::with_frames(&["50 80 0\r\n"]));

    assert_eq!(rig.tick(), Decision::MinimalWater);
    assert_eq!(rig.clock.sleeps, [2, 2, SETTLE_SECS]);
}

#[test]
fn wet_soil_is_left_alone() {
    let mut rig = Rig::new(MockBoard::with_frames(&["70 80 0\r\n", "40 80 0\r\n"]));

    assert_eq!(rig.tick(), Decision::Skip);
    assert_eq!(rig.tick(), Decision::Skip);
    assert!(rig.board.levels().is_empty());
    assert!(rig.metrics.sent.is_empty());
}

#[test]
fn low_tank_blocks_watering() {
    let mut rig = Rig::new(MockBoard::with_frames(&["30 40 0\r\n"]));

    assert_eq!(rig.tick(), Decision::Skip);
    assert!(rig.board.levels().is_empty());
    assert!(rig.control.gate().state().last_activation().is_none());
}

#[test]
fn overflow_blocks_watering() {
    let mut rig = Rig::new(MockBoard::with_frames(&["10 900 1\r\n"]));

    assert_eq!(rig.tick(), Decision::Skip);
    assert!(rig.board.levels().is_empty());
}

#[test]
fn accepted_reading_is_published() {
    let mut rig = Rig::new(MockBoard::with_frames(&["70 80 1\r\nstale 1 2\r\n"]));

    rig.tick();

    assert_eq!(rig.board.published.len(), 1);
    let r = rig.board.published[0];
    assert_eq!((r.soil_moisture, r.water_tank_level, r.overflow), (70, 80, true));
    assert_eq!(rig.control.last_reading(), Some(r));
}

// ── Malformed and idle reads ──────────────────────────────────

#[test]
fn garbage_frame_is_skipped_and_loop_continues() {
    let mut rig = Rig::new(MockBoard::with_frames(&["abc def\r\n", "30 80 0\r\n"]));

    assert_eq!(rig.tick(), Decision::Skip);
    assert!(rig.sink.events.iter().any(|e| matches!(
        e,
        AppEvent::ReadFailed(Error::Parse(ParseError::Malformed))
    )));
    assert!(rig.board.published.is_empty());
    assert_eq!(rig.control.link_state(), LinkState::AwaitingLink);

    assert_eq!(rig.tick(), Decision::NormalWater);
    assert_eq!(rig.control.stats().frames_rejected, 1);
    assert_eq!(rig.control.stats().frames_accepted, 1);
}

#[test]
fn short_frame_is_incomplete() {
    let mut rig = Rig::new(MockBoard::with_frames(&["30 80"]));

    assert_eq!(rig.tick(), Decision::Skip);
    assert!(rig.sink.events.iter().any(|e| matches!(
        e,
        AppEvent::ReadFailed(Error::Parse(ParseError::Incomplete))
    )));
}

#[test]
fn idle_read_does_nothing() {
    let mut board = MockBoard::new();
    board.push(Read::Timeout);
    let mut rig = Rig::new(board);

    assert_eq!(rig.tick(), Decision::Skip);
    assert!(rig.board.levels().is_empty());
    assert!(rig.clock.sleeps.is_empty());
    assert_eq!(rig.control.stats().idle_reads, 1);
    assert_eq!(rig.control.link_state(), LinkState::AwaitingLink);
}

// ── Cooldown gate ─────────────────────────────────────────────

#[test]
fn second_watering_within_cooldown_is_suppressed() {
    let mut rig = Rig::new(MockBoard::with_frames(&["30 80 0\r\n", "30 80 0\r\n"]));

    assert_eq!(rig.tick(), Decision::NormalWater);
    rig.board.clear_pins();

    assert_eq!(rig.tick(), Decision::Suppressed);
    assert!(rig.board.levels().is_empty());
    assert_eq!(rig.metrics.values(), [1, 0]);
    assert_eq!(rig.control.stats().suppressions, 1);
}

#[test]
fn watering_resumes_after_cooldown() {
    let mut rig = Rig::new(MockBoard::with_frames(&["30 80 0\r\n", "30 80 0\r\n"]));

    assert_eq!(rig.tick(), Decision::NormalWater);
    rig.clock.advance(1200);
    assert_eq!(rig.tick(), Decision::NormalWater);
    assert_eq!(rig.control.stats().activations, 2);
}

#[test]
fn seeded_recent_activation_suppresses_first_cycle() {
    let gate = CooldownGate::new(PumpState::activated_at(9_500));
    let mut rig = Rig::with_gate(MockBoard::with_frames(&["30 80 0\r\n"]), gate);

    assert_eq!(rig.tick(), Decision::Suppressed);
    assert_eq!(rig.metrics.values(), [0]);
}

// ── Link down / fallback timer ────────────────────────────────

#[test]
fn link_down_with_no_history_waters_once_then_waits() {
    let mut board = MockBoard::new();
    board.push(Read::Closed);
    board.push(Read::Closed);
    let mut rig = Rig::new(board);

    assert_eq!(rig.tick(), Decision::NormalWater);
    assert_eq!(rig.control.link_state(), LinkState::LinkDown);
    assert_eq!(rig.board.levels(), [Level::High, Level::Low]);
    // Pump cycle, then the retry pause.
    assert_eq!(rig.clock.sleeps, [6, 6, SETTLE_SECS, 3]);
    assert!(rig.sink.events.iter().any(|e| matches!(
        e,
        AppEvent::Decided {
            source: DecisionSource::Fallback,
            decision: Decision::NormalWater
        }
    )));

    assert_eq!(rig.tick(), Decision::Skip);
    assert_eq!(rig.control.stats().fallback_cycles, 2);
}

#[test]
fn link_down_after_long_idle_waters_once_cooldown_allows() {
    let mut board = MockBoard::new();
    board.push(Read::Closed);
    let gate = CooldownGate::new(PumpState::activated_at(10_000 - 1_500));
    let mut rig = Rig::with_gate(board, gate);

    assert_eq!(rig.tick(), Decision::NormalWater);
    assert_eq!(rig.metrics.values(), [1]);
}

#[test]
fn fallback_is_still_gated_by_cooldown() {
    let mut board = MockBoard::new();
    board.push(Read::Closed);
    // Idle past the fallback threshold but inside the cooldown window.
    let gate = CooldownGate::new(PumpState::activated_at(10_000 - 600));
    let mut rig = Rig::with_gate(board, gate);

    assert_eq!(rig.tick(), Decision::Suppressed);
    assert!(rig.board.levels().is_empty());
    assert_eq!(rig.metrics.values(), [0]);
}

#[test]
fn link_recovers_when_frames_return() {
    let mut board = MockBoard::new();
    board.push(Read::Closed);
    board.push_frame("70 80 0\r\n");
    let mut rig = Rig::new(board);

    rig.tick();
    assert_eq!(rig.control.link_state(), LinkState::LinkDown);
    rig.tick();
    assert_eq!(rig.control.link_state(), LinkState::LinkActive);

    let transitions: Vec<_> = rig
        .sink
        .events
        .iter()
        .filter_map(|e| match e {
            AppEvent::LinkChanged { from, to } => Some((*from, *to)),
            _ => None,
        })
        .collect();
    assert_eq!(
        transitions,
        [
            (LinkState::AwaitingLink, LinkState::LinkDown),
            (LinkState::LinkDown, LinkState::LinkActive),
        ]
    );
}

// ── Startup watchdog ──────────────────────────────────────────

#[test]
fn watchdog_fires_once_without_a_frame() {
    let mut rig = Rig::new(MockBoard::new());

    rig.tick();
    assert!(!rig.control.watchdog_fired());

    rig.clock.advance(36);
    rig.tick();
    rig.clock.advance(100);
    rig.tick();

    assert!(rig.control.watchdog_fired());
    let fired = rig
        .sink
        .events
        .iter()
        .filter(|e| matches!(e, AppEvent::WatchdogExpired { .. }))
        .count();
    assert_eq!(fired, 1);
}

#[test]
fn watchdog_stays_quiet_once_a_frame_arrived() {
    let mut rig = Rig::new(MockBoard::with_frames(&["70 80 0\r\n"]));

    rig.tick();
    rig.clock.advance(1_000);
    rig.tick();

    assert!(!rig.control.watchdog_fired());
}

#[test]
fn long_outage_engages_fallback_once() {
    let mut board = MockBoard::new();
    for _ in 0..2_000 {
        board.push(Read::Closed);
    }
    let mut rig = Rig::new(board);

    let end = rig.clock.now + 3_600;
    while rig.clock.now < end {
        rig.tick();
    }

    let engaged = rig
        .sink
        .events
        .iter()
        .filter(|e| matches!(e, AppEvent::FallbackEngaged { .. }))
        .count();
    assert_eq!(engaged, 1);
    // Cooldown still paces the pump: one run at t=0 plus one per 1200s.
    assert_eq!(rig.control.stats().activations, 3);
}

#[test]
fn fallback_engages_again_after_recovery() {
    let mut board = MockBoard::new();
    board.push(Read::Closed);
    board.push_frame("70 80 0\r\n");
    board.push(Read::Closed);
    let mut rig = Rig::new(board);

    rig.tick();
    rig.tick();
    rig.clock.advance(1_500);
    rig.tick();

    let engaged: Vec<_> = rig
        .sink
        .events
        .iter()
        .filter_map(|e| match e {
            AppEvent::FallbackEngaged { idle_secs } => Some(*idle_secs),
            _ => None,
        })
        .collect();
    assert_eq!(engaged.len(), 2);
    assert_eq!(engaged[0], None);
    assert!(engaged[1].is_some_and(|idle| idle > 1_500));
}
