//! The night-shift orchestrator.
//!
//! `GameSession` owns every component and drives them from a single
//! `tick(dt)`. Within a tick the order is fixed:
//!
//! 1. advance the clock
//! 2. apply queued player intents
//! 3. drain power for the doors, lights and monitor as they now stand
//! 4. advance the antagonist, which reads the same door state
//! 5. run the proximity check
//! 6. finalize the outcome: caught, then power out, then shift over
//!
//! Once the outcome is final every mutator is a silent no-op.

use std::fmt;

use glam::DVec3;
use serde::Serialize;

use crate::antagonist::{Antagonist, AntagonistPhase, AntagonistSettings};
use crate::camera::CameraSystem;
use crate::clock::{SessionClock, sanitize_dt};
use crate::config::GameConfig;
use crate::door::{DoorRecord, DoorSide};
use crate::error::BompaResult;
use crate::event::{EventLog, SessionEventKind};
use crate::intent::{IntentQueue, PlayerIntent};
use crate::player::Player;
use crate::power::PowerBudget;
use crate::waypoint::WaypointGraph;

/// How the night ended, if it has.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionOutcome {
    /// Still playing.
    #[default]
    InProgress,
    /// The shift ended with the player alive.
    PlayerSurvived,
    /// The office ran out of power.
    PowerDepleted,
    /// Bompa got in.
    CaughtByAntagonist,
}

impl SessionOutcome {
    /// Whether the session is over.
    pub fn is_final(&self) -> bool {
        *self != Self::InProgress
    }
}

impl fmt::Display for SessionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InProgress => write!(f, "in progress"),
            Self::PlayerSurvived => write!(f, "survived"),
            Self::PowerDepleted => write!(f, "power depleted"),
            Self::CaughtByAntagonist => write!(f, "caught by Bompa"),
        }
    }
}

/// Summary of one `tick` call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    /// Tick number after the call.
    pub tick: u64,
    /// Outcome after the call.
    pub outcome: SessionOutcome,
    /// Events emitted during the call.
    pub events: usize,
    /// Power consumed during the call.
    pub power_drained: f64,
}

/// One playthrough.
pub struct GameSession {
    config: GameConfig,
    clock: SessionClock,
    power: PowerBudget,
    antagonist: Antagonist,
    player: Player,
    intents: IntentQueue,
    events: EventLog,
    outcome: SessionOutcome,
}

impl fmt::Debug for GameSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameSession")
            .field("tick", &self.clock.tick())
            .field("outcome", &self.outcome)
            .field("power", &self.power.remaining())
            .field("phase", &self.antagonist.phase())
            .field("events", &self.events.len())
            .finish()
    }
}

impl GameSession {
    /// Validate `config` and set up a fresh night.
    pub fn new(config: GameConfig) -> BompaResult<Self> {
        config.validate()?;

        let graph = WaypointGraph::new(config.waypoints.clone())?;
        let camera = CameraSystem::from_config(&config.camera_feeds, graph.len());
        let antagonist = Antagonist::new(
            graph,
            config.player_position,
            AntagonistSettings::from(&config),
        );

        tracing::info!(
            waypoints = config.waypoints.len(),
            max_power = config.max_power,
            "session started"
        );

        Ok(Self {
            clock: SessionClock::new(),
            power: PowerBudget::new(config.max_power, config.power_drain_rate),
            antagonist,
            player: Player::new(camera),
            intents: IntentQueue::new(),
            events: EventLog::new(config.max_events),
            outcome: SessionOutcome::InProgress,
            config,
        })
    }

    /// Advance the session by `dt` seconds.
    pub fn tick(&mut self, dt: f64) -> TickReport {
        if self.outcome.is_final() {
            return self.report(0, 0.0);
        }

        let dt = sanitize_dt(dt);
        self.clock.advance(dt);
        let mut emitted = 0;

        for intent in self.intents.drain() {
            match self.player.apply(intent) {
                Ok(kinds) => emitted += self.emit_all(kinds),
                Err(err) => tracing::warn!(%intent, %err, "intent rejected"),
            }
        }

        let consumers = self.player.active_consumers();
        let drain = self.power.tick(dt, &consumers);

        let kinds = self.antagonist.tick(dt, self.player.doors());
        emitted += self.emit_all(kinds);
        if let Some(kind) = self.antagonist.check_proximity() {
            emitted += self.emit_all(vec![kind]);
        }

        if self.antagonist.is_terminal() {
            self.finalize(SessionOutcome::CaughtByAntagonist);
        } else if drain.depleted_now {
            emitted += self.emit_all(vec![SessionEventKind::PowerDepleted]);
            let forced = self.player.force_safe_state();
            emitted += self.emit_all(forced);
            self.finalize(SessionOutcome::PowerDepleted);
        } else if self
            .config
            .shift_duration
            .is_some_and(|shift| self.clock.elapsed() >= shift)
        {
            emitted += self.emit_all(vec![SessionEventKind::ShiftEnded]);
            self.finalize(SessionOutcome::PlayerSurvived);
        }

        self.report(emitted, drain.drained)
    }

    /// Queue an intent for the next tick. Dropped once the session is over.
    pub fn push_intent(&mut self, intent: PlayerIntent) {
        if self.outcome.is_final() {
            return;
        }
        self.intents.push(intent);
    }

    /// Flip a door now.
    pub fn toggle_door(&mut self, side: DoorSide) {
        if self.outcome.is_final() {
            return;
        }
        let kinds = self.player.toggle_door(side);
        self.emit_all(kinds);
    }

    /// Switch a door light now.
    pub fn set_door_light(&mut self, side: DoorSide, on: bool) {
        if self.outcome.is_final() {
            return;
        }
        let kinds = self.player.set_door_light(side, on);
        self.emit_all(kinds);
    }

    /// Raise or lower the monitor now.
    pub fn toggle_camera_view(&mut self) {
        if self.outcome.is_final() {
            return;
        }
        let kinds = self.player.toggle_camera();
        self.emit_all(kinds);
    }

    /// The host declares the shift over. Only takes effect while in progress.
    pub fn end_shift(&mut self) {
        if self.outcome.is_final() {
            return;
        }
        self.emit_all(vec![SessionEventKind::ShiftEnded]);
        self.finalize(SessionOutcome::PlayerSurvived);
    }

    fn finalize(&mut self, outcome: SessionOutcome) {
        self.outcome = outcome;
        self.intents.clear();
        tracing::info!(
            %outcome,
            tick = self.clock.tick(),
            elapsed = self.clock.elapsed(),
            power = self.power.remaining(),
            "session over"
        );
    }

    fn emit_all(&mut self, kinds: Vec<SessionEventKind>) -> usize {
        let count = kinds.len();
        for kind in kinds {
            self.events.record(self.clock.tick(), self.clock.elapsed(), kind);
        }
        count
    }

    fn report(&self, events: usize, power_drained: f64) -> TickReport {
        TickReport {
            tick: self.clock.tick(),
            outcome: self.outcome,
            events,
            power_drained,
        }
    }

    /// Where Bompa is.
    pub fn antagonist_position(&self) -> DVec3 {
        self.antagonist.position()
    }

    /// What Bompa is doing.
    pub fn antagonist_phase(&self) -> AntagonistPhase {
        self.antagonist.phase()
    }

    /// State of one door.
    pub fn door_state(&self, side: DoorSide) -> DoorRecord {
        self.player.door(side)
    }

    /// Remaining power as a fraction in `[0, 1]`.
    pub fn power_percentage(&self) -> f64 {
        self.power.percentage()
    }

    /// Remaining power in absolute units.
    pub fn remaining_power(&self) -> f64 {
        self.power.remaining()
    }

    /// How the night stands.
    pub fn outcome(&self) -> SessionOutcome {
        self.outcome
    }

    /// Whether a camera watching waypoint `location` sees Bompa.
    pub fn is_antagonist_visible_at(&self, location: usize) -> bool {
        self.antagonist.is_visible_at(location)
    }

    /// Whether the feed on the monitor shows Bompa.
    pub fn antagonist_on_current_feed(&self) -> bool {
        self.player.camera().antagonist_on_current_feed(&self.antagonist)
    }

    /// Current aggression.
    pub fn aggression(&self) -> f64 {
        self.antagonist.aggression()
    }

    /// Whether the monitor is up.
    pub fn is_viewing_cameras(&self) -> bool {
        self.player.is_viewing_cameras()
    }

    /// Seconds since the session started.
    pub fn elapsed(&self) -> f64 {
        self.clock.elapsed()
    }

    /// Ticks since the session started.
    pub fn current_tick(&self) -> u64 {
        self.clock.tick()
    }

    /// The event log.
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// Intents waiting for the next tick.
    pub fn pending_intents(&self) -> usize {
        self.intents.len()
    }

    /// The antagonist.
    pub fn antagonist(&self) -> &Antagonist {
        &self.antagonist
    }

    /// The player controls.
    pub fn player(&self) -> &Player {
        &self.player
    }

    /// The camera monitor.
    pub fn camera(&self) -> &CameraSystem {
        self.player.camera()
    }

    /// The power budget.
    pub fn power(&self) -> &PowerBudget {
        &self.power
    }

    /// The configuration this session was built from.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}
