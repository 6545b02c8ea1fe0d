//! Bompa's behavior state machine.
//!
//! ```text
//! Idle --(dwell elapsed)--> Moving --(reached waypoint)--> Idle
//!                                  \--(reached door waypoint)--> AtDoor
//! AtDoor --(door found open)--> Jumpscare
//! any --(within jumpscare distance of the player)--> Jumpscare
//! ```
//!
//! Aggression rises every tick and scales both the idle dwell and the
//! movement speed. `Jumpscare` is terminal.

use std::fmt;

use glam::DVec3;
use serde::Serialize;

use crate::config::GameConfig;
use crate::door::{DoorSide, DoorView};
use crate::event::{JumpscareCause, SessionEventKind};
use crate::waypoint::{WaypointGraph, distance_to_segment, move_towards};

/// Distance under which a waypoint counts as reached.
pub const ARRIVAL_EPSILON: f64 = 0.1;

/// Behavior phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AntagonistPhase {
    /// Waiting at a waypoint.
    Idle,
    /// Walking to the next waypoint.
    Moving,
    /// Waiting outside a door, trying it periodically.
    AtDoor,
    /// Caught the player. Terminal.
    Jumpscare,
}

impl fmt::Display for AntagonistPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Moving => write!(f, "moving"),
            Self::AtDoor => write!(f, "at door"),
            Self::Jumpscare => write!(f, "jumpscare"),
        }
    }
}

/// Tuning for the antagonist, taken from [`GameConfig`].
#[derive(Debug, Clone, PartialEq)]
pub struct AntagonistSettings {
    /// Units per second at aggression 1.
    pub move_speed: f64,
    /// Idle dwell at aggression 1.
    pub wait_time: f64,
    /// Seconds between door checks.
    pub door_check_interval: f64,
    /// Catch radius around the player.
    pub jumpscare_distance: f64,
    /// Aggression gained per hour.
    pub aggression_increase_rate: f64,
    /// Starting aggression.
    pub base_aggression: f64,
    /// Optional aggression ceiling.
    pub max_aggression: Option<f64>,
}

impl From<&GameConfig> for AntagonistSettings {
    fn from(config: &GameConfig) -> Self {
        Self {
            move_speed: config.move_speed,
            wait_time: config.wait_time,
            door_check_interval: config.door_check_interval,
            jumpscare_distance: config.jumpscare_distance,
            aggression_increase_rate: config.aggression_increase_rate,
            base_aggression: config.base_aggression,
            max_aggression: config.max_aggression,
        }
    }
}

/// The antagonist and everything it knows.
///
/// The player position is injected at construction; door state is read
/// through a [`DoorView`] each tick and never stored.
#[derive(Debug, Clone)]
pub struct Antagonist {
    graph: WaypointGraph,
    player_position: DVec3,
    settings: AntagonistSettings,
    position: DVec3,
    /// Where this tick's movement started.
    step_origin: DVec3,
    waypoint: usize,
    phase: AntagonistPhase,
    aggression: f64,
    wait_timer: f64,
    door_timer: f64,
    waiting_at: Option<DoorSide>,
}

impl Antagonist {
    /// Place the antagonist idle on the first waypoint.
    pub fn new(graph: WaypointGraph, player_position: DVec3, settings: AntagonistSettings) -> Self {
        let position = graph.position(0);
        let aggression = settings.base_aggression;
        Self {
            graph,
            player_position,
            settings,
            position,
            step_origin: position,
            waypoint: 0,
            phase: AntagonistPhase::Idle,
            aggression,
            wait_timer: 0.0,
            door_timer: 0.0,
            waiting_at: None,
        }
    }

    /// Advance one tick of `dt` seconds. Returns the events raised.
    pub fn tick(&mut self, dt: f64, doors: &dyn DoorView) -> Vec<SessionEventKind> {
        let mut events = Vec::new();
        if self.phase == AntagonistPhase::Jumpscare {
            return events;
        }

        self.step_origin = self.position;
        self.raise_aggression(dt);

        match self.phase {
            AntagonistPhase::Idle => self.tick_idle(dt, &mut events),
            AntagonistPhase::Moving => self.tick_moving(dt, &mut events),
            AntagonistPhase::AtDoor => self.tick_at_door(dt, doors, &mut events),
            AntagonistPhase::Jumpscare => {}
        }

        events
    }

    /// Catch-all failure check: jumpscare if the path walked this tick came
    /// within reach of the player, so a long tick cannot skip past them.
    pub fn check_proximity(&mut self) -> Option<SessionEventKind> {
        if self.phase == AntagonistPhase::Jumpscare {
            return None;
        }
        let closest = distance_to_segment(self.player_position, self.step_origin, self.position);
        if closest < self.settings.jumpscare_distance {
            return Some(self.enter_jumpscare(JumpscareCause::Proximity));
        }
        None
    }

    fn raise_aggression(&mut self, dt: f64) {
        let raised = self.aggression + self.settings.aggression_increase_rate * dt / 3600.0;
        self.aggression = match self.settings.max_aggression {
            Some(cap) => raised.min(cap).max(self.aggression),
            None => raised,
        };
    }

    fn tick_idle(&mut self, dt: f64, events: &mut Vec<SessionEventKind>) {
        self.wait_timer += dt;
        if self.wait_timer < self.settings.wait_time / self.aggression {
            return;
        }

        self.wait_timer = 0.0;
        let from = self.waypoint;
        self.waypoint = self.graph.next_index(from);
        self.phase = AntagonistPhase::Moving;
        tracing::debug!(from, to = self.waypoint, "antagonist moving");
        events.push(SessionEventKind::AntagonistDeparted {
            from,
            to: self.waypoint,
        });
    }

    fn tick_moving(&mut self, dt: f64, events: &mut Vec<SessionEventKind>) {
        let target = self.graph.position(self.waypoint);
        let step = self.settings.move_speed * self.aggression * dt;
        self.position = move_towards(self.position, target, step);

        if self.position.distance(target) >= ARRIVAL_EPSILON {
            return;
        }
        self.position = target;

        events.push(SessionEventKind::AntagonistArrived {
            waypoint: self.waypoint,
        });

        match self.graph.door_at(self.waypoint) {
            Some(side) => {
                self.phase = AntagonistPhase::AtDoor;
                self.door_timer = 0.0;
                self.waiting_at = Some(side);
                tracing::debug!(%side, "antagonist at door");
                events.push(SessionEventKind::ArrivedAtDoor { side });
            }
            None => {
                self.phase = AntagonistPhase::Idle;
                tracing::debug!(waypoint = self.waypoint, "antagonist idle");
            }
        }
    }

    fn tick_at_door(&mut self, dt: f64, doors: &dyn DoorView, events: &mut Vec<SessionEventKind>) {
        self.door_timer += dt;
        if self.door_timer < self.settings.door_check_interval {
            return;
        }
        self.door_timer = 0.0;

        let Some(side) = self.waiting_at else {
            return;
        };
        let closed = doors.is_closed(side);
        tracing::debug!(%side, closed, "antagonist tried door");
        events.push(SessionEventKind::DoorChecked { side, closed });

        if !closed {
            events.push(self.enter_jumpscare(JumpscareCause::DoorOpen(side)));
        }
    }

    fn enter_jumpscare(&mut self, cause: JumpscareCause) -> SessionEventKind {
        self.phase = AntagonistPhase::Jumpscare;
        tracing::info!(%cause, waypoint = self.waypoint, "jumpscare");
        SessionEventKind::Jumpscare { cause }
    }

    /// Current position.
    pub fn position(&self) -> DVec3 {
        self.position
    }

    /// Current phase.
    pub fn phase(&self) -> AntagonistPhase {
        self.phase
    }

    /// Index of the waypoint it is at or heading to.
    pub fn waypoint_index(&self) -> usize {
        self.waypoint
    }

    /// Current aggression.
    pub fn aggression(&self) -> f64 {
        self.aggression
    }

    /// The door it is waiting at, once it has reached one.
    pub fn waiting_at(&self) -> Option<DoorSide> {
        self.waiting_at
    }

    /// Whether a camera watching `location` would see it.
    pub fn is_visible_at(&self, location: usize) -> bool {
        self.waypoint == location
    }

    /// Straight-line distance to the player.
    pub fn distance_to_player(&self) -> f64 {
        self.position.distance(self.player_position)
    }

    /// The path it walks.
    pub fn graph(&self) -> &WaypointGraph {
        &self.graph
    }

    /// Whether it has caught the player.
    pub fn is_terminal(&self) -> bool {
        self.phase == AntagonistPhase::Jumpscare
    }
}
