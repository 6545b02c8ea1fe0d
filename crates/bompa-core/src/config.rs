use std::path::Path;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::error::{BompaError, BompaResult};
use crate::waypoint::WaypointGraph;

/// A camera feed definition: a display name and the waypoint it watches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraFeedConfig {
    /// Location name shown on the monitor.
    pub name: String,
    /// Index of the waypoint this camera covers.
    pub waypoint: usize,
}

/// Configuration for one night.
///
/// All durations are in seconds, distances in world units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Antagonist movement speed in units per second, before aggression.
    pub move_speed: f64,
    /// Idle dwell at each waypoint, before aggression.
    pub wait_time: f64,
    /// Interval between door checks while waiting at a door.
    pub door_check_interval: f64,
    /// Straight-line distance to the player that triggers a jumpscare.
    pub jumpscare_distance: f64,
    /// Aggression gained per hour of session time.
    pub aggression_increase_rate: f64,
    /// Aggression at session start.
    pub base_aggression: f64,
    /// Optional ceiling for aggression. `None` lets it grow without bound.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_aggression: Option<f64>,
    /// Power at session start.
    pub max_power: f64,
    /// Power drained per second by one closed door.
    pub power_drain_rate: f64,
    /// Optional shift length; surviving this long ends the night.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shift_duration: Option<f64>,
    /// Event log capacity. 0 = unlimited.
    pub max_events: usize,
    /// Where the player sits.
    pub player_position: DVec3,
    /// The antagonist's path. The last two entries sit at the left and right doors.
    pub waypoints: Vec<DVec3>,
    /// Camera feeds. Empty means one feed per waypoint.
    pub camera_feeds: Vec<CameraFeedConfig>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            move_speed: 3.0,
            wait_time: 2.0,
            door_check_interval: 1.0,
            jumpscare_distance: 2.0,
            aggression_increase_rate: 0.1,
            base_aggression: 1.0,
            max_aggression: None,
            max_power: 100.0,
            power_drain_rate: 0.5,
            shift_duration: None,
            max_events: 0,
            player_position: DVec3::ZERO,
            waypoints: vec![
                DVec3::new(0.0, 0.0, -24.0),
                DVec3::new(0.0, 0.0, -16.0),
                DVec3::new(-6.0, 0.0, -10.0),
                DVec3::new(6.0, 0.0, -8.0),
                DVec3::new(-3.5, 0.0, -1.0),
                DVec3::new(3.5, 0.0, -1.0),
            ],
            camera_feeds: Vec::new(),
        }
    }
}

impl GameConfig {
    /// Parse a configuration from TOML. Missing options keep their defaults.
    pub fn from_toml_str(source: &str) -> BompaResult<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Load a configuration from a TOML file.
    pub fn from_path(path: impl AsRef<Path>) -> BompaResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| BompaError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Set the antagonist movement speed.
    pub fn with_move_speed(mut self, speed: f64) -> Self {
        self.move_speed = speed;
        self
    }

    /// Set the idle dwell time.
    pub fn with_wait_time(mut self, seconds: f64) -> Self {
        self.wait_time = seconds;
        self
    }

    /// Set the door check interval.
    pub fn with_door_check_interval(mut self, seconds: f64) -> Self {
        self.door_check_interval = seconds;
        self
    }

    /// Set the jumpscare distance.
    pub fn with_jumpscare_distance(mut self, distance: f64) -> Self {
        self.jumpscare_distance = distance;
        self
    }

    /// Set the hourly aggression increase.
    pub fn with_aggression_increase_rate(mut self, rate: f64) -> Self {
        self.aggression_increase_rate = rate;
        self
    }

    /// Set the starting aggression.
    pub fn with_base_aggression(mut self, aggression: f64) -> Self {
        self.base_aggression = aggression;
        self
    }

    /// Cap aggression at `max`.
    pub fn with_max_aggression(mut self, max: f64) -> Self {
        self.max_aggression = Some(max);
        self
    }

    /// Set the starting power.
    pub fn with_max_power(mut self, power: f64) -> Self {
        self.max_power = power;
        self
    }

    /// Set the per-door power drain rate.
    pub fn with_power_drain_rate(mut self, rate: f64) -> Self {
        self.power_drain_rate = rate;
        self
    }

    /// End the night as survived after `seconds`.
    pub fn with_shift_duration(mut self, seconds: f64) -> Self {
        self.shift_duration = Some(seconds);
        self
    }

    /// Set the event log capacity (0 = unlimited).
    pub fn with_max_events(mut self, max: usize) -> Self {
        self.max_events = max;
        self
    }

    /// Set the player position.
    pub fn with_player_position(mut self, position: DVec3) -> Self {
        self.player_position = position;
        self
    }

    /// Replace the waypoint list.
    pub fn with_waypoints(mut self, waypoints: Vec<DVec3>) -> Self {
        self.waypoints = waypoints;
        self
    }

    /// Replace the camera feed list.
    pub fn with_camera_feeds(mut self, feeds: Vec<CameraFeedConfig>) -> Self {
        self.camera_feeds = feeds;
        self
    }

    /// Check the configuration for values that would break a session.
    pub fn validate(&self) -> BompaResult<()> {
        if self.waypoints.is_empty() {
            return Err(BompaError::EmptyWaypointGraph);
        }

        non_negative("move_speed", self.move_speed)?;
        non_negative("wait_time", self.wait_time)?;
        non_negative("door_check_interval", self.door_check_interval)?;
        non_negative("aggression_increase_rate", self.aggression_increase_rate)?;
        non_negative("power_drain_rate", self.power_drain_rate)?;
        positive("jumpscare_distance", self.jumpscare_distance)?;
        positive("base_aggression", self.base_aggression)?;
        positive("max_power", self.max_power)?;

        if let Some(max) = self.max_aggression {
            positive("max_aggression", max)?;
            if max < self.base_aggression {
                return Err(invalid(
                    "max_aggression",
                    format!("{max} is below base_aggression {}", self.base_aggression),
                ));
            }
        }
        if let Some(shift) = self.shift_duration {
            positive("shift_duration", shift)?;
        }

        if !self.player_position.is_finite() {
            return Err(invalid("player_position", "must be finite".into()));
        }
        if let Some(i) = self.waypoints.iter().position(|w| !w.is_finite()) {
            return Err(invalid("waypoints", format!("waypoint {i} is not finite")));
        }
        for feed in &self.camera_feeds {
            if feed.waypoint >= self.waypoints.len() {
                return Err(invalid(
                    "camera_feeds",
                    format!(
                        "feed \"{}\" watches waypoint {} but the graph has {}",
                        feed.name,
                        feed.waypoint,
                        self.waypoints.len()
                    ),
                ));
            }
        }

        let start = self.waypoints[0].distance(self.player_position);
        if start < self.jumpscare_distance {
            return Err(BompaError::StartTooClose {
                distance: start,
                threshold: self.jumpscare_distance,
            });
        }

        // A door the antagonist can stand at must not already be within reach.
        let graph = WaypointGraph::new(self.waypoints.clone())?;
        for index in graph.last_index().saturating_sub(1)..=graph.last_index() {
            let Some(side) = graph.door_at(index) else {
                continue;
            };
            let distance = graph.position(index).distance(self.player_position);
            if distance < self.jumpscare_distance {
                return Err(BompaError::DoorTooClose {
                    side,
                    distance,
                    threshold: self.jumpscare_distance,
                });
            }
        }

        Ok(())
    }
}

fn invalid(field: &'static str, reason: String) -> BompaError {
    BompaError::InvalidConfig { field, reason }
}

fn non_negative(field: &'static str, value: f64) -> BompaResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(invalid(field, format!("{value} must be a finite, non-negative number")));
    }
    Ok(())
}

fn positive(field: &'static str, value: f64) -> BompaResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(invalid(field, format!("{value} must be a finite, positive number")));
    }
    Ok(())
}
