//! The office power budget.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::door::DoorSide;

/// Drain multiplier for the camera monitor, relative to one closed door.
pub const CAMERA_DRAIN_FACTOR: f64 = 0.5;
/// Drain multiplier for the door lights, relative to one closed door.
pub const LIGHT_DRAIN_FACTOR: f64 = 0.2;

/// Something that draws power while active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConsumerKind {
    /// A shut door.
    DoorClosed(DoorSide),
    /// The camera monitor is up.
    CameraActive,
    /// At least one door light is on.
    DoorLightActive,
}

/// Result of draining power for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerTick {
    /// Power actually removed this tick.
    pub drained: f64,
    /// `true` only on the tick the budget first hits zero.
    pub depleted_now: bool,
}

/// Remaining power and the drain model.
///
/// Each active consumer drains at a fixed ratio of the base rate; the
/// drains add up linearly and `remaining` stays within `[0, max]`.
#[derive(Debug, Clone)]
pub struct PowerBudget {
    remaining: f64,
    max: f64,
    base_rate: f64,
    depleted: bool,
}

impl PowerBudget {
    /// A full budget of `max` draining `base_rate` per closed door per second.
    pub fn new(max: f64, base_rate: f64) -> Self {
        Self {
            remaining: max,
            max,
            base_rate,
            depleted: false,
        }
    }

    /// Drain per second for one consumer.
    pub fn drain_rate(&self, consumer: ConsumerKind) -> f64 {
        match consumer {
            ConsumerKind::DoorClosed(_) => self.base_rate,
            ConsumerKind::CameraActive => self.base_rate * CAMERA_DRAIN_FACTOR,
            ConsumerKind::DoorLightActive => self.base_rate * LIGHT_DRAIN_FACTOR,
        }
    }

    /// Combined drain per second for a set of consumers.
    pub fn total_rate(&self, consumers: &HashSet<ConsumerKind>) -> f64 {
        consumers.iter().map(|c| self.drain_rate(*c)).sum()
    }

    /// Drain power for `dt` seconds.
    ///
    /// Once depleted the budget stays at zero and never reports depletion again.
    pub fn tick(&mut self, dt: f64, consumers: &HashSet<ConsumerKind>) -> PowerTick {
        if self.depleted {
            return PowerTick {
                drained: 0.0,
                depleted_now: false,
            };
        }

        let before = self.remaining;
        let drain = self.total_rate(consumers) * dt;
        self.remaining = (self.remaining - drain).clamp(0.0, self.max);

        let depleted_now = self.remaining <= 0.0;
        if depleted_now {
            self.depleted = true;
            tracing::debug!(drain, "power budget depleted");
        }

        PowerTick {
            drained: before - self.remaining,
            depleted_now,
        }
    }

    /// Power left.
    pub fn remaining(&self) -> f64 {
        self.remaining
    }

    /// Starting power.
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Remaining power as a fraction in `[0, 1]`.
    pub fn percentage(&self) -> f64 {
        if self.max > 0.0 {
            (self.remaining / self.max).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Whether the budget has hit zero.
    pub fn is_depleted(&self) -> bool {
        self.depleted
    }
}
