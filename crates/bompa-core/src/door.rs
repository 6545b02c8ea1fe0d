//! Office doors and their lights.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BompaError;

/// Which office door.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DoorSide {
    /// The left door.
    Left,
    /// The right door.
    Right,
}

impl DoorSide {
    /// Both doors, left first.
    pub const ALL: [DoorSide; 2] = [DoorSide::Left, DoorSide::Right];
}

impl fmt::Display for DoorSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => write!(f, "left"),
            Self::Right => write!(f, "right"),
        }
    }
}

impl FromStr for DoorSide {
    type Err = BompaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "left" | "l" => Ok(Self::Left),
            "right" | "r" => Ok(Self::Right),
            other => Err(BompaError::InvalidDoor(other.to_string())),
        }
    }
}

impl TryFrom<usize> for DoorSide {
    type Error = BompaError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        match index {
            0 => Ok(Self::Left),
            1 => Ok(Self::Right),
            other => Err(BompaError::InvalidDoor(other.to_string())),
        }
    }
}

/// State of a single door.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoorRecord {
    /// Whether the door is shut.
    pub is_closed: bool,
    /// Whether the door light is on.
    pub light_on: bool,
}

/// Read access to door state, handed to the antagonist at tick time.
pub trait DoorView {
    /// Whether the door on `side` is currently shut.
    fn is_closed(&self, side: DoorSide) -> bool;
}

/// Both office doors. Only the player mutates this.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DoorPanel {
    left: DoorRecord,
    right: DoorRecord,
}

impl DoorPanel {
    /// Both doors open, both lights off.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of one door.
    pub fn get(&self, side: DoorSide) -> DoorRecord {
        match side {
            DoorSide::Left => self.left,
            DoorSide::Right => self.right,
        }
    }

    fn get_mut(&mut self, side: DoorSide) -> &mut DoorRecord {
        match side {
            DoorSide::Left => &mut self.left,
            DoorSide::Right => &mut self.right,
        }
    }

    /// Flip a door. Returns the new closed state.
    pub fn toggle(&mut self, side: DoorSide) -> bool {
        let door = self.get_mut(side);
        door.is_closed = !door.is_closed;
        door.is_closed
    }

    /// Set a door's closed state. Returns `true` if it changed.
    pub fn set_closed(&mut self, side: DoorSide, closed: bool) -> bool {
        let door = self.get_mut(side);
        let changed = door.is_closed != closed;
        door.is_closed = closed;
        changed
    }

    /// Set a door light. Returns `true` if it changed.
    pub fn set_light(&mut self, side: DoorSide, on: bool) -> bool {
        let door = self.get_mut(side);
        let changed = door.light_on != on;
        door.light_on = on;
        changed
    }

    /// Number of closed doors.
    pub fn closed_count(&self) -> usize {
        DoorSide::ALL
            .iter()
            .filter(|side| self.get(**side).is_closed)
            .count()
    }

    /// Whether any door light is on.
    pub fn any_light_on(&self) -> bool {
        self.left.light_on || self.right.light_on
    }
}

impl DoorView for DoorPanel {
    fn is_closed(&self, side: DoorSide) -> bool {
        self.get(side).is_closed
    }
}
