//! Player intents, queued by the host and consumed once per tick.

use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::door::DoorSide;

/// Something the player wants to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum PlayerIntent {
    /// Flip a door.
    ToggleDoor {
        /// Which door.
        side: DoorSide,
    },
    /// Shut or open a door explicitly.
    SetDoor {
        /// Which door.
        side: DoorSide,
        /// Desired state.
        closed: bool,
    },
    /// Switch a door light; held lights stay on until released.
    SetDoorLight {
        /// Which door.
        side: DoorSide,
        /// Desired light state.
        on: bool,
    },
    /// Raise or lower the camera monitor.
    ToggleCamera,
    /// Show the next feed.
    NextFeed,
    /// Show the previous feed.
    PreviousFeed,
    /// Show a specific feed.
    SelectFeed {
        /// Feed index.
        feed: usize,
    },
}

impl fmt::Display for PlayerIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ToggleDoor { side } => write!(f, "toggle {side} door"),
            Self::SetDoor { side, closed: true } => write!(f, "close {side} door"),
            Self::SetDoor {
                side,
                closed: false,
            } => write!(f, "open {side} door"),
            Self::SetDoorLight { side, on } => {
                write!(f, "{side} light {}", if *on { "on" } else { "off" })
            }
            Self::ToggleCamera => write!(f, "toggle camera"),
            Self::NextFeed => write!(f, "next feed"),
            Self::PreviousFeed => write!(f, "previous feed"),
            Self::SelectFeed { feed } => write!(f, "select feed {feed}"),
        }
    }
}

/// FIFO of pending intents.
#[derive(Debug, Default)]
pub struct IntentQueue {
    pending: VecDeque<PlayerIntent>,
}

impl IntentQueue {
    /// An empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an intent behind any already pending.
    pub fn push(&mut self, intent: PlayerIntent) {
        self.pending.push_back(intent);
    }

    /// Take every pending intent in arrival order.
    pub fn drain(&mut self) -> Vec<PlayerIntent> {
        self.pending.drain(..).collect()
    }

    /// Drop every pending intent.
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Number of pending intents.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
