use std::fmt;

use serde::Serialize;

use crate::door::DoorSide;

/// Why the antagonist got the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JumpscareCause {
    /// A door check found the door open.
    DoorOpen(DoorSide),
    /// The antagonist came within jumpscare distance of the player.
    Proximity,
}

impl fmt::Display for JumpscareCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DoorOpen(side) => write!(f, "{side} door left open"),
            Self::Proximity => write!(f, "too close"),
        }
    }
}

/// Sound or visual effect the presentation layer should play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Cue {
    /// A door slid open or shut.
    DoorSlam,
    /// The antagonist reached a door.
    DoorArrival,
    /// Monitor static starts or stops.
    CameraStatic,
    /// The office lost power.
    PowerDown,
    /// The player was caught.
    Jumpscare,
    /// The shift is over.
    ShiftOver,
}

/// What kind of session event occurred.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEventKind {
    // Antagonist
    /// The antagonist left one waypoint for another.
    AntagonistDeparted {
        /// Waypoint index it left.
        from: usize,
        /// Waypoint index it is heading to.
        to: usize,
    },
    /// The antagonist reached a waypoint.
    AntagonistArrived {
        /// Waypoint index reached.
        waypoint: usize,
    },
    /// The antagonist is waiting outside a door.
    ArrivedAtDoor {
        /// The door it is waiting at.
        side: DoorSide,
    },
    /// The antagonist tried a door.
    DoorChecked {
        /// The door it tried.
        side: DoorSide,
        /// Whether the door held.
        closed: bool,
    },

    // Player
    /// A door was opened or shut.
    DoorToggled {
        /// The door that moved.
        side: DoorSide,
        /// The new state.
        closed: bool,
    },
    /// A door light switched.
    LightChanged {
        /// The door whose light switched.
        side: DoorSide,
        /// The new light state.
        on: bool,
    },
    /// The camera monitor was raised or lowered.
    CameraToggled {
        /// Whether the monitor is now up.
        active: bool,
    },
    /// The monitor switched feeds.
    FeedSwitched {
        /// Index of the feed now shown.
        feed: usize,
    },

    // Outcome
    /// Power ran out.
    PowerDepleted,
    /// The player was caught.
    Jumpscare {
        /// What gave the player away.
        cause: JumpscareCause,
    },
    /// The player made it through the night.
    ShiftEnded,
}

impl SessionEventKind {
    /// The presentation cue for this event, if it has one.
    pub fn cue(&self) -> Option<Cue> {
        match self {
            Self::DoorToggled { .. } => Some(Cue::DoorSlam),
            Self::ArrivedAtDoor { .. } => Some(Cue::DoorArrival),
            Self::CameraToggled { .. } => Some(Cue::CameraStatic),
            Self::PowerDepleted => Some(Cue::PowerDown),
            Self::Jumpscare { .. } => Some(Cue::Jumpscare),
            Self::ShiftEnded => Some(Cue::ShiftOver),
            Self::AntagonistDeparted { .. }
            | Self::AntagonistArrived { .. }
            | Self::DoorChecked { .. }
            | Self::LightChanged { .. }
            | Self::FeedSwitched { .. } => None,
        }
    }

    /// Whether the event ends the session.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::PowerDepleted | Self::Jumpscare { .. } | Self::ShiftEnded
        )
    }
}

impl fmt::Display for SessionEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AntagonistDeparted { from, to } => {
                write!(f, "Bompa leaves waypoint {from} for waypoint {to}")
            }
            Self::AntagonistArrived { waypoint } => write!(f, "Bompa reaches waypoint {waypoint}"),
            Self::ArrivedAtDoor { side } => write!(f, "Bompa is outside the {side} door"),
            Self::DoorChecked { side, closed: true } => {
                write!(f, "Bompa tries the {side} door; it holds")
            }
            Self::DoorChecked {
                side,
                closed: false,
            } => write!(f, "Bompa tries the {side} door; it is open"),
            Self::DoorToggled { side, closed } => write!(
                f,
                "{side} door {}",
                if *closed { "closed" } else { "opened" }
            ),
            Self::LightChanged { side, on } => {
                write!(f, "{side} light {}", if *on { "on" } else { "off" })
            }
            Self::CameraToggled { active: true } => write!(f, "monitor raised"),
            Self::CameraToggled { active: false } => write!(f, "monitor lowered"),
            Self::FeedSwitched { feed } => write!(f, "monitor shows feed {feed}"),
            Self::PowerDepleted => write!(f, "power out"),
            Self::Jumpscare { cause } => write!(f, "JUMPSCARE ({cause})"),
            Self::ShiftEnded => write!(f, "shift over"),
        }
    }
}

/// A record of something that happened during a session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionEvent {
    /// The tick when this event occurred.
    pub tick: u64,
    /// Session time in seconds when this event occurred.
    pub elapsed: f64,
    /// The specific kind of event that occurred.
    pub kind: SessionEventKind,
    /// A human-readable description of the event.
    pub description: String,
}

impl SessionEvent {
    /// Record `kind` at the given time; the description comes from its `Display`.
    pub fn new(tick: u64, elapsed: f64, kind: SessionEventKind) -> Self {
        let description = kind.to_string();
        Self {
            tick,
            elapsed,
            kind,
            description,
        }
    }
}

/// Session history, oldest first.
///
/// Events are recorded in tick order, so tick lookups are binary searches
/// returning contiguous slices. With a capacity set, the oldest events are
/// evicted and counted.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Vec<SessionEvent>,
    capacity: usize,
    evicted: usize,
}

impl EventLog {
    /// An empty log keeping at most `capacity` events (0 = unlimited).
    pub fn new(capacity: usize) -> Self {
        Self {
            events: Vec::new(),
            capacity,
            evicted: 0,
        }
    }

    /// Record `kind` at the given time and return the stored event.
    pub fn record(&mut self, tick: u64, elapsed: f64, kind: SessionEventKind) -> &SessionEvent {
        debug_assert!(self.events.last().is_none_or(|e| e.tick <= tick));
        if self.capacity > 0 && self.events.len() >= self.capacity {
            let excess = self.events.len() + 1 - self.capacity;
            self.events.drain(..excess);
            self.evicted += excess;
        }
        self.events.push(SessionEvent::new(tick, elapsed, kind));
        &self.events[self.events.len() - 1]
    }

    /// Everything still held, oldest first.
    pub fn events(&self) -> &[SessionEvent] {
        &self.events
    }

    /// Events recorded during `tick`.
    pub fn events_at_tick(&self, tick: u64) -> &[SessionEvent] {
        let start = self.events.partition_point(|e| e.tick < tick);
        let end = self.events.partition_point(|e| e.tick <= tick);
        &self.events[start..end]
    }

    /// Events recorded during `tick` or later.
    pub fn since(&self, tick: u64) -> &[SessionEvent] {
        &self.events[self.events.partition_point(|e| e.tick < tick)..]
    }

    /// Presentation cues raised during `tick`, in the order they fired.
    pub fn cues_at_tick(&self, tick: u64) -> Vec<Cue> {
        self.events_at_tick(tick)
            .iter()
            .filter_map(|e| e.kind.cue())
            .collect()
    }

    /// The event that ended the session, if it has ended.
    pub fn final_event(&self) -> Option<&SessionEvent> {
        self.events.iter().rev().find(|e| e.kind.is_terminal())
    }

    /// How many events were evicted to stay within capacity.
    pub fn evicted(&self) -> usize {
        self.evicted
    }

    /// Number of events held.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether nothing is held.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
