use std::path::PathBuf;

use crate::door::DoorSide;

/// Alias for `Result<T, BompaError>`.
pub type BompaResult<T> = Result<T, BompaError>;

/// Errors surfaced by the session core.
///
/// Gameplay failures (being caught, running out of power) are not errors;
/// they are reported through [`crate::session::SessionOutcome`].
#[derive(Debug, thiserror::Error)]
pub enum BompaError {
    /// The configuration has no waypoints for the antagonist to walk.
    #[error("waypoint graph is empty")]
    EmptyWaypointGraph,

    /// A configuration option is out of its allowed range.
    #[error("invalid config option `{field}`: {reason}")]
    InvalidConfig {
        /// The offending option name.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// The antagonist would start inside the jumpscare radius.
    #[error("first waypoint is {distance:.2} units from the player, inside jumpscare distance {threshold:.2}")]
    StartTooClose {
        /// Distance between the first waypoint and the player.
        distance: f64,
        /// The configured jumpscare distance.
        threshold: f64,
    },

    /// A door waypoint lies inside the jumpscare radius, so a shut door could not protect the player.
    #[error("{side} door waypoint is {distance:.2} units from the player, inside jumpscare distance {threshold:.2}")]
    DoorTooClose {
        /// Which door waypoint.
        side: DoorSide,
        /// Distance between that waypoint and the player.
        distance: f64,
        /// The configured jumpscare distance.
        threshold: f64,
    },

    /// A door identifier did not name the left or right door.
    #[error("invalid door: {0}")]
    InvalidDoor(String),

    /// A camera feed index is past the end of the feed list.
    #[error("unknown camera feed: {0}")]
    UnknownFeed(usize),

    /// A configuration file could not be read.
    #[error("failed to read config {path}: {source}")]
    ConfigIo {
        /// The file that failed to load.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A configuration file is not valid TOML for [`crate::config::GameConfig`].
    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),
}
