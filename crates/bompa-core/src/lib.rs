//! Gameplay core for *A Night with Bompa*.
//!
//! A stationary player holds an office against Bompa, who walks a fixed
//! waypoint path toward the doors. The player spends a finite power budget
//! on shutting doors, switching on door lights, and watching the cameras.
//! Everything runs synchronously inside [`GameSession::tick`]; rendering,
//! audio and input polling live in the host and talk to the session through
//! its polling accessors, [`PlayerIntent`]s, and the [`Cue`]s in its event log.

/// Bompa's behavior state machine.
pub mod antagonist;
/// Security camera monitor and feeds.
pub mod camera;
/// Session clock and tick-delta sanitizing.
pub mod clock;
/// Configuration types and validation.
pub mod config;
/// Office doors and door lights.
pub mod door;
/// Error types for the session core.
pub mod error;
/// Session event types, presentation cues, and the event log.
pub mod event;
/// Player intents and the per-tick intent queue.
pub mod intent;
/// The player's door and monitor controls.
pub mod player;
/// The office power budget.
pub mod power;
/// Top-level session orchestrator.
pub mod session;
/// The antagonist's waypoint path.
pub mod waypoint;

/// Re-exports of [`antagonist::Antagonist`] and [`antagonist::AntagonistPhase`].
pub use antagonist::{Antagonist, AntagonistPhase};
/// Re-export of [`camera::CameraSystem`].
pub use camera::CameraSystem;
/// Re-exports of [`config::GameConfig`] and [`config::CameraFeedConfig`].
pub use config::{CameraFeedConfig, GameConfig};
/// Re-exports of [`door::DoorRecord`] and [`door::DoorSide`].
pub use door::{DoorRecord, DoorSide};
/// Re-exports of [`error::BompaError`] and [`error::BompaResult`].
pub use error::{BompaError, BompaResult};
/// Re-exports of the event types.
pub use event::{Cue, EventLog, JumpscareCause, SessionEvent, SessionEventKind};
/// Re-export of [`intent::PlayerIntent`].
pub use intent::PlayerIntent;
/// Re-exports of [`power::ConsumerKind`] and [`power::PowerBudget`].
pub use power::{ConsumerKind, PowerBudget};
/// Re-exports of [`session::GameSession`], [`session::SessionOutcome`], and [`session::TickReport`].
pub use session::{GameSession, SessionOutcome, TickReport};
/// Re-export of [`waypoint::WaypointGraph`].
pub use waypoint::WaypointGraph;
/// Re-export of the position type used throughout the crate.
pub use glam::DVec3;
