//! The player's side of the office: doors, lights, and the camera monitor.
//!
//! `Player` is the only writer of door and monitor state. Every mutator
//! returns the events it caused so the session can log them.

use std::collections::HashSet;

use crate::camera::CameraSystem;
use crate::door::{DoorPanel, DoorRecord, DoorSide};
use crate::error::BompaResult;
use crate::event::SessionEventKind;
use crate::intent::PlayerIntent;
use crate::power::ConsumerKind;

/// Door and monitor controls.
#[derive(Debug, Clone)]
pub struct Player {
    doors: DoorPanel,
    camera: CameraSystem,
}

impl Player {
    /// Doors open, lights off, monitor lowered.
    pub fn new(camera: CameraSystem) -> Self {
        Self {
            doors: DoorPanel::new(),
            camera,
        }
    }

    /// Carry out one intent.
    pub fn apply(&mut self, intent: PlayerIntent) -> BompaResult<Vec<SessionEventKind>> {
        let events = match intent {
            PlayerIntent::ToggleDoor { side } => self.toggle_door(side),
            PlayerIntent::SetDoor { side, closed } => self.set_door(side, closed),
            PlayerIntent::SetDoorLight { side, on } => self.set_door_light(side, on),
            PlayerIntent::ToggleCamera => self.toggle_camera(),
            PlayerIntent::NextFeed => feed_event(self.camera.next_feed()),
            PlayerIntent::PreviousFeed => feed_event(self.camera.previous_feed()),
            PlayerIntent::SelectFeed { feed } => feed_event(self.camera.select_feed(feed)?),
        };
        Ok(events)
    }

    /// Flip a door.
    pub fn toggle_door(&mut self, side: DoorSide) -> Vec<SessionEventKind> {
        let closed = self.doors.toggle(side);
        vec![SessionEventKind::DoorToggled { side, closed }]
    }

    /// Shut or open a door; nothing happens if it is already there.
    pub fn set_door(&mut self, side: DoorSide, closed: bool) -> Vec<SessionEventKind> {
        if self.doors.set_closed(side, closed) {
            vec![SessionEventKind::DoorToggled { side, closed }]
        } else {
            Vec::new()
        }
    }

    /// Switch a door light. Lights cannot come on while the monitor is up.
    pub fn set_door_light(&mut self, side: DoorSide, on: bool) -> Vec<SessionEventKind> {
        let on = on && !self.camera.is_active();
        if self.doors.set_light(side, on) {
            vec![SessionEventKind::LightChanged { side, on }]
        } else {
            Vec::new()
        }
    }

    /// Raise or lower the monitor. Raising it switches the door lights off.
    pub fn toggle_camera(&mut self) -> Vec<SessionEventKind> {
        let active = self.camera.toggle();
        let mut events = Vec::new();
        if active {
            events.extend(self.lights_off());
        }
        events.push(SessionEventKind::CameraToggled { active });
        events
    }

    /// Open both doors, kill the lights and lower the monitor.
    pub fn force_safe_state(&mut self) -> Vec<SessionEventKind> {
        let mut events = Vec::new();
        for side in DoorSide::ALL {
            events.extend(self.set_door(side, false));
        }
        events.extend(self.lights_off());
        if self.camera.set_active(false) {
            events.push(SessionEventKind::CameraToggled { active: false });
        }
        events
    }

    fn lights_off(&mut self) -> Vec<SessionEventKind> {
        DoorSide::ALL
            .into_iter()
            .filter(|side| self.doors.set_light(*side, false))
            .map(|side| SessionEventKind::LightChanged { side, on: false })
            .collect()
    }

    /// Everything currently drawing power.
    pub fn active_consumers(&self) -> HashSet<ConsumerKind> {
        let mut consumers: HashSet<ConsumerKind> = DoorSide::ALL
            .into_iter()
            .filter(|side| self.doors.get(*side).is_closed)
            .map(ConsumerKind::DoorClosed)
            .collect();
        if self.camera.is_active() {
            consumers.insert(ConsumerKind::CameraActive);
        }
        if self.doors.any_light_on() {
            consumers.insert(ConsumerKind::DoorLightActive);
        }
        consumers
    }

    /// Both doors.
    pub fn doors(&self) -> &DoorPanel {
        &self.doors
    }

    /// One door.
    pub fn door(&self, side: DoorSide) -> DoorRecord {
        self.doors.get(side)
    }

    /// The monitor.
    pub fn camera(&self) -> &CameraSystem {
        &self.camera
    }

    /// Whether the monitor is up.
    pub fn is_viewing_cameras(&self) -> bool {
        self.camera.is_active()
    }
}

fn feed_event(changed: Option<usize>) -> Vec<SessionEventKind> {
    changed
        .map(|feed| SessionEventKind::FeedSwitched { feed })
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BompaError;

    fn player() -> Player {
        Player::new(CameraSystem::one_per_waypoint(4))
    }

    #[test]
    fn toggle_door_reports_new_state() {
        let mut p = player();
        assert_eq!(
            p.toggle_door(DoorSide::Right),
            vec![SessionEventKind::DoorToggled {
                side: DoorSide::Right,
                closed: true
            }]
        );
        assert!(p.door(DoorSide::Right).is_closed);
        assert!(!p.door(DoorSide::Left).is_closed);
    }

    #[test]
    fn set_door_is_idempotent() {
        let mut p = player();
        assert_eq!(p.set_door(DoorSide::Left, true).len(), 1);
        assert!(p.set_door(DoorSide::Left, true).is_empty());
    }

    #[test]
    fn lights_blocked_while_viewing_cameras() {
        let mut p = player();
        p.toggle_camera();
        assert!(p.set_door_light(DoorSide::Left, true).is_empty());
        assert!(!p.door(DoorSide::Left).light_on);
    }

    #[test]
    fn raising_monitor_kills_lights() {
        let mut p = player();
        p.set_door_light(DoorSide::Left, true);
        p.set_door_light(DoorSide::Right, true);
        let events = p.toggle_camera();
        assert_eq!(events.len(), 3);
        assert!(!p.doors().any_light_on());
        assert!(p.is_viewing_cameras());
    }

    #[test]
    fn consumers_reflect_state() {
        let mut p = player();
        assert!(p.active_consumers().is_empty());

        p.set_door(DoorSide::Left, true);
        p.set_door_light(DoorSide::Right, true);
        p.set_door_light(DoorSide::Left, true);
        let consumers = p.active_consumers();
        assert_eq!(consumers.len(), 2);
        assert!(consumers.contains(&ConsumerKind::DoorClosed(DoorSide::Left)));
        assert!(consumers.contains(&ConsumerKind::DoorLightActive));

        p.toggle_camera();
        let consumers = p.active_consumers();
        assert!(consumers.contains(&ConsumerKind::CameraActive));
        assert!(!consumers.contains(&ConsumerKind::DoorLightActive));
    }

    #[test]
    fn force_safe_state_opens_everything() {
        let mut p = player();
        p.set_door(DoorSide::Left, true);
        p.set_door(DoorSide::Right, true);
        p.toggle_camera();
        let events = p.force_safe_state();
        assert_eq!(events.len(), 3);
        assert_eq!(p.doors().closed_count(), 0);
        assert!(!p.is_viewing_cameras());
        assert!(p.active_consumers().is_empty());
    }

    #[test]
    fn feed_intents() {
        let mut p = player();
        // Monitor down: neither cycling nor selecting does anything.
        assert!(p.apply(PlayerIntent::NextFeed).unwrap().is_empty());
        assert!(p.apply(PlayerIntent::SelectFeed { feed: 2 }).unwrap().is_empty());
        assert_eq!(p.camera().current_index(), 0);
        p.apply(PlayerIntent::ToggleCamera).unwrap();
        assert_eq!(
            p.apply(PlayerIntent::PreviousFeed).unwrap(),
            vec![SessionEventKind::FeedSwitched { feed: 3 }]
        );
        assert_eq!(
            p.apply(PlayerIntent::SelectFeed { feed: 1 }).unwrap(),
            vec![SessionEventKind::FeedSwitched { feed: 1 }]
        );
        assert!(matches!(
            p.apply(PlayerIntent::SelectFeed { feed: 9 }),
            Err(BompaError::UnknownFeed(9))
        ));
    }
}
