//! Invariants that must hold for any sequence of ticks and intents.

use bompa_core::{DVec3, DoorSide, GameConfig, GameSession, PlayerIntent, SessionOutcome};
use proptest::prelude::*;

fn side() -> impl Strategy<Value = DoorSide> {
    prop_oneof![Just(DoorSide::Left), Just(DoorSide::Right)]
}

fn intent() -> impl Strategy<Value = PlayerIntent> {
    prop_oneof![
        side().prop_map(|side| PlayerIntent::ToggleDoor { side }),
        (side(), any::<bool>()).prop_map(|(side, closed)| PlayerIntent::SetDoor { side, closed }),
        (side(), any::<bool>()).prop_map(|(side, on)| PlayerIntent::SetDoorLight { side, on }),
        Just(PlayerIntent::ToggleCamera),
        Just(PlayerIntent::NextFeed),
        Just(PlayerIntent::PreviousFeed),
        (0usize..10).prop_map(|feed| PlayerIntent::SelectFeed { feed }),
    ]
}

/// A tick delta plus an optional intent queued before it.
fn step() -> impl Strategy<Value = (f64, Option<PlayerIntent>)> {
    (0.0f64..3.0, proptest::option::of(intent()))
}

/// A straight corridor of `n` waypoints leading up to the office.
fn corridor(n: usize) -> Vec<DVec3> {
    (0..n)
        .map(|i| DVec3::new(if i % 2 == 0 { 4.0 } else { -4.0 }, 0.0, -10.0 - 6.0 * (n - i) as f64))
        .collect()
}

/// Observable state used to check that a finished session stays frozen.
#[derive(Debug, PartialEq)]
struct Snapshot {
    tick: u64,
    outcome: SessionOutcome,
    power: f64,
    position: DVec3,
    waypoint: usize,
    aggression: f64,
    left_closed: bool,
    right_closed: bool,
    left_light: bool,
    right_light: bool,
    monitor: bool,
    feed: usize,
    events: usize,
}

fn snapshot(s: &GameSession) -> Snapshot {
    Snapshot {
        tick: s.current_tick(),
        outcome: s.outcome(),
        power: s.remaining_power(),
        position: s.antagonist_position(),
        waypoint: s.antagonist().waypoint_index(),
        aggression: s.aggression(),
        left_closed: s.door_state(DoorSide::Left).is_closed,
        right_closed: s.door_state(DoorSide::Right).is_closed,
        left_light: s.door_state(DoorSide::Left).light_on,
        right_light: s.door_state(DoorSide::Right).light_on,
        monitor: s.is_viewing_cameras(),
        feed: s.camera().current_index(),
        events: s.events().len(),
    }
}

proptest! {
    #[test]
    fn aggression_never_decreases(
        rate in 0.0f64..500.0,
        steps in proptest::collection::vec(step(), 1..150),
    ) {
        let config = GameConfig::default().with_aggression_increase_rate(rate);
        let mut session = GameSession::new(config).unwrap();
        let mut last = session.aggression();
        for (dt, intent) in steps {
            if let Some(intent) = intent {
                session.push_intent(intent);
            }
            session.tick(dt);
            if session.outcome() == SessionOutcome::InProgress {
                prop_assert!(session.aggression() >= last);
                last = session.aggression();
            }
        }
    }

    #[test]
    fn waypoint_index_stays_in_graph(
        len in 1usize..8,
        wait in 0.0f64..1.0,
        dts in proptest::collection::vec(0.0f64..5.0, 1..300),
    ) {
        let config = GameConfig::default()
            .with_wait_time(wait)
            .with_waypoints(corridor(len))
            .with_max_power(1.0e9);
        let mut session = GameSession::new(config).unwrap();
        session.toggle_door(DoorSide::Left);
        session.toggle_door(DoorSide::Right);
        for dt in dts {
            session.tick(dt);
            prop_assert!(session.antagonist().waypoint_index() < len);
        }
    }

    #[test]
    fn power_stays_within_budget(
        max in 1.0f64..200.0,
        rate in 0.0f64..5.0,
        steps in proptest::collection::vec(step(), 1..200),
    ) {
        let config = GameConfig::default()
            .with_max_power(max)
            .with_power_drain_rate(rate);
        let mut session = GameSession::new(config).unwrap();
        for (dt, intent) in steps {
            if let Some(intent) = intent {
                session.push_intent(intent);
            }
            session.tick(dt);
            let remaining = session.remaining_power();
            prop_assert!((0.0..=max).contains(&remaining));
            prop_assert!((0.0..=1.0).contains(&session.power_percentage()));
        }
    }

    #[test]
    fn finished_session_is_frozen(
        before in proptest::collection::vec(step(), 0..20),
        after in proptest::collection::vec(step(), 1..50),
    ) {
        // Tiny budget so the night always ends quickly.
        let config = GameConfig::default().with_max_power(0.5).with_power_drain_rate(1.0);
        let mut session = GameSession::new(config).unwrap();
        session.toggle_door(DoorSide::Left);
        for (dt, intent) in before {
            if let Some(intent) = intent {
                session.push_intent(intent);
            }
            session.tick(dt);
        }
        for _ in 0..10_000 {
            if session.outcome().is_final() {
                break;
            }
            session.tick(1.0);
        }
        prop_assert!(session.outcome().is_final());

        let frozen = snapshot(&session);
        for (dt, intent) in after {
            if let Some(intent) = intent {
                session.push_intent(intent);
            }
            session.toggle_door(DoorSide::Right);
            session.set_door_light(DoorSide::Left, true);
            session.toggle_camera_view();
            session.end_shift();
            session.tick(dt);
            prop_assert_eq!(&snapshot(&session), &frozen);
        }
    }
}
