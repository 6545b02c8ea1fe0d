use glam::DVec3;

use crate::door::DoorSide;
use crate::error::{BompaError, BompaResult};

/// The ordered path the antagonist walks toward the office.
///
/// Read-only once built. The second-to-last waypoint sits outside the left
/// door and the last one outside the right door.
#[derive(Debug, Clone, PartialEq)]
pub struct WaypointGraph {
    points: Vec<DVec3>,
}

impl WaypointGraph {
    /// Build a graph from positions. Fails when `points` is empty.
    pub fn new(points: Vec<DVec3>) -> BompaResult<Self> {
        if points.is_empty() {
            return Err(BompaError::EmptyWaypointGraph);
        }
        Ok(Self { points })
    }

    /// Number of waypoints. Always at least 1.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`; a graph cannot be built empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Index of the final waypoint.
    pub fn last_index(&self) -> usize {
        self.points.len() - 1
    }

    /// Position of the waypoint at `index`, clamped to the last waypoint.
    pub fn position(&self, index: usize) -> DVec3 {
        self.points[index.min(self.last_index())]
    }

    /// The index after `index`, never past the last waypoint.
    pub fn next_index(&self, index: usize) -> usize {
        (index + 1).min(self.last_index())
    }

    /// The door a waypoint sits in front of, if it is one of the final two.
    pub fn door_at(&self, index: usize) -> Option<DoorSide> {
        let last = self.last_index();
        if index == last {
            Some(DoorSide::Right)
        } else if last >= 1 && index == last - 1 {
            Some(DoorSide::Left)
        } else {
            None
        }
    }

    /// All positions in path order.
    pub fn points(&self) -> &[DVec3] {
        &self.points
    }
}

/// Step `current` toward `target` by at most `max_step`, never overshooting.
pub fn move_towards(current: DVec3, target: DVec3, max_step: f64) -> DVec3 {
    let offset = target - current;
    let distance = offset.length();
    if distance <= max_step || distance == 0.0 {
        target
    } else {
        current + offset / distance * max_step
    }
}

/// Shortest distance from `point` to the segment `start..end`.
pub fn distance_to_segment(point: DVec3, start: DVec3, end: DVec3) -> f64 {
    let segment = end - start;
    let length_sq = segment.length_squared();
    if length_sq <= f64::EPSILON {
        return point.distance(start);
    }
    let t = ((point - start).dot(segment) / length_sq).clamp(0.0, 1.0);
    point.distance(start + segment * t)
}
