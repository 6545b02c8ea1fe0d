//! Security camera monitor.
//!
//! The monitor never moves the antagonist; it only reports which waypoint a
//! feed watches and whether the antagonist is standing there.

use crate::antagonist::Antagonist;
use crate::config::CameraFeedConfig;
use crate::error::{BompaError, BompaResult};

/// One camera feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraFeed {
    /// Location name shown on the monitor.
    pub name: String,
    /// Waypoint index the camera covers.
    pub waypoint: usize,
}

impl From<&CameraFeedConfig> for CameraFeed {
    fn from(config: &CameraFeedConfig) -> Self {
        Self {
            name: config.name.clone(),
            waypoint: config.waypoint,
        }
    }
}

/// The monitor and its feeds.
#[derive(Debug, Clone)]
pub struct CameraSystem {
    feeds: Vec<CameraFeed>,
    current: usize,
    active: bool,
}

impl CameraSystem {
    /// Build a monitor over `feeds`, lowered, showing the first feed.
    pub fn new(feeds: Vec<CameraFeed>) -> Self {
        Self {
            feeds,
            current: 0,
            active: false,
        }
    }

    /// One feed per waypoint, named `CAM 1`, `CAM 2`, ...
    pub fn one_per_waypoint(waypoints: usize) -> Self {
        Self::new(
            (0..waypoints)
                .map(|i| CameraFeed {
                    name: format!("CAM {}", i + 1),
                    waypoint: i,
                })
                .collect(),
        )
    }

    /// Build from config, falling back to one feed per waypoint.
    pub fn from_config(feeds: &[CameraFeedConfig], waypoints: usize) -> Self {
        if feeds.is_empty() {
            Self::one_per_waypoint(waypoints)
        } else {
            Self::new(feeds.iter().map(CameraFeed::from).collect())
        }
    }

    /// Whether the monitor is up.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Raise or lower the monitor. Returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.active = !self.active;
        self.active
    }

    /// Force the monitor state. Returns `true` if it changed.
    pub fn set_active(&mut self, active: bool) -> bool {
        let changed = self.active != active;
        self.active = active;
        changed
    }

    /// All feeds.
    pub fn feeds(&self) -> &[CameraFeed] {
        &self.feeds
    }

    /// Index of the feed on screen.
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The feed on screen, if any feeds exist.
    pub fn current_feed(&self) -> Option<&CameraFeed> {
        self.feeds.get(self.current)
    }

    /// Cycle forward with wrap-around. No-op while the monitor is down.
    /// Returns the new feed index when it changed.
    pub fn next_feed(&mut self) -> Option<usize> {
        if !self.active || self.feeds.len() < 2 {
            return None;
        }
        self.current = (self.current + 1) % self.feeds.len();
        Some(self.current)
    }

    /// Cycle backward with wrap-around. No-op while the monitor is down.
    /// Returns the new feed index when it changed.
    pub fn previous_feed(&mut self) -> Option<usize> {
        if !self.active || self.feeds.len() < 2 {
            return None;
        }
        self.current = (self.current + self.feeds.len() - 1) % self.feeds.len();
        Some(self.current)
    }

    /// Jump straight to a feed. Like cycling, a no-op while the monitor is down.
    /// Returns the new feed index when it changed; an index past the end is an error
    /// either way.
    pub fn select_feed(&mut self, index: usize) -> BompaResult<Option<usize>> {
        if index >= self.feeds.len() {
            return Err(BompaError::UnknownFeed(index));
        }
        if !self.active || index == self.current {
            return Ok(None);
        }
        self.current = index;
        Ok(Some(index))
    }

    /// Whether the feed on screen shows the antagonist.
    pub fn antagonist_on_current_feed(&self, antagonist: &Antagonist) -> bool {
        self.current_feed()
            .is_some_and(|feed| antagonist.is_visible_at(feed.waypoint))
    }
}
