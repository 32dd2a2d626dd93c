//! Services (transit lines) and their directional routings

use serde::{Deserialize, Serialize};

use crate::ServiceId;

/// Direction of travel as the feed reports it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    North,
    South,
}

impl Direction {
    /// Trailing character the feed appends to stop ids served in this direction
    pub fn marker(self) -> char {
        match self {
            Direction::North => 'N',
            Direction::South => 'S',
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
        }
    }
}

/// Splits a feed stop id such as `"A27N"` into the station id and its
/// direction marker. Returns `None` when nothing is left once the marker is
/// removed.
pub fn split_stop_id(stop_id: &str) -> Option<(&str, char)> {
    let (idx, marker) = stop_id.char_indices().next_back()?;
    if idx == 0 {
        return None;
    }
    Some((&stop_id[..idx], marker))
}

/// Raw stop-id sequences per direction, exactly as the feed reports them
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectionalRoutings {
    pub north: Vec<Vec<String>>,
    pub south: Vec<Vec<String>>,
}

impl DirectionalRoutings {
    pub fn get(&self, direction: Direction) -> &[Vec<String>] {
        match direction {
            Direction::North => &self.north,
            Direction::South => &self.south,
        }
    }
}

/// A service as reported by one routing snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Service {
    pub id: ServiceId,
    pub display_name: String,
    /// Line color, usually a `#rrggbb` string
    pub color: String,
    pub routings: DirectionalRoutings,
}
