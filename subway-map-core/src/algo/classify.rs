//! Stop icon categories

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{ServiceId, model::StationSets};

/// Icon category of a station marker. Serializes to the icon name the map
/// style uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StopIcon {
    /// Served in both directions
    #[serde(rename = "express-stop")]
    ExpressStop,
    /// Southbound only, and every passing service stops
    #[serde(rename = "all-downtown-trains")]
    AllDowntown,
    /// Northbound only, and every passing service stops
    #[serde(rename = "all-uptown-trains")]
    AllUptown,
    /// Southbound only, some passing services skip it
    #[serde(rename = "downtown-only")]
    DowntownOnly,
    /// Northbound only, some passing services skip it
    #[serde(rename = "uptown-only")]
    UptownOnly,
    /// Both directions; every passing service stops southbound
    #[serde(rename = "downtown-all-trains")]
    DowntownAllTrains,
    /// Both directions; every passing service stops northbound
    #[serde(rename = "uptown-all-trains")]
    UptownAllTrains,
    #[serde(rename = "circle-15")]
    Generic,
    #[serde(rename = "cross-15")]
    NoService,
}

impl StopIcon {
    pub fn icon_name(self) -> &'static str {
        match self {
            StopIcon::ExpressStop => "express-stop",
            StopIcon::AllDowntown => "all-downtown-trains",
            StopIcon::AllUptown => "all-uptown-trains",
            StopIcon::DowntownOnly => "downtown-only",
            StopIcon::UptownOnly => "uptown-only",
            StopIcon::DowntownAllTrains => "downtown-all-trains",
            StopIcon::UptownAllTrains => "uptown-all-trains",
            StopIcon::Generic => "circle-15",
            StopIcon::NoService => "cross-15",
        }
    }
}

impl std::fmt::Display for StopIcon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.icon_name())
    }
}

/// Icon of a station given its derived sets.
///
/// With `selected_service`, the icon describes that service only. Without
/// it, the passing services are compared against the stopping ones.
pub fn classify(sets: &StationSets, selected_service: Option<&str>) -> StopIcon {
    match selected_service {
        Some(service) => classify_for_service(sets, service),
        None => classify_overview(sets),
    }
}

fn classify_for_service(sets: &StationSets, service: &str) -> StopIcon {
    match (
        sets.north_stops.contains(service),
        sets.south_stops.contains(service),
    ) {
        (true, true) => StopIcon::ExpressStop,
        (false, true) => StopIcon::AllDowntown,
        (true, false) => StopIcon::AllUptown,
        (false, false) if !sets.has_service() => StopIcon::NoService,
        (false, false) => StopIcon::Generic,
    }
}

fn classify_overview(sets: &StationSets) -> StopIcon {
    if !sets.has_service() {
        return StopIcon::NoService;
    }

    let all_stop = |stops: &BTreeSet<ServiceId>| sets.passed_by.iter().all(|s| stops.contains(s));
    let all_south = all_stop(&sets.south_stops);
    let all_north = all_stop(&sets.north_stops);

    if all_south && all_north {
        StopIcon::ExpressStop
    } else if sets.north_stops.is_empty() {
        if all_south {
            StopIcon::AllDowntown
        } else {
            StopIcon::DowntownOnly
        }
    } else if sets.south_stops.is_empty() {
        if all_north {
            StopIcon::AllUptown
        } else {
            StopIcon::UptownOnly
        }
    } else if all_south {
        StopIcon::DowntownAllTrains
    } else if all_north {
        StopIcon::UptownAllTrains
    } else {
        StopIcon::Generic
    }
}
