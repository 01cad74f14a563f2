use serde::{Deserialize, Serialize};

use crate::entities::AddressEntry;
use crate::error::{
    missing_home_error, missing_start_or_destination_error, mixed_roles_error,
    too_few_addresses_error, Error,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TravelMode {
    Driving,
}

impl TravelMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelMode::Driving => "driving",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteRequest {
    pub origin: String,
    pub destination: String,
    pub waypoints: Vec<String>,
    pub optimize: bool,
    pub mode: TravelMode,
}

impl RouteRequest {
    /// Partitions the selected entries into origin, destination and
    /// waypoints. Entries that are not selected are ignored.
    pub fn from_entries(entries: &[AddressEntry]) -> Result<Self, Error> {
        let selected: Vec<&AddressEntry> = entries.iter().filter(|e| e.is_selected).collect();

        if selected.len() < 2 {
            return Err(too_few_addresses_error());
        }

        let starts: Vec<_> = selected.iter().filter(|e| e.is_start).collect();
        let destinations: Vec<_> = selected.iter().filter(|e| e.is_destination).collect();
        let homes: Vec<_> = selected.iter().filter(|e| e.is_home).collect();

        let (origin, destination) = if !starts.is_empty() || !destinations.is_empty() {
            if !homes.is_empty() {
                return Err(mixed_roles_error());
            }
            match (starts.as_slice(), destinations.as_slice()) {
                ([start], [destination]) => (start.text.clone(), destination.text.clone()),
                _ => return Err(missing_start_or_destination_error()),
            }
        } else {
            match homes.as_slice() {
                [home] => (home.text.clone(), home.text.clone()),
                _ => return Err(missing_home_error()),
            }
        };

        let waypoints: Vec<String> = selected
            .iter()
            .filter(|e| !e.holds_any_role())
            .map(|e| e.text.clone())
            .collect();

        Ok(Self {
            origin,
            destination,
            optimize: !waypoints.is_empty(),
            waypoints,
            mode: TravelMode::Driving,
        })
    }

    pub fn expected_legs(&self) -> usize {
        self.waypoints.len() + 1
    }
}

/// A localized display string paired with its machine value
/// (meters for distances, seconds for durations).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextValue {
    pub text: String,
    pub value: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteStep {
    pub instruction: String,
    pub distance: TextValue,
    pub duration: TextValue,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteLeg {
    pub distance: TextValue,
    pub duration: TextValue,
    pub start_address: String,
    pub end_address: String,
    pub steps: Vec<RouteStep>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteResult {
    /// Total meters.
    pub distance: u64,
    /// Total seconds.
    pub duration: u64,
    pub waypoint_order: Vec<usize>,
    #[serde(rename = "steps")]
    pub legs: Vec<RouteLeg>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, text: &str) -> AddressEntry {
        AddressEntry::new(id.into(), text.into())
    }

    fn home(id: &str, text: &str) -> AddressEntry {
        let mut e = entry(id, text);
        e.is_home = true;
        e
    }

    #[test]
    fn home_serves_as_origin_and_destination() {
        let entries = vec![home("1", "A St"), entry("2", "B St"), entry("3", "C St")];

        let request = RouteRequest::from_entries(&entries).unwrap();

        assert_eq!(request.origin, "A St");
        assert_eq!(request.destination, "A St");
        assert_eq!(request.waypoints, vec!["B St", "C St"]);
        assert!(request.optimize);
        assert_eq!(request.mode, TravelMode::Driving);
        assert_eq!(request.expected_legs(), 3);
    }

    #[test]
    fn start_and_destination_are_excluded_from_waypoints() {
        let mut start = entry("1", "A St");
        start.is_start = true;
        let mut end = entry("4", "D St");
        end.is_destination = true;
        let mut skipped = entry("3", "C St");
        skipped.is_selected = false;

        let entries = vec![entry("2", "B St"), start, skipped, end, entry("5", "E St")];
        let request = RouteRequest::from_entries(&entries).unwrap();

        assert_eq!(request.origin, "A St");
        assert_eq!(request.destination, "D St");
        assert_eq!(request.waypoints, vec!["B St", "E St"]);
    }

    #[test]
    fn no_waypoints_disables_optimization() {
        let mut start = entry("1", "A St");
        start.is_start = true;
        let mut end = entry("2", "B St");
        end.is_destination = true;

        let request = RouteRequest::from_entries(&[start, end]).unwrap();

        assert!(request.waypoints.is_empty());
        assert!(!request.optimize);
    }

    #[test]
    fn single_selection_is_rejected() {
        let mut other = entry("2", "B St");
        other.is_selected = false;

        let err = RouteRequest::from_entries(&[home("1", "A St"), other]).unwrap_err();
        assert_eq!(err, too_few_addresses_error());
        assert_eq!(err.message, "At least two addresses are required");
    }

    #[test]
    fn missing_destination_is_rejected() {
        let mut start = entry("1", "A St");
        start.is_start = true;

        let err = RouteRequest::from_entries(&[start, entry("2", "B St")]).unwrap_err();
        assert_eq!(err, missing_start_or_destination_error());
    }

    #[test]
    fn missing_home_is_rejected() {
        let err = RouteRequest::from_entries(&[entry("1", "A St"), entry("2", "B St")])
            .unwrap_err();
        assert_eq!(err, missing_home_error());
    }

    #[test]
    fn duplicate_home_is_rejected() {
        let err = RouteRequest::from_entries(&[home("1", "A St"), home("2", "B St")])
            .unwrap_err();
        assert_eq!(err, missing_home_error());
    }

    #[test]
    fn home_mixed_with_start_is_rejected() {
        let mut start = entry("2", "B St");
        start.is_start = true;

        let err = RouteRequest::from_entries(&[home("1", "A St"), start]).unwrap_err();
        assert_eq!(err, mixed_roles_error());
    }

    #[test]
    fn result_serializes_with_wire_names() {
        let result = RouteResult {
            distance: 10,
            duration: 20,
            waypoint_order: vec![0],
            legs: vec![],
        };
        let value = serde_json::to_value(&result).unwrap();

        assert_eq!(value["waypointOrder"], serde_json::json!([0]));
        assert!(value["steps"].is_array());
    }
}
