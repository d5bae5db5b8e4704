// src/shared_data.rs

use crate::global_variables::{HIGH_INTENSITY_THRESHOLD, MEDIUM_INTENSITY_THRESHOLD};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Compass approach of a lane into the intersection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
        };
        f.write_str(name)
    }
}

/// Coarse per-lane load bucket derived from the vehicle count alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrafficIntensity {
    Low,
    Medium,
    High,
}

impl TrafficIntensity {
    pub fn from_vehicle_count(vehicle_count: u32) -> Self {
        if vehicle_count < MEDIUM_INTENSITY_THRESHOLD {
            TrafficIntensity::Low
        } else if vehicle_count < HIGH_INTENSITY_THRESHOLD {
            TrafficIntensity::Medium
        } else {
            TrafficIntensity::High
        }
    }
}

/// Intersection-wide load bucket derived from the total vehicle count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CongestionLevel {
    Low,
    Medium,
    High,
}

/// The states a single signal head can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LightState {
    Green,
    Yellow,
    Red,
}

/// The part of a lane's active time that can be overridden by hand.
/// Red is always derived from the rest of the cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivePhase {
    Green,
    Yellow,
}

/// A lane as submitted by the caller, before detection has run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaneRequest {
    pub id: String,
    pub name: String,
    pub direction: Direction,
    /// Count already known to the caller (e.g. from a remote detector).
    #[serde(default)]
    pub vehicle_count: Option<u32>,
    /// Raw text printed by an external detector for this lane's footage.
    #[serde(default)]
    pub detector_report: Option<String>,
}

/// A complete processing request for one intersection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntersectionRequest {
    pub lanes: Vec<LaneRequest>,
}

/// Allocator input: one approach with its detected vehicle count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lane {
    pub id: String,
    pub name: String,
    pub direction: Direction,
    pub vehicle_count: u32,
}

/// Green/yellow/red durations for one lane, in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalTiming {
    pub lane_index: usize,
    pub direction: Direction,
    pub green: u32,
    pub yellow: u32,
    pub red: u32,
    pub traffic_intensity: TrafficIntensity,
    pub priority: f64,
}

impl SignalTiming {
    /// Seconds this lane is allowed to move (green plus yellow).
    pub fn active_time(&self) -> u32 {
        self.green.saturating_add(self.yellow)
    }

    /// Share of this lane's full cycle spent on green.
    pub fn green_ratio(&self) -> f64 {
        let total = f64::from(self.green) + f64::from(self.yellow) + f64::from(self.red);
        if total == 0.0 {
            0.0
        } else {
            f64::from(self.green) / total
        }
    }
}

/// Allocator output for a whole intersection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntersectionResult {
    pub timings: Vec<SignalTiming>,
    pub total_vehicles: u64,
    pub cycle_time: u32,
    pub efficiency: f64,
}

/// A lane as it appears in the final report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaneReport {
    pub id: String,
    pub name: String,
    pub direction: Direction,
    pub vehicle_count: u32,
    pub traffic_intensity: TrafficIntensity,
    pub average_speed: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrafficAnalytics {
    pub congestion_level: CongestionLevel,
    pub average_speed: f64,
    pub recommendations: Vec<String>,
    /// Per-lane efficiency in [0, 1], keyed by lane id.
    pub lane_efficiency: BTreeMap<String, f64>,
}

/// Everything produced for one processed intersection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntersectionReport {
    pub timestamp: u64,
    pub lanes: Vec<LaneReport>,
    pub intersection_data: IntersectionResult,
    pub analytics: TrafficAnalytics,
    pub processing_time_ms: u64,
}

/// Seconds since the Unix epoch.
pub fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
