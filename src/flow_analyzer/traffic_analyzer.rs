use crate::control_system::calculate_lane_efficiency;
use crate::global_variables::{HIGH_CONGESTION_THRESHOLD, MEDIUM_CONGESTION_THRESHOLD};
use crate::shared_data::{
    CongestionLevel, IntersectionResult, Lane, LaneReport, TrafficAnalytics, TrafficIntensity,
};
use std::collections::BTreeMap;

pub fn congestion_level(total_vehicles: u64) -> CongestionLevel {
    if total_vehicles < u64::from(MEDIUM_CONGESTION_THRESHOLD) {
        CongestionLevel::Low
    } else if total_vehicles < u64::from(HIGH_CONGESTION_THRESHOLD) {
        CongestionLevel::Medium
    } else {
        CongestionLevel::High
    }
}

// Operator advice for the processed intersection.
pub fn generate_recommendations(lanes: &[LaneReport]) -> Vec<String> {
    let mut recommendations = Vec::new();

    if lanes
        .iter()
        .any(|lane| lane.traffic_intensity == TrafficIntensity::High)
    {
        recommendations.push("Consider extending green time for high-traffic directions".to_string());
        recommendations
            .push("Implement dynamic signal timing based on real-time vehicle density".to_string());
    }

    if lanes.len() > 2 {
        recommendations.push("Optimize signal coordination between multiple approaches".to_string());
        recommendations.push("Consider implementing adaptive signal control system".to_string());
    }

    recommendations.push("Monitor traffic patterns for optimal signal timing".to_string());
    recommendations.push("Continue monitoring for traffic pattern changes".to_string());
    recommendations
}

/// Mean of the speeds the detector reported; lanes without a reading are skipped.
pub fn average_speed(lanes: &[LaneReport]) -> f64 {
    let speeds: Vec<f64> = lanes.iter().filter_map(|lane| lane.average_speed).collect();
    if speeds.is_empty() {
        0.0
    } else {
        speeds.iter().sum::<f64>() / speeds.len() as f64
    }
}

pub fn analyze_intersection(
    lanes: &[Lane],
    reports: &[LaneReport],
    result: &IntersectionResult,
) -> TrafficAnalytics {
    let lane_efficiency: BTreeMap<String, f64> = lanes
        .iter()
        .zip(calculate_lane_efficiency(lanes, &result.timings))
        .map(|(lane, score)| (lane.id.clone(), score))
        .collect();

    TrafficAnalytics {
        congestion_level: congestion_level(result.total_vehicles),
        average_speed: average_speed(reports),
        recommendations: generate_recommendations(reports),
        lane_efficiency,
    }
}
