use crate::config::SignalConfig;
use crate::control_system::allocate_signal_timings;
use crate::detection::VehicleCountProvider;
use crate::error::ProcessError;
use crate::flow_analyzer::analyze_intersection;
use crate::global_variables::MAX_LANES;
use crate::shared_data::{
    current_timestamp, IntersectionReport, IntersectionRequest, Lane, LaneReport,
    TrafficIntensity,
};
use std::collections::HashSet;
use std::time::Instant;

/// Rejects requests the allocator cannot take: no lanes, too many lanes, or repeated lane ids.
pub fn validate_request(request: &IntersectionRequest) -> Result<(), ProcessError> {
    if request.lanes.is_empty() {
        return Err(ProcessError::NoLanes);
    }
    if request.lanes.len() > MAX_LANES {
        return Err(ProcessError::TooManyLanes {
            count: request.lanes.len(),
            max: MAX_LANES,
        });
    }
    let mut seen = HashSet::new();
    for lane in &request.lanes {
        if !seen.insert(lane.id.as_str()) {
            return Err(ProcessError::DuplicateLaneId(lane.id.clone()));
        }
    }
    Ok(())
}

/// Runs detection for every lane, allocates signal timings and derives the analytics.
pub fn process_intersection<P: VehicleCountProvider + ?Sized>(
    request: &IntersectionRequest,
    provider: &mut P,
    config: &SignalConfig,
) -> Result<IntersectionReport, ProcessError> {
    let started = Instant::now();
    validate_request(request)?;
    config.validate()?;

    let mut lanes = Vec::with_capacity(request.lanes.len());
    let mut reports = Vec::with_capacity(request.lanes.len());
    for lane_request in &request.lanes {
        let vehicle_count = provider.estimate_vehicle_count(lane_request)?;
        let average_speed = provider.estimate_average_speed(lane_request);
        lanes.push(Lane {
            id: lane_request.id.clone(),
            name: lane_request.name.clone(),
            direction: lane_request.direction,
            vehicle_count,
        });
        reports.push(LaneReport {
            id: lane_request.id.clone(),
            name: lane_request.name.clone(),
            direction: lane_request.direction,
            vehicle_count,
            traffic_intensity: TrafficIntensity::from_vehicle_count(vehicle_count),
            average_speed,
        });
    }

    let result = allocate_signal_timings(&lanes, config);
    let analytics = analyze_intersection(&lanes, &reports, &result);
    log::info!(
        "Processed {} lanes: {} vehicles, cycle {}s, efficiency {:.1}%",
        lanes.len(),
        result.total_vehicles,
        result.cycle_time,
        result.efficiency * 100.0
    );

    Ok(IntersectionReport {
        timestamp: current_timestamp(),
        lanes: reports,
        intersection_data: result,
        analytics,
        processing_time_ms: started.elapsed().as_millis() as u64,
    })
}
