use crate::error::ProcessError;
use crate::global_variables::{
    DETECTOR_TOTAL_MARKER, MOCK_MAX_SPEED_KMH, MOCK_MAX_VEHICLES_PER_FRAME, MOCK_MIN_SPEED_KMH,
    MOCK_SAMPLE_INTERVAL, MOCK_TOTAL_FRAMES,
};
use crate::shared_data::LaneRequest;
use rand::rngs::ThreadRng;
use rand::Rng;

/// Source of per-lane vehicle counts. The allocator only ever sees the integer this returns.
pub trait VehicleCountProvider {
    fn estimate_vehicle_count(&mut self, lane: &LaneRequest) -> Result<u32, ProcessError>;

    /// Mean vehicle speed for the lane in km/h, if the provider measures it.
    fn estimate_average_speed(&mut self, _lane: &LaneRequest) -> Option<f64> {
        None
    }
}

/// Trusts the count the caller attached to each lane. Lanes without one count as empty.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReportedCountProvider;

impl VehicleCountProvider for ReportedCountProvider {
    fn estimate_vehicle_count(&mut self, lane: &LaneRequest) -> Result<u32, ProcessError> {
        Ok(lane.vehicle_count.unwrap_or(0))
    }
}

/// Demo detector: pretends to scan a clip, summing a random 0..=8 vehicles on every sampled frame.
#[derive(Debug)]
pub struct MockFrameSampler<R: Rng> {
    rng: R,
    total_frames: u32,
    sample_interval: u32,
}

impl<R: Rng> MockFrameSampler<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            total_frames: MOCK_TOTAL_FRAMES,
            sample_interval: MOCK_SAMPLE_INTERVAL,
        }
    }

    pub fn sampled_frames(&self) -> u32 {
        self.total_frames / self.sample_interval.max(1)
    }
}

impl MockFrameSampler<ThreadRng> {
    pub fn with_thread_rng() -> Self {
        Self::new(rand::rng())
    }
}

impl<R: Rng> VehicleCountProvider for MockFrameSampler<R> {
    fn estimate_vehicle_count(&mut self, lane: &LaneRequest) -> Result<u32, ProcessError> {
        let frames = self.sampled_frames();
        let total: u32 = (0..frames)
            .map(|_| self.rng.random_range(0..=MOCK_MAX_VEHICLES_PER_FRAME))
            .sum();
        log::debug!(
            "Mock detection for lane {}: {} vehicles over {} sampled frames",
            lane.id,
            total,
            frames
        );
        Ok(total)
    }

    fn estimate_average_speed(&mut self, _lane: &LaneRequest) -> Option<f64> {
        Some(self.rng.random_range(MOCK_MIN_SPEED_KMH..MOCK_MAX_SPEED_KMH))
    }
}

/// Reads the vehicle total out of the text an external detector printed for the lane.
#[derive(Debug, Default, Clone, Copy)]
pub struct DetectorReportProvider;

impl DetectorReportProvider {
    pub fn parse_total(report: &str) -> Option<u32> {
        report.lines().find_map(|line| {
            let (_, rest) = line.split_once(DETECTOR_TOTAL_MARKER)?;
            let digits: String = rest
                .trim_start()
                .chars()
                .take_while(|c| c.is_ascii_digit())
                .collect();
            digits.parse().ok()
        })
    }
}

impl VehicleCountProvider for DetectorReportProvider {
    fn estimate_vehicle_count(&mut self, lane: &LaneRequest) -> Result<u32, ProcessError> {
        lane.detector_report
            .as_deref()
            .and_then(Self::parse_total)
            .ok_or_else(|| ProcessError::UnreadableReport {
                lane_id: lane.id.clone(),
            })
    }
}
