use crate::config::SignalConfig;
use crate::global_variables::INTENSITY_WEIGHT_SCALE;
use crate::shared_data::{IntersectionResult, Lane, SignalTiming, TrafficIntensity};

/// Exponential load weight of a lane: `exp(count / 20) - 1`.
/// Zero vehicles give a weight of exactly zero.
pub fn intensity_weight(vehicle_count: u32) -> f64 {
    (f64::from(vehicle_count) / INTENSITY_WEIGHT_SCALE).exp() - 1.0
}

// Fraction of the green budget owed to each lane, or None when no lane carries weight.
fn weight_shares(lanes: &[Lane], weights: &[f64]) -> Option<Vec<f64>> {
    let total: f64 = weights.iter().sum();
    if total == 0.0 {
        return None;
    }
    if total.is_finite() {
        return Some(weights.iter().map(|w| w / total).collect());
    }

    // exp() overflowed for at least one lane; normalise against the heaviest exponent instead.
    let exponents: Vec<f64> = lanes
        .iter()
        .map(|lane| f64::from(lane.vehicle_count) / INTENSITY_WEIGHT_SCALE)
        .collect();
    let peak = exponents.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let scaled: Vec<f64> = exponents.iter().map(|x| (x - peak).exp()).collect();
    let scaled_total: f64 = scaled.iter().sum();
    Some(scaled.iter().map(|s| s / scaled_total).collect())
}

/// Computes green/yellow/red timings for every lane of an intersection.
///
/// Green time is shared out in proportion to each lane's exponential weight, over a budget of
/// `max_green_time * lanes`, then clamped into `[base_green_time, max_green_time]`. Lanes run
/// round-robin, so a lane's red time is the cycle minus its own green and yellow.
///
/// Callers must pass at least one lane; `process_intersection` rejects empty requests.
pub fn allocate_signal_timings(lanes: &[Lane], config: &SignalConfig) -> IntersectionResult {
    let weights: Vec<f64> = lanes
        .iter()
        .map(|lane| intensity_weight(lane.vehicle_count))
        .collect();
    let budget = f64::from(config.max_green_time) * lanes.len() as f64;

    let greens: Vec<u32> = match weight_shares(lanes, &weights) {
        None => vec![config.base_green_time; lanes.len()],
        Some(shares) => shares
            .iter()
            .map(|share| {
                let raw = (share * budget).round() as u32;
                raw.clamp(config.base_green_time, config.max_green_time)
            })
            .collect(),
    };

    let cycle_time: u32 = greens.iter().map(|g| g + config.yellow_time).sum();

    let timings: Vec<SignalTiming> = lanes
        .iter()
        .zip(greens.iter().zip(weights.iter()))
        .enumerate()
        .map(|(lane_index, (lane, (&green, &weight)))| {
            let red = cycle_time - green - config.yellow_time;
            log::debug!(
                "Lane {} ({}): {} vehicles, weight {:.3}, green {}s, red {}s",
                lane.id,
                lane.direction,
                lane.vehicle_count,
                weight,
                green,
                red
            );
            SignalTiming {
                lane_index,
                direction: lane.direction,
                green,
                yellow: config.yellow_time,
                red,
                traffic_intensity: TrafficIntensity::from_vehicle_count(lane.vehicle_count),
                priority: weight.min(f64::MAX),
            }
        })
        .collect();

    let total_vehicles = lanes.iter().map(|lane| u64::from(lane.vehicle_count)).sum();
    let efficiency = calculate_efficiency(lanes, &timings);

    IntersectionResult {
        timings,
        total_vehicles,
        cycle_time,
        efficiency,
    }
}

// Unclamped per-lane score `1 - |expected - green| / expected`, where `expected` is the green
// time the lane would get under linear proportionality. None for a zero-traffic intersection.
fn raw_lane_scores(lanes: &[Lane], timings: &[SignalTiming]) -> Option<Vec<f64>> {
    let total_vehicles: u64 = lanes.iter().map(|lane| u64::from(lane.vehicle_count)).sum();
    if total_vehicles == 0 {
        return None;
    }
    let total_green: f64 = timings.iter().map(|t| f64::from(t.green)).sum();
    if total_green == 0.0 {
        return Some(vec![0.0; lanes.len()]);
    }

    let scores = lanes
        .iter()
        .zip(timings)
        .map(|(lane, timing)| {
            let expected = f64::from(lane.vehicle_count) / total_vehicles as f64 * total_green;
            let deviation = if expected > 0.0 {
                (expected - f64::from(timing.green)).abs() / expected
            } else {
                0.0
            };
            1.0 - deviation
        })
        .collect();
    Some(scores)
}

/// How closely the green allocation tracks a purely proportional one, in `[0, 1]`.
pub fn calculate_efficiency(lanes: &[Lane], timings: &[SignalTiming]) -> f64 {
    match raw_lane_scores(lanes, timings) {
        None => 1.0,
        Some(scores) if scores.is_empty() => 0.0,
        Some(scores) => {
            let mean = scores.iter().sum::<f64>() / scores.len() as f64;
            mean.clamp(0.0, 1.0)
        }
    }
}

/// Per-lane breakdown of [`calculate_efficiency`], each score clamped to `[0, 1]`.
pub fn calculate_lane_efficiency(lanes: &[Lane], timings: &[SignalTiming]) -> Vec<f64> {
    match raw_lane_scores(lanes, timings) {
        None => vec![1.0; lanes.len()],
        Some(scores) => scores.iter().map(|s| s.clamp(0.0, 1.0)).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared_data::Direction;

    fn lanes_with_counts(counts: &[u32]) -> Vec<Lane> {
        let directions = [Direction::North, Direction::South, Direction::East, Direction::West];
        counts
            .iter()
            .enumerate()
            .map(|(i, &count)| Lane {
                id: format!("lane{}", i),
                name: format!("Lane {}", i + 1),
                direction: directions[i % directions.len()],
                vehicle_count: count,
            })
            .collect()
    }

    fn allocate(counts: &[u32]) -> IntersectionResult {
        allocate_signal_timings(&lanes_with_counts(counts), &SignalConfig::default())
    }

    #[test]
    fn four_lane_scenario() {
        let result = allocate(&[5, 45, 10, 60]);
        let greens: Vec<u32> = result.timings.iter().map(|t| t.green).collect();

        assert!(greens.iter().all(|g| (20..=60).contains(g)));
        assert_eq!(greens[3], *greens.iter().max().unwrap());
        assert_eq!(greens, vec![20, 60, 20, 60]);

        let intensities: Vec<TrafficIntensity> =
            result.timings.iter().map(|t| t.traffic_intensity).collect();
        assert_eq!(
            intensities,
            vec![
                TrafficIntensity::Low,
                TrafficIntensity::Medium,
                TrafficIntensity::Low,
                TrafficIntensity::High
            ]
        );

        assert!(result.efficiency.is_finite());
        assert!((0.0..=1.0).contains(&result.efficiency));
        assert!((result.efficiency - 0.3125).abs() < 1e-9);
        assert_eq!(result.total_vehicles, 120);
    }

    #[test]
    fn single_idle_lane() {
        let result = allocate(&[0]);
        let timing = &result.timings[0];
        assert_eq!(timing.green, 20);
        assert_eq!(timing.yellow, 3);
        assert_eq!(timing.red, 0);
        assert_eq!(timing.traffic_intensity, TrafficIntensity::Low);
        assert_eq!(result.efficiency, 1.0);
        assert_eq!(result.cycle_time, 23);
    }

    #[test]
    fn zero_traffic_gets_base_green_everywhere() {
        let result = allocate(&[0, 0, 0, 0, 0]);
        assert!(result.timings.iter().all(|t| t.green == 20 && t.priority == 0.0));
        assert_eq!(result.efficiency, 1.0);
    }

    #[test]
    fn cycle_is_consistent_with_red_times() {
        for counts in [vec![3, 80], vec![12, 0, 40], vec![1, 2, 3, 4, 5, 6, 7, 8]] {
            let result = allocate(&counts);
            let active: u32 = result.timings.iter().map(|t| t.green + t.yellow).sum();
            assert_eq!(active, result.cycle_time);
            for t in &result.timings {
                assert_eq!(t.red, result.cycle_time - t.green - t.yellow);
            }
        }
    }

    #[test]
    fn bounds_hold_for_a_range_of_inputs() {
        let samples: [&[u32]; 6] = [
            &[0],
            &[200],
            &[0, 1000],
            &[19, 20, 49, 50],
            &[7, 7, 7, 7, 7, 7, 7, 7],
            &[u32::MAX, 0, 30],
        ];
        for counts in samples {
            let result = allocate(counts);
            assert_eq!(result.timings.len(), counts.len());
            for (i, t) in result.timings.iter().enumerate() {
                assert_eq!(t.lane_index, i);
                assert!((20..=60).contains(&t.green), "green {} for {:?}", t.green, counts);
                assert_eq!(t.yellow, 3);
            }
            assert!((0.0..=1.0).contains(&result.efficiency));
        }
    }

    #[test]
    fn overflowing_weights_still_favour_the_busiest_lane() {
        let result = allocate(&[u32::MAX, 0, 30]);
        assert_eq!(result.timings[0].green, 60);
        assert_eq!(result.timings[1].green, 20);
        assert!(result.timings[0].priority.is_finite());
    }

    #[test]
    fn busier_lane_never_gets_less_green() {
        let result = allocate(&[10, 14, 12, 11]);
        let greens: Vec<u32> = result.timings.iter().map(|t| t.green).collect();
        assert_eq!(greens, vec![48, 60, 60, 55]);
        assert!(greens[1] >= greens[2]);
        assert!(greens[2] >= greens[3]);
        assert!(greens[3] > greens[0]);

        let result = allocate(&[0, 5, 100, 3]);
        let greens: Vec<u32> = result.timings.iter().map(|t| t.green).collect();
        assert_eq!(greens, vec![20, 20, 60, 20]);
    }

    #[test]
    fn priority_is_the_intensity_weight() {
        let result = allocate(&[20, 0]);
        assert!((result.timings[0].priority - (1.0f64.exp() - 1.0)).abs() < 1e-12);
        assert_eq!(result.timings[1].priority, 0.0);
    }

    #[test]
    fn allocation_is_deterministic() {
        let lanes = lanes_with_counts(&[33, 2, 71, 18]);
        let config = SignalConfig::default();
        let first = allocate_signal_timings(&lanes, &config);
        let second = allocate_signal_timings(&lanes, &config);
        assert_eq!(first, second);
        assert_eq!(first.efficiency.to_bits(), second.efficiency.to_bits());
    }

    #[test]
    fn custom_config_bounds_are_respected() {
        let config = SignalConfig {
            base_green_time: 10,
            max_green_time: 45,
            yellow_time: 4,
        };
        let result = allocate_signal_timings(&lanes_with_counts(&[0, 90]), &config);
        assert_eq!(result.timings[0].green, 10);
        assert_eq!(result.timings[1].green, 45);
        assert!(result.timings.iter().all(|t| t.yellow == 4));
        assert_eq!(result.cycle_time, 10 + 4 + 45 + 4);
    }

    #[test]
    fn lane_efficiency_breakdown() {
        let lanes = lanes_with_counts(&[5, 45, 10, 60]);
        let result = allocate_signal_timings(&lanes, &SignalConfig::default());
        let per_lane = calculate_lane_efficiency(&lanes, &result.timings);
        let expected = [0.0, 1.0, 0.5, 0.75];
        for (got, want) in per_lane.iter().zip(expected) {
            assert!((got - want).abs() < 1e-9, "{} != {}", got, want);
        }
    }

    #[test]
    fn idle_lane_in_busy_intersection_scores_full_marks() {
        let lanes = lanes_with_counts(&[0, 30]);
        let result = allocate_signal_timings(&lanes, &SignalConfig::default());
        let per_lane = calculate_lane_efficiency(&lanes, &result.timings);
        assert_eq!(per_lane[0], 1.0);
    }

    #[test]
    fn zero_traffic_lane_efficiency_is_one() {
        let lanes = lanes_with_counts(&[0, 0]);
        let result = allocate_signal_timings(&lanes, &SignalConfig::default());
        assert_eq!(calculate_lane_efficiency(&lanes, &result.timings), vec![1.0, 1.0]);
    }
}
