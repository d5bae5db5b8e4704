pub mod signal_allocator;
pub mod traffic_light_controller;

pub use signal_allocator::{
    allocate_signal_timings, calculate_efficiency, calculate_lane_efficiency, intensity_weight,
};
pub use traffic_light_controller::{tick_period, SignalCycle};
