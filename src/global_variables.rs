// Signal timing defaults (seconds)
pub const BASE_GREEN_TIME: u32 = 20;
pub const MAX_GREEN_TIME: u32 = 60;
pub const YELLOW_TIME: u32 = 3;

// Divisor applied to a vehicle count before exponentiation: w = exp(count / scale) - 1
pub const INTENSITY_WEIGHT_SCALE: f64 = 20.0;

// Per-lane traffic intensity thresholds (vehicles)
pub const MEDIUM_INTENSITY_THRESHOLD: u32 = 20;
pub const HIGH_INTENSITY_THRESHOLD: u32 = 50;

// Intersection congestion thresholds (total vehicles)
pub const MEDIUM_CONGESTION_THRESHOLD: u32 = 50;
pub const HIGH_CONGESTION_THRESHOLD: u32 = 150;

// Request limits
pub const MAX_LANES: usize = 8;

// Wall-clock bounds on the period between two simulated seconds of signal playback
pub const MIN_TICK_PERIOD_MICROS: u64 = 1_000;
pub const MAX_TICK_PERIOD_SECS: u64 = 3_600;

// Mock detection: a 30 s clip at 30 fps, sampled once per second
pub const MOCK_TOTAL_FRAMES: u32 = 900;
pub const MOCK_SAMPLE_INTERVAL: u32 = 30;
pub const MOCK_MAX_VEHICLES_PER_FRAME: u32 = 8;
pub const MOCK_MIN_SPEED_KMH: f64 = 25.0;
pub const MOCK_MAX_SPEED_KMH: f64 = 40.0;

// Marker line printed by the external detector
pub const DETECTOR_TOTAL_MARKER: &str = "Total vehicles detected:";

// Files
pub const TIMING_LOG_FILE: &str = "signal_timings.csv";
pub const CONFIG_PATH_ENV: &str = "SIGNAL_CONFIG";
