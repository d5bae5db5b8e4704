pub mod timing_log;

pub use timing_log::{
    log_intersection_report, read_timing_log, summarize_timing_log, TimingLogSummary, TimingRecord,
};
