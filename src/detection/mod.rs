pub mod providers;

pub use providers::{
    DetectorReportProvider, MockFrameSampler, ReportedCountProvider, VehicleCountProvider,
};
