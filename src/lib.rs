pub mod config;
pub mod control_system;
pub mod detection;
pub mod engine;
pub mod error;
pub mod flow_analyzer;
pub mod global_variables;
pub mod monitoring;
pub mod shared_data;

pub use config::SignalConfig;
pub use engine::process_intersection;
pub use error::ProcessError;
