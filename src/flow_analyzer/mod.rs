pub mod traffic_analyzer;

// Re-export the items from traffic_analyzer
pub use traffic_analyzer::{
    analyze_intersection, average_speed, congestion_level, generate_recommendations,
};
