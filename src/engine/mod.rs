pub mod intersection;

pub use intersection::{process_intersection, validate_request};
