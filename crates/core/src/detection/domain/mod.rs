pub mod detection;
pub mod detection_engine;
pub mod suppression;
