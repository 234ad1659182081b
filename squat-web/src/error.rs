//! Error types for the squat trainer
//!
//! Nothing here is fatal to a session. Frame-level errors are turned into a
//! phase reset by the session; only configuration and bridge input errors
//! reach JavaScript.

use thiserror::Error;
use wasm_bindgen::JsValue;

use crate::trainer::Joint;

/// Errors raised while decoding landmarks, measuring angles or loading config
#[derive(Error, Debug)]
pub enum TrainerError {
    #[error("Invalid landmark buffer length: {actual} (expected {expected})")]
    InvalidLandmarkBuffer { expected: usize, actual: usize },

    #[error("Degenerate geometry: {vertex:?} coincides with a neighbouring joint")]
    DegenerateGeometry { vertex: Joint },

    #[error("Non-finite coordinate for {0:?}")]
    NonFiniteCoordinate(Joint),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Configuration encode error: {0}")]
    ConfigEncode(#[from] toml::ser::Error),
}

/// Result type for trainer operations
pub type Result<T> = std::result::Result<T, TrainerError>;

impl From<TrainerError> for JsValue {
    fn from(err: TrainerError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
