//! Feature Encoding
//!
//! Turns a house description into the fixed-order numeric row the scaler and
//! regression model were fit on.

mod encoder;
mod error;
mod record;
mod validator;

pub use encoder::{FeatureEncoder, FeatureVector, FEATURE_DIMENSION, FEATURE_NAMES};
pub use error::EncodingError;
pub use record::{Answer, FeatureRecord, FurnishingStatus, RawFeatureRecord};
pub use validator::{DomainConfig, Validator};
