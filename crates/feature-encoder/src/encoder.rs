//! Feature Vector Assembly

use crate::error::EncodingError;
use crate::record::{FeatureRecord, RawFeatureRecord};
use crate::validator::Validator;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Number of columns the scaler and model were fit on
pub const FEATURE_DIMENSION: usize = 13;

/// Column names, in the order the artifacts expect them
pub const FEATURE_NAMES: [&str; FEATURE_DIMENSION] = [
    "area",
    "bedrooms",
    "bathrooms",
    "stories",
    "parking",
    "mainroad",
    "guestroom",
    "basement",
    "hotwaterheating",
    "airconditioning",
    "furnishingstatus_unfurnished",
    "furnishingstatus_semi-furnished",
    "furnishingstatus_furnished",
];

/// Index of the first furnishing one-hot column
const FURNISHING_OFFSET: usize = 10;

/// One encoded row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Raw feature values, FEATURE_NAMES order
    pub values: Vec<f64>,
}

impl FeatureVector {
    /// Wrap an already ordered row
    pub fn from_values(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// Values as a slice
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The three furnishing columns
    pub fn furnishing(&self) -> &[f64] {
        let end = (FURNISHING_OFFSET + 3).min(self.values.len());
        let start = FURNISHING_OFFSET.min(end);
        &self.values[start..end]
    }

    /// `(column name, value)` pairs, for display
    pub fn named(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_NAMES.iter().copied().zip(self.values.iter().copied())
    }
}

/// Maps house records onto the model's column layout
pub struct FeatureEncoder {
    validator: Validator,
}

impl FeatureEncoder {
    /// Create an encoder with the default input domain
    pub fn new() -> Self {
        Self::with_validator(Validator::default())
    }

    /// Create an encoder with a custom validator
    pub fn with_validator(validator: Validator) -> Self {
        Self { validator }
    }

    /// Encode a typed record
    pub fn encode(&self, record: &FeatureRecord) -> FeatureVector {
        let [unfurnished, semi_furnished, furnished] = record.furnishingstatus.one_hot();

        let values = vec![
            f64::from(record.area),
            f64::from(record.bedrooms),
            f64::from(record.bathrooms),
            f64::from(record.stories),
            f64::from(record.parking),
            record.mainroad.as_feature(),
            record.guestroom.as_feature(),
            record.basement.as_feature(),
            record.hotwaterheating.as_feature(),
            record.airconditioning.as_feature(),
            unfurnished,
            semi_furnished,
            furnished,
        ];

        debug!(
            "Encoded record: area={}, furnishing={}",
            record.area, record.furnishingstatus
        );

        FeatureVector { values }
    }

    /// Validate a typed record against the domain, then encode it
    pub fn encode_checked(&self, record: &FeatureRecord) -> Result<FeatureVector, EncodingError> {
        self.validator.validate(record)?;
        Ok(self.encode(record))
    }

    /// Parse labels, validate, then encode
    pub fn encode_raw(&self, raw: &RawFeatureRecord) -> Result<FeatureVector, EncodingError> {
        self.validator.validate_raw(raw)?;
        let record = FeatureRecord::from_raw_unchecked(raw)?;
        Ok(self.encode(&record))
    }
}

impl Default for FeatureEncoder {
    fn default() -> Self {
        Self::new()
    }
}
