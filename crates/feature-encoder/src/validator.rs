//! Domain Validation for Numeric Inputs

use crate::error::EncodingError;
use crate::record::{FeatureRecord, RawFeatureRecord};
use serde::{Deserialize, Serialize};

/// Allowed ranges for the numeric fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainConfig {
    /// Area valid range (sq ft)
    pub area_range: (i64, i64),
    /// Area input step, counted from the range minimum
    pub area_step: i64,
    pub bedrooms_range: (i64, i64),
    pub bathrooms_range: (i64, i64),
    pub stories_range: (i64, i64),
    pub parking_range: (i64, i64),
}

impl Default for DomainConfig {
    fn default() -> Self {
        Self {
            area_range: (500, 10_000),
            area_step: 50,
            bedrooms_range: (1, 10),
            bathrooms_range: (1, 5),
            stories_range: (1, 4),
            parking_range: (0, 5),
        }
    }
}

/// Range checker for house records
pub struct Validator {
    config: DomainConfig,
}

impl Validator {
    /// Create a new validator with given config
    pub fn new(config: DomainConfig) -> Self {
        Self { config }
    }

    /// Get the configured domain
    pub fn config(&self) -> &DomainConfig {
        &self.config
    }

    /// Validate a single value against a range
    pub fn validate_range(
        &self,
        field: &'static str,
        value: i64,
        range: (i64, i64),
    ) -> Result<(), EncodingError> {
        if value < range.0 || value > range.1 {
            Err(EncodingError::OutOfRange {
                field,
                value,
                min: range.0,
                max: range.1,
            })
        } else {
            Ok(())
        }
    }

    /// Validate area, including the step grid
    pub fn validate_area(&self, area: i64) -> Result<(), EncodingError> {
        let range = self.config.area_range;
        self.validate_range("area", area, range)?;

        let step = self.config.area_step;
        if step > 0 && (area - range.0) % step != 0 {
            return Err(EncodingError::OffStep {
                field: "area",
                value: area,
                min: range.0,
                step,
            });
        }
        Ok(())
    }

    /// Validate the numeric fields of a raw submission
    pub fn validate_raw(&self, raw: &RawFeatureRecord) -> Result<(), EncodingError> {
        self.validate_area(raw.area)?;
        self.validate_range("bedrooms", raw.bedrooms, self.config.bedrooms_range)?;
        self.validate_range("bathrooms", raw.bathrooms, self.config.bathrooms_range)?;
        self.validate_range("stories", raw.stories, self.config.stories_range)?;
        self.validate_range("parking", raw.parking, self.config.parking_range)
    }

    /// Validate a typed record
    pub fn validate(&self, record: &FeatureRecord) -> Result<(), EncodingError> {
        self.validate_area(record.area.into())?;
        self.validate_range("bedrooms", record.bedrooms.into(), self.config.bedrooms_range)?;
        self.validate_range("bathrooms", record.bathrooms.into(), self.config.bathrooms_range)?;
        self.validate_range("stories", record.stories.into(), self.config.stories_range)?;
        self.validate_range("parking", record.parking.into(), self.config.parking_range)
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(DomainConfig::default())
    }
}
