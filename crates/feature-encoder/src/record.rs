//! House Feature Records

use crate::error::EncodingError;
use crate::validator::Validator;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Yes/No answer from a categorical form control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Answer {
    #[serde(rename = "Yes", alias = "yes")]
    Yes,
    #[serde(rename = "No", alias = "no")]
    No,
}

impl Answer {
    /// Labels in the order the form offers them
    pub const LABELS: [&'static str; 2] = ["Yes", "No"];

    /// Parse a user-facing label for the given field
    pub fn from_label(field: &'static str, label: &str) -> Result<Self, EncodingError> {
        let trimmed = label.trim();
        if trimmed.eq_ignore_ascii_case("yes") {
            Ok(Answer::Yes)
        } else if trimmed.eq_ignore_ascii_case("no") {
            Ok(Answer::No)
        } else {
            Err(EncodingError::UnknownAnswer {
                field,
                value: label.to_string(),
            })
        }
    }

    /// Get the user-facing label
    pub fn label(&self) -> &'static str {
        match self {
            Answer::Yes => "Yes",
            Answer::No => "No",
        }
    }

    /// 1.0 for Yes, 0.0 for No
    pub fn as_feature(&self) -> f64 {
        match self {
            Answer::Yes => 1.0,
            Answer::No => 0.0,
        }
    }
}

impl From<bool> for Answer {
    fn from(value: bool) -> Self {
        if value {
            Answer::Yes
        } else {
            Answer::No
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Furnishing status of the house
///
/// Discriminants index [`FURNISHING_ONE_HOT`], which fixes the column
/// sub-order `unfurnished, semi-furnished, furnished`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FurnishingStatus {
    #[serde(rename = "Unfurnished")]
    Unfurnished = 0,
    #[serde(rename = "Semi-Furnished")]
    SemiFurnished = 1,
    #[serde(rename = "Furnished")]
    Furnished = 2,
}

/// One-hot projection of each furnishing status, indexed by discriminant
const FURNISHING_ONE_HOT: [[f64; 3]; 3] = [
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
];

impl FurnishingStatus {
    /// All statuses in column order
    pub const ALL: [FurnishingStatus; 3] = [
        FurnishingStatus::Unfurnished,
        FurnishingStatus::SemiFurnished,
        FurnishingStatus::Furnished,
    ];

    /// Parse a user-facing label, e.g. `"Semi-Furnished"`
    pub fn from_label(label: &str) -> Result<Self, EncodingError> {
        let trimmed = label.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| EncodingError::UnknownFurnishing(label.to_string()))
    }

    /// Get the user-facing label
    pub fn label(&self) -> &'static str {
        match self {
            FurnishingStatus::Unfurnished => "Unfurnished",
            FurnishingStatus::SemiFurnished => "Semi-Furnished",
            FurnishingStatus::Furnished => "Furnished",
        }
    }

    /// Get the one-hot triple for this status
    pub fn one_hot(&self) -> [f64; 3] {
        FURNISHING_ONE_HOT[*self as usize]
    }
}

impl FromStr for FurnishingStatus {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s)
    }
}

impl fmt::Display for FurnishingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One house, as described by the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureRecord {
    /// Floor area (sq ft)
    pub area: u32,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub stories: u32,
    /// Parking spaces
    pub parking: u32,
    pub mainroad: Answer,
    pub guestroom: Answer,
    pub basement: Answer,
    pub hotwaterheating: Answer,
    pub airconditioning: Answer,
    pub furnishingstatus: FurnishingStatus,
}

impl Default for FeatureRecord {
    /// The values the form starts with
    fn default() -> Self {
        Self {
            area: 500,
            bedrooms: 3,
            bathrooms: 2,
            stories: 1,
            parking: 1,
            mainroad: Answer::Yes,
            guestroom: Answer::Yes,
            basement: Answer::Yes,
            hotwaterheating: Answer::Yes,
            airconditioning: Answer::Yes,
            furnishingstatus: FurnishingStatus::Unfurnished,
        }
    }
}

/// A record as submitted, categorical fields still as labels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawFeatureRecord {
    pub area: i64,
    pub bedrooms: i64,
    pub bathrooms: i64,
    pub stories: i64,
    pub parking: i64,
    pub mainroad: String,
    pub guestroom: String,
    pub basement: String,
    pub hotwaterheating: String,
    pub airconditioning: String,
    pub furnishingstatus: String,
}

impl Default for RawFeatureRecord {
    fn default() -> Self {
        Self::from(&FeatureRecord::default())
    }
}

impl From<&FeatureRecord> for RawFeatureRecord {
    fn from(record: &FeatureRecord) -> Self {
        Self {
            area: record.area.into(),
            bedrooms: record.bedrooms.into(),
            bathrooms: record.bathrooms.into(),
            stories: record.stories.into(),
            parking: record.parking.into(),
            mainroad: record.mainroad.label().to_string(),
            guestroom: record.guestroom.label().to_string(),
            basement: record.basement.label().to_string(),
            hotwaterheating: record.hotwaterheating.label().to_string(),
            airconditioning: record.airconditioning.label().to_string(),
            furnishingstatus: record.furnishingstatus.label().to_string(),
        }
    }
}

fn to_count(field: &'static str, value: i64) -> Result<u32, EncodingError> {
    u32::try_from(value).map_err(|_| EncodingError::OutOfRange {
        field,
        value,
        min: 0,
        max: i64::from(u32::MAX),
    })
}

impl FeatureRecord {
    /// Parse labels and narrow the numeric fields without domain checks
    pub(crate) fn from_raw_unchecked(raw: &RawFeatureRecord) -> Result<Self, EncodingError> {
        Ok(Self {
            area: to_count("area", raw.area)?,
            bedrooms: to_count("bedrooms", raw.bedrooms)?,
            bathrooms: to_count("bathrooms", raw.bathrooms)?,
            stories: to_count("stories", raw.stories)?,
            parking: to_count("parking", raw.parking)?,
            mainroad: Answer::from_label("mainroad", &raw.mainroad)?,
            guestroom: Answer::from_label("guestroom", &raw.guestroom)?,
            basement: Answer::from_label("basement", &raw.basement)?,
            hotwaterheating: Answer::from_label("hotwaterheating", &raw.hotwaterheating)?,
            airconditioning: Answer::from_label("airconditioning", &raw.airconditioning)?,
            furnishingstatus: FurnishingStatus::from_label(&raw.furnishingstatus)?,
        })
    }
}

impl TryFrom<&RawFeatureRecord> for FeatureRecord {
    type Error = EncodingError;

    /// Checks against the default domain, then parses
    fn try_from(raw: &RawFeatureRecord) -> Result<Self, Self::Error> {
        Validator::default().validate_raw(raw)?;
        Self::from_raw_unchecked(raw)
    }
}

impl TryFrom<RawFeatureRecord> for FeatureRecord {
    type Error = EncodingError;

    fn try_from(raw: RawFeatureRecord) -> Result<Self, Self::Error> {
        Self::try_from(&raw)
    }
}
