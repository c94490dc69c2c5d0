//! Soil type encoding
//!
//! The classifier was trained with soil type as an integer column, so the
//! mapping below is frozen: sandy=0, clay=1, loamy=2.

use std::fmt;
use std::str::FromStr;

use crate::error::RecommendError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoilType {
    Sandy,
    Clay,
    Loamy,
}

impl SoilType {
    pub const ALL: [SoilType; 3] = [SoilType::Sandy, SoilType::Clay, SoilType::Loamy];

    /// Integer code fed to the scalers and classifier
    pub fn code(self) -> u8 {
        match self {
            SoilType::Sandy => 0,
            SoilType::Clay => 1,
            SoilType::Loamy => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SoilType::Sandy => "sandy",
            SoilType::Clay => "clay",
            SoilType::Loamy => "loamy",
        }
    }
}

impl FromStr for SoilType {
    type Err = RecommendError;

    /// Case-insensitive; surrounding whitespace is not stripped.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sandy" => Ok(SoilType::Sandy),
            "clay" => Ok(SoilType::Clay),
            "loamy" => Ok(SoilType::Loamy),
            _ => Err(RecommendError::InvalidSoilType),
        }
    }
}

impl fmt::Display for SoilType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Encode a soil type string straight to its integer code.
pub fn encode_soil_type(s: &str) -> Result<u8, RecommendError> {
    s.parse::<SoilType>().map(SoilType::code)
}
