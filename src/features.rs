//! Feature vector assembly
//!
//! Turns a `/recommend` JSON payload into the 8 columns the scalers and
//! classifier were fitted on, in this order:
//! N, P, K, temperature, humidity, ph, rainfall, soil_type (encoded).

use serde_json::Value;

use crate::error::{RecommendError, Result};
use crate::soil::SoilType;

/// Number of columns the fitted artifacts expect
pub const N_FEATURES: usize = 8;

/// Continuous payload fields, in column order
pub const NUMERIC_FIELDS: [&str; 7] = ["N", "P", "K", "temperature", "humidity", "ph", "rainfall"];

pub const SOIL_FIELD: &str = "soil_type";

/// All columns, in the order the artifacts were fitted on
pub const FEATURE_NAMES: [&str; N_FEATURES] =
    ["N", "P", "K", "temperature", "humidity", "ph", "rainfall", SOIL_FIELD];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f64; N_FEATURES]);

impl FeatureVector {
    pub fn new(values: [f64; N_FEATURES]) -> Self {
        FeatureVector(values)
    }

    /// Build from a JSON payload.
    ///
    /// Fields are checked in column order and the first problem is reported,
    /// so a payload with a bad `N` and a bad `soil_type` fails on `N`.
    pub fn from_payload(payload: &Value) -> Result<Self> {
        let object = payload.as_object().ok_or_else(|| {
            RecommendError::MalformedBody(format!("expected a JSON object, got {}", kind_of(payload)))
        })?;

        let mut values = [0.0; N_FEATURES];
        for (slot, field) in values.iter_mut().zip(NUMERIC_FIELDS) {
            *slot = parse_number(field, object.get(field))?;
        }

        let soil = match object.get(SOIL_FIELD) {
            Some(Value::String(s)) => s.parse::<SoilType>()?,
            Some(other) => {
                return Err(RecommendError::invalid_field(
                    SOIL_FIELD,
                    format!("expected a string, got {}", kind_of(other)),
                ))
            }
            None => return Err(RecommendError::invalid_field(SOIL_FIELD, "missing required field")),
        };
        values[N_FEATURES - 1] = f64::from(soil.code());

        Ok(FeatureVector(values))
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

/// Accepts JSON numbers and numeric strings ("90", " 6.5 ").
fn parse_number(field: &str, value: Option<&Value>) -> Result<f64> {
    let parsed = match value {
        None | Some(Value::Null) => {
            return Err(RecommendError::invalid_field(field, "missing required field"))
        }
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(other) => {
            return Err(RecommendError::invalid_field(
                field,
                format!("expected a number, got {}", kind_of(other)),
            ))
        }
    };

    match parsed {
        Some(x) if x.is_finite() => Ok(x),
        Some(_) => Err(RecommendError::invalid_field(field, "value must be finite")),
        None => Err(RecommendError::invalid_field(
            field,
            format!("could not convert {} to a number", value.map(Value::to_string).unwrap_or_default()),
        )),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
