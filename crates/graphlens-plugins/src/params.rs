//! Data source parameters and coercion of raw form values.

use std::collections::HashMap;

use graphlens_core::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Typed parameter values handed to [`crate::DataSource::load`].
pub type LoadParams = serde_json::Map<String, Value>;

/// Declared type of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    Str,
    Int,
    Float,
    Bool,
}

impl ParamType {
    /// Read a raw textual value as this type.
    pub fn coerce(self, raw: &str) -> Option<Value> {
        let raw = raw.trim();
        match self {
            Self::Str => Some(Value::String(raw.to_string())),
            Self::Int => raw.parse::<i64>().ok().map(Value::from),
            Self::Float => raw
                .parse::<f64>()
                .ok()
                .and_then(serde_json::Number::from_f64)
                .map(Value::Number),
            Self::Bool => Some(Value::Bool(matches!(
                raw.to_lowercase().as_str(),
                "true" | "1" | "on"
            ))),
        }
    }
}

/// A single load-time parameter declared by a data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSourceParameter {
    pub name: String,
    #[serde(rename = "type")]
    pub param_type: ParamType,
    pub display_name: String,
}

impl DataSourceParameter {
    pub fn new(name: &str, param_type: ParamType, display_name: &str) -> Self {
        Self {
            name: name.to_string(),
            param_type,
            display_name: display_name.to_string(),
        }
    }
}

/// Coerce raw values for the declared parameters.
///
/// Parameters without a raw value are left out; the data source decides
/// whether they are required.
pub fn coerce_params(
    declared: &[DataSourceParameter],
    raw: &HashMap<String, String>,
) -> Result<LoadParams> {
    let mut params = LoadParams::new();
    for param in declared {
        let Some(value) = raw.get(&param.name) else {
            continue;
        };
        let typed = param
            .param_type
            .coerce(value)
            .ok_or_else(|| Error::InvalidParameter(param.display_name.clone()))?;
        params.insert(param.name.clone(), typed);
    }
    Ok(params)
}
