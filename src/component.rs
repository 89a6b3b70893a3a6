//! Pipeline component contract.
//!
//! Host pipelines persist components as `{"type": ..., "init_parameters": ...}`
//! envelopes and rebuild them from the same shape. [`Component`] is the
//! trait a component implements to take part in that round trip.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Result, WebSearchError};

/// A serializable pipeline component.
pub trait Component: Sized {
    /// Fully qualified type name written to the `type` field.
    const TYPE_NAME: &'static str;

    /// Names of the values produced by one run.
    const OUTPUT_NAMES: &'static [&'static str];

    /// Serialize this component to a config envelope.
    ///
    /// # Errors
    ///
    /// Returns [`WebSearchError::Serialization`] if the parameters cannot be
    /// represented as JSON.
    fn to_config(&self) -> Result<serde_json::Value>;

    /// Rebuild a component from a config envelope.
    ///
    /// # Errors
    ///
    /// Returns [`WebSearchError::Config`] if the envelope is for another type
    /// or its parameters are invalid.
    fn from_config(config: &serde_json::Value) -> Result<Self>;
}

/// Wrap `init_parameters` in the envelope for component `C`.
///
/// # Errors
///
/// Returns [`WebSearchError::Serialization`] if the parameters cannot be
/// represented as JSON.
pub fn default_to_config<C: Component, P: Serialize>(
    init_parameters: &P,
) -> Result<serde_json::Value> {
    let params = serde_json::to_value(init_parameters)
        .map_err(|e| WebSearchError::Serialization(e.to_string()))?;
    Ok(serde_json::json!({
        "type": C::TYPE_NAME,
        "init_parameters": params,
    }))
}

/// Unwrap the `init_parameters` of an envelope for component `C`.
///
/// A missing `init_parameters` object is treated as empty, so every
/// parameter takes its default.
///
/// # Errors
///
/// Returns [`WebSearchError::Config`] if `type` is missing or names another
/// component, or if the parameters do not deserialize.
pub fn default_from_config<C: Component, P: DeserializeOwned>(
    config: &serde_json::Value,
) -> Result<P> {
    let type_name = config
        .get("type")
        .and_then(serde_json::Value::as_str)
        .ok_or_else(|| WebSearchError::Config("missing 'type' in component config".into()))?;
    if type_name != C::TYPE_NAME {
        return Err(WebSearchError::Config(format!(
            "class '{type_name}' can't be deserialized as '{}'",
            C::TYPE_NAME
        )));
    }

    let params = config
        .get("init_parameters")
        .cloned()
        .unwrap_or_else(|| serde_json::json!({}));
    serde_json::from_value(params)
        .map_err(|e| WebSearchError::Config(format!("invalid init_parameters: {e}")))
}
