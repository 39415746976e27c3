//! Parameter Store Interface

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Parameters the load cell node exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamId {
    /// Id reported in every `LoadcellInfo` broadcast
    SensorId,
}

impl ParamId {
    /// Parameter name as shown to configuration tools
    pub fn name(&self) -> &'static str {
        match self {
            ParamId::SensorId => "SENSOR_ID",
        }
    }
}

/// Value held by a parameter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Integer(i64),
    Real(f32),
    Boolean(bool),
}

impl ParamValue {
    /// Integer payload, if this is an integer parameter
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            ParamValue::Integer(value) => Some(*value),
            _ => None,
        }
    }
}

/// Read access to node parameters.
///
/// Every id a driver asks for is registered at startup, so lookups cannot
/// fail.
pub trait ParamStore {
    /// Current value of `id`
    fn get_param_by_id(&self, id: ParamId) -> ParamValue;
}

/// In-memory parameter table with compiled-in defaults
#[derive(Debug, Clone)]
pub struct StaticParamStore {
    values: HashMap<ParamId, ParamValue>,
}

impl StaticParamStore {
    /// Create a store holding the default value of every parameter
    pub fn new() -> Self {
        let mut values = HashMap::new();
        values.insert(ParamId::SensorId, ParamValue::Integer(0));
        Self { values }
    }

    /// Override a parameter
    pub fn set(&mut self, id: ParamId, value: ParamValue) {
        self.values.insert(id, value);
    }
}

impl Default for StaticParamStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ParamStore for StaticParamStore {
    fn get_param_by_id(&self, id: ParamId) -> ParamValue {
        // Every ParamId is inserted by new() and never removed
        self.values
            .get(&id)
            .copied()
            .unwrap_or(ParamValue::Integer(0))
    }
}
