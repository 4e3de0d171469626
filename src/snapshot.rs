//! Sensor data model
//!
//! Realtime readings as reported by the backend, plus the write-side
//! payloads (commands and threshold updates).

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use thiserror::Error;

/// Well-known command actions.
pub mod actions {
    pub const LIGHT_ON: &str = "LIGHT_ON";
    pub const LIGHT_OFF: &str = "LIGHT_OFF";
}

/// Shown in place of an absent value.
pub const PLACEHOLDER: &str = "--";

/// Shown in place of an absent node name.
pub const UNKNOWN_DEVICE: &str = "Unknown Device";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("expected a JSON object, got {0}")]
    NotAnObject(&'static str),
    #[error("at least one threshold is required")]
    NoThreshold,
}

/// Latest reading of a single device node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeReading {
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub node: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub temp: Option<Number>,
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub gas: Option<Number>,
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub temp_th: Option<Number>,
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub gas_th: Option<Number>,
}

impl NodeReading {
    /// Display name of the node.
    pub fn display_name(&self) -> &str {
        self.node.as_deref().unwrap_or(UNKNOWN_DEVICE)
    }

    /// Temperature with its unit, e.g. `22.5°C`.
    pub fn format_temp(&self) -> String {
        with_unit(&self.temp, "°C")
    }

    /// Gas sensor voltage with its unit, e.g. `0.3V`.
    pub fn format_gas(&self) -> String {
        with_unit(&self.gas, "V")
    }

    /// Thresholds as `temp / gas`, e.g. `30 / 1.0`.
    pub fn format_limits(&self) -> String {
        format!("{} / {}", bare(&self.temp_th), bare(&self.gas_th))
    }

    /// Sample time reported by the backend.
    pub fn format_time(&self) -> &str {
        self.time.as_deref().unwrap_or(PLACEHOLDER)
    }
}

impl Display for NodeReading {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] temp {} | gas {} | limits {}",
            self.display_name(),
            self.format_time(),
            self.format_temp(),
            self.format_gas(),
            self.format_limits()
        )
    }
}

fn with_unit(value: &Option<Number>, unit: &str) -> String {
    match value {
        Some(n) => format!("{}{}", n, unit),
        None => PLACEHOLDER.to_string(),
    }
}

fn bare(value: &Option<Number>) -> String {
    match value {
        Some(n) => n.to_string(),
        None => PLACEHOLDER.to_string(),
    }
}

/// Accepts numbers and numeric strings; anything else is treated as absent.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<Number>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => Some(n),
        Some(Value::String(s)) => serde_json::from_str::<Number>(s.trim()).ok(),
        _ => None,
    })
}

/// Accepts strings and numbers (rendered as text); anything else is absent.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Latest readings of every node, keyed by node identifier.
///
/// Replaced wholesale on every successful poll. The `users` list is only
/// present when the backend answers with the alternate `{ "users": [...] }`
/// shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SensorSnapshot {
    pub nodes: BTreeMap<String, NodeReading>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub users: Option<Vec<Value>>,
}

impl SensorSnapshot {
    /// Builds a snapshot from a realtime response body.
    ///
    /// Object entries become node readings, a top-level `users` array is kept
    /// as the users list, everything else is ignored.
    pub fn from_json(body: Value) -> Result<Self, SnapshotError> {
        match body {
            Value::Object(map) => Ok(Self::from_map(map)),
            other => Err(SnapshotError::NotAnObject(json_kind(&other))),
        }
    }

    fn from_map(map: Map<String, Value>) -> Self {
        let mut snapshot = SensorSnapshot::default();
        for (key, value) in map {
            match value {
                Value::Array(users) if key == "users" => snapshot.users = Some(users),
                value @ Value::Object(_) => {
                    // Object values cannot fail the lenient field deserializers.
                    if let Ok(reading) = serde_json::from_value::<NodeReading>(value) {
                        snapshot.nodes.insert(key, reading);
                    }
                }
                _ => {}
            }
        }
        snapshot
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Identifier a command for the node stored under `key` is addressed to.
    pub fn command_target<'a>(&'a self, key: &'a str) -> &'a str {
        self.nodes
            .get(key)
            .and_then(|reading| reading.node.as_deref())
            .unwrap_or(key)
    }

    /// Users list rendered as comma separated names.
    pub fn format_users(&self) -> Option<String> {
        let users = self.users.as_ref()?;
        let names: Vec<String> = users
            .iter()
            .map(|user| match user {
                Value::String(s) => s.clone(),
                Value::Object(obj) => obj
                    .get("username")
                    .or_else(|| obj.get("name"))
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| user.to_string()),
                other => other.to_string(),
            })
            .collect();
        Some(names.join(", "))
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// A one-shot instruction for a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    pub device: String,
    pub action: String,
}

impl Command {
    pub fn new(device: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            device: device.into(),
            action: action.into(),
        }
    }
}

impl Display for Command {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {}", self.action, self.device)
    }
}

/// New alert thresholds for a node; absent fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LimitUpdate {
    pub device: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temp_th: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas_th: Option<f64>,
}

impl LimitUpdate {
    /// Fails when neither threshold is set, since such an update changes nothing.
    pub fn new(
        device: impl Into<String>,
        temp_th: Option<f64>,
        gas_th: Option<f64>,
    ) -> Result<Self, SnapshotError> {
        if temp_th.is_none() && gas_th.is_none() {
            return Err(SnapshotError::NoThreshold);
        }
        Ok(Self {
            device: device.into(),
            temp_th,
            gas_th,
        })
    }
}

/// Thresholds currently applied by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Limits {
    #[serde(default, deserialize_with = "lenient_number")]
    pub temp_th: Option<Number>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub gas_th: Option<Number>,
}

impl Display for Limits {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Max Temp {}°C | Max Gas {}V",
            bare(&self.temp_th),
            bare(&self.gas_th)
        )
    }
}
