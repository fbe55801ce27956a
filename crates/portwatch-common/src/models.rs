//! Wire types for the portwatch backend REST API.
//!
//! The backend is lenient about what it sends: empty collections come back
//! as JSON `null`, ports may be strings or numbers, and individual fields
//! can be missing. Everything here deserializes defensively so a sloppy
//! response degrades to `"N/A"` cells instead of a failed table.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::columns::Column;

/// Placeholder shown for missing service fields.
pub const NOT_AVAILABLE: &str = "N/A";

// ── Interfaces ──────────────────────────────────────────────────────

/// A network interface from `GET /api/interfaces`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interface {
    #[serde(default = "not_available", deserialize_with = "string_or_na")]
    pub name: String,
    /// Empty when the interface has no address.
    #[serde(default, deserialize_with = "string_or_empty")]
    pub ip: String,
}

impl Interface {
    pub fn new(name: impl Into<String>, ip: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ip: ip.into(),
        }
    }

    pub fn has_ip(&self) -> bool {
        !self.ip.is_empty()
    }
}

// ── Services ────────────────────────────────────────────────────────

/// A listening socket from `GET /api/services`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    #[serde(default = "not_available", deserialize_with = "string_or_na")]
    pub name: String,
    #[serde(default = "not_available", deserialize_with = "string_or_na")]
    pub protocol: String,
    #[serde(default = "not_available", deserialize_with = "string_or_na")]
    pub local_addr: String,
    #[serde(default = "not_available", deserialize_with = "string_or_na")]
    pub local_port: String,
    #[serde(default = "not_available", deserialize_with = "string_or_na")]
    pub state: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub pid: String,
}

impl Service {
    /// Stable preference key for this socket.
    pub fn id(&self) -> ServiceId {
        ServiceId::new(&self.local_addr, &self.local_port, &self.protocol)
    }

    /// `local_addr:local_port` as shown in the listen address column.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.local_addr, self.local_port)
    }

    /// Numeric port, or 0 when the port is not a number.
    pub fn port_number(&self) -> u32 {
        parse_port(&self.local_port)
    }
}

/// Parse a port string, treating anything non-numeric as 0.
pub fn parse_port(port: &str) -> u32 {
    port.trim().parse().unwrap_or(0)
}

/// Key for per-service preferences: `addr:port:protocol`.
///
/// Computed at render time; the backend never sends it as part of a
/// [`Service`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceId(String);

impl ServiceId {
    pub fn new(addr: &str, port: &str, protocol: &str) -> Self {
        Self(format!("{addr}:{port}:{protocol}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ServiceId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

// ── Saved preferences ───────────────────────────────────────────────

/// Response of `GET /api/saved-service-names`.
///
/// Entries that cannot be decoded (missing ids, wrong types) are skipped
/// one by one; they never fail the whole response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SavedPreferences {
    #[serde(default, deserialize_with = "lenient_entries")]
    pub service_names: Vec<ServiceNameMapping>,
    #[serde(default, deserialize_with = "lenient_entries")]
    pub interface_configs: Vec<InterfaceConfig>,
    #[serde(default, deserialize_with = "lenient_entries")]
    pub column_configs: Vec<ColumnConfigEntry>,
    #[serde(default, deserialize_with = "lenient_entries")]
    pub url_paths: Vec<UrlPathMapping>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceNameMapping {
    pub service_id: ServiceId,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceConfig {
    pub name: String,
    #[serde(default = "default_true", deserialize_with = "bool_or_true")]
    pub show_links: bool,
}

/// One `(table, column) -> visible` row. Tables and columns stay strings
/// on the wire; unknown identifiers are skipped during rehydration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnConfigEntry {
    pub table: String,
    pub column: String,
    #[serde(default = "default_true", deserialize_with = "bool_or_true")]
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlPathMapping {
    pub service_id: ServiceId,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub path: String,
}

// ── Write payloads ──────────────────────────────────────────────────

/// Discriminator the backend uses to tell interface updates apart from
/// service-name updates on the shared endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateKind {
    InterfaceConfig,
}

/// A single preference upsert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SavePreference {
    ServiceName {
        service_id: ServiceId,
        name: String,
    },
    InterfaceConfig {
        interface_name: String,
        show_links: bool,
        #[serde(rename = "type")]
        kind: UpdateKind,
    },
    UrlPath {
        service_id: ServiceId,
        path: String,
    },
}

impl SavePreference {
    pub fn interface(name: impl Into<String>, show_links: bool) -> Self {
        SavePreference::InterfaceConfig {
            interface_name: name.into(),
            show_links,
            kind: UpdateKind::InterfaceConfig,
        }
    }

    /// Endpoint path relative to the API base.
    pub fn endpoint(&self) -> &'static str {
        match self {
            SavePreference::ServiceName { .. } | SavePreference::InterfaceConfig { .. } => {
                "/save-service-name"
            }
            SavePreference::UrlPath { .. } => "/save-url-path",
        }
    }
}

/// Body of `POST /api/save-column-config`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnConfigRequest {
    pub table: String,
    pub column_configs: BTreeMap<Column, bool>,
}

// ── Lenient field decoding ──────────────────────────────────────────

fn not_available() -> String {
    NOT_AVAILABLE.to_string()
}

fn default_true() -> bool {
    true
}

fn scalar_to_string(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

/// Strings, numbers and booleans become strings; null and `""` become `"N/A"`.
fn string_or_na<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(scalar_to_string(value)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(not_available))
}

fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(scalar_to_string(value).unwrap_or_default())
}

/// Null means true, as a missing flag does.
fn bool_or_true<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(true))
}

/// A list of entries where null or a non-array means empty and each
/// undecodable entry is dropped.
fn lenient_entries<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let items = match Value::deserialize(deserializer)? {
        Value::Array(items) => items,
        Value::Null => Vec::new(),
        other => {
            log::debug!("expected a list of saved preferences, got {other}");
            Vec::new()
        }
    };
    Ok(items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<T>(item) {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::debug!("skipping saved preference entry: {e}");
                None
            }
        })
        .collect())
}
