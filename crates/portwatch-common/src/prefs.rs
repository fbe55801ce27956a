//! Client-side preference cache.
//!
//! Holds the four user customizations the tables depend on. The cache is
//! owned by the dashboard state and passed by reference to the view
//! builders; it is rebuilt from scratch from the backend on every refresh
//! and mutated optimistically by user edits in between.

use std::collections::{BTreeMap, HashMap};

use crate::bucket::TableBucket;
use crate::columns::{Column, ColumnVisibility};
use crate::models::{NOT_AVAILABLE, SavePreference, SavedPreferences, ServiceId};

/// Path used when a service has no saved URL path.
pub const DEFAULT_URL_PATH: &str = "/";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreferenceCache {
    service_names: HashMap<ServiceId, String>,
    interface_links: HashMap<String, bool>,
    columns: BTreeMap<TableBucket, ColumnVisibility>,
    url_paths: HashMap<ServiceId, String>,
}

impl PreferenceCache {
    /// Rebuild the cache from a saved-preferences response. Nothing from a
    /// previous cache survives.
    pub fn rehydrate(saved: &SavedPreferences) -> Self {
        let service_names = saved
            .service_names
            .iter()
            .map(|m| (m.service_id.clone(), m.name.clone()))
            .collect();

        let interface_links = saved
            .interface_configs
            .iter()
            .map(|c| (c.name.clone(), c.show_links))
            .collect();

        let mut partial: BTreeMap<TableBucket, BTreeMap<Column, bool>> = BTreeMap::new();
        for entry in &saved.column_configs {
            match (
                entry.table.parse::<TableBucket>(),
                entry.column.parse::<Column>(),
            ) {
                (Ok(table), Ok(column)) => {
                    partial
                        .entry(table)
                        .or_default()
                        .insert(column, entry.visible);
                }
                _ => log::debug!(
                    "ignoring column config {}.{}",
                    entry.table,
                    entry.column
                ),
            }
        }
        let columns = TableBucket::ALL
            .into_iter()
            .map(|bucket| {
                let vis = partial
                    .get(&bucket)
                    .map(ColumnVisibility::from_partial)
                    .unwrap_or_default();
                (bucket, vis)
            })
            .collect();

        let url_paths = saved
            .url_paths
            .iter()
            .map(|m| (m.service_id.clone(), normalize_url_path(&m.path)))
            .collect();

        let cache = Self {
            service_names,
            interface_links,
            columns,
            url_paths,
        };
        log::debug!(
            "preference cache rehydrated: {} names, {} interfaces, {} paths",
            cache.service_names.len(),
            cache.interface_links.len(),
            cache.url_paths.len()
        );
        cache
    }

    // ── Service names ───────────────────────────────────────────────

    /// Display name for a service: the saved name when non-empty, otherwise
    /// the well-known-port fallback, otherwise `"N/A"`.
    pub fn service_name(&self, id: &ServiceId, port: &str) -> String {
        match self.service_names.get(id) {
            Some(name) if !name.is_empty() => name.clone(),
            _ => well_known_service(port).unwrap_or(NOT_AVAILABLE).to_string(),
        }
    }

    pub fn saved_service_name(&self, id: &ServiceId) -> Option<&str> {
        self.service_names.get(id).map(String::as_str)
    }

    pub fn set_service_name(&mut self, id: ServiceId, name: String) {
        self.service_names.insert(id, name);
    }

    // ── Interface link visibility ───────────────────────────────────

    /// Whether links through this interface are shown. Defaults to true.
    pub fn shows_links(&self, interface: &str) -> bool {
        self.interface_links.get(interface).copied().unwrap_or(true)
    }

    pub fn set_shows_links(&mut self, interface: &str, show: bool) {
        self.interface_links.insert(interface.to_string(), show);
    }

    // ── Columns ─────────────────────────────────────────────────────

    pub fn columns(&self, bucket: TableBucket) -> ColumnVisibility {
        self.columns.get(&bucket).copied().unwrap_or_default()
    }

    /// The single configuration the settings modal edits. Tables are kept
    /// in sync, so the first one stands for all of them.
    pub fn unified_columns(&self) -> ColumnVisibility {
        TableBucket::ALL
            .into_iter()
            .find_map(|b| self.columns.get(&b).copied())
            .unwrap_or_default()
    }

    /// Apply one configuration to every table.
    pub fn set_columns(&mut self, vis: ColumnVisibility) {
        for bucket in TableBucket::ALL {
            self.columns.insert(bucket, vis);
        }
    }

    // ── URL paths ───────────────────────────────────────────────────

    pub fn url_path(&self, id: &ServiceId) -> &str {
        self.url_paths
            .get(id)
            .map(String::as_str)
            .unwrap_or(DEFAULT_URL_PATH)
    }

    pub fn set_url_path(&mut self, id: ServiceId, path: &str) {
        self.url_paths.insert(id, normalize_url_path(path));
    }

    /// Apply a preference upsert locally, mirroring what the backend will
    /// store once the write lands.
    pub fn apply(&mut self, update: &SavePreference) {
        match update {
            SavePreference::ServiceName { service_id, name } => {
                self.set_service_name(service_id.clone(), name.clone())
            }
            SavePreference::InterfaceConfig {
                interface_name,
                show_links,
                ..
            } => self.set_shows_links(interface_name, *show_links),
            SavePreference::UrlPath { service_id, path } => {
                self.set_url_path(service_id.clone(), path)
            }
        }
    }
}

/// Conventional service names for a handful of well-known ports.
pub fn well_known_service(port: &str) -> Option<&'static str> {
    match port {
        "22" => Some("sshd"),
        "80" | "443" | "8080" => Some("http"),
        "3306" => Some("mysql"),
        "5432" => Some("postgresql"),
        "6379" => Some("redis"),
        _ => None,
    }
}

/// Trim and force a leading slash. Empty input becomes `/`.
pub fn normalize_url_path(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        DEFAULT_URL_PATH.to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn saved(value: serde_json::Value) -> SavedPreferences {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn url_path_normalization() {
        assert_eq!(normalize_url_path(""), "/");
        assert_eq!(normalize_url_path("   "), "/");
        assert_eq!(normalize_url_path("api"), "/api");
        assert_eq!(normalize_url_path("/api"), "/api");
        assert_eq!(normalize_url_path("  admin/ "), "/admin/");
    }

    #[test]
    fn service_name_falls_back_to_port_table() {
        let cache = PreferenceCache::default();
        let id = ServiceId::from("0.0.0.0:22:tcp");
        assert_eq!(cache.service_name(&id, "22"), "sshd");
        assert_eq!(cache.service_name(&id, "9999"), "N/A");
        assert_eq!(cache.service_name(&id, "5432"), "postgresql");
    }

    #[test]
    fn saved_service_name_overrides_port_table() {
        let mut cache = PreferenceCache::default();
        let id = ServiceId::from("0.0.0.0:22:tcp");
        cache.set_service_name(id.clone(), "bastion".into());
        assert_eq!(cache.service_name(&id, "22"), "bastion");
    }

    #[test]
    fn empty_saved_name_uses_fallback() {
        let mut cache = PreferenceCache::default();
        let id = ServiceId::from("0.0.0.0:80:tcp");
        cache.set_service_name(id.clone(), String::new());
        assert_eq!(cache.service_name(&id, "80"), "http");
    }

    #[test]
    fn interfaces_show_links_by_default() {
        let mut cache = PreferenceCache::default();
        assert!(cache.shows_links("eth0"));
        cache.set_shows_links("eth0", false);
        assert!(!cache.shows_links("eth0"));
        assert!(cache.shows_links("wlan0"));
    }

    #[test]
    fn columns_default_to_visible_without_saved_config() {
        let cache = PreferenceCache::rehydrate(&SavedPreferences::default());
        for bucket in TableBucket::ALL {
            assert_eq!(cache.columns(bucket), ColumnVisibility::default());
        }
    }

    #[test]
    fn rehydrate_back_fills_partial_columns() {
        let cache = PreferenceCache::rehydrate(&saved(json!({
            "column_configs": [
                { "table": "udpv6", "column": "state", "visible": false },
                { "table": "udpv6", "column": "bogus", "visible": false },
                { "table": "sctp", "column": "state", "visible": false }
            ]
        })));
        let udp6 = cache.columns(TableBucket::Udpv6);
        assert!(!udp6.is_visible(Column::State));
        assert_eq!(udp6.visible_count(), 6);
        assert_eq!(cache.columns(TableBucket::Tcpv4).visible_count(), 7);
    }

    #[test]
    fn rehydrate_discards_previous_state() {
        let mut cache = PreferenceCache::rehydrate(&saved(json!({
            "service_names": [{ "service_id": "0.0.0.0:80:tcp", "name": "web" }]
        })));
        cache.set_shows_links("eth0", false);
        cache.set_url_path(ServiceId::from("0.0.0.0:80:tcp"), "status");

        cache = PreferenceCache::rehydrate(&SavedPreferences::default());
        assert_eq!(cache.saved_service_name(&ServiceId::from("0.0.0.0:80:tcp")), None);
        assert!(cache.shows_links("eth0"));
        assert_eq!(cache.url_path(&ServiceId::from("0.0.0.0:80:tcp")), "/");
    }

    #[test]
    fn rehydrate_normalizes_saved_paths() {
        let cache = PreferenceCache::rehydrate(&saved(json!({
            "url_paths": [
                { "service_id": "0.0.0.0:80:tcp", "path": "" },
                { "service_id": "0.0.0.0:81:tcp", "path": "admin" }
            ]
        })));
        assert_eq!(cache.url_path(&ServiceId::from("0.0.0.0:80:tcp")), "/");
        assert_eq!(cache.url_path(&ServiceId::from("0.0.0.0:81:tcp")), "/admin");
    }

    #[test]
    fn set_columns_writes_every_table() {
        let mut cache = PreferenceCache::default();
        let mut vis = ColumnVisibility::default();
        vis.set(Column::AccessLinks, false);
        cache.set_columns(vis);
        for bucket in TableBucket::ALL {
            assert_eq!(cache.columns(bucket), vis);
        }
        assert_eq!(cache.unified_columns(), vis);
    }

    #[test]
    fn apply_updates_matching_mapping() {
        let mut cache = PreferenceCache::default();
        let id = ServiceId::from("0.0.0.0:8080:tcp");
        cache.apply(&SavePreference::UrlPath {
            service_id: id.clone(),
            path: "dashboard".into(),
        });
        cache.apply(&SavePreference::interface("docker0", false));
        cache.apply(&SavePreference::ServiceName {
            service_id: id.clone(),
            name: "grafana".into(),
        });
        assert_eq!(cache.url_path(&id), "/dashboard");
        assert!(!cache.shows_links("docker0"));
        assert_eq!(cache.service_name(&id, "8080"), "grafana");
    }
}
