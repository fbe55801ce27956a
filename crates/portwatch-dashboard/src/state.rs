//! Shared dashboard state, provided via Leptos context.
//!
//! Owns the preference cache and the last fetched snapshots. Components
//! read from the signals here and call the methods below for anything that
//! talks to the backend.

use gloo_storage::{LocalStorage, Storage};
use leptos::prelude::*;
use portwatch_common::bucket::{BucketedServices, TableBucket, partition};
use portwatch_common::columns::ColumnVisibility;
use portwatch_common::config::{CONFIG_STORAGE_KEY, DashboardConfig};
use portwatch_common::editor::EditCommit;
use portwatch_common::error::refetch_after_write;
use portwatch_common::models::{Interface, SavePreference};
use portwatch_common::prefs::PreferenceCache;
use portwatch_common::view::{TableView, build_table};

use crate::api;
use crate::clipboard;

const TAB_KEY: &str = "portwatch_tab";

/// Fetch status of a snapshot.
#[derive(Debug, Clone, PartialEq)]
pub enum Load<T> {
    Loading,
    Ready(T),
    Failed,
}

/// Everything one services refresh produces.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceSnapshot {
    pub buckets: BucketedServices,
    pub interfaces: Vec<Interface>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub ok: bool,
}

#[derive(Clone, Copy)]
pub struct DashboardState {
    pub config: StoredValue<DashboardConfig>,
    pub cache: RwSignal<PreferenceCache>,
    pub services: RwSignal<Load<ServiceSnapshot>>,
    pub interfaces: RwSignal<Load<Vec<Interface>>>,
    /// Local time of the last successful services refresh.
    pub last_refresh: RwSignal<Option<String>>,
    pub active_tab: RwSignal<TableBucket>,
    pub column_modal: RwSignal<bool>,
    pub toast: RwSignal<Option<Toast>>,
    services_generation: StoredValue<u64>,
    interfaces_generation: StoredValue<u64>,
    toast_seq: StoredValue<u64>,
}

impl DashboardState {
    pub fn new(config: DashboardConfig) -> Self {
        let tab = LocalStorage::get::<TableBucket>(TAB_KEY).unwrap_or(TableBucket::Tcpv4);
        Self {
            config: StoredValue::new(config),
            cache: RwSignal::new(PreferenceCache::default()),
            services: RwSignal::new(Load::Loading),
            interfaces: RwSignal::new(Load::Loading),
            last_refresh: RwSignal::new(None),
            active_tab: RwSignal::new(tab),
            column_modal: RwSignal::new(false),
            toast: RwSignal::new(None),
            services_generation: StoredValue::new(0),
            interfaces_generation: StoredValue::new(0),
            toast_seq: StoredValue::new(0),
        }
    }

    fn bump(counter: StoredValue<u64>) -> u64 {
        counter.update_value(|g| *g += 1);
        counter.get_value()
    }

    // ── Refresh ─────────────────────────────────────────────────────

    /// Rehydrate the cache, then fetch services and interfaces. Responses
    /// from a refresh that has since been superseded are dropped.
    pub fn refresh_services(self) {
        let generation = Self::bump(self.services_generation);
        let config = self.config.get_value();
        leptos::task::spawn_local(async move {
            let result = async {
                let saved = api::get_saved_preferences(&config).await?;
                let services = api::get_services(&config).await?;
                let interfaces = api::get_interfaces(&config).await?;
                Ok::<_, portwatch_common::error::GatewayError>((saved, services, interfaces))
            }
            .await;

            if self.services_generation.get_value() != generation {
                log::debug!("dropping stale services refresh #{generation}");
                return;
            }
            match result {
                Ok((saved, services, interfaces)) => {
                    let buckets = partition(&services);
                    log::debug!(
                        "services refresh #{generation}: {} services, {} interfaces",
                        buckets.total(),
                        interfaces.len()
                    );
                    self.cache.set(PreferenceCache::rehydrate(&saved));
                    self.services.set(Load::Ready(ServiceSnapshot {
                        buckets,
                        interfaces,
                    }));
                    self.last_refresh
                        .set(Some(chrono::Local::now().format("%H:%M:%S").to_string()));
                }
                Err(e) => {
                    log::error!("loading services failed: {e}");
                    self.services.set(Load::Failed);
                }
            }
        });
    }

    pub fn refresh_interfaces(self) {
        let generation = Self::bump(self.interfaces_generation);
        let config = self.config.get_value();
        leptos::task::spawn_local(async move {
            let result = async {
                let saved = api::get_saved_preferences(&config).await?;
                let interfaces = api::get_interfaces(&config).await?;
                Ok::<_, portwatch_common::error::GatewayError>((saved, interfaces))
            }
            .await;

            if self.interfaces_generation.get_value() != generation {
                log::debug!("dropping stale interfaces refresh #{generation}");
                return;
            }
            match result {
                Ok((saved, interfaces)) => {
                    self.cache.set(PreferenceCache::rehydrate(&saved));
                    self.interfaces.set(Load::Ready(interfaces));
                }
                Err(e) => {
                    log::error!("loading interfaces failed: {e}");
                    self.interfaces.set(Load::Failed);
                }
            }
        });
    }

    /// View-model for one bucket from the current snapshot and cache.
    pub fn table_view(self, bucket: TableBucket) -> Load<TableView> {
        self.services.with(|load| match load {
            Load::Loading => Load::Loading,
            Load::Failed => Load::Failed,
            Load::Ready(snap) => Load::Ready(self.cache.with(|cache| {
                self.config.with_value(|config| {
                    build_table(
                        bucket,
                        snap.buckets.get(bucket),
                        &snap.interfaces,
                        cache,
                        config,
                    )
                })
            })),
        })
    }

    pub fn select_tab(self, bucket: TableBucket) {
        self.active_tab.set(bucket);
        if let Err(e) = LocalStorage::set(TAB_KEY, bucket) {
            log::warn!("could not remember tab: {e}");
        }
    }

    // ── Writes ──────────────────────────────────────────────────────

    /// Apply an inline edit locally, then persist it. The local value is
    /// never rolled back; a successful write triggers a full refetch.
    pub fn commit_edit(self, commit: EditCommit) {
        self.cache.update(|cache| commit.apply(cache));
        log::info!(
            "saving {:?} for {}: {:?}",
            commit.field,
            commit.service_id,
            commit.value
        );
        self.persist(commit.to_update());
    }

    pub fn toggle_interface(self, name: String, show_links: bool) {
        self.cache
            .update(|cache| cache.set_shows_links(&name, show_links));
        log::info!("interface {name}: show links = {show_links}");
        self.persist(SavePreference::interface(name, show_links));
    }

    fn persist(self, update: SavePreference) {
        let config = self.config.get_value();
        leptos::task::spawn_local(async move {
            let result = api::save_preference(&config, &update).await;
            if let Err(e) = &result {
                log::error!("saving preference failed: {e}");
            }
            if refetch_after_write(&result) {
                self.refresh_services();
            }
        });
    }

    /// Apply one column configuration to every table and persist it once.
    pub fn save_columns(self, vis: ColumnVisibility) {
        self.cache.update(|cache| cache.set_columns(vis));
        self.column_modal.set(false);
        log::info!("saving column config: {} visible", vis.visible_count());
        let config = self.config.get_value();
        leptos::task::spawn_local(async move {
            let request = vis.to_request(TableBucket::Tcpv4);
            let result = api::save_column_config(&config, &request).await;
            if let Err(e) = &result {
                log::error!("saving column config failed: {e}");
            }
            if refetch_after_write(&result) {
                self.refresh_services();
            }
        });
    }

    // ── Clipboard / toast ───────────────────────────────────────────

    pub fn copy(self, text: String) {
        if text.is_empty() {
            self.notify("Nothing to copy", false);
            return;
        }
        leptos::task::spawn_local(async move {
            match clipboard::copy_text(&text).await {
                Ok(()) => self.notify("Copied", true),
                Err(e) => {
                    log::error!("copy failed: {e}");
                    self.notify("Copy failed", false);
                }
            }
        });
    }

    /// Show a toast, replacing any current one, and clear it after the
    /// configured duration.
    pub fn notify(self, message: &str, ok: bool) {
        let id = Self::bump(self.toast_seq);
        self.toast.set(Some(Toast {
            id,
            message: message.to_string(),
            ok,
        }));
        let toast = self.toast;
        let timeout = gloo_timers::callback::Timeout::new(self.config.get_value().toast_ms, move || {
            toast.update(|current| {
                if current.as_ref().is_some_and(|t| t.id == id) {
                    *current = None;
                }
            });
        });
        timeout.forget();
    }
}

/// Config from local storage, or defaults when absent or invalid.
pub fn load_config() -> DashboardConfig {
    match LocalStorage::get::<serde_json::Value>(CONFIG_STORAGE_KEY) {
        Ok(raw) => DashboardConfig::from_json(&raw.to_string()).unwrap_or_else(|e| {
            log::warn!("ignoring stored config: {e}");
            DashboardConfig::default()
        }),
        Err(_) => DashboardConfig::default(),
    }
}
