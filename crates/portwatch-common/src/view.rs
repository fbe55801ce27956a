//! Table view-model.
//!
//! [`build_table`] turns one bucket's services into rows and cells that
//! already reflect column visibility, preference lookups and link
//! resolution. The Leptos components and the HTML string renderer both
//! consume this instead of reaching into the cache themselves.

use crate::bucket::{TableBucket, is_wildcard_addr};
use crate::columns::{Column, ColumnVisibility};
use crate::config::DashboardConfig;
use crate::models::{Interface, Service, ServiceId};
use crate::prefs::PreferenceCache;

pub const NO_SERVICES: &str = "No running services found";
pub const NO_INTERFACES: &str = "No network interfaces found";
pub const NO_INTERFACE_INFO: &str = "No interface information";
pub const NO_LINKS: &str = "No available links";
pub const LOAD_SERVICES_FAILED: &str = "Failed to load services";
pub const LOAD_INTERFACES_FAILED: &str = "Failed to load interfaces";

/// Separator between access links.
pub const LINK_SEPARATOR: &str = " | ";

#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    pub bucket: TableBucket,
    /// Visible columns in display order.
    pub columns: Vec<Column>,
    pub rows: Vec<RowView>,
}

impl TableView {
    /// Column span of the full-width empty row: every visible column plus
    /// the settings cell.
    pub fn colspan(&self) -> usize {
        self.columns.len() + 1
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowView {
    pub service_id: ServiceId,
    /// Sort key for the listen address column.
    pub port: u32,
    /// Sort key for the state column.
    pub state: String,
    pub cells: Vec<CellView>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CellView {
    /// Process name with its pid as tooltip and copy target.
    ProcessName { name: String, pid: String },
    ServiceName { value: String },
    Protocol(String),
    /// `display` may be shortened; `full` is the tooltip and copy target.
    ListenAddr { display: String, full: String },
    State(String),
    UrlPath { value: String },
    AccessLinks(LinkSet),
}

impl CellView {
    pub fn column(&self) -> Column {
        match self {
            CellView::ProcessName { .. } => Column::ProcessName,
            CellView::ServiceName { .. } => Column::ServiceName,
            CellView::Protocol(_) => Column::Protocol,
            CellView::ListenAddr { .. } => Column::ListenAddr,
            CellView::State(_) => Column::State,
            CellView::UrlPath { .. } => Column::UrlPath,
            CellView::AccessLinks(_) => Column::AccessLinks,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LinkSet {
    Links(Vec<AccessLink>),
    /// The interface list itself was empty.
    NoInterfaces,
    /// Interfaces exist but none is visible with an address.
    NoneVisible,
}

impl LinkSet {
    pub fn empty_message(&self) -> Option<&'static str> {
        match self {
            LinkSet::Links(_) => None,
            LinkSet::NoInterfaces => Some(NO_INTERFACE_INFO),
            LinkSet::NoneVisible => Some(NO_LINKS),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessLink {
    /// Interface name.
    pub label: String,
    pub href: String,
    /// `host:port/path`, without the scheme.
    pub copy_text: String,
}

/// Build the view-model for one bucket. Rows keep input order.
pub fn build_table(
    bucket: TableBucket,
    services: &[Service],
    interfaces: &[Interface],
    cache: &PreferenceCache,
    config: &DashboardConfig,
) -> TableView {
    let vis = cache.columns(bucket);
    let rows = services
        .iter()
        .map(|svc| build_row(bucket, svc, interfaces, cache, &vis, config))
        .collect();
    TableView {
        bucket,
        columns: vis.visible().collect(),
        rows,
    }
}

fn build_row(
    bucket: TableBucket,
    svc: &Service,
    interfaces: &[Interface],
    cache: &PreferenceCache,
    vis: &ColumnVisibility,
    config: &DashboardConfig,
) -> RowView {
    let id = svc.id();
    let cells = vis
        .visible()
        .map(|col| match col {
            Column::ProcessName => CellView::ProcessName {
                name: svc.name.clone(),
                pid: svc.pid.clone(),
            },
            Column::ServiceName => CellView::ServiceName {
                value: cache.service_name(&id, &svc.local_port),
            },
            Column::Protocol => CellView::Protocol(svc.protocol.clone()),
            Column::ListenAddr => {
                let full = svc.listen_addr();
                let display = if bucket.truncates_listen_addr() {
                    truncate_chars(&full, config.udp_addr_max_chars)
                } else {
                    full.clone()
                };
                CellView::ListenAddr { display, full }
            }
            Column::State => CellView::State(svc.state.clone()),
            Column::UrlPath => CellView::UrlPath {
                value: cache.url_path(&id).to_string(),
            },
            Column::AccessLinks => CellView::AccessLinks(access_links(svc, interfaces, cache)),
        })
        .collect();

    RowView {
        port: svc.port_number(),
        state: svc.state.clone(),
        service_id: id,
        cells,
    }
}

/// One link per visible interface that has an address.
pub fn access_links(svc: &Service, interfaces: &[Interface], cache: &PreferenceCache) -> LinkSet {
    if interfaces.is_empty() {
        return LinkSet::NoInterfaces;
    }
    let path = cache.url_path(&svc.id());
    let links: Vec<AccessLink> = interfaces
        .iter()
        .filter(|iface| cache.shows_links(&iface.name) && iface.has_ip())
        .map(|iface| {
            let host = url_host(target_addr(&svc.local_addr, &iface.ip));
            let copy_text = format!("{host}:{}{path}", svc.local_port);
            AccessLink {
                label: iface.name.clone(),
                href: format!("http://{copy_text}"),
                copy_text,
            }
        })
        .collect();
    if links.is_empty() {
        LinkSet::NoneVisible
    } else {
        LinkSet::Links(links)
    }
}

/// Address a link should target: the interface IP for wildcard binds,
/// otherwise the bound address itself.
pub fn target_addr<'a>(local_addr: &'a str, interface_ip: &'a str) -> &'a str {
    if is_wildcard_addr(local_addr) {
        interface_ip
    } else {
        local_addr
    }
}

/// Bracket IPv6 literals so they can carry a port in a URL.
fn url_host(addr: &str) -> String {
    if addr.contains(':') && !addr.starts_with('[') {
        format!("[{addr}]")
    } else {
        addr.to_string()
    }
}

/// Keep the first `max` characters and append `...` when anything was cut.
pub fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}
