//! HTML string rendering of a [`TableView`].
//!
//! Produces the same table the Leptos component builds, as a standalone
//! string. Interactive hooks are expressed as `data-*` attributes
//! (`data-copy`, `data-edit`, `data-sort`, `data-action`) instead of inline
//! handlers. Every interpolated value is escaped.

use std::fmt::Write;

use crate::bucket::TableBucket;
use crate::columns::Column;
use crate::config::DashboardConfig;
use crate::models::{Interface, Service};
use crate::prefs::PreferenceCache;
use crate::sort::{SortController, SortKey};
use crate::view::{CellView, LINK_SEPARATOR, LinkSet, NO_SERVICES, RowView, TableView, build_table};

pub const SETTINGS_GLYPH: &str = "⚙";
const EDIT_GLYPH: &str = "✎";

pub fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Render one bucket straight from data, with neutral sort headers.
pub fn render(
    bucket: TableBucket,
    services: &[Service],
    interfaces: &[Interface],
    cache: &PreferenceCache,
    config: &DashboardConfig,
) -> String {
    let view = build_table(bucket, services, interfaces, cache, config);
    render_view(&view, &SortController::default())
}

/// Render a prepared view, showing `sort`'s header indicators.
pub fn render_view(view: &TableView, sort: &SortController) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        r#"<table class="services" id="{}-services">"#,
        view.bucket
    );

    html.push_str("<thead><tr>");
    for &col in &view.columns {
        match SortKey::for_column(col) {
            Some(key) => {
                let _ = write!(
                    html,
                    r#"<th class="sortable" data-sort="{}">{} <span class="sort-arrow">{}</span></th>"#,
                    col,
                    escape(col.label()),
                    sort.glyph(key)
                );
            }
            None => {
                let _ = write!(html, "<th>{}</th>", escape(col.label()));
            }
        }
    }
    let _ = write!(
        html,
        r#"<th class="settings"><span class="gear-icon" data-action="column-config">{SETTINGS_GLYPH}</span></th>"#
    );
    html.push_str("</tr></thead><tbody>");

    if view.is_empty() {
        let _ = write!(
            html,
            r#"<tr><td class="empty" colspan="{}">{}</td></tr>"#,
            view.colspan(),
            NO_SERVICES
        );
    } else {
        for row in &view.rows {
            render_row(&mut html, row);
        }
    }

    html.push_str("</tbody></table>");
    html
}

fn render_row(html: &mut String, row: &RowView) {
    let id = escape(row.service_id.as_str());
    let _ = write!(html, r#"<tr data-service-id="{id}">"#);
    for cell in &row.cells {
        match cell {
            CellView::ProcessName { name, pid } => {
                let pid = escape(pid);
                let _ = write!(
                    html,
                    r#"<td class="copyable" title="{pid}" data-copy="{pid}">{}</td>"#,
                    escape(name)
                );
            }
            CellView::ServiceName { value } => {
                editable_cell(html, Column::ServiceName, &id, value);
            }
            CellView::Protocol(protocol) => {
                let _ = write!(html, "<td>{}</td>", escape(protocol));
            }
            CellView::ListenAddr { display, full } => {
                let full = escape(full);
                let _ = write!(
                    html,
                    r#"<td class="copyable" title="{full}" data-copy="{full}">{}</td>"#,
                    escape(display)
                );
            }
            CellView::State(state) => {
                let _ = write!(html, "<td>{}</td>", escape(state));
            }
            CellView::UrlPath { value } => {
                editable_cell(html, Column::UrlPath, &id, value);
            }
            CellView::AccessLinks(set) => {
                html.push_str("<td>");
                match set {
                    LinkSet::Links(links) => {
                        let parts: Vec<String> = links
                            .iter()
                            .map(|link| {
                                format!(
                                    r#"<a href="{}" target="_blank" rel="noopener">{}</a> <button class="copy-btn" data-copy="{}">copy</button>"#,
                                    escape(&link.href),
                                    escape(&link.label),
                                    escape(&link.copy_text)
                                )
                            })
                            .collect();
                        html.push_str(&parts.join(LINK_SEPARATOR));
                    }
                    other => {
                        if let Some(msg) = other.empty_message() {
                            html.push_str(msg);
                        }
                    }
                }
                html.push_str("</td>");
            }
        }
    }
    // Settings column has no per-row content.
    html.push_str("<td></td></tr>");
}

fn editable_cell(html: &mut String, col: Column, escaped_id: &str, value: &str) {
    let _ = write!(
        html,
        r#"<td id="{col}-{escaped_id}">{} <span class="edit-icon" data-edit="{col}" data-service-id="{escaped_id}">{EDIT_GLYPH}</span></td>"#,
        escape(value)
    );
}

/// Replacement content for a table whose data failed to load.
pub fn render_error(message: &str) -> String {
    format!(r#"<p class="load-error">{}</p>"#, escape(message))
}
