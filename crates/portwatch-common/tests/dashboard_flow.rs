//! End-to-end flows over the shared dashboard logic.
//!
//! Each test starts from backend-shaped JSON, runs the same sequence the
//! dashboard runs on refresh (rehydrate, partition, build), then drives
//! user interactions against the result.

use portwatch_common::bucket::{TableBucket, partition};
use portwatch_common::columns::{Column, ColumnVisibility};
use portwatch_common::config::DashboardConfig;
use portwatch_common::editor::{EditField, InlineEditor};
use portwatch_common::error::{GatewayError, refetch_after_write};
use portwatch_common::html;
use portwatch_common::models::{Interface, SavedPreferences, Service, ServiceId};
use portwatch_common::prefs::PreferenceCache;
use portwatch_common::sort::{SortController, SortKey};
use portwatch_common::view::{CellView, LinkSet, build_table};
use serde_json::json;

fn services() -> Vec<Service> {
    serde_json::from_value(json!([
        { "name": "java", "protocol": "tcp", "local_addr": "0.0.0.0", "local_port": "8080", "state": "LISTEN", "pid": "users:((\"java\",pid=900,fd=12))" },
        { "name": "nginx", "protocol": "tcp", "local_addr": "0.0.0.0", "local_port": 80, "state": "LISTEN", "pid": "users:((\"nginx\",pid=1,fd=6))" },
        { "name": "nginx", "protocol": "tcp", "local_addr": "10.0.0.5", "local_port": "443", "state": "LISTEN", "pid": "" },
        { "name": "sshd", "protocol": "tcp", "local_addr": "::", "local_port": "22", "state": "LISTEN", "pid": "" },
        { "name": "avahi", "protocol": "udp", "local_addr": "*", "local_port": "5353", "state": "UNCONN" },
        { "name": "chronyd", "protocol": "udp", "local_addr": "fe80::1ff:fe23:4567:890a%eth0", "local_port": "123", "state": "UNCONN" }
    ]))
    .unwrap()
}

fn interfaces() -> Vec<Interface> {
    serde_json::from_value(json!([
        { "name": "eth0", "ip": "192.168.1.20" },
        { "name": "docker0", "ip": "172.17.0.1" },
        { "name": "wg0", "ip": null }
    ]))
    .unwrap()
}

fn saved() -> SavedPreferences {
    serde_json::from_value(json!({
        "service_names": [{ "service_id": "0.0.0.0:8080:tcp", "name": "jenkins" }],
        "interface_configs": [{ "name": "docker0", "show_links": false }],
        "column_configs": null,
        "url_paths": [{ "service_id": "0.0.0.0:8080:tcp", "path": "/ci" }]
    }))
    .unwrap()
}

fn cell<'a>(cells: &'a [CellView], col: Column) -> &'a CellView {
    cells.iter().find(|c| c.column() == col).unwrap()
}

#[test]
fn refresh_builds_all_four_tables() {
    let cache = PreferenceCache::rehydrate(&saved());
    let parts = partition(&services());
    let config = DashboardConfig::default();

    let tcp4 = build_table(
        TableBucket::Tcpv4,
        parts.get(TableBucket::Tcpv4),
        &interfaces(),
        &cache,
        &config,
    );
    let ports: Vec<u32> = tcp4.rows.iter().map(|r| r.port).collect();
    assert_eq!(ports, [80, 443, 8080]);
    assert_eq!(tcp4.columns.len(), 7);

    let jenkins = &tcp4.rows[2];
    assert_eq!(
        cell(&jenkins.cells, Column::ServiceName),
        &CellView::ServiceName {
            value: "jenkins".into()
        }
    );
    // docker0 is hidden and wg0 has no address, so only eth0 links.
    let CellView::AccessLinks(LinkSet::Links(links)) = cell(&jenkins.cells, Column::AccessLinks)
    else {
        panic!("expected links");
    };
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].href, "http://192.168.1.20:8080/ci");

    let pinned = &tcp4.rows[1];
    let CellView::AccessLinks(LinkSet::Links(links)) = cell(&pinned.cells, Column::AccessLinks)
    else {
        panic!("expected links");
    };
    assert_eq!(links[0].href, "http://10.0.0.5:443/");

    for bucket in [TableBucket::Tcpv6, TableBucket::Udpv4, TableBucket::Udpv6] {
        assert_eq!(parts.get(bucket).len(), 1, "{bucket}");
    }

    let udp6 = build_table(
        TableBucket::Udpv6,
        parts.get(TableBucket::Udpv6),
        &interfaces(),
        &cache,
        &config,
    );
    let CellView::ListenAddr { display, full } = cell(&udp6.rows[0].cells, Column::ListenAddr)
    else {
        panic!("expected listen address");
    };
    assert_eq!(display, "fe80::1ff:fe...");
    assert_eq!(full, "fe80::1ff:fe23:4567:890a%eth0:123");
}

#[test]
fn column_settings_apply_to_every_table() {
    let mut cache = PreferenceCache::rehydrate(&saved());
    let mut vis = cache.unified_columns();
    vis.set(Column::ProcessName, false);
    vis.set(Column::UrlPath, false);
    cache.set_columns(vis);

    let req = vis.to_request(TableBucket::Tcpv4);
    assert_eq!(
        serde_json::to_value(&req).unwrap()["column_configs"],
        json!({
            "process_name": false,
            "service_name": true,
            "protocol": true,
            "listen_addr": true,
            "state": true,
            "url_path": false,
            "access_links": true
        })
    );

    let parts = partition(&services());
    for bucket in TableBucket::ALL {
        let table = build_table(
            bucket,
            parts.get(bucket),
            &interfaces(),
            &cache,
            &DashboardConfig::default(),
        );
        assert_eq!(table.columns.len(), 5, "{bucket}");
        assert!(!table.columns.contains(&Column::ProcessName));
    }

    // The backend echoes the fan-out on the next refresh.
    let echoed: SavedPreferences = serde_json::from_value(json!({
        "column_configs": TableBucket::ALL.iter().flat_map(|b| {
            vec![
                json!({ "table": b.as_str(), "column": "process_name", "visible": false }),
                json!({ "table": b.as_str(), "column": "url_path", "visible": false }),
            ]
        }).collect::<Vec<_>>()
    }))
    .unwrap();
    let cache = PreferenceCache::rehydrate(&echoed);
    for bucket in TableBucket::ALL {
        assert_eq!(cache.columns(bucket), vis);
    }
    assert_ne!(vis, ColumnVisibility::default());
}

#[test]
fn editing_a_url_path_updates_links_after_rebuild() {
    let mut cache = PreferenceCache::rehydrate(&saved());
    let parts = partition(&services());
    let nginx = &parts.get(TableBucket::Tcpv4)[0];
    assert_eq!(nginx.local_port, "80");

    let mut editor = InlineEditor::new(EditField::UrlPath, nginx.id(), cache.url_path(&nginx.id()));
    editor.begin();
    editor.set_draft("status ");
    let commit = editor.handle_key("Enter").unwrap();
    commit.apply(&mut cache);
    assert_eq!(
        serde_json::to_value(commit.to_update()).unwrap(),
        json!({ "service_id": "0.0.0.0:80:tcp", "path": "/status" })
    );

    let table = build_table(
        TableBucket::Tcpv4,
        parts.get(TableBucket::Tcpv4),
        &interfaces(),
        &cache,
        &DashboardConfig::default(),
    );
    assert_eq!(
        cell(&table.rows[0].cells, Column::UrlPath),
        &CellView::UrlPath {
            value: "/status".into()
        }
    );
    let html = html::render_view(&table, &SortController::default());
    assert!(html.contains("http://192.168.1.20:80/status"));
}

#[test]
fn cancelled_edit_leaves_cache_untouched() {
    let cache = PreferenceCache::rehydrate(&saved());
    let id = ServiceId::from("0.0.0.0:8080:tcp");
    let mut editor = InlineEditor::new(EditField::ServiceName, id.clone(), cache.service_name(&id, "8080"));
    editor.begin();
    editor.set_draft("something else");
    editor.cancel();
    assert_eq!(editor.value(), "jenkins");
    assert_eq!(cache.service_name(&id, "8080"), "jenkins");
}

#[test]
fn sorting_reorders_rendered_rows_only() {
    let cache = PreferenceCache::rehydrate(&saved());
    let parts = partition(&services());
    let mut table = build_table(
        TableBucket::Tcpv4,
        parts.get(TableBucket::Tcpv4),
        &interfaces(),
        &cache,
        &DashboardConfig::default(),
    );
    let mut sort = SortController::default();

    sort.click_and_sort(SortKey::ListenAddr, &mut table.rows);
    sort.click_and_sort(SortKey::ListenAddr, &mut table.rows);
    let ports: Vec<u32> = table.rows.iter().map(|r| r.port).collect();
    assert_eq!(ports, [8080, 443, 80]);

    // The partitioned data keeps its original order.
    let source: Vec<&str> = parts
        .get(TableBucket::Tcpv4)
        .iter()
        .map(|s| s.local_port.as_str())
        .collect();
    assert_eq!(source, ["80", "443", "8080"]);

    let html = html::render_view(&table, &sort);
    let first = html.find("8080").unwrap();
    let last = html.find(":80<").unwrap();
    assert!(first < last);
}

#[test]
fn one_bad_saved_entry_does_not_fail_the_refresh() {
    let saved: SavedPreferences = serde_json::from_value(json!({
        "service_names": [
            { "name": "orphan" },
            { "service_id": "0.0.0.0:8080:tcp", "name": "jenkins" }
        ],
        "interface_configs": [{ "name": "docker0", "show_links": null }],
        "column_configs": [{ "table": "tcpv4", "column": "state" }],
        "url_paths": null
    }))
    .unwrap();
    let cache = PreferenceCache::rehydrate(&saved);

    let id = ServiceId::from("0.0.0.0:8080:tcp");
    assert_eq!(cache.service_name(&id, "8080"), "jenkins");
    assert!(cache.shows_links("docker0"));
    assert_eq!(cache.columns(TableBucket::Tcpv4), ColumnVisibility::default());
}

#[test]
fn failed_save_keeps_the_optimistic_value() {
    let mut cache = PreferenceCache::rehydrate(&saved());
    let id = ServiceId::from("0.0.0.0:8080:tcp");
    let mut editor = InlineEditor::new(EditField::ServiceName, id.clone(), cache.service_name(&id, "8080"));
    editor.begin();
    editor.set_draft("ci");
    let commit = editor.commit().unwrap();
    commit.apply(&mut cache);

    // The backend rejects the write: no refetch, so nothing rehydrates
    // the old name over the edit.
    let result = Err(GatewayError::status(500, "/api/save-service-name"));
    assert!(!refetch_after_write(&result));
    assert_eq!(cache.service_name(&id, "8080"), "ci");

    assert!(refetch_after_write(&Ok(())));
}
