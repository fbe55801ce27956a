//! Service table columns and their visibility.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::bucket::TableBucket;
use crate::models::ColumnConfigRequest;

pub const COLUMN_COUNT: usize = 7;

/// The seven known columns, declared in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    ProcessName,
    ServiceName,
    Protocol,
    ListenAddr,
    State,
    UrlPath,
    AccessLinks,
}

impl Column {
    pub const ALL: [Column; COLUMN_COUNT] = [
        Column::ProcessName,
        Column::ServiceName,
        Column::Protocol,
        Column::ListenAddr,
        Column::State,
        Column::UrlPath,
        Column::AccessLinks,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Column::ProcessName => "process_name",
            Column::ServiceName => "service_name",
            Column::Protocol => "protocol",
            Column::ListenAddr => "listen_addr",
            Column::State => "state",
            Column::UrlPath => "url_path",
            Column::AccessLinks => "access_links",
        }
    }

    /// Header and settings-checkbox label.
    pub fn label(self) -> &'static str {
        match self {
            Column::ProcessName => "Process",
            Column::ServiceName => "Service Name",
            Column::Protocol => "Protocol",
            Column::ListenAddr => "Listen Address",
            Column::State => "State",
            Column::UrlPath => "URL Path",
            Column::AccessLinks => "Access Links",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Column {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Column::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("unknown column: {s}"))
    }
}

/// Visibility of every column for one table. Always complete: columns
/// never configured take their default (visible).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnVisibility([bool; COLUMN_COUNT]);

impl Default for ColumnVisibility {
    fn default() -> Self {
        Self([true; COLUMN_COUNT])
    }
}

impl ColumnVisibility {
    /// Build from a possibly partial saved map, back-filling from defaults.
    pub fn from_partial(saved: &BTreeMap<Column, bool>) -> Self {
        let mut vis = Self::default();
        for (&col, &visible) in saved {
            vis.set(col, visible);
        }
        vis
    }

    pub fn is_visible(&self, col: Column) -> bool {
        self.0[col.index()]
    }

    pub fn set(&mut self, col: Column, visible: bool) {
        self.0[col.index()] = visible;
    }

    /// Visible columns in display order.
    pub fn visible(&self) -> impl Iterator<Item = Column> + '_ {
        Column::ALL.into_iter().filter(|&c| self.is_visible(c))
    }

    pub fn visible_count(&self) -> usize {
        self.visible().count()
    }

    pub fn to_map(&self) -> BTreeMap<Column, bool> {
        Column::ALL
            .into_iter()
            .map(|c| (c, self.is_visible(c)))
            .collect()
    }

    /// Request body persisting this configuration. The backend fans it out
    /// to every table, so one request naming any table is enough.
    pub fn to_request(&self, table: TableBucket) -> ColumnConfigRequest {
        ColumnConfigRequest {
            table: table.as_str().to_string(),
            column_configs: self.to_map(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_columns_visible_by_default() {
        let vis = ColumnVisibility::default();
        assert_eq!(vis.visible_count(), 7);
        assert_eq!(vis.visible().collect::<Vec<_>>(), Column::ALL);
    }

    #[test]
    fn partial_config_is_back_filled() {
        let mut saved = BTreeMap::new();
        saved.insert(Column::Protocol, false);
        saved.insert(Column::State, false);
        let vis = ColumnVisibility::from_partial(&saved);
        assert!(!vis.is_visible(Column::Protocol));
        assert!(!vis.is_visible(Column::State));
        assert!(vis.is_visible(Column::ProcessName));
        assert!(vis.is_visible(Column::AccessLinks));
        assert_eq!(vis.visible_count(), 5);
    }

    #[test]
    fn visible_keeps_display_order() {
        let mut vis = ColumnVisibility::default();
        vis.set(Column::ServiceName, false);
        vis.set(Column::UrlPath, false);
        assert_eq!(
            vis.visible().collect::<Vec<_>>(),
            [
                Column::ProcessName,
                Column::Protocol,
                Column::ListenAddr,
                Column::State,
                Column::AccessLinks
            ]
        );
    }

    #[test]
    fn column_names_parse() {
        for col in Column::ALL {
            assert_eq!(col.as_str().parse::<Column>(), Ok(col));
        }
        assert!("pid".parse::<Column>().is_err());
    }

    #[test]
    fn request_lists_every_column() {
        let mut vis = ColumnVisibility::default();
        vis.set(Column::UrlPath, false);
        let req = vis.to_request(TableBucket::Tcpv4);
        assert_eq!(req.table, "tcpv4");
        assert_eq!(req.column_configs.len(), 7);
        assert!(!req.column_configs[&Column::UrlPath]);
    }
}
