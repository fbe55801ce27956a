//! Header-click sorting of rendered rows.
//!
//! Only the listen address and state headers sort. The controller tracks
//! which of the two is active; clicking one resets the other to neutral.
//! Sorting reorders the rows already built for display and never touches
//! the fetched service list.

use std::cmp::Ordering;

use crate::columns::Column;
use crate::view::RowView;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Numeric port order.
    ListenAddr,
    /// Lexicographic state text.
    State,
}

impl SortKey {
    pub fn for_column(col: Column) -> Option<SortKey> {
        match col {
            Column::ListenAddr => Some(SortKey::ListenAddr),
            Column::State => Some(SortKey::State),
            _ => None,
        }
    }

    fn compare(self, a: &RowView, b: &RowView) -> Ordering {
        match self {
            SortKey::ListenAddr => a.port.cmp(&b.port),
            SortKey::State => a.state.cmp(&b.state),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn toggled(self) -> SortOrder {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }
}

/// Arrow shown on a sortable header with no active order.
pub const NEUTRAL_GLYPH: &str = "↕";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortController {
    active: Option<(SortKey, SortOrder)>,
}

impl SortController {
    /// Register a header click and return the new order for that key.
    /// The first click on a key sorts ascending.
    pub fn click(&mut self, key: SortKey) -> SortOrder {
        let order = match self.active {
            Some((k, order)) if k == key => order.toggled(),
            _ => SortOrder::Ascending,
        };
        self.active = Some((key, order));
        order
    }

    pub fn order_of(&self, key: SortKey) -> Option<SortOrder> {
        match self.active {
            Some((k, order)) if k == key => Some(order),
            _ => None,
        }
    }

    pub fn glyph(&self, key: SortKey) -> &'static str {
        match self.order_of(key) {
            Some(SortOrder::Ascending) => "▲",
            Some(SortOrder::Descending) => "▼",
            None => NEUTRAL_GLYPH,
        }
    }

    /// Back to neutral, as after a fresh render.
    pub fn reset(&mut self) {
        self.active = None;
    }

    /// Click `key` and reorder `rows` accordingly.
    pub fn click_and_sort(&mut self, key: SortKey, rows: &mut [RowView]) {
        let order = self.click(key);
        sort_rows(rows, key, order);
    }
}

/// Stable sort of rows by `key`.
pub fn sort_rows(rows: &mut [RowView], key: SortKey, order: SortOrder) {
    match order {
        SortOrder::Ascending => rows.sort_by(|a, b| key.compare(a, b)),
        SortOrder::Descending => rows.sort_by(|a, b| key.compare(b, a)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ServiceId;

    fn row(port: u32, state: &str) -> RowView {
        RowView {
            service_id: ServiceId::new("0.0.0.0", &port.to_string(), "tcp"),
            port,
            state: state.into(),
            cells: Vec::new(),
        }
    }

    fn ports(rows: &[RowView]) -> Vec<u32> {
        rows.iter().map(|r| r.port).collect()
    }

    #[test]
    fn listen_addr_toggles_between_orders() {
        let mut rows = vec![row(8080, "LISTEN"), row(80, "LISTEN"), row(443, "LISTEN")];
        let mut sort = SortController::default();

        sort.click_and_sort(SortKey::ListenAddr, &mut rows);
        assert_eq!(ports(&rows), [80, 443, 8080]);
        assert_eq!(sort.glyph(SortKey::ListenAddr), "▲");

        sort.click_and_sort(SortKey::ListenAddr, &mut rows);
        assert_eq!(ports(&rows), [8080, 443, 80]);
        assert_eq!(sort.glyph(SortKey::ListenAddr), "▼");
    }

    #[test]
    fn state_second_click_sorts_descending() {
        let mut rows = vec![row(1, "LISTEN"), row(2, "ESTAB"), row(3, "UNCONN")];
        let mut sort = SortController::default();

        sort.click_and_sort(SortKey::State, &mut rows);
        sort.click_and_sort(SortKey::State, &mut rows);
        let states: Vec<&str> = rows.iter().map(|r| r.state.as_str()).collect();
        assert_eq!(states, ["UNCONN", "LISTEN", "ESTAB"]);
        assert_eq!(sort.order_of(SortKey::State), Some(SortOrder::Descending));
        assert_eq!(sort.glyph(SortKey::State), "▼");
        assert_eq!(sort.glyph(SortKey::ListenAddr), NEUTRAL_GLYPH);
    }

    #[test]
    fn clicking_other_header_resets_first() {
        let mut rows = vec![row(1, "UNCONN"), row(2, "LISTEN"), row(3, "ESTAB")];
        let mut sort = SortController::default();
        sort.click_and_sort(SortKey::ListenAddr, &mut rows);
        sort.click_and_sort(SortKey::State, &mut rows);

        assert_eq!(sort.glyph(SortKey::ListenAddr), NEUTRAL_GLYPH);
        assert_eq!(sort.order_of(SortKey::State), Some(SortOrder::Ascending));
        let states: Vec<&str> = rows.iter().map(|r| r.state.as_str()).collect();
        assert_eq!(states, ["ESTAB", "LISTEN", "UNCONN"]);

        // Returning to the port header starts over at ascending.
        assert_eq!(sort.click(SortKey::ListenAddr), SortOrder::Ascending);
    }

    #[test]
    fn non_numeric_ports_sort_as_zero() {
        let mut rows = vec![row(53, "UNCONN"), row(0, "UNCONN"), row(22, "LISTEN")];
        sort_rows(&mut rows, SortKey::ListenAddr, SortOrder::Ascending);
        assert_eq!(ports(&rows), [0, 22, 53]);
    }

    #[test]
    fn only_address_and_state_columns_sort() {
        assert_eq!(SortKey::for_column(Column::ListenAddr), Some(SortKey::ListenAddr));
        assert_eq!(SortKey::for_column(Column::State), Some(SortKey::State));
        assert_eq!(SortKey::for_column(Column::ServiceName), None);
        assert_eq!(SortKey::for_column(Column::AccessLinks), None);
    }

    #[test]
    fn reset_returns_to_neutral() {
        let mut sort = SortController::default();
        sort.click(SortKey::State);
        sort.reset();
        assert_eq!(sort.glyph(SortKey::State), NEUTRAL_GLYPH);
        assert_eq!(sort.order_of(SortKey::State), None);
    }
}
