//! Leptos Table Sync
//!
//! Keyed table model for server-rendered style tables.
//! The last data row carries the `last` marker, an empty table shows a
//! single placeholder row instead.

use leptos::prelude::*;
use serde::{Deserialize, Serialize};

/// DOM id of the row holding the last marker
pub const LAST_ROW_ID: &str = "last";
/// DOM id of the placeholder row
pub const PLACEHOLDER_ROW_ID: &str = "table-empty";
/// Message used when a table is created without one
pub const DEFAULT_EMPTY_MESSAGE: &str = "No data";

/// Rows are identified by a stable string key
pub trait TableRow {
    fn row_key(&self) -> String;
}

/// Static table settings used for the placeholder row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableConfig {
    /// How many columns the placeholder cell spans
    pub columns: usize,
    pub empty_message: String,
    /// When set, the placeholder message links here
    #[serde(default)]
    pub empty_link: Option<String>,
}

impl TableConfig {
    pub fn new(columns: usize, empty_message: impl Into<String>) -> Self {
        Self {
            columns,
            empty_message: empty_message.into(),
            empty_link: None,
        }
    }

    pub fn with_empty_link(mut self, href: impl Into<String>) -> Self {
        self.empty_link = Some(href.into());
        self
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self::new(1, DEFAULT_EMPTY_MESSAGE)
    }
}

/// One rendered line of the table body
#[derive(Debug, Clone, PartialEq)]
pub enum RenderedRow<R> {
    Data {
        row: R,
        /// 1-based display position
        position: usize,
        is_last: bool,
    },
    Placeholder {
        message: String,
        columns: usize,
        link: Option<String>,
    },
}

impl<R> RenderedRow<R> {
    pub fn is_last(&self) -> bool {
        matches!(self, RenderedRow::Data { is_last: true, .. })
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, RenderedRow::Placeholder { .. })
    }
}

/// Ordered table contents
#[derive(Debug, Clone, PartialEq)]
pub struct TableModel<R> {
    config: TableConfig,
    rows: Vec<R>,
}

impl<R: TableRow + Clone> Default for TableModel<R> {
    fn default() -> Self {
        Self::new(TableConfig::default())
    }
}

impl<R: TableRow + Clone> TableModel<R> {
    pub fn new(config: TableConfig) -> Self {
        Self {
            config,
            rows: Vec::new(),
        }
    }

    pub fn with_rows(config: TableConfig, rows: Vec<R>) -> Self {
        Self { config, rows }
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.rows.iter().any(|r| r.row_key() == key)
    }

    pub fn get(&self, key: &str) -> Option<&R> {
        self.rows.iter().find(|r| r.row_key() == key)
    }

    /// 1-based position of a row
    pub fn position(&self, key: &str) -> Option<usize> {
        self.rows.iter().position(|r| r.row_key() == key).map(|i| i + 1)
    }

    /// Key of the row holding the last marker
    pub fn last_key(&self) -> Option<String> {
        self.rows.last().map(TableRow::row_key)
    }

    /// Append after the current last row. The placeholder goes away and the
    /// marker moves to the new row.
    pub fn add_row(&mut self, row: R) {
        self.rows.push(row);
    }

    /// Remove a row. If it held the marker, the previous row inherits it;
    /// removing the only row brings back the placeholder.
    pub fn delete_row(&mut self, key: &str) -> Option<R> {
        let index = self.rows.iter().position(|r| r.row_key() == key)?;
        Some(self.rows.remove(index))
    }

    /// Update a row in place. Returns false when the key is unknown.
    pub fn replace_row(&mut self, key: &str, row: R) -> bool {
        match self.rows.iter_mut().find(|r| r.row_key() == key) {
            Some(slot) => {
                *slot = row;
                true
            }
            None => false,
        }
    }

    pub fn update_row(&mut self, key: &str, f: impl FnOnce(&mut R)) -> bool {
        match self.rows.iter_mut().find(|r| r.row_key() == key) {
            Some(slot) => {
                f(slot);
                true
            }
            None => false,
        }
    }

    pub fn replace_all(&mut self, rows: Vec<R>) {
        self.rows = rows;
    }

    /// Body lines in display order
    pub fn rendered(&self) -> Vec<RenderedRow<R>> {
        if self.rows.is_empty() {
            return vec![RenderedRow::Placeholder {
                message: self.config.empty_message.clone(),
                columns: self.config.columns,
                link: self.config.empty_link.clone(),
            }];
        }
        let last = self.rows.len() - 1;
        self.rows
            .iter()
            .enumerate()
            .map(|(i, row)| RenderedRow::Data {
                row: row.clone(),
                position: i + 1,
                is_last: i == last,
            })
            .collect()
    }
}

/// Table body bound to a model signal.
///
/// `render_row` receives the row and its 1-based position and returns the
/// cells; the `<tr>` with its marker id is produced here.
#[component]
pub fn SyncedTable<R, F, IV>(
    #[prop(into)] model: Signal<TableModel<R>>,
    render_row: F,
    #[prop(optional, into)] row_class: Option<String>,
) -> impl IntoView
where
    R: TableRow + Clone + Send + Sync + 'static,
    F: Fn(R, usize) -> IV + Clone + Send + Sync + 'static,
    IV: IntoView + 'static,
{
    let row_class = row_class.unwrap_or_else(|| "table-row".to_string());

    view! {
        <tbody>
            {move || {
                model.get().rendered().into_iter().map(|line| match line {
                    RenderedRow::Placeholder { message, columns, link } => view! {
                        <tr id=PLACEHOLDER_ROW_ID>
                            <td class="table-data" colspan=columns.to_string()>
                                {match link {
                                    Some(href) => view! { <a href=href>{message}</a> }.into_any(),
                                    None => message.into_any(),
                                }}
                            </td>
                        </tr>
                    }.into_any(),
                    RenderedRow::Data { row, position, is_last } => {
                        let render_row = render_row.clone();
                        let key = row.row_key();
                        view! {
                            <tr
                                id=if is_last { Some(LAST_ROW_ID) } else { None }
                                class=row_class.clone()
                                data-key=key
                            >
                                {render_row(row, position)}
                            </tr>
                        }.into_any()
                    }
                }).collect_view()
            }}
        </tbody>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use proptest::test_runner::Config;

    #[derive(Debug, Clone, PartialEq)]
    struct Row(u32);

    impl TableRow for Row {
        fn row_key(&self) -> String {
            self.0.to_string()
        }
    }

    fn table() -> TableModel<Row> {
        TableModel::new(TableConfig::new(6, "No items"))
    }

    fn marker_count(t: &TableModel<Row>) -> usize {
        t.rendered().iter().filter(|r| r.is_last()).count()
    }

    fn placeholder_count(t: &TableModel<Row>) -> usize {
        t.rendered().iter().filter(|r| r.is_placeholder()).count()
    }

    #[test]
    fn test_empty_table_shows_placeholder() {
        let t = table();
        assert_eq!(
            t.rendered(),
            vec![RenderedRow::Placeholder { message: "No items".into(), columns: 6, link: None }]
        );
        assert_eq!(t.last_key(), None);
    }

    #[test]
    fn test_default_table_uses_default_message() {
        let t: TableModel<Row> = TableModel::default();
        assert_eq!(
            t.rendered(),
            vec![RenderedRow::Placeholder { message: DEFAULT_EMPTY_MESSAGE.into(), columns: 1, link: None }]
        );
    }

    #[test]
    fn test_add_moves_marker_to_new_row() {
        let mut t = table();
        t.add_row(Row(1));
        assert_eq!(t.last_key().as_deref(), Some("1"));
        t.add_row(Row(2));
        assert_eq!(t.last_key().as_deref(), Some("2"));
        assert_eq!(marker_count(&t), 1);
        assert_eq!(placeholder_count(&t), 0);
    }

    #[test]
    fn test_delete_last_passes_marker_to_previous() {
        let mut t = table();
        t.add_row(Row(1));
        t.add_row(Row(2));
        t.delete_row("2");
        assert_eq!(t.last_key().as_deref(), Some("1"));
        assert_eq!(marker_count(&t), 1);
    }

    #[test]
    fn test_delete_middle_keeps_marker() {
        let mut t = table();
        for i in 1..=3 {
            t.add_row(Row(i));
        }
        t.delete_row("2");
        assert_eq!(t.last_key().as_deref(), Some("3"));
        assert_eq!(t.position("3"), Some(2));
    }

    #[test]
    fn test_delete_only_row_restores_single_placeholder() {
        let mut t = table();
        t.add_row(Row(1));
        assert_eq!(t.delete_row("1"), Some(Row(1)));
        assert_eq!(placeholder_count(&t), 1);
        assert_eq!(marker_count(&t), 0);
        assert_eq!(t.rendered().len(), 1);
    }

    #[test]
    fn test_delete_unknown_key_is_noop() {
        let mut t = table();
        t.add_row(Row(1));
        assert_eq!(t.delete_row("9"), None);
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn test_replace_row_keeps_position() {
        let mut t = table();
        t.add_row(Row(1));
        t.add_row(Row(2));
        assert!(t.update_row("1", |r| r.0 = 1));
        assert!(!t.replace_row("7", Row(7)));
        assert_eq!(t.position("1"), Some(1));
    }

    #[derive(Debug, Clone)]
    enum Op {
        Add(u32),
        Delete(u32),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0_u32..8).prop_map(Op::Add),
            (0_u32..8).prop_map(Op::Delete),
        ]
    }

    proptest! {
        #![proptest_config(Config::with_cases(128))]
        #[test]
        fn marker_invariant_holds(ops in proptest::collection::vec(op(), 0..40)) {
            let mut t = table();
            let mut next = 100_u32;
            for op in ops {
                match op {
                    Op::Add(_) => {
                        next += 1;
                        t.add_row(Row(next));
                    }
                    Op::Delete(n) => {
                        if !t.is_empty() {
                            let idx = n as usize % t.len();
                            let key = t.rows()[idx].row_key();
                            t.delete_row(&key);
                        }
                    }
                }
                let markers = marker_count(&t);
                let placeholders = placeholder_count(&t);
                if t.is_empty() {
                    prop_assert_eq!((markers, placeholders), (0, 1));
                } else {
                    prop_assert_eq!((markers, placeholders), (1, 0));
                    prop_assert_eq!(t.last_key(), t.rows().last().map(TableRow::row_key));
                }
            }
        }
    }
}
