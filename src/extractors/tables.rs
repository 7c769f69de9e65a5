// src/extractors/tables.rs
//
// Row and table shapes shared by several sections of the profile page.
use once_cell::sync::Lazy;
use scraper::{ElementRef, Selector};

use crate::extractors::document::{
    child_elements, first_child_match, second_child_match, trimmed_text, ParsedDocument,
};
use crate::extractors::records::{FlatRecord, NestedRecord};

static SPAN_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("span").expect("Failed to compile SPAN_SELECTOR"));
static THEAD_CELL_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("thead th").expect("Failed to compile THEAD_CELL_SELECTOR"));
static TBODY_ROW_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("tbody tr").expect("Failed to compile TBODY_ROW_SELECTOR"));
static DIV_ROW_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.row").expect("Failed to compile DIV_ROW_SELECTOR"));

/// How a statistics block lays out its header and body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableLayout {
    /// A real `<table>` with `thead th` headers and `tbody tr` rows.
    Table,
    /// `div.row` blocks; the first row carries the headers.
    Divs,
}

/// Label/value from the first two `span`s of a row.
pub(crate) fn span_pair(row: ElementRef<'_>) -> Option<(String, String)> {
    let mut spans = row.select(&SPAN_SELECTOR);
    let label = trimmed_text(spans.next()?);
    let value = trimmed_text(spans.next()?);
    non_empty_label(label, value)
}

/// Label/value from the first- and second-child descendants of a row.
pub(crate) fn child_pair(row: ElementRef<'_>) -> Option<(String, String)> {
    let label = trimmed_text(first_child_match(row)?);
    let value = trimmed_text(second_child_match(row)?);
    non_empty_label(label, value)
}

fn non_empty_label(label: String, value: String) -> Option<(String, String)> {
    if label.is_empty() {
        None
    } else {
        Some((label, value))
    }
}

/// Collects `child_pair` over `rows`; later duplicates win, unreadable rows are skipped.
pub(crate) fn pair_rows<'a, I>(rows: I) -> FlatRecord
where
    I: IntoIterator<Item = ElementRef<'a>>,
{
    rows.into_iter().filter_map(child_pair).collect()
}

/// Finds the element with `id` and reads it as a statistics table.
pub(crate) fn stats_table(doc: &ParsedDocument, id: &str, layout: TableLayout) -> NestedRecord {
    let selector = match Selector::parse(&format!("#{}", id)) {
        Ok(selector) => selector,
        Err(e) => {
            tracing::error!("Invalid table id {:?}: {:?}", id, e);
            return NestedRecord::new();
        }
    };
    let Some(container) = doc.find(&selector) else {
        tracing::debug!("Statistics block #{} not present", id);
        return NestedRecord::new();
    };

    match layout {
        TableLayout::Table => thead_tbody(container),
        TableLayout::Divs => div_rows(container),
    }
}

fn thead_tbody(container: ElementRef<'_>) -> NestedRecord {
    let headers: Vec<String> = container.select(&THEAD_CELL_SELECTOR).map(trimmed_text).collect();
    let rows = container
        .select(&TBODY_ROW_SELECTOR)
        .map(|tr| child_elements(tr).map(trimmed_text).collect::<Vec<_>>());
    label_columns(&headers, rows)
}

fn div_rows(container: ElementRef<'_>) -> NestedRecord {
    let mut rows = container
        .select(&DIV_ROW_SELECTOR)
        .filter(|row| !is_nested_row(*row, container))
        .map(|row| child_elements(row).map(trimmed_text).collect::<Vec<_>>());

    let Some(headers) = rows.next() else {
        return NestedRecord::new();
    };
    label_columns(&headers, rows)
}

/// True when `row` sits inside another `.row` below `container`.
fn is_nested_row(row: ElementRef<'_>, container: ElementRef<'_>) -> bool {
    row.ancestors()
        .filter_map(ElementRef::wrap)
        .take_while(|ancestor| ancestor.id() != container.id())
        .any(|ancestor| ancestor.value().classes().any(|class| class == "row"))
}

/// Maps each row's first cell to `{header[i]: cell[i]}` for the remaining columns.
fn label_columns<I>(headers: &[String], rows: I) -> NestedRecord
where
    I: IntoIterator<Item = Vec<String>>,
{
    let mut table = NestedRecord::new();
    for cells in rows {
        let Some((label, values)) = cells.split_first() else {
            continue;
        };
        if label.is_empty() {
            continue;
        }
        let columns: FlatRecord = headers
            .iter()
            .skip(1)
            .zip(values)
            .map(|(header, value)| (header.clone(), value.clone()))
            .collect();
        if columns.is_empty() {
            continue;
        }
        table.insert(label.clone(), columns);
    }
    table
}
