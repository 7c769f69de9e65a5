// src/extractors/exposure.rs
use once_cell::sync::Lazy;
use scraper::{ElementRef, Selector};
use serde::Deserialize;

use crate::extractors::document::ParsedDocument;
use crate::extractors::records::{ChartBreakdown, ChartSegments, Exposure};

static CHART_TABLE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("table.chart.base-table").expect("Failed to compile CHART_TABLE_SELECTOR")
});

/// One slice of a chart as embedded in `data-chart-series`.
#[derive(Debug, Deserialize)]
struct SeriesPoint {
    name: String,
    #[serde(default)]
    data: Vec<serde_json::Value>,
}

/// Region, country and sector breakdowns read from the chart tables' metadata.
///
/// Each chart maps its segment names to their first data point. Pages without
/// any chart table yield [`Exposure::not_found`].
pub fn exposure(doc: &ParsedDocument) -> Exposure {
    let tables: Vec<ElementRef<'_>> = doc.html().select(&CHART_TABLE_SELECTOR).collect();
    if tables.is_empty() {
        tracing::debug!("No exposure charts on page");
        return Exposure::not_found();
    }

    let mut charts = ChartBreakdown::new();
    for table in tables {
        match read_chart(table) {
            Ok((title, segments)) => {
                charts.insert(title, segments);
            }
            Err(reason) => tracing::warn!("Skipping exposure chart: {}", reason),
        }
    }
    Exposure::Charts(charts)
}

fn read_chart(table: ElementRef<'_>) -> Result<(String, ChartSegments), String> {
    let title = table
        .value()
        .attr("data-title")
        .ok_or("missing data-title")?
        .replace("<br>", " ");
    let raw_series = table
        .value()
        .attr("data-chart-series")
        .ok_or_else(|| format!("chart {:?} has no data-chart-series", title))?;
    let series: Vec<SeriesPoint> = serde_json::from_str(raw_series)
        .map_err(|e| format!("chart {:?} has unreadable series: {}", title, e))?;

    let segments = series
        .into_iter()
        .filter_map(|point| {
            let first = point.data.into_iter().next()?;
            Some((point.name, first))
        })
        .collect();
    Ok((title, segments))
}
