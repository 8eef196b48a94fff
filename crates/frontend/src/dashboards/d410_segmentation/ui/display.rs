//! Display helpers shared by the dashboard sections.

use crate::shared::date_utils::format_date;
use contracts::dashboards::d410_segmentation::{CustomerRow, Overview};
use contracts::enums::Segment;

/// Brand colour of a segment
pub fn segment_color(segment: Segment) -> &'static str {
    match segment {
        Segment::Business => "#0ea5e9",
        Segment::Leisure => "#22c55e",
        Segment::Coppia => "#ec4899",
        Segment::Famiglia => "#f59e0b",
        Segment::Premium => "#8b5cf6",
    }
}

/// Badge style: translucent background, solid text. `alpha` is a 2-digit hex.
pub fn segment_badge_style(segment: Segment, alpha: &str) -> String {
    let color = segment_color(segment);
    format!("background-color: {}{}; color: {};", color, alpha, color)
}

/// Segments offered by the table filter, in the order the overview lists them
pub fn filter_options(overview: Option<&Overview>) -> Vec<Segment> {
    match overview {
        Some(overview) if !overview.segment_distribution.is_empty() => overview
            .segment_distribution
            .iter()
            .map(|stat| stat.segment)
            .collect(),
        _ => Segment::all(),
    }
}

/// Value of the filter `<select>` ("" = all segments)
pub fn filter_value(segment: Option<Segment>) -> String {
    segment.map(|s| s.code().to_string()).unwrap_or_default()
}

pub fn parse_filter_value(value: &str) -> Option<Segment> {
    Segment::from_code(value)
}

/// 1-based number shown in the first column
pub fn row_number(row: &CustomerRow) -> u64 {
    row.row_index + 1
}

/// Name, then client id, then "-"
pub fn customer_display_name(row: &CustomerRow) -> String {
    row.nome_cliente
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .or_else(|| row.cliente_id.as_deref().filter(|s| !s.trim().is_empty()))
        .unwrap_or("-")
        .to_string()
}

/// Scores as `B/L/C/F/P`
pub fn score_summary(row: &CustomerRow) -> String {
    Segment::all()
        .into_iter()
        .map(|segment| row.score(segment).to_string())
        .collect::<Vec<_>>()
        .join("/")
}

pub fn optional_int(value: Option<i64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

pub fn optional_text(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => "-".to_string(),
    }
}

pub fn arrival_date(row: &CustomerRow) -> String {
    row.data_arrivo
        .as_deref()
        .map_or_else(|| "-".to_string(), format_date)
}

/// Pre-rendered cells of one customer table row
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerCells {
    pub number: u64,
    pub name: String,
    pub segment: Segment,
    pub arrival: String,
    pub nights: String,
    pub guests: String,
    pub channel: String,
    pub weekday: String,
    pub history: String,
    pub spesa_media: Option<f64>,
    pub revenue: Option<f64>,
    pub scores: String,
}

pub fn customer_cells(row: &CustomerRow) -> CustomerCells {
    CustomerCells {
        number: row_number(row),
        name: customer_display_name(row),
        segment: row.segment,
        arrival: arrival_date(row),
        nights: optional_int(row.numero_notti),
        guests: optional_int(row.numero_ospiti),
        channel: optional_text(row.canale.as_deref()),
        weekday: optional_text(row.giorno_arrivo.as_deref()),
        history: optional_int(row.storico_soggiorni),
        spesa_media: row.spesa_media,
        revenue: row.revenue,
        scores: score_summary(row),
    }
}

/// Width of a distribution bar, clamped to 0..=100
pub fn share_width(percentuale: f64) -> String {
    let pct = if percentuale.is_finite() {
        percentuale.clamp(0.0, 100.0)
    } else {
        0.0
    };
    format!("width: {:.1}%;", pct)
}
