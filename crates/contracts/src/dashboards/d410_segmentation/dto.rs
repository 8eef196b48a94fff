use crate::enums::Segment;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// KPI overview of one analysis (`GET /api/analysis/{id}/overview`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Overview {
    pub total_arrivals: u64,
    pub total_revenue: f64,
    pub adr_medio_generale: f64,
    pub valore_cliente_medio_generale: f64,
    /// One entry per segment, in the order the engine reports them
    pub segment_distribution: Vec<SegmentStat>,
}

/// Per-segment aggregate inside [`Overview`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentStat {
    pub segment: Segment,
    pub count: u64,
    /// Share of arrivals, 0..=100
    pub percentuale: f64,
    pub adr_medio: f64,
    pub revenue_totale: f64,
    pub valore_cliente_medio: f64,
}

/// Marketing intelligence (`GET /api/analysis/{id}/marketing`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marketing {
    pub segmenti: Vec<MarketingSegment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketingSegment {
    pub segment: Segment,
    pub count: u64,
    pub revenue_attuale: f64,
    pub revenue_potenziale_stimata: f64,
    /// Historical conversion rate, 0..=1
    pub conversion_rate_storico: f64,
    pub roi_stimato: f64,
    #[serde(default)]
    pub campagne: Vec<Campaign>,
}

/// Suggested campaign for a segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    pub titolo: String,
    pub descrizione: String,
    pub tipo: String,
}

/// Single row of the customer table (`GET /api/analysis/{id}/customers`)
///
/// Descriptive fields come straight from the uploaded file, so any of them
/// may be missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRow {
    /// Ordinal of the row in the uploaded dataset (0-based)
    pub row_index: u64,
    pub segment: Segment,
    /// Score per segment, keyed by [`Segment::score_key`]
    #[serde(default)]
    pub scores: BTreeMap<String, i64>,
    pub numero_notti: Option<i64>,
    pub numero_ospiti: Option<i64>,
    pub canale: Option<String>,
    pub giorno_arrivo: Option<String>,
    pub storico_soggiorni: Option<i64>,
    pub spesa_media: Option<f64>,
    pub cliente_id: Option<String>,
    pub nome_cliente: Option<String>,
    pub data_arrivo: Option<String>,
    pub categoria_camera: Option<String>,
    pub revenue: Option<f64>,
}

impl CustomerRow {
    /// Score for a segment, 0 when the engine did not report one
    pub fn score(&self, segment: Segment) -> i64 {
        self.scores.get(segment.score_key()).copied().unwrap_or(0)
    }
}

/// Query parameters of the customers endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomersQuery {
    pub skip: u64,
    pub limit: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segment: Option<Segment>,
}

/// Error body returned by the analysis service (`{"detail": "..."}`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: Option<String>,
}
