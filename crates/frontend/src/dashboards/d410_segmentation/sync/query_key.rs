//! What each query group should fetch, derived from the current inputs.
//!
//! Pure values only. Two keys of the same group are "the same request" iff
//! they compare equal, which is the only staleness test used by the
//! orchestrator.

use contracts::dashboards::d410_segmentation::CustomersQuery;
use contracts::enums::Segment;
use std::fmt;
use thiserror::Error;

/// Rows per customer page, fixed for the session
pub const PAGE_SIZE: u32 = 20;

/// Opaque handle to one uploaded-and-processed dataset
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnalysisId(String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("analysis id must not be empty")]
pub struct EmptyAnalysisId;

impl AnalysisId {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, EmptyAnalysisId> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(EmptyAnalysisId);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AnalysisId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Key of the overview + marketing group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverviewKey {
    pub analysis_id: AnalysisId,
}

/// Key of the customer page group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerKey {
    pub analysis_id: AnalysisId,
    pub segment: Option<Segment>,
    pub page: u32,
    pub page_size: u32,
}

impl CustomerKey {
    pub fn skip(&self) -> u64 {
        u64::from(self.page) * u64::from(self.page_size)
    }

    pub fn limit(&self) -> u64 {
        u64::from(self.page_size)
    }

    pub fn to_query(&self) -> CustomersQuery {
        CustomersQuery {
            skip: self.skip(),
            limit: self.limit(),
            segment: self.segment,
        }
    }
}

/// UI inputs the two keys are derived from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardInputs {
    pub analysis_id: Option<AnalysisId>,
    pub segment: Option<Segment>,
    pub page: u32,
}

impl DashboardInputs {
    pub fn overview_key(&self) -> Option<OverviewKey> {
        self.analysis_id.clone().map(|analysis_id| OverviewKey { analysis_id })
    }

    pub fn customer_key(&self) -> Option<CustomerKey> {
        self.analysis_id.clone().map(|analysis_id| CustomerKey {
            analysis_id,
            segment: self.segment,
            page: self.page,
            page_size: PAGE_SIZE,
        })
    }

    /// A different dataset starts from an unfiltered first page
    pub fn with_analysis_id(&self, analysis_id: AnalysisId) -> Self {
        if self.analysis_id.as_ref() == Some(&analysis_id) {
            return self.clone();
        }
        Self {
            analysis_id: Some(analysis_id),
            segment: None,
            page: 0,
        }
    }

    /// Changing the filter always goes back to page 0
    pub fn with_segment(&self, segment: Option<Segment>) -> Self {
        if self.segment == segment {
            return self.clone();
        }
        Self {
            analysis_id: self.analysis_id.clone(),
            segment,
            page: 0,
        }
    }

    pub fn with_page(&self, page: u32) -> Self {
        Self {
            page,
            ..self.clone()
        }
    }
}
