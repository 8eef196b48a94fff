use crate::dashboards::d410_segmentation::sync::AnalysisId;
use crate::dashboards::SegmentationDashboard;
use leptos::prelude::*;
use std::collections::HashMap;
use web_sys::window;

const DASHBOARD_PATH: &str = "/dashboard/";

#[component]
pub fn App() -> impl IntoView {
    let analysis_id = RwSignal::new(current_analysis_id());
    if analysis_id.with_untracked(|id| id.is_none()) {
        log::warn!("No analysis id in the current URL");
    }

    view! {
        <SegmentationDashboard analysis_id=analysis_id />
    }
}

fn current_analysis_id() -> Option<AnalysisId> {
    let location = window()?.location();
    let pathname = location.pathname().unwrap_or_default();
    let search = location.search().unwrap_or_default();
    analysis_id_from_location(&pathname, &search)
}

/// Analysis id from `?id=...`, falling back to `/dashboard/{id}`
pub fn analysis_id_from_location(pathname: &str, search: &str) -> Option<AnalysisId> {
    let params: HashMap<String, String> =
        serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default();
    if let Some(id) = params.get("id").and_then(|raw| AnalysisId::new(raw).ok()) {
        return Some(id);
    }

    let tail = pathname.strip_prefix(DASHBOARD_PATH)?;
    let segment = tail.split('/').next().unwrap_or_default();
    let decoded = urlencoding::decode(segment).ok()?;
    AnalysisId::new(decoded.as_ref()).ok()
}
