pub mod controller;
pub mod orchestrator;
pub mod query_key;
pub mod store;

pub use controller::DashboardController;
pub use orchestrator::{LeptosSpawner, Spawner, ANALYSIS_NOT_FOUND};
pub use query_key::{AnalysisId, CustomerKey, DashboardInputs, OverviewKey, PAGE_SIZE};
pub use store::{DashboardSnapshot, OverviewBundle, Slice, ViewStateStore};
