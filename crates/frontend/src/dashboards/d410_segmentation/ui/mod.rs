mod customers;
pub mod dashboard;
pub mod display;
mod marketing;
pub mod state;

pub use dashboard::SegmentationDashboard;
