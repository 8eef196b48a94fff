pub mod d410_segmentation;

pub use d410_segmentation::ui::SegmentationDashboard;
