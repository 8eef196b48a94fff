pub mod d410_segmentation;
