//! fenscan: chessboard image to FEN recognition pipeline.
//!
//! Given a photograph or screenshot of a chessboard, the pipeline resizes it
//! to a fixed 400x400 grid, cuts it into 64 cells, classifies each cell's
//! occupant with a pretrained 13-class piece classifier, and run-length
//! encodes the result into the piece-placement field of a FEN string with a
//! fixed ` w KQkq - 0 1` suffix (side to move is not inferred).
//!
//! The classifier is injected behind the [`CellClassifier`] trait; the ONNX
//! Runtime backend lives behind the `onnx` cargo feature so the rest of the
//! crate builds and tests without the runtime installed.

pub mod batch;
pub mod classify;
pub mod error;
pub mod fen;
pub mod grid;
pub mod label;
pub mod pipeline;

pub use batch::classify_cells;
#[cfg(feature = "onnx")]
pub use classify::OnnxClassifier;
pub use classify::CellClassifier;
pub use error::{ScanError, Stage};
pub use fen::{FEN_SUFFIX, decode, encode};
pub use grid::{BOARD_SIZE, SQUARE_SIZE, slice_board};
pub use label::{CELL_COUNT, Label, LabelSequence, NUM_CLASSES};
pub use pipeline::BoardScanner;
