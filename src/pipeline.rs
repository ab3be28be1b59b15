//! Pipeline orchestrator: board image in, FEN string out.
//! Stages run linearly (load, normalize, slice, classify, encode) with no
//! automatic retry; the first failure aborts the request and names its stage.
//! A scanner is stateless across invocations apart from the injected
//! classifier's loaded-model handle, so one scanner can serve concurrent
//! requests against the same model.

use std::path::Path;
use std::time::Instant;

use image::DynamicImage;
use image::GrayImage;
use image::imageops::FilterType;

use crate::batch;
use crate::classify::CellClassifier;
use crate::error::ScanError;
use crate::fen::{self, FEN_SUFFIX};
use crate::grid::{self, BOARD_SIZE};

/// End-to-end board scanner. Owns the classifier it was constructed with;
/// share the scanner (not the classifier) to process images concurrently.
pub struct BoardScanner<C> {
    classifier: C,
}

impl<C: CellClassifier> BoardScanner<C> {
    pub fn new(classifier: C) -> Self {
        BoardScanner { classifier }
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    /// Reads an image file and scans it. See [`scan_bytes`](Self::scan_bytes).
    pub fn scan_path(&self, path: &Path) -> Result<String, ScanError> {
        let bytes = std::fs::read(path).map_err(|e| ScanError::Input {
            reason: format!("{}: {}", path.display(), e),
        })?;
        self.scan_bytes(&bytes)
    }

    /// Scans an encoded image (any resolution, color or grayscale) and returns
    /// the full FEN string. The metadata suffix is the fixed default from
    /// [`FEN_SUFFIX`]; side to move and castling rights are not inferred.
    pub fn scan_bytes(&self, bytes: &[u8]) -> Result<String, ScanError> {
        let start = Instant::now();

        let decoded = image::load_from_memory(bytes).map_err(|e| ScanError::Input {
            reason: e.to_string(),
        })?;
        let board = normalize(&decoded);
        let cells = grid::slice_board(&board)?;
        let labels = batch::classify_cells(&self.classifier, &cells)?;
        let fen = format!("{}{}", fen::encode(&labels), FEN_SUFFIX);

        // The encoder builds the string itself, so a syntax failure here is an
        // internal defect, not bad input.
        shakmaty::fen::Fen::from_ascii(fen.as_bytes()).map_err(|e| {
            ScanError::EncodingInvariant {
                reason: format!("produced invalid FEN '{}': {}", fen, e),
            }
        })?;

        eprintln!("Board scan latency: {:?}", start.elapsed());
        Ok(fen)
    }
}

/// Resizes to the fixed board size, discarding aspect ratio so the 8x8
/// slicing grid lines up, then converts to grayscale for the classifier.
fn normalize(image: &DynamicImage) -> GrayImage {
    image
        .resize_exact(BOARD_SIZE, BOARD_SIZE, FilterType::Triangle)
        .to_luma8()
}
