//! Batch inference driver: classifies all 64 cells in slicer order.
//! Readiness is checked once before the first cell, results are collected by
//! cell index, and any single-cell failure aborts the whole board. Whether
//! classification runs sequentially or fanned out is an internal choice; the
//! output order is always the slicer's row-major order.

use image::GrayImage;

use crate::classify::CellClassifier;
use crate::error::ScanError;
use crate::label::{CELL_COUNT, LabelSequence};

/// Runs the classifier over every cell, preserving index order.
/// Fail-all: an error on any cell returns without a partial board.
pub fn classify_cells(
    classifier: &dyn CellClassifier,
    cells: &[GrayImage],
) -> Result<LabelSequence, ScanError> {
    if !classifier.is_ready() {
        return Err(ScanError::ModelUnavailable {
            reason: "no model loaded".to_string(),
        });
    }
    if cells.len() != CELL_COUNT {
        return Err(ScanError::EncodingInvariant {
            reason: format!("expected {} cells from the slicer, got {}", CELL_COUNT, cells.len()),
        });
    }

    let mut labels = Vec::with_capacity(CELL_COUNT);
    for cell in cells {
        labels.push(classifier.classify(cell)?);
    }
    LabelSequence::new(labels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::Label;
    use image::Luma;

    /// Labels each cell by its top-left pixel value, modulo the class space.
    struct PixelClassifier {
        ready: bool,
    }

    impl CellClassifier for PixelClassifier {
        fn is_ready(&self) -> bool {
            self.ready
        }

        fn classify(&self, cell: &GrayImage) -> Result<Label, ScanError> {
            let value = cell.get_pixel(0, 0)[0] as usize;
            Label::new(value % 13).ok_or_else(|| ScanError::Classification {
                reason: "unreachable".to_string(),
            })
        }
    }

    /// Fails on one specific cell, succeeds elsewhere.
    struct FlakyClassifier {
        fail_on: u8,
    }

    impl CellClassifier for FlakyClassifier {
        fn is_ready(&self) -> bool {
            true
        }

        fn classify(&self, cell: &GrayImage) -> Result<Label, ScanError> {
            if cell.get_pixel(0, 0)[0] == self.fail_on {
                Err(ScanError::Classification {
                    reason: "glare on this square".to_string(),
                })
            } else {
                Ok(Label::EMPTY)
            }
        }
    }

    fn cells_with_values(values: impl Iterator<Item = u8>) -> Vec<GrayImage> {
        values
            .map(|v| GrayImage::from_pixel(1, 1, Luma([v])))
            .collect()
    }

    #[test]
    fn test_unready_classifier_fails_before_any_cell() {
        let classifier = PixelClassifier { ready: false };
        let cells = cells_with_values(0..64);
        let err = classify_cells(&classifier, &cells).unwrap_err();
        assert!(matches!(err, ScanError::ModelUnavailable { .. }));
    }

    #[test]
    fn test_wrong_cell_count_is_an_invariant_violation() {
        let classifier = PixelClassifier { ready: true };
        let cells = cells_with_values(0..63);
        let err = classify_cells(&classifier, &cells).unwrap_err();
        assert!(matches!(err, ScanError::EncodingInvariant { .. }));
    }

    #[test]
    fn test_labels_preserve_cell_order() {
        let classifier = PixelClassifier { ready: true };
        let cells = cells_with_values(0..64);
        let labels = classify_cells(&classifier, &cells).unwrap();
        for (i, label) in labels.as_slice().iter().enumerate() {
            assert_eq!(label.index(), i % 13);
        }
    }

    #[test]
    fn test_single_cell_failure_aborts_the_board() {
        let classifier = FlakyClassifier { fail_on: 42 };
        let cells = cells_with_values(0..64);
        let err = classify_cells(&classifier, &cells).unwrap_err();
        assert!(matches!(err, ScanError::Classification { .. }));
    }
}
