//! Grid slicer: partitions a normalized board image into 64 cell images.
//! Precondition: the input is already exactly `BOARD_SIZE` square; resizing is
//! the orchestrator's job. Anything else is rejected with a size mismatch
//! rather than silently truncating the last cells.

use image::GrayImage;
use image::imageops;

use crate::error::ScanError;
use crate::label::CELL_COUNT;

/// Side length of a normalized board image, in pixels.
pub const BOARD_SIZE: u32 = 400;

/// Side length of a single cell. `BOARD_SIZE` is a multiple of 8 by
/// construction, so the 8x8 grid covers the board with no gap or overlap.
pub const SQUARE_SIZE: u32 = BOARD_SIZE / 8;

/// Cuts a normalized grayscale board into 64 cells, row-major from the top
/// rank: the cell at index `rank * 8 + file` spans pixel rows
/// `[rank * S, (rank + 1) * S)` and columns `[file * S, (file + 1) * S)`.
pub fn slice_board(board: &GrayImage) -> Result<Vec<GrayImage>, ScanError> {
    let (width, height) = board.dimensions();
    if width != BOARD_SIZE || height != BOARD_SIZE {
        return Err(ScanError::SizeMismatch {
            width,
            height,
            expected: BOARD_SIZE,
        });
    }

    let mut cells = Vec::with_capacity(CELL_COUNT);
    for rank in 0..8u32 {
        for file in 0..8u32 {
            let cell = imageops::crop_imm(
                board,
                file * SQUARE_SIZE,
                rank * SQUARE_SIZE,
                SQUARE_SIZE,
                SQUARE_SIZE,
            );
            cells.push(cell.to_image());
        }
    }
    Ok(cells)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    /// Board where every pixel of the cell at index i has value i.
    fn indexed_board() -> GrayImage {
        GrayImage::from_fn(BOARD_SIZE, BOARD_SIZE, |x, y| {
            let rank = y / SQUARE_SIZE;
            let file = x / SQUARE_SIZE;
            Luma([(rank * 8 + file) as u8])
        })
    }

    #[test]
    fn test_slice_yields_64_cells_of_square_size() {
        let cells = slice_board(&indexed_board()).unwrap();
        assert_eq!(cells.len(), 64);
        for cell in &cells {
            assert_eq!(cell.dimensions(), (SQUARE_SIZE, SQUARE_SIZE));
        }
    }

    #[test]
    fn test_slice_order_is_row_major_top_rank_first() {
        let cells = slice_board(&indexed_board()).unwrap();
        for (i, cell) in cells.iter().enumerate() {
            // Every pixel of cell i came from the block painted with value i,
            // so the partition has no overlap and no gap.
            for pixel in cell.pixels() {
                assert_eq!(pixel[0] as usize, i);
            }
        }
    }

    #[test]
    fn test_slice_rejects_wrong_size() {
        let small = GrayImage::new(BOARD_SIZE - 1, BOARD_SIZE - 1);
        let err = slice_board(&small).unwrap_err();
        assert!(matches!(
            err,
            ScanError::SizeMismatch {
                width: 399,
                height: 399,
                expected: 400,
            }
        ));
    }

    #[test]
    fn test_slice_rejects_non_square() {
        let wide = GrayImage::new(BOARD_SIZE, BOARD_SIZE / 2);
        assert!(slice_board(&wide).is_err());
    }
}
