//! Cell occupancy labels: the fixed 13-class contract between the trained
//! classifier and the FEN encoder.
//! Class 0 is an empty square; 1..=6 are the white pieces P N B R Q K and
//! 7..=12 the black pieces p n b r q k. This ordering matches the artifact
//! the model was trained with; changing it would break decoding silently, so
//! label construction is validated rather than assumed.

use crate::error::ScanError;

/// Number of classes in the classifier's output distribution.
pub const NUM_CLASSES: usize = 13;

/// Number of cells on a board, and the required length of a [`LabelSequence`].
pub const CELL_COUNT: usize = 64;

/// FEN piece characters indexed by `label - 1` (label 0 is empty).
const PIECE_CHARS: [char; NUM_CLASSES - 1] =
    ['P', 'N', 'B', 'R', 'Q', 'K', 'p', 'n', 'b', 'r', 'q', 'k'];

/// A single cell's classified occupant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Label(u8);

impl Label {
    pub const EMPTY: Label = Label(0);

    /// Builds a label from a class index. Returns None if the index is outside
    /// the 13-class space.
    pub fn new(index: usize) -> Option<Label> {
        if index < NUM_CLASSES {
            Some(Label(index as u8))
        } else {
            None
        }
    }

    /// Builds a label from a FEN piece character (`PNBRQKpnbrqk`).
    pub fn from_piece_char(c: char) -> Option<Label> {
        PIECE_CHARS
            .iter()
            .position(|&p| p == c)
            .map(|i| Label(i as u8 + 1))
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// The FEN character for this label; None for an empty square.
    pub fn piece_char(self) -> Option<char> {
        if self.is_empty() {
            None
        } else {
            Some(PIECE_CHARS[self.0 as usize - 1])
        }
    }
}

/// Exactly 64 labels in row-major board order: index = rank_from_top * 8 +
/// file_from_left, matching the slicer's cell order. Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabelSequence([Label; CELL_COUNT]);

impl LabelSequence {
    /// Wraps a vector of labels, rejecting anything other than exactly 64.
    pub fn new(labels: Vec<Label>) -> Result<LabelSequence, ScanError> {
        let len = labels.len();
        labels
            .try_into()
            .map(LabelSequence)
            .map_err(|_| ScanError::EncodingInvariant {
                reason: format!("expected {} labels, got {}", CELL_COUNT, len),
            })
    }

    /// Convenience constructor from raw class indices.
    pub fn from_indices(indices: &[usize]) -> Result<LabelSequence, ScanError> {
        let labels = indices
            .iter()
            .map(|&i| {
                Label::new(i).ok_or_else(|| ScanError::EncodingInvariant {
                    reason: format!("class index {} outside the {}-class space", i, NUM_CLASSES),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        LabelSequence::new(labels)
    }

    /// The label at a rank (0 = top) and file (0 = leftmost).
    pub fn at(&self, rank: usize, file: usize) -> Label {
        self.0[rank * 8 + file]
    }

    pub fn as_slice(&self) -> &[Label] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_char_mapping_is_bijective() {
        for index in 1..NUM_CLASSES {
            let label = Label::new(index).unwrap();
            let c = label.piece_char().unwrap();
            assert_eq!(Label::from_piece_char(c), Some(label));
        }
        assert_eq!(Label::EMPTY.piece_char(), None);
    }

    #[test]
    fn test_white_pieces_are_uppercase() {
        for index in 1..=6 {
            let c = Label::new(index).unwrap().piece_char().unwrap();
            assert!(c.is_ascii_uppercase(), "label {} maps to '{}'", index, c);
        }
        for index in 7..=12 {
            let c = Label::new(index).unwrap().piece_char().unwrap();
            assert!(c.is_ascii_lowercase(), "label {} maps to '{}'", index, c);
        }
    }

    #[test]
    fn test_label_rejects_out_of_range_index() {
        assert!(Label::new(NUM_CLASSES).is_none());
        assert!(Label::from_piece_char('x').is_none());
    }

    #[test]
    fn test_sequence_requires_exactly_64_labels() {
        let err = LabelSequence::new(vec![Label::EMPTY; 63]).unwrap_err();
        assert!(matches!(err, ScanError::EncodingInvariant { .. }));
        assert!(LabelSequence::new(vec![Label::EMPTY; 64]).is_ok());
    }

    #[test]
    fn test_sequence_indexing_is_row_major() {
        let mut indices = vec![0usize; 64];
        indices[2 * 8 + 5] = 4; // white rook at rank 2, file 5
        let seq = LabelSequence::from_indices(&indices).unwrap();
        assert_eq!(seq.at(2, 5).piece_char(), Some('R'));
        assert!(seq.at(2, 4).is_empty());
    }
}
