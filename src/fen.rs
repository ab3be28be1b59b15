//! FEN piece-placement encoding: 64 ordered labels to the board-layout field
//! of a FEN string, with run-length compression of consecutive empty squares.
//! The decoder exists to state the round-trip law `decode(encode(l)) == l`.

use crate::error::ScanError;
use crate::label::{Label, LabelSequence};

/// Metadata suffix appended by the orchestrator. A declared default, not
/// inferred from the image: White to move, full castling rights.
pub const FEN_SUFFIX: &str = " w KQkq - 0 1";

/// Encodes a label sequence into the FEN piece-placement field: 8 rank fields
/// separated by `/`, top rank first, runs of empty squares as decimal digits.
pub fn encode(labels: &LabelSequence) -> String {
    let mut fen = String::with_capacity(71);
    for rank in 0..8 {
        if rank > 0 {
            fen.push('/');
        }
        let mut empty_run = 0u32;
        for file in 0..8 {
            match labels.at(rank, file).piece_char() {
                None => empty_run += 1,
                Some(c) => {
                    if empty_run > 0 {
                        fen.push_str(&empty_run.to_string());
                        empty_run = 0;
                    }
                    fen.push(c);
                }
            }
        }
        if empty_run > 0 {
            fen.push_str(&empty_run.to_string());
        }
    }
    fen
}

/// Parses a piece-placement field back into 64 labels, expanding digits into
/// runs of empty squares. Rejects anything that does not describe exactly
/// 8 ranks of 8 squares.
pub fn decode(placement: &str) -> Result<LabelSequence, ScanError> {
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(ScanError::EncodingInvariant {
            reason: format!("expected 8 ranks, got {}", ranks.len()),
        });
    }

    let mut labels = Vec::with_capacity(64);
    for (i, rank) in ranks.iter().enumerate() {
        let start = labels.len();
        for c in rank.chars() {
            if let Some(run) = c.to_digit(10) {
                if run < 1 || run > 8 {
                    return Err(ScanError::EncodingInvariant {
                        reason: format!("invalid empty run '{}' in rank {}", c, i),
                    });
                }
                labels.extend(std::iter::repeat_n(Label::EMPTY, run as usize));
            } else {
                let label =
                    Label::from_piece_char(c).ok_or_else(|| ScanError::EncodingInvariant {
                        reason: format!("invalid piece character '{}' in rank {}", c, i),
                    })?;
                labels.push(label);
            }
        }
        if labels.len() - start != 8 {
            return Err(ScanError::EncodingInvariant {
                reason: format!("rank {} describes {} squares, expected 8", i, labels.len() - start),
            });
        }
    }
    LabelSequence::new(labels)
}
