//! Error taxonomy for the board recognition pipeline.
//! Every error identifies the pipeline stage it originated from; nothing is
//! retried inside the library. Retry policy belongs to the caller.

use thiserror::Error;

/// Pipeline stage, reported alongside every failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    /// Reading and decoding the input image.
    Load,
    /// Resizing to the fixed board size and converting to grayscale.
    Normalize,
    /// Partitioning the board into 64 cells.
    Slice,
    /// Per-cell piece classification.
    Classify,
    /// FEN run-length encoding of the label sequence.
    Encode,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::Load => "load",
            Stage::Normalize => "normalize",
            Stage::Slice => "slice",
            Stage::Classify => "classify",
            Stage::Encode => "encode",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Error)]
pub enum ScanError {
    /// Unreadable or unsupported input image. Not retryable with the same bytes.
    #[error("unreadable board image: {reason}")]
    Input { reason: String },

    /// The image handed to the slicer is not the fixed board size, so it cannot
    /// be divided into an 8x8 grid of equal cells.
    #[error("board image is {width}x{height}, expected {expected}x{expected}")]
    SizeMismatch {
        width: u32,
        height: u32,
        expected: u32,
    },

    /// The piece classifier has no loaded model. A service-readiness failure,
    /// distinct from per-request errors: retry only after the model is loaded.
    #[error("piece classifier is not available: {reason}")]
    ModelUnavailable { reason: String },

    /// Inference failed or returned output that violates the 13-class contract
    /// (wrong score count, NaN scores). The whole board is aborted; a partially
    /// labeled board is never returned.
    #[error("piece classification failed: {reason}")]
    Classification { reason: String },

    /// Internal consistency violation (e.g. fewer than 64 labels reached the
    /// encoder). Indicates an upstream defect; always fatal.
    #[error("encoding invariant violated: {reason}")]
    EncodingInvariant { reason: String },
}

impl ScanError {
    /// The pipeline stage this error originated from.
    pub fn stage(&self) -> Stage {
        match self {
            ScanError::Input { .. } => Stage::Load,
            ScanError::SizeMismatch { .. } => Stage::Slice,
            ScanError::ModelUnavailable { .. } | ScanError::Classification { .. } => {
                Stage::Classify
            }
            ScanError::EncodingInvariant { .. } => Stage::Encode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errors_report_their_stage() {
        let err = ScanError::Input {
            reason: "not an image".to_string(),
        };
        assert_eq!(err.stage(), Stage::Load);

        let err = ScanError::SizeMismatch {
            width: 399,
            height: 400,
            expected: 400,
        };
        assert_eq!(err.stage(), Stage::Slice);

        let err = ScanError::ModelUnavailable {
            reason: "no model loaded".to_string(),
        };
        assert_eq!(err.stage(), Stage::Classify);
    }

    #[test]
    fn test_error_messages_include_dimensions() {
        let err = ScanError::SizeMismatch {
            width: 399,
            height: 401,
            expected: 400,
        };
        let msg = err.to_string();
        assert!(msg.contains("399x401"));
        assert!(msg.contains("400x400"));
    }
}
