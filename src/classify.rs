//! Cell classifier adapter.
//! Wraps the pretrained piece classifier behind a uniform trait so the
//! pipeline never sees the inference backend. The ONNX adapter (behind the
//! `onnx` feature) owns the model session with an explicit load/unload
//! lifecycle; inference only proceeds between a successful load and unload.

use image::GrayImage;

use crate::error::ScanError;
use crate::label::{Label, NUM_CLASSES};

/// Classifies a single board cell. Implementations must be deterministic and
/// stateless per call: each cell is classified independently, with no
/// cross-cell state.
pub trait CellClassifier: Send + Sync {
    /// True once a model is loaded and inference can proceed.
    fn is_ready(&self) -> bool;

    /// Classifies one grayscale cell image into the 13-class label space.
    fn classify(&self, cell: &GrayImage) -> Result<Label, ScanError>;
}

/// Flattens a grayscale cell to the model's input layout: f32 values in
/// [0, 1], NHWC shape `[1, SQUARE_SIZE, SQUARE_SIZE, 1]`.
pub fn cell_to_input(cell: &GrayImage) -> Vec<f32> {
    cell.as_raw().iter().map(|&p| p as f32 / 255.0).collect()
}

/// Arg-max decision over the model's class scores, validating the output
/// contract first: exactly 13 scores, none of them NaN. Ties break toward
/// the lowest label index.
pub fn best_label(scores: &[f32]) -> Result<Label, ScanError> {
    if scores.len() != NUM_CLASSES {
        return Err(ScanError::Classification {
            reason: format!(
                "model returned {} class scores, expected {}",
                scores.len(),
                NUM_CLASSES
            ),
        });
    }
    if scores.iter().any(|s| s.is_nan()) {
        return Err(ScanError::Classification {
            reason: "model returned NaN scores".to_string(),
        });
    }

    let mut best = 0usize;
    for (i, &score) in scores.iter().enumerate().skip(1) {
        if score > scores[best] {
            best = i;
        }
    }
    Label::new(best).ok_or_else(|| ScanError::Classification {
        reason: format!("arg-max index {} outside the class space", best),
    })
}

#[cfg(feature = "onnx")]
pub use onnx::OnnxClassifier;

#[cfg(feature = "onnx")]
mod onnx {
    use super::*;
    use crate::grid::SQUARE_SIZE;
    use ort::session::{builder::GraphOptimizationLevel, Session};
    use std::sync::Mutex;

    /// ONNX Runtime backed piece classifier.
    ///
    /// The session lives behind a mutex holding an `Option`: `None` means not
    /// loaded. Unloading takes the same lock as inference, so it only
    /// completes after in-flight classifications have finished, and loading
    /// replaces the handle atomically. The loaded session itself is never
    /// mutated between load and unload.
    pub struct OnnxClassifier {
        session: Mutex<Option<Session>>,
    }

    impl OnnxClassifier {
        /// Creates an adapter with no model; `classify` fails until
        /// [`load_model`](Self::load_model) succeeds.
        pub fn unloaded() -> Self {
            OnnxClassifier {
                session: Mutex::new(None),
            }
        }

        /// Creates an adapter and loads the model from `path`.
        pub fn load(path: &str) -> Result<Self, ScanError> {
            let classifier = Self::unloaded();
            classifier.load_model(path)?;
            Ok(classifier)
        }

        /// Loads (or replaces) the model session from an ONNX file.
        pub fn load_model(&self, path: &str) -> Result<(), ScanError> {
            let session = Session::builder()
                .and_then(|b| b.with_optimization_level(GraphOptimizationLevel::Level3))
                .and_then(|b| b.with_intra_threads(4))
                .and_then(|b| b.commit_from_file(path))
                .map_err(|e| ScanError::ModelUnavailable {
                    reason: format!("failed to load ONNX model {}: {}", path, e),
                })?;
            *self.lock()? = Some(session);
            eprintln!("Loaded piece classifier model from {}", path);
            Ok(())
        }

        /// Drops the model session. Blocks until in-flight inference finishes.
        pub fn unload(&self) -> Result<(), ScanError> {
            *self.lock()? = None;
            Ok(())
        }

        fn lock(&self) -> Result<std::sync::MutexGuard<'_, Option<Session>>, ScanError> {
            self.session.lock().map_err(|_| ScanError::Classification {
                reason: "classifier lock poisoned".to_string(),
            })
        }
    }

    impl CellClassifier for OnnxClassifier {
        fn is_ready(&self) -> bool {
            self.session
                .lock()
                .map(|guard| guard.is_some())
                .unwrap_or(false)
        }

        fn classify(&self, cell: &GrayImage) -> Result<Label, ScanError> {
            use ort::value::Value;

            let mut guard = self.lock()?;
            let session = guard.as_mut().ok_or_else(|| ScanError::ModelUnavailable {
                reason: "no model loaded".to_string(),
            })?;

            let side = SQUARE_SIZE as usize;
            let input = cell_to_input(cell);
            let tensor = Value::from_array(([1usize, side, side, 1usize], input)).map_err(|e| {
                ScanError::Classification {
                    reason: format!("failed to build input tensor: {}", e),
                }
            })?;

            let outputs =
                session
                    .run(ort::inputs![tensor])
                    .map_err(|e| ScanError::Classification {
                        reason: format!("inference failed: {}", e),
                    })?;

            let (_shape, scores) = outputs[0].try_extract_tensor::<f32>().map_err(|e| {
                ScanError::Classification {
                    reason: format!("failed to read output tensor: {}", e),
                }
            })?;

            best_label(scores)
        }
    }
}
