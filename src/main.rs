use anyhow::{Context, Result};
use clap::{Arg, ArgAction, Command};
use serde::Serialize;

#[derive(Serialize)]
struct ScanReport {
    fen: String,
    lichess_url: String,
}

fn main() -> Result<()> {
    let matches = Command::new("fenscan")
        .version("0.1.0")
        .about("Recognizes a chessboard image and prints its FEN")
        .arg(
            Arg::new("image")
                .long("image")
                .value_name("PATH")
                .help("Path to the board image (JPEG or PNG)")
                .required(true),
        )
        .arg(
            Arg::new("model")
                .long("model")
                .value_name("PATH")
                .help("Path to the piece classifier ONNX model")
                .default_value("models/piece_classifier.onnx"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print the result as JSON")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let image_path = matches.get_one::<String>("image").unwrap(); // Safe: required
    let model_path = matches.get_one::<String>("model").unwrap(); // Safe due to default

    let fen = scan(image_path, model_path)
        .with_context(|| format!("Failed to recognize board from {}", image_path))?;
    let lichess_url = format!("https://lichess.org/editor/{}", fen.replace(' ', "_"));

    if matches.get_flag("json") {
        let report = ScanReport { fen, lichess_url };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Detected FEN: {}", fen);
        println!("Lichess editor: {}", lichess_url);
    }
    Ok(())
}

#[cfg(feature = "onnx")]
fn scan(image_path: &str, model_path: &str) -> Result<String> {
    let classifier = fenscan::OnnxClassifier::load(model_path)
        .with_context(|| format!("Failed to load model from {}", model_path))?;
    let scanner = fenscan::BoardScanner::new(classifier);
    Ok(scanner.scan_path(std::path::Path::new(image_path))?)
}

#[cfg(not(feature = "onnx"))]
fn scan(_image_path: &str, _model_path: &str) -> Result<String> {
    anyhow::bail!("fenscan was built without the 'onnx' feature; rebuild with `--features onnx` to run inference")
}
