// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use std::process;
use std::time::Instant;

use crate::cli::args::CollectArgs;
use crate::error::{CollectError, Result};
use crate::joints::Joint;
use crate::pipeline::CollectConfig;
use crate::skeleton::JointSelection;
use crate::source::VideoSource;
use crate::{error, pipeline, verbose, warn};

/// Parse the `--joints` argument into a selection.
///
/// Accepts `all` or a comma-separated list of snake_case joint names. An
/// empty list is accepted and produces a zero-column table.
///
/// # Errors
///
/// Returns [`CollectError::ConfigError`] for unknown joint names.
pub fn parse_selection(spec: &str) -> Result<JointSelection> {
    let spec = spec.trim();
    if spec.eq_ignore_ascii_case("all") {
        return Ok(JointSelection::all());
    }
    if spec.is_empty() {
        return Ok(JointSelection::new());
    }

    spec.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| {
            name.parse::<Joint>()
                .map_err(|e| CollectError::ConfigError(e.to_string()))
        })
        .collect()
}

/// Run joint collection from the CLI.
pub fn run_collection(args: &CollectArgs) {
    crate::cli::logging::set_verbose(args.verbose);

    let selection = match parse_selection(&args.joints) {
        Ok(s) => s,
        Err(e) => {
            error!("{e}");
            process::exit(1);
        }
    };
    if selection.is_empty() {
        warn!("Empty joint selection; the output table will have no columns.");
    }

    let config = CollectConfig::new()
        .with_mirrored(args.mirror)
        .with_multiplier(args.multiplier)
        .with_skip_incomplete(args.skip_incomplete);

    let source = match VideoSource::open(&args.source) {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to open {}: {e}", args.source);
            process::exit(1);
        }
    };

    verbose!(
        "Collecting {} of {} joints from {}",
        selection.len(),
        Joint::CATALOG.len(),
        args.source
    );

    let started = Instant::now();
    let result = run_with_engine(args, source, &selection, &config);

    match result {
        Ok((rows, columns)) => {
            crate::success!(
                "Saved {rows} frames x {columns} columns to {} in {:.1}s",
                args.output,
                started.elapsed().as_secs_f64()
            );
        }
        Err(e) => {
            error!("{e}");
            process::exit(1);
        }
    }
}

#[cfg(feature = "onnx")]
fn run_with_engine(
    args: &CollectArgs,
    source: VideoSource,
    selection: &JointSelection,
    config: &CollectConfig,
) -> Result<(usize, usize)> {
    let Some(model_path) = args.model.as_deref() else {
        return Err(CollectError::ConfigError(
            "--model is required to run the bundled ONNX pose engine".to_string(),
        ));
    };
    let engine = crate::onnx::OnnxPoseEngine::load(model_path)?;
    let table = pipeline::run(source, engine, selection, config, &args.output)?;
    Ok((table.num_rows(), table.num_columns()))
}

#[cfg(not(feature = "onnx"))]
fn run_with_engine(
    args: &CollectArgs,
    _source: VideoSource,
    _selection: &JointSelection,
    _config: &CollectConfig,
) -> Result<(usize, usize)> {
    let _ = &args.model;
    Err(CollectError::FeatureNotEnabled(
        "The CLI needs a pose engine; compile with --features onnx".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_selection_all() {
        let selection = parse_selection("all").unwrap();
        assert_eq!(selection.len(), Joint::CATALOG.len());
    }

    #[test]
    fn test_parse_selection_list() {
        let selection = parse_selection("root, nose,left_wrist").unwrap();
        assert_eq!(selection.len(), 3);
        assert!(selection.contains(Joint::Root));
        assert!(selection.contains(Joint::Nose));
        assert!(selection.contains(Joint::LeftWrist));
    }

    #[test]
    fn test_parse_selection_empty() {
        assert!(parse_selection("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_selection_unknown_joint() {
        let result = parse_selection("root,tail");
        assert!(matches!(result, Err(CollectError::ConfigError(_))));
    }
}
