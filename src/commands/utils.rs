use std::path::{Path, PathBuf};

use log::{info, warn};
use singleline::{SinglelineError, SinglelineResult, StrokeExtractor};

use crate::cli::RasterArgs;
use crate::report::report_error;

/// The convenience function to build a StrokeExtractor from the shared raster args.
pub fn build_extractor(raster: &RasterArgs) -> StrokeExtractor {
    StrokeExtractor::new()
        .with_raster(raster.into())
        .with_trace(raster.into())
}

/// Run `f` on every input. A failing input is reported and skipped; the batch
/// fails only when no input succeeded.
pub fn for_each_input<F>(inputs: &[PathBuf], mut f: F) -> SinglelineResult<()>
where
    F: FnMut(&Path) -> SinglelineResult<()>,
{
    let mut failed = 0;
    for input in inputs {
        info!("processing {}", input.display());
        if let Err(err) = f(input) {
            warn!("skipping {}", input.display());
            report_error(input, &err);
            failed += 1;
        }
    }

    if failed > 0 && failed == inputs.len() {
        Err(SinglelineError::AllInputsFailed { failed })
    } else {
        Ok(())
    }
}

/// Derive a variant file path by appending a suffix before the extension,
/// placed in `output_dir` when one is given.
pub fn derive_variant_path(
    input: &Path,
    output_dir: Option<&Path>,
    suffix: &str,
    extension: &str,
) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| suffix.to_string());
    let filename = format!("{}-{}.{}", stem, suffix, extension);
    match output_dir {
        Some(dir) => dir.join(filename),
        None => input.with_file_name(filename),
    }
}
