use std::path::Path;

use singleline::SinglelineError;

/// Print a failure for one input to stderr.
pub fn report_error(input: &Path, err: &SinglelineError) {
    match err {
        SinglelineError::Image(image::ImageError::Unsupported(_)) => {
            eprintln!("{}: {err}", input.display());
            eprintln!("  Glyph images must be in a format the `image` crate decodes (PNG, BMP, ...).");
        }
        SinglelineError::InvalidParameter { name, .. } => {
            eprintln!("{}: {err}", input.display());
            eprintln!("  `{name}` must be a finite number in its valid range.");
        }
        _ => {
            eprintln!("{}: {err}", input.display());
        }
    }
}
