use singleline::SinglelineResult;

use crate::cli::SkeletonCommand;

use super::utils::{build_extractor, derive_variant_path, for_each_input};

/// The main function to run the skeleton command.
pub fn run(cmd: SkeletonCommand) -> SinglelineResult<()> {
    let extractor = build_extractor(&cmd.raster);
    for_each_input(&cmd.inputs, |input| {
        let strokes = extractor.for_image(input)?;
        let output_path =
            derive_variant_path(input, cmd.output_dir.as_deref(), "skeleton", "png");
        strokes.save_skeleton(&output_path)?;
        println!("Skeleton PNG saved to {}", output_path.display());
        Ok(())
    })
}
