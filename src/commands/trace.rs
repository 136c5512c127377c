use log::info;
use singleline::SinglelineResult;

use crate::cli::TraceCommand;

use super::utils::{build_extractor, derive_variant_path, for_each_input};

/// The main function to run the trace command.
pub fn run(cmd: TraceCommand) -> SinglelineResult<()> {
    let extractor = build_extractor(&cmd.raster);
    for_each_input(&cmd.inputs, |input| {
        let strokes = extractor.for_image(input)?;
        let graph = strokes.graph();
        info!(
            "{}: {} paths, {} endpoints, {} junctions",
            input.display(),
            strokes.paths().len(),
            graph.num_endpoints(),
            graph.num_junctions()
        );
        let output_path = derive_variant_path(input, cmd.output_dir.as_deref(), "trace", "png");
        strokes.save_trace(&output_path)?;
        println!("Trace PNG saved to {}", output_path.display());
        Ok(())
    })
}
