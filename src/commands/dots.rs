use std::fs;

use log::info;
use singleline::{
    DotOptions, DotPlacer, MarkerPlacer, MarkerStyle, PixelTransform, SinglelineResult,
    SvgOptions, markers_to_svg,
};

use crate::cli::DotsCommand;

use super::utils::{build_extractor, derive_variant_path, for_each_input};

/// The main function to run the dots command.
pub fn run(cmd: DotsCommand) -> SinglelineResult<()> {
    let extractor = build_extractor(&cmd.raster);
    let transform = cmd.transform.to_transform()?;
    let options = DotOptions::from(&cmd);
    options.validate()?;
    let style = MarkerStyle {
        dot_radius: cmd.radius,
        ..MarkerStyle::default()
    };
    let svg_options = SvgOptions {
        style: style.clone(),
        y_up: transform.flips_y(),
        ..SvgOptions::default()
    };

    for_each_input(&cmd.inputs, |input| {
        let strokes = extractor.for_image(input)?;
        let markers = strokes.dots(&transform, &options)?;
        info!("{}: {} dots", input.display(), markers.len());

        let output_path = derive_variant_path(input, cmd.output_dir.as_deref(), "dots", "svg");
        fs::write(&output_path, markers_to_svg(&markers, &svg_options))?;
        println!("Dots SVG saved to {}", output_path.display());

        if cmd.preview {
            // same walk in grid pixels
            let pixel_options = DotOptions {
                spacing: transform.to_pixels(options.spacing),
                ..options.clone()
            };
            let pixel_style = MarkerStyle {
                dot_radius: transform.to_pixels(style.dot_radius),
                ..style.clone()
            };
            let pixel_markers =
                DotPlacer.place(strokes.paths(), &PixelTransform::identity(), &pixel_options)?;
            let preview_path =
                derive_variant_path(input, cmd.output_dir.as_deref(), "dots", "png");
            strokes
                .markers_image(&pixel_markers, &pixel_style)
                .save(&preview_path)?;
            println!("Dots preview PNG saved to {}", preview_path.display());
        }
        Ok(())
    })
}
