use std::fs;

use log::info;
use singleline::{
    DashOptions, DashPlacer, MarkerPlacer, MarkerStyle, PixelTransform, SinglelineResult,
    SvgOptions, markers_to_svg,
};

use crate::cli::DashesCommand;

use super::utils::{build_extractor, derive_variant_path, for_each_input};

/// The main function to run the dashes command.
pub fn run(cmd: DashesCommand) -> SinglelineResult<()> {
    let extractor = build_extractor(&cmd.raster);
    let transform = cmd.transform.to_transform()?;
    let options = DashOptions::from(&cmd);
    options.validate()?;
    let style = MarkerStyle {
        dash_length: cmd.dash_length,
        dash_thickness: cmd.thickness,
        ..MarkerStyle::default()
    };
    let svg_options = SvgOptions {
        style: style.clone(),
        y_up: transform.flips_y(),
        ..SvgOptions::default()
    };

    for_each_input(&cmd.inputs, |input| {
        let strokes = extractor.for_image(input)?;
        let markers = strokes.dashes(&transform, &options)?;
        info!("{}: {} dashes", input.display(), markers.len());

        let output_path =
            derive_variant_path(input, cmd.output_dir.as_deref(), "dashes", "svg");
        fs::write(&output_path, markers_to_svg(&markers, &svg_options))?;
        println!("Dashes SVG saved to {}", output_path.display());

        if cmd.preview {
            // pixel-space rotations keep y down, matching the image
            let pixel_options = DashOptions::new(
                transform.to_pixels(options.dash_length),
                transform.to_pixels(options.gap),
            );
            let pixel_style = MarkerStyle {
                dash_length: pixel_options.dash_length,
                dash_thickness: transform.to_pixels(style.dash_thickness),
                ..style.clone()
            };
            let pixel_markers =
                DashPlacer.place(strokes.paths(), &PixelTransform::identity(), &pixel_options)?;
            let preview_path =
                derive_variant_path(input, cmd.output_dir.as_deref(), "dashes", "png");
            strokes
                .markers_image(&pixel_markers, &pixel_style)
                .save(&preview_path)?;
            println!("Dashes preview PNG saved to {}", preview_path.display());
        }
        Ok(())
    })
}
