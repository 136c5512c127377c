pub mod config;
pub mod error;
pub mod export;
mod geom;
pub mod graph;
pub mod grid;
pub mod marker;
pub mod render;
pub mod shape;
pub mod smooth;
pub mod thin;
pub mod trace;
pub mod transform;

pub use config::{DashOptions, DotOptions, RasterSettings, TraceSettings};
pub use error::{SinglelineError, SinglelineResult};
pub use export::{SvgOptions, markers_to_svg};
pub use geom::Point;
pub use graph::{NodeKind, SkeletonGraph};
pub use grid::BinaryGrid;
pub use marker::{DashPlacer, DotPlacer, Marker, MarkerPlacer, Rotation};
pub use shape::MarkerStyle;
pub use thin::{Skeleton, skeletonize};
pub use trace::{PathKind, StrokePath};
pub use transform::PixelTransform;

use std::path::Path;

use image::{GrayImage, RgbImage};
use log::debug;

use crate::trace::trace_paths;

/// Entry point for turning glyph images into single-stroke paths.
#[derive(Debug, Clone, Default)]
pub struct StrokeExtractor {
    /// How glyph images become binary grids.
    raster: RasterSettings,
    /// How skeletons become paths.
    trace: TraceSettings,
}

impl StrokeExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the raster settings used by [`StrokeExtractor::for_image`] and [`StrokeExtractor::for_gray`].
    pub fn with_raster(mut self, raster: RasterSettings) -> Self {
        self.raster = raster;
        self
    }

    /// Set the tracer settings.
    pub fn with_trace(mut self, trace: TraceSettings) -> Self {
        self.trace = trace;
        self
    }

    pub fn raster(&self) -> &RasterSettings {
        &self.raster
    }

    pub fn trace(&self) -> &TraceSettings {
        &self.trace
    }

    /// Load a glyph image in any format the `image` crate decodes and extract its strokes.
    pub fn for_image(&self, image_path: impl AsRef<Path>) -> SinglelineResult<GlyphStrokes> {
        let path = image_path.as_ref();
        let gray = image::open(path)?.to_luma8();
        debug!(
            "loaded {} ({}x{})",
            path.display(),
            gray.width(),
            gray.height()
        );
        Ok(self.for_gray(&gray))
    }

    /// Threshold a grayscale glyph image and extract its strokes.
    pub fn for_gray(&self, gray: &GrayImage) -> GlyphStrokes {
        let grid = if self.raster.invert {
            let mut inverted = gray.clone();
            image::imageops::invert(&mut inverted);
            BinaryGrid::from_gray(&inverted, self.raster.threshold)
        } else {
            BinaryGrid::from_gray(gray, self.raster.threshold)
        };
        self.for_grid(&grid)
    }

    /// Run thinning, graph building and tracing on a binary grid.
    pub fn for_grid(&self, grid: &BinaryGrid) -> GlyphStrokes {
        let (grid, offset) = if self.raster.crop {
            grid.crop_to_content()
        } else {
            (grid.clone(), (0, 0))
        };
        let skeleton = skeletonize(&grid);
        let graph = SkeletonGraph::build(skeleton.grid());
        let paths = trace_paths(&graph, &self.trace);
        debug!(
            "{} foreground pixels, {} skeleton pixels, {} paths",
            grid.count(),
            skeleton.grid().count(),
            paths.len()
        );
        GlyphStrokes {
            grid,
            skeleton,
            graph,
            paths,
            offset,
        }
    }
}

/// Strokes of one glyph, from which markers and debug images are derived.
///
/// Path coordinates are pixels of the (possibly cropped) grid; marker
/// placement adds the crop offset back before applying the caller's transform.
#[derive(Debug, Clone)]
pub struct GlyphStrokes {
    grid: BinaryGrid,
    skeleton: Skeleton,
    graph: SkeletonGraph,
    paths: Vec<StrokePath>,
    offset: (usize, usize),
}

impl GlyphStrokes {
    /// The thresholded (and cropped) input grid.
    pub fn grid(&self) -> &BinaryGrid {
        &self.grid
    }

    pub fn skeleton(&self) -> &Skeleton {
        &self.skeleton
    }

    pub fn graph(&self) -> &SkeletonGraph {
        &self.graph
    }

    pub fn paths(&self) -> &[StrokePath] {
        &self.paths
    }

    pub fn into_paths(self) -> Vec<StrokePath> {
        self.paths
    }

    /// `(col, row)` of the grid's top-left cell in the input image.
    pub fn crop_offset(&self) -> (usize, usize) {
        self.offset
    }

    /// A copy with every path smoothed `iterations` more times.
    pub fn smoothed(&self, iterations: usize) -> Self {
        Self {
            paths: self.paths.iter().map(|p| p.smoothed(iterations)).collect(),
            ..self.clone()
        }
    }

    /// The transform for path coordinates, given one for input-image pixels.
    pub fn path_transform(&self, transform: &PixelTransform) -> PixelTransform {
        let (dx, dy) = self.offset;
        transform.shifted(dx as f64, dy as f64)
    }

    /// Place markers along all paths of this glyph with the given placer.
    pub fn place<P>(
        &self,
        placer: &P,
        transform: &PixelTransform,
        options: &P::Options,
    ) -> SinglelineResult<Vec<Marker>>
    where
        P: MarkerPlacer,
    {
        placer.place(&self.paths, &self.path_transform(transform), options)
    }

    /// Evenly spaced dots; `transform` maps input-image pixels to output units.
    pub fn dots(
        &self,
        transform: &PixelTransform,
        options: &DotOptions,
    ) -> SinglelineResult<Vec<Marker>> {
        self.place(&DotPlacer, transform, options)
    }

    /// Oriented dashes; `transform` maps input-image pixels to output units.
    pub fn dashes(
        &self,
        transform: &PixelTransform,
        options: &DashOptions,
    ) -> SinglelineResult<Vec<Marker>> {
        self.place(&DashPlacer, transform, options)
    }

    pub fn skeleton_image(&self) -> GrayImage {
        render::render_skeleton(self.skeleton.grid())
    }

    pub fn trace_image(&self) -> RgbImage {
        render::render_trace(&self.grid, &self.paths)
    }

    /// Trace overlay with marker outlines; `markers` and `style` are in grid pixels.
    pub fn markers_image(&self, markers: &[Marker], style: &MarkerStyle) -> RgbImage {
        render::render_markers(&self.grid, &self.paths, markers, style)
    }

    /// Save the skeleton image to the specified path.
    pub fn save_skeleton(&self, path: impl AsRef<Path>) -> SinglelineResult<()> {
        self.skeleton_image().save(path)?;
        Ok(())
    }

    /// Save the trace overlay to the specified path.
    pub fn save_trace(&self, path: impl AsRef<Path>) -> SinglelineResult<()> {
        self.trace_image().save(path)?;
        Ok(())
    }
}
