use crate::{SinglelineError, SinglelineResult};

/// Options for turning a glyph image into a binary grid.
#[derive(Debug, Clone)]
pub struct RasterSettings {
    /// Luma values strictly above this are stroke pixels.
    pub threshold: u8,
    /// Invert the image first (dark glyph on a light background).
    pub invert: bool,
    /// Crop the grid to the bounding box of its foreground before thinning.
    pub crop: bool,
}

impl Default for RasterSettings {
    fn default() -> Self {
        Self {
            threshold: 128,
            invert: false,
            crop: true,
        }
    }
}

impl RasterSettings {
    /// Set the foreground threshold.
    pub fn with_threshold(mut self, threshold: u8) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set whether the image is inverted before thresholding.
    pub fn with_invert(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }

    /// Set whether the grid is cropped to its content.
    pub fn with_crop(mut self, crop: bool) -> Self {
        self.crop = crop;
        self
    }
}

/// Options for the path tracer.
#[derive(Debug, Clone)]
pub struct TraceSettings {
    /// Smoothing rounds applied to every traced path (0 keeps raw pixel paths).
    pub smoothing_iterations: usize,
}

impl Default for TraceSettings {
    fn default() -> Self {
        Self {
            smoothing_iterations: crate::smooth::DEFAULT_SMOOTHING_ITERATIONS,
        }
    }
}

impl TraceSettings {
    /// Set the number of smoothing rounds.
    pub fn with_smoothing_iterations(mut self, iterations: usize) -> Self {
        self.smoothing_iterations = iterations;
        self
    }
}

/// Options for evenly spaced dots, in output units.
#[derive(Debug, Clone)]
pub struct DotOptions {
    /// Arc-length distance between consecutive dots.
    pub spacing: f64,
    /// Candidates closer than `spacing * min_separation_ratio` to an accepted dot are dropped.
    pub min_separation_ratio: f64,
}

impl Default for DotOptions {
    fn default() -> Self {
        Self {
            spacing: 50.0,
            min_separation_ratio: 0.6,
        }
    }
}

impl DotOptions {
    pub fn new(spacing: f64) -> Self {
        Self {
            spacing,
            ..Self::default()
        }
    }

    /// Set the minimum separation ratio.
    pub fn with_min_separation_ratio(mut self, ratio: f64) -> Self {
        self.min_separation_ratio = ratio;
        self
    }

    /// Check that the options describe a finite, non-degenerate walk.
    pub fn validate(&self) -> SinglelineResult<()> {
        positive("spacing", self.spacing)?;
        non_negative("min_separation_ratio", self.min_separation_ratio)
    }
}

/// Options for oriented dashes, in output units.
#[derive(Debug, Clone)]
pub struct DashOptions {
    /// Length of one dash along the path.
    pub dash_length: f64,
    /// Empty distance between two dashes.
    pub gap: f64,
}

impl Default for DashOptions {
    fn default() -> Self {
        Self {
            dash_length: 40.0,
            gap: 20.0,
        }
    }
}

impl DashOptions {
    pub fn new(dash_length: f64, gap: f64) -> Self {
        Self { dash_length, gap }
    }

    /// Distance between the centres of two consecutive dashes.
    pub fn stride(&self) -> f64 {
        self.dash_length + self.gap
    }

    /// Check that the options describe a finite, non-degenerate walk.
    pub fn validate(&self) -> SinglelineResult<()> {
        positive("dash_length", self.dash_length)?;
        non_negative("gap", self.gap)
    }
}

pub(crate) fn positive(name: &'static str, value: f64) -> SinglelineResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SinglelineError::InvalidParameter { name, value })
    }
}

pub(crate) fn non_negative(name: &'static str, value: f64) -> SinglelineResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SinglelineError::InvalidParameter { name, value })
    }
}
