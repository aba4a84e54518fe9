use crate::{Error, Result};
use std::fmt;
use std::ops::Range;
use std::sync::Arc;

/// Decides whether a feature spanning `[start, end]` bp stays visible.
pub trait FeatureFilter: Send + Sync {
    fn check_feature(&self, start: f64, end: f64) -> bool;
}

/// Shortened-introns filter keeping features that overlap a visible (exonic) range.
///
/// Ranges are half-open: a feature starting at a range's end is outside it.
#[derive(Debug, Clone, Default)]
pub struct ShortenedIntronsFilter {
    ranges: Vec<Range<f64>>,
}

impl ShortenedIntronsFilter {
    pub fn new(mut ranges: Vec<Range<f64>>) -> Self {
        ranges.sort_by(|a, b| a.start.total_cmp(&b.start));
        Self { ranges }
    }
}

impl FeatureFilter for ShortenedIntronsFilter {
    fn check_feature(&self, start: f64, end: f64) -> bool {
        self.ranges
            .iter()
            .take_while(|range| range.start <= end)
            .any(|range| range.end > start)
    }
}

/// Visible genomic window and its pixels-per-bp zoom factor.
///
/// Shortened-introns mode is on exactly when a filter is attached.
#[derive(Clone)]
pub struct Viewport {
    factor: f64,
    start: f64,
    end: f64,
    shortened_introns: Option<Arc<dyn FeatureFilter>>,
}

impl Viewport {
    /// Create a viewport over `[start, end]` bp at `factor` pixels per bp.
    pub fn new(start: f64, end: f64, factor: f64) -> Result<Self> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(Error::InvalidInput(format!(
                "pixels per bp must be positive, got {}",
                factor
            )));
        }
        if !start.is_finite() || !end.is_finite() || end < start {
            return Err(Error::InvalidInput(format!(
                "invalid visible range {}-{}",
                start, end
            )));
        }
        Ok(Self {
            factor,
            start,
            end,
            shortened_introns: None,
        })
    }

    /// Create a viewport fitting `[start, end]` bp into `canvas_width` pixels.
    pub fn fit(start: f64, end: f64, canvas_width: f64) -> Result<Self> {
        if end <= start {
            return Err(Error::InvalidInput(format!(
                "invalid visible range {}-{}",
                start, end
            )));
        }
        Self::new(start, end, canvas_width / (end - start))
    }

    pub fn with_shortened_introns(mut self, filter: Arc<dyn FeatureFilter>) -> Self {
        self.shortened_introns = Some(filter);
        self
    }

    pub fn factor(&self) -> f64 {
        self.factor
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn is_shortened_introns_mode(&self) -> bool {
        self.shortened_introns.is_some()
    }

    /// Base-pair coordinate to canvas x.
    pub fn project(&self, bp: f64) -> f64 {
        (bp - self.start) * self.factor
    }

    /// Base-pair length to pixels.
    pub fn measure(&self, length: f64) -> f64 {
        length * self.factor
    }

    /// Whether a feature survives the shortened-introns filter (always true outside that mode).
    pub fn check_feature(&self, start: f64, end: f64) -> bool {
        self.shortened_introns
            .as_ref()
            .is_none_or(|filter| filter.check_feature(start, end))
    }
}

impl fmt::Debug for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Viewport")
            .field("factor", &self.factor)
            .field("start", &self.start)
            .field("end", &self.end)
            .field("shortened_introns", &self.is_shortened_introns_mode())
            .finish()
    }
}
