//! Track rendering into a retained display list.
//!
//! Renderers rebuild a [`Container`] of batched fills and text labels for the
//! current [`Viewport`]. A [`Surface`] turns the container into pixels, vectors
//! or anything else the host application draws with.
//!
//! # Implementations
//!
//! - [`ReferenceRenderer`] - reference sequence track
//! - [`SvgSurface`] - SVG output

mod config;
mod container;
mod reference;
mod svg;
mod viewport;

pub use config::{Color, LabelStyle, LargeScaleConfig, LowScaleConfig, ReferenceConfig};
pub use container::{Container, DisplayObject, Fill, Graphics, Label, Rect};
pub use reference::{ReferenceBlock, ReferenceItem, ReferenceRenderer, ReferenceValue};
pub use svg::SvgSurface;
pub use viewport::{FeatureFilter, ShortenedIntronsFilter, Viewport};

use crate::Result;

/// Viewport parameters a container was last built for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportState {
    pub factor: f64,
    pub start: f64,
}

impl ViewportState {
    pub fn of(viewport: &Viewport) -> Self {
        Self {
            factor: viewport.factor(),
            start: viewport.start(),
        }
    }
}

/// Track renderer that caches its drawing in a [`Container`] between frames.
pub trait CachedTrackRenderer {
    type Data;

    fn container(&self) -> &Container;

    fn container_mut(&mut self) -> &mut Container;

    /// Viewport the container was last rebuilt for, if any
    fn cached_viewport(&self) -> Option<ViewportState>;

    /// Redraw the container for `viewport`. `None` data keeps the previous frame.
    fn rebuild_container(&mut self, viewport: &Viewport, data: Option<&Self::Data>);

    fn clear(&mut self) {
        self.container_mut().remove_children();
    }

    /// Follow a pan by shifting the cached drawing.
    ///
    /// Returns `true` when the container has to be rebuilt instead (zoom changed
    /// or nothing cached yet).
    fn translate(&mut self, viewport: &Viewport) -> bool {
        match self.cached_viewport() {
            Some(state) if same_factor(state.factor, viewport.factor()) => {
                self.container_mut().x = (state.start - viewport.start()) * viewport.factor();
                false
            }
            _ => true,
        }
    }

    /// Canvas x of a base-pair coordinate inside the container.
    fn corrected_x_position(&self, viewport: &Viewport, bp: f64) -> f64 {
        viewport.project(bp) - self.container().x
    }

    fn corrected_x_measure(&self, viewport: &Viewport, length: f64) -> f64 {
        viewport.measure(length)
    }
}

fn same_factor(a: f64, b: f64) -> bool {
    (a - b).abs() <= f64::EPSILON * a.abs().max(b.abs())
}

/// Measures rendered text.
pub trait TextMeasure {
    /// `(width, height)` of `text` in pixels
    fn measure(&self, text: &str, style: &LabelStyle) -> (f64, f64);
}

/// Font-agnostic metrics from average glyph proportions.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproximateTextMetrics;

impl TextMeasure for ApproximateTextMetrics {
    fn measure(&self, text: &str, style: &LabelStyle) -> (f64, f64) {
        let glyphs = text.chars().count() as f64;
        (glyphs * style.font_size * 0.6, style.font_size * 1.2)
    }
}

/// Drawing backend for a rendered container.
pub trait Surface {
    fn draw(&mut self, container: &Container) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approximate_metrics() {
        let style = LabelStyle {
            font_size: 10.0,
            ..LabelStyle::default()
        };
        let (w, h) = ApproximateTextMetrics.measure("AC", &style);
        assert_eq!(w, 12.0);
        assert_eq!(h, 12.0);
    }

    #[test]
    fn test_same_factor() {
        assert!(same_factor(0.1 + 0.2, 0.3));
        assert!(!same_factor(1.0, 1.01));
    }
}
