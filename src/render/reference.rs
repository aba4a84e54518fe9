use super::config::{Color, ReferenceConfig};
use super::container::{Container, DisplayObject, Graphics, Label, Rect};
use super::viewport::Viewport;
use super::{ApproximateTextMetrics, CachedTrackRenderer, TextMeasure, ViewportState};
use crate::Result;
use serde::{Deserialize, Serialize};

/// Base symbol at high zoom, region score in `[0, 1]` at low zoom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReferenceValue {
    Base(String),
    Score(f64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceItem {
    pub x_start: f64,
    pub x_end: f64,
    pub value: ReferenceValue,
}

impl ReferenceItem {
    pub fn base(x_start: f64, x_end: f64, base: &str) -> Self {
        Self {
            x_start,
            x_end,
            value: ReferenceValue::Base(base.to_string()),
        }
    }

    pub fn score(x_start: f64, x_end: f64, score: f64) -> Self {
        Self {
            x_start,
            x_end,
            value: ReferenceValue::Score(score),
        }
    }

    fn has_valid_span(&self) -> bool {
        self.x_start.is_finite() && self.x_end.is_finite() && self.x_start <= self.x_end
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceBlock {
    #[serde(default)]
    pub is_detailed: bool,
    #[serde(default)]
    pub items: Vec<ReferenceItem>,
}

/// Draws a reference sequence track: colored bases when zoomed in, a score
/// gradient when zoomed out.
pub struct ReferenceRenderer {
    config: ReferenceConfig,
    height: f64,
    container: Container,
    cached: Option<ViewportState>,
    metrics: Box<dyn TextMeasure + Send + Sync>,
}

impl ReferenceRenderer {
    pub fn new(config: ReferenceConfig) -> Result<Self> {
        Self::with_metrics(config, Box::new(ApproximateTextMetrics))
    }

    pub fn with_metrics(
        config: ReferenceConfig,
        metrics: Box<dyn TextMeasure + Send + Sync>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            height: config.height,
            config,
            container: Container::new(),
            cached: None,
            metrics,
        })
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn set_height(&mut self, height: f64) {
        self.height = height;
    }

    pub fn config(&self) -> &ReferenceConfig {
        &self.config
    }

    /// Rebuild the track for `viewport`. `None` leaves the previous frame untouched.
    pub fn render(&mut self, viewport: &Viewport, block: Option<&ReferenceBlock>) {
        self.rebuild_container(viewport, block);
    }

    /// Items that survive the shortened-introns filter and have a usable span.
    fn visible_items<'a>(
        viewport: &'a Viewport,
        block: &'a ReferenceBlock,
    ) -> impl Iterator<Item = &'a ReferenceItem> + 'a {
        block.items.iter().filter(move |item| {
            if !item.has_valid_span() {
                tracing::warn!(
                    "skipping reference item with invalid span {}-{}",
                    item.x_start,
                    item.x_end
                );
                return false;
            }
            viewport.check_feature(item.x_start, item.x_end)
        })
    }

    fn render_detailed(&mut self, viewport: &Viewport, block: &ReferenceBlock) {
        let pixels_per_bp = viewport.factor();
        let mut padding = pixels_per_bp / 2.0;
        if pixels_per_bp > self.config.low_scale_margin_threshold {
            padding += self.config.low_scale_margin_offset;
        }

        let bases: Vec<(&ReferenceItem, &str)> = Self::visible_items(viewport, block)
            .filter_map(|item| match &item.value {
                ReferenceValue::Base(base) => Some((item, base.as_str())),
                ReferenceValue::Score(_) => {
                    tracing::warn!("skipping score item in detailed reference block");
                    None
                }
            })
            .collect();

        let mut graphics = Graphics::new();
        for (item, base) in &bases {
            let x0 = self.corrected_x_position(viewport, item.x_start) - padding;
            let x1 = self.corrected_x_position(viewport, item.x_end) + padding;
            graphics.fill_rect(
                Rect::from_edges(x0, 0.0, x1, self.height),
                self.config.large_scale.color_for(base),
                1.0,
            );
        }
        self.container.add_child(DisplayObject::Graphics(graphics));

        if pixels_per_bp < self.config.large_scale.label_display_after_pixels_per_bp {
            return;
        }

        let style = &self.config.large_scale.label_style;
        let labels: Vec<Label> = bases
            .iter()
            .map(|(item, base)| {
                let (width, height) = self.metrics.measure(base, style);
                let center = (self.corrected_x_position(viewport, item.x_start)
                    + self.corrected_x_position(viewport, item.x_end))
                    / 2.0;
                Label {
                    text: base.to_string(),
                    x: (center - width / 2.0).round(),
                    y: (self.height / 2.0 - height / 2.0).round(),
                    width,
                    height,
                    style: style.clone(),
                }
            })
            .collect();

        for label in labels {
            self.container.add_child(DisplayObject::Label(label));
        }
    }

    fn render_score(&mut self, viewport: &Viewport, block: &ReferenceBlock) {
        let mut graphics = Graphics::new();
        for item in Self::visible_items(viewport, block) {
            let &ReferenceValue::Score(score) = &item.value else {
                tracing::warn!("skipping base item in coarse reference block");
                continue;
            };
            if !score.is_finite() {
                tracing::warn!("skipping reference item with non-finite score");
                continue;
            }

            let (color, alpha) = self.gradient_color(score);
            let x = self.corrected_x_position(viewport, item.x_start);
            let width = self
                .corrected_x_measure(viewport, item.x_end - item.x_start)
                .max(1.0);
            graphics.fill_rect(
                Rect {
                    x,
                    y: 0.0,
                    width,
                    height: self.height,
                },
                color,
                alpha,
            );
        }
        self.container.add_child(DisplayObject::Graphics(graphics));
    }

    /// Gradient color for a score: fading `color1` up to the sensitive value,
    /// strengthening `color2` above it.
    pub fn gradient_color(&self, value: f64) -> (Color, f64) {
        let low_scale = &self.config.low_scale;
        let sensitive = low_scale.sensitive_value;
        let (color, alpha) = if value > sensitive {
            (low_scale.color2, 1.0 - (1.0 - value) / (1.0 - sensitive))
        } else {
            (low_scale.color1, 1.0 - value / sensitive)
        };
        (color, alpha.clamp(0.0, 1.0))
    }
}

impl CachedTrackRenderer for ReferenceRenderer {
    type Data = ReferenceBlock;

    fn container(&self) -> &Container {
        &self.container
    }

    fn container_mut(&mut self) -> &mut Container {
        &mut self.container
    }

    fn cached_viewport(&self) -> Option<ViewportState> {
        self.cached
    }

    fn rebuild_container(&mut self, viewport: &Viewport, data: Option<&ReferenceBlock>) {
        let Some(block) = data else {
            return;
        };

        self.clear();
        self.container.x = 0.0;
        self.cached = Some(ViewportState::of(viewport));

        if block.is_detailed {
            self.render_detailed(viewport, block);
        } else {
            self.render_score(viewport, block);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::viewport::ShortenedIntronsFilter;
    use serde_json::json;
    use std::sync::Arc;

    fn renderer() -> ReferenceRenderer {
        ReferenceRenderer::new(ReferenceConfig::default()).unwrap()
    }

    fn detailed(items: Vec<ReferenceItem>) -> ReferenceBlock {
        ReferenceBlock {
            is_detailed: true,
            items,
        }
    }

    fn coarse(items: Vec<ReferenceItem>) -> ReferenceBlock {
        ReferenceBlock {
            is_detailed: false,
            items,
        }
    }

    fn at(factor: f64) -> Viewport {
        Viewport::new(0.0, 1000.0, factor).unwrap()
    }

    #[test]
    fn test_detailed_padding_above_threshold() {
        let mut renderer = renderer();
        let block = detailed(vec![
            ReferenceItem::base(0.0, 1.0, "A"),
            ReferenceItem::base(1.0, 2.0, "T"),
        ]);
        renderer.render(&at(10.0), Some(&block));

        let graphics: Vec<_> = renderer.container().graphics().collect();
        assert_eq!(graphics.len(), 1);
        let fills = graphics[0].fills();
        assert_eq!(fills.len(), 2);
        assert_eq!(fills[0].rect.x, -4.5);
        assert_eq!(fills[0].rect.right(), 14.5);
        assert_eq!(fills[0].rect.height, renderer.height());
        assert_eq!(fills[0].color, renderer.config().large_scale.color_for("A"));
        assert_eq!(fills[1].rect.x, 5.5);
        assert_eq!(fills[1].rect.right(), 24.5);
    }

    #[test]
    fn test_detailed_padding_at_low_scale() {
        let mut renderer = renderer();
        let block = detailed(vec![ReferenceItem::base(2.0, 2.0, "c")]);
        renderer.render(&at(4.0), Some(&block));

        let fill = &renderer.container().graphics().next().unwrap().fills()[0];
        assert_eq!(fill.rect.x, 6.0);
        assert_eq!(fill.rect.right(), 10.0);
        assert_eq!(fill.color, renderer.config().large_scale.color_for("C"));
    }

    #[test]
    fn test_labels_at_threshold() {
        let mut renderer = renderer();
        let threshold = renderer.config().large_scale.label_display_after_pixels_per_bp;
        let block = detailed(vec![
            ReferenceItem::base(0.0, 0.0, "A"),
            ReferenceItem::base(1.0, 1.0, "G"),
        ]);

        renderer.render(&at(threshold), Some(&block));
        let labels: Vec<_> = renderer.container().labels().collect();
        assert_eq!(labels.len(), 2);
        assert_eq!(labels[1].text, "G");

        // Labels come after the single batched fill so they render on top.
        assert!(matches!(
            renderer.container().children()[0],
            DisplayObject::Graphics(_)
        ));
        assert_eq!(renderer.container().children().len(), 3);
    }

    #[test]
    fn test_no_labels_below_threshold() {
        let mut renderer = renderer();
        let threshold = renderer.config().large_scale.label_display_after_pixels_per_bp;
        let block = detailed(vec![ReferenceItem::base(0.0, 0.0, "A")]);

        renderer.render(&at(threshold - 0.5), Some(&block));
        assert_eq!(renderer.container().labels().count(), 0);
        assert_eq!(renderer.container().children().len(), 1);
    }

    #[test]
    fn test_label_is_centered() {
        let mut renderer = renderer();
        let block = detailed(vec![ReferenceItem::base(3.0, 3.0, "T")]);
        renderer.render(&at(20.0), Some(&block));

        let label = renderer.container().labels().next().unwrap();
        let (width, height) =
            ApproximateTextMetrics.measure("T", &renderer.config().large_scale.label_style);
        assert_eq!(label.x, (60.0 - width / 2.0).round());
        assert_eq!(label.y, (renderer.height() / 2.0 - height / 2.0).round());
    }

    #[test]
    fn test_gradient_color() {
        let renderer = renderer();
        let low_scale = renderer.config().low_scale.clone();

        assert_eq!(renderer.gradient_color(0.0), (low_scale.color1, 1.0));
        assert_eq!(renderer.gradient_color(0.25), (low_scale.color1, 0.5));
        assert_eq!(renderer.gradient_color(0.75), (low_scale.color2, 0.5));
        assert_eq!(renderer.gradient_color(1.0), (low_scale.color2, 1.0));
    }

    #[test]
    fn test_gradient_boundary_uses_color1() {
        let renderer = renderer();
        let low_scale = renderer.config().low_scale.clone();
        let (color, alpha) = renderer.gradient_color(low_scale.sensitive_value);
        assert_eq!(color, low_scale.color1);
        assert_eq!(alpha, 0.0);
    }

    #[test]
    fn test_gradient_clamps_alpha() {
        let renderer = renderer();
        assert_eq!(renderer.gradient_color(-1.0).1, 1.0);
        assert_eq!(renderer.gradient_color(2.0).1, 1.0);
    }

    #[test]
    fn test_score_minimum_width() {
        let mut renderer = renderer();
        let block = coarse(vec![
            ReferenceItem::score(0.0, 100.0, 0.1),
            ReferenceItem::score(100.0, 100.5, 0.9),
        ]);
        renderer.render(&at(0.1), Some(&block));

        let fills = renderer.container().graphics().next().unwrap().fills();
        assert_eq!(fills.len(), 2);
        assert_eq!(fills[0].rect.x, 0.0);
        assert_eq!(fills[0].rect.width, 10.0);
        assert_eq!(fills[1].rect.x, 10.0);
        assert_eq!(fills[1].rect.width, 1.0);
        assert_eq!(renderer.container().labels().count(), 0);
    }

    #[test]
    fn test_none_keeps_previous_frame() {
        let mut renderer = renderer();
        let block = detailed(vec![ReferenceItem::base(0.0, 0.0, "A")]);
        renderer.render(&at(20.0), Some(&block));
        let before = renderer.container().clone();

        renderer.render(&at(5.0), None);
        assert_eq!(renderer.container(), &before);
    }

    #[test]
    fn test_rerender_clears_previous_children() {
        let mut renderer = renderer();
        let block = detailed(vec![ReferenceItem::base(0.0, 0.0, "A")]);
        renderer.render(&at(20.0), Some(&block));
        renderer.render(&at(20.0), Some(&block));
        assert_eq!(renderer.container().children().len(), 2);
    }

    #[test]
    fn test_filtered_items_are_not_drawn() {
        let mut renderer = renderer();
        let viewport = at(20.0)
            .with_shortened_introns(Arc::new(ShortenedIntronsFilter::new(vec![0.0..1.0])));
        let block = detailed(vec![
            ReferenceItem::base(0.0, 0.0, "A"),
            ReferenceItem::base(5.0, 5.0, "C"),
        ]);
        renderer.render(&viewport, Some(&block));

        let fills = renderer.container().graphics().next().unwrap().fills();
        assert_eq!(fills.len(), 1);
        let labels: Vec<_> = renderer.container().labels().collect();
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].text, "A");

        let block = coarse(vec![
            ReferenceItem::score(0.0, 1.0, 0.5),
            ReferenceItem::score(5.0, 6.0, 0.5),
        ]);
        renderer.render(&viewport, Some(&block));
        assert_eq!(renderer.container().graphics().next().unwrap().fills().len(), 1);
    }

    #[test]
    fn test_invalid_items_are_skipped() {
        let mut renderer = renderer();
        let block = detailed(vec![
            ReferenceItem::base(5.0, 2.0, "A"),
            ReferenceItem::score(0.0, 1.0, 0.3),
            ReferenceItem::base(f64::NAN, 1.0, "G"),
            ReferenceItem::base(1.0, 1.0, "T"),
        ]);
        renderer.render(&at(20.0), Some(&block));
        assert_eq!(renderer.container().graphics().next().unwrap().fills().len(), 1);
        assert_eq!(renderer.container().labels().count(), 1);
    }

    #[test]
    fn test_translate_follows_pan() {
        let mut renderer = renderer();
        let block = detailed(vec![ReferenceItem::base(10.0, 10.0, "A")]);

        assert!(renderer.translate(&at(10.0)));
        renderer.render(&at(10.0), Some(&block));

        let panned = Viewport::new(4.0, 1004.0, 10.0).unwrap();
        assert!(!renderer.translate(&panned));
        assert_eq!(renderer.container().x, -40.0);
        assert_eq!(renderer.corrected_x_position(&panned, 10.0), 100.0);

        let zoomed = Viewport::new(4.0, 1004.0, 20.0).unwrap();
        assert!(renderer.translate(&zoomed));

        renderer.render(&zoomed, Some(&block));
        assert_eq!(renderer.container().x, 0.0);
    }

    #[test]
    fn test_block_from_json() {
        let block: ReferenceBlock = serde_json::from_value(json!({
            "isDetailed": true,
            "items": [{"xStart": 1, "xEnd": 1, "value": "a"}, {"xStart": 2, "xEnd": 2, "value": 0.4}]
        }))
        .unwrap();
        assert_eq!(block.items[0].value, ReferenceValue::Base("a".to_string()));
        assert_eq!(block.items[1].value, ReferenceValue::Score(0.4));
    }

    #[test]
    fn test_rejects_invalid_config() {
        let mut config = ReferenceConfig::default();
        config.low_scale.sensitive_value = 2.0;
        assert!(ReferenceRenderer::new(config).is_err());
    }
}
