use super::Surface;
use super::container::{Container, DisplayObject};
use crate::Result;

/// Serializes a container into a standalone SVG document.
#[derive(Debug, Clone)]
pub struct SvgSurface {
    width: f64,
    height: f64,
    body: String,
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

impl SvgSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            body: String::new(),
        }
    }

    /// The finished document.
    pub fn finish(self) -> String {
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n{body}</svg>\n",
            w = self.width,
            h = self.height,
            body = self.body
        )
    }
}

impl Surface for SvgSurface {
    fn draw(&mut self, container: &Container) -> Result<()> {
        self.body
            .push_str(&format!("<g transform=\"translate({},0)\">\n", container.x));

        for child in container.children() {
            match child {
                DisplayObject::Graphics(graphics) => {
                    for fill in graphics.fills() {
                        self.body.push_str(&format!(
                            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" fill-opacity=\"{}\"/>\n",
                            fill.rect.x,
                            fill.rect.y,
                            fill.rect.width,
                            fill.rect.height,
                            fill.color,
                            fill.alpha
                        ));
                    }
                }
                DisplayObject::Label(label) => {
                    self.body.push_str(&format!(
                        "<text x=\"{}\" y=\"{}\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\" dominant-baseline=\"hanging\">{}</text>\n",
                        label.x,
                        label.y,
                        escape(&label.style.font_family),
                        label.style.font_size,
                        label.style.fill,
                        escape(&label.text)
                    ));
                }
            }
        }

        self.body.push_str("</g>\n");
        Ok(())
    }
}
