use super::config::{Color, LabelStyle};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Rectangle spanning `[x0, x1] x [y0, y1]`.
    pub fn from_edges(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self {
            x: x0,
            y: y0,
            width: x1 - x0,
            height: y1 - y0,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Fill {
    pub rect: Rect,
    pub color: Color,
    pub alpha: f64,
}

/// Batch of filled shapes drawn in a single call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Graphics {
    fills: Vec<Fill>,
}

impl Graphics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Color, alpha: f64) {
        self.fills.push(Fill {
            rect,
            color,
            alpha: alpha.clamp(0.0, 1.0),
        });
    }

    pub fn fills(&self) -> &[Fill] {
        &self.fills
    }

    pub fn is_empty(&self) -> bool {
        self.fills.is_empty()
    }
}

/// Text placed at its top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub style: LabelStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DisplayObject {
    Graphics(Graphics),
    Label(Label),
}

/// Retained display list, drawn back to front.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Container {
    /// Horizontal offset applied to every child.
    pub x: f64,
    children: Vec<DisplayObject>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_child(&mut self, child: DisplayObject) {
        self.children.push(child);
    }

    pub fn remove_children(&mut self) {
        self.children.clear();
    }

    pub fn children(&self) -> &[DisplayObject] {
        &self.children
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn graphics(&self) -> impl Iterator<Item = &Graphics> {
        self.children.iter().filter_map(|child| match child {
            DisplayObject::Graphics(g) => Some(g),
            DisplayObject::Label(_) => None,
        })
    }

    pub fn labels(&self) -> impl Iterator<Item = &Label> {
        self.children.iter().filter_map(|child| match child {
            DisplayObject::Label(l) => Some(l),
            DisplayObject::Graphics(_) => None,
        })
    }
}
