//! Per-frame display list.
//!
//! A [`FrameScene`] is what one clip looks like at one instant: a background gradient, an
//! ordered list of text and rectangle items, and a fade multiplier. Coordinates are in layout
//! units (see [`LayoutSpace`]); text widths are resolved by the rasterizer, so evaluation needs
//! no fonts.

use crate::foundation::core::{Canvas, Rect, Rgb8};
use crate::timeline::clip::Gradient;

/// Coordinate space every layout constant is authored in.
///
/// For the 1080x1920 reference canvas this is the pixel grid. Other canvases keep the same
/// shorter-side extent and scale by [`LayoutSpace::scale`] at raster time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutSpace {
    pub width: f64,
    pub height: f64,
    pub scale: f64,
}

impl LayoutSpace {
    pub fn for_canvas(canvas: Canvas) -> Self {
        let scale = canvas.layout_scale();
        Self {
            width: f64::from(canvas.width) / scale,
            height: f64::from(canvas.height) / scale,
            scale,
        }
    }

    pub fn center_y(&self) -> f64 {
        (self.height / 2.0).floor()
    }
}

/// Identifies a scene element across frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementKey {
    Title,
    YearNumeral,
    RepoName,
    WrappedLabel,
    Numeral,
    Subtitle,
    RowLabel(usize),
    RowValue(usize),
    GridLabel(usize),
    GridValue(usize),
    Added,
    AddedLabel,
    Deleted,
    DeletedLabel,
    NetLabel,
    Net,
    Bar(usize),
    MonthLabel(usize),
    BarValue(usize),
    StatLine(usize),
    Footer,
}

/// Horizontal placement of a text run whose width is only known after shaping.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HAlign {
    /// Centered on the layout width.
    Center,
    /// Left edge at `x`.
    Left(f64),
    /// Right edge at `x`.
    Right(f64),
    /// Centered inside `[left, left + width]`.
    CenterIn { left: f64, width: f64 },
}

impl HAlign {
    /// Left edge for a run of `text_width`, truncated to whole layout units.
    pub fn resolve_x(self, layout_width: f64, text_width: f64) -> f64 {
        let x = match self {
            Self::Center => (layout_width - text_width) / 2.0,
            Self::Left(x) => x,
            Self::Right(x) => x - text_width,
            Self::CenterIn { left, width } => left + (width - text_width) / 2.0,
        };
        x.floor()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextItem {
    pub key: ElementKey,
    pub text: String,
    pub size_px: f64,
    pub color: Rgb8,
    pub align: HAlign,
    /// Top of the line box.
    pub y: f64,
    pub opacity: f64,
}

impl TextItem {
    pub fn new(
        key: ElementKey,
        text: impl Into<String>,
        size_px: f64,
        color: Rgb8,
        align: HAlign,
        y: f64,
    ) -> Self {
        Self {
            key,
            text: text.into(),
            size_px,
            color,
            align,
            y,
            opacity: 1.0,
        }
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RectItem {
    pub key: ElementKey,
    pub rect: Rect,
    pub color: Rgb8,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SceneItem {
    Text(TextItem),
    Rect(RectItem),
}

impl SceneItem {
    pub fn key(&self) -> ElementKey {
        match self {
            Self::Text(t) => t.key,
            Self::Rect(r) => r.key,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FrameScene {
    pub layout: LayoutSpace,
    pub gradient: Gradient,
    /// Drawn in order.
    pub items: Vec<SceneItem>,
    /// 0 is black, 1 is fully visible.
    pub fade: f64,
}

impl FrameScene {
    pub fn new(layout: LayoutSpace, gradient: Gradient, fade: f64) -> Self {
        Self {
            layout,
            gradient,
            items: Vec::new(),
            fade,
        }
    }

    pub fn push(&mut self, item: TextItem) {
        self.items.push(SceneItem::Text(item));
    }

    pub fn rect(&mut self, key: ElementKey, rect: Rect, color: Rgb8) {
        self.items.push(SceneItem::Rect(RectItem { key, rect, color }));
    }

    pub fn find(&self, key: ElementKey) -> Option<&SceneItem> {
        self.items.iter().find(|i| i.key() == key)
    }

    pub fn find_text(&self, key: ElementKey) -> Option<&TextItem> {
        match self.find(key)? {
            SceneItem::Text(t) => Some(t),
            SceneItem::Rect(_) => None,
        }
    }

    pub fn find_rect(&self, key: ElementKey) -> Option<&RectItem> {
        match self.find(key)? {
            SceneItem::Rect(r) => Some(r),
            SceneItem::Text(_) => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
