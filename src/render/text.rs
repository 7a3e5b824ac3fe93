use std::path::{Path, PathBuf};

use crate::foundation::core::Rgb8;
use crate::foundation::error::{WrappedError, WrappedResult};

/// Bold sans faces tried, in order, when no font is configured.
const WELL_KNOWN_FONTS: [&str; 4] = [
    "/System/Library/Fonts/Helvetica.ttc",
    "/System/Library/Fonts/SFNSDisplay.ttf",
    "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
];

/// Last-resort face compiled into the binary (DejaVu Sans Bold, Bitstream Vera license).
static BUNDLED_FONT: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans-Bold.ttf");

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub(crate) struct TextBrushRgba8 {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

impl From<Rgb8> for TextBrushRgba8 {
    fn from(c: Rgb8) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: 255,
        }
    }
}

/// Where a resolved font came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FontOrigin {
    Configured(PathBuf),
    WellKnown(PathBuf),
    /// Face picked from the system font database, identified by family name.
    System(String),
    Bundled,
}

/// Font bytes plus the face index inside them (non-zero only for collections).
#[derive(Clone, Debug)]
pub struct ResolvedFont {
    pub bytes: Vec<u8>,
    pub index: u32,
    pub origin: FontOrigin,
}

impl ResolvedFont {
    /// The face shipped inside the crate.
    pub fn bundled() -> Self {
        Self {
            bytes: BUNDLED_FONT.to_vec(),
            index: 0,
            origin: FontOrigin::Bundled,
        }
    }
}

/// Resolve the font used for every caption.
///
/// Order: `configured` path, a short list of well-known bold sans faces, then the system
/// sans-serif family, and finally the bundled face. Never fails.
pub fn resolve_font(configured: Option<&Path>) -> ResolvedFont {
    if let Some(path) = configured {
        match std::fs::read(path) {
            Ok(bytes) => {
                return ResolvedFont {
                    bytes,
                    index: 0,
                    origin: FontOrigin::Configured(path.to_path_buf()),
                };
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "configured font unreadable, falling back");
            }
        }
    }

    for candidate in WELL_KNOWN_FONTS {
        let path = Path::new(candidate);
        if let Ok(bytes) = std::fs::read(path) {
            return ResolvedFont {
                bytes,
                index: 0,
                origin: FontOrigin::WellKnown(path.to_path_buf()),
            };
        }
    }

    system_sans_serif().unwrap_or_else(|| {
        tracing::warn!("no system font found, using the bundled face");
        ResolvedFont::bundled()
    })
}

fn system_sans_serif() -> Option<ResolvedFont> {
    let mut db = usvg::fontdb::Database::new();
    db.load_system_fonts();

    let families = [usvg::fontdb::Family::SansSerif];
    let id = [usvg::fontdb::Weight::BOLD, usvg::fontdb::Weight::NORMAL]
        .into_iter()
        .find_map(|weight| {
            db.query(&usvg::fontdb::Query {
                families: &families,
                weight,
                stretch: usvg::fontdb::Stretch::Normal,
                style: usvg::fontdb::Style::Normal,
            })
        })
        .or_else(|| db.faces().next().map(|f| f.id))?;

    let family = db
        .face(id)
        .and_then(|f| f.families.first().map(|(name, _)| name.clone()))
        .unwrap_or_default();
    db.with_face_data(id, |data, index| ResolvedFont {
        bytes: data.to_vec(),
        index,
        origin: FontOrigin::System(family),
    })
}

/// Stateful helper for building Parley text layouts from one registered font.
///
/// The font is registered once at construction; every layout call reuses it.
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    family_name: String,
    font: vello_cpu::peniko::FontData,
    origin: FontOrigin,
}

impl TextLayoutEngine {
    pub(crate) fn new(font: ResolvedFont) -> WrappedResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font.bytes.clone()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            WrappedError::render("no font families registered from font bytes")
        })?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| WrappedError::render("registered font family has no name"))?
            .to_string();

        let data =
            vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(font.bytes), font.index);
        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
            font: data,
            origin: font.origin,
        })
    }

    pub(crate) fn family_name(&self) -> &str {
        &self.family_name
    }

    pub(crate) fn origin(&self) -> &FontOrigin {
        &self.origin
    }

    pub(crate) fn font(&self) -> &vello_cpu::peniko::FontData {
        &self.font
    }

    /// Shape a single unwrapped line of text.
    pub(crate) fn layout_line(
        &mut self,
        text: &str,
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> WrappedResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(WrappedError::render("text size_px must be finite and > 0"));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

/// Advance width of the widest line. Lines covering no text measure zero.
pub(crate) fn measure_width(layout: &parley::Layout<TextBrushRgba8>) -> f64 {
    layout
        .lines()
        .filter(|line| !line.text_range().is_empty())
        .map(|line| f64::from(line.metrics().advance))
        .fold(0.0, f64::max)
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
