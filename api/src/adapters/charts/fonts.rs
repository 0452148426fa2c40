//! Font registration for chart text.
//!
//! Plotters is built without its system font backend, so text is drawn with
//! ab_glyph from a font file registered at runtime. Registration is global and
//! happens at most once per process.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use plotters::style::{register_font, FontStyle};

/// Family name every chart text style refers to
pub const FONT_FAMILY: &str = "sans-serif";

/// Common locations of a sans-serif font, tried in order
const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

static TEXT_AVAILABLE: OnceLock<bool> = OnceLock::new();

/// Make sure a font is registered. Returns whether charts can draw text.
///
/// Only the first call looks at `preferred`; later calls return the cached
/// outcome.
pub fn ensure_font(preferred: Option<&Path>) -> bool {
    *TEXT_AVAILABLE.get_or_init(|| register_first_usable(preferred))
}

fn register_first_usable(preferred: Option<&Path>) -> bool {
    if let Some(path) = preferred {
        if try_register(path) {
            return true;
        }
        tracing::warn!(
            "Configured chart font '{}' is unusable, searching system fonts",
            path.display()
        );
    }

    let found = SYSTEM_FONT_CANDIDATES
        .iter()
        .map(PathBuf::from)
        .filter(|p| p.is_file())
        .any(|p| try_register(&p));

    if !found {
        tracing::warn!("No usable font found; charts will be rendered without text");
    }
    found
}

fn try_register(path: &Path) -> bool {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::debug!("Cannot read font '{}': {}", path.display(), e);
            return false;
        }
    };

    // ab_glyph keeps a reference to the font data for the process lifetime
    let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
    match register_font(FONT_FAMILY, FontStyle::Normal, bytes) {
        Ok(()) => {
            tracing::info!("Chart font: {}", path.display());
            true
        }
        Err(_) => {
            tracing::debug!("'{}' is not a valid font file", path.display());
            false
        }
    }
}
