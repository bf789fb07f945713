use rusttype::Font;
use std::fs;

/// Bold font files tried in order. Candidates that are missing or fail to
/// parse are skipped silently; exhausting the list falls back to the
/// embedded DejaVu Sans Bold.
const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/System/Library/Fonts/Helvetica.ttc",
];

static FALLBACK_FONT: &[u8] = include_bytes!("../assets/fonts/DejaVuSans-Bold.ttf");

/// Resolve the font used for the icon label. Never fails.
pub fn load_font() -> Font<'static> {
    resolve(FONT_CANDIDATES)
}

fn resolve(candidates: &[&str]) -> Font<'static> {
    for path in candidates {
        if let Ok(data) = fs::read(path) {
            if let Some(font) = Font::try_from_vec(data) {
                return font;
            }
        }
    }

    Font::try_from_bytes(FALLBACK_FONT).expect("embedded fallback font is valid")
}
