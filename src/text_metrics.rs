use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Mutex;
use ttf_parser::Face;

/// Measures the rendered width of a single line of text.
///
/// The text fitter only depends on this trait, so layout and fitting can be
/// exercised without any font on the machine.
pub trait TextMeasure {
    fn line_width(&self, text: &str, font_size: f32) -> f32;
}

impl<F> TextMeasure for F
where
    F: Fn(&str, f32) -> f32,
{
    fn line_width(&self, text: &str, font_size: f32) -> f32 {
        self(text, font_size)
    }
}

/// Width estimate from per-character factors; no font access.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproxTextMeasure;

impl TextMeasure for ApproxTextMeasure {
    fn line_width(&self, text: &str, font_size: f32) -> f32 {
        approx_text_width(text, font_size)
    }
}

/// Measures with the first installed face matching a CSS-like family list,
/// falling back to [`ApproxTextMeasure`] when no face can be loaded.
#[derive(Debug, Clone)]
pub struct FontTextMeasure {
    font_family: String,
}

impl FontTextMeasure {
    pub fn new(font_family: &str) -> Self {
        Self {
            font_family: font_family.to_string(),
        }
    }
}

impl TextMeasure for FontTextMeasure {
    fn line_width(&self, text: &str, font_size: f32) -> f32 {
        measure_text_width(text, font_size, &self.font_family)
            .unwrap_or_else(|| approx_text_width(text, font_size))
    }
}

/// Font-backed measurer, or the approximation when `fast` is set.
pub fn measurer(font_family: &str, fast: bool) -> Box<dyn TextMeasure> {
    if fast {
        Box::new(ApproxTextMeasure)
    } else {
        Box::new(FontTextMeasure::new(font_family))
    }
}

pub fn approx_text_width(text: &str, font_size: f32) -> f32 {
    if font_size <= 0.0 {
        return 0.0;
    }
    text.chars().map(char_width_factor).sum::<f32>() * font_size
}

fn char_width_factor(ch: char) -> f32 {
    match ch {
        ' ' => 0.306,
        'i' | 'j' | 'l' | 'I' | '\'' | '|' => 0.25,
        '.' | ',' | ':' | ';' | '!' | '(' | ')' | '[' | ']' | '{' | '}' => 0.321,
        'f' | 't' | 'r' => 0.34,
        'm' | 'w' => 0.84,
        'M' | 'W' => 0.93,
        '@' | '#' | '%' | '&' => 0.946,
        '0'..='9' => 0.6,
        'A'..='Z' => 0.68,
        'a'..='z' => 0.56,
        c if c.is_whitespace() => 0.306,
        c if c.is_ascii() => 0.568,
        // CJK and other wide scripts
        _ => 1.0,
    }
}

static FONT_CACHE: Lazy<Mutex<FontCache>> = Lazy::new(|| Mutex::new(FontCache::new()));

pub fn measure_text_width(text: &str, font_size: f32, font_family: &str) -> Option<f32> {
    if text.is_empty() || font_size <= 0.0 {
        return Some(0.0);
    }
    let mut guard = FONT_CACHE.lock().ok()?;
    let face = guard.face(font_family)?;
    Some(face.width(text, font_size))
}

struct FontCache {
    db: Database,
    loaded_system_fonts: bool,
    faces: HashMap<String, Option<FaceMetrics>>,
}

impl FontCache {
    fn new() -> Self {
        Self {
            db: Database::new(),
            loaded_system_fonts: false,
            faces: HashMap::new(),
        }
    }

    fn face(&mut self, font_family: &str) -> Option<&FaceMetrics> {
        let key = normalize_family_key(font_family);
        if !self.faces.contains_key(&key) {
            let loaded = self.load(font_family);
            tracing::debug!(family = %key, found = loaded.is_some(), "font lookup");
            self.faces.insert(key.clone(), loaded);
        }
        self.faces.get(&key).and_then(|face| face.as_ref())
    }

    fn load(&mut self, font_family: &str) -> Option<FaceMetrics> {
        let names: Vec<String> = font_family
            .split(',')
            .map(|part| part.trim().trim_matches('"').trim_matches('\'').to_string())
            .filter(|part| !part.is_empty())
            .collect();
        let mut families: Vec<Family<'_>> = names
            .iter()
            .map(|name| match name.to_ascii_lowercase().as_str() {
                "serif" => Family::Serif,
                "sans-serif" | "system-ui" | "-apple-system" | "ui-sans-serif" => {
                    Family::SansSerif
                }
                "monospace" | "ui-monospace" => Family::Monospace,
                "cursive" => Family::Cursive,
                "fantasy" => Family::Fantasy,
                _ => Family::Name(name.as_str()),
            })
            .collect();
        if families.is_empty() {
            families.push(Family::SansSerif);
        }

        if !self.loaded_system_fonts {
            self.db.load_system_fonts();
            self.loaded_system_fonts = true;
        }

        let query = Query {
            families: &families,
            weight: Weight::NORMAL,
            stretch: Stretch::Normal,
            style: Style::Normal,
        };
        let id = self.db.query(&query)?;
        self.db
            .with_face_data(id, |data, index| FaceMetrics::parse(data, index))
            .flatten()
    }
}

/// Horizontal advances extracted once from a parsed face, so nothing
/// borrows the font bytes after loading.
struct FaceMetrics {
    units_per_em: f32,
    ascii: [u16; 128],
    other: HashMap<char, u16>,
}

impl FaceMetrics {
    fn parse(data: &[u8], index: u32) -> Option<Self> {
        let face = Face::parse(data, index).ok()?;
        let advance = |ch: char| {
            face.glyph_index(ch)
                .and_then(|glyph| face.glyph_hor_advance(glyph))
                .unwrap_or(0)
        };
        let mut ascii = [0u16; 128];
        for byte in 0u8..=127 {
            ascii[byte as usize] = advance(byte as char);
        }
        // Latin-1 supplement and general punctuation cover typical labels.
        let mut other = HashMap::new();
        for ch in ('\u{a0}'..='\u{17f}').chain('\u{2010}'..='\u{2027}') {
            let value = advance(ch);
            if value > 0 {
                other.insert(ch, value);
            }
        }
        Some(Self {
            units_per_em: face.units_per_em().max(1) as f32,
            ascii,
            other,
        })
    }

    fn width(&self, text: &str, font_size: f32) -> f32 {
        let scale = font_size / self.units_per_em;
        let mut width = 0.0f32;
        for ch in text.chars() {
            if ch == '\n' {
                continue;
            }
            let advance = if ch.is_ascii() {
                self.ascii[ch as usize]
            } else {
                self.other.get(&ch).copied().unwrap_or(0)
            };
            if advance == 0 {
                width += char_width_factor(ch) * font_size;
            } else {
                width += advance as f32 * scale;
            }
        }
        width.max(0.0)
    }
}

fn normalize_family_key(font_family: &str) -> String {
    let trimmed = font_family.trim();
    if trimmed.is_empty() {
        "sans-serif".to_string()
    } else {
        trimmed.to_string()
    }
}
