use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Mutex;
use ttf_parser::Face;

static MEASURER: Lazy<Mutex<TextMeasurer>> = Lazy::new(|| Mutex::new(TextMeasurer::new()));

/// Measure the rendered width of `text` in pixels. Returns `None` when no
/// matching font face can be resolved on this system.
pub fn measure_text_width(text: &str, font_size: f32, font_family: &str) -> Option<f32> {
    if text.is_empty() || font_size <= 0.0 {
        return Some(0.0);
    }
    let mut guard = MEASURER.lock().ok()?;
    guard.measure(text, font_size, font_family)
}

/// Average glyph width over a latin sample, used to estimate how many
/// characters fit in a bar before wrapping.
pub fn average_char_width(font_family: &str, font_size: f32) -> Option<f32> {
    if font_size <= 0.0 {
        return None;
    }
    let sample = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
    let width = measure_text_width(sample, font_size, font_family)?;
    Some(width / sample.len() as f32)
}

struct TextMeasurer {
    db: Database,
    loaded_system_fonts: bool,
    faces: HashMap<String, Option<LoadedFace>>,
}

impl TextMeasurer {
    fn new() -> Self {
        Self {
            db: Database::new(),
            loaded_system_fonts: false,
            faces: HashMap::new(),
        }
    }

    fn measure(&mut self, text: &str, font_size: f32, font_family: &str) -> Option<f32> {
        let key = font_family.trim().to_string();
        if !self.faces.contains_key(&key) {
            let face = self.load_face(font_family);
            self.faces.insert(key.clone(), face);
        }
        let face = self.faces.get(&key).and_then(|f| f.as_ref())?;
        let normalized = text.replace('\t', "    ");
        Some(face.measure(&normalized, font_size))
    }

    fn load_face(&mut self, font_family: &str) -> Option<LoadedFace> {
        if !self.loaded_system_fonts {
            self.db.load_system_fonts();
            self.loaded_system_fonts = true;
        }

        let parts: Vec<String> = font_family
            .split(',')
            .map(|p| p.trim().trim_matches('"').trim_matches('\'').to_string())
            .filter(|p| !p.is_empty())
            .collect();
        let mut families: Vec<Family<'_>> = parts
            .iter()
            .map(|raw| match raw.to_ascii_lowercase().as_str() {
                "serif" => Family::Serif,
                "sans-serif" | "system-ui" | "-apple-system" | "ui-sans-serif" => Family::SansSerif,
                "monospace" | "ui-monospace" => Family::Monospace,
                "cursive" => Family::Cursive,
                "fantasy" => Family::Fantasy,
                _ => Family::Name(raw.as_str()),
            })
            .collect();
        if families.is_empty() {
            families.push(Family::SansSerif);
        }

        let id = self.db.query(&Query {
            families: &families,
            weight: Weight::NORMAL,
            stretch: Stretch::Normal,
            style: Style::Normal,
        })?;

        let mut loaded = None;
        self.db.with_face_data(id, |data, index| {
            if let Ok(face) = Face::parse(data, index) {
                let mut ascii_advances = [0u16; 128];
                for byte in 0u8..=127 {
                    if let Some(glyph) = face.glyph_index(byte as char) {
                        ascii_advances[byte as usize] = face.glyph_hor_advance(glyph).unwrap_or(0);
                    }
                }
                loaded = Some(LoadedFace {
                    data: data.to_vec(),
                    index,
                    units_per_em: face.units_per_em().max(1),
                    ascii_advances,
                });
            }
        });
        loaded
    }
}

struct LoadedFace {
    data: Vec<u8>,
    index: u32,
    units_per_em: u16,
    ascii_advances: [u16; 128],
}

impl LoadedFace {
    fn measure(&self, text: &str, font_size: f32) -> f32 {
        let scale = font_size / self.units_per_em as f32;
        let fallback = font_size * 0.56;

        if text.is_ascii() {
            return text
                .bytes()
                .filter(|b| *b != b'\n')
                .map(|b| {
                    let advance = self.ascii_advances[b as usize];
                    if advance == 0 {
                        fallback
                    } else {
                        advance as f32 * scale
                    }
                })
                .sum();
        }

        let Ok(face) = Face::parse(&self.data, self.index) else {
            return text.chars().filter(|c| *c != '\n').count() as f32 * fallback;
        };
        text.chars()
            .filter(|c| *c != '\n')
            .map(|ch| {
                face.glyph_index(ch)
                    .and_then(|glyph| face.glyph_hor_advance(glyph))
                    .map(|advance| advance as f32 * scale)
                    .unwrap_or(fallback)
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_is_zero() {
        assert_eq!(measure_text_width("", 12.0, "sans-serif"), Some(0.0));
    }

    #[test]
    fn longer_text_measures_wider() {
        // Skips silently on systems without any resolvable font.
        let short = measure_text_width("abc", 12.0, "sans-serif");
        let long = measure_text_width("abcabcabc", 12.0, "sans-serif");
        if let (Some(short), Some(long)) = (short, long) {
            assert!(long > short);
        }
    }
}
