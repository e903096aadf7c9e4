//! Font metrics for PDF generation.
//!
//! Reports are set in the PDF Base-14 fonts, which every viewer ships, so only
//! their advance widths are needed here. Widths are in 1/1000 em and come from
//! the Adobe AFM files for the printable ASCII range; other Latin-1 characters
//! use a per-font fallback.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Typeface family offered by the theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFamily {
    /// Sans-serif
    #[default]
    Helvetica,
    /// Serif
    Times,
    /// Monospace
    Courier,
}

/// Regular or bold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    /// Regular
    #[default]
    Normal,
    /// Bold
    Bold,
}

/// Information about one Base-14 font.
#[derive(Debug, Clone)]
pub struct FontInfo {
    /// PostScript name (e.g., "Helvetica-Bold")
    pub name: String,
    /// Font family
    pub family: FontFamily,
    /// Font weight
    pub weight: FontWeight,
    /// Whether the font is italic/oblique
    pub italic: bool,
    widths: FontWidths,
}

impl FontInfo {
    fn base14(name: &str, family: FontFamily, weight: FontWeight, italic: bool) -> Self {
        let widths = match family {
            FontFamily::Courier => FontWidths::Monospace(600),
            FontFamily::Helvetica => match weight {
                FontWeight::Normal => FontWidths::Proportional(&HELVETICA, 556),
                FontWeight::Bold => FontWidths::Proportional(&HELVETICA_BOLD, 556),
            },
            // Italic Times cuts are close enough to upright for line breaking
            FontFamily::Times => match weight {
                FontWeight::Normal => FontWidths::Proportional(&TIMES_ROMAN, 500),
                FontWeight::Bold => FontWidths::Proportional(&TIMES_BOLD, 500),
            },
        };

        Self {
            name: name.to_string(),
            family,
            weight,
            italic,
            widths,
        }
    }

    /// Width of a single character in font units (1/1000 em).
    pub fn char_width(&self, ch: char) -> f32 {
        self.widths.width_for_char(ch) as f32
    }

    /// Width of text in points at the given size.
    pub fn text_width(&self, text: &str, font_size: f32) -> f32 {
        let units: u32 = text.chars().map(|c| self.widths.width_for_char(c)).sum();
        units as f32 * font_size / 1000.0
    }
}

#[derive(Debug, Clone, Copy)]
enum FontWidths {
    /// Table for U+0020..=U+007E plus the fallback width
    Proportional(&'static [u16; 95], u16),
    Monospace(u16),
}

impl FontWidths {
    fn width_for_char(&self, ch: char) -> u32 {
        match *self {
            FontWidths::Monospace(w) => u32::from(w),
            FontWidths::Proportional(table, fallback) => {
                let code = ch as u32;
                match code {
                    0x20..=0x7E => u32::from(table[(code - 0x20) as usize]),
                    0xA0 => u32::from(table[0]),
                    c if c < 0x20 => 0,
                    _ => u32::from(fallback),
                }
            },
        }
    }
}

/// Width tables for the twelve Base-14 text faces, looked up by PostScript
/// name. Unknown names measure as Helvetica. Also hands out `F1`, `F2`, ...
/// resource names for the writer.
#[derive(Debug, Clone)]
pub struct FontManager {
    fonts: HashMap<String, FontInfo>,
    fallback: FontInfo,
    next_font_id: u32,
}

impl FontManager {
    /// All twelve faces registered.
    pub fn new() -> Self {
        let mut fonts = HashMap::new();
        for family in [FontFamily::Helvetica, FontFamily::Times, FontFamily::Courier] {
            for weight in [FontWeight::Normal, FontWeight::Bold] {
                for italic in [false, true] {
                    let name = base14_name(family, weight, italic);
                    fonts.insert(
                        name.to_string(),
                        FontInfo::base14(name, family, weight, italic),
                    );
                }
            }
        }

        Self {
            fonts,
            fallback: FontInfo::base14(
                "Helvetica",
                FontFamily::Helvetica,
                FontWeight::Normal,
                false,
            ),
            next_font_id: 1,
        }
    }

    /// Metrics for `name`, Helvetica when it is not a Base-14 face.
    pub fn metrics(&self, name: &str) -> &FontInfo {
        self.fonts.get(name).unwrap_or(&self.fallback)
    }

    /// Width of a string in points.
    pub fn text_width(&self, text: &str, font_name: &str, font_size: f32) -> f32 {
        self.metrics(font_name).text_width(text, font_size)
    }

    /// Next unused resource name.
    pub fn next_font_resource_id(&mut self) -> String {
        let id = format!("F{}", self.next_font_id);
        self.next_font_id += 1;
        id
    }

    /// True for the twelve registered faces.
    pub fn is_base14(&self, name: &str) -> bool {
        self.fonts.contains_key(name)
    }

    /// PostScript name of the face for a family, weight and slant.
    pub fn select_font(
        &self,
        family: FontFamily,
        weight: FontWeight,
        italic: bool,
    ) -> &'static str {
        base14_name(family, weight, italic)
    }
}

impl Default for FontManager {
    fn default() -> Self {
        Self::new()
    }
}

fn base14_name(family: FontFamily, weight: FontWeight, italic: bool) -> &'static str {
    match (family, weight, italic) {
        (FontFamily::Helvetica, FontWeight::Normal, false) => "Helvetica",
        (FontFamily::Helvetica, FontWeight::Bold, false) => "Helvetica-Bold",
        (FontFamily::Helvetica, FontWeight::Normal, true) => "Helvetica-Oblique",
        (FontFamily::Helvetica, FontWeight::Bold, true) => "Helvetica-BoldOblique",
        (FontFamily::Times, FontWeight::Normal, false) => "Times-Roman",
        (FontFamily::Times, FontWeight::Bold, false) => "Times-Bold",
        (FontFamily::Times, FontWeight::Normal, true) => "Times-Italic",
        (FontFamily::Times, FontWeight::Bold, true) => "Times-BoldItalic",
        (FontFamily::Courier, FontWeight::Normal, false) => "Courier",
        (FontFamily::Courier, FontWeight::Bold, false) => "Courier-Bold",
        (FontFamily::Courier, FontWeight::Normal, true) => "Courier-Oblique",
        (FontFamily::Courier, FontWeight::Bold, true) => "Courier-BoldOblique",
    }
}

// Advance widths for U+0020..=U+007E, sixteen per row.
#[rustfmt::skip]
static HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
static HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

#[rustfmt::skip]
static TIMES_ROMAN: [u16; 95] = [
    250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 278, 278, 564, 564, 564, 444,
    921, 722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889, 722, 722,
    556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611, 333, 278, 333, 469, 500,
    333, 444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778, 500, 500,
    500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444, 480, 200, 480, 541,
];

#[rustfmt::skip]
static TIMES_BOLD: [u16; 95] = [
    250, 333, 555, 500, 500, 1000, 833, 278, 333, 333, 500, 570, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 333, 333, 570, 570, 570, 500,
    930, 722, 667, 722, 722, 667, 611, 778, 778, 389, 500, 778, 667, 944, 722, 778,
    611, 778, 722, 556, 667, 722, 722, 1000, 722, 722, 667, 333, 278, 333, 581, 500,
    333, 500, 556, 444, 556, 444, 333, 500, 556, 278, 333, 556, 278, 833, 556, 500,
    556, 556, 444, 389, 333, 556, 500, 722, 500, 500, 444, 394, 220, 394, 520,
];

/// Line breaking with Base-14 metrics.
#[derive(Debug, Clone, Default)]
pub struct TextLayout {
    font_manager: FontManager,
}

impl TextLayout {
    /// Create a new text layout helper.
    pub fn new() -> Self {
        Self::default()
    }

    /// Break text into lines no wider than `max_width` points.
    ///
    /// Explicit newlines start a new line; a blank line inside the text is kept
    /// as an empty line. Words wider than a whole line are split by character.
    /// Text that is empty or only whitespace yields no lines.
    ///
    /// Returns (line_text, line_width) pairs, widths in points.
    pub fn wrap_text(
        &self,
        text: &str,
        font_name: &str,
        font_size: f32,
        max_width: f32,
    ) -> Vec<(String, f32)> {
        let font = self.font_manager.metrics(font_name);
        let space_width = font.text_width(" ", font_size);
        let mut lines = Vec::new();

        let trimmed = text.trim();
        if trimmed.is_empty() {
            return lines;
        }

        for paragraph in trimmed.lines() {
            let mut current = String::new();
            let mut current_width = 0.0_f32;

            for word in paragraph.split_whitespace() {
                let word_width = font.text_width(word, font_size);

                if word_width > max_width {
                    // Flush, then hard-break the long word
                    if !current.is_empty() {
                        lines.push((std::mem::take(&mut current), current_width));
                    }
                    let mut pieces = break_word(word, font, font_size, max_width);
                    if let Some((last, last_width)) = pieces.pop() {
                        lines.extend(pieces);
                        current = last;
                        current_width = last_width;
                    }
                } else if current.is_empty() {
                    current.push_str(word);
                    current_width = word_width;
                } else if current_width + space_width + word_width <= max_width {
                    current.push(' ');
                    current.push_str(word);
                    current_width += space_width + word_width;
                } else {
                    lines.push((std::mem::replace(&mut current, word.to_string()), current_width));
                    current_width = word_width;
                }
            }

            lines.push((current, current_width));
        }

        lines
    }

    /// Metrics used for measuring.
    pub fn font_manager(&self) -> &FontManager {
        &self.font_manager
    }
}

/// Split one word into chunks that each fit `max_width`. A chunk always holds
/// at least one character, even when that character alone is too wide.
fn break_word(word: &str, font: &FontInfo, font_size: f32, max_width: f32) -> Vec<(String, f32)> {
    let mut pieces = Vec::new();
    let mut chunk = String::new();
    let mut chunk_width = 0.0_f32;

    for ch in word.chars() {
        let w = font.char_width(ch) * font_size / 1000.0;
        if !chunk.is_empty() && chunk_width + w > max_width {
            pieces.push((std::mem::take(&mut chunk), chunk_width));
            chunk_width = 0.0;
        }
        chunk.push(ch);
        chunk_width += w;
    }
    if !chunk.is_empty() {
        pieces.push((chunk, chunk_width));
    }
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base14_fonts_registered() {
        let manager = FontManager::new();
        for family in [FontFamily::Helvetica, FontFamily::Times, FontFamily::Courier] {
            for weight in [FontWeight::Normal, FontWeight::Bold] {
                assert!(manager.is_base14(manager.select_font(family, weight, false)));
                assert!(manager.is_base14(manager.select_font(family, weight, true)));
            }
        }
        assert!(manager.is_base14("Helvetica-Bold"));
        assert!(manager.is_base14("Times-Roman"));
        assert!(!manager.is_base14("Arial"));
    }

    #[test]
    fn test_helvetica_widths_match_afm() {
        let manager = FontManager::new();
        // "Hello" = H 722 + e 556 + l 222 + l 222 + o 556 = 2278 units
        let width = manager.text_width("Hello", "Helvetica", 10.0);
        assert!((width - 22.78).abs() < 1e-3);
        assert_eq!(manager.metrics("Helvetica-Bold").char_width('W'), 944.0);
    }

    #[test]
    fn test_unknown_font_measures_as_helvetica() {
        let manager = FontManager::new();
        assert_eq!(
            manager.text_width("abc", "NoSuchFont", 12.0),
            manager.text_width("abc", "Helvetica", 12.0)
        );
    }

    #[test]
    fn test_monospace_consistency() {
        let manager = FontManager::new();
        let w1 = manager.text_width("i", "Courier", 12.0);
        let w2 = manager.text_width("W", "Courier-Bold", 12.0);
        assert!((w1 - w2).abs() < 0.001);
    }

    #[test]
    fn test_latin1_fallback_and_controls() {
        let manager = FontManager::new();
        assert_eq!(manager.metrics("Helvetica").char_width('é'), 556.0);
        assert_eq!(manager.metrics("Helvetica").char_width('\u{0007}'), 0.0);
    }

    #[test]
    fn test_font_selection() {
        let manager = FontManager::new();
        let cases = [
            (FontFamily::Helvetica, FontWeight::Bold, false, "Helvetica-Bold"),
            (FontFamily::Helvetica, FontWeight::Normal, true, "Helvetica-Oblique"),
            (FontFamily::Times, FontWeight::Normal, false, "Times-Roman"),
            (FontFamily::Courier, FontWeight::Bold, true, "Courier-BoldOblique"),
        ];
        for (family, weight, italic, name) in cases {
            assert_eq!(manager.select_font(family, weight, italic), name);
        }
    }

    #[test]
    fn test_resource_ids_are_sequential() {
        let mut manager = FontManager::new();
        assert_eq!(manager.next_font_resource_id(), "F1");
        assert_eq!(manager.next_font_resource_id(), "F2");
    }

    #[test]
    fn test_wrap_respects_width() {
        let layout = TextLayout::new();
        let text = "The quick brown fox jumps over the lazy dog";
        let lines = layout.wrap_text(text, "Helvetica", 12.0, 100.0);

        assert!(lines.len() > 1);
        for (line, width) in &lines {
            assert!(!line.is_empty());
            assert!(*width <= 100.0);
        }
        let rejoined: Vec<&str> = lines.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(rejoined.join(" "), text);
    }

    #[test]
    fn test_wrap_keeps_paragraph_breaks() {
        let layout = TextLayout::new();
        let lines = layout.wrap_text("First.\n\nSecond.\n", "Helvetica", 11.0, 500.0);
        let texts: Vec<&str> = lines.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(texts, vec!["First.", "", "Second."]);
    }

    #[test]
    fn test_wrap_breaks_long_word() {
        let layout = TextLayout::new();
        let word = "a".repeat(200);
        let lines = layout.wrap_text(&word, "Helvetica", 12.0, 50.0);

        assert!(lines.len() > 1);
        assert!(lines.iter().all(|(_, w)| *w <= 50.0));
        let total: usize = lines.iter().map(|(l, _)| l.len()).sum();
        assert_eq!(total, 200);
    }

    #[test]
    fn test_empty_text_has_no_lines() {
        let layout = TextLayout::new();
        assert!(layout.wrap_text("", "Helvetica", 12.0, 100.0).is_empty());
        assert!(layout.wrap_text(" \n\t", "Helvetica", 12.0, 100.0).is_empty());
    }
}
