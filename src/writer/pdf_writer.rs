//! Report PDF assembly.
//!
//! Writes the header, every object, the xref table and the trailer. Object
//! numbers follow a fixed order (catalog, page tree, fonts, pages, info), so
//! identical input gives identical bytes.

use super::content_stream::ContentStreamBuilder;
use super::font_manager::FontManager;
use super::object_serializer::ObjectSerializer;
use crate::error::Result;
use crate::fonts::to_latin1_bytes;
use crate::object::{Dictionary, Object, ObjectRef};
use chrono::NaiveDate;
use std::io::Write;

/// A4 page size in points.
pub const A4_POINTS: (f32, f32) = (595.28, 841.89);

/// Document-level settings: Info dictionary entries and stream encoding.
#[derive(Debug, Clone)]
pub struct PdfWriterConfig {
    /// Header version, `%PDF-<version>`
    pub version: String,
    /// Info `Title`
    pub title: Option<String>,
    /// Info `Author`
    pub author: Option<String>,
    /// Info `Creator`, this library unless overridden
    pub creator: Option<String>,
    /// Info `CreationDate`, written as midnight of that day
    pub creation_date: Option<NaiveDate>,
    /// FlateDecode page content
    pub compress: bool,
}

impl Default for PdfWriterConfig {
    fn default() -> Self {
        Self {
            version: "1.7".to_string(),
            title: None,
            author: None,
            creator: Some(format!("{} {}", crate::NAME, crate::VERSION)),
            creation_date: None,
            compress: false,
        }
    }
}

impl PdfWriterConfig {
    /// Info `Title`.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Info `Author`.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Info `CreationDate`.
    pub fn with_creation_date(mut self, date: NaiveDate) -> Self {
        self.creation_date = Some(date);
        self
    }

    /// Toggle FlateDecode on page content.
    pub fn with_compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }
}

fn deflate(raw: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(raw)?;
    encoder.finish()
}

/// Widen to f64 at 1/100 pt so f32 noise does not reach the output.
fn hundredths(value: f32) -> f64 {
    (f64::from(value) * 100.0).round() / 100.0
}

/// Drawing access to one page. Coordinates are in points, origin bottom-left.
pub struct PageBuilder<'a> {
    writer: &'a mut PdfWriter,
    page_index: usize,
}

impl<'a> PageBuilder<'a> {
    /// Add one line of text with its baseline at (x, y).
    pub fn add_text(
        &mut self,
        text: &str,
        x: f32,
        y: f32,
        font_name: &str,
        font_size: f32,
    ) -> &mut Self {
        let resource_id = self.writer.font_resource(font_name);
        self.writer.pages[self.page_index]
            .content
            .set_font(&resource_id, font_size)
            .text(text, x, y);
        self
    }

    /// Set the fill color (0.0-1.0 components) for following text.
    pub fn set_fill_color(&mut self, r: f32, g: f32, b: f32) -> &mut Self {
        self.writer.pages[self.page_index]
            .content
            .set_fill_color(r, g, b);
        self
    }

    /// Stroke a horizontal or arbitrary straight line.
    pub fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, width: f32) -> &mut Self {
        self.writer.pages[self.page_index]
            .content
            .line(x1, y1, x2, y2, width, (0.0, 0.0, 0.0));
        self
    }

    /// Index of the page being drawn.
    pub fn index(&self) -> usize {
        self.page_index
    }

    /// Finish drawing and return to the writer.
    pub fn finish(self) -> &'a mut PdfWriter {
        self.writer.pages[self.page_index].content.end_text();
        self.writer
    }
}

struct PageData {
    width: f32,
    height: f32,
    content: ContentStreamBuilder,
}

/// PDF document writer.
///
/// Pages stay open until [`PdfWriter::finish`], so a page can be revisited
/// with [`PdfWriter::page`] after later pages exist (e.g. to stamp a
/// "Page 3 of 9" footer once the total is known).
pub struct PdfWriter {
    config: PdfWriterConfig,
    pages: Vec<PageData>,
    font_manager: FontManager,
    /// Fonts in first-use order: (base font name, resource id)
    fonts: Vec<(String, String)>,
}

impl PdfWriter {
    /// Create a new PDF writer with default config.
    pub fn new() -> Self {
        Self::with_config(PdfWriterConfig::default())
    }

    /// Create a PDF writer with custom config.
    pub fn with_config(config: PdfWriterConfig) -> Self {
        Self {
            config,
            pages: Vec::new(),
            font_manager: FontManager::new(),
            fonts: Vec::new(),
        }
    }

    /// Add a page with the given dimensions in points.
    pub fn add_page(&mut self, width: f32, height: f32) -> PageBuilder<'_> {
        let page_index = self.pages.len();
        self.pages.push(PageData {
            width,
            height,
            content: ContentStreamBuilder::new(),
        });
        PageBuilder {
            writer: self,
            page_index,
        }
    }

    /// Add an A4 sized page (210mm x 297mm).
    pub fn add_a4_page(&mut self) -> PageBuilder<'_> {
        self.add_page(A4_POINTS.0, A4_POINTS.1)
    }

    /// Reopen an existing page for drawing.
    pub fn page(&mut self, index: usize) -> Option<PageBuilder<'_>> {
        if index < self.pages.len() {
            Some(PageBuilder {
                writer: self,
                page_index: index,
            })
        } else {
            None
        }
    }

    /// Number of pages added so far.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Resource name for a Base-14 font, registering it on first use.
    ///
    /// Names that are not Base-14 fall back to Helvetica.
    pub fn font_resource(&mut self, font_name: &str) -> String {
        let base = if self.font_manager.is_base14(font_name) {
            font_name
        } else {
            log::warn!("Font '{}' is not a Base-14 font, using Helvetica", font_name);
            "Helvetica"
        };

        if let Some((_, id)) = self.fonts.iter().find(|(name, _)| name == base) {
            return id.clone();
        }
        let id = self.font_manager.next_font_resource_id();
        self.fonts.push((base.to_string(), id.clone()));
        id
    }

    /// Build the complete PDF document.
    pub fn finish(self) -> Result<Vec<u8>> {
        let serializer = ObjectSerializer::compact();
        let mut objects: Vec<(u32, Object)> = Vec::new();

        let catalog_id = 1;
        let pages_id = 2;
        let mut next_id = 3;

        // Fonts
        let mut font_resources = Dictionary::new();
        for (base_name, resource_id) in &self.fonts {
            let font_obj = ObjectSerializer::dict(vec![
                ("Type", ObjectSerializer::name("Font")),
                ("Subtype", ObjectSerializer::name("Type1")),
                ("BaseFont", ObjectSerializer::name(base_name)),
                ("Encoding", ObjectSerializer::name("WinAnsiEncoding")),
            ]);
            font_resources.insert(resource_id.clone(), ObjectRef::new(next_id, 0).into());
            objects.push((next_id, font_obj));
            next_id += 1;
        }
        let resources = ObjectSerializer::dict(vec![
            ("Font", Object::Dictionary(font_resources)),
            (
                "ProcSet",
                Object::Array(vec![
                    ObjectSerializer::name("PDF"),
                    ObjectSerializer::name("Text"),
                ]),
            ),
        ]);

        // Pages and their content streams
        let mut kids: Vec<Object> = Vec::with_capacity(self.pages.len());
        for page in &self.pages {
            let page_id = next_id;
            let content_id = next_id + 1;
            next_id += 2;

            let raw = page.content.build();
            let mut content_dict = Dictionary::new();
            let data = if self.config.compress {
                content_dict.insert("Filter".to_string(), ObjectSerializer::name("FlateDecode"));
                deflate(&raw)?
            } else {
                raw
            };
            content_dict.insert("Length".to_string(), ObjectSerializer::integer(data.len() as i64));

            let page_obj = ObjectSerializer::dict(vec![
                ("Type", ObjectSerializer::name("Page")),
                ("Parent", ObjectSerializer::reference(ObjectRef::new(pages_id, 0))),
                (
                    "MediaBox",
                    ObjectSerializer::rect(
                        0.0,
                        0.0,
                        hundredths(page.width),
                        hundredths(page.height),
                    ),
                ),
                ("Contents", ObjectSerializer::reference(ObjectRef::new(content_id, 0))),
                ("Resources", resources.clone()),
            ]);

            kids.push(ObjectRef::new(page_id, 0).into());
            objects.push((page_id, page_obj));
            objects.push((
                content_id,
                Object::Stream {
                    dict: content_dict,
                    data: bytes::Bytes::from(data),
                },
            ));
        }

        let pages_obj = ObjectSerializer::dict(vec![
            ("Type", ObjectSerializer::name("Pages")),
            ("Kids", Object::Array(kids)),
            ("Count", ObjectSerializer::integer(self.pages.len() as i64)),
        ]);
        let catalog_obj = ObjectSerializer::dict(vec![
            ("Type", ObjectSerializer::name("Catalog")),
            ("Pages", ObjectSerializer::reference(ObjectRef::new(pages_id, 0))),
        ]);

        let info_id = next_id;
        let size = info_id + 1;
        let mut info_entries = Vec::new();
        let text_fields = [
            ("Title", &self.config.title),
            ("Author", &self.config.author),
            ("Creator", &self.config.creator),
        ];
        for (key, value) in text_fields {
            if let Some(value) = value {
                info_entries.push((key, ObjectSerializer::bytes(to_latin1_bytes(value))));
            }
        }
        if let Some(date) = self.config.creation_date {
            let stamp = format!("D:{}000000", date.format("%Y%m%d"));
            info_entries.push(("CreationDate", ObjectSerializer::bytes(stamp.into_bytes())));
        }
        let info_obj = ObjectSerializer::dict(info_entries);

        objects.insert(0, (pages_id, pages_obj));
        objects.insert(0, (catalog_id, catalog_obj));
        objects.push((info_id, info_obj));

        // Header with binary marker
        let mut output = Vec::new();
        writeln!(output, "%PDF-{}", self.config.version)?;
        output.extend_from_slice(b"%\xE2\xE3\xCF\xD3\n");

        let mut offsets = Vec::with_capacity(objects.len());
        for (id, obj) in &objects {
            offsets.push((*id, output.len()));
            output.extend_from_slice(&serializer.serialize_indirect(*id, 0, obj));
        }
        offsets.sort_by_key(|(id, _)| *id);

        let xref_start = output.len();
        writeln!(output, "xref")?;
        writeln!(output, "0 {}", size)?;
        writeln!(output, "0000000000 65535 f ")?;
        for (_, offset) in &offsets {
            writeln!(output, "{:010} 00000 n ", offset)?;
        }

        let trailer = ObjectSerializer::dict(vec![
            ("Size", ObjectSerializer::integer(i64::from(size))),
            ("Root", ObjectSerializer::reference(ObjectRef::new(catalog_id, 0))),
            ("Info", ObjectSerializer::reference(ObjectRef::new(info_id, 0))),
        ]);
        writeln!(output, "trailer")?;
        output.extend_from_slice(&serializer.serialize(&trailer));
        writeln!(output)?;
        writeln!(output, "startxref")?;
        writeln!(output, "{}", xref_start)?;
        write!(output, "%%EOF")?;

        log::debug!(
            "Wrote PDF: {} page(s), {} font(s), {} bytes",
            self.pages.len(),
            self.fonts.len(),
            output.len()
        );
        Ok(output)
    }
}

impl Default for PdfWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn as_text(bytes: &[u8]) -> String {
        String::from_utf8_lossy(bytes).into_owned()
    }

    fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
        haystack.windows(needle.len()).position(|w| w == needle)
    }

    #[test]
    fn test_create_empty_pdf() {
        let mut writer = PdfWriter::new();
        writer.add_a4_page().finish();
        let content = as_text(&writer.finish().unwrap());

        assert!(content.starts_with("%PDF-1.7"));
        assert!(content.contains("/Type /Catalog"));
        assert!(content.contains("/Count 1"));
        assert!(content.contains("/MediaBox [0 0 595.28 841.89]"));
        assert!(content.ends_with("%%EOF"));
    }

    #[test]
    fn test_font_resources_are_mapped() {
        let mut writer = PdfWriter::new();
        {
            let mut page = writer.add_a4_page();
            page.add_text("Title", 72.0, 720.0, "Helvetica-Bold", 16.0);
            page.add_text("Body", 72.0, 700.0, "Helvetica", 11.0);
            page.add_text("More", 72.0, 690.0, "Helvetica-Bold", 16.0);
            page.finish();
        }
        let content = as_text(&writer.finish().unwrap());

        assert!(content.contains("/BaseFont /Helvetica-Bold"));
        assert!(content.contains("/BaseFont /Helvetica/Encoding"));
        assert!(content.contains("/F1 3 0 R"));
        assert!(content.contains("/F2 4 0 R"));
        assert!(content.contains("/F1 16 Tf"));
        assert!(content.contains("/F2 11 Tf"));
        assert!(content.contains("(Title) Tj"));
    }

    #[test]
    fn test_unknown_font_falls_back() {
        let mut writer = PdfWriter::new();
        assert_eq!(writer.font_resource("Comic Sans"), "F1");
        assert_eq!(writer.font_resource("Helvetica"), "F1");
    }

    #[test]
    fn test_reopen_page() {
        let mut writer = PdfWriter::new();
        writer.add_a4_page().finish();
        writer.add_a4_page().finish();
        assert_eq!(writer.page_count(), 2);
        assert!(writer.page(2).is_none());

        writer
            .page(0)
            .unwrap()
            .add_text("Page 1 of 2", 280.0, 40.0, "Helvetica-Oblique", 8.0)
            .draw_line(28.0, 790.0, 567.0, 790.0, 0.2);

        let content = as_text(&writer.finish().unwrap());
        assert!(content.contains("(Page 1 of 2) Tj"));
        assert!(content.contains("/Count 2"));
    }

    #[test]
    fn test_metadata_latin1() {
        let config = PdfWriterConfig::default()
            .with_title("Café")
            .with_author("Student")
            .with_creation_date(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        let mut writer = PdfWriter::with_config(config);
        writer.add_a4_page().finish();
        let content = as_text(&writer.finish().unwrap());

        assert!(content.contains("/Title <436166E9>"));
        assert!(content.contains("/Author (Student)"));
        assert!(content.contains("/CreationDate (D:20240305000000)"));
    }

    #[test]
    fn test_compressed_stream() {
        use std::io::Read;

        let config = PdfWriterConfig::default().with_compress(true);
        let mut writer = PdfWriter::with_config(config);
        writer
            .add_a4_page()
            .add_text("Compressed", 72.0, 720.0, "Helvetica", 12.0);
        let bytes = writer.finish().unwrap();
        assert!(as_text(&bytes).contains("/Filter /FlateDecode"));

        let start = find(&bytes, b"\nstream\n").unwrap() + b"\nstream\n".len();
        let end = start + find(&bytes[start..], b"\nendstream").unwrap();
        let mut decoded = String::new();
        flate2::read::ZlibDecoder::new(&bytes[start..end])
            .read_to_string(&mut decoded)
            .unwrap();
        assert!(decoded.contains("(Compressed) Tj"));
        assert!(decoded.ends_with("ET\n"));
    }

    #[test]
    fn test_output_is_deterministic() {
        let build = || {
            let mut writer = PdfWriter::new();
            writer
                .add_a4_page()
                .add_text("Same", 10.0, 10.0, "Times-Roman", 12.0);
            writer.finish().unwrap()
        };
        assert_eq!(build(), build());
    }

    #[test]
    fn test_xref_offsets_point_at_objects() {
        let mut writer = PdfWriter::new();
        writer.add_a4_page().add_text("x", 1.0, 1.0, "Helvetica", 10.0);
        let bytes = writer.finish().unwrap();

        // Offsets count raw bytes; the binary comment line is not UTF-8.
        let xref = find(&bytes, b"xref\n").unwrap();
        let table = std::str::from_utf8(&bytes[xref..]).unwrap();
        for (id, entry) in table.lines().skip(3).take(6).enumerate() {
            let offset: usize = entry[..10].parse().unwrap();
            let header = format!("{} 0 obj", id + 1);
            assert_eq!(&bytes[offset..offset + header.len()], header.as_bytes());
        }
    }
}
