//! lopdf document writer
//!
//! Builds the page tree by hand: one content stream per page, two shared
//! Type1 fonts, and an Image XObject per drawn raster. Nothing time- or
//! randomness-dependent is written, so equal input gives equal bytes.

use super::{DocumentSurface, Font, TextRotation, TextRun};
use crate::layout::Rect;
use crate::types::*;
use image::DynamicImage;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat};

/// Page being drawn
struct OpenPage {
    width: f32,
    height: f32,
    content: Vec<u8>,
    xobjects: Dictionary,
    image_count: usize,
}

/// Document writer backed by lopdf
pub struct PdfWriter {
    doc: Document,
    pages_id: ObjectId,
    regular_font_id: ObjectId,
    bold_font_id: ObjectId,
    page_ids: Vec<ObjectId>,
    current: Option<OpenPage>,
    title: Option<String>,
}

impl Default for PdfWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfWriter {
    pub fn new() -> Self {
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();
        let regular_font_id = doc.add_object(builtin_font("Helvetica"));
        let bold_font_id = doc.add_object(builtin_font("Helvetica-Bold"));

        Self {
            doc,
            pages_id,
            regular_font_id,
            bold_font_id,
            page_ids: Vec::new(),
            current: None,
            title: None,
        }
    }

    /// Title recorded in the document info dictionary
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    /// Finalize every page drawn so far and return the whole document.
    pub fn serialize(mut self) -> Result<Vec<u8>> {
        self.close_page();

        if self.page_ids.is_empty() {
            return Err(OrderPdfError::NoPages);
        }

        let kids: Vec<Object> = self
            .page_ids
            .iter()
            .map(|&id| Object::Reference(id))
            .collect();
        let count = kids.len() as i64;
        let pages_dict = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Kids", Object::Array(kids)),
            ("Count", Object::Integer(count)),
        ]);
        self.doc
            .objects
            .insert(self.pages_id, Object::Dictionary(pages_dict));

        let catalog_id = self.doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Catalog".to_vec())),
            ("Pages", Object::Reference(self.pages_id)),
        ]));
        self.doc.trailer.set("Root", catalog_id);

        if let Some(title) = &self.title {
            let info_id = self.doc.add_object(Dictionary::from_iter(vec![(
                "Title",
                Object::String(encode_win_ansi(title), StringFormat::Literal),
            )]));
            self.doc.trailer.set("Info", info_id);
        }

        self.doc.compress();

        let mut bytes = Vec::new();
        self.doc.save_to(&mut bytes)?;
        Ok(bytes)
    }

    fn open_page(&mut self) -> Result<&mut OpenPage> {
        self.current
            .as_mut()
            .ok_or_else(|| OrderPdfError::Render("No page has been started".to_string()))
    }

    fn close_page(&mut self) {
        let Some(page) = self.current.take() else {
            return;
        };

        let content_id = self
            .doc
            .add_object(Stream::new(Dictionary::new(), page.content));

        let fonts = Dictionary::from_iter(vec![
            ("F1", Object::Reference(self.regular_font_id)),
            ("F2", Object::Reference(self.bold_font_id)),
        ]);
        let mut resources = Dictionary::new();
        resources.set("Font", Object::Dictionary(fonts));
        if page.image_count > 0 {
            resources.set("XObject", Object::Dictionary(page.xobjects));
        }

        let mut page_dict = Dictionary::new();
        page_dict.set("Type", Object::Name(b"Page".to_vec()));
        page_dict.set("Parent", Object::Reference(self.pages_id));
        page_dict.set(
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(page.width),
                Object::Real(page.height),
            ]),
        );
        page_dict.set("Contents", Object::Reference(content_id));
        page_dict.set("Resources", Object::Dictionary(resources));

        let page_id = self.doc.add_object(page_dict);
        self.page_ids.push(page_id);
    }
}

impl DocumentSurface for PdfWriter {
    fn begin_page(&mut self, width: f32, height: f32) -> Result<()> {
        self.close_page();
        self.current = Some(OpenPage {
            width,
            height,
            content: Vec::new(),
            xobjects: Dictionary::new(),
            image_count: 0,
        });
        Ok(())
    }

    fn draw_text(&mut self, run: &TextRun) -> Result<()> {
        let page = self.open_page()?;
        let font_name = match run.font {
            Font::Helvetica => "F1",
            Font::HelveticaBold => "F2",
        };
        let matrix = match run.rotation {
            TextRotation::None => format!("1 0 0 1 {} {} Tm", run.x, run.y),
            TextRotation::Ccw90 => format!("0 1 -1 0 {} {} Tm", run.x, run.y),
        };

        page.content.extend_from_slice(
            format!("BT /{} {} Tf {} (", font_name, run.size, matrix).as_bytes(),
        );
        page.content
            .extend_from_slice(&escape_literal(&encode_win_ansi(&run.text)));
        page.content.extend_from_slice(b") Tj ET\n");
        Ok(())
    }

    fn draw_image(&mut self, image: &DynamicImage, rect: Rect) -> Result<()> {
        self.open_page()?;
        let stream = image_xobject(&mut self.doc, image);
        let image_id = self.doc.add_object(stream);

        let page = self.open_page()?;
        page.image_count += 1;
        let name = format!("Im{}", page.image_count);
        page.xobjects.set(name.as_bytes(), Object::Reference(image_id));
        page.content.extend_from_slice(
            format!(
                "q {} 0 0 {} {} {} cm /{} Do Q\n",
                rect.width, rect.height, rect.x, rect.y, name
            )
            .as_bytes(),
        );
        Ok(())
    }

    fn page_count(&self) -> usize {
        self.page_ids.len() + usize::from(self.current.is_some())
    }
}

fn builtin_font(base_font: &str) -> Dictionary {
    Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Font".to_vec())),
        ("Subtype", Object::Name(b"Type1".to_vec())),
        ("BaseFont", Object::Name(base_font.as_bytes().to_vec())),
        ("Encoding", Object::Name(b"WinAnsiEncoding".to_vec())),
    ])
}

/// Build an Image XObject; alpha goes into a separate soft mask.
fn image_xobject(doc: &mut Document, image: &DynamicImage) -> Stream {
    let (width, height) = (image.width() as i64, image.height() as i64);

    let mut dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"XObject".to_vec())),
        ("Subtype", Object::Name(b"Image".to_vec())),
        ("Width", Object::Integer(width)),
        ("Height", Object::Integer(height)),
        ("ColorSpace", Object::Name(b"DeviceRGB".to_vec())),
        ("BitsPerComponent", Object::Integer(8)),
    ]);

    if !image.color().has_alpha() {
        return Stream::new(dict, image.to_rgb8().into_raw());
    }

    let rgba = image.to_rgba8();
    let mut rgb = Vec::with_capacity(rgba.len() / 4 * 3);
    let mut alpha = Vec::with_capacity(rgba.len() / 4);
    for pixel in rgba.pixels() {
        rgb.extend_from_slice(&pixel.0[..3]);
        alpha.push(pixel.0[3]);
    }

    let smask = Stream::new(
        Dictionary::from_iter(vec![
            ("Type", Object::Name(b"XObject".to_vec())),
            ("Subtype", Object::Name(b"Image".to_vec())),
            ("Width", Object::Integer(width)),
            ("Height", Object::Integer(height)),
            ("ColorSpace", Object::Name(b"DeviceGray".to_vec())),
            ("BitsPerComponent", Object::Integer(8)),
        ]),
        alpha,
    );
    let smask_id = doc.add_object(smask);
    dict.set("SMask", Object::Reference(smask_id));

    Stream::new(dict, rgb)
}

/// Latin-1 subset of WinAnsi; anything else becomes `?`
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect()
}

fn escape_literal(bytes: &[u8]) -> Vec<u8> {
    let mut escaped = Vec::with_capacity(bytes.len());
    for &b in bytes {
        if matches!(b, b'(' | b')' | b'\\') {
            escaped.push(b'\\');
        }
        escaped.push(b);
    }
    escaped
}
