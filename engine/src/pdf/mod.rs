//! # PDF Serializer
//!
//! Takes laid-out pages and writes a PDF 1.7 file byte by byte. The subset
//! reports need is small: two standard Type1 fonts, filled and stroked
//! rectangles, single-font text lines and raster images.
//!
//! ## PDF Structure (simplified)
//!
//! ```text
//! %PDF-1.7            <- header
//! 1 0 obj ... endobj  <- objects (fonts, pages, content streams, etc.)
//! 2 0 obj ... endobj
//! ...
//! xref                <- cross-reference table (byte offsets of each object)
//! trailer             <- points to the root object
//! %%EOF
//! ```
//!
//! Layout works in millimetres from the top-left corner; PDF user space is
//! points from the bottom-left. Every coordinate is converted on the way out.

use std::collections::{BTreeSet, HashMap};
use std::fmt::Write as FmtWrite;
use std::io::Write as IoWrite;
use std::sync::Arc;

use log::{debug, warn};
use miniz_oxide::deflate::compress_to_vec_zlib;

use crate::error::FolioError;
use crate::font::{winansi_byte, StandardFont, PT_PER_MM};
use crate::image_loader::{ImagePixelData, JpegColorSpace, LoadedImage};
use crate::layout::{DrawCommand, LayoutElement, LayoutPage, TextLine};
use crate::style::Color;

/// Document information dictionary entries.
#[derive(Debug, Clone, Default)]
pub struct Metadata {
    pub title: Option<String>,
    pub author: Option<String>,
    /// Already in PDF date form, `D:YYYYMMDDHHmmSS`.
    pub creation_date: Option<String>,
}

pub struct PdfWriter;

/// Tracks allocated PDF objects during writing.
struct PdfBuilder {
    objects: Vec<PdfObject>,
    /// Font resource name index (`/F0`, `/F1`) to object id.
    font_objects: Vec<(StandardFont, usize)>,
    /// XObject ids, indexed as `/Im0`, `/Im1`, ...
    image_objects: Vec<usize>,
    /// Identity of a shared image to its index in `image_objects`.
    image_index: HashMap<*const LoadedImage, usize>,
}

struct PdfObject {
    data: Vec<u8>,
}

fn pt(mm: f64) -> f64 {
    mm * PT_PER_MM
}

impl Default for PdfWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfWriter {
    pub fn new() -> Self {
        Self
    }

    /// Write laid-out pages to a PDF byte vector.
    pub fn write(&self, pages: &[LayoutPage], metadata: &Metadata) -> Result<Vec<u8>, FolioError> {
        if pages.is_empty() {
            return Err(FolioError::Render("document has no pages".to_string()));
        }

        let mut builder = PdfBuilder {
            objects: Vec::new(),
            font_objects: Vec::new(),
            image_objects: Vec::new(),
            image_index: HashMap::new(),
        };

        // 0 = placeholder (PDF objects are 1-indexed), 1 = Catalog, 2 = Pages
        for _ in 0..3 {
            builder.objects.push(PdfObject { data: Vec::new() });
        }

        self.register_fonts(&mut builder, pages);
        self.register_images(&mut builder, pages);
        Self::warn_unencodable(pages);

        let font_resources = self.build_font_resource_dict(&builder);
        let mut page_obj_ids: Vec<usize> = Vec::with_capacity(pages.len());

        for page in pages {
            let content = self.build_content_stream(page, &builder)?;
            let compressed = compress_to_vec_zlib(content.as_bytes(), 6);

            let content_obj_id = builder.objects.len();
            let mut content_data: Vec<u8> = Vec::new();
            write!(
                content_data,
                "<< /Length {} /Filter /FlateDecode >>\nstream\n",
                compressed.len()
            )
            .map_err(|e| FolioError::Render(e.to_string()))?;
            content_data.extend_from_slice(&compressed);
            content_data.extend_from_slice(b"\nendstream");
            builder.objects.push(PdfObject { data: content_data });

            let xobjects = self.build_xobject_resource_dict(page, &builder);
            let resources = if xobjects.is_empty() {
                format!("/Font << {} >>", font_resources)
            } else {
                format!("/Font << {} >> /XObject << {} >>", font_resources, xobjects)
            };
            let page_obj_id = builder.objects.len();
            let page_dict = format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {:.2} {:.2}] \
                 /Contents {} 0 R /Resources << {} >> >>",
                pt(page.width),
                pt(page.height),
                content_obj_id,
                resources
            );
            builder.objects.push(PdfObject {
                data: page_dict.into_bytes(),
            });
            page_obj_ids.push(page_obj_id);
        }

        builder.objects[1].data = b"<< /Type /Catalog /Pages 2 0 R >>".to_vec();

        let kids: String = page_obj_ids
            .iter()
            .map(|id| format!("{} 0 R", id))
            .collect::<Vec<_>>()
            .join(" ");
        builder.objects[2].data = format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids,
            page_obj_ids.len()
        )
        .into_bytes();

        let info_obj_id = builder.objects.len();
        builder.objects.push(PdfObject {
            data: Self::info_dict(metadata).into_bytes(),
        });

        debug!(
            "pdf: {} pages, {} fonts, {} images, {} objects",
            pages.len(),
            builder.font_objects.len(),
            builder.image_objects.len(),
            builder.objects.len() - 1
        );
        Ok(self.serialize(&builder, info_obj_id))
    }

    fn info_dict(metadata: &Metadata) -> String {
        let mut info = String::from("<< ");
        let entries = [
            ("Title", &metadata.title),
            ("Author", &metadata.author),
            ("CreationDate", &metadata.creation_date),
        ];
        for (key, value) in entries {
            if let Some(value) = value {
                info.push_str(&format!("/{} ({}) ", key, Self::encode_text(value)));
            }
        }
        info.push_str("/Producer (Folio) /Creator (Folio) >>");
        info
    }

    /// The standard fonts only cover WinAnsi; anything else prints as `?`.
    /// Reported once per document with the number of affected characters.
    fn warn_unencodable(pages: &[LayoutPage]) {
        let mut missing = 0usize;
        let mut first: Option<char> = None;
        for page in pages {
            for element in &page.elements {
                if let DrawCommand::Text { lines, .. } = &element.draw {
                    for ch in lines.iter().flat_map(|l| l.text.chars()) {
                        if winansi_byte(ch).is_none() {
                            missing += 1;
                            first.get_or_insert(ch);
                        }
                    }
                }
            }
        }
        if let Some(ch) = first {
            warn!(
                "pdf: {} character(s) outside WinAnsi printed as '?', first was {:?}",
                missing, ch
            );
        }
    }

    /// One Type1 font object per standard font actually drawn, in a stable
    /// order so the same pages always produce the same resource names.
    fn register_fonts(&self, builder: &mut PdfBuilder, pages: &[LayoutPage]) {
        let mut used: BTreeSet<StandardFont> = BTreeSet::new();
        for page in pages {
            for element in &page.elements {
                if let DrawCommand::Text { font, .. } = &element.draw {
                    used.insert(font.standard());
                }
            }
        }
        // Pages need a font resource even when nothing is written.
        if used.is_empty() {
            used.insert(StandardFont::TimesRoman);
        }

        for font in used {
            let obj_id = builder.objects.len();
            let dict = format!(
                "<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>",
                font.pdf_name()
            );
            builder.objects.push(PdfObject {
                data: dict.into_bytes(),
            });
            builder.font_objects.push((font, obj_id));
        }
    }

    fn font_index(&self, font: StandardFont, builder: &PdfBuilder) -> Option<usize> {
        builder.font_objects.iter().position(|(f, _)| *f == font)
    }

    fn build_font_resource_dict(&self, builder: &PdfBuilder) -> String {
        builder
            .font_objects
            .iter()
            .enumerate()
            .map(|(i, (_, obj_id))| format!("/F{} {} 0 R", i, obj_id))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Write each distinct image once. The same logo on several cover pages
    /// shares one XObject.
    fn register_images(&self, builder: &mut PdfBuilder, pages: &[LayoutPage]) {
        for page in pages {
            for element in &page.elements {
                if let DrawCommand::Image { image } = &element.draw {
                    let key = Arc::as_ptr(image);
                    if builder.image_index.contains_key(&key) {
                        continue;
                    }
                    let obj_id = Self::write_image_xobject(builder, image);
                    builder.image_index.insert(key, builder.image_objects.len());
                    builder.image_objects.push(obj_id);
                }
            }
        }
    }

    /// Write a single image as one or two XObject PDF objects.
    /// Returns the main XObject ID.
    fn write_image_xobject(builder: &mut PdfBuilder, image: &LoadedImage) -> usize {
        let (filter, color_space, payload, smask_id) = match &image.pixel_data {
            ImagePixelData::Jpeg { data, color_space } => {
                let space = match color_space {
                    JpegColorSpace::DeviceRGB => "/DeviceRGB",
                    JpegColorSpace::DeviceGray => "/DeviceGray",
                };
                ("/DCTDecode", space, data.clone(), None)
            }
            ImagePixelData::Decoded { rgb, alpha } => {
                let smask_id = alpha.as_ref().map(|alpha| {
                    let compressed = compress_to_vec_zlib(alpha, 6);
                    Self::push_image_object(
                        builder,
                        image,
                        "/FlateDecode",
                        "/DeviceGray",
                        &compressed,
                        None,
                    )
                });
                ("/FlateDecode", "/DeviceRGB", compress_to_vec_zlib(rgb, 6), smask_id)
            }
        };
        Self::push_image_object(builder, image, filter, color_space, &payload, smask_id)
    }

    fn push_image_object(
        builder: &mut PdfBuilder,
        image: &LoadedImage,
        filter: &str,
        color_space: &str,
        payload: &[u8],
        smask_id: Option<usize>,
    ) -> usize {
        let obj_id = builder.objects.len();
        let smask_ref = smask_id
            .map(|id| format!(" /SMask {} 0 R", id))
            .unwrap_or_default();
        let mut data = format!(
            "<< /Type /XObject /Subtype /Image /Width {} /Height {} \
             /ColorSpace {} /BitsPerComponent 8 /Filter {} /Length {}{} >>\nstream\n",
            image.width_px,
            image.height_px,
            color_space,
            filter,
            payload.len(),
            smask_ref
        )
        .into_bytes();
        data.extend_from_slice(payload);
        data.extend_from_slice(b"\nendstream");
        builder.objects.push(PdfObject { data });
        obj_id
    }

    /// The /XObject resource entries for the images drawn on one page.
    fn build_xobject_resource_dict(&self, page: &LayoutPage, builder: &PdfBuilder) -> String {
        let mut indices: BTreeSet<usize> = BTreeSet::new();
        for element in &page.elements {
            if let DrawCommand::Image { image } = &element.draw {
                if let Some(&idx) = builder.image_index.get(&Arc::as_ptr(image)) {
                    indices.insert(idx);
                }
            }
        }
        indices
            .iter()
            .map(|idx| format!("/Im{} {} 0 R", idx, builder.image_objects[*idx]))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Build the PDF content stream for a single page.
    fn build_content_stream(&self, page: &LayoutPage, builder: &PdfBuilder) -> Result<String, FolioError> {
        let mut stream = String::new();
        for element in &page.elements {
            self.write_element(&mut stream, element, page.height, builder)
                .map_err(|e| FolioError::Render(format!("content stream: {}", e)))?;
        }
        Ok(stream)
    }

    /// Write a single layout element as PDF operators.
    fn write_element(
        &self,
        stream: &mut String,
        element: &LayoutElement,
        page_height: f64,
        builder: &PdfBuilder,
    ) -> std::fmt::Result {
        let x = pt(element.x);
        let y = pt(page_height - element.y - element.height);
        let w = pt(element.width);
        let h = pt(element.height);

        match &element.draw {
            DrawCommand::Rect { fill, stroke } => {
                if let Some(fill) = fill {
                    writeln!(stream, "q\n{} rg\n{:.2} {:.2} {:.2} {:.2} re\nf\nQ", Self::color(fill), x, y, w, h)?;
                }
                if let Some(stroke) = stroke {
                    writeln!(
                        stream,
                        "q\n{} RG\n{:.2} w\n{:.2} {:.2} {:.2} {:.2} re\nS\nQ",
                        Self::color(&stroke.color),
                        pt(stroke.width),
                        x,
                        y,
                        w,
                        h
                    )?;
                }
            }

            DrawCommand::Text { lines, font, color } => {
                let index = self.font_index(font.standard(), builder).unwrap_or(0);
                writeln!(stream, "BT\n{} rg\n/F{} {:.1} Tf", Self::color(color), index, font.size)?;
                for line in lines {
                    self.write_line(stream, line, page_height)?;
                }
                writeln!(stream, "ET")?;
            }

            DrawCommand::Image { image } => match builder.image_index.get(&Arc::as_ptr(image)) {
                Some(idx) => {
                    writeln!(stream, "q\n{:.4} 0 0 {:.4} {:.2} {:.2} cm\n/Im{} Do\nQ", w, h, x, y, idx)?;
                }
                None => Self::write_placeholder(stream, x, y, w, h)?,
            },

            DrawCommand::ImagePlaceholder => Self::write_placeholder(stream, x, y, w, h)?,
        }
        Ok(())
    }

    fn write_line(&self, stream: &mut String, line: &TextLine, page_height: f64) -> std::fmt::Result {
        writeln!(
            stream,
            "1 0 0 1 {:.2} {:.2} Tm\n({}) Tj",
            pt(line.x),
            pt(page_height - line.y),
            Self::encode_text(&line.text)
        )
    }

    fn write_placeholder(stream: &mut String, x: f64, y: f64, w: f64, h: f64) -> std::fmt::Result {
        let grey = Color::PLACEHOLDER;
        writeln!(
            stream,
            "q\n{} rg\n{:.2} {:.2} {:.2} {:.2} re\nf\nQ",
            Self::color(&grey),
            x,
            y,
            w,
            h
        )
    }

    fn color(c: &Color) -> String {
        format!("{:.3} {:.3} {:.3}", c.r, c.g, c.b)
    }

    /// Encode text for a literal string in WinAnsiEncoding, escaping the
    /// delimiters and writing non-ASCII bytes as octal escapes.
    fn encode_text(s: &str) -> String {
        let mut out = String::with_capacity(s.len());
        for ch in s.chars() {
            let b = winansi_byte(ch).unwrap_or(b'?');
            match b {
                b'\\' => out.push_str("\\\\"),
                b'(' => out.push_str("\\("),
                b')' => out.push_str("\\)"),
                0x20..=0x7E => out.push(b as char),
                _ => {
                    let _ = write!(out, "\\{:03o}", b);
                }
            }
        }
        out
    }

    /// Serialize all objects into the final PDF byte stream.
    fn serialize(&self, builder: &PdfBuilder, info_obj_id: usize) -> Vec<u8> {
        let mut output: Vec<u8> = Vec::new();
        let mut offsets: Vec<usize> = vec![0; builder.objects.len()];

        output.extend_from_slice(b"%PDF-1.7\n");
        output.extend_from_slice(b"%\xe2\xe3\xcf\xd3\n");

        for (i, obj) in builder.objects.iter().enumerate().skip(1) {
            offsets[i] = output.len();
            output.extend_from_slice(format!("{} 0 obj\n", i).as_bytes());
            output.extend_from_slice(&obj.data);
            output.extend_from_slice(b"\nendobj\n\n");
        }

        let xref_offset = output.len();
        let mut tail = format!("xref\n0 {}\n0000000000 65535 f \n", builder.objects.len());
        for offset in offsets.iter().skip(1) {
            tail.push_str(&format!("{:010} 00000 n \n", offset));
        }
        tail.push_str(&format!(
            "trailer\n<< /Size {} /Root 1 0 R /Info {} 0 R >>\nstartxref\n{}\n%%EOF\n",
            builder.objects.len(),
            info_obj_id,
            xref_offset
        ));
        output.extend_from_slice(tail.as_bytes());
        output
    }
}
