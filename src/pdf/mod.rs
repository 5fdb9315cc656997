//! # PDF Serializer
//!
//! Takes the laid-out pages from the layout engine and writes a valid PDF file.
//!
//! This is a from-scratch PDF 1.7 writer. A resume only ever needs the
//! standard fonts, single-line text runs and horizontal rules, so the subset
//! of the format we emit is small: no embedding, no images, no annotations.
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
//! Nothing time-dependent is written, so the same pages always produce the
//! same bytes.

use std::collections::BTreeSet;
use std::io::Write as IoWrite;

use log::warn;
use miniz_oxide::deflate::compress_to_vec_zlib;

use crate::config::RenderConfig;
use crate::font::metrics::winansi_code;
use crate::font::StandardFont;
use crate::layout::{DrawCommand, LayoutPage};

const PRODUCER: &str = concat!("resume-pdf ", env!("CARGO_PKG_VERSION"));
const CREATOR: &str = "resume-pdf";

/// Written into the PDF Info dictionary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    pub title: Option<String>,
    pub author: Option<String>,
}

#[derive(Debug, Default)]
pub struct PdfWriter;

/// Tracks allocated PDF objects during writing.
struct PdfBuilder {
    objects: Vec<PdfObject>,
    /// Each used face with its object id, in `StandardFont` order. A face's
    /// position here is its `/F<n>` resource name.
    font_objects: Vec<(StandardFont, usize)>,
}

struct PdfObject {
    data: Vec<u8>,
}

impl PdfWriter {
    pub fn new() -> Self {
        Self
    }

    /// Write laid-out pages to a PDF byte vector.
    pub fn write(&self, pages: &[LayoutPage], metadata: &Metadata, config: &RenderConfig) -> Vec<u8> {
        let mut builder = PdfBuilder {
            objects: Vec::new(),
            font_objects: Vec::new(),
        };

        // Reserve object IDs:
        // 0 = placeholder (PDF objects are 1-indexed)
        // 1 = Catalog
        // 2 = Pages (page tree root)
        // 3+ = fonts, then content stream + page object per page
        for _ in 0..3 {
            builder.objects.push(PdfObject { data: vec![] });
        }

        self.register_fonts(&mut builder, pages);
        let font_resources = self.build_font_resource_dict(&builder.font_objects);

        let mut page_obj_ids: Vec<usize> = Vec::new();
        for page in pages {
            let content = self.build_content_stream(page, &builder.font_objects);

            let content_obj_id = builder.objects.len();
            builder.objects.push(PdfObject {
                data: Self::stream_object(&content, config.compress),
            });

            let page_obj_id = builder.objects.len();
            let page_dict = format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {:.2} {:.2}] \
                 /Contents {} 0 R /Resources << /Font << {} >> >> >>",
                page.width, page.height, content_obj_id, font_resources
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
            data: Self::info_dict(metadata),
        });

        self.serialize(&builder, info_obj_id)
    }

    fn stream_object(content: &[u8], compress: bool) -> Vec<u8> {
        let mut data: Vec<u8> = Vec::new();
        if compress {
            let compressed = compress_to_vec_zlib(content, 6);
            let _ = write!(
                data,
                "<< /Length {} /Filter /FlateDecode >>\nstream\n",
                compressed.len()
            );
            data.extend_from_slice(&compressed);
        } else {
            let _ = write!(data, "<< /Length {} >>\nstream\n", content.len());
            data.extend_from_slice(content);
        }
        data.extend_from_slice(b"\nendstream");
        data
    }

    fn info_dict(metadata: &Metadata) -> Vec<u8> {
        let mut info: Vec<u8> = b"<< ".to_vec();
        if let Some(ref title) = metadata.title {
            info.extend_from_slice(b"/Title ");
            Self::write_pdf_string(&mut info, title);
            info.push(b' ');
        }
        if let Some(ref author) = metadata.author {
            info.extend_from_slice(b"/Author ");
            Self::write_pdf_string(&mut info, author);
            info.push(b' ');
        }
        let _ = write!(info, "/Creator ({}) /Producer ({}) >>", CREATOR, PRODUCER);
        info
    }

    /// Build the PDF content stream for a single page.
    fn build_content_stream(&self, page: &LayoutPage, font_objects: &[(StandardFont, usize)]) -> Vec<u8> {
        let mut stream: Vec<u8> = Vec::new();
        let page_height = page.height;

        for command in &page.commands {
            match command {
                DrawCommand::Text {
                    x,
                    y,
                    text,
                    font,
                    size,
                    color,
                } => {
                    let index = Self::font_index(*font, font_objects);
                    let _ = write!(
                        stream,
                        "BT\n{:.3} {:.3} {:.3} rg\n/F{} {} Tf\n{:.2} {:.2} Td\n",
                        color.r,
                        color.g,
                        color.b,
                        index,
                        size,
                        x,
                        page_height - y
                    );
                    Self::write_pdf_string(&mut stream, text);
                    stream.extend_from_slice(b" Tj\nET\n");
                }

                DrawCommand::Rule {
                    x1,
                    x2,
                    y,
                    thickness,
                    color,
                } => {
                    let pdf_y = page_height - y;
                    let _ = write!(
                        stream,
                        "q\n{:.3} {:.3} {:.3} RG\n{:.2} w\n{:.2} {:.2} m\n{:.2} {:.2} l\nS\nQ\n",
                        color.r, color.g, color.b, thickness, x1, pdf_y, x2, pdf_y
                    );
                }
            }
        }

        stream
    }

    /// Register fonts used across all pages. Each face gets its own Type1
    /// font object; the standard fonts need no embedding.
    fn register_fonts(&self, builder: &mut PdfBuilder, pages: &[LayoutPage]) {
        // BTreeSet gives a deterministic order
        let faces: BTreeSet<StandardFont> = pages.iter().flat_map(|p| p.fonts()).collect();

        for face in faces {
            let obj_id = builder.objects.len();
            let font_dict = format!(
                "<< /Type /Font /Subtype /Type1 /BaseFont /{} \
                 /Encoding /WinAnsiEncoding >>",
                face.pdf_name()
            );
            builder.objects.push(PdfObject {
                data: font_dict.into_bytes(),
            });
            builder.font_objects.push((face, obj_id));
        }
    }

    fn build_font_resource_dict(&self, font_objects: &[(StandardFont, usize)]) -> String {
        font_objects
            .iter()
            .enumerate()
            .map(|(i, (_, obj_id))| format!("/F{} {} 0 R", i, obj_id))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Look up the font index (/F0, /F1, etc.) for a face.
    fn font_index(face: StandardFont, font_objects: &[(StandardFont, usize)]) -> usize {
        font_objects
            .iter()
            .position(|(f, _)| *f == face)
            .unwrap_or(0)
    }

    /// Write `s` as a PDF literal string in WinAnsi, escaping the
    /// delimiters. Characters with no WinAnsi code become `?`.
    fn write_pdf_string(out: &mut Vec<u8>, s: &str) {
        let mut unmapped = 0usize;
        out.push(b'(');
        for ch in s.chars() {
            let byte = match winansi_code(ch) {
                Some(b) => b,
                None => {
                    unmapped += 1;
                    b'?'
                }
            };
            if matches!(byte, b'\\' | b'(' | b')') {
                out.push(b'\\');
            }
            out.push(byte);
        }
        out.push(b')');

        if unmapped > 0 {
            warn!(
                "{} character(s) in {:?} have no WinAnsi code and were replaced with '?'",
                unmapped, s
            );
        }
    }

    /// Serialize all objects into the final PDF byte stream.
    fn serialize(&self, builder: &PdfBuilder, info_obj_id: usize) -> Vec<u8> {
        let mut output: Vec<u8> = Vec::new();
        let mut offsets: Vec<usize> = vec![0; builder.objects.len()];

        // Header, plus a binary comment so tools treat the file as binary
        output.extend_from_slice(b"%PDF-1.7\n");
        output.extend_from_slice(b"%\xe2\xe3\xcf\xd3\n");

        for (i, obj) in builder.objects.iter().enumerate().skip(1) {
            offsets[i] = output.len();
            let _ = write!(output, "{} 0 obj\n", i);
            output.extend_from_slice(&obj.data);
            output.extend_from_slice(b"\nendobj\n\n");
        }

        let xref_offset = output.len();
        let _ = write!(output, "xref\n0 {}\n", builder.objects.len());
        let _ = write!(output, "0000000000 65535 f \n");
        for offset in offsets.iter().skip(1) {
            let _ = write!(output, "{:010} 00000 n \n", offset);
        }

        let _ = write!(
            output,
            "trailer\n<< /Size {} /Root 1 0 R /Info {} 0 R >>\nstartxref\n{}\n%%EOF\n",
            builder.objects.len(),
            info_obj_id,
            xref_offset
        );

        output
    }
}
