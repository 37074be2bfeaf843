//! Plain-text extraction from uploaded documents.

use std::io::{Cursor, Read};
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Default upload ceiling (10 MB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub const DEFAULT_ALLOWED_EXTENSIONS: &[&str] = &["pdf", "doc", "docx", "txt"];

/// Signature of an OLE compound file (legacy binary `.doc`).
const OLE_MAGIC: [u8; 8] = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    /// OOXML `.docx`, or legacy `.doc`.
    Word,
    Text,
}

impl DocumentFormat {
    pub fn name(self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "PDF",
            DocumentFormat::Word => "Word document",
            DocumentFormat::Text => "Text",
        }
    }

    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            DocumentFormat::Pdf => &["pdf"],
            DocumentFormat::Word => &["doc", "docx"],
            DocumentFormat::Text => &["txt"],
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(DocumentFormat::Pdf),
            "doc" | "docx" => Some(DocumentFormat::Word),
            "txt" => Some(DocumentFormat::Text),
            _ => None,
        }
    }

    /// Match a declared media type, ignoring parameters such as `charset`.
    pub fn from_media_type(media_type: &str) -> Option<Self> {
        let essence = media_type
            .split(';')
            .next()
            .unwrap_or("")
            .trim()
            .to_ascii_lowercase();
        match essence.as_str() {
            "application/pdf" => Some(DocumentFormat::Pdf),
            "application/msword"
            | "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => {
                Some(DocumentFormat::Word)
            }
            t if t.starts_with("text/") => Some(DocumentFormat::Text),
            _ => None,
        }
    }
}

/// Decodes uploads into plain text.
#[derive(Debug, Clone)]
pub struct TextExtractor {
    allowed_extensions: Vec<String>,
    max_bytes: usize,
}

impl Default for TextExtractor {
    fn default() -> Self {
        Self::new(
            DEFAULT_ALLOWED_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            DEFAULT_MAX_UPLOAD_BYTES,
        )
    }
}

impl TextExtractor {
    pub fn new(allowed_extensions: Vec<String>, max_bytes: usize) -> Self {
        Self {
            allowed_extensions: allowed_extensions
                .into_iter()
                .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
                .filter(|e| !e.is_empty())
                .collect(),
            max_bytes,
        }
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    fn is_allowed(&self, ext: &str) -> bool {
        self.allowed_extensions.iter().any(|e| e == ext)
    }

    /// Pick a format from the filename extension, then from the declared media type.
    pub fn detect_format(&self, filename: &str, media_type: Option<&str>) -> Result<DocumentFormat> {
        let ext = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        if let Some(ext) = ext.as_deref() {
            if let Some(format) = DocumentFormat::from_extension(ext) {
                if self.is_allowed(ext) {
                    return Ok(format);
                }
            }
        }

        if let Some(format) = media_type.and_then(DocumentFormat::from_media_type) {
            if format.extensions().iter().any(|e| self.is_allowed(e)) {
                return Ok(format);
            }
        }

        Err(Error::UnsupportedFormat(format!(
            "filename {filename:?}, media type {:?}",
            media_type.unwrap_or("none")
        )))
    }

    pub fn extract(&self, bytes: &[u8], media_type: Option<&str>, filename: &str) -> Result<String> {
        let format = self.detect_format(filename, media_type)?;
        if bytes.len() > self.max_bytes {
            return Err(Error::FileTooLarge {
                size: bytes.len(),
                limit: self.max_bytes,
            });
        }

        let result = match format {
            DocumentFormat::Pdf => extract_pdf(bytes),
            DocumentFormat::Word => extract_word(bytes),
            DocumentFormat::Text => extract_plain(bytes),
        };

        match &result {
            Ok(text) => debug!(
                filename,
                format = format.name(),
                bytes = bytes.len(),
                chars = text.chars().count(),
                "document text extracted"
            ),
            Err(e) => warn!(filename, format = format.name(), "extraction failed: {e}"),
        }
        result
    }
}

fn extract_pdf(bytes: &[u8]) -> Result<String> {
    // pdf-extract panics on some malformed inputs instead of returning an error.
    match std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes)) {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(Error::extraction("PDF", e)),
        Err(_) => Err(Error::extraction("PDF", "malformed PDF structure")),
    }
}

fn extract_word(bytes: &[u8]) -> Result<String> {
    if bytes.starts_with(&OLE_MAGIC) {
        return Err(Error::extraction(
            "Word document",
            "legacy binary .doc format cannot be read; save the document as .docx",
        ));
    }

    let mut archive =
        zip::ZipArchive::new(Cursor::new(bytes)).map_err(|e| Error::extraction("Word document", e))?;
    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| Error::extraction("Word document", e))?
        .read_to_string(&mut xml)
        .map_err(|e| Error::extraction("Word document", e))?;

    document_xml_text(&xml).map_err(|e| Error::extraction("Word document", e))
}

/// Text of a WordprocessingML body: one line per paragraph.
pub fn document_xml_text(xml: &str) -> std::result::Result<String, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    let mut out = String::new();
    let mut in_text = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) if e.name().as_ref() == b"w:t" => in_text = true,
            Event::End(e) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:p" => out.push('\n'),
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"w:tab" => out.push('\t'),
                b"w:br" | b"w:cr" | b"w:p" => out.push('\n'),
                _ => {}
            },
            Event::Text(t) if in_text => out.push_str(&t.unescape()?),
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(out)
}

fn extract_plain(bytes: &[u8]) -> Result<String> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|e| Error::extraction("Text", e))
}
