//! Text extraction for uploaded documents.

use std::io::Read;
use std::path::Path;
use std::process::Command;

use once_cell::sync::Lazy;
use regex::Regex;

use docmeta_core::{Error, Result};

/// Extensions accepted for upload.
pub const ALLOWED_EXTENSIONS: &[&str] = &["txt", "pdf", "doc", "docx", "png", "jpg", "jpeg"];

static DOCX_RUN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<w:t(?:\s[^>]*)?>([^<]*)</w:t>|</w:p>|<w:tab/>|<w:br/>").unwrap()
});

/// Supported file types for text extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    PlainText,
    Pdf,
    Docx,
    /// Legacy Word. Accepted for upload but no text is extracted.
    Doc,
    Image,
    Unknown,
}

impl FileType {
    /// Detect file type from extension.
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "txt" => Self::PlainText,
            "pdf" => Self::Pdf,
            "docx" => Self::Docx,
            "doc" => Self::Doc,
            "png" | "jpg" | "jpeg" => Self::Image,
            _ => Self::Unknown,
        }
    }

    /// Bucket name used in upload analytics.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pdf => "PDF",
            Self::Docx => "DOCX",
            Self::PlainText => "TXT",
            Self::Image => "Image",
            Self::Doc | Self::Unknown => "Other",
        }
    }
}

/// Check whether a filename carries an allowed extension.
pub fn is_allowed(filename: &str) -> bool {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ALLOWED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// OCR settings for image extraction.
#[derive(Debug, Clone)]
pub struct OcrConfig {
    /// Tesseract executable, looked up on `PATH` when not absolute.
    pub tesseract_cmd: String,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            tesseract_cmd: "tesseract".to_string(),
        }
    }
}

/// Turns stored files into plain text.
#[derive(Debug, Clone, Default)]
pub struct DocumentExtractor {
    ocr: OcrConfig,
}

impl DocumentExtractor {
    pub fn new(ocr: OcrConfig) -> Self {
        Self { ocr }
    }

    /// Best-effort text for `path`. Any failure, including an unsupported
    /// extension, is logged and yields an empty string.
    pub fn extract_text(&self, path: &Path, ext: &str) -> String {
        match self.try_extract(path, ext) {
            Ok(text) => text,
            Err(e) => {
                tracing::error!("Error extracting text from {}: {}", path.display(), e);
                String::new()
            }
        }
    }

    pub fn try_extract(&self, path: &Path, ext: &str) -> Result<String> {
        match FileType::from_extension(ext) {
            FileType::PlainText => extract_txt(path),
            FileType::Pdf => extract_pdf(path),
            FileType::Docx => extract_docx(path),
            FileType::Image => self.extract_image(path),
            FileType::Doc | FileType::Unknown => Err(Error::UnsupportedFileType(ext.to_string())),
        }
    }

    fn extract_image(&self, path: &Path) -> Result<String> {
        let output = Command::new(&self.ocr.tesseract_cmd)
            .arg(path)
            .arg("stdout")
            .output()
            .map_err(|e| Error::Extraction(format!("failed to run {}: {}", self.ocr.tesseract_cmd, e)))?;

        if !output.status.success() {
            return Err(Error::Extraction(format!(
                "{} exited with {}: {}",
                self.ocr.tesseract_cmd,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// UTF-8, falling back to Latin-1 where every byte maps to one char.
fn extract_txt(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)?;
    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(e) => {
            tracing::debug!("{} is not UTF-8, decoding as Latin-1", path.display());
            Ok(e.into_bytes().into_iter().map(char::from).collect())
        }
    }
}

fn extract_pdf(path: &Path) -> Result<String> {
    // pdf-extract panics on some malformed files.
    let result = std::panic::catch_unwind(|| pdf_extract::extract_text(path));
    match result {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(Error::Extraction(format!("PDF: {}", e))),
        Err(_) => Err(Error::Extraction("PDF parser panicked".into())),
    }
}

fn extract_docx(path: &Path) -> Result<String> {
    let file = std::fs::File::open(path)?;
    let mut archive =
        zip::ZipArchive::new(file).map_err(|e| Error::Extraction(format!("DOCX: {}", e)))?;
    let mut entry = archive
        .by_name("word/document.xml")
        .map_err(|_| Error::Extraction("DOCX: word/document.xml not found".into()))?;

    let mut xml = String::new();
    entry.read_to_string(&mut xml)?;
    Ok(docx_xml_to_text(&xml))
}

/// Text runs of a WordprocessingML body, one line per paragraph.
fn docx_xml_to_text(xml: &str) -> String {
    let mut text = String::new();
    for caps in DOCX_RUN_RE.captures_iter(xml) {
        match caps.get(1) {
            Some(run) => text.push_str(&unescape_xml(run.as_str())),
            None => match &caps[0] {
                "<w:tab/>" => text.push('\t'),
                _ => text.push('\n'),
            },
        }
    }
    text
}

fn unescape_xml(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

/// Collapse all whitespace runs to single spaces.
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
