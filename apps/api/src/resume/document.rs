//! Plain-text recovery from uploaded PDF and DOCX files.

use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

use roxmltree::{Document, Node};
use thiserror::Error;
use tracing::debug;

use crate::models::resume::ParsedContact;
use crate::resume::extractor::extract_contact;

const WORDPROCESSING_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const DOCX_BODY_PART: &str = "word/document.xml";

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to extract text from PDF: {0}")]
    Pdf(String),

    #[error("Failed to extract text from DOCX: {0}")]
    Docx(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    /// Word documents. Legacy `.doc` uploads are read as DOCX too.
    Docx,
}

impl DocumentKind {
    /// Classifies an upload by its file extension (case-insensitive).
    pub fn from_filename(filename: &str) -> Option<Self> {
        let ext = Path::new(filename).extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "pdf" => Some(DocumentKind::Pdf),
            "docx" | "doc" => Some(DocumentKind::Docx),
            _ => None,
        }
    }
}

/// Reads a document and runs the field extractor over its text.
pub fn parse_resume(path: &Path, kind: DocumentKind) -> Result<ParsedContact, DocumentError> {
    let text = extract_text(path, kind)?;
    debug!("Extracted {} characters from {}", text.len(), path.display());
    Ok(extract_contact(&text))
}

/// Returns the document's text, trimmed of surrounding whitespace.
pub fn extract_text(path: &Path, kind: DocumentKind) -> Result<String, DocumentError> {
    match kind {
        DocumentKind::Pdf => extract_pdf_text(path),
        DocumentKind::Docx => {
            let file = File::open(path)?;
            extract_docx_text(file)
        }
    }
}

fn extract_pdf_text(path: &Path) -> Result<String, DocumentError> {
    let text = pdf_extract::extract_text(path).map_err(|e| DocumentError::Pdf(e.to_string()))?;
    Ok(text.trim().to_string())
}

/// Joins the document body's top-level paragraphs with newlines.
pub fn extract_docx_text<R: Read + Seek>(reader: R) -> Result<String, DocumentError> {
    let mut archive = zip::ZipArchive::new(reader).map_err(|e| DocumentError::Docx(e.to_string()))?;

    let mut xml = String::new();
    archive
        .by_name(DOCX_BODY_PART)
        .map_err(|e| DocumentError::Docx(format!("{DOCX_BODY_PART}: {e}")))?
        .read_to_string(&mut xml)?;

    let doc = Document::parse(&xml).map_err(|e| DocumentError::Docx(e.to_string()))?;

    let body = doc
        .descendants()
        .find(|n| n.has_tag_name((WORDPROCESSING_NS, "body")))
        .ok_or_else(|| DocumentError::Docx("document has no body".to_string()))?;

    let paragraphs: Vec<String> = body
        .children()
        .filter(|n| n.has_tag_name((WORDPROCESSING_NS, "p")))
        .map(paragraph_text)
        .collect();

    Ok(paragraphs.join("\n").trim().to_string())
}

fn paragraph_text(paragraph: Node) -> String {
    let mut text = String::new();
    collect_run_text(paragraph, &mut text);
    text
}

/// Text boxes (`w:txbxContent`) hang off runs but are not part of the
/// paragraph's own text, so their subtrees are skipped.
fn collect_run_text(node: Node, text: &mut String) {
    for child in node.children().filter(|n| n.is_element()) {
        if child.tag_name().namespace() == Some(WORDPROCESSING_NS) {
            match child.tag_name().name() {
                "t" => {
                    text.push_str(child.text().unwrap_or_default());
                    continue;
                }
                "tab" => {
                    text.push('\t');
                    continue;
                }
                "br" | "cr" => {
                    text.push('\n');
                    continue;
                }
                "txbxContent" => continue,
                _ => {}
            }
        }
        collect_run_text(child, text);
    }
}

/// Builds a minimal DOCX container whose body holds `body` (WordprocessingML).
#[cfg(test)]
pub(crate) fn sample_docx(body: &str) -> Vec<u8> {
    use std::io::{Cursor, Write};

    let xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="{WORDPROCESSING_NS}"><w:body>{body}</w:body></w:document>"#
    );
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    writer
        .start_file(DOCX_BODY_PART, zip::write::FileOptions::default())
        .unwrap();
    writer.write_all(xml.as_bytes()).unwrap();
    writer.finish().unwrap().into_inner()
}
