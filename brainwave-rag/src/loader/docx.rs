//! Word document (`.docx`) loading.
//!
//! A `.docx` file is a zip archive; the body lives in `word/document.xml`.
//! Text nodes are collected in document order, with a newline at the end
//! of each paragraph (`w:p`) element.

use std::io::{Cursor, Read};
use std::path::Path;

use quick_xml::events::Event;

use crate::document::Document;
use crate::error::{RagError, Result};

fn extract_text(bytes: &[u8]) -> std::result::Result<String, String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).map_err(|e| e.to_string())?;

    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| e.to_string())?
        .read_to_string(&mut xml)
        .map_err(|e| e.to_string())?;

    let mut reader = quick_xml::Reader::from_str(&xml);
    let mut text = String::new();
    loop {
        match reader.read_event().map_err(|e| e.to_string())? {
            Event::Text(t) => text.push_str(&t.unescape().map_err(|e| e.to_string())?),
            Event::End(e) if e.name().as_ref() == b"w:p" => text.push('\n'),
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(text)
}

pub(super) async fn load(path: &Path) -> Result<Vec<Document>> {
    let source = path.display().to_string();
    let load_err =
        |message: String| RagError::Load { uri: source.clone(), message };

    let bytes = tokio::fs::read(path).await.map_err(|e| load_err(e.to_string()))?;
    let text = extract_text(&bytes).map_err(load_err)?;

    Ok(vec![Document::new(text, source)])
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use zip::write::SimpleFileOptions;

    use super::*;

    fn docx_with_body(xml_body: &str) -> Vec<u8> {
        let mut buffer = Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut buffer);
            writer.start_file("word/document.xml", SimpleFileOptions::default()).unwrap();
            writer.write_all(xml_body.as_bytes()).unwrap();
            writer.finish().unwrap();
        }
        buffer.into_inner()
    }

    #[test]
    fn extracts_paragraph_text_with_newlines() {
        let bytes = docx_with_body(
            r#"<?xml version="1.0"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>First paragraph.</w:t></w:r></w:p>
    <w:p><w:r><w:t>Second </w:t></w:r><w:r><w:t>paragraph.</w:t></w:r></w:p>
  </w:body>
</w:document>"#,
        );

        let text = extract_text(&bytes).unwrap();
        assert!(text.contains("First paragraph.\n"));
        assert!(text.contains("Second paragraph.\n"));
    }

    #[test]
    fn unescapes_xml_entities() {
        let bytes = docx_with_body(
            r#"<w:document xmlns:w="ns"><w:body><w:p><w:r><w:t>Fish &amp; chips</w:t></w:r></w:p></w:body></w:document>"#,
        );
        let text = extract_text(&bytes).unwrap();
        assert!(text.contains("Fish & chips"));
    }

    #[test]
    fn non_zip_bytes_fail() {
        assert!(extract_text(b"definitely not a zip archive").is_err());
    }

    #[test]
    fn zip_without_document_xml_fails() {
        let mut buffer = Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut buffer);
            writer.start_file("other.txt", SimpleFileOptions::default()).unwrap();
            writer.write_all(b"nope").unwrap();
            writer.finish().unwrap();
        }
        assert!(extract_text(&buffer.into_inner()).is_err());
    }
}
