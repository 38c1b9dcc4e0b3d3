//! Serialises a [`Document`] into a `.docx` package.
//!
//! The package is the minimal set of parts Word and LibreOffice accept: content types, the package
//! relationships, `word/document.xml`, `word/styles.xml` and the document relationships. Everything
//! is built in memory; nothing touches the filesystem.

use crate::docx::model::{Document, Paragraph, Run};
use crate::docx::xml::{XmlDocument, XmlElement};
use crate::error::ReportResult;
use std::io::{Cursor, Write};
use zip::CompressionMethod;
use zip::write::SimpleFileOptions;

pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const R_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/></Types>"#;

const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

const DOCUMENT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/></Relationships>"#;

const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:docDefaults><w:rPrDefault><w:rPr><w:rFonts w:ascii="Calibri" w:hAnsi="Calibri" w:cs="Calibri"/><w:sz w:val="22"/><w:szCs w:val="22"/><w:lang w:val="pt-BR"/></w:rPr></w:rPrDefault><w:pPrDefault><w:pPr><w:spacing w:after="120" w:line="264" w:lineRule="auto"/></w:pPr></w:pPrDefault></w:docDefaults><w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:qFormat/></w:style><w:style w:type="paragraph" w:styleId="Title"><w:name w:val="Title"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:qFormat/><w:pPr><w:jc w:val="center"/><w:spacing w:after="240"/></w:pPr><w:rPr><w:b/><w:color w:val="1F3864"/><w:sz w:val="40"/><w:szCs w:val="40"/></w:rPr></w:style><w:style w:type="paragraph" w:styleId="Heading1"><w:name w:val="heading 1"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:qFormat/><w:pPr><w:keepNext/><w:spacing w:before="360" w:after="120"/><w:outlineLvl w:val="0"/></w:pPr><w:rPr><w:b/><w:color w:val="2F5496"/><w:sz w:val="30"/><w:szCs w:val="30"/></w:rPr></w:style><w:style w:type="paragraph" w:styleId="Heading2"><w:name w:val="heading 2"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:qFormat/><w:pPr><w:keepNext/><w:spacing w:before="240" w:after="80"/><w:outlineLvl w:val="1"/></w:pPr><w:rPr><w:b/><w:color w:val="2F5496"/><w:sz w:val="26"/><w:szCs w:val="26"/></w:rPr></w:style><w:style w:type="paragraph" w:styleId="ListParagraph"><w:name w:val="List Paragraph"/><w:basedOn w:val="Normal"/><w:qFormat/><w:pPr><w:spacing w:after="60"/><w:ind w:left="720" w:hanging="360"/></w:pPr></w:style></w:styles>"#;

/// Serialise `document` into the bytes of a `.docx` file.
pub fn write_docx(document: &Document) -> ReportResult<Vec<u8>> {
    let body = document_xml(document).to_xml_string();
    package(&[
        ("[Content_Types].xml", CONTENT_TYPES.as_bytes()),
        ("_rels/.rels", PACKAGE_RELS.as_bytes()),
        ("word/document.xml", body.as_bytes()),
        ("word/styles.xml", STYLES.as_bytes()),
        ("word/_rels/document.xml.rels", DOCUMENT_RELS.as_bytes()),
    ])
}

/// Zip the given `(name, content)` parts in order.
pub(crate) fn package(parts: &[(&str, &[u8])]) -> ReportResult<Vec<u8>> {
    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for (name, content) in parts {
        zip.start_file(*name, options)?;
        zip.write_all(content)?;
    }

    Ok(zip.finish()?.into_inner())
}

/// Build the `word/document.xml` part.
pub fn document_xml(document: &Document) -> XmlDocument {
    let mut body = XmlElement::new("w:body");
    for paragraph in &document.paragraphs {
        body.push(paragraph_element(paragraph));
    }
    body.push(section_properties());

    XmlDocument::new(
        XmlElement::new("w:document")
            .with_attr("xmlns:w", W_NS)
            .with_attr("xmlns:r", R_NS)
            .with_child(body),
    )
}

fn paragraph_element(paragraph: &Paragraph) -> XmlElement {
    let mut p = XmlElement::new("w:p");

    let mut ppr = XmlElement::new("w:pPr");
    if let Some(style) = paragraph.style.style_id() {
        ppr.push(XmlElement::new("w:pStyle").with_attr("w:val", style));
    }
    if let Some(alignment) = paragraph.alignment {
        ppr.push(XmlElement::new("w:jc").with_attr("w:val", alignment.token()));
    }
    if !ppr.children.is_empty() {
        p.push(ppr);
    }

    for run in &paragraph.runs {
        p.push(run_element(run));
    }
    p
}

fn run_element(run: &Run) -> XmlElement {
    let mut r = XmlElement::new("w:r");

    let mut rpr = XmlElement::new("w:rPr");
    if run.bold {
        rpr.push(XmlElement::new("w:b"));
    }
    if run.italic {
        rpr.push(XmlElement::new("w:i"));
    }
    if let Some(color) = &run.color {
        rpr.push(XmlElement::new("w:color").with_attr("w:val", color.as_str()));
    }
    if let Some(size) = run.size {
        let half_points = (size * 2).to_string();
        rpr.push(XmlElement::new("w:sz").with_attr("w:val", half_points.as_str()));
        rpr.push(XmlElement::new("w:szCs").with_attr("w:val", half_points));
    }
    if let Some(highlight) = run.highlight {
        rpr.push(XmlElement::new("w:highlight").with_attr("w:val", highlight.token()));
    }
    if !rpr.children.is_empty() {
        r.push(rpr);
    }

    for child in text_with_breaks(&run.text) {
        r.push(child);
    }
    r
}

/// Run content for `text`: one `w:t` per line, separated by `w:br`.
pub(crate) fn text_with_breaks(text: &str) -> Vec<XmlElement> {
    let mut out = Vec::new();
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            out.push(XmlElement::new("w:br"));
        }
        if !line.is_empty() {
            out.push(text_element(line));
        }
    }
    out
}

pub(crate) fn text_element(text: &str) -> XmlElement {
    XmlElement::new("w:t")
        .with_attr("xml:space", "preserve")
        .with_text(text)
}

/// A4 portrait with 2.5 cm margins.
fn section_properties() -> XmlElement {
    XmlElement::new("w:sectPr")
        .with_child(
            XmlElement::new("w:pgSz")
                .with_attr("w:w", "11906")
                .with_attr("w:h", "16838"),
        )
        .with_child(
            XmlElement::new("w:pgMar")
                .with_attr("w:top", "1418")
                .with_attr("w:right", "1418")
                .with_attr("w:bottom", "1418")
                .with_attr("w:left", "1418")
                .with_attr("w:header", "709")
                .with_attr("w:footer", "709")
                .with_attr("w:gutter", "0"),
        )
}
