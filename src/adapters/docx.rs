//! 讀寫 .docx (WordprocessingML) 套件
//!
//! 只處理 `word/document.xml` 主體：頂層段落 (`w:p`) 與頂層表格的儲存格 (`w:tc`)
//! 是可替換文字的單位，其餘套件內容原樣保留。含有巢狀表格或文字方塊的元素
//! 無法合併為單一 run，因此不列入替換。

use crate::utils::error::{QuoteError, Result};
use regex::Regex;
use std::io::{Cursor, Read, Write};
use std::ops::Range;
use std::path::Path;
use std::sync::LazyLock;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

pub const DOCUMENT_PART: &str = "word/document.xml";

// 區塊層級的開始與結束標籤；`w:pPr`、`w:tcPr`、`w:tblPr` 因名稱後緊接的字元不是空白、`/` 或 `>` 而不會匹配
static BLOCK_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<(?P<close>/)?w:(?P<name>tbl|tc|p|txbxContent)(?:\s[^>]*)?/?>")
        .expect("block tag regex")
});
// `[^/>]` 排除自閉合標籤 (`<w:p/>`)；只用在已確認沒有巢狀結構的儲存格內
static PARAGRAPH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<w:p(?:\s[^>]*[^/>])?>.*?</w:p>").expect("paragraph regex"));
static RUN_TEXT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<w:t(?:\s[^>]*[^/>])?>(?P<text>.*?)</w:t>|<w:tab\s*/>|<w:(?:br|cr)(?:\s[^>]*)?/>")
        .expect("run text regex")
});
static FIRST_RUN_PROPS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<w:r(?:\s[^>]*[^/>])?>\s*(?P<props><w:rPr>.*?</w:rPr>|<w:rPr\s*/>)")
        .expect("run properties regex")
});

#[derive(Debug, Clone)]
struct PackageEntry {
    name: String,
    compression: CompressionMethod,
    data: Vec<u8>,
}

/// 已載入的文件。填入資料時產生新的 `Document`，不修改原本的值
#[derive(Debug, Clone)]
pub struct Document {
    entries: Vec<PackageEntry>,
    body: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Paragraph,
    TableCell,
}

// 掃描時尚未關閉的區塊
struct OpenBlock<'a> {
    name: &'a str,
    start: usize,
    nested: bool,
}

/// 文件中一個可替換文字的單位
#[derive(Debug, Clone)]
pub struct TextElement {
    pub kind: ElementKind,
    span: Range<usize>,
    open_tag: String,
    properties: String,
    paragraph_open_tag: String,
    paragraph_properties: String,
    run_properties: String,
    text: String,
}

impl Document {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| QuoteError::TemplateError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        Self::from_bytes(&bytes).map_err(|e| match e {
            QuoteError::TemplateError { message, .. } => QuoteError::TemplateError {
                path: path.display().to_string(),
                message,
            },
            other => QuoteError::TemplateError {
                path: path.display().to_string(),
                message: other.to_string(),
            },
        })
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut archive = ZipArchive::new(Cursor::new(bytes))?;
        let mut entries = Vec::with_capacity(archive.len());
        let mut body = None;

        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            let name = file.name().to_string();
            let compression = file.compression();
            let mut data = Vec::with_capacity(file.size() as usize);
            file.read_to_end(&mut data)?;

            if name == DOCUMENT_PART {
                let xml = String::from_utf8(data).map_err(|e| QuoteError::TemplateError {
                    path: DOCUMENT_PART.to_string(),
                    message: format!("document part is not UTF-8: {}", e),
                })?;
                body = Some(xml);
                entries.push(PackageEntry {
                    name,
                    compression,
                    data: Vec::new(),
                });
            } else {
                entries.push(PackageEntry {
                    name,
                    compression,
                    data,
                });
            }
        }

        let body = body.ok_or_else(|| QuoteError::TemplateError {
            path: DOCUMENT_PART.to_string(),
            message: "package has no main document part".to_string(),
        })?;

        Ok(Self { entries, body })
    }

    /// 以主體 XML 建立最小的 .docx 套件
    pub fn from_body_xml(body: impl Into<String>) -> Self {
        let minimal = |name: &str, data: &str| PackageEntry {
            name: name.to_string(),
            compression: CompressionMethod::Deflated,
            data: data.as_bytes().to_vec(),
        };

        Self {
            entries: vec![
                minimal("[Content_Types].xml", CONTENT_TYPES_XML),
                minimal("_rels/.rels", PACKAGE_RELS_XML),
                PackageEntry {
                    name: DOCUMENT_PART.to_string(),
                    compression: CompressionMethod::Deflated,
                    data: Vec::new(),
                },
            ],
            body: body.into(),
        }
    }

    pub fn body_xml(&self) -> &str {
        &self.body
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

        for entry in &self.entries {
            let compression = match entry.compression {
                CompressionMethod::Stored => CompressionMethod::Stored,
                _ => CompressionMethod::Deflated,
            };
            let options = FileOptions::<()>::default().compression_method(compression);
            zip.start_file(entry.name.as_str(), options)?;

            if entry.name == DOCUMENT_PART {
                zip.write_all(self.body.as_bytes())?;
            } else {
                zip.write_all(&entry.data)?;
            }
        }

        let cursor = zip.finish()?;
        Ok(cursor.into_inner())
    }

    /// 依文件順序列出頂層段落與頂層表格的儲存格；儲存格內的段落併入該儲存格
    ///
    /// 以標籤深度配對開始與結束標籤。巢狀表格內的儲存格、文字方塊內的段落不列出；
    /// 本身包含巢狀表格或文字方塊的元素整個略過，以免重建時破壞 XML 結構。
    pub fn elements(&self) -> Vec<TextElement> {
        let mut open: Vec<OpenBlock<'_>> = Vec::new();
        let mut elements = Vec::new();

        for caps in BLOCK_TAG_RE.captures_iter(&self.body) {
            let (Some(tag), Some(name)) = (caps.get(0), caps.name("name")) else {
                continue;
            };
            let name = name.as_str();

            if caps.name("close").is_none() {
                if tag.as_str().ends_with("/>") {
                    continue;
                }
                if name == "tbl" || name == "txbxContent" {
                    for block in open.iter_mut() {
                        block.nested = true;
                    }
                }
                open.push(OpenBlock {
                    name,
                    start: tag.start(),
                    nested: false,
                });
                continue;
            }

            let Some(index) = open.iter().rposition(|block| block.name == name) else {
                continue;
            };
            // 中間還有未關閉的區塊表示結構不對稱，一併捨棄
            let unbalanced = index + 1 != open.len();
            let Some(block) = open.drain(index..).next() else {
                continue;
            };

            let top_level = match name {
                "p" => open.is_empty(),
                "tc" => open.len() == 1 && open[0].name == "tbl",
                _ => false,
            };
            if !top_level {
                continue;
            }

            let span = block.start..tag.end();
            if block.nested || unbalanced {
                tracing::debug!(
                    "Skipping <w:{}> at byte {} with nested tables or text boxes",
                    name,
                    span.start
                );
                continue;
            }

            elements.push(if name == "p" {
                TextElement::paragraph(&self.body, span)
            } else {
                TextElement::table_cell(&self.body, span)
            });
        }

        elements.sort_by_key(|element| element.span.start);
        elements
    }

    /// 以新的文字取代指定元素，回傳新文件
    pub fn with_replaced(&self, replacements: &[(&TextElement, String)]) -> Document {
        let mut ordered: Vec<&(&TextElement, String)> = replacements.iter().collect();
        ordered.sort_by_key(|(element, _)| element.span.start);

        let mut body = String::with_capacity(self.body.len());
        let mut cursor = 0;
        for (element, text) in ordered {
            body.push_str(&self.body[cursor..element.span.start]);
            body.push_str(&element.render(text));
            cursor = element.span.end;
        }
        body.push_str(&self.body[cursor..]);

        Document {
            entries: self.entries.clone(),
            body,
        }
    }

    /// 全部元素的文字，以換行分隔
    pub fn text(&self) -> String {
        self.elements()
            .iter()
            .map(|element| element.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl TextElement {
    fn paragraph(body: &str, span: Range<usize>) -> Self {
        let xml = &body[span.clone()];
        let (open_tag, inner) = split_open_tag(xml, "</w:p>");
        let (properties, content) = split_properties(inner, "w:pPr");

        Self {
            kind: ElementKind::Paragraph,
            span,
            open_tag: open_tag.to_string(),
            properties: properties.to_string(),
            paragraph_open_tag: String::new(),
            paragraph_properties: String::new(),
            run_properties: first_run_properties(content),
            text: run_text(content),
        }
    }

    fn table_cell(body: &str, span: Range<usize>) -> Self {
        let xml = &body[span.clone()];
        let (open_tag, inner) = split_open_tag(xml, "</w:tc>");
        let (properties, content) = split_properties(inner, "w:tcPr");

        let paragraphs: Vec<&str> = PARAGRAPH_RE.find_iter(content).map(|m| m.as_str()).collect();
        let text = paragraphs
            .iter()
            .map(|p| {
                let (_, p_inner) = split_open_tag(p, "</w:p>");
                let (_, p_content) = split_properties(p_inner, "w:pPr");
                run_text(p_content)
            })
            .collect::<Vec<_>>()
            .join("\n");

        let (paragraph_open_tag, paragraph_properties, run_properties) = match paragraphs.first() {
            Some(first) => {
                let (p_open, p_inner) = split_open_tag(first, "</w:p>");
                let (p_props, p_content) = split_properties(p_inner, "w:pPr");
                (
                    p_open.to_string(),
                    p_props.to_string(),
                    first_run_properties(p_content),
                )
            }
            None => ("<w:p>".to_string(), String::new(), String::new()),
        };

        Self {
            kind: ElementKind::TableCell,
            span,
            open_tag: open_tag.to_string(),
            properties: properties.to_string(),
            paragraph_open_tag,
            paragraph_properties,
            run_properties,
            text,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// 以單一 run 重建元素；保留段落屬性與第一個 run 的字元格式
    fn render(&self, text: &str) -> String {
        match self.kind {
            ElementKind::Paragraph => format!(
                "{}{}{}</w:p>",
                self.open_tag,
                self.properties,
                render_run(&self.run_properties, text)
            ),
            ElementKind::TableCell => format!(
                "{}{}{}{}{}</w:p></w:tc>",
                self.open_tag,
                self.properties,
                self.paragraph_open_tag,
                self.paragraph_properties,
                render_run(&self.run_properties, text)
            ),
        }
    }
}

fn split_open_tag<'a>(xml: &'a str, close_tag: &str) -> (&'a str, &'a str) {
    let open_end = xml.find('>').map(|i| i + 1).unwrap_or(0);
    let inner_end = xml.len().saturating_sub(close_tag.len()).max(open_end);
    (&xml[..open_end], &xml[open_end..inner_end])
}

fn split_properties<'a>(inner: &'a str, tag: &str) -> (&'a str, &'a str) {
    let trimmed = inner.trim_start();
    let offset = inner.len() - trimmed.len();

    let self_closing = format!("<{}/>", tag);
    if trimmed.starts_with(&self_closing) {
        let end = offset + self_closing.len();
        return (&inner[..end], &inner[end..]);
    }

    let open = format!("<{}>", tag);
    let open_with_attrs = format!("<{} ", tag);
    if trimmed.starts_with(&open) || trimmed.starts_with(&open_with_attrs) {
        let close = format!("</{}>", tag);
        if let Some(pos) = inner.find(&close) {
            let end = pos + close.len();
            return (&inner[..end], &inner[end..]);
        }
    }

    ("", inner)
}

fn first_run_properties(content: &str) -> String {
    FIRST_RUN_PROPS_RE
        .captures(content)
        .and_then(|caps| caps.name("props"))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

fn run_text(content: &str) -> String {
    let mut text = String::new();
    for caps in RUN_TEXT_RE.captures_iter(content) {
        match caps.name("text") {
            Some(t) => text.push_str(&unescape_xml(t.as_str())),
            None => {
                let tag = caps.get(0).map(|m| m.as_str()).unwrap_or_default();
                if tag.starts_with("<w:tab") {
                    text.push('\t');
                } else {
                    text.push('\n');
                }
            }
        }
    }
    text
}

fn render_run(run_properties: &str, text: &str) -> String {
    let mut run = String::from("<w:r>");
    run.push_str(run_properties);

    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            run.push_str("<w:br/>");
        }
        for (j, segment) in line.split('\t').enumerate() {
            if j > 0 {
                run.push_str("<w:tab/>");
            }
            if !segment.is_empty() {
                run.push_str("<w:t xml:space=\"preserve\">");
                run.push_str(&escape_xml(segment));
                run.push_str("</w:t>");
            }
        }
    }

    run.push_str("</w:r>");
    run
}

pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

pub fn unescape_xml(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let Some(semi) = tail.find(';') else {
            out.push_str(tail);
            return out;
        };

        let entity = &tail[1..semi];
        let decoded = match entity {
            "amp" => Some('&'),
            "lt" => Some('<'),
            "gt" => Some('>'),
            "quot" => Some('"'),
            "apos" => Some('\''),
            _ => entity
                .strip_prefix("#x")
                .or_else(|| entity.strip_prefix("#X"))
                .and_then(|hex| u32::from_str_radix(hex, 16).ok())
                .or_else(|| entity.strip_prefix('#').and_then(|dec| dec.parse().ok()))
                .and_then(char::from_u32),
        };

        match decoded {
            Some(ch) => {
                out.push(ch);
                rest = &tail[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

const PACKAGE_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

/// 將段落 XML 包成完整的 `word/document.xml`
pub fn wrap_body(paragraphs_xml: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}<w:sectPr/></w:body></w:document>"#,
        paragraphs_xml
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const STYLED_PARAGRAPH: &str = r#"<w:p w:rsidR="00A1"><w:pPr><w:jc w:val="center"/><w:rPr><w:i/></w:rPr></w:pPr><w:r><w:rPr><w:b/></w:rPr><w:t>Ref: {{</w:t></w:r><w:r><w:t>REF_NO}}</w:t></w:r></w:p>"#;

    const TABLE: &str = r#"<w:tbl><w:tr><w:tc><w:tcPr><w:tcW w:w="2000"/></w:tcPr><w:p><w:r><w:t>Name</w:t></w:r></w:p></w:tc><w:tc><w:p><w:pPr><w:jc w:val="right"/></w:pPr><w:r><w:rPr><w:sz w:val="20"/></w:rPr><w:t xml:space="preserve">{{CUSTOMER_NAME}} </w:t></w:r></w:p><w:p><w:r><w:t>line two</w:t></w:r></w:p></w:tc></w:tr></w:tbl>"#;

    const NESTED_TABLE: &str = r#"<w:tbl><w:tr><w:tc><w:p><w:r><w:t>Outer</w:t></w:r></w:p><w:tbl><w:tr><w:tc><w:p><w:r><w:t>{{NAME}}</w:t></w:r></w:p></w:tc></w:tr></w:tbl><w:p/></w:tc><w:tc><w:p><w:r><w:t>{{NAME}}</w:t></w:r></w:p></w:tc></w:tr></w:tbl>"#;

    const TEXT_BOX_PARAGRAPH: &str = r#"<w:p><w:r><w:t>Ref {{NAME}}</w:t></w:r><w:r><w:drawing><wps:txbx><w:txbxContent><w:p><w:r><w:t>Logo text</w:t></w:r></w:p></w:txbxContent></wps:txbx></w:drawing></w:r></w:p>"#;

    const NAME_PARAGRAPH: &str = r#"<w:p><w:r><w:t>{{NAME}}</w:t></w:r></w:p>"#;

    fn tag_counts(xml: &str, name: &str) -> (usize, usize) {
        let open = Regex::new(&format!(r"<w:{}[\s>]", name))
            .unwrap()
            .find_iter(xml)
            .count();
        let close = xml.matches(&format!("</w:{}>", name)).count();
        (open, close)
    }

    fn replace_every_element(doc: &Document, text: &str) -> Document {
        let elements = doc.elements();
        let replacements: Vec<(&TextElement, String)> = elements
            .iter()
            .map(|element| (element, text.to_string()))
            .collect();
        doc.with_replaced(&replacements)
    }

    #[test]
    fn test_cell_holding_nested_table_is_left_intact() {
        let doc = Document::from_body_xml(wrap_body(&[NESTED_TABLE, NAME_PARAGRAPH].concat()));

        let elements = doc.elements();
        let texts: Vec<&str> = elements.iter().map(|e| e.text()).collect();
        assert_eq!(texts, vec!["{{NAME}}", "{{NAME}}"]);
        assert_eq!(elements[0].kind, ElementKind::TableCell);
        assert_eq!(elements[1].kind, ElementKind::Paragraph);

        let replaced = replace_every_element(&doc, "Asha");
        let body = replaced.body_xml();
        for name in ["tbl", "tr", "tc", "p"] {
            let (open, close) = tag_counts(body, name);
            assert_eq!(open, close, "unbalanced <w:{}>", name);
        }
        // 外層儲存格與巢狀表格原樣保留
        assert!(body.contains(
            r#"<w:tc><w:p><w:r><w:t>Outer</w:t></w:r></w:p><w:tbl><w:tr><w:tc><w:p><w:r><w:t>{{NAME}}</w:t></w:r></w:p></w:tc></w:tr></w:tbl><w:p/></w:tc>"#
        ));
        assert_eq!(replaced.text(), "Asha\nAsha");
    }

    #[test]
    fn test_paragraph_holding_text_box_is_left_intact() {
        let doc = Document::from_body_xml(wrap_body(&[TEXT_BOX_PARAGRAPH, NAME_PARAGRAPH].concat()));

        let texts: Vec<String> = doc.elements().iter().map(|e| e.text().to_string()).collect();
        assert_eq!(texts, vec!["{{NAME}}".to_string()]);

        let replaced = replace_every_element(&doc, "Asha");
        let body = replaced.body_xml();
        assert!(body.contains(TEXT_BOX_PARAGRAPH));
        for name in ["txbxContent", "p"] {
            let (open, close) = tag_counts(body, name);
            assert_eq!(open, close, "unbalanced <w:{}>", name);
        }
        assert_eq!(replaced.text(), "Asha");
    }

    #[test]
    fn test_elements_in_document_order() {
        let body = wrap_body(&format!(
            "<w:p><w:r><w:t>Intro</w:t></w:r></w:p><w:p/>{}{}",
            TABLE, STYLED_PARAGRAPH
        ));
        let doc = Document::from_body_xml(body);
        let elements = doc.elements();

        let kinds: Vec<ElementKind> = elements.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ElementKind::Paragraph,
                ElementKind::TableCell,
                ElementKind::TableCell,
                ElementKind::Paragraph
            ]
        );
        assert_eq!(elements[0].text(), "Intro");
        assert_eq!(elements[1].text(), "Name");
        assert_eq!(elements[2].text(), "{{CUSTOMER_NAME}} \nline two");
        assert_eq!(elements[3].text(), "Ref: {{REF_NO}}");
    }

    #[test]
    fn test_text_decodes_entities_tabs_and_breaks() {
        let body = wrap_body(
            r#"<w:p><w:r><w:t>A &amp; B</w:t><w:tab/><w:t>C&#x2013;D</w:t><w:br/><w:t>&lt;E&gt;</w:t></w:r></w:p>"#,
        );
        let doc = Document::from_body_xml(body);

        assert_eq!(doc.text(), "A & B\tC\u{2013}D\n<E>");
    }

    #[test]
    fn test_render_paragraph_keeps_properties() {
        let doc = Document::from_body_xml(wrap_body(STYLED_PARAGRAPH));
        let elements = doc.elements();
        let replaced = doc.with_replaced(&[(&elements[0], "Ref: A&B\nX".to_string())]);

        assert!(replaced.body_xml().contains(
            r#"<w:p w:rsidR="00A1"><w:pPr><w:jc w:val="center"/><w:rPr><w:i/></w:rPr></w:pPr><w:r><w:rPr><w:b/></w:rPr><w:t xml:space="preserve">Ref: A&amp;B</w:t><w:br/><w:t xml:space="preserve">X</w:t></w:r></w:p>"#
        ));
        assert_eq!(replaced.text(), "Ref: A&B\nX");
        // 原文件不受影響
        assert_eq!(doc.text(), "Ref: {{REF_NO}}");
    }

    #[test]
    fn test_render_cell_collapses_to_one_paragraph() {
        let doc = Document::from_body_xml(wrap_body(TABLE));
        let elements = doc.elements();
        let replaced = doc.with_replaced(&[(&elements[1], "Asha".to_string())]);

        assert!(replaced.body_xml().contains(
            r#"<w:tc><w:p><w:pPr><w:jc w:val="right"/></w:pPr><w:r><w:rPr><w:sz w:val="20"/></w:rPr><w:t xml:space="preserve">Asha</w:t></w:r></w:p></w:tc>"#
        ));
        assert!(replaced.body_xml().contains(
            r#"<w:tc><w:tcPr><w:tcW w:w="2000"/></w:tcPr><w:p><w:r><w:t>Name</w:t></w:r></w:p></w:tc>"#
        ));
    }

    #[test]
    fn test_package_round_trip_preserves_other_parts() {
        let doc = Document::from_body_xml(wrap_body(STYLED_PARAGRAPH));
        let bytes = doc.to_bytes().unwrap();

        let reloaded = Document::from_bytes(&bytes).unwrap();
        assert_eq!(reloaded.body_xml(), doc.body_xml());

        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut names: Vec<String> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect();
        names.sort();
        assert_eq!(
            names,
            vec!["[Content_Types].xml", "_rels/.rels", "word/document.xml"]
        );
    }

    #[test]
    fn test_package_without_document_part_is_rejected() {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        zip.start_file::<_, ()>("word/styles.xml", FileOptions::default())
            .unwrap();
        zip.write_all(b"<w:styles/>").unwrap();
        let bytes = zip.finish().unwrap().into_inner();

        assert!(matches!(
            Document::from_bytes(&bytes),
            Err(QuoteError::TemplateError { .. })
        ));
    }

    #[test]
    fn test_not_a_zip_is_an_error() {
        assert!(Document::from_bytes(b"plain text").is_err());
    }

    #[test]
    fn test_unescape_leaves_unknown_entities() {
        assert_eq!(unescape_xml("a &bogus; b & c"), "a &bogus; b & c");
        assert_eq!(unescape_xml("&#65;&#x42;"), "AB");
    }
}
