use solar_quote::config::AppConfig;
use std::io::Write;
use std::path::Path;
use tempfile::TempDir;
use zip::write::FileOptions;
use zip::ZipWriter;

pub const INVOICE_BODY: &str = concat!(
    r#"<w:p><w:r><w:t>Ref: {{REF_NO}}</w:t></w:r></w:p>"#,
    r#"<w:p><w:r><w:t>Date: {{DATE}}</w:t></w:r></w:p>"#,
    r#"<w:tbl><w:tr>"#,
    r#"<w:tc><w:p><w:r><w:t>{{CUSTOMER_NAME}}</w:t></w:r></w:p></w:tc>"#,
    r#"<w:tc><w:p><w:r><w:t>{{SYSTEM_CAPACITY}} / {{PHASE_TYPE}}</w:t></w:r></w:p></w:tc>"#,
    r#"<w:tc><w:p><w:r><w:rPr><w:b/></w:rPr><w:t>₹{{TOTAL</w:t></w:r><w:r><w:t>_AMOUNT}}</w:t></w:r></w:p></w:tc>"#,
    r#"</w:tr></w:tbl>"#,
    r#"<w:p><w:r><w:t>{{AMOUNT_IN_WORDS}}</w:t></w:r></w:p>"#,
);

pub const AGREEMENT_BODY: &str = concat!(
    r#"<w:p><w:r><w:t>Agreement No. {{AGREEMENT_NO}}</w:t></w:r></w:p>"#,
    r#"<w:p><w:r><w:t>Made on the {{AGREEMENT_DATE}} between Babi Enterprise and {{CUSTOMER_NAME}} of {{ADDRESS}}</w:t></w:r></w:p>"#,
    r#"<w:p><w:r><w:t>Consumer No: {{CONSUMER_NO}}, Subdivision: {{APDCL_SUBDIVISION}}</w:t></w:r></w:p>"#,
    r#"<w:p><w:r><w:t>Witness: {{W1_NAME}} ({{W1_PHONE}}), {{W2_NAME}} ({{W2_PHONE}})</w:t></w:r></w:p>"#,
    r#"<w:p><w:r><w:t>Reviewed by {{SIGNATORY}}</w:t></w:r></w:p>"#,
);

/// 建立一個只含主體與必要關聯檔的 .docx
pub fn write_docx(path: &Path, body: &str) {
    let document_xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}</w:body></w:document>"#,
        body
    );

    let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
    zip.start_file::<_, ()>("[Content_Types].xml", FileOptions::default())
        .unwrap();
    zip.write_all(br#"<?xml version="1.0" encoding="UTF-8"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"/>"#)
        .unwrap();
    zip.start_file::<_, ()>("word/styles.xml", FileOptions::default())
        .unwrap();
    zip.write_all(b"<w:styles/>").unwrap();
    zip.start_file::<_, ()>("word/document.xml", FileOptions::default())
        .unwrap();
    zip.write_all(document_xml.as_bytes()).unwrap();

    let bytes = zip.finish().unwrap().into_inner();
    std::fs::write(path, bytes).unwrap();
}

/// 在暫存目錄中準備範本與設定
pub fn setup_workspace() -> (TempDir, AppConfig) {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    write_docx(&root.join("Invoice Sample.docx"), INVOICE_BODY);
    write_docx(&root.join("Agreement.docx"), AGREEMENT_BODY);

    let mut config = AppConfig::default();
    config.storage.data_dir = root.join("data").display().to_string();
    config.templates.invoice = root.join("Invoice Sample.docx").display().to_string();
    config.templates.agreement = root.join("Agreement.docx").display().to_string();
    config.output.directory = root.join("output").display().to_string();

    (temp_dir, config)
}

pub fn read_docx_text(path: &Path) -> String {
    let bytes = std::fs::read(path).unwrap();
    solar_quote::Document::from_bytes(&bytes).unwrap().text()
}
