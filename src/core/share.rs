pub const DEFAULT_SHARE_BASE_URL: &str = "https://wa.me/";

pub const DEFAULT_SHARE_MESSAGE: &str = "Dear {name},

Your solar quotation and agreement are ready. Please find the attached documents.

Thank you for choosing Babi Enterprise.
";

/// 組出分享連結；訊息中的 `{name}` 換成客戶姓名，只編碼換行與空白
pub fn share_link(base_url: &str, message_template: &str, customer_name: &str) -> String {
    let message = message_template.replace("{name}", customer_name);
    let encoded = message.replace('\n', "%0A").replace(' ', "%20");
    format!("{}?text={}", base_url, encoded)
}

/// 檔名中不可出現路徑分隔字元
pub fn safe_file_component(value: &str) -> String {
    value.replace(['/', '\\'], "_")
}

pub fn invoice_file_name(customer_name: &str) -> String {
    format!("Invoice_{}.docx", safe_file_component(customer_name))
}

pub fn agreement_file_name(agreement_no: &str, customer_name: &str) -> String {
    format!(
        "{}_{}.docx",
        agreement_no.replace('/', "_"),
        safe_file_component(customer_name)
    )
}
