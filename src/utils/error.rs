use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuoteError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for '{field}': {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Missing required input: {field}")]
    MissingInputError { field: String },

    #[error("Template error in '{path}': {message}")]
    TemplateError { path: String, message: String },

    #[error("Counter store error in '{path}': {message}")]
    CounterStoreError { path: String, message: String },

    #[error("Authentication failed for user '{username}'")]
    AuthenticationError { username: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Template,
    Storage,
    Authentication,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl QuoteError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            QuoteError::ValidationError { .. } | QuoteError::MissingInputError { .. } => {
                ErrorCategory::Input
            }
            QuoteError::ConfigError { .. } | QuoteError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            QuoteError::ZipError(_) | QuoteError::TemplateError { .. } => ErrorCategory::Template,
            QuoteError::CsvError(_)
            | QuoteError::IoError(_)
            | QuoteError::SerializationError(_)
            | QuoteError::CounterStoreError { .. } => ErrorCategory::Storage,
            QuoteError::AuthenticationError { .. } => ErrorCategory::Authentication,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input | ErrorCategory::Authentication => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Template => ErrorSeverity::High,
            ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            QuoteError::MissingInputError { .. } => "請補齊客戶姓名與電話後重新產生文件",
            QuoteError::ValidationError { .. } => "請檢查輸入值是否正確",
            QuoteError::ConfigError { .. } | QuoteError::InvalidConfigValueError { .. } => {
                "請檢查 TOML 設定檔內容"
            }
            QuoteError::ZipError(_) | QuoteError::TemplateError { .. } => {
                "請確認範本檔案存在且為有效的 .docx 文件"
            }
            QuoteError::CounterStoreError { .. } | QuoteError::SerializationError(_) => {
                "請檢查編號檔案 (counter JSON) 是否損毀，必要時手動修復"
            }
            QuoteError::CsvError(_) => "請檢查紀錄檔 (register CSV) 格式",
            QuoteError::IoError(_) => "請確認檔案路徑與寫入權限",
            QuoteError::AuthenticationError { .. } => "請確認使用者名稱與密碼",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            QuoteError::MissingInputError { field } => {
                format!("Customer {} is required.", field)
            }
            QuoteError::AuthenticationError { .. } => "Invalid credentials".to_string(),
            QuoteError::TemplateError { path, .. } => {
                format!("Could not read document template '{}'", path)
            }
            QuoteError::CounterStoreError { path, .. } => {
                format!("Could not update numbering file '{}'; no number was issued", path)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, QuoteError>;
