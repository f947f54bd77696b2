use crate::core::engine::EngineSettings;
use crate::core::quotation::DEFAULT_RATE_PER_KW;
use crate::core::sequence::{DEFAULT_AGREEMENT_PREFIX, DEFAULT_INVOICE_PREFIX};
use crate::core::share::{DEFAULT_SHARE_BASE_URL, DEFAULT_SHARE_MESSAGE};
use crate::utils::error::{QuoteError, Result};
use crate::utils::validation::{
    validate_file_extensions, validate_non_empty_string, validate_path, validate_positive_number,
    validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "solar-quote.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub business: BusinessConfig,
    pub storage: StorageConfig,
    pub templates: TemplatesConfig,
    pub output: OutputConfig,
    pub share: ShareConfig,
    pub auth: Option<AuthConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BusinessConfig {
    pub title: String,
    pub rate_per_kw: u64,
    pub invoice_prefix: String,
    pub agreement_prefix: String,
    pub footer: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: String,
    pub invoice_counter: String,
    pub agreement_counter: String,
    pub register: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplatesConfig {
    pub invoice: String,
    pub agreement: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub directory: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShareConfig {
    pub base_url: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    pub username: String,
    pub password: String,
}

impl Default for BusinessConfig {
    fn default() -> Self {
        Self {
            title: "Babi Enterprise Solar Installation Quotation".to_string(),
            rate_per_kw: DEFAULT_RATE_PER_KW,
            invoice_prefix: DEFAULT_INVOICE_PREFIX.to_string(),
            agreement_prefix: DEFAULT_AGREEMENT_PREFIX.to_string(),
            footer: "Babi Enterprise\n\
                     Khowang, Dibrugarh, Assam - 785676\n\
                     Phone: 9678244548 / 9678689212\n\
                     Email: udaskhowang@gmail.com / neelbaruah@gmail.com"
                .to_string(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: "data".to_string(),
            invoice_counter: "invoice_counter.json".to_string(),
            agreement_counter: "agreement_counter.json".to_string(),
            register: "register.csv".to_string(),
        }
    }
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            invoice: "Invoice Sample.docx".to_string(),
            agreement: "Agreement.docx".to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: "output".to_string(),
        }
    }
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SHARE_BASE_URL.to_string(),
            message: DEFAULT_SHARE_MESSAGE.to_string(),
        }
    }
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(QuoteError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| QuoteError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${QUOTE_PASSWORD})，未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        use std::sync::LazyLock;

        static ENV_VAR_RE: LazyLock<Regex> =
            LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var regex"));

        ENV_VAR_RE
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validate_positive_number("business.rate_per_kw", self.business.rate_per_kw, 1)?;
        validate_non_empty_string("business.invoice_prefix", &self.business.invoice_prefix)?;
        validate_non_empty_string("business.agreement_prefix", &self.business.agreement_prefix)?;

        validate_path("storage.data_dir", &self.storage.data_dir)?;
        validate_path("storage.invoice_counter", &self.storage.invoice_counter)?;
        validate_path("storage.agreement_counter", &self.storage.agreement_counter)?;
        validate_path("storage.register", &self.storage.register)?;
        if self.storage.invoice_counter == self.storage.agreement_counter {
            return Err(QuoteError::InvalidConfigValueError {
                field: "storage.agreement_counter".to_string(),
                value: self.storage.agreement_counter.clone(),
                reason: "Invoice and agreement counters must use different files".to_string(),
            });
        }

        validate_path("templates.invoice", &self.templates.invoice)?;
        validate_path("templates.agreement", &self.templates.agreement)?;
        validate_file_extensions(
            "templates",
            &[self.templates.invoice.as_str(), self.templates.agreement.as_str()],
            &["docx"],
        )?;

        validate_path("output.directory", &self.output.directory)?;
        validate_url("share.base_url", &self.share.base_url)?;

        if let Some(auth) = &self.auth {
            validate_non_empty_string("auth.username", &auth.username)?;
            if auth.password.starts_with("${") {
                return Err(QuoteError::InvalidConfigValueError {
                    field: "auth.password".to_string(),
                    value: auth.password.clone(),
                    reason: "Environment variable is not set".to_string(),
                });
            }
            validate_non_empty_string("auth.password", &auth.password)?;
        }

        Ok(())
    }

    pub fn invoice_counter_path(&self) -> PathBuf {
        Path::new(&self.storage.data_dir).join(&self.storage.invoice_counter)
    }

    pub fn agreement_counter_path(&self) -> PathBuf {
        Path::new(&self.storage.data_dir).join(&self.storage.agreement_counter)
    }

    pub fn register_path(&self) -> PathBuf {
        Path::new(&self.storage.data_dir).join(&self.storage.register)
    }

    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            rate_per_kw: self.business.rate_per_kw,
            invoice_template: PathBuf::from(&self.templates.invoice),
            agreement_template: PathBuf::from(&self.templates.agreement),
            share_base_url: self.share.base_url.clone(),
            share_message: self.share.message.clone(),
        }
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();

        assert_eq!(config.business.rate_per_kw, 70_000);
        assert_eq!(config.business.invoice_prefix, "BE/KNG/PMSG/QTN");
        assert_eq!(config.business.agreement_prefix, "AG/SG/APDCL");
        assert_eq!(config.templates.invoice, "Invoice Sample.docx");
        assert_eq!(
            config.invoice_counter_path(),
            Path::new("data").join("invoice_counter.json")
        );
        assert!(config.auth.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_config() {
        let toml_content = r#"
[business]
rate_per_kw = 65000
invoice_prefix = "XY/QTN"

[storage]
data_dir = "/var/lib/solar-quote"

[templates]
invoice = "templates/invoice.docx"
agreement = "templates/agreement.docx"
"#;

        let config = AppConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.business.rate_per_kw, 65_000);
        assert_eq!(config.business.invoice_prefix, "XY/QTN");
        assert_eq!(config.business.agreement_prefix, "AG/SG/APDCL");
        assert_eq!(
            config.agreement_counter_path(),
            Path::new("/var/lib/solar-quote").join("agreement_counter.json")
        );
        assert_eq!(config.engine_settings().rate_per_kw, 65_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("SOLAR_QUOTE_TEST_PASSWORD", "solar@2025");

        let toml_content = r#"
[auth]
username = "besolar"
password = "${SOLAR_QUOTE_TEST_PASSWORD}"
"#;

        let config = AppConfig::from_toml_str(toml_content).unwrap();
        let auth = config.auth.as_ref().unwrap();
        assert_eq!(auth.password, "solar@2025");
        assert!(config.validate().is_ok());

        std::env::remove_var("SOLAR_QUOTE_TEST_PASSWORD");
    }

    #[test]
    fn test_unset_env_var_fails_validation() {
        let toml_content = r#"
[auth]
username = "besolar"
password = "${SOLAR_QUOTE_UNSET_VARIABLE}"
"#;

        let config = AppConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation() {
        let config = AppConfig::from_toml_str("[share]\nbase_url = \"invalid-url\"\n").unwrap();
        assert!(config.validate().is_err());

        let config = AppConfig::from_toml_str("[business]\nrate_per_kw = 0\n").unwrap();
        assert!(config.validate().is_err());

        let config = AppConfig::from_toml_str("[templates]\ninvoice = \"invoice.pdf\"\n").unwrap();
        assert!(config.validate().is_err());

        let config =
            AppConfig::from_toml_str("[storage]\nagreement_counter = \"invoice_counter.json\"\n")
                .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        assert!(matches!(
            AppConfig::from_toml_str("[business\n"),
            Err(QuoteError::ConfigError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[output]\ndirectory = \"generated\"\n")
            .unwrap();

        let config = AppConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.output.directory, "generated");
    }
}
