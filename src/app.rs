//! 依設定組裝報價引擎

use crate::adapters::auth::StaticCredentials;
use crate::adapters::counter_store::{JsonCounterStore, MemoryCounterStore};
use crate::adapters::register::Register;
use crate::adapters::storage::{LocalStorage, MemoryStorage};
use crate::config::AppConfig;
use crate::core::engine::QuotationEngine;
use crate::core::sequence::SequenceAllocator;
use crate::domain::ports::CredentialVerifier;
use crate::utils::error::{QuoteError, Result};

pub type FileEngine = QuotationEngine<JsonCounterStore, LocalStorage>;
pub type DryRunEngine = QuotationEngine<MemoryCounterStore, MemoryStorage>;

pub fn invoice_sequence(config: &AppConfig) -> SequenceAllocator<JsonCounterStore> {
    SequenceAllocator::new(
        JsonCounterStore::new(config.invoice_counter_path()),
        config.business.invoice_prefix.clone(),
    )
}

pub fn agreement_sequence(config: &AppConfig) -> SequenceAllocator<JsonCounterStore> {
    SequenceAllocator::new(
        JsonCounterStore::new(config.agreement_counter_path()),
        config.business.agreement_prefix.clone(),
    )
}

pub fn build_engine(config: &AppConfig) -> FileEngine {
    QuotationEngine::new(
        config.engine_settings(),
        invoice_sequence(config),
        agreement_sequence(config),
        LocalStorage::new(&config.output.directory),
    )
    .with_register(Register::new(config.register_path()))
}

/// 以目前計數的副本建立引擎；產生的編號與檔案都只存在記憶體中
pub fn build_dry_run_engine(config: &AppConfig) -> Result<DryRunEngine> {
    let invoice_counters = invoice_sequence(config).snapshot()?;
    let agreement_counters = agreement_sequence(config).snapshot()?;

    Ok(QuotationEngine::new(
        config.engine_settings(),
        SequenceAllocator::new(
            MemoryCounterStore::with_counters(invoice_counters),
            config.business.invoice_prefix.clone(),
        ),
        SequenceAllocator::new(
            MemoryCounterStore::with_counters(agreement_counters),
            config.business.agreement_prefix.clone(),
        ),
        MemoryStorage::default(),
    ))
}

/// 設定了 `[auth]` 時檢查帳號密碼；未設定則不需登入
pub fn authenticate(
    config: &AppConfig,
    username: Option<&str>,
    password: Option<&str>,
) -> Result<()> {
    let Some(auth) = &config.auth else {
        return Ok(());
    };

    let verifier = StaticCredentials::new(&auth.username, &auth.password);
    check_credentials(&verifier, username.unwrap_or_default(), password.unwrap_or_default())
}

pub fn check_credentials(
    verifier: &impl CredentialVerifier,
    username: &str,
    password: &str,
) -> Result<()> {
    if verifier.verify(username, password) {
        tracing::debug!("User {} authenticated", username);
        Ok(())
    } else {
        tracing::warn!("Rejected login for user '{}'", username);
        Err(QuoteError::AuthenticationError {
            username: username.to_string(),
        })
    }
}
