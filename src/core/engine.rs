use crate::adapters::docx::Document;
use crate::adapters::register::Register;
use crate::core::filler::fill;
use crate::core::placeholders::{build_placeholder_map, IssuedNumbers};
use crate::core::quotation::quote;
use crate::core::sequence::{agreement_period_key, invoice_period_key, SequenceAllocator};
use crate::core::share::{agreement_file_name, invoice_file_name, share_link};
use crate::domain::model::{
    Capacity, CustomerDetails, DeliveredDocument, DocumentKind, GenerationOutcome, Quotation,
    RegisterEntry,
};
use crate::domain::ports::{CounterStore, Storage};
use crate::utils::error::Result;
use crate::utils::validation::require_input;
use chrono::NaiveDateTime;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub rate_per_kw: u64,
    pub invoice_template: PathBuf,
    pub agreement_template: PathBuf,
    pub share_base_url: String,
    pub share_message: String,
}

/// 報價流程：試算 → 載入範本 → 配號 → 填入 → 輸出
pub struct QuotationEngine<C: CounterStore, S: Storage> {
    settings: EngineSettings,
    invoice_sequence: SequenceAllocator<C>,
    agreement_sequence: SequenceAllocator<C>,
    storage: S,
    register: Option<Register>,
}

impl<C: CounterStore, S: Storage> QuotationEngine<C, S> {
    pub fn new(
        settings: EngineSettings,
        invoice_sequence: SequenceAllocator<C>,
        agreement_sequence: SequenceAllocator<C>,
        storage: S,
    ) -> Self {
        Self {
            settings,
            invoice_sequence,
            agreement_sequence,
            storage,
            register: None,
        }
    }

    pub fn with_register(mut self, register: Register) -> Self {
        self.register = Some(register);
        self
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn invoice_sequence(&self) -> &SequenceAllocator<C> {
        &self.invoice_sequence
    }

    pub fn agreement_sequence(&self) -> &SequenceAllocator<C> {
        &self.agreement_sequence
    }

    pub fn quote(&self, capacity: Capacity) -> Quotation {
        quote(capacity, self.settings.rate_per_kw)
    }

    pub fn generate(
        &self,
        details: &CustomerDetails,
        now: NaiveDateTime,
    ) -> Result<GenerationOutcome> {
        // 必填欄位缺漏時不得消耗任何編號
        require_input("name", &details.name)?;
        require_input("phone", &details.phone)?;

        let quotation = self.quote(details.capacity);
        tracing::info!(
            "Quotation for {}: {} kW, {}, total {}",
            details.name,
            details.capacity,
            quotation.phase,
            quotation.total_amount
        );

        // 範本先載入，缺檔時也不會消耗編號
        tracing::debug!("Loading templates");
        let invoice_template = Document::open(&self.settings.invoice_template)?;
        let agreement_template = Document::open(&self.settings.agreement_template)?;

        let date = now.date();
        let agreement_no = self
            .agreement_sequence
            .allocate_reference(&agreement_period_key(date))?;
        let reference_no = self
            .invoice_sequence
            .allocate_reference(&invoice_period_key(date))?;
        tracing::info!("🔢 Issued {} and {}", reference_no, agreement_no);

        let numbers = IssuedNumbers {
            reference_no,
            agreement_no,
        };
        let placeholders = build_placeholder_map(details, &quotation, &numbers, date);

        let invoice = fill(&invoice_template, &placeholders).to_bytes()?;
        let agreement = fill(&agreement_template, &placeholders).to_bytes()?;

        let rendered = [
            (
                DocumentKind::Invoice,
                invoice_file_name(&details.name),
                invoice,
            ),
            (
                DocumentKind::Agreement,
                agreement_file_name(&numbers.agreement_no, &details.name),
                agreement,
            ),
        ];
        let documents = self.deliver(rendered)?;

        if let Some(register) = &self.register {
            let entry = RegisterEntry {
                generated_at: now.format("%Y-%m-%dT%H:%M:%S").to_string(),
                reference_no: numbers.reference_no.clone(),
                agreement_no: numbers.agreement_no.clone(),
                customer_name: details.name.clone(),
                phone: details.phone.clone(),
                capacity: format!("{} kW", details.capacity),
                total_amount: quotation.total_amount,
                invoice_file: documents[0].file_name.clone(),
                agreement_file: documents[1].file_name.clone(),
            };
            if let Err(e) = register.append(&entry) {
                tracing::warn!(
                    "⚠️ Documents generated but register {} was not updated: {}",
                    register.path().display(),
                    e
                );
            }
        }

        let share_link = share_link(
            &self.settings.share_base_url,
            &self.settings.share_message,
            &details.name,
        );

        Ok(GenerationOutcome {
            reference_no: numbers.reference_no,
            agreement_no: numbers.agreement_no,
            quotation,
            documents,
            share_link,
        })
    }

    // 全部寫入成功才算完成；中途失敗時移除已寫入的檔案
    fn deliver(
        &self,
        rendered: [(DocumentKind, String, Vec<u8>); 2],
    ) -> Result<Vec<DeliveredDocument>> {
        let mut delivered: Vec<DeliveredDocument> = Vec::with_capacity(rendered.len());

        for (kind, file_name, bytes) in rendered {
            match self.storage.write_file(&file_name, &bytes) {
                Ok(location) => {
                    tracing::debug!("{} written to {} ({} bytes)", kind, location, bytes.len());
                    delivered.push(DeliveredDocument {
                        kind,
                        file_name,
                        location,
                        size: bytes.len(),
                    });
                }
                Err(e) => {
                    for document in &delivered {
                        if let Err(cleanup) = self.storage.remove_file(&document.file_name) {
                            tracing::warn!(
                                "Failed to remove partial output {}: {}",
                                document.location,
                                cleanup
                            );
                        }
                    }
                    return Err(e);
                }
            }
        }

        Ok(delivered)
    }
}
