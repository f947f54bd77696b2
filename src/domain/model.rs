use crate::utils::error::{QuoteError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// 計數檔內容：期間鍵 (例如 "05/25" 或 "2025") 對應目前已發出的最大號碼
pub type CounterMap = BTreeMap<String, u32>;

/// 可選的系統容量 (kW)，以十分之一 kW 為單位避免浮點誤差
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capacity {
    Three,
    FourPointFive,
    Five,
    Ten,
}

impl Capacity {
    pub const ALL: [Capacity; 4] = [
        Capacity::Three,
        Capacity::FourPointFive,
        Capacity::Five,
        Capacity::Ten,
    ];

    pub fn tenths_of_kw(self) -> u64 {
        match self {
            Capacity::Three => 30,
            Capacity::FourPointFive => 45,
            Capacity::Five => 50,
            Capacity::Ten => 100,
        }
    }
}

impl fmt::Display for Capacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tenths = self.tenths_of_kw();
        if tenths % 10 == 0 {
            write!(f, "{}", tenths / 10)
        } else {
            write!(f, "{}.{}", tenths / 10, tenths % 10)
        }
    }
}

impl FromStr for Capacity {
    type Err = QuoteError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let number = trimmed
            .strip_suffix("kW")
            .or_else(|| trimmed.strip_suffix("kw"))
            .unwrap_or(trimmed)
            .trim();

        let invalid = || QuoteError::ValidationError {
            message: format!(
                "unsupported system capacity '{}', expected one of: {}",
                s,
                Capacity::ALL
                    .iter()
                    .map(|c| c.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        };

        let value: f64 = number.parse().map_err(|_| invalid())?;
        Capacity::ALL
            .into_iter()
            .find(|c| (c.tenths_of_kw() as f64 - value * 10.0).abs() < 1e-6)
            .ok_or_else(invalid)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Single,
    Three,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Single => f.write_str("Single Phase"),
            Phase::Three => f.write_str("Three Phase"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quotation {
    pub capacity: Capacity,
    pub phase: Phase,
    pub total_amount: u64,
    pub amount_in_words: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Witness {
    pub name: String,
    pub phone: String,
}

/// 表單收集的客戶資料
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerDetails {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub consumer_no: String,
    pub subdivision: String,
    pub capacity: Capacity,
    pub first_witness: Witness,
    pub second_witness: Witness,
}

impl CustomerDetails {
    pub fn new(name: impl Into<String>, phone: impl Into<String>, capacity: Capacity) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            address: String::new(),
            consumer_no: String::new(),
            subdivision: String::new(),
            capacity,
            first_witness: Witness::default(),
            second_witness: Witness::default(),
        }
    }
}

/// 佔位符對照表，建立後不可修改
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceholderMap {
    entries: BTreeMap<String, String>,
}

impl PlaceholderMap {
    pub fn get(&self, token: &str) -> Option<&str> {
        self.entries.get(token).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PlaceholderMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentKind {
    Invoice,
    Agreement,
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKind::Invoice => f.write_str("Invoice"),
            DocumentKind::Agreement => f.write_str("Agreement"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DeliveredDocument {
    pub kind: DocumentKind,
    pub file_name: String,
    pub location: String,
    pub size: usize,
}

/// 一次產生文件的結果
#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    pub reference_no: String,
    pub agreement_no: String,
    pub quotation: Quotation,
    pub documents: Vec<DeliveredDocument>,
    pub share_link: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterEntry {
    pub generated_at: String,
    pub reference_no: String,
    pub agreement_no: String,
    pub customer_name: String,
    pub phone: String,
    pub capacity: String,
    pub total_amount: u64,
    pub invoice_file: String,
    pub agreement_file: String,
}
