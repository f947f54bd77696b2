use crate::domain::model::CounterMap;
use crate::domain::ports::CounterStore;
use crate::utils::error::{QuoteError, Result};
use chrono::NaiveDate;

pub const DEFAULT_INVOICE_PREFIX: &str = "BE/KNG/PMSG/QTN";
pub const DEFAULT_AGREEMENT_PREFIX: &str = "AG/SG/APDCL";

/// 發票編號以月份分段 ("MM/YY")
pub fn invoice_period_key(date: NaiveDate) -> String {
    date.format("%m/%y").to_string()
}

/// 合約編號以年份分段 ("YYYY")
pub fn agreement_period_key(date: NaiveDate) -> String {
    date.format("%Y").to_string()
}

pub fn format_reference(prefix: &str, period_key: &str, counter: u32) -> String {
    format!("{}/{}/{:04}", prefix, period_key, counter)
}

/// 單一編號序列：每次配號都在計數儲存的鎖定範圍內讀取、遞增、寫回
pub struct SequenceAllocator<C: CounterStore> {
    store: C,
    prefix: String,
}

impl<C: CounterStore> SequenceAllocator<C> {
    pub fn new(store: C, prefix: impl Into<String>) -> Self {
        Self {
            store,
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// 發出 `period_key` 的下一個號碼；寫回失敗時視為未發號
    pub fn allocate(&self, period_key: &str) -> Result<u32> {
        let issued = self.store.update(|counters| {
            let next = next_counter(counters, period_key);
            if let Some(next) = next {
                counters.insert(period_key.to_string(), next);
            }
            next
        })?;
        let issued = issued.ok_or_else(|| self.exhausted(period_key))?;

        tracing::debug!("Issued {} for period {} ({})", issued, period_key, self.prefix);
        Ok(issued)
    }

    /// 發號並格式化為 `PREFIX/{key}/{counter:04}`
    pub fn allocate_reference(&self, period_key: &str) -> Result<String> {
        let counter = self.allocate(period_key)?;
        Ok(format_reference(&self.prefix, period_key, counter))
    }

    /// 下一次配號會得到的號碼，不寫入儲存
    pub fn peek(&self, period_key: &str) -> Result<u32> {
        let counters = self.store.snapshot()?;
        next_counter(&counters, period_key).ok_or_else(|| self.exhausted(period_key))
    }

    pub fn snapshot(&self) -> Result<CounterMap> {
        self.store.snapshot()
    }

    fn exhausted(&self, period_key: &str) -> QuoteError {
        QuoteError::CounterStoreError {
            path: format!("{}/{}", self.prefix, period_key),
            message: "counter is at its maximum value and cannot be incremented".to_string(),
        }
    }
}

fn next_counter(counters: &CounterMap, period_key: &str) -> Option<u32> {
    counters.get(period_key).copied().unwrap_or(0).checked_add(1)
}
