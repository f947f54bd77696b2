use crate::core::numerals::rupees_in_words;
use crate::domain::model::{Capacity, Phase, Quotation};

pub const DEFAULT_RATE_PER_KW: u64 = 70_000;

/// 容量達 5 kW 以上需三相供電
pub fn phase_for(capacity: Capacity) -> Phase {
    if capacity.tenths_of_kw() >= 50 {
        Phase::Three
    } else {
        Phase::Single
    }
}

/// 依容量計算報價，總額取整數 (無條件捨去)
pub fn quote(capacity: Capacity, rate_per_kw: u64) -> Quotation {
    let total_amount = capacity.tenths_of_kw() * rate_per_kw / 10;

    Quotation {
        capacity,
        phase: phase_for(capacity),
        total_amount,
        amount_in_words: rupees_in_words(total_amount),
    }
}
