use crate::core::numerals::format_thousands;
use crate::domain::model::{CustomerDetails, PlaceholderMap, Quotation};
use chrono::{Datelike, NaiveDate};

pub const REF_NO: &str = "{{REF_NO}}";
pub const DATE: &str = "{{DATE}}";
pub const AGREEMENT_NO: &str = "{{AGREEMENT_NO}}";
pub const AGREEMENT_DATE: &str = "{{AGREEMENT_DATE}}";
pub const CUSTOMER_NAME: &str = "{{CUSTOMER_NAME}}";
pub const ADDRESS: &str = "{{ADDRESS}}";
pub const PHONE: &str = "{{PHONE}}";
pub const CONSUMER_NO: &str = "{{CONSUMER_NO}}";
pub const SYSTEM_CAPACITY: &str = "{{SYSTEM_CAPACITY}}";
pub const TOTAL_AMOUNT: &str = "{{TOTAL_AMOUNT}}";
pub const SYSTEM_COST: &str = "{{SYSTEM_COST}}";
pub const AMOUNT_IN_WORDS: &str = "{{AMOUNT_IN_WORDS}}";
pub const PHASE_TYPE: &str = "{{PHASE_TYPE}}";
pub const APDCL_SUBDIVISION: &str = "{{APDCL_SUBDIVISION}}";
pub const W1_NAME: &str = "{{W1_NAME}}";
pub const W1_PHONE: &str = "{{W1_PHONE}}";
pub const W2_NAME: &str = "{{W2_NAME}}";
pub const W2_PHONE: &str = "{{W2_PHONE}}";

/// 本次申請發出的編號
#[derive(Debug, Clone)]
pub struct IssuedNumbers {
    pub reference_no: String,
    pub agreement_no: String,
}

/// 合約用的日期寫法，例如 "1st Day of May 2025"
pub fn format_legal_date(date: NaiveDate) -> String {
    let day = date.day();
    let suffix = if (11..=13).contains(&day) {
        "th"
    } else {
        match day % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        }
    };
    format!("{}{} Day of {}", day, suffix, date.format("%B %Y"))
}

pub fn format_invoice_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

pub fn build_placeholder_map(
    details: &CustomerDetails,
    quotation: &Quotation,
    numbers: &IssuedNumbers,
    date: NaiveDate,
) -> PlaceholderMap {
    let amount = format_thousands(quotation.total_amount);

    [
        (REF_NO, numbers.reference_no.clone()),
        (DATE, format_invoice_date(date)),
        (AGREEMENT_NO, numbers.agreement_no.clone()),
        (AGREEMENT_DATE, format_legal_date(date)),
        (CUSTOMER_NAME, details.name.clone()),
        (ADDRESS, details.address.clone()),
        (PHONE, details.phone.clone()),
        (CONSUMER_NO, details.consumer_no.clone()),
        (SYSTEM_CAPACITY, format!("{} kW", quotation.capacity)),
        (TOTAL_AMOUNT, amount.clone()),
        (SYSTEM_COST, amount),
        (AMOUNT_IN_WORDS, quotation.amount_in_words.clone()),
        (PHASE_TYPE, quotation.phase.to_string()),
        (APDCL_SUBDIVISION, details.subdivision.clone()),
        (W1_NAME, details.first_witness.name.clone()),
        (W1_PHONE, details.first_witness.phone.clone()),
        (W2_NAME, details.second_witness.name.clone()),
        (W2_PHONE, details.second_witness.phone.clone()),
    ]
    .into_iter()
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::quotation::{quote, DEFAULT_RATE_PER_KW};
    use crate::domain::model::{Capacity, Witness};

    #[test]
    fn test_legal_date_suffixes() {
        let date = |d| NaiveDate::from_ymd_opt(2025, 5, d).unwrap();

        assert_eq!(format_legal_date(date(1)), "1st Day of May 2025");
        assert_eq!(format_legal_date(date(2)), "2nd Day of May 2025");
        assert_eq!(format_legal_date(date(3)), "3rd Day of May 2025");
        assert_eq!(format_legal_date(date(4)), "4th Day of May 2025");
        assert_eq!(format_legal_date(date(11)), "11th Day of May 2025");
        assert_eq!(format_legal_date(date(12)), "12th Day of May 2025");
        assert_eq!(format_legal_date(date(13)), "13th Day of May 2025");
        assert_eq!(format_legal_date(date(21)), "21st Day of May 2025");
        assert_eq!(format_legal_date(date(22)), "22nd Day of May 2025");
        assert_eq!(format_legal_date(date(23)), "23rd Day of May 2025");
        assert_eq!(format_legal_date(date(31)), "31st Day of May 2025");
    }

    #[test]
    fn test_invoice_date_format() {
        let date = NaiveDate::from_ymd_opt(2025, 5, 7).unwrap();
        assert_eq!(format_invoice_date(date), "07/05/2025");
    }

    #[test]
    fn test_build_placeholder_map() {
        let mut details = CustomerDetails::new("Asha Das", "9876543210", Capacity::FourPointFive);
        details.address = "Khowang".to_string();
        details.first_witness = Witness {
            name: "Ravi".to_string(),
            phone: "111".to_string(),
        };
        let quotation = quote(details.capacity, DEFAULT_RATE_PER_KW);
        let numbers = IssuedNumbers {
            reference_no: "BE/KNG/PMSG/QTN/05/25/0001".to_string(),
            agreement_no: "AG/SG/APDCL/2025/0001".to_string(),
        };
        let date = NaiveDate::from_ymd_opt(2025, 5, 7).unwrap();

        let map = build_placeholder_map(&details, &quotation, &numbers, date);

        assert_eq!(map.len(), 18);
        assert_eq!(map.get(REF_NO), Some("BE/KNG/PMSG/QTN/05/25/0001"));
        assert_eq!(map.get(DATE), Some("07/05/2025"));
        assert_eq!(map.get(AGREEMENT_DATE), Some("7th Day of May 2025"));
        assert_eq!(map.get(SYSTEM_CAPACITY), Some("4.5 kW"));
        assert_eq!(map.get(TOTAL_AMOUNT), Some("315,000"));
        assert_eq!(map.get(SYSTEM_COST), Some("315,000"));
        assert_eq!(
            map.get(AMOUNT_IN_WORDS),
            Some("Rupees three lakh, fifteen thousand only")
        );
        assert_eq!(map.get(PHASE_TYPE), Some("Single Phase"));
        assert_eq!(map.get(W1_NAME), Some("Ravi"));
        assert_eq!(map.get(W2_PHONE), Some(""));
    }
}
