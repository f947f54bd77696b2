//! 印度計數法 (lakh / crore) 的數字轉英文

const ONES: [&str; 20] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen",
    "nineteen",
];

const TENS: [&str; 10] = [
    "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];

// 由大到小；超過 99 crore 時 crore 前面的數字本身再遞迴展開 (例如 "one hundred crore")
const SCALES: [(u64, &str); 4] = [
    (10_000_000, "crore"),
    (100_000, "lakh"),
    (1_000, "thousand"),
    (100, "hundred"),
];

/// 將整數轉為印度計數法的英文基數詞
///
/// 群組之間以 ", " 分隔，尾數小於一百時以 "and" 連接，十位與個位以連字號連接：
/// `350000` → `"three lakh, fifty thousand"`，`1005` → `"one thousand and five"`，
/// `123` → `"one hundred and twenty-three"`。
pub fn to_indian_words(n: u64) -> String {
    if n < 20 {
        return ONES[n as usize].to_string();
    }

    if n < 100 {
        let tens = TENS[(n / 10) as usize];
        return match n % 10 {
            0 => tens.to_string(),
            unit => format!("{}-{}", tens, ONES[unit as usize]),
        };
    }

    for (value, name) in SCALES {
        if n >= value {
            let head = format!("{} {}", to_indian_words(n / value), name);
            let rest = n % value;
            return match rest {
                0 => head,
                r if r < 100 => format!("{} and {}", head, to_indian_words(r)),
                r => format!("{}, {}", head, to_indian_words(r)),
            };
        }
    }

    unreachable!("values below 100 return early")
}

/// 金額的文字寫法，連字號改為空白，例如 `"Rupees three lakh, fifty thousand only"`
pub fn rupees_in_words(amount: u64) -> String {
    format!("Rupees {} only", to_indian_words(amount).replace('-', " "))
}

/// 以逗號分隔每三位數，例如 `350000` → `"350,000"`
pub fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
