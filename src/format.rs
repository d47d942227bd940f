//! Human-friendly number formatting for counts shown in tables and charts.
//!
//! - below 100,000: comma separators (`1,234`)
//! - 100,000 and up: thousands (`123K`)
//! - 1,000,000 and up: millions (`2M`, `1.2M`)

pub fn format_number(num: u64) -> String {
    if num >= 1_000_000 {
        return if num % 1_000_000 == 0 {
            format!("{}M", num / 1_000_000)
        } else {
            format!("{:.1}M", num as f64 / 1_000_000.0)
        };
    }

    if num >= 100_000 {
        return if num % 1_000 == 0 {
            format!("{}K", num / 1_000)
        } else {
            format!("{:.0}K", num as f64 / 1_000.0)
        };
    }

    with_separators(num)
}

fn with_separators(num: u64) -> String {
    let digits = num.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
