//! Number formatting used by on-screen captions and narration text.

/// Format an unsigned integer with `,` thousands separators (`1234567` -> `1,234,567`).
pub fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i).is_multiple_of(3) {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Format a signed integer with thousands separators and a leading `-` when negative.
pub fn thousands_i64(n: i64) -> String {
    if n < 0 {
        format!("-{}", thousands(n.unsigned_abs()))
    } else {
        thousands(n as u64)
    }
}

/// Signed delta with an explicit `+` when non-negative (`+1,024`, `-87`).
pub fn signed_delta(n: i64) -> String {
    if n >= 0 {
        format!("+{}", thousands(n as u64))
    } else {
        thousands_i64(n)
    }
}

/// Ordinal rank label used on the leaderboard (`1st`, `2nd`, `3rd`, `4th`, ...).
pub fn ordinal(rank: usize) -> String {
    let suffix = match (rank % 10, rank % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{rank}{suffix}")
}

/// Truncate `text` to `max_chars` characters, appending `...` when shortened.
pub fn ellipsize(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/format.rs"]
mod tests;
