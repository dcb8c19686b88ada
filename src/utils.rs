//! Number formatting for log lines and the run summary.

/// Group the digits of `n` in threes.
///
/// ```
/// use rangegen::utils::group_digits;
/// assert_eq!(group_digits(33190), "33,190");
/// assert_eq!(group_digits(512), "512");
/// ```
pub fn group_digits(n: usize) -> String {
    let digits = n.to_string();
    let head = digits.len() % 3;
    let mut groups: Vec<&str> = Vec::with_capacity(digits.len() / 3 + 1);
    if head > 0 {
        groups.push(&digits[..head]);
    }
    for start in (head..digits.len()).step_by(3) {
        groups.push(&digits[start..start + 3]);
    }
    groups.join(",")
}

/// A grouped count followed by the matching noun form, e.g. `1 range`,
/// `12,345 ranges`.
pub fn count_noun(n: usize, singular: &str, plural: &str) -> String {
    let noun = if n == 1 { singular } else { plural };
    format!("{} {}", group_digits(n), noun)
}
