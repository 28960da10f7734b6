//! Sibling ordering for attribute groups

use std::cmp::Ordering;

/// `true` for an optional `-` followed by digits without leading zeros
/// (a lone `"0"` is fine).
pub fn is_plain_integer(value: &str) -> bool {
    let digits = value.strip_prefix('-').unwrap_or(value);
    match digits.as_bytes() {
        [] => false,
        [b'0'] => true,
        [b'0', ..] => false,
        bytes => bytes.iter().all(u8::is_ascii_digit),
    }
}

/// Numeric comparison of two plain integers of any length.
fn compare_plain_integers(a: &str, b: &str) -> Ordering {
    fn split(value: &str) -> (bool, &str) {
        match value.strip_prefix('-') {
            Some("0") => (false, "0"),
            Some(magnitude) => (true, magnitude),
            None => (false, value),
        }
    }
    let (a_negative, a_magnitude) = split(a);
    let (b_negative, b_magnitude) = split(b);
    let magnitude = a_magnitude
        .len()
        .cmp(&b_magnitude.len())
        .then_with(|| a_magnitude.cmp(b_magnitude));
    match (a_negative, b_negative) {
        (false, false) => magnitude,
        (true, true) => magnitude.reverse(),
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
    }
}

/// Case-insensitive first, then lowercase before uppercase, then code point
/// order, approximating a default-locale collation.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
        .then_with(|| lowercase_first(a, b))
        .then_with(|| a.cmp(b))
}

fn lowercase_first(a: &str, b: &str) -> Ordering {
    for (x, y) in a.chars().zip(b.chars()) {
        if x == y {
            continue;
        }
        if x.is_lowercase() && y.is_uppercase() {
            return Ordering::Less;
        }
        if x.is_uppercase() && y.is_lowercase() {
            return Ordering::Greater;
        }
    }
    Ordering::Equal
}

/// Order of general groups: missing values last, numbers numerically when
/// both sides are plain integers, otherwise locale order.
pub fn compare_attribute_values(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) if is_plain_integer(a) && is_plain_integer(b) => {
            compare_plain_integers(a, b).then_with(|| locale_compare(a, b))
        }
        (Some(a), Some(b)) => locale_compare(a, b),
    }
}

/// Stable insertion sort.
///
/// `compare_attribute_values` is not transitive across mixed numeric and text
/// values (`2 < 10`, `10 < 10a`, `10a < 2`), which `slice::sort_by` is allowed
/// to reject with a panic. Group counts are small, so quadratic is fine.
pub fn sort_tolerant<T>(items: Vec<T>, compare: impl Fn(&T, &T) -> Ordering) -> Vec<T> {
    let mut sorted: Vec<T> = Vec::with_capacity(items.len());
    for item in items {
        let at = sorted
            .iter()
            .rposition(|placed| compare(placed, &item) != Ordering::Greater)
            .map_or(0, |index| index + 1);
        sorted.insert(at, item);
    }
    sorted
}

/// Order of filtered groups: missing values last, otherwise plain
/// lexicographic comparison of the full labels.
pub fn compare_filtered_labels(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => a.cmp(b),
    }
}
