//! `$` numbering inside repeated elements.
//!
//! A run of `$` is replaced by the current repetition number, zero-padded to
//! the run's length. An `@` modifier may follow the run:
//!
//! - `@-` counts down instead of up
//! - `@N` starts counting at N
//! - `@-N` counts down, ending at N

use std::borrow::Cow;

/// Position within the nearest enclosing multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Counter {
    /// Zero-based repetition index.
    pub index: u32,
    /// Total number of repetitions.
    pub total: u32,
}

/// Replace numbering placeholders in `template`.
///
/// Without a counter the template is returned unchanged, `$` included.
pub fn apply(template: &str, counter: Option<Counter>) -> Cow<'_, str> {
    let Some(counter) = counter else {
        return Cow::Borrowed(template);
    };
    if !template.contains('$') {
        return Cow::Borrowed(template);
    }

    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '$' {
            out.push(c);
            continue;
        }

        let mut width = 1;
        while chars.next_if_eq(&'$').is_some() {
            width += 1;
        }

        let mut reverse = false;
        let mut start = 1u32;
        if chars.next_if_eq(&'@').is_some() {
            reverse = chars.next_if_eq(&'-').is_some();
            let mut digits = String::new();
            while let Some(d) = chars.next_if(|d| d.is_ascii_digit()) {
                digits.push(d);
            }
            if let Ok(n) = digits.parse() {
                start = n;
            }
        }

        // Widened so a huge `@N` start cannot overflow.
        let offset = if reverse {
            counter.total.saturating_sub(counter.index).saturating_sub(1)
        } else {
            counter.index
        };
        let value = u64::from(start) + u64::from(offset);
        out.push_str(&format!("{value:0width$}"));
    }

    Cow::Owned(out)
}
