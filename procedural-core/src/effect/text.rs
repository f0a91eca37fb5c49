//! Description text helpers.
//!
//! Numbers print like a `0.##` format string: at most N decimals, trailing
//! zeros dropped. Styled spans use the host's `<style=cName>` markup.

/// Format with at most `max_decimals` places, trimming trailing zeros
pub fn fmt_number(value: f32, max_decimals: usize) -> String {
    let mut s = format!("{:.*}", max_decimals, value);
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s
}

/// Lower-case the first character, leaving the rest untouched
pub fn lower_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `<style=c{style}>{text}</style>`
pub fn styled(style: &str, text: &str) -> String {
    format!("<style=c{style}>{text}</style>")
}

/// Percentage with an optional per-stack suffix
pub fn percent_with_stack(value: f32, stack_scaling: f32, style: &str) -> String {
    let mut out = styled(style, &format!("{}%", fmt_number(value, 2)));
    if stack_scaling > 0.0 {
        out.push(' ');
        out.push_str(&styled(
            "Stack",
            &format!("(+{}% per stack)", fmt_number(value * stack_scaling, 2)),
        ));
    }
    out
}

/// Seconds with an optional per-stack suffix, one decimal
pub fn seconds_with_stack(seconds: f32, stack_scaling: f32) -> String {
    let mut out = styled("IsUtility", &format!("{} seconds", fmt_number(seconds, 1)));
    if stack_scaling > 0.0 {
        out.push(' ');
        out.push_str(&styled(
            "Stack",
            &format!("(+{} per stack)", fmt_number(seconds * stack_scaling, 1)),
        ));
    }
    out
}

/// Drop one trailing period, if present
pub fn strip_period(text: &mut String) {
    if text.ends_with('.') {
        text.pop();
    }
}
