//! Text helpers for grid cells and previews

/// Tab width for visual column calculations
pub const TABULATOR_WIDTH: usize = 4;

/// Default character limit for target previews
pub const PREVIEW_LIMIT: usize = 80;

/// Visual width of a single-line string, expanding tabs
pub fn display_width(text: &str) -> usize {
    let mut visual_col = 0;
    for ch in text.chars() {
        if ch == '\t' {
            visual_col += TABULATOR_WIDTH - (visual_col % TABULATOR_WIDTH);
        } else {
            visual_col += 1;
        }
    }
    visual_col
}

/// Truncate text with ellipsis if too long
pub fn truncate_text(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else if max_chars <= 1 {
        s.chars().take(max_chars).collect()
    } else {
        let mut result: String = s.chars().take(max_chars - 1).collect();
        result.push('…');
        result
    }
}

/// Strip markup tags and fold line breaks / ideographic spaces to spaces
///
/// Tags are removed naively: anything between `<` and the next `>`.
pub fn normalize_for_match(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;
    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if in_tag => {}
            '\u{3000}' | '\n' | '\r' => out.push(' '),
            _ => out.push(ch),
        }
    }
    out
}

/// Single-line preview: normalized, whitespace collapsed, capped at `limit` chars
pub fn preview(s: &str, limit: usize) -> String {
    let normalized = normalize_for_match(s);
    let collapsed = normalized.split_whitespace().collect::<Vec<_>>().join(" ");
    if limit > 0 && collapsed.chars().count() > limit {
        let mut cut: String = collapsed.chars().take(limit).collect();
        cut.push_str("...");
        cut
    } else {
        collapsed
    }
}
