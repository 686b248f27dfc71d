use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Display width of a string. Accented client and country names are one
/// column per letter even when written with combining marks.
pub(crate) fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Cut a string to fit within `width` display columns, ending in ".." when cut.
pub(crate) fn truncate_display(s: &str, width: usize) -> String {
    if display_width(s) <= width {
        return s.to_string();
    }
    if width < 3 {
        return s
            .chars()
            .scan(0, |used, ch| {
                *used += ch.width().unwrap_or(0);
                (*used <= width).then_some(ch)
            })
            .collect();
    }

    let budget = width - 2;
    let mut used = 0;
    let mut end_byte = 0;
    for (i, ch) in s.char_indices() {
        let cw = ch.width().unwrap_or(0);
        if used + cw > budget {
            break;
        }
        used += cw;
        end_byte = i + ch.len_utf8();
    }
    format!("{}..", &s[..end_byte])
}

/// Left-aligned cell of exactly `width` columns.
pub(crate) fn pad_right(s: &str, width: usize) -> String {
    let cut = truncate_display(s, width);
    let pad = width.saturating_sub(display_width(&cut));
    format!("{cut}{}", " ".repeat(pad))
}

/// Right-aligned cell of exactly `width` columns, for figures.
pub(crate) fn pad_left(s: &str, width: usize) -> String {
    let cut = truncate_display(s, width);
    let pad = width.saturating_sub(display_width(&cut));
    format!("{}{cut}", " ".repeat(pad))
}
