//! Greedy word wrap against Helvetica glyph widths.
//!
//! Widths are the standard Helvetica AFM advance widths in 1/1000 em, covering
//! ASCII 0x20..=0x7E. Index = (char as usize) - 32. Anything else measures as
//! `AVERAGE_WIDTH`. Bold is approximated with the regular table plus a 5% margin.

/// Advance widths for ASCII 0x20..=0x7E.
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
    278, 278, 355, 556, 556, 889, 667, 222, 333, 333, 389, 584, 278, 333, 278, 278,
    // 0    1    2    3    4    5    6    7    8    9
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    // :    ;    <    =    >    ?    @
    278, 278, 584, 584, 584, 556, 1015,
    // A    B    C    D    E    F    G    H    I    J    K    L    M
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    // N    O    P    Q    R    S    T    U    V    W    X    Y    Z
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    // [    \    ]    ^    _    `
    278, 278, 278, 469, 556, 222,
    // a    b    c    d    e    f    g    h    i    j    k    l    m
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    // n    o    p    q    r    s    t    u    v    w    x    y    z
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    // {    |    }    ~
    334, 260, 334, 584,
];

const AVERAGE_WIDTH: u16 = 556;
const BOLD_FACTOR: f32 = 1.05;

/// Width of `s` in points at `font_size`.
pub fn measure(s: &str, font_size: f32, bold: bool) -> f32 {
    let units: u32 = s
        .chars()
        .map(|c| {
            let code = c as usize;
            if (32..=126).contains(&code) {
                u32::from(HELVETICA_WIDTHS[code - 32])
            } else {
                u32::from(AVERAGE_WIDTH)
            }
        })
        .sum();
    let width = units as f32 * font_size / 1000.0;
    if bold {
        width * BOLD_FACTOR
    } else {
        width
    }
}

/// Wraps one paragraph into lines no wider than `max_width` points.
///
/// Words wider than a full line are split by character. An empty or
/// whitespace-only paragraph yields no lines.
pub fn wrap_paragraph(text: &str, font_size: f32, bold: bool, max_width: f32) -> Vec<String> {
    let space_w = measure(" ", font_size, bold);
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_width = 0.0_f32;

    for word in text.split_whitespace() {
        for piece in split_long_word(word, font_size, bold, max_width) {
            let word_w = measure(&piece, font_size, bold);
            if current.is_empty() {
                current = piece;
                current_width = word_w;
            } else if current_width + space_w + word_w > max_width {
                // Current line is full — push it and start a new one.
                lines.push(std::mem::take(&mut current));
                current = piece;
                current_width = word_w;
            } else {
                current.push(' ');
                current.push_str(&piece);
                current_width += space_w + word_w;
            }
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Wraps multi-line text, keeping blank lines as paragraph breaks.
pub fn wrap_text(text: &str, font_size: f32, bold: bool, max_width: f32) -> Vec<String> {
    let mut out = Vec::new();
    for paragraph in text.lines() {
        if paragraph.trim().is_empty() {
            out.push(String::new());
        } else {
            out.extend(wrap_paragraph(paragraph, font_size, bold, max_width));
        }
    }
    out
}

fn split_long_word(word: &str, font_size: f32, bold: bool, max_width: f32) -> Vec<String> {
    if measure(word, font_size, bold) <= max_width {
        return vec![word.to_string()];
    }
    let mut pieces = Vec::new();
    let mut current = String::new();
    for c in word.chars() {
        let mut candidate = current.clone();
        candidate.push(c);
        if !current.is_empty() && measure(&candidate, font_size, bold) > max_width {
            pieces.push(std::mem::take(&mut current));
            current.push(c);
        } else {
            current = candidate;
        }
    }
    if !current.is_empty() {
        pieces.push(current);
    }
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIDTH: f32 = 468.0; // US letter minus 1" margins

    #[test]
    fn test_measure_known_glyphs() {
        // "Hi" = 722 + 222 units
        assert!((measure("Hi", 10.0, false) - 9.44).abs() < 1e-3);
        assert!(measure("Hi", 10.0, true) > measure("Hi", 10.0, false));
    }

    #[test]
    fn test_non_ascii_uses_average_width() {
        assert!((measure("é", 1000.0, false) - f32::from(AVERAGE_WIDTH)).abs() < 1e-3);
    }

    #[test]
    fn test_short_text_is_one_line() {
        assert_eq!(wrap_paragraph("Roast my idea", 11.0, false, WIDTH), vec!["Roast my idea"]);
    }

    #[test]
    fn test_long_text_wraps_within_width() {
        let text = "Go to Reddit and ask if anyone would pay for this. ".repeat(10);
        let lines = wrap_paragraph(&text, 11.0, false, WIDTH);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(measure(line, 11.0, false) <= WIDTH, "overflow: {line}");
        }
        assert_eq!(lines.join(" "), text.split_whitespace().collect::<Vec<_>>().join(" "));
    }

    #[test]
    fn test_overlong_word_is_split() {
        let word = "x".repeat(200);
        let lines = wrap_paragraph(&word, 11.0, false, WIDTH);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), word);
    }

    #[test]
    fn test_blank_lines_survive_as_paragraph_breaks() {
        let lines = wrap_text("1. One\n\n2. Two", 11.0, false, WIDTH);
        assert_eq!(lines, vec!["1. One", "", "2. Two"]);
    }

    #[test]
    fn test_empty_paragraph_has_no_lines() {
        assert!(wrap_paragraph("   ", 11.0, false, WIDTH).is_empty());
    }
}
