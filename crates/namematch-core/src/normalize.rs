//! Deterministic text cleanup applied before scoring.
//!
//! Steps run in a fixed order: invisible-character stripping, full-width
//! folding, punctuation stripping, then the mandatory case fold and
//! whitespace collapse.

use namematch_model::NormalizationOptions;

/// Normalize a string for comparison.
///
/// Pure and total: any input, including the empty string, yields a string.
pub fn normalize(text: &str, options: &NormalizationOptions) -> String {
    if text.is_empty() {
        return String::new();
    }

    let cleaned: String = text
        .chars()
        .filter(|&ch| !(options.strip_invisible && is_invisible(ch)))
        .map(|ch| {
            if options.fold_fullwidth {
                fold_fullwidth(ch)
            } else {
                ch
            }
        })
        .filter(|&ch| !(options.ignore_punctuation && is_punctuation(ch)))
        .collect();

    cleaned
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Case-fold and trim, used for synonym terms.
pub fn fold_term(term: &str) -> String {
    term.trim().to_lowercase()
}

/// Control characters and common zero-width or invisible code points.
pub fn is_invisible(ch: char) -> bool {
    matches!(
        ch,
        '\u{0000}'..='\u{001F}'
            | '\u{007F}'..='\u{009F}'
            | '\u{2000}'..='\u{200F}'
            | '\u{2028}'..='\u{202F}'
            | '\u{205F}'..='\u{206F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

/// Anything that is neither an ASCII word character, a CJK unified
/// ideograph nor whitespace.
fn is_punctuation(ch: char) -> bool {
    !(ch.is_ascii_alphanumeric() || ch == '_' || is_cjk_ideograph(ch) || ch.is_whitespace())
}

fn is_cjk_ideograph(ch: char) -> bool {
    ('\u{4E00}'..='\u{9FFF}').contains(&ch)
}

/// Map a full-width character to its half-width ASCII form.
///
/// Covers the 10 digits, both cases of the 26 Latin letters, the full-width
/// ASCII punctuation block and the ideographic space. Other characters pass
/// through unchanged.
pub fn fold_fullwidth(ch: char) -> char {
    match ch {
        '０'..='９' | 'Ａ'..='Ｚ' | 'ａ'..='ｚ' => shift_fullwidth(ch),
        '！' | '＂' | '＃' | '＄' | '％' | '＆' | '＇' | '（' | '）' | '＊' | '＋' | '，'
        | '－' | '．' | '／' | '：' | '；' | '＜' | '＝' | '＞' | '？' | '＠' | '［' | '＼'
        | '］' | '＾' | '＿' | '｀' | '｛' | '｜' | '｝' | '～' => shift_fullwidth(ch),
        '\u{3000}' => ' ',
        _ => ch,
    }
}

// The full-width forms block mirrors printable ASCII at a fixed offset.
fn shift_fullwidth(ch: char) -> char {
    char::from_u32(ch as u32 - 0xFEE0).unwrap_or(ch)
}
