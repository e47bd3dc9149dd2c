//! Distance and similarity metrics over normalized text.
//!
//! All lengths are measured in Unicode scalar values, so a CJK ideograph
//! counts as one character.

use rapidfuzz::distance::{lcs_seq, levenshtein};

/// Winkler prefix boost is applied only at or above this Jaro score.
const WINKLER_THRESHOLD: f64 = 0.7;
/// Scaling factor for each shared prefix character.
const WINKLER_PREFIX_WEIGHT: f64 = 0.1;
/// Longest prefix that earns a boost.
const WINKLER_MAX_PREFIX: usize = 4;

/// Levenshtein distance with unit costs for insert, delete and substitute.
pub fn edit_distance(a: &str, b: &str) -> usize {
    levenshtein::distance(a.chars(), b.chars())
}

/// `1 - distance / max_len`; 1.0 for equal strings, 0.0 when exactly one
/// side is empty.
pub fn edit_similarity(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }
    let len_a = a.chars().count();
    let len_b = b.chars().count();
    if len_a == 0 || len_b == 0 {
        return 0.0;
    }
    let max_len = len_a.max(len_b);
    1.0 - edit_distance(a, b) as f64 / max_len as f64
}

/// Jaro-Winkler similarity in `[0, 1]`.
///
/// Characters match when equal and no further apart than
/// `max_len / 2 - 1`; each source character takes the first free match in
/// its window. The Winkler boost of `0.1 * prefix * (1 - jaro)` (prefix at
/// most four characters) is added only when the Jaro score reaches 0.7.
pub fn phonetic_similarity(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let s1: Vec<char> = a.chars().collect();
    let s2: Vec<char> = b.chars().collect();
    let jaro = jaro(&s1, &s2);
    if jaro < WINKLER_THRESHOLD {
        return jaro;
    }

    let prefix = s1
        .iter()
        .zip(&s2)
        .take(WINKLER_MAX_PREFIX)
        .take_while(|(x, y)| x == y)
        .count();
    jaro + WINKLER_PREFIX_WEIGHT * prefix as f64 * (1.0 - jaro)
}

fn jaro(s1: &[char], s2: &[char]) -> f64 {
    let len1 = s1.len();
    let len2 = s2.len();
    let window = (len1.max(len2) / 2) as isize - 1;
    if window < 0 {
        return 0.0;
    }
    let window = window as usize;

    let mut s1_matched = vec![false; len1];
    let mut s2_matched = vec![false; len2];
    let mut matches = 0usize;

    for (i, ch) in s1.iter().enumerate() {
        let start = i.saturating_sub(window);
        let end = (i + window + 1).min(len2);
        for j in start..end {
            if s2_matched[j] || s2[j] != *ch {
                continue;
            }
            s1_matched[i] = true;
            s2_matched[j] = true;
            matches += 1;
            break;
        }
    }

    if matches == 0 {
        return 0.0;
    }

    let mut transpositions = 0usize;
    let mut k = 0usize;
    for (i, ch) in s1.iter().enumerate() {
        if !s1_matched[i] {
            continue;
        }
        while !s2_matched[k] {
            k += 1;
        }
        if *ch != s2[k] {
            transpositions += 1;
        }
        k += 1;
    }

    let m = matches as f64;
    (m / len1 as f64 + m / len2 as f64 + (m - transpositions as f64 / 2.0) / m) / 3.0
}

/// Length of the longest common subsequence of two strings.
pub fn lcs_length(a: &str, b: &str) -> usize {
    lcs_seq::similarity(a.chars(), b.chars())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn edit_distance_classic_cases() {
        assert_eq!(edit_distance("kitten", "sitting"), 3);
        assert_eq!(edit_distance("", "abc"), 3);
        assert_eq!(edit_distance("abc", ""), 3);
        assert_eq!(edit_distance("阿里巴巴", "阿里"), 2);
    }

    #[test]
    fn edit_similarity_edges() {
        assert_eq!(edit_similarity("", ""), 1.0);
        assert_eq!(edit_similarity("abc", ""), 0.0);
        assert_eq!(edit_similarity("", "abc"), 0.0);
        assert!(approx(edit_similarity("abc", "abd"), 2.0 / 3.0));
        assert!(approx(edit_similarity("阿里巴巴集团", "阿里巴巴集团控股有限公司"), 0.5));
    }

    #[test]
    fn jaro_winkler_reference_values() {
        assert!(approx(phonetic_similarity("martha", "marhta"), 0.961_111_111_111_111_1));
        assert!(approx(phonetic_similarity("abc", "abd"), 0.822_222_222_222_222_2));
        assert!(approx(phonetic_similarity("dixon", "dicksonx"), 0.813_333_333_333_333_3));
        assert!(approx(
            phonetic_similarity("阿里巴巴集团", "阿里巴巴集团控股有限公司"),
            0.9
        ));
    }

    #[test]
    fn jaro_winkler_edges() {
        assert_eq!(phonetic_similarity("same", "same"), 1.0);
        assert_eq!(phonetic_similarity("", "abc"), 0.0);
        assert_eq!(phonetic_similarity("a", "b"), 0.0);
        assert_eq!(phonetic_similarity("abc", "xyz"), 0.0);
    }

    #[test]
    fn winkler_boost_requires_threshold() {
        // Jaro below 0.7 is returned unboosted even with a shared prefix.
        let score = phonetic_similarity("abcdefgh", "abxxxxxxxxxxxxxxxx");
        let s1: Vec<char> = "abcdefgh".chars().collect();
        let s2: Vec<char> = "abxxxxxxxxxxxxxxxx".chars().collect();
        let raw = jaro(&s1, &s2);
        assert!(raw < WINKLER_THRESHOLD);
        assert!(approx(score, raw));
    }

    #[test]
    fn lcs_length_cases() {
        assert_eq!(lcs_length("abcde", "ace"), 3);
        assert_eq!(lcs_length("", "abc"), 0);
        assert_eq!(lcs_length("阿里巴巴", "巴巴阿里"), 2);
        assert_eq!(lcs_length("阿里巴巴集团", "阿里巴巴集团控股有限公司"), 6);
        assert_eq!(lcs_length("lewenstein", "levenshtein"), 9);
    }
}
