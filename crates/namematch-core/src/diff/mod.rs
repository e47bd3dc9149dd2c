//! Character-level diffs between a source and a matched target.
//!
//! Three interchangeable alignment algorithms produce the same
//! [`DiffResult`] model. Counts and ratio are always derived from the
//! returned segments, so each result is self-consistent; different
//! algorithms may break ties differently.

mod lcs;
mod levenshtein;
mod myers;

use namematch_model::{DiffAlgorithm, DiffResult, DiffSegment};

pub use lcs::lcs_diff;
pub use levenshtein::levenshtein_diff;
pub use myers::myers_diff;

/// Align `source` against `target` with the chosen algorithm.
///
/// When one side is empty the script is made of the other side's characters
/// only and the ratio is 0.0; when both are empty it is empty with ratio 1.0.
pub fn char_diff(source: &str, target: &str, algorithm: DiffAlgorithm) -> DiffResult {
    if source.is_empty() && target.is_empty() {
        return DiffResult::from_segments(Vec::new());
    }
    if target.is_empty() {
        return DiffResult::from_segments(source.chars().map(DiffSegment::removed).collect());
    }
    if source.is_empty() {
        return DiffResult::from_segments(target.chars().map(DiffSegment::added).collect());
    }

    let s1: Vec<char> = source.chars().collect();
    let s2: Vec<char> = target.chars().collect();
    let segments = match algorithm {
        DiffAlgorithm::Lcs => lcs_diff(&s1, &s2),
        DiffAlgorithm::Levenshtein => levenshtein_diff(&s1, &s2),
        DiffAlgorithm::Myers => myers_diff(&s1, &s2),
    };
    DiffResult::from_segments(segments)
}

#[cfg(test)]
mod tests {
    use namematch_model::DiffKind;

    use super::*;

    #[test]
    fn both_empty() {
        for algorithm in DiffAlgorithm::ALL {
            let result = char_diff("", "", algorithm);
            assert!(result.segments.is_empty());
            assert_eq!(result.ratio, 1.0);
        }
    }

    #[test]
    fn one_side_empty() {
        let result = char_diff("abc", "", DiffAlgorithm::Myers);
        assert_eq!(result.removed, 3);
        assert_eq!(result.ratio, 0.0);

        let result = char_diff("", "阿里", DiffAlgorithm::Lcs);
        assert_eq!(result.added, 2);
        assert!(result.segments.iter().all(|s| s.kind == DiffKind::Added));
    }

    #[test]
    fn identical_strings_are_unchanged() {
        for algorithm in DiffAlgorithm::ALL {
            let result = char_diff("阿里巴巴", "阿里巴巴", algorithm);
            assert_eq!(result.unchanged, 4);
            assert_eq!(result.edits(), 0);
            assert_eq!(result.ratio, 1.0);
        }
    }

    #[test]
    fn replays_both_sides() {
        let pairs = [
            ("阿里巴巴集团", "阿里巴巴集团控股有限公司"),
            ("kitten", "sitting"),
            ("abc", "xyz"),
            ("Alibaba Group", "Alibaba Grp Holding"),
        ];
        for algorithm in DiffAlgorithm::ALL {
            for (source, target) in pairs {
                let result = char_diff(source, target, algorithm);
                assert_eq!(result.source_text(), source, "{algorithm}: {source} -> {target}");
                assert_eq!(result.target_text(), target, "{algorithm}: {source} -> {target}");
            }
        }
    }

    #[test]
    fn minimal_algorithms_agree_on_edit_count() {
        // kitten -> sitting: 2 substitutions + 1 insertion.
        let edit = char_diff("kitten", "sitting", DiffAlgorithm::Levenshtein);
        assert_eq!(edit.unchanged, 4);
        assert_eq!(edit.edits(), 5);

        let myers = char_diff("kitten", "sitting", DiffAlgorithm::Myers);
        assert_eq!(myers.unchanged, 4);
        assert_eq!(myers.edits(), 5);
    }
}
