//! Property tests for the metrics, the fused score and the diff algorithms.

use namematch_core::{
    char_diff, edit_distance, edit_similarity, fuse, lcs_length, phonetic_similarity,
};
use namematch_model::{DiffAlgorithm, MatchOptions};
use proptest::prelude::*;

fn arb_name() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-dA-D .,]{0,16}").unwrap()
}

fn arb_cjk_name() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop::sample::select(vec!['阿', '里', '巴', '集', '团', '腾', '讯', '公', '司']),
        0..12,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

fn arb_unicode() -> impl Strategy<Value = String> {
    prop::collection::vec(any::<char>(), 0..12).prop_map(|chars| chars.into_iter().collect())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn fuse_of_identical_strings_is_one(s in arb_unicode()) {
        prop_assert_eq!(fuse(&s, &s, &MatchOptions::default()), 1.0);
    }

    #[test]
    fn fuse_stays_in_unit_interval(a in arb_name(), b in arb_name()) {
        let score = fuse(&a, &b, &MatchOptions::default());
        prop_assert!((0.0..=1.0 + 1e-12).contains(&score), "score {score}");
    }

    #[test]
    fn edit_similarity_against_empty_is_zero(s in "[a-z]{1,12}") {
        prop_assert_eq!(edit_similarity(&s, ""), 0.0);
        prop_assert_eq!(edit_similarity("", &s), 0.0);
    }

    #[test]
    fn edit_distance_is_symmetric(a in arb_unicode(), b in arb_unicode()) {
        prop_assert_eq!(edit_distance(&a, &b), edit_distance(&b, &a));
    }

    #[test]
    fn jaro_winkler_is_bounded_and_symmetric(a in arb_name(), b in arb_name()) {
        let ab = phonetic_similarity(&a, &b);
        let ba = phonetic_similarity(&b, &a);
        prop_assert!((0.0..=1.0).contains(&ab), "score {ab}");
        prop_assert!((ab - ba).abs() < 1e-12, "{ab} != {ba}");
    }

    #[test]
    fn jaro_winkler_symmetric_on_cjk(a in arb_cjk_name(), b in arb_cjk_name()) {
        let ab = phonetic_similarity(&a, &b);
        let ba = phonetic_similarity(&b, &a);
        prop_assert!((ab - ba).abs() < 1e-12, "{ab} != {ba}");
    }

    #[test]
    fn every_diff_replays_both_inputs(a in arb_unicode(), b in arb_unicode()) {
        for algorithm in DiffAlgorithm::ALL {
            let result = char_diff(&a, &b, algorithm);
            prop_assert_eq!(&result.source_text(), &a, "{} source", algorithm);
            prop_assert_eq!(&result.target_text(), &b, "{} target", algorithm);
            prop_assert_eq!(
                result.added + result.removed + result.unchanged,
                result.segments.len()
            );
            prop_assert!((0.0..=1.0).contains(&result.ratio));
        }
    }

    #[test]
    fn lcs_and_myers_keep_a_longest_common_subsequence(a in arb_cjk_name(), b in arb_cjk_name()) {
        let expected = lcs_length(&a, &b);
        if !a.is_empty() && !b.is_empty() {
            prop_assert_eq!(char_diff(&a, &b, DiffAlgorithm::Lcs).unchanged, expected);
            prop_assert_eq!(char_diff(&a, &b, DiffAlgorithm::Myers).unchanged, expected);
        }
    }
}
