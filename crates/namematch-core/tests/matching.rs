use namematch_core::{BatchMatcher, Matcher, SynonymTable, drive, fuse};
use namematch_model::{
    DiffAlgorithm, MatchError, MatchLevel, MatchOptions, NormalizationOptions, SelectionState,
    SynonymPolicy,
};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

fn company_targets() -> Vec<String> {
    strings(&[
        "Alibaba Group Holding Limited",
        "阿里巴巴集团控股有限公司",
        "淘宝网",
    ])
}

#[test]
fn company_name_against_registry_entries() {
    let options = MatchOptions::default().with_threshold(0.5);
    let matcher = BatchMatcher::new(&options).unwrap();
    let result = matcher.match_source(0, "阿里巴巴集团", &company_targets());

    assert_eq!(result.candidates.len(), 1);
    let top = result.top().unwrap();
    assert_eq!(top.target_text, "阿里巴巴集团控股有限公司");
    assert_eq!(top.target_index, 1);
    assert!((top.score - 0.66).abs() < 1e-9);
    assert_eq!(top.percent(), 66);
    assert_eq!(top.level(), MatchLevel::Medium);
    assert!(!result.has_exact_top());
}

#[test]
fn zero_threshold_keeps_every_target() {
    let matcher = BatchMatcher::new(&MatchOptions::default()).unwrap();
    let result = matcher.match_source(0, "阿里巴巴集团", &company_targets());
    let order: Vec<usize> = result.candidates.iter().map(|c| c.target_index).collect();
    assert_eq!(order, vec![1, 0, 2]);
    assert_eq!(result.candidates[1].score, 0.0);
    assert_eq!(result.candidates[2].score, 0.0);
}

#[test]
fn synonym_groups_make_names_equivalent() {
    let options = MatchOptions::default().with_synonyms("腾讯控股有限公司,腾讯");
    assert_eq!(fuse("腾讯", "腾讯控股有限公司", &options), 1.0);

    let table = SynonymTable::parse("腾讯控股有限公司,腾讯", SynonymPolicy::FirstListed);
    assert_eq!(table.representative("腾讯"), Some("腾讯控股有限公司"));
    let table = SynonymTable::parse("腾讯控股有限公司,腾讯", SynonymPolicy::Shortest);
    assert_eq!(table.representative("腾讯控股有限公司"), Some("腾讯"));
}

#[test]
fn disabling_normalization_changes_scores() {
    let lenient = MatchOptions::default();
    assert_eq!(fuse("ＡＢＣ!", "abc", &lenient), 1.0);

    let strict = MatchOptions::default().with_normalization(NormalizationOptions {
        ignore_punctuation: false,
        fold_fullwidth: false,
        strip_invisible: true,
    });
    assert!(fuse("ＡＢＣ!", "abc", &strict) < 1.0);
}

#[test]
fn run_auto_locks_synonym_matches() {
    let options = MatchOptions::default()
        .with_threshold(0.5)
        .with_synonyms("腾讯控股有限公司,腾讯");
    let matcher = Matcher::new();
    let run = matcher
        .start(
            strings(&["阿里巴巴集团", "腾讯"]),
            strings(&["腾讯控股有限公司", "阿里巴巴集团控股有限公司"]),
            &options,
        )
        .unwrap();

    let mut progress = Vec::new();
    let outcome = drive(run, |p| progress.push(p.source_text.clone()));
    assert_eq!(progress, strings(&["阿里巴巴集团", "腾讯"]));
    assert!(outcome.is_complete());

    assert_eq!(outcome.selections.state(0), &SelectionState::Unselected);
    match outcome.selections.state(1) {
        SelectionState::Locked(candidate) => {
            assert_eq!(candidate.target_text, "腾讯控股有限公司");
            assert!(candidate.is_exact());
        }
        other => panic!("expected a lock, got {other:?}"),
    }

    let summary = outcome.selections.summary(&outcome.results);
    assert_eq!(summary.total, 2);
    assert_eq!(summary.locked, 1);
    assert_eq!(summary.unmatched, 0);
}

#[test]
fn manual_review_flow() {
    let matcher = Matcher::new();
    let run = matcher
        .start(
            strings(&["abc"]),
            strings(&["abd", "abx", "zzz"]),
            &MatchOptions::default().with_threshold(0.5),
        )
        .unwrap();
    let mut outcome = drive(run, |_| {});
    let result = outcome.results[0].clone();
    let book = &mut outcome.selections;

    let second = result.candidate(1).unwrap().clone();
    assert!(book.select_candidate(0, second.clone()));
    assert_eq!(book.effective_match(&result), Some(&second));

    assert!(book.toggle_lock(&result));
    assert!(book.is_locked(0));
    assert!(!book.select_candidate(0, result.top().unwrap().clone()));

    assert!(book.toggle_lock(&result));
    assert_eq!(book.state(0), &SelectionState::Unselected);
    assert_eq!(book.effective_match(&result), result.top());
}

#[test]
fn second_run_is_rejected_until_first_finishes() {
    let matcher = Matcher::new();
    let mut first = matcher
        .start(strings(&["a", "b"]), strings(&["a"]), &MatchOptions::default())
        .unwrap();
    assert!(first.next().is_some());
    assert_eq!(
        matcher
            .start(strings(&["c"]), strings(&["c"]), &MatchOptions::default())
            .unwrap_err(),
        MatchError::RunInProgress
    );
    assert!(first.next().is_some());
    assert!(first.next().is_none());
    assert!(
        matcher
            .start(strings(&["c"]), strings(&["c"]), &MatchOptions::default())
            .is_ok()
    );
}

#[test]
fn cancelled_run_keeps_completed_units() {
    let matcher = Matcher::new();
    let run = matcher
        .start(
            strings(&["a", "b", "c", "d"]),
            strings(&["a", "b", "c", "d"]),
            &MatchOptions::default(),
        )
        .unwrap();
    let token = run.cancel_token();
    let outcome = drive(run, |p| {
        if p.completed == 2 {
            token.cancel();
        }
    });
    assert!(outcome.cancelled);
    let processed: Vec<&str> = outcome.results.iter().map(|r| r.source_text.as_str()).collect();
    assert_eq!(processed, vec!["a", "b"]);
    assert!(outcome.selections.is_locked(0));
    assert!(outcome.selections.is_locked(1));
    assert!(!matcher.is_running());
}

#[test]
fn diff_of_matched_pair() {
    let diff = namematch_core::char_diff("阿里巴巴集团", "阿里巴巴集团控股有限公司", DiffAlgorithm::Myers);
    assert_eq!(diff.unchanged, 6);
    assert_eq!(diff.added, 6);
    assert_eq!(diff.removed, 0);
    assert!((diff.ratio - 0.5).abs() < 1e-12);
}
