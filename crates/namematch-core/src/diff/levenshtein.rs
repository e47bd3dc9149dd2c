use namematch_model::DiffSegment;

/// Levenshtein-table alignment.
///
/// Backtracking prefers a substitution (emitted as a removal followed by an
/// addition) when the diagonal cost matches, then a deletion, then an
/// insertion.
pub fn levenshtein_diff(s1: &[char], s2: &[char]) -> Vec<DiffSegment> {
    let m = s1.len();
    let n = s2.len();
    let mut dp = vec![vec![0usize; n + 1]; m + 1];
    for (i, row) in dp.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=n {
        dp[0][j] = j;
    }
    for i in 1..=m {
        for j in 1..=n {
            dp[i][j] = if s1[i - 1] == s2[j - 1] {
                dp[i - 1][j - 1]
            } else {
                (dp[i - 1][j] + 1)
                    .min(dp[i][j - 1] + 1)
                    .min(dp[i - 1][j - 1] + 1)
            };
        }
    }

    // Built back to front; a substitution is pushed as added-then-removed so
    // that it reads removed-then-added once reversed.
    let mut segments = Vec::with_capacity(m + n);
    let (mut i, mut j) = (m, n);
    while i > 0 || j > 0 {
        if i > 0 && j > 0 && s1[i - 1] == s2[j - 1] {
            segments.push(DiffSegment::unchanged(s1[i - 1]));
            i -= 1;
            j -= 1;
        } else if i > 0 && j > 0 && dp[i][j] == dp[i - 1][j - 1] + 1 {
            segments.push(DiffSegment::added(s2[j - 1]));
            segments.push(DiffSegment::removed(s1[i - 1]));
            i -= 1;
            j -= 1;
        } else if i > 0 && dp[i][j] == dp[i - 1][j] + 1 {
            segments.push(DiffSegment::removed(s1[i - 1]));
            i -= 1;
        } else {
            segments.push(DiffSegment::added(s2[j - 1]));
            j -= 1;
        }
    }
    segments.reverse();
    segments
}
