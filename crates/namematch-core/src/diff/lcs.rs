use namematch_model::DiffSegment;

/// Longest-common-subsequence alignment.
///
/// Backtracks from the bottom-right corner of the table, taking a matching
/// tail character as unchanged and otherwise preferring a removal whenever the
/// cell above is at least the cell to the left.
pub fn lcs_diff(s1: &[char], s2: &[char]) -> Vec<DiffSegment> {
    let m = s1.len();
    let n = s2.len();
    let mut dp = vec![vec![0usize; n + 1]; m + 1];
    for i in 1..=m {
        for j in 1..=n {
            dp[i][j] = if s1[i - 1] == s2[j - 1] {
                dp[i - 1][j - 1] + 1
            } else {
                dp[i - 1][j].max(dp[i][j - 1])
            };
        }
    }

    let mut segments = Vec::with_capacity(m + n);
    let (mut i, mut j) = (m, n);
    while i > 0 || j > 0 {
        if i > 0 && j > 0 && s1[i - 1] == s2[j - 1] {
            segments.push(DiffSegment::unchanged(s1[i - 1]));
            i -= 1;
            j -= 1;
        } else if i > 0 && (j == 0 || dp[i - 1][j] >= dp[i][j - 1]) {
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
