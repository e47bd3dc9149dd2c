use namematch_model::DiffSegment;
use tracing::warn;

use super::lcs::lcs_diff;

/// Myers greedy alignment.
///
/// The forward pass records the furthest-reaching `x` on every diagonal `k`
/// before each depth `d`; backtracking walks those snapshots from the end
/// state to recover the edit script.
pub fn myers_diff(s1: &[char], s2: &[char]) -> Vec<DiffSegment> {
    let m = s1.len() as isize;
    let n = s2.len() as isize;
    let max = m + n;
    let offset = max;
    let mut v = vec![0isize; (2 * max + 2) as usize];
    let mut trace: Vec<Vec<isize>> = Vec::new();

    for d in 0..=max {
        trace.push(v.clone());
        let mut k = -d;
        while k <= d {
            let mut x = if steps_down(&v, k, d, offset) {
                v[slot(k + 1, offset)]
            } else {
                v[slot(k - 1, offset)] + 1
            };
            let mut y = x - k;
            while x < m && y < n && s1[x as usize] == s2[y as usize] {
                x += 1;
                y += 1;
            }
            v[slot(k, offset)] = x;
            if x >= m && y >= n {
                return backtrack(s1, s2, &trace, d, offset);
            }
            k += 2;
        }
    }

    warn!(
        source_len = s1.len(),
        target_len = s2.len(),
        "myers forward pass did not terminate, falling back to lcs"
    );
    lcs_diff(s1, s2)
}

/// True when diagonal `k` at depth `d` is reached by a downward move
/// (insertion) from diagonal `k + 1` rather than a rightward move (deletion)
/// from diagonal `k - 1`.
fn steps_down(v: &[isize], k: isize, d: isize, offset: isize) -> bool {
    k == -d || (k != d && v[slot(k - 1, offset)] < v[slot(k + 1, offset)])
}

fn slot(k: isize, offset: isize) -> usize {
    (k + offset) as usize
}

fn backtrack(
    s1: &[char],
    s2: &[char],
    trace: &[Vec<isize>],
    depth: isize,
    offset: isize,
) -> Vec<DiffSegment> {
    let mut segments = Vec::with_capacity(s1.len() + s2.len());
    let mut x = s1.len() as isize;
    let mut y = s2.len() as isize;

    for d in (0..=depth).rev() {
        let v = &trace[d as usize];
        let k = x - y;
        let prev_k = if steps_down(v, k, d, offset) { k + 1 } else { k - 1 };
        let prev_x = v[slot(prev_k, offset)];
        let prev_y = prev_x - prev_k;

        while x > prev_x && y > prev_y {
            segments.push(DiffSegment::unchanged(s1[(x - 1) as usize]));
            x -= 1;
            y -= 1;
        }

        if d > 0 {
            if x == prev_x {
                segments.push(DiffSegment::added(s2[(y - 1) as usize]));
                y -= 1;
            } else {
                segments.push(DiffSegment::removed(s1[(x - 1) as usize]));
                x -= 1;
            }
        }
    }

    segments.reverse();
    segments
}
