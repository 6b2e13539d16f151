//! Normalized similarity ratio on a 0–100 scale.
//!
//! `ratio = round(100 * (|a| + |b| - indel(a, b)) / (|a| + |b|))`, where
//! `indel` is the insert/delete-only edit distance. Equivalently
//! `2 * lcs(a, b) / (|a| + |b|)`. Halves round to the even neighbour.
//! An empty input scores 0.

/// Similarity of `a` and `b` in `0..=100`. Case-sensitive.
pub fn ratio(a: &str, b: &str) -> u32 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let total = (a.len() + b.len()) as f64;
    let common = 2.0 * longest_common_subsequence(&a, &b) as f64;
    (100.0 * common / total).round_ties_even() as u32
}

fn longest_common_subsequence(a: &[char], b: &[char]) -> usize {
    // Rolling single row over `b`
    let mut row = vec![0usize; b.len() + 1];
    for &ca in a {
        let mut diagonal = 0;
        for (j, &cb) in b.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if ca == cb {
                diagonal + 1
            } else {
                above.max(row[j])
            };
            diagonal = above;
        }
    }
    row[b.len()]
}
