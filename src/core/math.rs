//! Impurity functions over class-count distributions.

/// Shannon entropy (base 2) of a count distribution.
///
/// `total` must equal the sum of `counts`; zero counts contribute nothing
/// and an empty distribution has entropy 0.
pub fn shannon_entropy<I>(counts: I, total: f64) -> f64
where
    I: IntoIterator<Item = f64>,
{
    if total <= 0.0 {
        return 0.0;
    }
    counts
        .into_iter()
        .filter(|&c| c > 0.0)
        .fold(0.0, |acc, c| {
            let p = c / total;
            acc - p * p.log2()
        })
}

/// Gini impurity `1 - Σ p²` of a count distribution.
pub fn gini_impurity<I>(counts: I, total: f64) -> f64
where
    I: IntoIterator<Item = f64>,
{
    if total <= 0.0 {
        return 0.0;
    }
    let sum_sq = counts.into_iter().fold(0.0, |acc, c| {
        let p = c / total;
        acc + p * p
    });
    1.0 - sum_sq
}
