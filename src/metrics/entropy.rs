//! Entropy-based scoring of a clustering against a reference clustering.
//!
//! Each candidate cluster is scored by the Shannon entropy (base 2) of the
//! reference labels of its members. The aggregate entropy is the
//! size-weighted mean over all candidate clusters, and the quality is the
//! size-weighted mean of `1 - entropy / log2(number of reference labels)`.
//! Only clustered items contribute; reference items that no candidate
//! cluster contains are reported separately.

use crate::core::error::{Result, SplitError};
use crate::core::math::shannon_entropy;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::hash::Hash;

/// Score of one candidate cluster.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterEntropyRow<C> {
    /// Candidate cluster label
    pub cluster: C,
    /// Number of members
    pub size: usize,
    /// Entropy of the members' reference labels
    pub entropy: f64,
    /// Entropy divided by `log2` of the reference label count
    pub normalized_entropy: f64,
}

/// Per-cluster breakdown plus the aggregate scores.
///
/// Rows are sorted by normalized entropy, purest cluster first, with the
/// cluster label breaking ties.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterEntropyReport<C> {
    /// One row per candidate cluster
    pub rows: Vec<ClusterEntropyRow<C>>,
    /// Size-weighted mean entropy
    pub entropy: f64,
    /// Size-weighted mean of `1 - normalized_entropy`
    pub quality: f64,
    /// Number of candidate clusters
    pub num_clusters: usize,
    /// Distinct labels in the reference map
    pub num_reference_labels: usize,
    /// Items contained in some candidate cluster
    pub num_clustered_items: usize,
    /// Reference items not contained in any candidate cluster
    pub num_unclustered_items: usize,
}

/// Scores candidate clusterings against a fixed item → reference label map.
#[derive(Debug, Clone)]
pub struct ClusterEntropyScorer<'a, I, R> {
    reference: &'a HashMap<I, R>,
    num_reference_labels: usize,
}

impl<'a, I, R> ClusterEntropyScorer<'a, I, R>
where
    I: Eq + Hash + Debug,
    R: Eq + Hash,
{
    /// Creates a scorer over `reference`, which must cover every clustered item.
    pub fn new(reference: &'a HashMap<I, R>) -> Self {
        let num_reference_labels = reference.values().collect::<HashSet<_>>().len();
        ClusterEntropyScorer {
            reference,
            num_reference_labels,
        }
    }

    /// Number of distinct labels in the reference map.
    pub fn num_reference_labels(&self) -> usize {
        self.num_reference_labels
    }

    /// Entropy of the reference labels of a cluster's members.
    ///
    /// Fails if a member has no reference label. An empty cluster has entropy 0.
    pub fn entropy_of_cluster(&self, members: &HashSet<I>) -> Result<f64> {
        let mut label_counts: HashMap<&R, usize> = HashMap::new();
        for item in members {
            let label = self
                .reference
                .get(item)
                .ok_or_else(|| SplitError::missing_reference(format!("{:?}", item)))?;
            *label_counts.entry(label).or_insert(0) += 1;
        }
        Ok(shannon_entropy(
            label_counts.values().map(|&count| count as f64),
            members.len() as f64,
        ))
    }

    /// `entropy / log2(number of reference labels)`, 0 with a single label.
    pub fn normalized_entropy(&self, entropy: f64) -> f64 {
        if self.num_reference_labels <= 1 {
            debug_assert!(
                entropy == 0.0,
                "entropy {} with a single reference label",
                entropy
            );
            return 0.0;
        }
        entropy / (self.num_reference_labels as f64).log2()
    }

    /// Size-weighted mean entropy of the clusters; 0 for an empty clustering.
    pub fn aggregate_entropy<C>(&self, clustering: &HashMap<C, HashSet<I>>) -> Result<f64> {
        let (weighted, total) = self.weighted_sum(clustering, |entropy| entropy)?;
        Ok(if total == 0 { 0.0 } else { weighted / total as f64 })
    }

    /// Size-weighted mean of `1 - normalized entropy`; 1 for an empty clustering.
    pub fn aggregate_quality<C>(&self, clustering: &HashMap<C, HashSet<I>>) -> Result<f64> {
        let (weighted, total) =
            self.weighted_sum(clustering, |entropy| 1.0 - self.normalized_entropy(entropy))?;
        Ok(if total == 0 { 1.0 } else { weighted / total as f64 })
    }

    fn weighted_sum<C, F>(&self, clustering: &HashMap<C, HashSet<I>>, score: F) -> Result<(f64, usize)>
    where
        F: Fn(f64) -> f64,
    {
        clustering
            .values()
            .try_fold((0.0, 0usize), |(weighted, total), members| {
                let entropy = self.entropy_of_cluster(members)?;
                Ok((
                    weighted + members.len() as f64 * score(entropy),
                    total + members.len(),
                ))
            })
    }

    /// Full per-cluster breakdown with the aggregate scores.
    pub fn report<C>(&self, clustering: &HashMap<C, HashSet<I>>) -> Result<ClusterEntropyReport<C>>
    where
        C: Ord + Clone,
    {
        let mut rows = clustering
            .iter()
            .map(|(cluster, members)| {
                let entropy = self.entropy_of_cluster(members)?;
                Ok(ClusterEntropyRow {
                    cluster: cluster.clone(),
                    size: members.len(),
                    entropy,
                    normalized_entropy: self.normalized_entropy(entropy),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        rows.sort_by(|a, b| {
            a.normalized_entropy
                .total_cmp(&b.normalized_entropy)
                .then_with(|| a.cluster.cmp(&b.cluster))
        });

        let num_clustered_items: usize = rows.iter().map(|row| row.size).sum();
        let (entropy, quality) = if num_clustered_items == 0 {
            (0.0, 1.0)
        } else {
            let total = num_clustered_items as f64;
            rows.iter().fold((0.0, 0.0), |(entropy, quality), row| {
                let size = row.size as f64;
                (
                    entropy + size * row.entropy / total,
                    quality + size * (1.0 - row.normalized_entropy) / total,
                )
            })
        };

        let clustered: HashSet<&I> = clustering.values().flatten().collect();
        let num_unclustered_items = self
            .reference
            .keys()
            .filter(|item| !clustered.contains(item))
            .count();

        Ok(ClusterEntropyReport {
            num_clusters: rows.len(),
            rows,
            entropy,
            quality,
            num_reference_labels: self.num_reference_labels,
            num_clustered_items,
            num_unclustered_items,
        })
    }
}

/// Entropy of one cluster against `reference`.
pub fn entropy_of_cluster<I, R>(reference: &HashMap<I, R>, members: &HashSet<I>) -> Result<f64>
where
    I: Eq + Hash + Debug,
    R: Eq + Hash,
{
    ClusterEntropyScorer::new(reference).entropy_of_cluster(members)
}

/// Size-weighted mean cluster entropy against `reference`.
pub fn aggregate_entropy<I, R, C>(
    reference: &HashMap<I, R>,
    clustering: &HashMap<C, HashSet<I>>,
) -> Result<f64>
where
    I: Eq + Hash + Debug,
    R: Eq + Hash,
{
    ClusterEntropyScorer::new(reference).aggregate_entropy(clustering)
}

/// Clustering quality in `[0, 1]` against `reference`.
pub fn aggregate_quality<I, R, C>(
    reference: &HashMap<I, R>,
    clustering: &HashMap<C, HashSet<I>>,
) -> Result<f64>
where
    I: Eq + Hash + Debug,
    R: Eq + Hash,
{
    ClusterEntropyScorer::new(reference).aggregate_quality(clustering)
}
