//! Best nominal split across several attributes.

use crate::config::SplitSearchConfig;
use crate::core::error::Result;
use crate::core::traits::{SplitQualityMeasure, Validatable};
use crate::split::histogram::NominalValueHistogram;
use crate::split::nominal::{NominalBinarySplitSearch, NominalSplit};
use crate::split::quality::QualityMeasure;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// The winning split and the attribute it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeSplit {
    /// Position of the attribute in the slice passed to the finder
    pub attribute: usize,
    /// Best split of that attribute
    pub split: NominalSplit,
}

/// Runs the nominal split search over many attributes on a dedicated thread pool.
#[derive(Debug)]
pub struct NominalSplitFinder {
    config: SplitSearchConfig,
    search: NominalBinarySplitSearch,
    thread_pool: rayon::ThreadPool,
}

impl NominalSplitFinder {
    /// Creates a finder. The configuration is validated first.
    pub fn new(config: SplitSearchConfig) -> Result<Self> {
        config.validate()?;
        let search = NominalBinarySplitSearch::from_config(&config)?;
        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.effective_num_threads())
            .build()
            .map_err(|e| crate::config_error!("Failed to create thread pool: {}", e))?;

        Ok(NominalSplitFinder {
            config,
            search,
            thread_pool,
        })
    }

    /// The validated configuration.
    pub fn config(&self) -> &SplitSearchConfig {
        &self.config
    }

    /// Number of worker threads.
    pub fn num_threads(&self) -> usize {
        self.thread_pool.current_num_threads()
    }

    /// Best valid split over all attributes, or `None` if no attribute can be split.
    ///
    /// Each attribute is searched with its own clone of `measure`. Attributes
    /// are compared with the measure's ordering; on a tie the attribute that
    /// comes first wins.
    pub fn find_best_split<M>(
        &self,
        histograms: &[NominalValueHistogram],
        measure: &M,
    ) -> Result<Option<AttributeSplit>>
    where
        M: SplitQualityMeasure + Clone,
    {
        let splits = self.find_splits(histograms, measure)?;

        let best = splits
            .into_iter()
            .enumerate()
            .filter(|(_, split)| split.is_valid())
            .fold(None, |best: Option<AttributeSplit>, (attribute, split)| match best {
                Some(current) if !measure.is_better(split.quality(), current.split.quality()) => {
                    Some(current)
                }
                _ => Some(AttributeSplit { attribute, split }),
            });

        match &best {
            Some(best) => log::debug!(
                "Best split on attribute {} of {} (quality {})",
                best.attribute,
                histograms.len(),
                best.split.quality()
            ),
            None => log::debug!("None of {} attributes can be split", histograms.len()),
        }
        Ok(best)
    }

    /// Like [`find_best_split`](Self::find_best_split) with the configured built-in measure.
    pub fn find_best_split_builtin(
        &self,
        histograms: &[NominalValueHistogram],
    ) -> Result<Option<AttributeSplit>> {
        let measure = QualityMeasure::from_type(self.config.quality_measure);
        self.find_best_split(histograms, &measure)
    }

    /// Best split of every attribute, in attribute order.
    pub fn find_splits<M>(
        &self,
        histograms: &[NominalValueHistogram],
        measure: &M,
    ) -> Result<Vec<NominalSplit>>
    where
        M: SplitQualityMeasure + Clone,
    {
        self.thread_pool.install(|| {
            histograms
                .par_iter()
                .map(|histogram| {
                    let mut measure = measure.clone();
                    self.search.search(histogram, &mut measure)
                })
                .collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigBuilder;
    use crate::core::error::SplitError;
    use crate::core::types::QualityMeasureType;
    use crate::split::quality::GiniIndex;

    fn finder(measure: QualityMeasureType) -> NominalSplitFinder {
        let config = ConfigBuilder::new()
            .min_partition_size(1.0)
            .quality_measure(measure)
            .num_threads(2)
            .build()
            .unwrap();
        NominalSplitFinder::new(config).unwrap()
    }

    fn histogram(rows: &[Vec<f64>]) -> NominalValueHistogram {
        NominalValueHistogram::from_rows(rows, 0.0).unwrap()
    }

    #[test]
    fn test_picks_most_separating_attribute() {
        let histograms = vec![
            histogram(&[vec![5.0, 5.0], vec![5.0, 5.0]]),
            histogram(&[vec![10.0, 0.0], vec![0.0, 10.0]]),
            histogram(&[vec![8.0, 2.0], vec![2.0, 8.0]]),
        ];

        for measure in [QualityMeasureType::Gini, QualityMeasureType::GainRatio] {
            let finder = finder(measure);
            assert_eq!(finder.num_threads(), 2);
            let best = finder.find_best_split_builtin(&histograms).unwrap().unwrap();
            assert_eq!(best.attribute, 1);
            assert_eq!(best.split.left_values(), &[0]);
        }
    }

    #[test]
    fn test_earliest_attribute_wins_ties() {
        let same = histogram(&[vec![10.0, 0.0], vec![0.0, 10.0]]);
        let histograms = vec![histogram(&[vec![4.0, 4.0]]), same.clone(), same];
        let best = finder(QualityMeasureType::Gini)
            .find_best_split(&histograms, &GiniIndex)
            .unwrap()
            .unwrap();
        assert_eq!(best.attribute, 1);
    }

    #[test]
    fn test_no_splittable_attribute() {
        let histograms = vec![histogram(&[vec![4.0, 4.0]]), histogram(&[vec![1.0, 0.0]])];
        let finder = finder(QualityMeasureType::Gini);
        assert!(finder.find_best_split_builtin(&histograms).unwrap().is_none());
        assert!(finder.find_best_split_builtin(&[]).unwrap().is_none());

        let splits = finder.find_splits(&histograms, &GiniIndex).unwrap();
        assert_eq!(splits.len(), 2);
        assert!(splits.iter().all(|split| !split.is_valid()));
    }

    #[test]
    fn test_oversized_attribute_propagates_error() {
        let histograms = vec![histogram(&vec![vec![1.0, 1.0]; 70])];
        let result = finder(QualityMeasureType::Gini).find_best_split_builtin(&histograms);
        assert!(matches!(result, Err(SplitError::SizeLimit { .. })));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SplitSearchConfig {
            min_partition_size: -1.0,
            ..SplitSearchConfig::default()
        };
        assert!(NominalSplitFinder::new(config).is_err());
    }
}
