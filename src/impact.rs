//! Impact estimation
//!
//! Turns a dataset's usage statistics into an [`ImpactAssessment`]: a level,
//! a 0-100 score, four display factors and a fixed set of recommendations.
//!
//! Classification by download count:
//!
//! | downloads              | level  | score    |
//! |------------------------|--------|----------|
//! | > 1,000,000            | high   | [70,100) |
//! | (500,000, 1,000,000]   | medium | [40,70)  |
//! | <= 500,000             | low    | [0,40)   |
//!
//! The score inside a bucket depends on the [`ScoringStrategy`].

use rand::Rng;
use sha2::{Digest, Sha256};

use crate::catalog::DatasetCatalog;
use crate::models::{DatasetStats, Factor, ImpactAssessment, ImpactLevel};
use crate::{AppError, AppResult};

const HIGH_DOWNLOADS: u64 = 1_000_000;
const MEDIUM_DOWNLOADS: u64 = 500_000;

/// Downloads per Usage Frequency point
const DOWNLOADS_PER_POINT: f64 = 50_000.0;

pub const FACTOR_DATA_SIZE: &str = "Data Size";
pub const FACTOR_USAGE_FREQUENCY: &str = "Usage Frequency";
pub const FACTOR_DATA_DIVERSITY: &str = "Data Diversity";
pub const FACTOR_DATA_QUALITY: &str = "Data Quality";

pub const RECOMMENDATIONS: [&str; 4] = [
    "Consider combining with complementary datasets for improved model robustness.",
    "Implement data augmentation techniques to address potential biases.",
    "Monitor model performance across different demographic groups.",
    "Regularly update the dataset to maintain relevance and accuracy.",
];

/// How the score and placeholder factors are produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoringStrategy {
    /// Pure function of the stats
    Deterministic,
    /// Uniform random within the bucket on every call
    Random,
}

impl ScoringStrategy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "deterministic" => Some(Self::Deterministic),
            "random" => Some(Self::Random),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ImpactEstimator {
    strategy: ScoringStrategy,
}

impl Default for ImpactEstimator {
    fn default() -> Self {
        Self::new(ScoringStrategy::Deterministic)
    }
}

impl ImpactEstimator {
    pub fn new(strategy: ScoringStrategy) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> ScoringStrategy {
        self.strategy
    }

    pub fn estimate(&self, stats: &DatasetStats) -> ImpactAssessment {
        let level = classify(stats.download_count);
        let score = match self.strategy {
            ScoringStrategy::Deterministic => interpolated_score(stats.download_count),
            ScoringStrategy::Random => random_score(level),
        };
        debug_assert_eq!(ImpactLevel::for_score(score), level);

        let factors = vec![
            Factor {
                name: FACTOR_DATA_SIZE.to_string(),
                value: data_size_value(&stats.size_label),
                description: "The size of the dataset affects processing requirements and potential bias.".to_string(),
            },
            Factor {
                name: FACTOR_USAGE_FREQUENCY.to_string(),
                value: usage_frequency(stats.download_count),
                description: "Widely used datasets have greater potential impact on AI systems.".to_string(),
            },
            Factor {
                name: FACTOR_DATA_DIVERSITY.to_string(),
                value: self.placeholder(stats, FACTOR_DATA_DIVERSITY),
                description: "Diverse datasets tend to produce more robust and fair models.".to_string(),
            },
            Factor {
                name: FACTOR_DATA_QUALITY.to_string(),
                value: self.placeholder(stats, FACTOR_DATA_QUALITY),
                description: "Higher quality data leads to better model performance.".to_string(),
            },
        ];

        ImpactAssessment {
            level,
            score,
            factors,
            recommendations: RECOMMENDATIONS.iter().map(|r| r.to_string()).collect(),
        }
    }

    /// Stand-in for content analysis, an integer in [0,100)
    fn placeholder(&self, stats: &DatasetStats, factor: &str) -> f64 {
        match self.strategy {
            ScoringStrategy::Deterministic => {
                let mut hasher = Sha256::new();
                hasher.update(stats.download_count.to_be_bytes());
                hasher.update(stats.size_label.as_bytes());
                hasher.update(factor.as_bytes());
                let digest = hasher.finalize();
                (u16::from_be_bytes([digest[0], digest[1]]) % 100) as f64
            }
            ScoringStrategy::Random => rand::thread_rng().gen_range(0..100u8) as f64,
        }
    }
}

/// Look up a dataset and assess it
pub async fn assess(
    catalog: &dyn DatasetCatalog,
    estimator: &ImpactEstimator,
    dataset_id: &str,
) -> AppResult<ImpactAssessment> {
    let dataset = catalog
        .get(dataset_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Dataset not found".to_string()))?;

    let assessment = estimator.estimate(&dataset.stats());
    tracing::debug!(
        "Assessed {}: {} ({})",
        dataset_id,
        assessment.level,
        assessment.score
    );

    Ok(assessment)
}

pub fn classify(download_count: u64) -> ImpactLevel {
    if download_count > HIGH_DOWNLOADS {
        ImpactLevel::High
    } else if download_count > MEDIUM_DOWNLOADS {
        ImpactLevel::Medium
    } else {
        ImpactLevel::Low
    }
}

/// Linear position of the download count inside its bucket
fn interpolated_score(download_count: u64) -> u8 {
    let d = download_count as f64;
    let (floor, span, fraction) = if download_count > HIGH_DOWNLOADS {
        // open-ended bucket, approaches 100 asymptotically
        (70.0, 30.0, 1.0 - HIGH_DOWNLOADS as f64 / d)
    } else if download_count > MEDIUM_DOWNLOADS {
        (40.0, 30.0, (d - (MEDIUM_DOWNLOADS + 1) as f64) / MEDIUM_DOWNLOADS as f64)
    } else {
        (0.0, 40.0, d / (MEDIUM_DOWNLOADS + 1) as f64)
    };

    let fraction: f64 = fraction.clamp(0.0, 1.0);
    let score = (floor + (span * fraction).floor()).min(floor + span - 1.0);
    score as u8
}

fn random_score(level: ImpactLevel) -> u8 {
    let mut rng = rand::thread_rng();
    match level {
        ImpactLevel::High => rng.gen_range(70..100),
        ImpactLevel::Medium => rng.gen_range(40..70),
        ImpactLevel::Low => rng.gen_range(0..40),
    }
}

const LARGE_UNITS: [&str; 3] = ["GB", "TB", "PB"];

/// 80 when the label mentions a gigabyte-or-larger unit anywhere, 30 otherwise
pub fn data_size_value(size_label: &str) -> f64 {
    let label = size_label.to_ascii_uppercase();
    let bytes = label.as_bytes();

    let large = LARGE_UNITS.iter().any(|unit| {
        label.match_indices(unit).any(|(start, _)| {
            let end = start + unit.len();
            // standalone unit token, not part of a word like "PBS"
            let before = start.checked_sub(1).map(|i| bytes[i]);
            let after = bytes.get(end).copied();
            !before.is_some_and(|b| b.is_ascii_alphabetic())
                && !after.is_some_and(|b| b.is_ascii_alphabetic())
        })
    });

    if large { 80.0 } else { 30.0 }
}

pub fn usage_frequency(download_count: u64) -> f64 {
    (download_count as f64 / DOWNLOADS_PER_POINT).min(100.0)
}

/// Log-scale size metric shown in dataset summaries.
///
/// `log10(MB + 1) * 10` when the size is known, otherwise
/// `log10(samples + 1) * 10`, otherwise 0. Rounded to two decimals.
pub fn log_scale_score(size_bytes: Option<u64>, num_samples: Option<u64>) -> f64 {
    let raw = match (size_bytes, num_samples) {
        (Some(bytes), _) if bytes > 0 => {
            let mb = bytes as f64 / (1024.0 * 1024.0);
            (mb + 1.0).log10() * 10.0
        }
        (_, Some(samples)) if samples > 0 => (samples as f64 + 1.0).log10() * 10.0,
        _ => 0.0,
    };

    (raw * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MockCatalog;

    fn stats(download_count: u64, size_label: &str) -> DatasetStats {
        DatasetStats {
            download_count,
            size_label: size_label.to_string(),
        }
    }

    const SAMPLE_DOWNLOADS: [u64; 14] = [
        0, 1, 49_999, 250_000, 500_000, 500_001, 750_000, 999_999, 1_000_000,
        1_000_001, 1_250_000, 2_500_000, 10_000_000, u64::MAX,
    ];

    #[test]
    fn test_buckets_hold_for_both_strategies() {
        for strategy in [ScoringStrategy::Deterministic, ScoringStrategy::Random] {
            let estimator = ImpactEstimator::new(strategy);
            for &downloads in &SAMPLE_DOWNLOADS {
                for _ in 0..20 {
                    let a = estimator.estimate(&stats(downloads, "80 MB"));
                    if downloads > 1_000_000 {
                        assert_eq!(a.level, ImpactLevel::High);
                        assert!((70..100).contains(&a.score), "{downloads}: {}", a.score);
                    } else if downloads > 500_000 {
                        assert_eq!(a.level, ImpactLevel::Medium);
                        assert!((40..70).contains(&a.score), "{downloads}: {}", a.score);
                    } else {
                        assert_eq!(a.level, ImpactLevel::Low);
                        assert!(a.score < 40, "{downloads}: {}", a.score);
                    }
                    assert_eq!(ImpactLevel::for_score(a.score), a.level);
                }
            }
        }
    }

    #[test]
    fn test_interpolation_is_monotonic_within_bucket() {
        assert_eq!(interpolated_score(0), 0);
        assert_eq!(interpolated_score(500_000), 39);
        assert_eq!(interpolated_score(500_001), 40);
        assert_eq!(interpolated_score(1_000_000), 69);
        assert_eq!(interpolated_score(1_000_001), 70);
        assert_eq!(interpolated_score(2_000_000), 85);
        assert_eq!(interpolated_score(u64::MAX), 99);
        assert!(interpolated_score(250_000) < interpolated_score(400_000));
    }

    #[test]
    fn test_factor_order_and_count() {
        let a = ImpactEstimator::default().estimate(&stats(870_000, "35 MB"));
        let names: Vec<&str> = a.factors.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Data Size", "Usage Frequency", "Data Diversity", "Data Quality"]
        );
        assert!(a.factors.iter().all(|f| (0.0..100.0).contains(&f.value)
            || (f.name == FACTOR_USAGE_FREQUENCY && f.value == 100.0)));
        assert_eq!(a.recommendations.len(), 4);
    }

    #[test]
    fn test_usage_frequency_is_exact() {
        assert_eq!(usage_frequency(2_500_000), 50.0);
        assert_eq!(usage_frequency(10_000_000), 100.0);
        assert_eq!(usage_frequency(870_000), 17.4);
        assert_eq!(usage_frequency(0), 0.0);

        let random = ImpactEstimator::new(ScoringStrategy::Random);
        let a = random.estimate(&stats(2_500_000, "1 GB"));
        assert_eq!(a.factors[1].value, 50.0);
    }

    #[test]
    fn test_data_size_value() {
        assert_eq!(data_size_value("25 GB"), 80.0);
        assert_eq!(data_size_value("5.2 TB"), 80.0);
        assert_eq!(data_size_value("80 MB"), 30.0);
        assert_eq!(data_size_value("614 KB"), 30.0);
        assert_eq!(data_size_value("Unknown"), 30.0);
        assert_eq!(data_size_value("~25 GB"), 80.0);
        assert_eq!(data_size_value("1.2GB+"), 80.0);
        assert_eq!(data_size_value("25 GB (compressed)"), 80.0);
        assert_eq!(data_size_value("1-10 GB"), 80.0);
        assert_eq!(data_size_value("3 tb"), 80.0);
        assert_eq!(data_size_value("PBS transcripts, 40 MB"), 30.0);
    }

    #[test]
    fn test_deterministic_strategy_is_pure() {
        let estimator = ImpactEstimator::default();
        let s = stats(1_850_000, "170 MB");
        assert_eq!(estimator.estimate(&s), estimator.estimate(&s));
    }

    #[test]
    fn test_log_scale_score() {
        assert_eq!(log_scale_score(None, None), 0.0);
        assert_eq!(log_scale_score(Some(9 * 1024 * 1024), None), 10.0);
        assert_eq!(log_scale_score(None, Some(99)), 20.0);
        assert_eq!(log_scale_score(Some(0), Some(9)), 10.0);
    }

    #[test]
    fn test_assess_unknown_dataset_is_not_found() {
        let catalog = MockCatalog::new();
        let estimator = ImpactEstimator::default();

        let err = tokio_test::block_on(assess(&catalog, &estimator, "missing")).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let found = tokio_test::block_on(assess(&catalog, &estimator, "2")).unwrap();
        assert_eq!(found.level, ImpactLevel::High);
    }
}
