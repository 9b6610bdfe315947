//! Dataset model

use serde::{Deserialize, Serialize};

use crate::impact::log_scale_score;

/// Catalog record for one dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Human readable size label, e.g. "25 GB"
    pub size: String,
    pub downloads: u64,
    pub last_updated: String,
    pub author: String,
    pub tags: Vec<String>,
}

/// Aggregate usage statistics fed to the impact estimator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetStats {
    pub download_count: u64,
    pub size_label: String,
}

/// Dataset as returned by the API
#[derive(Debug, Clone, Serialize)]
pub struct DatasetView {
    #[serde(flatten)]
    pub dataset: Dataset,
    pub size_bytes: Option<u64>,
    pub impact_score: f64,
    pub is_followed: bool,
}

impl Dataset {
    pub fn stats(&self) -> DatasetStats {
        DatasetStats {
            download_count: self.downloads,
            size_label: self.size.clone(),
        }
    }

    pub fn size_bytes(&self) -> Option<u64> {
        parse_size_label(&self.size)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }

    /// Case-insensitive match over id, name, description, author and tags
    pub fn matches_search(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        if needle.is_empty() {
            return true;
        }

        [&self.id, &self.name, &self.description, &self.author]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
            || self.tags.iter().any(|t| t.to_lowercase().contains(&needle))
    }

    pub fn to_view(&self, is_followed: bool) -> DatasetView {
        let size_bytes = self.size_bytes();
        DatasetView {
            dataset: self.clone(),
            size_bytes,
            impact_score: log_scale_score(size_bytes, None),
            is_followed,
        }
    }
}

/// Size units, 1024 based
const UNITS: [&str; 6] = ["Bytes", "KB", "MB", "GB", "TB", "PB"];

/// Unit of a size label, uppercased ("25 GB" -> "GB")
pub fn size_unit(label: &str) -> Option<String> {
    let unit: String = label
        .trim()
        .trim_start_matches(|c: char| c.is_ascii_digit() || c == '.' || c == ',')
        .trim()
        .to_ascii_uppercase();

    if unit.is_empty() {
        None
    } else {
        Some(unit)
    }
}

/// Parse labels like "80 MB", "5.2 TB" or "614 KB" into bytes
pub fn parse_size_label(label: &str) -> Option<u64> {
    let label = label.trim();
    let split = label
        .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == ','))
        .unwrap_or(label.len());
    let (number, _) = label.split_at(split);
    let value: f64 = number.replace(',', "").parse().ok()?;

    let exponent = match size_unit(label).as_deref() {
        None | Some("B") | Some("BYTE") | Some("BYTES") => 0,
        Some("KB") => 1,
        Some("MB") => 2,
        Some("GB") => 3,
        Some("TB") => 4,
        Some("PB") => 5,
        Some(_) => return None,
    };

    Some((value * 1024f64.powi(exponent)).round() as u64)
}

/// Format a byte count the way size labels are written ("25 GB")
pub fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut exponent = ((bytes as f64).ln() / 1024f64.ln()).floor() as usize;
    exponent = exponent.min(UNITS.len() - 1);
    let mut rounded = round2(bytes as f64 / 1024f64.powi(exponent as i32));

    // 1023.999 KB rounds to 1024, which reads as the next unit
    if rounded >= 1024.0 && exponent < UNITS.len() - 1 {
        exponent += 1;
        rounded = round2(bytes as f64 / 1024f64.powi(exponent as i32));
    }

    format!("{} {}", rounded, UNITS[exponent])
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        Dataset {
            id: "4".to_string(),
            name: "COCO".to_string(),
            description: "Object detection and captioning".to_string(),
            size: "25 GB".to_string(),
            downloads: 980_000,
            last_updated: "2023-09-12".to_string(),
            author: "Microsoft".to_string(),
            tags: vec!["image".to_string(), "object-detection".to_string()],
        }
    }

    #[test]
    fn test_parse_size_label() {
        assert_eq!(parse_size_label("80 MB"), Some(80 * 1024 * 1024));
        assert_eq!(parse_size_label("614 KB"), Some(614 * 1024));
        assert_eq!(parse_size_label("1 GB"), Some(1 << 30));
        assert_eq!(parse_size_label("512"), Some(512));
        assert_eq!(parse_size_label("Unknown"), None);
        assert_eq!(parse_size_label("12 parsecs"), None);
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 Bytes");
        assert_eq!(format_bytes(25 * (1 << 30)), "25 GB");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(1023), "1023 Bytes");
        assert_eq!(format_bytes(1_048_575), "1 MB");
        assert_eq!(format_bytes(1_073_741_823), "1 GB");
        assert_eq!(format_bytes(1_073_741_824), "1 GB");
    }

    #[test]
    fn test_size_unit() {
        assert_eq!(size_unit("5.2 TB").as_deref(), Some("TB"));
        assert_eq!(size_unit("80 mb").as_deref(), Some("MB"));
        assert_eq!(size_unit("42"), None);
    }

    #[test]
    fn test_matches_search() {
        let ds = sample();
        assert!(ds.matches_search("coco"));
        assert!(ds.matches_search("MICRO"));
        assert!(ds.matches_search("detection"));
        assert!(ds.matches_search(""));
        assert!(!ds.matches_search("speech"));
    }

    #[test]
    fn test_view_derives_size_and_score() {
        let view = sample().to_view(true);
        assert_eq!(view.size_bytes, Some(25 * (1 << 30)));
        assert!(view.impact_score > 40.0);
        assert!(view.is_followed);
    }
}
