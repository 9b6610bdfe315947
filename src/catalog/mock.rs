//! Built-in catalog records

use async_trait::async_trait;

use super::{CatalogQuery, DatasetCatalog};
use crate::models::Dataset;
use crate::AppResult;

pub struct MockCatalog {
    datasets: Vec<Dataset>,
}

impl Default for MockCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl MockCatalog {
    pub fn new() -> Self {
        Self::with_datasets(seed())
    }

    pub fn with_datasets(datasets: Vec<Dataset>) -> Self {
        Self { datasets }
    }
}

#[async_trait]
impl DatasetCatalog for MockCatalog {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn list(&self, query: &CatalogQuery) -> AppResult<Vec<Dataset>> {
        let mut datasets = self.datasets.clone();
        query.apply(&mut datasets);
        Ok(datasets)
    }

    async fn get(&self, id: &str) -> AppResult<Option<Dataset>> {
        Ok(self.datasets.iter().find(|d| d.id == id).cloned())
    }
}

fn record(
    id: &str,
    name: &str,
    description: &str,
    size: &str,
    downloads: u64,
    last_updated: &str,
    author: &str,
    tags: &[&str],
) -> Dataset {
    Dataset {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        size: size.to_string(),
        downloads,
        last_updated: last_updated.to_string(),
        author: author.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}

fn seed() -> Vec<Dataset> {
    vec![
        record(
            "1",
            "IMDB Reviews",
            "A large dataset of movie reviews for sentiment analysis tasks. Contains 50,000 highly polarized reviews for binary classification.",
            "80 MB",
            1_250_000,
            "2023-12-15",
            "Stanford NLP",
            &["text", "sentiment-analysis", "classification", "english", "nlp"],
        ),
        record(
            "2",
            "MNIST",
            "The MNIST database of handwritten digits has a training set of 60,000 examples, and a test set of 10,000 examples.",
            "11 MB",
            3_500_000,
            "2023-10-05",
            "Yann LeCun",
            &["image", "classification", "computer-vision", "vision"],
        ),
        record(
            "3",
            "CoLA",
            "The Corpus of Linguistic Acceptability consists of English acceptability judgments drawn from books and journal articles on linguistic theory.",
            "614 KB",
            450_000,
            "2023-11-20",
            "NYU",
            &["text", "linguistics", "english", "classification", "nlp"],
        ),
        record(
            "4",
            "COCO",
            "COCO is a large-scale object detection, segmentation, and captioning dataset with over 200,000 labeled images.",
            "25 GB",
            980_000,
            "2023-09-12",
            "Microsoft",
            &["image", "object-detection", "segmentation", "computer-vision", "vision"],
        ),
        record(
            "5",
            "SQuAD",
            "Stanford Question Answering Dataset is a reading comprehension dataset consisting of questions posed on a set of Wikipedia articles.",
            "35 MB",
            870_000,
            "2023-08-30",
            "Stanford NLP",
            &["text", "question-answering", "reading-comprehension", "english", "nlp"],
        ),
        record(
            "6",
            "WikiText-103",
            "A collection of over 100 million tokens extracted from verified Good and Featured articles on Wikipedia.",
            "183 MB",
            520_000,
            "2023-07-18",
            "Salesforce Research",
            &["text", "language-modeling", "english", "nlp"],
        ),
        record(
            "7",
            "GLUE Benchmark",
            "The General Language Understanding Evaluation benchmark is a collection of resources for training, evaluating, and analyzing natural language understanding systems.",
            "358 MB",
            690_000,
            "2023-11-05",
            "NYU & UW",
            &["text", "benchmark", "natural-language-understanding", "english", "nlp"],
        ),
        record(
            "8",
            "ImageNet",
            "An image database organized according to the WordNet hierarchy, with millions of images and thousands of categories.",
            "155 GB",
            2_100_000,
            "2023-10-22",
            "Stanford Vision Lab",
            &["image", "classification", "computer-vision", "large-scale", "vision"],
        ),
        record(
            "9",
            "MultiNLI",
            "A crowd-sourced collection of sentence pairs annotated with textual entailment information for natural language inference tasks.",
            "216 MB",
            430_000,
            "2023-09-08",
            "NYU",
            &["text", "natural-language-inference", "english", "nlp"],
        ),
        record(
            "10",
            "LibriSpeech",
            "LibriSpeech is a corpus of approximately 1000 hours of 16kHz read English speech derived from audiobooks from the LibriVox project.",
            "60 GB",
            780_000,
            "2023-08-15",
            "Vassil Panayotov",
            &["audio", "speech", "english", "asr"],
        ),
        record(
            "11",
            "CIFAR-10",
            "The CIFAR-10 dataset consists of 60000 32x32 colour images in 10 classes, with 6000 images per class.",
            "170 MB",
            1_850_000,
            "2023-07-30",
            "University of Toronto",
            &["image", "classification", "computer-vision", "vision"],
        ),
        record(
            "12",
            "VoxCeleb",
            "A large-scale speaker identification dataset collected from videos uploaded to YouTube.",
            "40 GB",
            320_000,
            "2023-10-18",
            "University of Oxford",
            &["audio", "speaker-identification", "speech"],
        ),
        record(
            "13",
            "Kinetics-700",
            "A large-scale dataset of video clips covering 700 human action classes with at least 600 video clips for each action.",
            "5.2 TB",
            180_000,
            "2023-11-12",
            "DeepMind",
            &["video", "action-recognition", "human-activity"],
        ),
        record(
            "14",
            "NYC Taxi Trips",
            "A comprehensive dataset of taxi trips in New York City, including pickup and dropoff locations, times, fares, and more.",
            "500 GB",
            420_000,
            "2023-09-25",
            "NYC Taxi & Limousine Commission",
            &["tabular", "geospatial", "time-series", "transportation"],
        ),
        record(
            "15",
            "ShapeNet",
            "A richly-annotated, large-scale dataset of 3D shapes with 55 categories and 51,300 unique 3D models.",
            "30 GB",
            290_000,
            "2023-08-05",
            "Stanford University",
            &["3d", "shape-analysis", "computer-vision"],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SortOrder;

    #[tokio::test]
    async fn test_get_by_id() {
        let catalog = MockCatalog::new();
        let coco = catalog.get("4").await.unwrap().unwrap();
        assert_eq!(coco.name, "COCO");
        assert_eq!(coco.size, "25 GB");
        assert!(catalog.get("99").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_defaults_to_catalog_order() {
        let catalog = MockCatalog::new();
        let all = catalog.list(&CatalogQuery::default()).await.unwrap();
        assert_eq!(all.len(), 15);
        assert_eq!(all[0].id, "1");
        assert_eq!(all[14].id, "15");
    }

    #[tokio::test]
    async fn test_search_and_tags() {
        let catalog = MockCatalog::new();

        let query = CatalogQuery {
            search: Some("stanford".to_string()),
            ..Default::default()
        };
        let ids: Vec<String> = catalog.list(&query).await.unwrap().into_iter().map(|d| d.id).collect();
        assert_eq!(ids, vec!["1", "5", "8", "15"]);

        let query = CatalogQuery {
            tags: vec!["audio".to_string(), "speech".to_string()],
            ..Default::default()
        };
        let ids: Vec<String> = catalog.list(&query).await.unwrap().into_iter().map(|d| d.id).collect();
        assert_eq!(ids, vec!["10", "12"]);
    }

    #[tokio::test]
    async fn test_sort_and_limit() {
        let catalog = MockCatalog::new();

        let query = CatalogQuery {
            sort: Some(SortOrder::Downloads),
            limit: Some(3),
            ..Default::default()
        };
        let names: Vec<String> = catalog.list(&query).await.unwrap().into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["MNIST", "ImageNet", "CIFAR-10"]);

        let query = CatalogQuery {
            sort: Some(SortOrder::Updated),
            limit: Some(1),
            ..Default::default()
        };
        let newest = catalog.list(&query).await.unwrap();
        assert_eq!(newest[0].name, "IMDB Reviews");

        let query = CatalogQuery {
            sort: Some(SortOrder::Name),
            limit: Some(2),
            ..Default::default()
        };
        let names: Vec<String> = catalog.list(&query).await.unwrap().into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["CIFAR-10", "COCO"]);
    }
}
