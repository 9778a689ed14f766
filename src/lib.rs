//! Topic classification of short text posts with a bag-of-words Naive Bayes
//! model trained on labeled CSV data.

pub mod bayes;
pub mod data;
pub mod report;
pub mod tokenize;

pub use bayes::{ModelError, NaiveBayesClassifier, Prediction};
pub use data::{read_posts, read_posts_from_path, ColumnNames, Post};
pub use report::Evaluation;
