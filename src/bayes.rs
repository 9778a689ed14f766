use std::collections::BTreeMap;

use thiserror::Error;
use tracing::{debug, trace};

use crate::data::Post;
use crate::tokenize::unique_words;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("classifier has not been trained on any posts")]
    Untrained,

    #[error("label {0:?} does not appear in the training data")]
    UnknownLabel(String),
}

/// The best label for a post and its log-probability score.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub label: String,
    pub score: f64,
}

/// Bag-of-words Naive Bayes classifier over whitespace separated posts.
///
/// All counts are document frequencies: a word repeated within one post is
/// counted once for that post.
#[derive(Debug, Default, Clone)]
pub struct NaiveBayesClassifier {
    total_posts: usize,
    label_counts: BTreeMap<String, usize>,
    word_counts: BTreeMap<String, usize>,
    label_word_counts: BTreeMap<String, BTreeMap<String, usize>>,
    training_data: Vec<Post>,
}

impl NaiveBayesClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Trains a fresh classifier on every post yielded by `posts`.
    pub fn from_posts<I>(posts: I) -> Self
    where
        I: IntoIterator<Item = Post>,
    {
        let mut classifier = Self::new();
        for post in posts {
            classifier.train(post.label, post.content);
        }

        debug!(
            posts = classifier.total_posts,
            labels = classifier.label_counts.len(),
            vocabulary = classifier.vocabulary_size(),
            "training complete"
        );

        classifier
    }

    /// Adds a single labeled post to the frequency tables.
    ///
    /// Any string is a valid label, including the empty string. Training on the
    /// same post twice counts it twice.
    pub fn train(&mut self, label: impl Into<String>, content: impl Into<String>) {
        let label = label.into();
        let content = content.into();

        self.total_posts += 1;
        *self.label_counts.entry(label.clone()).or_insert(0) += 1;

        let words = unique_words(&content);
        trace!(label = %label, words = words.len(), "training on post");

        if !words.is_empty() {
            let label_words = self.label_word_counts.entry(label.clone()).or_default();
            for word in words {
                *self.word_counts.entry(word.to_string()).or_insert(0) += 1;
                *label_words.entry(word.to_string()).or_insert(0) += 1;
            }
        }

        self.training_data.push(Post { label, content });
    }

    /// Computes ln P(word | label).
    ///
    /// Falls back to the corpus-wide document frequency when the word was never
    /// seen with `label`, and to 1 / total posts when it was never seen at all.
    pub fn log_likelihood(&self, label: &str, word: &str) -> Result<f64, ModelError> {
        if self.total_posts == 0 {
            return Err(ModelError::Untrained);
        }

        let in_label = self
            .label_word_counts
            .get(label)
            .and_then(|words| words.get(word))
            .copied()
            .unwrap_or(0);

        let probability = if in_label > 0 {
            // A label with a word count has at least one post.
            in_label as f64 / self.label_counts[label] as f64
        } else {
            match self.word_count(word) {
                0 => 1.0 / self.total_posts as f64,
                global => global as f64 / self.total_posts as f64,
            }
        };

        Ok(probability.ln())
    }

    /// Computes ln P(label).
    pub fn log_prior(&self, label: &str) -> Result<f64, ModelError> {
        if self.total_posts == 0 {
            return Err(ModelError::Untrained);
        }

        let &count = self
            .label_counts
            .get(label)
            .ok_or_else(|| ModelError::UnknownLabel(label.to_string()))?;

        Ok((count as f64 / self.total_posts as f64).ln())
    }

    /// Predicts the most likely label for `content`.
    ///
    /// Equal scores go to the lexicographically smallest label.
    pub fn predict(&self, content: &str) -> Result<Prediction, ModelError> {
        let words = unique_words(content);

        let mut best: Option<(&str, f64)> = None;
        for label in self.label_counts.keys() {
            let score = words.iter().try_fold(self.log_prior(label)?, |acc, word| {
                self.log_likelihood(label, word).map(|ll| acc + ll)
            })?;

            best = match best {
                Some((best_label, best_score))
                    if best_score > score
                        || (best_score == score && best_label < label.as_str()) =>
                {
                    Some((best_label, best_score))
                }
                _ => Some((label.as_str(), score)),
            };
        }

        let (label, score) = best.ok_or(ModelError::Untrained)?;
        Ok(Prediction {
            label: label.to_string(),
            score,
        })
    }

    pub fn total_posts(&self) -> usize {
        self.total_posts
    }

    pub fn vocabulary_size(&self) -> usize {
        self.word_counts.len()
    }

    /// Number of training posts per label.
    pub fn label_counts(&self) -> &BTreeMap<String, usize> {
        &self.label_counts
    }

    /// Number of training posts per label containing each word.
    pub fn label_word_counts(&self) -> &BTreeMap<String, BTreeMap<String, usize>> {
        &self.label_word_counts
    }

    /// Number of training posts, of any label, containing `word`.
    pub fn word_count(&self, word: &str) -> usize {
        self.word_counts.get(word).copied().unwrap_or(0)
    }

    /// Posts in the order they were trained on.
    pub fn training_data(&self) -> &[Post] {
        &self.training_data
    }
}
