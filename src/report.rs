//! Plain text reports of a trained classifier and its test performance.

use anyhow::Result;
use std::io::Write;
use tracing::info;

use crate::bayes::NaiveBayesClassifier;
use crate::data::Post;

const SIGNIFICANT_DIGITS: usize = 3;

/// How many test posts were labeled correctly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Evaluation {
    pub correct: usize,
    pub total: usize,
}

impl Evaluation {
    /// Fraction of posts predicted correctly, or `None` when nothing was tested.
    pub fn accuracy(&self) -> Option<f64> {
        (self.total > 0).then(|| self.correct as f64 / self.total as f64)
    }
}

/// Formats `value` with three significant digits in the style of C's `%g`.
pub fn format_score(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let scientific = format!("{:.*e}", SIGNIFICANT_DIGITS - 1, value);
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= SIGNIFICANT_DIGITS as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_zeros(mantissa), sign, exponent.abs())
    } else {
        let decimals = (SIGNIFICANT_DIGITS as i32 - 1 - exponent) as usize;
        trim_zeros(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn trim_zeros(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}

/// Writes every training post followed by the corpus size.
pub fn write_training_data<W: Write>(
    out: &mut W,
    classifier: &NaiveBayesClassifier,
) -> Result<()> {
    writeln!(out, "training data:")?;
    for post in classifier.training_data() {
        writeln!(out, "  label = {}, content = {}", post.label, post.content)?;
    }
    writeln!(out, "trained on {} examples", classifier.total_posts())?;
    writeln!(out, "vocabulary size = {}", classifier.vocabulary_size())?;
    writeln!(out)?;
    Ok(())
}

/// Writes the log-prior of every label and the log-likelihood of every
/// word seen with each label.
pub fn write_classifier_parameters<W: Write>(
    out: &mut W,
    classifier: &NaiveBayesClassifier,
) -> Result<()> {
    writeln!(out, "classes:")?;
    for (label, count) in classifier.label_counts() {
        let log_prior = classifier.log_prior(label)?;
        writeln!(
            out,
            "  {}, {} examples, log-prior = {}",
            label,
            count,
            format_score(log_prior)
        )?;
    }

    writeln!(out, "classifier parameters:")?;
    for (label, words) in classifier.label_word_counts() {
        for (word, count) in words {
            let log_likelihood = classifier.log_likelihood(label, word)?;
            writeln!(
                out,
                "  {}:{}, count = {}, log-likelihood = {}",
                label,
                word,
                count,
                format_score(log_likelihood)
            )?;
        }
    }
    Ok(())
}

/// Predicts a label for every test post, writing each prediction and the
/// overall performance.
pub fn write_test_results<'a, W, I>(
    out: &mut W,
    classifier: &NaiveBayesClassifier,
    posts: I,
) -> Result<Evaluation>
where
    W: Write,
    I: IntoIterator<Item = &'a Post>,
{
    writeln!(out, "trained on {} examples", classifier.total_posts())?;
    writeln!(out)?;
    writeln!(out, "test data:")?;

    let mut evaluation = Evaluation::default();
    for post in posts {
        let prediction = classifier.predict(&post.content)?;

        evaluation.total += 1;
        if prediction.label == post.label {
            evaluation.correct += 1;
        }

        writeln!(
            out,
            "  correct = {}, predicted = {}, log-probability score = {}",
            post.label,
            prediction.label,
            format_score(prediction.score)
        )?;
        writeln!(out, "  content = {}", post.content)?;
        writeln!(out)?;
    }

    writeln!(
        out,
        "performance: {} / {} posts predicted correctly",
        evaluation.correct, evaluation.total
    )?;
    writeln!(out)?;

    info!(
        correct = evaluation.correct,
        total = evaluation.total,
        accuracy = evaluation.accuracy().unwrap_or(0.0),
        "evaluated test posts"
    );
    Ok(evaluation)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> NaiveBayesClassifier {
        NaiveBayesClassifier::from_posts(vec![
            Post::new("exam", "study hard"),
            Post::new("euchre", "play cards"),
            Post::new("euchre", "cards"),
        ])
    }

    fn render<F>(write: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> Result<()>,
    {
        let mut out = Vec::new();
        write(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn formats_three_significant_digits() {
        assert_eq!(format_score(0.0), "0");
        assert_eq!(format_score(-1.0986), "-1.1");
        assert_eq!(format_score(-0.6931), "-0.693");
        assert_eq!(format_score(-13.8155), "-13.8");
        assert_eq!(format_score(-123.4), "-123");
        assert_eq!(format_score(-1234.5), "-1.23e+03");
        assert_eq!(format_score(0.00001234), "1.23e-05");
        assert_eq!(format_score(-2.0), "-2");
    }

    #[test]
    fn accuracy_of_empty_evaluation_is_none() {
        assert_eq!(Evaluation::default().accuracy(), None);
        let evaluation = Evaluation {
            correct: 1,
            total: 4,
        };
        assert_eq!(evaluation.accuracy(), Some(0.25));
    }

    #[test]
    fn training_data_report() {
        let report = render(|out| write_training_data(out, &classifier()));

        assert_eq!(
            report,
            "training data:\n\
             \x20 label = exam, content = study hard\n\
             \x20 label = euchre, content = play cards\n\
             \x20 label = euchre, content = cards\n\
             trained on 3 examples\n\
             vocabulary size = 4\n\n"
        );
    }

    #[test]
    fn classifier_parameters_report() {
        let report = render(|out| write_classifier_parameters(out, &classifier()));

        assert_eq!(
            report,
            "classes:\n\
             \x20 euchre, 2 examples, log-prior = -0.405\n\
             \x20 exam, 1 examples, log-prior = -1.1\n\
             classifier parameters:\n\
             \x20 euchre:cards, count = 2, log-likelihood = 0\n\
             \x20 euchre:play, count = 1, log-likelihood = -0.693\n\
             \x20 exam:hard, count = 1, log-likelihood = 0\n\
             \x20 exam:study, count = 1, log-likelihood = 0\n"
        );
    }

    #[test]
    fn test_results_report() {
        let posts = vec![
            Post::new("euchre", "cards trump"),
            Post::new("euchre", "study"),
        ];
        let mut out = Vec::new();

        let evaluation = write_test_results(&mut out, &classifier(), &posts).unwrap();
        let report = String::from_utf8(out).unwrap();

        assert_eq!(evaluation, Evaluation { correct: 1, total: 2 });
        assert!(report.starts_with("trained on 3 examples\n\ntest data:\n"));
        assert!(report.contains(
            "  correct = euchre, predicted = euchre, log-probability score = -1.5\n"
        ));
        assert!(report.contains(
            "  correct = euchre, predicted = exam, log-probability score = -1.1\n"
        ));
        assert!(report.contains("  content = cards trump\n\n"));
        assert!(report.ends_with("performance: 1 / 2 posts predicted correctly\n\n"));
    }
}
