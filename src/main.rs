use anyhow::Result;
use clap::Parser;
use std::{io, path::PathBuf};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use post_classifier::{data, report, ColumnNames, NaiveBayesClassifier};

#[derive(Parser)]
#[command(name = "classifier")]
#[command(about = "Classify posts with a Naive Bayes model trained on labeled CSV data")]
struct Args {
    /// CSV file of labeled training posts
    train_file: PathBuf,

    /// CSV file of labeled posts to predict; without it the trained model is printed
    test_file: Option<PathBuf>,

    /// Header of the column holding each post's label
    #[arg(long, default_value = "tag")]
    label_column: String,

    /// Header of the column holding each post's content
    #[arg(long, default_value = "content")]
    content_column: String,

    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let columns = ColumnNames {
        label: args.label_column,
        content: args.content_column,
    };

    let training = data::read_posts_from_path(&args.train_file, &columns)?;
    let classifier = NaiveBayesClassifier::from_posts(training);
    info!(
        posts = classifier.total_posts(),
        vocabulary = classifier.vocabulary_size(),
        "trained classifier"
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match args.test_file {
        None => {
            report::write_training_data(&mut out, &classifier)?;
            report::write_classifier_parameters(&mut out, &classifier)?;
        }
        Some(test_file) => {
            let test = data::read_posts_from_path(&test_file, &columns)?;
            report::write_test_results(&mut out, &classifier, &test)?;
        }
    }

    Ok(())
}
