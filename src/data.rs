use anyhow::{Context, Result};
use std::{fs::File, io::Read, path::Path};
use tracing::debug;

/// A single labeled post, as read from a training or test file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub label: String,
    pub content: String,
}

impl Post {
    pub fn new(label: impl Into<String>, content: impl Into<String>) -> Self {
        Post {
            label: label.into(),
            content: content.into(),
        }
    }
}

/// Header names of the label and content columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnNames {
    pub label: String,
    pub content: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        ColumnNames {
            label: "tag".to_string(),
            content: "content".to_string(),
        }
    }
}

/// Reads every post from a CSV file with a header row.
pub fn read_posts_from_path<P: AsRef<Path>>(
    path: P,
    columns: &ColumnNames,
) -> Result<Vec<Post>> {
    let path = path.as_ref();
    let file =
        File::open(path).with_context(|| format!("Error opening file: {}", path.display()))?;
    let posts = read_posts(file, columns)
        .with_context(|| format!("Error reading file: {}", path.display()))?;

    debug!(path = %path.display(), posts = posts.len(), "read posts");
    Ok(posts)
}

/// Reads every post from CSV data with a header row.
///
/// Extra columns are ignored. Empty fields are kept as empty strings.
pub fn read_posts<R: Read>(input: R, columns: &ColumnNames) -> Result<Vec<Post>> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(input);

    let headers = reader.headers()?.clone();
    let column_index = |name: &str| {
        headers
            .iter()
            .position(|header| header == name)
            .with_context(|| format!("csv header missing {name:?} column."))
    };
    let label_index = column_index(&columns.label)?;
    let content_index = column_index(&columns.content)?;

    let mut posts = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        // Short rows read as empty fields.
        let field = |index: usize| record.get(index).unwrap_or_default().to_string();

        posts.push(Post {
            label: field(label_index),
            content: field(content_index),
        });

        if record.len() <= label_index.max(content_index) {
            debug!(row = row + 1, "csv record missing fields, treating them as empty");
        }
    }

    Ok(posts)
}
