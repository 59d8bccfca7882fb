use std::fs;
use std::path::Path;

use log::debug;

use crate::error::{NnError, NnResult};
use crate::text::sanitize;

/// One line of text and the category it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSample {
    pub text: String,
    pub label: String,
}

/// Samples read from a labelled directory plus the labels in file order.
#[derive(Debug, Clone, Default)]
pub struct LabelledCorpus {
    pub samples: Vec<TextSample>,
    pub labels: Vec<String>,
}

impl LabelledCorpus {
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.samples.iter().map(|s| s.text.as_str())
    }
}

/// Sanitized, non-empty lines of `content`.
fn clean_lines(content: &str) -> impl Iterator<Item = String> + '_ {
    content.lines().map(sanitize).filter(|line| !line.is_empty())
}

/// Reads every `*.txt` file in `dir` as one category named after its stem.
///
/// Each non-empty line (trimmed, lower-cased) is one sample. Files are read
/// in name order so the label order is reproducible.
pub fn load_labelled_dir(dir: impl AsRef<Path>) -> NnResult<LabelledCorpus> {
    let dir = dir.as_ref();
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "txt") {
            paths.push(path);
        }
    }
    paths.sort();

    let mut corpus = LabelledCorpus::default();
    for path in paths {
        let Some(label) = path.file_stem().and_then(|s| s.to_str()).map(str::to_owned) else {
            continue;
        };
        let content = fs::read_to_string(&path)?;
        let before = corpus.samples.len();
        corpus.samples.extend(clean_lines(&content).map(|text| TextSample {
            text,
            label: label.clone(),
        }));
        debug!("{}: {} samples", path.display(), corpus.samples.len() - before);
        corpus.labels.push(label);
    }

    if corpus.labels.is_empty() {
        return Err(NnError::InvalidConfig(format!(
            "no .txt files found in {}",
            dir.display()
        )));
    }
    Ok(corpus)
}

/// Pairs every sanitized test line with the expected label.
///
/// The expected label is the last whitespace-separated word of the matching
/// non-empty solutions line, lower-cased.
pub fn load_test_set(
    tests_path: impl AsRef<Path>,
    solutions_path: impl AsRef<Path>,
) -> NnResult<Vec<TextSample>> {
    let tests: Vec<String> = clean_lines(&fs::read_to_string(tests_path)?).collect();
    let solutions: Vec<String> = fs::read_to_string(solutions_path)?
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| line.split_whitespace().last().unwrap_or_default().to_lowercase())
        .collect();

    if tests.len() != solutions.len() {
        return Err(NnError::InvalidConfig(format!(
            "{} test lines but {} solutions",
            tests.len(),
            solutions.len()
        )));
    }

    Ok(tests
        .into_iter()
        .zip(solutions)
        .map(|(text, label)| TextSample { text, label })
        .collect())
}
