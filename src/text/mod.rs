pub mod labels;
pub mod ngrams;
pub mod vocab;

pub use labels::LabelEncoder;
pub use ngrams::ngrams;
pub use vocab::Vocabulary;

/// Normalizes a raw line before featurization: trimmed and lower-cased.
pub fn sanitize(line: &str) -> String {
    line.trim().to_lowercase()
}
