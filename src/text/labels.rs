use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{NnError, NnResult};
use crate::train::evaluate::argmax;

/// Maps category names to one-hot targets and network outputs back to names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct LabelEncoder {
    labels: Vec<String>,
}

impl LabelEncoder {
    pub fn new<I, S>(labels: I) -> NnResult<LabelEncoder>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.is_empty() {
            return Err(NnError::InvalidConfig("label set is empty".into()));
        }
        let mut seen = HashSet::new();
        for label in &labels {
            if !seen.insert(label.as_str()) {
                return Err(NnError::InvalidConfig(format!("duplicate label `{label}`")));
            }
        }
        Ok(LabelEncoder { labels })
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    pub fn one_hot(&self, label: &str) -> NnResult<Vec<f64>> {
        let index = self
            .index_of(label)
            .ok_or_else(|| NnError::InvalidConfig(format!("unknown label `{label}`")))?;
        let mut target = vec![0.0; self.labels.len()];
        target[index] = 1.0;
        Ok(target)
    }

    /// Label of the strongest output; ties go to the first label.
    pub fn decode(&self, output: &[f64]) -> &str {
        &self.labels[argmax(output).min(self.labels.len() - 1)]
    }
}

impl TryFrom<Vec<String>> for LabelEncoder {
    type Error = NnError;

    fn try_from(labels: Vec<String>) -> NnResult<LabelEncoder> {
        LabelEncoder::new(labels)
    }
}

impl From<LabelEncoder> for Vec<String> {
    fn from(encoder: LabelEncoder) -> Vec<String> {
        encoder.labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_hot_marks_only_the_label() {
        let enc = LabelEncoder::new(["en", "es", "fr"]).unwrap();
        assert_eq!(enc.one_hot("es").unwrap(), vec![0.0, 1.0, 0.0]);
        assert!(matches!(enc.one_hot("de"), Err(NnError::InvalidConfig(_))));
    }

    #[test]
    fn decode_picks_first_maximum() {
        let enc = LabelEncoder::new(["en", "es", "fr"]).unwrap();
        assert_eq!(enc.decode(&[0.1, 0.8, 0.3]), "es");
        assert_eq!(enc.decode(&[0.5, 0.2, 0.5]), "en");
    }

    #[test]
    fn rejects_empty_and_duplicate_sets() {
        assert!(LabelEncoder::new(Vec::<String>::new()).is_err());
        assert!(LabelEncoder::new(["en", "en"]).is_err());
    }

    #[test]
    fn serializes_as_plain_list() {
        let enc = LabelEncoder::new(["en", "es"]).unwrap();
        let json = serde_json::to_string(&enc).unwrap();
        assert_eq!(json, r#"["en","es"]"#);
        assert_eq!(serde_json::from_str::<LabelEncoder>(&json).unwrap(), enc);
        assert!(serde_json::from_str::<LabelEncoder>("[]").is_err());
    }
}
