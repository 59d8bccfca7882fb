use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{NnError, NnResult};
use crate::text::ngrams::ngrams;

/// A fixed, sorted n-gram vocabulary. Its length is the network input size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    pub n: usize,
    pub tokens: Vec<String>,
}

impl Vocabulary {
    /// Collects the distinct n-grams of every text, sorted ascending.
    pub fn build<I, S>(texts: I, n: usize) -> NnResult<Vocabulary>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if n == 0 {
            return Err(NnError::InvalidConfig("n-gram size must be at least 1".into()));
        }
        let mut set = BTreeSet::new();
        for text in texts {
            set.extend(ngrams(text.as_ref(), n).into_keys());
        }
        if set.is_empty() {
            return Err(NnError::InvalidConfig(format!(
                "no {n}-grams found, vocabulary would be empty"
            )));
        }
        Ok(Vocabulary { n, tokens: set.into_iter().collect() })
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Relative frequency of every vocabulary token in `text`.
    ///
    /// Grams outside the vocabulary still count towards the total. A text
    /// with no n-grams at all maps to the zero vector.
    pub fn tensor(&self, text: &str) -> Vec<f64> {
        let counts = ngrams(text, self.n);
        let total: usize = counts.values().sum();
        let total = total.max(1) as f64;
        self.tokens
            .iter()
            .map(|token| counts.get(token).copied().unwrap_or(0) as f64 / total)
            .collect()
    }
}
