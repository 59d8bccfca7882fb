use serde::{Deserialize, Serialize};

/// A labelled training pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Example {
    pub input: Vec<f64>,
    pub target: Vec<f64>,
}

impl Example {
    pub fn new(input: Vec<f64>, target: Vec<f64>) -> Example {
        Example { input, target }
    }
}
