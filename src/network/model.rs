use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{NnError, NnResult};
use crate::network::network::Network;
use crate::text::{LabelEncoder, Vocabulary};

/// A trained text classifier: the vocabulary fixing the input, the labels
/// fixing the output and the network between them.
///
/// This is what gets persisted between runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawModel")]
pub struct Model {
    vocabulary: Vocabulary,
    labels: LabelEncoder,
    network: Network,
}

/// Serialized form of a [`Model`] before its parts are checked against each other.
#[derive(Deserialize)]
struct RawModel {
    vocabulary: Vocabulary,
    labels: LabelEncoder,
    network: Network,
}

impl TryFrom<RawModel> for Model {
    type Error = NnError;

    fn try_from(raw: RawModel) -> NnResult<Model> {
        Model::new(raw.vocabulary, raw.labels, raw.network)
    }
}

impl Model {
    pub fn new(vocabulary: Vocabulary, labels: LabelEncoder, network: Network) -> NnResult<Model> {
        if vocabulary.len() != network.input_size() {
            return Err(NnError::shape("vocabulary vs input layer", network.input_size(), vocabulary.len()));
        }
        if labels.len() != network.output_size() {
            return Err(NnError::shape("labels vs output layer", network.output_size(), labels.len()));
        }
        Ok(Model { vocabulary, labels, network })
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn labels(&self) -> &LabelEncoder {
        &self.labels
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    /// Raw network output for `text`, one score per label.
    pub fn scores(&self, text: &str) -> Vec<f64> {
        self.network.predict(&self.vocabulary.tensor(text))
    }

    /// The label with the highest score.
    pub fn classify(&self, text: &str) -> &str {
        self.labels.decode(&self.scores(text))
    }

    /// Serializes the model to a pretty-printed JSON file.
    pub fn save_json(&self, path: impl AsRef<Path>) -> NnResult<()> {
        let path = path.as_ref();
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, self)?;
        debug!("saved model to {}", path.display());
        Ok(())
    }

    /// Deserializes a model written by `save_json`, re-checking every shape.
    pub fn load_json(path: impl AsRef<Path>) -> NnResult<Model> {
        let reader = BufReader::new(File::open(path.as_ref())?);
        let raw: RawModel = serde_json::from_reader(reader)?;
        Model::try_from(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sample_model() -> Model {
        let vocabulary = Vocabulary::build(["hola que tal", "hello there"], 2).unwrap();
        let labels = LabelEncoder::new(["english", "spanish"]).unwrap();
        let network =
            Network::random(&[vocabulary.len(), 4, 2], &mut StdRng::seed_from_u64(4)).unwrap();
        Model::new(vocabulary, labels, network).unwrap()
    }

    #[test]
    fn rejects_mismatched_parts() {
        let vocabulary = Vocabulary::build(["abc"], 1).unwrap();
        let labels = LabelEncoder::new(["a", "b"]).unwrap();
        let mut rng = StdRng::seed_from_u64(4);
        let wrong_input = Network::random(&[4, 2], &mut rng).unwrap();
        let wrong_output = Network::random(&[3, 3], &mut rng).unwrap();
        assert!(Model::new(vocabulary.clone(), labels.clone(), wrong_input).is_err());
        assert!(Model::new(vocabulary, labels, wrong_output).is_err());
    }

    #[test]
    fn classify_returns_a_known_label() {
        let model = sample_model();
        let label = model.classify("hola");
        assert!(model.labels().labels().iter().any(|l| l == label));
        assert_eq!(model.scores("hola").len(), 2);
    }

    #[test]
    fn json_round_trip_keeps_predictions() {
        let model = sample_model();
        let path = std::env::temp_dir().join(format!("brainlet-model-{}.json", std::process::id()));
        model.save_json(&path).unwrap();
        let loaded = Model::load_json(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded.vocabulary(), model.vocabulary());
        assert_eq!(loaded.labels(), model.labels());
        assert_eq!(loaded.classify("hello"), model.classify("hello"));
    }

    #[test]
    fn deserializing_checks_vocabulary_against_input_layer() {
        let model = sample_model();
        let mut value = serde_json::to_value(&model).unwrap();
        value["vocabulary"]["tokens"].as_array_mut().unwrap().pop();

        let err = serde_json::from_value::<Model>(value).unwrap_err().to_string();
        assert!(err.contains("vocabulary vs input layer"), "{err}");
    }
}
