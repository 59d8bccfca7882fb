pub mod error;
pub mod math;
pub mod activation;
pub mod layers;
pub mod network;
pub mod loss;
pub mod optim;
pub mod text;
pub mod data;
pub mod train;

// Convenience re-exports
pub use error::{NnError, NnResult};
pub use activation::{dsigmoid, sigmoid};
pub use layers::dense::Layer;
pub use network::{Activations, Model, Network};
pub use loss::mae::MaeLoss;
pub use optim::scheduler::{cosine_annealing, CosineSchedule};
pub use text::{LabelEncoder, Vocabulary};
pub use train::{
    train, train_loop, Example, ExampleSource, IterSource, ShuffledCycle, TrainConfig, TrainEvent,
    TrainReport, TrainState,
};
