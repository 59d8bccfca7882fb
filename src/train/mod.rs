pub mod evaluate;
pub mod example;
pub mod loop_fn;
pub mod progress;
pub mod source;
pub mod train_config;

pub use evaluate::{accuracy, argmax, mean_error};
pub use example::Example;
pub use loop_fn::{train, train_loop, TrainReport, TrainState};
pub use progress::{LogSink, ProgressSink, StepStats, TrainEvent};
pub use source::{ExampleSource, IterSource, ShuffledCycle, TextExamples};
pub use train_config::TrainConfig;
