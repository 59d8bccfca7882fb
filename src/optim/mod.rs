pub mod scheduler;

pub use scheduler::{cosine_annealing, CosineSchedule};
