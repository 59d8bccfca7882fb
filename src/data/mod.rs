pub mod dataset;

pub use dataset::{load_labelled_dir, load_test_set, LabelledCorpus, TextSample};
