//! Validator synthesis infrastructure

mod synthesizer;

pub use synthesizer::{SynthesisOptions, Synthesizer};
