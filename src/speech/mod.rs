//! Speech synthesis system

pub mod artifact;
pub mod backends;
pub mod player;
pub mod synth;

pub use artifact::{AudioArtifact, AudioEncoding};
pub use player::Player;
pub use synth::{create_synthesizer, Synthesizer};
