//! Speech synthesizer abstraction
//!
//! One capability, two interchangeable implementations: a local
//! espeak-ng process and a cloud TTS API. The quiz only ever sees
//! `synthesize(word) -> artifact`.

use crate::session::config::{BackendKind, Config};
use crate::speech::AudioArtifact;
use crate::Result;
use log::info;

/// Speech synthesizer trait
///
/// Pure function of (word, backend configuration) to an audio artifact.
/// All failures are returned as values; a failed call yields no artifact
/// and the caller may simply try again.
pub trait Synthesizer: Send {
    /// Render one word to playable audio
    ///
    /// The word is a non-empty entry from the session's word list.
    fn synthesize(&mut self, word: &str) -> Result<AudioArtifact>;

    /// Short human-readable backend name for logs and the UI
    fn describe(&self) -> &str;
}

/// Create the synthesizer selected by configuration
///
/// `backend = local` requires espeak-ng on the PATH and fails at startup
/// with an install hint when it is absent. `backend = cloud` always
/// constructs; a missing API key degrades to a warning and every
/// synthesis attempt short-circuits with the same error until the key
/// is configured.
pub fn create_synthesizer(config: &Config) -> Result<Box<dyn Synthesizer>> {
    match config.backend()? {
        BackendKind::Local => {
            info!("Creating local espeak-ng backend");
            let synth = super::backends::espeak::EspeakSynth::new(
                config.voice(),
                config.rate_wpm(),
            )?;
            info!("Local backend ready: {}", synth.describe());
            Ok(Box::new(synth))
        }
        BackendKind::Cloud => {
            info!("Creating cloud TTS backend");
            let synth = super::backends::cloud::CloudSynth::new(config)?;
            info!("Cloud backend ready: {}", synth.describe());
            Ok(Box::new(synth))
        }
    }
}
