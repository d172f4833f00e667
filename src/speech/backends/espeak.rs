//! Local backend using espeak-ng
//!
//! Renders each word to a WAV temp file with `espeak-ng -w` and hands
//! the file to the caller as an artifact. The caller owns cleanup.
//!
//! Dependencies:
//! - espeak-ng (install with: sudo apt install espeak-ng)

use crate::speech::{AudioArtifact, AudioEncoding, Synthesizer};
use crate::{Result, SpellError};
use log::{debug, error};
use std::fs;
use std::process::{Command, Stdio};

/// Local synthesizer shelling out to espeak-ng
pub struct EspeakSynth {
    /// Path to espeak-ng
    espeak_path: String,

    /// Voice name passed to -v (e.g. "en-us")
    voice: String,

    /// Speaking rate in words per minute passed to -s
    rate_wpm: u16,

    /// Backend name for logs/UI
    description: String,
}

impl EspeakSynth {
    /// Create a new espeak-ng synthesizer
    ///
    /// Verifies espeak-ng is available
    pub fn new(voice: String, rate_wpm: u16) -> Result<Self> {
        debug!("Creating espeak-ng backend (voice={}, rate={})", voice, rate_wpm);

        let espeak_path = Self::find_espeak()?;
        debug!("Found espeak-ng at: {}", espeak_path);

        let description = format!("espeak-ng ({}, {} wpm)", voice, rate_wpm);
        Ok(Self {
            espeak_path,
            voice,
            rate_wpm,
            description,
        })
    }

    /// Find espeak-ng executable
    fn find_espeak() -> Result<String> {
        let paths = vec!["espeak-ng", "/usr/bin/espeak-ng"];

        for path in paths {
            if let Ok(status) = Command::new(path)
                .arg("--version")
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status()
            {
                if status.success() {
                    return Ok(path.to_string());
                }
            }
        }

        Err(SpellError::Backend(
            "espeak-ng not found. Install with: sudo apt install espeak-ng".to_string(),
        ))
    }

    /// Create an empty temp file for espeak-ng to write into
    ///
    /// The returned path is owned by the caller; on any later failure it
    /// must be removed best-effort.
    fn create_output_file() -> Result<std::path::PathBuf> {
        let tmp = tempfile::Builder::new()
            .prefix("spelldrill-")
            .suffix(".wav")
            .tempfile()
            .map_err(|e| SpellError::Backend(format!("failed to create temp file: {}", e)))?;

        tmp.into_temp_path()
            .keep()
            .map_err(|e| SpellError::Backend(format!("failed to keep temp file: {}", e)))
    }
}

impl Synthesizer for EspeakSynth {
    fn synthesize(&mut self, word: &str) -> Result<AudioArtifact> {
        if word.is_empty() {
            return Err(SpellError::Backend("cannot synthesize an empty word".to_string()));
        }

        let out_path = Self::create_output_file()?;
        debug!("Synthesizing {:?} to {:?}", word, out_path);

        let status = Command::new(&self.espeak_path)
            .arg("-v")
            .arg(&self.voice)
            .arg("-s")
            .arg(self.rate_wpm.to_string())
            .arg("-w")
            .arg(&out_path)
            .arg(word)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();

        match status {
            Ok(status) if status.success() => {
                let artifact = AudioArtifact::from_file(out_path, AudioEncoding::Wav);
                debug!("espeak-ng produced {} bytes", artifact.size_bytes());
                Ok(artifact)
            }
            Ok(status) => {
                error!("espeak-ng exited with {} for word {:?}", status, word);
                let _ = fs::remove_file(&out_path);
                Err(SpellError::Backend(format!(
                    "espeak-ng failed with {}",
                    status
                )))
            }
            Err(e) => {
                error!("Failed to run espeak-ng: {}", e);
                let _ = fs::remove_file(&out_path);
                Err(SpellError::Backend(format!("failed to run espeak-ng: {}", e)))
            }
        }
    }

    fn describe(&self) -> &str {
        &self.description
    }
}
