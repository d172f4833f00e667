//! Audio artifacts and their cleanup
//!
//! A synthesized word is either an in-memory byte buffer (cloud backend)
//! or a temporary file on disk (local backend). Whoever holds the
//! artifact owns its cleanup; the quiz holds at most one at a time.

use crate::{Result, SpellError};
use log::{debug, warn};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Audio container format of a synthesized artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioEncoding {
    Wav,
    Mp3,
}

impl AudioEncoding {
    /// File extension for this encoding
    pub fn extension(&self) -> &'static str {
        match self {
            AudioEncoding::Wav => "wav",
            AudioEncoding::Mp3 => "mp3",
        }
    }
}

enum AudioData {
    /// In-memory bytes. `spooled` is the temp file written on demand
    /// when playback needs a path; it belongs to this artifact.
    Buffer {
        bytes: Vec<u8>,
        spooled: Option<PathBuf>,
    },
    /// Temp file created by the backend. `None` after release.
    File { path: Option<PathBuf> },
}

/// One synthesized word's audio, with exclusive cleanup responsibility
pub struct AudioArtifact {
    encoding: AudioEncoding,
    data: AudioData,
}

impl AudioArtifact {
    /// Wrap raw audio bytes
    pub fn from_bytes(bytes: Vec<u8>, encoding: AudioEncoding) -> Self {
        Self {
            encoding,
            data: AudioData::Buffer {
                bytes,
                spooled: None,
            },
        }
    }

    /// Take ownership of a temp file written by a backend
    pub fn from_file(path: PathBuf, encoding: AudioEncoding) -> Self {
        Self {
            encoding,
            data: AudioData::File { path: Some(path) },
        }
    }

    pub fn encoding(&self) -> AudioEncoding {
        self.encoding
    }

    /// Audio size in bytes, for log lines
    pub fn size_bytes(&self) -> u64 {
        match &self.data {
            AudioData::Buffer { bytes, .. } => bytes.len() as u64,
            AudioData::File { path } => path
                .as_ref()
                .and_then(|p| fs::metadata(p).ok())
                .map(|m| m.len())
                .unwrap_or(0),
        }
    }

    /// Raw bytes if this artifact is buffer-backed (used by the
    /// per-session cache)
    pub fn bytes(&self) -> Option<&[u8]> {
        match &self.data {
            AudioData::Buffer { bytes, .. } => Some(bytes),
            AudioData::File { .. } => None,
        }
    }

    /// Path to playable audio on disk
    ///
    /// File-backed artifacts return their backing file. Buffer-backed
    /// artifacts are spooled to a temp file on first call; the spooled
    /// file is cleaned up with the artifact.
    pub fn playable_path(&mut self) -> Result<&Path> {
        match &mut self.data {
            AudioData::File { path } => path
                .as_deref()
                .ok_or_else(|| SpellError::Playback("audio already released".to_string())),
            AudioData::Buffer { bytes, spooled } => {
                let path = match spooled.take() {
                    Some(path) => path,
                    None => {
                        let mut tmp = tempfile::Builder::new()
                            .prefix("spelldrill-")
                            .suffix(&format!(".{}", self.encoding.extension()))
                            .tempfile()
                            .map_err(|e| {
                                SpellError::Playback(format!("failed to create temp file: {}", e))
                            })?;
                        tmp.write_all(bytes).map_err(|e| {
                            SpellError::Playback(format!("failed to write audio: {}", e))
                        })?;
                        let (_file, path) = tmp.keep().map_err(|e| {
                            SpellError::Playback(format!("failed to keep temp file: {}", e))
                        })?;
                        debug!("Spooled {} bytes to {:?}", bytes.len(), path);
                        path
                    }
                };
                Ok(spooled.insert(path).as_path())
            }
        }
    }

    /// Release the artifact's disk footprint
    ///
    /// Idempotent. Deletion failures are logged, never surfaced: a leaked
    /// temp file is an acceptable degraded outcome.
    pub fn release(&mut self) {
        let path = match &mut self.data {
            AudioData::Buffer { spooled, .. } => spooled.take(),
            AudioData::File { path } => path.take(),
        };

        if let Some(path) = path {
            match fs::remove_file(&path) {
                Ok(()) => debug!("Removed audio file {:?}", path),
                Err(e) => warn!("Failed to remove audio file {:?}: {}", path, e),
            }
        }
    }
}

impl Drop for AudioArtifact {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoding_extension() {
        assert_eq!(AudioEncoding::Wav.extension(), "wav");
        assert_eq!(AudioEncoding::Mp3.extension(), "mp3");
    }

    #[test]
    fn test_buffer_spools_once() {
        let mut artifact = AudioArtifact::from_bytes(vec![1, 2, 3], AudioEncoding::Mp3);
        let first = artifact.playable_path().unwrap().to_path_buf();
        assert!(first.exists());
        assert_eq!(fs::read(&first).unwrap(), vec![1, 2, 3]);

        let second = artifact.playable_path().unwrap().to_path_buf();
        assert_eq!(first, second);

        artifact.release();
        assert!(!first.exists());
    }

    #[test]
    fn test_release_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("word.wav");
        fs::write(&path, b"audio").unwrap();

        let mut artifact = AudioArtifact::from_file(path.clone(), AudioEncoding::Wav);
        artifact.release();
        assert!(!path.exists());

        // Second release is a no-op, not a panic
        artifact.release();
    }

    #[test]
    fn test_drop_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("word.wav");
        fs::write(&path, b"audio").unwrap();

        {
            let _artifact = AudioArtifact::from_file(path.clone(), AudioEncoding::Wav);
        }
        assert!(!path.exists());
    }

    #[test]
    fn test_buffer_without_spool_has_no_disk_footprint() {
        let mut artifact = AudioArtifact::from_bytes(vec![0u8; 16], AudioEncoding::Mp3);
        assert_eq!(artifact.size_bytes(), 16);
        assert!(artifact.bytes().is_some());
        // Releasing an unspooled buffer touches nothing on disk
        artifact.release();
    }

    #[test]
    fn test_released_file_path_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("word.wav");
        fs::write(&path, b"audio").unwrap();

        let mut artifact = AudioArtifact::from_file(path, AudioEncoding::Wav);
        artifact.release();
        assert!(artifact.playable_path().is_err());
    }
}
