//! Audio playback through a system player
//!
//! Plays one artifact at a time by spawning the first available command
//! line player for the artifact's encoding. A new playback cancels the
//! previous one first.

use crate::speech::AudioEncoding;
use crate::{Result, SpellError};
use log::{debug, warn};
use std::path::Path;
use std::process::{Child, Command, Stdio};

/// A candidate player command with its quiet-mode arguments
struct PlayerCmd {
    program: &'static str,
    args: &'static [&'static str],
}

const WAV_PLAYERS: &[PlayerCmd] = &[
    PlayerCmd { program: "paplay", args: &[] },
    PlayerCmd { program: "aplay", args: &["-q"] },
    PlayerCmd { program: "afplay", args: &[] },
];

const MP3_PLAYERS: &[PlayerCmd] = &[
    PlayerCmd { program: "mpg123", args: &["-q"] },
    PlayerCmd {
        program: "ffplay",
        args: &["-nodisp", "-autoexit", "-loglevel", "quiet"],
    },
    PlayerCmd { program: "afplay", args: &[] },
];

/// Plays audio files, holding at most one running player process
pub struct Player {
    /// Currently running player process
    current: Option<Child>,
}

impl Player {
    pub fn new() -> Self {
        Self { current: None }
    }

    fn candidates(encoding: AudioEncoding) -> &'static [PlayerCmd] {
        match encoding {
            AudioEncoding::Wav => WAV_PLAYERS,
            AudioEncoding::Mp3 => MP3_PLAYERS,
        }
    }

    /// Kill and reap any still-running player
    fn cancel_current(&mut self) {
        if let Some(mut child) = self.current.take() {
            debug!("Stopping previous player process");
            match child.kill() {
                Ok(_) => {
                    let _ = child.wait();
                }
                Err(e) => {
                    // Usually means it already exited
                    debug!("Failed to kill player process: {}", e);
                }
            }
        }
    }

    /// Play an audio file, cancelling any previous playback
    ///
    /// Tries each known player for the encoding in order; the first that
    /// spawns wins. Playback runs in the background so the quiz stays
    /// responsive.
    pub fn play(&mut self, path: &Path, encoding: AudioEncoding) -> Result<()> {
        self.cancel_current();

        let candidates = Self::candidates(encoding);
        for candidate in candidates {
            let spawned = Command::new(candidate.program)
                .args(candidate.args)
                .arg(path)
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .spawn();

            match spawned {
                Ok(child) => {
                    debug!("Playing {:?} with {}", path, candidate.program);
                    self.current = Some(child);
                    return Ok(());
                }
                Err(e) => {
                    debug!("Player {} unavailable: {}", candidate.program, e);
                }
            }
        }

        let tried: Vec<&str> = candidates.iter().map(|c| c.program).collect();
        warn!("No audio player found for {:?} (tried {:?})", path, tried);
        Err(SpellError::Playback(format!(
            "no audio player found (tried {})",
            tried.join(", ")
        )))
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Player {
    fn drop(&mut self) {
        self.cancel_current();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidates_per_encoding() {
        assert_eq!(Player::candidates(AudioEncoding::Wav)[0].program, "paplay");
        assert_eq!(Player::candidates(AudioEncoding::Mp3)[0].program, "mpg123");
    }

    #[test]
    fn test_cancel_with_nothing_running() {
        let mut player = Player::new();
        // No-op, not a panic
        player.cancel_current();
        player.cancel_current();
    }
}
