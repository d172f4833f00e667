//! Session state
//!
//! One Session is one user's run of the quiz: configuration, the word
//! list, the progression state machine, the synthesizer, the player and
//! the per-session synthesis cache. Created at startup, dropped at
//! exit - the explicit replacement for framework-global session state.

pub mod config;

use crate::quiz::{Feedback, Quiz};
use crate::speech::{
    create_synthesizer, AudioArtifact, AudioEncoding, Player, Synthesizer,
};
use crate::words::WordList;
use crate::{Result, SpellError};
use config::{BackendKind, Config};
use log::{debug, info, warn};
use std::collections::HashMap;

/// All state for one quiz session
pub struct Session {
    /// Configuration loaded from ~/.spelldrill.cfg
    pub config: Config,

    /// The progression state machine
    quiz: Quiz,

    /// Selected synthesis backend
    synth: Box<dyn Synthesizer>,

    /// Audio playback
    player: Player,

    /// Previously synthesized buffer audio, keyed by word. File-backed
    /// artifacts are never cached so each one keeps sole responsibility
    /// for its temp file.
    cache: HashMap<String, (Vec<u8>, AudioEncoding)>,

    /// Persistent configuration warning shown on every render
    warning: Option<String>,
}

impl Session {
    /// Create a session from the on-disk configuration
    pub fn new() -> Result<Self> {
        let config = Config::load()?;
        info!("Configuration loaded from {:?}", config.path());

        let words = match config.wordlist_path() {
            Some(path) => WordList::from_file(&path)?,
            None => WordList::default_list(),
        };
        info!("Word list ready: {} words", words.len());

        let synth = create_synthesizer(&config)?;

        // Missing cloud credentials degrade to a persistent warning; the
        // quiz itself stays fully usable
        let warning = if config.backend()? == BackendKind::Cloud && config.api_key().is_none() {
            let message = format!(
                "{}",
                crate::speech::backends::cloud::CloudSynth::missing_credential_error()
            );
            warn!("{}", message);
            Some(message)
        } else {
            None
        };

        Ok(Self::from_parts(config, words, synth, warning))
    }

    /// Assemble a session from explicit parts (used by tests)
    pub fn from_parts(
        config: Config,
        words: WordList,
        synth: Box<dyn Synthesizer>,
        warning: Option<String>,
    ) -> Self {
        Self {
            config,
            quiz: Quiz::new(words),
            synth,
            player: Player::new(),
            cache: HashMap::new(),
            warning,
        }
    }

    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    /// Backend name for the startup banner
    pub fn backend_description(&self) -> &str {
        self.synth.describe()
    }

    /// The persistent configuration warning, if any
    pub fn warning(&self) -> Option<&str> {
        self.warning.as_deref()
    }

    /// Record a configuration failure so it stays visible
    pub fn set_warning(&mut self, message: String) {
        self.warning = Some(message);
    }

    /// Play action: synthesize (or fetch from cache) and start playback
    /// of the current word
    pub fn play_current(&mut self) -> Result<()> {
        let word = self
            .quiz
            .current_word()
            .map(str::to_string)
            .ok_or_else(|| SpellError::Other("the quiz is already complete".to_string()))?;

        if let Some((bytes, encoding)) = self.cache.get(&word) {
            debug!("Cache hit for {:?} ({} bytes)", word, bytes.len());
            self.quiz
                .attach_audio(AudioArtifact::from_bytes(bytes.clone(), *encoding));
        } else {
            let artifact = self.quiz.play(self.synth.as_mut())?;
            if let Some(bytes) = artifact.bytes() {
                debug!("Caching {} bytes for {:?}", bytes.len(), word);
                self.cache
                    .insert(word.clone(), (bytes.to_vec(), artifact.encoding()));
            }
        }

        let artifact = self
            .quiz
            .audio_mut()
            .ok_or_else(|| SpellError::Playback("no audio to play".to_string()))?;
        let encoding = artifact.encoding();
        let path = artifact.playable_path()?.to_path_buf();
        self.player.play(&path, encoding)
    }

    /// Submit action; `None` once the quiz is complete
    pub fn submit(&mut self, input: &str) -> Option<&Feedback> {
        self.quiz.submit(input)
    }

    /// Next action; false when no answer is pending
    pub fn next(&mut self) -> bool {
        self.quiz.next()
    }

    /// Restart action; false unless the quiz is complete
    pub fn restart(&mut self) -> bool {
        self.quiz.restart()
    }
}
