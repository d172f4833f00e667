//! Quiz progression state machine
//!
//! A deterministic four-action walk over the word list: Play speaks the
//! current word, Submit checks the typed answer, Next advances, Restart
//! starts over from the terminal state. Synthesis failures never block
//! progression; the only held resource is the current word's audio, and
//! there is never more than one.

use crate::speech::{AudioArtifact, Synthesizer};
use crate::words::WordList;
use crate::{Result, SpellError};
use log::debug;

/// Where the quiz currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    /// Working on the word at this index
    InProgress(usize),
    /// Past the last word; absorbing except via Restart
    Complete,
}

/// Result of checking a submitted answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    Correct,
    /// Wrong answer; reveals the correct spelling
    Incorrect { expected: String },
}

/// Session-scoped quiz state
///
/// Created at session start, mutated only by the action methods below,
/// dropped at session end. Not a global.
pub struct Quiz {
    words: WordList,
    index: usize,
    feedback: Option<Feedback>,
    awaiting_advance: bool,
    audio: Option<AudioArtifact>,
}

impl Quiz {
    /// Start a quiz at the first word
    ///
    /// `WordList` construction already rejects empty lists, so the quiz
    /// always starts InProgress(0).
    pub fn new(words: WordList) -> Self {
        Self {
            words,
            index: 0,
            feedback: None,
            awaiting_advance: false,
            audio: None,
        }
    }

    pub fn phase(&self) -> QuizPhase {
        if self.index < self.words.len() {
            QuizPhase::InProgress(self.index)
        } else {
            QuizPhase::Complete
        }
    }

    pub fn is_complete(&self) -> bool {
        self.index >= self.words.len()
    }

    /// The word being quizzed, or `None` once complete
    pub fn current_word(&self) -> Option<&str> {
        self.words.word_at(self.index)
    }

    /// (current word number, total) for the "N / total" counter.
    /// Only meaningful while in progress.
    pub fn progress(&self) -> (usize, usize) {
        (self.index + 1, self.words.len())
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn awaiting_advance(&self) -> bool {
        self.awaiting_advance
    }

    pub fn has_audio(&self) -> bool {
        self.audio.is_some()
    }

    /// The held artifact, for playback
    pub fn audio_mut(&mut self) -> Option<&mut AudioArtifact> {
        self.audio.as_mut()
    }

    /// Release the held artifact, if any. Idempotent.
    pub fn release_audio(&mut self) {
        if let Some(mut artifact) = self.audio.take() {
            debug!("Releasing audio for word {}", self.index);
            artifact.release();
        }
    }

    /// Store a new artifact, releasing the previous one first
    ///
    /// This is the single write path for `audio`, which is what keeps the
    /// at-most-one-artifact invariant.
    pub fn attach_audio(&mut self, artifact: AudioArtifact) -> &mut AudioArtifact {
        self.release_audio();
        self.audio.insert(artifact)
    }

    /// Play action: synthesize the current word
    ///
    /// Only available in progress. The previous artifact is released
    /// before the backend is called; on failure no artifact is held and
    /// the error goes to the caller, leaving progression untouched.
    pub fn play(&mut self, synth: &mut dyn Synthesizer) -> Result<&mut AudioArtifact> {
        let word = match self.current_word() {
            Some(word) => word.to_string(),
            None => return Err(SpellError::Other("the quiz is already complete".to_string())),
        };

        self.release_audio();
        match synth.synthesize(&word) {
            Ok(artifact) => {
                debug!(
                    "Synthesized {:?} ({} bytes, {:?})",
                    word,
                    artifact.size_bytes(),
                    artifact.encoding()
                );
                Ok(self.audio.insert(artifact))
            }
            Err(e) => {
                debug!("Synthesis of {:?} failed: {}", word, e);
                Err(e)
            }
        }
    }

    /// Submit action: check a typed answer against the current word
    ///
    /// Comparison ignores letter case and surrounding whitespace. The
    /// quiz becomes ready to advance whether or not the answer was
    /// correct, and any held audio is released. Returns `None` when the
    /// quiz is already complete.
    pub fn submit(&mut self, input: &str) -> Option<&Feedback> {
        let expected = self.current_word()?.to_string();
        let correct = input.trim().to_lowercase() == expected;

        debug!(
            "Submit for word {} ({:?}): {}",
            self.index,
            expected,
            if correct { "correct" } else { "incorrect" }
        );

        self.feedback = Some(if correct {
            Feedback::Correct
        } else {
            Feedback::Incorrect { expected }
        });
        self.awaiting_advance = true;
        self.release_audio();
        self.feedback.as_ref()
    }

    /// Next action: move to the following word
    ///
    /// Only available after a submit. Returns false when nothing was
    /// pending. Reaching the end of the list leaves the quiz Complete.
    pub fn next(&mut self) -> bool {
        if !self.awaiting_advance {
            return false;
        }

        self.index += 1;
        self.feedback = None;
        self.awaiting_advance = false;
        self.release_audio();

        debug!("Advanced to index {} (phase {:?})", self.index, self.phase());
        true
    }

    /// Restart action: back to the first word
    ///
    /// Only available once the quiz is complete. Returns false otherwise.
    pub fn restart(&mut self) -> bool {
        if !self.is_complete() {
            return false;
        }

        debug!("Restarting quiz");
        self.index = 0;
        self.feedback = None;
        self.awaiting_advance = false;
        self.release_audio();
        true
    }
}

impl Drop for Quiz {
    fn drop(&mut self) {
        self.release_audio();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::speech::{AudioEncoding, Synthesizer};
    use std::fs;
    use std::path::PathBuf;

    /// Synthesizer that writes real temp files so releases are observable
    struct FileSynth {
        dir: tempfile::TempDir,
        counter: usize,
        created: Vec<PathBuf>,
    }

    impl FileSynth {
        fn new() -> Self {
            Self {
                dir: tempfile::tempdir().unwrap(),
                counter: 0,
                created: Vec::new(),
            }
        }
    }

    impl Synthesizer for FileSynth {
        fn synthesize(&mut self, word: &str) -> Result<AudioArtifact> {
            let path = self.dir.path().join(format!("{}-{}.wav", word, self.counter));
            self.counter += 1;
            fs::write(&path, word.as_bytes()).unwrap();
            self.created.push(path.clone());
            Ok(AudioArtifact::from_file(path, AudioEncoding::Wav))
        }

        fn describe(&self) -> &str {
            "test files"
        }
    }

    /// Synthesizer that always fails
    struct FailingSynth;

    impl Synthesizer for FailingSynth {
        fn synthesize(&mut self, _word: &str) -> Result<AudioArtifact> {
            Err(SpellError::Backend("synthesis is down".to_string()))
        }

        fn describe(&self) -> &str {
            "always failing"
        }
    }

    fn quiz(words: &[&str]) -> Quiz {
        Quiz::new(WordList::new(words.iter().copied()).unwrap())
    }

    #[test]
    fn test_full_walk() {
        let mut quiz = quiz(&["spray", "basil"]);
        assert_eq!(quiz.phase(), QuizPhase::InProgress(0));
        assert_eq!(quiz.progress(), (1, 2));

        // Case and surrounding whitespace are forgiven
        assert_eq!(quiz.submit("Spray "), Some(&Feedback::Correct));
        assert!(quiz.awaiting_advance());

        assert!(quiz.next());
        assert_eq!(quiz.phase(), QuizPhase::InProgress(1));
        assert!(quiz.feedback().is_none());
        assert!(!quiz.awaiting_advance());

        // A miss reveals the expected spelling but still allows moving on
        match quiz.submit("basilx") {
            Some(Feedback::Incorrect { expected }) => assert_eq!(expected, "basil"),
            other => panic!("unexpected feedback: {:?}", other),
        }
        assert!(quiz.awaiting_advance());

        assert!(quiz.next());
        assert_eq!(quiz.phase(), QuizPhase::Complete);
        assert!(quiz.current_word().is_none());
    }

    #[test]
    fn test_next_requires_submit() {
        let mut quiz = quiz(&["spray"]);
        assert!(!quiz.next());
        assert_eq!(quiz.phase(), QuizPhase::InProgress(0));

        quiz.submit("wrong");
        assert!(quiz.next());
        // Next is one-shot until the following submit
        assert!(!quiz.next());
    }

    #[test]
    fn test_index_only_moves_forward_by_one() {
        let mut quiz = quiz(&["a", "b", "c"]);
        for expected_index in 1..=3 {
            quiz.submit("a");
            quiz.next();
            match quiz.phase() {
                QuizPhase::InProgress(i) => assert_eq!(i, expected_index),
                QuizPhase::Complete => assert_eq!(expected_index, 3),
            }
        }
    }

    #[test]
    fn test_complete_is_absorbing() {
        let mut quiz = quiz(&["spray"]);
        quiz.submit("spray");
        quiz.next();
        assert!(quiz.is_complete());

        // Submit and Next do nothing once complete
        assert!(quiz.submit("spray").is_none());
        assert!(!quiz.next());
        assert!(quiz.is_complete());
    }

    #[test]
    fn test_restart() {
        let mut quiz = quiz(&["spray"]);

        // Restart is not available mid-quiz
        assert!(!quiz.restart());

        quiz.submit("sprey");
        quiz.next();
        assert!(quiz.is_complete());

        assert!(quiz.restart());
        assert_eq!(quiz.phase(), QuizPhase::InProgress(0));
        assert!(quiz.feedback().is_none());
        assert!(!quiz.awaiting_advance());
    }

    #[test]
    fn test_play_holds_at_most_one_artifact() {
        let mut synth = FileSynth::new();
        let mut quiz = quiz(&["spray"]);

        quiz.play(&mut synth).unwrap();
        quiz.play(&mut synth).unwrap();

        // The first file was deleted when the second play released it
        assert!(!synth.created[0].exists());
        assert!(synth.created[1].exists());
        assert!(quiz.has_audio());
    }

    #[test]
    fn test_submit_releases_audio() {
        let mut synth = FileSynth::new();
        let mut quiz = quiz(&["spray"]);

        quiz.play(&mut synth).unwrap();
        assert!(synth.created[0].exists());

        quiz.submit("spray");
        assert!(!quiz.has_audio());
        assert!(!synth.created[0].exists());
    }

    #[test]
    fn test_play_failure_clears_audio_and_preserves_progression() {
        let mut files = FileSynth::new();
        let mut quiz = quiz(&["spray", "basil"]);

        quiz.play(&mut files).unwrap();
        assert!(quiz.has_audio());

        // The failed attempt releases the prior artifact and holds nothing
        let mut failing = FailingSynth;
        assert!(quiz.play(&mut failing).is_err());
        assert!(!quiz.has_audio());
        assert!(!files.created[0].exists());

        // Submit/Next still work
        assert_eq!(quiz.submit("spray"), Some(&Feedback::Correct));
        assert!(quiz.next());
        assert_eq!(quiz.phase(), QuizPhase::InProgress(1));
    }

    #[test]
    fn test_play_after_complete_errors() {
        let mut synth = FileSynth::new();
        let mut quiz = quiz(&["spray"]);
        quiz.submit("spray");
        quiz.next();
        assert!(quiz.play(&mut synth).is_err());
    }

    #[test]
    fn test_drop_releases_audio() {
        let mut synth = FileSynth::new();
        let path;
        {
            let mut quiz = quiz(&["spray"]);
            quiz.play(&mut synth).unwrap();
            path = synth.created[0].clone();
            assert!(path.exists());
        }
        assert!(!path.exists());
    }
}
