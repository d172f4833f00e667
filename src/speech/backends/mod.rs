//! Text-to-speech backends

// Local synthesis via an espeak-ng subprocess
pub mod espeak;

// Cloud TTS API over HTTPS
pub mod cloud;
