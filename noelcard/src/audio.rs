//! Looping music playback, delegated to rodio.
//!
//! The player is only ever driven from the UI thread; `playing` is plain
//! state, not shared. A machine without an audio device still gets a
//! working app — playback attempts just report an error.

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub struct MusicPlayer {
    _stream: Option<OutputStream>,
    stream_handle: Option<OutputStreamHandle>,
    sink: Option<Sink>,
    playing: bool,
}

impl MusicPlayer {
    pub fn new() -> Self {
        let (stream, handle) = OutputStream::try_default().ok().unzip();
        Self {
            _stream: stream,
            stream_handle: handle,
            sink: None,
            playing: false,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Start looping playback of `path`.
    /// On any failure the playback state is left unchanged.
    pub fn play(&mut self, path: &Path) -> Result<(), String> {
        if !path.exists() {
            return Err(format!("music file not found: {}", path.display()));
        }
        let handle = self
            .stream_handle
            .as_ref()
            .ok_or_else(|| "no audio output device".to_string())?;

        let file = File::open(path).map_err(|e| format!("file error: {e}"))?;
        let source = Decoder::new(BufReader::new(file))
            .map_err(|e| format!("decode error: {e}"))?;
        let sink = Sink::try_new(handle).map_err(|e| format!("audio error: {e}"))?;

        sink.append(source.repeat_infinite());

        if let Some(old) = self.sink.take() {
            old.stop();
        }
        self.sink = Some(sink);
        self.playing = true;
        Ok(())
    }

    pub fn stop(&mut self) {
        if let Some(ref sink) = self.sink {
            sink.stop();
        }
        self.sink = None;
        self.playing = false;
    }

    /// Start or stop playback. Returns whether music is now playing.
    pub fn toggle(&mut self, path: &Path) -> Result<bool, String> {
        if self.playing {
            self.stop();
            Ok(false)
        } else {
            self.play(path)?;
            Ok(true)
        }
    }
}

impl Drop for MusicPlayer {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn missing_file_reports_and_leaves_state_unchanged() {
        let mut player = MusicPlayer::new();
        let err = player.play(&PathBuf::from("/nonexistent/joyeux_noel.mp3"));
        assert!(err.is_err());
        assert!(!player.is_playing());
    }

    #[test]
    fn toggle_on_missing_file_stays_stopped() {
        let mut player = MusicPlayer::new();
        assert!(player.toggle(&PathBuf::from("/nonexistent/track.mp3")).is_err());
        assert!(!player.is_playing());
        // stop() on a stopped player is a no-op
        player.stop();
        assert!(!player.is_playing());
    }
}
