use crate::app::lyrics::LyricCue;

/// Fixed cue sequence plus a cursor that only moves forward. Once the
/// cursor reaches the end the track stays exhausted.
#[derive(Debug, Clone)]
pub struct LyricsTrack {
    cues: Vec<LyricCue>,
    cursor: usize,
}

impl LyricsTrack {
    pub fn new(cues: Vec<LyricCue>) -> Self {
        Self { cues, cursor: 0 }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.cues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.cues.len()
    }

    /// Cue to show now; moves the cursor past it.
    pub fn advance(&mut self) -> Option<LyricCue> {
        let cue = self.cues.get(self.cursor)?.clone();
        self.cursor += 1;
        Some(cue)
    }
}
