use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// One caption with its start time and how long it stays up 🎤
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LyricCue {
    pub text: String,
    pub start_ms: u64,
    pub duration_ms: u64,
}

impl LyricCue {
    pub fn new(text: &str, start_ms: u64, duration_ms: u64) -> Self {
        Self {
            text: text.to_string(),
            start_ms,
            duration_ms,
        }
    }

    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

/// Captions shipped with the lens.
pub fn sample_cues() -> Vec<LyricCue> {
    vec![
        LyricCue::new("Is this the real life?", 0, 3000),
        LyricCue::new("Is this just fantasy?", 3000, 3000),
        LyricCue::new("Caught in a landslide", 6000, 3000),
        LyricCue::new("No escape from reality", 9000, 3000),
    ]
}

/// Read an LRC sheet from disk.
pub fn load_lrc_file(path: &Path, last_duration_ms: u64) -> Result<Vec<LyricCue>> {
    let content =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    Ok(parse_lrc_content(&content, last_duration_ms))
}

/// Parse `[mm:ss.xx] text` lines. Each cue lasts until the next one starts;
/// the last lasts `last_duration_ms`.
pub fn parse_lrc_content(content: &str, last_duration_ms: u64) -> Vec<LyricCue> {
    let mut stamped = Vec::new();
    for line in content.lines() {
        let line = line.trim();
        if let Some(idx) = line.find(']') {
            if line.starts_with('[') {
                let timestamp_str = &line[1..idx];
                let text = line[idx + 1..].trim().to_string();
                // Metadata tags like [ar:Queen] don't parse as timestamps
                if let Some(ms) = parse_timestamp(timestamp_str) {
                    stamped.push((ms, text));
                }
            }
        }
    }
    stamped.sort_by_key(|(ms, _)| *ms);

    let starts: Vec<u64> = stamped.iter().map(|(ms, _)| *ms).collect();
    stamped
        .into_iter()
        .enumerate()
        .map(|(i, (start_ms, text))| {
            let duration_ms = starts
                .get(i + 1)
                .map(|next| next - start_ms)
                .unwrap_or(last_duration_ms);
            LyricCue {
                text,
                start_ms,
                duration_ms,
            }
        })
        .collect()
}

fn parse_timestamp(ts: &str) -> Option<u64> {
    let parts: Vec<&str> = ts.split(':').collect();
    if parts.len() != 2 {
        return None;
    }

    let min: u64 = parts[0].parse().ok()?;
    let sec_parts: Vec<&str> = parts[1].split('.').collect();
    let sec: u64 = sec_parts[0].parse().ok()?;
    let ms: u64 = if sec_parts.len() > 1 {
        let frac = sec_parts[1];
        match frac.len() {
            1 => frac.parse::<u64>().ok()? * 100,
            2 => frac.parse::<u64>().ok()? * 10,
            _ => frac.get(..3)?.parse::<u64>().ok()?,
        }
    } else {
        0
    };

    min.checked_mul(60_000)?
        .checked_add(sec.checked_mul(1000)?)?
        .checked_add(ms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_cues_are_contiguous() {
        let cues = sample_cues();
        for pair in cues.windows(2) {
            assert_eq!(pair[0].start_ms + pair[0].duration_ms, pair[1].start_ms);
        }
        let total: u64 = cues.iter().map(|c| c.duration_ms).sum();
        assert_eq!(total, 12000);
    }

    #[test]
    fn test_parse_lrc_durations_from_gaps() {
        let lrc = "[ar:Queen]\n[00:00.00] Is this the real life?\n[00:03.50]Is this just fantasy?\n[00:07.25] Caught in a landslide\n";
        let cues = parse_lrc_content(lrc, 3000);

        assert_eq!(cues.len(), 3);
        assert_eq!(cues[0].text, "Is this the real life?");
        assert_eq!(cues[0].duration_ms, 3500);
        assert_eq!(cues[1].start_ms, 3500);
        assert_eq!(cues[1].duration_ms, 3750);
        assert_eq!(cues[2].duration_ms, 3000);
    }

    #[test]
    fn test_parse_lrc_skips_oversized_timestamps() {
        let lrc = "[999999999999999:00]boom\n[00:01.00]fine\n[00:99999999999999999.0]boom\n";
        let cues = parse_lrc_content(lrc, 3000);
        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].text, "fine");
        assert_eq!(cues[0].start_ms, 1000);
        assert_eq!(parse_timestamp("999999999999999:00"), None);
        assert_eq!(parse_timestamp("01:02.50"), Some(62_500));
    }

    #[test]
    fn test_parse_lrc_sorts_out_of_order_lines() {
        let cues = parse_lrc_content("[01:00]b\n[00:30.5]a\n", 1000);
        assert_eq!(cues[0].text, "a");
        assert_eq!(cues[0].start_ms, 30500);
        assert_eq!(cues[0].duration_ms, 29500);
        assert_eq!(cues[1].start_ms, 60000);
    }

    #[test]
    fn test_load_lrc_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("song.lrc");
        fs::write(&path, "[00:01.00]hello\n").unwrap();
        let cues = load_lrc_file(&path, 2000).unwrap();
        assert_eq!(cues, vec![LyricCue::new("hello", 1000, 2000)]);
        assert!(load_lrc_file(&dir.path().join("missing.lrc"), 2000).is_err());
    }
}
