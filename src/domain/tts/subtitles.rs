/// Estimated speaking time per character, in seconds
pub const SECONDS_PER_CHARACTER: f64 = 0.15;

/// Silence inserted between consecutive segments on the caption timeline
pub const SEGMENT_PAUSE_SECONDS: f64 = 0.1;

pub const WIDE_LINE_CHARS: usize = 150;
pub const NARROW_LINE_CHARS: usize = 55;

/// Caption line budget for a target platform. Landscape video (YouTube) gets
/// wide lines, everything else is treated as a portrait feed.
pub fn max_line_chars(platform: Option<&str>) -> usize {
    match platform {
        Some(platform) if platform.contains("YouTube") => WIDE_LINE_CHARS,
        _ => NARROW_LINE_CHARS,
    }
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Greedily pack whitespace-separated words into lines shorter than `max_chars`.
///
/// A word that does not fit starts a new line. A single word longer than the
/// budget still gets a line of its own and is never split.
pub fn split_for_subtitles(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word_len = char_len(word);

        if current_len + word_len < max_chars {
            current.push_str(word);
            current.push(' ');
            current_len += word_len + 1;
        } else {
            let line = current.trim_end();
            if !line.is_empty() {
                lines.push(line.to_string());
            }
            current = format!("{} ", word);
            current_len = word_len + 1;
        }
    }

    let line = current.trim_end();
    if !line.is_empty() {
        lines.push(line.to_string());
    }

    lines
}

/// Estimated spoken duration of a piece of text
pub fn estimate_duration(text: &str) -> f64 {
    char_len(text) as f64 * SECONDS_PER_CHARACTER
}

/// One timed caption record
#[derive(Debug, Clone, PartialEq)]
pub struct Caption {
    pub index: usize,
    pub start: f64,
    pub end: f64,
    pub text: String,
}

/// Caption timeline for a whole request, built segment by segment in order
#[derive(Debug, Clone, Default)]
pub struct CaptionTrack {
    captions: Vec<Caption>,
    cursor: f64,
    segments: usize,
}

impl CaptionTrack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one segment's captions.
    ///
    /// `caption_text` is what the viewer reads; `duration` is the time the
    /// segment takes to speak. Each line gets a share of the duration equal to
    /// its share of the segment's caption characters.
    pub fn push_segment(&mut self, caption_text: &str, duration: f64, max_chars: usize) {
        if self.segments > 0 {
            self.cursor += SEGMENT_PAUSE_SECONDS;
        }
        self.segments += 1;

        let lines = split_for_subtitles(caption_text, max_chars);
        let total_chars = match lines.iter().map(|line| char_len(line)).sum::<usize>() {
            0 => 1,
            n => n,
        };

        let segment_start = self.cursor;
        let mut line_start = segment_start;

        for line in lines {
            let line_duration = (char_len(&line) as f64 / total_chars as f64) * duration;
            let index = self.captions.len() + 1;
            self.captions.push(Caption {
                index,
                start: line_start,
                end: line_start + line_duration,
                text: line,
            });
            line_start += line_duration;
        }

        self.cursor = segment_start + duration;
    }

    pub fn captions(&self) -> &[Caption] {
        &self.captions
    }

    pub fn is_empty(&self) -> bool {
        self.captions.is_empty()
    }

    /// Position on the timeline where the next segment would start, before the pause
    pub fn cursor(&self) -> f64 {
        self.cursor
    }

    /// Render as SubRip blocks
    pub fn to_srt(&self) -> String {
        let mut srt = String::new();
        for caption in &self.captions {
            srt.push_str(&format!(
                "{}\n{} --> {}\n{}\n\n",
                caption.index,
                format_srt_time(caption.start),
                format_srt_time(caption.end),
                caption.text
            ));
        }
        srt
    }
}

/// Format seconds as `HH:MM:SS,mmm`, truncating sub-millisecond precision
pub fn format_srt_time(seconds: f64) -> String {
    let seconds = seconds.max(0.0);
    let whole = seconds.trunc();
    let millis = ((seconds - whole) * 1000.0) as u64;
    let whole = whole as u64;

    let hours = whole / 3600;
    let minutes = (whole / 60) % 60;
    let secs = whole % 60;

    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, secs, millis)
}
