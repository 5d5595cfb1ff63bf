//! Character-by-character reveal of the hero headline.

use std::time::Duration;

/// Pause before the first character appears.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(500);
/// Time between two characters.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(50);

/// Reveals `text` one character per `interval`, after `delay`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Typewriter {
    text: String,
    delay: Duration,
    interval: Duration,
}

impl Typewriter {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            delay: DEFAULT_DELAY,
            interval: DEFAULT_INTERVAL,
        }
    }

    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Number of characters (not bytes) to reveal.
    #[must_use]
    pub fn steps(&self) -> usize {
        self.text.chars().count()
    }

    /// Time from start until the whole text is visible.
    #[must_use]
    pub fn total_duration(&self) -> Duration {
        self.delay + self.reveal_duration()
    }

    /// Time spent revealing characters, excluding the initial delay.
    #[must_use]
    pub fn reveal_duration(&self) -> Duration {
        self.interval
            .saturating_mul(u32::try_from(self.steps()).unwrap_or(u32::MAX))
    }

    /// How many characters are visible after `elapsed`.
    #[must_use]
    pub fn visible_chars(&self, elapsed: Duration) -> usize {
        if self.interval.is_zero() {
            return if elapsed >= self.delay { self.steps() } else { 0 };
        }
        let Some(running) = elapsed.checked_sub(self.delay) else {
            return 0;
        };
        let ticks = running.as_nanos() / self.interval.as_nanos();
        usize::try_from(ticks).unwrap_or(usize::MAX).min(self.steps())
    }

    /// The prefix of the text visible after `elapsed`.
    #[must_use]
    pub fn frame_at(&self, elapsed: Duration) -> &str {
        let visible = self.visible_chars(elapsed);
        let end = self
            .text
            .char_indices()
            .nth(visible)
            .map_or(self.text.len(), |(idx, _)| idx);
        &self.text[..end]
    }

    /// Whether the cursor should stop blinking.
    #[must_use]
    pub fn is_complete_at(&self, elapsed: Duration) -> bool {
        self.visible_chars(elapsed) == self.steps()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn should_show_nothing_during_delay() {
        let tw = Typewriter::new("Rust Developer");
        assert_eq!(tw.frame_at(ms(0)), "");
        assert_eq!(tw.frame_at(ms(499)), "");
        assert!(!tw.is_complete_at(ms(499)));
    }

    #[test]
    fn should_reveal_one_char_per_interval() {
        let tw = Typewriter::new("Rust");
        assert_eq!(tw.frame_at(ms(550)), "R");
        assert_eq!(tw.frame_at(ms(620)), "Ru");
        assert_eq!(tw.frame_at(ms(700)), "Rust");
        assert!(tw.is_complete_at(ms(700)));
    }

    #[test]
    fn should_report_total_duration() {
        let tw = Typewriter::new("abcd");
        assert_eq!(tw.steps(), 4);
        assert_eq!(tw.total_duration(), ms(700));
        assert_eq!(tw.reveal_duration(), ms(200));
    }

    #[test]
    fn should_respect_char_boundaries() {
        let tw = Typewriter::new("héllo").with_delay(Duration::ZERO);
        assert_eq!(tw.steps(), 5);
        assert_eq!(tw.frame_at(ms(100)), "hé");
    }

    #[test]
    fn should_complete_empty_text_immediately_after_delay() {
        let tw = Typewriter::new("");
        assert!(tw.is_complete_at(ms(0)));
        assert_eq!(tw.frame_at(ms(10_000)), "");
    }

    #[test]
    fn should_reveal_everything_with_zero_interval() {
        let tw = Typewriter::new("abc").with_interval(Duration::ZERO);
        assert_eq!(tw.frame_at(ms(499)), "");
        assert_eq!(tw.frame_at(ms(500)), "abc");
    }
}
