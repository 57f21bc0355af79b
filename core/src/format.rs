//! Lap time formatting
//!
//! Two renderings of a millisecond duration:
//! - **Display**: fixed-width `M:SS.mmm` used by the status line and history
//! - **Speech**: a phrase for the speech engine, e.g. `"1 minute 5 seconds 2 3 0"`
//!
//! Minutes are taken modulo 60 in both, so an hour-long lap reads as `0:00.000`.

/// Language used for the spoken readout, taken from the host locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpeechLocale {
    #[default]
    English,
    Japanese,
}

impl SpeechLocale {
    /// Detect from the host locale (`ja-JP` → Japanese, anything else → English)
    pub fn detect() -> Self {
        match sys_locale::get_locale() {
            Some(tag) => Self::from_tag(&tag),
            None => Self::default(),
        }
    }

    pub fn from_tag(tag: &str) -> Self {
        let language = tag.split(['-', '_', '.']).next().unwrap_or_default();
        if language.eq_ignore_ascii_case("ja") {
            Self::Japanese
        } else {
            Self::English
        }
    }

    /// espeak voice name for this locale
    pub fn voice(self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Japanese => "ja",
        }
    }

    fn minutes(self, n: u64) -> String {
        match self {
            Self::English if n == 1 => "1 minute".to_string(),
            Self::English => format!("{n} minutes"),
            Self::Japanese => format!("{n}分"),
        }
    }

    fn seconds(self, n: u64) -> String {
        match self {
            Self::English if n == 1 => "1 second".to_string(),
            Self::English => format!("{n} seconds"),
            Self::Japanese => format!("{n}秒"),
        }
    }
}

/// Split a duration into (minutes mod 60, seconds, milliseconds)
fn split(duration_ms: u64) -> (u64, u64, u64) {
    let minutes = (duration_ms / 60_000) % 60;
    let seconds = (duration_ms / 1000) % 60;
    let millis = duration_ms % 1000;
    (minutes, seconds, millis)
}

/// Format milliseconds as "M:SS.mmm"
pub fn format_display(duration_ms: u64) -> String {
    let (m, s, ms) = split(duration_ms);
    format!("{}:{:02}.{:03}", m, s, ms)
}

/// Format a lap as "[Lap N] M:SS.mmm"
pub fn format_lap_label(lap_number: u32, duration_ms: u64) -> String {
    format!("[Lap {}] {}", lap_number, format_display(duration_ms))
}

/// Build the spoken phrase for a duration.
///
/// Returns an empty string for negative input, meaning there is nothing to
/// speak. Millisecond digits are emitted as separate tokens so the engine
/// reads `230` as "two three zero".
pub fn format_speech(duration_ms: i64, locale: SpeechLocale) -> String {
    if duration_ms < 0 {
        return String::new();
    }

    let (minutes, seconds, millis) = split(duration_ms as u64);
    // Checked after the minute wrap, so whole hours read as zero too
    if (minutes, seconds, millis) == (0, 0, 0) {
        return locale.seconds(0);
    }

    let mut parts = vec![locale.minutes(minutes)];

    if minutes > 0 && seconds == 0 && millis == 0 {
        parts.push(locale.seconds(0));
    } else if seconds > 0 || minutes == 0 {
        parts.push(locale.seconds(seconds));
    }

    if millis > 0 {
        parts.extend(format!("{:03}", millis).chars().map(String::from));
    }

    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const EN: SpeechLocale = SpeechLocale::English;

    #[test]
    fn test_format_display() {
        assert_eq!(format_display(0), "0:00.000");
        assert_eq!(format_display(61_234), "1:01.234");
        assert_eq!(format_display(9_005), "0:09.005");
        assert_eq!(format_display(59 * 60_000 + 59_999), "59:59.999");
    }

    #[test]
    fn test_format_display_wraps_minutes_at_one_hour() {
        assert_eq!(format_display(3_600_000), "0:00.000");
        assert_eq!(format_display(3_661_000), "1:01.000");
    }

    #[test]
    fn test_format_lap_label() {
        assert_eq!(format_lap_label(1, 0), "[Lap 1] 0:00.000");
        assert_eq!(format_lap_label(12, 61_234), "[Lap 12] 1:01.234");
    }

    #[test]
    fn test_speech_negative_is_empty() {
        assert_eq!(format_speech(-1, EN), "");
        assert_eq!(format_speech(-60_000, SpeechLocale::Japanese), "");
    }

    #[test]
    fn test_speech_zero() {
        assert_eq!(format_speech(0, EN), "0 seconds");
        assert_eq!(format_speech(0, SpeechLocale::Japanese), "0秒");
    }

    #[test]
    fn test_speech_whole_hours_wrap_to_zero() {
        assert_eq!(format_speech(3_600_000, SpeechLocale::Japanese), "0秒");
        assert_eq!(format_speech(7_200_000, EN), "0 seconds");
        assert_eq!(format_speech(3_660_000, EN), "1 minute 0 seconds");
    }

    #[test]
    fn test_speech_whole_minute_and_second() {
        assert_eq!(format_speech(61_000, EN), "1 minute 1 second");
        assert_eq!(format_speech(125_000, EN), "2 minutes 5 seconds");
    }

    #[test]
    fn test_speech_exact_minutes_say_zero_seconds() {
        assert_eq!(format_speech(60_000, EN), "1 minute 0 seconds");
        assert_eq!(format_speech(180_000, SpeechLocale::Japanese), "3分 0秒");
    }

    #[test]
    fn test_speech_millisecond_digits_are_separate_tokens() {
        assert_eq!(format_speech(61_230, EN), "1 minute 1 second 2 3 0");
        assert_eq!(format_speech(5_007, EN), "0 minutes 5 seconds 0 0 7");
    }

    #[test]
    fn test_speech_sub_second_still_says_zero_seconds() {
        assert_eq!(format_speech(450, EN), "0 minutes 0 seconds 4 5 0");
    }

    #[test]
    fn test_speech_minutes_with_only_millis_skip_seconds() {
        assert_eq!(format_speech(60_120, EN), "1 minute 1 2 0");
    }

    #[test]
    fn test_speech_japanese() {
        assert_eq!(format_speech(61_230, SpeechLocale::Japanese), "1分 1秒 2 3 0");
    }

    #[test]
    fn test_locale_from_tag() {
        assert_eq!(SpeechLocale::from_tag("ja-JP"), SpeechLocale::Japanese);
        assert_eq!(SpeechLocale::from_tag("ja_JP.UTF-8"), SpeechLocale::Japanese);
        assert_eq!(SpeechLocale::from_tag("en-US"), SpeechLocale::English);
        assert_eq!(SpeechLocale::from_tag("de"), SpeechLocale::English);
        assert_eq!(SpeechLocale::from_tag(""), SpeechLocale::English);
    }
}
