use chrono::{Datelike, Timelike, Weekday};

use crate::width::text_width;

pub const SECONDS_PER_DAY: u32 = 86_400;

const BAR_FILLED: char = '█';
const BAR_EMPTY: char = '░';
const RESET: &str = "\x1b[0m";

/// Whether the sun is up, by local hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayPhase {
    Day,
    Night,
}

impl DayPhase {
    pub fn icon(self) -> &'static str {
        match self {
            DayPhase::Day => "🌞",
            DayPhase::Night => "🌙",
        }
    }
}

/// Sun from 06:00 up to (not including) 18:00, moon otherwise.
pub fn day_phase<T: Timelike>(t: &T) -> DayPhase {
    if (6..18).contains(&t.hour()) {
        DayPhase::Day
    } else {
        DayPhase::Night
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusinessStatus {
    Open,
    Closed,
}

impl BusinessStatus {
    pub fn indicator(self) -> &'static str {
        match self {
            BusinessStatus::Open => "🟢",
            BusinessStatus::Closed => "🔴",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BusinessStatus::Open => "Business hours",
            BusinessStatus::Closed => "After hours",
        }
    }

    pub fn is_open(self) -> bool {
        matches!(self, BusinessStatus::Open)
    }
}

/// Open Monday through Friday, 09:00 through 16:59:59.
pub fn business_hours<T: Datelike + Timelike>(t: &T) -> BusinessStatus {
    let weekday = !matches!(t.weekday(), Weekday::Sat | Weekday::Sun);
    if weekday && (9..17).contains(&t.hour()) {
        BusinessStatus::Open
    } else {
        BusinessStatus::Closed
    }
}

/// Color band of the day-progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressBand {
    Green,
    Yellow,
    Red,
}

impl ProgressBand {
    fn for_hour(hour: u32) -> Self {
        match hour {
            5..=16 => ProgressBand::Green,
            17..=20 => ProgressBand::Yellow,
            _ => ProgressBand::Red,
        }
    }

    pub fn ansi(self) -> &'static str {
        match self {
            ProgressBand::Green => "\x1b[32m",
            ProgressBand::Yellow => "\x1b[33m",
            ProgressBand::Red => "\x1b[31m",
        }
    }
}

/// How much of the local calendar day has elapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayProgress {
    elapsed_secs: u32,
    band: ProgressBand,
}

impl DayProgress {
    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    pub fn remaining_secs(&self) -> u32 {
        SECONDS_PER_DAY - self.elapsed_secs
    }

    /// Elapsed fraction in `[0, 1)`.
    pub fn fraction(&self) -> f64 {
        self.elapsed_secs as f64 / SECONDS_PER_DAY as f64
    }

    pub fn band(&self) -> ProgressBand {
        self.band
    }

    /// `"{H}h {M}m left"`, truncated to whole minutes.
    pub fn remaining_text(&self) -> String {
        let remaining = self.remaining_secs();
        format!("{}h {}m left", remaining / 3600, (remaining % 3600) / 60)
    }
}

pub fn day_progress<T: Timelike>(t: &T) -> DayProgress {
    DayProgress {
        elapsed_secs: t.num_seconds_from_midnight().min(SECONDS_PER_DAY - 1),
        band: ProgressBand::for_hour(t.hour()),
    }
}

/// Render `[████░░░░] 7h 12m left` into `total_width` columns.
///
/// Brackets, one separating space, and the remaining-time text are reserved
/// first; the track gets whatever is left, never less than zero.
pub fn progress_bar<T: Timelike>(t: &T, total_width: usize) -> String {
    let progress = day_progress(t);
    let remaining = progress.remaining_text();
    let reserved = 2 + 1 + text_width(&remaining);
    let track = total_width.saturating_sub(reserved);
    let filled = ((track as f64) * progress.fraction()).floor() as usize;
    let filled = filled.min(track);

    let mut bar = String::with_capacity(track * 3 + remaining.len() + 16);
    bar.push('[');
    if filled > 0 {
        bar.push_str(progress.band().ansi());
        bar.extend(std::iter::repeat(BAR_FILLED).take(filled));
        bar.push_str(RESET);
    }
    bar.extend(std::iter::repeat(BAR_EMPTY).take(track - filled));
    bar.push(']');
    bar.push(' ');
    bar.push_str(&remaining);
    bar
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::width::display_width;
    use chrono::{NaiveDate, NaiveDateTime};

    // 2024-01-01 is a Monday.
    fn at(day: u32, h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn day_phase_boundaries() {
        assert_eq!(day_phase(&at(1, 5, 59, 59)), DayPhase::Night);
        assert_eq!(day_phase(&at(1, 6, 0, 0)), DayPhase::Day);
        assert_eq!(day_phase(&at(1, 17, 59, 59)), DayPhase::Day);
        assert_eq!(day_phase(&at(1, 18, 0, 0)), DayPhase::Night);
    }

    #[test]
    fn business_hours_weekdays() {
        assert_eq!(business_hours(&at(1, 8, 59, 59)), BusinessStatus::Closed);
        assert_eq!(business_hours(&at(1, 9, 0, 0)), BusinessStatus::Open);
        assert_eq!(business_hours(&at(5, 16, 59, 59)), BusinessStatus::Open);
        assert_eq!(business_hours(&at(1, 17, 0, 0)), BusinessStatus::Closed);
    }

    #[test]
    fn business_hours_closed_on_weekends() {
        // 2024-01-06 Saturday, 2024-01-07 Sunday.
        for day in [6, 7] {
            for hour in 0..24 {
                assert_eq!(business_hours(&at(day, hour, 30, 0)), BusinessStatus::Closed);
            }
        }
    }

    #[test]
    fn progress_at_midnight() {
        let progress = day_progress(&at(1, 0, 0, 0));
        assert_eq!(progress.fraction(), 0.0);
        assert_eq!(progress.remaining_text(), "24h 0m left");
        assert_eq!(progress.band(), ProgressBand::Red);
    }

    #[test]
    fn progress_at_noon_and_last_second() {
        assert_eq!(day_progress(&at(1, 12, 0, 0)).fraction(), 0.5);
        let last = day_progress(&at(1, 23, 59, 59));
        assert_eq!(last.remaining_text(), "0h 0m left");
        assert!(last.fraction() < 1.0);
    }

    #[test]
    fn remaining_text_truncates_minutes() {
        // 86400 - 37230 = 49170s = 13h 39m 30s
        assert_eq!(day_progress(&at(1, 10, 20, 30)).remaining_text(), "13h 39m left");
    }

    #[test]
    fn bands_follow_hour_ranges() {
        assert_eq!(day_progress(&at(1, 4, 59, 0)).band(), ProgressBand::Red);
        assert_eq!(day_progress(&at(1, 5, 0, 0)).band(), ProgressBand::Green);
        assert_eq!(day_progress(&at(1, 17, 0, 0)).band(), ProgressBand::Yellow);
        assert_eq!(day_progress(&at(1, 20, 59, 0)).band(), ProgressBand::Yellow);
        assert_eq!(day_progress(&at(1, 21, 0, 0)).band(), ProgressBand::Red);
    }

    #[test]
    fn bar_fills_half_the_track_at_noon() {
        let bar = progress_bar(&at(1, 12, 0, 0), 40);
        // "12h 0m left" is 11 columns, leaving a 26-column track.
        assert_eq!(bar.matches(BAR_FILLED).count(), 13);
        assert_eq!(bar.matches(BAR_EMPTY).count(), 13);
        assert!(bar.contains(ProgressBand::Green.ansi()));
        assert_eq!(display_width(&bar), 40);
    }

    #[test]
    fn bar_fills_its_row_exactly() {
        for width in 15..80 {
            let bar = progress_bar(&at(1, 7, 45, 0), width);
            assert_eq!(display_width(&bar), width, "width {width}");
        }
    }

    #[test]
    fn bar_track_clamps_to_zero() {
        let bar = progress_bar(&at(1, 12, 0, 0), 5);
        assert_eq!(bar, "[] 12h 0m left");
    }
}
