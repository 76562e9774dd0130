//! Wall clock shown on the review form: formatting and tick alignment.
use std::time::Duration;

pub const LANGUAGE_KEY: &str = "language";
pub const SYNC_INTERVAL: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    Ru,
    Zh,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::Ru, Locale::Zh];

    /// Unknown codes are rejected so a foreign value in storage is ignored.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ru" => Some(Locale::Ru),
            "zh" => Some(Locale::Zh),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Locale::Ru => "ru",
            Locale::Zh => "zh",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Locale::Ru => "RU",
            Locale::Zh => "中文",
        }
    }
}

const RU_WEEKDAYS: [&str; 7] = [
    "воскресенье",
    "понедельник",
    "вторник",
    "среда",
    "четверг",
    "пятница",
    "суббота",
];

// Genitive, as used after a day number.
const RU_MONTHS: [&str; 12] = [
    "января",
    "февраля",
    "марта",
    "апреля",
    "мая",
    "июня",
    "июля",
    "августа",
    "сентября",
    "октября",
    "ноября",
    "декабря",
];

const ZH_WEEKDAYS: [&str; 7] = ["星期日", "星期一", "星期二", "星期三", "星期四", "星期五", "星期六"];

/// 24-hour `HH:MM:SS`.
pub fn format_time(hours: u32, minutes: u32, seconds: u32) -> String {
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// Long date without the year. `weekday` counts from Sunday = 0 and
/// `month` from January = 0, matching `Date.getDay()`/`Date.getMonth()`.
pub fn format_date(locale: Locale, weekday: u32, day: u32, month: u32) -> String {
    let weekday = weekday as usize % 7;
    let month = month as usize % 12;
    match locale {
        Locale::Ru => format!("{}, {} {}", RU_WEEKDAYS[weekday], day, RU_MONTHS[month]),
        Locale::Zh => format!("{}月{}日{}", month + 1, day, ZH_WEEKDAYS[weekday]),
    }
}

/// The last interval mark at or before `now_ms`.
pub fn floor_to_interval(now_ms: f64, interval: Duration) -> f64 {
    let step = interval.as_millis() as f64;
    if step <= 0.0 {
        return now_ms;
    }
    (now_ms / step).floor() * step
}

/// Wait until the next interval mark, so every open tab ticks together.
pub fn next_tick_delay(now_ms: f64, interval: Duration) -> Duration {
    let step = interval.as_millis() as f64;
    if step <= 0.0 {
        return interval;
    }
    let elapsed = now_ms - floor_to_interval(now_ms, interval);
    Duration::from_millis((step - elapsed).ceil() as u64)
}
