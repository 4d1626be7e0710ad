//! Compiled-in table of Islamic observances keyed by Hijri month and day.

use serde::Serialize;

/// A recurring observance on a fixed Hijri date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IslamicEvent {
    pub hijri_month: u32,
    pub hijri_day: u32,
    pub name: &'static str,
    pub description: &'static str,
    pub emoji: &'static str,
}

const CRESCENT: &str = "🌙";

const fn event(
    hijri_month: u32,
    hijri_day: u32,
    name: &'static str,
    description: &'static str,
    emoji: &'static str,
) -> IslamicEvent {
    IslamicEvent {
        hijri_month,
        hijri_day,
        name,
        description,
        emoji,
    }
}

/// All observances, ordered by month then day.
pub static ISLAMIC_EVENTS: [IslamicEvent; 30] = [
    // Muharram
    event(1, 1, "Islamic New Year", "First day of the Hijri year", "🎉"),
    event(1, 9, "Tasu'a", "Recommended fast on the day before Ashura", "🤲"),
    event(1, 10, "Ashura", "Recommended fast commemorating the deliverance of Musa", "🤲"),
    // Safar
    event(2, 1, "Start of Safar", "Second month of the Hijri calendar", "📅"),
    // Rabi' al-Awwal
    event(3, 12, "Mawlid an-Nabi", "Commemoration of the birth of the Prophet Muhammad ﷺ", "🕌"),
    // Rabi' al-Thani
    event(4, 1, "Start of Rabi' al-Thani", "Fourth month of the Hijri calendar", "📅"),
    // Jumada al-Ula
    event(5, 1, "Start of Jumada al-Ula", "Fifth month of the Hijri calendar", "📅"),
    // Jumada al-Akhirah
    event(6, 1, "Start of Jumada al-Akhirah", "Sixth month of the Hijri calendar", "📅"),
    // Rajab
    event(7, 1, "Start of Rajab", "A sacred month, one of the four forbidden months", "⭐"),
    event(7, 27, "Isra Mi'raj", "The Night Journey and Ascension of the Prophet ﷺ", "✨"),
    // Sha'ban
    event(8, 1, "Start of Sha'ban", "Eighth month of the Hijri calendar", "📅"),
    event(8, 15, "Nisf Sha'ban", "Mid-Sha'ban, the night of forgiveness", "🌕"),
    // Ramadan
    event(9, 1, "Start of Ramadan", "The month of fasting begins", CRESCENT),
    event(9, 17, "Nuzulul Quran", "Commemoration of the first revelation of the Quran", "📖"),
    event(9, 21, "Lailatul Qadr", "Possible Night of Decree", "🌟"),
    event(9, 23, "Lailatul Qadr", "Possible Night of Decree", "🌟"),
    event(9, 25, "Lailatul Qadr", "Possible Night of Decree", "🌟"),
    event(9, 27, "Lailatul Qadr", "Possible Night of Decree", "🌟"),
    event(9, 29, "Lailatul Qadr", "Possible Night of Decree", "🌟"),
    // Shawwal
    event(10, 1, "Start of Shawwal", "Tenth month of the Hijri calendar", "📅"),
    event(10, 1, "Eid al-Fitr", "Festival marking the end of Ramadan", "🎊"),
    event(10, 2, "Eid al-Fitr", "Second day of Eid al-Fitr", "🎊"),
    // Dhu al-Qa'dah
    event(11, 1, "Start of Dhu al-Qa'dah", "A sacred month, preparation for Hajj", "📅"),
    // Dhu al-Hijjah
    event(12, 1, "Start of Dhu al-Hijjah", "Twelfth month of the Hijri calendar", "📅"),
    event(12, 8, "Day of Tarwiyah", "First day of the Hajj rites", "🕋"),
    event(12, 9, "Day of Arafah", "Standing at Arafah, recommended fast", "🤲"),
    event(12, 10, "Eid al-Adha", "Festival of Sacrifice", "🐪"),
    event(12, 11, "Days of Tashriq 1", "Days of eating, drinking and remembrance", "📿"),
    event(12, 12, "Days of Tashriq 2", "Continuation of the days of Tashriq", "📿"),
    event(12, 13, "Days of Tashriq 3", "Last day of Tashriq", "📿"),
];

/// Observances in a Hijri month, in table order.
pub fn events_for_month(hijri_month: u32) -> Vec<&'static IslamicEvent> {
    ISLAMIC_EVENTS
        .iter()
        .filter(|e| e.hijri_month == hijri_month)
        .collect()
}

/// Observances on an exact Hijri month and day, in table order.
pub fn events_on(hijri_month: u32, hijri_day: u32) -> Vec<&'static IslamicEvent> {
    ISLAMIC_EVENTS
        .iter()
        .filter(|e| e.hijri_month == hijri_month && e.hijri_day == hijri_day)
        .collect()
}
