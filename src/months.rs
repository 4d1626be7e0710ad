//! Hijri month names and the months that get visual emphasis.

/// Month names, index 0 = Muharram = month 1.
pub const HIJRI_MONTH_NAMES: [&str; 12] = [
    "Muharram",
    "Safar",
    "Rabi' al-Awwal",
    "Rabi' al-Thani",
    "Jumada al-Ula",
    "Jumada al-Akhirah",
    "Rajab",
    "Sha'ban",
    "Ramadan",
    "Shawwal",
    "Dhu al-Qa'dah",
    "Dhu al-Hijjah",
];

/// Returned for any month outside 1..=12.
pub const UNKNOWN_MONTH: &str = "Unknown";

/// Muharram, Rajab, Ramadan and Dhu al-Hijjah.
pub const SPECIAL_MONTHS: [u32; 4] = [1, 7, 9, 12];

/// Look up the name of a Hijri month.
pub fn month_name(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|idx| HIJRI_MONTH_NAMES.get(idx as usize))
        .copied()
        .unwrap_or(UNKNOWN_MONTH)
}

/// Check if a Hijri month is one of the four highlighted months.
pub fn is_special_month(month: u32) -> bool {
    SPECIAL_MONTHS.contains(&month)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_names_first_and_last() {
        assert_eq!(month_name(1), "Muharram");
        assert_eq!(month_name(9), "Ramadan");
        assert_eq!(month_name(12), "Dhu al-Hijjah");
    }

    #[test]
    fn test_month_name_out_of_range_is_unknown() {
        assert_eq!(month_name(0), UNKNOWN_MONTH);
        assert_eq!(month_name(13), UNKNOWN_MONTH);
        assert_eq!(month_name(u32::MAX), UNKNOWN_MONTH);
    }

    #[test]
    fn test_all_month_names_non_empty() {
        for month in 1..=12 {
            assert!(!month_name(month).is_empty());
            assert_ne!(month_name(month), UNKNOWN_MONTH);
        }
    }

    #[test]
    fn test_special_months_exact_set() {
        let special: Vec<u32> = (1..=12).filter(|m| is_special_month(*m)).collect();
        assert_eq!(special, vec![1, 7, 9, 12]);
    }

    #[test]
    fn test_special_month_out_of_range() {
        assert!(!is_special_month(0));
        assert!(!is_special_month(13));
    }
}
