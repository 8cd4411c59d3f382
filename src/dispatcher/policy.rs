/*
 * Time-of-day service policy.
 *
 * Reduced service (weekends and the night window) parks every elevator that
 * is not always-on. Rush hours send idle elevators to where the crowd will
 * be: the lobby in the morning, the top floor in the evening.
 */
use chrono::{Datelike, NaiveDateTime, Timelike};

use crate::config::PolicyConfig;
use crate::shared::Floor;

pub fn is_reduced_service(now: &NaiveDateTime, policy: &PolicyConfig) -> bool {
    policy.weekend_days.contains(&now.weekday()) || policy.off_hours.contains(now.hour())
}

/// Floor idle elevators are sent to at this time, if any.
pub fn anticipatory_floor(now: &NaiveDateTime, policy: &PolicyConfig, n_floors: Floor) -> Option<Floor> {
    let hour = now.hour();
    if policy.morning_rush.contains(hour) {
        Some(policy.morning_rush_floor)
    } else if policy.evening_rush.contains(hour) {
        Some(n_floors)
    } else {
        None
    }
}

#[cfg(test)]
mod policy_tests {
    use super::*;
    use chrono::NaiveDate;

    // 2024-05-06 is a Monday, 2024-05-11 a Saturday
    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, day)
            .and_then(|date| date.and_hms_opt(hour, minute, 0))
            .unwrap()
    }

    #[test]
    fn test_weekday_daytime_is_full_service() {
        let policy = PolicyConfig::default();

        for hour in 6..22 {
            assert!(!is_reduced_service(&at(6, hour, 0), &policy), "hour {}", hour);
        }
    }

    #[test]
    fn test_night_is_reduced_service() {
        let policy = PolicyConfig::default();

        for hour in [22, 23, 0, 1, 5] {
            assert!(is_reduced_service(&at(7, hour, 30), &policy), "hour {}", hour);
        }
    }

    #[test]
    fn test_weekend_is_reduced_service_all_day() {
        let policy = PolicyConfig::default();

        assert!(is_reduced_service(&at(11, 12, 0), &policy));
        assert!(is_reduced_service(&at(12, 9, 0), &policy));
    }

    #[test]
    fn test_rush_hours_pick_target_floor() {
        let policy = PolicyConfig::default();

        assert_eq!(anticipatory_floor(&at(6, 8, 0), &policy, 30), Some(1));
        assert_eq!(anticipatory_floor(&at(6, 9, 59), &policy, 30), Some(1));
        assert_eq!(anticipatory_floor(&at(6, 10, 0), &policy, 30), None);
        assert_eq!(anticipatory_floor(&at(6, 16, 15), &policy, 30), Some(30));
        assert_eq!(anticipatory_floor(&at(6, 17, 59), &policy, 12), Some(12));
        assert_eq!(anticipatory_floor(&at(6, 18, 0), &policy, 30), None);
        assert_eq!(anticipatory_floor(&at(6, 13, 0), &policy, 30), None);
    }
}
