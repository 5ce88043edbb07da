use chrono::{DateTime, Utc};

use crate::models::BackupUser;

/// Backups this close to expiry are flagged in the listing.
pub const EXPIRING_SOON_DAYS: i64 = 7;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Whole days left before `expires_at`, rounded up and never negative.
///
/// An unparseable timestamp counts as already expired.
pub fn days_remaining(expires_at: &str, now: DateTime<Utc>) -> i64 {
    let Ok(expires) = DateTime::parse_from_rfc3339(expires_at) else {
        log::debug!("Unparseable backup expiry: {expires_at}");
        return 0;
    };
    let diff_ms = (expires.with_timezone(&Utc) - now).num_milliseconds();
    if diff_ms <= 0 {
        return 0;
    }
    (diff_ms + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY
}

pub fn is_expiring_soon(backup: &BackupUser, now: DateTime<Utc>) -> bool {
    days_remaining(&backup.expires_at, now) <= EXPIRING_SOON_DAYS
}

pub fn expiring_soon_count(backups: &[BackupUser], now: DateTime<Utc>) -> usize {
    backups.iter().filter(|b| is_expiring_soon(b, now)).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserData;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 12, 1, 12, 0, 0).unwrap()
    }

    fn backup(expires_at: &str) -> BackupUser {
        BackupUser {
            id: "1@s.whatsapp.net".to_string(),
            data: UserData::default(),
            deleted_at: "2024-11-01T12:00:00Z".to_string(),
            expires_at: expires_at.to_string(),
        }
    }

    #[test]
    fn partial_days_round_up() {
        assert_eq!(days_remaining("2024-12-01T13:00:00Z", now()), 1);
        assert_eq!(days_remaining("2024-12-02T12:00:00Z", now()), 1);
        assert_eq!(days_remaining("2024-12-02T12:00:01Z", now()), 2);
        assert_eq!(days_remaining("2024-12-31T12:00:00Z", now()), 30);
    }

    #[test]
    fn past_and_invalid_dates_clamp_to_zero() {
        assert_eq!(days_remaining("2024-11-20T00:00:00Z", now()), 0);
        assert_eq!(days_remaining("2024-12-01T12:00:00Z", now()), 0);
        assert_eq!(days_remaining("amanhã", now()), 0);
    }

    #[test]
    fn offsets_are_respected() {
        // 09:00-03:00 is 12:00 UTC, exactly one day later
        assert_eq!(days_remaining("2024-12-02T09:00:00-03:00", now()), 1);
    }

    #[test]
    fn counts_backups_within_a_week() {
        let backups = vec![
            backup("2024-12-03T12:00:00Z"),
            backup("2024-12-08T12:00:00Z"),
            backup("2024-12-20T12:00:00Z"),
            backup("garbage"),
        ];
        assert!(is_expiring_soon(&backups[1], now()));
        assert!(!is_expiring_soon(&backups[2], now()));
        assert_eq!(expiring_soon_count(&backups, now()), 3);
    }
}
