use chrono::{Duration, NaiveDate, NaiveDateTime};

/// Day zero of spreadsheet date serials. Anchoring on 1899-12-30 instead of
/// 1900-01-01 absorbs the phantom 1900-02-29 of the original format.
pub const SERIAL_EPOCH: (i32, u32, u32) = (1899, 12, 30);

const MILLIS_PER_DAY: f64 = 86_400_000.0;
// 9999-12-31
const MAX_SERIAL: f64 = 2_958_465.0;

/// Converts a spreadsheet serial (days since the epoch, fraction = time of
/// day) to a calendar date-time. Serials before the epoch are rejected.
pub fn serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !(0.0..=MAX_SERIAL).contains(&serial) {
        return None;
    }
    let (year, month, day) = SERIAL_EPOCH;
    let epoch = NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(0, 0, 0)?;
    let millis = (serial * MILLIS_PER_DAY).round() as i64;
    epoch.checked_add_signed(Duration::milliseconds(millis))
}

#[cfg(test)]
mod tests {
    use super::serial_to_datetime;
    use chrono::NaiveDate;

    #[test]
    fn serial_counts_days_from_epoch() {
        let dt = serial_to_datetime(45.0).unwrap();
        assert_eq!(dt.date(), NaiveDate::from_ymd_opt(1900, 2, 13).unwrap());
        let dt = serial_to_datetime(45458.0).unwrap();
        assert_eq!(dt.date(), NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
    }

    #[test]
    fn serial_fraction_is_time_of_day() {
        let dt = serial_to_datetime(45458.75).unwrap();
        assert_eq!(dt.format("%H:%M").to_string(), "18:00");
    }

    #[test]
    fn serial_rejects_non_finite_and_out_of_range() {
        assert!(serial_to_datetime(f64::NAN).is_none());
        assert!(serial_to_datetime(f64::INFINITY).is_none());
        assert!(serial_to_datetime(1e12).is_none());
    }

    #[test]
    fn serial_rejects_days_before_epoch() {
        assert!(serial_to_datetime(-1.0).is_none());
        assert!(serial_to_datetime(-700_000.0).is_none());
        assert!(serial_to_datetime(-1_000_000.0).is_none());
        let dt = serial_to_datetime(0.0).unwrap();
        assert_eq!(dt.date(), NaiveDate::from_ymd_opt(1899, 12, 30).unwrap());
    }
}
