use chrono::{NaiveDate, NaiveDateTime};
use derive_more::{Display, FromStr};

///
/// DateTime
/// (naive, second precision or finer)
///

#[derive(Clone, Copy, Debug, Display, Eq, FromStr, Hash, Ord, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct DateTime(NaiveDateTime);

impl DateTime {
    #[must_use]
    pub const fn new(inner: NaiveDateTime) -> Self {
        Self(inner)
    }

    /// Construct from calendar parts; `None` when any part is out of range.
    #[must_use]
    pub fn from_ymd_hms(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        min: u32,
        sec: u32,
    ) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(hour, min, sec))
            .map(Self)
    }

    /// Construct from Unix seconds (UTC).
    #[must_use]
    pub fn from_unix_seconds(secs: i64) -> Option<Self> {
        chrono::DateTime::from_timestamp(secs, 0).map(|dt| Self(dt.naive_utc()))
    }

    #[must_use]
    pub const fn as_naive(&self) -> &NaiveDateTime {
        &self.0
    }

    #[must_use]
    pub fn unix_seconds(&self) -> i64 {
        self.0.and_utc().timestamp()
    }
}

impl From<NaiveDateTime> for DateTime {
    fn from(inner: NaiveDateTime) -> Self {
        Self(inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calendar_parts_out_of_range_are_rejected() {
        assert!(DateTime::from_ymd_hms(2024, 2, 30, 0, 0, 0).is_none());
        assert!(DateTime::from_ymd_hms(2024, 2, 29, 23, 59, 59).is_some());
    }

    #[test]
    fn unix_seconds_round_trip() {
        let dt = DateTime::from_unix_seconds(1_700_000_000).expect("valid timestamp");

        assert_eq!(dt.unix_seconds(), 1_700_000_000);
    }

    #[test]
    fn display_uses_iso_like_layout() {
        let dt = DateTime::from_ymd_hms(2021, 3, 4, 5, 6, 7).expect("valid parts");

        assert_eq!(dt.to_string(), "2021-03-04 05:06:07");
    }

    #[test]
    fn parses_iso_text() {
        let parsed: DateTime = "2021-03-04T05:06:07".parse().expect("iso text");

        assert_eq!(Some(parsed), DateTime::from_ymd_hms(2021, 3, 4, 5, 6, 7));
    }
}
