//! MS-DOS timestamp handling.
//!
//! ZIP headers store modification times as a pair of 16-bit MS-DOS fields:
//!
//! | Field | Bits | Meaning |
//! |-------|------|---------|
//! | time | 15-11 | hour (0-23) |
//! | time | 10-5 | minute (0-59) |
//! | time | 4-0 | second / 2 |
//! | date | 15-9 | year - 1980 |
//! | date | 8-5 | month (1-12) |
//! | date | 4-0 | day (1-31) |
//!
//! The format has two-second resolution, no time zone, and covers the years
//! 1980 through 2107. Values outside that range are clamped when encoding.
//!
//! # Example
//!
//! ```rust
//! use zipmend::DosDateTime;
//!
//! let ts = DosDateTime::from_fields(2024, 3, 15, 10, 30, 45);
//! assert_eq!(ts.to_string(), "2024-03-15 10:30:44");
//! ```

use std::fmt;

use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, Timelike};

const DOS_EPOCH_YEAR: i32 = 1980;
const DOS_MAX_YEAR: i32 = DOS_EPOCH_YEAR + 127;

/// A raw MS-DOS date/time pair as stored in ZIP headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DosDateTime {
    /// Packed time field.
    pub time: u16,
    /// Packed date field.
    pub date: u16,
}

impl DosDateTime {
    /// Wraps raw header fields without validation.
    pub const fn from_raw(time: u16, date: u16) -> Self {
        Self { time, date }
    }

    /// Encodes calendar fields, clamping the year to 1980..=2107.
    ///
    /// Seconds are truncated to even values.
    pub fn from_fields(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> Self {
        if year < DOS_EPOCH_YEAR {
            return Self::from_raw(0, (1 << 5) | 1);
        }
        let year = year.min(DOS_MAX_YEAR);

        let date = (((year - DOS_EPOCH_YEAR) as u16) << 9)
            | (((month & 0x0F) as u16) << 5)
            | (day & 0x1F) as u16;
        let time = (((hour & 0x1F) as u16) << 11)
            | (((minute & 0x3F) as u16) << 5)
            | ((second / 2) & 0x1F) as u16;

        Self::from_raw(time, date)
    }

    /// Encodes a naive (local) date-time.
    pub fn from_naive(value: NaiveDateTime) -> Self {
        Self::from_fields(
            value.year(),
            value.month(),
            value.day(),
            value.hour(),
            value.minute(),
            value.second(),
        )
    }

    /// Returns the current local time in DOS form.
    pub fn now() -> Self {
        Self::from_naive(Local::now().naive_local())
    }

    /// Decodes into a calendar value.
    ///
    /// Returns `None` if the fields do not form a valid date (a zeroed date
    /// field, for example, encodes month 0).
    pub fn to_naive(&self) -> Option<NaiveDateTime> {
        let year = DOS_EPOCH_YEAR + i32::from(self.date >> 9);
        let month = u32::from((self.date >> 5) & 0x0F);
        let day = u32::from(self.date & 0x1F);
        let hour = u32::from(self.time >> 11);
        let minute = u32::from((self.time >> 5) & 0x3F);
        let second = u32::from(self.time & 0x1F) * 2;

        NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, second)
    }
}

impl fmt::Display for DosDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_naive() {
            Some(value) => write!(f, "{}", value.format("%Y-%m-%d %H:%M:%S")),
            None => write!(f, "-"),
        }
    }
}
