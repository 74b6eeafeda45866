/*!
Civil datetime value types.

A "civil" datetime is a calendar date and a wall clock time with no time
zone attached. That is the only kind of datetime this crate deals in: the
canonical template family (`yyyy/MM/dd HH:mm:ss:SSS`) has no place to write
an offset, so none is modeled.

The primary type is [`DateTime`], which is just a [`Date`] glued to a
[`Time`]. The free functions [`date`], [`time`] and [`datetime`] are
convenience constructors that panic on invalid components, meant for use
with values known at compile time (mostly tests). The `new` constructors
return an error instead.
*/

use crate::error::Error;

/// Creates a new `Date` value, panicking if the given components are
/// invalid.
///
/// This is a convenience for [`Date::constant`], useful when the components
/// are known at compile time.
///
/// # Example
///
/// ```
/// use snapdate::civil::date;
///
/// let d = date(2024, 7, 15);
/// assert_eq!(d.year(), 2024);
/// ```
pub const fn date(year: i16, month: i8, day: i8) -> Date {
    Date::constant(year, month, day)
}

/// Creates a new `Time` value, panicking if the given components are
/// invalid.
///
/// This is a convenience for [`Time::constant`], useful when the components
/// are known at compile time.
pub const fn time(hour: i8, minute: i8, second: i8, millisecond: i16) -> Time {
    Time::constant(hour, minute, second, millisecond)
}

/// Creates a new `DateTime` value, panicking if the given components are
/// invalid.
///
/// # Example
///
/// ```
/// use snapdate::civil::datetime;
///
/// let dt = datetime(2024, 7, 15, 16, 30, 59, 123);
/// assert_eq!(dt.time().millisecond(), 123);
/// ```
pub const fn datetime(
    year: i16,
    month: i8,
    day: i8,
    hour: i8,
    minute: i8,
    second: i8,
    millisecond: i16,
) -> DateTime {
    DateTime::constant(year, month, day, hour, minute, second, millisecond)
}

/// A date in the Gregorian calendar.
///
/// The year is limited to `0..=9999`, since the canonical template has
/// exactly four year digits and no sign.
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Date {
    year: i16,
    month: i8,
    day: i8,
}

impl Date {
    /// Creates a new `Date` from its components.
    ///
    /// # Errors
    ///
    /// This returns an error when any component is out of range. The range
    /// for the day depends on the month (and, for February, the year).
    ///
    /// # Example
    ///
    /// ```
    /// use snapdate::civil::Date;
    ///
    /// assert!(Date::new(2024, 2, 29).is_ok());
    /// assert!(Date::new(2023, 2, 29).is_err());
    /// assert!(Date::new(2024, 13, 1).is_err());
    /// ```
    pub fn new(year: i16, month: i8, day: i8) -> Result<Date, Error> {
        if !(0..=9999).contains(&year) {
            return Err(Error::range("year", year, 0, 9999));
        }
        if !(1..=12).contains(&month) {
            return Err(Error::range("month", month, 1, 12));
        }
        let max_day = days_in_month(year, month);
        if !(1..=max_day).contains(&day) {
            return Err(Error::range("day", day, 1, max_day));
        }
        Ok(Date { year, month, day })
    }

    /// Creates a new `Date` from its components, panicking if any is out of
    /// range.
    ///
    /// Useful in `const` contexts where the components are known to be
    /// valid. Otherwise use [`Date::new`].
    pub const fn constant(year: i16, month: i8, day: i8) -> Date {
        assert!(0 <= year && year <= 9999, "year is out of range");
        assert!(1 <= month && month <= 12, "month is out of range");
        assert!(
            1 <= day && day <= days_in_month(year, month),
            "day is out of range"
        );
        Date { year, month, day }
    }

    /// Returns the year. Guaranteed to be in `0..=9999`.
    pub fn year(&self) -> i16 {
        self.year
    }

    /// Returns the month. Guaranteed to be in `1..=12`.
    pub fn month(&self) -> i8 {
        self.month
    }

    /// Returns the day. Guaranteed to be in `1..=31`.
    pub fn day(&self) -> i8 {
        self.day
    }

    /// Glues the given wall clock time to this date, panicking if any time
    /// component is out of range.
    ///
    /// # Example
    ///
    /// ```
    /// use snapdate::civil::{date, datetime};
    ///
    /// let dt = date(2024, 7, 15).at(16, 30, 59, 0);
    /// assert_eq!(dt, datetime(2024, 7, 15, 16, 30, 59, 0));
    /// ```
    pub const fn at(
        self,
        hour: i8,
        minute: i8,
        second: i8,
        millisecond: i16,
    ) -> DateTime {
        DateTime {
            date: self,
            time: Time::constant(hour, minute, second, millisecond),
        }
    }
}

impl core::fmt::Debug for Date {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl core::fmt::Display for Date {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "{:04}/{:02}/{:02}", self.year, self.month, self.day)
    }
}

/// A wall clock time with millisecond precision.
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Time {
    hour: i8,
    minute: i8,
    second: i8,
    millisecond: i16,
}

impl Time {
    /// Creates a new `Time` from its components.
    ///
    /// # Errors
    ///
    /// This returns an error when any component is out of range. Note that
    /// a second of `60` (a leap second) is out of range; leap seconds are
    /// not supported.
    pub fn new(
        hour: i8,
        minute: i8,
        second: i8,
        millisecond: i16,
    ) -> Result<Time, Error> {
        if !(0..=23).contains(&hour) {
            return Err(Error::range("hour", hour, 0, 23));
        }
        if !(0..=59).contains(&minute) {
            return Err(Error::range("minute", minute, 0, 59));
        }
        if !(0..=59).contains(&second) {
            return Err(Error::range("second", second, 0, 59));
        }
        if !(0..=999).contains(&millisecond) {
            return Err(Error::range("millisecond", millisecond, 0, 999));
        }
        Ok(Time { hour, minute, second, millisecond })
    }

    /// Creates a new `Time` from its components, panicking if any is out of
    /// range.
    pub const fn constant(
        hour: i8,
        minute: i8,
        second: i8,
        millisecond: i16,
    ) -> Time {
        assert!(0 <= hour && hour <= 23, "hour is out of range");
        assert!(0 <= minute && minute <= 59, "minute is out of range");
        assert!(0 <= second && second <= 59, "second is out of range");
        assert!(
            0 <= millisecond && millisecond <= 999,
            "millisecond is out of range"
        );
        Time { hour, minute, second, millisecond }
    }

    /// Returns the first moment of the day, `00:00:00.000`.
    pub const fn midnight() -> Time {
        Time { hour: 0, minute: 0, second: 0, millisecond: 0 }
    }

    /// Returns the hour. Guaranteed to be in `0..=23`.
    pub fn hour(&self) -> i8 {
        self.hour
    }

    /// Returns the minute. Guaranteed to be in `0..=59`.
    pub fn minute(&self) -> i8 {
        self.minute
    }

    /// Returns the second. Guaranteed to be in `0..=59`.
    pub fn second(&self) -> i8 {
        self.second
    }

    /// Returns the millisecond. Guaranteed to be in `0..=999`.
    pub fn millisecond(&self) -> i16 {
        self.millisecond
    }
}

impl core::fmt::Debug for Time {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}.{:03}",
            self.hour, self.minute, self.second, self.millisecond
        )
    }
}

impl core::fmt::Display for Time {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}:{:03}",
            self.hour, self.minute, self.second, self.millisecond
        )
    }
}

/// A civil datetime: a [`Date`] and a [`Time`].
///
/// This is the type the parse and format facades operate on.
///
/// # Parsing
///
/// [`DateTime::parse`] (also available through [`core::str::FromStr`])
/// accepts anything that aligns to the `yyyy/MM/dd HH:mm:ss:SSS` template
/// family: separators are free-form, fields may drop their leading zeros,
/// and trailing fields may be omitted entirely at any field boundary.
///
/// # Formatting
///
/// The `Display` impl renders the canonical form and elides trailing
/// all-zero fields: first the millisecond field when it is zero, then the
/// whole time of day when that is zero too.
///
/// ```
/// use snapdate::civil::datetime;
///
/// assert_eq!(
///     datetime(2020, 1, 5, 9, 5, 3, 7).to_string(),
///     "2020/01/05 09:05:03:007",
/// );
/// assert_eq!(
///     datetime(2020, 1, 5, 9, 5, 3, 0).to_string(),
///     "2020/01/05 09:05:03",
/// );
/// assert_eq!(datetime(2020, 1, 5, 0, 0, 0, 0).to_string(), "2020/01/05");
/// ```
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct DateTime {
    date: Date,
    time: Time,
}

impl DateTime {
    /// Creates a new `DateTime` from its components.
    ///
    /// # Errors
    ///
    /// This returns an error when any component is out of range, under the
    /// same rules as [`Date::new`] and [`Time::new`].
    pub fn new(
        year: i16,
        month: i8,
        day: i8,
        hour: i8,
        minute: i8,
        second: i8,
        millisecond: i16,
    ) -> Result<DateTime, Error> {
        let date = Date::new(year, month, day)?;
        let time = Time::new(hour, minute, second, millisecond)?;
        Ok(DateTime { date, time })
    }

    /// Creates a new `DateTime` from its components, panicking if any is
    /// out of range.
    pub const fn constant(
        year: i16,
        month: i8,
        day: i8,
        hour: i8,
        minute: i8,
        second: i8,
        millisecond: i16,
    ) -> DateTime {
        DateTime {
            date: Date::constant(year, month, day),
            time: Time::constant(hour, minute, second, millisecond),
        }
    }

    /// Creates a new `DateTime` from a `Date` and a `Time`.
    pub const fn from_parts(date: Date, time: Time) -> DateTime {
        DateTime { date, time }
    }

    /// Returns the date portion of this datetime.
    pub fn date(&self) -> Date {
        self.date
    }

    /// Returns the time portion of this datetime.
    pub fn time(&self) -> Time {
        self.time
    }

    /// Parses a datetime from a string, inferring its format.
    ///
    /// The input must belong to the `yyyy/MM/dd HH:mm:ss:SSS` template
    /// family, but any non-digit characters may serve as separators,
    /// fields may be written without leading zeros, and the input may stop
    /// at any field boundary. Leading and trailing whitespace is *not*
    /// stripped; callers should trim first.
    ///
    /// # Errors
    ///
    /// This returns an error when the input cannot be aligned to the
    /// template ([`Error::is_malformed`]) or when the aligned input does
    /// not name a valid datetime ([`Error::is_parse`]).
    ///
    /// # Example
    ///
    /// ```
    /// use snapdate::civil::{datetime, DateTime};
    ///
    /// let dt = DateTime::parse("2020/1/5")?;
    /// assert_eq!(dt, datetime(2020, 1, 5, 0, 0, 0, 0));
    ///
    /// let dt = DateTime::parse("2020-01-05 9:5:3")?;
    /// assert_eq!(dt, datetime(2020, 1, 5, 9, 5, 3, 0));
    ///
    /// # Ok::<(), snapdate::Error>(())
    /// ```
    pub fn parse(string: &str) -> Result<DateTime, Error> {
        crate::fmt::pattern::DateTimeParser::new().parse_datetime(string)
    }
}

impl core::fmt::Debug for DateTime {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "{:?}T{:?}", self.date, self.time)
    }
}

impl core::fmt::Display for DateTime {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use crate::fmt::{pattern::DateTimePrinter, FmtWrite};

        static P: DateTimePrinter = DateTimePrinter::new();
        P.print_datetime(self, FmtWrite(f)).map_err(|_| core::fmt::Error)
    }
}

impl From<Date> for DateTime {
    fn from(date: Date) -> DateTime {
        DateTime { date, time: Time::midnight() }
    }
}

impl core::str::FromStr for DateTime {
    type Err = Error;

    fn from_str(string: &str) -> Result<DateTime, Error> {
        DateTime::parse(string)
    }
}

/// Returns the number of days in the given month of the given year.
const fn days_in_month(year: i16, month: i8) -> i8 {
    match month {
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 31,
    }
}

const fn is_leap_year(year: i16) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn date_ranges() {
        assert!(Date::new(2024, 1, 31).is_ok());
        assert!(Date::new(2024, 4, 31).is_err());
        assert!(Date::new(2024, 2, 29).is_ok());
        assert!(Date::new(2023, 2, 29).is_err());
        assert!(Date::new(2000, 2, 29).is_ok());
        assert!(Date::new(1900, 2, 29).is_err());
        assert!(Date::new(-1, 1, 1).is_err());
        assert!(Date::new(10_000, 1, 1).is_err());
        assert!(Date::new(2024, 0, 1).is_err());
        assert!(Date::new(2024, 1, 0).is_err());
    }

    #[test]
    fn time_ranges() {
        assert!(Time::new(23, 59, 59, 999).is_ok());
        assert!(Time::new(24, 0, 0, 0).is_err());
        assert!(Time::new(0, 60, 0, 0).is_err());
        assert!(Time::new(0, 0, 60, 0).is_err());
        assert!(Time::new(0, 0, 0, 1000).is_err());
    }

    #[test]
    fn range_error_message() {
        let err = Date::new(2024, 13, 1).unwrap_err();
        assert_eq!(
            err.to_string(),
            "parameter 'month' with value 13 \
             is not in the required range of 1..=12",
        );
        let err = Date::new(2023, 2, 29).unwrap_err();
        assert_eq!(
            err.to_string(),
            "parameter 'day' with value 29 \
             is not in the required range of 1..=28",
        );
    }

    #[test]
    fn composition() {
        let dt = date(2024, 7, 15).at(16, 30, 59, 123);
        assert_eq!(dt.date().year(), 2024);
        assert_eq!(dt.time().millisecond(), 123);
        assert_eq!(dt, datetime(2024, 7, 15, 16, 30, 59, 123));
        assert_eq!(
            DateTime::from(date(2024, 7, 15)),
            datetime(2024, 7, 15, 0, 0, 0, 0),
        );
    }

    #[test]
    fn ordering() {
        assert!(date(2024, 7, 15) < date(2024, 7, 16));
        assert!(
            datetime(2024, 7, 15, 0, 0, 0, 1) > datetime(2024, 7, 15, 0, 0, 0, 0)
        );
    }

    #[test]
    fn debug_forms() {
        let dt = datetime(2020, 1, 5, 9, 5, 3, 7);
        assert_eq!(alloc::format!("{dt:?}"), "2020-01-05T09:05:03.007");
    }

    #[test]
    fn from_str() {
        let dt: DateTime = "2020/1/5 9:5:3".parse().unwrap();
        assert_eq!(dt, datetime(2020, 1, 5, 9, 5, 3, 0));
        assert!("garbage".parse::<DateTime>().is_err());
    }

    #[test]
    fn display_trims_trailing_zeros() {
        let cases = [
            (datetime(2020, 1, 5, 0, 0, 0, 0), "2020/01/05"),
            (datetime(2020, 1, 5, 9, 5, 3, 0), "2020/01/05 09:05:03"),
            (datetime(2020, 1, 5, 9, 5, 3, 7), "2020/01/05 09:05:03:007"),
            // A non-zero millisecond suppresses all trimming.
            (datetime(2020, 1, 5, 0, 0, 0, 7), "2020/01/05 00:00:00:007"),
            // The time of day block is all or nothing.
            (datetime(2020, 1, 5, 0, 0, 3, 0), "2020/01/05 00:00:03"),
        ];
        for (dt, want) in cases {
            assert_eq!(dt.to_string(), want);
        }
    }
}
