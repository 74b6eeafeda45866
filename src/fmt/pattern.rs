/*!
Formatting and parsing against symbolic patterns.

A pattern is a sequence of field symbol runs (`yyyy`, `MM`, `dd`, `HH`,
`mm`, `ss`, `SSS`) interleaved with literal separator characters, compiled
by [`Pattern::new`]. [`DateTimePrinter`] renders a
[`DateTime`](crate::civil::DateTime) against a pattern and
[`DateTimeParser`] reads one back. Both operations are deterministic and
side-effect free: fields are printed zero-padded at their canonical width
and parsed at exactly that width, and literals are matched exactly.

Printers and parsers are plain `Copy` values with no interior state.
Construct one wherever you need one; there is nothing to cache and nothing
to share between threads.

Most callers never touch this module directly. The facade on `DateTime`
drives it: parsing aligns the input first (see
[`align`](crate::fmt::align())) and then reads the aligned literal back
with the inferred pattern, while formatting renders the canonical pattern
and trims trailing zero fields.
*/

use crate::{
    civil::{Date, DateTime, Time},
    error::{err, Error, ErrorContext, ParseError},
    fmt::{
        align::{self, Unit, FIELDS},
        util::DecimalFormatter,
        Write, WriteExt,
    },
    util::{array_str::ArrayStr, escape, parse},
};

/// A single component of a compiled pattern.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Token {
    /// A datetime field, written at its canonical width.
    Field(Unit),
    /// A literal separator character, matched exactly.
    Literal(char),
}

/// The most tokens a pattern can have: all seven fields with a separator
/// between each adjacent pair.
const MAX_TOKENS: usize = 13;

/// A compiled symbolic pattern.
///
/// Patterns belong to the `yyyy/MM/dd HH:mm:ss:SSS` family: each field
/// symbol must repeat exactly as many times as its canonical width, and
/// any other character is a literal matched (or printed) verbatim. Every
/// pattern produced by [`align`](crate::fmt::align()) compiles.
///
/// # Example
///
/// ```
/// use snapdate::fmt::pattern::Pattern;
///
/// assert!(Pattern::new("yyyy-MM-dd").is_ok());
/// assert!(Pattern::new("HH:mm:ss").is_ok());
/// // Field symbols must be written at canonical width.
/// assert!(Pattern::new("yy-M-d").is_err());
/// ```
#[derive(Clone, Copy, Eq, PartialEq)]
pub struct Pattern {
    tokens: [Token; MAX_TOKENS],
    len: usize,
}

impl Pattern {
    /// Compiles a symbolic pattern.
    ///
    /// # Errors
    ///
    /// This returns an error when the pattern is empty, when a field
    /// symbol run is not exactly its canonical width, or when the pattern
    /// has more components than the canonical template.
    pub fn new(pattern: &str) -> Result<Pattern, Error> {
        let mut compiled =
            Pattern { tokens: [Token::Literal('\0'); MAX_TOKENS], len: 0 };
        let mut chars = pattern.chars().peekable();
        while let Some(ch) = chars.next() {
            let token = match unit_for_symbol(ch) {
                None => Token::Literal(ch),
                Some(unit) => {
                    let mut run = 1;
                    while chars.peek() == Some(&ch) {
                        chars.next();
                        run += 1;
                    }
                    if run != unit.width() {
                        return Err(err!(
                            "field symbol '{ch}' must repeat exactly \
                             {width} times, but repeats {run} times",
                            width = unit.width(),
                        ));
                    }
                    Token::Field(unit)
                }
            };
            if compiled.len == MAX_TOKENS {
                return Err(err!(
                    "pattern {pattern:?} has more than \
                     {MAX_TOKENS} components",
                ));
            }
            compiled.tokens[compiled.len] = token;
            compiled.len += 1;
        }
        if compiled.len == 0 {
            return Err(err!("pattern is empty"));
        }
        Ok(compiled)
    }

    /// Returns the compiled canonical pattern,
    /// [`CANONICAL_PATTERN`](crate::fmt::CANONICAL_PATTERN).
    pub const fn canonical() -> Pattern {
        CANONICAL
    }

    fn tokens(&self) -> impl Iterator<Item = Token> + '_ {
        self.tokens[..self.len].iter().copied()
    }
}

impl core::fmt::Debug for Pattern {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "Pattern(\"")?;
        for token in self.tokens() {
            match token {
                Token::Field(unit) => {
                    for _ in 0..unit.width() {
                        write!(f, "{}", unit.symbol())?;
                    }
                }
                Token::Literal(ch) => write!(f, "{}", ch.escape_debug())?,
            }
        }
        write!(f, "\")")
    }
}

/// The compiled canonical pattern.
const CANONICAL: Pattern = Pattern {
    tokens: [
        Token::Field(Unit::Year),
        Token::Literal('/'),
        Token::Field(Unit::Month),
        Token::Literal('/'),
        Token::Field(Unit::Day),
        Token::Literal(' '),
        Token::Field(Unit::Hour),
        Token::Literal(':'),
        Token::Field(Unit::Minute),
        Token::Literal(':'),
        Token::Field(Unit::Second),
        Token::Literal(':'),
        Token::Field(Unit::Millisecond),
    ],
    len: MAX_TOKENS,
};

fn unit_for_symbol(ch: char) -> Option<Unit> {
    FIELDS.iter().copied().find(|unit| unit.symbol() == ch)
}

/// A printer for civil datetimes.
///
/// A printer is a cheap `Copy` value with no state; create one per call
/// path that needs one rather than arranging to share an instance.
#[derive(Clone, Copy, Debug)]
pub struct DateTimePrinter {
    _private: (),
}

impl DateTimePrinter {
    /// Creates a new printer.
    pub const fn new() -> DateTimePrinter {
        DateTimePrinter { _private: () }
    }

    /// Prints `dt` in its canonical form with trailing all-zero fields
    /// elided: the millisecond field is dropped when it is zero, and the
    /// whole time of day follows it when that is zero too.
    ///
    /// This is what the `Display` impl of
    /// [`DateTime`](crate::civil::DateTime) uses.
    ///
    /// # Example
    ///
    /// ```
    /// use snapdate::{civil::datetime, fmt::pattern::DateTimePrinter};
    ///
    /// let mut buf = String::new();
    /// DateTimePrinter::new()
    ///     .print_datetime(&datetime(2020, 1, 5, 9, 5, 0, 0), &mut buf)?;
    /// assert_eq!(buf, "2020/01/05 09:05:00");
    ///
    /// # Ok::<(), snapdate::Error>(())
    /// ```
    pub fn print_datetime<W: Write>(
        &self,
        dt: &DateTime,
        mut wtr: W,
    ) -> Result<(), Error> {
        // The canonical rendering is pure ASCII, so it fits the template
        // length exactly.
        let mut buf = ArrayStr::<23>::new();
        self.print_pattern(&CANONICAL, dt, &mut buf)?;
        wtr.write_str(align::trim(buf.as_str()))
    }

    /// Prints `dt` against the compiled pattern given, with no trimming.
    ///
    /// Fields are zero-padded to their canonical widths and literals are
    /// written verbatim.
    ///
    /// # Example
    ///
    /// ```
    /// use snapdate::{
    ///     civil::datetime,
    ///     fmt::pattern::{DateTimePrinter, Pattern},
    /// };
    ///
    /// let pattern = Pattern::new("dd.MM.yyyy")?;
    /// let mut buf = String::new();
    /// DateTimePrinter::new()
    ///     .print_pattern(&pattern, &datetime(2020, 1, 5, 0, 0, 0, 0), &mut buf)?;
    /// assert_eq!(buf, "05.01.2020");
    ///
    /// # Ok::<(), snapdate::Error>(())
    /// ```
    pub fn print_pattern<W: Write>(
        &self,
        pattern: &Pattern,
        dt: &DateTime,
        mut wtr: W,
    ) -> Result<(), Error> {
        for token in pattern.tokens() {
            match token {
                Token::Literal(ch) => wtr.write_char(ch)?,
                Token::Field(unit) => {
                    // Every unit width fits in a u8.
                    let width = unit.width() as u8;
                    let formatter = DecimalFormatter::new().padding(width);
                    wtr.write_int(&formatter, field_value(dt, unit))?;
                }
            }
        }
        Ok(())
    }
}

fn field_value(dt: &DateTime, unit: Unit) -> i64 {
    match unit {
        Unit::Year => i64::from(dt.date().year()),
        Unit::Month => i64::from(dt.date().month()),
        Unit::Day => i64::from(dt.date().day()),
        Unit::Hour => i64::from(dt.time().hour()),
        Unit::Minute => i64::from(dt.time().minute()),
        Unit::Second => i64::from(dt.time().second()),
        Unit::Millisecond => i64::from(dt.time().millisecond()),
    }
}

/// A parser for civil datetimes.
///
/// Like [`DateTimePrinter`], a parser is a cheap `Copy` value with no
/// state; there is nothing to cache and nothing to coordinate between
/// threads.
#[derive(Clone, Copy, Debug)]
pub struct DateTimeParser {
    _private: (),
}

impl DateTimeParser {
    /// Creates a new parser.
    pub const fn new() -> DateTimeParser {
        DateTimeParser { _private: () }
    }

    /// Parses a datetime from a string of unknown format.
    ///
    /// The input is first aligned onto the canonical template (see
    /// [`align`](crate::fmt::align())) and the aligned literal is then
    /// read back with the inferred pattern.
    ///
    /// # Errors
    ///
    /// Alignment failures are returned as-is and answer true to
    /// [`Error::is_malformed`](crate::Error::is_malformed). When
    /// alignment succeeds but the input doesn't name a real datetime, the
    /// error answers true to
    /// [`Error::is_parse`](crate::Error::is_parse) and carries the
    /// original input text. A separator that is itself one of the field
    /// symbol letters (`y`, `M`, `d`, `H`, `m`, `s`, `S`) cannot be
    /// expressed in a pattern and is rejected as well.
    ///
    /// # Example
    ///
    /// ```
    /// use snapdate::{civil::datetime, fmt::pattern::DateTimeParser};
    ///
    /// static PARSER: DateTimeParser = DateTimeParser::new();
    ///
    /// let dt = PARSER.parse_datetime("2020-1-5 9:5:3")?;
    /// assert_eq!(dt, datetime(2020, 1, 5, 9, 5, 3, 0));
    ///
    /// # Ok::<(), snapdate::Error>(())
    /// ```
    pub fn parse_datetime(&self, string: &str) -> Result<DateTime, Error> {
        let alignment = align::align(string)?;
        // Inferred patterns compile unless a separator collided with a
        // field symbol letter.
        let pattern = Pattern::new(alignment.pattern())
            .with_context(|| ParseError::new(string))?;
        self.parse_pattern(&pattern, alignment.literal())
            .with_context(|| ParseError::new(string))
    }

    /// Parses a datetime from `input` against the compiled pattern given.
    ///
    /// Each field is read at exactly its canonical width and each literal
    /// must match exactly; no alignment happens here. Fields the pattern
    /// doesn't mention default to January 1 of year 0 and midnight.
    ///
    /// # Errors
    ///
    /// This returns an error when the input doesn't match the pattern,
    /// when it has trailing content the pattern doesn't cover, or when
    /// the parsed field values don't name a real datetime.
    pub fn parse_pattern(
        &self,
        pattern: &Pattern,
        input: &str,
    ) -> Result<DateTime, Error> {
        trace!("parsing {input:?} against pattern {pattern:?}");
        let mut input = input.as_bytes();
        let (mut year, mut month, mut day) = (0i64, 1i64, 1i64);
        let (mut hour, mut minute, mut second, mut millisecond) =
            (0i64, 0i64, 0i64, 0i64);
        for token in pattern.tokens() {
            match token {
                Token::Literal(ch) => {
                    let mut buf = [0u8; 4];
                    let sep = ch.encode_utf8(&mut buf).as_bytes();
                    let Some(rest) = input.strip_prefix(sep) else {
                        return Err(err!(
                            "expected separator '{ch}', but found \
                             {found:?}",
                            ch = ch.escape_debug(),
                            found = escape::Bytes(input),
                        ));
                    };
                    input = rest;
                }
                Token::Field(unit) => {
                    let (digits, rest) = parse::split(input, unit.width())
                        .ok_or_else(|| {
                            err!(
                                "expected {width} digit {name}, but found \
                                 end of input",
                                width = unit.width(),
                                name = unit.name(),
                            )
                        })?;
                    let value = parse::i64(digits).map_err(|err| {
                        err!(
                            "failed to parse {digits:?} as {name} \
                             (a {width} digit integer): {err}",
                            digits = escape::Bytes(digits),
                            name = unit.name(),
                            width = unit.width(),
                        )
                    })?;
                    match unit {
                        Unit::Year => year = value,
                        Unit::Month => month = value,
                        Unit::Day => day = value,
                        Unit::Hour => hour = value,
                        Unit::Minute => minute = value,
                        Unit::Second => second = value,
                        Unit::Millisecond => millisecond = value,
                    }
                    input = rest;
                }
            }
        }
        if !input.is_empty() {
            return Err(err!(
                "parsed datetime, but unparsed input {unparsed:?} remains",
                unparsed = escape::Bytes(input),
            ));
        }
        // Digit counts bound every value, so the narrowing below cannot
        // truncate.
        let date = Date::new(year as i16, month as i8, day as i8)?;
        let time = Time::new(
            hour as i8,
            minute as i8,
            second as i8,
            millisecond as i16,
        )?;
        Ok(DateTime::from_parts(date, time))
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::{String, ToString};

    use crate::civil::datetime;

    use super::*;

    #[test]
    fn canonical_matches_symbol_template() {
        assert_eq!(Pattern::new(align::SYMBOL_TEMPLATE).unwrap(), CANONICAL);
    }

    #[test]
    fn compile_rejects_bad_patterns() {
        assert_eq!(
            Pattern::new("").unwrap_err().to_string(),
            "pattern is empty",
        );
        assert_eq!(
            Pattern::new("yy-MM-dd").unwrap_err().to_string(),
            "field symbol 'y' must repeat exactly 4 times, \
             but repeats 2 times",
        );
        assert!(Pattern::new("yyyy/MM/dd HH:mm:ss:SSSS").is_err());
        assert!(Pattern::new("yyyy - MM - dd - HH - mm").is_err());
    }

    #[test]
    fn print_canonical_with_trimming() {
        let printer = DateTimePrinter::new();
        let mut buf = String::new();
        printer
            .print_datetime(&datetime(2020, 1, 5, 9, 5, 3, 7), &mut buf)
            .unwrap();
        assert_eq!(buf, "2020/01/05 09:05:03:007");

        let mut buf = String::new();
        printer
            .print_datetime(&datetime(2020, 1, 5, 0, 0, 0, 0), &mut buf)
            .unwrap();
        assert_eq!(buf, "2020/01/05");
    }

    #[test]
    fn print_against_custom_pattern() {
        let pattern = Pattern::new("HH:mm:ss").unwrap();
        let mut buf = String::new();
        DateTimePrinter::new()
            .print_pattern(&pattern, &datetime(2020, 1, 5, 9, 5, 3, 0), &mut buf)
            .unwrap();
        assert_eq!(buf, "09:05:03");
    }

    #[test]
    fn parse_aligned_literal() {
        let parser = DateTimeParser::new();
        let pattern = Pattern::new("yyyy-MM-dd").unwrap();
        let dt = parser.parse_pattern(&pattern, "2020-01-05").unwrap();
        assert_eq!(dt, datetime(2020, 1, 5, 0, 0, 0, 0));
    }

    #[test]
    fn parse_rejects_mismatches() {
        let parser = DateTimeParser::new();
        let pattern = Pattern::new("yyyy-MM-dd").unwrap();
        assert_eq!(
            parser.parse_pattern(&pattern, "2020/01/05").unwrap_err().to_string(),
            "expected separator '-', but found \"/01/05\"",
        );
        assert_eq!(
            parser.parse_pattern(&pattern, "2020-01").unwrap_err().to_string(),
            "expected 2 digit day, but found end of input",
        );
        assert_eq!(
            parser.parse_pattern(&pattern, "2020-01-051").unwrap_err().to_string(),
            "parsed datetime, but unparsed input \"1\" remains",
        );
        assert!(parser.parse_pattern(&pattern, "2020-o1-05").is_err());
    }

    #[test]
    fn parse_validates_calendar() {
        let err = DateTimeParser::new()
            .parse_datetime("2020/13/05")
            .unwrap_err();
        assert!(err.is_parse());
        assert!(!err.is_malformed());
        assert_eq!(
            err.to_string(),
            "failed to parse \"2020/13/05\" as a datetime: \
             parameter 'month' with value 13 \
             is not in the required range of 1..=12",
        );

        assert!(DateTimeParser::new().parse_datetime("2021/2/29").is_err());
        assert!(DateTimeParser::new().parse_datetime("2020/2/29").is_ok());
    }

    #[test]
    fn parse_facade_end_to_end() {
        let parser = DateTimeParser::new();
        let cases = [
            ("2020/1/5", datetime(2020, 1, 5, 0, 0, 0, 0)),
            ("2020-01-05", datetime(2020, 1, 5, 0, 0, 0, 0)),
            ("2020/01/05 9:5:3", datetime(2020, 1, 5, 9, 5, 3, 0)),
            ("2020/01/05 09:05:03:007", datetime(2020, 1, 5, 9, 5, 3, 7)),
            ("20200105093012", datetime(2020, 1, 5, 9, 30, 12, 0)),
        ];
        for (input, want) in cases {
            assert_eq!(parser.parse_datetime(input).unwrap(), want, "{input}");
        }
    }

    #[test]
    fn roundtrip_through_inferred_pattern() {
        // Values formatted with an inferred pattern re-parse with it.
        let alignment = crate::fmt::align("2020.1.5 9:5:3").unwrap();
        let pattern = Pattern::new(alignment.pattern()).unwrap();
        let dt = DateTimeParser::new()
            .parse_pattern(&pattern, alignment.literal())
            .unwrap();
        let mut buf = String::new();
        DateTimePrinter::new()
            .print_pattern(&pattern, &dt, &mut buf)
            .unwrap();
        assert_eq!(buf, alignment.literal());
    }
}
