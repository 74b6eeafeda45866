use alloc::sync::Arc;

use crate::util::escape;

/// An error that can occur in this crate.
///
/// This crate follows the "one error type" pattern: every fallible public
/// operation returns this type. The most common sources are:
///
/// * An input string that cannot be reconciled with the canonical datetime
/// template at all. See [`Error::is_malformed`].
/// * An input string that aligned fine but doesn't name a real datetime,
/// like a month of `13`. See [`Error::is_parse`].
/// * A field value out of range when constructing a [`civil`](crate::civil)
/// value directly.
///
/// # Introspection is limited
///
/// Other than implementing the [`std::error::Error`] trait when the `std`
/// feature is enabled, the [`core::fmt::Debug`] trait and the
/// [`core::fmt::Display`] trait, this error type currently provides very
/// limited introspection capabilities. The `Error::is_*` predicates cover
/// the two failure stages a caller can meaningfully react to, and nothing
/// more.
#[derive(Clone)]
pub struct Error {
    /// The internal representation of an error.
    ///
    /// The `Arc` makes an `Error` cloneable and makes clones cheap. It also
    /// keeps the size of `Error` down to one word, which matters because
    /// most APIs in this crate return a `Result<T, Error>`.
    inner: Arc<ErrorInner>,
}

#[derive(Debug)]
struct ErrorInner {
    kind: ErrorKind,
    cause: Option<Error>,
}

impl Error {
    /// Creates a new error value from `core::fmt::Arguments`.
    ///
    /// It is expected to use [`format_args!`](format_args) from Rust's
    /// standard library (available in `core`) to create a
    /// `core::fmt::Arguments`. Callers inside this crate use the `err!`
    /// macro instead of calling this directly.
    pub(crate) fn from_args<'a>(message: core::fmt::Arguments<'a>) -> Error {
        Error::from(ErrorKind::Adhoc(AdhocError::from_args(message)))
    }

    /// Creates a new error indicating that a `given` value is out of the
    /// specified `min..=max` range. The given `what` label is used in the
    /// error message as a human readable description of what exactly is out
    /// of range. (e.g., "month")
    #[inline(never)]
    #[cold]
    pub(crate) fn range(
        what: &'static str,
        given: impl Into<i64>,
        min: impl Into<i64>,
        max: impl Into<i64>,
    ) -> Error {
        Error::from(ErrorKind::Range(RangeError::new(what, given, min, max)))
    }

    /// Returns true when this error originated from an input string that
    /// could not be aligned to the canonical datetime template.
    ///
    /// This covers empty and too-short inputs, fields with too many digits,
    /// and misplaced separators. It corresponds to a failure *before* any
    /// calendar validation happens.
    ///
    /// # Example
    ///
    /// ```
    /// use snapdate::civil::DateTime;
    ///
    /// assert!(DateTime::parse("").unwrap_err().is_malformed());
    /// assert!(DateTime::parse("2020/123/05").unwrap_err().is_malformed());
    /// // Aligns fine, fails later:
    /// assert!(!DateTime::parse("2020/13/05").unwrap_err().is_malformed());
    /// ```
    pub fn is_malformed(&self) -> bool {
        matches!(*self.root().kind(), ErrorKind::Align(_))
    }

    /// Returns true when this error originated from an input string that
    /// aligned to the canonical template but does not name a semantically
    /// valid datetime (like a month of `13` or a day of `32`).
    ///
    /// The error's message carries the original input text.
    ///
    /// # Example
    ///
    /// ```
    /// use snapdate::civil::DateTime;
    ///
    /// let err = DateTime::parse("2020/13/05").unwrap_err();
    /// assert!(err.is_parse());
    /// assert!(err.to_string().contains("2020/13/05"));
    /// ```
    pub fn is_parse(&self) -> bool {
        self.chain().any(|err| matches!(*err.kind(), ErrorKind::Parse(_)))
    }

    #[inline(never)]
    #[cold]
    fn context_impl(self, consequent: Error) -> Error {
        let mut err = consequent;
        let inner = Arc::get_mut(&mut err.inner)
            .expect("consequent error must have been just created");
        assert!(inner.cause.is_none(), "cause of consequent must be `None`");
        inner.cause = Some(self);
        err
    }

    /// Returns the root error in this chain.
    fn root(&self) -> &Error {
        // OK because `Error::chain` is guaranteed to return a non-empty
        // iterator.
        self.chain().last().unwrap()
    }

    /// Returns a chain of error values.
    ///
    /// This starts with the most recent error added to the chain. That is,
    /// the highest level context. The last error in the chain is always the
    /// "root" cause: the error closest to the point where something has
    /// gone wrong.
    ///
    /// The iterator returned is guaranteed to yield at least one error.
    fn chain(&self) -> impl Iterator<Item = &Error> {
        let mut err = self;
        core::iter::once(err).chain(core::iter::from_fn(move || {
            err = err.inner.cause.as_ref()?;
            Some(err)
        }))
    }

    /// Returns the kind of this error.
    fn kind(&self) -> &ErrorKind {
        &self.inner.kind
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let mut it = self.chain().peekable();
        while let Some(err) = it.next() {
            core::fmt::Display::fmt(err.kind(), f)?;
            if it.peek().is_some() {
                f.write_str(": ")?;
            }
        }
        Ok(())
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if !f.alternate() {
            core::fmt::Display::fmt(self, f)
        } else {
            f.debug_struct("Error")
                .field("kind", &self.inner.kind)
                .field("cause", &self.inner.cause)
                .finish()
        }
    }
}

/// The underlying kind of a [`Error`].
#[derive(Debug)]
enum ErrorKind {
    Adhoc(AdhocError),
    Align(AlignError),
    Parse(ParseError),
    ParseInt(ParseIntError),
    Range(RangeError),
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ErrorKind::*;

        match *self {
            Adhoc(ref err) => err.fmt(f),
            Align(ref err) => err.fmt(f),
            Parse(ref err) => err.fmt(f),
            ParseInt(ref err) => err.fmt(f),
            Range(ref err) => err.fmt(f),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error { inner: Arc::new(ErrorInner { kind, cause: None }) }
    }
}

/// A generic error message.
///
/// Used for failure modes rare enough that structured variants would be
/// noise: pattern compilation problems and literal/pattern mismatches
/// inside the pattern engine.
struct AdhocError {
    message: alloc::boxed::Box<str>,
}

impl AdhocError {
    fn from_args<'a>(message: core::fmt::Arguments<'a>) -> AdhocError {
        use alloc::string::ToString;

        let message = message.to_string().into_boxed_str();
        AdhocError { message }
    }
}

impl core::fmt::Display for AdhocError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.message, f)
    }
}

impl core::fmt::Debug for AdhocError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Debug::fmt(&self.message, f)
    }
}

/// An error that occurs when an input string cannot be reconciled with the
/// canonical datetime template.
///
/// This is raised by the alignment engine before any calendar validation
/// runs, so a value of this kind always means the *shape* of the input was
/// wrong, never its field values.
#[derive(Clone, Debug)]
pub(crate) enum AlignError {
    Empty,
    TooShort { len: usize },
    ExpectedDigit { field: &'static str, found: char },
    FieldTooWide { field: &'static str },
    TrailingSeparator { found: char },
    TooLong,
}

impl From<AlignError> for Error {
    #[cold]
    #[inline(never)]
    fn from(err: AlignError) -> Error {
        ErrorKind::Align(err).into()
    }
}

impl IntoError for AlignError {
    fn into_error(self) -> Error {
        self.into()
    }
}

impl core::fmt::Display for AlignError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::AlignError::*;

        match *self {
            Empty => write!(f, "datetime string is empty"),
            TooShort { len } => write!(
                f,
                "datetime string is only {len} characters long, \
                 but at least 4 are needed to supply a year",
            ),
            ExpectedDigit { field, found } => write!(
                f,
                "expected digit for {field}, but found '{found}'",
                found = found.escape_debug(),
            ),
            FieldTooWide { field } => {
                write!(f, "too many digits for {field}")
            }
            TrailingSeparator { found } => write!(
                f,
                "trailing separator '{found}' is not followed by a digit",
                found = found.escape_debug(),
            ),
            TooLong => write!(
                f,
                "datetime string continues past millisecond precision",
            ),
        }
    }
}

/// An error that occurs when an aligned datetime string does not name a
/// semantically valid datetime.
///
/// This always wraps a cause describing which field was out of range, and
/// carries the original input text for diagnostics.
#[derive(Debug)]
pub(crate) struct ParseError {
    input: alloc::boxed::Box<str>,
}

impl ParseError {
    pub(crate) fn new(input: &str) -> ParseError {
        ParseError { input: alloc::boxed::Box::from(input) }
    }
}

impl From<ParseError> for Error {
    #[cold]
    #[inline(never)]
    fn from(err: ParseError) -> Error {
        ErrorKind::Parse(err).into()
    }
}

impl IntoError for ParseError {
    fn into_error(self) -> Error {
        self.into()
    }
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "failed to parse {input:?} as a datetime",
            input = escape::Bytes(self.input.as_bytes()),
        )
    }
}

#[derive(Clone, Debug)]
pub(crate) enum ParseIntError {
    NoDigitsFound,
    InvalidDigit(u8),
    TooBig,
}

impl From<ParseIntError> for Error {
    #[cold]
    #[inline(never)]
    fn from(err: ParseIntError) -> Error {
        ErrorKind::ParseInt(err).into()
    }
}

impl IntoError for ParseIntError {
    fn into_error(self) -> Error {
        self.into()
    }
}

impl core::fmt::Display for ParseIntError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ParseIntError::*;

        match *self {
            NoDigitsFound => write!(f, "invalid number, no digits found"),
            InvalidDigit(got) => write!(
                f,
                "invalid digit, expected 0-9 but got {}",
                escape::Byte(got),
            ),
            TooBig => {
                write!(f, "number too big to parse into 64-bit integer")
            }
        }
    }
}

/// An error that occurs when an input value is out of bounds.
///
/// The error message produced by this type will include a name describing
/// which input was out of bounds, the value given and its minimum and
/// maximum allowed values.
#[derive(Debug)]
struct RangeError {
    what: &'static str,
    given: i64,
    min: i64,
    max: i64,
}

impl RangeError {
    fn new(
        what: &'static str,
        given: impl Into<i64>,
        min: impl Into<i64>,
        max: impl Into<i64>,
    ) -> RangeError {
        RangeError {
            what,
            given: given.into(),
            min: min.into(),
            max: max.into(),
        }
    }
}

impl core::fmt::Display for RangeError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let RangeError { what, given, min, max } = *self;
        write!(
            f,
            "parameter '{what}' with value {given} \
             is not in the required range of {min}..={max}",
        )
    }
}

/// A simple trait to encapsulate automatic conversion to `Error`.
///
/// This trait basically exists to make `Error::context` work without
/// needing to rely on public `From` impls, which would otherwise become
/// part of the public API.
pub(crate) trait IntoError {
    fn into_error(self) -> Error;
}

impl IntoError for Error {
    #[inline(always)]
    fn into_error(self) -> Error {
        self
    }
}

/// A trait for contextualizing error values.
///
/// This makes it easy to contextualize either `Error` or
/// `Result<T, Error>`. Specifically, in the latter case, it absolves one of
/// the need to call `map_err` everywhere one wants to add context to an
/// error.
///
/// This trick was borrowed from `anyhow`.
pub(crate) trait ErrorContext<T, E> {
    /// Contextualize the given consequent error with this (`self`) error as
    /// the cause.
    ///
    /// This is equivalent to saying that "consequent is caused by self."
    #[allow(dead_code)]
    fn context(self, consequent: impl IntoError) -> Result<T, Error>;

    /// Like `context`, but hides error construction within a closure.
    ///
    /// This avoids paying the cost of contextual error creation (it
    /// allocates) in the happy path.
    fn with_context<C: IntoError>(
        self,
        consequent: impl FnOnce() -> C,
    ) -> Result<T, Error>;
}

impl<T, E> ErrorContext<T, E> for Result<T, E>
where
    E: IntoError,
{
    fn context(self, consequent: impl IntoError) -> Result<T, Error> {
        self.map_err(|err| {
            err.into_error().context_impl(consequent.into_error())
        })
    }

    fn with_context<C: IntoError>(
        self,
        consequent: impl FnOnce() -> C,
    ) -> Result<T, Error> {
        self.map_err(|err| {
            err.into_error().context_impl(consequent().into_error())
        })
    }
}

macro_rules! err {
    ($($tt:tt)*) => {
        crate::error::Error::from_args(format_args!($($tt)*))
    }
}

pub(crate) use err;

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    // We test that our 'Error' type is the size we expect. This isn't an
    // API guarantee, but if the size increases, we really want to make sure
    // we decide to do that intentionally. So this should be a speed bump.
    #[test]
    fn error_size() {
        let expected_size = core::mem::size_of::<usize>();
        assert_eq!(expected_size, core::mem::size_of::<Error>());
    }

    #[test]
    fn display_joins_chain() {
        let root = Error::range("month", 13, 1, 12);
        let err = Err::<(), Error>(root)
            .context(ParseError::new("2020/13/05"))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "failed to parse \"2020/13/05\" as a datetime: \
             parameter 'month' with value 13 \
             is not in the required range of 1..=12",
        );
    }
}
