/*!
Format inference, parsing and printing.

The entry point for most callers is [`DateTime::parse`](crate::civil::DateTime::parse)
and the `Display` impl on [`DateTime`](crate::civil::DateTime); the pieces
they are built from live here:

* [`align()`] reconciles a raw datetime string with the canonical
fixed-width template, producing an [`Alignment`]: a symbolic pattern that
preserves the caller's separators, and the zero-padded literal that
pattern applies to.
* [`pattern`] executes format and parse operations against compiled
symbolic patterns.

# Example

```
use snapdate::fmt::align;

let alignment = align("2020.1.5 9:5")?;
assert_eq!(alignment.pattern(), "yyyy.MM.dd HH:mm");
assert_eq!(alignment.literal(), "2020.01.05 09:05");

# Ok::<(), snapdate::Error>(())
```
*/

use alloc::{string::String, vec::Vec};

use crate::{
    error::{err, Error},
    util::array_str::ArrayStr,
};

use self::util::{Decimal, DecimalFormatter};

pub use self::align::{align, Alignment};

mod align;
pub mod pattern;
#[cfg(feature = "serde")]
mod serde;
pub(crate) mod util;

/// The canonical symbolic pattern, `yyyy/MM/dd HH:mm:ss:SSS`.
///
/// Every inferred pattern is this string, possibly truncated at a field
/// boundary, with some separators replaced by the caller's own.
pub const CANONICAL_PATTERN: &str = self::align::SYMBOL_TEMPLATE;

/// A trait for objects that can be written to by this crate's printers.
///
/// This is essentially a fallible version of `core::fmt::Write`, so that
/// printing into a caller-provided buffer can report a capacity problem as
/// a regular [`Error`].
pub trait Write {
    /// Write the given string to this writer, returning an error if it
    /// could not be written.
    fn write_str(&mut self, string: &str) -> Result<(), Error>;

    /// Write the given character to this writer, returning an error if it
    /// could not be written.
    #[inline]
    fn write_char(&mut self, char: char) -> Result<(), Error> {
        self.write_str(char.encode_utf8(&mut [0; 4]))
    }
}

impl Write for String {
    #[inline]
    fn write_str(&mut self, string: &str) -> Result<(), Error> {
        self.push_str(string);
        Ok(())
    }
}

impl Write for Vec<u8> {
    #[inline]
    fn write_str(&mut self, string: &str) -> Result<(), Error> {
        self.extend_from_slice(string.as_bytes());
        Ok(())
    }
}

impl<W: Write> Write for &mut W {
    fn write_str(&mut self, string: &str) -> Result<(), Error> {
        (**self).write_str(string)
    }

    #[inline]
    fn write_char(&mut self, char: char) -> Result<(), Error> {
        (**self).write_char(char)
    }
}

impl<const N: usize> Write for ArrayStr<N> {
    fn write_str(&mut self, string: &str) -> Result<(), Error> {
        if self.push_str(string) {
            Ok(())
        } else {
            Err(err!("buffer with capacity {capacity} is full", capacity = N))
        }
    }
}

/// An adapter for `core::fmt::Write` implementations.
///
/// This is how the `Display` impls in this crate print through the same
/// machinery as everything else.
#[derive(Clone, Debug)]
pub struct FmtWrite<W>(pub W);

impl<W: core::fmt::Write> Write for FmtWrite<W> {
    #[inline]
    fn write_str(&mut self, string: &str) -> Result<(), Error> {
        self.0
            .write_str(string)
            .map_err(|_| err!("an underlying formatter failed"))
    }
}

pub(crate) trait WriteExt: Write {
    /// Write the given number as a decimal using ASCII digits to this
    /// buffer. The given formatter controls the zero padding.
    #[inline]
    fn write_int(
        &mut self,
        formatter: &DecimalFormatter,
        n: i64,
    ) -> Result<(), Error> {
        self.write_decimal(&Decimal::new(formatter, n))
    }

    /// Write the given decimal number to this buffer.
    #[inline]
    fn write_decimal(&mut self, decimal: &Decimal) -> Result<(), Error> {
        self.write_str(decimal.as_str())
    }
}

impl<W: Write> WriteExt for W {}
