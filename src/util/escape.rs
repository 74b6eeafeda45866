/*!
Provides convenience routines for escaping raw bytes in error messages.

Untrusted input winds up quoted inside error messages in this crate, so
control characters and invalid UTF-8 need a readable rendering.
*/

/// Provides a convenient `Display` implementation for a `u8`.
///
/// The `Display` impl treats the byte as ASCII, and emits a human readable
/// representation of it. If the byte isn't ASCII, then it's emitted as a
/// hex escape sequence.
#[derive(Clone, Copy)]
pub(crate) struct Byte(pub(crate) u8);

impl core::fmt::Display for Byte {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if self.0 == b' ' {
            return write!(f, " ");
        }
        for b in core::ascii::escape_default(self.0) {
            write!(f, "{}", char::from(b))?;
        }
        Ok(())
    }
}

impl core::fmt::Debug for Byte {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "\"")?;
        core::fmt::Display::fmt(self, f)?;
        write!(f, "\"")?;
        Ok(())
    }
}

/// Provides a convenient `Display` implementation for `&[u8]`.
///
/// This generally works best when the bytes are presumed to be mostly
/// UTF-8, but will work for anything. Any bytes that aren't UTF-8 are
/// emitted as hex escape sequences.
pub(crate) struct Bytes<'a>(pub(crate) &'a [u8]);

impl<'a> core::fmt::Display for Bytes<'a> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let mut bytes = self.0;
        while !bytes.is_empty() {
            match core::str::from_utf8(bytes) {
                Ok(string) => {
                    write_escaped_str(f, string)?;
                    break;
                }
                Err(err) => {
                    let (valid, rest) = bytes.split_at(err.valid_up_to());
                    // OK because `valid_up_to` marks the end of the longest
                    // valid UTF-8 prefix.
                    let string = core::str::from_utf8(valid).unwrap();
                    write_escaped_str(f, string)?;
                    write!(f, r"\x{:02x}", rest[0])?;
                    bytes = &rest[1..];
                }
            }
        }
        Ok(())
    }
}

impl<'a> core::fmt::Debug for Bytes<'a> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "\"")?;
        core::fmt::Display::fmt(self, f)?;
        write!(f, "\"")?;
        Ok(())
    }
}

fn write_escaped_str(
    f: &mut core::fmt::Formatter,
    string: &str,
) -> core::fmt::Result {
    for ch in string.chars() {
        if ch.is_control() {
            write!(f, "{}", ch.escape_debug())?;
        } else {
            write!(f, "{ch}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use alloc::{format, string::String};

    use super::*;

    #[test]
    fn bytes_plain_and_invalid() {
        assert_eq!(format!("{}", Bytes(b"2020/01/05")), "2020/01/05");
        assert_eq!(format!("{}", Bytes(b"ab\xFFcd")), r"ab\xffcd");
        assert_eq!(format!("{}", Bytes(b"a\nb")), r"a\nb");
    }

    #[test]
    fn bytes_multibyte_separator() {
        let s = String::from("2020年01月05日");
        assert_eq!(format!("{}", Bytes(s.as_bytes())), "2020年01月05日");
    }

    #[test]
    fn byte_escaping() {
        assert_eq!(format!("{}", Byte(b'a')), "a");
        assert_eq!(format!("{}", Byte(b' ')), " ");
        assert_eq!(format!("{}", Byte(0xFF)), r"\xff");
    }
}
