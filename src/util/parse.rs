use crate::error::{Error, ParseIntError};

/// Parses an `i64` from the bytes given, which must all be ASCII digits.
///
/// Unlike `str::parse`, no sign is permitted. Every number this crate
/// parses is an unsigned datetime field.
pub(crate) fn i64(bytes: &[u8]) -> Result<i64, Error> {
    if bytes.is_empty() {
        return Err(ParseIntError::NoDigitsFound.into());
    }
    let mut n: i64 = 0;
    for &byte in bytes {
        if !byte.is_ascii_digit() {
            return Err(ParseIntError::InvalidDigit(byte).into());
        }
        let digit = i64::from(byte - b'0');
        n = n
            .checked_mul(10)
            .and_then(|n| n.checked_add(digit))
            .ok_or(ParseIntError::TooBig)
            .map_err(Error::from)?;
    }
    Ok(n)
}

/// Splits the given input into two slices at the offset given.
///
/// If the offset is greater than the length of the input, then `None` is
/// returned.
pub(crate) fn split(input: &[u8], at: usize) -> Option<(&[u8], &[u8])> {
    if at > input.len() {
        None
    } else {
        Some(input.split_at(at))
    }
}
