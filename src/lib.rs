/*!
A lenient datetime parser that infers the format of its input.

Given a datetime string whose fields may be written with or without leading
zeros, with any separator characters and with any trailing precision, this
crate figures out which format the caller meant, pads the string onto a
canonical fixed-width template and parses it. The inferred format keeps the
caller's own separators, so it can be used to render values back in the same
shape they arrived in.

The canonical template family is `yyyy/MM/dd HH:mm:ss:SSS`: a four digit
year, two digits each for month, day, hour, minute and second, and three
digits of milliseconds. Inputs may stop early at any field boundary and may
squeeze any separator-delimited field down to fewer digits.

# Example

```
use snapdate::civil::{datetime, DateTime};

let dt = DateTime::parse("2024-7-15 9:5:3")?;
assert_eq!(dt, datetime(2024, 7, 15, 9, 5, 3, 0));

// Rendering elides trailing all-zero fields.
assert_eq!(dt.to_string(), "2024/07/15 09:05:03");
assert_eq!(datetime(2024, 7, 15, 0, 0, 0, 0).to_string(), "2024/07/15");

# Ok::<(), snapdate::Error>(())
```

# Example: inspecting the inferred format

```
use snapdate::fmt::align;

let alignment = align("2020/1/5")?;
assert_eq!(alignment.pattern(), "yyyy/MM/dd");
assert_eq!(alignment.literal(), "2020/01/05");

# Ok::<(), snapdate::Error>(())
```

# Crate features

* **std** (enabled by default) - Adds a `std::error::Error` trait
implementation for this crate's error type. Otherwise, this crate only
depends on `core` and `alloc`.
* **logging** - Emits some log messages via the [`log`] crate, mostly traces
of which pattern was inferred for which input.
* **serde** - Adds `serde::Serialize` and `serde::Deserialize` trait
implementations for [`civil::DateTime`].

[`log`]: https://docs.rs/log
*/

#![no_std]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![warn(missing_debug_implementations)]
#![warn(missing_docs)]

#[cfg(any(test, feature = "std"))]
extern crate std;

extern crate alloc;

pub use crate::error::Error;

#[macro_use]
mod logging;

pub mod civil;
mod error;
pub mod fmt;
mod util;
