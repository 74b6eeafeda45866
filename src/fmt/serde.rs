/*!
Serde support.

A [`DateTime`](crate::civil::DateTime) serializes as its canonical
(trimmed) string form and deserializes through the lenient parser, so any
member of the template family round-trips:

```
use snapdate::civil::{datetime, DateTime};

#[derive(Debug, serde::Deserialize, serde::Serialize)]
struct Record {
    created: DateTime,
}

let json = r#"{"created":"2020-1-5 9:5:3"}"#;
let got: Record = serde_json::from_str(&json)?;
assert_eq!(got.created, datetime(2020, 1, 5, 9, 5, 3, 0));
assert_eq!(
    serde_json::to_string(&got)?,
    r#"{"created":"2020/01/05 09:05:03"}"#,
);

# Ok::<(), Box<dyn std::error::Error>>(())
```
*/

use crate::civil::DateTime;

impl serde::Serialize for DateTime {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for DateTime {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime, D::Error> {
        struct DateTimeVisitor;

        impl<'de> serde::de::Visitor<'de> for DateTimeVisitor {
            type Value = DateTime;

            fn expecting(
                &self,
                f: &mut core::fmt::Formatter,
            ) -> core::fmt::Result {
                f.write_str("a datetime string")
            }

            #[inline]
            fn visit_str<E: serde::de::Error>(
                self,
                value: &str,
            ) -> Result<DateTime, E> {
                DateTime::parse(value).map_err(serde::de::Error::custom)
            }
        }

        deserializer.deserialize_str(DateTimeVisitor)
    }
}

#[cfg(test)]
mod tests {
    use alloc::{string::ToString, vec::Vec};

    use crate::civil::datetime;

    use super::*;

    #[test]
    fn roundtrip() {
        let dt = datetime(2020, 1, 5, 9, 5, 3, 7);
        let json = serde_json::to_string(&dt).unwrap();
        assert_eq!(json, "\"2020/01/05 09:05:03:007\"");
        let got: DateTime = serde_json::from_str(&json).unwrap();
        assert_eq!(got, dt);
    }

    #[test]
    fn deserializes_loose_input() {
        let got: DateTime = serde_json::from_str("\"2020-1-5\"").unwrap();
        assert_eq!(got, datetime(2020, 1, 5, 0, 0, 0, 0));
    }

    #[test]
    fn rejects_invalid_datetimes() {
        let err = serde_json::from_str::<DateTime>("\"2020/13/05\"")
            .unwrap_err()
            .to_string();
        assert!(err.contains("failed to parse"), "{err}");

        let got: Result<Vec<DateTime>, _> =
            serde_json::from_str("[\"not a datetime\"]");
        assert!(got.is_err());
    }
}
