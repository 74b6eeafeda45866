use quickcheck::{Arbitrary, Gen};

use snapdate::civil::{datetime, DateTime};

#[test]
fn parse_then_display_normalizes() {
    let cases = [
        ("2020/1/5", "2020/01/05"),
        ("2020-01-05", "2020/01/05"),
        ("20200105", "2020/01/05"),
        ("2020/01/05 9:5:3", "2020/01/05 09:05:03"),
        ("2020-01-05T09:05:03:007", "2020/01/05 09:05:03:007"),
    ];
    for (input, want) in cases {
        let dt = DateTime::parse(input).unwrap();
        assert_eq!(dt.to_string(), want, "{input}");
    }
}

#[test]
fn error_stages_are_distinguishable() {
    let err = DateTime::parse("2020/123/05").unwrap_err();
    assert!(err.is_malformed());
    assert!(!err.is_parse());

    let err = DateTime::parse("2020/13/05").unwrap_err();
    assert!(err.is_parse());
    assert!(!err.is_malformed());
    assert!(err.to_string().contains("2020/13/05"));
}

#[test]
fn parsers_are_freely_shareable() {
    use snapdate::fmt::pattern::DateTimeParser;

    // A parser is a plain value; copies work from any thread without
    // coordination.
    static PARSER: DateTimeParser = DateTimeParser::new();

    let handles: Vec<_> = (0..4)
        .map(|i| {
            std::thread::spawn(move || {
                let input = format!("2020/1/{} 9:5:{}", i + 1, i);
                PARSER.parse_datetime(&input).unwrap()
            })
        })
        .collect();
    for (i, handle) in handles.into_iter().enumerate() {
        let i = i as i8;
        assert_eq!(handle.join().unwrap(), datetime(2020, 1, i + 1, 9, 5, i, 0));
    }
}

#[derive(Clone, Debug)]
struct Valid(DateTime);

impl Arbitrary for Valid {
    fn arbitrary(g: &mut Gen) -> Valid {
        let year = i16::arbitrary(g).rem_euclid(10_000);
        let month = i8::arbitrary(g).rem_euclid(12) + 1;
        // Capping the day at 28 sidesteps month lengths; the month edges
        // are covered by unit tests.
        let day = i8::arbitrary(g).rem_euclid(28) + 1;
        let hour = i8::arbitrary(g).rem_euclid(24);
        let minute = i8::arbitrary(g).rem_euclid(60);
        let second = i8::arbitrary(g).rem_euclid(60);
        let millisecond = i16::arbitrary(g).rem_euclid(1000);
        Valid(datetime(year, month, day, hour, minute, second, millisecond))
    }
}

quickcheck::quickcheck! {
    fn prop_display_parse_roundtrip(dt: Valid) -> bool {
        let Valid(dt) = dt;
        DateTime::parse(&dt.to_string()).map_or(false, |got| got == dt)
    }

    fn prop_alignment_idempotent(dt: Valid) -> bool {
        let Valid(dt) = dt;
        let first = match snapdate::fmt::align(&dt.to_string()) {
            Ok(first) => first,
            Err(_) => return false,
        };
        let second = match snapdate::fmt::align(first.literal()) {
            Ok(second) => second,
            Err(_) => return false,
        };
        first.literal() == second.literal()
            && first.pattern() == second.pattern()
    }
}
