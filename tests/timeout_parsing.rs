// tests/timeout_parsing.rs

use proptest::prelude::*;
use shellstep::exec::{Timeout, parse_timeout, timeout_millis, validate_timeout};

#[test]
fn units_map_to_milliseconds() {
    assert_eq!(parse_timeout("10s"), Some(10_000));
    assert_eq!(parse_timeout("2m"), Some(120_000));
    assert_eq!(parse_timeout("1h"), Some(3_600_000));
    assert_eq!(parse_timeout("5"), Some(5_000));
}

#[test]
fn units_are_case_insensitive_and_whitespace_is_tolerated() {
    assert_eq!(parse_timeout("3M"), Some(180_000));
    assert_eq!(parse_timeout("  7 H "), Some(7 * 3_600_000));
    assert_eq!(parse_timeout("\t15S\n"), Some(15_000));
}

#[test]
fn malformed_strings_are_rejected() {
    for bad in ["10x", "-5s", "abc", "", "   ", "1.5s", "10ms", "s", "10 s m"] {
        assert_eq!(parse_timeout(bad), None, "{bad:?} should not parse");
        let err = validate_timeout(bad).expect_err("validation should fail");
        assert_eq!(err, format!("Invalid value specified for timeout: {bad}"));
    }
}

#[test]
fn lenient_parse_falls_back_to_no_timeout() {
    assert_eq!(timeout_millis("garbage"), 0);
    assert_eq!(timeout_millis("10x"), 0);
    assert_eq!(timeout_millis("30"), 30_000);
}

#[test]
fn overflowing_values_are_invalid() {
    assert_eq!(parse_timeout("99999999999999999999"), None);
    assert_eq!(parse_timeout("18446744073709551h"), None);
    assert!(validate_timeout("18446744073709551h").is_err());
}

#[test]
fn timeout_display_prefers_the_configured_spelling() {
    let from_spec = Timeout::from_spec(Some(" 10s "));
    assert_eq!(from_spec.millis(), 10_000);
    assert_eq!(from_spec.to_string(), "10s");

    let from_millis = Timeout::from_millis(100);
    assert_eq!(from_millis.to_string(), "100 ms");
    assert!(!from_millis.is_unbounded());
}

#[test]
fn missing_or_zero_timeout_is_unbounded() {
    assert!(Timeout::from_spec(None).is_unbounded());
    assert!(Timeout::from_spec(Some("")).is_unbounded());
    assert!(Timeout::from_spec(Some("0")).is_unbounded());
    assert!(Timeout::from_spec(Some("nonsense")).is_unbounded());
    assert!(Timeout::unbounded().is_unbounded());
}

proptest! {
    #[test]
    fn valid_strings_parse_deterministically(
        value in 0u64..1_000_000,
        unit in prop::sample::select(vec!["", "s", "S", "m", "M", "h", "H"]),
        lead in "[ \t]{0,3}",
        trail in "[ \t]{0,3}",
    ) {
        let input = format!("{lead}{value}{unit}{trail}");
        let expected = match unit.to_ascii_lowercase().as_str() {
            "m" => value * 60_000,
            "h" => value * 3_600_000,
            _ => value * 1_000,
        };

        prop_assert_eq!(parse_timeout(&input), Some(expected));
        prop_assert_eq!(parse_timeout(&input), parse_timeout(&input));
        prop_assert!(validate_timeout(&input).is_ok());
    }

    #[test]
    fn strings_with_unknown_units_never_validate(
        value in 0u64..1_000_000,
        unit in "[a-gi-lnoq-rt-zA-GI-LNOQ-RT-Z]",
    ) {
        let input = format!("{value}{unit}");
        prop_assert!(validate_timeout(&input).is_err());
        prop_assert_eq!(timeout_millis(&input), 0);
    }
}
