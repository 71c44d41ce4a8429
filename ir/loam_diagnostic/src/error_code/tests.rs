use super::*;
use pretty_assertions::assert_eq;

#[test]
fn display_matches_as_str() {
    assert_eq!(ErrorCode::E2001.to_string(), "E2001");
    assert_eq!(ErrorCode::E1004.as_str(), "E1004");
}

#[test]
fn descriptions_are_nonempty() {
    let codes = [
        ErrorCode::E0001,
        ErrorCode::E1001,
        ErrorCode::E1002,
        ErrorCode::E1003,
        ErrorCode::E1004,
        ErrorCode::E2001,
        ErrorCode::E2002,
        ErrorCode::E9001,
    ];
    for code in codes {
        assert!(!code.description().is_empty(), "{code} has no description");
    }
}
