//! # Identifier Resolution
//!
//! Reads the optional `nid` / `cid` integers out of one card block.
//!
//! The block is first read as a YAML mapping (`parse_structured`). Blocks the
//! YAML parser rejects, typically half-typed multi-line scalars, are scanned
//! with a forgiving regex instead (`parse_fallback`). Neither path fails: an
//! identifier that cannot be read is `None`, meaning "not synced yet".

use std::sync::OnceLock;

use regex::Regex;
use serde_yaml::{Mapping, Value};

const NID_KEYS: &[&str] = &["nid", "NID"];
const CID_KEYS: &[&str] = &["cid", "CID"];

fn nid_pattern() -> &'static Regex {
    static NID_REGEX: OnceLock<Regex> = OnceLock::new();
    NID_REGEX.get_or_init(|| {
        Regex::new(r#"(?i)["']?nid["']?\s*:\s*["']?(\d+)"#).expect("Invalid nid regex")
    })
}

fn cid_pattern() -> &'static Regex {
    static CID_REGEX: OnceLock<Regex> = OnceLock::new();
    CID_REGEX.get_or_init(|| {
        Regex::new(r#"(?i)["']?cid["']?\s*:\s*["']?(\d+)"#).expect("Invalid cid regex")
    })
}

/// The identifiers recovered from one card block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CardIds {
    pub nid: Option<i64>,
    pub cid: Option<i64>,
}

#[derive(Debug, thiserror::Error)]
pub enum IdParseError {
    #[error("card block is not valid YAML: {0}")]
    Syntax(#[from] serde_yaml::Error),
    #[error("card block is not a mapping")]
    NotMapping,
}

/// Resolves `nid` / `cid` for the raw text of one card block.
///
/// `block` starts with the item's `- ` marker and may span several lines.
pub fn resolve_ids(block: &str) -> CardIds {
    match parse_structured(block) {
        Ok(mapping) => CardIds {
            nid: get_case_insensitive(&mapping, NID_KEYS).and_then(coerce_value),
            cid: get_case_insensitive(&mapping, CID_KEYS).and_then(coerce_value),
        },
        Err(IdParseError::NotMapping) => CardIds::default(),
        Err(IdParseError::Syntax(e)) => {
            log::debug!("card block failed structured parse, using fallback: {e}");
            parse_fallback(block)
        }
    }
}

/// Parses a card block as a single YAML mapping.
///
/// The first `-` is blanked to a space so the one-element sequence reads as a
/// mapping with its columns unchanged.
pub fn parse_structured(block: &str) -> Result<Mapping, IdParseError> {
    let unlisted = block.replacen('-', " ", 1);
    match serde_yaml::from_str::<Value>(&unlisted)? {
        Value::Mapping(mapping) => Ok(mapping),
        _ => Err(IdParseError::NotMapping),
    }
}

/// Pulls identifiers out of text the YAML parser rejected.
pub fn parse_fallback(block: &str) -> CardIds {
    CardIds {
        nid: capture_digits(nid_pattern(), block),
        cid: capture_digits(cid_pattern(), block),
    }
}

/// Looks up the first of `keys` present in `mapping`.
///
/// An explicit `null` counts as absent so a later spelling can still match.
pub fn get_case_insensitive<'m>(mapping: &'m Mapping, keys: &[&str]) -> Option<&'m Value> {
    keys.iter()
        .filter_map(|k| mapping.get(*k))
        .find(|v| !v.is_null())
}

fn capture_digits(pattern: &Regex, text: &str) -> Option<i64> {
    pattern
        .captures(text)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

fn coerce_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.fract() == 0.0)
                .filter(|f| *f >= i64::MIN as f64 && *f < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => parse_leading_int(s),
        _ => None,
    }
}

/// Reads a leading base-10 integer: `" 42abc"` is 42, `"abc"` is `None`.
fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let sign_len = usize::from(s.starts_with(['-', '+']));
    let digits_len = s[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits_len == 0 {
        return None;
    }
    s[..sign_len + digits_len].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn ids(nid: Option<i64>, cid: Option<i64>) -> CardIds {
        CardIds { nid, cid }
    }

    #[test]
    fn unquoted_and_quoted_agree() {
        let unquoted = resolve_ids("  - nid: 1762277751241\n    cid: 1762277751241");
        let quoted = resolve_ids("  - nid: '1762277751241'\n    cid: \"1762277751241\"");
        assert_eq!(unquoted, ids(Some(1762277751241), Some(1762277751241)));
        assert_eq!(quoted, unquoted);
    }

    #[test]
    fn missing_ids_are_none() {
        assert_eq!(
            resolve_ids("  - model: Basic\n    Front: question"),
            CardIds::default()
        );
    }

    #[test]
    fn uppercase_keys_are_accepted() {
        assert_eq!(
            resolve_ids("- NID: 12\n  CID: '34'"),
            ids(Some(12), Some(34))
        );
    }

    #[test]
    fn lowercase_key_wins_over_uppercase() {
        assert_eq!(resolve_ids("- nid: 1\n  NID: 2"), ids(Some(1), None));
    }

    #[test]
    fn null_lowercase_falls_through_to_uppercase() {
        assert_eq!(resolve_ids("- nid: null\n  NID: 2"), ids(Some(2), None));
    }

    #[test]
    fn explicit_null_is_none() {
        assert_eq!(resolve_ids("- nid: ~\n  cid:"), CardIds::default());
    }

    #[test]
    fn dash_inside_value_is_preserved() {
        let mapping = parse_structured("- Front: a-b\n  nid: 5").unwrap();
        assert_eq!(
            mapping.get("Front").and_then(Value::as_str),
            Some("a-b")
        );
    }

    #[test]
    fn scalar_item_is_not_a_mapping() {
        assert!(matches!(
            parse_structured("- just some text"),
            Err(IdParseError::NotMapping)
        ));
        assert_eq!(resolve_ids("- just some text"), CardIds::default());
    }

    #[test]
    fn malformed_yaml_uses_fallback() {
        let block = "  - Front: \"unterminated\n    nid: '99'\n    cid: 100";
        assert!(matches!(
            parse_structured(block),
            Err(IdParseError::Syntax(_))
        ));
        assert_eq!(resolve_ids(block), ids(Some(99), Some(100)));
    }

    #[test]
    fn fallback_matches_quoted_keys() {
        assert_eq!(
            parse_fallback(r#"{"nid": "7", 'CID':8"#),
            ids(Some(7), Some(8))
        );
    }

    #[test]
    fn fallback_overflow_is_none() {
        assert_eq!(
            parse_fallback("nid: 99999999999999999999999"),
            ids(None, None)
        );
    }

    #[rstest]
    #[case::plain("'42'", Some(42))]
    #[case::leading_digits("'42abc'", Some(42))]
    #[case::leading_space("' 42'", Some(42))]
    #[case::negative("'-3'", Some(-3))]
    #[case::not_a_number("'abc'", None)]
    #[case::empty_string("''", None)]
    #[case::integral_float("42.0", Some(42))]
    #[case::fractional_float("4.5", None)]
    #[case::not_finite(".nan", None)]
    #[case::infinite(".inf", None)]
    #[case::boolean("true", None)]
    #[case::sequence("[1, 2]", None)]
    fn coerces_nid_values(#[case] raw: &str, #[case] expected: Option<i64>) {
        let block = format!("- nid: {raw}");
        assert_eq!(resolve_ids(&block).nid, expected);
    }
}
