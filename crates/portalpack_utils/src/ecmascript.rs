use oxc::syntax::identifier;

use crate::concat_string;

pub fn is_validate_identifier_name(name: &str) -> bool {
  identifier::is_identifier_name(name)
}

/// Quotes `value` as a JavaScript string literal.
pub fn to_string_literal(value: &str) -> String {
  // A JSON string is always a valid JavaScript string literal.
  serde_json::Value::String(value.to_string()).to_string()
}

pub fn property_access_str(obj: &str, prop: &str) -> String {
  if is_validate_identifier_name(prop) {
    concat_string!(obj, ".", prop)
  } else {
    concat_string!(obj, "[", to_string_literal(prop), "]")
  }
}

/// Renders `name` as an object literal key.
pub fn to_property_key(name: &str) -> String {
  if is_validate_identifier_name(name) { name.into() } else { to_string_literal(name) }
}

#[test]
fn test_is_validate_identifier_name() {
  assert!(is_validate_identifier_name("foo"));
  assert!(!is_validate_identifier_name("1aaaa"));
  assert!(!is_validate_identifier_name("😈"));
}

#[test]
fn test_property_access_str() {
  assert_eq!(property_access_str("ns", "default"), "ns.default");
  assert_eq!(property_access_str("ns", "a-b"), "ns[\"a-b\"]");
}
