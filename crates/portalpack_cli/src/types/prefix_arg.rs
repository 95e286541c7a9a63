use clap::ValueEnum;

use super::language::Language;

/// `MARKER=LANG`, e.g. `📖=js`. The marker may be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixArg {
  pub marker: String,
  pub language: Language,
}

pub fn parse_prefix(value: &str) -> Result<PrefixArg, String> {
  let (marker, language) =
    value.rsplit_once('=').ok_or_else(|| format!("expected MARKER=LANG, got {value:?}"))?;
  let language = Language::from_str(language, true)?;
  Ok(PrefixArg { marker: marker.to_string(), language })
}

#[test]
fn parses_marker_and_language() {
  assert_eq!(
    parse_prefix("📖=js"),
    Ok(PrefixArg { marker: "📖".to_string(), language: Language::Js })
  );
  assert_eq!(parse_prefix("=TEXT").map(|arg| arg.marker), Ok(String::new()));
  assert!(parse_prefix("📖").is_err());
  assert!(parse_prefix("📖=rust").is_err());
}
