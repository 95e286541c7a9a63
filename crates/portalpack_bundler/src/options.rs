use serde::Deserialize;

pub const DEFAULT_REGISTRY_URL: &str = "https://esm.sh";
pub const DEFAULT_TYPE_DECLARATIONS_MARKER: &str = "dts";

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct BundlerOptions {
  /// Base url bare imports are fetched from, defaults to `https://esm.sh`.
  pub registry_url: Option<String>,
  /// Query appended to registry urls so the registry answers with a type declaration header.
  pub type_declarations_marker: Option<String>,
  pub minify: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct NormalizedBundlerOptions {
  pub registry_url: String,
  pub type_declarations_marker: String,
  pub minify: bool,
}

pub fn normalize_options(raw_options: BundlerOptions) -> NormalizedBundlerOptions {
  let registry_url = raw_options
    .registry_url
    .as_deref()
    .map(|url| url.trim_end_matches('/'))
    .filter(|url| !url.is_empty())
    .unwrap_or(DEFAULT_REGISTRY_URL)
    .to_string();

  NormalizedBundlerOptions {
    registry_url,
    type_declarations_marker: raw_options
      .type_declarations_marker
      .unwrap_or_else(|| DEFAULT_TYPE_DECLARATIONS_MARKER.to_string()),
    minify: raw_options.minify.unwrap_or(false),
  }
}

#[test]
fn fills_defaults_and_trims_registry() {
  let options = normalize_options(BundlerOptions::default());
  assert_eq!(options.registry_url, "https://esm.sh");
  assert_eq!(options.type_declarations_marker, "dts");
  assert!(!options.minify);

  let options = normalize_options(BundlerOptions {
    registry_url: Some("https://cdn.test/".to_string()),
    ..Default::default()
  });
  assert_eq!(options.registry_url, "https://cdn.test");
}
