use thiserror::Error;

/// Failures a portal build can end with. Every variant aborts the whole build.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BundleError {
  /// A record-tag import whose record, tag or script marker does not exist.
  #[error("Unresolved module \"{prefix}{tag}\": no record has a matching \"{tag}\" script")]
  UnresolvedRecordModule { prefix: String, tag: String },

  /// A library that was registered at resolve time but removed before it was loaded.
  #[error("Unresolved library module \"{id}\"")]
  UnresolvedLibraryModule { id: String },

  #[error("Could not resolve \"{specifier}\" from \"{importer}\": relative imports need a URL importer")]
  UnresolvedRelativeImport { specifier: String, importer: String },

  #[error("Invalid URL \"{url}\": {message}")]
  InvalidUrl { url: String, message: String },

  #[error("Failed to fetch \"{url}\": {message}")]
  Network { url: String, message: String },

  #[error("Failed to compile \"{module}\": {message}")]
  Compile { module: String, message: String },
}

#[test]
fn unresolved_record_module_names_prefix_and_tag() {
  let error = BundleError::UnresolvedRecordModule { prefix: "📖".into(), tag: "other".into() };
  assert!(error.to_string().contains("📖other"));
}
