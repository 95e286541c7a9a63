use url::Url;

/// Registry package roots like `https://esm.sh/pkg?dts` have neither an extension nor a trailing
/// slash but still act as a directory for the relative imports of the module they serve.
pub fn is_directory_like(url: &Url) -> bool {
  let last_segment = url.path().rsplit('/').next().unwrap_or_default();
  !last_segment.is_empty() && !last_segment.contains('.') && url.query().is_some()
}

/// The url relative imports of a module fetched from `importer` resolve against.
pub fn importer_base(importer: &Url) -> Url {
  if !is_directory_like(importer) {
    return importer.clone();
  }
  let mut base = importer.clone();
  let path = [base.path(), "/"].concat();
  base.set_path(&path);
  base
}

/// `{registry}/{specifier}?{marker}`, the marker asks the registry for type declaration hints.
pub fn registry_url(registry: &str, specifier: &str, marker: &str) -> String {
  let registry = registry.trim_end_matches('/');
  if marker.is_empty() {
    [registry, "/", specifier].concat()
  } else {
    [registry, "/", specifier, "?", marker].concat()
  }
}

#[cfg(test)]
mod tests {
  use url::Url;

  use super::{importer_base, registry_url};

  fn join(importer: &str, specifier: &str) -> String {
    importer_base(&Url::parse(importer).unwrap()).join(specifier).unwrap().to_string()
  }

  #[test]
  fn package_roots_act_as_directories() {
    assert_eq!(join("https://esm.sh/pkg?dts", "./x"), "https://esm.sh/pkg/x");
    assert_eq!(join("https://esm.sh/@scope/pkg?dts", "./x"), "https://esm.sh/@scope/pkg/x");
  }

  #[test]
  fn files_resolve_siblings() {
    assert_eq!(join("https://esm.sh/pkg/x", "../y"), "https://esm.sh/y");
    assert_eq!(join("https://esm.sh/pkg@1.0.0/es2022/pkg.mjs", "./dep.mjs"), "https://esm.sh/pkg@1.0.0/es2022/dep.mjs");
    assert_eq!(join("https://esm.sh/pkg/x", "/z"), "https://esm.sh/z");
  }

  #[test]
  fn registry_url_appends_marker() {
    assert_eq!(registry_url("https://esm.sh/", "pkg", "dts"), "https://esm.sh/pkg?dts");
    assert_eq!(registry_url("https://esm.sh", "pkg/sub", ""), "https://esm.sh/pkg/sub");
  }
}
