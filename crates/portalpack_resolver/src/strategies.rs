use arcstr::ArcStr;
use portalpack_common::{ModuleIdentity, ScriptPrefix, TAG_MODULE_SUFFIX};
use portalpack_error::BundleError;
use url::Url;

use crate::{
  Resolution, ResolveContext, ResolveRequest,
  namespace::{ENTRY_PATH, HTTP_NAMESPACE},
  url_ext::{importer_base, registry_url},
};

pub fn entry(_ctx: &ResolveContext<'_>, request: &ResolveRequest<'_>) -> Option<Resolution> {
  (request.specifier == ENTRY_PATH).then_some(Resolution::Entry)
}

pub fn record_tag(ctx: &ResolveContext<'_>, request: &ResolveRequest<'_>) -> Option<Resolution> {
  if !ModuleIdentity::is_canonical_id(request.specifier) {
    return None;
  }

  let resolution = match ctx.identities.lookup(request.specifier, ctx.prefixes) {
    Some(identity) => Resolution::RecordTag(identity),
    None => {
      let body = request.specifier.strip_suffix(TAG_MODULE_SUFFIX).unwrap_or_default();
      let (prefix, tag) = ctx
        .prefixes
        .iter()
        .find(|prefix| prefix.selects(body))
        .map_or(("", body), |prefix| (prefix.prefix.as_str(), prefix.trim(body)));
      Resolution::Error(BundleError::UnresolvedRecordModule {
        prefix: prefix.to_string(),
        tag: tag.to_string(),
      })
    }
  };
  Some(resolution)
}

pub fn library(ctx: &ResolveContext<'_>, request: &ResolveRequest<'_>) -> Option<Resolution> {
  ctx.libraries.contains(request.specifier).then(|| Resolution::Library(ArcStr::from(request.specifier)))
}

/// `./x`, `../x` and `/x` only make sense next to a module that was fetched from a url.
pub fn relative(_ctx: &ResolveContext<'_>, request: &ResolveRequest<'_>) -> Option<Resolution> {
  let specifier = request.specifier;
  if !specifier.starts_with('.') && !specifier.starts_with('/') {
    return None;
  }

  let Some(importer) = request.importer.filter(|importer| importer.namespace == HTTP_NAMESPACE) else {
    return Some(Resolution::Error(BundleError::UnresolvedRelativeImport {
      specifier: specifier.to_string(),
      importer: request.importer.map_or_else(|| ENTRY_PATH.to_string(), ToString::to_string),
    }));
  };

  let resolved = Url::parse(&importer.id).and_then(|url| importer_base(&url).join(specifier));
  Some(match resolved {
    Ok(url) => Resolution::Http { url, external: None },
    Err(err) => Resolution::Error(BundleError::InvalidUrl {
      url: [importer.id.as_str(), " + ", specifier].concat(),
      message: err.to_string(),
    }),
  })
}

/// A specifier starting with a marker names the first record, by id, whose tag of that name is a
/// script with the same marker.
pub fn prefixed(ctx: &ResolveContext<'_>, request: &ResolveRequest<'_>) -> Option<Resolution> {
  let prefix = ctx
    .prefixes
    .iter()
    .find(|prefix| !prefix.is_fallback && prefix.selects(request.specifier))?;
  let tag = prefix.trim(request.specifier);

  let record_id = ctx
    .snapshot
    .iter_sorted()
    .find(|(_, record)| record.get(tag).is_some_and(|value| prefix.matches(value)))
    .map(|(record_id, _)| record_id);

  Some(match record_id {
    Some(record_id) => Resolution::RecordTag(ModuleIdentity::new(prefix.clone(), record_id.clone(), tag)),
    None => Resolution::Error(BundleError::UnresolvedRecordModule {
      prefix: prefix.prefix.to_string(),
      tag: tag.to_string(),
    }),
  })
}

/// Fallback prefixes take the first record with any non-empty value under the tag.
pub fn fallback_prefixed(
  ctx: &ResolveContext<'_>,
  request: &ResolveRequest<'_>,
) -> Option<Resolution> {
  ctx
    .prefixes
    .iter()
    .filter(|prefix| prefix.is_fallback && prefix.matches(request.specifier))
    .find_map(|prefix| fallback_record(ctx, prefix, prefix.trim(request.specifier)))
    .map(Resolution::RecordTag)
}

fn fallback_record(
  ctx: &ResolveContext<'_>,
  prefix: &ScriptPrefix,
  tag: &str,
) -> Option<ModuleIdentity> {
  if tag.is_empty() {
    return None;
  }
  ctx
    .snapshot
    .iter_sorted()
    .find(|(_, record)| record.get(tag).is_some_and(|value| !value.is_empty()))
    .map(|(record_id, _)| ModuleIdentity::new(prefix.clone(), record_id.clone(), tag))
}

/// Anything else is a package on the remote registry.
pub fn bare(ctx: &ResolveContext<'_>, request: &ResolveRequest<'_>) -> Resolution {
  let url = registry_url(ctx.registry_url, request.specifier, ctx.type_declarations_marker);
  match Url::parse(&url) {
    Ok(url) => Resolution::Http { url, external: Some(ArcStr::from(request.specifier)) },
    Err(err) => Resolution::Error(BundleError::InvalidUrl { url, message: err.to_string() }),
  }
}

#[cfg(test)]
mod tests {
  use std::collections::BTreeMap;

  use arcstr::ArcStr;
  use portalpack_common::{
    LibraryModule, ModuleIdentity, ModuleType, Record, RecordSnapshot, ResolvedId, ScriptPrefix,
  };
  use portalpack_error::BundleError;
  use url::Url;

  use crate::{
    LibraryRegistry, ModuleIdentities, Resolution, ResolveContext, ResolveRequest,
    namespace::{ENTRY_PATH, HTTP_NAMESPACE, TAG_NAMESPACE},
    resolve,
  };

  struct Fixture {
    snapshot: RecordSnapshot,
    prefixes: Vec<ScriptPrefix>,
    libraries: LibraryRegistry,
    identities: ModuleIdentities,
  }

  impl Fixture {
    fn new(records: &[(&str, &str, &str)]) -> Self {
      let mut by_id = BTreeMap::<ArcStr, Record>::new();
      for &(record_id, tag, value) in records {
        by_id.entry(ArcStr::from(record_id)).or_default().insert(ArcStr::from(tag), ArcStr::from(value));
      }
      Self {
        snapshot: by_id.into_iter().collect(),
        prefixes: vec![
          ScriptPrefix::new("📖", ModuleType::Js),
          ScriptPrefix::new("🔷", ModuleType::Ts),
          ScriptPrefix::fallback("📝", ModuleType::Text),
        ],
        libraries: LibraryRegistry::new(),
        identities: ModuleIdentities::default(),
      }
    }

    fn resolve(&self, specifier: &str, importer: Option<&ResolvedId>) -> Resolution {
      let ctx = ResolveContext {
        snapshot: &self.snapshot,
        prefixes: &self.prefixes,
        libraries: &self.libraries,
        identities: &self.identities,
        registry_url: "https://registry.test",
        type_declarations_marker: "dts",
      };
      resolve(&ctx, &ResolveRequest { specifier, importer })
    }
  }

  fn http(url: &str) -> ResolvedId {
    ResolvedId::new(url, HTTP_NAMESPACE)
  }

  #[test]
  fn entry_path_wins() {
    assert_eq!(Fixture::new(&[]).resolve(ENTRY_PATH, None), Resolution::Entry);
  }

  #[test]
  fn canonical_ids_decode_or_fail() {
    let fixture = Fixture::new(&[]);
    let Resolution::RecordTag(identity) = fixture.resolve("🔷bot.main?portal-tag", None) else {
      panic!("expected a record tag");
    };
    assert_eq!(identity.prefix.language, ModuleType::Ts);
    assert_eq!(identity.record_id.as_str(), "bot");

    assert_eq!(
      fixture.resolve("📖nodot?portal-tag", None),
      Resolution::Error(BundleError::UnresolvedRecordModule {
        prefix: "📖".to_string(),
        tag: "nodot".to_string()
      })
    );
  }

  #[test]
  fn canonical_ids_prefer_the_identity_they_were_made_from() {
    let fixture = Fixture::new(&[]);
    let identity = ModuleIdentity::new(fixture.prefixes[0].clone(), "a.b", "main");
    let id = fixture.identities.register(&identity);
    assert_eq!(fixture.resolve(&id, None), Resolution::RecordTag(identity));
  }

  #[test]
  fn libraries_shadow_exact_ids_only() {
    let fixture = Fixture::new(&[]);
    fixture.libraries.add_library(LibraryModule::new("lodash", "export default 1;", ModuleType::Js));

    assert_eq!(fixture.resolve("lodash", None), Resolution::Library(ArcStr::from("lodash")));
    assert_eq!(
      fixture.resolve("lodash/fp", None),
      Resolution::Http {
        url: Url::parse("https://registry.test/lodash/fp?dts").unwrap(),
        external: Some(ArcStr::from("lodash/fp")),
      }
    );
  }

  #[test]
  fn relative_imports_follow_the_importer_url() {
    let fixture = Fixture::new(&[]);
    let root = http("https://registry.test/pkg?dts");
    let nested = http("https://registry.test/pkg/x");

    let url = |resolution| match resolution {
      Resolution::Http { url, external: None } => url.to_string(),
      other => panic!("unexpected {other:?}"),
    };
    assert_eq!(url(fixture.resolve("./x", Some(&root))), "https://registry.test/pkg/x");
    assert_eq!(url(fixture.resolve("../y", Some(&nested))), "https://registry.test/y");
    assert_eq!(url(fixture.resolve("/z", Some(&nested))), "https://registry.test/z");
  }

  #[test]
  fn relative_imports_need_a_url_importer() {
    let fixture = Fixture::new(&[]);
    let importer = ResolvedId::new("📖a.main?portal-tag", TAG_NAMESPACE);
    assert!(matches!(
      fixture.resolve("./x", Some(&importer)),
      Resolution::Error(BundleError::UnresolvedRelativeImport { .. })
    ));
  }

  #[test]
  fn prefixed_specifiers_pick_the_first_marked_record() {
    let fixture = Fixture::new(&[
      ("c", "other", "📖c()"),
      ("b", "other", "🔷b()"),
      ("a", "other", "plain"),
    ]);
    assert_eq!(
      fixture.resolve("📖other", None),
      Resolution::RecordTag(ModuleIdentity::new(fixture.prefixes[0].clone(), "c", "other"))
    );
    assert_eq!(
      fixture.resolve("🔷other", None),
      Resolution::RecordTag(ModuleIdentity::new(fixture.prefixes[1].clone(), "b", "other"))
    );
    assert_eq!(
      fixture.resolve("📖missing", None),
      Resolution::Error(BundleError::UnresolvedRecordModule {
        prefix: "📖".to_string(),
        tag: "missing".to_string()
      })
    );
  }

  #[test]
  fn fallback_prefixes_take_any_value_or_fall_through() {
    let fixture = Fixture::new(&[("b", "notes", "hello"), ("a", "notes", ""), ("c", "notes", "later")]);
    assert_eq!(
      fixture.resolve("📝notes", None),
      Resolution::RecordTag(ModuleIdentity::new(fixture.prefixes[2].clone(), "b", "notes"))
    );
    assert!(matches!(
      fixture.resolve("📝nothing", None),
      Resolution::Http { external: Some(_), .. }
    ));
  }

  #[test]
  fn bare_specifiers_go_to_the_registry() {
    assert_eq!(
      Fixture::new(&[]).resolve("preact/hooks", None),
      Resolution::Http {
        url: Url::parse("https://registry.test/preact/hooks?dts").unwrap(),
        external: Some(ArcStr::from("preact/hooks")),
      }
    );
  }
}
