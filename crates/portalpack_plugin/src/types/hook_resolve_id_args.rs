use portalpack_common::{ImportKind, ResolvedId};

#[derive(Debug)]
pub struct HookResolveIdArgs<'a> {
  /// `None` for the inputs of a build.
  pub importer: Option<&'a ResolvedId>,
  pub specifier: &'a str,
  pub kind: ImportKind,
}
