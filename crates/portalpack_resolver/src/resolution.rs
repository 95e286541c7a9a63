use arcstr::ArcStr;
use portalpack_common::ModuleIdentity;
use portalpack_error::BundleError;
use url::Url;

/// Where a module request leads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
  Entry,
  RecordTag(ModuleIdentity),
  Library(ArcStr),
  Http {
    url: Url,
    /// The bare specifier, when this request should be reported as an external module.
    external: Option<ArcStr>,
  },
  Error(BundleError),
}
