mod build_context;
mod build_state;
mod bundler;
mod entry;
mod options;
mod portal_plugin;

pub use crate::{
  build_state::BuildState,
  bundler::Bundler,
  entry::{collect_entries, entry_document},
  options::{
    BundlerOptions, DEFAULT_REGISTRY_URL, DEFAULT_TYPE_DECLARATIONS_MARKER,
    NormalizedBundlerOptions,
  },
};
pub use portalpack_common::{
  CodeBundle, ExternalModule, LibraryModule, ModuleType, ModulesReport, Record, RecordSnapshot,
  ScriptPrefix,
};
pub use portalpack_http::{HttpClient, HttpResponse, RemoteModuleCache, SharedHttpClient, Url};
pub use portalpack_resolver::{LibraryRegistry, ModuleIdentities, default_prefix};
