// Decides which namespace a module request belongs to: the synthetic entry, a record tag, a
// host library, or the network.

mod library_registry;
mod module_identities;
pub mod namespace;
mod prefix;
mod resolution;
mod resolver;
mod strategies;
mod url_ext;

pub use crate::{
  library_registry::LibraryRegistry,
  module_identities::ModuleIdentities,
  prefix::{EntryTarget, default_prefix, resolve_entry_prefix},
  resolution::Resolution,
  resolver::{ResolveContext, ResolveRequest, resolve},
  url_ext::registry_url,
};
