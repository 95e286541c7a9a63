mod plugin;
mod types;

pub use crate::{
  plugin::{HookLoadReturn, HookResolveIdReturn, Plugin, SharedPlugin},
  types::{
    hook_load_args::HookLoadArgs, hook_load_output::HookLoadOutput,
    hook_resolve_id_args::HookResolveIdArgs,
  },
};
