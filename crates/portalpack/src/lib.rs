mod engine;
mod generate_stage;
mod link_stage;
mod module_loader;
mod scan_stage;
mod types;
mod utils;

pub use crate::{engine::Engine, types::engine_output::EngineOutput};
pub use portalpack_common::*;
pub use portalpack_plugin::*;
