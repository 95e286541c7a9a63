pub mod input_item;
pub mod module_type;
pub mod normalized_engine_options;

use crate::InputItem;

#[derive(Default, Debug, Clone)]
pub struct EngineOptions {
  // --- Input
  pub input: Option<Vec<InputItem>>,

  // --- Output
  pub minify: Option<bool>,

  // --- Diagnostics
  /// Skip the engine's own tracing events.
  pub silent: Option<bool>,
}
