use crate::InputItem;

#[derive(Debug)]
pub struct NormalizedEngineOptions {
  // --- Input
  pub input: Vec<InputItem>,

  // --- Output
  pub minify: bool,

  // --- Diagnostics
  pub silent: bool,
}
