use portalpack_common::OutputChunk;

#[derive(Debug, Default)]
pub struct EngineOutput {
  pub chunks: Vec<OutputChunk>,
  pub warnings: Vec<anyhow::Error>,
}
