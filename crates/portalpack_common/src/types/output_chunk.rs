use arcstr::ArcStr;

#[derive(Debug, Clone)]
pub struct OutputChunk {
  pub filename: ArcStr,
  pub code: String,
}
