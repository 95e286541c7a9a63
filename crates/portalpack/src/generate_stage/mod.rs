mod module_finalizers;
pub mod runtime;

use arcstr::ArcStr;
use portalpack_common::{NormalizedEngineOptions, OutputChunk, SourceJoiner};
use portalpack_ecmascript::EcmaCompiler;
use portalpack_error::BuildResult;
use portalpack_utils::{concat_string, ecmascript::to_string_literal};

use self::{
  module_finalizers::isolating::{IsolatingModuleFinalizer, IsolatingModuleFinalizerContext},
  runtime::{RUNTIME_EPILOGUE, RUNTIME_PRELUDE},
};
use crate::{link_stage::LinkStageOutput, types::engine_output::EngineOutput};

pub struct GenerateStage<'a> {
  link_output: LinkStageOutput,
  options: &'a NormalizedEngineOptions,
}

impl<'a> GenerateStage<'a> {
  pub fn new(link_output: LinkStageOutput, options: &'a NormalizedEngineOptions) -> Self {
    Self { link_output, options }
  }

  pub fn generate(self) -> BuildResult<EngineOutput> {
    let LinkStageOutput { module_table, index_ecma_ast, entry_points, sorted_modules, warnings } =
      self.link_output;

    let mut source_joiner = SourceJoiner::default();
    source_joiner.append_source(RUNTIME_PRELUDE);

    for &idx in &sorted_modules {
      let ctx = IsolatingModuleFinalizerContext { module: &module_table[idx], modules: &module_table };
      source_joiner.append_source(IsolatingModuleFinalizer::finalize(&ctx, &index_ecma_ast[idx]));
    }

    for entry in &entry_points {
      let stable_id = &module_table[entry.idx].stable_id;
      source_joiner.append_source(concat_string!("__portal_require(", to_string_literal(stable_id), ");"));
    }
    source_joiner.append_source(RUNTIME_EPILOGUE);

    let mut code = source_joiner.join();
    if self.options.minify {
      code = EcmaCompiler::minify(&code)?;
    }

    let filename = entry_points
      .first()
      .and_then(|entry| entry.name.as_ref())
      .map_or_else(|| ArcStr::from("bundle.js"), |name| ArcStr::from(concat_string!(name, ".js")));

    Ok(EngineOutput { chunks: vec![OutputChunk { filename, code }], warnings })
  }
}
