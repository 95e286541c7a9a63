use oxc::span::SourceType;
use portalpack_common::ModuleType;
use portalpack_ecmascript::{EcmaAst, EcmaCompiler};
use portalpack_error::{BuildResult, BundleError};
use portalpack_utils::{concat_string, ecmascript::to_string_literal};

/// Turns loaded module text into a JavaScript module ast according to its module type.
pub fn parse_to_ecma_ast(
  module_id: &str,
  code: String,
  module_type: ModuleType,
) -> BuildResult<EcmaAst> {
  let source = match module_type {
    ModuleType::Js => code,
    ModuleType::Jsx => EcmaCompiler::transform_to_js(module_id, &code, SourceType::jsx())?,
    ModuleType::Ts => EcmaCompiler::transform_to_js(module_id, &code, SourceType::ts())?,
    ModuleType::Tsx => EcmaCompiler::transform_to_js(module_id, &code, SourceType::tsx())?,
    ModuleType::Json => {
      serde_json::from_str::<serde_json::Value>(&code).map_err(|err| BundleError::Compile {
        module: module_id.to_string(),
        message: format!("Invalid JSON: {err}"),
      })?;
      concat_string!("export default ", code.trim(), ";\n")
    }
    ModuleType::Text => concat_string!("export default ", to_string_literal(&code), ";\n"),
  };

  EcmaCompiler::parse(module_id, source, SourceType::mjs())
}
