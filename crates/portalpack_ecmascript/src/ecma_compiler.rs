use std::path::Path;

use arcstr::ArcStr;
use portalpack_error::{BuildResult, BundleError};
use oxc::{
  allocator::Allocator,
  codegen::{Codegen, CodegenOptions},
  diagnostics::{OxcDiagnostic, Severity},
  minifier::{Minifier, MinifierOptions},
  parser::Parser,
  semantic::SemanticBuilder,
  span::SourceType,
  transformer::{ESTarget, TransformOptions, Transformer},
};

use crate::ecma_ast::{
  EcmaAst,
  program_cell::{ProgramCell, ProgramCellDependent, ProgramCellOwner},
};

pub struct EcmaCompiler;

impl EcmaCompiler {
  /// Parses `source` and runs the semantic checks, so a successfully returned ast is safe to link.
  pub fn parse(
    module_id: &str,
    source: impl Into<ArcStr>,
    source_type: SourceType,
  ) -> BuildResult<EcmaAst> {
    let allocator = Allocator::default();
    let owner = ProgramCellOwner { source: source.into(), allocator };
    let program = ProgramCell::try_new(owner, |owner| {
      let ret = Parser::new(&owner.allocator, &owner.source, source_type).parse();
      if ret.errors.is_empty() && !ret.panicked {
        Ok(ProgramCellDependent { program: ret.program })
      } else {
        Err(compile_error(module_id, &ret.errors))
      }
    })?;

    let semantic_ret = SemanticBuilder::new()
      .with_check_syntax_error(true)
      .build(&program.borrow_dependent().program);
    if !semantic_ret.errors.is_empty() {
      Err(compile_error(module_id, &semantic_ret.errors))?;
    }

    Ok(EcmaAst { program, source_type })
  }

  /// Lowers TypeScript and JSX into plain JavaScript text.
  pub fn transform_to_js(
    module_id: &str,
    source: &str,
    source_type: SourceType,
  ) -> BuildResult<String> {
    let allocator = Allocator::default();
    let ret = Parser::new(&allocator, source, source_type).parse();
    if !ret.errors.is_empty() || ret.panicked {
      Err(compile_error(module_id, &ret.errors))?;
    }

    let mut program = ret.program;
    let semantic_ret = SemanticBuilder::new().build(&program);
    if !semantic_ret.errors.is_empty() {
      Err(compile_error(module_id, &semantic_ret.errors))?;
    }
    let scoping = semantic_ret.semantic.into_scoping();

    let transform_options = TransformOptions::from(ESTarget::ESNext);
    let transformer_return = Transformer::new(&allocator, Path::new(module_id), &transform_options)
      .build_with_scoping(scoping, &mut program);

    let errors = transformer_return
      .errors
      .into_iter()
      .filter(|item| matches!(item.severity, Severity::Error))
      .collect::<Vec<_>>();
    if !errors.is_empty() {
      Err(compile_error(module_id, &errors))?;
    }

    Ok(Codegen::new().build(&program).code)
  }

  pub fn minify(source_text: &str) -> BuildResult<String> {
    let allocator = Allocator::default();
    let source_type = SourceType::default();

    let ret = Parser::new(&allocator, source_text, source_type).parse();
    if !ret.errors.is_empty() || ret.panicked {
      Err(compile_error("<bundle>", &ret.errors))?;
    }

    let mut program = ret.program;
    let ret = Minifier::new(MinifierOptions::default()).build(&allocator, &mut program);

    let ret = Codegen::new()
      .with_options(CodegenOptions::minify())
      .with_scoping(ret.scoping)
      .build(&program);

    Ok(ret.code)
  }
}

fn compile_error(module_id: &str, errors: &[OxcDiagnostic]) -> BundleError {
  let message = if errors.is_empty() {
    "unrecoverable syntax error".to_string()
  } else {
    errors.iter().map(|error| error.message.to_string()).collect::<Vec<_>>().join("; ")
  };
  BundleError::Compile { module: module_id.to_string(), message }
}
