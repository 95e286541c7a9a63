mod impl_visit;

use arcstr::ArcStr;
use oxc::{
  ast::ast::{ModuleDeclaration, Program},
  ast_visit::Visit,
  span::Span,
};
use oxc_index::IndexVec;
use portalpack_common::{ImportKind, ImportRecordIdx, RawImportRecord};
use rustc_hash::FxHashMap;

#[derive(Debug, Default)]
pub struct ScanResult {
  pub import_records: IndexVec<ImportRecordIdx, RawImportRecord>,
  /// Keyed by the span of the statement for static imports and of the whole `import()` expression
  /// for dynamic ones.
  pub imports: FxHashMap<Span, ImportRecordIdx>,
  /// The first `await` outside of any function. Factories are plain functions, so such a module
  /// cannot be bundled.
  pub top_level_await: Option<Span>,
}

/// Collects every module request of a program, in source order.
pub struct AstScanner {
  result: ScanResult,
  function_depth: u32,
}

impl AstScanner {
  pub fn new() -> Self {
    Self { result: ScanResult::default(), function_depth: 0 }
  }

  pub fn scan(mut self, program: &Program) -> ScanResult {
    self.visit_program(program);
    self.result
  }

  fn add_import_record(&mut self, specifier: &str, kind: ImportKind, span: Span) -> ImportRecordIdx {
    let idx = self.result.import_records.push(RawImportRecord::new(ArcStr::from(specifier), kind, span));
    self.result.imports.insert(span, idx);
    idx
  }

  fn check_top_level_await(&mut self, span: Span) {
    if self.function_depth == 0 && self.result.top_level_await.is_none() {
      self.result.top_level_await = Some(span);
    }
  }

  fn scan_module_decl(&mut self, decl: &ModuleDeclaration) {
    match decl {
      ModuleDeclaration::ImportDeclaration(decl) => {
        self.add_import_record(decl.source.value.as_str(), ImportKind::Import, decl.span);
      }
      ModuleDeclaration::ExportAllDeclaration(decl) => {
        self.add_import_record(decl.source.value.as_str(), ImportKind::Import, decl.span);
      }
      ModuleDeclaration::ExportNamedDeclaration(decl) => {
        if let Some(source) = &decl.source {
          self.add_import_record(source.value.as_str(), ImportKind::Import, decl.span);
        }
      }
      _ => {}
    }
  }
}

#[cfg(test)]
mod tests {
  use oxc::span::SourceType;
  use portalpack_common::ImportKind;
  use portalpack_ecmascript::EcmaCompiler;

  use super::AstScanner;

  fn scan(source: &str) -> Vec<(String, ImportKind)> {
    let ast = EcmaCompiler::parse("test", source, SourceType::mjs()).unwrap();
    let result = AstScanner::new().scan(ast.program());
    result.import_records.iter().map(|rec| (rec.specifier.to_string(), rec.kind)).collect()
  }

  #[test]
  fn collects_requests_in_source_order() {
    let records = scan(
      "import a from 'a';\nexport * from 'b';\nexport { c } from 'c';\nconst d = () => import('d');\nimport 'e';",
    );
    assert_eq!(
      records,
      vec![
        ("a".to_string(), ImportKind::Import),
        ("b".to_string(), ImportKind::Import),
        ("c".to_string(), ImportKind::Import),
        ("d".to_string(), ImportKind::DynamicImport),
        ("e".to_string(), ImportKind::Import),
      ]
    );
  }

  #[test]
  fn ignores_computed_dynamic_imports_and_local_exports() {
    let records = scan("const name = 'x';\nexport { name };\nimport(name);");
    assert!(records.is_empty());
  }

  fn top_level_await(source: &str) -> Option<String> {
    let ast = EcmaCompiler::parse("test", source, SourceType::mjs()).unwrap();
    let span = AstScanner::new().scan(ast.program()).top_level_await?;
    Some(span.source_text(source).to_string())
  }

  #[test]
  fn finds_top_level_await() {
    assert_eq!(top_level_await("const a = 1;\nawait a;"), Some("await a".to_string()));
    assert_eq!(
      top_level_await("for await (const x of xs) {}"),
      Some("for await (const x of xs) {}".to_string())
    );
    assert_eq!(top_level_await("if (ok) { await run(); }"), Some("await run()".to_string()));
  }

  #[test]
  fn await_inside_functions_is_not_top_level() {
    assert_eq!(
      top_level_await(
        "async function a() { await 1; }\nconst b = async () => await 2;\nclass C { async m() { for await (const x of y) {} } }"
      ),
      None
    );
  }
}
