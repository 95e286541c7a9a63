use oxc::{
  ast::ast::{
    ArrowFunctionExpression, AwaitExpression, Expression, ForOfStatement, Function,
    ImportExpression, Statement,
  },
  ast_visit::{Visit, walk},
  syntax::scope::ScopeFlags,
};
use portalpack_common::ImportKind;

use super::AstScanner;

impl<'ast> Visit<'ast> for AstScanner {
  fn visit_statement(&mut self, stmt: &Statement<'ast>) {
    if let Some(decl) = stmt.as_module_declaration() {
      self.scan_module_decl(decl);
    }
    walk::walk_statement(self, stmt);
  }

  fn visit_import_expression(&mut self, expr: &ImportExpression<'ast>) {
    if let Expression::StringLiteral(request) = &expr.source {
      self.add_import_record(request.value.as_str(), ImportKind::DynamicImport, expr.span);
    }
    walk::walk_import_expression(self, expr);
  }

  fn visit_function(&mut self, func: &Function<'ast>, flags: ScopeFlags) {
    self.function_depth += 1;
    walk::walk_function(self, func, flags);
    self.function_depth -= 1;
  }

  fn visit_arrow_function_expression(&mut self, func: &ArrowFunctionExpression<'ast>) {
    self.function_depth += 1;
    walk::walk_arrow_function_expression(self, func);
    self.function_depth -= 1;
  }

  fn visit_await_expression(&mut self, expr: &AwaitExpression<'ast>) {
    self.check_top_level_await(expr.span);
    walk::walk_await_expression(self, expr);
  }

  fn visit_for_of_statement(&mut self, stmt: &ForOfStatement<'ast>) {
    if stmt.r#await {
      self.check_top_level_await(stmt.span);
    }
    walk::walk_for_of_statement(self, stmt);
  }
}
