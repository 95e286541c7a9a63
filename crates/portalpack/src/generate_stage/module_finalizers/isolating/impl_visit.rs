use oxc::{
  ast::ast::{Expression, IdentifierReference, ImportExpression, ObjectProperty, Statement},
  ast_visit::{Visit, walk},
};
use portalpack_utils::{concat_string, ecmascript::to_string_literal};

use super::IsolatingModuleFinalizer;

impl<'ast> Visit<'ast> for IsolatingModuleFinalizer<'_> {
  fn visit_statement(&mut self, stmt: &Statement<'ast>) {
    match stmt {
      // Removed as a whole while binding imports.
      Statement::ImportDeclaration(_) | Statement::ExportAllDeclaration(_) => {}
      Statement::ExportNamedDeclaration(decl) => {
        if let Some(declaration) = &decl.declaration {
          self.visit_declaration(declaration);
        }
      }
      _ => walk::walk_statement(self, stmt),
    }
  }

  fn visit_identifier_reference(&mut self, ident: &IdentifierReference<'ast>) {
    if let Some(replacement) = self.import_binding_of(ident).cloned() {
      self.update(ident.span, replacement);
    }
  }

  fn visit_object_property(&mut self, prop: &ObjectProperty<'ast>) {
    if prop.shorthand {
      if let Expression::Identifier(ident) = &prop.value {
        if let Some(replacement) = self.import_binding_of(ident).cloned() {
          self.update(prop.span, concat_string!(ident.name.as_str(), ": ", replacement));
          return;
        }
      }
    }
    walk::walk_object_property(self, prop);
  }

  fn visit_import_expression(&mut self, expr: &ImportExpression<'ast>) {
    if self.ctx.module.imports.contains_key(&expr.span) {
      let importee = self.importee_of(expr.span);
      let importee_id = to_string_literal(&self.ctx.modules[importee].stable_id);
      self.update(
        expr.span,
        concat_string!("Promise.resolve().then(() => __portal_require(", importee_id, "))"),
      );
    } else {
      walk::walk_import_expression(self, expr);
    }
  }
}
