mod impl_visit;

use oxc::{
  ast::ast::{
    BindingPattern, BindingPatternKind, Declaration, ExportDefaultDeclaration,
    ExportDefaultDeclarationKind, IdentifierReference, ImportDeclarationSpecifier,
    ModuleDeclaration, ModuleExportName,
  },
  ast_visit::Visit,
  semantic::{Scoping, SemanticBuilder, SymbolId},
  span::{GetSpan, Span},
};
use portalpack_common::{ModuleIdx, NormalModule};
use portalpack_ecmascript::EcmaAst;
use portalpack_utils::{
  concat_string,
  ecmascript::{property_access_str, to_property_key, to_string_literal},
  indexmap::FxIndexMap,
};
use rustc_hash::FxHashMap;
use string_wizard::MagicString;

use crate::{
  generate_stage::runtime::{DEFAULT_EXPORT_BINDING, EXPORTS_PARAM, NAMESPACE_BINDING_PREFIX},
  types::IndexModules,
};

pub struct IsolatingModuleFinalizerContext<'me> {
  pub module: &'me NormalModule,
  pub modules: &'me IndexModules,
}

/// Wraps one module into a `__portal_define` factory.
///
/// Import statements become `__portal_require` calls bound to namespace variables and every
/// reference to an imported binding reads through that namespace, which keeps bindings live across
/// cycles. Exports turn into getters installed before the body runs.
pub struct IsolatingModuleFinalizer<'me> {
  ctx: &'me IsolatingModuleFinalizerContext<'me>,
  scoping: Scoping,
  magic_string: MagicString<'me>,
  /// Imported module to the variable holding its namespace, in first import order.
  namespaces: FxIndexMap<ModuleIdx, String>,
  re_exports: Vec<String>,
  /// Exported name to the expression its getter returns.
  exports: FxIndexMap<String, String>,
  import_bindings: FxHashMap<SymbolId, String>,
}

impl<'me> IsolatingModuleFinalizer<'me> {
  pub fn finalize(ctx: &'me IsolatingModuleFinalizerContext<'me>, ast: &'me EcmaAst) -> String {
    let program = ast.program();
    let scoping = SemanticBuilder::new().build(program).semantic.into_scoping();

    let mut finalizer = Self {
      ctx,
      scoping,
      magic_string: MagicString::new(ast.source().as_str()),
      namespaces: FxIndexMap::default(),
      re_exports: Vec::new(),
      exports: FxIndexMap::default(),
      import_bindings: FxHashMap::default(),
    };

    if let Some(hashbang) = &program.hashbang {
      finalizer.remove(hashbang.span);
    }

    // Imports are bound before local exports are looked at, since `export { a }` may precede the
    // import of `a`.
    let module_decls = program.body.iter().filter_map(|stmt| stmt.as_module_declaration());
    for decl in module_decls.clone() {
      finalizer.rewrite_module_request(decl);
    }
    for decl in module_decls {
      finalizer.rewrite_local_export(decl);
    }

    finalizer.visit_program(program);
    finalizer.render()
  }

  fn remove(&mut self, span: Span) {
    self.magic_string.remove(span.start as usize, span.end as usize);
  }

  fn update(&mut self, span: Span, content: String) {
    self.magic_string.update(span.start as usize, span.end as usize, content);
  }

  fn importee_of(&self, span: Span) -> ModuleIdx {
    let rec_idx = self.ctx.module.imports[&span];
    self.ctx.module.import_records[rec_idx].state
  }

  fn namespace_of(&mut self, span: Span) -> String {
    let importee = self.importee_of(span);
    let next = self.namespaces.len();
    self
      .namespaces
      .entry(importee)
      .or_insert_with(|| concat_string!(NAMESPACE_BINDING_PREFIX, next.to_string()))
      .clone()
  }

  fn import_binding_of(&self, ident: &IdentifierReference) -> Option<&String> {
    let reference_id = ident.reference_id.get()?;
    let symbol_id = self.scoping.get_reference(reference_id).symbol_id()?;
    self.import_bindings.get(&symbol_id)
  }

  fn rewrite_module_request(&mut self, decl: &ModuleDeclaration) {
    match decl {
      ModuleDeclaration::ImportDeclaration(decl) => {
        self.remove(decl.span);
        let namespace = self.namespace_of(decl.span);
        for specifier in decl.specifiers.iter().flatten() {
          let (local, replacement) = match specifier {
            ImportDeclarationSpecifier::ImportSpecifier(spec) => {
              (&spec.local, property_access_str(&namespace, spec.imported.name().as_str()))
            }
            ImportDeclarationSpecifier::ImportDefaultSpecifier(spec) => {
              (&spec.local, property_access_str(&namespace, "default"))
            }
            ImportDeclarationSpecifier::ImportNamespaceSpecifier(spec) => {
              (&spec.local, namespace.clone())
            }
          };
          self.import_bindings.insert(local.symbol_id(), replacement);
        }
      }
      ModuleDeclaration::ExportAllDeclaration(decl) => {
        self.remove(decl.span);
        let namespace = self.namespace_of(decl.span);
        match &decl.exported {
          Some(exported) => {
            self.exports.insert(exported.name().to_string(), namespace);
          }
          None => self.re_exports.push(concat_string!(
            "__portal_re_export(",
            EXPORTS_PARAM,
            ", ",
            namespace,
            ");"
          )),
        }
      }
      ModuleDeclaration::ExportNamedDeclaration(decl) if decl.source.is_some() => {
        self.remove(decl.span);
        let namespace = self.namespace_of(decl.span);
        for spec in &decl.specifiers {
          self.exports.insert(
            spec.exported.name().to_string(),
            property_access_str(&namespace, spec.local.name().as_str()),
          );
        }
      }
      _ => {}
    }
  }

  fn rewrite_local_export(&mut self, decl: &ModuleDeclaration) {
    match decl {
      ModuleDeclaration::ExportNamedDeclaration(decl) if decl.source.is_none() => {
        if let Some(declaration) = &decl.declaration {
          self.remove(Span::new(decl.span.start, declaration.span().start));
          let mut names = Vec::new();
          collect_declared_names(declaration, &mut names);
          for name in names {
            self.exports.insert(name.clone(), name);
          }
        } else {
          self.remove(decl.span);
          for spec in &decl.specifiers {
            let value = match &spec.local {
              ModuleExportName::IdentifierReference(ident) => {
                self.import_binding_of(ident).cloned().unwrap_or_else(|| ident.name.to_string())
              }
              local => local.name().to_string(),
            };
            self.exports.insert(spec.exported.name().to_string(), value);
          }
        }
      }
      ModuleDeclaration::ExportDefaultDeclaration(decl) => self.rewrite_default_export(decl),
      _ => {}
    }
  }

  fn rewrite_default_export(&mut self, decl: &ExportDefaultDeclaration) {
    let keyword_span = Span::new(decl.span.start, decl.declaration.span().start);

    if let ExportDefaultDeclarationKind::FunctionDeclaration(func) = &decl.declaration {
      self.remove(keyword_span);
      let name = match &func.id {
        Some(id) => id.name.to_string(),
        None => {
          // Named so the declaration stays hoisted for modules in a cycle.
          let params_start = func.params.span.start as usize;
          self.magic_string.append_left(params_start, concat_string!(" ", DEFAULT_EXPORT_BINDING));
          DEFAULT_EXPORT_BINDING.to_string()
        }
      };
      self.exports.insert("default".to_string(), name);
      return;
    }

    let named_class = match &decl.declaration {
      ExportDefaultDeclarationKind::ClassDeclaration(class) => class.id.as_ref(),
      _ => None,
    };
    if let Some(id) = named_class {
      self.remove(keyword_span);
      self.exports.insert("default".to_string(), id.name.to_string());
    } else {
      self.update(keyword_span, concat_string!("var ", DEFAULT_EXPORT_BINDING, " = "));
      self.magic_string.append_left(decl.span.end as usize, ";");
      self.exports.insert("default".to_string(), DEFAULT_EXPORT_BINDING.to_string());
    }
  }

  fn render(self) -> String {
    let Self { ctx, magic_string, namespaces, re_exports, exports, .. } = self;

    let mut lines = Vec::with_capacity(namespaces.len() + re_exports.len() + 4);
    lines.push(concat_string!(
      "__portal_define(",
      to_string_literal(&ctx.module.stable_id),
      ", function (",
      EXPORTS_PARAM,
      ") {"
    ));

    if !exports.is_empty() {
      let getters = exports
        .iter()
        .map(|(name, value)| concat_string!(to_property_key(name), ": () => ", value))
        .collect::<Vec<_>>();
      lines.push(concat_string!("__portal_export(", EXPORTS_PARAM, ", { ", getters.join(", "), " });"));
    }

    for (importee, namespace) in namespaces {
      let importee_id = to_string_literal(&ctx.modules[importee].stable_id);
      lines.push(concat_string!("var ", namespace, " = __portal_require(", importee_id, ");"));
    }
    lines.extend(re_exports);
    lines.push(magic_string.to_string());
    lines.push("});".to_string());

    lines.join("\n")
  }
}

fn collect_declared_names(declaration: &Declaration, names: &mut Vec<String>) {
  match declaration {
    Declaration::VariableDeclaration(decl) => {
      for declarator in &decl.declarations {
        collect_binding_names(&declarator.id, names);
      }
    }
    Declaration::FunctionDeclaration(func) => names.extend(func.id.as_ref().map(|id| id.name.to_string())),
    Declaration::ClassDeclaration(class) => names.extend(class.id.as_ref().map(|id| id.name.to_string())),
    // Type-only declarations have no runtime binding.
    _ => {}
  }
}

fn collect_binding_names(pattern: &BindingPattern, names: &mut Vec<String>) {
  match &pattern.kind {
    BindingPatternKind::BindingIdentifier(ident) => names.push(ident.name.to_string()),
    BindingPatternKind::ObjectPattern(pattern) => {
      for property in &pattern.properties {
        collect_binding_names(&property.value, names);
      }
      if let Some(rest) = &pattern.rest {
        collect_binding_names(&rest.argument, names);
      }
    }
    BindingPatternKind::ArrayPattern(pattern) => {
      for element in pattern.elements.iter().flatten() {
        collect_binding_names(element, names);
      }
      if let Some(rest) = &pattern.rest {
        collect_binding_names(&rest.argument, names);
      }
    }
    BindingPatternKind::AssignmentPattern(pattern) => collect_binding_names(&pattern.left, names),
  }
}
