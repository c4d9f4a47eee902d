//! Reference pass: every use of an imported name becomes its qualified path.
//!
//! Runs after the declaration rewriters have filled (and frozen) the binding
//! table. Scopes are tracked by counting `enter_scope` calls and function
//! bodies, which lines up with the indices `ScopeTree::build` handed out for
//! the same program.

use oxc_ast::ast::{
    AssignmentTargetPropertyIdentifier, Class, ClassType, Declaration,
    ExportAllDeclaration, ExportDefaultDeclaration, ExportDefaultDeclarationKind,
    ExportNamedDeclaration, Expression, FunctionBody, IdentifierReference, ImportDeclaration,
    ImportExpression, MetaProperty, ObjectProperty, Program,
};
use oxc_ast_visit::{walk, Visit};
use oxc_syntax::scope::{ScopeFlags, ScopeId};
use std::cell::Cell;
use std::collections::HashSet;

use crate::context::RewriteContext;
use crate::error::{RewriteError, RewriteResult};
use crate::scope::{ScopeIndex, ScopeTree};
use crate::special;

pub struct ReferenceRewriter<'c, 's> {
    ctx: &'c mut RewriteContext<'s>,
    scopes: &'c ScopeTree,
    stack: Vec<ScopeIndex>,
    next_scope: ScopeIndex,
    /// Where a hoisted superclass goes when the class sits behind `export`.
    hoist_anchor: Option<u32>,
    hoisted: HashSet<(ScopeIndex, String)>,
    /// Superclass identifiers left as-is because a local constant now holds them.
    skip: HashSet<u32>,
    rewritten: usize,
    error: Option<RewriteError>,
}

impl<'c, 's> ReferenceRewriter<'c, 's> {
    pub fn new(ctx: &'c mut RewriteContext<'s>, scopes: &'c ScopeTree) -> Self {
        ReferenceRewriter {
            ctx,
            scopes,
            stack: Vec::new(),
            next_scope: 0,
            hoist_anchor: None,
            hoisted: HashSet::new(),
            skip: HashSet::new(),
            rewritten: 0,
            error: None,
        }
    }

    pub fn run(mut self, program: &Program<'_>) -> RewriteResult<usize> {
        self.visit_program(program);
        if let Some(err) = self.error {
            return Err(err);
        }
        if self.next_scope != self.scopes.len() {
            return Err(RewriteError::malformed(
                format!(
                    "scope walk mismatch: entered {} scopes, tree has {}",
                    self.next_scope,
                    self.scopes.len()
                ),
                program.span.start,
            ));
        }
        Ok(self.rewritten)
    }

    fn current(&self) -> ScopeIndex {
        self.stack.last().copied().unwrap_or(0)
    }

    /// Qualified path for `name` if it refers to an import from the current scope.
    fn qualify(&self, name: &str) -> Option<String> {
        let path = self.ctx.bindings.get(name)?;
        if self.scopes.resolve(name, self.current()).is_import_bound() {
            Some(path.to_string())
        } else {
            None
        }
    }

    fn record(&mut self, result: RewriteResult<()>) {
        if let Err(err) = result {
            self.error.get_or_insert(err);
        }
    }
}

impl<'a, 'c, 's> Visit<'a> for ReferenceRewriter<'c, 's> {
    fn enter_scope(&mut self, _flags: ScopeFlags, _scope_id: &Cell<Option<ScopeId>>) {
        self.stack.push(self.next_scope);
        self.next_scope += 1;
    }

    fn leave_scope(&mut self) {
        self.stack.pop();
    }

    // Mirrors the body scope `ScopeTree::build` opens below the parameters.
    fn visit_function_body(&mut self, body: &FunctionBody<'a>) {
        self.stack.push(self.next_scope);
        self.next_scope += 1;
        walk::walk_function_body(self, body);
        self.stack.pop();
    }

    fn visit_import_declaration(&mut self, _decl: &ImportDeclaration<'a>) {}

    fn visit_export_all_declaration(&mut self, _decl: &ExportAllDeclaration<'a>) {}

    fn visit_export_named_declaration(&mut self, decl: &ExportNamedDeclaration<'a>) {
        if let Some(declaration) = &decl.declaration {
            if matches!(declaration, Declaration::ClassDeclaration(_)) {
                self.hoist_anchor = Some(decl.span.start);
            }
            self.visit_declaration(declaration);
            self.hoist_anchor = None;
        }
    }

    fn visit_export_default_declaration(&mut self, decl: &ExportDefaultDeclaration<'a>) {
        if let ExportDefaultDeclarationKind::ClassDeclaration(class) = &decl.declaration {
            if class.id.is_some() {
                self.hoist_anchor = Some(decl.span.start);
            }
        }
        self.visit_export_default_declaration_kind(&decl.declaration);
        self.hoist_anchor = None;
    }

    fn visit_identifier_reference(&mut self, ident: &IdentifierReference<'a>) {
        if self.skip.contains(&ident.span.start) {
            return;
        }
        if let Some(path) = self.qualify(&ident.name) {
            tracing::trace!(target: "esm_rewrite::references", name = %ident.name, %path);
            self.ctx.edits.replace(ident.span.start, ident.span.end, path);
            self.rewritten += 1;
        }
    }

    fn visit_object_property(&mut self, prop: &ObjectProperty<'a>) {
        if prop.shorthand {
            if let Expression::Identifier(ident) = &prop.value {
                if let Some(path) = self.qualify(&ident.name) {
                    self.ctx.edits.replace(
                        ident.span.start,
                        ident.span.end,
                        format!("{}: {}", ident.name, path),
                    );
                    self.rewritten += 1;
                }
                return;
            }
        }
        walk::walk_object_property(self, prop);
    }

    // `({ foo } = obj)` writes through to the import.
    fn visit_assignment_target_property_identifier(
        &mut self,
        prop: &AssignmentTargetPropertyIdentifier<'a>,
    ) {
        let binding = &prop.binding;
        if let Some(path) = self.qualify(&binding.name) {
            self.ctx.edits.replace(
                binding.span.start,
                binding.span.end,
                format!("{}: {}", binding.name, path),
            );
            self.rewritten += 1;
        }
        if let Some(init) = &prop.init {
            self.visit_expression(init);
        }
    }

    fn visit_import_expression(&mut self, expr: &ImportExpression<'a>) {
        let result = special::rewrite_dynamic_import(expr, self.ctx);
        self.record(result);
        walk::walk_import_expression(self, expr);
    }

    fn visit_meta_property(&mut self, meta: &MetaProperty<'a>) {
        if special::is_import_meta(meta) {
            special::rewrite_import_meta(meta, self.ctx);
        }
    }

    fn visit_class(&mut self, class: &Class<'a>) {
        let anchor = self.hoist_anchor.take();
        if matches!(class.r#type, ClassType::ClassDeclaration) && class.id.is_some() {
            if let Some(Expression::Identifier(ident)) = &class.super_class {
                if let Some(path) = self.qualify(&ident.name) {
                    let name = ident.name.to_string();
                    let scope = self.current();
                    if self.hoisted.insert((scope, name.clone())) {
                        let at = anchor.unwrap_or(class.span.start);
                        tracing::trace!(target: "esm_rewrite::references", superclass = %name, at, "hoisted");
                        self.ctx
                            .edits
                            .insert(at, special::hoisted_superclass(&name, &path));
                    }
                    self.skip.insert(ident.span.start);
                }
            }
        }
        walk::walk_class(self, class);
    }
}
