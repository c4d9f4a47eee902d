//! Lexical scopes of one module and the shadowing rule the rewriter relies on.
//!
//! `ScopeTree::build` walks the program once with oxc's `Visit` and records,
//! for every scope oxc enters, the names declared directly in it. Function
//! bodies get one extra scope below their parameters. Scope indices are handed
//! out in walk order, so any later full walk of the same program that opens
//! the same extra body scopes can recover the current scope by counting.

use oxc_ast::ast::{
    ArrowFunctionExpression, BindingIdentifier, BindingPattern, CatchParameter, Class, ClassBody,
    ClassType, FormalParameters, Function, FunctionBody, FunctionType, ImportDeclaration,
    ImportDeclarationSpecifier, Program, VariableDeclaration, VariableDeclarationKind,
};
use oxc_ast_visit::{walk, Visit};
use oxc_syntax::scope::{ScopeFlags, ScopeId};
use std::cell::Cell;
use std::collections::HashMap;

pub type ScopeIndex = usize;

/// How a name entered a scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationKind {
    ModuleImport,
    Var,
    Let,
    Const,
    Function,
    Class,
    Parameter,
    CatchParameter,
    DestructuredElement,
}

/// Answer to "what does this name refer to from here?".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Nearest declaration is an import binding.
    Import,
    /// No declaration anywhere up to the module root.
    Unresolved,
    /// A local declaration wins over any outer import.
    Shadowed(DeclarationKind),
}

impl Resolution {
    pub fn is_import_bound(self) -> bool {
        !matches!(self, Resolution::Shadowed(_))
    }
}

#[derive(Debug, Default)]
pub struct Scope {
    pub parent: Option<ScopeIndex>,
    /// Module top, functions, arrows and class static blocks collect `var`s.
    pub hoists_var: bool,
    pub declarations: HashMap<String, DeclarationKind>,
}

#[derive(Debug, Default)]
pub struct ScopeTree {
    scopes: Vec<Scope>,
}

impl ScopeTree {
    pub fn build(program: &Program<'_>) -> Self {
        let mut builder = ScopeBuilder::default();
        builder.visit_program(program);
        builder.tree
    }

    pub fn root(&self) -> ScopeIndex {
        0
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    pub(crate) fn get(&self, scope: ScopeIndex) -> Option<&Scope> {
        self.scopes.get(scope)
    }

    pub fn declaration(&self, scope: ScopeIndex, name: &str) -> Option<DeclarationKind> {
        self.scopes.get(scope)?.declarations.get(name).copied()
    }

    /// Walks outward from `scope`; the nearest declaration of `name` decides.
    pub fn resolve(&self, name: &str, scope: ScopeIndex) -> Resolution {
        let mut current = Some(scope);
        while let Some(index) = current {
            let Some(entry) = self.scopes.get(index) else {
                break;
            };
            if let Some(kind) = entry.declarations.get(name) {
                return match kind {
                    DeclarationKind::ModuleImport => Resolution::Import,
                    other => Resolution::Shadowed(*other),
                };
            }
            current = entry.parent;
        }
        Resolution::Unresolved
    }

    fn push(&mut self, parent: Option<ScopeIndex>, hoists_var: bool) -> ScopeIndex {
        self.scopes.push(Scope {
            parent,
            hoists_var,
            declarations: HashMap::new(),
        });
        self.scopes.len() - 1
    }

    fn declare(&mut self, scope: ScopeIndex, name: String, kind: DeclarationKind) {
        if let Some(entry) = self.scopes.get_mut(scope) {
            entry.declarations.entry(name).or_insert(kind);
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// PATTERN NAMES
// ═══════════════════════════════════════════════════════════════════════════════

/// Collects the names a pattern binds. Default-value expressions are walked
/// for nested patterns but functions and classes inside them are not entered.
#[derive(Default)]
struct PatternNames {
    names: Vec<String>,
}

impl<'a> Visit<'a> for PatternNames {
    fn visit_binding_identifier(&mut self, ident: &BindingIdentifier<'a>) {
        self.names.push(ident.name.to_string());
    }

    fn visit_function(&mut self, _func: &Function<'a>, _flags: ScopeFlags) {}

    fn visit_arrow_function_expression(&mut self, _func: &ArrowFunctionExpression<'a>) {}

    fn visit_class(&mut self, _class: &Class<'a>) {}
}

pub fn pattern_names(pattern: &BindingPattern<'_>) -> Vec<String> {
    let mut collector = PatternNames::default();
    collector.visit_binding_pattern(pattern);
    collector.names
}

pub fn parameter_names(params: &FormalParameters<'_>) -> Vec<String> {
    let mut collector = PatternNames::default();
    collector.visit_formal_parameters(params);
    collector.names
}

// ═══════════════════════════════════════════════════════════════════════════════
// SCOPE BUILDER
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Default)]
struct ScopeBuilder {
    tree: ScopeTree,
    stack: Vec<ScopeIndex>,
    /// Name of a function expression, bound inside the scope it opens next.
    pending_function_name: Option<String>,
    /// One entry per class being walked; `Some` for named class expressions.
    class_names: Vec<Option<String>>,
}

impl ScopeBuilder {
    fn current(&self) -> ScopeIndex {
        self.stack.last().copied().unwrap_or(0)
    }

    fn var_scope(&self) -> ScopeIndex {
        self.stack
            .iter()
            .rev()
            .copied()
            .find(|&index| self.tree.get(index).is_some_and(|scope| scope.hoists_var))
            .unwrap_or(0)
    }

    fn declare_pattern(
        &mut self,
        pattern: &BindingPattern<'_>,
        scope: ScopeIndex,
        kind: DeclarationKind,
    ) {
        let kind = match pattern {
            BindingPattern::BindingIdentifier(_) => kind,
            _ => DeclarationKind::DestructuredElement,
        };
        for name in pattern_names(pattern) {
            self.tree.declare(scope, name, kind);
        }
    }
}

impl<'a> Visit<'a> for ScopeBuilder {
    fn enter_scope(&mut self, flags: ScopeFlags, _scope_id: &Cell<Option<ScopeId>>) {
        let hoists_var =
            flags.intersects(ScopeFlags::Top | ScopeFlags::Function | ScopeFlags::ClassStaticBlock);
        let parent = self.stack.last().copied();
        let index = self.tree.push(parent, hoists_var);
        self.stack.push(index);
        if let Some(name) = self.pending_function_name.take() {
            self.tree.declare(index, name, DeclarationKind::Function);
        }
    }

    fn leave_scope(&mut self) {
        self.stack.pop();
    }

    fn visit_import_declaration(&mut self, decl: &ImportDeclaration<'a>) {
        let scope = self.current();
        if let Some(specifiers) = &decl.specifiers {
            for specifier in specifiers {
                let local = match specifier {
                    ImportDeclarationSpecifier::ImportSpecifier(s) => &s.local,
                    ImportDeclarationSpecifier::ImportDefaultSpecifier(s) => &s.local,
                    ImportDeclarationSpecifier::ImportNamespaceSpecifier(s) => &s.local,
                };
                self.tree
                    .declare(scope, local.name.to_string(), DeclarationKind::ModuleImport);
            }
        }
    }

    fn visit_variable_declaration(&mut self, decl: &VariableDeclaration<'a>) {
        let (scope, kind) = match decl.kind {
            VariableDeclarationKind::Var => (self.var_scope(), DeclarationKind::Var),
            VariableDeclarationKind::Let => (self.current(), DeclarationKind::Let),
            _ => (self.current(), DeclarationKind::Const),
        };
        for declarator in &decl.declarations {
            self.declare_pattern(&declarator.id, scope, kind);
        }
        walk::walk_variable_declaration(self, decl);
    }

    fn visit_function(&mut self, func: &Function<'a>, flags: ScopeFlags) {
        if let Some(id) = &func.id {
            if matches!(func.r#type, FunctionType::FunctionDeclaration) {
                let scope = self.current();
                self.tree
                    .declare(scope, id.name.to_string(), DeclarationKind::Function);
            } else {
                self.pending_function_name = Some(id.name.to_string());
            }
        }
        walk::walk_function(self, func, flags);
    }

    // Body declarations live one level below the parameters, so defaults
    // like `(a = x) => { let x }` still see the outer `x`.
    fn visit_function_body(&mut self, body: &FunctionBody<'a>) {
        let parent = self.current();
        let index = self.tree.push(Some(parent), true);
        self.stack.push(index);
        walk::walk_function_body(self, body);
        self.stack.pop();
    }

    fn visit_formal_parameters(&mut self, params: &FormalParameters<'a>) {
        let scope = self.current();
        for name in parameter_names(params) {
            self.tree.declare(scope, name, DeclarationKind::Parameter);
        }
        walk::walk_formal_parameters(self, params);
    }

    fn visit_catch_parameter(&mut self, param: &CatchParameter<'a>) {
        let scope = self.current();
        for name in pattern_names(&param.pattern) {
            self.tree.declare(scope, name, DeclarationKind::CatchParameter);
        }
        walk::walk_catch_parameter(self, param);
    }

    fn visit_class(&mut self, class: &Class<'a>) {
        let name = class.id.as_ref().map(|id| id.name.to_string());
        if matches!(class.r#type, ClassType::ClassDeclaration) {
            if let Some(name) = name {
                let scope = self.current();
                self.tree.declare(scope, name, DeclarationKind::Class);
            }
            self.class_names.push(None);
        } else {
            self.class_names.push(name);
        }
        walk::walk_class(self, class);
    }

    fn visit_class_body(&mut self, body: &ClassBody<'a>) {
        if let Some(Some(name)) = self.class_names.pop() {
            let scope = self.current();
            self.tree.declare(scope, name, DeclarationKind::Class);
        }
        walk::walk_class_body(self, body);
    }
}
