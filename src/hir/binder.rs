//! Binder — turns parsed syntax units into a [`TypeTable`].
//!
//! Binding runs in passes over all units of a project at once:
//!
//! 1. **Declare** namespaces and types (partial declarations merge), record
//!    `using` directives per namespace block.
//! 2. **Resolve usings**, outermost scopes first.
//! 3. **Bind bases**: resolve every base-list entry, split it into base class
//!    and interfaces, then give types without a base their implicit one.
//! 4. **Break cycles** in base-class chains.
//! 5. **Complete** constructed generics by substituting their definition's
//!    bases.
//!
//! The binder never fails. Anything it cannot make sense of becomes a
//! [`Diagnostic`] and a best-effort entry in the table.

use rustc_hash::{FxHashMap, FxHashSet};
use smol_str::SmolStr;
use tracing::{debug, info, trace, warn};

use super::diagnostics::{Diagnostic, DiagnosticCollector, codes};
use super::type_table::{
    Container, NamespaceId, TypeData, TypeId, TypeTable, predefined_type_name,
};
use crate::base::{FileId, TextRange};
use crate::index::{AttributeArgument, AttributeInfo, SourceLocation, TypeKind};
use crate::parser::{AstNode, NamespaceMember, TypeDecl, TypeRef, UsingDirective};
use crate::project::SyntaxUnit;

/// Everything the binder produced.
#[derive(Debug)]
pub struct BindOutput {
    pub types: TypeTable,
    /// Declared type of each type declaration, keyed by file and the
    /// declaration's range.
    pub declarations: FxHashMap<(FileId, TextRange), TypeId>,
    pub diagnostics: DiagnosticCollector,
}

/// Bind all `units` together.
pub fn bind(units: &[SyntaxUnit]) -> BindOutput {
    let mut binder = Binder::new(units);
    for unit in 0..units.len() {
        binder.declare_unit(unit);
    }
    binder.resolve_usings();
    binder.bind_bases();
    binder.apply_default_bases();
    binder.break_cycles();
    binder.table.complete_constructed();

    info!(
        units = units.len(),
        declarations = binder.declarations.len(),
        types = binder.table.len(),
        errors = binder.diagnostics.error_count(),
        warnings = binder.diagnostics.warning_count(),
        "bound project"
    );
    BindOutput {
        types: binder.table,
        declarations: binder.declarations,
        diagnostics: binder.diagnostics,
    }
}

// ============================================================================
// SCOPES
// ============================================================================

/// What a name can resolve to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Symbol {
    Namespace(NamespaceId),
    Type(TypeId),
}

/// The `using` directives of one namespace block (or of a file's top level).
#[derive(Debug)]
struct UsingScope {
    namespace: NamespaceId,
    unit: usize,
    parent: Option<usize>,
    directives: Vec<UsingDirective>,
    imports: Vec<NamespaceId>,
    static_types: Vec<TypeId>,
    aliases: FxHashMap<SmolStr, Symbol>,
}

/// Lookup context for a name.
#[derive(Clone, Debug)]
struct Scope {
    namespace: NamespaceId,
    /// Enclosing type declarations, outermost first.
    enclosing_types: Vec<TypeId>,
    /// Type whose type parameters are visible but whose members are not
    /// (the declaration whose base list is being bound).
    declaring_type: Option<TypeId>,
    using_scope: Option<usize>,
}

#[derive(Debug)]
struct DeclSite {
    unit: usize,
    decl: TypeDecl,
    ty: TypeId,
    scope: Scope,
}

// ============================================================================
// BINDER
// ============================================================================

struct Binder<'u> {
    units: &'u [SyntaxUnit],
    table: TypeTable,
    using_scopes: Vec<UsingScope>,
    sites: Vec<DeclSite>,
    declarations: FxHashMap<(FileId, TextRange), TypeId>,
    diagnostics: DiagnosticCollector,
}

fn decl_kind(decl: &TypeDecl) -> TypeKind {
    match decl {
        TypeDecl::Class(_) => TypeKind::Class,
        TypeDecl::Interface(_) => TypeKind::Interface,
        TypeDecl::Struct(_) => TypeKind::Struct,
        TypeDecl::Record(r) if r.is_struct() => TypeKind::RecordStruct,
        TypeDecl::Record(_) => TypeKind::Record,
        TypeDecl::Enum(_) => TypeKind::Enum,
    }
}

fn attribute_infos(decl: &TypeDecl) -> Vec<AttributeInfo> {
    decl.attributes()
        .into_iter()
        .filter_map(|attr| {
            let name = attr.name()?;
            let info = attr.args().into_iter().fold(AttributeInfo::new(name), |info, arg| {
                let argument = match arg.name() {
                    Some(name) => AttributeArgument::named(name, arg.value()),
                    None => AttributeArgument::positional(arg.value()),
                };
                info.with_argument(argument)
            });
            Some(info)
        })
        .collect()
}

impl<'u> Binder<'u> {
    fn new(units: &'u [SyntaxUnit]) -> Self {
        Self {
            units,
            table: TypeTable::new(),
            using_scopes: Vec::new(),
            sites: Vec::new(),
            declarations: FxHashMap::default(),
            diagnostics: DiagnosticCollector::new(),
        }
    }

    fn error(&mut self, unit: usize, range: TextRange, code: &str, message: String) {
        let unit = &self.units[unit];
        self.diagnostics.add(
            Diagnostic::error(unit.file(), range, unit.line_index(), message).with_code(code),
        );
    }

    fn warning(&mut self, unit: usize, range: TextRange, code: &str, message: String) {
        let unit = &self.units[unit];
        self.diagnostics.add(
            Diagnostic::warning(unit.file(), range, unit.line_index(), message).with_code(code),
        );
    }

    fn location(&self, unit: usize, decl: &TypeDecl) -> SourceLocation {
        let unit = &self.units[unit];
        let range = decl
            .name_node()
            .map(|n| n.syntax().text_range())
            .unwrap_or_else(|| decl.syntax().text_range());
        SourceLocation {
            file: unit.file(),
            range,
            start: unit.line_index().line_col(range.start()),
        }
    }

    // ------------------------------------------------------------------------
    // Pass 1: declarations
    // ------------------------------------------------------------------------

    fn push_using_scope(&mut self, unit: usize, namespace: NamespaceId, parent: Option<usize>) -> usize {
        self.using_scopes.push(UsingScope {
            namespace,
            unit,
            parent,
            directives: Vec::new(),
            imports: Vec::new(),
            static_types: Vec::new(),
            aliases: FxHashMap::default(),
        });
        self.using_scopes.len() - 1
    }

    fn declare_unit(&mut self, unit: usize) {
        let root = self.push_using_scope(unit, NamespaceId::GLOBAL, None);
        let members: Vec<_> = self.units[unit]
            .source_file()
            .map(|root| root.members().collect())
            .unwrap_or_default();
        let before = self.sites.len();
        self.declare_members(unit, members, NamespaceId::GLOBAL, root);
        debug!(
            file = %self.units[unit].file(),
            declarations = self.sites.len() - before,
            "declared unit"
        );
    }

    fn declare_members(
        &mut self,
        unit: usize,
        members: Vec<NamespaceMember>,
        namespace: NamespaceId,
        using_scope: usize,
    ) {
        for member in members {
            match member {
                NamespaceMember::Using(directive) => {
                    self.using_scopes[using_scope].directives.push(directive);
                }
                NamespaceMember::Namespace(decl) => {
                    let target = decl
                        .segments()
                        .iter()
                        .fold(namespace, |ns, segment| self.table.namespace_or_insert(ns, segment));
                    let inner = self.push_using_scope(unit, target, Some(using_scope));
                    self.declare_members(unit, decl.members().collect(), target, inner);
                }
                NamespaceMember::Type(decl) => {
                    let scope = Scope {
                        namespace,
                        enclosing_types: Vec::new(),
                        declaring_type: None,
                        using_scope: Some(using_scope),
                    };
                    self.declare_type(unit, decl, Container::Namespace(namespace), scope);
                }
                NamespaceMember::Attributes(_) => {}
            }
        }
    }

    fn declare_type(&mut self, unit: usize, decl: TypeDecl, container: Container, scope: Scope) {
        let Some(name) = decl.name() else {
            trace!(file = %self.units[unit].file(), "skipping type declaration without a name");
            for nested in decl.nested_types() {
                self.declare_type(unit, nested, container, scope.clone());
            }
            return;
        };

        let kind = decl_kind(&decl);
        let params = decl.type_params();
        let location = self.location(unit, &decl);
        let attributes = attribute_infos(&decl);
        let modifiers: Vec<SmolStr> = decl
            .modifiers()
            .into_iter()
            .map(|m| SmolStr::new(m.as_str()))
            .collect();
        let documentation = decl.doc_comment();

        let existing = self.table.member_type(container, &name, params.len());

        let id = match existing {
            Some(id) if self.table.get(id).kind == kind => {
                let data = self.table.get(id);
                let both_partial = decl.is_partial() && data.modifiers.iter().any(|m| m == "partial");
                if !both_partial && !data.implicit {
                    self.error(
                        unit,
                        location.range,
                        codes::DUPLICATE_DEFINITION,
                        format!("duplicate definition of {kind} '{name}'"),
                    );
                }
                trace!(name = %name, "merging type declaration");
                let data = self.table.get_mut(id);
                data.implicit = false;
                data.attributes.extend(attributes);
                for modifier in modifiers {
                    if !data.modifiers.contains(&modifier) {
                        data.modifiers.push(modifier);
                    }
                }
                if data.documentation.is_none() {
                    data.documentation = documentation;
                }
                data.locations.push(location);
                id
            }
            other => {
                if let Some(previous) = other {
                    let previous_kind = self.table.get(previous).kind;
                    self.error(
                        unit,
                        location.range,
                        codes::DUPLICATE_DEFINITION,
                        format!("'{name}' is already declared as {previous_kind}"),
                    );
                }
                let mut data = TypeData::new(name.as_str(), kind);
                data.attributes = attributes;
                data.modifiers = modifiers;
                data.documentation = documentation;
                data.locations.push(location);
                let id = self.table.add_generic_type(container, data, &params);
                trace!(name = %name, kind = %kind, "declared type");
                id
            }
        };

        self.declarations
            .insert((self.units[unit].file(), decl.syntax().text_range()), id);

        let mut inner = scope.clone();
        inner.enclosing_types.push(id);
        let nested: Vec<TypeDecl> = decl.nested_types().collect();
        self.sites.push(DeclSite {
            unit,
            decl,
            ty: id,
            scope,
        });
        for nested in nested {
            self.declare_type(unit, nested, Container::Type(id), inner.clone());
        }
    }

    // ------------------------------------------------------------------------
    // Pass 2: using directives
    // ------------------------------------------------------------------------

    fn resolve_usings(&mut self) {
        for index in 0..self.using_scopes.len() {
            let scope = Scope {
                namespace: self.using_scopes[index].namespace,
                enclosing_types: Vec::new(),
                declaring_type: None,
                using_scope: self.using_scopes[index].parent,
            };
            let unit = self.using_scopes[index].unit;
            let directives = std::mem::take(&mut self.using_scopes[index].directives);

            for directive in &directives {
                let Some(target) = directive.target() else {
                    continue;
                };
                let symbol = self.resolve_symbol(unit, &target, &scope);
                let written = target.text();
                let using = &mut self.using_scopes[index];
                match (directive.alias(), directive.is_static(), symbol) {
                    (Some(alias), _, Some(symbol)) => {
                        using.aliases.insert(SmolStr::new(alias), symbol);
                    }
                    (None, true, Some(Symbol::Type(ty))) => using.static_types.push(ty),
                    (None, false, Some(Symbol::Namespace(ns))) => using.imports.push(ns),
                    _ => {
                        trace!(target = %written, "unresolved using directive");
                        self.warning(
                            unit,
                            target.syntax().text_range(),
                            codes::UNRESOLVED_USING,
                            format!("using directive target '{written}' not found"),
                        );
                    }
                }
            }
            self.using_scopes[index].directives = directives;
        }
    }

    // ------------------------------------------------------------------------
    // Name lookup
    // ------------------------------------------------------------------------

    fn type_parameter(&self, owner: TypeId, name: &str) -> Option<TypeId> {
        self.table
            .get(owner)
            .type_parameters
            .iter()
            .copied()
            .find(|&p| self.table.get(p).name == name)
    }

    fn member(&self, container: Symbol, name: &str, arity: usize) -> Option<Symbol> {
        match container {
            Symbol::Namespace(ns) => self
                .table
                .member_type(Container::Namespace(ns), name, arity)
                .map(Symbol::Type)
                .or_else(|| {
                    (arity == 0)
                        .then(|| self.table.child_namespace(ns, name))
                        .flatten()
                        .map(Symbol::Namespace)
                }),
            Symbol::Type(ty) => self
                .table
                .member_type(Container::Type(ty), name, arity)
                .map(Symbol::Type),
        }
    }

    fn lookup_in_using_scope(&self, using: &UsingScope, name: &str, arity: usize) -> Option<Symbol> {
        if arity == 0 {
            if let Some(&symbol) = using.aliases.get(name) {
                return Some(symbol);
            }
        }
        using
            .imports
            .iter()
            .find_map(|&ns| self.table.member_type(Container::Namespace(ns), name, arity))
            .or_else(|| {
                using
                    .static_types
                    .iter()
                    .find_map(|&ty| self.table.member_type(Container::Type(ty), name, arity))
            })
            .map(Symbol::Type)
    }

    /// Unqualified lookup: enclosing types innermost first, then each
    /// namespace level outward with the `using` directives declared at
    /// that level.
    fn lookup_simple(&self, scope: &Scope, name: &str, arity: usize) -> Option<Symbol> {
        if arity == 0 {
            if let Some(param) = scope
                .declaring_type
                .and_then(|owner| self.type_parameter(owner, name))
            {
                return Some(Symbol::Type(param));
            }
        }
        for &outer in scope.enclosing_types.iter().rev() {
            if arity == 0 {
                if let Some(param) = self.type_parameter(outer, name) {
                    return Some(Symbol::Type(param));
                }
            }
            if let Some(member) = self.table.member_type(Container::Type(outer), name, arity) {
                return Some(Symbol::Type(member));
            }
        }

        let mut namespace = Some(scope.namespace);
        let mut using = scope.using_scope;
        while let Some(ns) = namespace {
            if let Some(symbol) = self.member(Symbol::Namespace(ns), name, arity) {
                return Some(symbol);
            }
            while let Some(index) = using {
                let using_scope = &self.using_scopes[index];
                if using_scope.namespace != ns {
                    break;
                }
                if let Some(symbol) = self.lookup_in_using_scope(using_scope, name, arity) {
                    return Some(symbol);
                }
                using = using_scope.parent;
            }
            namespace = self.table.namespace(ns).parent;
        }
        None
    }

    /// The alias `name` as seen from `scope` (`Alias::Type`).
    fn lookup_alias(&self, scope: &Scope, name: &str) -> Option<Symbol> {
        let mut using = scope.using_scope;
        while let Some(index) = using {
            let using_scope = &self.using_scopes[index];
            if let Some(&symbol) = using_scope.aliases.get(name) {
                return Some(symbol);
            }
            using = using_scope.parent;
        }
        None
    }

    /// Resolve the type arguments written on every segment of `type_ref`.
    fn resolve_arguments(&mut self, unit: usize, type_ref: &TypeRef, scope: &Scope) -> Vec<Vec<TypeId>> {
        type_ref
            .segments()
            .map(|segment| {
                segment
                    .type_args()
                    .iter()
                    .map(|arg| self.resolve_type_ref(unit, arg, scope))
                    .collect()
            })
            .collect()
    }

    /// Resolve a possibly qualified, possibly generic name to a namespace or
    /// type. Type arguments are resolved (and reported) along the way.
    fn resolve_symbol(&mut self, unit: usize, type_ref: &TypeRef, scope: &Scope) -> Option<Symbol> {
        let arguments = self.resolve_arguments(unit, type_ref, scope);
        self.resolve_path(type_ref, &arguments, scope)
    }

    fn resolve_path(&mut self, type_ref: &TypeRef, arguments: &[Vec<TypeId>], scope: &Scope) -> Option<Symbol> {
        let segments: Vec<_> = type_ref.segments().collect();
        let mut symbol: Option<Symbol> = None;

        for (index, segment) in segments.iter().enumerate() {
            let name = segment.name()?;
            let args = arguments.get(index).cloned().unwrap_or_default();
            let arity = args.len();

            let found = match symbol {
                Some(container) => self.member(container, &name, arity),
                None => match type_ref.alias_qualifier().as_deref() {
                    Some("global") => self.member(Symbol::Namespace(NamespaceId::GLOBAL), &name, arity),
                    Some(alias) => match self.lookup_alias(scope, alias) {
                        Some(Symbol::Namespace(ns)) => self.member(Symbol::Namespace(ns), &name, arity),
                        _ => None,
                    },
                    None => match predefined_type_name(&name).filter(|_| segments.len() == 1) {
                        Some(system_name) => self
                            .table
                            .member_type(Container::Namespace(self.table.system_namespace()), system_name, 0)
                            .map(Symbol::Type),
                        None => self.lookup_simple(scope, &name, arity),
                    },
                },
            };

            symbol = Some(match found? {
                Symbol::Type(ty) if arity > 0 => Symbol::Type(self.table.construct(ty, args)),
                other => other,
            });
        }
        symbol
    }

    /// Resolve `type_ref` to a type, substituting an error type (and
    /// reporting it) when the name does not denote one.
    fn resolve_type_ref(&mut self, unit: usize, type_ref: &TypeRef, scope: &Scope) -> TypeId {
        let arguments = self.resolve_arguments(unit, type_ref, scope);
        let mut ty = match self.resolve_path(type_ref, &arguments, scope) {
            Some(Symbol::Type(ty)) => ty,
            other => {
                let written = type_ref.path().join(".");
                let message = match other {
                    Some(Symbol::Namespace(_)) => format!("'{written}' is a namespace but is used like a type"),
                    _ => format!("undefined type '{written}'"),
                };
                trace!(name = %written, "unresolved type reference");
                self.error(unit, type_ref.syntax().text_range(), codes::UNDEFINED_TYPE, message);
                let last_args = arguments.last().cloned().unwrap_or_default();
                self.table.error_type(&written, last_args)
            }
        };

        if type_ref.is_nullable()
            && matches!(
                self.table.get(ty).kind,
                TypeKind::Struct | TypeKind::RecordStruct | TypeKind::Enum
            )
        {
            let nullable = self.table.well_known().nullable;
            ty = self.table.construct(nullable, vec![ty]);
        }
        for _ in 0..type_ref.array_rank() {
            ty = self.table.array_type(ty, 1);
        }
        ty
    }

    // ------------------------------------------------------------------------
    // Pass 3: base types
    // ------------------------------------------------------------------------

    fn bind_bases(&mut self) {
        for index in 0..self.sites.len() {
            let site = &self.sites[index];
            let (unit, ty) = (site.unit, site.ty);
            let kind = self.table.get(ty).kind;
            if kind == TypeKind::Enum {
                continue;
            }
            let mut scope = site.scope.clone();
            scope.declaring_type = Some(ty);
            let bases = site.decl.base_types();

            for (position, type_ref) in bases.iter().enumerate() {
                let base = self.resolve_type_ref(unit, type_ref, &scope);
                let base_kind = self.table.get(base).kind;
                let range = type_ref.syntax().text_range();
                let written = type_ref.text();

                let class_like = matches!(kind, TypeKind::Class | TypeKind::Record);
                if position == 0 && class_like && base_kind.can_be_base_class() {
                    let current = self.table.get(ty).base_type;
                    match current {
                        Some(existing) if existing != base => {
                            self.error(
                                unit,
                                range,
                                codes::CONFLICTING_BASE,
                                format!("partial declarations specify different base classes ('{written}')"),
                            );
                        }
                        _ => self.table.get_mut(ty).base_type = Some(base),
                    }
                } else if matches!(base_kind, TypeKind::Interface | TypeKind::Error) {
                    let interfaces = &mut self.table.get_mut(ty).interfaces;
                    if !interfaces.contains(&base) {
                        interfaces.push(base);
                    }
                } else {
                    self.error(
                        unit,
                        range,
                        codes::INVALID_BASE,
                        format!("cannot inherit from {base_kind} '{written}'"),
                    );
                }
            }
        }
    }

    fn apply_default_bases(&mut self) {
        let known = self.table.well_known();
        for site in &self.sites {
            let ty = site.ty;
            let data = self.table.get(ty);
            if data.base_type.is_some() {
                continue;
            }
            let default = match data.kind {
                TypeKind::Class | TypeKind::Record if ty != known.object => Some(known.object),
                TypeKind::Struct | TypeKind::RecordStruct => Some(known.value_type),
                TypeKind::Enum => Some(known.enum_type),
                _ => None,
            };
            self.table.get_mut(ty).base_type = default;
        }
    }

    // ------------------------------------------------------------------------
    // Pass 4: cycles
    // ------------------------------------------------------------------------

    /// Replace the base edge that closes each cycle with `System.Object`, or
    /// drop it when `System.Object` itself leads back into the cycle.
    fn break_cycles(&mut self) {
        let object = self.table.well_known().object;
        let mut acyclic: FxHashSet<TypeId> = FxHashSet::default();
        let starts: Vec<(usize, TypeId)> = self.sites.iter().map(|s| (s.unit, s.ty)).collect();

        for (unit, start) in starts {
            let mut visited: Vec<TypeId> = Vec::new();
            let mut current = start;
            loop {
                if acyclic.contains(&current) {
                    break;
                }
                visited.push(current);
                let Some(base) = self.table.get(current).base_type else {
                    break;
                };
                let next = self.table.definition_of(base);
                if next == start {
                    let name = self.table.get(current).name.clone();
                    warn!(ty = %name, "breaking circular base type dependency");
                    let location = self.table.get(current).locations.first().copied();
                    let (unit, range) = match location {
                        Some(loc) => (self.unit_of(loc.file).unwrap_or(unit), loc.range),
                        None => (unit, TextRange::default()),
                    };
                    self.error(
                        unit,
                        range,
                        codes::CIRCULAR_BASE,
                        format!("circular base type dependency involving '{name}'"),
                    );
                    let replacement = if self.base_chain_reaches(object, current) {
                        None
                    } else {
                        Some(object)
                    };
                    self.table.get_mut(current).base_type = replacement;
                    break;
                }
                if visited.contains(&next) {
                    // A cycle that does not pass through `start`; it is broken
                    // when its own members are visited.
                    visited.clear();
                    break;
                }
                current = next;
            }
            acyclic.extend(visited);
        }
    }

    /// Whether `target` is on the base chain starting at `from` (inclusive).
    /// Stops at the first repeated type.
    fn base_chain_reaches(&self, from: TypeId, target: TypeId) -> bool {
        let mut seen: FxHashSet<TypeId> = FxHashSet::default();
        let mut current = from;
        while seen.insert(current) {
            if current == target {
                return true;
            }
            match self.table.get(current).base_type {
                Some(base) => current = self.table.definition_of(base),
                None => return false,
            }
        }
        false
    }

    fn unit_of(&self, file: FileId) -> Option<usize> {
        self.units.iter().position(|u| u.file() == file)
    }
}
