//! Arena of namespaces and named types produced by the binder.
//!
//! Every type the binder knows about lives here and is addressed by a
//! [`TypeId`]: declared types, the implicit `System` types, type parameters,
//! constructed generics (`Box<Foo>`) and error types standing in for
//! references that did not resolve. Constructed and error types are interned,
//! so equal references share one id.

use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use tracing::{debug, trace};

use crate::index::{AttributeInfo, SourceLocation, TypeKind};

/// Constructed types nested deeper than this keep their definition's
/// unsubstituted base (`class C<T> : C<C<T>>` would otherwise never stop).
pub const MAX_NESTING_DEPTH: usize = 16;

// ============================================================================
// IDS
// ============================================================================

/// Index of a type in a [`TypeTable`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(u32);

impl TypeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Index of a namespace in a [`TypeTable`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NamespaceId(u32);

impl NamespaceId {
    /// The unnamed root namespace.
    pub const GLOBAL: NamespaceId = NamespaceId(0);

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Something that can own member types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Container {
    Namespace(NamespaceId),
    Type(TypeId),
}

// ============================================================================
// DATA
// ============================================================================

#[derive(Clone, Debug, Default)]
pub struct NamespaceData {
    /// Last segment; empty for the global namespace.
    pub name: SmolStr,
    pub parent: Option<NamespaceId>,
    pub children: FxHashMap<SmolStr, NamespaceId>,
    /// Member types keyed by `(name, arity)`.
    pub types: FxHashMap<(SmolStr, usize), TypeId>,
}

#[derive(Clone, Debug)]
pub struct TypeData {
    pub name: SmolStr,
    pub kind: TypeKind,
    /// Containing namespace; nested types share their outer type's.
    /// `None` for type parameters and error types.
    pub namespace: Option<NamespaceId>,
    pub containing_type: Option<TypeId>,
    pub type_parameters: Vec<TypeId>,
    /// Equal to `type_parameters` on a definition, the concrete arguments on
    /// a constructed type.
    pub type_arguments: Vec<TypeId>,
    /// Generic definition of a constructed type.
    pub definition: Option<TypeId>,
    /// Element type and rank of an array type.
    pub element_type: Option<(TypeId, usize)>,
    pub nested_types: FxHashMap<(SmolStr, usize), TypeId>,
    pub base_type: Option<TypeId>,
    pub interfaces: Vec<TypeId>,
    pub attributes: Vec<AttributeInfo>,
    pub modifiers: Vec<SmolStr>,
    pub documentation: Option<String>,
    /// One entry per declaration; several for partial types.
    pub locations: Vec<SourceLocation>,
    /// Supplied by the table rather than declared in source.
    pub implicit: bool,
}

impl TypeData {
    pub fn new(name: impl Into<SmolStr>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            namespace: None,
            containing_type: None,
            type_parameters: Vec::new(),
            type_arguments: Vec::new(),
            definition: None,
            element_type: None,
            nested_types: FxHashMap::default(),
            base_type: None,
            interfaces: Vec::new(),
            attributes: Vec::new(),
            modifiers: Vec::new(),
            documentation: None,
            locations: Vec::new(),
            implicit: false,
        }
    }

    pub fn arity(&self) -> usize {
        self.type_parameters.len()
    }

    /// A constructed generic rather than a definition.
    pub fn is_constructed(&self) -> bool {
        self.definition.is_some()
    }
}

/// Implicit `System` types the binder falls back to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WellKnownTypes {
    pub object: TypeId,
    pub value_type: TypeId,
    pub enum_type: TypeId,
    pub array: TypeId,
    pub nullable: TypeId,
}

/// Keywords that name `System` types.
const PREDEFINED_TYPES: &[(&str, &str)] = &[
    ("object", "Object"),
    ("string", "String"),
    ("bool", "Boolean"),
    ("byte", "Byte"),
    ("sbyte", "SByte"),
    ("char", "Char"),
    ("short", "Int16"),
    ("ushort", "UInt16"),
    ("int", "Int32"),
    ("uint", "UInt32"),
    ("long", "Int64"),
    ("ulong", "UInt64"),
    ("float", "Single"),
    ("double", "Double"),
    ("decimal", "Decimal"),
    ("nint", "IntPtr"),
    ("nuint", "UIntPtr"),
];

/// Maps a predefined type keyword (`int`) to its `System` type name (`Int32`).
pub fn predefined_type_name(keyword: &str) -> Option<&'static str> {
    PREDEFINED_TYPES
        .iter()
        .find(|(k, _)| *k == keyword)
        .map(|(_, name)| *name)
}

// ============================================================================
// TABLE
// ============================================================================

#[derive(Clone, Debug)]
pub struct TypeTable {
    namespaces: Vec<NamespaceData>,
    types: Vec<TypeData>,
    well_known: WellKnownTypes,
    system: NamespaceId,
    constructed: FxHashMap<(TypeId, Vec<TypeId>), TypeId>,
    error_types: FxHashMap<(SmolStr, Vec<TypeId>), TypeId>,
    arrays: FxHashMap<(TypeId, usize), TypeId>,
    /// Constructed types whose base and interfaces are not substituted yet.
    pending: Vec<TypeId>,
}

impl Default for TypeTable {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeTable {
    /// A table holding only the global namespace and the implicit `System`
    /// types.
    pub fn new() -> Self {
        let placeholder = TypeId(0);
        let mut table = Self {
            namespaces: vec![NamespaceData::default()],
            types: Vec::new(),
            well_known: WellKnownTypes {
                object: placeholder,
                value_type: placeholder,
                enum_type: placeholder,
                array: placeholder,
                nullable: placeholder,
            },
            system: NamespaceId::GLOBAL,
            constructed: FxHashMap::default(),
            error_types: FxHashMap::default(),
            arrays: FxHashMap::default(),
            pending: Vec::new(),
        };
        let system = table.namespace_or_insert(NamespaceId::GLOBAL, "System");
        table.system = system;

        let object = table.add_implicit(system, "Object", TypeKind::Class, None);
        let value_type = table.add_implicit(system, "ValueType", TypeKind::Class, Some(object));
        let enum_type = table.add_implicit(system, "Enum", TypeKind::Class, Some(value_type));
        let array = table.add_implicit(system, "Array", TypeKind::Class, Some(object));
        let mut nullable = TypeData::new("Nullable", TypeKind::Struct);
        nullable.base_type = Some(value_type);
        nullable.implicit = true;
        let nullable = table.add_generic_type(Container::Namespace(system), nullable, &["T"]);

        for (keyword, name) in PREDEFINED_TYPES {
            if *keyword == "object" {
                continue;
            }
            let (kind, base) = if *keyword == "string" {
                (TypeKind::Class, object)
            } else {
                (TypeKind::Struct, value_type)
            };
            table.add_implicit(system, name, kind, Some(base));
        }

        table.well_known = WellKnownTypes {
            object,
            value_type,
            enum_type,
            array,
            nullable,
        };
        table
    }

    fn add_implicit(
        &mut self,
        namespace: NamespaceId,
        name: &str,
        kind: TypeKind,
        base: Option<TypeId>,
    ) -> TypeId {
        let mut data = TypeData::new(name, kind);
        data.base_type = base;
        data.implicit = true;
        self.add_type(Container::Namespace(namespace), data)
    }

    pub fn well_known(&self) -> WellKnownTypes {
        self.well_known
    }

    pub fn system_namespace(&self) -> NamespaceId {
        self.system
    }

    // ------------------------------------------------------------------------
    // Access
    // ------------------------------------------------------------------------

    pub fn get(&self, id: TypeId) -> &TypeData {
        &self.types[id.index()]
    }

    pub fn get_mut(&mut self, id: TypeId) -> &mut TypeData {
        &mut self.types[id.index()]
    }

    pub fn namespace(&self, id: NamespaceId) -> &NamespaceData {
        &self.namespaces[id.index()]
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Namespace segments outermost first; empty for the global namespace.
    pub fn namespace_path(&self, id: NamespaceId) -> Vec<&str> {
        let mut path = Vec::new();
        let mut current = Some(id);
        while let Some(ns) = current {
            let data = self.namespace(ns);
            if ns != NamespaceId::GLOBAL {
                path.push(data.name.as_str());
            }
            current = data.parent;
        }
        path.reverse();
        path
    }

    // ------------------------------------------------------------------------
    // Declaration
    // ------------------------------------------------------------------------

    pub fn child_namespace(&self, parent: NamespaceId, name: &str) -> Option<NamespaceId> {
        self.namespace(parent).children.get(name).copied()
    }

    pub fn namespace_or_insert(&mut self, parent: NamespaceId, name: &str) -> NamespaceId {
        if let Some(existing) = self.child_namespace(parent, name) {
            return existing;
        }
        let id = NamespaceId(self.namespaces.len() as u32);
        self.namespaces.push(NamespaceData {
            name: SmolStr::new(name),
            parent: Some(parent),
            ..Default::default()
        });
        self.namespaces[parent.index()]
            .children
            .insert(SmolStr::new(name), id);
        trace!(namespace = name, "declared namespace");
        id
    }

    /// Member type of a namespace, or nested type of a type (looked up on the
    /// definition when `container` is a constructed type).
    pub fn member_type(&self, container: Container, name: &str, arity: usize) -> Option<TypeId> {
        let key = (SmolStr::new(name), arity);
        match container {
            Container::Namespace(ns) => self.namespace(ns).types.get(&key).copied(),
            Container::Type(ty) => self
                .get(self.definition_of(ty))
                .nested_types
                .get(&key)
                .copied(),
        }
    }

    /// Register a new non-generic type under `container`.
    pub fn add_type(&mut self, container: Container, data: TypeData) -> TypeId {
        self.add_generic_type::<&str>(container, data, &[])
    }

    /// Register a new type under `container` with the given type parameters.
    /// The namespace and containing type of `data` are filled in from the
    /// container. Parameters have no namespace and appear as both parameters
    /// and arguments of their owner.
    pub fn add_generic_type<S: AsRef<str>>(
        &mut self,
        container: Container,
        mut data: TypeData,
        type_parameters: &[S],
    ) -> TypeId {
        let id = TypeId(self.types.len() as u32);
        let key = (data.name.clone(), type_parameters.len());
        match container {
            Container::Namespace(ns) => {
                data.namespace = Some(ns);
                data.containing_type = None;
            }
            Container::Type(outer) => {
                data.namespace = self.get(outer).namespace;
                data.containing_type = Some(outer);
            }
        }
        self.types.push(data);

        for name in type_parameters {
            let param = TypeId(self.types.len() as u32);
            let mut param_data = TypeData::new(name.as_ref(), TypeKind::TypeParameter);
            param_data.containing_type = Some(id);
            self.types.push(param_data);
            let owner = &mut self.types[id.index()];
            owner.type_parameters.push(param);
            owner.type_arguments.push(param);
        }

        match container {
            Container::Namespace(ns) => {
                self.namespaces[ns.index()].types.insert(key, id);
            }
            Container::Type(outer) => {
                self.types[outer.index()].nested_types.insert(key, id);
            }
        }
        id
    }

    /// Find a type by dotted name: `System.Object`, `A.B.Outer.Inner`.
    /// `arity` applies to the last segment; intermediate types must be
    /// non-generic.
    pub fn lookup_type(&self, qualified: &str, arity: usize) -> Option<TypeId> {
        let segments: Vec<&str> = qualified.split('.').filter(|s| !s.is_empty()).collect();
        let (last, init) = segments.split_last()?;
        let mut ns = Some(NamespaceId::GLOBAL);
        let mut ty: Option<TypeId> = None;
        for segment in init {
            if let Some(current) = ty {
                ty = Some(self.member_type(Container::Type(current), segment, 0)?);
            } else if let Some(child) = ns.and_then(|n| self.child_namespace(n, segment)) {
                ns = Some(child);
            } else {
                ty = Some(self.member_type(Container::Namespace(ns?), segment, 0)?);
                ns = None;
            }
        }
        let container = match ty {
            Some(t) => Container::Type(t),
            None => Container::Namespace(ns?),
        };
        self.member_type(container, last, arity)
    }

    // ------------------------------------------------------------------------
    // Interned types
    // ------------------------------------------------------------------------

    /// Stand-in for a reference that did not resolve. Interned by written
    /// name and arguments.
    pub fn error_type(&mut self, name: &str, arguments: Vec<TypeId>) -> TypeId {
        let key = (SmolStr::new(name), arguments);
        if let Some(&existing) = self.error_types.get(&key) {
            return existing;
        }
        let id = TypeId(self.types.len() as u32);
        let mut data = TypeData::new(name, TypeKind::Error);
        data.type_arguments = key.1.clone();
        self.types.push(data);
        self.error_types.insert(key, id);
        id
    }

    /// `element[]` (or `element[,]` and so on for higher ranks).
    pub fn array_type(&mut self, element: TypeId, rank: usize) -> TypeId {
        if let Some(&existing) = self.arrays.get(&(element, rank)) {
            return existing;
        }
        let mut name = self.get(element).name.to_string();
        name.push('[');
        name.push_str(&",".repeat(rank.saturating_sub(1)));
        name.push(']');
        let id = TypeId(self.types.len() as u32);
        let mut data = TypeData::new(name, TypeKind::Class);
        data.element_type = Some((element, rank));
        data.base_type = Some(self.well_known.array);
        data.implicit = true;
        self.types.push(data);
        self.arrays.insert((element, rank), id);
        id
    }

    /// `definition<arguments>`. Returns `definition` itself when the
    /// arguments are its own type parameters.
    pub fn construct(&mut self, definition: TypeId, arguments: Vec<TypeId>) -> TypeId {
        let definition = self.definition_of(definition);
        if self.get(definition).type_parameters == arguments {
            return definition;
        }
        let key = (definition, arguments);
        if let Some(&existing) = self.constructed.get(&key) {
            return existing;
        }
        let def = self.get(definition);
        let mut data = TypeData::new(def.name.clone(), def.kind);
        data.namespace = def.namespace;
        data.containing_type = def.containing_type;
        data.definition = Some(definition);
        data.type_arguments = key.1.clone();
        data.attributes = def.attributes.clone();
        data.modifiers = def.modifiers.clone();
        data.documentation = def.documentation.clone();
        data.locations = def.locations.clone();
        data.implicit = def.implicit;

        let id = TypeId(self.types.len() as u32);
        self.types.push(data);
        self.constructed.insert(key, id);
        self.pending.push(id);
        id
    }

    /// The generic definition behind a constructed type; `ty` itself otherwise.
    pub fn definition_of(&self, ty: TypeId) -> TypeId {
        self.get(ty).definition.unwrap_or(ty)
    }

    /// How deeply generic arguments nest: `A` is 0, `A<B>` is 1, `A<B<C>>` is 2.
    pub fn nesting_depth(&self, ty: TypeId) -> usize {
        self.get(ty)
            .type_arguments
            .iter()
            .filter(|&&arg| arg != ty)
            .map(|&arg| 1 + self.nesting_depth(arg))
            .max()
            .unwrap_or(0)
    }

    /// Replace type parameters in `ty` according to `map` (parameter → argument).
    pub fn substitute(&mut self, ty: TypeId, map: &FxHashMap<TypeId, TypeId>) -> TypeId {
        if let Some(&argument) = map.get(&ty) {
            return argument;
        }
        let data = self.get(ty);
        if let Some((element, rank)) = data.element_type {
            let substituted = self.substitute(element, map);
            return if substituted == element {
                ty
            } else {
                self.array_type(substituted, rank)
            };
        }
        if data.type_arguments.is_empty() || data.kind == TypeKind::TypeParameter {
            return ty;
        }
        let arguments = data.type_arguments.clone();
        let kind = data.kind;
        let name = data.name.clone();
        let substituted: Vec<TypeId> = arguments
            .iter()
            .map(|&arg| self.substitute(arg, map))
            .collect();
        if substituted == arguments {
            return ty;
        }
        if kind == TypeKind::Error {
            return self.error_type(&name, substituted);
        }
        self.construct(ty, substituted)
    }

    /// Give every pending constructed type the base type and interfaces of its
    /// definition with arguments substituted. Runs until no new constructed
    /// types appear.
    pub fn complete_constructed(&mut self) {
        let mut completed = 0usize;
        while let Some(ty) = self.pending.pop() {
            let definition = self.definition_of(ty);
            let def = self.get(definition);
            let base = def.base_type;
            let interfaces = def.interfaces.clone();

            if self.nesting_depth(ty) > MAX_NESTING_DEPTH {
                debug!(
                    ty = %self.get(ty).name,
                    "generic nesting too deep; keeping unsubstituted bases"
                );
                let data = self.get_mut(ty);
                data.base_type = base;
                data.interfaces = interfaces;
                continue;
            }

            let map: FxHashMap<TypeId, TypeId> = def
                .type_parameters
                .iter()
                .copied()
                .zip(self.get(ty).type_arguments.iter().copied())
                .collect();
            let base = base.map(|b| self.substitute(b, &map));
            let interfaces = interfaces
                .into_iter()
                .map(|i| self.substitute(i, &map))
                .collect();
            let data = self.get_mut(ty);
            data.base_type = base;
            data.interfaces = interfaces;
            completed += 1;
        }
        trace!(completed, "completed constructed types");
    }
}
