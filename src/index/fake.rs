//! In-memory backend for unit tests of the index.

use super::descriptor::{CompiledProject, SemanticResolver, TypeDescriptor, TypeKind};

#[derive(Debug, Clone)]
struct FakeTypeData {
    name: String,
    namespace: Vec<String>,
    kind: TypeKind,
    arguments: Vec<usize>,
    base: Option<usize>,
    interfaces: Vec<usize>,
}

/// Arena of fake types addressed by index.
#[derive(Debug, Default)]
pub(crate) struct FakeWorld {
    types: Vec<FakeTypeData>,
}

impl FakeWorld {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, namespace: &str, name: &str, kind: TypeKind) -> usize {
        let namespace = namespace
            .split('.')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        self.types.push(FakeTypeData {
            name: name.to_string(),
            namespace,
            kind,
            arguments: Vec::new(),
            base: None,
            interfaces: Vec::new(),
        });
        self.types.len() - 1
    }

    pub fn class(&mut self, namespace: &str, name: &str) -> usize {
        self.push(namespace, name, TypeKind::Class)
    }

    pub fn interface(&mut self, namespace: &str, name: &str) -> usize {
        self.push(namespace, name, TypeKind::Interface)
    }

    pub fn type_param(&mut self, name: &str) -> usize {
        self.push("", name, TypeKind::TypeParameter)
    }

    pub fn generic(&mut self, namespace: &str, name: &str, arguments: &[usize]) -> usize {
        let id = self.push(namespace, name, TypeKind::Class);
        self.types[id].arguments = arguments.to_vec();
        id
    }

    pub fn set_base(&mut self, ty: usize, base: usize) {
        self.types[ty].base = Some(base);
    }

    pub fn add_interface(&mut self, ty: usize, interface: usize) {
        self.types[ty].interfaces.push(interface);
    }

    pub fn get(&self, id: usize) -> FakeType<'_> {
        FakeType { world: self, id }
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct FakeType<'w> {
    world: &'w FakeWorld,
    pub id: usize,
}

impl PartialEq for FakeType<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.world, other.world) && self.id == other.id
    }
}

impl<'w> FakeType<'w> {
    fn data(&self) -> &'w FakeTypeData {
        &self.world.types[self.id]
    }
}

impl TypeDescriptor for FakeType<'_> {
    fn name(&self) -> &str {
        &self.data().name
    }

    fn is_named_type(&self) -> bool {
        self.data().kind != TypeKind::TypeParameter
    }

    fn namespace_path(&self) -> Vec<&str> {
        self.data().namespace.iter().map(String::as_str).collect()
    }

    fn type_arguments(&self) -> Vec<Self> {
        self.data()
            .arguments
            .iter()
            .map(|&id| self.world.get(id))
            .collect()
    }

    fn base_type(&self) -> Option<Self> {
        self.data().base.map(|id| self.world.get(id))
    }

    fn interfaces(&self) -> Vec<Self> {
        self.data()
            .interfaces
            .iter()
            .map(|&id| self.world.get(id))
            .collect()
    }

    fn kind(&self) -> TypeKind {
        self.data().kind
    }
}

/// One syntax unit: its class declarations in document order, `None` for a
/// declaration that does not resolve.
#[derive(Debug, Default)]
pub(crate) struct FakeUnit {
    pub declarations: Vec<Option<usize>>,
}

#[derive(Debug, Default)]
pub(crate) struct FakeProject {
    pub world: FakeWorld,
    pub units: Vec<FakeUnit>,
}

impl FakeProject {
    pub fn new(world: FakeWorld) -> Self {
        Self {
            world,
            units: Vec::new(),
        }
    }

    pub fn unit(mut self, declarations: &[Option<usize>]) -> Self {
        self.units.push(FakeUnit {
            declarations: declarations.to_vec(),
        });
        self
    }
}

pub(crate) struct FakeResolver<'a> {
    world: &'a FakeWorld,
    unit: &'a FakeUnit,
}

impl<'a> SemanticResolver for FakeResolver<'a> {
    type Declaration = Option<usize>;
    type Type = FakeType<'a>;

    fn class_declarations(&self) -> Vec<Option<usize>> {
        self.unit.declarations.clone()
    }

    fn declared_type(&self, declaration: &Option<usize>) -> Option<FakeType<'a>> {
        declaration.map(|id| self.world.get(id))
    }
}

impl CompiledProject for FakeProject {
    type Unit = FakeUnit;
    type Resolver<'a> = FakeResolver<'a>;

    fn syntax_units(&self) -> &[FakeUnit] {
        &self.units
    }

    fn semantic_model<'a>(&'a self, unit: &'a FakeUnit) -> FakeResolver<'a> {
        FakeResolver {
            world: &self.world,
            unit,
        }
    }
}
