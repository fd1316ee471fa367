use super::*;

// ============================================================================
// Root
// ============================================================================

ast_node!(SourceFile, SOURCE_FILE);

impl SourceFile {
    children_method!(members, NamespaceMember);
    children_method!(usings, UsingDirective);
    descendants_method!(
        class_decls,
        ClassDecl,
        "Get every class declaration in the file, in document order, including nested ones."
    );
    descendants_method!(
        type_decls,
        TypeDecl,
        "Get every type declaration in the file, in document order, including nested ones."
    );
}

// ============================================================================
// Namespace Members
// ============================================================================

/// Any member of a namespace (or of the file itself).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NamespaceMember {
    Using(UsingDirective),
    Namespace(NamespaceDecl),
    Type(TypeDecl),
    /// Global attributes such as `[assembly: Foo]`
    Attributes(AttributeList),
}

impl AstNode for NamespaceMember {
    fn can_cast(kind: SyntaxKind) -> bool {
        matches!(
            kind,
            SyntaxKind::USING_DIRECTIVE | SyntaxKind::NAMESPACE_DECL | SyntaxKind::ATTRIBUTE_LIST
        ) || kind.is_type_decl()
    }

    fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::USING_DIRECTIVE => Some(Self::Using(UsingDirective(node))),
            SyntaxKind::NAMESPACE_DECL => Some(Self::Namespace(NamespaceDecl(node))),
            SyntaxKind::ATTRIBUTE_LIST => Some(Self::Attributes(AttributeList(node))),
            _ => TypeDecl::cast(node).map(Self::Type),
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            Self::Using(n) => n.syntax(),
            Self::Namespace(n) => n.syntax(),
            Self::Type(n) => n.syntax(),
            Self::Attributes(n) => n.syntax(),
        }
    }
}

// ============================================================================
// Using directives and namespaces
// ============================================================================

ast_node!(UsingDirective, USING_DIRECTIVE);

impl UsingDirective {
    has_token_method!(is_static, STATIC_KW, "using static System.Math;");
    first_child_method!(target, TypeRef);

    /// The alias introduced by `using Alias = Target;`
    pub fn alias(&self) -> Option<String> {
        self.0.children().find_map(Name::cast).map(|n| n.text())
    }
}

ast_node!(NamespaceDecl, NAMESPACE_DECL);

impl NamespaceDecl {
    first_child_method!(name, QualifiedName);
    children_method!(members, NamespaceMember);
    children_method!(usings, UsingDirective);

    /// Name segments (`A.B` → `["A", "B"]`); empty when the name is missing.
    pub fn segments(&self) -> Vec<String> {
        self.name().map(|n| n.segments()).unwrap_or_default()
    }

    /// `namespace A.B;` applies to the rest of the file.
    pub fn is_file_scoped(&self) -> bool {
        !has_token(&self.0, SyntaxKind::L_BRACE)
    }
}

ast_node!(QualifiedName, QUALIFIED_NAME);

impl QualifiedName {
    pub fn segments(&self) -> Vec<String> {
        self.0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .filter(|t| t.kind() == SyntaxKind::IDENT)
            .map(|t| strip_verbatim(t.text()).to_string())
            .collect()
    }

    pub fn text(&self) -> String {
        self.segments().join(".")
    }
}

ast_node!(Name, NAME);

impl Name {
    pub fn text(&self) -> String {
        find_ident_token(&self.0)
            .map(|t| strip_verbatim(t.text()).to_string())
            .unwrap_or_default()
    }
}

// ============================================================================
// Type declarations
// ============================================================================

/// Declaration modifiers that carry meaning for the type model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    Public,
    Private,
    Protected,
    Internal,
    Abstract,
    Sealed,
    Static,
    Partial,
    New,
    Readonly,
    Unsafe,
}

impl Modifier {
    fn from_kind(kind: SyntaxKind) -> Option<Self> {
        Some(match kind {
            SyntaxKind::PUBLIC_KW => Self::Public,
            SyntaxKind::PRIVATE_KW => Self::Private,
            SyntaxKind::PROTECTED_KW => Self::Protected,
            SyntaxKind::INTERNAL_KW => Self::Internal,
            SyntaxKind::ABSTRACT_KW => Self::Abstract,
            SyntaxKind::SEALED_KW => Self::Sealed,
            SyntaxKind::STATIC_KW => Self::Static,
            SyntaxKind::PARTIAL_KW => Self::Partial,
            SyntaxKind::NEW_KW => Self::New,
            SyntaxKind::READONLY_KW => Self::Readonly,
            SyntaxKind::UNSAFE_KW => Self::Unsafe,
            _ => return None,
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
            Self::Protected => "protected",
            Self::Internal => "internal",
            Self::Abstract => "abstract",
            Self::Sealed => "sealed",
            Self::Static => "static",
            Self::Partial => "partial",
            Self::New => "new",
            Self::Readonly => "readonly",
            Self::Unsafe => "unsafe",
        }
    }
}

/// Accessors shared by every kind of type declaration, including the
/// [`TypeDecl`] wrapper (everything goes through `AstNode::syntax`).
macro_rules! type_decl_methods {
    () => {
        /// The `NAME` node of the declaration.
        pub fn name_node(&self) -> Option<Name> {
            self.syntax().children().find_map(Name::cast)
        }

        /// Declared simple name, if present.
        pub fn name(&self) -> Option<String> {
            self.name_node().map(|n| n.text()).filter(|n| !n.is_empty())
        }

        pub fn type_param_list(&self) -> Option<TypeParamList> {
            self.syntax().children().find_map(TypeParamList::cast)
        }

        /// Names of the declared type parameters, in order.
        pub fn type_params(&self) -> Vec<String> {
            self.type_param_list()
                .map(|list| list.params().filter_map(|p| p.name()).collect())
                .unwrap_or_default()
        }

        pub fn base_list(&self) -> Option<BaseList> {
            self.syntax().children().find_map(BaseList::cast)
        }

        /// Base-list entries in source order.
        pub fn base_types(&self) -> Vec<TypeRef> {
            self.base_list()
                .map(|list| list.types().collect())
                .unwrap_or_default()
        }

        pub fn attribute_lists(&self) -> impl Iterator<Item = AttributeList> + '_ {
            self.syntax().children().filter_map(AttributeList::cast)
        }

        /// All attributes across every attribute list, in source order.
        pub fn attributes(&self) -> Vec<Attribute> {
            self.attribute_lists()
                .flat_map(|list| list.attributes().collect::<Vec<_>>())
                .collect()
        }

        /// Modifier keywords in source order.
        pub fn modifiers(&self) -> Vec<Modifier> {
            self.syntax()
                .children_with_tokens()
                .filter_map(|e| e.into_token())
                .filter_map(|t| Modifier::from_kind(t.kind()))
                .collect()
        }

        pub fn is_abstract(&self) -> bool {
            has_token(self.syntax(), SyntaxKind::ABSTRACT_KW)
        }

        pub fn is_static(&self) -> bool {
            has_token(self.syntax(), SyntaxKind::STATIC_KW)
        }

        pub fn is_partial(&self) -> bool {
            has_token(self.syntax(), SyntaxKind::PARTIAL_KW)
        }

        /// Type declarations directly nested in this declaration's body.
        pub fn nested_types(&self) -> impl Iterator<Item = TypeDecl> + '_ {
            self.syntax().children().filter_map(TypeDecl::cast)
        }
    };
}

ast_node!(ClassDecl, CLASS_DECL);
ast_node!(InterfaceDecl, INTERFACE_DECL);
ast_node!(StructDecl, STRUCT_DECL);
ast_node!(RecordDecl, RECORD_DECL);
ast_node!(EnumDecl, ENUM_DECL);

impl ClassDecl {
    type_decl_methods!();
}

impl InterfaceDecl {
    type_decl_methods!();
}

impl StructDecl {
    type_decl_methods!();
}

impl RecordDecl {
    type_decl_methods!();

    /// `record struct R;` declares a value type.
    pub fn is_struct(&self) -> bool {
        has_token(&self.0, SyntaxKind::STRUCT_KW)
    }
}

impl EnumDecl {
    type_decl_methods!();
}

/// Any type declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeDecl {
    Class(ClassDecl),
    Interface(InterfaceDecl),
    Struct(StructDecl),
    Record(RecordDecl),
    Enum(EnumDecl),
}

impl AstNode for TypeDecl {
    fn can_cast(kind: SyntaxKind) -> bool {
        kind.is_type_decl()
    }

    fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::CLASS_DECL => Some(Self::Class(ClassDecl(node))),
            SyntaxKind::INTERFACE_DECL => Some(Self::Interface(InterfaceDecl(node))),
            SyntaxKind::STRUCT_DECL => Some(Self::Struct(StructDecl(node))),
            SyntaxKind::RECORD_DECL => Some(Self::Record(RecordDecl(node))),
            SyntaxKind::ENUM_DECL => Some(Self::Enum(EnumDecl(node))),
            _ => None,
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            Self::Class(n) => n.syntax(),
            Self::Interface(n) => n.syntax(),
            Self::Struct(n) => n.syntax(),
            Self::Record(n) => n.syntax(),
            Self::Enum(n) => n.syntax(),
        }
    }
}

impl TypeDecl {
    type_decl_methods!();

    pub fn is_class(&self) -> bool {
        matches!(self, Self::Class(_))
    }
}

ast_node!(TypeParamList, TYPE_PARAM_LIST);

impl TypeParamList {
    children_method!(params, TypeParam);
}

ast_node!(TypeParam, TYPE_PARAM);

impl TypeParam {
    /// The parameter name (the last identifier, after any variance keyword).
    pub fn name(&self) -> Option<String> {
        self.0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .filter(|t| t.kind() == SyntaxKind::IDENT)
            .last()
            .map(|t| strip_verbatim(t.text()).to_string())
    }
}

ast_node!(BaseList, BASE_LIST);

impl BaseList {
    children_method!(types, TypeRef);
}
