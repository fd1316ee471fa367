use super::*;

// ============================================================================
// Type references
// ============================================================================

ast_node!(TypeRef, TYPE_REF);

impl TypeRef {
    children_method!(segments, PathSegment);
    has_token_method!(is_nullable, QUESTION, "string?");

    /// Alias qualifier of `global::System.Object`, if any.
    pub fn alias_qualifier(&self) -> Option<String> {
        if !has_token(&self.0, SyntaxKind::COLON_COLON) {
            return None;
        }
        find_ident_token(&self.0).map(|t| strip_verbatim(t.text()).to_string())
    }

    /// The last segment, which names the referenced type itself.
    pub fn last_segment(&self) -> Option<PathSegment> {
        self.segments().last()
    }

    /// Segment names without type arguments (`A.B<C>` → `["A", "B"]`).
    pub fn path(&self) -> Vec<String> {
        self.segments().filter_map(|s| s.name()).collect()
    }

    /// Number of `[]` suffixes.
    pub fn array_rank(&self) -> usize {
        self.0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .filter(|t| t.kind() == SyntaxKind::L_BRACKET)
            .count()
    }

    /// Source text of the reference with trivia removed (`List<int>`).
    pub fn text(&self) -> String {
        self.0
            .descendants_with_tokens()
            .filter_map(|e| e.into_token())
            .filter(|t| !t.kind().is_trivia())
            .map(|t| match t.kind() {
                SyntaxKind::COMMA => ", ".to_string(),
                SyntaxKind::IDENT => strip_verbatim(t.text()).to_string(),
                _ => t.text().to_string(),
            })
            .collect()
    }
}

ast_node!(PathSegment, PATH_SEGMENT);

impl PathSegment {
    first_child_method!(type_arg_list, TypeArgList);

    pub fn name(&self) -> Option<String> {
        find_ident_token(&self.0).map(|t| strip_verbatim(t.text()).to_string())
    }

    /// Explicit type arguments of this segment.
    pub fn type_args(&self) -> Vec<TypeRef> {
        self.type_arg_list()
            .map(|list| list.types().collect())
            .unwrap_or_default()
    }

    /// Generic arity written at this segment (`Dictionary<K, V>` → 2).
    pub fn arity(&self) -> usize {
        self.type_arg_list().map(|list| list.types().count()).unwrap_or(0)
    }
}

ast_node!(TypeArgList, TYPE_ARG_LIST);

impl TypeArgList {
    children_method!(types, TypeRef);
}

// ============================================================================
// Attributes
// ============================================================================

ast_node!(AttributeList, ATTRIBUTE_LIST);

impl AttributeList {
    children_method!(attributes, Attribute);

    /// Explicit target, e.g. `assembly` in `[assembly: Foo]`.
    pub fn target(&self) -> Option<String> {
        self.0
            .children()
            .find(|n| n.kind() == SyntaxKind::ATTRIBUTE_TARGET)
            .and_then(|n| {
                n.children_with_tokens()
                    .filter_map(|e| e.into_token())
                    .find(|t| !t.kind().is_trivia())
                    .map(|t| t.text().to_string())
            })
    }
}

ast_node!(Attribute, ATTRIBUTE);

impl Attribute {
    first_child_method!(type_ref, TypeRef);
    first_child_method!(arg_list, AttributeArgList);

    /// Attribute name as written (`Serializable`, `System.Obsolete`).
    pub fn name(&self) -> Option<String> {
        self.type_ref().map(|t| t.path().join("."))
    }

    pub fn args(&self) -> Vec<AttributeArg> {
        self.arg_list()
            .map(|list| list.args().collect())
            .unwrap_or_default()
    }
}

ast_node!(AttributeArgList, ATTRIBUTE_ARG_LIST);

impl AttributeArgList {
    children_method!(args, AttributeArg);
}

ast_node!(AttributeArg, ATTRIBUTE_ARG);

impl AttributeArg {
    /// Name of a named argument (`Name = "x"` or `name: "x"`).
    pub fn name(&self) -> Option<String> {
        self.0
            .children()
            .find(|n| n.kind() == SyntaxKind::NAME_EQUALS)
            .and_then(|n| find_ident_token(&n))
            .map(|t| strip_verbatim(t.text()).to_string())
    }

    /// Argument expression text, exactly as written but trimmed.
    pub fn value(&self) -> String {
        let text: String = self
            .0
            .children_with_tokens()
            .filter(|e| e.kind() != SyntaxKind::NAME_EQUALS)
            .map(|e| e.to_string())
            .collect();
        text.trim().to_string()
    }

    /// The whole argument, name included.
    pub fn source_text(&self) -> String {
        trimmed_text(&self.0)
    }
}
