//! Syntax kinds for the Rowan-based CST
//!
//! This enum defines all possible node and token kinds in the syntax tree
//! of the declaration language (the type-level subset of C#).

/// All syntax kinds (tokens and nodes)
///
/// Tokens are leaf nodes (identifiers, keywords, punctuation).
/// Nodes are composite (namespaces, type declarations, base lists).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // TRIVIA (whitespace and comments - preserved but not semantically meaningful)
    // =========================================================================
    WHITESPACE = 0,
    LINE_COMMENT,
    BLOCK_COMMENT,

    // =========================================================================
    // LITERALS
    // =========================================================================
    IDENT,              // identifier
    INTEGER,            // 42
    REAL,               // 3.14
    STRING,             // "hello" or @"hello"
    CHAR,               // 'c'

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    L_BRACE,            // {
    R_BRACE,            // }
    L_BRACKET,          // [
    R_BRACKET,          // ]
    L_PAREN,            // (
    R_PAREN,            // )
    SEMICOLON,          // ;
    COLON,              // :
    COLON_COLON,        // ::
    DOT,                // .
    COMMA,              // ,
    EQ,                 // =
    EQ_EQ,              // ==
    BANG_EQ,            // !=
    FAT_ARROW,          // =>
    ARROW,              // ->
    LT,                 // <
    GT,                 // >
    QUESTION,           // ?
    QUESTION_QUESTION,  // ??
    BANG,               // !
    PLUS,               // +
    PLUS_PLUS,          // ++
    MINUS,              // -
    MINUS_MINUS,        // --
    STAR,               // *
    SLASH,              // /
    PERCENT,            // %
    CARET,              // ^
    TILDE,              // ~
    AMP,                // &
    AMP_AMP,            // &&
    PIPE,               // |
    PIPE_PIPE,          // ||
    AT,                 // @
    HASH,               // #
    DOLLAR,             // $

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    USING_KW,
    NAMESPACE_KW,
    CLASS_KW,
    INTERFACE_KW,
    STRUCT_KW,
    RECORD_KW,
    ENUM_KW,
    DELEGATE_KW,
    WHERE_KW,
    STATIC_KW,

    // Modifiers
    PUBLIC_KW,
    PRIVATE_KW,
    PROTECTED_KW,
    INTERNAL_KW,
    ABSTRACT_KW,
    SEALED_KW,
    PARTIAL_KW,
    NEW_KW,
    READONLY_KW,
    UNSAFE_KW,

    // =========================================================================
    // NODES
    // =========================================================================
    SOURCE_FILE,
    USING_DIRECTIVE,
    NAMESPACE_DECL,
    QUALIFIED_NAME,

    // Type declarations
    CLASS_DECL,
    INTERFACE_DECL,
    STRUCT_DECL,
    RECORD_DECL,
    ENUM_DECL,

    NAME,
    TYPE_PARAM_LIST,
    TYPE_PARAM,
    PARAM_LIST,
    BASE_LIST,
    ARG_LIST,
    CONSTRAINT_CLAUSE,
    MEMBER,

    // Attributes
    ATTRIBUTE_LIST,
    ATTRIBUTE_TARGET,
    ATTRIBUTE,
    ATTRIBUTE_ARG_LIST,
    ATTRIBUTE_ARG,
    NAME_EQUALS,

    // Type references
    TYPE_REF,
    PATH_SEGMENT,
    TYPE_ARG_LIST,

    // Special
    ERROR,

    #[doc(hidden)]
    __LAST,
}

impl SyntaxKind {
    /// Check if this is a trivia token (whitespace or comment)
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::WHITESPACE | Self::LINE_COMMENT | Self::BLOCK_COMMENT)
    }

    /// Check if this is a keyword
    pub fn is_keyword(self) -> bool {
        (self as u16) >= (Self::USING_KW as u16) && (self as u16) <= (Self::UNSAFE_KW as u16)
    }

    /// Check if this is a declaration modifier (`public`, `abstract`, `static`, ...)
    pub fn is_modifier(self) -> bool {
        self == Self::STATIC_KW
            || ((self as u16) >= (Self::PUBLIC_KW as u16)
                && (self as u16) <= (Self::UNSAFE_KW as u16))
    }

    /// Check if this keyword introduces a type declaration
    pub fn is_type_keyword(self) -> bool {
        matches!(
            self,
            Self::CLASS_KW | Self::INTERFACE_KW | Self::STRUCT_KW | Self::RECORD_KW | Self::ENUM_KW
        )
    }

    /// Check if this is a type declaration node
    pub fn is_type_decl(self) -> bool {
        matches!(
            self,
            Self::CLASS_DECL
                | Self::INTERFACE_DECL
                | Self::STRUCT_DECL
                | Self::RECORD_DECL
                | Self::ENUM_DECL
        )
    }

    /// Check if this is a punctuation token
    pub fn is_punct(self) -> bool {
        (self as u16) >= (Self::L_BRACE as u16) && (self as u16) <= (Self::DOLLAR as u16)
    }

    /// Check if this is a literal
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            Self::IDENT | Self::INTEGER | Self::REAL | Self::STRING | Self::CHAR
        )
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

impl From<rowan::SyntaxKind> for SyntaxKind {
    fn from(raw: rowan::SyntaxKind) -> Self {
        assert!(raw.0 < SyntaxKind::__LAST as u16);
        // Safety: we control all syntax kinds and check bounds above
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }
}

/// Language definition for Rowan
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DeclLanguage {}

impl rowan::Language for DeclLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        raw.into()
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type aliases for convenience
pub type SyntaxNode = rowan::SyntaxNode<DeclLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<DeclLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<DeclLanguage>;
pub type SyntaxNodeChildren = rowan::SyntaxNodeChildren<DeclLanguage>;
