//! Recursive descent parser for the declaration language
//!
//! Builds a rowan GreenNode tree from tokens.
//! Supports error recovery and produces a lossless CST.
//!
//! Only the type-level structure is interpreted: namespaces, `using`
//! directives, attributes and type declarations. Everything inside a type
//! body that is not itself a type declaration (fields, methods, properties,
//! enumerators) is kept as an opaque `MEMBER` node.

use super::lexer::{Lexer, Token};
use super::syntax_kind::SyntaxKind;
use rowan::{GreenNode, GreenNodeBuilder, TextRange, TextSize};

/// Parse result containing the green tree and any errors
#[derive(Debug, Clone)]
pub struct Parse {
    pub green: GreenNode,
    pub errors: Vec<SyntaxError>,
}

impl Parse {
    /// Get the root syntax node
    pub fn syntax(&self) -> super::SyntaxNode {
        super::SyntaxNode::new_root(self.green.clone())
    }

    /// Check if parsing succeeded without errors
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A syntax error with location and message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
    pub range: TextRange,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, range: TextRange) -> Self {
        Self {
            message: message.into(),
            range,
        }
    }
}

impl std::fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at {}..{}",
            self.message,
            u32::from(self.range.start()),
            u32::from(self.range.end())
        )
    }
}

/// Parse source code into a CST
pub fn parse(input: &str) -> Parse {
    let tokens: Vec<_> = Lexer::new(input).collect();
    let mut parser = Parser::new(&tokens);
    parser.parse_source_file();
    parser.finish()
}

/// Tokens that can start a namespace-level member; used as a recovery set.
const MEMBER_RECOVERY: &[SyntaxKind] = &[
    SyntaxKind::USING_KW,
    SyntaxKind::NAMESPACE_KW,
    SyntaxKind::CLASS_KW,
    SyntaxKind::INTERFACE_KW,
    SyntaxKind::STRUCT_KW,
    SyntaxKind::RECORD_KW,
    SyntaxKind::ENUM_KW,
    SyntaxKind::DELEGATE_KW,
    SyntaxKind::L_BRACKET,
    SyntaxKind::PUBLIC_KW,
    SyntaxKind::PRIVATE_KW,
    SyntaxKind::PROTECTED_KW,
    SyntaxKind::INTERNAL_KW,
    SyntaxKind::ABSTRACT_KW,
    SyntaxKind::SEALED_KW,
    SyntaxKind::STATIC_KW,
    SyntaxKind::PARTIAL_KW,
    SyntaxKind::R_BRACE,
];

/// The parser state
struct Parser<'a> {
    tokens: &'a [Token<'a>],
    pos: usize,
    builder: GreenNodeBuilder<'static>,
    errors: Vec<SyntaxError>,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token<'a>]) -> Self {
        Self {
            tokens,
            pos: 0,
            builder: GreenNodeBuilder::new(),
            errors: Vec::new(),
        }
    }

    fn finish(self) -> Parse {
        Parse {
            green: self.builder.finish(),
            errors: self.errors,
        }
    }

    // =========================================================================
    // Token inspection
    // =========================================================================

    fn current(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.pos)
    }

    fn current_kind(&self) -> SyntaxKind {
        self.current().map(|t| t.kind).unwrap_or(SyntaxKind::ERROR)
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        !self.at_eof() && self.current_kind() == kind
    }

    fn at_any(&self, kinds: &[SyntaxKind]) -> bool {
        !self.at_eof() && kinds.contains(&self.current_kind())
    }

    fn at_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Index of the `n`th non-trivia token at or after `from`.
    fn nth_index_from(&self, from: usize, n: usize) -> Option<usize> {
        let mut count = 0;
        for (idx, token) in self.tokens.iter().enumerate().skip(from) {
            if !token.kind.is_trivia() {
                if count == n {
                    return Some(idx);
                }
                count += 1;
            }
        }
        None
    }

    fn nth(&self, n: usize) -> SyntaxKind {
        // Look ahead, skipping trivia
        self.nth_index_from(self.pos, n)
            .map(|idx| self.tokens[idx].kind)
            .unwrap_or(SyntaxKind::ERROR)
    }

    /// Look ahead past attribute lists and modifiers for a type keyword.
    fn at_type_decl_start(&self) -> bool {
        let mut idx = self.pos;
        loop {
            let Some(next) = self.nth_index_from(idx, 0) else {
                return false;
            };
            let kind = self.tokens[next].kind;
            if kind == SyntaxKind::L_BRACKET {
                match self.skip_balanced_from(next, SyntaxKind::L_BRACKET, SyntaxKind::R_BRACKET)
                {
                    Some(after) => idx = after,
                    None => return false,
                }
            } else if kind.is_modifier() {
                idx = next + 1;
            } else {
                return kind.is_type_keyword();
            }
        }
    }

    /// Given the index of an opening delimiter, return the index just past
    /// its matching closer.
    fn skip_balanced_from(&self, start: usize, open: SyntaxKind, close: SyntaxKind) -> Option<usize> {
        let mut depth = 0usize;
        for (idx, token) in self.tokens.iter().enumerate().skip(start) {
            if token.kind == open {
                depth += 1;
            } else if token.kind == close {
                depth -= 1;
                if depth == 0 {
                    return Some(idx + 1);
                }
            }
        }
        None
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    fn bump(&mut self) {
        if let Some(token) = self.current() {
            self.builder.token(token.kind.into(), token.text);
            self.pos += 1;
        }
    }

    fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: SyntaxKind) -> bool {
        if self.eat(kind) {
            true
        } else {
            self.error(format!("expected {:?}", kind));
            false
        }
    }

    fn skip_trivia(&mut self) {
        while self.current().map(|t| t.kind.is_trivia()).unwrap_or(false) {
            self.bump();
        }
    }

    // =========================================================================
    // Error handling
    // =========================================================================

    fn error(&mut self, message: impl Into<String>) {
        let range = self
            .current()
            .map(|t| TextRange::at(t.offset, TextSize::of(t.text)))
            .or_else(|| {
                self.tokens
                    .last()
                    .map(|t| TextRange::empty(t.offset + TextSize::of(t.text)))
            })
            .unwrap_or_else(|| TextRange::empty(TextSize::new(0)));
        self.errors.push(SyntaxError::new(message, range));
    }

    fn error_recover(&mut self, message: impl Into<String>, recovery: &[SyntaxKind]) {
        self.error(message);
        self.builder.start_node(SyntaxKind::ERROR.into());
        // Always consume at least one token to make progress
        let mut consumed = false;
        while !self.at_eof() && !(consumed && self.at_any(recovery)) {
            self.bump();
            consumed = true;
            self.skip_trivia();
        }
        self.builder.finish_node();
    }

    // =========================================================================
    // Node building helpers
    // =========================================================================

    fn start_node(&mut self, kind: SyntaxKind) {
        self.builder.start_node(kind.into());
    }

    fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    // =========================================================================
    // Grammar rules
    // =========================================================================

    /// SourceFile = NamespaceMember*
    fn parse_source_file(&mut self) {
        self.start_node(SyntaxKind::SOURCE_FILE);
        self.parse_namespace_members(false);
        self.finish_node();
    }

    /// Parse members until EOF, or until the closing `}` of a block.
    fn parse_namespace_members(&mut self, in_block: bool) {
        loop {
            self.skip_trivia();
            if self.at_eof() || (in_block && self.at(SyntaxKind::R_BRACE)) {
                break;
            }
            let pos_before = self.pos;
            self.parse_namespace_member();
            // Safety: if we didn't make progress, force-skip a token
            if self.pos == pos_before && !self.at_eof() {
                self.error(format!("stuck on token: {:?}", self.current_kind()));
                self.bump();
            }
        }
    }

    /// NamespaceMember = UsingDirective | Namespace | TypeDecl | AttributeList | Delegate
    fn parse_namespace_member(&mut self) {
        if self.at(SyntaxKind::USING_KW) {
            self.parse_using_directive();
        } else if self.at(SyntaxKind::NAMESPACE_KW) {
            self.parse_namespace();
        } else if self.at_global_attribute() {
            self.parse_attribute_list();
        } else if self.at_type_decl_start() {
            self.parse_type_decl();
        } else if self.at(SyntaxKind::L_BRACKET) {
            self.parse_attribute_list();
        } else if self.nth_is_delegate() {
            self.parse_member();
        } else {
            self.error_recover(
                format!("expected declaration, found {:?}", self.current_kind()),
                MEMBER_RECOVERY,
            );
        }
    }

    /// `[assembly: ...]` or `[module: ...]`
    fn at_global_attribute(&self) -> bool {
        self.at(SyntaxKind::L_BRACKET)
            && self
                .nth_index_from(self.pos, 1)
                .is_some_and(|idx| matches!(self.tokens[idx].text, "assembly" | "module"))
            && self.nth(2) == SyntaxKind::COLON
    }

    fn nth_is_delegate(&self) -> bool {
        let mut n = 0;
        while self.nth(n).is_modifier() {
            n += 1;
        }
        self.nth(n) == SyntaxKind::DELEGATE_KW
    }

    /// UsingDirective = 'using' 'static'? (Name '=')? TypeRef ';'
    fn parse_using_directive(&mut self) {
        self.start_node(SyntaxKind::USING_DIRECTIVE);

        self.expect(SyntaxKind::USING_KW);
        self.skip_trivia();
        self.eat(SyntaxKind::STATIC_KW);
        self.skip_trivia();

        if self.at(SyntaxKind::IDENT) && self.nth(1) == SyntaxKind::EQ {
            self.start_node(SyntaxKind::NAME);
            self.bump();
            self.finish_node();
            self.skip_trivia();
            self.bump(); // =
            self.skip_trivia();
        }

        if self.at(SyntaxKind::IDENT) {
            self.parse_type_ref();
        } else {
            self.error("expected namespace or type name");
        }

        self.skip_trivia();
        self.expect(SyntaxKind::SEMICOLON);

        self.finish_node();
    }

    /// Namespace = 'namespace' QualifiedName ('{' NamespaceMember* '}' ';'? | ';' NamespaceMember*)
    fn parse_namespace(&mut self) {
        self.start_node(SyntaxKind::NAMESPACE_DECL);

        self.expect(SyntaxKind::NAMESPACE_KW);
        self.skip_trivia();

        if self.at(SyntaxKind::IDENT) {
            self.parse_qualified_name();
        } else {
            self.error("expected namespace name");
        }

        self.skip_trivia();
        if self.eat(SyntaxKind::SEMICOLON) {
            // File-scoped namespace: the rest of the file belongs to it
            self.parse_namespace_members(false);
        } else if self.eat(SyntaxKind::L_BRACE) {
            self.parse_namespace_members(true);
            self.skip_trivia();
            self.expect(SyntaxKind::R_BRACE);
            if self.nth(0) == SyntaxKind::SEMICOLON {
                self.skip_trivia();
                self.bump();
            }
        } else {
            self.error("expected ';' or '{'");
        }

        self.finish_node();
    }

    /// QualifiedName = IDENT ('.' IDENT)*
    fn parse_qualified_name(&mut self) {
        self.start_node(SyntaxKind::QUALIFIED_NAME);

        self.expect(SyntaxKind::IDENT);
        while self.nth(0) == SyntaxKind::DOT && self.nth(1) == SyntaxKind::IDENT {
            self.skip_trivia();
            self.bump(); // .
            self.skip_trivia();
            self.bump(); // IDENT
        }

        self.finish_node();
    }

    /// TypeDecl = AttributeList* Modifier* TypeKeyword Name TypeParamList? ParamList?
    ///            BaseList? ConstraintClause* (Body | ';')
    fn parse_type_decl(&mut self) {
        let checkpoint = self.builder.checkpoint();

        while self.at(SyntaxKind::L_BRACKET) {
            self.parse_attribute_list();
            self.skip_trivia();
        }
        while self.current_kind().is_modifier() && !self.at_eof() {
            self.bump();
            self.skip_trivia();
        }

        let kind = match self.current_kind() {
            SyntaxKind::CLASS_KW => SyntaxKind::CLASS_DECL,
            SyntaxKind::INTERFACE_KW => SyntaxKind::INTERFACE_DECL,
            SyntaxKind::STRUCT_KW => SyntaxKind::STRUCT_DECL,
            SyntaxKind::RECORD_KW => SyntaxKind::RECORD_DECL,
            SyntaxKind::ENUM_KW => SyntaxKind::ENUM_DECL,
            _ => {
                self.builder
                    .start_node_at(checkpoint, SyntaxKind::ERROR.into());
                self.error("expected type declaration");
                self.finish_node();
                return;
            }
        };
        self.builder.start_node_at(checkpoint, kind.into());

        self.bump(); // type keyword
        if kind == SyntaxKind::RECORD_DECL
            && matches!(self.nth(0), SyntaxKind::CLASS_KW | SyntaxKind::STRUCT_KW)
        {
            self.skip_trivia();
            self.bump();
        }
        self.skip_trivia();

        if self.at(SyntaxKind::IDENT) {
            self.start_node(SyntaxKind::NAME);
            self.bump();
            self.finish_node();
            self.skip_trivia();
        } else {
            self.error("expected type name");
        }

        if self.at(SyntaxKind::LT) {
            self.parse_type_param_list();
            self.skip_trivia();
        }
        if self.at(SyntaxKind::L_PAREN) {
            self.parse_balanced(SyntaxKind::PARAM_LIST, SyntaxKind::L_PAREN, SyntaxKind::R_PAREN);
            self.skip_trivia();
        }
        if self.at(SyntaxKind::COLON) {
            self.parse_base_list();
            self.skip_trivia();
        }
        while self.at(SyntaxKind::WHERE_KW) {
            self.parse_constraint_clause();
            self.skip_trivia();
        }

        if self.eat(SyntaxKind::L_BRACE) {
            self.parse_type_members();
            self.skip_trivia();
            self.expect(SyntaxKind::R_BRACE);
            if self.nth(0) == SyntaxKind::SEMICOLON {
                self.skip_trivia();
                self.bump();
            }
        } else if !self.eat(SyntaxKind::SEMICOLON) {
            self.error("expected '{' or ';'");
        }

        self.finish_node();
    }

    /// Members of a type body: nested type declarations or opaque members.
    fn parse_type_members(&mut self) {
        loop {
            self.skip_trivia();
            if self.at_eof() || self.at(SyntaxKind::R_BRACE) {
                break;
            }
            let pos_before = self.pos;
            if self.at_type_decl_start() {
                self.parse_type_decl();
            } else {
                self.parse_member();
            }
            if self.pos == pos_before && !self.at_eof() {
                self.error(format!("stuck on token: {:?}", self.current_kind()));
                self.bump();
            }
        }
    }

    /// Opaque member: everything up to a `;` or a closed `{ ... }` block at
    /// nesting depth zero. Property initializers (`{ get; } = 1;`) and
    /// expression bodies ending in `};` stay in one member.
    fn parse_member(&mut self) {
        self.start_node(SyntaxKind::MEMBER);

        let mut depth = 0usize;
        while !self.at_eof() {
            match self.current_kind() {
                SyntaxKind::L_BRACE => {
                    depth += 1;
                    self.bump();
                }
                SyntaxKind::R_BRACE => {
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                    self.bump();
                    if depth == 0 {
                        match self.nth(0) {
                            SyntaxKind::EQ => {}
                            SyntaxKind::SEMICOLON => {
                                self.skip_trivia();
                                self.bump();
                                break;
                            }
                            _ => break,
                        }
                    }
                }
                SyntaxKind::SEMICOLON => {
                    self.bump();
                    if depth == 0 {
                        break;
                    }
                }
                _ => self.bump(),
            }
        }

        self.finish_node();
    }

    /// TypeParamList = '<' TypeParam (',' TypeParam)* '>'
    fn parse_type_param_list(&mut self) {
        self.start_node(SyntaxKind::TYPE_PARAM_LIST);

        self.expect(SyntaxKind::LT);
        loop {
            self.skip_trivia();
            while self.at(SyntaxKind::L_BRACKET) {
                self.parse_attribute_list();
                self.skip_trivia();
            }
            if self.at(SyntaxKind::IDENT) {
                self.start_node(SyntaxKind::TYPE_PARAM);
                // Variance annotations (`in`/`out`) lex as identifiers
                if matches!(self.current().map(|t| t.text), Some("in" | "out"))
                    && self.nth(1) == SyntaxKind::IDENT
                {
                    self.bump();
                    self.skip_trivia();
                }
                self.bump();
                self.finish_node();
            } else {
                self.error("expected type parameter");
                break;
            }
            self.skip_trivia();
            if !self.eat(SyntaxKind::COMMA) {
                break;
            }
        }
        self.skip_trivia();
        self.expect(SyntaxKind::GT);

        self.finish_node();
    }

    /// BaseList = ':' TypeRef ArgList? (',' TypeRef)*
    fn parse_base_list(&mut self) {
        self.start_node(SyntaxKind::BASE_LIST);

        self.expect(SyntaxKind::COLON);
        let mut first = true;
        loop {
            self.skip_trivia();
            if !self.at(SyntaxKind::IDENT) {
                self.error("expected base type");
                break;
            }
            self.parse_type_ref();
            if first && self.nth(0) == SyntaxKind::L_PAREN {
                // Primary-constructor base call: `record B(int X) : A(X)`
                self.skip_trivia();
                self.parse_balanced(SyntaxKind::ARG_LIST, SyntaxKind::L_PAREN, SyntaxKind::R_PAREN);
            }
            first = false;
            if self.nth(0) != SyntaxKind::COMMA {
                break;
            }
            self.skip_trivia();
            self.bump(); // ,
        }

        self.finish_node();
    }

    /// ConstraintClause = 'where' <tokens up to '{', ';' or the next 'where'>
    fn parse_constraint_clause(&mut self) {
        self.start_node(SyntaxKind::CONSTRAINT_CLAUSE);

        self.expect(SyntaxKind::WHERE_KW);
        while !self.at_eof()
            && !self.at_any(&[SyntaxKind::L_BRACE, SyntaxKind::SEMICOLON, SyntaxKind::WHERE_KW])
        {
            self.bump();
        }
        // Leave trailing trivia to the enclosing declaration
        self.finish_node();
    }

    /// TypeRef = PathSegment ('.' PathSegment)* '?'? ('[' ','* ']')*
    fn parse_type_ref(&mut self) {
        self.start_node(SyntaxKind::TYPE_REF);

        // Alias qualifier: `global::System.Object`
        if self.at(SyntaxKind::IDENT) && self.nth(1) == SyntaxKind::COLON_COLON {
            self.bump();
            self.skip_trivia();
            self.bump();
            self.skip_trivia();
        }

        self.parse_path_segment();
        while self.nth(0) == SyntaxKind::DOT && self.nth(1) == SyntaxKind::IDENT {
            self.skip_trivia();
            self.bump(); // .
            self.skip_trivia();
            self.parse_path_segment();
        }
        if self.nth(0) == SyntaxKind::QUESTION {
            self.skip_trivia();
            self.bump();
        }
        while self.nth(0) == SyntaxKind::L_BRACKET
            && matches!(self.nth(1), SyntaxKind::R_BRACKET | SyntaxKind::COMMA)
        {
            self.skip_trivia();
            self.bump(); // [
            while self.nth(0) == SyntaxKind::COMMA {
                self.skip_trivia();
                self.bump();
            }
            self.skip_trivia();
            self.expect(SyntaxKind::R_BRACKET);
        }

        self.finish_node();
    }

    /// PathSegment = IDENT TypeArgList?
    fn parse_path_segment(&mut self) {
        self.start_node(SyntaxKind::PATH_SEGMENT);

        self.expect(SyntaxKind::IDENT);
        if self.nth(0) == SyntaxKind::LT {
            self.skip_trivia();
            self.parse_type_arg_list();
        }

        self.finish_node();
    }

    /// TypeArgList = '<' TypeRef (',' TypeRef)* '>'
    fn parse_type_arg_list(&mut self) {
        self.start_node(SyntaxKind::TYPE_ARG_LIST);

        self.expect(SyntaxKind::LT);
        loop {
            self.skip_trivia();
            if !self.at(SyntaxKind::IDENT) {
                self.error("expected type argument");
                break;
            }
            self.parse_type_ref();
            if self.nth(0) != SyntaxKind::COMMA {
                break;
            }
            self.skip_trivia();
            self.bump(); // ,
        }
        self.skip_trivia();
        self.expect(SyntaxKind::GT);

        self.finish_node();
    }

    /// AttributeList = '[' AttributeTarget? Attribute (',' Attribute)* ','? ']'
    fn parse_attribute_list(&mut self) {
        self.start_node(SyntaxKind::ATTRIBUTE_LIST);

        self.expect(SyntaxKind::L_BRACKET);
        self.skip_trivia();

        if self.nth(1) == SyntaxKind::COLON && self.nth(2) != SyntaxKind::COLON {
            self.start_node(SyntaxKind::ATTRIBUTE_TARGET);
            self.bump(); // target name (`assembly`, `return`, ...)
            self.skip_trivia();
            self.bump(); // :
            self.finish_node();
            self.skip_trivia();
        }

        while self.at(SyntaxKind::IDENT) {
            self.parse_attribute();
            self.skip_trivia();
            if !self.eat(SyntaxKind::COMMA) {
                break;
            }
            self.skip_trivia();
        }

        if !self.at(SyntaxKind::R_BRACKET) {
            self.error_recover(
                "expected attribute",
                &[SyntaxKind::R_BRACKET, SyntaxKind::L_BRACE, SyntaxKind::SEMICOLON],
            );
        }
        self.eat(SyntaxKind::R_BRACKET);

        self.finish_node();
    }

    /// Attribute = TypeRef AttributeArgList?
    fn parse_attribute(&mut self) {
        self.start_node(SyntaxKind::ATTRIBUTE);

        self.parse_type_ref();
        if self.nth(0) == SyntaxKind::L_PAREN {
            self.skip_trivia();
            self.parse_attribute_arg_list();
        }

        self.finish_node();
    }

    /// AttributeArgList = '(' (AttributeArg (',' AttributeArg)*)? ')'
    fn parse_attribute_arg_list(&mut self) {
        self.start_node(SyntaxKind::ATTRIBUTE_ARG_LIST);

        self.expect(SyntaxKind::L_PAREN);
        loop {
            self.skip_trivia();
            if self.at_eof() || self.at(SyntaxKind::R_PAREN) {
                break;
            }
            self.parse_attribute_arg();
            self.skip_trivia();
            if !self.eat(SyntaxKind::COMMA) {
                break;
            }
        }
        self.skip_trivia();
        self.expect(SyntaxKind::R_PAREN);

        self.finish_node();
    }

    /// AttributeArg = (IDENT ('=' | ':'))? <expression tokens>
    fn parse_attribute_arg(&mut self) {
        self.start_node(SyntaxKind::ATTRIBUTE_ARG);

        if self.at(SyntaxKind::IDENT) && matches!(self.nth(1), SyntaxKind::EQ | SyntaxKind::COLON) {
            self.start_node(SyntaxKind::NAME_EQUALS);
            self.bump();
            self.skip_trivia();
            self.bump();
            self.finish_node();
            self.skip_trivia();
        }

        let mut depth = 0usize;
        while !self.at_eof() {
            match self.current_kind() {
                SyntaxKind::L_PAREN | SyntaxKind::L_BRACKET | SyntaxKind::L_BRACE => depth += 1,
                SyntaxKind::R_PAREN | SyntaxKind::R_BRACKET | SyntaxKind::R_BRACE => {
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                }
                SyntaxKind::COMMA if depth == 0 => break,
                _ => {}
            }
            // Keep trailing trivia outside the argument
            if self.current_kind().is_trivia()
                && matches!(self.nth(0), SyntaxKind::COMMA | SyntaxKind::R_PAREN)
                && depth == 0
            {
                break;
            }
            self.bump();
        }

        self.finish_node();
    }

    /// Consume a balanced `open ... close` group into a node of `kind`.
    fn parse_balanced(&mut self, kind: SyntaxKind, open: SyntaxKind, close: SyntaxKind) {
        self.start_node(kind);

        let mut depth = 0usize;
        while !self.at_eof() {
            let current = self.current_kind();
            self.bump();
            if current == open {
                depth += 1;
            } else if current == close {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    break;
                }
            }
        }
        if depth > 0 {
            self.error(format!("unclosed {:?}", open));
        }

        self.finish_node();
    }
}
