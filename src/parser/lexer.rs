//! Logos-based lexer for the declaration language
//!
//! Fast tokenization using the logos crate. The lexer is lossless: every
//! byte of the input ends up in exactly one token, unknown characters become
//! `ERROR` tokens.

use super::syntax_kind::SyntaxKind;
use logos::Logos;
use rowan::TextSize;

/// A token with its kind, text, and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
    pub offset: TextSize,
}

const BYTE_ORDER_MARK: char = '\u{FEFF}';

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
    offset: u32,
    /// Leading byte order mark, emitted as whitespace before anything else.
    bom: Option<&'a str>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        let (bom, rest) = match input.strip_prefix(BYTE_ORDER_MARK) {
            Some(rest) => (Some(&input[..BYTE_ORDER_MARK.len_utf8()]), rest),
            None => (None, input),
        };
        Self {
            inner: LogosToken::lexer(rest),
            offset: 0,
            bom,
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(text) = self.bom.take() {
            self.offset = text.len() as u32;
            return Some(Token {
                kind: SyntaxKind::WHITESPACE,
                text,
                offset: TextSize::new(0),
            });
        }

        let logos_token = self.inner.next()?;
        let text = self.inner.slice();
        let offset = TextSize::new(self.offset);
        self.offset += text.len() as u32;

        let kind = match logos_token {
            Ok(t) => t.into(),
            Err(()) => SyntaxKind::ERROR,
        };

        Some(Token { kind, text, offset })
    }
}

/// Tokenize an entire string into a Vec
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

/// Logos token enum - maps to SyntaxKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum LogosToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,

    #[regex(r"//[^\n]*", allow_greedy = true)]
    LineComment,

    #[regex(r"/\*([^*]|\*+[^*/])*\*+/")]
    BlockComment,

    // =========================================================================
    // LITERALS
    // =========================================================================
    #[regex(r"@?[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,

    #[regex(r"[0-9]+[uUlL]*")]
    #[regex(r"0[xX][0-9a-fA-F_]+[uUlL]*")]
    Integer,

    #[regex(r"[0-9]*\.[0-9]+([eE][+-]?[0-9]+)?[fFdDmM]?")]
    Real,

    #[regex(r#""([^"\\\n]|\\.)*""#)]
    #[regex(r#"@"([^"]|"")*""#)]
    String,

    #[regex(r"'([^'\\\n]|\\.)+'")]
    Char,

    // =========================================================================
    // MULTI-CHARACTER PUNCTUATION (must come before single-char)
    // =========================================================================
    #[token("::")]
    ColonColon,
    #[token("==")]
    EqEq,
    #[token("!=")]
    BangEq,
    #[token("=>")]
    FatArrow,
    #[token("->")]
    Arrow,
    #[token("??")]
    QuestionQuestion,
    #[token("++")]
    PlusPlus,
    #[token("--")]
    MinusMinus,
    #[token("&&")]
    AmpAmp,
    #[token("||")]
    PipePipe,

    // =========================================================================
    // SINGLE-CHARACTER PUNCTUATION
    // =========================================================================
    // `>` is never merged into `>>` or `>=` so that nested generic argument
    // lists like `Base<List<T>>` close one level per token.
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token(".")]
    Dot,
    #[token(",")]
    Comma,
    #[token("=")]
    Eq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("?")]
    Question,
    #[token("!")]
    Bang,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("^")]
    Caret,
    #[token("~")]
    Tilde,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("@")]
    At,
    #[token("#")]
    Hash,
    #[token("$")]
    Dollar,

    // =========================================================================
    // KEYWORDS (longest match wins in logos)
    // =========================================================================
    #[token("using")]
    UsingKw,
    #[token("namespace")]
    NamespaceKw,
    #[token("class")]
    ClassKw,
    #[token("interface")]
    InterfaceKw,
    #[token("struct")]
    StructKw,
    #[token("record")]
    RecordKw,
    #[token("enum")]
    EnumKw,
    #[token("delegate")]
    DelegateKw,
    #[token("where")]
    WhereKw,
    #[token("static")]
    StaticKw,
    #[token("public")]
    PublicKw,
    #[token("private")]
    PrivateKw,
    #[token("protected")]
    ProtectedKw,
    #[token("internal")]
    InternalKw,
    #[token("abstract")]
    AbstractKw,
    #[token("sealed")]
    SealedKw,
    #[token("partial")]
    PartialKw,
    #[token("new")]
    NewKw,
    #[token("readonly")]
    ReadonlyKw,
    #[token("unsafe")]
    UnsafeKw,
}

impl From<LogosToken> for SyntaxKind {
    fn from(token: LogosToken) -> Self {
        use LogosToken::*;
        match token {
            Whitespace => SyntaxKind::WHITESPACE,
            LineComment => SyntaxKind::LINE_COMMENT,
            BlockComment => SyntaxKind::BLOCK_COMMENT,
            Ident => SyntaxKind::IDENT,
            Integer => SyntaxKind::INTEGER,
            Real => SyntaxKind::REAL,
            String => SyntaxKind::STRING,
            Char => SyntaxKind::CHAR,
            ColonColon => SyntaxKind::COLON_COLON,
            EqEq => SyntaxKind::EQ_EQ,
            BangEq => SyntaxKind::BANG_EQ,
            FatArrow => SyntaxKind::FAT_ARROW,
            Arrow => SyntaxKind::ARROW,
            QuestionQuestion => SyntaxKind::QUESTION_QUESTION,
            PlusPlus => SyntaxKind::PLUS_PLUS,
            MinusMinus => SyntaxKind::MINUS_MINUS,
            AmpAmp => SyntaxKind::AMP_AMP,
            PipePipe => SyntaxKind::PIPE_PIPE,
            LBrace => SyntaxKind::L_BRACE,
            RBrace => SyntaxKind::R_BRACE,
            LBracket => SyntaxKind::L_BRACKET,
            RBracket => SyntaxKind::R_BRACKET,
            LParen => SyntaxKind::L_PAREN,
            RParen => SyntaxKind::R_PAREN,
            Semicolon => SyntaxKind::SEMICOLON,
            Colon => SyntaxKind::COLON,
            Dot => SyntaxKind::DOT,
            Comma => SyntaxKind::COMMA,
            Eq => SyntaxKind::EQ,
            Lt => SyntaxKind::LT,
            Gt => SyntaxKind::GT,
            Question => SyntaxKind::QUESTION,
            Bang => SyntaxKind::BANG,
            Plus => SyntaxKind::PLUS,
            Minus => SyntaxKind::MINUS,
            Star => SyntaxKind::STAR,
            Slash => SyntaxKind::SLASH,
            Percent => SyntaxKind::PERCENT,
            Caret => SyntaxKind::CARET,
            Tilde => SyntaxKind::TILDE,
            Amp => SyntaxKind::AMP,
            Pipe => SyntaxKind::PIPE,
            At => SyntaxKind::AT,
            Hash => SyntaxKind::HASH,
            Dollar => SyntaxKind::DOLLAR,
            UsingKw => SyntaxKind::USING_KW,
            NamespaceKw => SyntaxKind::NAMESPACE_KW,
            ClassKw => SyntaxKind::CLASS_KW,
            InterfaceKw => SyntaxKind::INTERFACE_KW,
            StructKw => SyntaxKind::STRUCT_KW,
            RecordKw => SyntaxKind::RECORD_KW,
            EnumKw => SyntaxKind::ENUM_KW,
            DelegateKw => SyntaxKind::DELEGATE_KW,
            WhereKw => SyntaxKind::WHERE_KW,
            StaticKw => SyntaxKind::STATIC_KW,
            PublicKw => SyntaxKind::PUBLIC_KW,
            PrivateKw => SyntaxKind::PRIVATE_KW,
            ProtectedKw => SyntaxKind::PROTECTED_KW,
            InternalKw => SyntaxKind::INTERNAL_KW,
            AbstractKw => SyntaxKind::ABSTRACT_KW,
            SealedKw => SyntaxKind::SEALED_KW,
            PartialKw => SyntaxKind::PARTIAL_KW,
            NewKw => SyntaxKind::NEW_KW,
            ReadonlyKw => SyntaxKind::READONLY_KW,
            UnsafeKw => SyntaxKind::UNSAFE_KW,
        }
    }
}
