// token.rs

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    // Single character tokens
    LParen,    // '('
    RParen,    // ')'
    LBrace,    // '{'
    RBrace,    // '}'
    Comma,     // ','
    Dot,       // '.'
    Minus,     // '-'
    Plus,      // '+'
    Semicolon, // ';'
    Slash,     // '/'
    Star,      // '*'

    // One or two character tokens
    Bang,         // '!'
    BangEqual,    // '!='
    Equal,        // '='
    EqualEqual,   // '=='
    Greater,      // '>'
    GreaterEqual, // '>='
    Less,         // '<'
    LessEqual,    // '<='

    // Literals; decoded payload lives in Token::literal
    Ident,
    Str,
    Number,

    // Keywords
    KwAnd,    // "and"
    KwClass,  // "class"
    KwElse,   // "else"
    KwFalse,  // "false"
    KwFun,    // "fun"
    KwFor,    // "for"
    KwIf,     // "if"
    KwNil,    // "nil"
    KwOr,     // "or"
    KwPrint,  // "print"
    KwReturn, // "return"
    KwSuper,  // "super"
    KwThis,   // "this"
    KwTrue,   // "true"
    KwVar,    // "var"
    KwWhile,  // "while"
    KwGame,   // "game"
    KwSpawn,  // "spawn"

    // Entity keywords
    KwEntity,      // "entity"
    KwOnCreate,    // "on_create"
    KwOnUpdate,    // "on_update"
    KwOnDestroy,   // "on_destroy"
    KwOnCollision, // "on_collision"
    KwSelf,        // "self"
    KwFloat,       // "float"
    KwInt,         // "int"
    KwBool,        // "bool"
    KwUint32,      // "uint32"

    // Engine component keywords
    KwTransform,  // "transform"
    KwRenderable, // "renderable"
    KwCollision,  // "collision"

    Eof,
}

/// Decoded literal payload carried by number, string and boolean tokens.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    None,
    Number(f64),
    Text(String),
    Boolean(bool),
}

/// A lexical unit. Owns its source text so the tree built from it can
/// outlive the token stream.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub line: usize,
    pub literal: Literal,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: usize) -> Self {
        Token {
            kind,
            lexeme: lexeme.into(),
            line,
            literal: Literal::None,
        }
    }

    pub fn with_literal(
        kind: TokenKind,
        lexeme: impl Into<String>,
        line: usize,
        literal: Literal,
    ) -> Self {
        Token {
            kind,
            lexeme: lexeme.into(),
            line,
            literal,
        }
    }

    pub fn number(&self) -> Option<f64> {
        match self.literal {
            Literal::Number(n) => Some(n),
            _ => None,
        }
    }
}

static KEYWORDS: Lazy<HashMap<&'static str, TokenKind>> = Lazy::new(|| {
    HashMap::from([
        ("and", TokenKind::KwAnd),
        ("class", TokenKind::KwClass),
        ("else", TokenKind::KwElse),
        ("false", TokenKind::KwFalse),
        ("fun", TokenKind::KwFun),
        ("for", TokenKind::KwFor),
        ("if", TokenKind::KwIf),
        ("nil", TokenKind::KwNil),
        ("or", TokenKind::KwOr),
        ("print", TokenKind::KwPrint),
        ("return", TokenKind::KwReturn),
        ("super", TokenKind::KwSuper),
        ("this", TokenKind::KwThis),
        ("true", TokenKind::KwTrue),
        ("var", TokenKind::KwVar),
        ("while", TokenKind::KwWhile),
        ("game", TokenKind::KwGame),
        ("spawn", TokenKind::KwSpawn),
        ("entity", TokenKind::KwEntity),
        ("on_create", TokenKind::KwOnCreate),
        ("on_update", TokenKind::KwOnUpdate),
        ("on_destroy", TokenKind::KwOnDestroy),
        ("on_collision", TokenKind::KwOnCollision),
        ("self", TokenKind::KwSelf),
        ("float", TokenKind::KwFloat),
        ("int", TokenKind::KwInt),
        ("bool", TokenKind::KwBool),
        ("uint32", TokenKind::KwUint32),
        ("transform", TokenKind::KwTransform),
        ("renderable", TokenKind::KwRenderable),
        ("collision", TokenKind::KwCollision),
    ])
});

pub fn keyword(s: &str) -> Option<TokenKind> {
    KEYWORDS.get(s).copied()
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::Comma => ",",
            TokenKind::Dot => ".",
            TokenKind::Minus => "-",
            TokenKind::Plus => "+",
            TokenKind::Semicolon => ";",
            TokenKind::Slash => "/",
            TokenKind::Star => "*",
            TokenKind::Bang => "!",
            TokenKind::BangEqual => "!=",
            TokenKind::Equal => "=",
            TokenKind::EqualEqual => "==",
            TokenKind::Greater => ">",
            TokenKind::GreaterEqual => ">=",
            TokenKind::Less => "<",
            TokenKind::LessEqual => "<=",
            TokenKind::Ident => "identifier",
            TokenKind::Str => "string",
            TokenKind::Number => "number",
            TokenKind::KwAnd => "and",
            TokenKind::KwClass => "class",
            TokenKind::KwElse => "else",
            TokenKind::KwFalse => "false",
            TokenKind::KwFun => "fun",
            TokenKind::KwFor => "for",
            TokenKind::KwIf => "if",
            TokenKind::KwNil => "nil",
            TokenKind::KwOr => "or",
            TokenKind::KwPrint => "print",
            TokenKind::KwReturn => "return",
            TokenKind::KwSuper => "super",
            TokenKind::KwThis => "this",
            TokenKind::KwTrue => "true",
            TokenKind::KwVar => "var",
            TokenKind::KwWhile => "while",
            TokenKind::KwGame => "game",
            TokenKind::KwSpawn => "spawn",
            TokenKind::KwEntity => "entity",
            TokenKind::KwOnCreate => "on_create",
            TokenKind::KwOnUpdate => "on_update",
            TokenKind::KwOnDestroy => "on_destroy",
            TokenKind::KwOnCollision => "on_collision",
            TokenKind::KwSelf => "self",
            TokenKind::KwFloat => "float",
            TokenKind::KwInt => "int",
            TokenKind::KwBool => "bool",
            TokenKind::KwUint32 => "uint32",
            TokenKind::KwTransform => "transform",
            TokenKind::KwRenderable => "renderable",
            TokenKind::KwCollision => "collision",
            TokenKind::Eof => "eof",
        };
        f.write_str(s)
    }
}
