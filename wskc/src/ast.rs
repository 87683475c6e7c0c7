// ast.rs

use crate::token::Literal;

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Literal),                    // literal       | 4.2, "text", true
    Variable(String),                    // variable ref  | hsp, self, transform
    Unary(UnaryOp, Box<Expr>),           // unary op      | -expr, !expr
    Binary(Box<Expr>, BinOp, Box<Expr>), // binary op     | expr + expr
    Grouping(Box<Expr>),                 // grouping      | ( expr )
    Assign(String, Box<Expr>),           // assignment    | name = expr
    Get(Box<Expr>, String),              // member access | expr.field
    Set(Box<Expr>, String, Box<Expr>),   // member assign | expr.field = expr
    Call(Box<Expr>, Vec<Expr>),          // call          | expr(expr, ...)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Bang,  // !
    Minus, // -
}

impl UnaryOp {
    pub fn lexeme(self) -> &'static str {
        match self {
            UnaryOp::Bang => "!",
            UnaryOp::Minus => "-",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Plus,         // +
    Minus,        // -
    Star,         // *
    Slash,        // /
    EqualEqual,   // ==
    BangEqual,    // !=
    Greater,      // >
    GreaterEqual, // >=
    Less,         // <
    LessEqual,    // <=
    And,          // and
    Or,           // or
}

impl BinOp {
    /// Surface spelling; the generator re-emits it verbatim
    pub fn lexeme(self) -> &'static str {
        match self {
            BinOp::Plus => "+",
            BinOp::Minus => "-",
            BinOp::Star => "*",
            BinOp::Slash => "/",
            BinOp::EqualEqual => "==",
            BinOp::BangEqual => "!=",
            BinOp::Greater => ">",
            BinOp::GreaterEqual => ">=",
            BinOp::Less => "<",
            BinOp::LessEqual => "<=",
            BinOp::And => "and",
            BinOp::Or => "or",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Expression(Expr),                       // expression  | expr ;
    Print(Expr),                            // debug print | print expr ;
    Var(String, Option<Expr>),              // declaration | var name [= expr] ;
    Block(Vec<Stmt>),                       // block       | { stmt* }
    If(Expr, Box<Stmt>, Option<Box<Stmt>>), // conditional | if (expr) stmt [else stmt]
    While(Expr, Box<Stmt>),                 // loop        | while (expr) stmt
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Float,  // float
    Int,    // int
    Bool,   // bool
    Uint32, // uint32
}

#[derive(Debug, Clone, PartialEq)]
pub struct EntityField {
    pub name: String,
    pub ty: FieldType,
}

/// One `entity Name { ... }` declaration. Lifecycle slots hold optional
/// blocks; a later duplicate block replaces the earlier one.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityDecl {
    pub name: String,
    pub fields: Vec<EntityField>,
    pub on_create: Option<Stmt>,
    pub on_update: Option<Stmt>,
    pub on_destroy: Option<Stmt>,
    pub on_collision: Option<Stmt>,
    pub collision_param: Option<String>,
}

/// `spawn Name(x, y);` — coordinates are literal numbers at parse time
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnCall {
    pub entity: String,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameDecl {
    pub spawns: Vec<SpawnCall>,
}

/// A parsed script: top-level statements, entity declarations in source
/// order, and at most one game block.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub statements: Vec<Stmt>,
    pub entities: Vec<EntityDecl>,
    pub game: Option<GameDecl>,
}
