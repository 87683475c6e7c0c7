// parser.rs

use crate::ast::{
    BinOp, EntityDecl, EntityField, Expr, FieldType, GameDecl, Program, SpawnCall, Stmt, UnaryOp,
};
use crate::error::Error;
use crate::token::{Literal, Token, TokenKind};
use std::iter::Peekable;

pub struct Parser<I: Iterator<Item = Token>> {
    tokens: Peekable<I>,
}

impl<I: Iterator<Item = Token>> Parser<I> {
    pub fn new(tokens: I) -> Self {
        Parser {
            tokens: tokens.peekable(),
        }
    }

    /// Parse the whole token stream. The first grammatical error aborts
    /// the parse and propagates out.
    pub fn parse(mut self) -> Result<Program, Error> {
        self.parse_program()
    }
}

// ------------------------------------------------------------------------
// Helpers
// ------------------------------------------------------------------------

impl<I: Iterator<Item = Token>> Parser<I> {
    fn is_at_end(&mut self) -> bool {
        match self.tokens.peek() {
            Some(token) => token.kind == TokenKind::Eof,
            None => true,
        }
    }

    /// Check next token matches the condition without consuming it
    fn check_if<F: Fn(&Token) -> bool>(&mut self, cond: F) -> bool {
        self.tokens.peek().map_or(false, cond)
    }

    /// Consume the next token if it matches the condition
    fn consume_if<F: Fn(&Token) -> bool>(&mut self, cond: F) -> Option<Token> {
        self.tokens.next_if(|token| cond(token))
    }

    /// Next token must match the condition
    fn expect_tobe<F: Fn(&Token) -> bool>(
        &mut self,
        cond: F,
        message: &'static str,
    ) -> Result<Token, Error> {
        if let Some(token) = self.tokens.peek().cloned() {
            if cond(&token) {
                self.tokens.next();
                Ok(token)
            } else {
                Err(Error::syntax(&token, message))
            }
        } else {
            Err(Error::UnexpectedEof)
        }
    }

    /// Error pointing at the next token
    fn error_here(&mut self, message: &'static str) -> Error {
        match self.tokens.peek() {
            Some(token) => Error::syntax(token, message),
            None => Error::UnexpectedEof,
        }
    }
}

macro_rules! check {
    ($parser:expr, $kind:pat) => {
        $parser.check_if(|token| matches!(&token.kind, $kind))
    };
}

macro_rules! optional {
    ($parser:expr, $kind:pat) => {
        $parser.consume_if(|token| matches!(&token.kind, $kind))
    };
}

macro_rules! consume {
    ($parser:expr, $kind:pat, $msg:expr) => {
        $parser.expect_tobe(|token| matches!(&token.kind, $kind), $msg)
    };
}

// ------------------------------------------------------------------------
// Declarations
// ------------------------------------------------------------------------

impl<I: Iterator<Item = Token>> Parser<I> {
    fn parse_program(&mut self) -> Result<Program, Error> {
        let mut statements = Vec::new();
        let mut entities = Vec::new();
        let mut game = None;

        while !self.is_at_end() {
            if optional!(self, TokenKind::KwEntity).is_some() {
                entities.push(self.parse_entity()?);
            } else if let Some(token) = optional!(self, TokenKind::KwGame) {
                if game.is_some() {
                    return Err(Error::syntax(&token, "Only one 'game' block allowed."));
                }
                game = Some(self.parse_game()?);
            } else {
                statements.push(self.parse_decl()?);
            }
        }

        Ok(Program {
            statements,
            entities,
            game,
        })
    }

    /// Entity declaration, after 'entity'
    /// `entity <ident> { (<type> <ident> ;)* <lifecycle-block>* }`
    fn parse_entity(&mut self) -> Result<EntityDecl, Error> {
        let name = consume!(self, TokenKind::Ident, "Expect entity name.")?;
        consume!(self, TokenKind::LBrace, "Expect '{' after entity name.")?;

        // Fields run until the first lifecycle keyword or the closing brace
        let mut fields = Vec::new();
        while !check!(
            self,
            TokenKind::RBrace
                | TokenKind::KwOnCreate
                | TokenKind::KwOnUpdate
                | TokenKind::KwOnDestroy
                | TokenKind::KwOnCollision
        ) && !self.is_at_end()
        {
            let ty = self.parse_field_type()?;
            let field_name = consume!(self, TokenKind::Ident, "Expect field name.")?;
            consume!(self, TokenKind::Semicolon, "Expect ';' after field declaration.")?;
            fields.push(EntityField {
                name: field_name.lexeme,
                ty,
            });
        }

        // Lifecycle blocks in any order; a later duplicate wins
        let mut on_create = None;
        let mut on_update = None;
        let mut on_destroy = None;
        let mut on_collision = None;
        let mut collision_param = None;

        while !check!(self, TokenKind::RBrace) && !self.is_at_end() {
            if optional!(self, TokenKind::KwOnCreate).is_some() {
                consume!(self, TokenKind::LBrace, "Expect '{' after on_create.")?;
                on_create = Some(self.parse_block()?);
            } else if optional!(self, TokenKind::KwOnUpdate).is_some() {
                consume!(self, TokenKind::LBrace, "Expect '{' after on_update.")?;
                on_update = Some(self.parse_block()?);
            } else if optional!(self, TokenKind::KwOnDestroy).is_some() {
                consume!(self, TokenKind::LBrace, "Expect '{' after on_destroy.")?;
                on_destroy = Some(self.parse_block()?);
            } else if optional!(self, TokenKind::KwOnCollision).is_some() {
                consume!(self, TokenKind::LParen, "Expect '(' after on_collision.")?;
                let param = consume!(self, TokenKind::Ident, "Expect parameter name.")?;
                consume!(self, TokenKind::RParen, "Expect ')' after parameter.")?;
                consume!(self, TokenKind::LBrace, "Expect '{' after on_collision.")?;
                collision_param = Some(param.lexeme);
                on_collision = Some(self.parse_block()?);
            } else {
                return Err(self.error_here(
                    "Expect on_create, on_update, on_destroy, or on_collision.",
                ));
            }
        }

        consume!(self, TokenKind::RBrace, "Expect '}' after entity body.")?;

        Ok(EntityDecl {
            name: name.lexeme,
            fields,
            on_create,
            on_update,
            on_destroy,
            on_collision,
            collision_param,
        })
    }

    /// Field type
    /// `float` | `int` | `bool` | `uint32`
    fn parse_field_type(&mut self) -> Result<FieldType, Error> {
        if optional!(self, TokenKind::KwFloat).is_some() {
            return Ok(FieldType::Float);
        }
        if optional!(self, TokenKind::KwInt).is_some() {
            return Ok(FieldType::Int);
        }
        if optional!(self, TokenKind::KwBool).is_some() {
            return Ok(FieldType::Bool);
        }
        if optional!(self, TokenKind::KwUint32).is_some() {
            return Ok(FieldType::Uint32);
        }
        Err(self.error_here("Expect type (float, int, bool, uint32)."))
    }

    /// Game declaration, after 'game'
    /// `game { (spawn <ident> ( <number> , <number> ) ;)* }`
    fn parse_game(&mut self) -> Result<GameDecl, Error> {
        consume!(self, TokenKind::LBrace, "Expect '{' after 'game'.")?;

        let mut spawns = Vec::new();
        while !check!(self, TokenKind::RBrace) && !self.is_at_end() {
            consume!(self, TokenKind::KwSpawn, "Expect 'spawn' in game block.")?;
            let entity = consume!(self, TokenKind::Ident, "Expect entity name after 'spawn'.")?;
            consume!(self, TokenKind::LParen, "Expect '(' after entity name.")?;
            let x = consume!(self, TokenKind::Number, "Expect x coordinate.")?;
            consume!(self, TokenKind::Comma, "Expect ',' after x coordinate.")?;
            let y = consume!(self, TokenKind::Number, "Expect y coordinate.")?;
            consume!(self, TokenKind::RParen, "Expect ')' after coordinates.")?;
            consume!(self, TokenKind::Semicolon, "Expect ';' after spawn call.")?;

            spawns.push(SpawnCall {
                entity: entity.lexeme,
                x: x.number().unwrap_or(0.0),
                y: y.number().unwrap_or(0.0),
            });
        }

        consume!(self, TokenKind::RBrace, "Expect '}' after game block.")?;
        Ok(GameDecl { spawns })
    }
}

// ------------------------------------------------------------------------
// Statements
// ------------------------------------------------------------------------

impl<I: Iterator<Item = Token>> Parser<I> {
    /// Declaration
    /// `var <ident> [= <expr>] ;` | statement
    fn parse_decl(&mut self) -> Result<Stmt, Error> {
        if optional!(self, TokenKind::KwVar).is_some() {
            return self.parse_var();
        }
        self.parse_stmt()
    }

    /// Statement
    fn parse_stmt(&mut self) -> Result<Stmt, Error> {
        if optional!(self, TokenKind::KwPrint).is_some() {
            return self.parse_print();
        }
        if optional!(self, TokenKind::KwIf).is_some() {
            return self.parse_if();
        }
        if optional!(self, TokenKind::KwWhile).is_some() {
            return self.parse_while();
        }
        if optional!(self, TokenKind::KwFor).is_some() {
            return self.parse_for();
        }
        if optional!(self, TokenKind::LBrace).is_some() {
            return self.parse_block();
        }
        self.parse_expr_stmt()
    }

    /// Variable declaration, after 'var'
    fn parse_var(&mut self) -> Result<Stmt, Error> {
        let name = consume!(self, TokenKind::Ident, "Expect variable name.")?;
        let initializer = if optional!(self, TokenKind::Equal).is_some() {
            Some(self.parse_expr()?)
        } else {
            None
        };
        consume!(
            self,
            TokenKind::Semicolon,
            "Expect ';' after variable declaration."
        )?;
        Ok(Stmt::Var(name.lexeme, initializer))
    }

    /// Print statement, after 'print'
    fn parse_print(&mut self) -> Result<Stmt, Error> {
        let value = self.parse_expr()?;
        consume!(self, TokenKind::Semicolon, "Expect ';' after value.")?;
        Ok(Stmt::Print(value))
    }

    fn parse_expr_stmt(&mut self) -> Result<Stmt, Error> {
        let expr = self.parse_expr()?;
        consume!(self, TokenKind::Semicolon, "Expect ';' after expression.")?;
        Ok(Stmt::Expression(expr))
    }

    /// Block statement, after the opening '{'
    /// `{ <stmt> <stmt> ... }`
    fn parse_block(&mut self) -> Result<Stmt, Error> {
        let mut statements = Vec::new();
        while !check!(self, TokenKind::RBrace) && !self.is_at_end() {
            statements.push(self.parse_decl()?);
        }
        consume!(self, TokenKind::RBrace, "Expect '}' after block.")?;
        Ok(Stmt::Block(statements))
    }

    /// If statement, after 'if'
    /// `if ( <expr> ) <stmt> [ else <stmt> ]`
    fn parse_if(&mut self) -> Result<Stmt, Error> {
        consume!(self, TokenKind::LParen, "Expect '(' after 'if'.")?;
        let condition = self.parse_expr()?;
        consume!(self, TokenKind::RParen, "Expect ')' after if condition.")?;

        let then_branch = Box::new(self.parse_stmt()?);
        let else_branch = if optional!(self, TokenKind::KwElse).is_some() {
            Some(Box::new(self.parse_stmt()?))
        } else {
            None
        };

        Ok(Stmt::If(condition, then_branch, else_branch))
    }

    /// While statement, after 'while'
    /// `while ( <expr> ) <stmt>`
    fn parse_while(&mut self) -> Result<Stmt, Error> {
        consume!(self, TokenKind::LParen, "Expect '(' after 'while'.")?;
        let condition = self.parse_expr()?;
        consume!(self, TokenKind::RParen, "Expect ')' after while condition.")?;
        let body = Box::new(self.parse_stmt()?);
        Ok(Stmt::While(condition, body))
    }

    /// For statement, after 'for'. Desugared at parse time: the
    /// increment joins the body in a block, the condition (or literal
    /// true) wraps it in a while, the initializer wraps the while in an
    /// outer block.
    /// `for ( [init] ; [<expr>] ; [<expr>] ) <stmt>`
    fn parse_for(&mut self) -> Result<Stmt, Error> {
        consume!(self, TokenKind::LParen, "Expect '(' after 'for'.")?;

        let initializer = if optional!(self, TokenKind::Semicolon).is_some() {
            None
        } else if optional!(self, TokenKind::KwVar).is_some() {
            Some(self.parse_var()?)
        } else {
            Some(self.parse_expr_stmt()?)
        };

        let condition = if !check!(self, TokenKind::Semicolon) {
            Some(self.parse_expr()?)
        } else {
            None
        };
        consume!(self, TokenKind::Semicolon, "Expect ';' after for condition.")?;

        let increment = if !check!(self, TokenKind::RParen) {
            Some(self.parse_expr()?)
        } else {
            None
        };
        consume!(self, TokenKind::RParen, "Expect ')' after for clauses.")?;

        let mut body = self.parse_stmt()?;

        if let Some(increment) = increment {
            body = Stmt::Block(vec![body, Stmt::Expression(increment)]);
        }

        let condition = condition.unwrap_or(Expr::Literal(Literal::Boolean(true)));
        body = Stmt::While(condition, Box::new(body));

        if let Some(initializer) = initializer {
            body = Stmt::Block(vec![initializer, body]);
        }

        Ok(body)
    }
}

// ------------------------------------------------------------------------
// Expressions, precedence low to high
// ------------------------------------------------------------------------

impl<I: Iterator<Item = Token>> Parser<I> {
    /// Expression
    fn parse_expr(&mut self) -> Result<Expr, Error> {
        self.parse_assign()
    }

    /// Assignment, right-associative. The left side must already have
    /// parsed as a variable or a member access.
    /// `<ident> = <expr>` | `<expr> . <ident> = <expr>`
    fn parse_assign(&mut self) -> Result<Expr, Error> {
        let expr = self.parse_or()?;

        if let Some(equals) = optional!(self, TokenKind::Equal) {
            let value = self.parse_assign()?;
            return match expr {
                Expr::Variable(name) => Ok(Expr::Assign(name, Box::new(value))),
                Expr::Get(object, name) => Ok(Expr::Set(object, name, Box::new(value))),
                _ => Err(Error::syntax(&equals, "Invalid assignment target.")),
            };
        }

        Ok(expr)
    }

    /// Logical OR expression
    /// `<expr> or <expr> or ...`
    fn parse_or(&mut self) -> Result<Expr, Error> {
        let mut expr = self.parse_and()?;
        while optional!(self, TokenKind::KwOr).is_some() {
            let right = self.parse_and()?;
            expr = Expr::Binary(Box::new(expr), BinOp::Or, Box::new(right));
        }
        Ok(expr)
    }

    /// Logical AND expression
    /// `<expr> and <expr> and ...`
    fn parse_and(&mut self) -> Result<Expr, Error> {
        let mut expr = self.parse_eq()?;
        while optional!(self, TokenKind::KwAnd).is_some() {
            let right = self.parse_eq()?;
            expr = Expr::Binary(Box::new(expr), BinOp::And, Box::new(right));
        }
        Ok(expr)
    }

    /// Equality expression
    /// `<expr> == <expr>` | `<expr> != <expr>`
    fn parse_eq(&mut self) -> Result<Expr, Error> {
        let mut expr = self.parse_cmp()?;
        loop {
            let op = if optional!(self, TokenKind::EqualEqual).is_some() {
                BinOp::EqualEqual
            } else if optional!(self, TokenKind::BangEqual).is_some() {
                BinOp::BangEqual
            } else {
                break;
            };
            let right = self.parse_cmp()?;
            expr = Expr::Binary(Box::new(expr), op, Box::new(right));
        }
        Ok(expr)
    }

    /// Comparison expression
    /// `<expr> < <expr>` | `<expr> <= <expr>` | `<expr> > <expr>` | `<expr> >= <expr>`
    fn parse_cmp(&mut self) -> Result<Expr, Error> {
        let mut expr = self.parse_term()?;
        loop {
            let op = if optional!(self, TokenKind::Greater).is_some() {
                BinOp::Greater
            } else if optional!(self, TokenKind::GreaterEqual).is_some() {
                BinOp::GreaterEqual
            } else if optional!(self, TokenKind::Less).is_some() {
                BinOp::Less
            } else if optional!(self, TokenKind::LessEqual).is_some() {
                BinOp::LessEqual
            } else {
                break;
            };
            let right = self.parse_term()?;
            expr = Expr::Binary(Box::new(expr), op, Box::new(right));
        }
        Ok(expr)
    }

    /// Additive expression
    /// `<expr> + <expr>` | `<expr> - <expr>`
    fn parse_term(&mut self) -> Result<Expr, Error> {
        let mut expr = self.parse_factor()?;
        loop {
            let op = if optional!(self, TokenKind::Minus).is_some() {
                BinOp::Minus
            } else if optional!(self, TokenKind::Plus).is_some() {
                BinOp::Plus
            } else {
                break;
            };
            let right = self.parse_factor()?;
            expr = Expr::Binary(Box::new(expr), op, Box::new(right));
        }
        Ok(expr)
    }

    /// Multiplicative expression
    /// `<expr> * <expr>` | `<expr> / <expr>`
    fn parse_factor(&mut self) -> Result<Expr, Error> {
        let mut expr = self.parse_unary()?;
        loop {
            let op = if optional!(self, TokenKind::Slash).is_some() {
                BinOp::Slash
            } else if optional!(self, TokenKind::Star).is_some() {
                BinOp::Star
            } else {
                break;
            };
            let right = self.parse_unary()?;
            expr = Expr::Binary(Box::new(expr), op, Box::new(right));
        }
        Ok(expr)
    }

    /// Unary expression, right-recursive
    /// `! <expr>` | `- <expr>`
    fn parse_unary(&mut self) -> Result<Expr, Error> {
        let op = if optional!(self, TokenKind::Bang).is_some() {
            Some(UnaryOp::Bang)
        } else if optional!(self, TokenKind::Minus).is_some() {
            Some(UnaryOp::Minus)
        } else {
            None
        };
        if let Some(op) = op {
            let right = self.parse_unary()?;
            return Ok(Expr::Unary(op, Box::new(right)));
        }
        self.parse_call()
    }

    /// Postfix expression
    /// `<expr> . <ident>` | `<expr> ( <expr> , ... )`
    fn parse_call(&mut self) -> Result<Expr, Error> {
        let mut expr = self.parse_prim()?;
        loop {
            if optional!(self, TokenKind::Dot).is_some() {
                let name = consume!(self, TokenKind::Ident, "Expect property name after '.'.")?;
                expr = Expr::Get(Box::new(expr), name.lexeme);
            } else if optional!(self, TokenKind::LParen).is_some() {
                let mut arguments = Vec::new();
                if !check!(self, TokenKind::RParen) {
                    loop {
                        arguments.push(self.parse_expr()?);
                        if optional!(self, TokenKind::Comma).is_none() {
                            break;
                        }
                    }
                }
                consume!(self, TokenKind::RParen, "Expect ')' after arguments.")?;
                expr = Expr::Call(Box::new(expr), arguments);
            } else {
                break;
            }
        }
        Ok(expr)
    }

    /// Primary expression
    /// literal | variable | `( <expr> )`
    fn parse_prim(&mut self) -> Result<Expr, Error> {
        if optional!(self, TokenKind::KwFalse).is_some() {
            return Ok(Expr::Literal(Literal::Boolean(false)));
        }
        if optional!(self, TokenKind::KwTrue).is_some() {
            return Ok(Expr::Literal(Literal::Boolean(true)));
        }
        if optional!(self, TokenKind::KwNil).is_some() {
            return Ok(Expr::Literal(Literal::None));
        }

        if let Some(token) = optional!(self, TokenKind::Number | TokenKind::Str) {
            return Ok(Expr::Literal(token.literal));
        }

        // Reserved names parse as plain variable references; the
        // generator gives them meaning
        if let Some(token) = optional!(
            self,
            TokenKind::Ident
                | TokenKind::KwSelf
                | TokenKind::KwTransform
                | TokenKind::KwRenderable
                | TokenKind::KwCollision
        ) {
            return Ok(Expr::Variable(token.lexeme));
        }

        if optional!(self, TokenKind::LParen).is_some() {
            let expr = self.parse_expr()?;
            consume!(self, TokenKind::RParen, "Expect ')' after expression.")?;
            return Ok(Expr::Grouping(Box::new(expr)));
        }

        Err(self.error_here("Expect expression."))
    }
}
