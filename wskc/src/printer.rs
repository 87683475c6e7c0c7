// printer.rs
//
// Structural AST dump for --verbose runs and tests. One node per line,
// two-space indents; nesting mirrors ownership in the tree.

use crate::ast::{Expr, Program, Stmt};
use crate::token::Literal;

pub fn program(program: &Program) -> String {
    let mut out = String::new();
    for stmt in &program.statements {
        stmt_into(&mut out, stmt, 0);
    }
    out
}

pub fn stmt(stmt: &Stmt) -> String {
    let mut out = String::new();
    stmt_into(&mut out, stmt, 0);
    out
}

pub fn expr(expr: &Expr) -> String {
    let mut out = String::new();
    expr_into(&mut out, expr, 0);
    out
}

fn pad(out: &mut String, indent: usize) {
    for _ in 0..indent {
        out.push_str("  ");
    }
}

fn literal(lit: &Literal) -> String {
    match lit {
        Literal::None => "nil".to_string(),
        Literal::Number(n) => format!("{}", n),
        Literal::Text(s) => s.clone(),
        Literal::Boolean(b) => format!("{}", b),
    }
}

fn expr_into(out: &mut String, expr: &Expr, indent: usize) {
    pad(out, indent);
    match expr {
        Expr::Literal(lit) => {
            out.push_str(&format!("Literal ({})\n", literal(lit)));
        }
        Expr::Variable(name) => {
            out.push_str(&format!("Variable ({})\n", name));
        }
        Expr::Unary(op, right) => {
            out.push_str(&format!("Unary ({})\n", op.lexeme()));
            expr_into(out, right, indent + 1);
        }
        Expr::Binary(left, op, right) => {
            out.push_str(&format!("Binary ({})\n", op.lexeme()));
            expr_into(out, left, indent + 1);
            expr_into(out, right, indent + 1);
        }
        Expr::Grouping(inner) => {
            out.push_str("Grouping\n");
            expr_into(out, inner, indent + 1);
        }
        Expr::Assign(name, value) => {
            out.push_str(&format!("Assign ({})\n", name));
            expr_into(out, value, indent + 1);
        }
        Expr::Get(object, name) => {
            out.push_str("Get\n");
            expr_into(out, object, indent + 1);
            pad(out, indent + 1);
            out.push_str(&format!("Property: {}\n", name));
        }
        Expr::Set(object, name, value) => {
            out.push_str("Set\n");
            expr_into(out, object, indent + 1);
            pad(out, indent + 1);
            out.push_str(&format!("Property: {}\n", name));
            expr_into(out, value, indent + 1);
        }
        Expr::Call(callee, arguments) => {
            out.push_str("Call\n");
            expr_into(out, callee, indent + 1);
            pad(out, indent + 1);
            out.push_str(&format!("Arguments ({}):\n", arguments.len()));
            for argument in arguments {
                expr_into(out, argument, indent + 2);
            }
        }
    }
}

fn stmt_into(out: &mut String, stmt: &Stmt, indent: usize) {
    pad(out, indent);
    match stmt {
        Stmt::Expression(expr) => {
            out.push_str("ExprStmt\n");
            expr_into(out, expr, indent + 1);
        }
        Stmt::Print(expr) => {
            out.push_str("PrintStmt\n");
            expr_into(out, expr, indent + 1);
        }
        Stmt::Var(name, initializer) => {
            out.push_str(&format!("VarDecl ({})\n", name));
            if let Some(init) = initializer {
                expr_into(out, init, indent + 1);
            }
        }
        Stmt::Block(statements) => {
            out.push_str("Block\n");
            for statement in statements {
                stmt_into(out, statement, indent + 1);
            }
        }
        Stmt::If(condition, then_branch, else_branch) => {
            out.push_str("IfStmt\n");
            pad(out, indent + 1);
            out.push_str("Condition:\n");
            expr_into(out, condition, indent + 2);
            pad(out, indent + 1);
            out.push_str("Then:\n");
            stmt_into(out, then_branch, indent + 2);
            if let Some(else_branch) = else_branch {
                pad(out, indent + 1);
                out.push_str("Else:\n");
                stmt_into(out, else_branch, indent + 2);
            }
        }
        Stmt::While(condition, body) => {
            out.push_str("WhileStmt\n");
            pad(out, indent + 1);
            out.push_str("Condition:\n");
            expr_into(out, condition, indent + 2);
            pad(out, indent + 1);
            out.push_str("Body:\n");
            stmt_into(out, body, indent + 2);
        }
    }
}
