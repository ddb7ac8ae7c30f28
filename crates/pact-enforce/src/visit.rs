//! Pre-order traversal of function bodies.
//!
//! Nested blocks and function literals are descended into; a closure body is
//! attributed to the function that contains it.

use pact_core::model::{Expr, Stmt};

pub trait Visitor<'a> {
    fn visit_stmt(&mut self, _stmt: &'a Stmt) {}
    fn visit_expr(&mut self, _expr: &'a Expr) {}
}

pub fn walk_body<'a, V: Visitor<'a> + ?Sized>(visitor: &mut V, body: &'a [Stmt]) {
    for stmt in body {
        walk_stmt(visitor, stmt);
    }
}

pub fn walk_stmt<'a, V: Visitor<'a> + ?Sized>(visitor: &mut V, stmt: &'a Stmt) {
    visitor.visit_stmt(stmt);
    match stmt {
        Stmt::Assign { lhs, rhs, .. } => {
            for expr in lhs.iter().chain(rhs) {
                walk_expr(visitor, expr);
            }
        }
        Stmt::IncDec { target, .. } => walk_expr(visitor, target),
        Stmt::Expr { expr, .. } => walk_expr(visitor, expr),
        Stmt::Nested { exprs, blocks, .. } => {
            for expr in exprs {
                walk_expr(visitor, expr);
            }
            for block in blocks {
                walk_body(visitor, block);
            }
        }
    }
}

pub fn walk_expr<'a, V: Visitor<'a> + ?Sized>(visitor: &mut V, expr: &'a Expr) {
    visitor.visit_expr(expr);
    match expr {
        Expr::Ident { .. } => {}
        Expr::Selector { base, .. } => walk_expr(visitor, base),
        Expr::Index { base, index, .. } => {
            walk_expr(visitor, base);
            walk_expr(visitor, index);
        }
        Expr::Deref { inner, .. } => walk_expr(visitor, inner),
        Expr::Call { func, args, .. } => {
            walk_expr(visitor, func);
            for arg in args {
                walk_expr(visitor, arg);
            }
        }
        Expr::CompositeLit { elems, .. } => {
            for elem in elems {
                walk_expr(visitor, elem);
            }
        }
        Expr::FuncLit { body, .. } => walk_body(visitor, body),
        Expr::Other { children, .. } => {
            for child in children {
                walk_expr(visitor, child);
            }
        }
    }
}
