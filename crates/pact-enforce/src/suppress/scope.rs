//! Ignore-directive range resolution.
//!
//! Declaration/block/statement boundaries are sorted once per module and
//! queried with binary search instead of re-walking the tree per comment.
//! Resolution, by priority:
//! 1. a top-level comment before the first declaration (or, in a module
//!    without declarations, its very first comment) covers the whole module;
//! 2. a comment sharing a line with code before it covers that statement,
//!    including a statement that started on an earlier line and ends there;
//! 3. a comment directly above a declaration covers the declaration;
//! 4. a comment above a statement covers up to the next sibling statement,
//!    or to the statement's own end when it is the last in its block;
//! 5. otherwise the comment covers only itself.

use std::collections::HashMap;

use pact_core::model::{Comment, NodeKind, ProgramModel, SourceLayout, SyntaxNode};
use pact_core::types::{Pos, Span};

use super::IgnoreDirective;
use crate::directive;

/// Sorted boundaries of one module with parent links.
#[derive(Debug)]
pub struct SpanIndex {
    module: Span,
    /// Sorted by (start asc, end desc): parents precede their children.
    nodes: Vec<SyntaxNode>,
    parents: Vec<Option<usize>>,
    by_line: HashMap<u32, Vec<usize>>,
    by_end_line: HashMap<u32, Vec<usize>>,
    first_decl: Option<Pos>,
}

impl SpanIndex {
    pub fn build(layout: &SourceLayout) -> Self {
        let mut nodes = layout.nodes.clone();
        nodes.sort_by(|a, b| {
            a.span
                .start
                .cmp(&b.span.start)
                .then(b.span.end.cmp(&a.span.end))
        });

        let mut parents = Vec::with_capacity(nodes.len());
        let mut stack: Vec<usize> = Vec::new();
        let mut by_line: HashMap<u32, Vec<usize>> = HashMap::new();
        let mut by_end_line: HashMap<u32, Vec<usize>> = HashMap::new();
        for (i, node) in nodes.iter().enumerate() {
            while let Some(&top) = stack.last() {
                if nodes[top].span.encloses(&node.span) {
                    break;
                }
                stack.pop();
            }
            parents.push(stack.last().copied());
            stack.push(i);
            by_line.entry(node.line).or_default().push(i);
            if let Some(end_line) = node.end_line.filter(|&l| l != node.line) {
                by_end_line.entry(end_line).or_default().push(i);
            }
        }

        let first_decl = nodes
            .iter()
            .find(|n| n.kind == NodeKind::Decl)
            .map(|n| n.span.start);

        Self {
            module: layout.span,
            nodes,
            parents,
            by_line,
            by_end_line,
            first_decl,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Innermost node whose span encloses `span`.
    fn enclosing(&self, span: Span) -> Option<usize> {
        let started = self.nodes.partition_point(|n| n.span.start <= span.start);
        let mut cur = started.checked_sub(1)?;
        loop {
            if self.nodes[cur].span.encloses(&span) {
                return Some(cur);
            }
            cur = self.parents[cur]?;
        }
    }

    /// First node starting after `after`, provided it lives in `scope`.
    fn following(&self, after: Pos, scope: Option<usize>) -> Option<usize> {
        let idx = self.nodes.partition_point(|n| n.span.start <= after);
        (idx < self.nodes.len() && self.parents[idx] == scope).then_some(idx)
    }

    /// Innermost statement or declaration on `line` with code before
    /// `before`: either it starts there, or it ends there after starting on
    /// an earlier line.
    fn on_line_before(&self, line: u32, before: Pos) -> Option<usize> {
        let starting = self
            .by_line
            .get(&line)
            .into_iter()
            .flatten()
            .copied()
            .filter(|&i| self.nodes[i].span.start < before);
        let ending = self
            .by_end_line
            .get(&line)
            .into_iter()
            .flatten()
            .copied()
            .filter(|&i| self.nodes[i].span.end < before);
        starting
            .chain(ending)
            .filter(|&i| self.nodes[i].kind != NodeKind::Block)
            .max_by_key(|&i| (self.nodes[i].span.start, i))
    }

    fn next_sibling(&self, idx: usize) -> Option<usize> {
        let node = &self.nodes[idx];
        let parent_end = self.parents[idx].map(|p| self.nodes[p].span.end);
        for k in idx + 1..self.nodes.len() {
            let candidate = &self.nodes[k];
            if parent_end.is_some_and(|end| candidate.span.start > end) {
                break;
            }
            if candidate.span.start > node.span.end && self.parents[k] == self.parents[idx] {
                return Some(k);
            }
        }
        None
    }

    /// Source range governed by a directive in `comment`.
    pub fn resolve(&self, comment: &Comment, is_first_comment: bool) -> Span {
        let scope = self.enclosing(comment.span);

        if scope.is_none() {
            let leading = match self.first_decl {
                Some(first) => comment.span.end < first,
                None => is_first_comment,
            };
            if leading {
                return self.module;
            }
        }

        if let Some(i) = self.on_line_before(comment.line, comment.span.start) {
            return self.nodes[i].span;
        }

        if let Some(i) = self.following(comment.span.end, scope) {
            let node = &self.nodes[i];
            return match node.kind {
                NodeKind::Decl => node.span,
                NodeKind::Stmt | NodeKind::Block => match self.next_sibling(i) {
                    Some(next) => {
                        Span::new(node.span.start, self.nodes[next].span.start.saturating_sub(1))
                    }
                    None => node.span,
                },
            };
        }

        comment.span
    }
}

/// Every ignore directive of `module` with its resolved range. Comments
/// naming no valid code are not directives and are dropped here.
pub fn resolve_directives(
    model: &dyn ProgramModel,
    module: &str,
    prefix: &str,
) -> Vec<IgnoreDirective> {
    let mut comments = model.comments(module);
    if comments.is_empty() {
        return Vec::new();
    }
    comments.sort_by_key(|c| c.span.start);

    let index = model.layout(module).map(|layout| SpanIndex::build(&layout));
    if index.is_none() {
        tracing::debug!(module = %module, "no layout; directives cover only themselves");
    }

    comments
        .iter()
        .enumerate()
        .filter_map(|(i, comment)| {
            let codes = directive::ignore_codes(&comment.text, prefix);
            if codes.is_empty() {
                return None;
            }
            let range = match &index {
                Some(index) => index.resolve(comment, i == 0),
                None => comment.span,
            };
            Some(IgnoreDirective::new(codes, range))
        })
        .collect()
}
