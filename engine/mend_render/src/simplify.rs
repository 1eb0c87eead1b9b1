//! Scope-restricted simplification.
//!
//! Renders a node using only the variables available at the target site.
//! A variable occurrence outside the scope set is not a fault: it makes
//! the enclosing expression unusable, and the failure propagates upward
//! through every construct that needs it. Statement lists are the one
//! exception: a statement that cannot be simplified is dropped, and the
//! list fails only when nothing survives.

use mend_ir::{
    Name, NodeId, NodeKind, NodeRange, RenameMap, ScopeSet, StringInterner, SyntaxTree,
};

/// Simplify `id` to source text usable under `scope`, or `None` if the
/// node requires something the scope cannot provide.
///
/// `rename` rewrites donor names before the scope lookup, so a donor
/// fragment is judged against the target's variable universe.
pub fn simplify(
    tree: &SyntaxTree,
    interner: &StringInterner,
    id: NodeId,
    scope: &ScopeSet,
    rename: Option<&RenameMap>,
) -> Option<String> {
    let simplifier = Simplifier {
        tree,
        interner,
        scope,
        rename,
    };
    simplifier.node(id)
}

struct Simplifier<'a> {
    tree: &'a SyntaxTree,
    interner: &'a StringInterner,
    scope: &'a ScopeSet,
    rename: Option<&'a RenameMap>,
}

impl Simplifier<'_> {
    /// A variable use: rename, then require the resolved name in scope.
    fn var_use(&self, name: Name) -> Option<String> {
        let resolved = match self.rename {
            Some(map) => map.resolve(name).unwrap_or(name),
            None => name,
        };
        if self.scope.contains(resolved) {
            Some(self.interner.lookup(resolved).to_string())
        } else {
            None
        }
    }

    /// A declared name introduces its variable; rename but never reject.
    fn declared(&self, name: Name) -> String {
        let resolved = match self.rename {
            Some(map) => map.resolve(name).unwrap_or(name),
            None => name,
        };
        self.interner.lookup(resolved).to_string()
    }

    /// Simplify every statement of a list, dropping the ones that fail.
    /// Fails when nothing survives.
    fn stmt_list(&self, range: NodeRange) -> Option<String> {
        let mut out = String::new();
        let mut kept = 0usize;
        for &stmt in self.tree.list(range) {
            if let Some(text) = self.node(stmt) {
                out.push_str(&text);
                out.push('\n');
                kept += 1;
            }
        }
        if kept == 0 {
            None
        } else {
            Some(out)
        }
    }

    /// An optional slot: absent is fine, present must simplify.
    fn optional(&self, id: NodeId) -> Option<Option<String>> {
        if id.is_valid() {
            self.node(id).map(Some)
        } else {
            Some(None)
        }
    }

    fn node(&self, id: NodeId) -> Option<String> {
        match *self.tree.kind(id) {
            NodeKind::Block { stmts } => {
                let body = self.stmt_list(stmts)?;
                Some(format!("{{\n{body}}}"))
            }
            NodeKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                let cond = self.node(cond)?;
                let then_text = self.node(then_branch)?;
                match self.optional(else_branch)? {
                    Some(else_text) => {
                        Some(format!("if ({cond}) {then_text} else {else_text}"))
                    }
                    None => Some(format!("if ({cond}) {then_text}")),
                }
            }
            NodeKind::Switch {
                discriminant,
                body,
            } => {
                let d = self.node(discriminant)?;
                let body = self.stmt_list(body)?;
                Some(format!("switch ({d}) {{\n{body}}}"))
            }
            NodeKind::SwitchCase { label } => match self.optional(label)? {
                Some(label) => Some(format!("case {label}:")),
                None => Some("default:".to_string()),
            },
            NodeKind::While { cond, body } => {
                let cond = self.node(cond)?;
                let body = self.node(body)?;
                Some(format!("while ({cond}) {body}"))
            }
            NodeKind::For {
                init,
                cond,
                step,
                body,
            } => {
                let init = self.optional(init)?.unwrap_or_default();
                let cond = self.optional(cond)?.unwrap_or_default();
                let step = self.optional(step)?.unwrap_or_default();
                let body = self.node(body)?;
                Some(format!("for ({init}; {cond}; {step}) {body}"))
            }
            NodeKind::Return { value } => match self.optional(value)? {
                Some(value) => Some(format!("return {value};")),
                None => Some("return;".to_string()),
            },
            NodeKind::Throw { value } => {
                let value = self.node(value)?;
                Some(format!("throw {value};"))
            }
            NodeKind::Break => Some("break;".to_string()),
            NodeKind::Continue => Some("continue;".to_string()),
            NodeKind::VarDecl { ty, name, init } => {
                let ty = self.interner.lookup(ty);
                let name = self.declared(name);
                match self.optional(init)? {
                    Some(init) => Some(format!("{ty} {name} = {init};")),
                    None => Some(format!("{ty} {name};")),
                }
            }
            NodeKind::ExprStmt { expr } => {
                let expr = self.node(expr)?;
                Some(format!("{expr};"))
            }
            NodeKind::Ident(name) => self.var_use(name),
            NodeKind::IntLit(v) => Some(v.to_string()),
            NodeKind::FloatLit(bits) => Some(f64::from_bits(bits).to_string()),
            NodeKind::BoolLit(v) => Some(if v { "true" } else { "false" }.to_string()),
            NodeKind::StrLit(s) => Some(format!("\"{}\"", self.interner.lookup(s))),
            NodeKind::CharLit(c) => Some(format!("'{c}'")),
            NodeKind::NullLit => Some("null".to_string()),
            NodeKind::Assign { target, value } => {
                let target = self.node(target)?;
                let value = self.node(value)?;
                Some(format!("{target} = {value}"))
            }
            NodeKind::Binary { op, left, right } => {
                let left = self.node(left)?;
                let right = self.node(right)?;
                Some(format!("{left} {} {right}", op.as_symbol()))
            }
            NodeKind::Unary { op, operand } => {
                let operand = self.node(operand)?;
                Some(format!("{}{operand}", op.as_symbol()))
            }
            NodeKind::Call {
                receiver,
                method,
                args,
            } => {
                let mut out = String::new();
                if receiver.is_valid() {
                    out.push_str(&self.node(receiver)?);
                    out.push('.');
                }
                out.push_str(self.interner.lookup(method));
                out.push('(');
                for (i, &arg) in self.tree.list(args).iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    out.push_str(&self.node(arg)?);
                }
                out.push(')');
                Some(out)
            }
            NodeKind::FieldAccess { receiver, field } => {
                let receiver = self.node(receiver)?;
                Some(format!("{receiver}.{}", self.interner.lookup(field)))
            }
            NodeKind::Index { receiver, index } => {
                let receiver = self.node(receiver)?;
                let index = self.node(index)?;
                Some(format!("{receiver}[{index}]"))
            }
            NodeKind::Conditional {
                cond,
                then_expr,
                else_expr,
            } => {
                let cond = self.node(cond)?;
                let then_expr = self.node(then_expr)?;
                let else_expr = self.node(else_expr)?;
                Some(format!("{cond} ? {then_expr} : {else_expr}"))
            }
        }
    }
}
