//! The replacing `foreach` attribute: range expansion.
//!
//! `<tr foreach="row in 1..3">` expands into one clone of the element per
//! value in the inclusive range, substituting `$row` inside attribute values
//! and text content. The clones keep the `foreach` attribute; the parser's
//! skip set stops it from re-expanding within the same chain.

use logos::Logos;

use crate::dom::NodeId;

use super::descriptor::{Expansion, ParseContext, ParseError, TagDescriptor};

// ---------------------------------------------------------------------------
// Range-expression lexer
// ---------------------------------------------------------------------------

/// Token of a foreach range expression: `<var> in <n1>..<n2>`.
///
/// `in` is declared before `Ident` so the keyword wins the equal-length
/// match.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
enum Token {
    #[token("in")]
    In,

    #[token("..")]
    DotDot,

    #[regex(r"-?[0-9]+")]
    Number,

    #[regex(r"\$?[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,
}

/// Parsed form of the expression.
#[derive(Debug, PartialEq, Eq)]
struct RangeExpr {
    /// Substitution variable, normalized to a leading `$`.
    var: String,
    from: i64,
    to: i64,
}

fn parse_expr(expr: &str) -> Result<RangeExpr, ParseError> {
    let bad = || ParseError::ForeachExpr { expr: expr.to_owned() };

    let mut lexer = Token::lexer(expr);
    let mut tokens = Vec::new();
    while let Some(token) = lexer.next() {
        let token = token.map_err(|()| bad())?;
        tokens.push((token, lexer.slice().to_owned()));
    }

    match tokens.as_slice() {
        [(Token::Ident, var), (Token::In, _), (Token::Number, from), (Token::DotDot, _), (Token::Number, to)] =>
        {
            let var = if var.starts_with('$') {
                var.clone()
            } else {
                format!("${var}")
            };
            let from = from.parse::<i64>().map_err(|_| bad())?;
            let to = to.parse::<i64>().map_err(|_| bad())?;
            Ok(RangeExpr { var, from, to })
        }
        _ => Err(bad()),
    }
}

/// Substitute `var` with `value` at word boundaries: an occurrence followed
/// by a letter or digit is left alone (`$row` must not rewrite `$rows`).
fn substitute(text: &str, var: &str, value: i64) -> String {
    let mut result = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find(var) {
        let after = &rest[pos + var.len()..];
        let boundary = !after
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_');
        result.push_str(&rest[..pos]);
        if boundary {
            result.push_str(&value.to_string());
        } else {
            result.push_str(var);
        }
        rest = after;
    }
    result.push_str(rest);
    result
}

// ---------------------------------------------------------------------------
// Foreach
// ---------------------------------------------------------------------------

/// The built-in replacing attribute: `foreach="<var> in <n1>..<n2>"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Foreach;

impl Foreach {
    fn substitute_subtree(ctx: &mut ParseContext<'_>, root: NodeId, var: &str, value: i64) {
        for id in ctx.tree.walk_depth_first(root) {
            let Some(data) = ctx.tree.get_mut(id) else {
                continue;
            };
            let updates: Vec<(String, String)> = data
                .attrs()
                .filter(|(_, v)| v.contains(var))
                .map(|(n, v)| (n.to_owned(), substitute(v, var, value)))
                .collect();
            for (name, new_value) in updates {
                data.set_attr(name, new_value);
            }
            if let Some(text) = &data.text {
                if text.contains(var) {
                    data.text = Some(substitute(text, var, value));
                }
            }
        }
    }
}

impl TagDescriptor for Foreach {
    fn identifier(&self) -> &str {
        "foreach"
    }

    fn expand(
        &self,
        ctx: &mut ParseContext<'_>,
        node: NodeId,
        attr: Option<&str>,
    ) -> Result<Expansion, ParseError> {
        let attr = attr.unwrap_or("foreach");
        let expr = ctx
            .tree
            .attr(node, attr)
            .ok_or_else(|| ParseError::MissingAttribute(attr.to_owned()))?
            .to_owned();
        let range = parse_expr(&expr)?;

        let mut clones = Vec::new();
        for value in range.from..=range.to {
            let clone = ctx.tree.clone_subtree(node);
            Self::substitute_subtree(ctx, clone, &range.var, value);
            clones.push(clone);
        }
        Ok(Expansion::ReplaceMany(clones))
    }
}
