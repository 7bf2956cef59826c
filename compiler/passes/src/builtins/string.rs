// Copyright (C) 2021-2026 The Tarn Team.
// This file is part of the Tarn library.

// The Tarn library is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// The Tarn library is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.

// You should have received a copy of the GNU General Public License
// along with the Tarn library. If not, see <https://www.gnu.org/licenses/>.

//! Folding rules for the string family, plus the LIKE pattern machinery
//! shared with the comparison simplifier.

use super::*;

use tarn_ast::Literal;

pub(super) fn fold(node: &BuiltinExpression) -> Option<Expression> {
    use BuiltinOp::*;

    if node.args.iter().any(|arg| arg.as_literal().is_some_and(Literal::is_missing)) {
        return Some(Expression::Literal(Literal::Missing));
    }

    match node.func {
        Upper | Lower => fold_case(node),
        CharLength => {
            let s = node.args.first()?.as_literal()?.as_str()?;
            Some(Expression::Literal(Literal::Integer(s.chars().count() as i64)))
        }
        Substring => fold_substring(node),
        SplitPart => fold_split_part(node),
        Concat => fold_concat(node),
        Trim => fold_trim(node, true, true),
        Ltrim => fold_trim(node, true, false),
        Rtrim => fold_trim(node, false, true),
        Contains => {
            let haystack = node.args.first()?.as_literal()?.as_str()?;
            let needle = node.args.get(1)?.as_literal()?.as_str()?;
            Some(Expression::Literal(Literal::Bool(haystack.contains(needle))))
        }
        ContainsCi => {
            let haystack = node.args.first()?.as_literal()?.as_str()?.to_uppercase();
            let needle = node.args.get(1)?.as_literal()?.as_str()?.to_uppercase();
            Some(Expression::Literal(Literal::Bool(haystack.contains(&needle))))
        }
        EqualsCi => {
            let left = node.args.first()?.as_literal()?.as_str()?;
            let right = node.args.get(1)?.as_literal()?.as_str()?;
            Some(Expression::Literal(Literal::Bool(
                left.to_uppercase() == right.to_uppercase(),
            )))
        }
        _ => unreachable!("non-string op {} dispatched to the string folder", node.func.name()),
    }
}

/// UPPER/LOWER: folds constants, and collapses a nested case fold since the
/// outer one decides the final case, e.g. `UPPER(LOWER(x))` is `UPPER(x)`.
fn fold_case(node: &BuiltinExpression) -> Option<Expression> {
    use BuiltinOp::*;
    let arg = node.args.first()?;
    if let Some(s) = arg.as_literal().and_then(Literal::as_str) {
        let folded = match node.func {
            Upper => s.to_uppercase(),
            _ => s.to_lowercase(),
        };
        return Some(Expression::Literal(Literal::String(folded)));
    }
    if let Expression::Builtin(inner) = arg {
        if matches!(inner.func, Upper | Lower) && inner.args.len() == 1 {
            return Some(Expression::Builtin(BuiltinExpression::new(
                node.func,
                inner.args.clone(),
            )));
        }
    }
    None
}

/// SUBSTRING(s, start [, length]): one-based character offsets; a start
/// below one normalizes to one, a negative length yields the empty string.
fn fold_substring(node: &BuiltinExpression) -> Option<Expression> {
    let s = node.args.first()?.as_literal()?.as_str()?;
    let start = node.args.get(1)?.as_literal()?.as_int()?;
    let start = start.max(1) as usize;
    let out: String = match node.args.get(2) {
        Some(len) => {
            let len = len.as_literal()?.as_int()?.max(0) as usize;
            s.chars().skip(start - 1).take(len).collect()
        }
        None => s.chars().skip(start - 1).collect(),
    };
    Some(Expression::Literal(Literal::String(out)))
}

/// SPLIT_PART(s, sep, n): the n-th one-based field; out-of-range yields the
/// empty string.
fn fold_split_part(node: &BuiltinExpression) -> Option<Expression> {
    let s = node.args.first()?.as_literal()?.as_str()?;
    let sep = node.args.get(1)?.as_literal()?.as_str()?;
    let field = node.args.get(2)?.as_literal()?.as_int()?;
    if sep.chars().count() != 1 || field < 1 {
        return None;
    }
    let part = s
        .split(sep)
        .nth(field as usize - 1)
        .unwrap_or("");
    Some(Expression::Literal(Literal::String(part.to_string())))
}

/// CONCAT: flattens nested concatenations and merges adjacent string
/// literals, so `CONCAT(CONCAT(x, 'a'), 'b')` becomes `CONCAT(x, 'ab')`.
fn fold_concat(node: &BuiltinExpression) -> Option<Expression> {
    let mut flat: Vec<Expression> = Vec::with_capacity(node.args.len());
    let mut changed = false;
    for arg in &node.args {
        match arg {
            Expression::Builtin(inner) if inner.func == BuiltinOp::Concat => {
                flat.extend(inner.args.iter().cloned());
                changed = true;
            }
            other => flat.push(other.clone()),
        }
    }

    let mut merged: Vec<Expression> = Vec::with_capacity(flat.len());
    for arg in flat {
        match (merged.last_mut(), &arg) {
            (
                Some(Expression::Literal(Literal::String(acc))),
                Expression::Literal(Literal::String(next)),
            ) => {
                acc.push_str(next);
                changed = true;
            }
            _ => merged.push(arg),
        }
    }

    match (merged.len(), changed) {
        (1, _) => Some(merged.pop().expect("non-empty")),
        (_, true) => Some(Expression::Builtin(BuiltinExpression::new(BuiltinOp::Concat, merged))),
        (_, false) => None,
    }
}

fn fold_trim(node: &BuiltinExpression, left: bool, right: bool) -> Option<Expression> {
    let s = node.args.first()?.as_literal()?.as_str()?;
    let cut: &[char] = &match node.args.get(1) {
        Some(cutset) => cutset.as_literal()?.as_str()?.chars().collect::<Vec<char>>(),
        None => vec![' ', '\t', '\n', '\r'],
    };
    let out = match (left, right) {
        (true, true) => s.trim_matches(cut),
        (true, false) => s.trim_start_matches(cut),
        (false, true) => s.trim_end_matches(cut),
        (false, false) => s,
    };
    Some(Expression::Literal(Literal::String(out.to_string())))
}

/// The shape of a LIKE pattern, as far as the simplifier cares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LikePattern {
    /// No wildcards at all; the match degenerates to equality.
    Exact(String),
    /// `%needle%` with no other wildcards; a substring search.
    Substring(String),
    /// Anything else.
    Other,
}

impl LikePattern {
    /// Classifies a LIKE pattern.
    pub(crate) fn classify(pattern: &str) -> LikePattern {
        if !pattern.contains('%') && !pattern.contains('_') {
            return LikePattern::Exact(pattern.to_string());
        }
        let inner = pattern.strip_prefix('%').and_then(|p| p.strip_suffix('%'));
        match inner {
            Some(inner)
                if !inner.is_empty() && !inner.contains('%') && !inner.contains('_') =>
            {
                LikePattern::Substring(inner.to_string())
            }
            _ => LikePattern::Other,
        }
    }
}

/// Matches `s` against a LIKE pattern: `%` matches any run of characters,
/// `_` matches exactly one.
pub(crate) fn like_match(pattern: &str, s: &str, case_insensitive: bool) -> bool {
    if case_insensitive {
        let pattern = pattern.to_uppercase();
        let s = s.to_uppercase();
        return like_chars(&pattern.chars().collect::<Vec<_>>(), &s.chars().collect::<Vec<_>>());
    }
    like_chars(&pattern.chars().collect::<Vec<_>>(), &s.chars().collect::<Vec<_>>())
}

fn like_chars(pattern: &[char], s: &[char]) -> bool {
    match pattern.split_first() {
        None => s.is_empty(),
        Some((&'%', rest)) => (0..=s.len()).any(|skip| like_chars(rest, &s[skip..])),
        Some((&'_', rest)) => !s.is_empty() && like_chars(rest, &s[1..]),
        Some((c, rest)) => s.first() == Some(c) && like_chars(rest, &s[1..]),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_like_match() {
        assert!(like_match("fred", "fred", false));
        assert!(!like_match("fred", "Fred", false));
        assert!(like_match("fred", "FRED", true));
        assert!(like_match("%ed", "fred", false));
        assert!(like_match("f%", "fred", false));
        assert!(like_match("f__d", "fred", false));
        assert!(like_match("%re%", "fred", false));
        assert!(!like_match("%xy%", "fred", false));
        assert!(like_match("%", "", false));
        assert!(!like_match("_", "", false));
    }

    #[test]
    fn test_classify() {
        assert_eq!(LikePattern::classify("fred"), LikePattern::Exact("fred".into()));
        assert_eq!(LikePattern::classify("%fred%"), LikePattern::Substring("fred".into()));
        assert_eq!(LikePattern::classify("%fr%ed%"), LikePattern::Other);
        assert_eq!(LikePattern::classify("%fr_d%"), LikePattern::Other);
        assert_eq!(LikePattern::classify("%%"), LikePattern::Other);
        assert_eq!(LikePattern::classify("f%d"), LikePattern::Other);
    }
}
