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

use serde::{Deserialize, Serialize};
use thiserror::Error;

use std::fmt;

/// A type mismatch discovered while checking an expression.
///
/// The offending node is attached in rendered form via [`TarnError::errat`];
/// the innermost attachment wins, so a checker deep in the tree determines
/// what the caller sees.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeError {
    /// What was wrong with the types.
    pub message: String,
    /// The rendered text of the node the error originated at, if attached.
    pub node: Option<String>,
}

impl fmt::Display for TypeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.node {
            Some(node) => write!(f, "{} (in `{}`)", self.message, node),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for TypeError {}

/// A structurally malformed expression: wrong arity, a non-literal argument
/// where a literal is required, or an illegal enum value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntaxError {
    /// What was malformed.
    pub message: String,
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for SyntaxError {}

/// Any error produced by the expression core.
#[derive(Clone, Debug, Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum TarnError {
    #[error("type error: {0}")]
    Type(#[from] TypeError),

    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),
}

impl TarnError {
    /// Creates a [`TypeError`] with no node attached yet.
    pub fn type_error(message: impl Into<String>) -> Self {
        TarnError::Type(TypeError { message: message.into(), node: None })
    }

    /// Creates a [`SyntaxError`].
    pub fn syntax_error(message: impl Into<String>) -> Self {
        TarnError::Syntax(SyntaxError { message: message.into() })
    }

    /// Attaches the rendered originating node to a node-agnostic type error.
    ///
    /// A node already attached is kept, so the innermost cause survives as
    /// the error bubbles up through enclosing checks. Syntax errors carry
    /// their context in the message and pass through unchanged.
    pub fn errat(self, node: impl fmt::Display) -> Self {
        match self {
            TarnError::Type(TypeError { message, node: None }) => {
                TarnError::Type(TypeError { message, node: Some(node.to_string()) })
            }
            other => other,
        }
    }

    /// The offending node in rendered form, if this is a type error with an
    /// attachment.
    pub fn node(&self) -> Option<&str> {
        match self {
            TarnError::Type(TypeError { node, .. }) => node.as_deref(),
            TarnError::Syntax(_) => None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_errat_keeps_innermost() {
        let err = TarnError::type_error("string argument expected").errat("UPPER(3)");
        assert_eq!(err.node(), Some("UPPER(3)"));

        // Re-attachment at an outer level must not clobber the inner node.
        let outer = err.errat("UPPER(3) = 'X'");
        assert_eq!(outer.node(), Some("UPPER(3)"));
        assert_eq!(outer.to_string(), "type error: string argument expected (in `UPPER(3)`)");
    }

    #[test]
    fn test_syntax_display() {
        let err = TarnError::syntax_error("SPLIT_PART field must be an integer literal");
        assert_eq!(err.node(), None);
        assert_eq!(err.to_string(), "syntax error: SPLIT_PART field must be an integer literal");
    }
}
