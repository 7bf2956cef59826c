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

//! The expression IR of the Tarn query engine.
//!
//! This crate defines the [`Expression`] tree produced by the PartiQL parser
//! and consumed by the planner, together with the [`TypeSet`] lattice used to
//! reason about the runtime types an expression can take, the constant
//! arithmetic that backs folding, and the [`BuiltinOp`] registry. The
//! rewriting passes themselves live in `tarn-passes`; this crate provides the
//! data model and the [`ExpressionReconstructor`]/[`ExpressionVisitor`]
//! traits they are built on.
//!
//! Expressions are trees with exclusive ownership: a rewrite consumes a node
//! and produces a replacement. All node types serialize with serde, which
//! backs the round-trip guarantee of the external datum serializer.

#![allow(ambiguous_glob_reexports)]

pub mod expressions;
pub use self::expressions::*;

pub mod functions;
pub use self::functions::*;

pub mod passes;
pub use self::passes::*;

pub mod types;
pub use self::types::*;

pub mod value;
pub use self::value::*;
