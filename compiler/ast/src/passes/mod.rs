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

//! Traits the rewriting passes are built on.
//!
//! [`ExpressionReconstructor`] consumes nodes and produces replacements;
//! its default methods rebuild a node from its reconstructed children, so an
//! implementation only overrides the nodes it cares about.
//! [`ExpressionVisitor`] is the borrowed, read-only counterpart.

mod reconstructor;
pub use reconstructor::*;

mod visitor;
pub use visitor::*;
