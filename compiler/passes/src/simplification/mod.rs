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

//! The algebraic simplifier.
//!
//! A single post-order pass: children are simplified before their parent's
//! rule runs, and a rule that builds a new subtree re-simplifies what it
//! built. Every rule either leaves its node alone or returns a strictly
//! smaller or more canonical replacement, which is what makes one pass
//! sufficient and the recursion terminate.

mod arithmetic;
mod case;
mod cast;
mod coalesce;
mod comparison;
mod is;
mod logical;
mod member;

mod simplifier;
pub use simplifier::*;
