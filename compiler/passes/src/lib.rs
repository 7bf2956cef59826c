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

//! Rewriting and checking passes over the Tarn expression IR.
//!
//! [`simplify`] rewrites an expression into a smaller, more canonical
//! equivalent; [`simplify_logic`] does the same for expressions whose result
//! is only ever tested against IS TRUE (WHERE, ON, HAVING), which licenses
//! rewrites that treat NULL and MISSING as false. [`check`] validates arity
//! and argument types bottom-up and reports the innermost violation.
//!
//! Both passes are pure: they neither touch shared state nor fail. A rule
//! that does not apply leaves its node unchanged and defers diagnosis to
//! [`check`].

pub mod builtins;
pub use builtins::*;

pub mod simplification;
pub use simplification::*;

pub mod type_checker;
pub use type_checker::*;
