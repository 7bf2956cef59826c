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

//! CIDR membership.
//!
//! The user-visible `IS_SUBNET_OF(cidr, addr)` precomputes the inclusive
//! `[min, max]` address range and becomes the planner-private three-argument
//! form, which the backend evaluates as two string comparisons. Host bits in
//! the CIDR are masked off, so `192.168.1.77/24` covers the same range as
//! `192.168.1.0/24`.

use super::*;

use tarn_ast::{ComparisonExpression, ComparisonOperation, Literal};

use std::net::Ipv4Addr;

/// The inclusive address range of an IPv4 CIDR block, e.g.
/// `"192.168.1.0/24"` covers `192.168.1.0` through `192.168.1.255`.
pub(super) fn parse_cidr(s: &str) -> Option<(Ipv4Addr, Ipv4Addr)> {
    let (addr, bits) = s.split_once('/')?;
    let ip: Ipv4Addr = addr.trim().parse().ok()?;
    let bits: u32 = bits.trim().parse().ok()?;
    if bits > 32 {
        return None;
    }
    let mask = if bits == 0 { 0 } else { u32::MAX << (32 - bits) };
    let lo = u32::from(ip) & mask;
    let hi = lo | !mask;
    Some((Ipv4Addr::from(lo), Ipv4Addr::from(hi)))
}

pub(super) fn fold(node: &BuiltinExpression) -> Option<Expression> {
    match node.args.len() {
        2 => {
            let cidr = node.args.first()?.as_literal()?.as_str()?;
            let (lo, hi) = parse_cidr(cidr)?;
            let addr = node.args.get(1)?.clone();
            Some(range_form(lo, hi, addr))
        }
        3 => {
            let lo: Ipv4Addr = node.args.first()?.as_literal()?.as_str()?.parse().ok()?;
            let hi: Ipv4Addr = node.args.get(1)?.as_literal()?.as_str()?.parse().ok()?;
            let addr = node.args.get(2)?.clone();
            match lo.cmp(&hi) {
                std::cmp::Ordering::Greater => {
                    Some(Expression::Literal(Literal::Bool(false)))
                }
                std::cmp::Ordering::Equal => Some(equals_form(lo, addr)),
                std::cmp::Ordering::Less => None,
            }
        }
        _ => None,
    }
}

fn range_form(lo: Ipv4Addr, hi: Ipv4Addr, addr: Expression) -> Expression {
    if lo == hi {
        return equals_form(lo, addr);
    }
    Expression::Builtin(BuiltinExpression::new(
        BuiltinOp::IsSubnetOf,
        vec![
            Expression::Literal(Literal::String(lo.to_string())),
            Expression::Literal(Literal::String(hi.to_string())),
            addr,
        ],
    ))
}

fn equals_form(ip: Ipv4Addr, addr: Expression) -> Expression {
    Expression::Comparison(ComparisonExpression::new(
        ComparisonOperation::Equals,
        addr,
        Expression::Literal(Literal::String(ip.to_string())),
    ))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_cidr() {
        let (lo, hi) = parse_cidr("192.168.1.0/24").unwrap();
        assert_eq!(lo, Ipv4Addr::new(192, 168, 1, 0));
        assert_eq!(hi, Ipv4Addr::new(192, 168, 1, 255));

        // Host bits are masked off.
        let (lo, hi) = parse_cidr("192.168.1.77/24").unwrap();
        assert_eq!(lo, Ipv4Addr::new(192, 168, 1, 0));
        assert_eq!(hi, Ipv4Addr::new(192, 168, 1, 255));

        let (lo, hi) = parse_cidr("10.0.0.0/0").unwrap();
        assert_eq!(lo, Ipv4Addr::new(0, 0, 0, 0));
        assert_eq!(hi, Ipv4Addr::new(255, 255, 255, 255));

        assert!(parse_cidr("10.0.0.1/33").is_none());
        assert!(parse_cidr("10.0.0.1").is_none());
        assert!(parse_cidr("not-an-ip/8").is_none());
    }

    #[test]
    fn test_host_route_collapses_to_equality() {
        let (lo, hi) = parse_cidr("10.1.2.3/32").unwrap();
        assert_eq!(lo, hi);
    }
}
