//! Numeric comparison operators for query clauses.
//!
//! The [`Op`] enum covers the four comparisons a user can type in front of a
//! numeric value: `memory:>=8`, `filesystem:>40`, `cpu:<4`, `pods:<=100`.

use std::cmp::Ordering;

/// Comparison operator carried by a numeric clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    /// Greater than (`>`).
    Gt,
    /// Greater than or equal (`>=`).
    Gte,
    /// Less than (`<`).
    Lt,
    /// Less than or equal (`<=`).
    Lte,
}

impl Op {
    /// Prefixes in match order. Two-character operators come first so that
    /// `>=8` is never read as `>` followed by `=8`.
    const PREFIXES: [(&'static str, Op); 4] =
        [(">=", Op::Gte), ("<=", Op::Lte), (">", Op::Gt), ("<", Op::Lt)];

    /// Splits a leading operator off a raw clause value.
    ///
    /// Returns the operator and the remaining operand, or `None` when the
    /// value does not start with an operator or nothing follows it.
    ///
    /// ```
    /// use clusterview_seeker::Op;
    ///
    /// assert_eq!(Op::split_prefix(">=8"), Some((Op::Gte, "8")));
    /// assert_eq!(Op::split_prefix("<4"), Some((Op::Lt, "4")));
    /// assert_eq!(Op::split_prefix("8.5"), None);
    /// assert_eq!(Op::split_prefix(">"), None);
    /// ```
    pub fn split_prefix(raw: &str) -> Option<(Op, &str)> {
        for (prefix, op) in Self::PREFIXES {
            if let Some(rest) = raw.strip_prefix(prefix) {
                if rest.is_empty() {
                    return None;
                }
                return Some((op, rest));
            }
        }
        None
    }

    /// Evaluates a comparison given an ordering result.
    pub fn eval_ordering(self, ordering: Ordering) -> bool {
        match self {
            Op::Gt => ordering == Ordering::Greater,
            Op::Gte => ordering != Ordering::Less,
            Op::Lt => ordering == Ordering::Less,
            Op::Lte => ordering != Ordering::Greater,
        }
    }

    /// Compares `left <op> right`. NaN on either side never matches.
    pub fn compare(self, left: f64, right: f64) -> bool {
        left.partial_cmp(&right)
            .is_some_and(|ordering| self.eval_ordering(ordering))
    }

    /// Returns the operator as typed in a query.
    pub fn symbol(self) -> &'static str {
        match self {
            Op::Gt => ">",
            Op::Gte => ">=",
            Op::Lt => "<",
            Op::Lte => "<=",
        }
    }
}

impl std::fmt::Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
