//! Checked U256 arithmetic.
//!
//! Every helper takes the name of the quantity being computed so that an
//! overflow report points at the accounting step that failed.

use crate::entities::U256;
use crate::errors::ArithmeticError;

/// `a + b`
pub fn add(a: U256, b: U256, op: &'static str) -> Result<U256, ArithmeticError> {
    a.checked_add(b).ok_or(ArithmeticError::Overflow { op })
}

/// `a - b`
pub fn sub(a: U256, b: U256, op: &'static str) -> Result<U256, ArithmeticError> {
    a.checked_sub(b).ok_or(ArithmeticError::Underflow { op })
}

/// `a * b`
pub fn mul(a: U256, b: U256, op: &'static str) -> Result<U256, ArithmeticError> {
    a.checked_mul(b).ok_or(ArithmeticError::Overflow { op })
}

/// `a * b / d`, rounding down.
pub fn mul_div(a: U256, b: U256, d: U256, op: &'static str) -> Result<U256, ArithmeticError> {
    if d.is_zero() {
        return Err(ArithmeticError::DivisionByZero { op });
    }
    Ok(mul(a, b, op)? / d)
}

/// Replaces `old` with `new` inside an aggregate: `total - old + new`.
pub fn replace_in_total(
    total: U256,
    old: U256,
    new: U256,
    op: &'static str,
) -> Result<U256, ArithmeticError> {
    add(sub(total, old, op)?, new, op)
}
