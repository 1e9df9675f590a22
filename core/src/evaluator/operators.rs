//! Binary and unary operator implementations.

use crate::evaluator::error::RuntimeError;
use crate::validator::{ArithOp, SignOp};
use crate::values::Number;

/// Evaluate a binary operation on two integers.
///
/// Uses wrapping arithmetic to prevent panics on overflow. True division
/// promotes to float; floor-division and modulo keep the integer type and
/// follow floor semantics (quotient rounds toward negative infinity, the
/// remainder takes the divisor's sign).
pub(super) fn eval_binary_int(op: ArithOp, left: i64, right: i64) -> Result<Number, RuntimeError> {
    match op {
        ArithOp::Add => Ok(Number::Int(left.wrapping_add(right))),
        ArithOp::Sub => Ok(Number::Int(left.wrapping_sub(right))),
        ArithOp::Mul => Ok(Number::Int(left.wrapping_mul(right))),
        ArithOp::Div => {
            if right == 0 {
                Err(RuntimeError::DivisionByZero)
            } else {
                Ok(Number::Float(left as f64 / right as f64))
            }
        }
        ArithOp::FloorDiv => {
            if right == 0 {
                Err(RuntimeError::DivisionByZero)
            } else {
                // wrapping_div handles the i64::MIN / -1 case
                let quotient = left.wrapping_div(right);
                let remainder = left.wrapping_rem(right);
                if remainder != 0 && (remainder ^ right) < 0 {
                    Ok(Number::Int(quotient.wrapping_sub(1)))
                } else {
                    Ok(Number::Int(quotient))
                }
            }
        }
        ArithOp::Rem => {
            if right == 0 {
                Err(RuntimeError::DivisionByZero)
            } else {
                let remainder = left.wrapping_rem(right);
                // |remainder| < |right|, so the adjustment cannot overflow
                if remainder != 0 && (remainder ^ right) < 0 {
                    Ok(Number::Int(remainder + right))
                } else {
                    Ok(Number::Int(remainder))
                }
            }
        }
        ArithOp::Pow => {
            if right < 0 {
                // A negative exponent leaves the integers
                if left == 0 {
                    Err(RuntimeError::DivisionByZero)
                } else {
                    Ok(Number::Float((left as f64).powf(right as f64)))
                }
            } else if right > u32::MAX as i64 {
                // Exponent too large for wrapping_pow; the wrapped result
                // is meaningless at this magnitude either way
                Ok(Number::Int(0))
            } else {
                Ok(Number::Int(left.wrapping_pow(right as u32)))
            }
        }
    }
}

/// Evaluate a binary operation on two floats (or a mixed int/float pair
/// after promotion).
///
/// A zero right operand of `/`, `//`, `%` is an error even for floats;
/// IEEE infinities are never produced by division here.
pub(super) fn eval_binary_float(op: ArithOp, left: f64, right: f64) -> Result<Number, RuntimeError> {
    match op {
        ArithOp::Add => Ok(Number::Float(left + right)),
        ArithOp::Sub => Ok(Number::Float(left - right)),
        ArithOp::Mul => Ok(Number::Float(left * right)),
        ArithOp::Div => {
            if right == 0.0 {
                Err(RuntimeError::DivisionByZero)
            } else {
                Ok(Number::Float(left / right))
            }
        }
        ArithOp::FloorDiv => {
            if right == 0.0 {
                Err(RuntimeError::DivisionByZero)
            } else {
                Ok(Number::Float((left / right).floor()))
            }
        }
        ArithOp::Rem => {
            if right == 0.0 {
                Err(RuntimeError::DivisionByZero)
            } else {
                let remainder = left % right;
                if remainder != 0.0 && (remainder < 0.0) != (right < 0.0) {
                    Ok(Number::Float(remainder + right))
                } else {
                    Ok(Number::Float(remainder))
                }
            }
        }
        ArithOp::Pow => {
            if left == 0.0 && right < 0.0 {
                return Err(RuntimeError::DivisionByZero);
            }
            if left < 0.0 && right.fract() != 0.0 {
                // powf would return NaN; the mathematical result is complex
                return Err(RuntimeError::Domain {
                    message: format!(
                        "Negative base {} with fractional exponent {} has no real result",
                        left, right
                    ),
                });
            }
            Ok(Number::Float(left.powf(right)))
        }
    }
}

/// Evaluate a sign operator.
pub(super) fn eval_unary(op: SignOp, value: Number) -> Number {
    match (op, value) {
        (SignOp::Pos, v) => v,
        (SignOp::Neg, Number::Int(v)) => Number::Int(v.wrapping_neg()),
        (SignOp::Neg, Number::Float(v)) => Number::Float(-v),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_add() {
        assert_eq!(
            eval_binary_int(ArithOp::Add, 2, 3).unwrap(),
            Number::Int(5)
        );
        assert_eq!(
            eval_binary_int(ArithOp::Add, -5, 3).unwrap(),
            Number::Int(-2)
        );
    }

    #[test]
    fn test_int_sub() {
        assert_eq!(
            eval_binary_int(ArithOp::Sub, 10, 4).unwrap(),
            Number::Int(6)
        );
        assert_eq!(
            eval_binary_int(ArithOp::Sub, 3, 10).unwrap(),
            Number::Int(-7)
        );
    }

    #[test]
    fn test_int_mul() {
        assert_eq!(
            eval_binary_int(ArithOp::Mul, 3, 4).unwrap(),
            Number::Int(12)
        );
    }

    #[test]
    fn test_int_div_promotes_to_float() {
        assert_eq!(
            eval_binary_int(ArithOp::Div, 10, 2).unwrap(),
            Number::Float(5.0)
        );
        assert_eq!(
            eval_binary_int(ArithOp::Div, 7, 2).unwrap(),
            Number::Float(3.5)
        );
    }

    #[test]
    fn test_int_div_by_zero() {
        let result = eval_binary_int(ArithOp::Div, 10, 0);
        assert_eq!(result, Err(RuntimeError::DivisionByZero));
    }

    #[test]
    fn test_int_floor_div_rounds_down() {
        assert_eq!(
            eval_binary_int(ArithOp::FloorDiv, 7, 2).unwrap(),
            Number::Int(3)
        );
        assert_eq!(
            eval_binary_int(ArithOp::FloorDiv, -7, 2).unwrap(),
            Number::Int(-4)
        );
        assert_eq!(
            eval_binary_int(ArithOp::FloorDiv, 7, -2).unwrap(),
            Number::Int(-4)
        );
        assert_eq!(
            eval_binary_int(ArithOp::FloorDiv, -7, -2).unwrap(),
            Number::Int(3)
        );
    }

    #[test]
    fn test_int_floor_div_by_zero() {
        let result = eval_binary_int(ArithOp::FloorDiv, 7, 0);
        assert_eq!(result, Err(RuntimeError::DivisionByZero));
    }

    #[test]
    fn test_int_rem_sign_follows_divisor() {
        assert_eq!(
            eval_binary_int(ArithOp::Rem, 7, 3).unwrap(),
            Number::Int(1)
        );
        assert_eq!(
            eval_binary_int(ArithOp::Rem, 7, -2).unwrap(),
            Number::Int(-1)
        );
        assert_eq!(
            eval_binary_int(ArithOp::Rem, -7, 2).unwrap(),
            Number::Int(1)
        );
        assert_eq!(
            eval_binary_int(ArithOp::Rem, -7, -2).unwrap(),
            Number::Int(-1)
        );
    }

    #[test]
    fn test_int_rem_by_zero() {
        let result = eval_binary_int(ArithOp::Rem, 5, 0);
        assert_eq!(result, Err(RuntimeError::DivisionByZero));
    }

    #[test]
    fn test_int_pow() {
        assert_eq!(
            eval_binary_int(ArithOp::Pow, 2, 10).unwrap(),
            Number::Int(1024)
        );
        assert_eq!(
            eval_binary_int(ArithOp::Pow, 5, 0).unwrap(),
            Number::Int(1)
        );
    }

    #[test]
    fn test_int_pow_negative_exponent_promotes() {
        assert_eq!(
            eval_binary_int(ArithOp::Pow, 2, -1).unwrap(),
            Number::Float(0.5)
        );
    }

    #[test]
    fn test_int_pow_zero_base_negative_exponent() {
        let result = eval_binary_int(ArithOp::Pow, 0, -1);
        assert_eq!(result, Err(RuntimeError::DivisionByZero));
    }

    #[test]
    fn test_int_wrapping_overflow() {
        // Wrap on overflow rather than panic
        assert_eq!(
            eval_binary_int(ArithOp::Add, i64::MAX, 1).unwrap(),
            Number::Int(i64::MIN)
        );
        assert_eq!(
            eval_binary_int(ArithOp::FloorDiv, i64::MIN, -1).unwrap(),
            Number::Int(i64::MIN)
        );
        assert_eq!(
            eval_binary_int(ArithOp::Rem, i64::MIN, -1).unwrap(),
            Number::Int(0)
        );
    }

    #[test]
    fn test_float_add() {
        let result = eval_binary_float(ArithOp::Add, 3.14, 2.0).unwrap();
        assert_eq!(result, Number::Float(3.14 + 2.0));
    }

    #[test]
    fn test_float_div() {
        assert_eq!(
            eval_binary_float(ArithOp::Div, 10.0, 4.0).unwrap(),
            Number::Float(2.5)
        );
    }

    #[test]
    fn test_float_div_by_zero_is_an_error() {
        // No IEEE infinity escapes; a zero divisor is always an error
        let result = eval_binary_float(ArithOp::Div, 10.0, 0.0);
        assert_eq!(result, Err(RuntimeError::DivisionByZero));
    }

    #[test]
    fn test_float_floor_div() {
        assert_eq!(
            eval_binary_float(ArithOp::FloorDiv, 7.5, 2.0).unwrap(),
            Number::Float(3.0)
        );
        assert_eq!(
            eval_binary_float(ArithOp::FloorDiv, -7.5, 2.0).unwrap(),
            Number::Float(-4.0)
        );
    }

    #[test]
    fn test_float_rem_sign_follows_divisor() {
        assert_eq!(
            eval_binary_float(ArithOp::Rem, 7.0, -2.0).unwrap(),
            Number::Float(-1.0)
        );
        assert_eq!(
            eval_binary_float(ArithOp::Rem, -7.0, 2.0).unwrap(),
            Number::Float(1.0)
        );
    }

    #[test]
    fn test_float_pow() {
        assert_eq!(
            eval_binary_float(ArithOp::Pow, 2.0, 3.0).unwrap(),
            Number::Float(8.0)
        );
        // Negative base with an integral exponent stays real
        assert_eq!(
            eval_binary_float(ArithOp::Pow, -2.0, 3.0).unwrap(),
            Number::Float(-8.0)
        );
    }

    #[test]
    fn test_float_pow_complex_domain_rejected() {
        let result = eval_binary_float(ArithOp::Pow, -8.0, 0.5);
        assert!(matches!(result, Err(RuntimeError::Domain { .. })));
    }

    #[test]
    fn test_float_pow_zero_base_negative_exponent() {
        let result = eval_binary_float(ArithOp::Pow, 0.0, -1.0);
        assert_eq!(result, Err(RuntimeError::DivisionByZero));
    }

    #[test]
    fn test_unary() {
        assert_eq!(eval_unary(SignOp::Neg, Number::Int(3)), Number::Int(-3));
        assert_eq!(eval_unary(SignOp::Pos, Number::Int(3)), Number::Int(3));
        assert_eq!(
            eval_unary(SignOp::Neg, Number::Float(2.5)),
            Number::Float(-2.5)
        );
        assert_eq!(
            eval_unary(SignOp::Neg, Number::Int(i64::MIN)),
            Number::Int(i64::MIN)
        );
    }
}
