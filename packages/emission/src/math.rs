use soroban_sdk::{Env, U256};

use crate::error::LedgerError;

/// Fixed point scale of the reward-per-share accumulator and of exchange rates (1e18).
pub const PRECISION: i128 = 1_000_000_000_000_000_000;

fn to_u256(env: &Env, value: i128) -> Result<U256, LedgerError> {
    let value = u128::try_from(value).map_err(|_| LedgerError::InvalidAmount)?;
    Ok(U256::from_u128(env, value))
}

fn to_i128(value: U256) -> Result<i128, LedgerError> {
    value
        .to_u128()
        .and_then(|v| i128::try_from(v).ok())
        .ok_or(LedgerError::ArithmeticOverflow)
}

/// `floor(a * b / denominator)` with a 256-bit intermediate product.
pub fn mul_div_floor(env: &Env, a: i128, b: i128, denominator: i128) -> Result<i128, LedgerError> {
    if denominator <= 0 {
        return Err(LedgerError::ArithmeticOverflow);
    }
    let product = to_u256(env, a)?.mul(&to_u256(env, b)?);
    to_i128(product.div(&to_u256(env, denominator)?))
}

/// `ceil(a * b / denominator)` with a 256-bit intermediate product.
pub fn mul_div_ceil(env: &Env, a: i128, b: i128, denominator: i128) -> Result<i128, LedgerError> {
    if denominator <= 0 {
        return Err(LedgerError::ArithmeticOverflow);
    }
    let denominator = to_u256(env, denominator)?;
    let product = to_u256(env, a)?.mul(&to_u256(env, b)?);
    let quotient = product.div(&denominator);
    if quotient.mul(&denominator) == product {
        to_i128(quotient)
    } else {
        to_i128(quotient.add(&U256::from_u128(env, 1)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case(10, 3, 4, 7 ; "rounds down")]
    #[test_case(12, 3, 4, 9 ; "exact")]
    #[test_case(0, 3, 4, 0 ; "zero numerator")]
    fn floor_division(a: i128, b: i128, d: i128, expected: i128) {
        let env = Env::default();
        assert_eq!(mul_div_floor(&env, a, b, d), Ok(expected));
    }

    #[test_case(10, 3, 4, 8 ; "rounds up")]
    #[test_case(12, 3, 4, 9 ; "exact")]
    #[test_case(0, 3, 4, 0 ; "zero numerator")]
    fn ceil_division(a: i128, b: i128, d: i128, expected: i128) {
        let env = Env::default();
        assert_eq!(mul_div_ceil(&env, a, b, d), Ok(expected));
    }

    #[test]
    fn wide_intermediate_product_does_not_overflow() {
        let env = Env::default();
        // 1e30 * 1e18 does not fit in i128 but the quotient does
        let big = 1_000_000_000_000_000_000_000_000_000_000i128;
        assert_eq!(mul_div_floor(&env, big, PRECISION, PRECISION), Ok(big));
    }

    #[test]
    fn result_too_large_is_reported() {
        let env = Env::default();
        assert_eq!(
            mul_div_floor(&env, i128::MAX, 2, 1),
            Err(LedgerError::ArithmeticOverflow)
        );
    }

    #[test]
    fn negative_operands_are_rejected() {
        let env = Env::default();
        assert_eq!(
            mul_div_floor(&env, -1, 2, 1),
            Err(LedgerError::InvalidAmount)
        );
        assert_eq!(
            mul_div_floor(&env, 1, 2, 0),
            Err(LedgerError::ArithmeticOverflow)
        );
    }
}
