use crate::*;

/// Fractional bits carried by the series terms of [`exp`].
const GUARD_BITS: usize = 64;
const MAX_SERIES_TERMS: u32 = 512;
/// `ln(2)` scaled by `10^18`.
const LN2_NUMERATOR: u128 = 693_147_180_559_945_309;
const LN2_DENOMINATOR: u128 = 1_000_000_000_000_000_000;

/// `precision * e^(p / q)`, floored.
pub fn exp(p: U256, q: U256, precision: U256) -> FormulaResult<U256> {
	if q.is_zero() {
		return Err(CurveError::DivisionByZero);
	}
	let one = U256::one() << GUARD_BITS;
	let x = p.checked_mul(one).ok_or(CurveError::Overflow)? / q;

	let mut sum = one;
	let mut term = one;
	for n in 1..MAX_SERIES_TERMS {
		term = term.checked_mul(x).ok_or(CurveError::Overflow)? / (one * U256::from(n));
		if term.is_zero() {
			break;
		}
		sum = sum.checked_add(term).ok_or(CurveError::Overflow)?;
	}
	Ok(sum.checked_mul(precision).ok_or(CurveError::Overflow)? >> GUARD_BITS)
}

/// `ln(p / q) * 2^precision_bits` for `p >= q`, floored.
pub fn ln(p: U256, q: U256, precision_bits: u32) -> FormulaResult<U256> {
	if q.is_zero() {
		return Err(CurveError::DivisionByZero);
	}
	if p < q {
		return Err(CurveError::OutOfDomain);
	}
	let bits = precision_bits as usize;
	let one = U256::one() << bits;

	// p / q = 2^n * y with y in [1, 2)
	let n = (p / q).bits() - 1;
	let divisor = q
		.checked_mul(U256::one() << n)
		.ok_or(CurveError::Overflow)?;
	let y = p.checked_mul(one).ok_or(CurveError::Overflow)? / divisor;

	let log2 = (U256::from(n) << bits) + log2_fraction(y, bits);
	Ok(log2
		.checked_mul(U256::from(LN2_NUMERATOR))
		.ok_or(CurveError::Overflow)?
		/ U256::from(LN2_DENOMINATOR))
}

/// `log2(y)` for `y` in `[1, 2)`, both with `bits` fractional bits.
fn log2_fraction(mut y: U256, bits: usize) -> U256 {
	let one = U256::one() << bits;
	let two = one << 1usize;
	let mut result = U256::zero();
	let mut bit = one >> 1usize;
	while !bit.is_zero() {
		y = y * y / one;
		if y >= two {
			y = y >> 1usize;
			result = result + bit;
		}
		bit = bit >> 1usize;
	}
	result
}

#[cfg(test)]
mod tests {
	use super::*;

	const BITS: u32 = 40;

	fn one() -> U256 {
		U256::one() << BITS as usize
	}

	fn as_f64(value: U256) -> f64 {
		value.low_u128() as f64 / (1u128 << BITS) as f64
	}

	fn close(actual: f64, expected: f64) -> bool {
		(actual - expected).abs() <= expected.abs() * 1e-9 + 1e-10
	}

	#[test]
	fn exp_of_zero_is_one() {
		assert_eq!(exp(U256::zero(), U256::one(), one()), Ok(one()));
	}

	#[test]
	fn exp_works() {
		for (p, q) in [(1u64, 1u64), (1, 3), (5, 2), (30, 1), (1, 1_000_000)] {
			let actual = exp(U256::from(p), U256::from(q), one()).unwrap();
			let expected = (p as f64 / q as f64).exp();
			assert!(close(as_f64(actual), expected), "e^({}/{})", p, q);
		}
	}

	#[test]
	fn exp_rejects_zero_denominator() {
		assert_eq!(
			exp(U256::one(), U256::zero(), one()),
			Err(CurveError::DivisionByZero)
		);
	}

	#[test]
	fn exp_reports_overflow() {
		assert_eq!(
			exp(U256::from(400u32), U256::one(), one()),
			Err(CurveError::Overflow)
		);
	}

	#[test]
	fn ln_works() {
		assert_eq!(ln(U256::from(7u32), U256::from(7u32), BITS), Ok(U256::zero()));
		for (p, q) in [(2u64, 1u64), (3, 2), (1_000_001, 1_000_000), (1_000_000, 3), (10, 1)] {
			let actual = ln(U256::from(p), U256::from(q), BITS).unwrap();
			let expected = (p as f64 / q as f64).ln();
			assert!(
				(as_f64(actual) - expected).abs() < 1e-9,
				"ln({}/{})",
				p,
				q
			);
		}
	}

	#[test]
	fn ln_rejects_values_below_one() {
		assert_eq!(
			ln(U256::from(1u32), U256::from(2u32), BITS),
			Err(CurveError::OutOfDomain)
		);
		assert_eq!(
			ln(U256::from(1u32), U256::zero(), BITS),
			Err(CurveError::DivisionByZero)
		);
	}
}
