use crate::math::{exp, ln};
use crate::*;

/// Implement the curve `p(e) = p_min * e^(r e)`.
///
/// `r` and `p_min` are fixed point numbers with `2^precision_bits` as one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExponentialCurve {
	r: U256,
	p_min: U256,
	precision_bits: u32,
}

impl ExponentialCurve {
	/// `r * p(e)`, scaled by `precision^2`.
	fn r_times_price(&self, e: U256) -> FormulaResult<U256> {
		if self.r.is_zero() {
			return Err(CurveError::DivisionByZero);
		}
		let product = self
			.r
			.checked_mul(self.price(e)?)
			.ok_or(CurveError::Overflow)?;
		if product.is_zero() {
			return Err(CurveError::DivisionByZero);
		}
		Ok(product)
	}

	fn precision_square(&self) -> U256 {
		self.precision() * self.precision()
	}
}

impl LiquidityCurve for ExponentialCurve {
	fn new(r: u128, p_min: u128, precision_bits: u32) -> Self {
		ExponentialCurve {
			r: r.into(),
			p_min: p_min.into(),
			precision_bits: precision_bits.min(MAX_PRECISION_BITS),
		}
	}

	fn precision(&self) -> U256 {
		U256::one() << self.precision_bits as usize
	}

	fn price(&self, e: U256) -> FormulaResult<U256> {
		let exponent = self.r.checked_mul(e).ok_or(CurveError::Overflow)?;
		let growth = exp(exponent, self.precision_square(), self.precision())?;
		Ok(self
			.p_min
			.checked_mul(growth)
			.ok_or(CurveError::Overflow)?
			/ self.precision())
	}

	fn delta_t(&self, e: U256, delta_e: U256) -> FormulaResult<U256> {
		let precision = self.precision();
		let r_price = self.r_times_price(e)?;
		let exponent = self.r.checked_mul(delta_e).ok_or(CurveError::Overflow)?;
		let growth = exp(exponent, self.precision_square(), precision)?;

		// 1 - e^(-r delta_e)
		let retained = (growth - precision)
			.checked_mul(precision)
			.ok_or(CurveError::Overflow)?
			/ growth;
		Ok(retained
			.checked_mul(self.precision_square())
			.ok_or(CurveError::Overflow)?
			/ r_price)
	}

	fn delta_e(&self, e: U256, delta_t: U256) -> FormulaResult<U256> {
		let precision = self.precision();
		let r_price = self.r_times_price(e)?;
		let growth = r_price
			.checked_mul(delta_t)
			.ok_or(CurveError::Overflow)?
			/ precision;
		let numerator = self
			.precision_square()
			.checked_add(growth)
			.ok_or(CurveError::Overflow)?;
		let log = ln(numerator, self.precision_square(), self.precision_bits)?;
		Ok(log.checked_mul(precision).ok_or(CurveError::Overflow)? / self.r)
	}

	fn delta_e_for_token_out(&self, e: U256, delta_t: U256) -> FormulaResult<U256> {
		let precision = self.precision();
		let r_price = self.r_times_price(e)?;
		let depletion = r_price
			.checked_mul(delta_t)
			.ok_or(CurveError::Overflow)?
			/ precision;
		if depletion >= self.precision_square() {
			return Err(CurveError::OutOfDomain);
		}
		let log = ln(
			self.precision_square(),
			self.precision_square() - depletion,
			self.precision_bits,
		)?;
		Ok(log.checked_mul(precision).ok_or(CurveError::Overflow)? / self.r)
	}
}
