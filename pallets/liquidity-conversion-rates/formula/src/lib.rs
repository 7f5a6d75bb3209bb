#![cfg_attr(not(feature = "std"), no_std)]

use liquidity_conversion_rates_interface::{CurveError, LiquidityCurve};
use sp_core::U256;

pub mod exponential;
pub mod math;

pub use exponential::ExponentialCurve;

/// Largest supported `precision_bits`; every intermediate stays within 256 bits below it.
pub const MAX_PRECISION_BITS: u32 = 64;

pub type FormulaResult<T> = Result<T, CurveError>;

/// `value * 2^precision_bits / 10^decimals`: a quantity in smallest units as fixed point whole
/// units.
pub fn to_fixed_point(value: u128, decimals: u32, precision_bits: u32) -> FormulaResult<U256> {
	let unit = U256::from(10u128.checked_pow(decimals).ok_or(CurveError::Overflow)?);
	let scaled = U256::from(value)
		.checked_mul(U256::one() << precision_bits as usize)
		.ok_or(CurveError::Overflow)?;
	Ok(scaled / unit)
}

/// Inverse of [`to_fixed_point`], floored.
pub fn from_fixed_point(value: U256, decimals: u32, precision_bits: u32) -> FormulaResult<U256> {
	let unit = U256::from(10u128.checked_pow(decimals).ok_or(CurveError::Overflow)?);
	Ok(value.checked_mul(unit).ok_or(CurveError::Overflow)? >> precision_bits as usize)
}
