#![cfg_attr(not(feature = "std"), no_std)]

use codec::{Decode, Encode};
use scale_info::TypeInfo;
#[cfg(feature = "std")]
use serde::{Deserialize, Serialize};
use sp_core::U256;
use sp_runtime::{DispatchResult, RuntimeDebug};

/// Side of a trade, seen from the trader.
#[derive(Encode, Decode, Clone, Copy, PartialEq, Eq, RuntimeDebug, TypeInfo)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
pub enum TradeDirection {
	/// Base currency in, conversion token out.
	Buy,
	/// Conversion token in, base currency out.
	Sell,
}

#[derive(Clone, Copy, PartialEq, Eq, RuntimeDebug)]
pub enum CurveError {
	Overflow,
	DivisionByZero,
	/// The argument lies outside the function's domain, e.g. beyond the curve asymptote.
	OutOfDomain,
}

/// Integrals of a liquidity curve.
///
/// All quantities are fixed point numbers with `2^precision_bits` as one, measured in whole
/// units of the base currency (`e`) or of the conversion token (`t`).
pub trait LiquidityCurve: Sized {
	fn new(r: u128, p_min: u128, precision_bits: u32) -> Self;

	/// Fixed point `one`.
	fn precision(&self) -> U256;

	/// Marginal price (base per token) at curve position `e`.
	fn price(&self, e: U256) -> Result<U256, CurveError>;

	/// Tokens paid out for `delta_e` base currency paid in at position `e`.
	fn delta_t(&self, e: U256, delta_e: U256) -> Result<U256, CurveError>;

	/// Base currency paid out for `delta_t` tokens paid in at position `e`.
	fn delta_e(&self, e: U256, delta_t: U256) -> Result<U256, CurveError>;

	/// Base currency that must be paid in at position `e` to take exactly `delta_t` tokens out.
	fn delta_e_for_token_out(&self, e: U256, delta_t: U256) -> Result<U256, CurveError>;
}

/// What a reserve needs from the conversion rates engine.
pub trait ConversionRatesOperation {
	type AccountId;
	type AssetId;
	type BlockNumber;

	/// Rate in `PRECISION` units, `0` when no trade is possible.
	fn get_rate(
		token: Self::AssetId,
		current_block: Self::BlockNumber,
		direction: TradeDirection,
		qty: u128,
	) -> u128;

	/// Reports a settled trade. Positive `reserve_token_delta` means the reserve received tokens.
	fn record_imbalance(
		who: &Self::AccountId,
		token: Self::AssetId,
		reserve_token_delta: i128,
		rate_update_block: Self::BlockNumber,
		current_block: Self::BlockNumber,
	) -> DispatchResult;

	fn collected_fees() -> u128;
}
