use crate::*;
use sp_core::U256;
use sp_runtime::DispatchResult;

/// Runs `check_fn` and, only when it succeeds, `set_fn`.
///
/// Every state-changing call goes through here so that all checks happen before the first
/// storage write.
pub fn extrinsic_procedure<AccountId, CheckFn, SetFn>(
	who: &AccountId,
	check_fn: CheckFn,
	set_fn: SetFn,
) -> DispatchResult
where
	CheckFn: FnOnce(&AccountId) -> DispatchResult,
	SetFn: FnOnce(&AccountId),
{
	check_fn(who)?;
	set_fn(who);
	Ok(())
}

pub fn approximately_equals(a: u128, b: u128, precision: u128) -> bool {
	let abs = match a >= b {
		true => a - b,
		false => b - a,
	};
	abs <= precision
}

/// Narrows a 256-bit intermediate, `None` if it does not fit.
pub fn to_u128(value: U256) -> Option<u128> {
	if value.bits() > 128 {
		return None;
	}
	Some(value.low_u128())
}

/// `a * b / c` floored, computed with a 256-bit intermediate.
pub fn mul_div(a: u128, b: u128, c: u128) -> Option<u128> {
	if c == 0 {
		return None;
	}
	to_u128(U256::from(a) * U256::from(b) / U256::from(c))
}

pub fn pow10(exp: u32) -> Option<u128> {
	10u128.checked_pow(exp)
}

/// `value * (10000 - fee_bps) / 10000`.
pub fn value_after_reducing_fee(value: u128, fee_bps: u32) -> u128 {
	let fee_bps = fee_bps.min(BPS);
	// the result never exceeds `value`
	mul_div(value, (BPS - fee_bps) as u128, BPS as u128).unwrap_or_default()
}

/// Fee charged on an amount the fee has already been taken from: `value * fee_bps / (10000 -
/// fee_bps)`.
pub fn fee_on_net_amount(value: u128, fee_bps: u32) -> Option<u128> {
	if fee_bps >= BPS {
		return None;
	}
	mul_div(value, fee_bps as u128, (BPS - fee_bps) as u128)
}

/// Fee charged on a gross amount: `value * fee_bps / 10000`.
pub fn fee_on_gross_amount(value: u128, fee_bps: u32) -> u128 {
	mul_div(value, fee_bps.min(BPS) as u128, BPS as u128).unwrap_or_default()
}

/// Adds `bps` basis points to `value`, `bps` may be negative down to `-10000`.
pub fn add_bps(value: u128, bps: i32) -> Option<u128> {
	if bps < -(BPS as i32) {
		return None;
	}
	let factor = (BPS as i64 + bps as i64) as u128;
	mul_div(value, factor, BPS as u128)
}

/// Destination quantity bought with `src_qty` at `rate`, adjusted for the decimals of both sides.
pub fn calc_dst_qty(src_qty: u128, src_decimals: u32, dst_decimals: u32, rate: u128) -> Option<u128> {
	if src_qty > MAX_QTY || rate > MAX_RATE {
		return None;
	}
	if dst_decimals >= src_decimals {
		let factor = pow10(dst_decimals - src_decimals)?;
		to_u128(U256::from(src_qty) * U256::from(rate) * U256::from(factor) / U256::from(PRECISION))
	} else {
		let factor = pow10(src_decimals - dst_decimals)?;
		to_u128(
			U256::from(src_qty) * U256::from(rate) / (U256::from(PRECISION) * U256::from(factor)),
		)
	}
}

/// Rate (in `PRECISION` units) implied by exchanging `src_amount` for `dest_amount`.
pub fn calc_rate_from_qty(
	src_amount: u128,
	dest_amount: u128,
	src_decimals: u32,
	dst_decimals: u32,
) -> Option<u128> {
	if src_amount == 0 || src_amount > MAX_QTY || dest_amount > MAX_QTY {
		return None;
	}
	if dst_decimals >= src_decimals {
		let factor = pow10(dst_decimals - src_decimals)?;
		to_u128(
			U256::from(dest_amount) * U256::from(PRECISION)
				/ (U256::from(src_amount) * U256::from(factor)),
		)
	} else {
		let factor = pow10(src_decimals - dst_decimals)?;
		to_u128(
			U256::from(dest_amount) * U256::from(PRECISION) * U256::from(factor)
				/ U256::from(src_amount),
		)
	}
}
