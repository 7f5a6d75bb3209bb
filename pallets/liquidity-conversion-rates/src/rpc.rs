use super::*;
use liquidity_formula::to_fixed_point;
use reserve_utils::{calc_dst_qty, to_u128, BASE_DECIMALS, PRECISION};
use sp_core::U256;

impl<T: liquidity_conversion_rates::Config> liquidity_conversion_rates::Pallet<T> {
	/// Returns
	/// 1. buy rate of an infinitesimal trade at the current curve position
	/// 2. sell rate of an infinitesimal trade at the current curve position
	pub fn zero_quantity_rates() -> (u128, u128) {
		(
			Self::buy_rate_zero_quantity(),
			Self::sell_rate_zero_quantity(),
		)
	}

	pub fn buy_rate_zero_quantity() -> u128 {
		Self::zero_quantity_rate(TradeDirection::Buy).unwrap_or_else(|reason| {
			log::debug!("no zero quantity buy rate: {:?}", reason);
			0
		})
	}

	pub fn sell_rate_zero_quantity() -> u128 {
		Self::zero_quantity_rate(TradeDirection::Sell).unwrap_or_else(|reason| {
			log::debug!("no zero quantity sell rate: {:?}", reason);
			0
		})
	}

	/// Marginal price at curve position `e` in `PRECISION` units of base currency per token.
	pub fn price_at(e: u128) -> u128 {
		let params = match CurveParams::<T>::get() {
			Some(params) => params,
			None => return 0,
		};
		let curve: T::Curve = params.curve();
		let price = to_fixed_point(e, BASE_DECIMALS, params.precision_bits)
			.and_then(|e| curve.price(e))
			.and_then(|price| {
				price
					.checked_mul(U256::from(PRECISION))
					.ok_or(CurveError::Overflow)
			})
			.map(|price| price / curve.precision());
		match price {
			Ok(price) => to_u128(price).unwrap_or_default(),
			Err(err) => {
				log::debug!("price at {} failed: {:?}", e, err);
				0
			}
		}
	}

	/// Amount the trader receives for `qty` at the current curve position, `0` if no trade is
	/// possible.
	pub fn estimate_dest_amount(direction: TradeDirection, qty: u128) -> u128 {
		let info = match ConversionToken::<T>::get() {
			Some(info) => info,
			None => return 0,
		};
		let rate = Self::get_rate(info.token, direction, qty);
		let (src_decimals, dst_decimals) = match direction {
			TradeDirection::Buy => (BASE_DECIMALS, info.decimals),
			TradeDirection::Sell => (info.decimals, BASE_DECIMALS),
		};
		calc_dst_qty(qty, src_decimals, dst_decimals, rate).unwrap_or_default()
	}
}
