use super::*;
use liquidity_formula::{from_fixed_point, to_fixed_point};
use reserve_utils::{
	fee_on_gross_amount, fee_on_net_amount, pow10, to_u128, value_after_reducing_fee,
	BASE_DECIMALS, MAX_RATE, PRECISION,
};
use sp_core::U256;

impl<T: liquidity_conversion_rates::Config> liquidity_conversion_rates::Pallet<T> {
	pub(crate) fn new_liquidity_params(
		r: u128,
		p_min: u128,
		precision_bits: u32,
		max_cap_buy: u128,
		max_cap_sell: u128,
		fee_bps: u32,
		max_sell_rate: u128,
		min_sell_rate: u128,
	) -> Result<LiquidityParams, DispatchError> {
		ensure!(fee_bps < BPS, Error::<T>::InvalidConfig);
		ensure!(
			precision_bits > 0 && precision_bits <= MAX_PRECISION_BITS,
			Error::<T>::ArithmeticOverflow
		);
		ensure!(
			r <= MAX_QTY && p_min <= MAX_QTY && max_cap_buy <= MAX_QTY && max_cap_sell <= MAX_QTY,
			Error::<T>::ArithmeticOverflow
		);
		ensure!(r > 0 && p_min > 0, Error::<T>::InvalidConfig);
		ensure!(
			min_sell_rate > 0 && min_sell_rate < max_sell_rate && max_sell_rate <= MAX_RATE,
			Error::<T>::InvalidConfig
		);

		// buy rates are the reciprocals of the sell bounds
		let precision_square = U256::from(PRECISION) * U256::from(PRECISION);
		let max_buy_rate = to_u128(precision_square / U256::from(min_sell_rate))
			.ok_or(Error::<T>::ArithmeticOverflow)?;
		let min_buy_rate = to_u128(precision_square / U256::from(max_sell_rate))
			.ok_or(Error::<T>::ArithmeticOverflow)?;

		Ok(LiquidityParams {
			r,
			p_min,
			precision_bits,
			max_cap_buy,
			max_cap_sell,
			fee_bps,
			max_buy_rate,
			min_buy_rate,
			max_sell_rate,
			min_sell_rate,
		})
	}

	/// Rate for trading `qty` at the current curve position, `0` if no trade is possible.
	///
	/// `qty` is in base currency smallest units for buys and in token smallest units for sells.
	pub fn get_rate(token: T::AssetId, direction: TradeDirection, qty: u128) -> u128 {
		Self::get_rate_with_e(token, direction, qty, CurvePosition::<T>::get())
	}

	pub fn get_rate_with_e(token: T::AssetId, direction: TradeDirection, qty: u128, e: u128) -> u128 {
		match Self::try_get_rate(token, direction, qty, e) {
			Ok(rate) => rate,
			Err(reason) => {
				log::debug!(
					"no {:?} rate for qty {} at curve position {}: {:?}",
					direction,
					qty,
					e,
					reason
				);
				0
			}
		}
	}

	fn try_get_rate(
		token: T::AssetId,
		direction: TradeDirection,
		qty: u128,
		e: u128,
	) -> Result<u128, RateUnavailable> {
		let params = CurveParams::<T>::get().ok_or(RateUnavailable::NotConfigured)?;
		let info = ConversionToken::<T>::get().ok_or(RateUnavailable::NotConfigured)?;
		if info.token != token {
			return Err(RateUnavailable::WrongToken);
		}
		if qty > MAX_QTY || e > MAX_QTY {
			return Err(RateUnavailable::QuantityTooLarge);
		}

		let curve: T::Curve = params.curve();
		let e = to_fixed_point(e, BASE_DECIMALS, params.precision_bits)?;
		let rate = match direction {
			TradeDirection::Buy => Self::buy_rate(&params, &curve, info.decimals, e, qty)?,
			TradeDirection::Sell => Self::sell_rate(&params, &curve, info.decimals, e, qty)?,
		};
		Self::rate_after_validation(&params, direction, rate)
	}

	fn buy_rate(
		params: &LiquidityParams,
		curve: &T::Curve,
		token_decimals: u32,
		e: U256,
		qty: u128,
	) -> Result<u128, RateUnavailable> {
		let bits = params.precision_bits;
		let delta_e = to_fixed_point(qty, BASE_DECIMALS, bits)?;
		if delta_e > to_fixed_point(params.max_cap_buy, BASE_DECIMALS, bits)? {
			return Err(RateUnavailable::CapExceeded);
		}
		if delta_e.is_zero() {
			return Self::zero_quantity_rate_at(params, curve, TradeDirection::Buy, e);
		}

		let delta_t = curve.delta_t(e, delta_e)?;
		if delta_t > to_fixed_point(MAX_QTY, BASE_DECIMALS, bits)? {
			return Err(RateUnavailable::QuantityTooLarge);
		}
		let tokens = narrow(from_fixed_point(delta_t, token_decimals, bits)?)?;
		let tokens = value_after_reducing_fee(tokens, params.fee_bps);
		rate_rounded_down(qty, tokens, BASE_DECIMALS, token_decimals)
	}

	fn sell_rate(
		params: &LiquidityParams,
		curve: &T::Curve,
		token_decimals: u32,
		e: U256,
		qty: u128,
	) -> Result<u128, RateUnavailable> {
		let bits = params.precision_bits;
		if to_fixed_point(qty, token_decimals, bits)?.is_zero() {
			return Self::zero_quantity_rate_at(params, curve, TradeDirection::Sell, e);
		}

		// the fee stays with the reserve, only the rest moves along the curve
		let net = value_after_reducing_fee(qty, params.fee_bps);
		let delta_e = curve.delta_e(e, to_fixed_point(net, token_decimals, bits)?)?;
		if delta_e > to_fixed_point(params.max_cap_sell, BASE_DECIMALS, bits)? {
			return Err(RateUnavailable::CapExceeded);
		}
		let proceeds = narrow(from_fixed_point(delta_e, BASE_DECIMALS, bits)?)?;
		rate_rounded_down(qty, proceeds, token_decimals, BASE_DECIMALS)
	}

	/// Fee reduced rate of an infinitesimal trade: `1 / p(e)` for buys, `p(e)` for sells.
	pub(crate) fn zero_quantity_rate_at(
		params: &LiquidityParams,
		curve: &T::Curve,
		direction: TradeDirection,
		e: U256,
	) -> Result<u128, RateUnavailable> {
		let price = curve.price(e)?;
		if price.is_zero() {
			return Err(CurveError::DivisionByZero.into());
		}
		let precision = curve.precision();
		let rate = match direction {
			TradeDirection::Buy => precision * U256::from(PRECISION) / price,
			TradeDirection::Sell => {
				price
					.checked_mul(U256::from(PRECISION))
					.ok_or(CurveError::Overflow)?
					/ precision
			}
		};
		Ok(value_after_reducing_fee(narrow(rate)?, params.fee_bps))
	}

	pub(crate) fn zero_quantity_rate(direction: TradeDirection) -> Result<u128, RateUnavailable> {
		let params = CurveParams::<T>::get().ok_or(RateUnavailable::NotConfigured)?;
		let curve: T::Curve = params.curve();
		let e = to_fixed_point(
			CurvePosition::<T>::get(),
			BASE_DECIMALS,
			params.precision_bits,
		)?;
		Self::zero_quantity_rate_at(&params, &curve, direction, e)
	}

	fn rate_after_validation(
		params: &LiquidityParams,
		direction: TradeDirection,
		rate: u128,
	) -> Result<u128, RateUnavailable> {
		let (min_rate, max_rate) = params.rate_bounds(direction);
		if rate > MAX_RATE || rate < min_rate || rate > max_rate {
			return Err(RateUnavailable::OutOfBounds);
		}
		Ok(rate)
	}

	fn check_reserve_account(who: &T::AccountId) -> DispatchResult {
		match ReserveAccount::<T>::get() {
			Some(ref account) if account == who => Ok(()),
			_ => Err(Error::<T>::Unauthorized.into()),
		}
	}

	/// Fee and new curve position of a reported trade, nothing is written.
	pub(crate) fn imbalance_outcome(
		token: T::AssetId,
		reserve_token_delta: i128,
	) -> Result<ImbalanceOutcome, DispatchError> {
		let params = CurveParams::<T>::get().ok_or(Error::<T>::NotConfigured)?;
		let info = ConversionToken::<T>::get().ok_or(Error::<T>::NotConfigured)?;
		ensure!(info.token == token, Error::<T>::WrongToken);

		let e = CurvePosition::<T>::get();
		let qty = reserve_token_delta.unsigned_abs();
		ensure!(qty <= MAX_QTY, Error::<T>::ArithmeticOverflow);
		if qty == 0 {
			return Ok(ImbalanceOutcome {
				fee: 0,
				curve_position: e,
			});
		}

		let bits = params.precision_bits;
		let curve: T::Curve = params.curve();
		let e_fp = to_fixed_point(e, BASE_DECIMALS, bits).map_err(Self::curve_error)?;

		let (fee, curve_position) = if reserve_token_delta > 0 {
			// the reserve received tokens: the user sold and base currency left the reserve
			let fee = fee_on_gross_amount(qty, params.fee_bps);
			let net = to_fixed_point(qty - fee, info.decimals, bits).map_err(Self::curve_error)?;
			let delta_e = curve
				.delta_e(e_fp, net)
				.and_then(|delta_e| from_fixed_point(delta_e, BASE_DECIMALS, bits))
				.map_err(Self::curve_error)?;
			let delta_e = to_u128(delta_e).unwrap_or(u128::MAX);
			(fee, e.saturating_sub(delta_e))
		} else {
			// the reserve gave tokens: the user bought and base currency entered the reserve
			let fee =
				fee_on_net_amount(qty, params.fee_bps).ok_or(Error::<T>::ArithmeticOverflow)?;
			let gross = qty.checked_add(fee).ok_or(Error::<T>::ArithmeticOverflow)?;
			let gross = to_fixed_point(gross, info.decimals, bits).map_err(Self::curve_error)?;
			let delta_e = curve
				.delta_e_for_token_out(e_fp, gross)
				.and_then(|delta_e| from_fixed_point(delta_e, BASE_DECIMALS, bits))
				.map_err(Self::curve_error)?;
			let position = to_u128(delta_e)
				.and_then(|delta_e| e.checked_add(delta_e))
				.filter(|position| *position <= MAX_QTY)
				.ok_or(Error::<T>::ArithmeticOverflow)?;
			(fee, position)
		};

		CollectedFees::<T>::get()
			.checked_add(fee)
			.ok_or(Error::<T>::ArithmeticOverflow)?;
		Ok(ImbalanceOutcome {
			fee,
			curve_position,
		})
	}

	fn curve_error(e: CurveError) -> Error<T> {
		match e {
			CurveError::OutOfDomain => Error::<T>::CurveDepleted,
			_ => Error::<T>::ArithmeticOverflow,
		}
	}
}

impl<T: liquidity_conversion_rates::Config> ConversionRatesOperation
	for liquidity_conversion_rates::Pallet<T>
{
	type AccountId = T::AccountId;
	type AssetId = T::AssetId;
	type BlockNumber = T::BlockNumber;

	fn get_rate(
		token: Self::AssetId,
		_current_block: Self::BlockNumber,
		direction: TradeDirection,
		qty: u128,
	) -> u128 {
		Self::get_rate_with_e(token, direction, qty, CurvePosition::<T>::get())
	}

	fn record_imbalance(
		who: &Self::AccountId,
		token: Self::AssetId,
		reserve_token_delta: i128,
		_rate_update_block: Self::BlockNumber,
		_current_block: Self::BlockNumber,
	) -> DispatchResult {
		extrinsic_procedure(
			who,
			|who| {
				Self::check_reserve_account(who)?;
				Self::imbalance_outcome(token, reserve_token_delta)?;
				Ok(())
			},
			|_who| match Self::imbalance_outcome(token, reserve_token_delta) {
				Ok(outcome) => {
					CollectedFees::<T>::mutate(|fees| *fees = fees.saturating_add(outcome.fee));
					CurvePosition::<T>::set(outcome.curve_position);
					Self::deposit_event(Event::ImbalanceRecorded(
						token,
						reserve_token_delta,
						outcome.fee,
						outcome.curve_position,
					));
				}
				Err(e) => {
					// should not happen, checked above
					log::error!("record imbalance failed: {:?}", e);
				}
			},
		)
	}

	fn collected_fees() -> u128 {
		CollectedFees::<T>::get()
	}
}

fn narrow(value: U256) -> Result<u128, RateUnavailable> {
	to_u128(value).ok_or(RateUnavailable::Formula(CurveError::Overflow))
}

/// Rate of receiving `dest_amount` for `src_qty`, one unit below the floored quotient when the
/// division leaves a remainder, so that `calc_dst_qty(src_qty, .., rate)` never exceeds
/// `dest_amount`.
fn rate_rounded_down(
	src_qty: u128,
	dest_amount: u128,
	src_decimals: u32,
	dest_decimals: u32,
) -> Result<u128, RateUnavailable> {
	let overflow = RateUnavailable::Formula(CurveError::Overflow);
	let (numerator, denominator) = if dest_decimals >= src_decimals {
		let factor = pow10(dest_decimals - src_decimals).ok_or(overflow)?;
		(
			U256::from(dest_amount) * U256::from(PRECISION),
			U256::from(src_qty) * U256::from(factor),
		)
	} else {
		let factor = pow10(src_decimals - dest_decimals).ok_or(overflow)?;
		(
			U256::from(dest_amount) * U256::from(PRECISION) * U256::from(factor),
			U256::from(src_qty),
		)
	};
	if denominator.is_zero() {
		return Err(CurveError::DivisionByZero.into());
	}
	let rate = narrow(numerator / denominator)?;
	if (numerator % denominator).is_zero() {
		Ok(rate)
	} else {
		Ok(rate.saturating_sub(1))
	}
}
