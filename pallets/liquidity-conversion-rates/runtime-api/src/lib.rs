#![cfg_attr(not(feature = "std"), no_std)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::unnecessary_mut_passed)]

use codec::Codec;
use liquidity_conversion_rates_interface::TradeDirection;
use node_primitives::Balance;

sp_api::decl_runtime_apis! {
	pub trait LiquidityConversionRatesApi<AssetId>
	where
		AssetId: Codec,
	{
		/// Rate in 10^18 units for trading `qty` at the current curve position, 0 if no trade
		/// is possible.
		fn get_rate(token: AssetId, direction: TradeDirection, qty: Balance) -> Balance;

		fn get_rate_with_e(
			token: AssetId,
			direction: TradeDirection,
			qty: Balance,
			e: Balance,
		) -> Balance;

		/// return type: buy rate and sell rate of an infinitesimal trade.
		fn zero_quantity_rates() -> (Balance, Balance);

		fn price_at(e: Balance) -> Balance;

		fn estimate_dest_amount(direction: TradeDirection, qty: Balance) -> Balance;

		fn collected_fees() -> Balance;

		fn curve_position() -> Balance;
	}
}
