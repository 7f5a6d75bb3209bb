#![cfg_attr(not(feature = "std"), no_std)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::unnecessary_mut_passed)]

use codec::Codec;
use node_primitives::{Balance, BlockNumber};
use order_book_interface::{Offer, TradeSide};
use sp_std::prelude::*;

sp_api::decl_runtime_apis! {
	pub trait OrderBookReserveApi<AssetId>
	where
		AssetId: Codec,
	{
		/// return type:
		/// 1. destination amount in smallest units
		/// 2. destination amount in whole units
		/// 3. ids of the offers used
		/// 4. source amount the offers absorb
		fn show_best_offers(
			token: AssetId,
			side: TradeSide,
			requested: Balance,
		) -> (Balance, Balance, Vec<u64>, Balance);

		/// Rate in 10^18 units, 0 if no trade is possible.
		fn get_conversion_rate(
			src: AssetId,
			dest: AssetId,
			src_qty: Balance,
			block_number: BlockNumber,
		) -> Balance;

		fn estimate_dest_amount(
			src: AssetId,
			dest: AssetId,
			src_qty: Balance,
			block_number: BlockNumber,
		) -> Balance;

		/// return type: token, decimals and whether the token can be traded.
		fn listed_tokens() -> Vec<(AssetId, u32, bool)>;

		/// return type: top offer of the buy side and of the sell side.
		fn top_of_book(token: AssetId) -> (Option<Offer>, Option<Offer>);
	}
}
