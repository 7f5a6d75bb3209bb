use super::*;
use reserve_utils::{calc_dst_qty, BASE_DECIMALS};

impl<T: order_book_reserve::Config> order_book_reserve::Pallet<T> {
	/// Returns
	/// 1. destination amount in smallest units
	/// 2. destination amount in whole units
	/// 3. ids of the offers used
	/// 4. source amount the offers absorb
	pub fn show_best_offers_summary(
		token: T::AssetId,
		side: TradeSide,
		requested: u128,
	) -> (u128, u128, Vec<u64>, u128) {
		let selection = Self::show_best_offers(token, side, requested);
		(
			selection.total_dest,
			selection.total_dest_whole,
			selection.offer_ids,
			selection.total_src,
		)
	}

	/// Amount the trader receives for `src_qty` at the current conversion rate, `0` if no trade
	/// is possible.
	pub fn estimate_dest_amount(
		src: T::AssetId,
		dest: T::AssetId,
		src_qty: u128,
		block_number: T::BlockNumber,
	) -> u128 {
		let rate = Self::get_conversion_rate(src, dest, src_qty, block_number);
		if rate == 0 {
			return 0;
		}
		let decimals_of = |asset: &T::AssetId| {
			if *asset == T::BaseAsset::get() {
				Some(BASE_DECIMALS)
			} else {
				TokenListings::<T>::get(asset).map(|listing| listing.decimals)
			}
		};
		match (decimals_of(&src), decimals_of(&dest)) {
			(Some(src_decimals), Some(dest_decimals)) => {
				calc_dst_qty(src_qty, src_decimals, dest_decimals, rate).unwrap_or_default()
			}
			_ => 0,
		}
	}

	pub fn listed_tokens() -> Vec<(T::AssetId, u32, bool)> {
		TokenListings::<T>::iter()
			.map(|(token, listing)| (token, listing.decimals, listing.trade_enabled))
			.collect()
	}

	/// The top offer of each side of the book of `token`.
	pub fn top_of_book(token: T::AssetId) -> (Option<Offer>, Option<Offer>) {
		let top = |side| T::OfferBook::best_offers(&token, side, 1).into_iter().next();
		(top(TradeSide::Buy), top(TradeSide::Sell))
	}
}
