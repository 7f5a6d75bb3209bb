use super::*;
use reserve_utils::{
	calc_dst_qty, calc_rate_from_qty, mul_div, value_after_reducing_fee, BASE_DECIMALS, MAX_QTY,
	MAX_RATE, PRECISION,
};

impl<T: order_book_reserve::Config> order_book_reserve::Pallet<T> {
	pub(crate) fn check_listed(token: &T::AssetId) -> DispatchResult {
		ensure!(
			TokenListings::<T>::contains_key(token),
			Error::<T>::TokenNotListed
		);
		Ok(())
	}

	pub(crate) fn update_traversal(token: T::AssetId, traversal: TraversalConfig) {
		TokenListings::<T>::mutate(&token, |listing| {
			if let Some(listing) = listing {
				listing.traversal = traversal;
			}
		});
		Self::deposit_event(Event::TraversalConfigSet(token, traversal));
	}

	/// Walks the book of `token` for a trader on `side` exchanging `requested` source units.
	pub fn show_best_offers(token: T::AssetId, side: TradeSide, requested: u128) -> OfferSelection {
		let listing = match TokenListings::<T>::get(&token) {
			Some(listing) => listing,
			None => return OfferSelection::default(),
		};
		let (_, dest_decimals) = Self::side_decimals(&listing, side);
		let offers = T::OfferBook::best_offers(&token, side, listing.traversal.max_traverse);
		walker::show_best_offers(offers, side, requested, &listing.traversal, dest_decimals)
	}

	/// Rate in `PRECISION` units for exchanging `src_qty` of `src` into `dest`, `0` if no trade
	/// is possible.
	///
	/// Rates quoted from the order book are even, rates quoted from the reserve's own inventory
	/// are odd.
	pub fn get_conversion_rate(
		src: T::AssetId,
		dest: T::AssetId,
		src_qty: u128,
		_block_number: T::BlockNumber,
	) -> u128 {
		match Self::try_conversion_rate(src, dest, src_qty) {
			Ok(rate) => rate,
			Err(reason) => {
				log::debug!(
					"no conversion rate for {:?} -> {:?} of {}: {:?}",
					src,
					dest,
					src_qty,
					reason
				);
				0
			}
		}
	}

	fn try_conversion_rate(src: T::AssetId, dest: T::AssetId, src_qty: u128) -> Result<u128, NoRate> {
		if !TradeEnabled::<T>::get() {
			return Err(NoRate::TradeDisabled);
		}
		let (token, side) = Self::trading_pair(src, dest)?;
		let listing = TokenListings::<T>::get(&token).ok_or(NoRate::TokenNotListed)?;
		if !listing.trade_enabled {
			return Err(NoRate::TokenTradeDisabled);
		}
		if src_qty == 0 {
			return Err(NoRate::ZeroQuantity);
		}
		if src_qty > MAX_QTY {
			return Err(NoRate::QuantityTooLarge);
		}

		let (src_decimals, dest_decimals) = Self::side_decimals(&listing, side);
		let selection = Self::show_best_offers(token, side, src_qty);
		let book_rate = if !selection.offer_ids.is_empty() {
			calc_rate_from_qty(src_qty, selection.total_dest, src_decimals, dest_decimals)
				.map(|rate| value_after_reducing_fee(rate, FeeBps::<T>::get()))
				.unwrap_or_default()
		} else {
			0
		};

		if let Some(rate) = Self::internal_inventory_rate(token, side, &listing, src_qty, book_rate)
		{
			return Ok(if rate % 2 == 0 { rate - 1 } else { rate });
		}

		if book_rate == 0 {
			return Err(NoRate::NoOffers);
		}
		if book_rate > MAX_RATE {
			return Err(NoRate::RateTooLarge);
		}
		Ok(book_rate - book_rate % 2)
	}

	/// The listed token and the trader's side, if exactly one of the assets is the base currency.
	fn trading_pair(src: T::AssetId, dest: T::AssetId) -> Result<(T::AssetId, TradeSide), NoRate> {
		let base = T::BaseAsset::get();
		if src == base && dest != base {
			Ok((dest, TradeSide::Buy))
		} else if dest == base && src != base {
			Ok((src, TradeSide::Sell))
		} else {
			Err(NoRate::NotBasePair)
		}
	}

	/// Returns (source decimals, destination decimals) of a trade on `side`.
	fn side_decimals(listing: &TokenListing, side: TradeSide) -> (u32, u32) {
		match side {
			TradeSide::Buy => (BASE_DECIMALS, listing.decimals),
			TradeSide::Sell => (listing.decimals, BASE_DECIMALS),
		}
	}

	/// Rate of the top offer of `side` in `PRECISION` units.
	fn top_of_book_rate(token: &T::AssetId, listing: &TokenListing, side: TradeSide) -> Option<u128> {
		let top = T::OfferBook::best_offers(token, side, 1).into_iter().next()?;
		let (src_decimals, dest_decimals) = Self::side_decimals(listing, side);
		calc_rate_from_qty(top.buy_amount, top.pay_amount, src_decimals, dest_decimals)
			.filter(|rate| *rate > 0)
	}

	/// Rate the reserve pays out of its own inventory at, if that beats `book_rate`.
	fn internal_inventory_rate(
		token: T::AssetId,
		side: TradeSide,
		listing: &TokenListing,
		src_qty: u128,
		book_rate: u128,
	) -> Option<u128> {
		let params = InternalInventory::<T>::get(&token)?;
		let buy_rate = Self::top_of_book_rate(&token, listing, TradeSide::Buy)?;
		let sell_rate = Self::top_of_book_rate(&token, listing, TradeSide::Sell)?;

		// base -> token -> base through the top of both sides
		let round_trip = mul_div(buy_rate, sell_rate, PRECISION)?;
		if round_trip >= PRECISION {
			return None;
		}
		let spread_bps = mul_div(PRECISION - round_trip, BPS as u128, PRECISION)?;
		if spread_bps < params.min_spread_bps as u128 {
			return None;
		}

		let top_rate = match side {
			TradeSide::Buy => buy_rate,
			TradeSide::Sell => sell_rate,
		};
		let rate = value_after_reducing_fee(
			value_after_reducing_fee(top_rate, params.premium_bps),
			FeeBps::<T>::get(),
		);
		if rate <= book_rate || rate > MAX_RATE {
			return None;
		}

		let (src_decimals, dest_decimals) = Self::side_decimals(listing, side);
		let payout = calc_dst_qty(src_qty, src_decimals, dest_decimals, rate)?;
		let (balance, min_balance) = match side {
			TradeSide::Buy => (T::Inventory::token_balance(&token), params.min_token_balance),
			TradeSide::Sell => (T::Inventory::base_balance(), params.min_base_balance),
		};
		if balance < payout.checked_add(min_balance)? {
			return None;
		}
		Some(rate)
	}
}
