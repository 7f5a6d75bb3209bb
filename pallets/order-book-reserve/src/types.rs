use super::*;
#[cfg(feature = "std")]
use serde::{Deserialize, Serialize};

/// Limits of a single walk over the book.
#[derive(Encode, Decode, Clone, Copy, PartialEq, Eq, RuntimeDebug, TypeInfo, Default)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
pub struct TraversalConfig {
	/// Offers inspected at most.
	pub max_traverse: u32,
	/// Offers taken at most.
	pub max_take: u32,
	/// Smallest base currency amount worth taking from a single offer.
	pub min_order_size: u128,
}

impl TraversalConfig {
	pub fn is_valid(&self) -> bool {
		self.max_take <= self.max_traverse
	}
}

/// Factors `min_order_size` is derived from, once, when they are configured:
///
/// `min_order_base + (max_traverse * traverse_x + traverse_y + max_take * take_x + take_y) /
/// divisor`
#[derive(Encode, Decode, Clone, Copy, PartialEq, Eq, RuntimeDebug, TypeInfo, Default)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
pub struct OfferLimitFactors {
	pub traverse_x: u128,
	pub traverse_y: u128,
	pub take_x: u128,
	pub take_y: u128,
	pub min_order_base: u128,
	pub divisor: u128,
}

impl OfferLimitFactors {
	/// `None` if `divisor` is zero or the result overflows.
	pub fn min_order_size(&self, max_traverse: u32, max_take: u32) -> Option<u128> {
		if self.divisor == 0 {
			return None;
		}
		let traverse_cost = (max_traverse as u128)
			.checked_mul(self.traverse_x)?
			.checked_add(self.traverse_y)?;
		let take_cost = (max_take as u128)
			.checked_mul(self.take_x)?
			.checked_add(self.take_y)?;
		let cost = traverse_cost.checked_add(take_cost)? / self.divisor;
		self.min_order_base.checked_add(cost)
	}
}

#[derive(Encode, Decode, Clone, Copy, PartialEq, Eq, RuntimeDebug, TypeInfo)]
pub struct TokenListing {
	pub decimals: u32,
	pub traversal: TraversalConfig,
	pub trade_enabled: bool,
}

/// Terms on which the reserve sells out of its own inventory.
#[derive(Encode, Decode, Clone, Copy, PartialEq, Eq, RuntimeDebug, TypeInfo, Default)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
pub struct InternalInventoryParams {
	/// Token balance the inventory keeps after paying out.
	pub min_token_balance: u128,
	/// Base currency balance the inventory keeps after paying out.
	pub min_base_balance: u128,
	/// Discount on the top of book rate the inventory quotes at.
	pub premium_bps: u32,
	/// Smallest bid/ask spread of the book the inventory trades at.
	pub min_spread_bps: u32,
}

/// Outcome of a walk over the book.
#[derive(Encode, Decode, Clone, PartialEq, Eq, RuntimeDebug, TypeInfo, Default)]
pub struct OfferSelection {
	/// Destination amount in smallest units.
	pub total_dest: u128,
	/// Destination amount in whole units, floored.
	pub total_dest_whole: u128,
	/// Ids of the offers used, in book order.
	pub offer_ids: Vec<u64>,
	/// Source amount the offers absorb.
	pub total_src: u128,
}

/// Why a conversion rate query produced the zero rate.
#[derive(Clone, Copy, PartialEq, Eq, RuntimeDebug)]
pub enum NoRate {
	TradeDisabled,
	NotBasePair,
	TokenNotListed,
	TokenTradeDisabled,
	ZeroQuantity,
	QuantityTooLarge,
	NoOffers,
	RateTooLarge,
}
