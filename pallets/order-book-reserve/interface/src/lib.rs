#![cfg_attr(not(feature = "std"), no_std)]

use codec::{Decode, Encode};
use scale_info::TypeInfo;
#[cfg(feature = "std")]
use serde::{Deserialize, Serialize};
use sp_runtime::RuntimeDebug;
use sp_std::prelude::*;

/// Side of the book a trader takes, seen from the trader.
#[derive(Encode, Decode, Clone, Copy, PartialEq, Eq, RuntimeDebug, TypeInfo)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
pub enum TradeSide {
	/// Base currency in, token out: takes offers paying tokens for base currency.
	Buy,
	/// Token in, base currency out: takes offers paying base currency for tokens.
	Sell,
}

/// A resting order of the external book.
///
/// The maker pays `pay_amount` of the trader's destination asset and wants `buy_amount` of the
/// trader's source asset.
#[derive(Encode, Decode, Clone, Copy, PartialEq, Eq, RuntimeDebug, TypeInfo, Default)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
pub struct Offer {
	pub id: u64,
	pub pay_amount: u128,
	pub buy_amount: u128,
}

pub trait OfferBookProvider<AssetId> {
	/// At most `max_count` offers a trader on `side` of `token` can take, best first.
	fn best_offers(token: &AssetId, side: TradeSide, max_count: u32) -> Vec<Offer>;
}

/// Balances the reserve can pay out of its own inventory.
pub trait ReserveInventory<AssetId> {
	fn token_balance(token: &AssetId) -> u128;

	fn base_balance() -> u128;
}
