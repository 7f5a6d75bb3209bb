#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(test)]
mod mock;

mod functions;
mod rpc;
mod types;
pub mod walker;

pub use order_book_reserve::*;
pub use types::*;

use frame_support::pallet_prelude::*;
use frame_system::pallet_prelude::*;
use order_book_interface::{Offer, OfferBookProvider, ReserveInventory, TradeSide};
use reserve_utils::{extrinsic_procedure, BPS, MAX_DECIMALS};
use sp_runtime::{traits::MaybeSerializeDeserialize, RuntimeDebug};
use sp_std::prelude::*;

#[frame_support::pallet]
pub mod order_book_reserve {
	use super::*;

	/// Configure the pallet by specifying the parameters and types on which it depends.
	#[pallet::config]
	pub trait Config: frame_system::Config {
		/// Because this pallet emits events, it depends on the runtime's definition of an event.
		type Event: From<Event<Self>> + IsType<<Self as frame_system::Config>::Event>;
		/// Identifier of the assets traded against the base currency.
		type AssetId: Parameter + Member + Copy + Default + MaybeSerializeDeserialize;
		/// The base currency every listed token is quoted against.
		#[pallet::constant]
		type BaseAsset: Get<Self::AssetId>;
		/// The external order book.
		type OfferBook: OfferBookProvider<Self::AssetId>;
		/// Balances of the reserve's own inventory.
		type Inventory: ReserveInventory<Self::AssetId>;
	}

	#[pallet::pallet]
	#[pallet::generate_store(pub(super) trait Store)]
	pub struct Pallet<T>(_);

	#[pallet::storage]
	#[pallet::getter(fn token_listings)]
	pub type TokenListings<T: Config> =
		StorageMap<_, Twox64Concat, T::AssetId, TokenListing, OptionQuery>;

	#[pallet::storage]
	#[pallet::getter(fn trade_enabled)]
	pub type TradeEnabled<T: Config> = StorageValue<_, bool, ValueQuery>;

	#[pallet::storage]
	#[pallet::getter(fn fee_bps)]
	pub type FeeBps<T: Config> = StorageValue<_, u32, ValueQuery>;

	#[pallet::storage]
	#[pallet::getter(fn internal_inventory)]
	pub type InternalInventory<T: Config> =
		StorageMap<_, Twox64Concat, T::AssetId, InternalInventoryParams, OptionQuery>;

	#[pallet::genesis_config]
	pub struct GenesisConfig<T: Config> {
		pub trade_enabled: bool,
		pub fee_bps: u32,
		/// Params: token, token decimals, traversal config
		pub listed_tokens: Vec<(T::AssetId, u32, TraversalConfig)>,
	}

	#[cfg(feature = "std")]
	impl<T: Config> Default for GenesisConfig<T> {
		fn default() -> Self {
			GenesisConfig {
				trade_enabled: false,
				fee_bps: 0,
				listed_tokens: vec![],
			}
		}
	}

	#[pallet::genesis_build]
	impl<T: Config> GenesisBuild<T> for GenesisConfig<T> {
		fn build(&self) {
			assert!(self.fee_bps < BPS, "fee must be below {} bps", BPS);
			TradeEnabled::<T>::set(self.trade_enabled);
			FeeBps::<T>::set(self.fee_bps);
			for (token, decimals, traversal) in self.listed_tokens.iter() {
				assert!(*token != T::BaseAsset::get(), "the base currency cannot be listed");
				assert!(*decimals <= MAX_DECIMALS, "token decimals above {}", MAX_DECIMALS);
				assert!(traversal.is_valid(), "invalid traversal config");
				TokenListings::<T>::insert(
					token,
					TokenListing {
						decimals: *decimals,
						traversal: *traversal,
						trade_enabled: true,
					},
				);
			}
		}
	}

	#[pallet::event]
	#[pallet::generate_deposit(pub(super) fn deposit_event)]
	pub enum Event<T: Config> {
		/// Params:
		/// 1. token
		/// 2. token decimals
		TokenListed(T::AssetId, u32),

		TokenDelisted(T::AssetId),

		TraversalConfigSet(T::AssetId, TraversalConfig),

		TokenTradeEnabledSet(T::AssetId, bool),

		TradeEnabledSet(bool),

		FeeBpsSet(u32),

		InternalInventoryParamsSet(T::AssetId, InternalInventoryParams),

		InternalInventoryParamsCleared(T::AssetId),
	}

	// Errors inform users that something went wrong.
	#[pallet::error]
	pub enum Error<T> {
		/// Bps at or above 10000, `max_take` above `max_traverse`, zero divisor or too many
		/// decimals.
		InvalidConfig,
		TokenNotListed,
		TokenAlreadyListed,
		/// The base currency can not be listed against itself.
		CannotListBaseAsset,
		ArithmeticOverflow,
	}

	#[pallet::hooks]
	impl<T: Config> Hooks<BlockNumberFor<T>> for Pallet<T> {}

	#[pallet::call]
	impl<T: Config> Pallet<T> {
		#[pallet::weight(195_000_000)]
		pub fn list_token(
			sender: OriginFor<T>,
			token: T::AssetId,
			decimals: u32,
			traversal: TraversalConfig,
		) -> DispatchResult {
			let who = ensure_root(sender)?;

			extrinsic_procedure(
				&who,
				|_who| {
					ensure!(
						token != T::BaseAsset::get(),
						Error::<T>::CannotListBaseAsset
					);
					ensure!(
						!TokenListings::<T>::contains_key(&token),
						Error::<T>::TokenAlreadyListed
					);
					ensure!(decimals <= MAX_DECIMALS, Error::<T>::InvalidConfig);
					ensure!(traversal.is_valid(), Error::<T>::InvalidConfig);
					Ok(())
				},
				|_who| {
					TokenListings::<T>::insert(
						&token,
						TokenListing {
							decimals,
							traversal,
							trade_enabled: true,
						},
					);
					Self::deposit_event(Event::TokenListed(token, decimals));
				},
			)
		}

		#[pallet::weight(195_000_000)]
		pub fn delist_token(sender: OriginFor<T>, token: T::AssetId) -> DispatchResult {
			let who = ensure_root(sender)?;

			extrinsic_procedure(
				&who,
				|_who| Self::check_listed(&token),
				|_who| {
					TokenListings::<T>::remove(&token);
					InternalInventory::<T>::remove(&token);
					Self::deposit_event(Event::TokenDelisted(token));
				},
			)
		}

		#[pallet::weight(195_000_000)]
		pub fn set_traversal_config(
			sender: OriginFor<T>,
			token: T::AssetId,
			traversal: TraversalConfig,
		) -> DispatchResult {
			let who = ensure_root(sender)?;

			extrinsic_procedure(
				&who,
				|_who| {
					Self::check_listed(&token)?;
					ensure!(traversal.is_valid(), Error::<T>::InvalidConfig);
					Ok(())
				},
				|_who| Self::update_traversal(token, traversal),
			)
		}

		/// Sets the walk limits of `token` and derives its minimum order size from `factors`.
		#[pallet::weight(195_000_000)]
		pub fn set_offer_limit_factors(
			sender: OriginFor<T>,
			token: T::AssetId,
			max_traverse: u32,
			max_take: u32,
			factors: OfferLimitFactors,
		) -> DispatchResult {
			let who = ensure_root(sender)?;

			extrinsic_procedure(
				&who,
				|_who| {
					Self::check_listed(&token)?;
					ensure!(max_take <= max_traverse, Error::<T>::InvalidConfig);
					ensure!(factors.divisor != 0, Error::<T>::InvalidConfig);
					ensure!(
						factors.min_order_size(max_traverse, max_take).is_some(),
						Error::<T>::ArithmeticOverflow
					);
					Ok(())
				},
				|_who| {
					let traversal = TraversalConfig {
						max_traverse,
						max_take,
						min_order_size: factors
							.min_order_size(max_traverse, max_take)
							.unwrap_or_default(),
					};
					Self::update_traversal(token, traversal);
				},
			)
		}

		#[pallet::weight(195_000_000)]
		pub fn set_token_trade_enabled(
			sender: OriginFor<T>,
			token: T::AssetId,
			enabled: bool,
		) -> DispatchResult {
			let who = ensure_root(sender)?;

			extrinsic_procedure(
				&who,
				|_who| Self::check_listed(&token),
				|_who| {
					TokenListings::<T>::mutate(&token, |listing| {
						if let Some(listing) = listing {
							listing.trade_enabled = enabled;
						}
					});
					Self::deposit_event(Event::TokenTradeEnabledSet(token, enabled));
				},
			)
		}

		#[pallet::weight(195_000_000)]
		pub fn enable_trade(sender: OriginFor<T>) -> DispatchResult {
			let who = ensure_root(sender)?;

			extrinsic_procedure(
				&who,
				|_who| Ok(()),
				|_who| {
					TradeEnabled::<T>::set(true);
					Self::deposit_event(Event::TradeEnabledSet(true));
				},
			)
		}

		#[pallet::weight(195_000_000)]
		pub fn disable_trade(sender: OriginFor<T>) -> DispatchResult {
			let who = ensure_root(sender)?;

			extrinsic_procedure(
				&who,
				|_who| Ok(()),
				|_who| {
					TradeEnabled::<T>::set(false);
					Self::deposit_event(Event::TradeEnabledSet(false));
				},
			)
		}

		#[pallet::weight(195_000_000)]
		pub fn set_fee_bps(sender: OriginFor<T>, fee_bps: u32) -> DispatchResult {
			let who = ensure_root(sender)?;

			extrinsic_procedure(
				&who,
				|_who| {
					ensure!(fee_bps < BPS, Error::<T>::InvalidConfig);
					Ok(())
				},
				|_who| {
					FeeBps::<T>::set(fee_bps);
					Self::deposit_event(Event::FeeBpsSet(fee_bps));
				},
			)
		}

		#[pallet::weight(195_000_000)]
		pub fn set_internal_inventory_params(
			sender: OriginFor<T>,
			token: T::AssetId,
			params: InternalInventoryParams,
		) -> DispatchResult {
			let who = ensure_root(sender)?;

			extrinsic_procedure(
				&who,
				|_who| {
					Self::check_listed(&token)?;
					ensure!(
						params.premium_bps < BPS && params.min_spread_bps < BPS,
						Error::<T>::InvalidConfig
					);
					Ok(())
				},
				|_who| {
					InternalInventory::<T>::insert(&token, params);
					Self::deposit_event(Event::InternalInventoryParamsSet(token, params));
				},
			)
		}

		#[pallet::weight(195_000_000)]
		pub fn clear_internal_inventory_params(
			sender: OriginFor<T>,
			token: T::AssetId,
		) -> DispatchResult {
			let who = ensure_root(sender)?;

			extrinsic_procedure(
				&who,
				|_who| Self::check_listed(&token),
				|_who| {
					InternalInventory::<T>::remove(&token);
					Self::deposit_event(Event::InternalInventoryParamsCleared(token));
				},
			)
		}
	}
}
