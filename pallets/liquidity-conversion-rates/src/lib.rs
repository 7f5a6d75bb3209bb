#![cfg_attr(not(feature = "std"), no_std)]
#![allow(clippy::too_many_arguments)]

#[cfg(test)]
mod mock;

mod functions;
mod rpc;
mod types;

pub use liquidity_conversion_rates::*;
pub use types::*;

use frame_support::pallet_prelude::*;
use frame_system::pallet_prelude::*;
use liquidity_conversion_rates_interface::{
	ConversionRatesOperation, CurveError, LiquidityCurve, TradeDirection,
};
use liquidity_formula::MAX_PRECISION_BITS;
use reserve_utils::{extrinsic_procedure, BPS, MAX_DECIMALS, MAX_QTY};
use sp_runtime::{traits::MaybeSerializeDeserialize, RuntimeDebug};
use sp_std::prelude::*;

#[frame_support::pallet]
pub mod liquidity_conversion_rates {
	use super::*;

	/// Configure the pallet by specifying the parameters and types on which it depends.
	#[pallet::config]
	pub trait Config: frame_system::Config {
		/// Because this pallet emits events, it depends on the runtime's definition of an event.
		type Event: From<Event<Self>> + IsType<<Self as frame_system::Config>::Event>;
		/// Identifier of the assets traded against the base currency.
		type AssetId: Parameter + Member + Copy + Default + MaybeSerializeDeserialize;
		/// Curve the rates are computed with.
		type Curve: LiquidityCurve;
	}

	#[pallet::pallet]
	#[pallet::generate_store(pub(super) trait Store)]
	pub struct Pallet<T>(_);

	#[pallet::storage]
	#[pallet::getter(fn liquidity_params)]
	pub type CurveParams<T: Config> = StorageValue<_, LiquidityParams, OptionQuery>;

	#[pallet::storage]
	#[pallet::getter(fn conversion_token)]
	pub type ConversionToken<T: Config> =
		StorageValue<_, ConversionTokenInfo<T::AssetId>, OptionQuery>;

	/// The only account allowed to report imbalances.
	#[pallet::storage]
	#[pallet::getter(fn reserve_account)]
	pub type ReserveAccount<T: Config> = StorageValue<_, T::AccountId, OptionQuery>;

	/// Curve position `e` in base currency smallest units.
	#[pallet::storage]
	#[pallet::getter(fn curve_position)]
	pub type CurvePosition<T: Config> = StorageValue<_, u128, ValueQuery>;

	/// Fees accrued since the last reset, in token smallest units.
	#[pallet::storage]
	#[pallet::getter(fn collected_fees)]
	pub type CollectedFees<T: Config> = StorageValue<_, u128, ValueQuery>;

	#[pallet::genesis_config]
	pub struct GenesisConfig<T: Config> {
		pub reserve_account: Option<T::AccountId>,
		pub conversion_token: Option<(T::AssetId, u32)>,
		pub curve_position: u128,
	}

	#[cfg(feature = "std")]
	impl<T: Config> Default for GenesisConfig<T> {
		fn default() -> Self {
			GenesisConfig {
				reserve_account: None,
				conversion_token: None,
				curve_position: 0,
			}
		}
	}

	#[pallet::genesis_build]
	impl<T: Config> GenesisBuild<T> for GenesisConfig<T> {
		fn build(&self) {
			if let Some(ref account) = self.reserve_account {
				ReserveAccount::<T>::set(Some(account.clone()));
			}
			if let Some((token, decimals)) = self.conversion_token {
				assert!(decimals <= MAX_DECIMALS, "token decimals above {}", MAX_DECIMALS);
				ConversionToken::<T>::set(Some(ConversionTokenInfo { token, decimals }));
			}
			assert!(self.curve_position <= MAX_QTY, "curve position above {}", MAX_QTY);
			CurvePosition::<T>::set(self.curve_position);
		}
	}

	#[pallet::event]
	#[pallet::generate_deposit(pub(super) fn deposit_event)]
	pub enum Event<T: Config> {
		LiquidityParamsSet(LiquidityParams),

		/// Params:
		/// 1. token
		/// 2. token decimals
		ConversionTokenSet(T::AssetId, u32),

		ReserveAccountSet(T::AccountId),

		CurvePositionSet(u128),

		/// Params:
		/// 1. token
		/// 2. reserve token delta, positive if the reserve received tokens
		/// 3. fee collected
		/// 4. curve position after the trade
		ImbalanceRecorded(T::AssetId, i128, u128, u128),

		/// Params:
		/// 1. fees collected before the reset
		CollectedFeesReset(u128),
	}

	// Errors inform users that something went wrong.
	#[pallet::error]
	pub enum Error<T> {
		/// Fee, rate bounds or curve parameters are not acceptable.
		InvalidConfig,
		/// Caller is not the reserve account.
		Unauthorized,
		ArithmeticOverflow,
		/// Curve parameters, conversion token or reserve account are not set yet.
		NotConfigured,
		/// The token is not the conversion token of this curve.
		WrongToken,
		/// The trade would take the curve beyond its asymptote.
		CurveDepleted,
	}

	#[pallet::hooks]
	impl<T: Config> Hooks<BlockNumberFor<T>> for Pallet<T> {}

	#[pallet::call]
	impl<T: Config> Pallet<T> {
		#[pallet::weight(195_000_000)]
		pub fn set_liquidity_params(
			sender: OriginFor<T>,
			r: u128,
			p_min: u128,
			precision_bits: u32,
			max_cap_buy: u128,
			max_cap_sell: u128,
			fee_bps: u32,
			max_sell_rate: u128,
			min_sell_rate: u128,
		) -> DispatchResult {
			let who = ensure_root(sender)?;

			extrinsic_procedure(
				&who,
				|_who| {
					Self::new_liquidity_params(
						r,
						p_min,
						precision_bits,
						max_cap_buy,
						max_cap_sell,
						fee_bps,
						max_sell_rate,
						min_sell_rate,
					)?;
					Ok(())
				},
				|_who| match Self::new_liquidity_params(
					r,
					p_min,
					precision_bits,
					max_cap_buy,
					max_cap_sell,
					fee_bps,
					max_sell_rate,
					min_sell_rate,
				) {
					Ok(params) => {
						CurveParams::<T>::set(Some(params));
						Self::deposit_event(Event::LiquidityParamsSet(params));
					}
					Err(e) => {
						// should not happen, checked above
						log::error!("set liquidity params failed: {:?}", e);
					}
				},
			)
		}

		#[pallet::weight(195_000_000)]
		pub fn set_conversion_token(
			sender: OriginFor<T>,
			token: T::AssetId,
			decimals: u32,
		) -> DispatchResult {
			let who = ensure_root(sender)?;

			extrinsic_procedure(
				&who,
				|_who| {
					ensure!(decimals <= MAX_DECIMALS, Error::<T>::InvalidConfig);
					Ok(())
				},
				|_who| {
					ConversionToken::<T>::set(Some(ConversionTokenInfo { token, decimals }));
					Self::deposit_event(Event::ConversionTokenSet(token, decimals));
				},
			)
		}

		#[pallet::weight(195_000_000)]
		pub fn set_reserve_account(
			sender: OriginFor<T>,
			account: T::AccountId,
		) -> DispatchResult {
			let who = ensure_root(sender)?;

			extrinsic_procedure(
				&who,
				|_who| Ok(()),
				|_who| {
					ReserveAccount::<T>::set(Some(account.clone()));
					Self::deposit_event(Event::ReserveAccountSet(account.clone()));
				},
			)
		}

		/// Resynchronizes the curve position, e.g. with the reserve's actual base balance.
		#[pallet::weight(195_000_000)]
		pub fn set_curve_position(sender: OriginFor<T>, e: u128) -> DispatchResult {
			let who = ensure_root(sender)?;

			extrinsic_procedure(
				&who,
				|_who| {
					ensure!(e <= MAX_QTY, Error::<T>::ArithmeticOverflow);
					Ok(())
				},
				|_who| {
					CurvePosition::<T>::set(e);
					Self::deposit_event(Event::CurvePositionSet(e));
				},
			)
		}

		/// The two block numbers are accepted for interface compatibility and ignored.
		#[pallet::weight(195_000_000)]
		pub fn record_imbalance(
			sender: OriginFor<T>,
			token: T::AssetId,
			reserve_token_delta: i128,
			rate_update_block: T::BlockNumber,
			current_block: T::BlockNumber,
		) -> DispatchResult {
			let who = ensure_signed(sender)?;

			<Self as ConversionRatesOperation>::record_imbalance(
				&who,
				token,
				reserve_token_delta,
				rate_update_block,
				current_block,
			)
		}

		#[pallet::weight(195_000_000)]
		pub fn reset_collected_fees(sender: OriginFor<T>) -> DispatchResult {
			let who = ensure_root(sender)?;

			extrinsic_procedure(
				&who,
				|_who| Ok(()),
				|_who| {
					let fees = CollectedFees::<T>::take();
					Self::deposit_event(Event::CollectedFeesReset(fees));
				},
			)
		}
	}
}
