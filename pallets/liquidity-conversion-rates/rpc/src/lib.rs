use codec::Codec;
use jsonrpc_core::{Error as RpcError, ErrorCode, Result};
use jsonrpc_derive::rpc;
use liquidity_conversion_rates_interface::TradeDirection;
use liquidity_conversion_rates_runtime_api::LiquidityConversionRatesApi as LiquidityConversionRatesRuntimeApi;
use node_primitives::Balance;
use sp_api::ProvideRuntimeApi;
use sp_blockchain::HeaderBackend;
use sp_runtime::{generic::BlockId, traits::Block as BlockT};
use std::sync::Arc;

mod types;

pub use types::*;

const RUNTIME_ERROR: i64 = 1;

#[rpc]
pub trait LiquidityConversionRatesApi<BlockHash, AssetId> {
	/// Rate in 10^18 units for trading `qty`, "0" if no trade is possible.
	#[rpc(name = "lcr_getRate")]
	fn get_rate(
		&self,
		token: AssetId,
		direction: TradeDirection,
		qty: Price,
		at: Option<BlockHash>,
	) -> Result<Price>;

	#[rpc(name = "lcr_getRateWithE")]
	fn get_rate_with_e(
		&self,
		token: AssetId,
		direction: TradeDirection,
		qty: Price,
		e: Price,
		at: Option<BlockHash>,
	) -> Result<Price>;

	/// Returns
	/// 1. buy rate of an infinitesimal trade
	/// 2. sell rate of an infinitesimal trade
	/// 3. marginal price at the current curve position
	#[rpc(name = "lcr_zeroQuantityRates")]
	fn zero_quantity_rates(&self, at: Option<BlockHash>) -> Result<(Price, Price, Price)>;

	#[rpc(name = "lcr_collectedFees")]
	fn collected_fees(&self, at: Option<BlockHash>) -> Result<Price>;

	#[rpc(name = "lcr_curvePosition")]
	fn curve_position(&self, at: Option<BlockHash>) -> Result<Price>;
}

pub struct LiquidityConversionRatesApiImpl<C, M> {
	client: Arc<C>,
	_marker: std::marker::PhantomData<M>,
}

impl<C, M> LiquidityConversionRatesApiImpl<C, M> {
	pub fn new(client: Arc<C>) -> Self {
		Self {
			client,
			_marker: Default::default(),
		}
	}
}

/// Converts a runtime trap into an RPC error.
fn runtime_error_into_rpc_err(err: impl std::fmt::Debug) -> RpcError {
	RpcError {
		code: ErrorCode::ServerError(RUNTIME_ERROR),
		message: "Runtime error".into(),
		data: Some(format!("{:?}", err).into()),
	}
}

impl<C, Block, AssetId> LiquidityConversionRatesApi<<Block as BlockT>::Hash, AssetId>
	for LiquidityConversionRatesApiImpl<C, Block>
where
	Block: BlockT,
	C: Send + Sync + 'static + ProvideRuntimeApi<Block> + HeaderBackend<Block>,
	C::Api: LiquidityConversionRatesRuntimeApi<Block, AssetId>,
	AssetId: Codec + Send + Sync + 'static,
{
	fn get_rate(
		&self,
		token: AssetId,
		direction: TradeDirection,
		qty: Price,
		at: Option<<Block as BlockT>::Hash>,
	) -> Result<Price> {
		let api = self.client.runtime_api();
		let at = BlockId::hash(at.unwrap_or_else(||
			// If the block hash is not supplied assume the best block.
			self.client.info().best_hash));

		let result: Balance = api
			.get_rate(&at, token, direction, qty.0)
			.map_err(runtime_error_into_rpc_err)?;
		Ok(Price(result))
	}

	fn get_rate_with_e(
		&self,
		token: AssetId,
		direction: TradeDirection,
		qty: Price,
		e: Price,
		at: Option<<Block as BlockT>::Hash>,
	) -> Result<Price> {
		let api = self.client.runtime_api();
		let at = BlockId::hash(at.unwrap_or_else(||
			// If the block hash is not supplied assume the best block.
			self.client.info().best_hash));

		let result: Balance = api
			.get_rate_with_e(&at, token, direction, qty.0, e.0)
			.map_err(runtime_error_into_rpc_err)?;
		Ok(Price(result))
	}

	fn zero_quantity_rates(
		&self,
		at: Option<<Block as BlockT>::Hash>,
	) -> Result<(Price, Price, Price)> {
		let api = self.client.runtime_api();
		let at = BlockId::hash(at.unwrap_or_else(||
			// If the block hash is not supplied assume the best block.
			self.client.info().best_hash));

		let (buy, sell): (Balance, Balance) = api
			.zero_quantity_rates(&at)
			.map_err(runtime_error_into_rpc_err)?;
		let e: Balance = api
			.curve_position(&at)
			.map_err(runtime_error_into_rpc_err)?;
		let price: Balance = api
			.price_at(&at, e)
			.map_err(runtime_error_into_rpc_err)?;
		Ok((Price(buy), Price(sell), Price(price)))
	}

	fn collected_fees(&self, at: Option<<Block as BlockT>::Hash>) -> Result<Price> {
		let api = self.client.runtime_api();
		let at = BlockId::hash(at.unwrap_or_else(||
			// If the block hash is not supplied assume the best block.
			self.client.info().best_hash));

		let result: Balance = api
			.collected_fees(&at)
			.map_err(runtime_error_into_rpc_err)?;
		Ok(Price(result))
	}

	fn curve_position(&self, at: Option<<Block as BlockT>::Hash>) -> Result<Price> {
		let api = self.client.runtime_api();
		let at = BlockId::hash(at.unwrap_or_else(||
			// If the block hash is not supplied assume the best block.
			self.client.info().best_hash));

		let result: Balance = api
			.curve_position(&at)
			.map_err(runtime_error_into_rpc_err)?;
		Ok(Price(result))
	}
}
