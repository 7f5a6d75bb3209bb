use codec::Codec;
use jsonrpc_core::{Error as RpcError, ErrorCode, Result};
use jsonrpc_derive::rpc;
use node_primitives::{Balance, BlockNumber};
use order_book_interface::TradeSide;
use order_book_reserve_runtime_api::OrderBookReserveApi as OrderBookReserveRuntimeApi;
use sp_api::ProvideRuntimeApi;
use sp_blockchain::HeaderBackend;
use sp_runtime::{generic::BlockId, traits::Block as BlockT};
use std::sync::Arc;

mod types;

pub use types::*;

const RUNTIME_ERROR: i64 = 1;

#[rpc]
pub trait OrderBookReserveApi<BlockHash, AssetId> {
	#[rpc(name = "orderBook_showBestOffers")]
	fn show_best_offers(
		&self,
		token: AssetId,
		side: TradeSide,
		requested: String,
		at: Option<BlockHash>,
	) -> Result<BestOffers>;

	/// Rate in 10^18 units for exchanging `src_qty`, "0" if no trade is possible.
	#[rpc(name = "orderBook_getConversionRate")]
	fn get_conversion_rate(
		&self,
		src: AssetId,
		dest: AssetId,
		src_qty: String,
		block_number: BlockNumber,
		at: Option<BlockHash>,
	) -> Result<String>;

	#[rpc(name = "orderBook_estimateDestAmount")]
	fn estimate_dest_amount(
		&self,
		src: AssetId,
		dest: AssetId,
		src_qty: String,
		block_number: BlockNumber,
		at: Option<BlockHash>,
	) -> Result<String>;

	#[rpc(name = "orderBook_listedTokens")]
	fn listed_tokens(&self, at: Option<BlockHash>) -> Result<Vec<(AssetId, u32, bool)>>;

	#[rpc(name = "orderBook_topOfBook")]
	fn top_of_book(&self, token: AssetId, at: Option<BlockHash>) -> Result<TopOfBook>;
}

pub struct OrderBookReserveApiImpl<C, M> {
	client: Arc<C>,
	_marker: std::marker::PhantomData<M>,
}

impl<C, M> OrderBookReserveApiImpl<C, M> {
	pub fn new(client: Arc<C>) -> Self {
		Self {
			client,
			_marker: Default::default(),
		}
	}
}

fn runtime_error_into_rpc_err(err: impl std::fmt::Debug) -> RpcError {
	RpcError {
		code: ErrorCode::ServerError(RUNTIME_ERROR),
		message: "Runtime error".into(),
		data: Some(format!("{:?}", err).into()),
	}
}

fn parse_amount(value: &str) -> Result<Balance> {
	value
		.parse()
		.map_err(|e| RpcError::invalid_params(format!("invalid amount {}: {}", value, e)))
}

impl<C, Block, AssetId> OrderBookReserveApi<<Block as BlockT>::Hash, AssetId>
	for OrderBookReserveApiImpl<C, Block>
where
	Block: BlockT,
	C: Send + Sync + 'static + ProvideRuntimeApi<Block> + HeaderBackend<Block>,
	C::Api: OrderBookReserveRuntimeApi<Block, AssetId>,
	AssetId: Codec + Send + Sync + 'static,
{
	fn show_best_offers(
		&self,
		token: AssetId,
		side: TradeSide,
		requested: String,
		at: Option<<Block as BlockT>::Hash>,
	) -> Result<BestOffers> {
		let requested = parse_amount(&requested)?;
		let api = self.client.runtime_api();
		let at = BlockId::hash(at.unwrap_or_else(||
			// If the block hash is not supplied assume the best block.
			self.client.info().best_hash));

		let (total_dest, total_dest_whole, offer_ids, total_src) = api
			.show_best_offers(&at, token, side, requested)
			.map_err(runtime_error_into_rpc_err)?;
		Ok(BestOffers {
			total_dest,
			total_dest_whole,
			offer_ids,
			total_src,
		})
	}

	fn get_conversion_rate(
		&self,
		src: AssetId,
		dest: AssetId,
		src_qty: String,
		block_number: BlockNumber,
		at: Option<<Block as BlockT>::Hash>,
	) -> Result<String> {
		let src_qty = parse_amount(&src_qty)?;
		let api = self.client.runtime_api();
		let at = BlockId::hash(at.unwrap_or_else(||
			// If the block hash is not supplied assume the best block.
			self.client.info().best_hash));

		let rate: Balance = api
			.get_conversion_rate(&at, src, dest, src_qty, block_number)
			.map_err(runtime_error_into_rpc_err)?;
		Ok(rate.to_string())
	}

	fn estimate_dest_amount(
		&self,
		src: AssetId,
		dest: AssetId,
		src_qty: String,
		block_number: BlockNumber,
		at: Option<<Block as BlockT>::Hash>,
	) -> Result<String> {
		let src_qty = parse_amount(&src_qty)?;
		let api = self.client.runtime_api();
		let at = BlockId::hash(at.unwrap_or_else(||
			// If the block hash is not supplied assume the best block.
			self.client.info().best_hash));

		let amount: Balance = api
			.estimate_dest_amount(&at, src, dest, src_qty, block_number)
			.map_err(runtime_error_into_rpc_err)?;
		Ok(amount.to_string())
	}

	fn listed_tokens(
		&self,
		at: Option<<Block as BlockT>::Hash>,
	) -> Result<Vec<(AssetId, u32, bool)>> {
		let api = self.client.runtime_api();
		let at = BlockId::hash(at.unwrap_or_else(||
			// If the block hash is not supplied assume the best block.
			self.client.info().best_hash));

		api.listed_tokens(&at).map_err(runtime_error_into_rpc_err)
	}

	fn top_of_book(
		&self,
		token: AssetId,
		at: Option<<Block as BlockT>::Hash>,
	) -> Result<TopOfBook> {
		let api = self.client.runtime_api();
		let at = BlockId::hash(at.unwrap_or_else(||
			// If the block hash is not supplied assume the best block.
			self.client.info().best_hash));

		let (buy, sell) = api
			.top_of_book(&at, token)
			.map_err(runtime_error_into_rpc_err)?;
		Ok(TopOfBook {
			buy: buy.map(Into::into),
			sell: sell.map(Into::into),
		})
	}
}
