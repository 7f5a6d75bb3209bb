use crate as pallet_order_book_reserve;
use frame_support::traits::Everything;
use frame_support::{pallet_prelude::GenesisBuild, parameter_types};
use frame_system as system;
use order_book_interface::{Offer, OfferBookProvider, ReserveInventory, TradeSide};
use sp_core::H256;
use sp_runtime::{
	testing::Header,
	traits::{BlakeTwo256, IdentityLookup},
};
use std::cell::RefCell;
use std::collections::BTreeMap;

pub const BASE: u32 = 0;
pub const TOKEN: u32 = 1;
pub const OTHER_TOKEN: u32 = 2;
pub const TOKEN_DECIMALS: u32 = 18;

type UncheckedExtrinsic = frame_system::mocking::MockUncheckedExtrinsic<Test>;
type Block = frame_system::mocking::MockBlock<Test>;

// Configure a mock runtime to test the pallet.
frame_support::construct_runtime!(
	pub enum Test where
		Block = Block,
		NodeBlock = Block,
		UncheckedExtrinsic = UncheckedExtrinsic,
	{
		System: frame_system::{Pallet, Call, Config, Storage, Event<T>},
		OrderBookReserve: pallet_order_book_reserve::{Pallet, Call, Storage, Event<T>},
	}
);

parameter_types! {
	pub const BlockHashCount: u64 = 250;
	pub const SS58Prefix: u8 = 42;
	pub const BaseAsset: u32 = BASE;
}

impl system::Config for Test {
	type BaseCallFilter = Everything;
	type BlockWeights = ();
	type BlockLength = ();
	type DbWeight = ();
	type Origin = Origin;
	type Call = Call;
	type Index = u64;
	type BlockNumber = u64;
	type Hash = H256;
	type Hashing = BlakeTwo256;
	type AccountId = u64;
	type Lookup = IdentityLookup<Self::AccountId>;
	type Header = Header;
	type Event = Event;
	type BlockHashCount = BlockHashCount;
	type Version = ();
	type PalletInfo = PalletInfo;
	type AccountData = ();
	type OnNewAccount = ();
	type OnKilledAccount = ();
	type SystemWeightInfo = ();
	type SS58Prefix = SS58Prefix;
	type OnSetCode = ();
}

thread_local! {
	static BOOK: RefCell<BTreeMap<(u32, bool), Vec<Offer>>> = RefCell::new(BTreeMap::new());
	static TOKEN_BALANCES: RefCell<BTreeMap<u32, u128>> = RefCell::new(BTreeMap::new());
	static BASE_BALANCE: RefCell<u128> = RefCell::new(0);
}

fn book_key(token: u32, side: TradeSide) -> (u32, bool) {
	(token, side == TradeSide::Buy)
}

/// Replaces the offers a trader on `side` of `token` can take, best first.
pub fn set_offers(token: u32, side: TradeSide, offers: Vec<Offer>) {
	BOOK.with(|book| {
		book.borrow_mut().insert(book_key(token, side), offers);
	});
}

pub fn set_token_balance(token: u32, balance: u128) {
	TOKEN_BALANCES.with(|balances| {
		balances.borrow_mut().insert(token, balance);
	});
}

pub fn set_base_balance(balance: u128) {
	BASE_BALANCE.with(|base| *base.borrow_mut() = balance);
}

pub struct MockOfferBook;

impl OfferBookProvider<u32> for MockOfferBook {
	fn best_offers(token: &u32, side: TradeSide, max_count: u32) -> Vec<Offer> {
		BOOK.with(|book| {
			book.borrow()
				.get(&book_key(*token, side))
				.map(|offers| offers.iter().take(max_count as usize).cloned().collect())
				.unwrap_or_default()
		})
	}
}

pub struct MockInventory;

impl ReserveInventory<u32> for MockInventory {
	fn token_balance(token: &u32) -> u128 {
		TOKEN_BALANCES.with(|balances| balances.borrow().get(token).cloned().unwrap_or_default())
	}

	fn base_balance() -> u128 {
		BASE_BALANCE.with(|base| *base.borrow())
	}
}

impl pallet_order_book_reserve::Config for Test {
	type Event = Event;
	type AssetId = u32;
	type BaseAsset = BaseAsset;
	type OfferBook = MockOfferBook;
	type Inventory = MockInventory;
}

// Build genesis storage according to the mock runtime.
pub fn new_test_ext() -> sp_io::TestExternalities {
	let mut t = system::GenesisConfig::default()
		.build_storage::<Test>()
		.unwrap();

	pallet_order_book_reserve::GenesisConfig::<Test> {
		trade_enabled: true,
		fee_bps: 0,
		listed_tokens: vec![],
	}
	.assimilate_storage(&mut t)
	.unwrap();

	let mut ext = sp_io::TestExternalities::new(t);
	ext.execute_with(|| System::set_block_number(1));
	ext
}
