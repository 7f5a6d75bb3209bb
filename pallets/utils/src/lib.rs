#![cfg_attr(not(feature = "std"), no_std)]

pub use functions::*;
pub use settlement::*;

mod functions;
mod settlement;

/// Unit of every quoted rate.
pub const PRECISION: u128 = 1_000_000_000_000_000_000;
/// Largest quantity (in smallest units) the reserves accept.
pub const MAX_QTY: u128 = 10_000_000_000_000_000_000_000_000_000;
/// Largest rate the reserves quote, `10^6` in `PRECISION` units.
pub const MAX_RATE: u128 = PRECISION * 1_000_000;
/// Decimals of the base currency.
pub const BASE_DECIMALS: u32 = 18;
pub const MAX_DECIMALS: u32 = 18;
/// One hundred percent expressed in basis points.
pub const BPS: u32 = 10_000;
