use super::*;

/// Curve and trading parameters set by the administrator.
#[derive(Encode, Decode, Clone, Copy, PartialEq, Eq, RuntimeDebug, TypeInfo, Default)]
pub struct LiquidityParams {
	/// Curve steepness, fixed point with `precision_bits` fractional bits.
	pub r: u128,
	/// Price at `e = 0` (base per token), same fixed point as `r`.
	pub p_min: u128,
	pub precision_bits: u32,
	/// Largest base amount (smallest units) a single buy may pay in.
	pub max_cap_buy: u128,
	/// Largest base amount (smallest units) a single sell may pay out.
	pub max_cap_sell: u128,
	pub fee_bps: u32,
	pub max_buy_rate: u128,
	pub min_buy_rate: u128,
	pub max_sell_rate: u128,
	pub min_sell_rate: u128,
}

impl LiquidityParams {
	pub fn rate_bounds(&self, direction: TradeDirection) -> (u128, u128) {
		match direction {
			TradeDirection::Buy => (self.min_buy_rate, self.max_buy_rate),
			TradeDirection::Sell => (self.min_sell_rate, self.max_sell_rate),
		}
	}

	pub fn curve<C: LiquidityCurve>(&self) -> C {
		C::new(self.r, self.p_min, self.precision_bits)
	}
}

/// The token the curve prices against the base currency.
#[derive(Encode, Decode, Clone, Copy, PartialEq, Eq, RuntimeDebug, TypeInfo)]
pub struct ConversionTokenInfo<AssetId> {
	pub token: AssetId,
	pub decimals: u32,
}

/// Why a rate query produced the zero rate.
#[derive(Clone, Copy, PartialEq, Eq, RuntimeDebug)]
pub enum RateUnavailable {
	NotConfigured,
	WrongToken,
	QuantityTooLarge,
	CapExceeded,
	OutOfBounds,
	Formula(CurveError),
}

impl From<CurveError> for RateUnavailable {
	fn from(e: CurveError) -> Self {
		RateUnavailable::Formula(e)
	}
}

/// State changes a reported imbalance leads to.
#[derive(Clone, Copy, PartialEq, Eq, RuntimeDebug)]
pub struct ImbalanceOutcome {
	pub fee: u128,
	pub curve_position: u128,
}
