use crate::*;

/// What a reserve promised for a trade.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TradeQuote {
	pub src_qty: u128,
	pub src_decimals: u32,
	pub dest_decimals: u32,
	/// Quoted rate in `PRECISION` units.
	pub rate: u128,
	/// Upper bound of the destination amount the trader accepts.
	pub max_dest_amount: u128,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettlementError {
	/// The quote itself can not be converted to a destination amount.
	InvalidQuote,
	/// The router delivered less than the quote implies.
	BelowQuotedAmount { expected: u128, realized: u128 },
	/// The router delivered more than the trader allowed.
	AboveMaxDestAmount { max_dest_amount: u128, realized: u128 },
}

/// Executes a quoted trade and reports the destination amount actually delivered.
pub trait TradeRouter {
	fn settle(&self, quote: &TradeQuote) -> u128;
}

/// Destination amount a quote entitles the trader to, capped by `max_dest_amount`.
pub fn expected_dest_amount(quote: &TradeQuote) -> Result<u128, SettlementError> {
	let amount = calc_dst_qty(
		quote.src_qty,
		quote.src_decimals,
		quote.dest_decimals,
		quote.rate,
	)
	.ok_or(SettlementError::InvalidQuote)?;
	Ok(amount.min(quote.max_dest_amount))
}

pub fn ensure_settlement_integrity(
	quote: &TradeQuote,
	realized: u128,
) -> Result<u128, SettlementError> {
	let expected = expected_dest_amount(quote)?;
	if realized < expected {
		log::warn!(
			"settlement delivered {} while {} was quoted",
			realized,
			expected
		);
		return Err(SettlementError::BelowQuotedAmount { expected, realized });
	}
	if realized > quote.max_dest_amount {
		log::warn!(
			"settlement delivered {} above the max destination amount {}",
			realized,
			quote.max_dest_amount
		);
		return Err(SettlementError::AboveMaxDestAmount {
			max_dest_amount: quote.max_dest_amount,
			realized,
		});
	}
	Ok(realized)
}

/// Settles `quote` through `router` and rejects the outcome if it breaks the quote.
pub fn settle_with<R: TradeRouter>(router: &R, quote: &TradeQuote) -> Result<u128, SettlementError> {
	ensure_settlement_integrity(quote, router.settle(quote))
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::{rngs::StdRng, Rng, SeedableRng};

	struct Honest;

	impl TradeRouter for Honest {
		fn settle(&self, quote: &TradeQuote) -> u128 {
			expected_dest_amount(quote).unwrap()
		}
	}

	/// Keeps `bps` of the output for itself, at least one unit.
	struct FeeSkimming {
		bps: u32,
	}

	impl TradeRouter for FeeSkimming {
		fn settle(&self, quote: &TradeQuote) -> u128 {
			let expected = expected_dest_amount(quote).unwrap();
			let skimmed = fee_on_gross_amount(expected, self.bps).max(1);
			expected.saturating_sub(skimmed)
		}
	}

	/// Reports the amount of a slightly worse rate than the quoted one.
	struct WrongActualAmount;

	impl TradeRouter for WrongActualAmount {
		fn settle(&self, quote: &TradeQuote) -> u128 {
			let worse = TradeQuote {
				rate: quote.rate / 2,
				..*quote
			};
			expected_dest_amount(&worse).unwrap()
		}
	}

	/// Ignores the trader's max destination amount.
	struct NoMaxDestCheck;

	impl TradeRouter for NoMaxDestCheck {
		fn settle(&self, quote: &TradeQuote) -> u128 {
			calc_dst_qty(
				quote.src_qty,
				quote.src_decimals,
				quote.dest_decimals,
				quote.rate,
			)
			.unwrap()
		}
	}

	/// Gives back a bonus, never above the max destination amount.
	struct Generous {
		bonus: u128,
	}

	impl TradeRouter for Generous {
		fn settle(&self, quote: &TradeQuote) -> u128 {
			let expected = expected_dest_amount(quote).unwrap();
			expected
				.saturating_add(self.bonus)
				.min(quote.max_dest_amount)
		}
	}

	fn random_quote(rng: &mut StdRng) -> TradeQuote {
		let src_decimals = rng.gen_range(0, MAX_DECIMALS + 1);
		let dest_decimals = rng.gen_range(0, MAX_DECIMALS + 1);
		TradeQuote {
			src_qty: rng.gen_range(1_000, 1_000_000) * pow10(src_decimals).unwrap(),
			src_decimals,
			dest_decimals,
			rate: rng.gen_range(PRECISION / 1_000, 1_000 * PRECISION),
			max_dest_amount: u128::MAX,
		}
	}

	/// A quote whose max destination amount is below the rate-implied amount.
	fn capped(quote: TradeQuote) -> TradeQuote {
		let uncapped = expected_dest_amount(&quote).unwrap();
		TradeQuote {
			max_dest_amount: uncapped / 2,
			..quote
		}
	}

	#[test]
	fn honest_router_is_accepted() {
		let mut rng = StdRng::seed_from_u64(7);
		for _ in 0..200 {
			let quote = random_quote(&mut rng);
			assert!(settle_with(&Honest, &quote).is_ok());
			assert!(settle_with(&Honest, &capped(quote)).is_ok());
		}
	}

	#[test]
	fn generous_router_is_accepted() {
		let mut rng = StdRng::seed_from_u64(11);
		for _ in 0..200 {
			let quote = random_quote(&mut rng);
			let router = Generous {
				bonus: rng.gen_range(1, 1_000),
			};
			let realized = settle_with(&router, &quote).unwrap();
			assert!(realized > expected_dest_amount(&quote).unwrap());
			assert!(settle_with(&router, &capped(quote)).is_ok());
		}
	}

	#[test]
	fn fee_skimming_router_is_rejected() {
		let mut rng = StdRng::seed_from_u64(13);
		for _ in 0..200 {
			let quote = random_quote(&mut rng);
			let router = FeeSkimming {
				bps: rng.gen_range(1, 100),
			};
			assert!(matches!(
				settle_with(&router, &quote),
				Err(SettlementError::BelowQuotedAmount { .. })
			));
		}
	}

	#[test]
	fn wrong_actual_amount_router_is_rejected() {
		let mut rng = StdRng::seed_from_u64(17);
		for _ in 0..200 {
			let quote = random_quote(&mut rng);
			assert!(matches!(
				settle_with(&WrongActualAmount, &quote),
				Err(SettlementError::BelowQuotedAmount { .. })
			));
		}
	}

	#[test]
	fn no_max_dest_check_router_is_rejected() {
		let mut rng = StdRng::seed_from_u64(19);
		for _ in 0..200 {
			let quote = capped(random_quote(&mut rng));
			assert!(matches!(
				settle_with(&NoMaxDestCheck, &quote),
				Err(SettlementError::AboveMaxDestAmount { .. })
			));
		}
	}

	#[test]
	fn invalid_quote_is_rejected() {
		let quote = TradeQuote {
			src_qty: MAX_QTY + 1,
			src_decimals: 18,
			dest_decimals: 18,
			rate: PRECISION,
			max_dest_amount: u128::MAX,
		};
		assert_eq!(
			ensure_settlement_integrity(&quote, 0),
			Err(SettlementError::InvalidQuote)
		);
	}
}
