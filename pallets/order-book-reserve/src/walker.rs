use super::*;
use reserve_utils::{mul_div, pow10};

struct Fill {
	position: u32,
	offer: Offer,
	src: u128,
	dest: u128,
}

struct Walk {
	side: TradeSide,
	remaining: u128,
	min_order_size: u128,
	fills: Vec<Fill>,
	/// Book position and offer of the biggest offer skipped so far.
	biggest_skip: Option<(u32, Offer)>,
	position: u32,
}

impl Walk {
	fn new(side: TradeSide, requested: u128, min_order_size: u128) -> Self {
		Walk {
			side,
			remaining: requested,
			min_order_size,
			fills: Vec::new(),
			biggest_skip: None,
			position: 0,
		}
	}

	/// Base currency size of taking `src` for `dest`.
	fn base_size(&self, src: u128, dest: u128) -> u128 {
		match self.side {
			TradeSide::Buy => src,
			TradeSide::Sell => dest,
		}
	}

	fn worth_taking(&self, src: u128, dest: u128) -> bool {
		dest > 0 && self.base_size(src, dest) >= self.min_order_size
	}

	fn is_done(&self, max_take: u32) -> bool {
		self.remaining == 0 || self.fills.len() >= max_take as usize
	}

	fn inspect(&mut self, offer: Offer) {
		let position = self.position;
		self.position += 1;
		if offer.buy_amount == 0 || offer.pay_amount == 0 {
			return;
		}

		// a full take when the offer fits, a partial one closing the request otherwise
		let src = offer.buy_amount.min(self.remaining);
		let dest = dest_amount(&offer, src);
		if self.worth_taking(src, dest) {
			self.remaining -= src;
			self.fills.push(Fill {
				position,
				offer,
				src,
				dest,
			});
		} else {
			self.remember_skip(position, offer);
		}
	}

	fn remember_skip(&mut self, position: u32, offer: Offer) {
		match self.biggest_skip {
			Some((_, ref biggest)) if biggest.buy_amount >= offer.buy_amount => {}
			_ => self.biggest_skip = Some((position, offer)),
		}
	}

	/// Gives back the last taken offer for the biggest skipped one if that fills more.
	fn try_biggest_skip(&mut self) {
		if self.remaining == 0 {
			return;
		}
		let (position, skipped) = match self.biggest_skip {
			Some(skip) => skip,
			None => return,
		};
		let last_src = match self.fills.last() {
			Some(last) => last.src,
			None => return,
		};

		let widened = self.remaining + last_src;
		let src = skipped.buy_amount.min(widened);
		let dest = dest_amount(&skipped, src);
		if src <= last_src || !self.worth_taking(src, dest) {
			return;
		}

		self.fills.pop();
		let index = self
			.fills
			.iter()
			.position(|fill| fill.position > position)
			.unwrap_or(self.fills.len());
		self.fills.insert(
			index,
			Fill {
				position,
				offer: skipped,
				src,
				dest,
			},
		);
		self.remaining = widened - src;
	}

	fn finish(self, requested: u128, dest_decimals: u32) -> OfferSelection {
		if self.fills.is_empty() {
			return OfferSelection::default();
		}
		let total_dest = self
			.fills
			.iter()
			.fold(0u128, |sum, fill| sum.saturating_add(fill.dest));
		let total_src = requested - self.remaining;
		if self.base_size(total_src, total_dest) < self.min_order_size {
			return OfferSelection::default();
		}

		OfferSelection {
			total_dest,
			total_dest_whole: pow10(dest_decimals)
				.map(|unit| total_dest / unit)
				.unwrap_or_default(),
			offer_ids: self.fills.iter().map(|fill| fill.offer.id).collect(),
			total_src,
		}
	}
}

/// Destination amount an offer pays for `src`, floored.
fn dest_amount(offer: &Offer, src: u128) -> u128 {
	if src == offer.buy_amount {
		return offer.pay_amount;
	}
	mul_div(offer.pay_amount, src, offer.buy_amount).unwrap_or_default()
}

/// Picks the offers a trader on `side` takes to exchange `requested` source units.
///
/// Offers are taken in the given order, each one fully or (the last one) partially, as long as
/// the base currency size of the take is at least `min_order_size`. At most
/// `traversal.max_traverse` offers are inspected and `traversal.max_take` taken. When the walk
/// ends short of `requested`, the last taken offer is swapped for the biggest skipped one if
/// that fills strictly more.
pub fn show_best_offers<I>(
	offers: I,
	side: TradeSide,
	requested: u128,
	traversal: &TraversalConfig,
	dest_decimals: u32,
) -> OfferSelection
where
	I: IntoIterator<Item = Offer>,
{
	if requested == 0 || traversal.max_take == 0 {
		return OfferSelection::default();
	}

	let mut walk = Walk::new(side, requested, traversal.min_order_size);
	for offer in offers.into_iter().take(traversal.max_traverse as usize) {
		walk.inspect(offer);
		if walk.is_done(traversal.max_take) {
			break;
		}
	}
	walk.try_biggest_skip();
	walk.finish(requested, dest_decimals)
}
