use node_primitives::Balance;
use order_book_interface::Offer;
use serde::{Deserialize, Serialize};

/// `u128` amounts as decimal strings, JSON numbers can not hold them.
mod amount {
	use node_primitives::Balance;
	use serde::{de::Error, Deserialize, Deserializer, Serializer};

	pub fn serialize<S: Serializer>(value: &Balance, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(&value.to_string())
	}

	pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Balance, D::Error> {
		let s = String::deserialize(deserializer)?;
		s.parse()
			.map_err(|e| D::Error::custom(format!("parse to u128 failed: {}", e)))
	}
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BestOffers {
	#[serde(with = "amount")]
	pub total_dest: Balance,
	#[serde(with = "amount")]
	pub total_dest_whole: Balance,
	pub offer_ids: Vec<u64>,
	#[serde(with = "amount")]
	pub total_src: Balance,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OfferView {
	pub id: u64,
	#[serde(with = "amount")]
	pub pay_amount: Balance,
	#[serde(with = "amount")]
	pub buy_amount: Balance,
}

impl From<Offer> for OfferView {
	fn from(offer: Offer) -> Self {
		OfferView {
			id: offer.id,
			pay_amount: offer.pay_amount,
			buy_amount: offer.buy_amount,
		}
	}
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TopOfBook {
	pub buy: Option<OfferView>,
	pub sell: Option<OfferView>,
}
