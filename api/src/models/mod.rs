//! Wire types for the marketplace API. Field names follow the backend.

mod contract;
mod job;
mod message;
mod notification;
mod payment;
mod proposal;
mod rating;
mod report;
mod user;

pub use contract::{Contract, ContractStatus};
pub use job::{Job, JobStatus};
pub use message::Message;
pub use notification::Notification;
pub use payment::{Payment, PaymentStatus};
pub use proposal::{Proposal, ProposalStatus};
pub use rating::Rating;
pub use report::{PunishmentKind, Report, ReportKind, ReportStatus};
pub use user::{TokenPair, User, UserKind};

use serde::{Deserialize, Deserializer};

/// List endpoints answer either with a bare array or with a paginated
/// `{"results": [...]}` envelope depending on the view.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Listing<T> {
    Plain(Vec<T>),
    Paged { results: Vec<T> },
}

impl<T> Listing<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Listing::Plain(items) => items,
            Listing::Paged { results } => results,
        }
    }
}

/// Decimal fields arrive as strings ("1500.00") or plain numbers.
pub(crate) fn de_decimal<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid decimal '{}'", s))),
    }
}

/// Serialize money the way the backend's decimal fields expect it.
pub fn decimal_string(value: f64) -> String {
    format!("{:.2}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Priced {
        #[serde(deserialize_with = "de_decimal")]
        valor: f64,
    }

    #[test]
    fn test_decimal_from_string_or_number() {
        let a: Priced = serde_json::from_str(r#"{"valor": "1500.50"}"#).unwrap();
        let b: Priced = serde_json::from_str(r#"{"valor": 99}"#).unwrap();
        assert_eq!(a.valor, 1500.5);
        assert_eq!(b.valor, 99.0);
        assert!(serde_json::from_str::<Priced>(r#"{"valor": "abc"}"#).is_err());
    }

    #[test]
    fn test_listing_accepts_both_shapes() {
        let plain: Listing<i64> = serde_json::from_str("[1, 2]").unwrap();
        let paged: Listing<i64> =
            serde_json::from_str(r#"{"count": 2, "next": null, "results": [3, 4]}"#).unwrap();
        assert_eq!(plain.into_vec(), vec![1, 2]);
        assert_eq!(paged.into_vec(), vec![3, 4]);
    }

    #[test]
    fn test_decimal_string_two_places() {
        assert_eq!(decimal_string(1500.0), "1500.00");
        assert_eq!(decimal_string(0.5), "0.50");
    }
}
