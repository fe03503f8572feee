/// Quote API data model
///
/// Routes are treated as opaque beyond their step list: every field the client
/// does not interpret is kept in a flattened map so the response round-trips
/// unchanged.
use crate::errors::DataError;
use alloy::primitives::U256;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Parameters of one transfer, serialized as the quote API's query string
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferIntent {
    pub src_token: String,
    pub dst_token: String,
    pub src_address: String,
    pub dst_address: String,
    pub src_chain_key: String,
    pub dst_chain_key: String,
    /// Smallest-unit decimal integer
    pub src_amount: String,
    /// Smallest-unit decimal integer
    pub dst_amount_min: String,
}

impl TransferIntent {
    pub fn validate(&self) -> Result<(), DataError> {
        let required = [
            ("src_token", &self.src_token),
            ("dst_token", &self.dst_token),
            ("src_address", &self.src_address),
            ("dst_address", &self.dst_address),
            ("src_chain_key", &self.src_chain_key),
            ("dst_chain_key", &self.dst_chain_key),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(DataError::MissingField {
                    field: field.to_string(),
                });
            }
        }

        super::slippage::parse_amount(&self.src_amount)?;
        super::slippage::parse_amount(&self.dst_amount_min)?;
        Ok(())
    }
}

/// `GET /quotes` response body
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuotesResponse {
    #[serde(default)]
    pub quotes: Vec<Route>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl QuotesResponse {
    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}

/// One candidate route: an ordered list of steps plus opaque route details
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Route {
    #[serde(default)]
    pub steps: Vec<Step>,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl Route {
    pub fn new(steps: Vec<Step>) -> Self {
        Self {
            steps,
            details: Map::new(),
        }
    }

    /// Bridge/route identifier reported by the API (e.g. "stargate/v2/taxi")
    pub fn name(&self) -> Option<&str> {
        self.details.get("route").and_then(Value::as_str)
    }

    /// Quoted destination amount, when present and a valid integer
    pub fn dst_amount(&self) -> Option<U256> {
        match self.details.get("dstAmount")? {
            Value::String(s) => U256::from_str_radix(s.trim(), 10).ok(),
            Value::Number(n) => n.as_u64().map(U256::from),
            _ => None,
        }
    }
}

/// One on-chain transaction within a route
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Step {
    #[serde(default)]
    pub transaction: Option<TransactionDescriptor>,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl Step {
    pub fn new(transaction: TransactionDescriptor) -> Self {
        Self {
            transaction: Some(transaction),
            details: Map::new(),
        }
    }

    /// Permissive decode: a step without a transaction yields an empty descriptor
    pub fn descriptor(&self) -> TransactionDescriptor {
        self.transaction.clone().unwrap_or_default()
    }
}

/// Opaque call description supplied by the quote API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionDescriptor {
    #[serde(default)]
    pub to: String,
    #[serde(default)]
    pub data: String,
    /// Native currency amount, decimal string
    #[serde(default = "zero_value", deserialize_with = "deserialize_value")]
    pub value: String,
}

impl Default for TransactionDescriptor {
    fn default() -> Self {
        Self {
            to: String::new(),
            data: String::new(),
            value: zero_value(),
        }
    }
}

impl TransactionDescriptor {
    pub fn new(to: impl Into<String>, data: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            data: data.into(),
            value: value.into(),
        }
    }
}

fn zero_value() -> String {
    "0".to_string()
}

/// Accept string or number values; null maps to "0"
fn deserialize_value<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    use std::fmt;

    struct StringOrNumber;

    impl<'de> Visitor<'de> for StringOrNumber {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string, an integer or null")
        }

        fn visit_str<E>(self, value: &str) -> Result<String, E>
        where
            E: de::Error,
        {
            Ok(value.to_owned())
        }

        fn visit_u64<E>(self, value: u64) -> Result<String, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_i64<E>(self, value: i64) -> Result<String, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_unit<E>(self) -> Result<String, E>
        where
            E: de::Error,
        {
            Ok(zero_value())
        }

        fn visit_none<E>(self) -> Result<String, E>
        where
            E: de::Error,
        {
            Ok(zero_value())
        }
    }

    deserializer.deserialize_any(StringOrNumber)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_intent_serializes_to_api_parameter_names() {
        let intent = TransferIntent {
            src_token: "0xa0b8".to_string(),
            dst_token: "0x3c49".to_string(),
            src_address: "0x1111".to_string(),
            dst_address: "0x2222".to_string(),
            src_chain_key: "ethereum".to_string(),
            dst_chain_key: "polygon".to_string(),
            src_amount: "1000000".to_string(),
            dst_amount_min: "950000".to_string(),
        };

        let value = serde_json::to_value(&intent).unwrap();
        assert_eq!(
            value,
            json!({
                "srcToken": "0xa0b8",
                "dstToken": "0x3c49",
                "srcAddress": "0x1111",
                "dstAddress": "0x2222",
                "srcChainKey": "ethereum",
                "dstChainKey": "polygon",
                "srcAmount": "1000000",
                "dstAmountMin": "950000",
            })
        );
        assert!(intent.validate().is_ok());
    }

    #[test]
    fn test_intent_validation() {
        let mut intent = TransferIntent {
            src_token: "0xa0b8".to_string(),
            dst_token: "0x3c49".to_string(),
            src_address: "0x1111".to_string(),
            dst_address: "".to_string(),
            src_chain_key: "ethereum".to_string(),
            dst_chain_key: "polygon".to_string(),
            src_amount: "1000000".to_string(),
            dst_amount_min: "950000".to_string(),
        };
        assert!(matches!(intent.validate(), Err(DataError::MissingField { .. })));

        intent.dst_address = "0x2222".to_string();
        intent.src_amount = "1.5".to_string();
        assert!(matches!(intent.validate(), Err(DataError::InvalidAmount { .. })));
    }

    #[test]
    fn test_permissive_step_decode() {
        let response: QuotesResponse = serde_json::from_value(json!({
            "quotes": [{
                "route": "stargate/v2/taxi",
                "dstAmount": "999000",
                "steps": [
                    {"type": "approve", "transaction": {"to": "0xa0b8", "data": "0x095ea7b3"}},
                    {"type": "bridge", "transaction": {"to": "0xc026", "data": "0xc7c7f5b3", "value": 12345}},
                    {"type": "unknown", "transaction": null},
                    {"type": "bare"}
                ]
            }],
            "error": null
        }))
        .unwrap();

        let route = &response.quotes[0];
        assert_eq!(route.name(), Some("stargate/v2/taxi"));
        assert_eq!(route.dst_amount(), Some(U256::from(999_000u64)));
        assert_eq!(route.steps.len(), 4);

        assert_eq!(route.steps[0].descriptor().value, "0");
        assert_eq!(route.steps[1].descriptor().value, "12345");
        assert_eq!(route.steps[2].descriptor(), TransactionDescriptor::default());
        assert_eq!(route.steps[3].descriptor().to, "");
        assert_eq!(route.steps[0].details.get("type"), Some(&json!("approve")));
        assert!(response.extra.contains_key("error"));
    }

    #[test]
    fn test_null_value_defaults_to_zero() {
        let descriptor: TransactionDescriptor =
            serde_json::from_value(json!({"to": "0x01", "data": "0x", "value": null})).unwrap();
        assert_eq!(descriptor.value, "0");
    }

    #[test]
    fn test_missing_quotes_key_is_empty() {
        let response: QuotesResponse = serde_json::from_value(json!({})).unwrap();
        assert!(response.is_empty());
    }
}
