//! Metric value shapes.
//!
//! A metric sample carries one of exactly four wire shapes. The sibling
//! `scalar` flag on the enclosing message tells the client which arity to
//! expect, so it never has to sniff the JSON shape of `value` itself.

use serde::{Deserialize, Serialize};

/// Value payload of a metric message.
///
/// Untagged on the wire: a bare number, a bare string, or a homogeneous
/// array of either. Ordering of the variants matters for deserialization —
/// numbers are tried before strings, scalars before sequences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    /// Scalar number (e.g. tokens/sec).
    Number(f64),
    /// Scalar string (e.g. a model name).
    Text(String),
    /// Ordered number series (e.g. a latency sparkline).
    NumberSeries(Vec<f64>),
    /// Ordered string series.
    TextSeries(Vec<String>),
}

impl MetricValue {
    /// Whether this value is one of the two scalar shapes.
    ///
    /// Producers use this to populate the `scalar` flag on the enclosing
    /// message so flag and payload can never disagree.
    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::Number(_) | Self::Text(_))
    }
}

impl From<f64> for MetricValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for MetricValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for MetricValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<f64>> for MetricValue {
    fn from(values: Vec<f64>) -> Self {
        Self::NumberSeries(values)
    }
}

impl From<Vec<String>> for MetricValue {
    fn from(values: Vec<String>) -> Self {
        Self::TextSeries(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_flag_matches_shape() {
        assert!(MetricValue::from(42.0).is_scalar());
        assert!(MetricValue::from("gpt-oss").is_scalar());
        assert!(!MetricValue::from(vec![1.0, 2.0, 3.0]).is_scalar());
        assert!(!MetricValue::from(vec!["a".to_owned()]).is_scalar());
    }

    #[test]
    fn untagged_wire_shapes() {
        assert_eq!(serde_json::to_string(&MetricValue::from(1.5)).unwrap(), "1.5");
        assert_eq!(
            serde_json::to_string(&MetricValue::from("cpu")).unwrap(),
            "\"cpu\""
        );
        assert_eq!(
            serde_json::to_string(&MetricValue::from(vec![1.0, 2.0])).unwrap(),
            "[1.0,2.0]"
        );
    }

    #[test]
    fn deserializes_each_shape() {
        let n: MetricValue = serde_json::from_str("42").unwrap();
        assert_eq!(n, MetricValue::Number(42.0));
        let s: MetricValue = serde_json::from_str("\"gpu\"").unwrap();
        assert_eq!(s, MetricValue::Text("gpu".to_owned()));
        let ns: MetricValue = serde_json::from_str("[1, 2, 3]").unwrap();
        assert_eq!(ns, MetricValue::NumberSeries(vec![1.0, 2.0, 3.0]));
        let ts: MetricValue = serde_json::from_str("[\"a\", \"b\"]").unwrap();
        assert_eq!(ts, MetricValue::TextSeries(vec!["a".to_owned(), "b".to_owned()]));
    }
}
