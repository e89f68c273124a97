//! Deserializers for free-form text fields.
//!
//! Environment overrides arrive as typed values (`PROMWRITE_NAMESPACE=123`
//! is an integer), so text fields accept any scalar and keep its textual form.
//! Floats are re-rendered, so `1.50` is kept as `1.5`.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Str(String),
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
}

impl From<Scalar> for String {
    fn from(value: Scalar) -> Self {
        match value {
            Scalar::Str(s) => s,
            Scalar::Bool(b) => b.to_string(),
            Scalar::Int(n) => n.to_string(),
            Scalar::UInt(n) => n.to_string(),
            Scalar::Float(n) => n.to_string(),
        }
    }
}

/// A string, or any scalar rendered as one.
pub(crate) fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Scalar::deserialize(deserializer).map(String::from)
}

/// A string map whose values may be any scalar.
pub(crate) fn text_map<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, Scalar>::deserialize(deserializer)?;
    Ok(raw.into_iter().map(|(k, v)| (k, v.into())).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Doc {
        #[serde(deserialize_with = "text")]
        name: String,
        #[serde(deserialize_with = "text_map")]
        labels: BTreeMap<String, String>,
    }

    #[test]
    fn scalars_are_kept_as_text() {
        let doc: Doc =
            serde_yaml::from_str("name: 123\nlabels:\n  shard: 7\n  primary: true\n  zone: eu\n")
                .unwrap();
        assert_eq!(doc.name, "123");
        assert_eq!(doc.labels["shard"], "7");
        assert_eq!(doc.labels["primary"], "true");
        assert_eq!(doc.labels["zone"], "eu");
    }

    #[test]
    fn collections_are_rejected() {
        assert!(serde_yaml::from_str::<Doc>("name: [a]\nlabels: {}\n").is_err());
    }
}
