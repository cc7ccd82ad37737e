use serde::{Deserialize, Serialize};

/// A stored record. `id` is assigned by the store and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub value: i64,
}

/// Create/update payload: both fields must be present, their content is not checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemInput {
    pub name: String,
    pub value: i64,
}

impl ItemInput {
    pub fn new(name: impl Into<String>, value: i64) -> Self {
        Self { name: name.into(), value }
    }
}

impl Item {
    /// Seed record `n`: `item-n` with value `n * 10`.
    pub(crate) fn seed(n: i64) -> Self {
        Self { id: n, name: format!("item-{n}"), value: n * 10 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_json_shape() {
        let item = Item { id: 7, name: "item-7".into(), value: 70 };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json, serde_json::json!({"id": 7, "name": "item-7", "value": 70}));
    }

    #[test]
    fn input_requires_both_fields() {
        assert!(serde_json::from_str::<ItemInput>(r#"{"name":"a"}"#).is_err());
        assert!(serde_json::from_str::<ItemInput>(r#"{"value":1}"#).is_err());
        assert!(serde_json::from_str::<ItemInput>(r#"{"name":"a","value":"x"}"#).is_err());

        // presence is all that matters: empty name and zero value are fine
        let input: ItemInput = serde_json::from_str(r#"{"name":"","value":0}"#).unwrap();
        assert_eq!(input, ItemInput::new("", 0));
    }

    #[test]
    fn seed_record_labels() {
        assert_eq!(Item::seed(3), Item { id: 3, name: "item-3".into(), value: 30 });
    }
}
