//! Coffee catalog entry

use chrono::{DateTime, Utc};
use serde::{ser::Error as _, Deserialize, Serialize, Serializer};

/// A single coffee product in the catalog.
///
/// Every field falls back to its default when missing from a request body, so a
/// candidate for creation may omit `id`, `created_at` and `updated_at` entirely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Coffee {
    /// Server-generated identifier, empty until the entry has been stored
    pub id: String,
    pub name: String,
    pub roast: String,
    pub image: String,
    pub region: String,
    #[serde(serialize_with = "serialize_finite")]
    pub price: f64,
    pub grind_unit: i16,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Coffee {
    /// Whether the entry has been assigned an identifier by the store
    pub fn is_stored(&self) -> bool {
        !self.id.is_empty()
    }
}

/// JSON has no NaN or infinity; refuse them instead of writing `null`
fn serialize_finite<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if !value.is_finite() {
        return Err(S::Error::custom(format!("unsupported value: {}", value)));
    }
    serializer.serialize_f64(*value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn kenya() -> Coffee {
        Coffee {
            id: "42".to_string(),
            name: "Kenya AA".to_string(),
            roast: "Light".to_string(),
            image: "k.jpg".to_string(),
            region: "Kenya".to_string(),
            price: 9.99,
            grind_unit: 1,
            created_at: Utc.with_ymd_and_hms(2023, 9, 28, 18, 24, 13).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2023, 9, 28, 18, 24, 13).unwrap(),
        }
    }

    #[test]
    fn test_fields_serialize_in_declaration_order() {
        let json = serde_json::to_string(&kenya()).unwrap();
        let keys = [
            "\"id\"",
            "\"name\"",
            "\"roast\"",
            "\"image\"",
            "\"region\"",
            "\"price\"",
            "\"grind_unit\"",
            "\"created_at\"",
            "\"updated_at\"",
        ];
        let positions: Vec<usize> = keys.iter().map(|k| json.find(k).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{}", json);
    }

    #[test]
    fn test_encode_then_decode_is_lossless() {
        let original = kenya();
        let json = serde_json::to_vec(&original).unwrap();
        let decoded: Coffee = serde_json::from_slice(&json).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_non_finite_price_does_not_serialize() {
        for price in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let coffee = Coffee { price, ..kenya() };
            let err = serde_json::to_string(&coffee).unwrap_err();
            assert!(err.to_string().contains("unsupported value"), "{}", err);
        }
    }

    #[test]
    fn test_candidate_without_server_fields() {
        let body = r#"{"name":"Kenya AA","roast":"Light","image":"k.jpg","region":"Kenya","price":9.99,"grind_unit":1}"#;
        let coffee: Coffee = serde_json::from_str(body).unwrap();

        assert!(!coffee.is_stored());
        assert_eq!(coffee.name, "Kenya AA");
        assert_eq!(coffee.price, 9.99);
        assert_eq!(coffee.grind_unit, 1);
        assert_eq!(coffee.created_at, DateTime::<Utc>::default());
    }
}
