use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Label the model uses for a product that may be pushed to the user
pub const RECOMMENDABLE: &str = "recommendable";
/// Label the model uses for a product that must not be pushed to the user
pub const NOT_RECOMMENDABLE: &str = "not recommendable";

/// Acceptable price band, serialized as `[min, max]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange(pub f64, pub f64);

impl PriceRange {
    pub fn min(&self) -> f64 {
        self.0
    }

    pub fn max(&self) -> f64 {
        self.1
    }
}

/// User profile with demographic data and shopping history
///
/// Fields the filter does not know about are kept in `extra` so the full
/// record reaches the prompt and the profile lookup unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_type: Option<String>,
    pub age: u16,
    pub gender: String,
    pub price_range: PriceRange,
    #[serde(default)]
    pub blocked_list: Vec<String>,
    #[serde(default)]
    pub search_history: Vec<Value>,
    #[serde(default)]
    pub view_history: Vec<Value>,
    #[serde(default)]
    pub cart_history: Vec<Value>,
    #[serde(default)]
    pub purchase_history: Vec<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A product from the candidate pool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub product_id: String,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub brand: String,
    pub price: f64,
    pub stock: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Product {
    /// Zero stock means the product cannot be sold
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

/// Filtering decision for one user/product pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub result: String,
    pub reason: String,
}

impl Verdict {
    pub fn new(result: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            result: result.into(),
            reason: reason.into(),
        }
    }

    /// Whether the model labelled the product as recommendable
    pub fn is_recommendable(&self) -> bool {
        self.result.trim() == RECOMMENDABLE
    }
}

/// One line of batch output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterRecord {
    pub user_id: String,
    pub user_type: Option<String>,
    pub product_id: String,
    pub product_name: String,
    pub category: String,
    pub price: f64,
    pub stock: i64,
    pub result: String,
    pub reason: String,
}

impl FilterRecord {
    pub fn new(user: &UserProfile, product: &Product, verdict: Verdict) -> Self {
        Self {
            user_id: user.user_id.clone(),
            user_type: user.user_type.clone(),
            product_id: product.product_id.clone(),
            product_name: product.name.clone(),
            category: product.category.clone(),
            price: product.price,
            stock: product.stock,
            result: verdict.result,
            reason: verdict.reason,
        }
    }
}

/// Incremental filter event payload sent to the browser
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterUpdate {
    pub product: Product,
    pub result: String,
    pub reason: String,
}

impl FilterUpdate {
    pub fn new(product: Product, verdict: Verdict) -> Self {
        Self {
            product,
            result: verdict.result,
            reason: verdict.reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_profile_keeps_unknown_fields() {
        let raw = json!({
            "user_id": "C1_U001",
            "user_type": "student",
            "age": 15,
            "gender": "M",
            "price_range": [30, 120],
            "blocked_list": ["alcohol"],
            "search_history": ["headphones", "basketball shoes"],
            "city": "Hangzhou"
        });

        let user: UserProfile = serde_json::from_value(raw).unwrap();
        assert_eq!(user.price_range.min(), 30.0);
        assert_eq!(user.price_range.max(), 120.0);
        assert_eq!(user.extra.get("city"), Some(&json!("Hangzhou")));

        let back = serde_json::to_value(&user).unwrap();
        assert_eq!(back["city"], "Hangzhou");
        assert_eq!(back["price_range"], json!([30.0, 120.0]));
    }

    #[test]
    fn test_not_recommendable_is_not_recommendable() {
        assert!(Verdict::new(RECOMMENDABLE, "fits").is_recommendable());
        assert!(!Verdict::new(NOT_RECOMMENDABLE, "blocked").is_recommendable());
    }

    #[test]
    fn test_zero_stock() {
        let product: Product = serde_json::from_value(json!({
            "product_id": "P1",
            "name": "Desk lamp",
            "category": "home",
            "price": 20,
            "stock": 0
        }))
        .unwrap();

        assert!(!product.in_stock());
        assert_eq!(product.brand, "");
    }
}
