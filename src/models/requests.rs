use serde::{Deserialize, Serialize};
use validator::Validate;

/// Query for endpoints addressed by user only
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UserQuery {
    #[validate(length(min = 1))]
    #[serde(alias = "userId")]
    pub user_id: String,
}

/// Query for endpoints addressed by a user/product pair
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UserProductQuery {
    #[validate(length(min = 1))]
    #[serde(alias = "userId")]
    pub user_id: String,
    #[validate(length(min = 1))]
    #[serde(alias = "productId")]
    pub product_id: String,
}
