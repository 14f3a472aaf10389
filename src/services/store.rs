use crate::models::{Product, UserProfile};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading catalog data
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Not found: {0}")]
    NotFound(String),
}

/// Provider of the user and product collections
///
/// Implementations reload on every call; nothing is cached between requests.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn load_users(&self) -> Result<Vec<UserProfile>, StoreError>;

    async fn load_products(&self) -> Result<Vec<Product>, StoreError>;

    /// Fetch one user by exact id
    async fn get_user(&self, user_id: &str) -> Result<UserProfile, StoreError> {
        let users = self.load_users().await?;
        find_user(users, user_id)
    }

    /// Fetch one product by exact id
    async fn get_product(&self, product_id: &str) -> Result<Product, StoreError> {
        let products = self.load_products().await?;
        find_product(products, product_id)
    }
}

pub fn find_user(users: Vec<UserProfile>, user_id: &str) -> Result<UserProfile, StoreError> {
    users
        .into_iter()
        .find(|u| u.user_id == user_id)
        .ok_or_else(|| StoreError::NotFound(format!("user_id = {}", user_id)))
}

pub fn find_product(products: Vec<Product>, product_id: &str) -> Result<Product, StoreError> {
    products
        .into_iter()
        .find(|p| p.product_id == product_id)
        .ok_or_else(|| StoreError::NotFound(format!("product_id = {}", product_id)))
}

/// Catalog backed by two JSON array files
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    users_path: PathBuf,
    products_path: PathBuf,
}

impl JsonFileStore {
    pub fn new(users_path: impl Into<PathBuf>, products_path: impl Into<PathBuf>) -> Self {
        Self {
            users_path: users_path.into(),
            products_path: products_path.into(),
        }
    }
}

async fn load_json_array<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, StoreError> {
    let bytes = tokio::fs::read(path).await.map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_slice(&bytes).map_err(|source| StoreError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[async_trait]
impl CatalogSource for JsonFileStore {
    async fn load_users(&self) -> Result<Vec<UserProfile>, StoreError> {
        tracing::debug!("Loading users from {}", self.users_path.display());
        load_json_array(&self.users_path).await
    }

    async fn load_products(&self) -> Result<Vec<Product>, StoreError> {
        tracing::debug!("Loading products from {}", self.products_path.display());
        load_json_array(&self.products_path).await
    }
}
