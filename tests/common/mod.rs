// Shared fixtures for integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use product_filter::core::{CredentialPool, DecisionClient, SequencePicker};
use product_filter::models::{Product, UserProfile};
use product_filter::services::{find_product, find_user, CatalogSource, ChatError, ChatRequest, ChatTransport, StoreError};
use serde_json::json;
use std::sync::{Arc, Mutex};
use std::time::Duration;

type Responder = Box<dyn Fn(&ChatRequest) -> Result<String, ChatError> + Send + Sync>;

/// Transport answering every attempt through a closure and recording calls
pub struct ScriptedTransport {
    responder: Responder,
    calls: Mutex<Vec<(String, ChatRequest)>>,
}

impl ScriptedTransport {
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&ChatRequest) -> Result<String, ChatError> + Send + Sync + 'static,
    {
        Self {
            responder: Box::new(responder),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Always answers with the same text
    pub fn answering(text: &str) -> Self {
        let text = text.to_string();
        Self::new(move |_| Ok(text.clone()))
    }

    /// Always fails with a gateway error
    pub fn failing() -> Self {
        Self::new(|_| Err(ChatError::Status(503)))
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.calls.lock().unwrap().iter().map(|(_, r)| r.clone()).collect()
    }
}

#[async_trait]
impl ChatTransport for ScriptedTransport {
    async fn complete(
        &self,
        request: &ChatRequest,
        credential: &str,
        _timeout: Duration,
    ) -> Result<String, ChatError> {
        self.calls
            .lock()
            .unwrap()
            .push((credential.to_string(), request.clone()));
        (self.responder)(request)
    }
}

pub fn decision_client(transport: Arc<ScriptedTransport>) -> DecisionClient {
    let pool = CredentialPool::new(vec!["key-a".to_string(), "key-b".to_string()]).unwrap();
    DecisionClient::new(transport, pool, "test-model")
        .with_picker(Arc::new(SequencePicker::new(vec![0, 1])))
}

/// In-memory catalog
pub struct MemoryCatalog {
    pub users: Vec<UserProfile>,
    pub products: Vec<Product>,
}

#[async_trait]
impl CatalogSource for MemoryCatalog {
    async fn load_users(&self) -> Result<Vec<UserProfile>, StoreError> {
        Ok(self.users.clone())
    }

    async fn load_products(&self) -> Result<Vec<Product>, StoreError> {
        Ok(self.products.clone())
    }

    async fn get_user(&self, user_id: &str) -> Result<UserProfile, StoreError> {
        find_user(self.users.clone(), user_id)
    }

    async fn get_product(&self, product_id: &str) -> Result<Product, StoreError> {
        find_product(self.products.clone(), product_id)
    }
}

pub fn users_json() -> serde_json::Value {
    json!([
        {
            "user_id": "C1_U001",
            "user_type": "teen",
            "age": 15,
            "gender": "M",
            "price_range": [30, 120],
            "blocked_list": ["alcohol"],
            "search_history": ["headphones", "basketball shoes"],
            "view_history": [],
            "cart_history": [],
            "purchase_history": []
        },
        {
            "user_id": "C2_U001",
            "user_type": "parent",
            "age": 38,
            "gender": "F",
            "price_range": [50, 2000],
            "blocked_list": [],
            "purchase_history": ["P-fridge"]
        }
    ])
}

pub fn products_json() -> serde_json::Value {
    json!([
        {"product_id": "P001", "name": "Contraceptives", "category": "adult", "brand": "Durex", "price": 59, "stock": 100},
        {"product_id": "P002", "name": "Basketball shoes", "category": "sports", "brand": "Acme", "price": 99, "stock": 12},
        {"product_id": "P003", "name": "Red wine", "category": "alcohol", "brand": "Vino", "price": 80, "stock": 40},
        {"product_id": "P004", "name": "Desk lamp", "category": "home", "brand": "Lumo", "price": 45, "stock": 0}
    ])
}

pub fn users() -> Vec<UserProfile> {
    serde_json::from_value(users_json()).unwrap()
}

pub fn products() -> Vec<Product> {
    serde_json::from_value(products_json()).unwrap()
}

pub fn memory_catalog() -> MemoryCatalog {
    MemoryCatalog {
        users: users(),
        products: products(),
    }
}

/// Answer `recommendable` only for the basketball shoes
pub fn shoes_only(request: &ChatRequest) -> Result<String, ChatError> {
    let prompt = &request.messages[1].content;
    if prompt.contains("Basketball shoes") {
        Ok("[Conclusion] recommendable\n[Reason] Matches the user's searches.".to_string())
    } else {
        Ok("[Conclusion] not recommendable\n[Reason] Violates a filtering rule.".to_string())
    }
}
