// Service exports
pub mod chat;
pub mod output;
pub mod store;

pub use chat::{ChatError, ChatMessage, ChatRequest, ChatTransport, HttpChatTransport};
pub use output::{OutputError, OutputPaths, ResultWriter};
pub use store::{find_product, find_user, CatalogSource, JsonFileStore, StoreError};
