// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    FilterRecord, FilterUpdate, PriceRange, Product, UserProfile, Verdict, NOT_RECOMMENDABLE,
    RECOMMENDABLE,
};
pub use requests::{UserProductQuery, UserQuery};
pub use responses::{CatalogResponse, CopyUpdate, ErrorResponse, HealthResponse};
