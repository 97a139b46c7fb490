pub mod budget;
pub mod domain;
pub mod product;
pub mod query;
pub mod time_serde;

pub use budget::extract_budget;
pub use domain::normalize_domain;
pub use product::{CommerceProduct, SearchResult, StockStatus};
pub use query::{QueryKind, classify};
