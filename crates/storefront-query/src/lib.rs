pub mod client;
pub mod count;
pub mod error;
pub mod retry;
pub mod types;

pub use client::StorefrontClient;
pub use count::{count_all_pages, COUNT_PAGE_SIZE};
pub use error::QueryError;
pub use types::{parse_filter_tokens, CountPage, ListingPage, ListingRequest, SearchRequest};
