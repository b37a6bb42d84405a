//! REST API endpoint implementations.
//!
//! Functions here take an already-resolved [`HeaderSet`](crate::auth::HeaderSet);
//! token resolution happens in [`crate::client`].

mod request;
pub mod search;
pub mod url_encoding;

pub use request::{ApiResponse, send_request};
pub use search::{
    SEARCHES_PATH, create_search, get_search_results, get_search_status, wait_for_search,
};
pub use url_encoding::encode_path_segment;
