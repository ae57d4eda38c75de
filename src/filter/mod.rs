pub mod error;
pub mod listing_filter;
pub mod types;

pub use error::FilterError;
pub use listing_filter::ListingFilter;
pub use types::{PriceRange, SqlParam, SqlResult};
