pub mod client;
pub mod error;
pub mod normalize;
pub mod parse;
pub mod region;
pub mod types;

pub use client::SerperClient;
pub use error::SearchError;
pub use normalize::{
    parse_listing, BASE_CONFIDENCE, PRICE_CONFIDENCE_BONUS, RATING_CONFIDENCE_BONUS,
    REVIEWS_CONFIDENCE_BONUS,
};
pub use region::region_code;
pub use types::SearchMode;
