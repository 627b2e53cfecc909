//! Instagram profile and post lookups through the RapidAPI
//! `instagram-scraper-api2` provider.

pub mod client;
pub mod error;
pub mod normalize;
pub mod provider;
pub mod types;

pub use client::InstagramClient;
pub use error::InstagramError;
pub use normalize::{estimated_engagement, normalize_post, normalize_profile, normalize_search_user};
pub use provider::{EnrichedProfile, InstagramProvider};
pub use types::ProfileSearchResult;
