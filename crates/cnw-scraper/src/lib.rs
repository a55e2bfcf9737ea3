pub mod client;
pub mod parser;
pub mod scraper;
pub mod types;
pub mod utils;

pub use client::FetchResult;
pub use scraper::{ScraperError, WebScraper};
pub use types::{Category, Location, Options, Profile, SortKey};

pub(crate) const BASE_URL: &str = "https://www.celebritynetworth.com";
