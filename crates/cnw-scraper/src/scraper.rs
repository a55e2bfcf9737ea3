use futures::stream::{self, Stream, StreamExt};

use crate::client::{self, FetchResult};
use crate::parser::{self, ParseError};
use crate::types::{Category, Location, Options, Profile, SortKey};
use crate::utils::{sanitize_name, search_slug, sort_profiles};

// Container ids for the three index-page flavors.
const CATEGORY_LIST_ID: &str = "post_listing";
const MAP_LIST_ID: &str = "cnwMaps_mainProfileList";
const TOP_LIST_ID: &str = "top_100_list";

#[derive(Debug, thiserror::Error)]
pub enum ScraperError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("Parse error: {0}")]
    ParseError(#[from] ParseError),
    #[error("Starting page {page} is out of range for the {category} category")]
    PageOutOfRange { category: Category, page: u32 },
    #[error("Invalid page range: {start}..{end}")]
    InvalidRange { start: u32, end: u32 },
}

/// Entry point for every crawl. Holds the connection options and the
/// site base URL; each batch of requests gets its own connection pool,
/// so constructing one is free and nothing is shared across calls.
#[derive(Debug, Clone)]
pub struct WebScraper {
    options: Options,
    base_url: String,
}

impl Default for WebScraper {
    fn default() -> Self {
        Self::new()
    }
}

impl WebScraper {
    pub fn new() -> Self {
        Self::with_options(Options::default())
    }

    pub fn with_options(options: Options) -> Self {
        Self {
            options,
            base_url: crate::BASE_URL.to_string(),
        }
    }

    /// Collect every profile listed on the category pages in the
    /// inclusive range. The whole range is fetched as one concurrent
    /// batch; pages past the end of the category come back non-2xx and
    /// are dropped, but a missing starting page is an error.
    pub async fn scrape_category(
        &self,
        category: Category,
        start_page: u32,
        end_page: u32,
        sort_by: Option<SortKey>,
        ascending: bool,
    ) -> Result<Vec<Profile>, ScraperError> {
        if start_page == 0 || end_page < start_page {
            return Err(ScraperError::InvalidRange {
                start: start_page,
                end: end_page,
            });
        }

        log::info!(
            "Fetching {} category pages {}-{}...",
            category,
            start_page,
            end_page
        );
        let urls: Vec<String> = (start_page..=end_page)
            .map(|page| {
                format!(
                    "{}/category/{}/page/{}/",
                    self.base_url,
                    category.slug(),
                    page
                )
            })
            .collect();
        let pages = client::fetch_many(&self.options, &urls).await?;

        if !pages[0].status.is_success() {
            return Err(ScraperError::PageOutOfRange {
                category,
                page: start_page,
            });
        }

        let mut profile_urls = Vec::new();
        for (page, fetched) in (start_page..=end_page).zip(&pages) {
            if !fetched.status.is_success() {
                log::debug!("Category page {} is past the end, skipping", page);
                continue;
            }
            profile_urls.extend(self.links_in(fetched, CATEGORY_LIST_ID));
        }

        let profiles = self.fetch_profiles(&profile_urls).await?;
        log::info!("Compiled {} profile(s) from {}", profiles.len(), category);
        Ok(sort_profiles(profiles, sort_by, ascending))
    }

    /// Collect the top profiles for a map location.
    pub async fn scrape_map(
        &self,
        location: Location,
        sort_by: Option<SortKey>,
        ascending: bool,
    ) -> Result<Vec<Profile>, ScraperError> {
        log::info!("Fetching map page for {}...", location);
        let url = format!("{}/map/{}/", self.base_url, location.slug());
        let pages = client::fetch_many(&self.options, &[url]).await?;

        let profile_urls = self.links_in(&pages[0], MAP_LIST_ID);
        let profiles = self.fetch_profiles(&profile_urls).await?;
        Ok(sort_profiles(profiles, sort_by, ascending))
    }

    /// Run each name through the site's search and keep the profiles
    /// whose lead result actually matches. Duplicate queries collapse to
    /// one search, so at most one profile comes back per unique name.
    pub async fn scrape_names(
        &self,
        names: &[String],
        sort_by: Option<SortKey>,
        ascending: bool,
    ) -> Result<Vec<Profile>, ScraperError> {
        log::info!("Searching for {} name(s)...", names.len());
        let mut queries: Vec<(String, String)> = Vec::new();
        for name in names {
            let sanitized = sanitize_name(name);
            let url = format!("{}/dl/{}/", self.base_url, search_slug(&sanitized));
            if queries.iter().any(|(_, existing)| *existing == url) {
                continue;
            }
            queries.push((sanitized, url));
        }

        let search_urls: Vec<String> = queries.iter().map(|(_, url)| url.clone()).collect();
        let results = client::fetch_many(&self.options, &search_urls).await?;

        let mut profile_urls = Vec::new();
        for ((sanitized, _), result) in queries.iter().zip(&results) {
            if !result.status.is_success() {
                log::debug!(
                    "FAILED: search for '{}' returned status {}",
                    sanitized,
                    result.status.as_u16()
                );
                continue;
            }
            match parser::match_search_lead(&result.body, sanitized) {
                Some(href) => {
                    log::debug!("FOUND: '{}' matches the lead result", sanitized);
                    profile_urls.push(self.absolute_url(&href));
                }
                None => log::debug!("FAILED: '{}' has no matching search result", sanitized),
            }
        }

        let profiles = self.fetch_profiles(&profile_urls).await?;
        Ok(sort_profiles(profiles, sort_by, ascending))
    }

    /// Collect a category's top-50 list, or the overall top-100 list
    /// when no category is given.
    pub async fn scrape_top(
        &self,
        category: Option<Category>,
        sort_by: Option<SortKey>,
        ascending: bool,
    ) -> Result<Vec<Profile>, ScraperError> {
        let url = match category {
            Some(category) => format!("{}/list/top-50-{}/", self.base_url, category.slug()),
            None => format!(
                "{}/list/top-100-richest-people-in-the-world/",
                self.base_url
            ),
        };
        log::info!("Fetching top list...");
        let pages = client::fetch_many(&self.options, &[url]).await?;

        let profile_urls = self.links_in(&pages[0], TOP_LIST_ID);
        let profiles = self.fetch_profiles(&profile_urls).await?;
        Ok(sort_profiles(profiles, sort_by, ascending))
    }

    /// Grab one profile through the site's random redirect.
    pub async fn scrape_random(&self) -> Result<Profile, ScraperError> {
        log::info!("Fetching a random profile...");
        let url = format!("{}/random/", self.base_url);
        let pages = client::fetch_many(&self.options, &[url]).await?;
        Ok(parser::parse_profile(
            &pages[0].body,
            self.options.include_description,
        )?)
    }

    /// Walk every known category lazily, yielding one category's batch
    /// of profiles at a time. Dropping the stream cancels the remainder;
    /// each category covers pages `1..=pages_per_category`.
    pub fn scrape_all(
        &self,
        pages_per_category: u32,
        sort_by: Option<SortKey>,
        ascending: bool,
    ) -> impl Stream<Item = Result<(Category, Vec<Profile>), ScraperError>> + '_ {
        stream::iter(Category::ALL).then(move |category| async move {
            let profiles = self
                .scrape_category(category, 1, pages_per_category, sort_by, ascending)
                .await?;
            Ok::<_, ScraperError>((category, profiles))
        })
    }

    fn absolute_url(&self, href: &str) -> String {
        if href.starts_with("http") {
            href.to_string()
        } else {
            format!("{}{}", self.base_url, href)
        }
    }

    fn links_in(&self, page: &FetchResult, container_id: &str) -> Vec<String> {
        let links = parser::extract_links(&page.body, container_id);
        if links.is_empty() {
            log::debug!("No profile links found in {}", page.url);
        }
        links
            .into_iter()
            .map(|href| self.absolute_url(&href))
            .collect()
    }

    // Detail pages that come back non-2xx or fail to parse are skipped
    // per record; only transport errors abort the call.
    async fn fetch_profiles(&self, urls: &[String]) -> Result<Vec<Profile>, ScraperError> {
        let pages = client::fetch_many(&self.options, urls).await?;
        let mut profiles = Vec::with_capacity(pages.len());
        for page in &pages {
            if !page.status.is_success() {
                log::warn!("Skipping profile {}: status {}", page.url, page.status.as_u16());
                continue;
            }
            match parser::parse_profile(&page.body, self.options.include_description) {
                Ok(profile) => profiles.push(profile),
                Err(e) => log::warn!("Skipping profile {}: {}", page.url, e),
            }
        }
        Ok(profiles)
    }
}
