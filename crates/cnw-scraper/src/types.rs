use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize, Serializer};

use crate::utils::format_dollars;

#[derive(Debug, thiserror::Error)]
#[error("Invalid category '{0}'. Use a lowercase category name such as 'actors' or 'rappers'")]
pub struct CategoryParseError(String);

/// Profile categories found on the site, each mapping to a URL path
/// segment under `/category/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Actors,
    Athletes,
    Authors,
    Baseball,
    Billionaires,
    Bollywood,
    Boxers,
    Business,
    Celebrities,
    Ceos,
    Chefs,
    Coaches,
    Comedians,
    Companies,
    Criminals,
    Democrats,
    Designers,
    Directors,
    Djs,
    Executives,
    Golfers,
    Hockey,
    India,
    International,
    Lawyers,
    Mma,
    Models,
    Nba,
    Nfl,
    Olympians,
    Politicians,
    Presidents,
    Producers,
    Racers,
    Rappers,
    Republicans,
    Rockstars,
    Royals,
    Sheiks,
    Singers,
    Skateboarders,
    Soccer,
    Tennis,
    WallStreeters,
    Wrestlers,
}

impl Category {
    pub const ALL: [Category; 45] = [
        Category::Actors,
        Category::Athletes,
        Category::Authors,
        Category::Baseball,
        Category::Billionaires,
        Category::Bollywood,
        Category::Boxers,
        Category::Business,
        Category::Celebrities,
        Category::Ceos,
        Category::Chefs,
        Category::Coaches,
        Category::Comedians,
        Category::Companies,
        Category::Criminals,
        Category::Democrats,
        Category::Designers,
        Category::Directors,
        Category::Djs,
        Category::Executives,
        Category::Golfers,
        Category::Hockey,
        Category::India,
        Category::International,
        Category::Lawyers,
        Category::Mma,
        Category::Models,
        Category::Nba,
        Category::Nfl,
        Category::Olympians,
        Category::Politicians,
        Category::Presidents,
        Category::Producers,
        Category::Racers,
        Category::Rappers,
        Category::Republicans,
        Category::Rockstars,
        Category::Royals,
        Category::Sheiks,
        Category::Singers,
        Category::Skateboarders,
        Category::Soccer,
        Category::Tennis,
        Category::WallStreeters,
        Category::Wrestlers,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            Category::Actors => "actors",
            Category::Athletes => "richest-athletes",
            Category::Authors => "authors",
            Category::Baseball => "richest-baseball",
            Category::Billionaires => "richest-billionaires",
            Category::Bollywood => "bollywood-celebrities",
            Category::Boxers => "richest-boxers",
            Category::Business => "richest-businessmen",
            Category::Celebrities => "richest-celebrities",
            Category::Ceos => "ceos",
            Category::Chefs => "richest-celebrity-chefs",
            Category::Coaches => "richest-coaches",
            Category::Comedians => "richest-comedians",
            Category::Companies => "companies",
            Category::Criminals => "richest-criminals",
            Category::Democrats => "democrats",
            Category::Designers => "richest-designers",
            Category::Directors => "directors",
            Category::Djs => "richest-djs",
            Category::Executives => "business-executives",
            Category::Golfers => "richest-golfers",
            Category::Hockey => "hockey",
            Category::India => "indian-celebrities",
            Category::International => "international-celebrities",
            Category::Lawyers => "lawyers",
            Category::Mma => "mma-net-worth",
            Category::Models => "models",
            Category::Nba => "nba",
            Category::Nfl => "nfl",
            Category::Olympians => "olympians",
            Category::Politicians => "richest-politicians",
            Category::Presidents => "presidents",
            Category::Producers => "producers",
            Category::Racers => "race-car-drivers",
            Category::Rappers => "rappers",
            Category::Republicans => "republicans",
            Category::Rockstars => "rock-stars",
            Category::Royals => "royals",
            Category::Sheiks => "sheiks",
            Category::Singers => "singers",
            Category::Skateboarders => "skateboarders",
            Category::Soccer => "richest-soccer",
            Category::Tennis => "richest-tennis",
            Category::WallStreeters => "wall-street",
            Category::Wrestlers => "wrestlers",
        }
    }
}

impl FromStr for Category {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "actors" => Ok(Category::Actors),
            "athletes" => Ok(Category::Athletes),
            "authors" => Ok(Category::Authors),
            "baseball" => Ok(Category::Baseball),
            "billionaires" => Ok(Category::Billionaires),
            "bollywood" => Ok(Category::Bollywood),
            "boxers" => Ok(Category::Boxers),
            "business" => Ok(Category::Business),
            "celebrities" => Ok(Category::Celebrities),
            "ceos" => Ok(Category::Ceos),
            "chefs" => Ok(Category::Chefs),
            "coaches" => Ok(Category::Coaches),
            "comedians" => Ok(Category::Comedians),
            "companies" => Ok(Category::Companies),
            "criminals" => Ok(Category::Criminals),
            "democrats" => Ok(Category::Democrats),
            "designers" => Ok(Category::Designers),
            "directors" => Ok(Category::Directors),
            "djs" => Ok(Category::Djs),
            "executives" => Ok(Category::Executives),
            "golfers" => Ok(Category::Golfers),
            "hockey" => Ok(Category::Hockey),
            "india" => Ok(Category::India),
            "international" => Ok(Category::International),
            "lawyers" => Ok(Category::Lawyers),
            "mma" => Ok(Category::Mma),
            "models" => Ok(Category::Models),
            "nba" => Ok(Category::Nba),
            "nfl" => Ok(Category::Nfl),
            "olympians" => Ok(Category::Olympians),
            "politicians" => Ok(Category::Politicians),
            "presidents" => Ok(Category::Presidents),
            "producers" => Ok(Category::Producers),
            "racers" => Ok(Category::Racers),
            "rappers" => Ok(Category::Rappers),
            "republicans" => Ok(Category::Republicans),
            "rockstars" => Ok(Category::Rockstars),
            "royals" => Ok(Category::Royals),
            "sheiks" => Ok(Category::Sheiks),
            "singers" => Ok(Category::Singers),
            "skateboarders" => Ok(Category::Skateboarders),
            "soccer" => Ok(Category::Soccer),
            "tennis" => Ok(Category::Tennis),
            "wall_streeters" => Ok(Category::WallStreeters),
            "wrestlers" => Ok(Category::Wrestlers),
            _ => Err(CategoryParseError(s.to_string())),
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Category::Actors => "Actors",
            Category::Athletes => "Athletes",
            Category::Authors => "Authors",
            Category::Baseball => "Baseball Players",
            Category::Billionaires => "Billionaires",
            Category::Bollywood => "Bollywood Celebrities",
            Category::Boxers => "Boxers",
            Category::Business => "Businessmen",
            Category::Celebrities => "Celebrities",
            Category::Ceos => "CEOs",
            Category::Chefs => "Celebrity Chefs",
            Category::Coaches => "Coaches",
            Category::Comedians => "Comedians",
            Category::Companies => "Companies",
            Category::Criminals => "Criminals",
            Category::Democrats => "Democrats",
            Category::Designers => "Designers",
            Category::Directors => "Directors",
            Category::Djs => "DJs",
            Category::Executives => "Business Executives",
            Category::Golfers => "Golfers",
            Category::Hockey => "Hockey Players",
            Category::India => "Indian Celebrities",
            Category::International => "International Celebrities",
            Category::Lawyers => "Lawyers",
            Category::Mma => "MMA Fighters",
            Category::Models => "Models",
            Category::Nba => "NBA Players",
            Category::Nfl => "NFL Players",
            Category::Olympians => "Olympians",
            Category::Politicians => "Politicians",
            Category::Presidents => "Presidents",
            Category::Producers => "Producers",
            Category::Racers => "Race Car Drivers",
            Category::Rappers => "Rappers",
            Category::Republicans => "Republicans",
            Category::Rockstars => "Rock Stars",
            Category::Royals => "Royals",
            Category::Sheiks => "Sheiks",
            Category::Singers => "Singers",
            Category::Skateboarders => "Skateboarders",
            Category::Soccer => "Soccer Players",
            Category::Tennis => "Tennis Players",
            Category::WallStreeters => "Wall Streeters",
            Category::Wrestlers => "Wrestlers",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Invalid location '{0}'. Use a lowercase location name such as 'europe' or 'usa'")]
pub struct LocationParseError(String);

/// Map locations provided by the site's map section, each mapping to a
/// URL path segment under `/map/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    Africa,
    Asia,
    Australia,
    Canada,
    Caribbean,
    CentralAmerica,
    Europe,
    Greenland,
    Iceland,
    India,
    Mexico,
    MiddleEast,
    Russia,
    SouthAmerica,
    Usa,
}

impl Location {
    pub const ALL: [Location; 15] = [
        Location::Africa,
        Location::Asia,
        Location::Australia,
        Location::Canada,
        Location::Caribbean,
        Location::CentralAmerica,
        Location::Europe,
        Location::Greenland,
        Location::Iceland,
        Location::India,
        Location::Mexico,
        Location::MiddleEast,
        Location::Russia,
        Location::SouthAmerica,
        Location::Usa,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            Location::Africa => "africa",
            Location::Asia => "asia",
            Location::Australia => "australia",
            Location::Canada => "canada",
            Location::Caribbean => "caribbean",
            Location::CentralAmerica => "centralamerica",
            Location::Europe => "europe",
            Location::Greenland => "greenland",
            Location::Iceland => "iceland",
            Location::India => "india",
            Location::Mexico => "mexico",
            Location::MiddleEast => "middleeast",
            Location::Russia => "russia",
            Location::SouthAmerica => "southamerica",
            Location::Usa => "united-states",
        }
    }
}

impl FromStr for Location {
    type Err = LocationParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "africa" => Ok(Location::Africa),
            "asia" => Ok(Location::Asia),
            "australia" => Ok(Location::Australia),
            "canada" => Ok(Location::Canada),
            "caribbean" => Ok(Location::Caribbean),
            "central_america" => Ok(Location::CentralAmerica),
            "europe" => Ok(Location::Europe),
            "greenland" => Ok(Location::Greenland),
            "iceland" => Ok(Location::Iceland),
            "india" => Ok(Location::India),
            "mexico" => Ok(Location::Mexico),
            "middle_east" => Ok(Location::MiddleEast),
            "russia" => Ok(Location::Russia),
            "south_america" => Ok(Location::SouthAmerica),
            "usa" => Ok(Location::Usa),
            _ => Err(LocationParseError(s.to_string())),
        }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Location::Africa => "Africa",
            Location::Asia => "Asia",
            Location::Australia => "Australia",
            Location::Canada => "Canada",
            Location::Caribbean => "Caribbean",
            Location::CentralAmerica => "Central America",
            Location::Europe => "Europe",
            Location::Greenland => "Greenland",
            Location::Iceland => "Iceland",
            Location::India => "India",
            Location::Mexico => "Mexico",
            Location::MiddleEast => "Middle East",
            Location::Russia => "Russia",
            Location::SouthAmerica => "South America",
            Location::Usa => "United States",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Invalid sort key '{0}'. Accepted values: 'name', 'worth'")]
pub struct SortKeyParseError(String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Name,
    Worth,
}

impl FromStr for SortKey {
    type Err = SortKeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(SortKey::Name),
            "worth" => Ok(SortKey::Worth),
            _ => Err(SortKeyParseError(s.to_string())),
        }
    }
}

impl Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortKey::Name => write!(f, "name"),
            SortKey::Worth => write!(f, "worth"),
        }
    }
}

/// Connection settings threaded into every fetch batch.
#[derive(Debug, Clone)]
pub struct Options {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub user_agent: Option<String>,
    pub include_description: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(15),
            user_agent: None,
            include_description: true,
        }
    }
}

impl Options {
    pub(crate) fn user_agent_header(&self) -> String {
        self.user_agent.clone().unwrap_or_else(|| {
            format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
        })
    }
}

/// The data collected from one profile page. Stats keep the order the
/// page presents them in and always start with the subject's name; the
/// net worth figure is stored as a plain decimal string of whole dollars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    stats: Vec<(String, String)>,
    description: String,
}

impl Profile {
    pub const NAME: &'static str = "Name";
    pub const NET_WORTH: &'static str = "Net Worth";

    /// Stat labels known to appear on the site's profile pages. Profiles
    /// carry whichever subset their page actually has.
    pub const KNOWN_FIELDS: [&'static str; 9] = [
        "Name",
        "Net Worth",
        "Salary",
        "Date of Birth",
        "Gender",
        "Height",
        "Profession",
        "Nationality",
        "Last Updated",
    ];

    pub(crate) fn new(stats: Vec<(String, String)>, description: String) -> Self {
        Profile { stats, description }
    }

    pub fn name(&self) -> &str {
        self.stat(Self::NAME).unwrap_or("")
    }

    /// The net worth figure as stored: a decimal string of whole dollars,
    /// `"0"` when the page carried none.
    pub fn net_worth_raw(&self) -> &str {
        self.stat(Self::NET_WORTH).unwrap_or("0")
    }

    pub fn net_worth(&self) -> i64 {
        self.net_worth_raw().parse().unwrap_or(0)
    }

    pub fn stat(&self, key: &str) -> Option<&str> {
        self.stats
            .iter()
            .find(|(k, _)| k.as_str() == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn stats(&self) -> impl Iterator<Item = (&str, &str)> {
        self.stats.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

impl Display for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (key, value) in &self.stats {
            if key == Self::NET_WORTH {
                writeln!(f, "{}: {}", key, format_dollars(self.net_worth()))?;
            } else {
                writeln!(f, "{}: {}", key, value)?;
            }
        }
        if self.description.chars().count() > 200 {
            let preview: String = self.description.chars().take(199).collect();
            writeln!(f, "Description: {} ...", preview)
        } else {
            writeln!(f, "Description: {}", self.description)
        }
    }
}

// Serialized by hand so the stats come out as a JSON object in page
// order instead of an array of pairs.
impl Serialize for Profile {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::{SerializeMap, SerializeStruct};

        struct StatsMap<'a>(&'a [(String, String)]);

        impl Serialize for StatsMap<'_> {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                let mut map = serializer.serialize_map(Some(self.0.len()))?;
                for (key, value) in self.0 {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }

        let mut state = serializer.serialize_struct("Profile", 2)?;
        state.serialize_field("stats", &StatsMap(&self.stats))?;
        state.serialize_field("description", &self.description)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(stats: &[(&str, &str)], description: &str) -> Profile {
        Profile::new(
            stats
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            description.to_string(),
        )
    }

    #[test]
    fn test_category_slug_and_parse() {
        assert_eq!(Category::Mma.slug(), "mma-net-worth");
        assert_eq!(Category::WallStreeters.slug(), "wall-street");
        assert_eq!("actors".parse::<Category>().unwrap(), Category::Actors);
        assert_eq!(
            "wall_streeters".parse::<Category>().unwrap(),
            Category::WallStreeters
        );
        assert!("astronauts".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_all_is_complete() {
        assert_eq!(Category::ALL.len(), 45);
        let slugs: std::collections::HashSet<_> =
            Category::ALL.iter().map(|c| c.slug()).collect();
        assert_eq!(slugs.len(), 45);
    }

    #[test]
    fn test_location_slug_and_parse() {
        assert_eq!(Location::Usa.slug(), "united-states");
        assert_eq!("usa".parse::<Location>().unwrap(), Location::Usa);
        assert_eq!(
            "middle_east".parse::<Location>().unwrap(),
            Location::MiddleEast
        );
        assert!("atlantis".parse::<Location>().is_err());
    }

    #[test]
    fn test_sort_key_parse() {
        assert_eq!("name".parse::<SortKey>().unwrap(), SortKey::Name);
        assert_eq!("worth".parse::<SortKey>().unwrap(), SortKey::Worth);
        assert!("height".parse::<SortKey>().is_err());
    }

    #[test]
    fn test_profile_accessors() {
        let p = profile(
            &[("Name", "Elon Musk"), ("Net Worth", "250000000000")],
            "bio",
        );
        assert_eq!(p.name(), "Elon Musk");
        assert_eq!(p.net_worth_raw(), "250000000000");
        assert_eq!(p.net_worth(), 250_000_000_000);
        assert_eq!(p.stat("Gender"), None);
    }

    #[test]
    fn test_profile_net_worth_defaults_to_zero() {
        let p = profile(&[("Name", "Nobody")], "");
        assert_eq!(p.net_worth_raw(), "0");
        assert_eq!(p.net_worth(), 0);

        let junk = profile(&[("Name", "Nobody"), ("Net Worth", "$1 Billion")], "");
        assert_eq!(junk.net_worth(), 0);
    }

    #[test]
    fn test_profile_display_formats_worth() {
        let p = profile(
            &[("Name", "Elon Musk"), ("Net Worth", "250000000000")],
            "Short bio.",
        );
        let text = p.to_string();
        assert!(text.contains("Net Worth: $250,000,000,000"));
        assert!(text.contains("Description: Short bio."));
    }

    #[test]
    fn test_profile_display_truncates_long_description() {
        let p = profile(&[("Name", "X")], &"a".repeat(300));
        let text = p.to_string();
        assert!(text.contains(" ..."));
        assert!(!text.contains(&"a".repeat(250)));
    }

    #[test]
    fn test_profile_serializes_stats_in_page_order() {
        let p = profile(
            &[("Name", "Elon Musk"), ("Net Worth", "1000"), ("Gender", "Male")],
            "",
        );
        let json = serde_json::to_string(&p).unwrap();
        let name_at = json.find("\"Name\"").unwrap();
        let worth_at = json.find("\"Net Worth\"").unwrap();
        let gender_at = json.find("\"Gender\"").unwrap();
        assert!(name_at < worth_at && worth_at < gender_at);
    }
}
