use std::fmt::Display;

/// Genre value meaning "no filter"
pub const UNFILTERED_GENRE: &str = "All";

/// Deterministic encoding of one filter/search/page combination
///
/// Used directly as the cache key; the `Display` form (`page-year-genre-search`,
/// with `null` for an unset year) is the serialized encoding used in logs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MovieQuery {
    /// 1-based page number
    pub page: u32,
    /// Release-year filter; `None` means no year selected
    pub year: Option<i32>,
    /// UI genre value; [`UNFILTERED_GENRE`] means unfiltered
    pub genre: String,
    /// Committed free-text search term
    pub search: String,
}

impl MovieQuery {
    /// The genre value sent over the wire: the unfiltered sentinel maps to
    /// an empty string, which the proxy omits upstream
    pub fn wire_genre(&self) -> &str {
        if self.genre == UNFILTERED_GENRE {
            ""
        } else {
            &self.genre
        }
    }
}

impl Display for MovieQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.year {
            Some(year) => write!(
                f,
                "{}-{}-{}-{}",
                self.page, year, self.genre, self.search
            ),
            None => write!(f, "{}-null-{}-{}", self.page, self.genre, self.search),
        }
    }
}
