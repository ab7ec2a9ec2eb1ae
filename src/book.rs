use serde::{Deserialize, Serialize};
use std::fmt;

pub mod format;
pub mod sort;


/// One record from the `docs` array of an Open Library search response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_name: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_publish_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isbn: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_pages_median: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub docs: Vec<Book>,
}

impl Book {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Year used for ordering; unknown years sort as 0.
    pub fn sort_year(&self) -> i32 {
        self.first_publish_year.unwrap_or(0)
    }

    pub fn first_isbn(&self) -> Option<&str> {
        self.isbn
            .as_ref()
            .and_then(|isbn| isbn.first())
            .map(String::as_str)
    }

    pub fn authors(&self) -> Option<String> {
        self.author_name.as_ref().map(|names| names.join(", "))
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)?;
        if let Some(authors) = self.authors().filter(|a| !a.is_empty()) {
            write!(f, " by {}", authors)?;
        }
        if let Some(year) = self.first_publish_year {
            write!(f, " ({})", year)?;
        }
        Ok(())
    }
}
