use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

/// Keys accepted in the YAML block at the top of a post.
#[derive(Debug, Deserialize)]
pub struct FrontMatter {
    pub title: String,
    pub date: String,
    pub author: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BlogPost {
    pub slug: String,
    pub title: String,
    pub date: String,
    pub author: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub body: String,
}

/// A post as shown in the listing: everything but the body.
#[derive(Debug, Serialize)]
pub struct PostSummary<'a> {
    pub slug: &'a str,
    pub title: &'a str,
    pub date: &'a str,
    pub author: Option<&'a str>,
    pub description: Option<&'a str>,
    pub tags: &'a [String],
}

impl BlogPost {
    pub fn from_front_matter(slug: String, front_matter: FrontMatter, body: String) -> Self {
        Self {
            slug,
            title: front_matter.title,
            date: front_matter.date,
            author: front_matter.author,
            description: front_matter.description,
            tags: front_matter.tags,
            body,
        }
    }

    pub fn summary(&self) -> PostSummary<'_> {
        PostSummary {
            slug: &self.slug,
            title: &self.title,
            date: &self.date,
            author: self.author.as_deref(),
            description: self.description.as_deref(),
            tags: &self.tags,
        }
    }

    /// Publication day, accepting `YYYY-MM-DD` or a full RFC 3339 timestamp.
    pub fn published_on(&self) -> Option<NaiveDate> {
        let date = self.date.trim();
        NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .ok()
            .or_else(|| DateTime::parse_from_rfc3339(date).ok().map(|dt| dt.date_naive()))
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}
