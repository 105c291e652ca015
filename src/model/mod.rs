// src/model/mod.rs
use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::warn;

/// The bar chart never shows more than this many sources.
pub const MAX_TOP_SOURCES: usize = 10;

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RawSource {
    pub name: Option<String>,
}

/// An article exactly as the search API returns it. Every field is optional
/// here; shape validation happens in [`Article::from_raw`].
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RawArticle {
    pub title: Option<String>,
    pub url: Option<String>,
    pub source: Option<RawSource>,
    #[serde(rename = "publishedAt")]
    pub published_at: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedArticle {
    MissingTitle,
    MissingUrl,
    MissingSource,
}

impl fmt::Display for MalformedArticle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedArticle::MissingTitle => write!(f, "article has no title"),
            MalformedArticle::MissingUrl => write!(f, "article has no url"),
            MalformedArticle::MissingSource => write!(f, "article has no source name"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Article {
    pub title: String,
    pub url: String,
    pub source_name: String,
    pub published_raw: String,
    pub published: Option<DateTime<Utc>>,
}

impl Article {
    pub fn from_raw(raw: RawArticle) -> Result<Article, MalformedArticle> {
        let title = raw.title.ok_or(MalformedArticle::MissingTitle)?;
        let url = raw.url.ok_or(MalformedArticle::MissingUrl)?;
        let source_name = raw
            .source
            .and_then(|s| s.name)
            .ok_or(MalformedArticle::MissingSource)?;

        let published_raw = raw.published_at.unwrap_or_default();
        let published = DateTime::parse_from_rfc3339(&published_raw)
            .ok()
            .map(|dt| dt.with_timezone(&Utc));

        Ok(Article {
            title,
            url,
            source_name,
            published_raw,
            published,
        })
    }

    /// Publish time at minute precision; falls back to the raw string when
    /// the timestamp did not parse.
    pub fn published_label(&self) -> String {
        match self.published {
            Some(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
            None => self.published_raw.clone(),
        }
    }
}

/// One row of the dashboard table: a validated article plus the derived
/// country guess.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub article: Article,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArticleTable {
    /// Rows in the order the API returned them.
    pub rows: Vec<Row>,
    /// Articles dropped because a required field was missing.
    pub malformed: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryCount {
    pub country: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceCount {
    pub source: String,
    pub count: usize,
}

impl ArticleTable {
    pub fn from_articles(articles: &[RawArticle]) -> ArticleTable {
        let mut rows = Vec::with_capacity(articles.len());
        let mut malformed = 0;

        for raw in articles {
            match Article::from_raw(raw.clone()) {
                Ok(article) => {
                    let country = derive_country(&article.source_name);
                    rows.push(Row { article, country });
                }
                Err(err) => {
                    malformed += 1;
                    warn!(%err, "skipping malformed article");
                }
            }
        }

        ArticleTable { rows, malformed }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn country_counts(&self) -> Vec<CountryCount> {
        counted(self.rows.iter().map(|r| r.country.as_str()))
            .into_iter()
            .map(|(country, count)| CountryCount { country, count })
            .collect()
    }

    pub fn top_sources(&self, limit: usize) -> Vec<SourceCount> {
        let mut sources: Vec<SourceCount> =
            counted(self.rows.iter().map(|r| r.article.source_name.as_str()))
                .into_iter()
                .map(|(source, count)| SourceCount { source, count })
                .collect();
        sources.truncate(limit);
        sources
    }
}

/// Best-effort country guess: the last space-delimited token of the source
/// name. Single-token names yield themselves. Deliberately naive: it is
/// not checked against any real country list, and the map layer simply
/// skips names it cannot place.
pub fn derive_country(source_name: &str) -> String {
    source_name
        .split(' ')
        .next_back()
        .unwrap_or(source_name)
        .to_string()
}

/// First character uppercased, the rest lowercased.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

/// Group-by-count, descending; ties break on name so output is stable.
fn counted<'a>(values: impl Iterator<Item = &'a str>) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for value in values {
        *counts.entry(value).or_default() += 1;
    }

    let mut out: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(name, count)| (name.to_string(), count))
        .collect();
    out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    out
}
