use crate::models::Article;
use crate::text::word_with_most_vowels;
use anyhow::Result;
use chrono::NaiveDateTime;
use diesel::SqliteConnection;
use serde::{Deserialize, Serialize};

/// An article as served by `GET /api/articles`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ArticleView {
    pub id: i32,
    pub external_id: String,
    #[serde(with = "http_date")]
    pub import_date: NaiveDateTime,
    pub title: String,
    pub description: String,
    #[serde(with = "http_date")]
    pub publication_date: NaiveDateTime,
    pub link: String,
    pub main_picture: String,
    pub word_with_most_vowels: String,
}

impl From<Article> for ArticleView {
    fn from(article: Article) -> Self {
        let word_with_most_vowels = word_with_most_vowels(&article.title).to_owned();
        Self {
            id: article.id,
            external_id: article.external_id,
            import_date: article.import_date,
            title: article.title,
            description: article.description,
            publication_date: article.publication_date,
            link: article.link,
            main_picture: article.main_picture,
            word_with_most_vowels,
        }
    }
}

impl ArticleView {
    /// Reads every stored article; no paging, no caching.
    pub fn list(conn: &mut SqliteConnection) -> Result<Vec<ArticleView>> {
        Ok(Article::all(conn)?
            .into_iter()
            .map(ArticleView::from)
            .collect())
    }
}

mod http_date {
    //! RFC 1123 dates, e.g. `Mon, 02 Jan 2006 15:04:05 GMT`. Stored timestamps are UTC.
    use chrono::NaiveDateTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

    pub fn serialize<S>(date: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&date.format(FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, FORMAT).map_err(serde::de::Error::custom)
    }
}
