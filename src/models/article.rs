use crate::schema::articles;
use anyhow::Result;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::upsert::excluded;

/// Stored as `main_picture` when a feed item carries no enclosure url.
pub const DEFAULT_MAIN_PICTURE: &str = "default_picture_url";

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(table_name = articles)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Article {
    pub id: i32,
    pub external_id: String,
    pub import_date: NaiveDateTime,
    pub title: String,
    pub description: String,
    pub publication_date: NaiveDateTime,
    pub link: String,
    pub main_picture: String,
}

/// The feed-sourced side of an article, keyed by `external_id`.
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleFields<'a> {
    pub external_id: &'a str,
    pub title: &'a str,
    pub description: &'a str,
    pub publication_date: NaiveDateTime,
    pub link: &'a str,
    pub main_picture: &'a str,
}

#[derive(Insertable)]
#[diesel(table_name = articles)]
struct NewArticle<'a> {
    pub external_id: &'a str,
    pub import_date: NaiveDateTime,
    pub title: &'a str,
    pub description: &'a str,
    pub publication_date: NaiveDateTime,
    pub link: &'a str,
    pub main_picture: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upserted {
    Created,
    Updated,
}

impl Article {
    pub fn find_by_external_id(
        conn: &mut SqliteConnection,
        external_id: &str,
    ) -> Result<Option<Article>> {
        let article = articles::table
            .filter(articles::external_id.eq(external_id))
            .select(Article::as_select())
            .first(conn)
            .optional()?;
        Ok(article)
    }

    pub fn all(conn: &mut SqliteConnection) -> Result<Vec<Article>> {
        let articles = articles::table
            .order(articles::id.asc())
            .select(Article::as_select())
            .load(conn)?;
        Ok(articles)
    }

    /// Creates the article on first sighting of its external id, otherwise
    /// overwrites the mutable fields in place.
    ///
    /// The write is a single `ON CONFLICT` statement, so two imports racing on
    /// the same new external id end with one row. `id` and `import_date`
    /// are never touched by the update branch.
    pub fn upsert(
        conn: &mut SqliteConnection,
        fields: &ArticleFields,
        import_date: NaiveDateTime,
    ) -> Result<(Article, Upserted)> {
        let outcome = match Self::find_by_external_id(conn, fields.external_id)? {
            Some(_) => Upserted::Updated,
            None => Upserted::Created,
        };
        let new_article = NewArticle {
            external_id: fields.external_id,
            import_date,
            title: fields.title,
            description: fields.description,
            publication_date: fields.publication_date,
            link: fields.link,
            main_picture: fields.main_picture,
        };
        let article = diesel::insert_into(articles::table)
            .values(&new_article)
            .on_conflict(articles::external_id)
            .do_update()
            .set((
                articles::title.eq(excluded(articles::title)),
                articles::description.eq(excluded(articles::description)),
                articles::publication_date.eq(excluded(articles::publication_date)),
                articles::link.eq(excluded(articles::link)),
                articles::main_picture.eq(excluded(articles::main_picture)),
            ))
            .returning(Article::as_returning())
            .get_result(conn)?;
        Ok((article, outcome))
    }
}
