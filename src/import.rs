use crate::db::DbPool;
use crate::error::ImportError;
use crate::feed::{self, tree, FeedDocument};
use crate::models::{Article, NewImportRecord, Upserted};
use actix_web::web;
use anyhow::anyhow;
use chrono::Utc;
use diesel::SqliteConnection;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub import_id: i32,
    pub created: usize,
    pub updated: usize,
}

/// Pulls a remote feed into the article store.
///
/// Stages run strictly in order: fetch, parse, snapshot, item extraction,
/// commit. The audit snapshot and every article write share one transaction,
/// so a failure at any stage leaves the store untouched.
#[derive(Clone)]
pub struct Importer {
    pool: DbPool,
    client: reqwest::Client,
}

impl Importer {
    pub fn new(pool: DbPool, client: reqwest::Client) -> Self {
        Self { pool, client }
    }

    pub async fn import_feed(&self, url: &str) -> Result<ImportSummary, ImportError> {
        let result = self.run(url).await;
        match &result {
            Ok(summary) => log::info!(
                "Imported {}: {} created, {} updated (import #{})",
                url,
                summary.created,
                summary.updated,
                summary.import_id
            ),
            Err(e @ ImportError::Persistence(_)) => log::error!("Import of {} failed: {}", url, e),
            Err(e) => log::warn!("Import of {} failed: {}", url, e),
        }
        result
    }

    async fn run(&self, url: &str) -> Result<ImportSummary, ImportError> {
        let body = feed::fetch(&self.client, url).await?;
        let pool = self.pool.clone();
        web::block(move || reconcile(&pool, &body))
            .await
            .map_err(|e| ImportError::Persistence(anyhow!("{}", e)))?
    }
}

fn reconcile(pool: &DbPool, body: &[u8]) -> Result<ImportSummary, ImportError> {
    let tree = tree::parse(body)?;
    let now = Utc::now().naive_utc();
    let record = NewImportRecord::new(now, tree.to_string());
    // nothing has been written yet, so a bad feed leaves no audit row behind
    let document = FeedDocument::from_tree(&tree)?;

    let mut conn = pool
        .get()
        .map_err(|e| ImportError::Persistence(e.into()))?;
    let conn: &mut SqliteConnection = &mut conn;
    conn.immediate_transaction::<_, anyhow::Error, _>(|conn| {
        let record = record.insert(conn)?;
        let mut summary = ImportSummary {
            import_id: record.id,
            created: 0,
            updated: 0,
        };
        for item in &document.items {
            match Article::upsert(conn, &item.article_fields(), now)? {
                (_, Upserted::Created) => summary.created += 1,
                (_, Upserted::Updated) => summary.updated += 1,
            }
        }
        Ok(summary)
    })
    .map_err(ImportError::Persistence)
}
