use crate::schema::imports;
use anyhow::Result;
use chrono::NaiveDateTime;
use diesel::prelude::*;

/// One entry of the import audit log. Rows are only ever appended.
#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(table_name = imports)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ImportRecord {
    pub id: i32,
    pub import_date: NaiveDateTime,
    pub raw_content: String,
}

/// A snapshot staged before the feed is validated and written only
/// together with the articles it produced.
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = imports)]
pub struct NewImportRecord {
    pub import_date: NaiveDateTime,
    pub raw_content: String,
}

impl NewImportRecord {
    pub fn new(import_date: NaiveDateTime, raw_content: String) -> Self {
        Self {
            import_date,
            raw_content,
        }
    }

    pub fn insert(&self, conn: &mut SqliteConnection) -> Result<ImportRecord> {
        let record = diesel::insert_into(imports::table)
            .values(self)
            .returning(ImportRecord::as_returning())
            .get_result(conn)?;
        Ok(record)
    }
}

impl ImportRecord {
    pub fn all(conn: &mut SqliteConnection) -> Result<Vec<ImportRecord>> {
        let records = imports::table
            .order(imports::id.asc())
            .select(ImportRecord::as_select())
            .load(conn)?;
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_test_pool;
    use chrono::Utc;

    #[test]
    fn test_insert_assigns_sequential_ids() {
        let pool = create_test_pool();
        let mut conn = pool.get().unwrap();
        let now = Utc::now().naive_utc();
        let first = NewImportRecord::new(now, "{\"rss\":null}".to_owned())
            .insert(&mut conn)
            .expect("must succeed");
        let second = NewImportRecord::new(now, "{}".to_owned())
            .insert(&mut conn)
            .expect("must succeed");
        assert_eq!(second.id, first.id + 1);
        assert_eq!(first.raw_content, "{\"rss\":null}");

        let all = ImportRecord::all(&mut conn).unwrap();
        assert_eq!(all, vec![first, second]);
    }
}
