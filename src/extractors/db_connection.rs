use crate::db::{Conn, DbPool};
use actix_web::error::ErrorInternalServerError;
use actix_web::{dev, web::Data, Error, FromRequest, HttpRequest};
use futures::future::{ready, Ready};
use std::ops::{Deref, DerefMut};

/// A pooled connection checked out for the duration of one request.
pub struct DbConnection {
    pub conn: Conn,
}

impl Deref for DbConnection {
    type Target = Conn;

    fn deref(&self) -> &Self::Target {
        &self.conn
    }
}

impl DerefMut for DbConnection {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.conn
    }
}

impl FromRequest for DbConnection {
    type Error = Error;
    type Future = Ready<Result<Self, Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut dev::Payload) -> Self::Future {
        let conn = match req.app_data::<Data<DbPool>>() {
            Some(pool) => pool.get().map_err(|e| {
                log::error!("Failed to check out a database connection: {}", e);
                ErrorInternalServerError("database unavailable")
            }),
            None => {
                log::error!("Database pool is not registered as app data");
                Err(ErrorInternalServerError("database unavailable"))
            }
        };
        ready(conn.map(|conn| DbConnection { conn }))
    }
}
