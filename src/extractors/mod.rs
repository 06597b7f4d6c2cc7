mod db_connection;
pub use db_connection::DbConnection;
