mod article;
mod article_view;
mod import_record;
pub use article::{Article, ArticleFields, Upserted, DEFAULT_MAIN_PICTURE};
pub use article_view::ArticleView;
pub use import_record::{ImportRecord, NewImportRecord};
