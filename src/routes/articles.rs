use super::MessageResponse;
use crate::error::ImportError;
use crate::extractors::DbConnection;
use crate::import::Importer;
use crate::models::ArticleView;
use actix_web::{get, post, web, HttpResponse};
use anyhow::anyhow;
use serde::Deserialize;

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ImportQuery {
    site_rss_url: Option<String>,
}

#[get("/api/articles")]
pub async fn list_articles(mut conn: DbConnection) -> HttpResponse {
    let articles = web::block(move || ArticleView::list(&mut conn))
        .await
        .unwrap_or_else(|e| Err(anyhow!("{}", e)));
    match articles {
        Ok(articles) => HttpResponse::Ok().json(articles),
        Err(e) => {
            log::error!("Failed to list articles: {:#}", e);
            HttpResponse::InternalServerError()
                .json(MessageResponse::new("Error reading articles."))
        }
    }
}

/// A missing `siteRssUrl` is not rejected up front; fetching it fails.
#[post("/api/articles/import")]
pub async fn import_articles(
    importer: web::Data<Importer>,
    query: web::Query<ImportQuery>,
) -> Result<HttpResponse, ImportError> {
    let url = query.site_rss_url.as_deref().unwrap_or_default();
    importer.import_feed(url).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Import successful.")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use crate::models::ImportRecord;
    use actix_web::{test, App};
    use pretty_assertions::assert_eq;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Example</title>
    <item>
      <guid isPermaLink="false">article-1</guid>
      <title>The quick brown fox</title>
      <description>Jumps over the lazy dog</description>
      <pubDate>Mon, 02 Jan 2006 15:04:05 GMT</pubDate>
      <link>https://example.com/article-1</link>
      <enclosure url="https://example.com/fox.jpg" type="image/jpeg" length="1"/>
    </item>
    <item>
      <guid>article-2</guid>
      <title>Sunny afternoon</title>
      <description>Weather</description>
      <pubDate>Tue, 03 Jan 2006 09:00:00 GMT</pubDate>
      <link>https://example.com/article-2</link>
    </item>
  </channel>
</rss>"#;

    async fn serve(status: u16, body: &str) -> MockServer {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&mock_server)
            .await;
        mock_server
    }

    macro_rules! app {
        ($pool:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($pool.clone()))
                    .app_data(web::Data::new(Importer::new(
                        $pool.clone(),
                        reqwest::Client::new(),
                    )))
                    .service(list_articles)
                    .service(import_articles),
            )
            .await
        };
    }

    fn import_request(feed_url: &str) -> test::TestRequest {
        test::TestRequest::post().uri(&format!("/api/articles/import?siteRssUrl={}", feed_url))
    }

    #[actix_rt::test]
    async fn test_import_and_list_articles() {
        let mock_server = serve(200, FEED).await;
        let pool = db::create_test_pool();
        let app = app!(pool);

        let req = import_request(&mock_server.uri()).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 200);
        let body: MessageResponse = test::read_body_json(resp).await;
        assert_eq!(body, MessageResponse::new("Import successful."));

        let req = test::TestRequest::get().uri("/api/articles").to_request();
        let articles: Vec<ArticleView> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].external_id, "article-1");
        assert_eq!(articles[0].title, "The quick brown fox");
        assert_eq!(articles[0].description, "Jumps over the lazy dog");
        assert_eq!(articles[0].link, "https://example.com/article-1");
        assert_eq!(articles[0].main_picture, "https://example.com/fox.jpg");
        assert_eq!(articles[0].word_with_most_vowels, "quick");
        assert_eq!(
            articles[0].publication_date.to_string(),
            "2006-01-02 15:04:05"
        );
        assert_eq!(articles[1].external_id, "article-2");
        assert_eq!(articles[1].main_picture, "default_picture_url");
        assert_eq!(articles[1].word_with_most_vowels, "afternoon");
    }

    #[actix_rt::test]
    async fn test_list_json_field_names() {
        let mock_server = serve(200, FEED).await;
        let pool = db::create_test_pool();
        let app = app!(pool);
        let req = import_request(&mock_server.uri()).to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::get().uri("/api/articles").to_request();
        let articles: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        let mut keys: Vec<&String> = articles[0].as_object().unwrap().keys().collect();
        keys.sort();
        assert_eq!(
            keys,
            vec![
                "description",
                "externalId",
                "id",
                "importDate",
                "link",
                "mainPicture",
                "publicationDate",
                "title",
                "wordWithMostVowels",
            ]
        );
        assert_eq!(articles[0]["publicationDate"], "Mon, 02 Jan 2006 15:04:05 GMT");
    }

    #[actix_rt::test]
    async fn test_list_articles_empty() {
        let pool = db::create_test_pool();
        let app = app!(pool);
        let req = test::TestRequest::get().uri("/api/articles").to_request();
        let articles: Vec<ArticleView> = test::call_and_read_body_json(&app, req).await;
        assert!(articles.is_empty());
    }

    #[actix_rt::test]
    async fn test_import_missing_items() {
        let mock_server = serve(
            200,
            r#"<rss version="2.0"><channel><title>Empty</title></channel></rss>"#,
        )
        .await;
        let pool = db::create_test_pool();
        let app = app!(pool);

        let req = import_request(&mock_server.uri()).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 400);
        let body: MessageResponse = test::read_body_json(resp).await;
        assert_eq!(
            body.message,
            "Invalid XML format: missing required elements."
        );
        let mut conn = pool.get().unwrap();
        assert!(ImportRecord::all(&mut conn).unwrap().is_empty());
    }

    #[actix_rt::test]
    async fn test_import_fetch_failure() {
        let mock_server = serve(404, "").await;
        let pool = db::create_test_pool();
        let app = app!(pool);

        let req = import_request(&mock_server.uri()).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 500);
        let body: MessageResponse = test::read_body_json(resp).await;
        assert_eq!(body.message, "Error retrieving RSS feed.");
    }

    #[actix_rt::test]
    async fn test_import_without_url() {
        let pool = db::create_test_pool();
        let app = app!(pool);

        let req = test::TestRequest::post()
            .uri("/api/articles/import")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 500);
        let body: MessageResponse = test::read_body_json(resp).await;
        assert_eq!(body.message, "Error retrieving RSS feed.");
    }

    #[actix_rt::test]
    async fn test_import_malformed_xml() {
        let mock_server = serve(200, "<rss><channel><item></channel></rss>").await;
        let pool = db::create_test_pool();
        let app = app!(pool);

        let req = import_request(&mock_server.uri()).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 500);
        let body: MessageResponse = test::read_body_json(resp).await;
        assert_eq!(body.message, "Error parsing XML.");
    }
}
