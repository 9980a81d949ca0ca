use std::path::PathBuf;

use techchat::core::catalog::LoadError;
use techchat::core::navigation::{InputStyle, Session};
use techchat::source::{CatalogSource, DocumentEntry, FileSource, HttpSource, LoadPlan, build_source, load_catalog};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

// ============================================================================
// Helper Functions
// ============================================================================

const HTML_DOC: &str = r#"{"Balises": [{"balise": "div", "définition": "Generic container"}]}"#;
const CSS_DOC: &str = r#"{"Propriétés": [{"propriété": "color", "syntaxe": "color: red;"}]}"#;

fn plan(entries: &[(&str, &str)]) -> LoadPlan {
    LoadPlan::Documents(
        entries
            .iter()
            .map(|(technology, document)| DocumentEntry {
                technology: technology.to_string(),
                document: document.to_string(),
            })
            .collect(),
    )
}

/// Creates a fresh directory under the system temp dir holding `files`.
fn temp_catalog(name: &str, files: &[(&str, &str)]) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("techchat-{}-{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    for (file, contents) in files {
        std::fs::write(dir.join(file), contents).unwrap();
    }
    dir
}

async fn serve(server: &MockServer, route: &str, status: u16, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(server)
        .await;
}

// ============================================================================
// HTTP Source Tests
// ============================================================================

#[tokio::test]
async fn test_http_loads_documents_in_plan_order() {
    let mock_server = MockServer::start().await;
    serve(&mock_server, "/data/html.json", 200, HTML_DOC).await;
    serve(&mock_server, "/data/css.json", 200, CSS_DOC).await;

    let source = HttpSource::new(format!("{}/data", mock_server.uri()));
    let catalog = load_catalog(&plan(&[("HTML5", "html.json"), ("CSS3", "css.json")]), &source)
        .await
        .unwrap();

    assert_eq!(catalog.technology_count(), 2);
    assert_eq!(catalog.technologies()[0].name, "HTML5");
    assert_eq!(catalog.category(1, 0).unwrap().name, "Propriétés");
    assert!(catalog.item(0, 0, 0).is_some());
}

#[tokio::test]
async fn test_http_404_is_unreachable() {
    let mock_server = MockServer::start().await;
    serve(&mock_server, "/html.json", 200, HTML_DOC).await;
    serve(&mock_server, "/php.json", 404, "not found").await;

    let source = HttpSource::new(mock_server.uri());
    let err = load_catalog(&plan(&[("HTML5", "html.json"), ("PHP", "php.json")]), &source)
        .await
        .unwrap_err();

    match err {
        LoadError::Unreachable { source, reason } => {
            assert!(source.ends_with("/php.json"));
            assert_eq!(reason, "HTTP 404");
        }
        other => panic!("expected Unreachable, got {other:?}"),
    }
}

#[tokio::test]
async fn test_http_malformed_json_is_parse_error() {
    let mock_server = MockServer::start().await;
    serve(&mock_server, "/sql.json", 200, "{\"Requêtes\": [").await;

    let source = HttpSource::new(mock_server.uri());
    let err = load_catalog(&plan(&[("SQL", "sql.json")]), &source)
        .await
        .unwrap_err();

    assert!(matches!(err, LoadError::Parse { .. }), "got {err:?}");
}

#[tokio::test]
async fn test_http_bundle() {
    let mock_server = MockServer::start().await;
    serve(
        &mock_server,
        "/data.json",
        200,
        r#"{"JavaScript": {"Fonctions": [{"fonction": "map"}, {"fonction": "filter"}]}, "PHP": {}}"#,
    )
    .await;

    let source = build_source(&mock_server.uri());
    assert_eq!(source.name(), mock_server.uri());
    let catalog = load_catalog(&LoadPlan::Bundle("data.json".into()), source.as_ref())
        .await
        .unwrap();

    assert_eq!(catalog.technology_count(), 2);
    assert_eq!(catalog.item_count(), 2);
    assert!(catalog.technology(1).unwrap().categories.is_empty());
}

#[tokio::test]
async fn test_http_unreachable_server() {
    // Nothing listens on port 9 (discard) in the test environment
    let source = HttpSource::new("http://127.0.0.1:9");
    let err = load_catalog(&plan(&[("HTML5", "html.json")]), &source)
        .await
        .unwrap_err();
    assert!(matches!(err, LoadError::Unreachable { .. }));
}

// ============================================================================
// File Source Tests
// ============================================================================

#[tokio::test]
async fn test_file_source_reads_directory() {
    let dir = temp_catalog("files", &[("html.json", HTML_DOC), ("css.json", CSS_DOC)]);

    let source = FileSource::new(&dir);
    let catalog = load_catalog(&plan(&[("HTML5", "html.json"), ("CSS3", "css.json")]), &source)
        .await
        .unwrap();
    assert_eq!(catalog.item_count(), 2);

    std::fs::remove_dir_all(&dir).ok();
}

#[tokio::test]
async fn test_file_source_missing_document() {
    let dir = temp_catalog("missing", &[("html.json", HTML_DOC)]);

    let source = build_source(&dir.display().to_string());
    let err = load_catalog(&plan(&[("HTML5", "html.json"), ("SQL", "sql.json")]), source.as_ref())
        .await
        .unwrap_err();
    match err {
        LoadError::Unreachable { source, .. } => assert!(source.ends_with("sql.json")),
        other => panic!("expected Unreachable, got {other:?}"),
    }

    std::fs::remove_dir_all(&dir).ok();
}

// ============================================================================
// End to End
// ============================================================================

#[tokio::test]
async fn test_loaded_catalog_drives_a_session() {
    let mock_server = MockServer::start().await;
    serve(&mock_server, "/html.json", 200, HTML_DOC).await;

    let source = HttpSource::new(mock_server.uri());
    let result = load_catalog(&plan(&[("HTML5", "html.json")]), &source).await;
    let mut session = Session::from_load(result, InputStyle::Menu);

    session.start();
    session.handle_input("1");
    session.handle_input("1");
    let reply = session.handle_input("1");

    let messages = reply.messages();
    assert!(messages.iter().any(|m| m.contains("div")));
    assert!(messages.iter().any(|m| m.contains("Definition: Generic container")));
}

#[tokio::test]
async fn test_failed_load_session_reports_error() {
    let mock_server = MockServer::start().await;
    serve(&mock_server, "/html.json", 500, "boom").await;

    let source = HttpSource::new(mock_server.uri());
    let result = load_catalog(&plan(&[("HTML5", "html.json")]), &source).await;
    let mut session = Session::from_load(result, InputStyle::Menu);

    let reply = session.start();
    assert!(reply.last_options().is_none());
    assert!(session.load_error().is_some());
    let reply = session.handle_input("1");
    assert!(
        reply
            .messages()
            .iter()
            .any(|m| m.contains("error occurred while loading"))
    );
}

#[tokio::test]
async fn test_bundled_data_matches_default_config() {
    use techchat::core::config::{CliOverrides, TechchatConfig, resolve};

    let root = format!("{}/data", env!("CARGO_MANIFEST_DIR"));
    let config = resolve(
        &TechchatConfig::default(),
        &CliOverrides {
            catalog: Some(&root),
            ..Default::default()
        },
    );
    let source = build_source(&config.location);
    let catalog = load_catalog(&config.plan, source.as_ref()).await.unwrap();

    let names: Vec<&str> = catalog.technologies().iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, ["HTML5", "CSS3", "JavaScript", "PHP", "SQL"]);
    assert!(catalog.technologies().iter().all(|t| !t.categories.is_empty()));
}
