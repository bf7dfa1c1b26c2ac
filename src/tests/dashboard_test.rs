use std::time::Duration;

use super::upstream_mock::{seed, start_gateway, MockUpstream, UPSTREAM_KEY};
use crate::client::{
    ClientError, FileManager, HttpFilesApi, ManualClock, MutationPhase, ProviderFilter, Session,
    UploadFile, UploadForm,
};
use crate::config::Config;
use crate::constants::SUCCESS_DISPLAY;

async fn signed_in(gateway_url: &str) -> FileManager<HttpFilesApi, ManualClock> {
    let mut session = Session::new(HttpFilesApi::new(gateway_url).unwrap());
    session.login(UPSTREAM_KEY).await.unwrap();
    FileManager::new(session.api().clone(), ManualClock::new())
}

fn ids(fm: &FileManager<HttpFilesApi, ManualClock>) -> Vec<String> {
    fm.files().iter().map(|f| f.id.clone()).collect()
}

#[actix_rt::test]
async fn test_size_filter_end_to_end() {
    let upstream = MockUpstream::start(seed());
    let gateway = start_gateway(Config::default().with_upstream(upstream.url()));
    let clock = ManualClock::new();

    let mut session = Session::new(HttpFilesApi::new(&gateway.url).unwrap());
    session.login(UPSTREAM_KEY).await.unwrap();
    let mut fm = FileManager::new(session.api().clone(), clock.clone());

    assert!(fm.sync().await.unwrap());
    assert_eq!(ids(&fm), vec!["f3", "f2", "f1"]);

    fm.set_filter_size_min("500");
    assert!(!fm.sync().await.unwrap());
    clock.advance(Duration::from_millis(500));
    assert!(fm.sync().await.unwrap());
    assert_eq!(ids(&fm), vec!["f3", "f2"]);

    let listing = upstream
        .state
        .requests()
        .into_iter()
        .filter(|r| r.query.contains("sizeFrom"))
        .collect::<Vec<_>>();
    assert_eq!(listing.len(), 1);
    assert_eq!(listing[0].query, "order=desc&sizeFrom=500");

    gateway.stop().await;
    upstream.stop().await;
}

#[actix_rt::test]
async fn test_provider_filter_applies_without_debounce() {
    let upstream = MockUpstream::start(seed());
    let gateway = start_gateway(Config::default().with_upstream(upstream.url()));
    let mut fm = signed_in(&gateway.url).await;

    fm.sync().await.unwrap();
    fm.set_filter_provider(ProviderFilter::parse("imagekit"));
    assert!(fm.sync().await.unwrap());
    assert_eq!(ids(&fm), vec!["f2"]);

    gateway.stop().await;
    upstream.stop().await;
}

#[actix_rt::test]
async fn test_delete_selection_then_revalidate() {
    let upstream = MockUpstream::start(seed());
    let gateway = start_gateway(Config::default().with_upstream(upstream.url()));
    let clock = ManualClock::new();

    let mut session = Session::new(HttpFilesApi::new(&gateway.url).unwrap());
    session.login(UPSTREAM_KEY).await.unwrap();
    let mut fm = FileManager::new(session.api().clone(), clock.clone());
    fm.sync().await.unwrap();

    fm.toggle_select("f1");
    fm.toggle_select("f3");
    assert_eq!(fm.delete(None).await.unwrap(), 2);
    assert_eq!(fm.delete_status().phase(), &MutationPhase::Success { count: 2 });

    let delete = upstream
        .state
        .requests()
        .into_iter()
        .find(|r| r.method == "DELETE")
        .expect("delete request");
    assert_eq!(delete.query, "id=f1&id=f3");

    clock.advance(SUCCESS_DISPLAY);
    assert!(fm.sync().await.unwrap());
    assert!(fm.selection().is_empty());
    assert_eq!(ids(&fm), vec!["f2"]);

    let last = upstream.state.requests().pop().unwrap();
    assert_eq!(last.method, "GET");
    assert!(last.query.ends_with("revalidate=true"));

    gateway.stop().await;
    upstream.stop().await;
}

#[actix_rt::test]
async fn test_upload_reaches_upstream() {
    let upstream = MockUpstream::start(vec![]);
    let gateway = start_gateway(Config::default().with_upstream(upstream.url()));
    let mut fm = signed_in(&gateway.url).await;
    fm.sync().await.unwrap();
    fm.open_upload();

    let form = UploadForm {
        provider: "imagekit".to_string(),
        path: "/docs".to_string(),
        ..UploadForm::default()
    }
    .with_file(UploadFile::new("notes.txt", "hello world"))
    .with_file(UploadFile::new("raw.bin", vec![0u8; 32]).with_content_type("application/x-raw"));

    fm.upload(form, None).await.unwrap();
    assert!(!fm.upload_open());

    fm.sync().await.unwrap();
    let mut files = fm.files().to_vec();
    files.sort_by(|a, b| a.name.cmp(&b.name));
    assert_eq!(files.len(), 2);

    assert_eq!(files[0].name, "notes.txt");
    assert_eq!(files[0].path, "/docs");
    assert_eq!(files[0].size, 11);
    assert_eq!(files[0].mimetype, "text/plain");
    assert_eq!(files[0].provider.as_str(), "imagekit");

    assert_eq!(files[1].name, "raw.bin");
    assert_eq!(files[1].mimetype, "application/x-raw");

    gateway.stop().await;
    upstream.stop().await;
}

#[actix_rt::test]
async fn test_revoked_key_signs_out() {
    let upstream = MockUpstream::start(seed());
    let gateway = start_gateway(Config::default().with_upstream(upstream.url()));
    let mut fm = signed_in(&gateway.url).await;
    fm.sync().await.unwrap();

    upstream.state.revoke_key();
    fm.refresh();

    assert_eq!(fm.sync().await.unwrap_err(), ClientError::Unauthorized);
    assert!(fm.signed_out());
    assert_eq!(ids(&fm).len(), 3);
    assert!(!fm.api().dashboard_accessible().await.unwrap());

    gateway.stop().await;
    upstream.stop().await;
}
