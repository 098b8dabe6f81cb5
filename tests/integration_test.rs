use rest_resource::config::ResourceConfig;
use rest_resource::framework::{LifecycleEvent, LinkTable};
use rest_resource::lifecycle::{setup_tracing, Session};
use rest_resource::model::{FileAttachment, Review, ReviewRequest};
use rest_resource::transport::mock::MockTransport;
use rest_resource::transport::{Method, TransportError};
use serde_json::{json, Value};

fn api_root() -> LinkTable {
    LinkTable::new()
        .with("self", "/api/")
        .with("review_requests", "/api/review-requests/")
}

fn review_request_payload(id: u64) -> Value {
    json!({
        "stat": "ok",
        "review_request": {
            "id": id,
            "summary": "Fix crash on startup",
            "public": false,
            "links": {
                "self": { "href": format!("/api/review-requests/{}/", id) },
                "reviews": { "href": format!("/api/review-requests/{}/reviews/", id) },
                "file_attachments": { "href": format!("/api/review-requests/{}/file-attachments/", id) }
            }
        }
    })
}

/// Saving a review under a review request that was never saved creates the request
/// first, then posts the review to the request's own collection.
#[tokio::test]
async fn test_save_cascades_creation_up_the_chain() {
    setup_tracing();
    let mock = MockTransport::new();
    mock.expect_write(Method::Post, "/api/review-requests/")
        .return_ok(review_request_payload(1));
    mock.expect_write(Method::Post, "/api/review-requests/1/reviews/")
        .return_ok(json!({
            "review": {
                "id": 10,
                "ship_it": true,
                "body_top": "Looks good",
                "links": { "self": { "href": "/api/review-requests/1/reviews/10/" } }
            }
        }));

    let session = Session::new(mock.transport());
    let root = session.root(api_root());
    let request = session.child_of(root, ReviewRequest::new("Fix crash on startup"));
    let review = session.child_of(
        request.clone(),
        Review {
            body_top: Some("Looks good".into()),
            ship_it: true,
            ..Review::default()
        },
    );
    let mut request_events = request.subscribe();

    review.save().await.expect("review save failed");

    assert_eq!(request.id().await, Some(1));
    assert!(request.is_loaded().await);
    assert_eq!(review.id().await, Some(10));
    assert!(review.entity().await.ship_it);

    let requests = mock.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].payload.as_ref().unwrap().body.as_ref(), b"summary=Fix+crash+on+startup");
    assert_eq!(
        requests[1].payload.as_ref().unwrap().body.as_ref(),
        b"body_top=Looks+good&public=false&ship_it=true"
    );

    assert_eq!(request_events.try_recv().unwrap(), LifecycleEvent::Saving);
    assert_eq!(request_events.try_recv().unwrap(), LifecycleEvent::Saved);
    mock.verify();
}

/// An existing parent is fetched, not recreated, before the child is posted.
#[tokio::test]
async fn test_save_fetches_existing_parent_first() {
    let mock = MockTransport::new();
    mock.expect_read("/api/review-requests/1/")
        .return_ok(review_request_payload(1));
    mock.expect_write(Method::Post, "/api/review-requests/1/reviews/")
        .return_ok(json!({ "review": { "id": 3, "links": { "self": { "href": "/api/review-requests/1/reviews/3/" } } } }));

    let session = Session::new(mock.transport());
    let request = session.existing(session.root(api_root()), 1, ReviewRequest::default());
    let review = session.child_of(request.clone(), Review::default());

    review.save().await.unwrap();

    assert_eq!(request.entity().await.summary.as_deref(), Some("Fix crash on startup"));
    assert_eq!(review.id().await, Some(3));
    mock.verify();
}

/// A failing parent stops the chain: the child request is never sent.
#[tokio::test]
async fn test_parent_failure_short_circuits_child() {
    let mock = MockTransport::new();
    mock.expect_write(Method::Post, "/api/review-requests/")
        .return_err(TransportError::from_failure(
            403,
            "Forbidden",
            r#"{"stat": "fail", "err": {"code": 101, "msg": "You don't have permission for this"}}"#,
        ));

    let session = Session::new(mock.transport());
    let request = session.child_of(session.root(api_root()), ReviewRequest::new("x"));
    let review = session.child_of(request.clone(), Review::default());
    let mut review_events = review.subscribe();

    let err = review.save().await.unwrap_err();

    assert_eq!(err.to_string(), "You don't have permission for this");
    assert_eq!(mock.request_count(), 1);
    assert!(review.is_new().await);
    assert_eq!(review_events.try_recv().unwrap(), LifecycleEvent::Saving);
    assert!(review_events.try_recv().is_err());
    mock.verify();
}

/// Uploading an attachment sends one file part and one text part per non-null attribute.
#[tokio::test]
async fn test_file_attachment_upload_is_multipart() {
    let mock = MockTransport::new();
    mock.expect_read("/api/review-requests/1/")
        .return_ok(review_request_payload(1));
    mock.expect_write(Method::Post, "/api/review-requests/1/file-attachments/")
        .return_ok(json!({
            "file_attachment": {
                "id": 4,
                "caption": "Login page",
                "filename": "login.png",
                "url": "/media/uploaded/files/login.png",
                "links": { "self": { "href": "/api/review-requests/1/file-attachments/4/" } }
            }
        }));

    let config = ResourceConfig {
        boundary: Some("-----multipartformboundary1700000000000".into()),
        ..ResourceConfig::default()
    };
    let session = Session::with_config(mock.transport(), config);
    let request = session.existing(session.root(api_root()), 1, ReviewRequest::default());
    let attachment = session.child_of(
        request,
        FileAttachment::with_file("Login page", "login.png", "image/png", vec![0x89u8, 0x50, 0x4e, 0x47]),
    );

    attachment.save().await.unwrap();

    let requests = mock.requests();
    let payload = requests[1].payload.as_ref().unwrap();
    assert_eq!(
        payload.content_type,
        "multipart/form-data; boundary=-----multipartformboundary1700000000000"
    );

    let body = String::from_utf8_lossy(&payload.body);
    let boundary_line = "-------multipartformboundary1700000000000\r\n";
    assert_eq!(body.matches(boundary_line).count(), 2);
    assert_eq!(body.matches("filename=").count(), 1);
    assert!(body.contains("Content-Disposition: form-data; name=\"path\"; filename=\"login.png\"\r\nContent-Type: image/png\r\n"));
    assert!(body.contains("Content-Disposition: form-data; name=\"caption\"\r\n\r\nLogin page\r\n"));
    assert!(body.ends_with("-------multipartformboundary1700000000000--\r\n"));

    let saved = attachment.entity().await;
    assert_eq!(saved.filename.as_deref(), Some("login.png"));
    assert_eq!(attachment.id().await, Some(4));
    mock.verify();
}

/// Without binary body support the file attribute is left out and a plain form is sent.
#[tokio::test]
async fn test_file_attachment_without_binary_support() {
    let mock = MockTransport::new().without_binary_bodies();
    mock.expect_write(Method::Post, "/api/review-requests/1/file-attachments/")
        .return_ok(json!({ "file_attachment": { "id": 2 } }));

    let session = Session::new(mock.transport());
    let parent_links = LinkTable::new()
        .with("file_attachments", "/api/review-requests/1/file-attachments/");
    let attachment = session.child_of(
        session.root(parent_links),
        FileAttachment::with_file("Diagram", "d.svg", "image/svg+xml", b"<svg/>".to_vec()),
    );

    attachment.save().await.unwrap();

    let payload = mock.requests()[0].payload.clone().unwrap();
    assert_eq!(payload.content_type, "application/x-www-form-urlencoded");
    assert_eq!(payload.body.as_ref(), b"caption=Diagram");
    assert!(attachment.is_loaded().await);
}

/// File uploads can be switched off in configuration as well.
#[tokio::test]
async fn test_file_uploads_disabled_by_config() {
    let mock = MockTransport::new();
    mock.expect_write(Method::Post, "/api/review-requests/1/file-attachments/")
        .return_ok(json!({ "file_attachment": { "id": 2 } }));

    let config: ResourceConfig = serde_json::from_value(json!({ "file_uploads": false })).unwrap();
    let session = Session::with_config(mock.transport(), config);
    let attachment = session.child_of(
        session.root(LinkTable::new().with("file_attachments", "/api/review-requests/1/file-attachments/")),
        FileAttachment::with_file("Diagram", "d.svg", "image/svg+xml", b"<svg/>".to_vec()),
    );

    attachment.save().await.unwrap();

    assert!(!mock.requests()[0].payload.as_ref().unwrap().is_multipart());
}

/// Destroying a child makes sure the parent is ready, deletes via the self link,
/// and leaves the object ready to be recreated.
#[tokio::test]
async fn test_destroy_child_of_existing_parent() {
    let mock = MockTransport::new();
    mock.expect_read("/api/review-requests/1/")
        .return_ok(review_request_payload(1));
    mock.expect_read("/api/review-requests/1/reviews/10/")
        .return_ok(json!({ "review": { "id": 10, "links": { "self": { "href": "/api/review-requests/1/reviews/10/" } } } }));
    mock.expect_delete("/api/review-requests/1/reviews/10/")
        .return_ok(Value::Null);

    let session = Session::new(mock.transport());
    let request = session.existing(session.root(api_root()), 1, ReviewRequest::default());
    let review = session.existing(request.clone(), 10, Review::default());

    review.ready().await.unwrap();
    review.destroy().await.unwrap();

    assert!(review.is_new().await);
    assert!(!review.is_loaded().await);
    assert_eq!(review.url().await.as_deref(), Some("/api/review-requests/1/reviews/"));
    mock.verify();
}
