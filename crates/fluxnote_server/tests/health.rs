use fluxnote_server::{build_rocket, HEALTH_MESSAGE};
use rocket::http::Status;
use rocket::local::blocking::Client;

fn client() -> Client {
    Client::tracked(build_rocket()).unwrap()
}

#[test]
fn root_returns_message_and_iso_timestamp() {
    let client = client();
    let response = client.get("/").dispatch();
    assert_eq!(response.status(), Status::Ok);
    assert_eq!(
        response.headers().get_one("Access-Control-Allow-Origin"),
        Some("*")
    );

    let body: serde_json::Value = response.into_json().unwrap();
    assert_eq!(body["message"], HEALTH_MESSAGE);
    let timestamp = body["timestamp"].as_str().unwrap();
    assert_eq!(timestamp.len(), "2024-01-01T00:00:00.000Z".len());
    assert_eq!(&timestamp[4..5], "-");
    assert_eq!(&timestamp[10..11], "T");
    assert!(timestamp.ends_with('Z'));
}

#[test]
fn unknown_route_returns_not_found() {
    let client = client();
    let response = client.get("/unknown").dispatch();
    assert_eq!(response.status(), Status::NotFound);
}
