//! Minimal HTTP surface for FluxNote.
//!
//! # Responsibility
//! - Answer `GET /` with a static status message and the current time.
//! - Leave every other route to Rocket's default 404 catcher.
//!
//! Notes themselves are not served over HTTP.

use fluxnote_core::clock::iso_now;
use log::info;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::Header;
use rocket::serde::json::Json;
use rocket::{get, routes, Build, Request, Response, Rocket};
use serde::Serialize;

pub const HEALTH_MESSAGE: &str = "Flux API Server is running!";

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub message: &'static str,
    /// ISO-8601 UTC, millisecond precision.
    pub timestamp: String,
}

#[get("/")]
fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        message: HEALTH_MESSAGE,
        timestamp: iso_now(),
    })
}

/// Adds a permissive `Access-Control-Allow-Origin` header to every response.
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "permissive CORS",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
    }
}

/// Builds the server with Rocket's figment configuration
/// (`Rocket.toml` / `ROCKET_*` environment).
pub fn build_rocket() -> Rocket<Build> {
    info!("event=server_build module=server status=ok routes=1");
    rocket::build().mount("/", routes![health]).attach(Cors)
}
