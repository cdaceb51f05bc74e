//! Development server for cozyterm
//!
//! A minimal static file server for `index.html` and the wasm-bindgen
//! output in `pkg/`. No dependencies beyond tiny_http.

use std::fs;
use std::io::Cursor;
use std::path::{Component, Path};
use tiny_http::{Header, Response, Server};

const DEFAULT_PORT: u16 = 8080;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let port = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_PORT);

    let addr = format!("0.0.0.0:{}", port);
    let server = match Server::http(&addr) {
        Ok(server) => server,
        Err(e) => {
            log::error!("failed to start server on {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    println!("┌─────────────────────────────────────┐");
    println!("│  cozyterm dev server                │");
    println!("├─────────────────────────────────────┤");
    println!("│  http://localhost:{:<18}│", port);
    println!("└─────────────────────────────────────┘");

    for request in server.incoming_requests() {
        // Fragments never reach the server; drop any query string
        let url_path = request.url().split('?').next().unwrap_or("/").to_string();
        let file_path = if url_path == "/" {
            "index.html".to_string()
        } else {
            url_path.trim_start_matches('/').to_string()
        };

        let response = serve_file(&file_path);
        log::info!("{} {} -> {}", request.method(), url_path, response.status_code().0);
        if let Err(e) = request.respond(response) {
            log::warn!("failed to respond: {}", e);
        }
    }
}

fn content_type(value: &str) -> Option<Header> {
    Header::from_bytes("Content-Type", value).ok()
}

fn respond(data: Vec<u8>, status: u16, mime: &str) -> Response<Cursor<Vec<u8>>> {
    let response = Response::from_data(data).with_status_code(status);
    match content_type(mime) {
        Some(header) => response.with_header(header),
        None => response,
    }
}

fn serve_file(path: &str) -> Response<Cursor<Vec<u8>>> {
    let path = Path::new(path);

    // Stay inside the serving directory
    if path
        .components()
        .any(|c| !matches!(c, Component::Normal(_)))
    {
        return respond(b"403 Forbidden".to_vec(), 403, "text/plain");
    }

    match fs::read(path) {
        Ok(contents) => respond(contents, 200, mime_type(path)),
        Err(_) => respond(b"404 Not Found".to_vec(), 404, "text/plain"),
    }
}

fn mime_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html") => "text/html; charset=utf-8",
        Some("js") => "application/javascript",
        Some("wasm") => "application/wasm",
        Some("css") => "text/css",
        Some("json") => "application/json",
        Some("png") => "image/png",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("pdf") => "application/pdf",
        _ => "application/octet-stream",
    }
}
