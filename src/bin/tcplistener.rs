//! Accepts connections one at a time and prints each parsed request.

use anyhow::Context;
use rawhttp::config::Config;
use rawhttp::http::connection::Connection;
use rawhttp::http::request::Request;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = Config::load()?;

    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_max_level(cfg.max_level()?)
        .init();

    let listener = TcpListener::bind(&cfg.listen_addr)
        .await
        .with_context(|| format!("binding {}", cfg.listen_addr))?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    loop {
        let (socket, peer) = listener.accept().await?;
        tracing::info!("Accepted connection from {}", peer);

        let mut conn = Connection::new(socket, cfg.read_buffer_size);
        match conn.read_request().await {
            Ok(Some(req)) => print_request(&req),
            Ok(None) => tracing::info!("Connection from {} closed without a request", peer),
            Err(e) => tracing::error!("Bad request from {}: {}", peer, e),
        }
    }
}

fn print_request(req: &Request) {
    println!("Request line:");
    println!("- Method: {}", req.request_line.method);
    println!("- Target: {}", req.request_line.target);
    println!("- Version: {}", req.request_line.version);
    println!("Headers:");
    req.headers.for_each(|name, value| println!("- {name}: {value}"));
    println!("Body:");
    println!("{}", String::from_utf8_lossy(&req.body));
}
