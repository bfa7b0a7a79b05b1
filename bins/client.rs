//! Walks through every outbound call shape once: plain GET, streamed GET,
//! GET with query, timed GET, decoded GET, JSON POST and form POSTs.
//! Any failure stops the run.

use std::time::Duration;

use common::{
    issuer::Issuer,
    placeholder::{echo_form, PlaceholderClient},
    utils::service::init_service,
};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let ctx = init_service("client", env!("CARGO_PKG_VERSION"));
    let cfg = configs::AppConfig::load_or_env()?.client;
    let client = PlaceholderClient::new(cfg.base_url.as_str(), Duration::from_secs(cfg.timeout_secs))?;

    println!("{}", client.fetch_post(1).await?);

    let mut stdout = tokio::io::stdout();
    let copied = client.stream_post(1, &mut stdout).await?;
    println!("\nnumber of bytes copied: {copied}");

    println!("{}", Issuer::build_url(&client.endpoint("comments"), &[("postId", "2")])?);
    println!("{}", client.fetch_comments_raw(2).await?);

    println!("{}", client.fetch_users_raw().await?);

    let comments = client.fetch_comments(2).await?;
    if let Some(first) = comments.first() {
        info!(name = %first.name, "name of 1st record");
    }

    let reply = client
        .create_post_json(&[
            ("userId", "100"),
            ("id", "101"),
            ("title", "ping ping ping"),
            ("body", "Happiness is an attitude. We either make ourselves miserable, or happy and strong. The amount of work is the same"),
        ])
        .await?;
    println!("{reply}");

    let issuer = Issuer::new(None)?;
    let form = echo_form(
        &issuer,
        &cfg.echo_url,
        &[
            ("userId", "1"),
            ("id", "3"),
            ("title", "sunt aut facere repellat provident occaecati excepturi optio reprehenderit"),
            ("body", "HTTP test server accepting GET/POST requests"),
        ],
    )
    .await?;
    println!("{form}");

    let created = client
        .create_post_form(&[
            ("title", "sunt aut facere repellat provident occaecati excepturi optio reprehenderit"),
            ("body", "HTTP test server accepting GET/POST requests"),
            ("userId", "999"),
            ("id", "9"),
        ])
        .await?;
    info!(title = %created.title, "posted title");

    info!(service = ctx.service, event = "stop", service_id = %ctx.service_id, "client run complete");
    Ok(())
}
