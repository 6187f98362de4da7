//! Bulk attribute update: the `user set` flow reduced to its core.
//!
//! Builds one PUT descriptor per user id given on the command line, runs the
//! batch, and reports per-user failures without aborting the rest.
//!
//! ```text
//! TICKETING_API_TOKEN=... TICKETING_API_URL=https://api.example.com \
//!     cargo run --example bulk_set -- PUSER01 PUSER02 PUSER03
//! ```

use serde_json::json;
use std::sync::Arc;
use ticketing_client::progress::TracingProgressSink;
use ticketing_client::transport::{HttpTransport, HttpTransportConfig};
use ticketing_client::{BatchExecutor, BatchOptions, Credential, RequestDescriptor};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ticketing_client::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let user_ids: Vec<String> = std::env::args().skip(1).collect();
    if user_ids.is_empty() {
        eprintln!("usage: bulk_set <user-id> [<user-id>...]");
        std::process::exit(2);
    }

    let base_url = std::env::var("TICKETING_API_URL")
        .unwrap_or_else(|_| "https://api.example.com".to_string());
    let credential = Credential::load("api")?;

    let descriptors: Vec<RequestDescriptor> = user_ids
        .iter()
        .map(|id| {
            RequestDescriptor::put(format!("/users/{id}"))
                .with_body(json!({"user": {"id": id, "type": "user", "role": "observer"}}))
        })
        .collect();

    let transport = HttpTransport::new(HttpTransportConfig::new(base_url))?;
    let executor = BatchExecutor::with_options(
        Arc::new(transport),
        BatchOptions::new()
            .with_description(format!("Setting role = 'observer' on {} users", user_ids.len())),
    )
    .with_progress(Arc::new(TracingProgressSink));

    let results = executor.run(descriptors, &credential).await?;

    for index in results.failed_indices() {
        eprintln!(
            "failed to update {}: {}",
            user_ids[index],
            results.formatted_error(index)?
        );
    }
    println!(
        "{} of {} updates applied",
        results.success_count(),
        results.len()
    );

    if !results.all_succeeded() {
        std::process::exit(1);
    }
    Ok(())
}
