//! Basic Client Example
//!
//! Indexes a couple of documents, searches them and prints cluster health.
//! Expects a cluster listening on 127.0.0.1:9200.
//!
//! Run with: cargo run --example basic_client

use chrono::Utc;
use searchwire::{Client, ClientConfig, ClusterHealthOptions, QueryParams, Timestamp};
use serde_json::json;

fn main() -> searchwire::Result<()> {
    println!("Searchwire Basic Client Example\n");

    let config = ClientConfig::new(vec!["127.0.0.1:9200"]).with_debug(true);
    let client = Client::new(&config)?;
    println!("✅ Client connected to {:?}\n", config.servers);

    let index = "example-tweets";
    client.create_index(index, Some(&json!({"number_of_shards": 1})))?;

    // Documents carry dates in the wire format
    for (id, user) in [("1", "kimchy"), ("2", "shay")] {
        let doc = json!({
            "user": user,
            "message": "trying out the client",
            "post_date": Timestamp::from(Utc::now()),
        });
        let reply = client.index(&doc, index, "tweet", Some(id), false)?;
        println!("📝 Indexed {}: {}", id, reply);
    }

    client.refresh(&[index])?;

    let hits = client.search(
        &json!({"query": {"term": {"user": "kimchy"}}}),
        &[index],
        &["tweet"],
        QueryParams::new(),
    )?;
    println!("\n🔍 Search results: {}", serde_json::to_string_pretty(&hits)?);

    let health = client.cluster_health(&[], &ClusterHealthOptions::default().level("indices"))?;
    println!("\n🩺 Cluster health: {}", health["status"]);

    client.delete_index(index)?;
    Ok(())
}
