use anyhow::{Context, Result};
use clap::Subcommand;
use searchwire::{Client, ClusterHealthOptions, QueryParams};
use serde_json::Value;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show cluster health
    Health {
        /// Comma-separated indexes to restrict the report to
        #[arg(short, long)]
        indexes: Option<String>,

        /// cluster, indices or shards
        #[arg(long, default_value = "cluster")]
        level: String,

        /// Block until the cluster reaches green, yellow or red
        #[arg(long)]
        wait_for_status: Option<String>,

        /// Seconds the server waits for --wait-for-status
        #[arg(long, default_value = "30")]
        wait_timeout: u64,
    },

    /// Dump the cluster state
    State,

    /// Show node information
    Nodes {
        /// Comma-separated node ids
        nodes: Option<String>,
    },

    /// Run a search
    Search {
        /// Comma-separated indexes (empty for all)
        indexes: String,

        /// Query body as JSON
        query: String,

        /// Comma-separated document types
        #[arg(short = 't', long)]
        types: Option<String>,
    },

    /// Count documents matching a query
    Count {
        /// Comma-separated indexes (empty for all)
        indexes: String,

        /// Query body as JSON
        query: String,

        /// Comma-separated document types
        #[arg(short = 't', long)]
        types: Option<String>,
    },

    /// Fetch a document
    Get {
        index: String,
        doc_type: String,
        id: String,
    },

    /// Index a document
    Index {
        index: String,
        doc_type: String,

        /// Document body as JSON
        doc: String,

        /// Document id; omitted lets the server assign one
        #[arg(long)]
        id: Option<String>,

        /// Fail instead of overwriting an existing document
        #[arg(long)]
        create: bool,
    },

    /// Delete a document
    Delete {
        index: String,
        doc_type: String,
        id: String,
    },

    /// Create an index
    CreateIndex {
        index: String,

        /// Index settings as JSON
        #[arg(long)]
        settings: Option<String>,
    },

    /// Delete an index
    DeleteIndex { index: String },

    /// Refresh indexes
    Refresh {
        /// Comma-separated indexes (empty for all)
        indexes: Option<String>,
    },
}

fn split_list(list: Option<&str>) -> Vec<&str> {
    list.map(|l| l.split(',').map(str::trim).filter(|s| !s.is_empty()).collect())
        .unwrap_or_default()
}

fn parse_json(label: &str, raw: &str) -> Result<Value> {
    serde_json::from_str(raw).with_context(|| format!("{} is not valid JSON", label))
}

/// Run one command and return the decoded reply
pub fn run(client: &Client, command: &Command) -> Result<Value> {
    let reply = match command {
        Command::Health {
            indexes,
            level,
            wait_for_status,
            wait_timeout,
        } => {
            let mut options = ClusterHealthOptions::default()
                .level(level.as_str())
                .timeout_secs(*wait_timeout);
            if let Some(status) = wait_for_status {
                options = options.wait_for_status(status.as_str());
            }
            client.cluster_health(&split_list(indexes.as_deref()), &options)?
        }
        Command::State => client.cluster_state()?,
        Command::Nodes { nodes } => client.cluster_nodes(&split_list(nodes.as_deref()))?,
        Command::Search {
            indexes,
            query,
            types,
        } => client.search(
            &parse_json("query", query)?,
            &split_list(Some(indexes.as_str())),
            &split_list(types.as_deref()),
            QueryParams::new(),
        )?,
        Command::Count {
            indexes,
            query,
            types,
        } => client.count(
            &parse_json("query", query)?,
            &split_list(Some(indexes.as_str())),
            &split_list(types.as_deref()),
            QueryParams::new(),
        )?,
        Command::Get {
            index,
            doc_type,
            id,
        } => client.get(index, doc_type, id)?,
        Command::Index {
            index,
            doc_type,
            doc,
            id,
            create,
        } => client.index(
            &parse_json("document", doc)?,
            index,
            doc_type,
            id.as_deref(),
            *create,
        )?,
        Command::Delete {
            index,
            doc_type,
            id,
        } => client.delete(index, doc_type, id)?,
        Command::CreateIndex { index, settings } => {
            let settings = settings
                .as_deref()
                .map(|s| parse_json("settings", s))
                .transpose()?;
            client.create_index(index, settings.as_ref())?
        }
        Command::DeleteIndex { index } => client.delete_index(index)?,
        Command::Refresh { indexes } => client.refresh(&split_list(indexes.as_deref()))?,
    };

    Ok(reply)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_list() {
        assert_eq!(split_list(Some("a, b,,c")), vec!["a", "b", "c"]);
        assert!(split_list(None).is_empty());
        assert!(split_list(Some("")).is_empty());
    }

    #[test]
    fn test_parse_json_reports_label() {
        let err = parse_json("query", "{nope").unwrap_err();
        assert!(err.to_string().contains("query"));
        assert_eq!(parse_json("doc", r#"{"a":1}"#).unwrap()["a"], 1);
    }
}
