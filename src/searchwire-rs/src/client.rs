use searchwire_core::codec;
use searchwire_core::path::{join, join_or_all, make_path};
use searchwire_core::{
    ClientConfig, ConnectionPool, Dispatcher, Method, QueryParams, RenderQuery, RequestLogger,
    Result, Servers,
};
use serde::Serialize;
use serde_json::Value;

/// Search cluster REST API client
///
/// Every operation blocks the calling thread for one HTTP round-trip and
/// returns the decoded JSON reply. A `Client` can be shared across threads.
pub struct Client {
    dispatcher: Dispatcher,
}

impl Client {
    /// Build a client from configuration, logging as the config asks
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            dispatcher: Dispatcher::from_config(config)?,
        })
    }

    /// Connect to one or more servers with default settings
    pub fn connect(servers: impl Into<Servers>) -> Result<Self> {
        Self::new(&ClientConfig::new(servers))
    }

    /// Build a client from configuration with an injected logger
    pub fn with_logger(config: &ClientConfig, logger: RequestLogger) -> Result<Self> {
        let pool = ConnectionPool::connect(config.endpoints()?, config.timeout())?;
        Ok(Self {
            dispatcher: Dispatcher::new(pool, logger).with_error_on_status(config.error_on_status),
        })
    }

    /// Build a client over an existing pool
    pub fn from_pool(pool: ConnectionPool, logger: RequestLogger) -> Self {
        Self {
            dispatcher: Dispatcher::new(pool, logger),
        }
    }

    pub fn from_dispatcher(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Raw access for endpoints without a dedicated method
    pub fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        params: &QueryParams,
    ) -> Result<Value> {
        self.dispatcher.send(method, path, body, params)
    }

    /// Index a typed JSON document.
    ///
    /// Without an id the server assigns one (POST); with an id the document
    /// is created or replaced (PUT). `force_insert` refuses to overwrite.
    pub fn index<D: Serialize + ?Sized>(
        &self,
        doc: &D,
        index: &str,
        doc_type: &str,
        id: Option<&str>,
        force_insert: bool,
    ) -> Result<Value> {
        let body = codec::to_value(doc)?;

        let mut params = QueryParams::new();
        if force_insert {
            params.insert("opType", "create");
        }

        let method = match id {
            Some(_) => Method::Put,
            None => Method::Post,
        };
        let path = make_path([index, doc_type, id.unwrap_or("")]);
        self.send(method, &path, Some(&body), &params)
    }

    pub fn get(&self, index: &str, doc_type: &str, id: &str) -> Result<Value> {
        let path = make_path([index, doc_type, id]);
        self.send(Method::Get, &path, None, &QueryParams::new())
    }

    pub fn delete(&self, index: &str, doc_type: &str, id: &str) -> Result<Value> {
        let path = make_path([index, doc_type, id]);
        self.send(Method::Delete, &path, None, &QueryParams::new())
    }

    /// Run a query; empty `indexes` searches `_all`
    pub fn search<Q: RenderQuery + ?Sized>(
        &self,
        query: &Q,
        indexes: &[&str],
        doc_types: &[&str],
        params: QueryParams,
    ) -> Result<Value> {
        self.query_call("_search", query.render(), indexes, doc_types, params)
    }

    /// Count hits; builders render their count-specific body
    pub fn count<Q: RenderQuery + ?Sized>(
        &self,
        query: &Q,
        indexes: &[&str],
        doc_types: &[&str],
        params: QueryParams,
    ) -> Result<Value> {
        self.query_call("_count", query.render_count(), indexes, doc_types, params)
    }

    /// Term frequencies for the given fields
    pub fn terms(&self, fields: &[&str], indexes: &[&str], params: QueryParams) -> Result<Value> {
        let path = make_path([join_or_all(indexes).as_str(), "_terms"]);
        let params = params.with("fields", join(fields));
        self.send(Method::Get, &path, None, &params)
    }

    /// Documents similar to the one identified by `id`
    pub fn more_like_this(
        &self,
        index: &str,
        doc_type: &str,
        id: &str,
        fields: &[&str],
        params: QueryParams,
    ) -> Result<Value> {
        let path = make_path([index, doc_type, id, "_mlt"]);
        let params = params.with("fields", join(fields));
        self.send(Method::Get, &path, None, &params)
    }

    fn query_call(
        &self,
        query_type: &str,
        body: Value,
        indexes: &[&str],
        doc_types: &[&str],
        params: QueryParams,
    ) -> Result<Value> {
        let path = make_path([
            join_or_all(indexes).as_str(),
            join(doc_types).as_str(),
            query_type,
        ]);
        self.send(Method::Get, &path, Some(&body), &params)
    }
}
