use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use std::time::Duration;

use crate::endpoint::Endpoint;
use crate::error::{Error, Result};
use crate::transport::{HttpTransport, Transport};

/// An endpoint paired with the transport bound to it
#[derive(Clone)]
pub struct PooledConnection {
    endpoint: Endpoint,
    transport: Arc<dyn Transport>,
}

impl PooledConnection {
    pub fn new(endpoint: Endpoint, transport: Arc<dyn Transport>) -> Self {
        Self {
            endpoint,
            transport,
        }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }
}

impl std::fmt::Debug for PooledConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PooledConnection")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

/// Fixed set of connections, one per configured endpoint.
///
/// Membership never changes after construction. Selection is uniform random
/// across endpoints; a single-endpoint pool skips the RNG entirely.
pub struct ConnectionPool {
    connections: Vec<PooledConnection>,
    rng: Mutex<StdRng>,
}

impl ConnectionPool {
    /// Open an HTTP transport for every endpoint
    pub fn connect(endpoints: Vec<Endpoint>, timeout: Duration) -> Result<Self> {
        let connections = endpoints
            .into_iter()
            .map(|endpoint| {
                let transport = HttpTransport::new(&endpoint, timeout)?;
                Ok(PooledConnection::new(endpoint, Arc::new(transport)))
            })
            .collect::<Result<Vec<_>>>()?;

        Self::from_connections(connections)
    }

    /// Build a pool over caller-supplied transports
    pub fn from_connections(connections: Vec<PooledConnection>) -> Result<Self> {
        if connections.is_empty() {
            return Err(Error::NoEndpoints);
        }

        Ok(Self {
            connections,
            rng: Mutex::new(StdRng::from_entropy()),
        })
    }

    /// Replace the selection RNG with a seeded one
    pub fn with_seed(self, seed: u64) -> Self {
        self.with_rng(StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = Mutex::new(rng);
        self
    }

    pub fn select(&self) -> &PooledConnection {
        if self.connections.len() == 1 {
            return &self.connections[0];
        }

        let index = self.rng.lock().gen_range(0..self.connections.len());
        &self.connections[index]
    }

    pub fn endpoints(&self) -> impl Iterator<Item = &Endpoint> {
        self.connections.iter().map(|c| c.endpoint())
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}
