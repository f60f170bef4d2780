//! Connection traits at the store boundary
//!
//! The adapter never looks inside a connection: it submits a [`Request`],
//! receives a [`Response`], and asks for the timings of the last call.

use crate::error::Result;
use crate::request::Request;
use crate::response::Response;
use std::fmt;
use std::sync::Arc;

/// Everything needed to open a connection.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectParams {
    /// Store URL, e.g. `tcp://localhost:15006`
    pub url: String,
    /// Database name
    pub database: String,
    /// Authentication user
    pub user: String,
    /// Authentication password
    pub password: String,
    /// Account identifier
    pub account: String,
}

impl fmt::Debug for ConnectParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectParams")
            .field("url", &self.url)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("account", &self.account)
            .finish()
    }
}

/// A single open connection to the store.
///
/// Connections are owned by one adapter instance and used from one thread
/// at a time.
pub trait StoreConnection: Send {
    /// Submit a request and wait for its response.
    ///
    /// A returned `Response` may still carry a store error; `Err` means no
    /// response was obtained.
    fn send(&mut self, request: &Request) -> Result<Response>;

    /// Wall time of the last `send`, request build through response parse, in seconds.
    fn last_request_duration(&self) -> f64;

    /// Time the last `send` spent on the network, in seconds.
    fn last_network_duration(&self) -> f64;

    /// Close the connection. Further sends fail.
    fn close(&mut self) -> Result<()>;
}

/// Opens connections to a store.
pub trait Connector: Send + Sync {
    /// Connection type produced by this connector.
    type Connection: StoreConnection;

    /// Open a new connection.
    fn connect(&self, params: &ConnectParams) -> Result<Self::Connection>;
}

impl<C: Connector> Connector for Arc<C> {
    type Connection = C::Connection;

    fn connect(&self, params: &ConnectParams) -> Result<Self::Connection> {
        (**self).connect(params)
    }
}
