//! Minimal CDP (Chrome DevTools Protocol) client
//!
//! Three layers: [`Transport`] owns the Chrome process and the WebSocket,
//! [`Connection`] issues browser-level commands, [`Session`] issues
//! page-level commands against one attached target.

pub mod connection;
pub mod transport;
pub mod types;

pub use connection::{Connection, Session};
pub use transport::{CdpEvent, Transport};
