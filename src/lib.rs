//! TCP service exposing a robot's joint-angle state.
//!
//! The service holds one shared angle frame (four opaque bytes per joint)
//! and answers three four-byte commands over persistent TCP connections:
//! `getn` lists the joint names, `getj` returns the current frame, `setj`
//! replaces it. See `README.md` for the wire protocol. Each module focuses
//! on a concrete responsibility:
//!
//! - [`cli`] parses the command-line interface for the service and the
//!   query/send tools.
//! - [`server`] accepts TCP connections and drives one request-reply task
//!   per peer.
//! - [`protocol`] classifies inbound messages and produces replies against
//!   the store.
//! - [`store`] owns the joint-name table and the mutex-guarded angle frame.
//! - [`client`] connects to a running service the way the production angle
//!   sender does.
//!
//! Integration tests use this crate directly to serve on ephemeral ports
//! and exercise the wire protocol with raw sockets.

pub mod cli;
pub mod client;
pub mod protocol;
pub mod server;
pub mod store;
