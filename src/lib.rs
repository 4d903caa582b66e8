//! Connectivity probe for a JSON-RPC pubsub endpoint.
//!
//! Opens one websocket, sends one `signatureSubscribe` request and waits for
//! one reply. The library exposes the pieces so tests can point the probe at
//! a mock endpoint; the binary wires them to the command line.

pub mod config;
pub mod jsonrpc;
pub mod probe;
