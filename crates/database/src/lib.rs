//! # nsgate Database Crate
//!
//! A connection façade over an external, blocking database driver.
//!
//! ## Architectural Principles
//!
//! - **Explicit sessions:** there is no process-wide client. `establish` runs the
//!   sign-in and namespace-selection handshake and hands back a `Session` the
//!   caller owns. `Session::close` ends the connection; dropping a session
//!   without closing it leaves the driver to its own `Drop` behaviour.
//! - **Deadline-bounded waits:** driver calls block and cannot be interrupted.
//!   The session runs each one on Tokio's blocking pool and races it against a
//!   `DeadlineSignal`, so callers are released at the deadline even when the
//!   driver is not. Abandoned calls finish in the background.
//! - **Declared concurrency:** the `Driver` trait requires `Send + Sync`, and the
//!   session additionally serializes calls unless configured otherwise.
//!
//! ## Public API
//!
//! - `Driver`: the blocking driver contract the façade is written against.
//! - `establish` / `establish_with`: the two-step handshake producing a `Session`.
//! - `Session::execute_with_deadline`: the cancellable query executor.
//! - `DeadlineSignal`: the caller-supplied timeout/cancellation signal.
//! - `DbError`: the error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod deadline;
pub mod driver;
pub mod error;
mod executor;
pub mod request;
pub mod session;

// Re-export the key components to create a clean, public-facing API.
pub use connection::{establish, establish_with};
pub use deadline::{CancelReason, DeadlineSignal};
pub use driver::{Capabilities, Credentials, Driver, DriverError, Vars};
pub use error::DbError;
pub use request::QueryRequest;
pub use session::Session;
