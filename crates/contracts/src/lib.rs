//! Wire types and form rules shared by the booking frontend.
//!
//! Nothing in here touches the browser: the materials rule engine, the scope
//! generator and the read-endpoint DTOs are plain Rust and unit-tested with
//! `cargo test -p contracts`.

pub mod domain;
pub mod shared;
