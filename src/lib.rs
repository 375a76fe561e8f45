//! FWMS - Firewall Management System rule codec
//!
//! The rule serialization core of a firewall template manager: bidirectional
//! transformation between an in-memory rule model and the textual wire
//! formats deployed devices understand.
//!
//! # Architecture
//!
//! - [`core`] - Rule model, line codecs, template assembler, direct-mode translator
//! - [`validators`] - Input validation for the rule editor and CLI
//! - [`config`] - Configuration persistence
//! - [`utils`] - Utility functions (XDG directories)
//!
//! # Wire formats
//!
//! 1. Filter CLI-flag lines (`agent -m=insert -c=INPUT -p=tcp ... -a=DROP`)
//! 2. NAT CLI-flag lines (`agent -m=insert -t=nat --nat-type=dnat ...`)
//! 3. The legacy pipe-delimited smartfw form (write-only for NAT; consumed
//!    as input by the direct-mode translator for filter rules)
//!
//! All codec operations are pure functions over immutable input text; there
//! is no shared state and every failure is local to one line.

// Allow pedantic clippy warnings that are not worth fixing for this codebase
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::missing_errors_doc)]

pub mod config;
pub mod core;
pub mod utils;
pub mod validators;

// Re-export commonly used types
pub use core::error::{Error, LineError, Result};
pub use core::firewall::{Action, Chain, FirewallRule, Protocol, ProtocolOptions};
pub use core::nat::{NatRule, NatType};
pub use core::template::{ParsedTemplate, Template};
