//! Typed host-service contracts used by the desktop shell.
//!
//! Concrete transports live with the entry layer; this crate holds the traits and the policies
//! that sit on top of them.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod assistant;

pub use assistant::{
    request_with_failover, AssistantError, AssistantFuture, AssistantReply, AssistantRequest,
    AssistantTransport, AssumeOnline, ConnectivityProbe, NoopAssistantTransport,
};
