//! P2000 Storage Array Metrics Collector
//!
//! Polls the management API of an HP StorageWorks P2000 (MSA) storage
//! array and translates selected status and performance fields into
//! timestamped metric observations for a monitoring backend.
//!
//! # Overview
//!
//! The array speaks XML over HTTP(S). One poll cycle authenticates,
//! fetches up to five status/statistics documents, walks their tree
//! shapes, and classifies each interesting field into a typed metric
//! (counter, gauge, rate, percent) with a stable series name.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐      HTTP(S)         ┌──────────────────┐
//! │   P2000     │ ◄─────────────────►  │    Collector     │
//! │   array     │   XML documents      │                  │
//! └─────────────┘                      │  ┌────────────┐  │    PUTVAL     ┌──────────┐
//!                                      │  │  Session   │  │ ────────────► │ collectd │
//!                                      │  │  Client    │  │    stdout     └──────────┘
//!                                      │  └────────────┘  │
//!                                      │  ┌────────────┐  │
//!                                      │  │Classifiers │  │
//!                                      │  └────────────┘  │
//!                                      └──────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`p2000`] - session client and XML document model
//! - [`classify`] - per-document field classifiers
//! - [`metrics`] - metric descriptor types and series naming
//! - [`sink`] - outbound interface to the host monitoring system
//! - [`poller`] - poll cycle orchestration
//! - [`config`] - configuration management
//! - [`error`] - error types

pub mod classify;
pub mod config;
pub mod error;
pub mod metrics;
pub mod p2000;
pub mod poller;
pub mod sink;
