//! OpenSearch implementation of the cluster client.
//!
//! This module provides a concrete implementation of `ClusterClient`
//! using OpenSearch as the backend.

mod client;

pub use client::OpenSearchClusterClient;
