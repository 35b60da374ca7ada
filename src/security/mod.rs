//! Trust-on-first-use gating for repository-local files the host would execute.

mod trust;

pub use trust::{hash_file, trust_db_path, trust_db_path_from, TrustError, TrustStatus, TrustStore};
