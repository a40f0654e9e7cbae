//! Configuration modules.
//!
//! Each submodule handles one aspect of configuration, loaded from
//! environment variables with development defaults. All configuration is
//! constructed explicitly at startup and injected through
//! [`crate::state::AppState`]; there are no module-level singletons.

pub mod cors;
pub mod database;
pub mod email;
pub mod jwt;
pub mod storage;
