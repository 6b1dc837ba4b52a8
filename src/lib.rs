//! # JDBC Harness
//!
//! JDBC connection-string handling for containerized database test suites.
//!
//! A test suite configures one JDBC URL, starts a database container, and
//! then needs two things derived from that URL:
//! - the bare database name, to create it inside the container
//! - the same URL with its port replaced by the host port the container
//!   published, for the persistence provider
//!
//! ## Quick Start
//!
//! ```rust
//! use std::collections::HashMap;
//! use jdbc_harness::prelude::*;
//!
//! assert_eq!(extract_database_name("jdbc:mysql://localhost:3306/test").unwrap(), "test");
//! assert_eq!(
//!     replace_port("jdbc:mysql://localhost:3306/test", 54321).unwrap(),
//!     "jdbc:mysql://localhost:54321/test"
//! );
//!
//! let config = HarnessConfig::from_toml_with_source(
//!     "[database]\nurl = \"jdbc:postgresql://localhost:5432/pokemon\"\n",
//!     MapEnvSource::new(),
//! )
//! .unwrap();
//! let db = TestDatabase::from_config(&config).unwrap();
//! let ports: HashMap<u16, u16> = HashMap::from([(5432, 32768)]);
//! assert_eq!(
//!     db.persistence_settings(&ports).unwrap().url,
//!     "jdbc:postgresql://localhost:32768/pokemon"
//! );
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// Connection-string classification and rewriting.
pub mod url {
    pub use jdbc_url::*;
}

/// Harness configuration and container port mapping.
pub mod config {
    pub use jdbc_config::*;
}

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::config::{
        ConfigError, HarnessConfig, MapEnvSource, MappedPort, PersistenceSettings, TestDatabase,
    };
    pub use crate::url::{
        JdbcUrl, JdbcUrlError, Vendor, classify, extract_database_name,
        locate_authority_separator, replace_port,
    };
}

// Re-export key types at the crate root
pub use config::{ConfigError, HarnessConfig};
pub use url::{JdbcUrl, JdbcUrlError};
