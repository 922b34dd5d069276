//! # lexnet-engine
//!
//! The public face of lexnet. Most users only need [`LexNet`].
//!
//! ```no_run
//! use lexnet_engine::{Config, LexNet, Metric};
//!
//! let config = Config::from_paths("cdb_lu.xml", "cdb_syn.xml").with_counts("counts.txt");
//! let net = LexNet::open(config)?;
//!
//! let answer = net.ask("taal + spraak")?;
//! let score = net.similarity(Metric::Lin, "kat:noun:1", "hond:noun:1")?;
//! # Ok::<(), lexnet_engine::Error>(())
//! ```
//!
//! | Module | Purpose |
//! | ------ | ------- |
//! | [`database`] | The [`LexNet`] handle: loading, queries, inspection |
//! | [`query`] | Query options, execution and answers |
//! | [`similarity`] | Information-content similarity measures |
//! | [`config`] | Limits and settings |
//! | [`admin`] | Serializable descriptions of the network and its records |

pub mod admin;
pub mod config;
pub mod database;
pub mod query;
pub mod similarity;

pub use admin::{NetworkInfo, NetworkState, SubsumerInfo, SynsetInfo, UnitInfo};
pub use config::{Config, ConfigError, SensePolicy, SimilarityConfig};
pub use database::{LexNet, Sources};
pub use query::{
    Answer, LookupResult, PathResult, QueryOptions, RelationResult, RelationShape, RelationTree,
};
pub use similarity::Metric;

pub use lexnet_adapters::Source;
pub use lexnet_common::utils::error::{Error, Result};
pub use lexnet_core::{CancellationToken, LoadReport, Truncation};
