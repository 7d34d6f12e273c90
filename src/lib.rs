//! Streaming Random Histogram Forest (RHF) - an online anomaly-detection
//! engine built on an ensemble of Random Histogram Trees maintained
//! incrementally over an unbounded numeric stream.
//!
//! Each incoming vector is scored against the current forest before being
//! absorbed into it; every `W` points the forest is rebuilt from the most
//! recent window, bounding memory and tracking drift. See the module docs
//! under [`forest`] for the public surface.
//!
//! # Example
//!
//! ```
//! use streamrhf::{Engine, EngineConfig};
//!
//! let config = EngineConfig::new(/* dim */ 2, /* trees */ 25, /* height */ 6, /* window */ 64, /* seed */ 42)
//!     .expect("valid configuration");
//! let mut engine = Engine::new(config);
//!
//! let mut scores = Vec::new();
//! for i in 0..200 {
//!     let x = vec![(i as f64 % 10.0) / 10.0, 0.5];
//!     scores.push(engine.update_and_score(&x).unwrap());
//! }
//!
//! let outlier_score = engine.update_and_score(&[5.0, -5.0]).unwrap();
//! println!("anomaly score = {outlier_score:.4}");
//! ```

mod arena;
mod builder;
mod insert;
mod moments;
mod rng_plane;
mod selector;
mod store;

pub mod config;
pub mod error;
pub mod forest;

pub use config::{EngineConfig, NormalizerPolicy};
pub use error::{EngineError, EngineResult};
pub use forest::Engine;
