//! Typed environment variable configuration with mode-specific overlays
//!
//! `envmode` reads application configuration from process environment
//! variables. A [`Config`] picks a mode (production, staging or development),
//! merges the matching `.env` overlay file into the environment and then
//! resolves keys, optionally behind a prefix.
//!
//! # Features
//!
//! - **Mode overlays**: `.env`, `.env.staging` or `.env.development`, chosen
//!   by `APP_ENV` or by which files exist
//! - **Accessor chain**: `required()` / `default()` followed by a typed
//!   terminal, strict (`int()`) or soft (`int_or(8080)`)
//! - **Declarative**: fill a struct with `#[derive(Populate)]`
//! - **Prefixes**: `APP_PORT` looked up as `PORT` behind the `APP_` prefix
//!
//! # Value Parsing
//!
//! - Integers: base 10, `MAX_CONNECTIONS=42`
//! - Floats: `RATIO=0.75`, `LIMIT=1.5e3`
//! - Booleans: `true`, `1`, `yes`, `y` (any case) are true, everything else false
//! - Durations: `TIMEOUT=1h30m45s`, `POLL=500ms`, `SKEW=-2s`
//! - Lists: `HOSTS=a, b, c`
//! - Maps: `LABELS=team:core,tier:backend`
//!
//! # Example
//!
//! ```rust
//! use envmode::{populate, LookupResult, Populate};
//! use std::collections::HashMap;
//!
//! #[derive(Debug, Default, Populate)]
//! struct AppConfig {
//!     #[env(name = "APP_NAME", default = "DefaultApp")]
//!     pub app_name: String,
//!
//!     #[env(default = 8080)]
//!     pub port: u16,
//!
//!     pub allowed_origins: Vec<String>,
//! }
//!
//! # fn main() -> Result<(), envmode::Error> {
//! let env = HashMap::from([
//!     ("SVC_PORT".to_string(), "9000".to_string()),
//!     ("SVC_ALLOWED_ORIGINS".to_string(), "a.com, b.com".to_string()),
//! ]);
//!
//! let mut config = AppConfig::default();
//! populate(&mut config, &env, "SVC_")?;
//! assert_eq!(config.app_name, "DefaultApp");
//! assert_eq!(config.port, 9000);
//! assert_eq!(config.allowed_origins, vec!["a.com", "b.com"]);
//!
//! let retries = LookupResult::new("RETRIES", "").default("3").int_or(1);
//! assert_eq!(retries, 3);
//! # Ok(())
//! # }
//! ```
//!
//! # Attributes
//!
//! ## `#[env(name = "KEY")]`
//!
//! Look the field up under `KEY` instead of its upper-cased name. An empty
//! name behaves as if the attribute were absent.
//!
//! ## `#[env(default = "literal")]`
//!
//! Coerce `literal` when the variable is unset or empty. Integer, float and
//! boolean literals are accepted too and used as written.
//!
//! ## `#[env(skip)]`
//!
//! Leave the field alone.
//!
//! ## `#[env(deserializer = "path::to::fn")]`
//!
//! Parse the value with a `fn(&str) -> Result<T, E>` instead of the built-in
//! coercions, for types the populator does not support.
//!
//! ```rust
//! # use envmode::{populate, Populate};
//! # use std::collections::HashMap;
//! #[derive(Default, Populate)]
//! struct Limits {
//!     #[env(deserializer = "serde_json::from_str")]
//!     pub weights: Vec<u32>,
//! }
//!
//! # fn main() -> Result<(), envmode::Error> {
//! let env = HashMap::from([("WEIGHTS".to_string(), "[1, 2, 3]".to_string())]);
//! let mut limits = Limits::default();
//! populate(&mut limits, &env, "")?;
//! assert_eq!(limits.weights, vec![1, 2, 3]);
//! # Ok(())
//! # }
//! ```
//!
//! # Supported field types
//!
//! `String`, `i8`..`i64`, `isize`, `u8`..`u64`, `usize`, `f32`, `f64`, `bool`,
//! `chrono::TimeDelta`, `std::time::Duration`, `Vec<String>`,
//! `HashMap<String, String>`, `BTreeMap<String, String>` and `Option` of any
//! of these. Other types, nested structs included, fail with
//! [`Error::Unsupported`] once a value is found for them.

mod config;
pub mod duration;
mod error;
mod lookup;
pub mod parse;
#[doc(hidden)]
pub mod populate;
mod source;

pub use config::{Config, ConfigBuilder, Mode, MODE_VAR};
pub use envmode_derive::Populate;
pub use error::{CoerceError, Error, LookupError};
pub use lookup::LookupResult;
pub use populate::{populate, FieldDescriptor, FieldValue, Populate, TargetKind};
pub use source::{ProcessEnv, Source};

// Duration accessors and fields use `chrono::TimeDelta`
pub use chrono;
