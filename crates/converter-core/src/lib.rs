//! Bangla Converter core
//!
//! Local user accounts and the conversion history, both kept in one SQLite
//! file, plus the dispatcher that runs conversions and records them.

pub mod activity;
pub mod config;
pub mod context;
pub mod convert;
pub mod credentials;
pub mod db;
pub mod error;
pub mod locale;
pub mod password;
pub mod paths;
pub mod theme;

pub use activity::{ActivityLog, ActivityRecord, DEFAULT_RECENT_LIMIT};
pub use config::{AppConfig, ToolSettings};
pub use context::AppContext;
pub use convert::{ConversionKind, ConvertError, Converter, Dispatcher, ExternalToolConverter};
pub use credentials::CredentialStore;
pub use db::Database;
pub use error::{Result, StoreError};
pub use locale::{Language, Messages};
pub use password::PasswordScheme;
pub use theme::{Palette, Theme};
