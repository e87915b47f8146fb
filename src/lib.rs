//! Downloads a remote repository tree (GitHub-style contents API) and
//! compatibility-data documents, and reshapes both into [`tree::Item`]s.

pub mod config;
pub mod downloader;
pub mod tree;

pub use config::{Config, ConfigError, TokenProvider};
pub use downloader::{DownloadError, FlatDataDownloader, TreeDownloader};
pub use tree::{Item, ItemType};
