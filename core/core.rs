pub mod config;
pub mod context;
pub mod documents;
pub mod error;
pub mod gather;
pub mod metadata;
pub mod templates;

pub use config::{Config, OutputConfig, OwnerInfo, PaginationConfig};
pub use context::ProjectContext;
pub use documents::{DocumentKind, GeneratedDocument, generate_all, generate_document};
pub use error::{AppError, Result};
pub use gather::{DirectoryTree, TreeEntry, build_tree_from_paths, collect_code_files};
pub use metadata::ProjectMetadata;
