//! # CMS Core
//! 
//! Menu domain, permission ports, and the tree algorithms behind menu
//! reordering and navigation highlighting.

pub mod domain;
pub mod tree;
pub mod authority;
pub mod services;
pub mod repositories;
pub mod error;

// Re-export domain entities
pub use domain::*;
pub use error::DomainError;
pub use tree::MenuTree;
