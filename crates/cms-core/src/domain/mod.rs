//! # CMS Core - Domain Module
//! 
//! Domain entities for the menu subsystem.

pub mod actor;
pub mod grant;
pub mod menu_node;
pub mod navigation;
pub mod order;

// Re-export all entities and enums
pub use actor::Actor;
pub use grant::{GroupDefaults, MenuGrant, MenuPermissions};
pub use menu_node::{DocumentRef, MenuNode, MenuNodeId, MenuTarget, MenuType, Placement};
pub use navigation::{CurrentRoute, MenuContext, NavItem, RouteMatcher};
pub use order::{DesiredOrderEntry, ReorderOutcome, SkipReason, SkippedEntry};
