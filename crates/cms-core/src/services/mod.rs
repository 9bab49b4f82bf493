//! Use cases over the menu tree

pub mod menu_service;
pub mod navigation_service;
pub mod reorder_service;

pub use menu_service::{MenuNodeChanges, MenuService, NewMenuNode};
pub use navigation_service::NavigationService;
pub use reorder_service::ReorderService;
