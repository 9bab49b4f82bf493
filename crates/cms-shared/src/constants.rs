//! Application-wide constants

/// Namespace prefix shared by all administrative routes.
pub const DEFAULT_ADMIN_NAMESPACE_PREFIX: &str = "admin:";
/// Route parameter carrying a document slug.
pub const DEFAULT_DOCUMENT_SLUG_PARAM: &str = "title";
/// Deepest level a menu node may live at (root = 1).
pub const MAX_MENU_DEPTH: usize = 3;
pub const MAX_LINK_LENGTH: usize = 255;
pub const ANONYMOUS_GROUP: &str = "Anonymous";
pub const ACTOR_ID_HEADER: &str = "x-actor-id";
