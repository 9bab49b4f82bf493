use std::sync::Arc;

use cms_core::authority::{GrantAuthority, MenuAuthority};
use cms_core::repositories::{ActorRepository, GrantRepository, MenuRepository};
use cms_core::services::{MenuService, NavigationService, ReorderService};
use cms_core::RouteMatcher;

#[derive(Clone)]
pub struct AppState {
    pub actors: Arc<dyn ActorRepository>,
    pub menus: Arc<MenuService>,
    pub reorder: Arc<ReorderService>,
    pub navigation: Arc<NavigationService>,
}

impl AppState {
    /// Wires the services over one set of repositories, with grant-based
    /// authority.
    pub fn new(
        menus: Arc<dyn MenuRepository>,
        grants: Arc<dyn GrantRepository>,
        actors: Arc<dyn ActorRepository>,
        matcher: RouteMatcher,
    ) -> Self {
        let authority: Arc<dyn MenuAuthority> = Arc::new(GrantAuthority::new(grants.clone()));
        Self {
            actors,
            menus: Arc::new(MenuService::new(menus.clone(), grants, authority.clone())),
            reorder: Arc::new(ReorderService::new(menus.clone(), authority.clone())),
            navigation: Arc::new(NavigationService::new(menus, authority, matcher)),
        }
    }
}
