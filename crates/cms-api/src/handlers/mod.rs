//! HTTP handlers

pub mod health;
pub mod menu_items;
pub mod menu_order;
pub mod navigation;
