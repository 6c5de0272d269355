pub mod auth;
pub mod catalog;
pub mod menu_resolver;
pub mod menu_service;
