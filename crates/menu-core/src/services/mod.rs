//! Domain services (business logic)

pub mod menu_service;
pub mod requests;

pub use menu_service::{MenuService, MenuServiceBuilder};
pub use requests::{
    ItemPlacement, MenuItemUpdate, MenuUpdate, NewMenu, NewMenuItem, TranslationSpec,
};
