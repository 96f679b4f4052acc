//! # Menu Core
//!
//! Menu hierarchy management and navigation-resolution engine: domain
//! entities, repository ports and the orchestrating menu service. Storage
//! agnostic; persistence lives behind the ports.

pub mod activity;
pub mod config;
pub mod domain;
pub mod error;
pub mod hierarchy;
pub mod identity;
pub mod navigation;
pub mod reconcile;
pub mod repositories;
pub mod services;

// Re-export the surface most callers need
pub use activity::{ActivityEmitter, ActivityEvent, NoopActivityEmitter};
pub use config::MenuServiceConfig;
pub use domain::*;
pub use error::DomainError;
pub use navigation::{PageUrlResolver, UrlResolver};
pub use reconcile::ReconcileReport;
pub use services::{
    ItemPlacement, MenuItemUpdate, MenuService, MenuServiceBuilder, MenuUpdate, NewMenu,
    NewMenuItem, TranslationSpec,
};
