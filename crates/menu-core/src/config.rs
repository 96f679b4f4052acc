//! Service configuration

/// Behavioral switches of the menu service.
#[derive(Debug, Clone, Copy, Default)]
pub struct MenuServiceConfig {
    /// Accept items whose parent does not exist yet (stored as a pending
    /// reference, resolved by reconciliation). Also defers page-target
    /// existence checks so seed data can arrive in any order.
    pub forgiving_bootstrap: bool,

    /// Run reconciliation after every `add_menu_item`.
    pub reconcile_on_add: bool,

    /// Run reconciliation before every navigation resolution.
    pub reconcile_on_resolve: bool,

    /// Tolerate `collapsible` on items that have no children yet.
    pub allow_childless_collapsible: bool,
}

impl MenuServiceConfig {
    /// Preset for seeding/import runs: out-of-order parents are tolerated and
    /// the tree is reconciled before it is rendered.
    pub fn bootstrap() -> Self {
        Self {
            forgiving_bootstrap: true,
            reconcile_on_add: false,
            reconcile_on_resolve: true,
            allow_childless_collapsible: true,
        }
    }
}
