//! Active theme/location bindings, used as a delete guard rail

use serde::{Deserialize, Serialize};

/// One active binding of a menu to a theme location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageBinding {
    pub theme: String,
    pub location: String,
}

impl UsageBinding {
    pub fn new(theme: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            theme: theme.into(),
            location: location.into(),
        }
    }
}
