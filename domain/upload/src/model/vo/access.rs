use serde::{Deserialize, Serialize};

/// Who can see an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Access {
    /// Owner only, the access every new item gets.
    #[default]
    Private,
    /// Members of the owner's organization.
    Org,
    /// Everyone.
    Public,
}

impl Access {
    pub fn is_default(&self) -> bool {
        matches!(self, Access::Private)
    }
}
