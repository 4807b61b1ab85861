use derive_more::Constructor;
use serde::Deserialize;

/// A page of results in a bulk swarm listing.
#[derive(Deserialize, Copy, Clone, Debug, PartialEq, Eq, Constructor)]
pub struct Pagination {
    /// How many entries to skip, starting at 0
    pub offset: u32,
    /// The number of entries per page
    pub limit: u32,
}

impl Pagination {
    #[must_use]
    pub fn default_offset() -> u32 {
        0
    }

    #[must_use]
    pub fn default_limit() -> u32 {
        4000
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            offset: Self::default_offset(),
            limit: Self::default_limit(),
        }
    }
}
