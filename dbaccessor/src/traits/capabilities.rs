//! Capability traits implemented by generated table accessors

use std::fmt;

use crate::error::Result;
use crate::traits::{Connection, FromRow};
use async_trait::async_trait;

/// One of the persistence operations a generated accessor supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Delete,
    Retrieve,
    Update,
    Persist,
}

impl Capability {
    /// Every capability, in the order generated units declare them.
    pub const ALL: [Capability; 4] = [
        Capability::Delete,
        Capability::Retrieve,
        Capability::Update,
        Capability::Persist,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Delete => "Delete",
            Self::Retrieve => "Retrieve",
            Self::Update => "Update",
            Self::Persist => "Persist",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of a generated accessor.
pub trait TableAccessor {
    /// Name of the wrapped table.
    const TABLE_NAME: &'static str;

    /// Capabilities the accessor implements.
    const CAPABILITIES: &'static [Capability];
}

/// Delete the row identified by the accessor's primary key.
#[async_trait]
pub trait Deleteable: Sync {
    /// Returns the number of deleted rows.
    async fn delete<C: Connection>(&self, conn: &C) -> Result<u64>;
}

/// Load rows into accessors.
#[async_trait]
pub trait Retrievable: FromRow + Send {
    /// Primary key type: the key field's type, or a tuple for composite keys.
    type Key: Send;

    /// Load the row with the given primary key.
    async fn retrieve<C: Connection>(conn: &C, key: Self::Key) -> Result<Option<Self>>;

    /// Load every row of the table.
    async fn retrieve_all<C: Connection>(conn: &C) -> Result<Vec<Self>>;
}

/// Write the accessor's non-key columns back to its row.
#[async_trait]
pub trait Updateable: Sync {
    /// Returns the number of updated rows.
    async fn update<C: Connection>(&self, conn: &C) -> Result<u64>;
}

/// Insert the accessor as a new row.
#[async_trait]
pub trait Persistable: Send {
    /// Returns the number of inserted rows. A store-assigned id is written
    /// back into the auto-generated key column when there is one.
    async fn persist<C: Connection>(&mut self, conn: &C) -> Result<u64>;
}
