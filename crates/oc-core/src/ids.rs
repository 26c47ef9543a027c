use core::fmt;
use core::num::NonZeroU32;

/// Slot of a target or component in the toolkit graph's dense tables.
///
/// Ids are handed out in declaration order, so `slot()` indexes the graph's
/// vectors directly. Stored off by one to keep `Option<Id>` the same size.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id(NonZeroU32);

impl Id {
    /// Id of the `index`-th declared object.
    pub fn from_index(index: u32) -> Self {
        Self(NonZeroU32::MIN.saturating_add(index))
    }

    /// Declaration position.
    pub fn index(self) -> u32 {
        self.0.get() - 1
    }

    /// Position in the graph's target or component vector.
    pub fn slot(self) -> usize {
        self.index() as usize
    }
}

impl fmt::Debug for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.index())
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.index())
    }
}

/// Slot in `ToolkitGraph::targets`.
pub type TargetId = Id;
/// Slot in `ToolkitGraph::components`.
pub type ComponentId = Id;
