//! BuildStateRepository port - persisting incremental build fingerprints

use std::path::Path;

use crate::domain::entities::BuildState;
use crate::error::HatchResult;

/// Load and save `BuildState` without knowing the serialization format
pub trait BuildStateRepository {
    /// Load state, or an empty one if absent or unreadable.
    fn load_or_new(&self, path: &Path) -> BuildState;

    fn load(&self, path: &Path) -> HatchResult<BuildState>;

    fn save(&self, state: &BuildState, path: &Path) -> HatchResult<()>;
}

impl<T: BuildStateRepository + ?Sized> BuildStateRepository for &T {
    fn load_or_new(&self, path: &Path) -> BuildState {
        (**self).load_or_new(path)
    }

    fn load(&self, path: &Path) -> HatchResult<BuildState> {
        (**self).load(path)
    }

    fn save(&self, state: &BuildState, path: &Path) -> HatchResult<()> {
        (**self).save(state, path)
    }
}
