//! Use Case Factory
//!
//! Creates use cases with infrastructure dependencies wired up.
//! This is the dependency injection point for the application.

use crate::application::{BuildPipeline, CleanUseCase, DoctorUseCase};
use crate::infrastructure::{LocalFs, SystemToolRunner, TomlBuildStateRepository, WhichLocator};

/// Type alias for the concrete BuildPipeline with all dependencies
pub type ConcreteBuildPipeline =
    BuildPipeline<SystemToolRunner, WhichLocator, LocalFs, TomlBuildStateRepository>;

/// Type alias for the concrete DoctorUseCase
pub type ConcreteDoctorUseCase = DoctorUseCase<WhichLocator, LocalFs>;

/// Type alias for the concrete CleanUseCase
pub type ConcreteCleanUseCase = CleanUseCase<LocalFs>;

/// Create the build pipeline backed by real processes and the local disk
pub fn create_build_pipeline() -> ConcreteBuildPipeline {
    BuildPipeline::new(
        SystemToolRunner::new(),
        WhichLocator::new(),
        LocalFs::new(),
        TomlBuildStateRepository::new(),
    )
}

pub fn create_doctor_use_case() -> ConcreteDoctorUseCase {
    DoctorUseCase::new(WhichLocator::new(), LocalFs::new())
}

pub fn create_clean_use_case() -> ConcreteCleanUseCase {
    CleanUseCase::new(LocalFs::new())
}
