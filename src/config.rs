use crate::{cost::CostModel, mode::AlignMode, task::AlignTask};

#[derive(Debug, Clone, Default)]
/// Alignment configuration.
///
/// Fixed at construction; a config holds no per-call state and may be shared
/// freely between threads. Invalid cost configurations are rejected when the
/// [`CostModel`] is built, so holding an `AlignConfig` implies a valid one.
pub struct AlignConfig {
    /// Operation costs and substitution strategy, [`CostModel`].
    pub cost: CostModel,
    /// Operation set, [`AlignMode`].
    pub mode: AlignMode,
    /// What to extract, [`AlignTask`].
    pub task: AlignTask,
}

impl AlignConfig {
    /// Config with the given mode, default cost model and task.
    pub fn with_mode(mode: AlignMode) -> Self {
        AlignConfig {
            mode,
            ..Self::default()
        }
    }
}
