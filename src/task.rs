#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// What should the aligner extract besides the distance?
pub enum AlignTask {
    #[default]
    /// Raw and normalized distance only. No backtrace is stored.
    Distance,
    /// Distance plus the edit script reproducing the target from the source.
    Script,
    /// Distance plus the longest common subsequence.
    Lcs,
    /// Distance plus the longest common contiguous substring.
    LcsStr,
}
