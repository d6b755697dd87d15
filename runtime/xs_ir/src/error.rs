//! Errors raised while assembling a registry from external parts.

/// A registry built from external parts violated the arena layout.
///
/// The layout rules keep name resolution total: entry 0 is the only
/// parent-less subroutine, and every parent precedes its children, which
/// rules out parent cycles.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ProgramError {
    #[error("registry is empty; the first subroutine must be the root")]
    Empty,
    #[error("first subroutine `{name}` must be the root but has a parent")]
    RootHasParent { name: String },
    #[error("subroutine `{name}` at index {index} has no parent; only the root may be parent-less")]
    MissingParent { index: usize, name: String },
    #[error("subroutine `{name}` at index {index} names parent {parent}, which does not precede it")]
    InvalidParent {
        index: usize,
        name: String,
        parent: usize,
    },
    #[error("registry exceeded {} subroutines", u32::MAX)]
    TooManySubroutines,
}
