//! xs IR - the program model handed to the runtime.
//!
//! This crate contains the data structures an external front end builds and
//! the interpreter executes:
//! - `Value`: the four literal kinds that live on the shared stack
//! - `Instruction`: a literal or a dotted call name
//! - `Subroutine`: a named node owning an ordered instruction sequence
//! - `Registry`: the arena owning every subroutine, addressed by `SubroutineId`
//! - `ProgramTree`: a nested interchange form flattened into a `Registry`
//!
//! # Design Philosophy
//!
//! - **Handles, not pointers**: parents are `SubroutineId(u32)` indices into
//!   the registry, so the tree survives relocation of the arena.
//! - **Closed sums**: literal kinds are enums matched exhaustively at every
//!   consumption site, never runtime tag checks.
//! - **Single owner**: the registry owns subroutines and their instructions;
//!   the stack owns values (text is `Arc<str>`, so pushing is a refcount bump).

mod error;
mod instruction;
mod program;
mod registry;
mod value;

pub use error::ProgramError;
pub use instruction::{Instruction, InstructionKind};
pub use program::{ProgramTree, SubroutineTree};
pub use registry::{Registry, Subroutine, SubroutineId};
pub use value::Value;

/// Separator between the segments of a dotted call name.
pub const CALL_SEPARATOR: char = '.';

/// Name of the subroutine where a program starts when no entry is given.
pub const ENTRY_NAME: &str = "Main";
