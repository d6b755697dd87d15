//! Nested program interchange form.
//!
//! Front ends hand the runtime a tree of subroutines; the runtime works on
//! the flat [`Registry`]. With the `serde` feature the tree is
//! (de)serializable, instructions using externally tagged snake_case
//! variants:
//!
//! ```json
//! { "subroutines": [
//!     { "name": "Main",
//!       "instructions": [ {"int": 3}, {"int": 4}, {"call": "Math.Add"} ],
//!       "children": [] } ] }
//! ```

use crate::{Instruction, ProgramError, Registry, SubroutineId};

/// The root's children, each with nested definitions.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProgramTree {
    pub subroutines: Vec<SubroutineTree>,
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SubroutineTree {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub instructions: Vec<Instruction>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub children: Vec<SubroutineTree>,
}

impl SubroutineTree {
    pub fn new(name: impl Into<String>) -> Self {
        SubroutineTree {
            name: name.into(),
            instructions: Vec::new(),
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_instructions(mut self, instructions: impl IntoIterator<Item = Instruction>) -> Self {
        self.instructions.extend(instructions);
        self
    }

    #[must_use]
    pub fn with_child(mut self, child: SubroutineTree) -> Self {
        self.children.push(child);
        self
    }
}

impl ProgramTree {
    /// Flatten into a registry, preorder: every parent precedes its
    /// children and siblings keep their order.
    pub fn into_registry(self) -> Result<Registry, ProgramError> {
        let mut registry = Registry::new();
        let mut pending: Vec<(SubroutineId, SubroutineTree)> = self
            .subroutines
            .into_iter()
            .rev()
            .map(|tree| (SubroutineId::ROOT, tree))
            .collect();

        while let Some((parent, tree)) = pending.pop() {
            let id = registry.try_define(parent, tree.name, tree.instructions)?;
            pending.extend(tree.children.into_iter().rev().map(|child| (id, child)));
        }
        Ok(registry)
    }
}
