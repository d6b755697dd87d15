//! Subroutine arena.
//!
//! The registry is the sole owner of every subroutine (and, through them,
//! every instruction). The namespace tree is encoded purely by parent
//! handles: sequence order carries no meaning beyond the root sitting at
//! index 0 and parents preceding their children.

use std::fmt;
use std::ops::Index;

use crate::{Instruction, ProgramError, CALL_SEPARATOR};

/// Index into the subroutine arena.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct SubroutineId(u32);

impl SubroutineId {
    /// The parent-less root, always the first registry entry.
    pub const ROOT: SubroutineId = SubroutineId(0);

    #[inline]
    pub const fn new(index: u32) -> Self {
        SubroutineId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for SubroutineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SubroutineId({})", self.0)
    }
}

/// A named node in the program namespace.
#[derive(Clone, Debug, PartialEq)]
pub struct Subroutine {
    name: String,
    parent: Option<SubroutineId>,
    instructions: Vec<Instruction>,
}

impl Subroutine {
    pub fn new(parent: Option<SubroutineId>, name: impl Into<String>) -> Self {
        Subroutine {
            name: name.into(),
            parent,
            instructions: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_instructions(mut self, instructions: impl IntoIterator<Item = Instruction>) -> Self {
        self.instructions.extend(instructions);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<SubroutineId> {
        self.parent
    }

    pub fn has_parent(&self) -> bool {
        self.parent.is_some()
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn add_instruction(&mut self, instruction: Instruction) {
        self.instructions.push(instruction);
    }
}

/// Flat arena of every subroutine in a program.
#[derive(Clone, Debug, PartialEq)]
pub struct Registry {
    subroutines: Vec<Subroutine>,
}

impl Registry {
    /// Name given to the root created by [`Registry::new`].
    pub const ROOT_NAME: &'static str = "<root>";

    /// Create a registry holding only the root.
    pub fn new() -> Self {
        Registry {
            subroutines: vec![Subroutine::new(None, Self::ROOT_NAME)],
        }
    }

    /// Adopt externally built subroutines, validating the arena layout.
    pub fn from_subroutines(subroutines: Vec<Subroutine>) -> Result<Self, ProgramError> {
        let Some(root) = subroutines.first() else {
            return Err(ProgramError::Empty);
        };
        if root.has_parent() {
            return Err(ProgramError::RootHasParent {
                name: root.name.clone(),
            });
        }
        for (index, sub) in subroutines.iter().enumerate().skip(1) {
            match sub.parent {
                None => {
                    return Err(ProgramError::MissingParent {
                        index,
                        name: sub.name.clone(),
                    })
                }
                Some(parent) if parent.index() >= index => {
                    return Err(ProgramError::InvalidParent {
                        index,
                        name: sub.name.clone(),
                        parent: parent.index(),
                    })
                }
                Some(_) => {}
            }
        }
        Ok(Registry { subroutines })
    }

    #[inline]
    pub fn root(&self) -> SubroutineId {
        SubroutineId::ROOT
    }

    /// Add an empty subroutine under `parent`.
    ///
    /// # Panics
    ///
    /// If `parent` is not in this registry or the arena is full; see
    /// [`Registry::try_add`].
    pub fn add(&mut self, parent: SubroutineId, name: impl Into<String>) -> SubroutineId {
        self.try_add(parent, name)
            .unwrap_or_else(|err| panic!("{err}"))
    }

    /// Add a subroutine under `parent` with its instructions.
    ///
    /// # Panics
    ///
    /// If `parent` is not in this registry or the arena is full; see
    /// [`Registry::try_define`].
    pub fn define(
        &mut self,
        parent: SubroutineId,
        name: impl Into<String>,
        instructions: impl IntoIterator<Item = Instruction>,
    ) -> SubroutineId {
        self.try_define(parent, name, instructions)
            .unwrap_or_else(|err| panic!("{err}"))
    }

    /// Add an empty subroutine under `parent`, rejecting a foreign parent.
    pub fn try_add(
        &mut self,
        parent: SubroutineId,
        name: impl Into<String>,
    ) -> Result<SubroutineId, ProgramError> {
        self.push(Subroutine::new(Some(parent), name))
    }

    /// Add a subroutine under `parent` with its instructions, rejecting a
    /// foreign parent.
    pub fn try_define(
        &mut self,
        parent: SubroutineId,
        name: impl Into<String>,
        instructions: impl IntoIterator<Item = Instruction>,
    ) -> Result<SubroutineId, ProgramError> {
        self.push(Subroutine::new(Some(parent), name).with_instructions(instructions))
    }

    /// Append `subroutine`, whose parent must already be in the arena.
    fn push(&mut self, subroutine: Subroutine) -> Result<SubroutineId, ProgramError> {
        let index = self.subroutines.len();
        match subroutine.parent {
            Some(parent) if parent.index() < index => {}
            Some(parent) => {
                return Err(ProgramError::InvalidParent {
                    index,
                    name: subroutine.name,
                    parent: parent.index(),
                })
            }
            None => {
                return Err(ProgramError::MissingParent {
                    index,
                    name: subroutine.name,
                })
            }
        }
        let raw = u32::try_from(index).map_err(|_| ProgramError::TooManySubroutines)?;
        self.subroutines.push(subroutine);
        Ok(SubroutineId::new(raw))
    }

    pub fn add_instruction(&mut self, id: SubroutineId, instruction: Instruction) {
        self.subroutines[id.index()].add_instruction(instruction);
    }

    pub fn get(&self, id: SubroutineId) -> Option<&Subroutine> {
        self.subroutines.get(id.index())
    }

    /// Iterate every subroutine in arena order.
    pub fn iter(&self) -> impl Iterator<Item = (SubroutineId, &Subroutine)> {
        (0u32..)
            .zip(&self.subroutines)
            .map(|(raw, sub)| (SubroutineId::new(raw), sub))
    }

    pub fn len(&self) -> usize {
        self.subroutines.len()
    }

    /// Always false: the root is created with the registry.
    pub fn is_empty(&self) -> bool {
        self.subroutines.is_empty()
    }

    pub fn parent(&self, id: SubroutineId) -> Option<SubroutineId> {
        self[id].parent
    }

    /// Dotted path from the root's children down to `id`, e.g. `Main.Loop`.
    ///
    /// The root itself renders as its own name.
    pub fn path(&self, id: SubroutineId) -> String {
        let mut segments = Vec::new();
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let sub = &self[current];
            if sub.parent.is_none() && current != id {
                break;
            }
            segments.push(sub.name.as_str());
            cursor = sub.parent;
        }
        let mut path = String::new();
        for (i, segment) in segments.iter().rev().enumerate() {
            if i > 0 {
                path.push(CALL_SEPARATOR);
            }
            path.push_str(segment);
        }
        path
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<SubroutineId> for Registry {
    type Output = Subroutine;

    fn index(&self, id: SubroutineId) -> &Subroutine {
        &self.subroutines[id.index()]
    }
}
