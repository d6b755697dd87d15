//! Hierarchical call-name resolution.
//!
//! A call name is resolved against the lexical scope it appears in:
//!
//! - [`find_child`]: a direct child of one scope, by name.
//! - [`find_subroutine`]: the scope's child, else the nearest enclosing
//!   scope's child, walking outward to the root. The nearest definition
//!   shadows outer ones.
//! - [`resolve_call`]: a dotted name `A.B.C`, one segment at a time. `A` is
//!   found from the calling scope, `B` from inside `A`, `C` from inside `B`.
//!
//! Resolution makes exactly one outward search per segment, so it always
//! terminates. A failure anywhere routes the entire original name to plugin
//! dispatch, split by [`split_call`].

use smallvec::SmallVec;
use xs_ir::{Registry, SubroutineId, CALL_SEPARATOR};

use crate::errors::{resolution, RuntimeResult};

/// Segments of a dotted call name. Most names have at most four.
pub type CallSegments<'n> = SmallVec<[&'n str; 4]>;

/// Split a dotted call name into its segments.
pub fn call_segments(name: &str) -> CallSegments<'_> {
    name.split(CALL_SEPARATOR).collect()
}

/// Split a call name into `(library, entry)` for plugin dispatch.
///
/// The first segment names the library and the remainder the entry:
/// `"Variable.Set"` is `("Variable", "Set")`, `"A.B.C"` is `("A", "B.C")`.
/// An undotted name is both library and entry.
pub fn split_call(name: &str) -> (&str, &str) {
    name.split_once(CALL_SEPARATOR).unwrap_or((name, name))
}

/// Find the direct child of `parent` called `name`.
///
/// Linear scan in registry order; the first match wins.
pub fn find_child(registry: &Registry, parent: SubroutineId, name: &str) -> RuntimeResult<SubroutineId> {
    registry
        .iter()
        .find(|(_, sub)| sub.parent() == Some(parent) && sub.name() == name)
        .map(|(id, _)| id)
        .ok_or_else(|| resolution(name, registry[parent].name()))
}

/// Find `name` as a child of `scope` or of the nearest enclosing scope.
pub fn find_subroutine(registry: &Registry, name: &str, scope: SubroutineId) -> RuntimeResult<SubroutineId> {
    let mut scope = scope;
    loop {
        match find_child(registry, scope, name) {
            Ok(found) => return Ok(found),
            Err(err) => match registry.parent(scope) {
                Some(parent) => scope = parent,
                None => return Err(err),
            },
        }
    }
}

/// Resolve a (possibly dotted) call name from `scope`.
pub fn resolve_call(registry: &Registry, name: &str, scope: SubroutineId) -> RuntimeResult<SubroutineId> {
    let mut current = scope;
    for segment in call_segments(name) {
        current = find_subroutine(registry, segment, current)?;
    }
    Ok(current)
}

#[cfg(test)]
mod tests;
