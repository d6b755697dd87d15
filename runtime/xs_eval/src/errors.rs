//! Runtime error taxonomy.
//!
//! Every failure the interpreter, the loader or a plugin can raise is a
//! [`RuntimeError`]. Errors fall in two classes:
//!
//! - **Recoverable**: raised inside a single plugin call. The dispatch
//!   boundary reports them and execution resumes at the next instruction.
//! - **Fatal**: loader failures, a missing entry point, a malformed
//!   registry. They unwind every nested interpreter up to the outermost
//!   `interpret()`, which reports them once and stops the run.
//!
//! Each variant carries a stable diagnostic code (`E1xxx` resolution,
//! `E2xxx` loader, `E3xxx` operand/plugin, `E4xxx` program).

/// Result of a runtime operation.
pub type RuntimeResult<T = ()> = Result<T, RuntimeError>;

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum RuntimeError {
    /// A call segment matched no visible user subroutine.
    #[error("could not find routine {name} with parent {parent}")]
    Resolution { name: String, parent: String },

    /// The library image could not be mapped or lacks a required symbol.
    #[error("could not load module {name}, error was:\n{reason}")]
    PluginLoad { name: String, reason: String },

    #[error("module {name} already loaded")]
    AlreadyLoaded { name: String },

    #[error("module {name} cannot be unloaded for it was not loaded")]
    NotLoaded { name: String },

    /// The plugin's `init` reported failure; the library was released.
    #[error("module {name} failed to initialize")]
    InitFailed { name: String },

    /// The loader has no library by that name.
    #[error("{entry} cannot be called for {library} was not loaded")]
    UnknownEntry { library: String, entry: String },

    /// The top-most stack value has the wrong literal kind.
    #[error("{operation} expects {expected} as top-most stack element, found {found}")]
    Type {
        operation: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("{operation} needs {needed} operand(s) but the stack holds {available}")]
    StackUnderflow {
        operation: String,
        needed: usize,
        available: usize,
    },

    /// A loaded plugin does not implement the requested entry.
    #[error("unknown subroutine in {library}: {entry}")]
    UnknownOperation { library: String, entry: String },

    /// Plugin-defined failure.
    #[error("{library} error:\n{message}")]
    Plugin { library: String, message: String },

    #[error("program has no `{entry}` subroutine under the root")]
    MissingMain { entry: &'static str },

    #[error("registry is malformed: {message}")]
    InvalidRegistry { message: String },
}

impl RuntimeError {
    /// Stable diagnostic code.
    pub fn code(&self) -> &'static str {
        match self {
            RuntimeError::Resolution { .. } => "E1001",
            RuntimeError::PluginLoad { .. } => "E2001",
            RuntimeError::AlreadyLoaded { .. } => "E2002",
            RuntimeError::NotLoaded { .. } => "E2003",
            RuntimeError::InitFailed { .. } => "E2004",
            RuntimeError::UnknownEntry { .. } => "E2005",
            RuntimeError::Type { .. } => "E3001",
            RuntimeError::StackUnderflow { .. } => "E3002",
            RuntimeError::UnknownOperation { .. } => "E3003",
            RuntimeError::Plugin { .. } => "E3004",
            RuntimeError::MissingMain { .. } => "E4001",
            RuntimeError::InvalidRegistry { .. } => "E4002",
        }
    }

    /// Whether the plugin dispatch boundary may report this error and
    /// continue with the next instruction.
    pub fn is_recoverable(&self) -> bool {
        match self {
            RuntimeError::Resolution { .. }
            | RuntimeError::Type { .. }
            | RuntimeError::StackUnderflow { .. }
            | RuntimeError::UnknownOperation { .. }
            | RuntimeError::Plugin { .. } => true,
            RuntimeError::PluginLoad { .. }
            | RuntimeError::AlreadyLoaded { .. }
            | RuntimeError::NotLoaded { .. }
            | RuntimeError::InitFailed { .. }
            | RuntimeError::UnknownEntry { .. }
            | RuntimeError::MissingMain { .. }
            | RuntimeError::InvalidRegistry { .. } => false,
        }
    }
}

// Constructors

/// A call segment matched no subroutine under `parent`.
#[cold]
pub fn resolution(name: impl Into<String>, parent: impl Into<String>) -> RuntimeError {
    RuntimeError::Resolution {
        name: name.into(),
        parent: parent.into(),
    }
}

/// The stack top has the wrong literal kind for `operation`.
#[cold]
pub fn wrong_operand(
    operation: impl Into<String>,
    expected: &'static str,
    found: &'static str,
) -> RuntimeError {
    RuntimeError::Type {
        operation: operation.into(),
        expected,
        found,
    }
}

/// `operation` needs more operands than the stack holds.
#[cold]
pub fn stack_underflow(operation: impl Into<String>, needed: usize, available: usize) -> RuntimeError {
    RuntimeError::StackUnderflow {
        operation: operation.into(),
        needed,
        available,
    }
}

/// `library` is loaded but has no `entry`.
#[cold]
pub fn unknown_operation(library: impl Into<String>, entry: impl Into<String>) -> RuntimeError {
    RuntimeError::UnknownOperation {
        library: library.into(),
        entry: entry.into(),
    }
}

/// A plugin-defined failure.
#[cold]
pub fn plugin_error(library: impl Into<String>, message: impl Into<String>) -> RuntimeError {
    RuntimeError::Plugin {
        library: library.into(),
        message: message.into(),
    }
}

impl From<xs_ir::ProgramError> for RuntimeError {
    fn from(err: xs_ir::ProgramError) -> Self {
        RuntimeError::InvalidRegistry {
            message: err.to_string(),
        }
    }
}
