//! Destination for program output.
//!
//! Plugins print through the handler carried by `SharedData` instead of
//! writing to stdout directly, so a run's output can be redirected:
//! - CLI: stdout (default)
//! - Tests and embedders: a buffer for assertions
//! - Silent: discarded

use std::sync::Arc;

use parking_lot::Mutex;

/// Output handler, dispatched by enum rather than trait object.
pub enum PrintHandler {
    Stdout,
    Buffer(Mutex<String>),
    Silent,
}

impl PrintHandler {
    /// Print a line (with newline).
    pub fn println(&self, msg: &str) {
        match self {
            PrintHandler::Stdout => println!("{msg}"),
            PrintHandler::Buffer(buf) => {
                let mut buf = buf.lock();
                buf.push_str(msg);
                buf.push('\n');
            }
            PrintHandler::Silent => {}
        }
    }

    /// Print without newline.
    pub fn print(&self, msg: &str) {
        match self {
            PrintHandler::Stdout => print!("{msg}"),
            PrintHandler::Buffer(buf) => buf.lock().push_str(msg),
            PrintHandler::Silent => {}
        }
    }

    /// Captured output; empty for handlers that don't capture.
    pub fn output(&self) -> String {
        match self {
            PrintHandler::Buffer(buf) => buf.lock().clone(),
            PrintHandler::Stdout | PrintHandler::Silent => String::new(),
        }
    }

    pub fn clear(&self) {
        if let PrintHandler::Buffer(buf) = self {
            buf.lock().clear();
        }
    }
}

/// Print handler shared by every interpreter of a run.
pub type SharedPrintHandler = Arc<PrintHandler>;

pub fn stdout_handler() -> SharedPrintHandler {
    Arc::new(PrintHandler::Stdout)
}

pub fn buffer_handler() -> SharedPrintHandler {
    Arc::new(PrintHandler::Buffer(Mutex::new(String::new())))
}

pub fn silent_handler() -> SharedPrintHandler {
    Arc::new(PrintHandler::Silent)
}
