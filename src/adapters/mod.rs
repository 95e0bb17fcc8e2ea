// Adapters layer: concrete page, dialog and transport implementations.

pub mod http;
pub mod memory;
pub mod terminal;

pub use http::ReqwestTransport;
pub use memory::{InputElement, MemoryPage, RecordingTransport, ScriptedDialog};
pub use terminal::TerminalDialog;
