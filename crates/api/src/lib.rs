//! Boundary of the RMI stub compiler that runs after the descriptor scan.
//!
//! Nothing here is implemented by the scanner itself; build tools plug a
//! concrete compiler in behind [`StubCompiler`].

pub mod compiler;
pub mod error;
pub mod mapper;

pub use compiler::{StubCompiler, StubVersion, TaskSettings};
pub use error::{CompilerError, CompilerResult};
pub use mapper::{FileNameMapper, RmiStubMapper};
