pub mod config;
pub mod descriptor;
pub mod error;
pub mod logging;
pub mod parser;
pub mod resolver;
pub mod scanner;

pub use config::{DtdMapping, ScanConfig};
pub use descriptor::{DescriptorHandler, DescriptorScan, Manifest, ParseState};
pub use error::{DescriptorError, Result};
pub use parser::SaxHandler;
pub use resolver::{EntityOrigin, EntityResolver, EntitySource, ResolutionTier};
pub use scanner::DescriptorScanner;
