mod dtds;
mod scan;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "ejbmanifest",
    version,
    about = "Lists the class files an EJB deployment descriptor pulls into its jar",
    long_about = "Reads an ejb-jar.xml deployment descriptor and reports, for every session, \
                  entity and message-driven bean, the home, remote, local, bean and primary key \
                  class files that belong in the bean's jar, together with the bean name and \
                  the DTD the descriptor declares."
)]
pub struct Cli {
    /// Log registrations and resolutions as well
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan a deployment descriptor and print its class manifest
    #[command(
        long_about = "Parses the descriptor and maps each referenced class to its .class file \
                            under the source directory. Settings are read from --config, or from \
                            a .ejbmanifest.json next to the descriptor; flags override both."
    )]
    Scan(scan::ScanArgs),
    /// List the DTDs bundled with the scanner
    Dtds,
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let component = match &cli.command {
        Commands::Scan(_) => "scan",
        Commands::Dtds => "dtds",
    };
    let _guard = ejbmanifest_core::logging::init_logging(component, cli.verbose, true);

    match cli.command {
        Commands::Scan(args) => scan::run(args),
        Commands::Dtds => dtds::run(),
    }
}

/// Current directory, or `.` when it cannot be determined.
pub(crate) fn current_dir() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}
