use clap::Args;
use ejbmanifest_core::{DescriptorScan, DescriptorScanner, DtdMapping, ScanConfig};
use std::path::PathBuf;
use tabled::{Table, Tabled};
use tracing::info;

#[derive(Args, Debug, Default)]
pub struct ScanArgs {
    /// Path to the ejb-jar.xml deployment descriptor
    #[arg(value_name = "DESCRIPTOR")]
    pub descriptor: PathBuf,

    /// Directory holding the compiled bean classes
    #[arg(short, long, value_name = "DIR")]
    pub src_dir: Option<PathBuf>,

    /// Map a DTD public id to a file, bundled resource or URL (repeatable)
    #[arg(long = "dtd", value_name = "PUBLIC_ID=LOCATION")]
    pub dtds: Vec<String>,

    /// Settings file (defaults to .ejbmanifest.json beside the descriptor)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Reject descriptors whose beans are not nested as ejb-jar/enterprise-beans/<bean>
    #[arg(long)]
    pub strict: bool,

    /// Do not register the bundled EJB 1.1 / 2.0 DTDs
    #[arg(long)]
    pub no_builtin_dtds: bool,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Tabled)]
struct EntryRow {
    #[tabled(rename = "Jar Entry")]
    entry: String,
    #[tabled(rename = "Source")]
    source: String,
    #[tabled(rename = "Exists")]
    exists: &'static str,
}

pub fn run(args: ScanArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = effective_config(&args)?;
    let scanner = DescriptorScanner::from_config(&config);

    info!("Scanning {}...", args.descriptor.display());
    let scan = scanner.scan_file(&args.descriptor)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&scan)?);
    } else {
        print_scan(&scan);
    }
    Ok(())
}

/// Config file (explicit or discovered) with command-line flags applied on top.
fn effective_config(args: &ScanArgs) -> Result<ScanConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => ScanConfig::load(path)?,
        None => {
            let dir = args
                .descriptor
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(crate::current_dir);
            ScanConfig::discover(&dir)?.unwrap_or_default()
        }
    };

    if let Some(src_dir) = &args.src_dir {
        config.src_dir = src_dir.clone();
    }
    if args.strict {
        config.strict = true;
    }
    if args.no_builtin_dtds {
        config.builtin_dtds = false;
    }
    for spec in &args.dtds {
        config.dtds.push(DtdMapping::parse(spec)?);
    }
    Ok(config)
}

fn print_scan(scan: &DescriptorScan) {
    println!("EJB name:  {}", scan.ejb_name.as_deref().unwrap_or("-"));
    println!("DTD:       {}", scan.public_id.as_deref().unwrap_or("-"));

    if scan.files.is_empty() {
        println!("No bean classes found.");
    } else {
        let rows: Vec<EntryRow> = scan
            .files
            .iter()
            .map(|(entry, source)| EntryRow {
                entry: entry.clone(),
                source: source.display().to_string(),
                exists: if source.is_file() { "yes" } else { "no" },
            })
            .collect();
        println!("{}", Table::new(rows));
    }

    for issue in &scan.issues {
        println!("warning: {issue}");
    }
}
