use ejbmanifest_core::resolver::{BUILTIN_DTDS, ResourceBundle};
use std::io::Read;
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct DtdRow {
    #[tabled(rename = "Public ID")]
    public_id: String,
    #[tabled(rename = "Resource")]
    resource: String,
    #[tabled(rename = "Size")]
    size: String,
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let bundle = ResourceBundle::builtin();

    let mut rows = Vec::new();
    for (public_id, resource) in BUILTIN_DTDS {
        let size = match bundle.open(resource) {
            Some(mut stream) => {
                let mut content = Vec::new();
                stream.read_to_end(&mut content)?;
                format!("{:.1} KB", content.len() as f64 / 1024.0)
            }
            None => "missing".to_string(),
        };
        rows.push(DtdRow {
            public_id: public_id.to_string(),
            resource: resource.to_string(),
            size,
        });
    }

    println!("{}", Table::new(rows));
    Ok(())
}
