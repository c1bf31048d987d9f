use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "docview-convert",
    version,
    about = "Convert the XML legal-text export into the JSON tree served at /data"
)]
struct Cli {
    /// XML file to read.
    #[arg(default_value = "full/et.xml")]
    input: PathBuf,

    /// JSON file to write.
    #[arg(default_value = "et_structure.json")]
    output: PathBuf,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    match docview_convert::convert_file(&cli.input, &cli.output) {
        Ok(root) => {
            info!(
                input = %cli.input.display(),
                nodes = docview_convert::count_nodes(&root),
                "conversion finished"
            );
            println!("Archivo JSON generado: {}", cli.output.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(input = %cli.input.display(), "conversion failed: {err}");
            ExitCode::FAILURE
        }
    }
}
