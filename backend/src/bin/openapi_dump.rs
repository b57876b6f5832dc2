//! Print the OpenAPI document as JSON.

use bookshelf::doc::ApiDoc;
use clap::Parser;
use utoipa::OpenApi;

/// `openapi-dump` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "openapi-dump",
    about = "Write the REST API's OpenAPI document to stdout",
    version
)]
struct CliArgs {
    /// Emit single-line JSON instead of indented output.
    #[arg(long)]
    compact: bool,
}

#[expect(clippy::print_stdout, reason = "the document is written to stdout for piping")]
fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = CliArgs::parse();
    let doc = ApiDoc::openapi();
    let json = if args.compact {
        doc.to_json()?
    } else {
        doc.to_pretty_json()?
    };
    println!("{json}");
    Ok(())
}
