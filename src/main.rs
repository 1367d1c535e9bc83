use clap::Parser;
use table_render_rs::cli::{run_render, RenderRequest};
use table_render_rs::diagnostics::StderrDiagnostics;
use table_render_rs::export::ExportFormat;
use table_render_rs::get_output_types;

use std::fs::{self, File};
use std::io::{self, Read, Write};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Type of output
    #[arg(short = 't', long, value_name = "TYPE", value_enum, default_value_t = ExportFormat::Xlsx)]
    to_type: ExportFormat,

    /// Do not write the header rows, even if the table definition asks for them.
    #[arg(long = "no-header", default_value_t = false)]
    no_header: bool,

    /// Worksheet name (overrides `sheet_name` in the table definition).
    #[arg(long = "sheet-name")]
    sheet_name: Option<String>,

    /// Input file with the JSON table definition (default: stdin)
    input: Option<String>,

    /// Output file (default: stdout)
    output: Option<String>,

    /// List available output types
    #[arg(short = 'l', long)]
    list_type: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.list_type {
        println!("type of output:");
        println!("{}", get_output_types().join(" "));
        println!();
        return Ok(());
    }

    let input_content = match cli.input.as_deref() {
        Some(path) if path != "-" => fs::read_to_string(path)?,
        _ => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    // Prepare output writer
    let mut output_writer: Box<dyn Write> = match cli.output {
        Some(path) if path != "-" => Box::new(File::create(path)?),
        _ => Box::new(io::stdout()),
    };

    let request = RenderRequest {
        to_type: cli.to_type,
        no_header: cli.no_header,
        sheet_name: cli.sheet_name,
    };

    run_render(&input_content, &mut output_writer, &request, &StderrDiagnostics)?;

    Ok(())
}
