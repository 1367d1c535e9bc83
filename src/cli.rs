use std::io::Write;

use anyhow::{Context, Result};

use crate::backend::MemorySheet;
use crate::config::TableDefinition;
use crate::diagnostics::Diagnostics;
use crate::export::{self, ExportFormat};
use crate::render::TableRenderer;

/// Command-line overrides applied on top of the table definition.
#[derive(Debug, Clone, Default)]
pub struct RenderRequest {
    pub to_type: ExportFormat,
    /// Suppress the header even when the definition asks for one.
    pub no_header: bool,
    /// Replaces the definition's `sheet_name`.
    pub sheet_name: Option<String>,
}

/// Reads a JSON table definition, renders it and writes the requested format.
pub fn run_render(
    input_content: &str,
    output_writer: &mut dyn Write,
    request: &RenderRequest,
    diagnostics: &dyn Diagnostics,
) -> Result<()> {
    let definition =
        TableDefinition::from_json(input_content).context("failed to read table definition")?;

    let mut render_options = definition.render_options();
    if request.no_header {
        render_options.write_header = false;
    }
    let sheet_name = request
        .sheet_name
        .clone()
        .or_else(|| definition.sheet_name.clone())
        .unwrap_or_default();
    let table = definition.into_table()?;

    let mut sheet = MemorySheet::with_name(&sheet_name);
    TableRenderer::new(&table, render_options)
        .with_diagnostics(diagnostics)
        .render(&mut sheet)?;

    match request.to_type {
        ExportFormat::Xlsx => {
            let buffer = export::xlsx::save_to_buffer(&sheet)?;
            output_writer.write_all(&buffer)?;
        }
        ExportFormat::Csv => export::csv::write_csv(&sheet, &mut *output_writer)?,
    }
    output_writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::CollectingDiagnostics;
    use pretty_assertions::assert_eq;
    use tempfile::NamedTempFile;

    const INPUT: &str = r#"{
        "sheet_name": "People",
        "columns": [
            {"name": "team", "label": "Team", "merge": {"vertical": ["identical"]}},
            {"name": "name", "label": "Name"}
        ],
        "rows": [
            {"team": "Red", "name": "Ada"},
            {"team": "Red", "name": "Grace"},
            {"team": "Blue", "name": "Linus"}
        ]
    }"#;

    fn render_to_string(request: &RenderRequest) -> String {
        let diagnostics = CollectingDiagnostics::new();
        let mut output = Vec::new();
        run_render(INPUT, &mut output, request, &diagnostics).unwrap();
        assert!(diagnostics.is_empty());
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_run_render_csv() {
        let request = RenderRequest {
            to_type: ExportFormat::Csv,
            ..Default::default()
        };
        assert_eq!(
            render_to_string(&request),
            "Team,Name\nRed,Ada\n,Grace\nBlue,Linus\n"
        );
    }

    #[test]
    fn test_run_render_csv_without_header() {
        let request = RenderRequest {
            to_type: ExportFormat::Csv,
            no_header: true,
            ..Default::default()
        };
        assert_eq!(render_to_string(&request), "Red,Ada\n,Grace\nBlue,Linus\n");
    }

    #[test]
    fn test_run_render_xlsx() {
        let request = RenderRequest {
            sheet_name: Some("Teams".to_string()),
            ..Default::default()
        };
        let diagnostics = CollectingDiagnostics::new();
        let mut output = Vec::new();
        run_render(INPUT, &mut output, &request, &diagnostics).unwrap();

        let temp_file = NamedTempFile::with_suffix(".xlsx").unwrap();
        std::fs::write(temp_file.path(), &output).unwrap();
        let read_spreadsheet = umya_spreadsheet::reader::xlsx::read(temp_file.path()).unwrap();
        let ws = read_spreadsheet.get_sheet(&0).unwrap();
        assert_eq!(ws.get_name(), "Teams");
        assert_eq!(ws.get_value((2, 3)).as_str(), "Grace");
        let merged_cells: Vec<String> =
            ws.get_merge_cells().iter().map(|m| m.get_range()).collect();
        assert_eq!(merged_cells, vec!["A2:A3".to_string()]);
    }

    #[test]
    fn test_run_render_rejects_invalid_input() {
        let diagnostics = CollectingDiagnostics::new();
        let mut output = Vec::new();
        let request = RenderRequest::default();
        assert!(run_render("not json", &mut output, &request, &diagnostics).is_err());
        assert!(run_render(r#"{"columns": []}"#, &mut output, &request, &diagnostics).is_err());
        assert!(output.is_empty());
    }
}
