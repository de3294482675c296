use anyhow::{Context, Result};
use comfy_table::{Cell, Table};
use tracing::info_span;

use redcap_dictionary::{DictionaryEntry, load_dictionary};
use redcap_ingest::LoadOptions;
use redcap_model::{ConvertOptions, MatchKey};

use crate::cli::{ConvertArgs, FieldsArgs, MatchOnArg};
use crate::summary::{apply_table_style, dim_cell};
use redcap_cli::pipeline::run;
use redcap_cli::types::{RunConfig, RunResult};

pub fn run_convert(args: &ConvertArgs) -> Result<RunResult> {
    let mut config = RunConfig::new(args.data.clone(), args.dictionary.clone());
    if let Some(dir) = &args.output_dir {
        config.output_dir = dir.clone();
    }
    config.data_sheet = args.sheet.clone();
    config.dictionary_sheet = args.dictionary_sheet.clone();
    config.dry_run = args.dry_run;
    config.options = ConvertOptions::new()
        .with_match_key(match args.match_on {
            MatchOnArg::Variable => MatchKey::VariableName,
            MatchOnArg::Label => MatchKey::FieldLabel,
        })
        .with_day_first(args.day_first);
    run(&config)
}

pub fn run_fields(args: &FieldsArgs) -> Result<()> {
    let span = info_span!("fields", dictionary = %args.dictionary.display());
    let _guard = span.enter();

    let options = match &args.sheet {
        Some(sheet) => LoadOptions::new().with_sheet(sheet),
        None => LoadOptions::new(),
    };
    let dictionary = load_dictionary(&args.dictionary, &options)
        .with_context(|| format!("load dictionary {}", args.dictionary.display()))?;

    let mut table = Table::new();
    table.set_header(vec!["Variable", "Label", "Type", "Validation", "Choices"]);
    apply_table_style(&mut table);
    for entry in dictionary.entries() {
        match entry {
            DictionaryEntry::Field(field) => {
                let choices = field.effective_choices();
                table.add_row(vec![
                    Cell::new(&field.name),
                    Cell::new(&field.label),
                    Cell::new(field.field_type),
                    if field.validation.as_str().is_empty() {
                        dim_cell("-")
                    } else {
                        Cell::new(field.validation.as_str())
                    },
                    if choices.is_empty() {
                        dim_cell("-")
                    } else {
                        Cell::new(choices.labels().join(" | "))
                    },
                ]);
            }
            DictionaryEntry::Problem(problem) => {
                table.add_row(vec![
                    Cell::new(&problem.name),
                    Cell::new(&problem.label),
                    Cell::new(problem.kind).fg(comfy_table::Color::Red),
                    dim_cell("-"),
                    Cell::new(&problem.detail).fg(comfy_table::Color::Red),
                ]);
            }
        }
    }
    println!("{table}");
    println!("{} fields", dictionary.len());
    Ok(())
}
