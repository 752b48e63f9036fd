use std::fs;
use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use gridnav::cli::{CliArgs, ReplayConfig};
use gridnav::editor::EditorKind;
use gridnav::grid::{detect_delimiter, parse_csv, Coordinate, Delimiter, GridFocus, MemoryGrid};
use gridnav::host::GridEditor;
use gridnav::keymap::NavKeymap;
use gridnav::traverse::{GridTraversal, KeyOutcome};
use gridnav::NavigationConfig;

/// State after one replayed key
#[derive(Debug, Serialize)]
struct ReplayStep {
    key: String,
    outcome: KeyOutcome,
    position: Option<Coordinate>,
    value: Option<String>,
    focus: GridFocus,
}

#[derive(Debug, Serialize)]
struct ReplayReport {
    start: Option<Coordinate>,
    steps: Vec<ReplayStep>,
    rows: Vec<Vec<String>>,
}

fn main() -> Result<()> {
    gridnav::tracing::init();

    let replay = CliArgs::parse()
        .into_config()
        .map_err(anyhow::Error::msg)?;
    let report = run(&replay)?;

    if replay.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_text(&report)?;
    }
    Ok(())
}

fn run(replay: &ReplayConfig) -> Result<ReplayReport> {
    let mut editor = build_editor(replay)?;

    editor.edit_cell(replay.start);
    let start = editor.active_position();

    let mut steps = Vec::with_capacity(replay.keys.len());
    for key in &replay.keys {
        let outcome = editor.handle_key(*key);
        steps.push(ReplayStep {
            key: key.to_string(),
            outcome,
            position: editor.active_position(),
            value: editor
                .session()
                .active_editor()
                .map(|e| e.value().to_string()),
            focus: editor.grid().focus(),
        });
    }

    editor.focus_lost();
    Ok(ReplayReport {
        start,
        steps,
        rows: editor.grid().data().rows().to_vec(),
    })
}

fn build_editor(replay: &ReplayConfig) -> Result<GridEditor<MemoryGrid>> {
    let path = &replay.grid_path;
    let content =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let delimiter = path
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(Delimiter::from_extension)
        .unwrap_or_else(|| detect_delimiter(&content));
    let data =
        parse_csv(&content, delimiter).with_context(|| format!("parsing {}", path.display()))?;
    tracing::info!(
        rows = data.row_count(),
        columns = data.column_count(),
        ?delimiter,
        "grid loaded"
    );

    let mut grid = MemoryGrid::new(data);
    for at in &replay.locked {
        grid.lock_cell(*at);
    }
    for column in &replay.selection_columns {
        grid.set_column_editor(column.column, EditorKind::selection(column.options.clone()));
    }

    let mut config = match &replay.config_path {
        Some(path) => NavigationConfig::load_from(path),
        None => NavigationConfig::load(),
    };
    config.skipped_columns.extend(&replay.skipped);
    config.create_rows |= replay.create_rows;
    if grid.data().column_count() > 0 && config.skips_every_column(grid.data().column_count()) {
        anyhow::bail!("every column is skipped, nothing left to tab to");
    }

    let keymap = match &replay.keymap_path {
        Some(path) => NavKeymap::load_from(path)
            .with_context(|| format!("loading keymap {}", path.display()))?,
        None => NavKeymap::load(),
    };

    Ok(GridEditor::new(grid, GridTraversal::from_config(&config)).with_keymap(keymap))
}

fn print_text(report: &ReplayReport) -> Result<()> {
    let describe = |position: Option<Coordinate>| match position {
        Some(at) => at.to_string(),
        None => "-".to_string(),
    };

    println!("start  {}", describe(report.start));
    for step in &report.steps {
        let value = step.value.as_deref().unwrap_or("");
        println!(
            "{:<12} {:<6} {:<10} {:?}",
            step.key,
            describe(step.position),
            format!("{:?}", step.outcome).to_lowercase(),
            value
        );
    }
    println!();

    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(io::stdout());
    for row in &report.rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}
