use anyhow::{bail, Context, Result};
use clap::Parser;
use std::io::Write;
use std::path::{Path, PathBuf};

use flowgrid::autolink::Confirmation;
use flowgrid::cli::{Cli, Command};
use flowgrid::config::FlowConfig;
use flowgrid::export::export_sql;
use flowgrid::grid::render::render_window;
use flowgrid::lint;
use flowgrid::messages::{EditMsg, FlowMsg, GridMsg, ImportMsg, Msg};
use flowgrid::model::{AppModel, Column, StatusLevel};
use flowgrid::runtime::Runtime;

fn main() -> Result<()> {
    let cli = Cli::parse();
    flowgrid::tracing::init();

    let config = cli.load_config();
    let row = cli.command.row_index().map_err(anyhow::Error::msg)?;

    match cli.command {
        Command::View {
            texts,
            flows,
            scroll,
            height,
            filters,
        } => {
            let mut runtime = open(config, Some(&texts), flows.as_deref())?;
            for (column, text) in filters {
                runtime.dispatch(GridMsg::Filter { column, text });
            }
            step(&mut runtime, GridMsg::Resize { viewport_height: height })?;
            step(&mut runtime, GridMsg::Scroll { scroll_top: scroll })?;

            let sheet = &runtime.model.sheet;
            for line in render_window(sheet, &Column::ALL) {
                println!("{}", line);
            }
            let window = sheet.window();
            println!(
                "rows {}..{} of {} ({} flows)",
                window.start + 1,
                window.end,
                sheet.row_count(),
                sheet.flows().len()
            );
            if !sheet.filters().is_empty() {
                println!(
                    "filtered: {} of {} rows shown",
                    sheet.row_count(),
                    sheet.total_row_count()
                );
            }
        }

        Command::Autolink { texts, yes, output } => {
            let mut runtime = open(config, Some(&texts), None)?;
            step(&mut runtime, FlowMsg::AutoLink(Confirmation::from(yes)))
                .context("auto-link discards every flow; pass --yes to confirm")?;
            save_flows(&mut runtime, output)?;
        }

        Command::Edit {
            texts,
            flows,
            column,
            value,
            ..
        } => {
            let row = row.context("edit needs a row")?;
            let mut runtime = open(config, Some(&texts), Some(&flows))?;
            runtime.dispatch(EditMsg::Begin { row, column });
            if !runtime.model.sheet.is_editing() {
                bail!(
                    "cannot edit row {} column '{}': row missing or column read-only",
                    row + 1,
                    column
                );
            }
            runtime.dispatch(EditMsg::UpdateDraft(value));
            step(&mut runtime, EditMsg::Commit)?;
            save_flows(&mut runtime, flows)?;
        }

        Command::Branch {
            texts,
            flows,
            remove,
            ..
        } => {
            let row = row.context("branch needs a row")?;
            let mut runtime = open(config, Some(&texts), Some(&flows))?;
            let msg = if remove {
                FlowMsg::Remove { row }
            } else {
                FlowMsg::AddBranch { row }
            };
            step(&mut runtime, msg)?;
            save_flows(&mut runtime, flows)?;
        }

        Command::Export { flows, output } => {
            let mut runtime = open(config, None, Some(&flows))?;
            match output {
                Some(path) => {
                    step(&mut runtime, FlowMsg::Export { path })?;
                    report(&runtime);
                }
                None => {
                    let model = &runtime.model;
                    match export_sql(model.sheet.flows(), &model.config.export) {
                        Some(sql) => std::io::stdout()
                            .write_all(sql.as_bytes())
                            .context("failed to write statement to stdout")?,
                        None => eprintln!("Nothing to export"),
                    }
                }
            }
        }

        Command::Lint { texts, flows } => {
            let runtime = open(config, Some(&texts), Some(&flows))?;
            let sheet = &runtime.model.sheet;
            let issues = lint::check(sheet.texts(), sheet.flows());
            for issue in &issues {
                println!("{}", issue);
            }
            if !issues.is_empty() {
                bail!("{} issue(s) found", issues.len());
            }
            println!("{} flows OK", sheet.flows().len());
        }

        Command::InitConfig { force } => {
            let path = match &cli.config {
                Some(path) => path.clone(),
                None => flowgrid::config_paths::config_file()
                    .context("no config directory available")?,
            };
            if path.exists() && !force {
                bail!("{} already exists; pass --force to overwrite", path.display());
            }
            config.save_to(&path).map_err(anyhow::Error::msg)?;
            println!("{}", path.display());
        }
    }

    Ok(())
}

/// Build a runtime and load the requested files through the message loop
fn open(config: FlowConfig, texts: Option<&Path>, flows: Option<&Path>) -> Result<Runtime> {
    let mut runtime = Runtime::new(AppModel::new(config));
    if let Some(path) = texts {
        step(&mut runtime, ImportMsg::Open(path.to_path_buf()))
            .with_context(|| format!("loading {}", path.display()))?;
    }
    if let Some(path) = flows {
        step(&mut runtime, ImportMsg::OpenFlows(path.to_path_buf()))
            .with_context(|| format!("loading {}", path.display()))?;
    }
    Ok(runtime)
}

/// Dispatch one message, wait for its I/O, and turn an error status into `Err`
fn step(runtime: &mut Runtime, msg: impl Into<Msg>) -> Result<()> {
    runtime.model.status = None;
    runtime.dispatch(msg);
    runtime.run_until_idle();

    match &runtime.model.status {
        Some(status) if status.level != StatusLevel::Info => bail!("{}", status.text),
        _ => Ok(()),
    }
}

fn save_flows(runtime: &mut Runtime, path: PathBuf) -> Result<()> {
    step(runtime, FlowMsg::SaveFlows { path })?;
    report(runtime);
    Ok(())
}

fn report(runtime: &Runtime) {
    if let Some(text) = runtime.model.last_status() {
        eprintln!("{}", text);
    }
}
