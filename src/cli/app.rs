use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gigdesk::config::AppConfig;
use gigdesk::domain::Phase;
use gigdesk::facade::PhaseBoard;
use gigdesk::projection::{
    HistoryFilter, HistoryRole, HistoryScreen, HistoryView, StaticProjectSource,
};
use gigdesk::select::{SearchableSelect, load_options};
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "gigdesk")]
#[command(about = "Inspect marketplace state: project history, region search, phase progress")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show a user's project history
    History {
        /// JSON array of project records
        #[arg(long)]
        data: PathBuf,
        #[arg(long)]
        user: i64,
        /// `accepted` (My Projects) or `all`
        #[arg(long)]
        filter: Option<HistoryFilter>,
        /// `client` or `freelancer`
        #[arg(long)]
        role: Option<HistoryRole>,
        #[arg(long)]
        config: Option<PathBuf>,
        /// Print the rendered screen as JSON
        #[arg(long)]
        json: bool,
    },
    /// Search a region reference list
    Regions {
        /// JSON array of `{id, name}` options
        #[arg(long)]
        data: PathBuf,
        #[arg(long, default_value = "")]
        query: String,
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Summarize project phases
    Phases {
        /// JSON array of phases
        #[arg(long)]
        data: PathBuf,
    },
}

fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    match path {
        Some(path) => AppConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(AppConfig::default()),
    }
}

pub async fn run(cli: Cli, out: &mut impl Write) -> Result<()> {
    match cli.command {
        Command::History {
            data,
            user,
            filter,
            role,
            config,
            json,
        } => {
            let mut config = load_config(config.as_deref())?.history;
            if let Some(role) = role {
                config.role = role;
            }
            let source = StaticProjectSource::from_json_file(&data)
                .with_context(|| format!("failed to read projects from {}", data.display()))?;

            let mut view = HistoryView::new(config);
            if let Some(filter) = filter {
                view.set_filter(filter);
            }
            if !view.refresh(&source, user).await
                && let Some(err) = view.last_error()
            {
                writeln!(out, "warning: {}", err)?;
            }
            write_history(&view.render(), json, out)
        }
        Command::Regions {
            data,
            query,
            config,
        } => {
            let config = load_config(config.as_deref())?.select;
            let options = load_options(&data)
                .with_context(|| format!("failed to read options from {}", data.display()))?;
            let mut select = SearchableSelect::with_config(options, config);
            select.set_query(&query);
            for option in select.visible_options() {
                writeln!(out, "{:>3}  {}", option.id, option.name)?;
            }
            Ok(())
        }
        Command::Phases { data } => {
            let raw = std::fs::read_to_string(&data)
                .with_context(|| format!("failed to read phases from {}", data.display()))?;
            let phases: Vec<Phase> = serde_json::from_str(&raw)?;
            let board = PhaseBoard::new(phases)?;
            write_phases(&board, out)
        }
    }
}

fn write_history(screen: &HistoryScreen, json: bool, out: &mut impl Write) -> Result<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(screen)?)?;
        return Ok(());
    }

    if let HistoryScreen::Empty {
        summary: Some(summary),
        ..
    }
    | HistoryScreen::Items {
        summary: Some(summary),
        ..
    } = screen
    {
        writeln!(
            out,
            "Total Projects: {}  Total Earnings: {}",
            summary.total_projects, summary.total_earnings
        )?;
    }

    match screen {
        HistoryScreen::Loading { message } => writeln!(out, "{}", message)?,
        HistoryScreen::Empty {
            message, subtext, ..
        } => {
            writeln!(out, "{}", message)?;
            writeln!(out, "{}", subtext)?;
        }
        HistoryScreen::Items { entries, .. } => {
            for entry in entries {
                writeln!(out, "#{} {} [{}]", entry.id, entry.title, entry.badge.label)?;
                if let Some(counterpart) = &entry.counterpart {
                    writeln!(out, "    {}", counterpart)?;
                }
                writeln!(out, "    Created: {}  Deadline: {}", entry.created, entry.deadline)?;
                if let Some(price) = &entry.price {
                    writeln!(out, "    Price: {}", price)?;
                }
            }
        }
    }
    Ok(())
}

fn write_phases(board: &PhaseBoard, out: &mut impl Write) -> Result<()> {
    let stats = board.statistics();
    writeln!(
        out,
        "{} phases: {} completed, {} in progress, {} not started ({}% of tasks done)",
        stats.total, stats.completed, stats.in_progress, stats.not_started, stats.overall_completion
    )?;
    for phase in board.sorted_by_priority() {
        writeln!(
            out,
            "  [{}] {} {}/{}",
            phase.status, phase.name, phase.tasks.completed, phase.tasks.total
        )?;
    }
    let open = board.incomplete_todos();
    if !open.is_empty() {
        writeln!(out, "Open tasks:")?;
        for item in open {
            writeln!(out, "  {}: {}", item.phase_name, item.todo.title)?;
        }
    }
    Ok(())
}
