mod args;
mod output;
mod scenario;
mod settings;

use crate::args::build_cli;
use crate::output::{operations_table, outcome_table, Outcome};
use crate::scenario::{create_repeats, Scenario};
use crate::settings::EvalSettings;
use anyhow::{bail, Result};
use focal_lib::workspaces::Workspace;
use std::path::Path;

/// Apply the operation given on the command line
fn eval(settings: &EvalSettings) -> Result<Outcome> {
    let mut workspace = Workspace::default();
    let domain = workspace.create_domain(settings.domain.clone());
    let left = workspace.create_number(
        domain,
        settings.left,
        settings.left_polarity,
    )?;
    let right = match settings.right {
        Some(focal) => Some(workspace.create_number(
            domain,
            focal,
            settings.right_polarity,
        )?),
        None => None,
    };
    let repeats = match settings.repeats {
        Some(k) => Some(create_repeats(&mut workspace, domain, k)?),
        None => None,
    };
    let result = workspace.apply_operation(
        domain,
        left,
        right,
        settings.operation,
        repeats,
    )?;

    let mut label = match settings.right {
        Some(r) => format!("{} {} {}", settings.left, settings.operation, r),
        None => format!("{} {}", settings.operation, settings.left),
    };
    if let Some(k) = settings.repeats {
        label.push_str(&format!(" x{k}"));
    }
    Outcome::new(workspace.domain(domain)?, label, settings.operation, result)
}

fn main() -> Result<()> {
    let matches = build_cli().get_matches();

    let level = match matches.get_count("verbose") {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    match matches.subcommand() {
        Some(("eval", sub)) => {
            let settings = EvalSettings::new(sub)?;
            let outcome = eval(&settings)?;
            println!("{}", outcome_table(&[outcome], settings.show_mask));
        }
        Some(("run", sub)) => {
            let file = sub
                .get_one::<String>("FILE")
                .map(String::as_str)
                .unwrap_or_default();
            let outcomes = Scenario::from_file(Path::new(file))?.run()?;
            println!("{}", outcome_table(&outcomes, true));
        }
        Some(("operations", _)) => {
            println!("{}", operations_table());
        }
        Some(("completions", sub)) => {
            if let Some(shell) =
                sub.get_one::<clap_complete_command::Shell>("shell")
            {
                shell.generate(&mut build_cli(), &mut std::io::stdout());
            }
        }
        Some((other, _)) => bail!("unknown command {other}"),
        None => bail!("no command given"),
    }

    Ok(())
}
