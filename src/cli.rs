//! # Command-Line Interface / 命令行接口
//!
//! Builds the clap command tree and dispatches to the subcommands.
//!
//! 构建 clap 命令树并分发到各个子命令。

use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::{env, path::PathBuf};

use crate::infra::t;

pub mod commands;

/// Default environment file, relative to the working directory.
pub const DEFAULT_ENV_FILE: &str = "env_test.yaml";

/// Script selection shared by `run` and `list`.
#[derive(Debug, Clone)]
pub struct ScriptSelection {
    pub env: PathBuf,
    pub scripts: Vec<PathBuf>,
    pub dir: Option<PathBuf>,
}

/// Pre-parses the command line arguments to find the language setting.
/// This allows i18n to be initialized before the full CLI is built.
/// It looks for a `--lang <VALUE>` argument.
fn pre_parse_language() -> String {
    let args: Vec<String> = env::args().collect();
    if let Some(pos) = args.iter().position(|arg| arg == "--lang") {
        if let Some(lang) = args.get(pos + 1) {
            return lang.clone();
        }
    }
    crate::detect_locale()
}

fn selection_args(command: Command, locale: &str) -> Command {
    command
        .arg(
            Arg::new("env")
                .short('e')
                .long("env")
                .help(t!("cli.arg_env", locale = locale).to_string())
                .value_name("ENV")
                .default_value(DEFAULT_ENV_FILE)
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("script")
                .short('s')
                .long("script")
                .help(t!("cli.arg_script", locale = locale).to_string())
                .value_name("SCRIPT")
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("dir")
                .long("dir")
                .help(t!("cli.arg_dir", locale = locale).to_string())
                .value_name("DIR")
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
}

pub fn build_cli(locale: &str) -> Command {
    Command::new("script-runner")
        .version(env!("CARGO_PKG_VERSION"))
        .about(t!("cli.about", locale = locale).to_string())
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("lang")
                .long("lang")
                .help(t!("cli.arg_lang", locale = locale).to_string())
                .value_name("LANGUAGE")
                .global(true)
                .action(ArgAction::Set),
        )
        .subcommand(
            selection_args(
                Command::new("run").about(t!("cli.cmd_run_about", locale = locale).to_string()),
                locale,
            )
            .arg(
                Arg::new("dry-run")
                    .short('d')
                    .long("dry-run")
                    .help(t!("cli.arg_dry_run", locale = locale).to_string())
                    .action(ArgAction::SetTrue),
            )
            .arg(
                Arg::new("project-dir")
                    .long("project-dir")
                    .help(t!("cli.arg_project_dir", locale = locale).to_string())
                    .value_name("PROJECT_DIR")
                    .default_value(".")
                    .value_parser(clap::value_parser!(PathBuf))
                    .action(ArgAction::Set),
            )
            .arg(
                Arg::new("timeout")
                    .long("timeout")
                    .help(t!("cli.arg_timeout", locale = locale).to_string())
                    .value_name("SECONDS")
                    .value_parser(clap::value_parser!(u64))
                    .action(ArgAction::Set),
            )
            .arg(
                Arg::new("keep-going")
                    .long("keep-going")
                    .help(t!("cli.arg_keep_going", locale = locale).to_string())
                    .action(ArgAction::SetTrue),
            ),
        )
        .subcommand(
            selection_args(
                Command::new("list").about(t!("cli.cmd_list_about", locale = locale).to_string()),
                locale,
            )
            .arg(
                Arg::new("json")
                    .long("json")
                    .help(t!("cli.arg_json", locale = locale).to_string())
                    .action(ArgAction::SetTrue),
            ),
        )
}

fn selection_from(matches: &ArgMatches) -> ScriptSelection {
    ScriptSelection {
        env: matches
            .get_one::<PathBuf>("env")
            .cloned()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ENV_FILE)),
        scripts: matches
            .get_many::<PathBuf>("script")
            .map(|values| values.cloned().collect())
            .unwrap_or_default(),
        dir: matches.get_one::<PathBuf>("dir").cloned(),
    }
}

pub async fn run() -> Result<()> {
    // Pre-parse language and initialize i18n first.
    let language = pre_parse_language();
    rust_i18n::set_locale(&language);

    let matches = build_cli(&language).get_matches();

    match matches.subcommand() {
        Some(("run", run_matches)) => {
            let options = commands::run::RunArgs {
                selection: selection_from(run_matches),
                dry_run: run_matches.get_flag("dry-run"),
                project_dir: run_matches
                    .get_one::<PathBuf>("project-dir")
                    .cloned()
                    .unwrap_or_else(|| PathBuf::from(".")),
                timeout_secs: run_matches.get_one::<u64>("timeout").copied(),
                keep_going: run_matches.get_flag("keep-going"),
            };
            commands::run::execute(options, &language).await?;
        }
        Some(("list", list_matches)) => {
            let selection = selection_from(list_matches);
            let json = list_matches.get_flag("json");
            commands::list::execute(selection, json, &language)?;
        }
        _ => {
            // `subcommand_required` makes clap print help and exit before we get here.
        }
    }
    Ok(())
}
