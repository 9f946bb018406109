//! `taskdesk` command-line front end.
//!
//! # Responsibility
//! - Open the task database, run one command, print its outcome.
//! - Ask for confirmation on stdin before destructive commands unless `--yes`.
//!
//! Exit codes: `0` success, `1` storage failure, `2` rejected input.

mod cli;
mod render;

use clap::Parser;
use cli::Cli;
use log::warn;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use taskdesk_core::{
    default_log_level, init_logging, open_db, AssumeYes, CommandError, Confirm, Outcome, TaskBoard,
};

/// Prompts on stderr and reads one answer from stdin.
struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&mut self, prompt: &str) -> bool {
        let mut stderr = io::stderr();
        if write!(stderr, "{prompt} [y/N] ").and_then(|()| stderr.flush()).is_err() {
            return false;
        }
        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        if let Err(err) = init_logging(level, log_dir) {
            eprintln!("warning: logging disabled: {err}");
        }
    }

    let conn = match open_db(&cli.db) {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("DatabaseError: {err}");
            return ExitCode::from(1);
        }
    };
    let board = match TaskBoard::open(&conn) {
        Ok(board) => board,
        Err(err) => {
            eprintln!("DatabaseError: {err}");
            return ExitCode::from(1);
        }
    };

    let mut confirm: Box<dyn Confirm> = if cli.yes {
        Box::new(AssumeYes)
    } else {
        Box::new(StdinConfirm)
    };

    match board.dispatch(cli.command.into_command(), confirm.as_mut()) {
        Ok(outcome) => {
            print_outcome(&outcome, cli.json);
            ExitCode::SUCCESS
        }
        Err(err) => {
            print_error(&err, cli.json);
            if err.is_user_error() {
                ExitCode::from(2)
            } else {
                ExitCode::from(1)
            }
        }
    }
}

fn print_outcome(outcome: &Outcome, json: bool) {
    if !json {
        println!("{}", render::render(outcome));
        return;
    }
    match serde_json::to_string_pretty(outcome) {
        Ok(text) => println!("{text}"),
        Err(err) => {
            warn!("event=render module=cli status=error error_code=json_encode_failed");
            eprintln!("failed to encode result as JSON: {err}");
        }
    }
}

fn print_error(err: &CommandError, json: bool) {
    if json {
        let body = serde_json::json!({
            "error": err.code(),
            "message": err.user_message(),
        });
        println!("{body}");
    } else {
        eprintln!("{}", err.user_message());
    }
}
