/*
 * ==========================================================================
 * CLAWSCRIPT - Code with Claws!
 * ==========================================================================
 *
 * File:      main.rs
 * Purpose:   The `clawscript` CLI: runs a script file, or drops into a
 *            REPL when invoked with no arguments.
 *
 * Author:    Sam Wilcox
 * Email:     sam@pawx-lang.com
 * Website:   https://www.pawx-lang.com
 * GitHub:    https://github.com/samwilcox/pawx
 *
 * License:
 * This file is part of the CLAWSCRIPT programming language project.
 *
 * CLAWSCRIPT is dual-licensed under the terms of:
 *   - The MIT License
 *   - The Apache License, Version 2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under these licenses is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *
 * ==========================================================================
 */

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use clawscript::{diagnostics, ClawError};

/// ClawScript - a small dynamically-typed, class-based scripting language.
#[derive(Parser)]
#[command(name = "clawscript", version, about)]
struct Cli {
    /// Script file to run. Omit to start a REPL.
    script: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return ExitCode::from(exitcode::USAGE as u8);
        }
    };

    match cli.script {
        Some(path) => run_file(&path),
        None => run_repl(),
    }
}

fn run_file(path: &PathBuf) -> ExitCode {
    let source = match std::fs::read_to_string(path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("clawscript: could not read '{}': {}", path.display(), err);
            return ExitCode::from(exitcode::NOINPUT as u8);
        }
    };

    match clawscript::run(&source) {
        Ok(()) => ExitCode::from(exitcode::OK as u8),
        Err(err) => {
            report_error(&err);
            ExitCode::from(exit_code_for(&err) as u8)
        }
    }
}

/// Reads and executes one line at a time, printing diagnostics for a
/// failing line but never exiting the process because of it — only EOF
/// (Ctrl-D) or an explicit interrupt ends the session.
fn run_repl() -> ExitCode {
    log::info!("starting clawscript REPL");
    let stdin = io::stdin();
    let mut line = String::new();

    loop {
        print!("> ");
        if io::stdout().flush().is_err() {
            break;
        }

        line.clear();
        match stdin.read_line(&mut line) {
            Ok(0) => break, // EOF
            Ok(_) => {
                if let Err(err) = clawscript::run(&line) {
                    report_error(&err);
                }
            }
            Err(err) => {
                eprintln!("clawscript: error reading stdin: {}", err);
                break;
            }
        }
    }

    ExitCode::from(exitcode::OK as u8)
}

fn report_error(err: &ClawError) {
    match err {
        ClawError::Lex(errors) => diagnostics::report_all(errors, |e| e.line),
        ClawError::Parse(errors) => diagnostics::report_all(errors, |e| e.line),
        ClawError::Resolve(errors) => diagnostics::report_all(errors, |e| e.line),
        ClawError::Runtime(err) => diagnostics::report(err.line(), err),
    }
}

/// Maps a pipeline-stage failure to a sysexits-style exit code: CLI
/// argument misuse is mapped to `64` in `main` before this is ever called;
/// `65` is for static errors (bad input data: lex, parse, resolve), `70`
/// for runtime errors (failure while executing otherwise-valid input).
fn exit_code_for(err: &ClawError) -> i32 {
    match err {
        ClawError::Lex(_) | ClawError::Parse(_) | ClawError::Resolve(_) => exitcode::DATAERR,
        ClawError::Runtime(_) => exitcode::SOFTWARE,
    }
}

