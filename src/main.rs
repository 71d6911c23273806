use clap::Parser;
use std::io;

mod commands;
mod output;

use commands::rewrite;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone, Copy)]
enum ResponseMode {
    /// One report line per target on stdout.
    Lines,
    /// A single JSON envelope with the run summary.
    Json,
}

#[derive(Parser)]
#[command(name = "state-rewrite")]
#[command(version = VERSION)]
#[command(about = "Migrate handler sources from flat state services to grouped state accessors")]
struct Cli {
    #[command(flatten)]
    rewrite: rewrite::RewriteArgs,

    /// Print a JSON summary instead of the per-file report
    #[arg(long)]
    json: bool,
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    let mode = if cli.json {
        ResponseMode::Json
    } else {
        ResponseMode::Lines
    };

    let exit_code = match mode {
        ResponseMode::Lines => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            match rewrite::run(cli.rewrite, &mut handle) {
                Ok((_, exit_code)) => exit_code,
                Err(err) => {
                    output::print_text_error(&err);
                    output::exit_code_for_error(err.code)
                }
            }
        }
        ResponseMode::Json => {
            let result = rewrite::run(cli.rewrite, &mut io::sink());
            let (json_result, exit_code) = output::map_cmd_result_to_json(result);
            match output::print_json_result(json_result) {
                Ok(()) => exit_code,
                Err(err) => {
                    output::print_text_error(&err);
                    output::exit_code_for_error(err.code)
                }
            }
        }
    };

    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}
