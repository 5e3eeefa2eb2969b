//! `dedupe` command-line entry point.

use dedupec::cli::{parse_args, print_usage, run, Command};

fn main() {
    dedupec::init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();

    let command = match parse_args(&args) {
        Ok(command) => command,
        Err(err) => {
            eprintln!("error: {err}");
            eprintln!();
            eprintln!("Run `dedupe --help` for usage.");
            std::process::exit(1);
        }
    };

    match command {
        Command::Help => print_usage(),
        Command::Version => println!("dedupe {}", env!("CARGO_PKG_VERSION")),
        Command::Run(options) => match run(&options) {
            Ok(output) => println!("{output}"),
            Err(err) => {
                eprintln!("error: {err}");
                std::process::exit(1);
            }
        },
    }
}
