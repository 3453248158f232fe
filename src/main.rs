use std::{fs, io, process};

use clap::Parser;
use probe::{RunStatus, error::ConsoleReporter, parse_program, run, tokenize};

/// probe is a small, dynamically typed scripting language with closures,
/// arrays and a tree-walking interpreter.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells probe to look at a file instead of a script.
    #[arg(short, long)]
    file: bool,

    /// Prints the parsed program as S-expressions instead of running it.
    #[arg(long, conflicts_with = "tokens")]
    ast: bool,

    /// Prints the scanned tokens instead of running the program.
    #[arg(long)]
    tokens: bool,

    contents: String,
}

fn main() {
    let args = Args::parse();

    let source = if args.file {
        fs::read_to_string(&args.contents).unwrap_or_else(|_| {
            eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                      &args.contents);
            process::exit(74);
        })
    } else {
        args.contents
    };

    let mut reporter = ConsoleReporter::stderr(&source);

    let status = if args.tokens {
        tokenize(&source, &mut reporter).map(|tokens| {
                                            for token in tokens {
                                                println!("{token}");
                                            }
                                        })
                                        .err()
                                        .unwrap_or(RunStatus::Completed)
    } else if args.ast {
        parse_program(&source, &mut reporter).map(|program| {
                                                 for statement in program {
                                                     println!("{statement}");
                                                 }
                                             })
                                             .err()
                                             .unwrap_or(RunStatus::Completed)
    } else {
        run(&source, &mut io::stdout(), &mut reporter)
    };

    process::exit(status.exit_code());
}
