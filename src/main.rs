use std::{
    fs::read_to_string,
    path::{Path, PathBuf},
    process::exit,
    rc::Rc,
    time::Instant,
};

use cfront::{
    analyzer::analyzer::analyze, errors::errors::Error, lexer::lexer::tokenize,
    parser::parser::parse, render_error,
};
use clap::Parser;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Source file to check
    input: PathBuf,

    /// Print phase timings
    #[arg(short, long)]
    verbose: bool,

    /// Dump the token stream
    #[arg(short, long)]
    tokens: bool,

    /// Dump the parsed tree
    #[arg(short, long)]
    dump_ast: bool,
}

fn main() {
    let args = Args::parse();

    let file_name = args
        .input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| args.input.to_string_lossy().into_owned());

    let source = match read_to_string(&args.input) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("Error: could not read {}: {}", args.input.display(), error);
            exit(1);
        }
    };

    let start = Instant::now();

    let tokens = tokenize(source.clone(), Some(file_name.clone()))
        .unwrap_or_else(|error| fail(&error, &source, &args.input));

    if args.verbose {
        println!("Tokenized in {:?}", start.elapsed());
    }
    if args.tokens {
        for token in tokens.iter() {
            println!("{}", token.debug());
        }
    }

    let parse_start = Instant::now();
    let mut program = parse(tokens, Rc::new(file_name))
        .unwrap_or_else(|error| fail(&error, &source, &args.input));

    if args.verbose {
        println!("Parsed in {:?}", parse_start.elapsed());
    }
    if args.dump_ast {
        print!("{}", program);
    }

    let analyze_start = Instant::now();
    if let Err(error) = analyze(&mut program.body) {
        fail(&error, &source, &args.input);
    }

    if args.verbose {
        println!("Analyzed in {:?}", analyze_start.elapsed());
        println!("Total time: {:?}", start.elapsed());
    }

    println!("analyzed ✓");
}

fn fail(error: &Error, source: &str, file: &Path) -> ! {
    eprint!("{}", render_error(error, source, &file.to_string_lossy()));
    exit(1);
}
