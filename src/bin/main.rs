use clap::{Parser, ValueEnum};
use rpal_lex::{Error, Result, Scanner, Token};
use std::{
    io::{self, Write},
    path::PathBuf,
    process,
};

/// Print the tokens of an RPAL source file.
#[derive(Parser)]
#[command(name = "rpal-lex", version)]
struct Args {
    /// Source file to scan
    file: PathBuf,

    /// Also print whitespace and comment tokens
    #[arg(long)]
    all: bool,

    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// One `<KIND:value>` per line
    Text,
    /// One JSON object per line
    Json,
}

fn main() {
    let args = Args::parse();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Err(e) = run(&args, &mut out) {
        let _ = out.flush();
        eprintln!("{}", e);
        process::exit(if e.is_io_error() { 74 } else { 65 });
    }
}

fn run<W: Write>(args: &Args, out: &mut W) -> Result<()> {
    let scanner = Scanner::open(&args.file)?;
    let tokens: Box<dyn Iterator<Item = Result<Token>>> = if args.all {
        Box::new(scanner)
    } else {
        Box::new(scanner.screened())
    };

    write_tokens(tokens, args.format, out)
}

fn write_tokens<I, W>(tokens: I, format: Format, out: &mut W) -> Result<()>
where
    I: Iterator<Item = Result<Token>>,
    W: Write,
{
    let mut last_line = 1;
    for token in tokens {
        let token = token?;
        last_line = token.line();
        write_token(&token, format, out)
            .map_err(|e| Error::io(last_line, e, "Could not write output."))?;
    }

    out.flush().map_err(|e| Error::io(last_line, e, "Could not write output."))
}

fn write_token<W: Write>(token: &Token, format: Format, out: &mut W) -> io::Result<()> {
    match format {
        Format::Text => writeln!(out, "{}", token),
        Format::Json => {
            serde_json::to_writer(&mut *out, token)?;
            writeln!(out)
        },
    }
}
