//! Navo command line shell
//!
//! Usage:
//!   navo                      # interactive REPL
//!   navo program.navo         # parse a file as a program and print its AST
//!   navo --mode expr calc.txt # parse a file as one expression
//!   navo --mode single one.txt # parse a file as exactly one statement
//!   navo --tokens -vv file    # dump tokens and debug logs

use std::{
    fmt::Display,
    fs,
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use log::{debug, info};
use navo::{
    errors::errors::{Error, ErrorTip},
    get_line_at_position,
    lexer::lexer::{strip_comments, tokenize},
    parse_expression, parse_program, parse_statement, Position,
};

/// Navo - tokenizer and parser for the Navo teaching language
#[derive(Parser, Debug)]
#[command(name = "navo")]
#[command(version)]
#[command(about = "Parse Navo source and print its abstract syntax tree", long_about = None)]
struct Cli {
    /// Source file to parse; starts the REPL when omitted
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// How input is parsed
    #[arg(short, long, default_value = "auto")]
    mode: Mode,

    /// Print the token stream before parsing
    #[arg(long)]
    tokens: bool,

    /// Verbose output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Guess per input
    Auto,
    /// A single expression
    Expr,
    /// One or more statements
    Stmt,
    /// Exactly one statement
    Single,
}

impl Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Auto => write!(f, "auto"),
            Mode::Expr => write!(f, "expr"),
            Mode::Stmt => write!(f, "stmt"),
            Mode::Single => write!(f, "single"),
        }
    }
}

impl Mode {
    /// Settles `Auto` for a concrete input.
    fn resolve(self, input: &str) -> Mode {
        match self {
            Mode::Auto if looks_like_statement(input) => Mode::Stmt,
            Mode::Auto => Mode::Expr,
            mode => mode,
        }
    }
}

/// Statement mode is picked whenever the input carries statement syntax.
fn looks_like_statement(input: &str) -> bool {
    const MARKERS: [&str; 8] = [";", "{", "number ", "word ", "boolean ", "if ", "while ", "for "];
    MARKERS.iter().any(|marker| input.contains(marker))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.quiet {
        log::LevelFilter::Error
    } else {
        match cli.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .format_timestamp(None)
        .init();

    match &cli.file {
        Some(path) => run_file(path, cli.mode, cli.tokens),
        None => run_repl(cli.mode, cli.tokens),
    }
}

fn run_file(path: &Path, mode: Mode, show_tokens: bool) -> Result<()> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file: {:?}", path))?;
    info!("Parsing {:?} in {} mode", path, mode);

    if show_tokens {
        print_tokens(&source, &mut io::stdout())?;
    }

    let result = match mode {
        Mode::Expr => parse_expression(&source).map(|expr| expr.to_string()),
        Mode::Single => parse_statement(&source).map(|stmt| stmt.to_string()),
        Mode::Auto | Mode::Stmt => parse_program(&source).map(|program| program.to_string()),
    };

    match result {
        Ok(rendering) => {
            print!("{}", rendering);
            if !rendering.ends_with('\n') {
                println!();
            }
            Ok(())
        }
        Err(error) => {
            display_error(&error, &source, &path.to_string_lossy());
            bail!("failed to parse {:?}", path);
        }
    }
}

fn run_repl(initial_mode: Mode, show_tokens: bool) -> Result<()> {
    let mut repl = Repl::new(initial_mode, show_tokens);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut lines = stdin.lock().lines();

    writeln!(stdout, "Navo parser REPL. Type 'help' for commands.")?;

    loop {
        write!(stdout, "navo[{}]> ", repl.mode)?;
        stdout.flush().context("Failed to flush stdout")?;

        let Some(line) = lines.next() else {
            writeln!(stdout)?;
            break;
        };
        let line = line.context("Failed to read from stdin")?;

        if repl.handle_line(line.trim(), &mut stdout)? == Flow::Quit {
            break;
        }
    }

    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// REPL state carried between input lines.
struct Repl {
    mode: Mode,
    show_tokens: bool,
    /// Set by the `tokens` command: the next input is tokenized, not parsed.
    tokens_only: bool,
}

impl Repl {
    fn new(mode: Mode, show_tokens: bool) -> Self {
        Repl {
            mode,
            show_tokens,
            tokens_only: false,
        }
    }

    fn handle_line(&mut self, input: &str, out: &mut impl Write) -> io::Result<Flow> {
        match input {
            "" => {}
            "quit" | "exit" | "q" => return Ok(Flow::Quit),
            "help" | "h" | "?" => print_help(out)?,
            "clear" | "cls" => write!(out, "\x1B[2J\x1B[1;1H")?,
            "tokens" => {
                self.tokens_only = true;
                writeln!(out, "Token-only: the next input is tokenized but not parsed.")?;
            }
            "mode expr" => self.switch_mode(Mode::Expr, out)?,
            "mode stmt" => self.switch_mode(Mode::Stmt, out)?,
            "mode single" => self.switch_mode(Mode::Single, out)?,
            "mode auto" => self.switch_mode(Mode::Auto, out)?,
            source if self.tokens_only => {
                self.tokens_only = false;
                print_tokens(source, out)?;
            }
            source => {
                if self.show_tokens {
                    print_tokens(source, out)?;
                }
                evaluate(source, self.mode.resolve(source), out)?;
            }
        }

        Ok(Flow::Continue)
    }

    fn switch_mode(&mut self, mode: Mode, out: &mut impl Write) -> io::Result<()> {
        self.mode = mode;
        writeln!(out, "Switched to {} mode", mode)
    }
}

fn evaluate(input: &str, mode: Mode, out: &mut impl Write) -> io::Result<()> {
    debug!("evaluating {:?} in {} mode", input, mode);

    let result = match mode {
        Mode::Expr => parse_expression(input).map(|expr| vec![expr.to_string()]),
        Mode::Single => parse_statement(input).map(|stmt| vec![stmt.to_string()]),
        Mode::Auto | Mode::Stmt => parse_program(input).map(|program| {
            program.statements.iter().map(|stmt| stmt.to_string()).collect::<Vec<_>>()
        }),
    };

    match result {
        Ok(renderings) => {
            for rendering in renderings {
                writeln!(out, "AST: {}", rendering)?;
            }
        }
        Err(error) => {
            writeln!(out, "Parse Error: {}", error)?;
            display_error(&error, input, "<repl>");
            match mode {
                Mode::Expr => writeln!(out, "Tip: use 'mode stmt' to parse statements ending in ';'")?,
                _ => writeln!(out, "Tip: use 'mode expr' to parse a bare expression")?,
            }
        }
    }

    Ok(())
}

fn print_help(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Commands:")?;
    writeln!(out, "  quit, exit, q      leave the REPL")?;
    writeln!(out, "  help, h, ?         show this message")?;
    writeln!(out, "  mode expr          parse input as one expression")?;
    writeln!(out, "  mode stmt          parse input as a sequence of statements")?;
    writeln!(out, "  mode single        parse input as exactly one statement")?;
    writeln!(out, "  mode auto          guess expr or stmt for each input")?;
    writeln!(out, "  tokens             print the tokens of the next input without parsing it")?;
    writeln!(out, "  clear, cls         clear the screen")?;
    writeln!(out, "Anything else is parsed and its AST printed.")
}

fn print_tokens(source: &str, out: &mut impl Write) -> io::Result<()> {
    match tokenize(source) {
        Ok(tokens) => {
            for (index, token) in tokens.iter().enumerate() {
                writeln!(out, "{:>4}  {}", index, token)?;
            }
            Ok(())
        }
        Err(error) => writeln!(out, "Tokenize Error: {}", error),
    }
}

/// Byte offset in `source` that an error position refers to.
///
/// Token positions index the comment-free stream; a position past the last
/// token points just after it.
fn source_offset(source: &str, position: Position) -> usize {
    match position {
        Position::Source(offset) => offset,
        Position::Token(index) => {
            let tokens = match tokenize(source) {
                Ok(tokens) => strip_comments(tokens),
                Err(_) => return 0,
            };
            match tokens.get(index) {
                Some(token) => token.span.start,
                None => tokens.last().map(|token| token.span.end).unwrap_or(0),
            }
        }
    }
}

fn display_error(error: &Error, source: &str, origin: &str) {
    /*
        error: UnexpectedToken (tip)
        -> <repl>
          |
        1 | number x = 5 +;
          | --------------^
    */

    let offset = source_offset(source, error.get_position());
    let (line, line_text, line_pos) = get_line_at_position(source, offset);

    let line_str = line.to_string();
    let padding = line_str.len() + 2;

    if let ErrorTip::None = error.get_tip() {
        eprintln!("Error: {}", error.get_error_name());
    } else {
        eprintln!("Error: {} ({})", error.get_error_name(), error.get_tip());
    }
    eprintln!("-> {}", origin);
    eprintln!("{:>padding$}", "|");

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    eprintln!("{} | {}", line_str, line_text_removed.trim_end());

    let arrows = line_text
        .get(removed_whitespace..line_pos.max(removed_whitespace))
        .map(|prefix| prefix.chars().count())
        .unwrap_or(0)
        + 1;

    eprintln!("{:>padding$} {:->arrows$}", "|", "^");
}

fn remove_starting_whitespace(string: &str) -> (&str, usize) {
    let trimmed = string.trim_start();
    (trimmed, string.len() - trimmed.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statement_heuristic() {
        assert!(looks_like_statement("x = 1;"));
        assert!(looks_like_statement("{"));
        assert!(looks_like_statement("number x"));
        assert!(looks_like_statement("while (x) x++"));
        assert!(!looks_like_statement("2 + 3 * 4"));
        assert!(!looks_like_statement("numbers + 1"));
    }

    #[test]
    fn test_mode_resolution() {
        assert_eq!(Mode::Auto.resolve("x = 1;"), Mode::Stmt);
        assert_eq!(Mode::Auto.resolve("x + 1"), Mode::Expr);
        assert_eq!(Mode::Expr.resolve("x = 1;"), Mode::Expr);
    }

    #[test]
    fn test_source_offset_for_token_positions() {
        // The error sits on the `;`
        let source = "x = 5 + ;";
        assert_eq!(source_offset(source, Position::Token(4)), 8);
        assert_eq!(source_offset(source, Position::Token(9)), 9);
        assert_eq!(source_offset(source, Position::Source(3)), 3);
    }

    #[test]
    fn test_source_offset_skips_comments() {
        let source = "/* lead */ x";
        assert_eq!(source_offset(source, Position::Token(0)), 11);
    }

    #[test]
    fn test_remove_starting_whitespace() {
        assert_eq!(remove_starting_whitespace("  \tx = 1;"), ("x = 1;", 3));
        assert_eq!(remove_starting_whitespace("x"), ("x", 0));
    }

    fn run_lines(repl: &mut Repl, lines: &[&str]) -> String {
        let mut out = Vec::new();
        for line in lines {
            repl.handle_line(line, &mut out).unwrap();
        }
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_tokens_command_skips_parsing() {
        let mut repl = Repl::new(Mode::Auto, false);
        let output = run_lines(&mut repl, &["tokens", "x + 1"]);

        assert!(output.contains("Identifier: \"x\""));
        assert!(output.contains("Number: \"1\""));
        assert!(!output.contains("AST:"));

        let output = run_lines(&mut repl, &["x + 1"]);
        assert_eq!(output, "AST: (x + 1)\n");
    }

    #[test]
    fn test_tokens_flag_dumps_and_parses() {
        let mut repl = Repl::new(Mode::Expr, true);
        let output = run_lines(&mut repl, &["2 * y"]);

        assert!(output.contains("Operator: \"*\""));
        assert!(output.ends_with("AST: (2 * y)\n"));
    }

    #[test]
    fn test_single_statement_mode() {
        let mut repl = Repl::new(Mode::Stmt, false);
        let output = run_lines(&mut repl, &["x = 1; y = 2;"]);
        assert_eq!(output, "AST: x = 1;\nAST: y = 2;\n");

        let output = run_lines(&mut repl, &["mode single", "x = 1; y = 2;"]);
        assert!(output.starts_with("Switched to single mode\n"));
        assert!(output.contains("Parse Error: Unexpected token after statement: 'y'"));

        let output = run_lines(&mut repl, &["while (x < 3) x++;"]);
        assert_eq!(output, "AST: while ((x < 3)) (x++);\n");
    }

    #[test]
    fn test_quit_commands() {
        let mut repl = Repl::new(Mode::Auto, false);
        let mut out = Vec::new();

        assert_eq!(repl.handle_line("help", &mut out).unwrap(), Flow::Continue);
        for command in ["quit", "exit", "q"] {
            assert_eq!(repl.handle_line(command, &mut out).unwrap(), Flow::Quit);
        }
    }
}
