use anyhow::{Context, Result};
use c8dasm::arch::chip8::pattern::{chip8_patterns, parse_pattern_table};
use c8dasm::dasm::chip8::{CollisionPolicy, Decoder, RomReader, disassemble_from};
use clap::{ArgAction, Args, Parser, Subcommand};
use log::{LevelFilter, debug};
use simple_logger::SimpleLogger;
use std::fs::{self, File};
use std::io::{BufWriter, Read, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "c8dasm", version, about = "CHIP-8 disassembler")]
struct Cli {
    /// Log decoder details to stderr
    #[clap(long, short, global = true, action = ArgAction::SetTrue)]
    verbose: bool,
    /// Only log errors
    #[clap(long, short, global = true, action = ArgAction::SetTrue, conflicts_with = "verbose")]
    quiet: bool,
    #[command(subcommand)]
    command: MainCommands,
}

#[derive(Subcommand)]
enum MainCommands {
    Disassemble(Disassemble),
}

#[derive(Args)]
struct Disassemble {
    #[command(subcommand)]
    command: DisassembleSubCommands,
}

#[derive(Subcommand)]
enum DisassembleSubCommands {
    Chip8(DisassembleChip8),
}

#[derive(Args)]
struct DisassembleChip8 {
    /// The ROM to disassemble, provide '-' to read from standard input
    file: String,
    /// Write the listing to this file instead of standard output
    #[clap(long, short)]
    out: Option<PathBuf>,
    /// Pattern table to decode with, one '<pattern> <mnemonic>' per line.
    /// Defaults to the built-in CHIP-8 table.
    #[clap(long, short)]
    patterns: Option<PathBuf>,
    /// Let a later pattern replace an earlier one with the same shape and digits
    /// instead of rejecting the table
    #[clap(long, action = ArgAction::SetTrue)]
    shadowing: bool,
}

fn main() -> Result<()> {
    let args = Cli::parse();

    let level = if args.verbose {
        LevelFilter::Debug
    } else if args.quiet {
        LevelFilter::Error
    } else {
        LevelFilter::Warn
    };
    SimpleLogger::new()
        .with_level(level)
        .init()
        .context("failed to initialize logging")?;

    match &args.command {
        MainCommands::Disassemble(cmd) => match &cmd.command {
            DisassembleSubCommands::Chip8(dis_chip8_arg) => disassemble_chip8(dis_chip8_arg),
        },
    }
}

fn disassemble_chip8(arg: &DisassembleChip8) -> Result<()> {
    let patterns = match &arg.patterns {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read pattern table {}", path.display()))?;
            parse_pattern_table(&text)
                .with_context(|| format!("invalid pattern table {}", path.display()))?
        }
        None => chip8_patterns()?,
    };
    let policy = if arg.shadowing {
        CollisionPolicy::LastWins
    } else {
        CollisionPolicy::Reject
    };
    let decoder = Decoder::with_policy(patterns, policy)?;
    debug!("decoding with shapes {:?}", decoder.shapes().collect::<Vec<_>>());

    let input = open_input(&arg.file)?;
    let instructions = disassemble_from(&decoder, RomReader::new(input))
        .with_context(|| format!("failed to disassemble {}", arg.file))?;

    let mut out: Box<dyn Write> = match &arg.out {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("failed to create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(std::io::stdout().lock())),
    };
    for instruction in &instructions {
        writeln!(out, "{}", instruction)?;
    }
    out.flush()?;
    Ok(())
}

fn open_input(file_def: &str) -> Result<Box<dyn Read>> {
    if file_def == "-" {
        Ok(Box::new(std::io::stdin().lock()))
    } else {
        let file = File::open(file_def).with_context(|| format!("failed to open {}", file_def))?;
        Ok(Box::new(file))
    }
}
