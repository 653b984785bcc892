//! Runs an LS-8 program image.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use log::LevelFilter;
use simple_logger::SimpleLogger;

use ls8_vm::output::LineOutput;
use ls8_vm::trace::{NoopTrace, Trace};
use ls8_vm::{Machine, State};

mod image;
mod trace;

use trace::HexTracer;

#[derive(Parser, Debug)]
#[command(name = "ls8", version)]
#[command(about = "Runs a program on the LS-8 virtual machine", long_about = None)]
struct Args {
    /// Path to the program image (one binary byte per line, `#` starts a comment)
    program: PathBuf,

    /// Print the machine state before every instruction (to stderr)
    #[arg(long, action = ArgAction::SetTrue)]
    trace: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

fn run(args: &Args) -> anyhow::Result<State> {
    let program = image::load(&args.program)?;
    let mut vm = Machine::with_program(&program)?;

    let mut output = LineOutput::new(io::stdout().lock());
    let mut trace: Box<dyn Trace> = if args.trace {
        Box::new(HexTracer::new(io::stderr()))
    } else {
        Box::new(NoopTrace)
    };

    Ok(vm.run(&mut output, &mut *trace)?)
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(err) = SimpleLogger::new().with_level(args.log_level()).init() {
        eprintln!("failed to initialize logger: {err}");
    }

    match run(&args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
