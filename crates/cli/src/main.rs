//! armsim command-line driver.
//!
//! This binary provides a single entry point for the simulator. It performs:
//! 1. **Run:** Assemble and execute a `.s` file, then report registers and exit with `x0`.
//! 2. **Compile:** Transpile a toy-language program to assembly and save it.
//! 3. **Exec:** Transpile a toy-language program and run the result in-process,
//!    optionally saving the assembly with `--emit`.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::{fs, process};

use clap::{Args, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use armsim_core::common::{AsmError, RegisterFile};
use armsim_core::config::Config;
use armsim_core::isa::Reg;
use armsim_core::sim::loader;
use armsim_core::{ExecutionResult, Simulator};

/// Registers reported after a run unless `--all-registers` is given.
const REPORTED_REGISTERS: std::ops::RangeInclusive<u8> = 10..=28;

#[derive(Parser, Debug)]
#[command(
    name = "armsim",
    author,
    version,
    about = "64-bit ARM-style assembly simulator",
    long_about = "Assemble and run AArch64-flavoured assembly, or transpile and run toy-language programs.\n\nAfter a run, non-zero registers x10..x28 are printed as `X<n>: <value>` and the process exits with x0 (low 8 bits).\n\nExamples:\n  armsim run program.s\n  armsim run program.s --step-limit 100000 --stats\n  armsim compile hello.txt -o hello.s\n  armsim exec hello.txt"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Assemble and run an assembly file.
    Run {
        /// Assembly source file.
        file: PathBuf,

        #[command(flatten)]
        options: RunOptions,
    },

    /// Transpile a toy-language program to assembly.
    Compile {
        /// Toy-language source file.
        file: PathBuf,

        /// Output path (defaults to the input with a `.s` extension).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Transpile a toy-language program and run it.
    Exec {
        /// Toy-language source file.
        file: PathBuf,

        /// Also save the assembly where `compile` would put it.
        #[arg(long)]
        emit: bool,

        #[command(flatten)]
        options: RunOptions,
    },
}

#[derive(Args, Debug)]
struct RunOptions {
    /// JSON configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log every executed instruction (trace level).
    #[arg(long)]
    trace: bool,

    /// Fault after this many executed instructions.
    #[arg(long)]
    step_limit: Option<u64>,

    /// Report every register, including zeros.
    #[arg(long)]
    all_registers: bool,

    /// Print execution statistics after the run.
    #[arg(long)]
    stats: bool,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { file, options } => cmd_run(&file, &options),
        Commands::Compile { file, output } => cmd_compile(&file, output),
        Commands::Exec { file, emit, options } => cmd_exec(&file, emit, &options),
    }
}

/// Installs the log subscriber. `RUST_LOG` wins; `--trace` raises the core to `trace`.
fn init_tracing(trace: bool) {
    let filter = if trace {
        EnvFilter::new("armsim_core=trace")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Builds the configuration from `--config` and command-line overrides.
fn load_config(options: &RunOptions) -> Config {
    let mut config = match &options.config {
        Some(path) => Config::from_file(path).unwrap_or_else(|e| {
            eprintln!("Error loading config {}: {}", path.display(), e);
            process::exit(1);
        }),
        None => Config::default(),
    };
    if options.trace {
        config.general.trace_instructions = true;
    }
    if options.step_limit.is_some() {
        config.general.step_limit = options.step_limit;
    }
    config
}

/// Reads an assembly file and runs it.
fn cmd_run(file: &Path, options: &RunOptions) {
    init_tracing(options.trace);
    let lines = loader::load_source(file).unwrap_or_else(|e| {
        eprintln!("Error reading {}: {}", file.display(), e);
        process::exit(1);
    });
    execute(&file.display().to_string(), &lines, options);
}

/// Transpiles a toy-language file and writes the assembly next to it.
fn cmd_compile(file: &Path, output: Option<PathBuf>) {
    init_tracing(false);
    let assembly = transpile(file);
    let out = output.unwrap_or_else(|| compiled_path(file));
    save_or_exit(&out, &assembly);
}

/// Transpiles a toy-language file and runs the result in-process. With `emit`
/// the assembly is also written to [`compiled_path`].
fn cmd_exec(file: &Path, emit: bool, options: &RunOptions) {
    init_tracing(options.trace);
    let assembly = transpile(file);
    if emit {
        save_or_exit(&compiled_path(file), &assembly);
    }
    let lines: Vec<String> = assembly.lines().map(str::to_string).collect();
    execute(&format!("{} (compiled)", file.display()), &lines, options);
}

fn save_or_exit(out: &Path, assembly: &str) {
    println!("Saving to \"{}\"", out.display());
    if let Err(e) = save_assembly(out, assembly) {
        eprintln!("Error writing {}: {}", out.display(), e);
        process::exit(1);
    }
}

/// Writes generated assembly, ending it with a newline.
fn save_assembly(out: &Path, assembly: &str) -> io::Result<()> {
    let mut file = fs::File::create(out)?;
    file.write_all(assembly.as_bytes())?;
    if !assembly.ends_with('\n') {
        file.write_all(b"\n")?;
    }
    file.flush()
}

fn transpile(file: &Path) -> String {
    let source = fs::read_to_string(file).unwrap_or_else(|e| {
        eprintln!("Error reading {}: {}", file.display(), e);
        process::exit(1);
    });
    println!("Transpiling \"{}\"...", file.display());
    armsim_lang::compile(&source).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        eprintln!(" --> {}:{}", file.display(), e.line);
        process::exit(1);
    })
}

/// Assembles and runs `lines`, reports the outcome and exits the process.
///
/// On a parse error prints a diagnostic and exits with 1. On a fault prints the
/// error and a register dump and exits with 1. Otherwise exits with `x0 & 0xFF`.
fn execute(source_name: &str, lines: &[String], options: &RunOptions) -> ! {
    let config = load_config(options);
    let mut sim = Simulator::new(config);

    if let Err(e) = sim.parse(lines) {
        eprint!("{}", diagnostic(source_name, lines, &e));
        process::exit(1);
    }

    let result = sim.run();
    flush_console(&sim);

    match result {
        ExecutionResult::Halted { reason, steps } => {
            debug!(?reason, steps, "halted");
            for line in register_report(sim.registers(), options.all_registers) {
                println!("{line}");
            }
            if options.stats {
                sim.stats().print();
            }
            let x0 = sim.registers().get(Reg::X(0)) as i64;
            io::stdout().flush().ok();
            process::exit(exit_status(x0));
        }
        ExecutionResult::Faulted { error, pc, steps } => {
            eprintln!("\n[!] FATAL: {error}");
            eprintln!("    pc={pc} after {steps} instruction(s)");
            eprintln!("{}", sim.registers());
            if options.stats {
                sim.stats().print();
            }
            process::exit(1);
        }
    }
}

/// Copies captured program output to the host streams.
fn flush_console(sim: &Simulator) {
    let console = sim.console();
    io::stdout().write_all(console.stdout()).ok();
    io::stderr().write_all(console.stderr()).ok();
}

/// Output path for `compile`: swap the extension for `.s`, or use `.compiled.s`
/// when the input already is a `.s` file.
fn compiled_path(input: &Path) -> PathBuf {
    let out = input.with_extension("s");
    if out == input {
        input.with_extension("compiled.s")
    } else {
        out
    }
}

/// Process exit status for a final `x0`: its low 8 bits.
const fn exit_status(x0: i64) -> i32 {
    (x0 & 0xFF) as i32
}

/// `X<n>: <value>` lines for the reported registers.
fn register_report(regs: &RegisterFile, all: bool) -> Vec<String> {
    let range = if all { 0..=30 } else { REPORTED_REGISTERS };
    range
        .map(|i| (i, regs.get(Reg::X(i)) as i64))
        .filter(|&(_, value)| all || value != 0)
        .map(|(i, value)| format!("X{i}: {value}"))
        .collect()
}

/// Renders a parse error against its source line.
fn diagnostic(source_name: &str, lines: &[String], error: &AsmError) -> String {
    let line = error.line();
    let text = lines.get(line.wrapping_sub(1)).map_or("", String::as_str);
    format!("error: {error}\n --> {source_name}:{line}\n     |\n{line:>4} | {text}\n")
}
