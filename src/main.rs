use anyhow::{Context, Result};
use chip8vm::Interpreter;
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io::{self, Write};
use std::path::PathBuf;
use std::thread::sleep;
use std::time::{Duration, Instant};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Run a CHIP-8 program in the terminal.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Program image, loaded at 0x200.
    rom: PathBuf,

    /// Instruction cycles per second. Timers tick once per cycle, so 60
    /// gives them their nominal rate.
    #[arg(long, default_value_t = 60)]
    ips: u32,

    /// Terminal redraws per second.
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Stop after this many cycles.
    #[arg(long, value_name = "N")]
    max_cycles: Option<u64>,

    /// Fixed seed for the random number instruction.
    #[arg(long)]
    seed: Option<u64>,

    /// Don't draw while running; print the final screen on exit.
    #[arg(long, default_value_t = false)]
    headless: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    anyhow::ensure!(args.ips > 0 && args.fps > 0, "--ips and --fps must be positive");

    let rom = std::fs::read(&args.rom)
        .with_context(|| format!("reading {}", args.rom.display()))?;
    info!(path = %args.rom.display(), bytes = rom.len(), "read program");

    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mut vm = Interpreter::with_rng(rng);
    vm.load_program(&rom)
        .with_context(|| format!("loading {}", args.rom.display()))?;

    let executed = run(&mut vm, &args)?;
    info!(cycles = executed, "stopped");

    if args.headless {
        print!("{}", vm.framebuffer().render());
    }
    Ok(())
}

/// Paces cycles at `--ips` and redraws at `--fps` until the program halts
/// or the cycle budget runs out.
fn run(vm: &mut Interpreter, args: &Args) -> Result<u64> {
    let cycles_per_frame = (args.ips / args.fps).max(1);
    let frame_duration = Duration::from_secs_f64(cycles_per_frame as f64 / args.ips as f64);
    let mut executed: u64 = 0;

    'main_loop: loop {
        let frame_start = Instant::now();

        for _ in 0..cycles_per_frame {
            if vm.is_halted() || args.max_cycles.is_some_and(|max| executed >= max) {
                break 'main_loop;
            }
            vm.cycle()
                .with_context(|| format!("execution error after {executed} cycles"))?;
            executed += 1;
        }

        if !args.headless {
            show(vm)?;
        }

        if let Some(sleep_time) = frame_duration.checked_sub(frame_start.elapsed()) {
            sleep(sleep_time);
        }
    }

    if !args.headless {
        show(vm)?;
    }
    Ok(executed)
}

fn show(vm: &Interpreter) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    write!(stdout, "\x1B[2J\x1B[H{}", vm.framebuffer().render())?;
    if vm.is_sound_active() {
        write!(stdout, "\x07")?;
    }
    stdout.flush()
}
