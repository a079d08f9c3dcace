use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "x")]
#[command(about = "Development automation for vbrx")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all CI checks (fmt, clippy, build, test)
    Ci {
        #[arg(long)]
        verbose: bool,
    },
    /// Quick checks before commit (fmt, clippy)
    Check {
        #[arg(long)]
        verbose: bool,
    },
    /// Format code
    Fmt {
        #[arg(long)]
        check: bool,
    },
    /// Run clippy
    Clippy {
        #[arg(long)]
        fix: bool,
    },
    /// Build the project
    Build {
        #[arg(long)]
        release: bool,
    },
    /// Run tests
    Test {
        #[arg(long)]
        doc: bool,
        #[arg(long)]
        ignored: bool,
        /// Run only patch engine tests
        #[arg(long)]
        patches: bool,
        /// Run only supervisor tests
        #[arg(long)]
        supervisor: bool,
        /// Run only frontend tests
        #[arg(long)]
        frontend: bool,
    },
    /// Run benchmarks
    Bench,
    /// Run a ROM headless for a number of frames
    RomBoot {
        /// Path to ROM file (defaults to test.vb)
        #[arg(default_value = "test.vb")]
        rom_path: String,
        /// Number of frames to run (defaults to 600)
        #[arg(short = 'n', long, default_value = "600")]
        frames: u64,
        /// Build in release mode
        #[arg(long)]
        release: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Ci { verbose } => run_ci(verbose),
        Commands::Check { verbose } => run_check(verbose),
        Commands::Fmt { check } => run_fmt(check),
        Commands::Clippy { fix } => run_clippy(fix),
        Commands::Build { release } => run_build(release),
        Commands::Test {
            doc,
            ignored,
            patches,
            supervisor,
            frontend,
        } => run_test(doc, ignored, patches, supervisor, frontend),
        Commands::Bench => run_bench(),
        Commands::RomBoot {
            rom_path,
            frames,
            release,
        } => run_rom_boot(&rom_path, frames, release),
    }
}

fn run_ci(verbose: bool) -> Result<()> {
    println!("{}", "=== Running CI Pipeline ===".bold().blue());

    let start = Instant::now();

    run_task("Format Check", || run_fmt(true), verbose)?;
    run_task("Clippy", || run_clippy(false), verbose)?;
    run_task("Build", || run_build(false), verbose)?;
    run_task(
        "Test",
        || run_test(false, false, false, false, false),
        verbose,
    )?;

    report_elapsed("✓ CI passed in", start);
    Ok(())
}

fn run_check(verbose: bool) -> Result<()> {
    println!("{}", "=== Running Quick Checks ===".bold().blue());

    let start = Instant::now();

    run_task("Format Check", || run_fmt(true), verbose)?;
    run_task("Clippy", || run_clippy(false), verbose)?;

    report_elapsed("✓ Checks passed in", start);
    Ok(())
}

fn run_fmt(check: bool) -> Result<()> {
    if check {
        cargo(&["fmt", "--all", "--", "--check"])
    } else {
        cargo(&["fmt", "--all"])
    }
}

fn run_clippy(fix: bool) -> Result<()> {
    if fix {
        cargo(&["clippy", "--all-targets", "--fix"])
    } else {
        cargo(&["clippy", "--all-targets", "--", "-D", "warnings"])
    }
}

fn run_build(release: bool) -> Result<()> {
    if release {
        cargo(&["build", "--release"])
    } else {
        cargo(&["build"])
    }
}

fn run_test(
    doc: bool,
    ignored: bool,
    patches: bool,
    supervisor: bool,
    frontend: bool,
) -> Result<()> {
    if doc {
        return cargo(&["test", "--doc"]);
    }
    let ignored_args: &[&str] = if ignored { &["--", "--ignored"] } else { &[] };

    let modules = [
        (patches, "core::patches", "Patch engine"),
        (supervisor, "supervisor", "Supervisor"),
        (frontend, "frontend", "Frontend"),
    ];
    let selected: Vec<_> = modules.iter().filter(|(enabled, _, _)| *enabled).collect();

    if selected.is_empty() {
        return cargo(&[&["test", "--workspace"][..], ignored_args].concat());
    }

    let mut failed = Vec::new();

    for (_, module_path, module_name) in &selected {
        println!("{} Running {} tests...", "→".blue(), module_name.bold());

        match cargo(&[&["test", "--lib", *module_path][..], ignored_args].concat()) {
            Ok(_) => println!("{} {} tests passed\n", "✓".green(), module_name),
            Err(e) => {
                println!("{} {} tests failed\n", "✗".red(), module_name);
                if selected.len() == 1 {
                    return Err(e);
                }
                failed.push(*module_name);
            }
        }
    }

    if failed.is_empty() {
        Ok(())
    } else {
        anyhow::bail!("Tests failed: {}", failed.join(", "))
    }
}

fn run_bench() -> Result<()> {
    cargo(&["bench", "--bench", "patch_bench"])
}

fn run_rom_boot(rom_path: &str, frames: u64, release: bool) -> Result<()> {
    println!("{}", "=== ROM Boot ===".bold().blue());

    let rom = Path::new(rom_path);
    if !rom.exists() {
        println!(
            "{} ROM file not found: {}",
            "✗".red().bold(),
            rom_path.yellow()
        );
        println!(
            "\n{} Pass a .vb file or place test.vb in the project root.",
            "ℹ".blue()
        );
        anyhow::bail!("ROM file not found");
    }

    // Same size rule the loader applies
    let size = std::fs::metadata(rom)?.len();
    if !size.is_power_of_two() || !(0x400..=0x0100_0000).contains(&size) {
        println!("{} Invalid ROM size: {} bytes", "✗".red().bold(), size);
        anyhow::bail!("Invalid ROM file size");
    }

    println!("{} ROM file: {}", "✓".green(), rom_path.cyan());
    println!("{} Frames: {}", "→".blue(), frames.to_string().bold());
    println!(
        "{} Build mode: {}",
        "→".blue(),
        if release {
            "release".green().bold()
        } else {
            "debug".yellow().bold()
        }
    );
    println!();

    let start = Instant::now();

    let frames = frames.to_string();
    let profile: &[&str] = if release { &["--release"] } else { &[] };
    let run = [
        &["run", "--bin", "vbrx"][..],
        profile,
        &["--", rom_path, "--fast-forward", "-n", frames.as_str()][..],
    ]
    .concat();

    if let Err(e) = cargo(&run) {
        println!("\n{} ROM boot failed", "✗".red().bold());
        return Err(e);
    }

    report_elapsed("✓ ROM boot completed in", start);
    Ok(())
}

fn run_task<F>(name: &str, task: F, verbose: bool) -> Result<()>
where
    F: FnOnce() -> Result<()>,
{
    print!("{} {} ... ", "→".blue(), name);

    let start = Instant::now();

    match task() {
        Ok(_) => {
            let elapsed = start.elapsed();
            println!(
                "{} {}",
                "✓".green().bold(),
                if verbose {
                    format!("({:.2}s)", elapsed.as_secs_f64())
                } else {
                    String::new()
                }
            );
            Ok(())
        }
        Err(e) => {
            println!("{}", "✗".red().bold());
            Err(e)
        }
    }
}

fn report_elapsed(label: &str, start: Instant) {
    println!(
        "\n{} {}",
        label.green().bold(),
        format!("{:.2}s", start.elapsed().as_secs_f64()).bold()
    );
}

fn cargo(args: &[&str]) -> Result<()> {
    let status = Command::new("cargo")
        .args(args)
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()?;

    if !status.success() {
        anyhow::bail!("cargo {} failed: {}", args.join(" "), status);
    }

    Ok(())
}
