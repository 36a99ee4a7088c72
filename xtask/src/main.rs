use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use std::process::Command;

#[derive(Parser)]
#[command(name = "xtask", about = "Workspace automation for the rigid-body sandbox")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// fmt, clippy, then tests
    Check,
    Fmt,
    Clippy,
    Test,
    Doc,
    /// Launch the desktop sandbox
    Run {
        /// Start in GUI/interaction mode
        #[arg(long)]
        gui_mode: bool,
        #[arg(long)]
        release: bool,
    },
    /// Headless simulation through sandbox-cli
    Simulate {
        #[arg(short, long, default_value = "120")]
        steps: u64,
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check => {
            cargo("fmt", &["fmt", "--all", "--", "--check"])?;
            cargo(
                "clippy",
                &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
            )?;
            cargo("test", &["test", "--workspace"])?;
        }
        Commands::Fmt => cargo("fmt", &["fmt", "--all", "--", "--check"])?,
        Commands::Clippy => cargo(
            "clippy",
            &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
        )?,
        Commands::Test => cargo("test", &["test", "--workspace"])?,
        Commands::Doc => cargo("doc", &["doc", "--workspace", "--no-deps"])?,
        Commands::Run { gui_mode, release } => {
            let mut args = vec!["run", "-p", "sandbox-desktop"];
            if release {
                args.push("--release");
            }
            if gui_mode {
                args.extend(["--", "--gui-mode"]);
            }
            cargo("run", &args)?;
        }
        Commands::Simulate { steps, json } => {
            let steps = steps.to_string();
            let mut args = vec!["run", "-p", "sandbox-cli", "--", "simulate", "--steps", &steps];
            if json {
                args.push("--json");
            }
            cargo("simulate", &args)?;
        }
    }

    Ok(())
}

fn cargo(task: &str, args: &[&str]) -> Result<()> {
    println!("==> cargo {}", args.join(" "));
    let status = Command::new("cargo").args(args).status()?;
    if !status.success() {
        bail!("{task} failed");
    }
    Ok(())
}
