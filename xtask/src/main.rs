use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process::Command;

#[derive(Parser)]
#[command(name = "xtask", about = "Workspace automation for gridwalk")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Clone, Copy)]
enum Commands {
    /// Run fmt, clippy, tests and doc in order
    Check,
    /// Run cargo fmt --check on all crates
    Fmt,
    /// Run clippy on all crates, denying warnings
    Clippy,
    /// Run all tests
    Test,
    /// Build rustdoc for the workspace
    Doc,
    /// Build the entire workspace
    Build,
}

/// A single cargo invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Fmt,
    Clippy,
    Test,
    Doc,
    Build,
}

impl Step {
    fn args(self) -> &'static [&'static str] {
        match self {
            Self::Fmt => &["fmt", "--all", "--", "--check"],
            Self::Clippy => &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
            Self::Test => &["test", "--workspace"],
            Self::Doc => &["doc", "--workspace", "--no-deps"],
            Self::Build => &["build", "--workspace"],
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Fmt => "fmt",
            Self::Clippy => "clippy",
            Self::Test => "test",
            Self::Doc => "doc",
            Self::Build => "build",
        }
    }
}

impl Commands {
    fn steps(self) -> &'static [Step] {
        match self {
            Self::Check => &[Step::Fmt, Step::Clippy, Step::Test, Step::Doc],
            Self::Fmt => &[Step::Fmt],
            Self::Clippy => &[Step::Clippy],
            Self::Test => &[Step::Test],
            Self::Doc => &[Step::Doc],
            Self::Build => &[Step::Build],
        }
    }
}

fn cargo(step: Step) -> Result<()> {
    let args = step.args();
    println!("==> Running cargo {}", args.join(" "));
    let status = Command::new("cargo").args(args).status()?;
    if !status.success() {
        anyhow::bail!("cargo {} failed", step.name());
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    for &step in cli.command.steps() {
        cargo(step)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_runs_every_gate_in_order() {
        assert_eq!(
            Commands::Check.steps(),
            [Step::Fmt, Step::Clippy, Step::Test, Step::Doc]
        );
    }

    #[test]
    fn every_command_maps_to_cargo_subcommands() {
        let all = [
            Commands::Check,
            Commands::Fmt,
            Commands::Clippy,
            Commands::Test,
            Commands::Doc,
            Commands::Build,
        ];
        for command in all {
            assert!(!command.steps().is_empty());
            for step in command.steps() {
                assert_eq!(step.args().first(), Some(&step.name()));
            }
        }
    }
}
