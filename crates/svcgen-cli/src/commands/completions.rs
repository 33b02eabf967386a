//! Shell completion generation.

use anyhow::Result;
use clap::Command;
use clap_complete::{Shell, generate};
use std::io::{self, Write};
use svcgen_core::cli::ExitCode;
use tracing::info;

/// Writes the completion script for `shell` to `out`.
///
/// # Examples
///
/// ```
/// use clap::Command;
/// use clap_complete::Shell;
/// use svcgen_cli::commands::completions::write_completions;
///
/// let mut script = Vec::new();
/// write_completions(Shell::Bash, &mut Command::new("protoc-gen-svcgen"), &mut script);
/// assert!(!script.is_empty());
/// ```
pub fn write_completions(shell: Shell, cmd: &mut Command, out: &mut dyn Write) {
    let name = cmd.get_name().to_string();
    generate(shell, cmd, name, out);
}

/// Prints the completion script for `shell` to stdout.
pub async fn run(shell: Shell, cmd: &mut Command) -> Result<ExitCode> {
    info!("Generating {shell} completions");
    write_completions(shell, cmd, &mut io::stdout());
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn script(shell: Shell) -> String {
        let mut out = Vec::new();
        write_completions(
            shell,
            &mut Command::new("protoc-gen-svcgen").subcommand(Command::new("scan")),
            &mut out,
        );
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_bash_mentions_subcommand() {
        assert!(script(Shell::Bash).contains("scan"));
    }

    #[test]
    fn test_other_shells_produce_output() {
        for shell in [Shell::Zsh, Shell::Fish, Shell::PowerShell, Shell::Elvish] {
            assert!(!script(shell).is_empty(), "{shell}");
        }
    }

    #[tokio::test]
    async fn test_run_succeeds() {
        let mut cmd = Command::new("protoc-gen-svcgen");
        assert_eq!(run(Shell::Fish, &mut cmd).await.unwrap(), ExitCode::SUCCESS);
    }
}
