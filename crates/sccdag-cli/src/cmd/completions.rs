use std::io::Write;

use anyhow::Result;
use clap::Args;
use clap_complete::{Shell, generate};

/// Arguments for `sccdag completions`.
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Target shell for completion script generation.
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Generate a shell completion script into `out`.
pub fn write_completions(shell: Shell, command: &mut clap::Command, out: &mut dyn Write) {
    generate(shell, command, "sccdag", out);
}

/// Generate a shell completion script to stdout.
///
/// # Errors
///
/// Returns an error if flushing stdout fails.
pub fn run_completions(shell: Shell, command: &mut clap::Command) -> Result<()> {
    let mut out = std::io::stdout();
    write_completions(shell, command, &mut out);
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, Parser};

    #[derive(Parser)]
    #[command(name = "sccdag")]
    #[allow(dead_code)]
    struct Probe {
        #[arg(long)]
        timing: bool,
    }

    fn script(shell: Shell) -> String {
        let mut command = Probe::command();
        let mut buf = Vec::new();
        write_completions(shell, &mut command, &mut buf);
        String::from_utf8(buf).expect("utf8")
    }

    #[test]
    fn bash_script_names_the_binary() {
        let out = script(Shell::Bash);
        assert!(out.contains("sccdag"));
        assert!(out.contains("--timing"));
    }

    #[test]
    fn every_shell_produces_output() {
        for shell in [Shell::Bash, Shell::Zsh, Shell::Fish, Shell::PowerShell, Shell::Elvish] {
            assert!(!script(shell).is_empty(), "{shell:?}");
        }
    }
}
