//! `cpt completions` command - shell completion scripts
//!
//! Emits a completion script for the requested shell on stdout; the user
//! wires it into their shell startup, e.g.:
//!
//! ```bash
//! source <(cpt completions bash)               # ~/.bashrc
//! cpt completions fish > ~/.config/fish/completions/cpt.fish
//! ```
//!
//! zsh and PowerShell work the same way through their own init files.

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use miette::Result;
use std::io;

use crate::cli::Cli;

#[derive(clap::Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

pub fn run(args: CompletionsArgs) -> Result<()> {
    let mut cmd = Cli::command();
    generate(args.shell, &mut cmd, "cpt", &mut io::stdout());
    Ok(())
}
