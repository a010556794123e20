use clap::Parser;
use cpt::cli::{Cli, Commands};
use miette::Result;

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    // Without this, piping to `head`, `grep -q`, etc. causes a panic on broken pipe.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    // Install miette's fancy error handler for beautiful diagnostics
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;

    match cli.command {
        Commands::Project(cmd) => cpt::cli::commands::project::run(cmd, &global),
        Commands::Domain(cmd) => cpt::cli::commands::domain::run(cmd, &global),
        Commands::Contractor(cmd) => cpt::cli::commands::contractor::run(cmd, &global),
        Commands::Manufacturer(cmd) => cpt::cli::commands::manufacturer::run(cmd, &global),
        Commands::Article(cmd) => cpt::cli::commands::article::run(cmd, &global),
        Commands::Completions(args) => cpt::cli::commands::completions::run(args),
    }
}
