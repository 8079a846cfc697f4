use clap::Parser;
use foiadesk::cli::{Cli, Commands};
use miette::Result;

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    // Without this, piping to `head`, `grep -q`, etc. causes a panic on broken pipe.
    // This is standard practice for CLI tools that output to stdout.
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

    if global.no_color {
        console::set_colors_enabled(false);
    }

    match cli.command {
        Commands::Init(args) => foiadesk::cli::commands::init::run(args, &global),
        Commands::Submit(args) => foiadesk::cli::commands::submit::run(args, &global),
        Commands::Assign(args) => foiadesk::cli::commands::assign::run(args, &global),
        Commands::Note(args) => foiadesk::cli::commands::note::run(args, &global),
        Commands::Fulfill(args) => foiadesk::cli::commands::fulfill::run(args, &global),
        Commands::Deny(args) => foiadesk::cli::commands::deny::run(args, &global),
        Commands::Appeal(args) => foiadesk::cli::commands::appeal::run(args, &global),
        Commands::Decide(args) => foiadesk::cli::commands::decide::run(args, &global),
        Commands::Close(args) => foiadesk::cli::commands::close::run(args, &global),
        Commands::List(args) => foiadesk::cli::commands::list::run(args, &global),
        Commands::Overdue(args) => foiadesk::cli::commands::overdue::run(args, &global),
        Commands::Stats(args) => foiadesk::cli::commands::stats::run(args, &global),
        Commands::Report(args) => foiadesk::cli::commands::report::run(args, &global),
        Commands::Show(args) => foiadesk::cli::commands::show::run(args, &global),
        Commands::Letter(args) => foiadesk::cli::commands::letter::run(args, &global),
        Commands::Import(args) => foiadesk::cli::commands::import::run(args, &global),
        Commands::Completions(args) => foiadesk::cli::commands::completions::run(args),
    }
}
