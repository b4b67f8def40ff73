use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = tasktimer::cli::Cli::parse();
    let config = tasktimer::config::from_cli(&cli)?;
    tasktimer::logging::init(&config, cli.log_filter.clone())?;

    match cli.command.clone() {
        Some(tasktimer::cli::CliCommand::Tui) | None => {
            tasktimer::tui::run(config)?;
        }
        Some(command) => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            tasktimer::commands::execute(&config, command, &mut handle)?;
        }
    }

    Ok(())
}
