use clap::Parser;
use order_form::cli::commands::{cmd_clear, cmd_fill, cmd_restore, cmd_run, cmd_submit};
use order_form::cli::config::{Cli, Commands, load_config, resolve_settings};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref());

    // Resolve settings: CLI > config > defaults
    let settings = resolve_settings(&cli, &config)?;

    match cli.command {
        Commands::Fill { form, set, check } => {
            cmd_fill(&form, &set, &check, &settings)?;
        }
        Commands::Submit {
            form,
            set,
            check,
            format,
        } => {
            let valid = cmd_submit(&form, &set, &check, &format, &settings)?;
            if !valid {
                std::process::exit(1);
            }
        }
        Commands::Restore { form } => {
            cmd_restore(&form, &settings)?;
        }
        Commands::Clear { form } => {
            cmd_clear(&form, &settings)?;
        }
        Commands::Run {
            scenario,
            form,
            format,
            output,
        } => {
            let all_passed = cmd_run(&form, &scenario, &format, output.as_deref(), &settings)?;
            if !all_passed {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
