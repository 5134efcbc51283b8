use clap::Parser;
use promptsmith::cli::{
    handle_build, handle_check, handle_download, handle_format, handle_open, handle_parse,
    handle_share, handle_suggestions, Cli, Commands,
};
use promptsmith::logging::init_logging;
use promptsmith::SmithConfig;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match SmithConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Build {
            role,
            goal,
            constraints,
            format,
            examples,
            json,
        } => handle_build(role, goal, constraints, format, examples, json),
        Commands::Parse { file, json } => handle_parse(file, json),
        Commands::Format { file } => handle_format(file),
        Commands::Share { file, base_url } => handle_share(&config, file, base_url),
        Commands::Open { url, json } => handle_open(&config, url, json),
        Commands::Check { url } => {
            if !handle_check(&url) {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Download { file, dir } => handle_download(&config, file, &dir),
        Commands::Suggestions { json } => handle_suggestions(json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
