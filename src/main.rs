use clap::Parser;
use nova_assistant_lib::RunOptions;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "nova", version, about = "Nova — regelbaserad chattassistent")]
struct Args {
    /// Sökväg till config.toml (standard: användarens konfigurationsmapp)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Assistentens namn i svaren
    #[arg(long)]
    name: Option<String>,

    /// Skriv varje svar som en rad JSON
    #[arg(long)]
    json: bool,

    /// Visa svar utan att öppna webbplatser eller program
    #[arg(long)]
    dry_run: bool,

    /// Stäng av de gamla hårdkodade nyckelorden
    #[arg(long)]
    no_legacy: bool,

    /// Svara på ett enda meddelande och avsluta
    message: Vec<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let message = (!args.message.is_empty()).then(|| args.message.join(" "));

    let options = RunOptions {
        config: args.config,
        name: args.name,
        json: args.json,
        dry_run: args.dry_run,
        no_legacy: args.no_legacy,
        message,
    };

    match nova_assistant_lib::run(options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("nova: {e}");
            ExitCode::FAILURE
        }
    }
}
