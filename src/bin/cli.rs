//! CLI binary for asytic.

use asytic::classifier::EmotionClassifier;
use asytic::crisis::{CRISIS_NOTICE, needs_urgent_help};
use asytic::profile::Profile;
use asytic::session::SessionContext;
use asytic::{AsyticConfig, charts, export, load_classifier};
use clap::{Parser, Subcommand};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Asytic: emotion-aware supportive chat companion.
#[derive(Parser)]
#[command(name = "asytic", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Option<Command>,
}

/// Available commands.
#[derive(Subcommand)]
enum Command {
    /// Start an interactive chat session.
    Chat,

    /// Classify a single message and print the score distribution.
    Classify {
        /// The message to classify.
        text: String,
    },
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing — suppress noisy dependency logs by default.
    // Users can override with RUST_LOG=debug to see everything.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("asytic=info,hf_hub=warn,ort=warn")),
        )
        .init();

    let cli = Cli::parse();

    let config = if let Some(ref path) = cli.config {
        AsyticConfig::from_file(path)?
    } else {
        let default_path = AsyticConfig::default_config_path();
        if default_path.exists() {
            AsyticConfig::from_file(&default_path)?
        } else {
            AsyticConfig::default()
        }
    };

    match cli.command.unwrap_or(Command::Chat) {
        Command::Chat => run_chat(&config),
        Command::Classify { text } => run_classify(&config, &text),
    }
}

fn run_chat(config: &AsyticConfig) -> anyhow::Result<()> {
    println!("Asytic v{} — here to listen and support.", env!("CARGO_PKG_VERSION"));
    println!("This is not a substitute for professional care.\n");

    // One-time model load; the handle is reused for every turn.
    let mut classifier = load_classifier(&config.classifier)?;
    let mut session = SessionContext::new();

    println!("Type a message, or :help for commands.\n");

    let stdin = std::io::stdin();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        let input = line.trim();

        if let Some(rest) = input.strip_prefix(':') {
            if !handle_command(rest, &mut session)? {
                break;
            }
            continue;
        }

        // Quick prompts mirror the canned inputs of the original UI.
        let message = match input {
            "anxious" => "I feel anxious and my thoughts are racing.",
            "low" => "I feel very low and unmotivated today.",
            "angry" => "I am frustrated and angry about what happened.",
            other => other,
        };

        match session.submit(classifier.as_mut(), message)? {
            Some(outcome) => {
                println!(
                    "\n[detected: {} ({:.2})]",
                    outcome.top_label, outcome.top_score
                );
                println!("Asytic: {}\n", outcome.reply);
                if needs_urgent_help(message) {
                    println!("{CRISIS_NOTICE}\n");
                }
            }
            None => continue, // blank input is ignored
        }
    }

    Ok(())
}

/// Handle a `:command`. Returns `false` when the session should end.
fn handle_command(command: &str, session: &mut SessionContext) -> anyhow::Result<bool> {
    let (name, arg) = match command.split_once(' ') {
        Some((name, arg)) => (name, arg.trim()),
        None => (command, ""),
    };

    match name {
        "help" => {
            println!("Commands:");
            println!("  :name <name>    set your display name (profile is replaced wholesale)");
            println!("  :trend          show the top-emotion confidence trend");
            println!("  :export <path>  export the conversation as CSV");
            println!("  :quit           end the session");
            println!("Quick prompts: anxious, low, angry");
        }
        "name" => {
            if arg.is_empty() {
                println!("usage: :name <name>");
            } else {
                session.set_profile(Profile {
                    name: Some(arg.to_owned()),
                    ..Profile::default()
                });
                println!("Profile saved. Hi, {}!", session.profile().display_name());
            }
        }
        "trend" => {
            let trend = charts::confidence_trend(session.log());
            if trend.is_empty() {
                println!("No messages yet.");
            }
            for point in trend {
                println!(
                    "  #{:<3} {:<16} {:.2}",
                    point.turn, point.emotion, point.score
                );
            }
        }
        "export" => {
            let path = if arg.is_empty() {
                asytic::asytic_dirs::data_dir().join("asytic_chat_history.csv")
            } else {
                PathBuf::from(arg)
            };
            export::export_to_file(session.log(), &path)?;
            println!("Saved {} turns to {}", session.log().len(), path.display());
        }
        "quit" | "q" | "exit" => return Ok(false),
        other => println!("Unknown command :{other} (try :help)"),
    }

    Ok(true)
}

fn run_classify(config: &AsyticConfig, text: &str) -> anyhow::Result<()> {
    let mut classifier = load_classifier(&config.classifier)?;
    print_distribution(classifier.as_mut(), text, config.charts.bar_top_n)
}

fn print_distribution(
    classifier: &mut dyn EmotionClassifier,
    text: &str,
    top_n: usize,
) -> anyhow::Result<()> {
    let scores = classifier.classify(text)?;
    for entry in scores.top_n(top_n) {
        println!("  {:<16} {:.2}", entry.label, entry.score);
    }
    Ok(())
}
