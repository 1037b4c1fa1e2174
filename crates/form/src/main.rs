use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{ArgAction, Parser};

use intake_form::client::{SubmitClient, DEFAULT_ENDPOINT};
use intake_form::form::FormState;
use intake_form::session::{FormSession, Screen};

/// Submit an extension proposal from a JSON file of form fields.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// JSON file with the form fields (camelCase keys)
    #[arg(short, long)]
    file: PathBuf,

    /// Submission endpoint
    #[arg(long, env = "INTAKE_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,
}

impl Cli {
    async fn run(self) -> anyhow::Result<()> {
        setup_logging(self.verbose);

        let raw = std::fs::read_to_string(&self.file)
            .with_context(|| format!("reading {}", self.file.display()))?;
        let form: FormState = serde_json::from_str(&raw)
            .with_context(|| format!("parsing {}", self.file.display()))?;

        let client = SubmitClient::new(self.endpoint);
        let mut session = FormSession::new(form);

        let mut screen = session.submit(&client).await.clone();
        loop {
            match screen {
                Screen::Editing => {
                    for (field, message) in session.errors() {
                        eprintln!("{field}: {message}");
                    }
                    bail!("the form has {} invalid field(s)", session.errors().len());
                }
                Screen::Succeeded(receipt) => {
                    println!("Proposal submitted: {}", receipt.jira_key);
                    println!("{}", receipt.jira_url);
                    return Ok(());
                }
                Screen::Failed { message } => {
                    eprintln!("{message}");
                    if !ask_retry()? {
                        session.go_back();
                        bail!("submission failed");
                    }
                    screen = session.retry(&client).await.clone();
                }
            }
        }
    }
}

/// Ask on an interactive terminal whether to resend. Never retries otherwise.
fn ask_retry() -> anyhow::Result<bool> {
    let stdin = io::stdin();
    if !stdin.is_terminal() {
        return Ok(false);
    }

    eprint!("Retry? [y/N] ");
    io::stderr().flush()?;
    let mut answer = String::new();
    stdin.lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

fn setup_logging(verbosity: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbosity {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    Cli::parse().run().await
}
