//! Command-line client for the ledger service's pay and save endpoints.

use clap::{Parser, Subcommand};

const X_REQUEST_ID: &str = "x-request-id";

#[derive(Parser)]
#[command(name = "ledger-cli")]
#[command(about = "Client for the ledger service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:9097")]
    url: String,

    /// Correlation id to send; the server generates one if omitted.
    #[arg(short, long)]
    request_id: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pay an amount out of the balance
    Pay { amount: String },
    /// Move an amount from the balance into the bank
    Save { amount: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let (path, amount) = match cli.command {
        Commands::Pay { amount } => ("pay", amount),
        Commands::Save { amount } => ("save", amount),
    };

    let mut request = client.post(format!("{}/{}", cli.url, path)).body(amount);
    if let Some(id) = &cli.request_id {
        request = request.header(X_REQUEST_ID, id);
    }

    let res = request.send().await?;
    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let request_id = res
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();
    let text = res.text().await?;

    if !status.is_success() {
        eprintln!("Error: service returned status {} (request {})", status, request_id);
        eprintln!("Response: {}", text);
        return Ok(());
    }

    println!("[{}] {}", request_id, text);
    Ok(())
}
