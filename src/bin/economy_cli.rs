//! economy_cli - Demo command client for the economy API
//!
//! Drives the four ledger operations against a running gateway, one
//! subcommand per operation:
//!
//! ```text
//! economy_cli give     <account> [amount]      # deposit (default 10)
//! economy_cli balance  <account>               # balance query
//! economy_cli enough   <account> <amount>      # sufficiency check
//! economy_cli transfer <from> <to> <amount>    # atomic transfer
//! ```
//!
//! The gateway URL comes from `--url` or the `ECONOMY_URL` environment
//! variable (default `http://127.0.0.1:8080`).

use anyhow::{Context, Result, bail};
use serde_json::Value;
use uuid::Uuid;

const DEFAULT_URL: &str = "http://127.0.0.1:8080";

fn usage() -> ! {
    eprintln!("Usage: economy_cli [--url URL] <subcommand>");
    eprintln!();
    eprintln!("Subcommands:");
    eprintln!("  give     <account> [amount]      deposit into an account (default 10)");
    eprintln!("  balance  <account>               query an account's balance");
    eprintln!("  enough   <account> <amount>      check whether the balance covers amount");
    eprintln!("  transfer <from> <to> <amount>    move funds between accounts");
    std::process::exit(2);
}

fn parse_args() -> (String, Vec<String>) {
    let mut url = std::env::var("ECONOMY_URL").unwrap_or_else(|_| DEFAULT_URL.to_string());
    let mut rest = Vec::new();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut i = 0;
    while i < args.len() {
        if args[i] == "--url" && i + 1 < args.len() {
            url = args[i + 1].clone();
            i += 2;
        } else {
            rest.push(args[i].clone());
            i += 1;
        }
    }

    (url, rest)
}

fn parse_account(arg: &str) -> Result<Uuid> {
    Uuid::parse_str(arg).with_context(|| format!("'{}' is not a valid account UUID", arg))
}

/// Unwrap the {code, msg, data} envelope; non-zero codes become errors
fn unwrap_envelope(body: Value) -> Result<Value> {
    let code = body["code"].as_i64().unwrap_or(-1);
    if code != 0 {
        bail!(
            "API error {}: {}",
            code,
            body["msg"].as_str().unwrap_or("unknown")
        );
    }
    Ok(body["data"].clone())
}

#[tokio::main]
async fn main() -> Result<()> {
    let (url, args) = parse_args();
    if args.is_empty() {
        usage();
    }

    let client = reqwest::Client::new();

    match args[0].as_str() {
        "give" => {
            if args.len() < 2 {
                usage();
            }
            let account = parse_account(&args[1])?;
            let amount = args.get(2).cloned().unwrap_or_else(|| "10".to_string());

            let body = client
                .post(format!("{}/api/v1/economy/deposit", url))
                .json(&serde_json::json!({ "account_id": account, "amount": amount }))
                .send()
                .await
                .context("deposit request failed")?
                .json::<Value>()
                .await?;
            let data = unwrap_envelope(body)?;

            println!(
                "Deposited {} into {}. New balance: {}",
                amount,
                account,
                data["balance"].as_str().unwrap_or("?")
            );
        }

        "balance" => {
            if args.len() < 2 {
                usage();
            }
            let account = parse_account(&args[1])?;

            let body = client
                .get(format!("{}/api/v1/economy/balance/{}", url, account))
                .send()
                .await
                .context("balance request failed")?
                .json::<Value>()
                .await?;
            let data = unwrap_envelope(body)?;

            println!("Balance of {}: {}", account, data["balance"].as_str().unwrap_or("?"));
        }

        "enough" => {
            if args.len() < 3 {
                usage();
            }
            let account = parse_account(&args[1])?;
            let amount = &args[2];

            let body = client
                .get(format!("{}/api/v1/economy/sufficiency/{}", url, account))
                .query(&[("amount", amount)])
                .send()
                .await
                .context("sufficiency request failed")?
                .json::<Value>()
                .await?;
            let data = unwrap_envelope(body)?;

            if data["sufficient"].as_bool().unwrap_or(false) {
                println!("{} has enough to cover {}", account, amount);
            } else {
                println!("{} does NOT have enough to cover {}", account, amount);
            }
        }

        "transfer" => {
            if args.len() < 4 {
                usage();
            }
            let from = parse_account(&args[1])?;
            let to = parse_account(&args[2])?;
            let amount = &args[3];

            let body = client
                .post(format!("{}/api/v1/economy/transfer", url))
                .json(&serde_json::json!({ "from": from, "to": to, "amount": amount }))
                .send()
                .await
                .context("transfer request failed")?
                .json::<Value>()
                .await?;
            let data = unwrap_envelope(body)?;

            match data["outcome"].as_str() {
                Some("SUCCESS") => {
                    println!("Paid {} from {} to {}", amount, from, to);
                }
                Some("INSUFFICIENT_FUNDS") => {
                    println!("Transfer failed: does {} have enough money?", from);
                }
                _ => {
                    println!("Transfer failed");
                }
            }
        }

        _ => usage(),
    }

    Ok(())
}
