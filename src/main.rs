//! jwx - issue, verify and inspect HS256 session tokens

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use jwx_session::auth::jwt::Token;
use jwx_session::utils::logging::init_logging;
use jwx_session::{Config, SessionManager, SystemClock, TokenIssuer};
use serde_json::{Map, Value};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Parser)]
#[command(name = "jwx", version, about = "HS256 access/refresh token tool")]
struct Cli {
    /// YAML configuration file; environment variables are used when omitted
    #[arg(short, long, global = true, env = "JWX_CONFIG")]
    config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Issue an access/refresh token pair
    Issue {
        /// Signing secret
        #[arg(long, env = "JWX_SECRET", hide_env_values = true)]
        secret: String,
        /// Subject to use instead of a generated one
        #[arg(long)]
        subject: Option<String>,
        /// Extra refresh token claim as key=value; values are parsed as JSON when possible
        #[arg(long = "claim", value_name = "KEY=VALUE")]
        claims: Vec<String>,
    },
    /// Verify a token signature and print its claims
    Verify {
        /// Signing secret
        #[arg(long, env = "JWX_SECRET", hide_env_values = true)]
        secret: String,
        /// Raw token, optionally prefixed with "Bearer " or "JWT "
        token: String,
    },
    /// Print the claims of a token without checking its signature
    Inspect {
        /// Raw token, optionally prefixed with "Bearer " or "JWT "
        token: String,
    },
}

fn parse_claims(pairs: &[String]) -> anyhow::Result<Map<String, Value>> {
    let mut claims = Map::new();
    for pair in pairs {
        let Some((key, value)) = pair.split_once('=') else {
            bail!("claim '{}' is not in KEY=VALUE form", pair);
        };
        let value = serde_json::from_str(value).unwrap_or_else(|_| Value::from(value));
        claims.insert(key.to_string(), value);
    }
    Ok(claims)
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env()?,
    };
    init_logging(config.logging())?;
    debug!("Session configuration: {:?}", config.session());

    match cli.command {
        Command::Issue {
            secret,
            subject,
            claims,
        } => {
            let claims = parse_claims(&claims)?;
            let issuer = TokenIssuer::new(config.session(), Arc::new(SystemClock));
            let pair = match subject {
                Some(subject) => issuer.issue_with_subject(&claims, &subject, secret.as_bytes())?,
                None => issuer.issue(&claims, secret.as_bytes())?,
            };

            let output = serde_json::json!({
                "sub": pair.subject,
                "access_token": pair.access.raw(),
                "refresh_token": pair.refresh.raw(),
                "token_type": "Bearer",
                "expires_in": config.session().access_token_ttl,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Command::Verify { secret, token } => {
            let manager = SessionManager::new(config.session());
            let claims = manager
                .validate(&token, secret.as_bytes())
                .context("token rejected")?;
            println!("{}", serde_json::to_string_pretty(&claims)?);
        }
        Command::Inspect { token } => {
            let parsed = Token::parse(&token).context("token is malformed")?;
            let output = serde_json::json!({
                "header": parsed.header(),
                "claims": parsed.claims(),
                "age_secs": parsed.age(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    // Optional .env in the working directory
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
