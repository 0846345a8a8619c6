use clap::{Args, Parser, Subcommand};
use dotenvy::dotenv;
use log::*;

mod callback;
mod cli;
mod config;
mod envelope;
mod errors;
mod inspect;
mod payload;
mod response;

use crate::{
    callback::print_callback,
    cli::display_envs,
    config::ToolConfig,
    envelope::{print_envelope, print_status, print_validation},
    errors::ToolError,
    inspect::print_token_info,
    response::print_merchant_response,
};

#[derive(Parser, Debug)]
#[command(version, about = "Build and inspect authenticated PayGlocal gateway requests")]
pub struct Arguments {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    #[clap(name = "envelope", about = "Validate a payload and print the request that carries it")]
    Envelope(PayloadParams),
    #[clap(name = "status", about = "Print a signed status check request")]
    Status {
        /// The gateway transaction id
        #[arg(short = 'g', long = "gid")]
        gid: String,
    },
    #[clap(name = "validate", about = "Check a payload against the rules for an operation")]
    Validate(PayloadParams),
    #[clap(name = "inspect", about = "Show the header (and digest) of a compact token, without verifying it")]
    Inspect { token: String },
    #[clap(name = "callback", about = "Decode the x-gl-token posted to the merchant callback URL")]
    Callback(CallbackParams),
    #[clap(name = "response", about = "Extract the payment link and gid from a saved gateway response")]
    Response {
        /// A file holding the response JSON, or - for stdin
        #[arg(short = 'f', long = "file", default_value = "-")]
        file: String,
    },
    #[clap(name = "env", about = "List the configuration environment variables")]
    Env,
}

#[derive(Debug, Args)]
pub struct PayloadParams {
    /// jwt, si, auth, refund, capture, authreversal, status, pause, activate or si-action
    #[arg(short = 'o', long = "op", default_value = "jwt")]
    op: String,
    /// A file holding the payload JSON, or - for stdin
    #[arg(short = 'p', long = "payload", default_value = "-")]
    payload: String,
}

#[derive(Debug, Args)]
pub struct CallbackParams {
    /// The value of x-gl-token
    token: String,
    #[arg(short = 's', long = "success-url", default_value = "https://localhost/payment-success")]
    success_url: String,
    #[arg(short = 'f', long = "failure-url", default_value = "https://localhost/payment-failed")]
    failure_url: String,
}

fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();
    let cli = Arguments::parse();
    let result: Result<(), ToolError> = match cli.command {
        Command::Envelope(params) => print_envelope(&ToolConfig::from_env_or_default(), &params.op, &params.payload),
        Command::Status { gid } => print_status(&ToolConfig::from_env_or_default(), &gid),
        Command::Validate(params) => print_validation(&params.op, &params.payload),
        Command::Inspect { token } => print_token_info(&token),
        Command::Callback(params) => print_callback(&params.token, &params.success_url, &params.failure_url),
        Command::Response { file } => print_merchant_response(&file),
        Command::Env => {
            display_envs();
            Ok(())
        },
    };
    if let Err(e) = &result {
        debug!("🚀️ Command failed: {e:?}");
    }
    Ok(result?)
}
