use clap::{Args, Parser, Subcommand};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use url::Url;

#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub subcommand: Subcommands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Subcommands {
    Run(SubcommandRun),
}

#[derive(Args, Debug, Clone)]
pub struct SubcommandRun {
    #[arg(short, long = "config", env = "INKGATE_CONFIG_FILE")]
    pub configfile: Option<PathBuf>,

    #[arg(
        short,
        long = "log-filter",
        env = "INKGATE_LOG_FILTER",
        default_value_t = String::from("info")
    )]
    pub log_filter: String,

    #[arg(long = "addr", env = "INKGATE_SERVER_ADDR", default_value_t = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 8080))]
    pub addr: SocketAddr,

    #[arg(long = "client-id", env = "DS_CLIENT_ID")]
    pub client_id: Option<String>,

    #[arg(long = "client-secret", env = "DS_CLIENT_SECRET")]
    pub client_secret: Option<String>,

    #[arg(long = "redirect-uri", env = "DS_REDIRECT_URI")]
    pub redirect_uri: Option<Url>,

    #[arg(long = "auth-url", env = "DS_AUTH_URL")]
    pub auth_url: Option<Url>,

    #[arg(long = "token-url", env = "DS_TOKEN_URL")]
    pub token_url: Option<Url>,

    #[arg(long = "api-base-url", env = "DS_API_BASE_URL")]
    pub api_base_url: Option<Url>,

    #[arg(long = "scopes", env = "DS_SCOPES", value_delimiter = ',', num_args = 1..)]
    pub scopes: Option<Vec<String>>,

    #[arg(long = "session-secret", env = "INKGATE_SESSION_SECRET", hide_env_values = true)]
    pub session_secret: Option<String>,
}
