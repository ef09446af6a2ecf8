// CLI argument definitions using clap

use clap::Parser;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "cloudcfg-demo")]
#[command(author = "hatlonely <hatlonely@foxmail.com>")]
#[command(version = "0.1.0")]
#[command(
    about = "Serve static files configured by a cloud config server, restarting on changes",
    long_about = None
)]
pub struct Cli {
    /// Path to client config file (json/json5/yaml/toml); overrides --server/--app/--profile
    #[arg(short, long)]
    pub config: Option<String>,

    /// Config server address
    #[arg(long, default_value = "http://localhost:8888")]
    pub server: String,

    /// Application name
    #[arg(long, default_value = "rss-entry-service")]
    pub app: String,

    /// Profile name (empty means prod)
    #[arg(long, default_value = "dev")]
    pub profile: String,

    /// How often to check for updated properties, e.g. 15s
    #[arg(long, default_value = "15s", value_parser = parse_interval)]
    pub check_interval: Duration,

    /// Skip TLS certificate verification (self-signed test servers only)
    #[arg(long)]
    pub insecure: bool,
}

fn parse_interval(s: &str) -> Result<Duration, String> {
    cloudcfg::cfg::parse_duration(s).map_err(|e| e.to_string())
}
