use clap::Parser;

#[derive(Clone, Debug, Parser)]
pub struct RelayOptions {
    /// Port to listen for peer connections on.
    #[arg(short, long, default_value_t = 9000)]
    pub port: u16,

    #[arg(short, long)]
    pub log_level: Option<String>,
}
