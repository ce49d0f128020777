use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "lazyconf")]
pub struct Params {
    #[arg(long, env = "LAZYCONF_LOAD_DELAY_MS", default_value_t = 200)]
    pub load_delay_ms: u64,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print a single setting
    Get { key: String },
    /// Print every setting
    List,
    /// Reload from the source, then print every setting
    Reload,
}
