use clap::{Parser, Subcommand};

/// Multi-venue automated trading coordinator.
#[derive(Parser)]
#[command(name = "coordinator", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the position monitor and admin HTTP surface.
    Serve {
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        #[arg(long, default_value = "8080")]
        port: u16,
    },

    /// Print the JSON Schema for the admin wire types and exit.
    Schema,
}
