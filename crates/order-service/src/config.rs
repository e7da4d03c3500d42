use crate::db::DEFAULT_DATABASE_URL;
use crate::lifecycle::{LogFormat, DEFAULT_CHANNEL_CAPACITY};
use anyhow::{ensure, Result};
use clap::Parser;
use std::net::SocketAddr;

const DEFAULT_BIND: &str = "127.0.0.1:8080";

#[derive(Parser, Debug, Default, Clone)]
#[command(name = "order-service", about = "REST service for customer orders", version)]
pub struct CliArgs {
    #[arg(
        long,
        env = "ORDERS_BIND",
        value_name = "ADDR",
        help = "Socket address the HTTP listener binds to"
    )]
    pub bind: Option<SocketAddr>,

    #[arg(
        long,
        env = "ORDERS_DATABASE_URL",
        value_name = "URL",
        help = "SQLite database holding the orders (e.g. sqlite://orders.db)"
    )]
    pub database_url: Option<String>,

    #[arg(
        long,
        env = "ORDERS_CHANNEL_CAPACITY",
        value_name = "N",
        help = "Mailbox size of the order store",
        value_parser = clap::value_parser!(usize)
    )]
    pub channel_capacity: Option<usize>,

    #[arg(
        long,
        env = "ORDERS_LOG_FORMAT",
        value_enum,
        value_name = "FORMAT",
        help = "Log output format (compact or json)"
    )]
    pub log_format: Option<LogFormat>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub bind: SocketAddr,
    pub database_url: String,
    pub channel_capacity: usize,
    pub log_format: LogFormat,
}

impl ServiceConfig {
    pub fn from_args(args: CliArgs) -> Result<Self> {
        let bind = match args.bind {
            Some(bind) => bind,
            None => DEFAULT_BIND.parse()?,
        };

        Ok(Self {
            bind,
            database_url: args
                .database_url
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            channel_capacity: args.channel_capacity.unwrap_or(DEFAULT_CHANNEL_CAPACITY),
            log_format: args.log_format.unwrap_or_default(),
        })
    }

    /// Fails fast on settings the service cannot run with.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.channel_capacity > 0,
            "channel capacity must be greater than 0"
        );
        ensure!(
            self.database_url.starts_with("sqlite:"),
            "database url must start with 'sqlite:', got '{}'",
            self.database_url
        );
        Ok(())
    }
}
