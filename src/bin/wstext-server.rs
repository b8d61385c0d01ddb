use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use monoio::net::TcpListener;
use monoio_wstext::{LogText, ServerConfig, serve};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// arguments for the upgrade server
#[derive(Parser, Debug)]
struct Args {
    /// listening host
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// listening port
    #[arg(short, long, default_value = "8080")]
    port: u16,

    /// value of the `Origin` line in handshake responses
    #[arg(long, default_value = "localhost:8080")]
    origin: String,

    /// capacity of the per-frame text buffer, terminator included
    #[arg(long, default_value = "499")]
    text_capacity: usize,

    /// decode unmasked client frames instead of dropping the connection
    #[arg(long)]
    accept_unmasked_frames: bool,

    /// driver to use
    #[arg(value_enum, long, default_value = "legacy")]
    driver: Driver,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum Driver {
    Legacy,
    IoUring,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = ServerConfig::default()
        .origin(args.origin)
        .text_capacity(args.text_capacity)
        .accept_unmasked_frames(args.accept_unmasked_frames);

    let (host, port) = (args.host, args.port);
    let res = match args.driver {
        Driver::Legacy => monoio::start::<monoio::LegacyDriver, _>(run(host, port, config)),
        Driver::IoUring => monoio::start::<monoio::IoUringDriver, _>(run(host, port, config)),
    };

    match res {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "failed to start server");
            ExitCode::FAILURE
        }
    }
}

async fn run(host: String, port: u16, config: ServerConfig) -> std::io::Result<()> {
    let listener = TcpListener::bind((host.as_str(), port))?;
    info!(addr = %listener.local_addr()?, "listening");
    serve(listener, config, LogText).await;
    Ok(())
}
