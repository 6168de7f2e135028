//! # Kvittering CLI
//!
//! Command-line interface for salon receipt printing.
//!
//! ## Usage
//!
//! ```bash
//! # Print a receipt described as JSON ("-" reads stdin)
//! kvittering print sale.json --device /dev/ttyUSB0
//!
//! # Print and open the cash drawer
//! kvittering print sale.json --drawer
//!
//! # Encode without printing
//! kvittering encode sale.json --output sale.bin
//! kvittering encode sale.json --text
//!
//! # Print a demo receipt
//! kvittering demo
//!
//! # Check serial support and list candidate devices
//! kvittering status
//! kvittering ports
//!
//! # Run the HTTP API
//! kvittering serve --listen 0.0.0.0:8080
//! ```
//!
//! Log verbosity follows `RUST_LOG` (default `kvittering=info`).

use clap::{Args, Parser, Subcommand};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use kvittering::{
    KvitteringError, PrintTransport, PrinterConfig,
    config::Settings,
    error::Result,
    protocol::decode,
    receipt::{self, Receipt, format_receipt_for},
    server::{self, ServerConfig},
    transport::discover,
};

/// Kvittering - Receipt printer utility
#[derive(Parser, Debug)]
#[command(name = "kvittering")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON settings file
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Where to print
#[derive(Args, Debug)]
struct PrinterArgs {
    /// Printer device path (discovered when omitted)
    #[arg(long)]
    device: Option<PathBuf>,

    /// Bluetooth address of an RFCOMM-bound printer
    #[arg(long, conflicts_with = "device")]
    mac: Option<String>,

    /// Paper profile: 58mm or 80mm
    #[arg(long)]
    paper: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print a receipt from a JSON file
    Print {
        /// Receipt JSON file, or "-" for stdin
        file: PathBuf,

        #[command(flatten)]
        printer: PrinterArgs,

        /// Open the cash drawer after printing
        #[arg(long)]
        drawer: bool,
    },

    /// Encode a receipt without printing
    Encode {
        /// Receipt JSON file, or "-" for stdin
        file: PathBuf,

        /// Write printer bytes to this file instead of stdout
        #[arg(long, short, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Print the receipt text without printer commands
        #[arg(long)]
        text: bool,

        /// Paper profile: 58mm or 80mm
        #[arg(long)]
        paper: Option<String>,
    },

    /// Print a demo receipt
    Demo {
        #[command(flatten)]
        printer: PrinterArgs,

        /// Write printer bytes to this file instead of printing
        #[arg(long, short, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Report whether serial printing is available
    Status {
        /// Printer device path
        #[arg(long)]
        device: Option<PathBuf>,
    },

    /// List candidate printer devices
    Ports,

    /// Run the HTTP API
    Serve {
        /// Address to listen on
        #[arg(long)]
        listen: Option<String>,

        #[command(flatten)]
        printer: PrinterArgs,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kvittering=info,tower_http=info".into()),
        )
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Print {
            file,
            printer,
            drawer,
        } => {
            let paper = paper_for(printer.paper.as_deref(), &settings)?;
            let receipt = settings.apply_business(read_receipt(&file)?);
            let mut data = format_receipt_for(&receipt, &paper);
            if drawer {
                data.extend(receipt::drawer_kick());
            }

            let transport = transport_for(&printer, &settings)?;
            transport.print(&data).await?;
            println!("Printed order {}", receipt.order_number);
        }

        Commands::Encode {
            file,
            output,
            text,
            paper,
        } => {
            let paper = paper_for(paper.as_deref(), &settings)?;
            let receipt = settings.apply_business(read_receipt(&file)?);
            let data = format_receipt_for(&receipt, &paper);
            write_output(&data, output.as_deref(), text)?;
        }

        Commands::Demo { printer, output } => {
            let paper = paper_for(printer.paper.as_deref(), &settings)?;
            let receipt = settings.apply_business(receipt::demo_receipt());
            let data = format_receipt_for(&receipt, &paper);

            if let Some(path) = output {
                write_output(&data, Some(&path), false)?;
            } else {
                println!("Printing demo receipt...");
                transport_for(&printer, &settings)?.print(&data).await?;
                println!("Printed successfully!");
            }
        }

        Commands::Status { device } => {
            let transport = PrintTransport::tty(device.or(settings.device));
            if transport.is_supported() {
                println!("Serial printing: supported");
                match transport.device() {
                    Some(device) => println!("Device: {}", device),
                    None => println!("Device: auto ({} candidates)", discover::list_ports().len()),
                }
            } else {
                println!("Serial printing: not supported on this host");
            }
        }

        Commands::Ports => {
            let ports = discover::list_ports();
            if ports.is_empty() {
                println!("No serial printer devices found");
            }
            for port in ports {
                println!("  {}", port.display());
            }
        }

        Commands::Serve { listen, printer } => {
            let mut config = ServerConfig::from_settings(&settings)?;
            if let Some(listen) = listen {
                config.listen_addr = listen;
            }
            config.printer = paper_for(printer.paper.as_deref(), &settings)?;

            server::serve(config, transport_for(&printer, &settings)?).await?;
        }
    }

    Ok(())
}

/// Paper profile from the flag, falling back to the settings file
fn paper_for(flag: Option<&str>, settings: &Settings) -> Result<PrinterConfig> {
    match flag {
        Some(name) => name.parse(),
        None => settings.printer(),
    }
}

/// Build the transport, resolving `--mac` to its RFCOMM device
fn transport_for(args: &PrinterArgs, settings: &Settings) -> Result<PrintTransport> {
    let device = match &args.mac {
        Some(mac) => {
            let device = discover::rfcomm_device_for(mac)
                .map_err(|e| KvitteringError::transport("rfcomm lookup", e))?
                .ok_or_else(|| {
                    KvitteringError::Config(format!("No RFCOMM device is bound to {}", mac))
                })?;
            Some(device)
        }
        None => args.device.clone().or_else(|| settings.device.clone()),
    };

    Ok(PrintTransport::tty(device))
}

/// Read and parse a receipt document
fn read_receipt(path: &Path) -> Result<Receipt> {
    let json = if path == Path::new("-") {
        io::read_to_string(io::stdin())?
    } else {
        fs::read_to_string(path)?
    };
    Receipt::from_json(&json)
}

/// Write encoded bytes (or their text) to a file or stdout
fn write_output(data: &[u8], path: Option<&Path>, text: bool) -> Result<()> {
    let text_bytes;
    let data = if text {
        text_bytes = decode::plain_text(data).into_bytes();
        &text_bytes[..]
    } else {
        data
    };

    match path {
        Some(path) => {
            fs::write(path, data)?;
            eprintln!("Wrote {} bytes to {}", data.len(), path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(data)?;
            stdout.flush()?;
        }
    }

    Ok(())
}
