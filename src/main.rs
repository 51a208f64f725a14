use anyhow::{Context, Result};
use clap::Parser;
use lora_payload_rs::{
    decode_hex_payload, init_logger, log_debug, log_info, log_warn, CounterSignedness,
    DecodeOptions, DeviceModel, ElsysFirmware, OutputShape,
};

#[derive(Parser)]
#[command(name = "lora-payload")]
#[command(about = "Decode LoRaWAN device payloads to JSON")]
struct Cli {
    /// Device family: nas or elsys
    #[arg(short, long)]
    model: DeviceModel,
    /// LoRaWAN fPort the payload arrived on
    #[arg(short, long, default_value = "1")]
    port: u8,
    /// Collapse value/unit objects into strings
    #[arg(long)]
    compact: bool,
    /// Put fields at the top level instead of under "data"
    #[arg(long)]
    flat: bool,
    /// Decode with the older Elsys tag table
    #[arg(long)]
    legacy_elsys: bool,
    /// Read Elsys absolute pulse counters as signed
    #[arg(long)]
    signed_counters: bool,
    /// JSON file with decode options; flags override it
    #[arg(long)]
    config: Option<std::path::PathBuf>,
    /// Payload as a hex string
    payload: String,
}

impl Cli {
    fn options(&self) -> Result<DecodeOptions> {
        let mut options = match &self.config {
            Some(path) => DecodeOptions::from_json_file(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => DecodeOptions::default(),
        };
        if self.compact {
            options.compact = true;
        }
        if self.flat {
            options.shape = OutputShape::Flat;
        }
        if self.legacy_elsys {
            options.elsys_firmware = ElsysFirmware::Legacy;
        }
        if self.signed_counters {
            options.counter_signedness = CounterSignedness::Signed;
        }
        Ok(options)
    }
}

fn main() -> Result<()> {
    init_logger();

    let cli = Cli::parse();
    let options = cli.options()?;
    log_debug(&format!("Decode options: {options:?}"));

    let result = decode_hex_payload(&cli.payload, cli.model, cli.port, options)
        .with_context(|| format!("decoding {} payload on fPort {}", cli.model, cli.port))?;
    if result.has_errors() {
        log_warn(&format!("{} issue(s) while decoding", result.errors.len()));
    } else {
        log_info(&format!("Decoded {} field(s)", result.data.len()));
    }
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
