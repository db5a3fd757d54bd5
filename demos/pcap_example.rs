//! Dissects every packet of a capture file and prints it as JSON
//!
//! Captures with link types 1 (Ethernet), 187 (Bluetooth HCI H4) and 201 (Bluetooth HCI H4 with
//! direction) are supported.

use std::convert::TryFrom;

use clap::Parser;
use pcap::Capture;

use hcimme::config::{self, Config};

#[derive(Parser, Debug)]
#[command(about = "Dissect HCI commands and HomePlug AV MMEs from a pcap file")]
struct Args {
    /// Capture file
    pcap: String,

    /// Dissection configuration (JSON)
    #[arg(short, long)]
    config: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if let Some(path) = args.config {
        let file = std::fs::File::open(path)?;
        config::set(Config::from_reader(file)?)?;
    }

    // `register_defaults` need to be called to setup decoders.
    let _ = hcimme::register_defaults();

    let mut cap = Capture::from_file(&args.pcap)?;
    let encap_type = u8::try_from(cap.get_datalink().0)?;

    eprintln!("{}: link type {}", args.pcap, encap_type);

    while let Ok(packet) = cap.next_packet() {
        match hcimme::Packet::from_bytes(packet.data, encap_type) {
            Ok(p) => println!("{}", serde_json::to_string_pretty(&p)?),
            Err(e) => {
                eprintln!("Err: {:?}, data: {:?}", e, hex::encode(packet.data));
            }
        }
    }

    Ok(())
}
