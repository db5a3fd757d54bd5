use std::env;
use std::fs::File;
use std::io::{Read, Write};
use std::path::PathBuf;

// Generates `layers::register_defaults`. Every file under `src/layers` that defines a top level
// `register_defaults` function gets a call to it in the generated function, so adding a dissector
// only needs the new file.
fn main() -> std::io::Result<()> {
    let sources_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap())
        .join("src")
        .join("layers");

    println!("cargo:rerun-if-changed={}", sources_dir.display());

    let walker = walkdir::WalkDir::new(&sources_dir).sort_by_file_name();

    let mut reg_defaults = Vec::new();
    for entry in walker {
        let entry = entry?;
        let is_rust_file = entry.path().extension().map_or(false, |ext| ext == "rs");
        if !entry.file_type().is_file() || !is_rust_file {
            continue;
        }

        let mut file = File::open(entry.path())?;
        let mut content = String::new();
        file.read_to_string(&mut content)?;

        let ast = syn::parse_file(&content).map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("file: {:?}, Error: {:?}", entry.path(), e),
            )
        })?;

        let has_register_defaults = ast.items.iter().any(|item| match item {
            syn::Item::Fn(f) => f.sig.ident == "register_defaults",
            _ => false,
        });
        if !has_register_defaults {
            continue;
        }

        // `bluetooth/hci_cmd/mod.rs` -> `bluetooth::hci_cmd::register_defaults()?;`
        let mut register_defaults_fn_path = entry
            .path()
            .strip_prefix(&sources_dir)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string()
            .replace('\\', "/")
            .replace("mod.rs", "")
            .replace(".rs", "/")
            .replace('/', "::");

        register_defaults_fn_path.push_str("register_defaults()?;");
        reg_defaults.push(register_defaults_fn_path);
    }

    let output_str = format!(
        r#"

use std::sync::Once;

static INIT: Once = Once::new();

/// Register Default dissectors.
///
/// Each [`Layer`][`crate::layer::Layer`] is selected by a value in the layer that carries it:
/// the HCI command dissector by the H4 packet indicator 0x01, a vendor command set by the
/// vendor OGF 0x3F and the configured vendor, the HomePlug AV dissector by EtherType 0x88E1 and
/// a vendor MME dissector by the OUI that follows a vendor specific MMTYPE.
///
/// To initialize the dissection framework properly, the application should call this function
/// before trying to dissect packets. If this function is not called, all the data is shown as
/// `unprocessed` data in the [`Packet`][`crate::Packet`]
///
/// ```rust
/// # fn main() {{
///
/// let _ = hcimme::register_defaults();
///
/// let packet_data = hex::decode("01030c00").unwrap();
///
/// let packet = hcimme::Packet::from_bytes(&packet_data, hcimme::ENCAP_TYPE_BLUETOOTH_HCI_H4);
///
/// eprintln!("Packet: {{:#?}}", packet);
///
/// # }}
///
/// ```
///
/// When a dissector is defined outside the crate, it may use the `register_*` function of the
/// layer that carries it to request its dissection.

pub fn register_defaults() -> Result<(), crate::errors::Error> {{

    let mut result: Result<(), crate::errors::Error> = Ok(());

    fn inner() -> Result<(), crate::errors::Error> {{
        // We need to make sure `packet::register_defaults` is initialized first.
        crate::packet::register_defaults()?;

        // Now all the layers' `register_defaults`
        {layers_reg_defaults}

        Ok(())
    }}

    INIT.call_once(|| {{
        result = inner();

        if let Err(ref e) = result {{

            #[cfg(feature = "logging")]
            log::error!("Error during register_defaults: {{:#?}}", e);

            eprintln!("Error : {{:#?}}", e);
        }}

    }});

    result

}}"#,
        layers_reg_defaults = reg_defaults.join("\n")
    );

    let output_path = PathBuf::from(env::var("OUT_DIR").unwrap());
    let outfile_path = output_path.join("register_defaults.rs");
    {
        let mut outfile = File::create(&outfile_path)?;
        outfile.write_all(output_str.as_bytes())?;
        outfile.flush()?;
    }

    // Formatting is only for humans reading OUT_DIR; a missing rustfmt is not an error.
    let _ = std::process::Command::new("rustfmt")
        .arg(&outfile_path)
        .output();

    Ok(())
}
