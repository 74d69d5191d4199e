// Read one card identifier from the first attached PaSoRi reader.

// Run with the USB backend enabled:
//   cargo run --example read_id --features usb

#[cfg(feature = "usb")]
fn main() -> anyhow::Result<()> {
    use std::sync::Arc;

    use pasori_id::prelude::*;
    use pasori_id::transport::UsbHostEnv;

    env_logger::init();

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let reader = Reader::new(Arc::new(UsbHostEnv::new()));

        println!("Touch a card on the reader...");
        match reader.read_id().await {
            Ok(CardId::TypeA(uid)) => println!("Type A UID: {}", uid.to_hex()),
            Ok(CardId::TypeF(idm)) => println!("FeliCa IDm: {}", idm.to_hex()),
            Err(e) => {
                eprintln!("{}: {}", e.message(), e.detail());
                return Err(e.into());
            }
        }
        Ok(())
    })
}

#[cfg(not(feature = "usb"))]
fn main() {
    eprintln!("rebuild with --features usb to talk to real hardware");
}
