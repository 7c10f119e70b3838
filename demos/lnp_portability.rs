use std::io;

use tracing_subscriber::EnvFilter;
use voipms::Lnp;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let did = std::env::var("VOIPMS_DID").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "VOIPMS_DID environment variable is required",
        )
    })?;

    let lnp = Lnp::from_credentials(None, None)?;
    let response = lnp.get_portability(&did)?;
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}
