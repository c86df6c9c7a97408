//! Secret management commands.
//!
//! Provides `keyward save|load|delete` on top of the `keyward-secrets`
//! store selected by the configuration.

use clap::Args;
use keyward_core::{BackendKind, Config};
use keyward_secrets::{SecretStore, SecretValue};
use zeroize::Zeroizing;

/// Arguments for `keyward save`.
#[derive(Args)]
pub struct SaveArgs {
    /// Service name, e.g. the application storing the secret
    pub service: String,

    /// User or account name within the service
    pub user: String,

    /// Secret value (if omitted, prompts for hidden input)
    #[arg(long)]
    pub value: Option<String>,

    /// Accept an empty secret
    #[arg(long)]
    pub allow_empty: bool,
}

/// Arguments for `keyward load`.
#[derive(Args)]
pub struct LoadArgs {
    /// Service name
    pub service: String,

    /// User or account name
    pub user: String,

    /// Print the secret hex-encoded
    #[arg(long)]
    pub hex: bool,
}

/// Arguments for `keyward delete`.
#[derive(Args)]
pub struct DeleteArgs {
    /// Service name
    pub service: String,

    /// User or account name
    pub user: String,
}

/// Open the store selected by the configuration.
fn open_store(config: &Config) -> anyhow::Result<SecretStore> {
    if config.store.backend == BackendKind::Memory {
        tracing::warn!("memory backend selected; secrets will not outlive this process");
    }

    let store = SecretStore::open(&config.store);
    if !store.is_ok() {
        anyhow::bail!(
            "Failed to open the {} secret backend",
            config.store.backend
        );
    }
    Ok(store)
}

/// Run `keyward save`.
pub fn save(config: &Config, args: SaveArgs) -> anyhow::Result<()> {
    let store = open_store(config)?;

    let text = match args.value {
        Some(v) => v,
        None => {
            let prompt = format!("Enter secret for {}/{}: ", args.service, args.user);
            rpassword::prompt_password(prompt)
                .map_err(|e| anyhow::anyhow!("Failed to read secret: {}", e))?
        }
    };

    if text.is_empty() && !args.allow_empty {
        anyhow::bail!("Secret value must not be empty (pass --allow-empty to store one)");
    }

    let secret = SecretValue::from_string(text);
    if !store.save(&args.service, &args.user, &secret) {
        anyhow::bail!("Failed to save secret for {}/{}", args.service, args.user);
    }

    println!("Secret for {}/{} stored.", args.service, args.user);
    Ok(())
}

/// Run `keyward load`. The secret is written to stdout without a label.
pub fn load(config: &Config, args: LoadArgs) -> anyhow::Result<()> {
    let store = open_store(config)?;

    let secret = store.load(&args.service, &args.user);
    let Some(bytes) = secret.data() else {
        anyhow::bail!("No secret found for {}/{}", args.service, args.user);
    };

    if args.hex {
        let encoded = Zeroizing::new(hex::encode(bytes));
        println!("{}", encoded.as_str());
        return Ok(());
    }

    match secret.as_str() {
        Some(text) => println!("{}", text),
        None => anyhow::bail!("Secret is not valid UTF-8; use --hex to print it"),
    }
    Ok(())
}

/// Run `keyward delete`.
pub fn delete(config: &Config, args: DeleteArgs) -> anyhow::Result<()> {
    let store = open_store(config)?;

    if !store.delete(&args.service, &args.user) {
        anyhow::bail!("No secret deleted for {}/{}", args.service, args.user);
    }

    println!("Secret for {}/{} deleted.", args.service, args.user);
    Ok(())
}
