use super::config::{
    default_chain, ledger_path_in, mnemonic_path_in, resolve_config_path, UrbanPlanConfig,
};
use super::context::init_logging;
use super::mnemonic::{
    display_generated_mnemonic, generate_mnemonic, read_mnemonic, save_mnemonic_to_file,
    MnemonicSource, MNEMONIC_ENV,
};
use std::path::{Path, PathBuf};
use urbanplan::identity::{IdentityKeyring, IdentityProvider, LocalIdentity};

/// Create the configuration, an empty ledger location, and a signing identity
///
/// The identity comes from URBANPLAN_MNEMONIC when set, from an existing
/// mnemonic file next to the config, or is freshly generated.
pub async fn execute(
    config: Option<String>,
    ledger: Option<String>,
    chain_id: Option<u64>,
    force: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    init_logging("info");

    let config_path = resolve_config_path(config.as_deref());
    if config_path.exists() && !force {
        return Err(format!(
            "Config already exists at: {}\nUse --force to overwrite.",
            config_path.display()
        )
        .into());
    }

    let data_dir = config_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    let ledger_path = ledger
        .map(PathBuf::from)
        .unwrap_or_else(|| ledger_path_in(&data_dir));
    let mnemonic_path = mnemonic_path_in(&data_dir);
    let chain_id = chain_id.unwrap_or_else(default_chain);

    let mnemonic = obtain_mnemonic(&mnemonic_path, force)?;
    let keyring = IdentityKeyring::from_mnemonic(&mnemonic)?;
    let identity = LocalIdentity::new(&keyring, chain_id)?;

    UrbanPlanConfig::create_default(&config_path, &ledger_path, &mnemonic_path, chain_id)?;

    println!("✅ Configuration written to {}", config_path.display());
    println!("   Ledger:   {}", ledger_path.display());
    println!("   Identity: {}", identity.address());
    println!("   Chain:    {}", identity.chain_id());

    Ok(())
}

fn obtain_mnemonic(path: &Path, force: bool) -> Result<String, Box<dyn std::error::Error>> {
    if std::env::var(MNEMONIC_ENV).is_ok() {
        println!("🔑 Using identity from {}", MNEMONIC_ENV);
        return read_mnemonic(MnemonicSource::EnvVar);
    }

    if path.exists() && !force {
        println!("🔑 Reusing identity from {}", path.display());
        return read_mnemonic(MnemonicSource::File(path.to_path_buf()));
    }

    let mnemonic = generate_mnemonic()?;
    save_mnemonic_to_file(&mnemonic, path)?;
    display_generated_mnemonic(&mnemonic, path);
    Ok(mnemonic)
}
