use std::fs;
use std::io::{self, Write};
use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};

/// Environment variable holding the identity mnemonic
pub const MNEMONIC_ENV: &str = "URBANPLAN_MNEMONIC";

/// Where the identity mnemonic comes from, checked in order
#[derive(Debug, PartialEq, Eq)]
pub enum MnemonicSource {
    /// From URBANPLAN_MNEMONIC (testing and CI)
    EnvVar,
    /// From the configured mnemonic file
    File(PathBuf),
    /// From a masked terminal prompt
    Stdin,
}

/// Generate a BIP-39 recovery phrase (24 words, 256 bits of entropy)
pub fn generate_mnemonic() -> Result<String, Box<dyn std::error::Error>> {
    use bip39::{Language, Mnemonic};
    use rand::RngCore;

    let mut entropy = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut entropy);

    let mnemonic = Mnemonic::from_entropy_in(Language::English, &entropy)
        .map_err(|e| format!("Failed to generate BIP-39 mnemonic: {}", e))?;

    Ok(mnemonic.to_string())
}

/// Pick a source: env var, then an existing mnemonic file, then the prompt
pub fn determine_mnemonic_source(mnemonic_file: Option<&Path>) -> MnemonicSource {
    if std::env::var(MNEMONIC_ENV).is_ok() {
        return MnemonicSource::EnvVar;
    }

    match mnemonic_file {
        Some(path) if path.exists() => MnemonicSource::File(path.to_path_buf()),
        _ => MnemonicSource::Stdin,
    }
}

/// Read the mnemonic from its source
pub fn read_mnemonic(source: MnemonicSource) -> Result<String, Box<dyn std::error::Error>> {
    let mnemonic = match source {
        MnemonicSource::EnvVar => std::env::var(MNEMONIC_ENV)
            .map_err(|_| format!("{} env var not set", MNEMONIC_ENV))?,
        MnemonicSource::File(path) => {
            if !path.exists() {
                return Err(format!("Mnemonic file not found: {}", path.display()).into());
            }

            fs::read_to_string(&path)
                .map_err(|e| format!("Failed to read mnemonic file: {}", e))?
        }
        MnemonicSource::Stdin => rpassword::prompt_password("Enter identity mnemonic: ")
            .map_err(|e| format!("Failed to read mnemonic from stdin: {}", e))?,
    };

    let mnemonic = mnemonic.trim().to_string();
    if mnemonic.is_empty() {
        return Err("Mnemonic is empty".into());
    }

    Ok(mnemonic)
}

/// Save the mnemonic with owner-only permissions (0600)
pub fn save_mnemonic_to_file(
    mnemonic: &str,
    path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create mnemonic directory: {}", e))?;
    }

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)
        .map_err(|e| format!("Failed to create mnemonic file '{}': {}", path.display(), e))?;

    writeln!(file, "{}", mnemonic)
        .map_err(|e| format!("Failed to write mnemonic to '{}': {}", path.display(), e))?;

    Ok(())
}

/// Show a freshly generated mnemonic once, on stderr
pub fn display_generated_mnemonic(mnemonic: &str, saved_path: &Path) {
    const BOLD: &str = "\x1b[1m";
    const RESET: &str = "\x1b[0m";
    const BOX_WIDTH: usize = 79;

    eprintln!();
    eprintln!("{}", "═".repeat(BOX_WIDTH));
    eprintln!("🔑 {BOLD}Identity recovery phrase (SAVE THIS SECURELY){RESET}");
    eprintln!("{}", "═".repeat(BOX_WIDTH));
    eprintln!();
    eprintln!("  {BOLD}{mnemonic}{RESET}");
    eprintln!();
    eprintln!("📁 SAVED TO: {BOLD}{}{RESET} (mode 0600)", saved_path.display());
    eprintln!("  • Your proposals are owned by the address derived from this phrase");
    eprintln!("  • Without it you cannot approve or reject your proposals");
    eprintln!("{}", "═".repeat(BOX_WIDTH));
    eprintln!();

    let _ = io::stderr().flush();
}
