//! `ringsig-cli`: a thin wrapper binary over `ringsig_core`.
//!
//! This binary is deliberately dumb — it holds no cryptographic logic of
//! its own. Its only obligation is to present the same ring ordering and
//! the same message bytes at `prove` time as a verifier will later present
//! at `verify` time; everything else is delegated to the library.

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Deserialize;

/// A JSON bundle describing a ring, a message, and (depending on the
/// subcommand) a secret key or an existing proof.
///
/// Matches the document-envelope shape described in the core's public
/// contract: `ring` is the flattened, order-significant public-key list,
/// `message` is the raw UTF-8 message text, and `secret_key`/`proof` are
/// populated as the subcommand requires.
#[derive(Deserialize)]
struct Bundle {
    ring: Vec<String>,
    message: String,
    #[serde(default)]
    secret_key: Option<String>,
    #[serde(default)]
    proof: Option<String>,
}

#[derive(Parser)]
#[command(name = "ringsig-cli", about = "Anonymous ring signatures over Ed25519")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Produce a ring signature from a JSON bundle (`ring`, `message`,
    /// `secret_key`), reading from a file or stdin, writing the hex proof
    /// to stdout.
    Prove {
        /// Path to the JSON bundle; omit to read from stdin.
        bundle: Option<PathBuf>,
    },
    /// Verify a ring signature from a JSON bundle (`ring`, `message`,
    /// `proof`), reading from a file or stdin.
    Verify {
        /// Path to the JSON bundle; omit to read from stdin.
        bundle: Option<PathBuf>,
    },
    /// Check whether `text` parses as an unencrypted OpenSSH ed25519
    /// private key, without attempting to sign anything.
    IsSecretKey {
        /// Path to the key text; omit to read from stdin.
        path: Option<PathBuf>,
    },
    /// Generate a fresh Ed25519 keypair: an unencrypted OpenSSH PEM private
    /// key and its matching one-line `ssh-ed25519` public key.
    Keygen,
}

fn main() -> ExitCode {
    env_logger_init();

    let cli = Cli::parse();
    match cli.command {
        Command::Prove { bundle } => run_prove(bundle),
        Command::Verify { bundle } => run_verify(bundle),
        Command::IsSecretKey { path } => run_is_secret_key(path),
        Command::Keygen => run_keygen(),
    }
}

/// Installs `env_logger` if the caller has set `RUST_LOG`; this binary
/// never panics if logging is uninitialized, since `log`'s default no-op
/// logger applies.
fn env_logger_init() {
    let _ = env_logger::try_init();
}

fn run_prove(bundle_path: Option<PathBuf>) -> ExitCode {
    let bundle = match read_bundle(bundle_path) {
        Ok(bundle) => bundle,
        Err(message) => return fail(&message),
    };

    let Some(secret_key) = bundle.secret_key else {
        return fail("bundle is missing \"secret_key\"");
    };

    log::debug!("proving over a ring of {} member(s)", bundle.ring.len());

    let (proof, error) = ringsig_core::prove(&bundle.ring, bundle.message.as_bytes(), &secret_key);
    if !error.is_empty() {
        log::warn!("prove failed: {error}");
        return fail(&error);
    }

    println!("{proof}");
    ExitCode::SUCCESS
}

fn run_verify(bundle_path: Option<PathBuf>) -> ExitCode {
    let bundle = match read_bundle(bundle_path) {
        Ok(bundle) => bundle,
        Err(message) => return fail(&message),
    };

    let Some(proof) = bundle.proof else {
        return fail("bundle is missing \"proof\"");
    };

    log::debug!("verifying over a ring of {} member(s)", bundle.ring.len());

    let error = ringsig_core::verify(&proof, &bundle.ring, bundle.message.as_bytes());
    if !error.is_empty() {
        log::warn!("verify rejected the signature: {error}");
        return fail(&error);
    }

    ExitCode::SUCCESS
}

fn run_is_secret_key(path: Option<PathBuf>) -> ExitCode {
    let text = match read_input(path) {
        Ok(text) => text,
        Err(message) => return fail(&message),
    };

    println!("{}", ringsig_core::is_secret_key(&text));
    ExitCode::SUCCESS
}

fn run_keygen() -> ExitCode {
    let (pem, public_line, error) = ringsig_core::generate_keypair();
    if !error.is_empty() {
        log::warn!("keygen failed: {error}");
        return fail(&error);
    }

    print!("{pem}");
    println!("{public_line}");
    ExitCode::SUCCESS
}

fn read_bundle(path: Option<PathBuf>) -> Result<Bundle, String> {
    let text = read_input(path)?;
    serde_json::from_str(&text).map_err(|err| format!("malformed JSON bundle: {err}"))
}

fn read_input(path: Option<PathBuf>) -> Result<String, String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(&path).map_err(|err| format!("reading {path:?}: {err}"))
        }
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .map_err(|err| format!("reading stdin: {err}"))?;
            Ok(text)
        }
    }
}

fn fail(message: &str) -> ExitCode {
    eprintln!("{message}");
    ExitCode::FAILURE
}
