use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use sigcheck::config::DEFAULT_PUBKEY;
use sigcheck::{run, CheckConfig, DigestSource, Outcome, SignatureSource};

#[derive(Parser, Debug)]
#[command(name = "sigcheck")]
#[command(about = "Verify one secp256k1 ECDSA signature against a precomputed digest")]
struct Args {
    /// Digest as big-endian hex (64 characters)
    #[arg(long, group = "digest_input")]
    digest: Option<String>,

    /// Digest in Bitcoin's byte-reversed display order
    #[arg(long, group = "digest_input")]
    digest_reversed: Option<String>,

    /// Raw message as hex, digested with SHA-256d
    #[arg(long, group = "digest_input")]
    message: Option<String>,

    /// Signature R component as hex
    #[arg(short, long, requires = "s", conflicts_with = "signature")]
    r: Option<String>,

    /// Signature S component as hex
    #[arg(short, long, requires = "r", conflicts_with = "signature")]
    s: Option<String>,

    /// Compact 64-byte r || s signature as hex
    #[arg(long)]
    signature: Option<String>,

    /// Compressed SEC1 public key as hex (02/03 prefix)
    #[arg(long)]
    pubkey: Option<String>,
}

impl Args {
    fn digest_source(&self) -> DigestSource {
        if let Some(h) = &self.digest {
            DigestSource::Hex(h.clone())
        } else if let Some(h) = &self.digest_reversed {
            DigestSource::HexReversed(h.clone())
        } else if let Some(m) = &self.message {
            DigestSource::Message(m.clone())
        } else {
            DigestSource::default()
        }
    }

    fn signature_source(&self) -> SignatureSource {
        match (&self.signature, &self.r, &self.s) {
            (Some(compact), _, _) => SignatureSource::Compact(compact.clone()),
            (None, Some(r), Some(s)) => SignatureSource::Components {
                r: r.clone(),
                s: s.clone(),
            },
            _ => SignatureSource::default(),
        }
    }

    fn pubkey(&self) -> &str {
        self.pubkey.as_deref().unwrap_or(DEFAULT_PUBKEY)
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    let outcome = match CheckConfig::from_sources(
        &args.digest_source(),
        &args.signature_source(),
        args.pubkey(),
    ) {
        Ok(config) => run(&config),
        Err(e) => {
            tracing::warn!(error = %e, "could not parse inputs");
            Outcome::Invalid(e)
        }
    };

    println!("{}", outcome);
    ExitCode::from(outcome.exit_code())
}
