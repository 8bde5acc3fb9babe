//! Command line front end for CSIDH-512 key exchange.
//!
//! Keys travel as hex strings, either in files or on stdin/stdout. When
//! `derive` reads from stdin the private key comes first, one key per line.

#![allow(incomplete_features)]
#![feature(generic_const_exprs)]

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use log::{LevelFilter, Log, Metadata, Record};
use rand::rngs::OsRng;

use csidh::fields::csidh::Csidh512;
use csidh::protocols::csidh::{Csidh, CsidhPublicKey};
use csidh::protocols::csidh_parameters::{
    CSIDH_512_DUMMY_FREE, CSIDH_512_WITH_DUMMY_ONE, CSIDH_512_WITH_DUMMY_TWO,
};
use csidh::protocols::policy::SimbaPolicy;

#[derive(Parser, Debug)]
#[command(name = "csidh")]
#[command(about = "CSIDH-512 key generation and shared secret derivation")]
struct Args {
    /// Increase log verbosity on stderr (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Exponent policy used to evaluate the group action
    #[arg(long, value_enum, default_value_t = Policy::WithDummyTwo, global = true)]
    policy: Policy,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Policy {
    DummyFree,
    WithDummyOne,
    WithDummyTwo,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sample a private key and compute the matching public key
    Keygen {
        /// Write the public key here instead of stdout
        #[arg(short = 'p', long = "public")]
        public: Option<PathBuf>,

        /// Write the private key here instead of stdout
        #[arg(short = 's', long = "secret")]
        secret: Option<PathBuf>,

        /// Emit the 64 byte compressed public key
        #[arg(long)]
        compressed: bool,
    },
    /// Derive the shared secret from our private key and their public key
    Derive {
        /// Read their public key from this file
        #[arg(short = 'p', long = "public")]
        public: Option<PathBuf>,

        /// Read our private key from this file
        #[arg(short = 's', long = "secret")]
        secret: Option<PathBuf>,
    },
    /// Print the primes and the bounds of the selected policy
    Params,
}

struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn init_logging(verbose: u8) -> Result<()> {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    log::set_logger(&LOGGER).map_err(|e| anyhow::anyhow!("cannot install logger: {e}"))?;
    log::set_max_level(level);
    Ok(())
}

fn write_output(path: Option<&Path>, what: &str, line: &str) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, format!("{line}\n"))
            .with_context(|| format!("cannot write {what} to {}", path.display())),
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{line}").context("cannot write to stdout")
        }
    }
}

fn read_file(path: &Path, what: &str) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("cannot read {what} from {}", path.display()))
}

/// Fill in whichever keys were not given as files from stdin, private key
/// first.
fn read_keys(public: Option<&Path>, secret: Option<&Path>) -> Result<(String, String)> {
    let secret_hex = secret.map(|p| read_file(p, "private key")).transpose()?;
    let public_hex = public.map(|p| read_file(p, "public key")).transpose()?;

    if let (Some(s), Some(p)) = (&secret_hex, &public_hex) {
        return Ok((s.clone(), p.clone()));
    }

    let stdin = std::io::read_to_string(std::io::stdin()).context("cannot read stdin")?;
    let mut lines = stdin.lines().map(str::trim).filter(|l| !l.is_empty());
    let secret_hex = match secret_hex {
        Some(s) => s,
        None => lines.next().context("missing private key on stdin")?.to_string(),
    };
    let public_hex = match public_hex {
        Some(p) => p,
        None => lines.next().context("missing public key on stdin")?.to_string(),
    };

    Ok((secret_hex, public_hex))
}

fn run<P: SimbaPolicy>(csidh: &Csidh<Csidh512, P>, command: &Command) -> Result<()> {
    let mut rng = OsRng;

    match command {
        Command::Keygen {
            public,
            secret,
            compressed,
        } => {
            let (sk, pk) = csidh.keygen(&mut rng);
            // Only ever publish a key the validator accepts
            if !csidh.validate(&pk.curve, &mut rng) {
                bail!("generated public key failed validation");
            }
            log::info!("{} public key validated", csidh.policy_name());

            let pk_hex = if *compressed {
                hex::encode(pk.encode_compressed())
            } else {
                pk.to_hex()
            };
            write_output(secret.as_deref(), "private key", &sk.to_hex())?;
            write_output(public.as_deref(), "public key", &pk_hex)?;
        }
        Command::Derive { public, secret } => {
            let (sk_hex, pk_hex) = read_keys(public.as_deref(), secret.as_deref())?;
            let sk = csidh
                .private_key_from_hex(&sk_hex)
                .context("invalid private key")?;
            let pk = CsidhPublicKey::<Csidh512>::from_hex(&pk_hex).context("invalid public key")?;

            let ss = csidh
                .derive_shared_secret(&pk, &sk, &mut rng)
                .context("key exchange aborted")?;
            println!("{ss}");
        }
        Command::Params => {
            println!("policy: {}", csidh.policy_name());
            println!("isogenies per action: {}", csidh.total_isogenies());
            println!("primes: {:?}", csidh.primes());
            println!("bounds: {:?}", csidh.bounds());
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose)?;
    log::debug!("policy {:?}", args.policy);

    match args.policy {
        Policy::DummyFree => run(&CSIDH_512_DUMMY_FREE, &args.command),
        Policy::WithDummyOne => run(&CSIDH_512_WITH_DUMMY_ONE, &args.command),
        Policy::WithDummyTwo => run(&CSIDH_512_WITH_DUMMY_TWO, &args.command),
    }
}
