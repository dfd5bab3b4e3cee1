//! ISCC CLI - Command-line interface for ISCC codes.
//!
//! Provides commands for:
//! - Encoding, decoding and decomposing ISCC codes
//! - Generating Meta, Text, Data and Instance codes
//! - Computing ISCC-SUM codes over files and assembling ISCC-CODEs
//! - Inspecting content-defined chunk boundaries
//! - Checking the generators against the published reference codes

use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use iscc_core::codec::encode_base64;
use iscc_core::{decode, decompose, encode, IsccError, MainType, SubType, Unit, Version};
use iscc_gen::{
    conformance_report, gen_iscc_code, gen_meta_code, gen_sum_code, gen_text_code, DataHasher,
    GenConfig, InstanceHasher,
};
use serde::Serialize;
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

/// ISCC code generator and inspector.
#[derive(Parser)]
#[command(name = "iscc")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file path
    #[arg(short, long, default_value = "~/.iscc/config.toml")]
    config: PathBuf,

    /// Digest bit length (overrides the config file)
    #[arg(short, long, global = true)]
    bits: Option<u32>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a hex digest as an ISCC unit
    Encode {
        /// MainType name or number (meta, content, data, ...)
        #[arg(short, long)]
        maintype: String,

        /// SubType name or number
        #[arg(short, long, default_value = "none")]
        subtype: String,

        /// Digest as hex
        digest: String,
    },

    /// Decode an ISCC unit and show its header fields
    Decode {
        /// ISCC code, with or without the ISCC: prefix
        code: String,
    },

    /// Split a composite ISCC-CODE into its units
    Decompose {
        /// Composite ISCC-CODE
        code: String,
    },

    /// Generate a Meta-Code
    Meta {
        /// Title or name of the work
        name: String,

        /// Description text
        #[arg(short, long)]
        description: Option<String>,

        /// Metadata as JSON or a data URL
        #[arg(short, long)]
        meta: Option<String>,
    },

    /// Generate a Text-Code from a UTF-8 file ("-" for stdin)
    Text {
        /// Input file
        file: PathBuf,
    },

    /// Generate a Data-Code from a file ("-" for stdin)
    Data {
        /// Input file
        file: PathBuf,
    },

    /// Generate an Instance-Code from a file ("-" for stdin)
    Instance {
        /// Input file
        file: PathBuf,
    },

    /// Generate an ISCC-SUM (Data + Instance) from a file ("-" for stdin)
    Sum {
        /// Input file
        file: PathBuf,

        /// Produce the 256-bit wide form
        #[arg(long)]
        wide: bool,
    },

    /// Assemble an ISCC-CODE from unit codes
    Compose {
        /// Unit codes in any order
        #[arg(required = true, num_args = 2..)]
        codes: Vec<String>,

        /// Produce the 256-bit wide form when possible
        #[arg(long)]
        wide: bool,
    },

    /// List content-defined chunk boundaries of a file
    Chunks {
        /// Input file
        file: PathBuf,

        /// Target average chunk size
        #[arg(long, default_value_t = iscc_cdc::params::DEFAULT_AVG_CHUNK_SIZE)]
        avg: usize,

        /// Align cut points to 4 bytes
        #[arg(long)]
        align: bool,
    },

    /// Run the generators against the published reference codes
    Selftest,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to set up logging")?;

    let mut config = load_config(&cli.config)?;
    if let Some(bits) = cli.bits {
        config.bits = bits;
    }
    config.validate().context("Invalid configuration")?;

    match cli.command {
        Commands::Encode {
            maintype,
            subtype,
            digest,
        } => cmd_encode(&maintype, &subtype, &digest, config.bits),

        Commands::Decode { code } => cmd_decode(&code),

        Commands::Decompose { code } => cmd_decompose(&code),

        Commands::Meta {
            name,
            description,
            meta,
        } => print_json(
            &gen_meta_code(&name, description.as_deref(), meta.as_deref(), config.bits)
                .context("Failed to generate Meta-Code")?,
        ),

        Commands::Text { file } => cmd_text(&file, config.bits),

        Commands::Data { file } => cmd_data(&file, &config),

        Commands::Instance { file } => cmd_instance(&file, &config),

        Commands::Sum { file, wide } => {
            let config = config.with_wide(wide || config.wide);
            let sum = gen_sum_code(open_input(&file)?, &config)
                .with_context(|| format!("Failed to hash {}", file.display()))?;
            print_json(&sum)
        }

        Commands::Compose { codes, wide } => print_json(
            &gen_iscc_code(&codes, wide || config.wide).context("Failed to assemble ISCC-CODE")?,
        ),

        Commands::Chunks { file, avg, align } => cmd_chunks(&file, avg, align),

        Commands::Selftest => cmd_selftest(),
    }
}

fn cmd_selftest() -> Result<()> {
    let report = conformance_report();
    print_json(&report)?;
    if !report.is_success() {
        anyhow::bail!(
            "{} of {} conformance cases failed",
            report.failures.len(),
            report.total()
        );
    }
    Ok(())
}

fn cmd_encode(maintype: &str, subtype: &str, digest: &str, bits: u32) -> Result<()> {
    let maintype: MainType = parse_header_value(maintype, MainType::ALL)?;
    let subtype: SubType = parse_header_value(subtype, SubType::ALL)?;
    let digest = hex::decode(digest).context("Digest must be hex")?;
    let code = encode(maintype, subtype, Version::V0, bits, &digest)
        .context("Failed to encode unit")?;
    println!("{}", iscc_core::with_prefix(&code));
    Ok(())
}

/// Decoded header fields as printed by `iscc decode`.
#[derive(Serialize)]
struct DecodedUnit {
    maintype: MainType,
    subtype: SubType,
    version: Version,
    length: u32,
    bits: u32,
    digest: String,
    digest_base64: String,
}

impl From<&Unit> for DecodedUnit {
    fn from(unit: &Unit) -> Self {
        Self {
            maintype: unit.maintype(),
            subtype: unit.subtype(),
            version: unit.version(),
            length: unit.length(),
            bits: unit.bit_length(),
            digest: hex::encode(unit.digest()),
            digest_base64: encode_base64(unit.digest()),
        }
    }
}

fn cmd_decode(code: &str) -> Result<()> {
    let unit = decode(code).with_context(|| format!("Failed to decode {code}"))?;
    print_json(&DecodedUnit::from(&unit))
}

fn cmd_decompose(code: &str) -> Result<()> {
    let units = decompose(code).with_context(|| format!("Failed to decompose {code}"))?;
    for unit in units {
        println!("{}", iscc_core::with_prefix(&unit));
    }
    Ok(())
}

fn cmd_text(file: &Path, bits: u32) -> Result<()> {
    let mut text = String::new();
    open_input(file)?
        .read_to_string(&mut text)
        .with_context(|| format!("Failed to read UTF-8 text from {}", file.display()))?;
    print_json(&gen_text_code(&text, bits).context("Failed to generate Text-Code")?)
}

fn cmd_data(file: &Path, config: &GenConfig) -> Result<()> {
    let mut hasher = DataHasher::new();
    let size = stream_into(open_input(file)?, config.buffer_size, |block| {
        hasher.update(block)
    })?;
    info!(file = %file.display(), size, "Hashed input");
    print_json(&hasher.finalize(config.bits).context("Failed to generate Data-Code")?)
}

fn cmd_instance(file: &Path, config: &GenConfig) -> Result<()> {
    let mut hasher = InstanceHasher::new();
    stream_into(open_input(file)?, config.buffer_size, |block| {
        hasher.update(block)
    })?;
    print_json(&hasher.finalize(config.bits).context("Failed to generate Instance-Code")?)
}

/// One chunk boundary as printed by `iscc chunks`.
#[derive(Serialize)]
struct ChunkInfo {
    offset: usize,
    size: usize,
    xxh32: String,
}

fn cmd_chunks(file: &Path, avg: usize, align: bool) -> Result<()> {
    let mut data = Vec::new();
    open_input(file)?
        .read_to_end(&mut data)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let chunks = iscc_cdc::cdc_chunks(&data, align, avg).context("Failed to chunk input")?;
    let mut offset = 0;
    let mut infos = Vec::with_capacity(chunks.len());
    for chunk in chunks {
        infos.push(ChunkInfo {
            offset,
            size: chunk.len(),
            xxh32: format!("{:08x}", iscc_core::xxh32(chunk)),
        });
        offset += chunk.len();
    }
    debug!(chunks = infos.len(), size = data.len(), "Chunked input");
    print_json(&infos)
}

/// Opens a file, or stdin for "-".
fn open_input(path: &Path) -> Result<Box<dyn Read>> {
    if path == Path::new("-") {
        return Ok(Box::new(io::stdin().lock()));
    }
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    Ok(Box::new(file))
}

/// Reads `reader` in blocks of `buffer_size` and passes each block on.
fn stream_into<R, F>(mut reader: R, buffer_size: usize, mut sink: F) -> Result<u64>
where
    R: Read,
    F: FnMut(&[u8]) -> Result<(), IsccError>,
{
    let mut buf = vec![0u8; buffer_size];
    let mut total = 0u64;
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e).context("Failed to read input"),
        };
        sink(&buf[..n])?;
        total += n as u64;
    }
    Ok(total)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).context("Failed to serialize output")?
    );
    Ok(())
}

/// Parses a header enum from its name (case-insensitive) or numeric value.
fn parse_header_value<T>(value: &str, all: &[T]) -> Result<T>
where
    T: Copy + fmt::Display + TryFrom<u8, Error = IsccError>,
{
    if let Ok(number) = value.parse::<u8>() {
        return Ok(T::try_from(number)?);
    }
    all.iter()
        .copied()
        .find(|v| v.to_string().eq_ignore_ascii_case(value))
        .with_context(|| format!("Unknown header value: {value}"))
}

/// Load configuration from TOML file.
fn load_config(path: &Path) -> Result<GenConfig> {
    let path = expand_tilde(path);

    if !path.exists() {
        debug!("No config file found at {:?}, using defaults", path);
        return Ok(GenConfig::default());
    }

    let content = std::fs::read_to_string(&path).context("Failed to read config file")?;
    parse_config(&content)
}

fn parse_config(content: &str) -> Result<GenConfig> {
    let toml: toml::Value = content.parse().context("Failed to parse config file")?;

    let mut config = GenConfig::default();

    // Parse [gen] section
    if let Some(section) = toml.get("gen") {
        if let Some(bits) = section.get("bits").and_then(|v| v.as_integer()) {
            config.bits = u32::try_from(bits).context("Invalid bits")?;
        }
        if let Some(wide) = section.get("wide").and_then(|v| v.as_bool()) {
            config.wide = wide;
        }
        if let Some(size) = section.get("buffer_size").and_then(|v| v.as_integer()) {
            config.buffer_size = usize::try_from(size).context("Invalid buffer_size")?;
        }
    }

    Ok(config)
}

/// Expand ~ to home directory.
fn expand_tilde(path: &Path) -> PathBuf {
    let s = path.to_string_lossy();
    if let Some(rest) = s.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    path.to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_tilde() {
        let path = PathBuf::from("~/.iscc/config.toml");
        let expanded = expand_tilde(&path);

        if let Some(home) = dirs::home_dir() {
            assert!(expanded.starts_with(&home));
            assert!(expanded.ends_with(".iscc/config.toml"));
        }
        assert_eq!(expand_tilde(Path::new("/etc/x")), PathBuf::from("/etc/x"));
    }

    #[test]
    fn test_decoded_unit_fields() {
        let unit = decode("ISCC:GAAXL2XYM5BQIAZ3").unwrap();
        let decoded = DecodedUnit::from(&unit);
        assert_eq!(decoded.maintype, MainType::Data);
        assert_eq!(decoded.bits, 64);
        assert_eq!(decoded.digest, "75eaf8674304033b");
        assert_eq!(decoded.digest_base64, "der4Z0MEAzs");
    }

    #[test]
    fn test_parse_config() {
        let config = parse_config(
            r#"
[gen]
bits = 128
wide = true
buffer_size = 65536
"#,
        )
        .unwrap();
        assert_eq!(config, GenConfig::new(128).with_wide(true).with_buffer_size(65536));

        assert_eq!(parse_config("").unwrap(), GenConfig::default());
        assert!(parse_config("[gen]\nbits = -1").is_err());
        assert!(parse_config("not toml [").is_err());
    }

    #[test]
    fn test_missing_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, GenConfig::default());
    }

    #[test]
    fn test_parse_header_value() {
        assert_eq!(parse_header_value("data", MainType::ALL).unwrap(), MainType::Data);
        assert_eq!(parse_header_value("3", MainType::ALL).unwrap(), MainType::Data);
        assert_eq!(parse_header_value("Image", SubType::ALL).unwrap(), SubType::Image);
        assert!(parse_header_value("bogus", MainType::ALL).is_err());
        assert!(parse_header_value("9", MainType::ALL).is_err());
    }

    #[test]
    fn test_stream_into_counts_bytes() {
        let data = vec![7u8; 10_000];
        let mut seen = 0usize;
        let total = stream_into(data.as_slice(), 1024, |block| {
            seen += block.len();
            Ok(())
        })
        .unwrap();
        assert_eq!(total, 10_000);
        assert_eq!(seen, 10_000);
    }
}
