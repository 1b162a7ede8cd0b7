//! meshwork CLI - generate, inspect and convert meshes
//!
//! Logging goes to stderr and is controlled with `RUST_LOG`.

use anyhow::{bail, Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use clap::{Parser, Subcommand};
use meshwork::{Config, MeshFileType, MeshGeometry, MeshOperation, MeshRecord};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "meshwork")]
#[command(about = "Procedural mesh generation and OBJ conversion", long_about = None)]
struct Cli {
    /// TOML file with generation limits and OBJ output options
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a primitive (cube, sphere, cylinder, plane) as OBJ
    Generate {
        /// Primitive type
        kind: String,
        /// Parameter as key=value, repeatable (e.g. --param radius=2)
        #[arg(short, long = "param", value_name = "KEY=VALUE")]
        params: Vec<String>,
        /// Parameters as a JSON object, merged under --param values
        #[arg(long)]
        params_json: Option<String>,
        /// Comment line written before the mesh
        #[arg(long)]
        header: Option<String>,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Re-write an OBJ file using the configured output options
    Convert {
        /// Input mesh file
        input: PathBuf,
        /// Output OBJ file
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Display counts and bounds of a mesh file
    Info {
        /// Path to the mesh file
        file: PathBuf,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Wrap a mesh file into a JSON record with base64 data
    Encode {
        /// Mesh file to wrap
        file: PathBuf,
        /// Record name (default: the file name)
        #[arg(short, long)]
        name: Option<String>,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Extract the mesh file from a JSON record
    Decode {
        /// Record JSON file
        record: PathBuf,
        /// Output file (default: the record's file name)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Apply a named operation (subdivision, decimation, smoothing) to a record
    Apply {
        /// Record JSON file
        record: PathBuf,
        /// Operation name
        operation: String,
        /// Output record file (default: overwrite input)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => Config::default(),
    };
    debug!(?config, "configuration loaded");

    match cli.command {
        Commands::Generate {
            kind,
            params,
            params_json,
            header,
            output,
        } => {
            if header.is_some() {
                config.obj.header = header;
            }
            let params = collect_params(&params, params_json.as_deref())?;
            let mesh = config.generate(&kind, &params)?;
            emit(output.as_deref(), &config.serialize_obj(&mesh))?;
        }
        Commands::Convert { input, output } => {
            let mesh = read_mesh(&input)?;
            fs::write(&output, config.serialize_obj(&mesh))?;
            info!(input = %input.display(), output = %output.display(), "converted mesh");
        }
        Commands::Info { file, json } => {
            show_info(&file, json)?;
        }
        Commands::Encode { file, name, output } => {
            let record = encode_file(&file, name)?;
            emit(output.as_deref(), &record.to_json()?)?;
        }
        Commands::Decode { record, output } => {
            let record = read_record(&record)?;
            let output = match output {
                Some(path) => path,
                None => local_file_name(&record.file_name)?,
            };
            fs::write(&output, record.file_bytes()?)?;
            println!("Wrote {} ({} bytes)", output.display(), record.file_size);
        }
        Commands::Apply {
            record: path,
            operation,
            output,
        } => {
            let op: MeshOperation = operation.parse()?;
            let record = read_record(&path)?.apply_operation(op, &config)?;
            fs::write(output.as_deref().unwrap_or(&path), record.to_json()?)?;
        }
    }

    Ok(())
}

/// Merge `--params-json` and `--param key=value` pairs into one JSON object.
///
/// Values that parse as JSON keep their type; anything else is a string.
fn collect_params(pairs: &[String], json: Option<&str>) -> Result<Value> {
    let mut map = match json {
        Some(text) => {
            let value: Value = serde_json::from_str(text).context("parsing --params-json")?;
            match value {
                Value::Object(map) => map,
                other => bail!("--params-json must be a JSON object, got {other}"),
            }
        }
        None => Map::new(),
    };
    for pair in pairs {
        let Some((key, raw)) = pair.split_once('=') else {
            bail!("parameter `{pair}` is not KEY=VALUE");
        };
        let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
        map.insert(key.trim().to_string(), value);
    }
    Ok(Value::Object(map))
}

/// The final component of a stored file name, so a record cannot direct
/// writes outside the working directory.
fn local_file_name(file_name: &str) -> Result<PathBuf> {
    match Path::new(file_name).file_name() {
        Some(name) => Ok(PathBuf::from(name)),
        None => bail!("record file name `{file_name}` has no usable file name; pass --output"),
    }
}

fn file_type_of(path: &Path) -> Result<MeshFileType> {
    match MeshFileType::from_path(path) {
        Some(ty) => Ok(ty),
        None => bail!("cannot tell mesh format of {}", path.display()),
    }
}

fn read_mesh(path: &Path) -> Result<MeshGeometry> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let mesh = meshwork::format::parse_bytes_as(&bytes, file_type_of(path)?)
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(mesh)
}

fn read_record(path: &Path) -> Result<MeshRecord> {
    let json = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    Ok(MeshRecord::from_json(&json)?)
}

fn encode_file(path: &Path, name: Option<String>) -> Result<MeshRecord> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let file_name = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("mesh")
        .to_string();
    let file_type = file_type_of(path)?;
    let mut record =
        MeshRecord::from_upload(&file_name, file_type.extension(), &STANDARD.encode(bytes))?;
    if let Some(name) = name {
        record.name = name;
    }
    Ok(record)
}

fn emit(output: Option<&Path>, text: &str) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, text)?;
            info!(path = %path.display(), bytes = text.len(), "wrote output");
        }
        None => print!("{text}"),
    }
    Ok(())
}

fn show_info(file: &Path, json: bool) -> Result<()> {
    let mesh = read_mesh(file)?;
    let stats = mesh.stats();
    let tris = mesh.triangulate();
    let bounds = mesh.bounds();

    if json {
        let value = serde_json::json!({
            "file": file.display().to_string(),
            "vertices": stats.vertices,
            "faces": stats.faces,
            "triangles": tris.num_triangles(),
            "surfaceArea": tris.surface_area(),
            "bounds": bounds,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("mesh: {}", file.display());
    println!("  Vertices: {}", stats.vertices);
    println!("  Faces: {}", stats.faces);
    println!("  Triangles: {}", tris.num_triangles());
    println!("  Surface area: {:.6}", tris.surface_area());
    if let Some(b) = bounds {
        let size = b.size();
        println!(
            "  Bounds: [{}, {}, {}] .. [{}, {}, {}]",
            b.min.x, b.min.y, b.min.z, b.max.x, b.max.y, b.max.z
        );
        println!("  Size: {} x {} x {}", size.x, size.y, size.z);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_params_typed() {
        let v = collect_params(&["radius=2.5".into(), "subdivisions=2".into()], None).unwrap();
        assert_eq!(v, json!({ "radius": 2.5, "subdivisions": 2 }));
    }

    #[test]
    fn test_params_merge_over_json() {
        let v = collect_params(&["size=3".into()], Some(r#"{"size": 1, "x": true}"#)).unwrap();
        assert_eq!(v, json!({ "size": 3, "x": true }));
    }

    #[test]
    fn test_params_string_fallback() {
        let v = collect_params(&["size=big".into()], None).unwrap();
        assert_eq!(v, json!({ "size": "big" }));
    }

    #[test]
    fn test_params_rejects_bad_input() {
        assert!(collect_params(&["size".into()], None).is_err());
        assert!(collect_params(&[], Some("[1, 2]")).is_err());
        assert!(collect_params(&[], Some("{")).is_err());
    }

    #[test]
    fn test_record_file_name_stays_local() {
        assert_eq!(local_file_name("cube.obj").unwrap(), PathBuf::from("cube.obj"));
        assert_eq!(local_file_name("../x.obj").unwrap(), PathBuf::from("x.obj"));
        assert_eq!(local_file_name("/etc/a/b.obj").unwrap(), PathBuf::from("b.obj"));
        assert!(local_file_name("..").is_err());
        assert!(local_file_name("").is_err());
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from([
            "meshwork",
            "--config",
            "m.toml",
            "generate",
            "sphere",
            "-p",
            "radius=2",
            "-o",
            "s.obj",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("m.toml")));
        assert!(matches!(cli.command, Commands::Generate { ref kind, .. } if kind == "sphere"));
    }
}
