//! INCAR CLI tool
//!
//! Examples:
//!   incar INCAR                     - list tags as `TAG = value`
//!   incar INCAR --get encut         - print one value
//!   incar INCAR --json-out -        - tags as JSON on stdout
//!   incar INCAR --in-place --nested - normalize the file, grouping tags
//!   incar -                         - read from stdin

use std::io::{self, Read};
use std::path::Path;

use facet::Facet;
use figue as args;
use incar_tree::{FormatOptions, Incar, IncarError, Tags};
use tracing::{debug, info};

// ============================================================================
// Exit codes
// ============================================================================

const EXIT_SUCCESS: i32 = 0;
const EXIT_USAGE_ERROR: i32 = 1;
const EXIT_MISSING_TAG: i32 = 2;
const EXIT_IO_ERROR: i32 = 3;

// ============================================================================
// CLI arguments
// ============================================================================

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// `incar <file> [options]`
#[derive(Facet, Debug, Default)]
struct FileArgs {
    /// Input file path (or "-" for stdin)
    #[facet(args::positional)]
    input: String,

    /// Write normalized INCAR text to file (or "-" for stdout)
    #[facet(args::named, args::short = 'o', default)]
    output: Option<String>,

    /// Output as JSON to file (or "-" for stdout)
    #[facet(args::named, default)]
    json_out: Option<String>,

    /// Normalize the input file in place
    #[facet(args::named, default)]
    in_place: bool,

    /// Write tags sharing a prefix inside `group { ... }` blocks
    #[facet(args::named, default)]
    nested: bool,

    /// Write `TAG=value` without spaces
    #[facet(args::named, default)]
    compact: bool,

    /// Print the value of a single tag
    #[facet(args::named, default)]
    get: Option<String>,
}

impl FileArgs {
    fn format_options(&self) -> FormatOptions {
        let mut options = FormatOptions::default();
        if self.nested {
            options = options.nested();
        }
        if self.compact {
            options = options.compact();
        }
        options
    }
}

fn main() {
    init_logging();
    let raw_args: Vec<String> = std::env::args().skip(1).collect();

    if raw_args.is_empty() {
        print_help();
        std::process::exit(EXIT_USAGE_ERROR);
    }

    if raw_args[0] == "--version" || raw_args[0] == "-V" {
        println!("incar {VERSION}");
        std::process::exit(EXIT_SUCCESS);
    }

    if raw_args[0] == "--help" || raw_args[0] == "-h" {
        print_help();
        std::process::exit(EXIT_SUCCESS);
    }

    match run(&raw_args) {
        Ok(()) => std::process::exit(EXIT_SUCCESS),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}

fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_help() {
    eprintln!("incar {VERSION} - read and normalize VASP INCAR files\n");
    eprintln!("USAGE:");
    eprintln!("    incar <file> [options]          Read an INCAR file ('-' for stdin)\n");
    eprintln!("OPTIONS:");
    eprintln!("        --get <TAG>                 Print the value of one tag");
    eprintln!("        --json-out <FILE>           Output as JSON (use '-' for stdout)");
    eprintln!("    -o, --output <FILE>             Write normalized INCAR text");
    eprintln!("        --in-place                  Normalize the input file in place");
    eprintln!("        --nested                    Group shared prefixes into blocks");
    eprintln!("        --compact                   No spaces around '='");
    eprintln!("    -V, --version                   Show version");
    eprintln!("    -h, --help                      Show this help\n");
    eprintln!("EXIT CODES:");
    eprintln!("    0 success, 1 usage error, 2 tag not found, 3 I/O error\n");
    eprintln!("    Set RUST_LOG=debug to log file access.");
}

fn run(args: &[String]) -> Result<(), CliError> {
    let args_strs: Vec<&str> = args.iter().map(|s| s.as_str()).collect();
    let opts: FileArgs =
        figue::from_slice(&args_strs).map_err(|e| CliError::Usage(format!("{e}")))?;
    run_file(&opts)
}

fn run_file(opts: &FileArgs) -> Result<(), CliError> {
    check_options(opts)?;

    let mut input = open_input(&opts.input)?;
    let tags = input.tags()?;
    debug!(tags = tags.len(), "parsed input");

    if let Some(tag) = &opts.get {
        return match tags.get(tag) {
            Some(value) => {
                println!("{value}");
                Ok(())
            }
            None => Err(CliError::MissingTag(tag.clone())),
        };
    }

    if let Some(json_path) = &opts.json_out {
        let json = tags_to_json(&tags);
        let output =
            serde_json::to_string_pretty(&json).map_err(|e| CliError::Io(io::Error::other(e)))?;
        return write_output(json_path, &format!("{output}\n"));
    }

    if opts.in_place {
        input.write_tags(&tags, opts.format_options())?;
        info!(path = %opts.input, "normalized in place");
        return Ok(());
    }

    if let Some(output) = &opts.output {
        let mut target = open_output(output);
        target.write_tags(&tags, opts.format_options())?;
        if target.path().is_none() {
            print!("{}", target.read()?);
        }
        return Ok(());
    }

    print!("{}", list_tags(&tags));
    Ok(())
}

fn check_options(opts: &FileArgs) -> Result<(), CliError> {
    if opts.in_place && opts.input == "-" {
        return Err(CliError::Usage("--in-place cannot be used with stdin".into()));
    }
    if opts.in_place && opts.output.is_some() {
        return Err(CliError::Usage("--in-place cannot be combined with --output".into()));
    }
    let outputs = [
        opts.get.is_some(),
        opts.json_out.is_some(),
        opts.in_place || opts.output.is_some(),
    ];
    if outputs.iter().filter(|&&set| set).count() > 1 {
        return Err(CliError::Usage(
            "choose one of --get, --json-out and --output/--in-place".into(),
        ));
    }
    if let Some(output) = &opts.output
        && opts.input != "-"
        && output != "-"
        && is_same_file(&opts.input, output)
    {
        return Err(CliError::Usage(
            "input and output are the same file\nhint: use --in-place to modify in place".into(),
        ));
    }
    Ok(())
}

fn is_same_file(a: &str, b: &str) -> bool {
    match (Path::new(a).canonicalize(), Path::new(b).canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// One `TAG = value` line per tag, sorted by tag.
fn list_tags(tags: &Tags) -> String {
    tags.iter()
        .map(|(tag, value)| format!("{tag} = {value}\n"))
        .collect()
}

fn tags_to_json(tags: &Tags) -> serde_json::Value {
    let map: serde_json::Map<String, serde_json::Value> = tags
        .iter()
        .map(|(tag, value)| (tag.to_string(), serde_json::Value::String(value.to_string())))
        .collect();
    serde_json::Value::Object(map)
}

// ============================================================================
// Error handling
// ============================================================================

#[derive(Debug)]
enum CliError {
    Io(io::Error),
    Usage(String),
    MissingTag(String),
    Incar(IncarError),
}

impl CliError {
    fn exit_code(&self) -> i32 {
        match self {
            CliError::Io(_) => EXIT_IO_ERROR,
            CliError::Usage(_) => EXIT_USAGE_ERROR,
            CliError::MissingTag(_) => EXIT_MISSING_TAG,
            CliError::Incar(IncarError::Io { .. }) => EXIT_IO_ERROR,
            CliError::Incar(IncarError::Format(_)) => EXIT_USAGE_ERROR,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "{e}"),
            CliError::Usage(e) => write!(f, "{e}"),
            CliError::MissingTag(tag) => write!(f, "tag '{}' not found", tag.to_uppercase()),
            CliError::Incar(e) => write!(f, "{e}"),
        }
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        CliError::Io(e)
    }
}

impl From<IncarError> for CliError {
    fn from(e: IncarError) -> Self {
        CliError::Incar(e)
    }
}

// ============================================================================
// I/O helpers
// ============================================================================

/// The input file; stdin is read into memory.
fn open_input(path: &str) -> Result<Incar, CliError> {
    if path != "-" {
        return Ok(Incar::from_path(path));
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    debug!(bytes = buf.len(), "read stdin");
    Ok(Incar::from_string(&buf, None)?)
}

/// The INCAR output target; "-" collects the text in memory for stdout.
fn open_output(path: &str) -> Incar {
    if path == "-" {
        Incar::in_memory()
    } else {
        Incar::from_path(path)
    }
}

/// Write JSON output to a file, or stdout for "-".

fn write_output(path: &str, content: &str) -> Result<(), CliError> {
    if path == "-" {
        print!("{content}");
        return Ok(());
    }
    std::fs::write(path, content)
        .map_err(|e| CliError::Io(io::Error::new(e.kind(), format!("{path}: {e}"))))?;
    info!(path, bytes = content.len(), "wrote output");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use facet_testhelpers::test;

    fn file_args(input: &str) -> FileArgs {
        FileArgs {
            input: input.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_list_tags() {
        let tags = Tags::parse("nsw = 50\nencut = 520 # eV\nrelax { ibrion = 2 }");
        assert_eq!(
            list_tags(&tags),
            "ENCUT = 520\nNSW = 50\nRELAX/IBRION = 2\n"
        );
    }

    #[test]
    fn test_tags_to_json() {
        let tags = Tags::parse("system = \"Si\nbulk\"\nencut = 520");
        let json = tags_to_json(&tags);
        assert_eq!(
            json,
            serde_json::json!({ "ENCUT": "520", "SYSTEM": "Si\nbulk" })
        );
    }

    #[test]
    fn test_parse_args() {
        let opts: FileArgs =
            figue::from_slice(&["INCAR", "--nested", "--json-out", "-"]).unwrap();
        assert_eq!(opts.input, "INCAR");
        assert!(opts.nested);
        assert_eq!(opts.json_out.as_deref(), Some("-"));
        assert_eq!(opts.get, None);
        assert!(!opts.in_place);
    }

    #[test]
    fn test_format_options() {
        let mut opts = file_args("INCAR");
        assert!(!opts.format_options().nest_groups);
        opts.nested = true;
        opts.compact = true;
        let options = opts.format_options();
        assert!(options.nest_groups);
        assert!(options.compact);
    }

    #[test]
    fn test_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("INCAR");
        std::fs::write(&path, "relax { nsw = 50; ibrion = 2 } # relaxation\nencut = 520\n")
            .unwrap();

        let mut opts = file_args(path.to_str().unwrap());
        opts.in_place = true;
        opts.nested = true;
        run_file(&opts).unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "ENCUT = 520\nRELAX {\n    IBRION = 2\n    NSW = 50\n}\n"
        );
    }

    #[test]
    fn test_output_file_and_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("INCAR");
        let output = dir.path().join("INCAR.out");
        let json = dir.path().join("incar.json");
        std::fs::write(&input, "encut = 520; ismear = 0").unwrap();

        let mut opts = file_args(input.to_str().unwrap());
        opts.output = Some(output.to_str().unwrap().to_string());
        opts.compact = true;
        run_file(&opts).unwrap();
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "ENCUT=520\nISMEAR=0\n");

        let mut opts = file_args(input.to_str().unwrap());
        opts.json_out = Some(json.to_str().unwrap().to_string());
        run_file(&opts).unwrap();
        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&json).unwrap()).unwrap();
        assert_eq!(written, serde_json::json!({ "ENCUT": "520", "ISMEAR": "0" }));
    }

    #[test]
    fn test_missing_tag() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("INCAR");
        std::fs::write(&path, "encut = 520").unwrap();

        let mut opts = file_args(path.to_str().unwrap());
        opts.get = Some("nsw".to_string());
        let err = run_file(&opts).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_MISSING_TAG);
        assert_eq!(err.to_string(), "tag 'NSW' not found");
    }

    #[test]
    fn test_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing");
        let err = run_file(&file_args(path.to_str().unwrap())).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_IO_ERROR);
    }

    #[test]
    fn test_output_targets() {
        assert_eq!(open_output("-").path(), None);
        assert_eq!(
            open_output("INCAR.out").path(),
            Some(Path::new("INCAR.out"))
        );

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("INCAR");
        std::fs::write(&path, "encut = 520").unwrap();
        let mut opts = file_args(path.to_str().unwrap());
        opts.output = Some("-".to_string());
        run_file(&opts).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "encut = 520");
    }

    #[test]
    fn test_file_errors_exit_with_io_code() {
        let dir = tempfile::tempdir().unwrap();
        let mut opts = file_args(dir.path().join("INCAR").to_str().unwrap());
        opts.in_place = true;
        let err = run_file(&opts).unwrap_err();
        assert!(matches!(err, CliError::Incar(IncarError::Io { .. })));
        assert_eq!(err.exit_code(), EXIT_IO_ERROR);
    }

    #[test]
    fn test_usage_errors() {
        let mut opts = file_args("-");
        opts.in_place = true;
        assert_eq!(check_options(&opts).unwrap_err().exit_code(), EXIT_USAGE_ERROR);

        let mut opts = file_args("INCAR");
        opts.get = Some("ENCUT".to_string());
        opts.json_out = Some("-".to_string());
        assert_eq!(check_options(&opts).unwrap_err().exit_code(), EXIT_USAGE_ERROR);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("INCAR");
        std::fs::write(&path, "").unwrap();
        let mut opts = file_args(path.to_str().unwrap());
        opts.output = Some(path.to_str().unwrap().to_string());
        assert!(check_options(&opts).is_err());
    }
}
