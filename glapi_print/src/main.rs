////////////////////////////////////////////////////////////////////////////////////
// Copyright (c) 2019 DasEtwas - All Rights Reserved                               /
//      Unauthorized copying of this file, via any medium is strictly prohibited   /
//      Proprietary and confidential                                               /
////////////////////////////////////////////////////////////////////////////////////

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use glapi_generator::{
    description_path, AllProcs, DebugPrints, EnabledProcs, ForwardGenerator, ForwardTableGenerator, Generator,
    InlineForwardGenerator, InlineOptions, Naming, ProcInitGenerator, ProcPolicy, ProcPtrGenerator, Registry,
};

#[derive(Parser)]
#[command(name = "glapi_print")]
#[command(about = "Prints one GL dispatch layer fragment generated from gl_API.xml")]
#[command(version)]
struct Cli {
    /// Directory containing gl_API.xml
    #[arg(long, env = "GLAPI_PATH")]
    glapi_path: PathBuf,

    /// Write to this file instead of stdout; it is only rewritten when the content changed
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum NamingArg {
    Gl,
    Bare,
}

impl From<NamingArg> for Naming {
    fn from(arg: NamingArg) -> Naming {
        match arg {
            NamingArg::Gl => Naming::GlPrefixed,
            NamingArg::Bare => Naming::Bare,
        }
    }
}

/// Entry point selection shared by the pointer variable commands.
#[derive(Args)]
struct PtrArgs {
    /// Allow-list of entry points; without it every entry point is enabled
    #[arg(long)]
    enabled_procs: Option<PathBuf>,

    /// Spelling of the pointer variables
    #[arg(long, value_enum, default_value = "gl")]
    naming: NamingArg,
}

#[derive(Args)]
struct InlineArgs {
    /// Call GL_Interface::getCurrent() directly instead of checking iface->hasError()
    #[arg(long)]
    direct: bool,

    /// Allow-list of entry points; without it every entry point is enabled
    #[arg(long)]
    enabled_procs: Option<PathBuf>,

    /// Spelling of the called interface member [default: bare, or gl with --direct]
    #[arg(long, value_enum)]
    accessor_naming: Option<NamingArg>,
}

#[derive(Subcommand)]
enum Command {
    /// `forward_<ep>` definitions dispatching through current_GL_Interface()
    Forward {
        /// Print every call to std::cout
        #[arg(long)]
        trace_calls: bool,
    },
    /// `{"gl<ep>", &forward_<ep>}` lookup table records
    ForwardTable,
    /// Function pointer variable declarations
    ProcPtrs(PtrArgs),
    /// getProcAddress assignments for the pointer variables
    ProcInit(PtrArgs),
    /// Inline wrappers over the current interface
    InlineForwards(InlineArgs),
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let path = description_path(&cli.glapi_path);
    let registry = Registry::load(&path).with_context(|| format!("failed to load {}", path.display()))?;

    // generate everything up front so a failure never leaves half an artifact behind
    let out = match cli.command {
        Command::Forward { trace_calls } => {
            let debug_prints = if trace_calls {
                DebugPrints::FunctionCalls
            } else {
                DebugPrints::None
            };
            generate(&registry, ForwardGenerator { debug_prints })?
        },
        Command::ForwardTable => generate(&registry, ForwardTableGenerator)?,
        Command::ProcPtrs(args) => {
            let procs = load_procs(args.enabled_procs.as_deref())?;
            generate(&registry, ProcPtrGenerator::new(procs, args.naming.into()))?
        },
        Command::ProcInit(args) => {
            let procs = load_procs(args.enabled_procs.as_deref())?;
            generate(&registry, ProcInitGenerator::new(procs, args.naming.into()))?
        },
        Command::InlineForwards(args) => {
            let procs = load_procs(args.enabled_procs.as_deref())?;
            let mut options = if args.direct {
                InlineOptions::direct()
            } else {
                InlineOptions::checked()
            };
            if let Some(naming) = args.accessor_naming {
                options.accessor_naming = naming.into();
            }
            generate(&registry, InlineForwardGenerator::new(procs, options))?
        },
    };

    match &cli.output {
        Some(dest) => write_if_changed(dest, &out),
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            lock.write_all(&out)?;
            lock.flush()?;
            Ok(())
        },
    }
}

fn load_procs(path: Option<&Path>) -> Result<Box<dyn ProcPolicy>> {
    Ok(match path {
        Some(path) => Box::new(EnabledProcs::load(path)?),
        None => Box::new(AllProcs),
    })
}

fn generate<G>(registry: &Registry, generator: G) -> Result<Vec<u8>>
where G: Generator {
    let mut out = Vec::new();
    registry.write_bindings(generator, &mut out)?;
    Ok(out)
}

/// Replaces `dest` only if its content differs from `content`, so builds depending on it are
/// not retriggered.
fn write_if_changed(dest: &Path, content: &[u8]) -> Result<()> {
    if let Ok(existing) = fs::read(dest) {
        if existing == content {
            log::debug!("{} is up to date", dest.display());
            return Ok(());
        }
    }

    if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("failed to create {}", parent.display()))?;
    }

    fs::write(dest, content).with_context(|| format!("failed to write {}", dest.display()))?;
    log::info!("wrote {}", dest.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, SystemTime};

    use clap::CommandFactory;

    use super::*;

    fn fixtures() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../glapi_generator/tests/fixtures")
    }

    fn backdate(path: &Path) -> SystemTime {
        let old = SystemTime::UNIX_EPOCH + Duration::from_secs(1_000_000);
        fs::File::options().write(true).open(path).unwrap().set_modified(old).unwrap();
        old
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn identical_content_is_not_rewritten() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("gl_p_proc.inc");
        fs::write(&dest, "void GLAPIENTRY (*glClear) (GLbitfield) = 0;\n").unwrap();
        let old = backdate(&dest);

        write_if_changed(&dest, b"void GLAPIENTRY (*glClear) (GLbitfield) = 0;\n").unwrap();

        assert_eq!(fs::metadata(&dest).unwrap().modified().unwrap(), old);
    }

    #[test]
    fn changed_content_is_rewritten() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("gl_p_proc.inc");
        fs::write(&dest, "stale\n").unwrap();
        let old = backdate(&dest);

        write_if_changed(&dest, b"fresh\n").unwrap();

        assert_eq!(fs::read_to_string(&dest).unwrap(), "fresh\n");
        assert_ne!(fs::metadata(&dest).unwrap().modified().unwrap(), old);
    }

    #[test]
    fn creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("_generated").join("gl_forward.inc");

        write_if_changed(&dest, b"x\n").unwrap();

        assert_eq!(fs::read(&dest).unwrap(), b"x\n");
    }

    #[test]
    fn missing_description_fails_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("gl_forward_table.inc");
        let cli = Cli {
            glapi_path: dir.path().to_path_buf(),
            output: Some(dest.clone()),
            command: Command::ForwardTable,
        };

        let err = run(cli).unwrap_err();

        assert!(!dest.exists());
        let message = format!("{:#}", err);
        assert!(message.contains(&dir.path().join("gl_API.xml").display().to_string()), "{}", message);
    }

    #[test]
    fn writes_filtered_pointer_declarations() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("gl_p_proc.inc");
        let cli = Cli::try_parse_from(vec![
            "glapi_print".to_owned(),
            "--glapi-path".to_owned(),
            fixtures().display().to_string(),
            "--output".to_owned(),
            dest.display().to_string(),
            "proc-ptrs".to_owned(),
            "--enabled-procs".to_owned(),
            fixtures().join("enabled_procs.txt").display().to_string(),
            "--naming".to_owned(),
            "bare".to_owned(),
        ])
        .unwrap();

        run(cli).unwrap();

        assert_eq!(
            fs::read_to_string(&dest).unwrap(),
            "void GLAPIENTRY (*Clear) (GLbitfield) = 0;
GLboolean GLAPIENTRY (*IsEnabled) (GLenum) = 0;
void GLAPIENTRY (*BlendEquationEXT) (GLenum) = 0;
"
        );
    }

    #[test]
    fn checked_wrappers_accept_gl_prefixed_accessors() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("gl_inline.inc");
        let cli = Cli::try_parse_from(vec![
            "glapi_print".to_owned(),
            "--glapi-path".to_owned(),
            fixtures().display().to_string(),
            "-o".to_owned(),
            dest.display().to_string(),
            "inline-forwards".to_owned(),
            "--accessor-naming".to_owned(),
            "gl".to_owned(),
        ])
        .unwrap();

        run(cli).unwrap();

        let out = fs::read_to_string(&dest).unwrap();
        assert!(out.contains("  iface->glClear(mask);\n  assert(!iface->hasError());"), "{}", out);
    }

    #[test]
    fn selection_flags_are_rejected_where_they_have_no_effect() {
        for command in &["forward", "forward-table"] {
            for flag in &[["--naming", "bare"], ["--enabled-procs", "procs.txt"]] {
                let args = vec!["glapi_print", "--glapi-path", "/tmp", *command, flag[0], flag[1]];
                assert!(Cli::try_parse_from(args).is_err(), "{} {}", command, flag[0]);
            }
        }
    }
}
