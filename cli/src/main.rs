mod test_runner;

use std::path::Path;
use std::process;

use clap::{Parser, Subcommand};
use codespan_reporting::diagnostic::{Diagnostic, Severity};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};

use customblocks::{ConvertError, ExtensionConfig};

const SUBCOMMANDS: &[&str] = &["render", "test", "help"];

#[derive(Parser)]
#[command(name = "customblocks", version, about = "Markdown with custom blocks to HTML")]
struct Cli {
    /// Disable colored diagnostics
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a Markdown file to HTML
    Render(RenderArgs),

    /// Run .test.md test files
    Test(TestArgs),
}

#[derive(clap::Args)]
struct RenderArgs {
    /// Markdown source file
    #[arg(required_unless_present = "list_types")]
    file: Option<String>,

    /// TOML extension config (generator overrides, fallback, generator settings)
    #[arg(short, long)]
    config: Option<String>,

    /// Write the HTML here instead of stdout
    #[arg(short, long)]
    output: Option<String>,

    /// Dump the element tree instead of HTML
    #[arg(long)]
    tree: bool,

    /// List the block types with a generator of their own and exit
    #[arg(long)]
    list_types: bool,

    /// Fail when the conversion reports any warning
    #[arg(long)]
    deny_warnings: bool,
}

#[derive(clap::Args)]
struct TestArgs {
    /// Path to a .test.md file or directory containing them
    path: String,

    /// Run only tests in these categories (subfolder names). Repeatable.
    #[arg(short, long)]
    category: Vec<String>,

    /// List available categories and exit
    #[arg(long)]
    list_categories: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // If the first positional arg is not a known subcommand, inject "render"
    // so `customblocks doc.md` works like `customblocks render doc.md`.
    let mut args: Vec<String> = std::env::args().collect();
    let first_pos = args
        .iter()
        .enumerate()
        .skip(1)
        .find(|(_, a)| !a.starts_with('-'))
        .map(|(pos, a)| (pos, a.clone()));
    if let Some((pos, first_pos)) = first_pos {
        if !SUBCOMMANDS.contains(&first_pos.as_str()) {
            args.insert(pos, "render".to_string());
        }
    }

    let cli = Cli::parse_from(&args);

    match cli.command {
        Command::Render(render_args) => do_render(render_args, cli.no_color),
        Command::Test(test_args) => {
            let path = Path::new(&test_args.path);
            if test_args.list_categories {
                test_runner::list_categories(path);
                return;
            }
            let exit_code = test_runner::run_tests(path, cli.no_color, &test_args.category);
            process::exit(exit_code);
        }
    }
}

fn do_render(args: RenderArgs, no_color: bool) {
    let color_choice = if no_color {
        ColorChoice::Never
    } else {
        ColorChoice::Auto
    };

    let config = match &args.config {
        Some(config_path) => match load_config(config_path) {
            Ok(config) => config,
            Err(message) => {
                eprintln!("error: {}", message);
                process::exit(1);
            }
        },
        None => ExtensionConfig::default(),
    };

    let converter = generators::converter(&config);

    if args.list_types {
        for block_type in converter.registry().types() {
            println!("{}", block_type);
        }
        println!("(any other type uses the fallback)");
        return;
    }

    let file = args.file.unwrap_or_default();
    let source = match std::fs::read_to_string(&file) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: cannot read '{}': {}", file, e);
            process::exit(1);
        }
    };

    let mut files = SimpleFiles::new();
    files.add(file, source.clone());

    let writer = StandardStream::stderr(color_choice);
    let term_config = term::Config::default();

    let conversion = match converter.convert(&source) {
        Ok(conversion) => conversion,
        Err(error) => {
            emit_error(&writer, &term_config, &files, &error);
            process::exit(1);
        }
    };

    for warning in &conversion.diagnostics {
        let _ = term::emit_to_write_style(
            &mut writer.lock(),
            &term_config,
            &files,
            &warning.to_report(),
        );
    }
    if args.deny_warnings && !conversion.diagnostics.is_empty() {
        eprintln!(
            "error: {} warning(s) with --deny-warnings",
            conversion.diagnostics.len()
        );
        process::exit(1);
    }

    let rendered = if args.tree {
        format!("{:#?}", conversion.root)
    } else {
        conversion.html
    };

    match &args.output {
        Some(output) => {
            if let Err(e) = std::fs::write(output, rendered + "\n") {
                eprintln!("error: cannot write '{}': {}", output, e);
                process::exit(1);
            }
        }
        None => println!("{}", rendered),
    }
}

fn load_config(path: &str) -> Result<ExtensionConfig, String> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read config '{}': {}", path, e))?;
    log::debug!("loading extension config from {}", path);
    ExtensionConfig::from_toml(&text).map_err(|e| format!("invalid config '{}': {}", path, e))
}

fn emit_error(
    writer: &StandardStream,
    config: &term::Config,
    files: &SimpleFiles<String, String>,
    error: &ConvertError,
) {
    let notes = match error {
        ConvertError::Resolve(_) => {
            vec!["check the generator references in the extension config".to_string()]
        }
        _ => Vec::new(),
    };
    let diagnostic = Diagnostic::new(Severity::Error)
        .with_message(error.to_string())
        .with_notes(notes);
    let _ = term::emit_to_write_style(&mut writer.lock(), config, files, &diagnostic);
}
