//! cvrender CLI - resume rendering tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;

use cvrender::{
    render_to_file, OutputFormat, PageSize, Pipeline, RenderConfig, ResumeContent, ThemeRegistry,
};

#[derive(Parser)]
#[command(name = "cvrender")]
#[command(version)]
#[command(about = "Render a resume to HTML, PDF, or Typst output", long_about = None)]
struct Cli {
    /// Input resume JSON file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output file
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render to HTML
    Html {
        /// Input resume JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Theme name
        #[arg(long, default_value = "default", env = "CVRENDER_THEME")]
        theme: String,

        /// Custom template file (overrides --theme)
        #[arg(long, value_name = "FILE")]
        template: Option<PathBuf>,
    },

    /// Render to PDF
    Pdf {
        /// Input resume JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (derived from input if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Theme name
        #[arg(long, default_value = "default", env = "CVRENDER_THEME")]
        theme: String,

        /// Custom template file (overrides --theme)
        #[arg(long, value_name = "FILE")]
        template: Option<PathBuf>,

        /// Page size for the built-in serializer
        #[arg(long, value_enum, default_value = "letter")]
        page_size: PageSizeArg,
    },

    /// Render through the Typst toolchain
    Typst {
        /// Input resume JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (derived from input if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// List bundled themes
    Themes,

    /// List registered output formats
    Formats,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum PageSizeArg {
    /// US Letter (612x792 pt)
    Letter,
    /// ISO A4 (595x842 pt)
    A4,
}

impl From<PageSizeArg> for PageSize {
    fn from(arg: PageSizeArg) -> Self {
        match arg {
            PageSizeArg::Letter => PageSize::Letter,
            PageSizeArg::A4 => PageSize::A4,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Html {
            input,
            output,
            theme,
            template,
        }) => cmd_html(&input, output.as_deref(), &theme, template.as_deref()),
        Some(Commands::Pdf {
            input,
            output,
            theme,
            template,
            page_size,
        }) => cmd_pdf(
            &input,
            output.as_deref(),
            &theme,
            template.as_deref(),
            page_size,
        ),
        Some(Commands::Typst { input, output }) => cmd_typst(&input, output.as_deref()),
        Some(Commands::Themes) => {
            cmd_themes();
            Ok(())
        }
        Some(Commands::Formats) => {
            cmd_formats();
            Ok(())
        }
        None => {
            // Default behavior: render to PDF if input is provided
            if let Some(input) = cli.input {
                cmd_pdf(
                    &input,
                    cli.output.as_deref(),
                    "default",
                    None,
                    PageSizeArg::Letter,
                )
            } else {
                println!("{}", "Usage: cvrender <FILE> [OUTPUT]".yellow());
                println!("       cvrender --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn load_resume(input: &Path) -> Result<ResumeContent, Box<dyn std::error::Error>> {
    let content = ResumeContent::from_json_file(input)?;
    if content.is_empty() {
        eprintln!("{}: resume has no content", "Warning".yellow());
    }
    Ok(content)
}

fn build_config(
    format: OutputFormat,
    theme: &str,
    template: Option<&Path>,
) -> Result<RenderConfig, Box<dyn std::error::Error>> {
    let mut config = RenderConfig::new().with_format(format).with_theme(theme);
    if let Some(path) = template {
        let text = fs::read_to_string(path)?;
        config = config.with_custom_template(text);
    }
    Ok(config)
}

fn cmd_html(
    input: &Path,
    output: Option<&Path>,
    theme: &str,
    template: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let content = load_resume(input)?;
    let config = build_config(OutputFormat::Html, theme, template)?;

    if let Some(path) = output {
        render_to_file(&content, &config, path)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        let bytes = cvrender::render(&content, &config)?;
        println!("{}", String::from_utf8_lossy(&bytes));
    }

    Ok(())
}

fn cmd_pdf(
    input: &Path,
    output: Option<&Path>,
    theme: &str,
    template: Option<&Path>,
    page_size: PageSizeArg,
) -> Result<(), Box<dyn std::error::Error>> {
    let content = load_resume(input)?;
    let config = build_config(OutputFormat::Pdf, theme, template)?
        .with_page_size(page_size.into());

    let path = output
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| input.with_extension("pdf"));

    render_to_file(&content, &config, &path)?;
    println!("{} {}", "Saved to".green(), path.display());

    Ok(())
}

fn cmd_typst(input: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let content = load_resume(input)?;
    let config = RenderConfig::new().with_format(OutputFormat::Typst);

    let path = output
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| input.with_extension("pdf"));

    render_to_file(&content, &config, &path)?;
    println!("{} {}", "Saved to".green(), path.display());

    Ok(())
}

fn cmd_themes() {
    println!("{}", "Bundled themes".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    for name in ThemeRegistry::new().names() {
        println!("  {}", name);
    }
}

fn cmd_formats() {
    println!("{}", "Output formats".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    for name in Pipeline::new().registry().formats() {
        println!("  {}", name);
    }
}
