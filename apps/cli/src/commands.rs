//! CLI command definitions, routing, and tracing setup.

use std::io::Read;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;

use coursecraft_curriculum::analyze;
use coursecraft_shared::{
    AnalysisReport, AppConfig, CoursecraftError, CourseInfo, config_file_path, init_config,
    load_config,
};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// coursecraft — turn a course outline into a validated curriculum.
#[derive(Parser)]
#[command(
    name = "coursecraft",
    version,
    about = "Parse course outlines, score their structure, and plan a learning path.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Report output format.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Analyze a course outline and print the validation + learning path.
    Analyze {
        /// Outline file to analyze, or `-` to read from stdin.
        outline: String,

        /// Course title (used for coverage scoring).
        #[arg(short, long)]
        title: String,

        /// Planned course duration in minutes (defaults from config).
        #[arg(short, long)]
        duration: Option<u32>,

        /// Target audience (echoed into the report).
        #[arg(long)]
        audience: Option<String>,

        /// Speaking tone (echoed into the report).
        #[arg(long)]
        tone: Option<String>,

        /// Output format: text summary or full JSON report.
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// Also write the full JSON report to this path.
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "coursecraft=info",
        1 => "coursecraft=debug",
        _ => "coursecraft=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt().with_env_filter(env_filter).with_target(false).init();
        }
        LogFormat::Json => {
            fmt().json().with_env_filter(env_filter).init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Analyze {
            outline,
            title,
            duration,
            audience,
            tone,
            format,
            out,
        } => cmd_analyze(
            &outline,
            &title,
            duration,
            audience.as_deref(),
            tone.as_deref(),
            format,
            out.as_deref(),
        ),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(),
        },
    }
}

// ---------------------------------------------------------------------------
// analyze
// ---------------------------------------------------------------------------

fn cmd_analyze(
    outline: &str,
    title: &str,
    duration: Option<u32>,
    audience: Option<&str>,
    tone: Option<&str>,
    format: Option<OutputFormat>,
    out: Option<&std::path::Path>,
) -> Result<()> {
    let config = load_config()?;

    // CLI flags override config values, which override defaults.
    let course = CourseInfo {
        title: title.to_string(),
        target_audience: audience
            .map(String::from)
            .unwrap_or_else(|| config.defaults.target_audience.clone()),
        duration: duration.or(Some(config.defaults.duration)),
        tone: tone
            .map(String::from)
            .unwrap_or_else(|| config.defaults.tone.clone()),
    };

    let format = format.unwrap_or(match config.defaults.format.as_str() {
        "json" => OutputFormat::Json,
        _ => OutputFormat::Text,
    });

    let text = read_outline(outline)?;

    info!(
        title,
        duration = course.effective_duration(),
        bytes = text.len(),
        "analyzing outline"
    );

    let report = analyze(&text, &course);

    if let Some(path) = out {
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(path, json).map_err(|e| CoursecraftError::io(path, e))?;
        info!(?path, "report written");
    }

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => print_summary(&report),
    }

    Ok(())
}

/// Read the outline text from a file path or stdin (`-`), failing fast
/// on non-UTF-8 input rather than silently coercing.
fn read_outline(source: &str) -> Result<String> {
    let bytes = if source == "-" {
        let mut buf = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buf)
            .map_err(|e| CoursecraftError::io("<stdin>", e))?;
        buf
    } else {
        std::fs::read(source).map_err(|e| CoursecraftError::io(source, e))?
    };

    String::from_utf8(bytes).map_err(|_| {
        CoursecraftError::invalid_input(format!("outline at '{source}' is not valid UTF-8")).into()
    })
}

/// Print the human-readable analysis summary.
fn print_summary(report: &AnalysisReport) {
    println!();
    println!("  Outline analyzed successfully!");
    println!("  ID:         {}", report.id);
    println!("  Course:     {}", report.course.title);
    println!("  Sections:   {}", report.total_sections);
    println!("  MECE score: {:.1} / 100", report.validation.mece_score);
    println!(
        "  Est. time:  {} min (requested {})",
        report.learning_path.estimated_total_duration,
        report.course.effective_duration()
    );

    if !report.key_topics.is_empty() {
        println!();
        println!("  Key topics:");
        for topic in &report.key_topics {
            println!("    - {topic}");
        }
    }

    if !report.validation.issues.is_empty() {
        println!();
        println!("  Issues:");
        for issue in &report.validation.issues {
            println!("    - {issue}");
        }
    }

    if !report.validation.suggestions.is_empty() {
        println!();
        println!("  Suggestions:");
        for suggestion in &report.validation.suggestions {
            println!("    - {suggestion}");
        }
    }

    if !report.learning_path.items.is_empty() {
        println!();
        println!("  Learning path:");
        for (i, item) in report.learning_path.items.iter().enumerate() {
            println!(
                "    {}. {} ({} min, complexity {:.1})",
                i + 1,
                item.title,
                item.duration,
                item.complexity
            );
        }
    }

    println!();
}

// ---------------------------------------------------------------------------
// config
// ---------------------------------------------------------------------------

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config file created at {}", path.display());
    Ok(())
}

fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let path = config_file_path()?;

    let rendered =
        toml::to_string_pretty(&config).map_err(|e| CoursecraftError::config(e.to_string()))?;

    println!("# resolved config ({})", path.display());
    println!("{rendered}");
    Ok(())
}
