//! mdocx CLI - lesson-plan Markdown to Word converter

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use mdocx::{
    convert, AssemblyStats, ConvertOptions, JsonFormat, LessonMetadata, Mdocx, NormalizeRule,
    Normalizer, Theme,
};

/// Per-input outcome of a batch: the written path and its statistics.
type BatchResult = (PathBuf, mdocx::Result<(PathBuf, AssemblyStats)>);

#[derive(Parser)]
#[command(name = "mdocx")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Convert lesson-plan Markdown to Word documents", long_about = None)]
struct Cli {
    /// Input Markdown file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output .docx file
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Lesson metadata JSON (adds cover page and signature footer)
    #[arg(long, value_name = "JSON")]
    metadata: Option<PathBuf>,

    /// Colour theme
    #[arg(long, env = "MDOCX_THEME")]
    theme: Option<String>,

    /// Normalize math delimiters, fractions and spacing first
    #[arg(long)]
    normalize: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert Markdown files to .docx
    Convert {
        /// Input Markdown files
        #[arg(value_name = "FILE", required = true, num_args = 1..)]
        inputs: Vec<PathBuf>,

        /// Output file (single input) or directory (several inputs)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Lesson metadata JSON (adds cover page and signature footer)
        #[arg(long, value_name = "JSON")]
        metadata: Option<PathBuf>,

        /// Colour theme
        #[arg(long, env = "MDOCX_THEME")]
        theme: Option<String>,

        /// Normalize math delimiters, fractions and spacing first
        #[arg(long)]
        normalize: bool,

        /// Academic year start printed on the cover page
        #[arg(long)]
        year: Option<i32>,
    },

    /// Rewrite math delimiters, fractions and spacing in a Markdown file
    Normalize {
        /// Input Markdown file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Rules to apply
        #[arg(long, value_enum, default_value = "all")]
        rule: RuleChoice,

        /// Compose decomposed diacritics first
        #[arg(long)]
        nfc: bool,
    },

    /// Dump the assembled document tree as JSON
    Json {
        /// Input Markdown file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Lesson metadata JSON
        #[arg(long, value_name = "JSON")]
        metadata: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show document statistics
    Info {
        /// Input Markdown file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Lesson metadata JSON
        #[arg(long, value_name = "JSON")]
        metadata: Option<PathBuf>,
    },

    /// List colour themes
    Themes,

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum RuleChoice {
    /// Bracket and paren math to dollars
    Delimiters,
    /// Slash fractions to \frac
    Fractions,
    /// Spacing around = and blank-line runs
    Whitespace,
    /// All rules (default)
    All,
}

impl From<RuleChoice> for NormalizeRule {
    fn from(choice: RuleChoice) -> Self {
        match choice {
            RuleChoice::Delimiters => NormalizeRule::Delimiters,
            RuleChoice::Fractions => NormalizeRule::Fractions,
            RuleChoice::Whitespace => NormalizeRule::Whitespace,
            RuleChoice::All => NormalizeRule::All,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Convert {
            inputs,
            output,
            metadata,
            theme,
            normalize,
            year,
        }) => cmd_convert(
            &inputs,
            output.as_deref(),
            metadata.as_deref(),
            theme.as_deref(),
            normalize,
            year,
        ),
        Some(Commands::Normalize {
            input,
            output,
            rule,
            nfc,
        }) => cmd_normalize(&input, output.as_deref(), rule, nfc),
        Some(Commands::Json {
            input,
            output,
            metadata,
            compact,
        }) => cmd_json(&input, output.as_deref(), metadata.as_deref(), compact),
        Some(Commands::Info { input, metadata }) => cmd_info(&input, metadata.as_deref()),
        Some(Commands::Themes) => {
            cmd_themes();
            Ok(())
        }
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: convert if input is provided
            if let Some(input) = cli.input {
                cmd_convert(
                    &[input],
                    cli.output.as_deref(),
                    cli.metadata.as_deref(),
                    cli.theme.as_deref(),
                    cli.normalize,
                    None,
                )
            } else {
                println!("{}", "Usage: mdocx <FILE> [OUTPUT]".yellow());
                println!("       mdocx --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn load_metadata(path: Option<&Path>) -> mdocx::Result<Option<LessonMetadata>> {
    path.map(LessonMetadata::from_json_file).transpose()
}

/// Single inputs default to the export kind's file name next to the input;
/// batch inputs are named after their stem.
fn output_path(input: &Path, output: Option<&Path>, batch: bool, default_name: &str) -> PathBuf {
    match (output, batch) {
        (Some(file), false) => file.to_path_buf(),
        (None, false) => input.with_file_name(default_name),
        (dir, true) => {
            let stem = input.file_stem().unwrap_or_default();
            let name = PathBuf::from(stem).with_extension("docx");
            match dir {
                Some(dir) => dir.join(name),
                None => input.with_file_name(name),
            }
        }
    }
}

fn cmd_convert(
    inputs: &[PathBuf],
    output: Option<&Path>,
    metadata: Option<&Path>,
    theme: Option<&str>,
    normalize: bool,
    year: Option<i32>,
) -> Result<(), Box<dyn std::error::Error>> {
    let metadata = load_metadata(metadata)?;

    let mut options = ConvertOptions::new();
    if let Some(key) = theme {
        options = options.with_theme_name(key)?;
    }
    if normalize {
        options = options.normalized();
    }
    if let Some(year) = year {
        options.assemble = options.assemble.with_academic_year(year);
    }

    let batch = inputs.len() > 1;
    if batch {
        if let Some(dir) = output {
            fs::create_dir_all(dir)?;
        }
    }

    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );
    pb.set_message("Converting...");

    let results: Vec<BatchResult> = inputs
        .par_iter()
        .map(|input| {
            let result = fs::read_to_string(input)
                .map_err(mdocx::Error::from)
                .and_then(|text| convert(&text, metadata.as_ref(), &options))
                .and_then(|converted| {
                    let target = output_path(input, output, batch, &converted.file_name);
                    log::debug!(
                        "{}: {} bytes, {} words",
                        input.display(),
                        converted.content_len(),
                        converted.stats.word_count
                    );
                    converted
                        .write_to(&target)
                        .map(|_| (target, converted.stats))
                });
            pb.inc(1);
            (input.clone(), result)
        })
        .collect();

    pb.finish_with_message("Done!");

    let mut failed = 0;
    println!("\n{}", "Output files:".green().bold());
    for (input, result) in &results {
        match result {
            Ok((path, _)) => println!("  {} {}", "├─".dimmed(), path.display()),
            Err(e) => {
                failed += 1;
                println!("  {} {}: {}", "├─".dimmed(), input.display(), e.to_string().red());
            }
        }
    }

    if batch {
        let totals = batch_totals(&results);
        println!(
            "\n{} {} words, {} tables, {} equations",
            "Total:".green().bold(),
            totals.word_count,
            totals.table_count,
            totals.math_count
        );
    }

    if failed > 0 {
        return Err(format!("{} of {} files failed", failed, results.len()).into());
    }
    Ok(())
}

/// Sum the statistics of every successful conversion.
fn batch_totals(results: &[BatchResult]) -> AssemblyStats {
    results
        .iter()
        .filter_map(|(_, result)| result.as_ref().ok())
        .fold(AssemblyStats::new(), |mut totals, (_, stats)| {
            totals.merge(stats);
            totals
        })
}

fn cmd_normalize(
    input: &Path,
    output: Option<&Path>,
    rule: RuleChoice,
    nfc: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let text = fs::read_to_string(input)?;
    let normalizer = Normalizer::new(
        mdocx::NormalizeOptions::from_rule(rule.into()).with_unicode_nfc(nfc),
    );
    let normalized = normalizer.process(&text);

    if let Some(path) = output {
        fs::write(path, &normalized)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", normalized);
    }

    Ok(())
}

fn cmd_json(
    input: &Path,
    output: Option<&Path>,
    metadata: Option<&Path>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut builder = Mdocx::new();
    if let Some(meta) = load_metadata(metadata)? {
        builder = builder.with_metadata(meta);
    }
    let result = builder.convert_file(input)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = result.to_json(format)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_info(input: &Path, metadata: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let metadata = load_metadata(metadata)?;
    let mut builder = Mdocx::new();
    if let Some(meta) = metadata.clone() {
        builder = builder.with_metadata(meta);
    }
    let result = builder.convert_file(input)?;
    let stats = result.stats();

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Output name".bold(), result.file_name());
    if let Some(ref meta) = metadata {
        println!("{}: {}", "Subject".bold(), meta.subject);
        println!("{}: {}", "Lesson".bold(), meta.lesson_title);
        if let Some(author) = meta.author() {
            println!("{}: {}", "Author".bold(), author);
        }
    }
    println!(
        "{}: {}",
        "Cover page".bold(),
        if stats.has_cover_page { "Yes" } else { "No" }
    );

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Headings".bold(), stats.heading_count);
    if stats.suppressed_heading_count > 0 {
        println!(
            "{}: {}",
            "Suppressed headings".bold(),
            stats.suppressed_heading_count
        );
    }
    println!("{}: {}", "Paragraphs".bold(), stats.paragraph_count);
    println!("{}: {}", "List items".bold(), stats.list_item_count);
    println!("{}: {}", "Blockquotes".bold(), stats.blockquote_count);
    println!("{}: {}", "Tables".bold(), stats.table_count);
    if stats.dropped_table_count > 0 {
        println!("{}: {}", "Empty tables".bold(), stats.dropped_table_count);
    }
    println!(
        "{}: {} ({} fractions)",
        "Equations".bold(),
        stats.math_count,
        stats.fraction_count
    );
    println!("{}: {}", "Words".bold(), stats.word_count);

    Ok(())
}

fn cmd_themes() {
    println!("{}", "Themes".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    let default = Theme::default();
    for theme in Theme::all() {
        let marker = if theme.key == default.key { " (default)" } else { "" };
        println!(
            "  {:<10} {:<16} #{} #{}{}",
            theme.key.bold(),
            theme.name,
            theme.heading1,
            theme.accent,
            marker.dimmed()
        );
    }
}

fn cmd_version() {
    println!("{} {}", "mdocx".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Lesson-plan Markdown to Word converter");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/mdocx".dimmed());
    println!("License: MIT");
}
