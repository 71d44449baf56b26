//! folayout CLI - paginate pre-resolved formatting-object documents

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;

use folayout::model::Declaration;
use folayout::{
    layout_document, source, JsonFormat, LayoutMasterSet, LayoutOptions, LayoutStats,
    PageSelection, RenderOptions,
};

#[derive(Parser)]
#[command(name = "folayout")]
#[command(version)]
#[command(about = "Lay out formatting-object documents into pages", long_about = None)]
struct Cli {
    /// Input document (JSON)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Lay out a document and print a page outline
    #[command(alias = "text")]
    Layout {
        /// Input document (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Show positions and sizes
        #[arg(short, long)]
        geometry: bool,

        /// Page range (e.g., "1-10", "1,3,5")
        #[arg(long)]
        pages: Option<String>,

        /// Skip blank pages
        #[arg(long)]
        no_blank: bool,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Lay out a document and write the area tree as JSON
    Json {
        /// Input document (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Page range (e.g., "1-10", "1,3,5")
        #[arg(long)]
        pages: Option<String>,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Validate page masters and flow names without laying out
    Check {
        /// Input document (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show document and layout statistics
    Info {
        /// Input document (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Show version information
    Version,
}

#[derive(Args, Clone)]
struct LayoutArgs {
    /// How to treat content-model violations
    #[arg(long, value_enum, default_value = "lenient")]
    mode: Mode,

    /// Lay out page sequences one after another
    #[arg(long)]
    sequential: bool,

    /// Maximum pages per page sequence
    #[arg(long, default_value = "10000", env = "FOLAYOUT_MAX_PAGES")]
    max_pages: u32,

    /// Do not lay out headers, footers and other static content
    #[arg(long)]
    no_static: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Drop offending content and report it
    Lenient,
    /// Fail on the first violation
    Strict,
}

impl LayoutArgs {
    fn options(&self) -> LayoutOptions {
        let options = LayoutOptions::new()
            .with_parallel(!self.sequential)
            .with_max_pages(self.max_pages)
            .with_static_content(!self.no_static);
        match self.mode {
            Mode::Lenient => options.lenient(),
            Mode::Strict => options.strict(),
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Layout {
            input,
            output,
            geometry,
            pages,
            no_blank,
            layout,
        }) => cmd_layout(
            &input,
            output.as_deref(),
            geometry,
            pages.as_deref(),
            no_blank,
            &layout,
        ),
        Some(Commands::Json {
            input,
            output,
            compact,
            pages,
            layout,
        }) => cmd_json(&input, output.as_deref(), compact, pages.as_deref(), &layout),
        Some(Commands::Check { input }) => cmd_check(&input),
        Some(Commands::Info { input, layout }) => cmd_info(&input, &layout),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            if let Some(input) = cli.input {
                cmd_info(
                    &input,
                    &LayoutArgs {
                        mode: Mode::Lenient,
                        sequential: false,
                        max_pages: 10_000,
                        no_static: false,
                    },
                )
            } else {
                println!("{}", "Usage: folayout <FILE>".yellow());
                println!("       folayout --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn page_selection(pages: Option<&str>) -> Result<PageSelection, Box<dyn std::error::Error>> {
    match pages {
        Some(p) => Ok(PageSelection::parse(p).map_err(|e| format!("Invalid page range: {}", e))?),
        None => Ok(PageSelection::All),
    }
}

fn write_output(output: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_layout(
    input: &Path,
    output: Option<&Path>,
    geometry: bool,
    pages: Option<&str>,
    no_blank: bool,
    layout: &LayoutArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let render_options = RenderOptions::new()
        .with_pages(page_selection(pages)?)
        .with_geometry(geometry)
        .with_blank_pages(!no_blank);

    let doc = source::load_file(input)?;
    let tree = layout_document(&doc, &layout.options())?;
    let text = folayout::render::to_text(&tree, &render_options)?;

    write_output(output, &text)
}

fn cmd_json(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    pages: Option<&str>,
    layout: &LayoutArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let render_options = RenderOptions::new().with_pages(page_selection(pages)?);
    let doc = source::load_file(input)?;
    let tree = layout_document(&doc, &layout.options())?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    let json = folayout::render::to_json(&render_options.select(&tree), format)?;

    write_output(output, &json)
}

fn cmd_check(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let doc = source::load_file(input)?;
    let masters = LayoutMasterSet::from_declarations(&doc.declarations)?;

    let mut problems = 0;
    for (index, sequence) in doc.page_sequences.iter().enumerate() {
        if masters.resolve(&sequence.master_reference).is_none() {
            problems += 1;
            println!(
                "{} sequence {}: unknown master-reference '{}'",
                "✗".red(),
                index + 1,
                sequence.master_reference
            );
        }
        let flow_names = std::iter::once(&sequence.flow_name)
            .chain(sequence.static_contents.iter().map(|sc| &sc.flow_name));
        for name in flow_names {
            if !masters.region_name_exists(name) {
                problems += 1;
                println!(
                    "{} sequence {}: no region named '{}'",
                    "✗".red(),
                    index + 1,
                    name
                );
            }
        }
    }

    if problems > 0 {
        return Err(format!("{} problem(s) found", problems).into());
    }

    println!(
        "{} {} master(s), {} page sequence(s)",
        "OK".green().bold(),
        masters.len(),
        doc.page_sequences.len()
    );
    Ok(())
}

fn cmd_info(input: &Path, layout: &LayoutArgs) -> Result<(), Box<dyn std::error::Error>> {
    let doc = source::load_file(input)?;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), input.display());

    let templates = doc
        .declarations
        .iter()
        .filter(|d| matches!(d, Declaration::SimplePageMaster(_)))
        .count();
    println!("{}: {}", "Page masters".bold(), templates);
    println!(
        "{}: {}",
        "Sequence masters".bold(),
        doc.declarations.len() - templates
    );
    println!("{}: {}", "Page sequences".bold(), doc.page_sequences.len());
    println!("{}: {}", "Content nodes".bold(), doc.node_count());

    let tree = layout_document(&doc, &layout.options())?;
    let stats = LayoutStats::from_tree(&tree);

    println!();
    println!("{}", "Layout Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Pages".bold(), stats.page_count);
    println!("{}: {}", "Blank pages".bold(), stats.blank_page_count);
    println!("{}: {}", "Areas".bold(), stats.area_count);
    println!("{}: {}", "Lines".bold(), stats.line_count);
    println!("{}: {}", "Ids".bold(), stats.id_count);

    if !tree.diagnostics.is_empty() {
        println!();
        println!("{}", "Diagnostics".yellow().bold());
        for diagnostic in &tree.diagnostics {
            println!("  {} {}", "!".yellow(), diagnostic.message);
        }
    }

    log::debug!("{}", serde_json::to_string(&stats)?);
    Ok(())
}

fn cmd_version() {
    println!("{} {}", "folayout".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Resumable pagination of formatting-object documents");
}
