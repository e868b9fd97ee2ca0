use clap::{Parser, Subcommand};
use quern::{config, output, pipeline};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "quern")]
#[command(about = "Grind markdown content into normalized JSON documents")]
#[command(long_about = "\
Grind markdown content into normalized JSON documents

Reads a directory of Markdown/MDX files with YAML frontmatter, normalizes
each into a JSON document, and rewrites only the artifacts whose content
actually changed — running twice over unchanged sources touches nothing.

Source layouts (quern.toml `layout`):

  posts (flat, default)          site (pages + posts)
  content/                       content/
  ├── first-light.md             ├── about.md           # page
  └── second-thoughts.mdx        ├── colophon.md        # page
                                 └── post/
                                     └── first-light.md # post

Field resolution (first available wins):
  Title:    title attribute → filename
  Slug:     slug attribute → slugified filename
  Summary:  excerpt before <!--more--> → summary attribute → empty
  Date:     date → publishDate (posts must declare one)
  Locale:   locale attribute → configured default

Posts flagged `draft: true` are withheld from output; posts dated in the
future are published carrying a `future` flag.

Run 'quern gen-config' to generate a documented quern.toml.")]
#[command(version)]
struct Cli {
    /// Path to the configuration file
    #[arg(long, default_value = "quern.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the pipeline: scan, derive, publish
    Build,
    /// Derive every document and print the inventory without writing
    Check,
    /// Print a stock quern.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Build => {
            let config = config::load_config(&cli.config)?;
            println!("==> Publishing {}", config.source);
            let (tx, rx) = std::sync::mpsc::channel();
            let printer = std::thread::spawn(move || {
                for event in rx {
                    for line in output::format_publish_event(&event) {
                        println!("{}", line);
                    }
                }
            });
            let summary = pipeline::run(&config, Some(tx))?;
            printer.join().unwrap();
            println!("Done: {}", summary);
        }
        Command::Check => {
            let config = config::load_config(&cli.config)?;
            println!("==> Checking {}", config.source);
            let report = pipeline::check(&config)?;
            output::print_check_output(&report);
            println!("==> Content is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
