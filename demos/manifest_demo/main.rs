//! # manifest-config demo application
//!
//! A sample CLI showing how a manifest generator would wire up
//! `manifest-config`. It does not generate anything; it resolves the
//! configuration for a project directory and prints what it would do.
//!
//! ## Running
//!
//! ```sh
//! cargo run --example manifest_demo -- plan
//! cargo run --example manifest_demo -- config list
//! ```
//!
//! ## Features demonstrated
//!
//! | Feature              | How to exercise it                                                        |
//! |----------------------|---------------------------------------------------------------------------|
//! | Plugin defaults      | `cargo run --example manifest_demo -- plan`                               |
//! | Config file          | Create `.deploy-manifest.yml` in the project dir, then run `plan`         |
//! | Profile              | Put `profile: full` in the file, then run `config list`                   |
//! | Env var override     | `MANIFEST_OUTPUT_FORMATS=json,html cargo run --example manifest_demo -- plan` |
//! | Property override    | `cargo run --example manifest_demo -- plan -D manifest.git.depth=10`      |
//! | Host build overlay   | `cargo run --example manifest_demo -- --output-dir build plan`            |
//! | Validation report    | `MANIFEST_OUTPUT_FORMATS=jsn cargo run --example manifest_demo -- config` |
//! | `config get`         | `cargo run --example manifest_demo -- config get output.formats`          |
//! | `config gen`         | `cargo run --example manifest_demo -- config gen -o .deploy-manifest.yml` |
//! | Logging              | `RUST_LOG=manifest_config=debug cargo run --example manifest_demo -- plan` |

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use manifest_config::{ConfigArgs, PartialConfig, Resolver, ResolverBuilder};

/// manifest-config demo: resolve a deploy manifest configuration.
#[derive(Parser, Debug)]
#[command(name = "manifest-demo")]
struct Cli {
    /// Project directory holding `.deploy-manifest.yml`.
    #[arg(long, global = true, default_value = ".")]
    project: PathBuf,

    /// Output directory chosen by the host build (lowest-priority overlay).
    #[arg(long, global = true)]
    output_dir: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print what a manifest run would collect and write.
    Plan {
        /// Set a property, e.g. `-D manifest.output.formats=json,html`.
        #[arg(short = 'D', value_name = "KEY=VALUE")]
        define: Vec<String>,
    },
    /// Inspect the configuration (validate, list, get, gen).
    Config(ConfigArgs),
}

fn make_builder(cli: &Cli) -> ResolverBuilder {
    let mut builder = Resolver::builder().project_dir(&cli.project);
    if let Some(dir) = &cli.output_dir {
        let mut host = PartialConfig::default();
        host.output.directory = Some(dir.clone());
        builder = builder.host_config(host);
    }
    builder
}

fn plan(builder: ResolverBuilder, define: &[String]) {
    let properties = define
        .iter()
        .filter_map(|raw| raw.split_once('='))
        .map(|(k, v)| (k.to_string(), v.to_string()));

    let resolved = builder.properties(properties).resolve().unwrap_or_else(|e| {
        eprintln!("Failed to resolve configuration:\n{e}");
        std::process::exit(1);
    });
    let config = resolved.config();

    if config.skip {
        println!("Manifest generation skipped (skip = true, from {})", resolved.source("skip"));
        return;
    }

    println!("Profile: {} ({})", config.profile, resolved.source("profile"));
    for format in &config.output.formats {
        println!(
            "Would write {}/{}.{}",
            config.output.directory, config.output.filename, format
        );
    }
    if config.output.archive {
        println!("Would archive as {}", config.output.archive_format);
    }
    if config.dependencies.tree.enabled {
        println!(
            "Would collect dependency tree to depth {} ({})",
            config.dependencies.tree.depth, config.dependencies.tree.format
        );
    }
    match config.git.fetch_mode() {
        Some(mode) => println!("Git: {} commits, fetch {mode}", config.git.depth),
        None => println!("Git: {} commits", config.git.depth),
    }
    if config.dry_run {
        println!("(dry run)");
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let builder = make_builder(&cli);

    match cli.command {
        Commands::Plan { define } => plan(builder, &define),
        Commands::Config(args) => {
            let (properties, action) = args.into_parts();
            builder
                .properties(properties)
                .handle_and_print(&action)
                .unwrap_or_else(|e| {
                    eprintln!("Config error:\n{e}");
                    std::process::exit(1);
                });
        }
    }
}
