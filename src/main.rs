mod commands;
mod core;

use clap::{Parser, Subcommand};
use crate::core::error::print_error;
use std::path::PathBuf;

/// Release and publish packages from a monorepo
#[derive(Parser)]
#[command(name = "mono-release")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(styles = get_styles())]
struct Cli {
  /// Path to the config file (default: mono-release.toml in the working
  /// directory)
  #[arg(short, long, global = true)]
  config: Option<PathBuf>,

  /// Log state-mutating commands instead of executing them
  #[arg(long, global = true)]
  dry: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Release a package: pick a version, commit, tag, push
  Release(commands::ReleaseArgs),

  /// Publish a released package, identified by its release tag
  Publish {
    /// Release tag in the form `<pkg>@<version>`
    tag: String,
  },

  /// Show the next-version candidates for a package
  Versions {
    /// Package directory name under the packages path
    package: String,
    /// Output the candidates in JSON format
    #[arg(long)]
    json: bool,
  },
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn main() {
  let cli = Cli::parse();

  let result = match cli.command {
    Commands::Release(args) => commands::run_release_cmd(args, cli.config, cli.dry),
    Commands::Publish { tag } => commands::run_publish_cmd(&tag, cli.config, cli.dry),
    Commands::Versions { package, json } => commands::run_versions_cmd(&package, json, cli.config),
  };

  if let Err(err) = result {
    print_error(&err);
    std::process::exit(err.exit_code().as_i32());
  }
}
