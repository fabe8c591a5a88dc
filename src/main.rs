// Copyright 2025 dentsusoken
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use clap::{ArgGroup, Parser, Subcommand};
use packaging::commands::codenames::CodenamesCommand;
use packaging::commands::config::ConfigCommand;
use packaging::commands::parse::ParseCommand;
use packaging::commands::paths::PathsCommand;
use packaging::commands::platforms::PlatformsCommand;
use packaging::commands::sniff::SniffCommand;
use packaging::config::PackagingConfig;
use packaging::error::{
    PackagingError, Result, format_error_chain, format_error_with_color, get_exit_code,
};
use packaging::logging;
use packaging::paths::ARTIFACTS_PREFIX;
use packaging::platforms::PlatformCatalog;
use std::io::IsTerminal;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "packaging")]
#[command(author, version, about = "Platform tags and package layout paths", long_about = None)]
struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Configuration file (defaults to ext/build_defaults.toml when present)
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decompose a platform tag (e.g., "el-7-x86_64", "xenial-amd64")
    Parse {
        tag: String,
    },

    /// List supported platforms
    #[command(visible_alias = "ls")]
    Platforms {
        /// Only show platforms using this package format
        #[arg(long, value_name = "FORMAT")]
        format: Option<String>,
    },

    /// List Debian-family codenames
    Codenames,

    /// Show where artifacts for a platform tag are staged
    ArtifactsPath {
        tag: String,

        /// Root directory of the layout
        #[arg(long, default_value = ARTIFACTS_PREFIX)]
        prefix: String,

        /// Use the nonfinal (pre-release) repository
        #[arg(long)]
        nonfinal: bool,

        /// Also print the link path
        #[arg(long)]
        link: bool,
    },

    /// Show the repository path for a platform tag
    RepoPath {
        tag: String,

        /// Use the layout of repositories created by earlier tooling
        #[arg(long)]
        legacy: bool,

        /// Use the nonfinal (pre-release) repository
        #[arg(long)]
        nonfinal: bool,
    },

    /// Show the glob matching generated repository client configs
    RepoConfigPath {
        tag: String,
    },

    /// Show the remote repository root for a tag or package format
    #[command(group(ArgGroup::new("target").required(true).args(["tag", "format"])))]
    RemoteBase {
        tag: Option<String>,

        #[arg(long, value_name = "FORMAT")]
        format: Option<String>,

        /// Use the nonfinal (pre-release) repository
        #[arg(long)]
        nonfinal: bool,
    },

    /// Show the apt pool directory for a project
    DebBasePath {
        tag: String,
        repository: String,
        project: String,

        /// Use the nonfinal (pre-release) repository
        #[arg(long)]
        nonfinal: bool,
    },

    /// Show the remote path of the release package
    ReleaseLink {
        tag: String,

        /// Use the nonfinal (pre-release) link target
        #[arg(long)]
        nonfinal: bool,
    },

    /// Derive the Debian component from a branch or version path
    Component {
        path: String,
    },

    /// Infer platform tags from artifact paths
    Sniff {
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// Print the effective configuration
    Config,
}

fn setup_logger(cli: &Cli) {
    logging::setup_logger(cli.verbose);
}

fn load_config(cli: &Cli) -> Result<PackagingConfig> {
    match &cli.config {
        Some(path) => PackagingConfig::load_file(path),
        None => PackagingConfig::load(&std::env::current_dir()?),
    }
}

fn report(error: &PackagingError) -> ! {
    let stderr = std::io::stderr();
    if stderr.is_terminal() {
        eprintln!("{}", format_error_with_color(error, true));
    } else {
        eprintln!("{}", format_error_chain(error));
    }
    std::process::exit(get_exit_code(error));
}

fn main() {
    let cli = Cli::parse();

    // Initialize logger based on CLI flags and environment
    setup_logger(&cli);

    // Load configuration once at startup
    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => report(&e),
    };

    let catalog = PlatformCatalog::global();
    let json = cli.json;

    let result: Result<()> = (|| match &cli.command {
        Commands::Parse { tag } => ParseCommand::new()?.execute(tag, json),
        Commands::Platforms { format } => {
            PlatformsCommand::new(catalog)?.execute(format.as_deref(), json)
        }
        Commands::Codenames => CodenamesCommand::new(catalog)?.execute(json),
        Commands::ArtifactsPath {
            tag,
            prefix,
            nonfinal,
            link,
        } => PathsCommand::new(&config, json)?.artifacts_path(tag, prefix, *nonfinal, *link),
        Commands::RepoPath {
            tag,
            legacy,
            nonfinal,
        } => PathsCommand::new(&config, json)?.repo_path(tag, *legacy, *nonfinal),
        Commands::RepoConfigPath { tag } => {
            PathsCommand::new(&config, json)?.repo_config_path(tag)
        }
        Commands::RemoteBase {
            tag,
            format,
            nonfinal,
        } => PathsCommand::new(&config, json)?.remote_base(
            tag.as_deref(),
            format.as_deref(),
            *nonfinal,
        ),
        Commands::DebBasePath {
            tag,
            repository,
            project,
            nonfinal,
        } => PathsCommand::new(&config, json)?.deb_base_path(tag, repository, project, *nonfinal),
        Commands::ReleaseLink { tag, nonfinal } => {
            PathsCommand::new(&config, json)?.release_link(tag, *nonfinal)
        }
        Commands::Component { path } => PathsCommand::new(&config, json)?.component(path),
        Commands::Sniff { paths } => SniffCommand::new(catalog)?.execute(paths, json),
        Commands::Config => ConfigCommand::new(&config)?.execute(json),
    })();

    if let Err(e) = result {
        report(&e);
    }
}
