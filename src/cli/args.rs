//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--data-dir <path>`: Use this data directory instead of the configured one
//! - `--debug` / `-v`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output
//! - `--yes` / `-y`: Answer yes to confirmations

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// domaintree - Organize knowledge domains and their documents as a tree
#[derive(Parser, Debug)]
#[command(name = "dt")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Use this data directory instead of the configured one
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short = 'v', long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Answer yes to confirmation prompts
    #[arg(short, long, global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    // ========== Taxonomy ==========
    /// Set the root domains (at least three)
    #[command(
        name = "setup",
        long_about = "Set the root domains of the taxonomy.\n\n\
            At least three distinct names are required. Running setup again \
            replaces the root list; subdomains and documents already recorded \
            under a kept root are preserved.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Start a new taxonomy
    dt setup Physics Chemistry Biology

    # Names with spaces need quoting
    dt setup \"Computer Science\" Mathematics Linguistics"
    )]
    Setup {
        /// Root domain names
        #[arg(required = true, num_args = 1..)]
        names: Vec<String>,
    },

    /// Add a domain at the current location
    #[command(
        name = "add",
        long_about = "Add a domain where you are.\n\n\
            At Home this adds a root domain. Inside a domain it adds a subdomain \
            of the current domain, as long as the maximum depth allows it.",
        after_help = "\
WORKFLOW EXAMPLES:
    dt cd Physics
    dt add Optics          # Physics / Optics

    # Add a root domain from anywhere
    dt add --root Geology"
    )]
    Add {
        /// Domain name
        name: String,

        /// Add a root domain regardless of the current location
        #[arg(long)]
        root: bool,
    },

    // ========== Navigation ==========
    /// Enter a domain below the current location
    #[command(
        name = "cd",
        after_help = "\
WORKFLOW EXAMPLES:
    dt cd Physics          # enter a child domain
    dt cd ..               # go up one level
    dt cd --path 'Physics/Optics'
    dt cd --path 'Systems/I\\/O'   # '/' inside a name is written as '\\/'"
    )]
    Cd {
        /// Child domain name, or `..` for the parent
        #[arg(required_unless_present = "path", conflicts_with = "path")]
        name: Option<String>,

        /// Absolute path in key form (segments joined with '/')
        #[arg(long)]
        path: Option<String>,
    },

    /// Go up one or more levels
    #[command(name = "up")]
    Up {
        /// Number of levels
        #[arg(default_value = "1")]
        steps: usize,
    },

    /// Jump to a breadcrumb level (0 is Home)
    #[command(
        name = "jump",
        after_help = "\
WORKFLOW EXAMPLES:
    dt pwd --levels        # show levels
    dt jump 1              # back to the first domain on the path"
    )]
    Jump {
        /// Breadcrumb level; levels past the end stay where you are
        level: usize,
    },

    /// Return to Home
    #[command(name = "home")]
    Home,

    /// Show the current location
    #[command(name = "pwd")]
    Pwd {
        /// Show the level of each breadcrumb
        #[arg(long)]
        levels: bool,

        /// Print the path in key form
        #[arg(long, conflicts_with = "levels")]
        key: bool,
    },

    // ========== Viewing ==========
    /// List domains and documents at the current location
    #[command(name = "ls")]
    Ls,

    /// Show the whole taxonomy
    #[command(
        name = "tree",
        long_about = "Show every domain reachable from Home.\n\n\
            The current location is marked with '*'. Document counts appear in \
            brackets."
    )]
    Tree,

    // ========== Documents ==========
    /// Attach a document to the current domain
    #[command(
        name = "attach",
        after_help = "\
WORKFLOW EXAMPLES:
    # Attach a file, named after the file
    dt attach notes/lenses.md

    # Attach under another name
    dt attach notes/lenses.md --name lenses.md

    # Attach inline text
    dt attach --content 'Snell: n1 sin a = n2 sin b' --name snell.txt"
    )]
    Attach {
        /// File to read
        #[arg(required_unless_present = "content", conflicts_with = "content")]
        file: Option<PathBuf>,

        /// Document name (defaults to the file name)
        #[arg(long)]
        name: Option<String>,

        /// Inline content instead of a file
        #[arg(long, requires = "name")]
        content: Option<String>,
    },

    /// List documents at the current location, or print one
    #[command(name = "docs")]
    Docs {
        /// Document to print
        name: Option<String>,
    },

    /// Remove every document from every domain
    #[command(name = "clear-docs")]
    ClearDocs,

    // ========== Maintenance ==========
    /// Get, set, or list configuration values
    #[command(
        name = "config",
        long_about = "View or modify the tree configuration.\n\n\
            'max-depth' bounds how deep subdomains may nest. It is stored with \
            the taxonomy. 'list' also shows the settings read from the config \
            file.",
        after_help = "\
WORKFLOW EXAMPLES:
    dt config list
    dt config get max-depth
    dt config set max-depth 4

    # Write ~/.domaintree/config.toml with the current settings
    dt config init"
    )]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Delete all domains and documents
    #[command(
        name = "reset",
        long_about = "Delete all domains and documents and clear saved data.\n\n\
            The tree configuration stays in effect for the rest of this command \
            only; the next command starts from the config file defaults."
    )]
    Reset,

    /// Report orphaned data and over-deep paths
    #[command(
        name = "doctor",
        long_about = "Check saved data for problems.\n\n\
            Reports child lists and documents recorded under paths that can no \
            longer be reached from Home, and domains deeper than max-depth. \
            Nothing is changed."
    )]
    Doctor,

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        after_help = "\
WORKFLOW EXAMPLES:
    # Bash (add to ~/.bashrc)
    dt completion bash >> ~/.bashrc

    # Zsh (add to ~/.zshrc)
    dt completion zsh >> ~/.zshrc

    # Fish
    dt completion fish > ~/.config/fish/completions/dt.fish

    # PowerShell
    dt completion powershell >> $PROFILE"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Get a configuration value
    Get {
        /// Configuration key
        key: String,
    },
    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,
        /// Value to set
        value: String,
    },
    /// List all configuration values
    List,
    /// Write a config file with the current settings
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["dt", "ls", "--data-dir", "/tmp/x", "-q"]).unwrap();
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/x")));
        assert!(cli.quiet);
        assert!(matches!(cli.command, Command::Ls));
    }

    #[test]
    fn cd_needs_name_or_path() {
        assert!(Cli::try_parse_from(["dt", "cd"]).is_err());
        assert!(Cli::try_parse_from(["dt", "cd", "A", "--path", "A"]).is_err());
        assert!(Cli::try_parse_from(["dt", "cd", "--path", "A/B"]).is_ok());
    }

    #[test]
    fn attach_content_needs_name() {
        assert!(Cli::try_parse_from(["dt", "attach", "--content", "x"]).is_err());
        assert!(Cli::try_parse_from(["dt", "attach", "--content", "x", "--name", "n"]).is_ok());
        assert!(Cli::try_parse_from(["dt", "attach", "f.txt"]).is_ok());
    }

    #[test]
    fn setup_requires_names() {
        assert!(Cli::try_parse_from(["dt", "setup"]).is_err());
    }
}
