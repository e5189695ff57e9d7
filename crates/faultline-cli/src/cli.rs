//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API.

use clap::{Parser, Subcommand, ValueEnum};
use faultline_core::MessageKind;
use is_terminal::IsTerminal;
use std::path::PathBuf;

/// Faultline CLI - localized messages, results and fault responses
///
/// Renders message templates through the resource catalog and previews how
/// outcomes and faults map to HTTP responses.
#[derive(Parser, Debug)]
#[command(
    name = "faultline",
    version,
    author,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Enable verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "FAULTLINE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format for results [default: from config, else human]
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Preferred locale, as the `lng` query parameter of a request
    #[arg(long, global = true, value_name = "LOCALE")]
    pub lng: Option<String>,

    /// Accept-Language header value to negotiate the locale from
    #[arg(long, global = true, value_name = "HEADER")]
    pub accept_language: Option<String>,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a template string directly against a token bag
    Format(FormatArgs),

    /// Render a message from the resource catalog
    Render(RenderArgs),

    /// Run an example endpoint and print the mapped response
    Scenario(ScenarioArgs),

    /// Manage configuration files and settings
    Config(ConfigArgs),

    /// Generate shell completions for the specified shell
    Completions(CompletionsArgs),
}

/// Arguments for the format command
#[derive(Parser, Debug)]
pub struct FormatArgs {
    /// Template with `{Name}` or `{Name:Spec}` placeholders
    #[arg(value_name = "TEMPLATE")]
    pub template: String,

    /// Token as NAME=VALUE (repeatable, order is kept)
    #[arg(short, long = "token", value_name = "NAME=VALUE")]
    pub tokens: Vec<String>,

    /// Fail when the template references tokens that were not supplied
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the render command
#[derive(Parser, Debug)]
pub struct RenderArgs {
    /// Template key in the resource catalog
    #[arg(value_name = "KEY")]
    pub key: String,

    /// Kind of message to build
    #[arg(short, long, value_enum, default_value = "information")]
    pub kind: KindArg,

    /// Token as NAME=VALUE (repeatable, order is kept)
    #[arg(short, long = "token", value_name = "NAME=VALUE")]
    pub tokens: Vec<String>,

    /// Render under this locale instead of the negotiated one
    #[arg(long, value_name = "LOCALE")]
    pub locale: Option<String>,
}

/// Arguments for the scenario command
#[derive(Parser, Debug)]
pub struct ScenarioArgs {
    /// Example endpoint to run
    #[arg(value_enum, value_name = "SCENARIO")]
    pub scenario: ScenarioName,

    /// Name submitted to the validator scenario
    #[arg(long)]
    pub name: Option<String>,

    /// Email submitted to the validator scenario (repeatable)
    #[arg(long = "email", value_name = "EMAIL")]
    pub emails: Vec<String>,

    /// Submit an empty email list rather than none at all
    #[arg(long, conflicts_with = "emails")]
    pub empty_emails: bool,
}

impl ScenarioArgs {
    /// Emails as submitted: `None` when omitted, possibly empty otherwise
    pub fn submitted_emails(&self) -> Option<&[String]> {
        (self.empty_emails || !self.emails.is_empty()).then_some(self.emails.as_slice())
    }
}

/// Example endpoints
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ScenarioName {
    /// Contentless result carrying an informational message
    NoContent,
    /// Plain payload without a result envelope
    Content,
    /// Payload with information and warning messages
    ResultContent,
    /// Generic fault with three messages
    BadRequest,
    /// Missing entity
    NotFound,
    /// Permission denied
    Forbidden,
    /// Caller not signed in
    Unauthorized,
    /// Validator chain over --name and --email
    Validator,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration management actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the effective configuration
    Show,

    /// Write a configuration file with default values
    Init(ConfigInitArgs),

    /// Print the configuration file in use
    Path,
}

/// Arguments for config init
#[derive(Parser, Debug)]
pub struct ConfigInitArgs {
    /// Where to write the file (YAML or JSON by extension)
    #[arg(default_value = ".faultline.yaml")]
    pub path: PathBuf,

    /// Force overwrite existing config files
    #[arg(long)]
    pub force: bool,

    /// Locale used when a request names none
    #[arg(long, value_name = "LOCALE")]
    pub default_locale: Option<String>,

    /// Directory of message catalog files
    #[arg(long, value_name = "DIR")]
    pub resources_dir: Option<PathBuf>,

    /// Leave the built-in English templates out of the catalog
    #[arg(long)]
    pub no_builtin: bool,

    /// Log level written to the logging section
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,
}

/// Arguments for generating shell completions
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable formatted output
    Human,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
    /// Pretty-printed JSON output
    JsonPretty,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <Self as ValueEnum>::from_str(s, true)
    }
}

/// Message kinds accepted on the command line
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Information,
    Warning,
    Error,
    ValidationError,
    Unauthorized,
    Forbidden,
    NotFound,
}

/// Supported shells for completion generation
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish shell
    Elvish,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective verbosity level (considering quiet flag)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Check if colored output should be used
    pub fn use_color(&self) -> bool {
        !self.no_color && std::io::stdout().is_terminal()
    }
}

impl From<KindArg> for MessageKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Information => MessageKind::Information,
            KindArg::Warning => MessageKind::Warning,
            KindArg::Error => MessageKind::Error,
            KindArg::ValidationError => MessageKind::ValidationError,
            KindArg::Unauthorized => MessageKind::Unauthorized,
            KindArg::Forbidden => MessageKind::Forbidden,
            KindArg::NotFound => MessageKind::NotFound,
        }
    }
}

impl Shell {
    /// Convert to clap_complete shell type
    pub fn to_clap_shell(self) -> clap_complete::Shell {
        match self {
            Shell::Bash => clap_complete::Shell::Bash,
            Shell::Zsh => clap_complete::Shell::Zsh,
            Shell::Fish => clap_complete::Shell::Fish,
            Shell::PowerShell => clap_complete::Shell::PowerShell,
            Shell::Elvish => clap_complete::Shell::Elvish,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        // Verify that the CLI structure is valid
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_level() {
        let cli = Cli::parse_from(["faultline", "-vv", "format", "Hi"]);
        assert_eq!(cli.verbosity_level(), 2);

        let cli = Cli::parse_from(["faultline", "--quiet", "format", "Hi"]);
        assert_eq!(cli.verbosity_level(), 0);
    }

    #[test]
    fn test_format_tokens_keep_order() {
        let cli = Cli::parse_from([
            "faultline", "format", "{B} {A}", "-t", "b=2", "--token", "a=1",
        ]);
        match cli.command {
            Commands::Format(args) => assert_eq!(args.tokens, vec!["b=2", "a=1"]),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_scenario_arguments() {
        let cli = Cli::parse_from([
            "faultline",
            "--lng",
            "fr-FR",
            "scenario",
            "validator",
            "--name",
            "Bart",
            "--email",
            "bart@gmail.com",
        ]);
        assert_eq!(cli.lng.as_deref(), Some("fr-FR"));
        match cli.command {
            Commands::Scenario(args) => {
                assert_eq!(args.scenario, ScenarioName::Validator);
                assert_eq!(args.name.as_deref(), Some("Bart"));
                assert_eq!(args.emails, vec!["bart@gmail.com"]);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_empty_email_list_is_distinct_from_none() {
        fn parse(extra: &[&str]) -> ScenarioArgs {
            let mut argv = vec!["faultline", "scenario", "validator"];
            argv.extend_from_slice(extra);
            match Cli::parse_from(argv).command {
                Commands::Scenario(args) => args,
                other => panic!("unexpected command {:?}", other),
            }
        }

        assert_eq!(parse(&[]).submitted_emails(), None);
        assert_eq!(parse(&["--empty-emails"]).submitted_emails(), Some(&[][..]));
        assert_eq!(
            parse(&["--email", "a@gmail.com"]).submitted_emails(),
            Some(&["a@gmail.com".to_string()][..])
        );
        assert!(Cli::try_parse_from([
            "faultline",
            "scenario",
            "validator",
            "--empty-emails",
            "--email",
            "a@gmail.com"
        ])
        .is_err());
    }

    #[test]
    fn test_kind_conversion() {
        assert_eq!(
            MessageKind::from(KindArg::ValidationError),
            MessageKind::ValidationError
        );
        assert_eq!("json-pretty".parse::<OutputFormat>(), Ok(OutputFormat::JsonPretty));
    }
}
