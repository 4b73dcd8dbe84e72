use std::path::{Path, PathBuf};

use anyhow::Result;
use cascade::media::{CanonicalizeOptions, MediaSyntax};
use cascade::theme::ThemeFormat;
use cascade::pipeline;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(name = "cascade", version, about = "Resolve design-token themes and canonicalize CSS media queries")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve every `{path}` reference in a theme file
    Theme(ThemeArgs),
    /// Merge and order the @media rules of a stylesheet
    Media(MediaArgs),
    /// Run the passes described by a config file
    Build(BuildArgs),
}

#[derive(Debug, Args)]
pub struct ThemeArgs {
    /// Theme file (.json, .yaml or .yml)
    pub input: PathBuf,

    /// Write the resolved theme here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format; defaults to the output extension, then JSON
    #[arg(short, long, value_enum)]
    pub format: Option<FormatArg>,
}

#[derive(Debug, Args)]
pub struct MediaArgs {
    /// Stylesheet to canonicalize
    pub input: PathBuf,

    /// Write the result here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Merge equivalent queries but keep first-occurrence order
    #[arg(long)]
    pub no_sort: bool,

    /// Fail on queries with conditions other than width and media type
    #[arg(long)]
    pub strict: bool,

    /// How width conditions are spelled in the output
    #[arg(long, value_enum, default_value_t = SyntaxArg::Preserve)]
    pub syntax: SyntaxArg,
}

#[derive(Debug, Args)]
pub struct BuildArgs {
    /// Build description
    #[arg(short, long, default_value = cascade::DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Json,
    Yaml,
}

impl From<FormatArg> for ThemeFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => ThemeFormat::Json,
            FormatArg::Yaml => ThemeFormat::Yaml,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SyntaxArg {
    Preserve,
    Legacy,
    Range,
}

impl From<SyntaxArg> for MediaSyntax {
    fn from(arg: SyntaxArg) -> Self {
        match arg {
            SyntaxArg::Preserve => MediaSyntax::Preserve,
            SyntaxArg::Legacy => MediaSyntax::Legacy,
            SyntaxArg::Range => MediaSyntax::Range,
        }
    }
}

impl MediaArgs {
    fn options(&self) -> CanonicalizeOptions {
        CanonicalizeOptions {
            sort: !self.no_sort,
            strict: self.strict,
            syntax: self.syntax.into(),
        }
    }
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Theme(args) => run_theme(&args),
        Command::Media(args) => run_media(&args),
        Command::Build(args) => run_build(&args),
    }
}

fn run_theme(args: &ThemeArgs) -> Result<()> {
    let resolved = pipeline::resolve_theme_file(&args.input)?;
    let format = args
        .format
        .map(ThemeFormat::from)
        .or_else(|| args.output.as_deref().and_then(ThemeFormat::from_path))
        .unwrap_or(ThemeFormat::Json);
    let text = pipeline::render_theme(&resolved, format)?;
    emit(args.output.as_deref(), &text)
}

fn run_media(args: &MediaArgs) -> Result<()> {
    let sorted = pipeline::sort_stylesheet_file(&args.input, &args.options())?;
    emit(args.output.as_deref(), &sorted)
}

fn run_build(args: &BuildArgs) -> Result<()> {
    let report = pipeline::build_from_config_file(&args.config)?;

    for path in [&report.theme_output, &report.stylesheet_output]
        .into_iter()
        .flatten()
    {
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}

fn emit(output: Option<&Path>, text: &str) -> Result<()> {
    match output {
        Some(path) => pipeline::write_output(path, text)?,
        None => print!("{text}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_flags_map_to_options() {
        let cli = Cli::try_parse_from([
            "cascade", "media", "app.css", "--no-sort", "--strict", "--syntax", "range",
        ])
        .unwrap();
        let Command::Media(args) = cli.command else {
            panic!("expected media command");
        };
        let options = args.options();
        assert!(!options.sort);
        assert!(options.strict);
        assert_eq!(options.syntax, MediaSyntax::Range);
    }

    #[test]
    fn test_build_defaults_to_cascade_yaml() {
        let cli = Cli::try_parse_from(["cascade", "-vv", "build"]).unwrap();
        assert_eq!(cli.verbose, 2);
        let Command::Build(args) = cli.command else {
            panic!("expected build command");
        };
        assert_eq!(args.config, PathBuf::from("cascade.yaml"));
    }

    #[test]
    fn test_theme_format_flag() {
        let cli = Cli::try_parse_from(["cascade", "theme", "t.json", "--format", "yaml"]).unwrap();
        let Command::Theme(args) = cli.command else {
            panic!("expected theme command");
        };
        assert_eq!(args.format, Some(FormatArg::Yaml));
        assert_eq!(args.output, None);
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
