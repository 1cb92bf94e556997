use clap::{Parser, Subcommand};
use wordpane::protocol::ApiVersion;

#[derive(Parser, Debug)]
#[command(name = "wordpane")]
#[command(about = "Word task-pane demo flows, run against an emulated host document")]
#[command(version)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Text to select in the demo document before the flow runs
    #[arg(long, global = true, value_name = "TEXT", default_value = "Office 365")]
    pub select: String,

    /// Cap the API version the emulated host advertises (e.g. 1.1)
    #[arg(long, global = true, value_name = "VERSION")]
    pub max_api: Option<ApiVersion>,

    /// Print the resulting document as JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Insert an opening paragraph at the start of the document
    #[command(alias = "para")]
    InsertParagraph,

    /// Apply the IntenseReference style to the first paragraph
    #[command(alias = "style")]
    ApplyStyle,

    /// Switch the second paragraph to 18pt bold Courier New
    #[command(alias = "font")]
    ChangeFont,

    /// Insert text at the end of the selection, then report what the range covers
    #[command(alias = "into-range")]
    InsertTextIntoRange,

    /// Insert text before the selection, then show the range is unchanged
    #[command(alias = "before-range")]
    InsertTextOutsideRange,

    /// Replace the selected text
    #[command(alias = "replace")]
    ReplaceText,

    /// Insert the bundled demo image at the end of the body
    #[command(alias = "image")]
    InsertImage,

    /// Append an HTML fragment after the last paragraph
    #[command(alias = "html")]
    InsertHtml,

    /// Insert a 3x3 table after the second paragraph
    #[command(alias = "table")]
    InsertTable,

    /// Run every demo flow in order against one host
    #[command(alias = "all")]
    Walkthrough,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_insert_paragraph() {
        let cli = Cli::try_parse_from(["wordpane", "insert-paragraph"]).unwrap();
        assert!(matches!(cli.command, Commands::InsertParagraph));
        assert_eq!(cli.select, "Office 365");
        assert!(cli.max_api.is_none());
        assert!(!cli.json);
    }

    #[test]
    fn parse_command_aliases() {
        let cli = Cli::try_parse_from(["wordpane", "into-range"]).unwrap();
        assert!(matches!(cli.command, Commands::InsertTextIntoRange));

        let cli = Cli::try_parse_from(["wordpane", "all"]).unwrap();
        assert!(matches!(cli.command, Commands::Walkthrough));
    }

    #[test]
    fn verbose_flag_short_and_long() {
        let short = Cli::try_parse_from(["wordpane", "-v", "replace-text"]).unwrap();
        assert_eq!(short.verbose, 1);

        let long = Cli::try_parse_from(["wordpane", "--verbose", "replace-text"]).unwrap();
        assert_eq!(long.verbose, 1);

        let double = Cli::try_parse_from(["wordpane", "-vv", "replace-text"]).unwrap();
        assert_eq!(double.verbose, 2);
    }

    #[test]
    fn global_flags_apply_after_the_subcommand() {
        let cli =
            Cli::try_parse_from(["wordpane", "apply-style", "--select", "Office", "--json"])
                .unwrap();
        assert_eq!(cli.select, "Office");
        assert!(cli.json);
    }

    #[test]
    fn max_api_parses_a_version() {
        let cli = Cli::try_parse_from(["wordpane", "walkthrough", "--max-api", "1.1"]).unwrap();
        assert_eq!(cli.max_api, Some(ApiVersion::new(1, 1)));
    }

    #[test]
    fn max_api_rejects_garbage() {
        assert!(Cli::try_parse_from(["wordpane", "walkthrough", "--max-api", "new"]).is_err());
    }

    #[test]
    fn unknown_command_fails() {
        assert!(Cli::try_parse_from(["wordpane", "insert-footnote"]).is_err());
    }
}
