use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "smms-bridge", version, about = "Launcher bridge for the SM.MS image host")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Print previously uploaded images as a launcher result list
    List,

    /// Upload the clipboard's image(s) and print the results
    Upload,

    /// Delete an uploaded image by its delete hash
    Delete {
        /// Hash from the upload history (`mods.cmd.arg` of a list item)
        hash: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_each_verb() {
        let cli = Cli::try_parse_from(["smms-bridge", "list"]).unwrap();
        assert_eq!(cli.command, Command::List);

        let cli = Cli::try_parse_from(["smms-bridge", "upload"]).unwrap();
        assert_eq!(cli.command, Command::Upload);

        let cli = Cli::try_parse_from(["smms-bridge", "delete", "abc123"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Delete {
                hash: Some("abc123".into())
            }
        );
    }

    #[test]
    fn delete_hash_is_optional_at_parse_time() {
        let cli = Cli::try_parse_from(["smms-bridge", "delete"]).unwrap();
        assert_eq!(cli.command, Command::Delete { hash: None });
    }

    #[test]
    fn unknown_verb_is_rejected() {
        assert!(Cli::try_parse_from(["smms-bridge", "rename"]).is_err());
    }
}
