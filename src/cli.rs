//! Command-line interface definition for Chatterbox
//!
//! This module defines the CLI structure using clap's derive API,
//! providing the interactive chat command and non-interactive room
//! management.

use clap::{Parser, Subcommand};

/// Chatterbox - terminal chat demo
///
/// Mock phone/OTP login, a locally persisted chatroom dashboard, and a
/// chat view with dummy history and simulated assistant replies.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatterbox")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Override the chatroom database path
    #[arg(long)]
    pub storage_path: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for Chatterbox
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start the interactive flow: login, dashboard, chat
    Chat {
        /// Open this room directly, skipping the dashboard
        #[arg(short, long)]
        room: Option<i64>,

        /// Override the configured responder (currently only "echo")
        #[arg(long)]
        responder: Option<String>,

        /// Skip the mock phone/OTP login
        #[arg(long)]
        skip_login: bool,
    },

    /// Manage chatrooms without entering the interactive flow
    Rooms {
        /// Room management subcommand
        #[command(subcommand)]
        command: RoomCommand,
    },
}

/// Room management subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum RoomCommand {
    /// List chatrooms
    List {
        /// Filter by a case-insensitive title substring
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Create a chatroom
    Create {
        /// Room title
        title: String,
    },

    /// Delete a chatroom
    Delete {
        /// Room id
        id: i64,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: Some("config/config.yaml".to_string()),
            storage_path: None,
            verbose: false,
            command: Commands::Chat {
                room: None,
                responder: None,
                skip_login: false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_default() {
        let cli = Cli::default();
        assert_eq!(cli.config, Some("config/config.yaml".to_string()));
        assert!(!cli.verbose);
        assert!(matches!(cli.command, Commands::Chat { .. }));
    }

    #[test]
    fn test_cli_parse_chat_command() {
        let cli = Cli::try_parse_from(["chatterbox", "chat"]);
        assert!(cli.is_ok());
        let cli = cli.unwrap();
        assert!(matches!(cli.command, Commands::Chat { .. }));
    }

    #[test]
    fn test_cli_parse_chat_with_room() {
        let cli = Cli::try_parse_from(["chatterbox", "chat", "--room", "1700000000000"])
            .expect("parse chat");
        if let Commands::Chat { room, .. } = cli.command {
            assert_eq!(room, Some(1700000000000));
        } else {
            panic!("Expected Chat command");
        }
    }

    #[test]
    fn test_cli_parse_chat_skip_login() {
        let cli =
            Cli::try_parse_from(["chatterbox", "chat", "--skip-login"]).expect("parse chat");
        if let Commands::Chat { skip_login, .. } = cli.command {
            assert!(skip_login);
        } else {
            panic!("Expected Chat command");
        }
    }

    #[test]
    fn test_cli_parse_rooms_list_with_search() {
        let cli = Cli::try_parse_from(["chatterbox", "rooms", "list", "--search", "gen"])
            .expect("parse rooms list");
        if let Commands::Rooms {
            command: RoomCommand::List { search },
        } = cli.command
        {
            assert_eq!(search, Some("gen".to_string()));
        } else {
            panic!("Expected Rooms List command");
        }
    }

    #[test]
    fn test_cli_parse_rooms_create() {
        let cli = Cli::try_parse_from(["chatterbox", "rooms", "create", "general"])
            .expect("parse rooms create");
        if let Commands::Rooms {
            command: RoomCommand::Create { title },
        } = cli.command
        {
            assert_eq!(title, "general");
        } else {
            panic!("Expected Rooms Create command");
        }
    }

    #[test]
    fn test_cli_parse_rooms_delete_yes() {
        let cli = Cli::try_parse_from(["chatterbox", "rooms", "delete", "42", "--yes"])
            .expect("parse rooms delete");
        if let Commands::Rooms {
            command: RoomCommand::Delete { id, yes },
        } = cli.command
        {
            assert_eq!(id, 42);
            assert!(yes);
        } else {
            panic!("Expected Rooms Delete command");
        }
    }

    #[test]
    fn test_cli_parse_storage_path_override() {
        let cli = Cli::try_parse_from([
            "chatterbox",
            "--storage-path",
            "/tmp/rooms.db",
            "rooms",
            "list",
        ])
        .expect("parse with storage path");
        assert_eq!(cli.storage_path, Some("/tmp/rooms.db".to_string()));
    }
}
