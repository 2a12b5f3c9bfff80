/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint.

It exposes two top-level command modules:

- `chat`  — The interactive flow: mock login, dashboard, chat session
- `rooms` — Non-interactive chatroom management

These handlers are intentionally small and use the library components:
the room list controller, the chat session, and the responder factory.
All user-facing failures are printed as transient notices ("toasts") and
never abort the loop.
*/

use crate::error::ChatterboxError;
use crate::rooms::Chatroom;
use colored::Colorize;
use prettytable::{row, Table};

// The interactive flow
pub mod chat {
    //! Interactive chat flow handler.
    //!
    //! Runs the mock login, then a readline-based dashboard loop over the
    //! chatroom list, and hands off to the in-session loop when a room is
    //! opened.

    use super::*;
    use crate::attachment::load_attachment;
    use crate::auth::{self, AuthContext};
    use crate::config::Config;
    use crate::error::Result;
    use crate::history::DummyHistory;
    use crate::message::{ChatMessage, ImageAttachment, Sender};
    use crate::responders::{create_responder, Responder};
    use crate::rooms::{Debouncer, RoomList, SEARCH_DEBOUNCE};
    use crate::session::{ChatSession, ReplyOutcome};
    use crate::store::RoomStore;
    use rustyline::error::ReadlineError;
    use rustyline::DefaultEditor;
    use std::path::Path;
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    /// Simulated load time for the saved room list
    const LIST_LOAD_DELAY: Duration = Duration::from_millis(500);

    /// Start the interactive flow
    ///
    /// # Arguments
    ///
    /// * `config` - Global configuration (consumed)
    /// * `room` - Open this room directly instead of the dashboard
    /// * `responder_kind` - Optional override for the configured responder
    /// * `skip_login` - Skip the mock phone/OTP login
    pub async fn run_chat(
        config: Config,
        room: Option<i64>,
        responder_kind: Option<String>,
        skip_login: bool,
    ) -> Result<()> {
        tracing::info!("Starting interactive chat flow");

        let kind = responder_kind
            .as_deref()
            .unwrap_or(&config.reply.responder);
        let responder = create_responder(kind)?;

        let store = RoomStore::new(config.storage_path()?)?;
        let mut rooms = RoomList::load(store);

        let mut rl = DefaultEditor::new()?;

        let auth = if skip_login {
            AuthContext::log_in(None, "demo")
        } else {
            match login(&mut rl, &config).await? {
                Some(auth) => auth,
                None => return Ok(()), // user backed out of login
            }
        };

        if let Some(id) = room {
            if rooms.get(id).is_some() {
                run_session(&mut rl, &rooms, id, &responder, &config).await?;
            } else {
                toast_error(&format!("No chatroom with id {}", id));
            }
        }

        dashboard(&mut rl, &mut rooms, &responder, &config, auth).await
    }

    /// Mock phone/OTP login
    ///
    /// Returns `None` when the user aborts (Ctrl-C / Ctrl-D).
    async fn login(rl: &mut DefaultEditor, config: &Config) -> Result<Option<AuthContext>> {
        println!("{}", "Login with Phone".bold());

        let client = reqwest::Client::new();
        let countries = match auth::fetch_countries(&client, &config.auth.countries_endpoint).await
        {
            Ok(countries) => countries,
            Err(e) => {
                // Degrades silently; login works without the country list
                tracing::warn!("Failed to fetch countries: {}", e);
                Vec::new()
            }
        };

        let dial_code = match pick_dial_code(rl, &countries)? {
            Some(dial_code) => dial_code,
            None => return Ok(None),
        };

        let phone = loop {
            match rl.readline("Phone number: ") {
                Ok(line) => {
                    let line = line.trim().to_string();
                    match auth::validate_phone(&line) {
                        Ok(()) => break line,
                        Err(e) => toast_error(&e.to_string()),
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => return Ok(None),
                Err(e) => return Err(e.into()),
            }
        };

        let otp = auth::generate_otp();
        println!("{}", "Sending OTP...".dimmed());
        tokio::time::sleep(std::time::Duration::from_millis(config.auth.otp_delay_ms)).await;
        toast_success("OTP sent successfully");
        toast_info(&format!("Your OTP is {}", otp));

        loop {
            match rl.readline("Enter 6-digit OTP: ") {
                Ok(line) => {
                    let line = line.trim();
                    if let Err(e) = auth::validate_otp(line) {
                        toast_error(&e.to_string());
                        continue;
                    }
                    if line != otp {
                        toast_error("Incorrect OTP");
                        continue;
                    }
                    println!("{}", "Verifying...".dimmed());
                    tokio::time::sleep(std::time::Duration::from_millis(
                        config.auth.otp_delay_ms,
                    ))
                    .await;
                    toast_success("Login successful");
                    return Ok(Some(AuthContext::log_in(dial_code.clone(), phone)));
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => return Ok(None),
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Ask for a dial code; Enter skips, Ctrl-C/Ctrl-D aborts login
    ///
    /// The outer Option is the abort signal, the inner one the skipped
    /// dial code.
    fn pick_dial_code(
        rl: &mut DefaultEditor,
        countries: &[auth::Country],
    ) -> Result<Option<Option<String>>> {
        if countries.is_empty() {
            return Ok(Some(None));
        }

        println!(
            "{}",
            format!("{} countries available", countries.len()).dimmed()
        );
        match rl.readline("Dial code (e.g. +84, Enter to skip): ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    return Ok(Some(None));
                }
                let known = countries.iter().find(|c| c.dial_code == line);
                match known {
                    Some(country) => {
                        println!("{}", format!("{} ({})", country.name, country.dial_code).dimmed());
                        Ok(Some(Some(country.dial_code.clone())))
                    }
                    None => {
                        toast_error("Country required");
                        pick_dial_code(rl, countries)
                    }
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Dashboard loop: list, search, create, delete, open
    async fn dashboard(
        rl: &mut DefaultEditor,
        rooms: &mut RoomList,
        responder: &Arc<dyn Responder>,
        config: &Config,
        auth: AuthContext,
    ) -> Result<()> {
        println!();
        println!("{}", "Your Chatrooms".bold());
        println!(
            "{}",
            format!("Logged in as {}", auth.display_number()).dimmed()
        );
        print_dashboard_help();
        if !rooms.is_empty() {
            // Saved rooms "load" behind a short skeleton, like the chat view
            for line in skeleton_lines(3) {
                println!("{}", line);
            }
            tokio::time::sleep(LIST_LOAD_DELAY).await;
        }
        print_room_list(rooms, "");

        let mut debouncer = Debouncer::new(SEARCH_DEBOUNCE);

        loop {
            let line = match rl.readline("dashboard> ") {
                Ok(line) => line,
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(e) => return Err(e.into()),
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            rl.add_history_entry(line)?;

            let (command, rest) = split_command(line);
            match command {
                "help" => print_dashboard_help(),
                "list" => print_room_list(rooms, debouncer.query()),
                "search" => {
                    // A submitted line is already past its last keystroke,
                    // so poll as of the end of the debounce window instead
                    // of sleeping through it
                    debouncer.update(rest, Instant::now());
                    debouncer.poll(Instant::now() + SEARCH_DEBOUNCE);
                    print_room_list(rooms, debouncer.query());
                }
                "new" => match rooms.create(rest) {
                    Ok(room) => toast_success(&format!("Chatroom created ({})", room.id)),
                    Err(e) => toast_error(&e.to_string()),
                },
                "delete" => match rest.parse::<i64>() {
                    Ok(id) => {
                        if rooms.get(id).is_none() {
                            toast_error(&format!("No chatroom with id {}", id));
                        } else if confirm_delete(rl)? {
                            rooms.delete(id);
                            toast_success("Chatroom deleted");
                        }
                    }
                    Err(_) => toast_error("Usage: delete <id>"),
                },
                "open" => match rest.parse::<i64>() {
                    Ok(id) if rooms.get(id).is_some() => {
                        run_session(rl, rooms, id, responder, config).await?;
                        print_room_list(rooms, debouncer.query());
                    }
                    Ok(id) => toast_error(&format!("No chatroom with id {}", id)),
                    Err(_) => toast_error("Usage: open <id>"),
                },
                "logout" => {
                    // The auth context is dropped with this frame
                    toast_info("Logged out");
                    break;
                }
                "quit" | "exit" => break,
                _ => toast_error("Unknown command, try 'help'"),
            }
        }

        drop(auth);
        Ok(())
    }

    /// In-session loop for one chatroom
    async fn run_session(
        rl: &mut DefaultEditor,
        rooms: &RoomList,
        room_id: i64,
        responder: &Arc<dyn Responder>,
        config: &Config,
    ) -> Result<()> {
        let title = rooms
            .get(room_id)
            .map(|room| room.title.clone())
            .unwrap_or_else(|| format!("#{}", room_id));

        println!();
        println!("{}", format!("Chatroom: {}", title).bold());
        print_session_help();

        let history = DummyHistory::generate(
            config.history.total_messages,
            config.history.page_size,
            config.history_interval(),
        );
        let mut session = ChatSession::new(
            room_id,
            history,
            Arc::clone(responder),
            config.session_timing(),
        );

        for line in skeleton_lines(5) {
            println!("{}", line);
        }
        session.load_initial().await;
        print_transcript(&session);

        let mut attachment: Option<ImageAttachment> = None;

        loop {
            let prompt = format!("{}> ", title);
            let line = match rl.readline(&prompt) {
                Ok(line) => line,
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(e) => return Err(e.into()),
            };
            let line = line.trim();
            if line.is_empty() && attachment.is_none() {
                continue;
            }
            if !line.is_empty() {
                rl.add_history_entry(line)?;
            }

            if let Some(command) = line.strip_prefix('/') {
                let (command, rest) = split_command(command);
                match command {
                    "back" => break,
                    "help" => print_session_help(),
                    "more" => {
                        let count = session.scroll_to_top();
                        if count == 0 {
                            toast_info("Beginning of history");
                        } else {
                            // A prepend renumbers every message already on
                            // screen, so the whole list is reprinted to keep
                            // the printed labels valid for /copy
                            println!("{}", "── older messages ──".dimmed());
                            print_transcript(&session);
                        }
                    }
                    "attach" => match load_attachment(Path::new(rest)) {
                        Ok(loaded) => {
                            attachment = Some(loaded);
                            toast_success("Image added");
                        }
                        Err(e) => toast_error(&e.to_string()),
                    },
                    "copy" => match rest.parse::<usize>() {
                        Ok(n) if n > 0 => copy_message(&session, n - 1),
                        _ => toast_error("Usage: /copy <message number>"),
                    },
                    _ => toast_error("Unknown command, try /help"),
                }
                continue;
            }

            // Plain input sends a message
            match session.send(line, attachment.clone()) {
                Ok(()) => {
                    attachment = None;
                    let index = session.messages().len() - 1;
                    print_message(index, &session.messages()[index]);

                    println!(
                        "{}",
                        format!("{} is typing...", session.responder_name()).italic().dimmed()
                    );
                    match session.recv_reply().await {
                        ReplyOutcome::Replied => {
                            let index = session.messages().len() - 1;
                            print_message(index, &session.messages()[index]);
                            toast_info(&format!("{} responded", session.responder_name()));
                        }
                        ReplyOutcome::Missed => {
                            toast_error("No reply arrived");
                        }
                    }
                }
                Err(e) => toast_error(&e.to_string()),
            }
        }

        // Dropping the session aborts any still-pending reply task
        Ok(())
    }

    /// Copy a message's text to the system clipboard
    fn copy_message(session: &ChatSession, index: usize) {
        let text = match session.copyable_text(index) {
            Ok(text) => text.to_string(),
            Err(e) => {
                toast_error(&e.to_string());
                return;
            }
        };

        let result = arboard::Clipboard::new()
            .and_then(|mut clipboard| clipboard.set_text(text))
            .map_err(|e| ChatterboxError::Clipboard(e.to_string()));
        match result {
            Ok(()) => toast_success("Copied to clipboard"),
            Err(e) => toast_error(&e.to_string()),
        }
    }

    fn confirm_delete(rl: &mut DefaultEditor) -> Result<bool> {
        match rl.readline("Are you sure you want to delete this chatroom? [y/N] ") {
            Ok(line) => Ok(matches!(line.trim().to_lowercase().as_str(), "y" | "yes")),
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn print_dashboard_help() {
        println!("{}", "Commands: list | search <q> | new <title> | open <id> | delete <id> | logout | quit".dimmed());
    }

    fn print_session_help() {
        println!(
            "{}",
            "Type to send. Commands: /more | /attach <path> | /copy <n> | /back".dimmed()
        );
    }

    fn print_room_list(rooms: &RoomList, query: &str) {
        let filtered = rooms.filter(query);
        if filtered.is_empty() {
            if rooms.is_empty() {
                println!("{}", "No chatrooms yet. Create one with 'new <title>'.".dimmed());
            } else {
                println!("{}", "No matching chatrooms found.".dimmed());
            }
            return;
        }
        print_rooms_table(&filtered);
    }

    /// Placeholder lines shown while a view "loads"
    fn skeleton_lines(rows: usize) -> Vec<String> {
        (0..rows)
            .map(|_| "▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒".dimmed().to_string())
            .collect()
    }

    /// Format one message with its 1-based positional label
    ///
    /// The label is the message's current index in the visible list; it is
    /// what `/copy <n>` resolves against, so printed output must always
    /// reflect current positions.
    fn format_message(index: usize, message: &ChatMessage) -> String {
        let time = message.timestamp.format("%H:%M");
        let label = match message.sender {
            Sender::User => "you".blue().bold(),
            Sender::Assistant => "assistant".green().bold(),
        };

        let mut parts = Vec::new();
        if let Some(text) = message.body.text() {
            parts.push(text.to_string());
        }
        if let Some(image) = message.body.image() {
            parts.push(format!("[{} attachment]", image.mime).magenta().to_string());
        }

        format!(
            "{} {} {}: {}",
            format!("[{}]", index + 1).dimmed(),
            time.to_string().dimmed(),
            label,
            parts.join(" ")
        )
    }

    fn print_message(index: usize, message: &ChatMessage) {
        println!("{}", format_message(index, message));
    }

    /// Print the whole visible message list
    fn print_transcript(session: &ChatSession) {
        for (index, message) in session.messages().iter().enumerate() {
            print_message(index, message);
        }
    }

}

// Non-interactive room management
pub mod rooms {
    //! Room management handlers: list, create, delete.

    use super::*;
    use crate::cli::RoomCommand;
    use crate::config::Config;
    use crate::error::Result;
    use crate::rooms::RoomList;
    use crate::store::RoomStore;
    use std::io::Write;

    /// Run a room management command
    pub fn run_rooms(config: Config, command: RoomCommand) -> Result<()> {
        let store = RoomStore::new(config.storage_path()?)?;
        let mut rooms = RoomList::load(store);

        match command {
            RoomCommand::List { search } => {
                let query = search.unwrap_or_default();
                let filtered = rooms.filter(&query);
                if filtered.is_empty() {
                    println!("No chatrooms found.");
                } else {
                    print_rooms_table(&filtered);
                }
            }
            RoomCommand::Create { title } => match rooms.create(&title) {
                Ok(room) => toast_success(&format!("Chatroom created ({})", room.id)),
                Err(e) => toast_error(&e.to_string()),
            },
            RoomCommand::Delete { id, yes } => {
                if rooms.get(id).is_none() {
                    toast_error(&format!("No chatroom with id {}", id));
                    return Ok(());
                }
                if !yes && !confirm_on_stdin()? {
                    return Ok(());
                }
                rooms.delete(id);
                toast_success("Chatroom deleted");
            }
        }
        Ok(())
    }

    fn confirm_on_stdin() -> Result<bool> {
        print!("Are you sure you want to delete this chatroom? [y/N] ");
        std::io::stdout().flush()?;
        let mut answer = String::new();
        std::io::stdin().read_line(&mut answer)?;
        Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
    }
}

/// Green success toast
fn toast_success(message: &str) {
    println!("{} {}", "✔".green(), message);
}

/// Red error toast
fn toast_error(message: &str) {
    println!("{} {}", "✖".red(), message);
}

/// Neutral info toast
fn toast_info(message: &str) {
    println!("{} {}", "ℹ".cyan(), message);
}

fn print_rooms_table(rooms: &[&Chatroom]) {
    let mut table = Table::new();
    table.add_row(row!["ID", "TITLE"]);
    for room in rooms {
        table.add_row(row![room.id, room.title]);
    }
    table.printstd();
}

/// Split a command word from its argument remainder
fn split_command(line: &str) -> (&str, &str) {
    match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    }
}
