// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

mod args;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

pub use args::{CategoryArgs, OutputArgs, OutputFormat};

/// Parse a string that must not be empty or whitespace-only.
fn non_empty_string(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        Err("cannot be empty".to_string())
    } else {
        Ok(s.to_string())
    }
}

#[derive(Parser)]
#[command(name = "studyhub")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Offline-first study planner: tasks, flashcards, notes and study sessions")]
#[command(
    long_about = "Offline-first study planner.\n\n\
    Every change is saved locally first. When a remote API is configured, changes are \
    sent to it right away, or queued and replayed once the remote is reachable again."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Initialize a .studyhub directory
    #[command(after_help = "\
Examples:
  studyhub init                                 Local-only store
  studyhub init --remote https://api.example.com/v1
                                                Sync with a remote API")]
    Init {
        /// Base URL of the remote API
        #[arg(long)]
        remote: Option<String>,

        /// Directory to initialize (default: current directory)
        #[arg(long)]
        path: Option<String>,
    },

    /// Manage tasks
    #[command(subcommand)]
    Task(TaskCommand),

    /// Manage flashcards
    #[command(subcommand)]
    Card(CardCommand),

    /// Manage notes
    #[command(subcommand)]
    Note(NoteCommand),

    /// Log and list study sessions
    #[command(subcommand)]
    Session(SessionCommand),

    /// Sync queued changes with the remote (default: run)
    Sync {
        #[command(subcommand)]
        command: Option<SyncCommand>,
    },

    /// Export all local data to a JSON file
    #[command(arg_required_else_help = true)]
    Export {
        /// Destination file path
        filepath: String,
    },

    /// Replace local tables with the ones in an exported JSON file
    #[command(
        arg_required_else_help = true,
        after_help = "\
Only tables present in the file are replaced; the others are left untouched.
Imported records are marked unsynced."
    )]
    Import {
        /// Exported JSON file
        filepath: String,

        /// Queue the imported records so the next sync uploads them
        #[arg(long)]
        requeue: bool,
    },

    /// Delete all local records and the sync queue
    Clear {
        /// Confirm the deletion
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Generate shell completions
    #[command(arg_required_else_help = true)]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Task commands.
#[derive(Subcommand)]
pub enum TaskCommand {
    /// Add a task
    #[command(after_help = "\
Examples:
  studyhub task add \"Read chapter 3\"
  studyhub task add \"Essay draft\" -p high --due 2026-03-01 -c english")]
    Add {
        /// Task title
        #[arg(value_parser = non_empty_string)]
        title: String,

        /// Longer description
        #[arg(long, short = 'd')]
        description: Option<String>,

        /// Priority (low, medium, high)
        #[arg(long, short = 'p')]
        priority: Option<String>,

        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,

        /// Category
        #[arg(long, short = 'c')]
        category: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// List tasks
    List {
        /// Include completed tasks
        #[arg(long, short = 'a')]
        all: bool,

        #[command(flatten)]
        category: CategoryArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show a task
    #[command(arg_required_else_help = true)]
    Show {
        id: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Mark task(s) as done
    #[command(arg_required_else_help = true)]
    Done {
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Edit task fields
    #[command(arg_required_else_help = true)]
    Edit {
        id: String,

        #[arg(long, value_parser = non_empty_string)]
        title: Option<String>,

        #[arg(long, short = 'd')]
        description: Option<String>,

        /// Priority (low, medium, high)
        #[arg(long, short = 'p')]
        priority: Option<String>,

        /// Due date (YYYY-MM-DD), or "none" to clear it
        #[arg(long)]
        due: Option<String>,

        #[arg(long, short = 'c')]
        category: Option<String>,

        /// Mark the task as not done
        #[arg(long)]
        reopen: bool,
    },

    /// Delete task(s)
    #[command(arg_required_else_help = true)]
    Rm {
        #[arg(required = true)]
        ids: Vec<String>,
    },
}

/// Flashcard commands.
#[derive(Subcommand)]
pub enum CardCommand {
    /// Add a flashcard
    #[command(arg_required_else_help = true)]
    Add {
        #[arg(value_parser = non_empty_string)]
        front: String,

        #[arg(value_parser = non_empty_string)]
        back: String,

        #[arg(long, short = 'c')]
        category: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// List flashcards
    List {
        /// Only cards due for review
        #[arg(long)]
        due: bool,

        #[command(flatten)]
        category: CategoryArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Record a review and schedule the next one
    #[command(after_help = "\
Examples:
  studyhub card review card-1a2b3c4d easy     Next review in 4+ days
  studyhub card review card-1a2b3c4d hard     Next review in 1+ day")]
    Review {
        id: String,

        /// How hard recall was (easy, medium, hard)
        difficulty: String,
    },

    /// Delete flashcard(s)
    #[command(arg_required_else_help = true)]
    Rm {
        #[arg(required = true)]
        ids: Vec<String>,
    },
}

/// Note commands.
#[derive(Subcommand)]
pub enum NoteCommand {
    /// Add a note
    #[command(arg_required_else_help = true)]
    Add {
        #[arg(value_parser = non_empty_string)]
        title: String,

        /// Note body
        content: Option<String>,

        #[arg(long, short = 'c')]
        category: Option<String>,

        /// Tag(s) (comma-separated or repeated)
        #[arg(long, short = 't', value_delimiter = ',')]
        tag: Vec<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// List notes
    List {
        /// Only notes with this tag
        #[arg(long, short = 't')]
        tag: Option<String>,

        #[command(flatten)]
        category: CategoryArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show a note
    #[command(arg_required_else_help = true)]
    Show {
        id: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Delete note(s)
    #[command(arg_required_else_help = true)]
    Rm {
        #[arg(required = true)]
        ids: Vec<String>,
    },
}

/// Study session commands.
#[derive(Subcommand)]
pub enum SessionCommand {
    /// Log a finished session ending now
    #[command(after_help = "\
Examples:
  studyhub session log Math 25 --type pomodoro
  studyhub session log Biology 90")]
    Log {
        #[arg(value_parser = non_empty_string)]
        subject: String,

        /// Length in minutes
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        minutes: u32,

        /// Session type (pomodoro, regular)
        #[arg(long = "type", short = 't')]
        session_type: Option<String>,
    },

    /// List sessions
    List {
        /// Only sessions for this subject
        #[arg(long, short = 's')]
        subject: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },
}

/// Sync commands.
#[derive(Subcommand)]
pub enum SyncCommand {
    /// Show online state, queue length and last sync time
    Status {
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Replay the queue now and record the sync time
    Run,
    /// Keep probing the remote and sync whenever it comes back (Ctrl-C to stop)
    Watch {
        /// Seconds between probes (default: remote.probe_interval_secs)
        #[arg(long)]
        interval: Option<u64>,
    },
    /// Queue every unsynced record that has no pending change, then sync
    Resync,
}
