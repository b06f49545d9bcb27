//! Command-line interface for sepctl.
//!
//! This module provides argument parsing and command dispatch. Every command
//! takes the proposal directory from the global `--dir` flag and threads it
//! into the engine explicitly; there is no ambient default beyond the flag's
//! own default value.

use std::fs;
use std::io::BufRead;

use anyhow::{Context, Result, bail};
use camino::{Utf8Path, Utf8PathBuf};
use chrono::Local;
use clap::{Parser, Subcommand};
use sepctl_proposal::{
    Status, find_by_number, find_conflicts, group_by_status, next_number, recommend, scan,
};
use sepctl_templates::{INIT_FILES, PROPOSAL_TEMPLATE};
use sepctl_utils::{logging, slug};

use crate::exit_codes::ExitCode;
use crate::feedback;

/// sepctl - Software Enhancement Proposal workflow tool
#[derive(Parser)]
#[command(name = "sepctl")]
#[command(about = "A CLI tool for managing Software Enhancement Proposals (SEPs)")]
#[command(long_about = r#"
sepctl tracks proposals as markdown files with YAML frontmatter in a
directory of your repository (default: docs/seps). Each file carries a
4-digit number, a lifecycle status, dependencies, ownership, and
affected-area tags.

EXAMPLES:
  # Scaffold the proposal directory
  sepctl init

  # Create a proposal and move it through its lifecycle
  sepctl new "User Authentication"
  sepctl update 1 ACCEPTED
  sepctl update 1 DONE

  # See what to work on next
  sepctl status

  # Coordinate with other owners
  sepctl pipeline
  sepctl claim 1 @alice
  sepctl sync

STATUSES:
  DRAFT -> ACCEPTED -> DONE, with BLOCKED and CANCELLED as side exits.
  Transitions only happen through 'sepctl update'; nothing is automatic.
"#)]
#[command(version)]
pub struct Cli {
    /// Directory containing SEP files
    #[arg(short, long, global = true, default_value = "docs/seps")]
    pub dir: Utf8PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Scaffold the proposal directory (process doc + template)
    Init {
        /// Overwrite existing files
        #[arg(short, long)]
        force: bool,
    },

    /// Create a new SEP from the template with the next available number
    New {
        /// Proposal title
        title: String,
    },

    /// List all SEPs, optionally filtered by status
    List {
        /// Filter by status (DRAFT, ACCEPTED, BLOCKED, CANCELLED, DONE)
        #[arg(short, long)]
        status: Option<String>,

        /// Emit the proposal list as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show SEP status and recommend the next action
    Status {
        /// Emit status counts and the recommendation as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the active pipeline with area conflicts
    Pipeline,

    /// Update a SEP's status
    Update {
        /// SEP number (short forms like "7" are padded)
        number: String,

        /// New status: DRAFT, ACCEPTED, BLOCKED, CANCELLED, DONE
        status: String,
    },

    /// Assign an owner to a SEP (empty owner unassigns)
    Assign {
        /// SEP number
        number: String,

        /// Owner identifier, e.g. "@alice"; "" to unassign
        owner: String,
    },

    /// Claim a SEP: assign, commit, and push in one step
    Claim {
        /// SEP number
        number: String,

        /// Owner identifier; "" releases the claim
        owner: String,
    },

    /// Pull the latest changes and show the pipeline
    Sync,

    /// Record feedback about the tool or a specific SEP
    Feedback {
        /// Feedback text; omit to enter it interactively
        message: Option<String>,

        /// Link the feedback to a SEP number
        #[arg(long)]
        sep: Option<String>,

        /// Feedback log file
        #[arg(long, default_value = "docs/feedback.log")]
        file: Utf8PathBuf,

        #[command(subcommand)]
        command: Option<FeedbackCommands>,
    },
}

#[derive(Subcommand)]
pub enum FeedbackCommands {
    /// View recorded feedback
    List,
    /// Clear all feedback (after reviewing)
    Clear,
}

/// Parse arguments, execute the selected command, and report errors.
///
/// All output, including error messages, happens here; the caller only maps
/// the returned exit code to process termination.
pub fn run() -> Result<(), ExitCode> {
    let cli = Cli::parse();

    if let Err(err) = logging::init_tracing(cli.verbose) {
        eprintln!("warning: failed to initialize logging: {err}");
    }

    match execute(&cli) {
        Ok(()) => Ok(()),
        Err(err) => {
            eprintln!("error: {err:#}");
            Err(ExitCode::from_error(&err))
        }
    }
}

fn execute(cli: &Cli) -> Result<()> {
    let dir = cli.dir.as_path();
    tracing::debug!(%dir, "using proposal directory");
    match &cli.command {
        Commands::Init { force } => cmd_init(dir, *force),
        Commands::New { title } => cmd_new(dir, title),
        Commands::List { status, json } => cmd_list(dir, status.as_deref(), *json),
        Commands::Status { json } => cmd_status(dir, *json),
        Commands::Pipeline => cmd_pipeline(dir),
        Commands::Update { number, status } => cmd_update(dir, number, status),
        Commands::Assign { number, owner } => cmd_assign(dir, number, owner),
        Commands::Claim { number, owner } => cmd_claim(dir, number, owner),
        Commands::Sync => cmd_sync(dir),
        Commands::Feedback { message, sep, file, command } => {
            cmd_feedback(file, message.as_deref(), sep.as_deref(), command.as_ref())
        }
    }
}

fn cmd_init(dir: &Utf8Path, force: bool) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("failed to create directory {dir}"))?;

    let mut created = 0;
    let mut skipped = 0;
    for template in INIT_FILES {
        let dest = dir.join(template.name);
        if dest.exists() && !force {
            println!("  Skipped: {dest} (exists)");
            skipped += 1;
            continue;
        }
        fs::write(&dest, template.contents)
            .with_context(|| format!("failed to write {dest}"))?;
        println!("  Created: {dest}");
        created += 1;
    }

    print!("\nInitialized SEP workflow: {created} files created");
    if skipped > 0 {
        print!(", {skipped} skipped");
    }
    println!();
    println!("\nNext steps:");
    println!("  1. Review {dir}/0000-sep-process.md");
    println!("  2. Create your first SEP: sepctl new \"Your Feature\"");
    Ok(())
}

fn cmd_new(dir: &Utf8Path, title: &str) -> Result<()> {
    let number = next_number(dir)?;
    let filename = format!("{number}-{}.md", slug::slugify(title));
    let path = dir.join(filename);
    if path.exists() {
        bail!("file already exists: {path}");
    }

    fs::create_dir_all(dir).with_context(|| format!("failed to create directory {dir}"))?;

    // A directory-local template overrides the embedded one.
    let template = match fs::read_to_string(dir.join("SEP-TEMPLATE.md")) {
        Ok(local) => local,
        Err(_) => PROPOSAL_TEMPLATE.to_string(),
    };

    let today = Local::now().format("%Y-%m-%d").to_string();
    let content = render_template(&template, &number, title, &today);
    fs::write(&path, content).with_context(|| format!("failed to create SEP at {path}"))?;

    println!("Created: {path}");
    println!("-> SEP-{number}: {title}");
    Ok(())
}

/// Substitute the scaffold placeholders. "SEP-XXXX" must be replaced before
/// the bare "XXXX" token.
fn render_template(template: &str, number: &str, title: &str, date: &str) -> String {
    template
        .replace("SEP-XXXX", &format!("SEP-{number}"))
        .replace("XXXX", number)
        .replace("[Title]", title)
        .replace("YYYY-MM-DD", date)
}

fn cmd_list(dir: &Utf8Path, status_filter: Option<&str>, json: bool) -> Result<()> {
    let mut proposals = scan(dir)?;

    if let Some(filter) = status_filter {
        let filter = filter.to_uppercase();
        proposals.retain(|p| p.status == filter);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&proposals)?);
        return Ok(());
    }

    if proposals.is_empty() {
        println!("No SEPs found.");
        return Ok(());
    }

    let groups = group_by_status(&proposals);
    for status in Status::DISPLAY_ORDER {
        let Some(group) = groups.get(status.as_ref()) else {
            continue;
        };
        println!("\n{status}:");
        for p in group {
            let deps = match p.depends_on.first() {
                Some(dep) => format!(" [depends on: SEP-{dep}]"),
                None => String::new(),
            };
            println!(
                "  {}  {}  (created {}){deps}",
                p.id(),
                truncate(&p.title, 50),
                p.created
            );
        }
    }
    println!("\n---\nTotal: {} SEPs", proposals.len());
    Ok(())
}

fn cmd_status(dir: &Utf8Path, json: bool) -> Result<()> {
    let proposals = scan(dir)?;

    if json {
        let groups = group_by_status(&proposals);
        let counts: serde_json::Map<String, serde_json::Value> = groups
            .iter()
            .map(|(status, group)| ((*status).to_string(), group.len().into()))
            .collect();
        let output = serde_json::json!({
            "total": proposals.len(),
            "counts": counts,
            "next": recommend(&proposals).to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if proposals.is_empty() {
        println!("No SEPs found. Run 'sepctl init' to get started.");
        return Ok(());
    }

    println!("SEP Status");
    println!("{}", "=".repeat(40));

    let groups = group_by_status(&proposals);
    let headers = [
        (Status::Accepted, "ACCEPTED (ready for implementation)"),
        (Status::Draft, "DRAFT (awaiting review)"),
        (Status::Blocked, "BLOCKED"),
        (Status::Done, "DONE"),
        (Status::Cancelled, "CANCELLED"),
    ];
    for (status, header) in headers {
        let Some(group) = groups.get(status.as_ref()) else {
            continue;
        };
        println!("\n{header}:");
        for p in group {
            let deps = if p.depends_on.is_empty() {
                String::new()
            } else {
                format!(" [depends on: SEP-{}]", p.depends_on.join(", SEP-"))
            };
            if status.is_live() {
                println!("  - {}: {} (created {}){deps}", p.id(), p.title, p.created);
            } else {
                println!("  - {}: {}", p.id(), p.title);
            }
        }
    }

    println!("\nNEXT: {}", recommend(&proposals));
    Ok(())
}

fn cmd_pipeline(dir: &Utf8Path) -> Result<()> {
    let proposals = scan(dir)?;
    if proposals.is_empty() {
        println!("No SEPs found. Run 'sepctl init' to get started.");
        return Ok(());
    }

    let conflicts = find_conflicts(&proposals);
    let mut conflicts_of = std::collections::HashMap::<&str, Vec<&str>>::new();
    for c in &conflicts {
        conflicts_of.entry(&c.first.number).or_default().push(&c.second.number);
        conflicts_of.entry(&c.second.number).or_default().push(&c.first.number);
    }

    println!("SEP Pipeline - Area Conflicts");
    println!("{}", "=".repeat(50));

    let groups = group_by_status(&proposals);
    for status in [Status::Accepted, Status::Draft, Status::Blocked] {
        let Some(group) = groups.get(status.as_ref()) else {
            continue;
        };
        println!("\n{status}:");
        for p in group {
            let assigned = if p.assigned.is_empty() {
                String::new()
            } else {
                format!(" [{}]", p.assigned)
            };
            let conflict = match conflicts_of.get(p.number.as_str()) {
                Some(others) => format!(" !! CONFLICT with SEP-{}", others.join(", SEP-")),
                None => String::new(),
            };
            println!("  {}: {}{assigned}{conflict}", p.id(), p.title);
            if p.areas.is_empty() {
                println!("    areas: (not specified)");
            } else {
                println!("    areas: {}", p.areas.join(", "));
            }
            if !p.depends_on.is_empty() {
                println!("    depends_on: SEP-{}", p.depends_on.join(", SEP-"));
            }
        }
    }

    if let Some(done) = groups.get(Status::Done.as_ref()) {
        println!("\nDONE: {} SEPs completed", done.len());
    }

    if !conflicts.is_empty() {
        println!("\n{}", "-".repeat(50));
        println!("!! Conflicts detected:");
        for c in &conflicts {
            let owners = match (c.first.assigned.as_str(), c.second.assigned.as_str()) {
                ("", "") => String::new(),
                (a, "") => format!(" ({a} assigned)"),
                ("", b) => format!(" ({b} assigned)"),
                (a, b) => format!(" ({a} vs {b})"),
            };
            println!(
                "  {} <-> {}: {}{owners}",
                c.first.id(),
                c.second.id(),
                c.overlap.join(", ")
            );
        }
        println!("\n-> Coordinate with assigned owners or implement sequentially");
    }

    Ok(())
}

fn cmd_update(dir: &Utf8Path, number: &str, status: &str) -> Result<()> {
    let new_status = status.to_uppercase();
    let mut proposal = find_by_number(dir, number)?;
    let old_status = proposal.status.clone();

    proposal.set_status(&new_status)?;
    println!("Updated {}: {} -> {}", proposal.id(), old_status, new_status);
    Ok(())
}

fn cmd_assign(dir: &Utf8Path, number: &str, owner: &str) -> Result<()> {
    let mut proposal = find_by_number(dir, number)?;
    let old = display_owner(&proposal.assigned).to_string();

    proposal.set_assigned(owner).context("failed to assign")?;
    println!("Updated {}: {} -> {}", proposal.id(), old, display_owner(owner));
    Ok(())
}

fn cmd_claim(dir: &Utf8Path, number: &str, owner: &str) -> Result<()> {
    let mut proposal = find_by_number(dir, number)?;

    if !proposal.assigned.is_empty() && proposal.assigned != owner && !owner.is_empty() {
        bail!(
            "{} is already claimed by {}. Coordinate with them first",
            proposal.id(),
            proposal.assigned
        );
    }

    let previous = proposal.assigned.clone();
    proposal.set_assigned(owner).context("failed to assign")?;

    sepctl_vcs::add(proposal.path.as_str()).context("git add failed")?;
    let message = if owner.is_empty() {
        format!("{}: unclaimed (was {previous})", proposal.id())
    } else if previous.is_empty() {
        format!("{}: claimed by {owner}", proposal.id())
    } else {
        format!("{}: reassigned from {previous} to {owner}", proposal.id())
    };
    sepctl_vcs::commit(&message).context("git commit failed")?;
    sepctl_vcs::push().context("git push failed")?;

    if owner.is_empty() {
        println!("{} unclaimed and pushed", proposal.id());
    } else {
        println!("{} claimed by {owner} and pushed", proposal.id());
    }
    Ok(())
}

fn cmd_sync(dir: &Utf8Path) -> Result<()> {
    println!("Pulling latest changes...");
    sepctl_vcs::pull().context("git pull failed")?;
    println!();
    cmd_pipeline(dir)
}

fn cmd_feedback(
    file: &Utf8Path,
    message: Option<&str>,
    sep: Option<&str>,
    command: Option<&FeedbackCommands>,
) -> Result<()> {
    match command {
        Some(FeedbackCommands::List) => {
            match feedback::read(file)? {
                Some(content) => {
                    println!("Feedback Log");
                    println!("{}", "=".repeat(50));
                    println!("{content}");
                }
                None => println!("No feedback recorded yet."),
            }
            Ok(())
        }
        Some(FeedbackCommands::Clear) => {
            feedback::clear(file)?;
            println!("Feedback cleared");
            Ok(())
        }
        None => {
            let message = match message {
                Some(text) => text.to_string(),
                None => read_multiline_from_stdin()?,
            };
            feedback::record(file, &message, sep)?;
            println!("Feedback recorded");
            Ok(())
        }
    }
}

fn read_multiline_from_stdin() -> Result<String> {
    println!("Enter feedback (empty line to finish):");
    let mut lines = Vec::new();
    for line in std::io::stdin().lock().lines() {
        let line = line.context("failed to read feedback from stdin")?;
        if line.is_empty() {
            break;
        }
        lines.push(line);
    }
    Ok(lines.join("\n"))
}

fn display_owner(owner: &str) -> &str {
    if owner.is_empty() { "(unassigned)" } else { owner }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{kept}...")
}
