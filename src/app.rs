use chrono::{DateTime, Duration, NaiveDate, Utc};
use tracing::debug;

use crate::cli::{Cli, ConfigCommand, GenerateArgs};
use crate::collect::{inspect_window, scan_updated_files};
use crate::config::{ConfigFile, OverwritePolicy};
use crate::consts::WINDOW_DAYS;
use crate::core::{DateWindow, GlobPattern, IgnoreSet};
use crate::error::{AppError, ConfigError};
use crate::folders::{ConfigFolders, LayeredFolders, ObsidianFolders, ResolvedFolders};
use crate::lock::RunLock;
use crate::orchestrator::{RunOutcome, RunRequest, run};
use crate::output::{
    output_config_json, output_run_json, output_updated_json, output_window_json, plural,
    print_updated_table, print_window_table,
};
use crate::store::FsStore;
use crate::summarize::{Summarizer, derive_client};
use crate::utils::{Timezone, parse_date};
use crate::writer::OutputSink;

pub(crate) struct CommandContext<'a> {
    pub(crate) cli: &'a Cli,
    pub(crate) config: ConfigFile,
    pub(crate) store: FsStore,
    pub(crate) timezone: Timezone,
    /// The run instant
    pub(crate) now: DateTime<Utc>,
    pub(crate) today: NaiveDate,
}

impl<'a> CommandContext<'a> {
    pub(crate) fn new(cli: &'a Cli) -> Result<Self, AppError> {
        let config = ConfigFile::load(cli.config.as_deref())?;
        let timezone = Timezone::parse(cli.timezone.as_deref())?;

        let (now, today) = match cli.date.as_deref() {
            Some(raw) => {
                let date = parse_date(raw)?;
                (timezone.end_of_day(date), date)
            }
            None => {
                let now = Utc::now();
                (now, timezone.local_date(now))
            }
        };
        debug!(%now, %today, vault = %cli.vault.display(), "run context");

        Ok(Self {
            cli,
            config,
            store: FsStore::new(&cli.vault),
            timezone,
            now,
            today,
        })
    }

    fn window(&self) -> DateWindow {
        DateWindow::ending(self.today)
    }

    /// Config tables first, then the vault's own note settings
    fn folders(&self) -> ResolvedFolders {
        let settings = LayeredFolders::new()
            .with(ConfigFolders::new(&self.config.config))
            .with(ObsidianFolders::load(self.store.root()));
        let folders = ResolvedFolders::resolve(&settings);
        debug!(?folders, "resolved folders");
        folders
    }

    fn ignore_set(&self) -> Result<IgnoreSet, AppError> {
        IgnoreSet::new(&self.config.config.ignore_patterns)
    }
}

pub(crate) fn handle_generate(args: &GenerateArgs, ctx: &CommandContext<'_>) -> Result<(), AppError> {
    let config = &ctx.config.config;
    let client = derive_client(config);
    if client.is_none() && !args.dry_run {
        return Err(AppError::MissingApiKey);
    }

    // Dry runs never write, so they may run alongside a real one
    let _lock = if args.dry_run {
        None
    } else {
        Some(RunLock::acquire(ctx.store.root())?)
    };

    let policy = if args.force {
        OverwritePolicy::Overwrite
    } else {
        config.overwrite_policy()
    };
    let sink = match &args.insert {
        Some(path) => OutputSink::Insert {
            path: path.trim_start_matches("./").to_string(),
            line: args.line,
        },
        None => OutputSink::NewNote,
    };
    let request = RunRequest {
        now: ctx.now,
        window: ctx.window(),
        folders: ctx.folders(),
        ignore: ctx.ignore_set()?,
        policy,
        include_updated: config.include_updated() && !args.no_updated,
        sink,
        dry_run: args.dry_run,
    };

    let summarizer = client.as_ref().map(|c| c as &dyn Summarizer);
    let outcome = run(&ctx.store, summarizer, &request)?;
    debug!(path = outcome.path(), "run finished");

    if ctx.cli.json {
        println!("{}", output_run_json(&outcome));
        return Ok(());
    }
    match &outcome {
        RunOutcome::Created { path, notes } => println!(
            "Created {path} from {notes} daily note{}.",
            plural(*notes)
        ),
        RunOutcome::Overwritten { path, notes } => println!(
            "Replaced {path} with a summary of {notes} daily note{}.",
            plural(*notes)
        ),
        RunOutcome::Inserted { path, notes } => println!(
            "Inserted a summary of {notes} daily note{} into {path}.",
            plural(*notes)
        ),
        RunOutcome::DryRun {
            path,
            notes,
            content,
        } => {
            println!(
                "Dry run: {notes} daily note{} would be summarized into {path}.\n",
                plural(*notes)
            );
            println!("{content}");
        }
    }
    Ok(())
}

pub(crate) fn handle_window(ctx: &CommandContext<'_>) -> Result<(), AppError> {
    let window = ctx.window();
    let folders = ctx.folders();
    let days = inspect_window(
        &ctx.store,
        &window,
        &folders.daily_folder,
        &folders.daily_format,
    )?;

    if ctx.cli.json {
        println!("{}", output_window_json(&window, &days));
    } else {
        print_window_table(&window, &days, ctx.cli.use_color());
    }
    Ok(())
}

pub(crate) fn handle_updated(ctx: &CommandContext<'_>) -> Result<(), AppError> {
    let folders = ctx.folders();
    let cutoff = ctx.now - Duration::days(WINDOW_DAYS);
    let files = scan_updated_files(
        &ctx.store,
        cutoff,
        &folders.excluded_folders(),
        &ctx.ignore_set()?,
    )?;

    if ctx.cli.json {
        println!("{}", output_updated_json(&files));
    } else {
        print_updated_table(&files, ctx.timezone, ctx.cli.use_color());
    }
    Ok(())
}

fn summarization_status(file: &ConfigFile) -> &'static str {
    if derive_client(&file.config).is_some() {
        "Summarization is enabled."
    } else {
        "Summarization is disabled until an API key is set."
    }
}

pub(crate) fn handle_config(
    command: &ConfigCommand,
    ctx: &mut CommandContext<'_>,
) -> Result<(), AppError> {
    let file = &mut ctx.config;
    match command {
        ConfigCommand::Show => {
            if ctx.cli.json {
                println!("{}", output_config_json(&file.config));
            } else {
                let text =
                    toml::to_string_pretty(&file.config.redacted()).map_err(ConfigError::from)?;
                println!("# {}", file.path.display());
                print!("{text}");
            }
            return Ok(());
        }
        ConfigCommand::Path => {
            println!("{}", file.path.display());
            return Ok(());
        }
        ConfigCommand::SetKey { key } => {
            file.config.api_key = key.trim().to_string();
            file.save()?;
            println!("API key saved to {}.", file.path.display());
        }
        ConfigCommand::ClearKey => {
            file.config.api_key.clear();
            file.save()?;
            println!("API key removed.");
        }
        ConfigCommand::AddIgnore { pattern } => {
            if pattern.trim().is_empty() {
                return Err(AppError::InvalidPattern {
                    pattern: pattern.clone(),
                    reason: "pattern is empty".to_string(),
                });
            }
            let compiled = GlobPattern::new(pattern.trim())?;
            if file.config.add_ignore_pattern(compiled.as_str()) {
                file.save()?;
                println!("Added ignore pattern \"{}\".", compiled.as_str());
            } else {
                println!("Ignore pattern \"{}\" is already present.", compiled.as_str());
            }
        }
        ConfigCommand::RemoveIgnore { pattern } => {
            if file.config.remove_ignore_pattern(pattern) {
                file.save()?;
                println!("Removed ignore pattern \"{}\".", pattern.trim());
            } else {
                println!("Ignore pattern \"{}\" was not configured.", pattern.trim());
            }
        }
    }
    println!("{}", summarization_status(file));
    Ok(())
}
