//! CLI command handlers that bridge CLI arguments to library operations
//!
//! Handlers resolve the vault, expand `@daily`, call into `notevault::ops`, and
//! print the outcome. Data (paths, note content) always goes to stdout; status
//! messages are dropped under `--quiet`.

use crate::cli_bin::args::*;
use chrono::{Local, NaiveDate};
use log::{debug, info};
use notevault::error::{NoteVaultError, Result};
use notevault::io::{
    ConfigStore, ConfigUpdate, EditorLauncher, EntryLister, FzfFinder, JsonConfigStore,
    NoteStore, SystemEditor, SystemUriLauncher, Vault, VaultRegistry,
};
use notevault::ops::{self, wrap_daily_note_error};
use notevault::MetadataFilter;
use std::io::{IsTerminal, Read};

/// Collaborators and settings shared by every command
pub struct Context {
    vault_override: Option<String>,
    quiet: bool,
    config: JsonConfigStore,
    registry: VaultRegistry,
    store: NoteStore,
    lister: EntryLister,
    uri: SystemUriLauncher,
    editor: SystemEditor,
    finder: FzfFinder,
}

impl Context {
    /// Context backed by the real preferences file, registry and programs
    pub fn from_env(vault_override: Option<String>, quiet: bool) -> Self {
        Self {
            vault_override,
            quiet,
            config: JsonConfigStore::default_location(),
            registry: VaultRegistry::default_location(),
            store: NoteStore::new(),
            lister: EntryLister::new(),
            uri: SystemUriLauncher,
            editor: SystemEditor,
            finder: FzfFinder::new(),
        }
    }

    fn vault(&self) -> Result<Vault> {
        Vault::resolve(self.vault_override.as_deref(), &self.config, &self.registry)
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn resolve_note_name(&self, note_name: &str) -> Result<String> {
        ops::resolve_note_name(note_name, &self.config, self.today())
    }

    fn report(&self, message: &str) {
        if !self.quiet {
            println!("{}", message);
        }
    }
}

/// Execute the open command
pub fn open_command(ctx: &Context, args: OpenArgs) -> Result<()> {
    let vault = ctx.vault()?;
    let params = ops::OpenParams {
        note_name: ctx.resolve_note_name(&args.note)?,
        section: args.section,
        create_if_not_exist: args.create_if_not_exist,
    };
    debug!("Opening {} in vault {}", params.note_name, vault.name());
    ops::open_note(&vault, &ctx.uri, &params)
}

/// Execute the daily command
pub fn daily_command(ctx: &Context) -> Result<()> {
    let vault = ctx.vault()?;
    ops::daily_note(&vault, &ctx.uri, &ctx.config, ctx.today())
}

/// Execute the search command
pub fn search_command(ctx: &Context, args: SearchArgs) -> Result<()> {
    let filter = MetadataFilter::parse(&args.meta.meta)?;
    let vault = ctx.vault()?;
    let note = ops::search_notes(&vault, &ctx.store, &ctx.finder, &filter)?;

    if args.editor {
        let path = ctx.store.note_path(&vault, &note)?;
        return ctx.editor.open_in_editor(&path);
    }
    ops::open_note(
        &vault,
        &ctx.uri,
        &ops::OpenParams {
            note_name: note,
            ..Default::default()
        },
    )
}

/// Execute the search-content command
pub fn search_content_command(ctx: &Context, args: SearchContentArgs) -> Result<()> {
    let vault = ctx.vault()?;
    match ops::search_content(&vault, &ctx.store, &ctx.finder, &args.term)? {
        Some(path) => println!("{}", path),
        None => ctx.report(&format!("No notes found containing '{}'", args.term)),
    }
    Ok(())
}

/// Execute the list command
pub fn list_command(ctx: &Context, args: ListArgs) -> Result<()> {
    let params = ops::ListParams {
        path: args.path,
        full_path: args.full_path,
        filter: MetadataFilter::parse(&args.meta.meta)?,
    };
    let vault = ctx.vault()?;
    for entry in ops::list_entries(&vault, &ctx.lister, &params)? {
        println!("{}", entry);
    }
    Ok(())
}

/// Execute the print command
pub fn print_command(ctx: &Context, args: PrintArgs) -> Result<()> {
    let vault = ctx.vault()?;
    let params = ops::PrintParams {
        note_name: ctx.resolve_note_name(&args.note)?,
        include_mentions: args.mentions,
    };
    let content = ops::print_note(&vault, &ctx.store, &params)
        .map_err(|e| wrap_daily_note_error(&args.note, e))?;
    println!("{}", content);
    Ok(())
}

/// Execute the create command
pub fn create_command(ctx: &Context, args: CreateArgs) -> Result<()> {
    let content = match args.content {
        Some(content) if !content.is_empty() => content,
        _ => read_piped_stdin()?.ok_or(NoteVaultError::MissingContent)?,
    };

    let vault = ctx.vault()?;
    let params = ops::CreateParams {
        note_name: ctx.resolve_note_name(&args.note)?,
        content,
        append: args.append,
        overwrite: args.overwrite,
        open: args.open,
        use_editor: args.editor,
    };
    ops::create_note(&vault, &ctx.store, &ctx.uri, &ctx.editor, &params)?;
    info!("Created note {}", params.note_name);
    Ok(())
}

/// Execute the append command
pub fn append_command(ctx: &Context, args: AppendArgs) -> Result<()> {
    let content = match args.content {
        Some(content) if !content.is_empty() => content,
        _ => read_piped_stdin()?.ok_or(NoteVaultError::MissingContent)?,
    };

    let vault = ctx.vault()?;
    let params = ops::AppendParams {
        note_name: ctx.resolve_note_name(&args.note)?,
        content,
    };
    let message = ops::append_to_note(&vault, &ctx.store, &params)
        .map_err(|e| wrap_daily_note_error(&args.note, e))?;
    ctx.report(&message);
    Ok(())
}

/// Execute the edit command
pub fn edit_command(ctx: &Context, args: EditArgs) -> Result<()> {
    let vault = ctx.vault()?;
    let params = ops::EditParams {
        note_name: ctx.resolve_note_name(&args.note)?,
        old_string: args.old_string,
        new_string: args.new_string,
        replace_all: args.all,
    };
    let message = ops::edit_note(&vault, &ctx.store, &params)
        .map_err(|e| wrap_daily_note_error(&args.note, e))?;
    ctx.report(&message);
    Ok(())
}

/// Execute the frontmatter command
pub fn frontmatter_command(ctx: &Context, args: FrontmatterArgs) -> Result<()> {
    let vault = ctx.vault()?;
    let note_name = ctx.resolve_note_name(&args.note)?;
    let wrap = |e: NoteVaultError| wrap_daily_note_error(&args.note, e);

    if args.print {
        let yaml = ops::print_frontmatter(&vault, &ctx.store, &note_name).map_err(wrap)?;
        print!("{}", yaml);
        return Ok(());
    }

    if let Some(pair) = &args.set {
        if let [key, value] = pair.as_slice() {
            let message =
                ops::set_frontmatter(&vault, &ctx.store, &note_name, key, value).map_err(wrap)?;
            ctx.report(&message);
        }
        return Ok(());
    }

    if let Some(key) = &args.delete {
        let message = ops::delete_frontmatter(&vault, &ctx.store, &note_name, key).map_err(wrap)?;
        ctx.report(&message);
    }
    Ok(())
}

/// Execute the set-default command
pub fn set_default_command(ctx: &Context, args: SetDefaultArgs) -> Result<()> {
    ctx.config
        .set(ConfigUpdate::default_vault_name(args.name.clone()))?;
    ctx.report(&format!("Default vault set to: {}", args.name));
    Ok(())
}

/// Execute the print-default command
pub fn print_default_command(ctx: &Context, args: PrintDefaultArgs) -> Result<()> {
    let name = ctx.config.get()?.default_vault_name;
    if name.trim().is_empty() {
        return Err(NoteVaultError::DefaultVaultNotSet);
    }
    let path = ctx.registry.path_for(&name)?;

    if args.path_only {
        println!("{}", path.display());
    } else {
        println!("Default vault name: {}", name);
        println!("Default vault path: {}", path.display());
    }
    Ok(())
}

/// Execute the set-daily-pattern command
pub fn set_daily_pattern_command(ctx: &Context, args: SetDailyPatternArgs) -> Result<()> {
    ctx.config
        .set(ConfigUpdate::daily_note_pattern(args.pattern.clone()))?;
    ctx.report(&format!("Daily note pattern set to: {}", args.pattern));
    Ok(())
}

/// Stdin content when something is piped in; `None` for a terminal or empty input
fn read_piped_stdin() -> Result<Option<String>> {
    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }
    let mut content = String::new();
    stdin.read_to_string(&mut content)?;
    Ok(Some(content).filter(|c| !c.is_empty()))
}
