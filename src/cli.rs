// src/cli.rs
use std::{
    env,
    io::Write,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::{
    config::options::{AppOptions, ExportFormat, ExportScope, ExtractMode},
    coordinator::Coordinator,
    error::{Error, Result},
    file, icon,
    log::{self, Sink},
    messages::Handler,
    model::{Category, PersistedState, now_ms},
    page::{PageAgent, PageSnapshot},
    store::{FileStore, KeyValueStore, MemoryStore, RecordStore},
    view,
    watch::{self, CancelToken, WaitOptions},
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Extract {
        page: PathBuf,
        wait: Option<String>,
        timeout_ms: Option<u64>,
    },
    Detect { page: PathBuf },
    List { category: Category, search: String },
    Export,
    Delete { category: Category, id: String },
    Clear(Option<Category>),
    Stats,
    Icons(PathBuf),
    Help,
}

#[derive(Clone, Debug)]
pub struct Params {
    pub command: Command,
    pub options: AppOptions,
    pub url: Option<String>,
    pub title: Option<String>,
    pub store_path: Option<PathBuf>,
}

pub fn run() -> Result<()> {
    log::init(Sink::Stderr);
    let params = parse_args(env::args().skip(1))?;
    let stdout = std::io::stdout();
    execute(&params, &mut stdout.lock())
}

fn category_arg(v: Option<String>, what: &str) -> Result<Category> {
    let v = v.ok_or_else(|| Error::Usage(format!("Missing {what}")))?;
    Category::from_key(&v).ok_or_else(|| Error::Usage(format!("Unknown category: {v}")))
}

fn value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String> {
    args.next().ok_or_else(|| Error::Usage(format!("Missing value for {flag}")))
}

pub fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Params> {
    let mut args = args.into_iter();
    let mut options = AppOptions::default();
    let mut url = None;
    let mut title = None;
    let mut store_path = None;
    let mut search = s!();
    let mut wait = None;
    let mut timeout_ms = None;
    let mut out = s!();
    let mut positional: Vec<String> = Vec::new();

    while let Some(a) = args.next() {
        match a.as_str() {
            "--url" => url = Some(value(&mut args, "--url")?),
            "--title" => title = Some(value(&mut args, "--title")?),
            "--as" => {
                let cat = category_arg(args.next(), "category for --as")?;
                options.extract.mode = ExtractMode::Typed(cat);
            }
            "--wait" => wait = Some(value(&mut args, "--wait")?),
            "--timeout" => {
                let v = value(&mut args, "--timeout")?;
                timeout_ms = Some(v.parse().map_err(|_| Error::Usage(format!("Invalid timeout: {v}")))?);
            }
            "--dry-run" => options.extract.save = false,
            "--search" => search = value(&mut args, "--search")?,
            "--format" => {
                let v = value(&mut args, "--format")?;
                options.export.format = ExportFormat::from_name(&v)
                    .ok_or_else(|| Error::Usage(format!("Unknown format: {v}")))?;
            }
            "-o" | "--out" => out = value(&mut args, "--out")?,
            "--store" => store_path = Some(PathBuf::from(value(&mut args, "--store")?)),
            "-h" | "--help" => positional.insert(0, s!("help")),
            flag if flag.starts_with("--") => return Err(Error::Usage(format!("Unknown arg: {flag}"))),
            _ => positional.push(a),
        }
    }

    let mut pos = positional.into_iter();
    let command = match pos.next().as_deref() {
        None | Some("help") => Command::Help,
        Some("extract") => Command::Extract {
            page: PathBuf::from(value(&mut pos, "page")?),
            wait,
            timeout_ms,
        },
        Some("detect") => Command::Detect { page: PathBuf::from(value(&mut pos, "page")?) },
        Some("list") => Command::List { category: category_arg(pos.next(), "category")?, search },
        Some("export") => {
            let scope = value(&mut pos, "category")?;
            options.export.scope = if scope.eq_ignore_ascii_case("all") {
                ExportScope::All
            } else {
                ExportScope::One(category_arg(Some(scope), "category")?)
            };
            file::resolve_out(&mut options.export, &out);
            Command::Export
        }
        Some("delete") => Command::Delete {
            category: category_arg(pos.next(), "category")?,
            id: value(&mut pos, "id")?,
        },
        Some("clear") => Command::Clear(match pos.next() {
            Some(c) => Some(category_arg(Some(c), "category")?),
            None => None,
        }),
        Some("stats") => Command::Stats,
        Some("icons") => Command::Icons(PathBuf::from(pos.next().unwrap_or_else(|| s!("assets")))),
        Some(other) => return Err(Error::Usage(format!("Unknown command: {other}"))),
    };

    Ok(Params { command, options, url, title, store_path })
}

fn open_store(params: &Params) -> RecordStore<FileStore> {
    match &params.store_path {
        Some(p) => RecordStore::new(FileStore::open(p)),
        None => RecordStore::new(FileStore::default_location()),
    }
}

pub fn execute<W: Write>(params: &Params, out: &mut W) -> Result<()> {
    match &params.command {
        Command::Help => {
            write!(out, "{}", include_str!("cli_help.txt"))?;
        }
        Command::Extract { page, wait, timeout_ms } => {
            let snapshot = load_page(params, page, wait.as_deref(), *timeout_ms)?;
            let agent = PageAgent::new(snapshot, params.options.extract.clone());
            if params.options.extract.save {
                extract_into(open_store(params), agent, out)?;
            } else {
                extract_into(RecordStore::new(MemoryStore::new()), agent, out)?;
            }
        }
        Command::Detect { page } => {
            let snapshot = PageSnapshot::load(page, params.url.as_deref(), params.title.as_deref())?;
            let agent = PageAgent::new(snapshot, params.options.extract.clone());
            match agent.detect() {
                Some(cat) => writeln!(out, "{} ({})", cat, cat.badge())?,
                None => writeln!(out, "unknown")?,
            }
        }
        Command::List { category, search } => {
            let state = open_store(params).load()?;
            list(&state, *category, search, out)?;
        }
        Command::Export => {
            let state = open_store(params).load()?;
            let path = file::write_export(&state, &params.options.export, now_ms())?;
            writeln!(out, "Exported to {}", path.display())?;
        }
        Command::Delete { category, id } => {
            if open_store(params).delete_record(*category, id)? {
                writeln!(out, "Deleted {category} {id}")?;
            } else {
                writeln!(out, "No {category} record with id {id}")?;
            }
        }
        Command::Clear(Some(cat)) => {
            open_store(params).clear_category(*cat)?;
            writeln!(out, "Cleared {cat}")?;
        }
        Command::Clear(None) => {
            open_store(params).clear_all()?;
            writeln!(out, "Cleared all data")?;
        }
        Command::Stats => {
            let state = open_store(params).load()?;
            for cat in Category::ALL {
                writeln!(
                    out,
                    "{:<11} {:>5}  last sync: {}",
                    cat.label(),
                    state.count(cat),
                    view::format_sync(state.last_sync.get(cat)),
                )?;
            }
        }
        Command::Icons(dir) => {
            for path in icon::write_all(dir)? {
                writeln!(out, "Wrote {}", path.display())?;
            }
        }
    }
    Ok(())
}

fn load_page(params: &Params, page: &Path, wait: Option<&str>, timeout_ms: Option<u64>) -> Result<PageSnapshot> {
    let (url, title) = (params.url.as_deref(), params.title.as_deref());
    let Some(selector) = wait else {
        return PageSnapshot::load(page, url, title);
    };

    let mut opts = WaitOptions::default();
    if let Some(ms) = timeout_ms {
        opts.timeout = Duration::from_millis(ms);
    }
    let found = watch::wait_for(selector, opts, &CancelToken::new(), || {
        PageSnapshot::load(page, url, title)
    })?;
    Ok(found)
}

fn extract_into<S: KeyValueStore, W: Write>(store: RecordStore<S>, mut agent: PageAgent, out: &mut W) -> Result<()> {
    let mut coordinator = Coordinator::new(store)?;
    coordinator.handle(agent.announce());

    let response = coordinator.trigger(Some(&mut agent as &mut dyn Handler));
    if !coordinator.badge().is_empty() {
        writeln!(out, "Board: {}", coordinator.badge())?;
    }
    if response.success {
        writeln!(out, "✓ {}", response.text())?;
    } else {
        writeln!(out, "✗ {}", response.text())?;
    }
    Ok(())
}

fn list<W: Write>(state: &PersistedState, cat: Category, search: &str, out: &mut W) -> Result<()> {
    let cards = view::cards(state, cat, search);

    if cards.is_empty() {
        let (title, hint) = view::empty_hint(cat);
        writeln!(out, "{title}\n{hint}")?;
        return Ok(());
    }
    for (id, card) in cards {
        writeln!(out, "{}  [{}]", card.title, id)?;
        for line in &card.lines {
            writeln!(out, "    {line}")?;
        }
    }
    Ok(())
}
