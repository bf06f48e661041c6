use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use log::{info, warn};
use serde::Serialize;

use icode_api::api::{CodeLanguage, MessageKind, MessageTab, SortType, Theme, WorkQuery};
use icode_api::links::{user_id_from_url, work_ref};
use icode_api::tools::{self, PageSelection, SongEvent};
use icode_api::{BlockingIcodeClient, ClientConfig, IcodeClient};

#[derive(Parser, Debug)]
#[command(author, version, about = "iCode community command line client", long_about = None)]
struct Args {
    #[arg(short, long, env = "ICODE_COOKIE", default_value = "", hide_env_values = true, help = "Cookie string of a logged-in session")]
    cookie: String,

    #[arg(short, long, default_value = "10", help = "Request timeout (seconds)")]
    timeout: u64,

    #[arg(long, help = "Override the User-Agent header")]
    user_agent: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the logged-in account
    Whoami,
    /// Show a work
    Work {
        #[arg(help = "Work id or share link")]
        work: String,
        #[arg(long, help = "Count the request as a view")]
        view: bool,
    },
    /// List comments on a work
    Comments {
        work: String,
        #[arg(short, long, default_value = "1")]
        page: u32,
        #[arg(short, long, default_value = "20")]
        size: u32,
    },
    /// Browse the public work index
    Works {
        #[arg(short, long, default_value = "1")]
        page: u32,
        #[arg(short, long, default_value = "20")]
        size: u32,
        #[arg(long, default_value = "newest", help = "liked or newest")]
        sort: SortType,
        #[arg(long, default_value = "all")]
        theme: Theme,
        #[arg(long, default_value = "all", help = "all, blockly, scratch or python")]
        language: CodeLanguage,
        #[arg(short, long, default_value = "")]
        keyword: String,
    },
    /// Show a user's statistics, or their works
    Person {
        #[arg(help = "User id or person page link")]
        user: String,
        #[arg(long, help = "List their works instead")]
        works: bool,
        #[arg(long, conflicts_with = "works", help = "List their enshrined works instead")]
        enshrines: bool,
        #[arg(short, long, default_value = "1")]
        page: u32,
        #[arg(short, long, default_value = "20")]
        size: u32,
    },
    /// List messages
    Messages {
        #[arg(short, long, default_value = "reply", help = "reply, enshrine or system")]
        kind: MessageKind,
        #[arg(short, long, default_value = "1")]
        page: u32,
        #[arg(short, long, default_value = "20")]
        size: u32,
    },
    /// Mark a message tab as read
    ReadAll {
        #[arg(default_value = "1", help = "1 comments, 2 enshrines, 3 system")]
        tab: MessageTab,
    },
    /// Save a work as .sb3 or .py
    Download {
        work: String,
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },
    /// Request a work many times to raise its view count
    Views {
        work: String,
        #[arg(short = 'n', long, default_value = "100")]
        count: usize,
    },
    /// Post a song under a work, one comment per line
    Sing {
        work: String,
        #[arg(short, long, help = "Lyrics file, one line per comment")]
        lyrics: PathBuf,
        #[arg(short, long, default_value = "1.0", help = "Pause between comments (seconds)")]
        interval: f64,
        #[arg(short, long, default_value = "1", help = "How many times to sing it")]
        rounds: usize,
    },
    /// Delete comments on one of your works
    CleanComments {
        work: String,
        #[arg(short, long, value_delimiter = ',', help = "Pages to clean; every comment when omitted")]
        pages: Vec<u32>,
        #[arg(short = 's', long, default_value = "20")]
        page_size: u32,
    },
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn user_ref(input: &str) -> Result<String> {
    if input.contains('=') {
        Ok(user_id_from_url(input)?)
    } else {
        Ok(input.to_owned())
    }
}

async fn connect(config: ClientConfig) -> Result<IcodeClient> {
    if config.cookie.is_empty() {
        return Ok(IcodeClient::new(config)?);
    }
    Ok(IcodeClient::connect(config).await?)
}

fn sing(config: ClientConfig, work_id: &str, lyrics: &str, interval: f64, rounds: usize) -> Result<()> {
    let api = BlockingIcodeClient::connect(config)?;
    if !api.is_logged_in() {
        return Err(anyhow!("Singing needs a valid cookie"));
    }

    let pause = Duration::from_secs_f64(interval);
    let mut finished = 0;
    for event in tools::sing(&api, work_id, lyrics) {
        match event {
            SongEvent::Line(Ok(_)) => std::thread::sleep(pause),
            SongEvent::Line(Err(e)) => warn!("Comment failed: {e}"),
            SongEvent::Finished => {
                finished += 1;
                if finished >= rounds {
                    break;
                }
            }
        }
    }
    info!("Sang {finished} rounds");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if args.timeout == 0 {
        return Err(anyhow!("Timeout must be at least 1 second"));
    }

    let mut config =
        ClientConfig::new(args.cookie).with_timeout(Duration::from_secs(args.timeout));
    if let Some(user_agent) = args.user_agent {
        config = config.with_user_agent(user_agent);
    }

    match args.command {
        Command::Sing {
            work,
            lyrics,
            interval,
            rounds,
        } => {
            if interval < 0.0 {
                return Err(anyhow!("Interval cannot be negative"));
            }
            let work_id = work_ref(&work)?;
            let lyrics = std::fs::read_to_string(&lyrics)
                .with_context(|| format!("Failed to read {}", lyrics.display()))?;
            tokio::task::spawn_blocking(move || sing(config, &work_id, &lyrics, interval, rounds))
                .await??;
        }
        command => run(connect(config).await?, command).await?,
    }

    Ok(())
}

async fn run(api: IcodeClient, command: Command) -> Result<()> {
    match command {
        Command::Whoami => match api.info() {
            Some(me) => print_json(me)?,
            None => return Err(anyhow!("Not logged in")),
        },
        Command::Work { work, view } => {
            let detail = api.get_work_detail(&work_ref(&work)?, view).await?;
            print_json(&detail)?;
        }
        Command::Comments { work, page, size } => {
            let comments = api.get_work_comments(&work_ref(&work)?, page, size).await?;
            print_json(&comments)?;
        }
        Command::Works {
            page,
            size,
            sort,
            theme,
            language,
            keyword,
        } => {
            let query = WorkQuery {
                page,
                size,
                sort,
                theme,
                language,
                keyword,
            };
            print_json(&api.get_works(&query).await?)?;
        }
        Command::Person {
            user,
            works,
            enshrines,
            page,
            size,
        } => {
            let user_id = user_ref(&user)?;
            if works {
                print_json(&api.get_person_works(&user_id, page, size).await?)?;
            } else if enshrines {
                print_json(&api.get_person_enshrines(&user_id, page, size).await?)?;
            } else {
                print_json(&api.get_person_info(&user_id).await?)?;
            }
        }
        Command::Messages { kind, page, size } => {
            print_json(&api.get_messages(kind, page, size).await?)?;
        }
        Command::ReadAll { tab } => {
            print_json(&api.read_all_messages(tab).await?)?;
        }
        Command::Download { work, dir } => {
            let path = tools::download_work(&api, &work_ref(&work)?, &dir).await?;
            println!("{}", path.display());
        }
        Command::Views { work, count } => {
            let report = tools::inflate_views(&api, &work_ref(&work)?, count).await;
            println!(
                "requested: {}, succeeded: {}, failed: {}",
                report.requested, report.succeeded, report.failed
            );
        }
        Command::CleanComments {
            work,
            pages,
            page_size,
        } => {
            let selection = if pages.is_empty() {
                PageSelection::All
            } else {
                PageSelection::Pages(pages)
            };
            let deleted =
                tools::clean_comments(&api, &work_ref(&work)?, &selection, page_size).await?;
            if !deleted {
                info!("Nothing to delete");
            }
        }
        Command::Sing { .. } => return Err(anyhow!("sing runs on the blocking client")),
    }

    Ok(())
}
