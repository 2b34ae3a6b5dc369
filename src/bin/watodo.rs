use anyhow::{Context, Result};
use simplelog::{ConfigBuilder, WriteLogger};
use std::env;
use std::fs::OpenOptions;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use watodo::cli::{self, Invocation};
use watodo::config::Config;
use watodo::context::{AppContext, StandardContext};
use watodo::controller::TaskController;
use watodo::storage::LocalStorage;

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();

    let invocation = match cli::parse_args(&args) {
        Ok(inv) => inv,
        Err(msg) => {
            eprintln!("{}", msg);
            cli::print_help("watodo");
            std::process::exit(2);
        }
    };

    match invocation {
        Invocation::Help => {
            cli::print_help("watodo");
            Ok(())
        }
        Invocation::Export { root } => {
            let ctx = StandardContext::new(root);
            let config = Config::load(&ctx)?;
            let path = config.task_file_path(&ctx)?;
            let tasks = LocalStorage::load(&path)?.unwrap_or_default();
            println!("{}", LocalStorage::to_json_string(&tasks)?);
            Ok(())
        }
        Invocation::Interactive { root } => {
            let ctx = StandardContext::new(root);
            let config = Config::load(&ctx)?;
            init_logging(&ctx, &config)?;
            run(&ctx, &config).await
        }
    }
}

/// Log to a file: stdout belongs to the prompt.
fn init_logging(ctx: &dyn AppContext, config: &Config) -> Result<()> {
    let path = ctx.get_log_file_path()?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {:?}", path))?;
    WriteLogger::init(config.log_level_filter(), ConfigBuilder::new().build(), file)?;
    Ok(())
}

async fn run(ctx: &dyn AppContext, config: &Config) -> Result<()> {
    let mut controller = TaskController::start(ctx, config)?;
    log::info!("Watodo v{} started", env!("CARGO_PKG_VERSION"));

    println!("Welcome to Watodo! Type 'help' for a list of commands.");
    render(&controller);
    let mut shown_revision = controller.model().view_revision();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        match controller.execute(&line) {
            Ok(result) => {
                println!("{}", result.feedback);
                if result.exit {
                    break;
                }
            }
            Err(e) => println!("{}", e),
        }

        let revision = controller.model().view_revision();
        if revision != shown_revision {
            render(&controller);
            shown_revision = revision;
        }
    }

    log::info!("Watodo exiting");
    Ok(())
}

fn render(controller: &TaskController) {
    let tasks = controller.numbered_tasks();
    if tasks.is_empty() {
        println!("  (no tasks)");
        return;
    }
    for (i, task) in tasks {
        println!("  {:>3}. {}", i, task);
    }
}
