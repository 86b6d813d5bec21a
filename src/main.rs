//! clockwall - world clocks for the terminal.
//!
//! ```text
//! clockwall [--config PATH] [run|list|help]
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clockwall::{
    AnsiRenderer, CliDriver, Dashboard, DashboardConfig, DashboardRuntime, Logger,
    OrderingStore, StatsMailbox, StatsPoller, SysinfoSampler,
};

const USAGE: &str = "\
usage: clockwall [--config PATH] [run|list|help]

commands:
  run     show the dashboard (default)
  list    print the configured timezones and their current local time
  help    show this message

keys:
  1-6       swap that clock with the top one
  q, Esc    quit
  Ctrl+C    quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Run,
    List,
    Help,
}

#[derive(Debug)]
struct Arguments {
    config: Option<PathBuf>,
    command: Command,
}

impl Arguments {
    fn parse(args: &[String]) -> Result<Arguments, String> {
        let mut parsed = Arguments {
            config: None,
            command: Command::Run,
        };
        let mut command_seen = false;

        let mut idx = 1;
        while idx < args.len() {
            match args[idx].as_str() {
                "--config" | "-c" => {
                    idx += 1;
                    let path = args
                        .get(idx)
                        .ok_or_else(|| String::from("--config needs a path"))?;
                    parsed.config = Some(PathBuf::from(path));
                }
                "--help" | "-h" => parsed.command = Command::Help,
                arg if arg.starts_with('-') => {
                    return Err(format!("Unknown argument: '{}'", arg));
                }
                arg => {
                    if command_seen {
                        return Err(format!("Multiple commands specified: '{}'", arg));
                    }
                    command_seen = true;
                    parsed.command = match arg {
                        "run" => Command::Run,
                        "list" => Command::List,
                        "help" => Command::Help,
                        other => return Err(format!("Unknown command: '{}'", other)),
                    };
                }
            }
            idx += 1;
        }

        Ok(parsed)
    }
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    let arguments = match Arguments::parse(&args) {
        Ok(arguments) => arguments,
        Err(message) => {
            eprintln!("{message}\n\n{USAGE}");
            std::process::exit(2);
        }
    };

    if arguments.command == Command::Help {
        println!("{USAGE}");
        return Ok(());
    }

    let config = DashboardConfig::discover(arguments.config)?;
    config.validate()?;

    let ordering = Arc::new(OrderingStore::new(config.timezones.clone()));

    match arguments.command {
        Command::List => list(&ordering),
        Command::Run => run(&config, ordering)?,
        Command::Help => {}
    }
    Ok(())
}

fn list(ordering: &OrderingStore) {
    let now = chrono::Utc::now();
    for (idx, slot) in ordering.snapshot().iter().enumerate() {
        let local = slot
            .local_time(now)
            .map(|t| t.format("%a %I:%M:%S %p").to_string())
            .unwrap_or_else(|| String::from("unknown timezone"));
        println!(
            "{idx}  {:<20} {:<24} {local}",
            slot.name(),
            slot.slot.location
        );
    }
}

fn run(
    config: &DashboardConfig,
    ordering: Arc<OrderingStore>,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let logger = match config.log_path.as_ref() {
        Some(path) => Some(Logger::to_file(path, config.log_max_bytes)?),
        None => None,
    };

    let stats = Arc::new(StatsMailbox::new());
    let mut poller = StatsPoller::spawn(
        SysinfoSampler::new(),
        Arc::clone(&stats),
        config.stats_interval(),
        logger.clone(),
    )?;

    let dashboard = Dashboard::new(ordering, stats)
        .with_notification_duration(config.notification_duration());
    let renderer = AnsiRenderer::new(config.renderer_settings());
    let mut runtime = DashboardRuntime::new(dashboard, renderer);
    {
        let runtime_config = runtime.config_mut();
        runtime_config.tick_interval = config.tick_interval();
        runtime_config.metrics_interval = config.metrics_interval();
        runtime_config.logger = logger;
        if config.metrics_interval_ms > 0 {
            runtime_config.enable_metrics();
        }
    }

    let result = CliDriver::new(runtime).run();
    poller.stop();
    result?;
    Ok(())
}
