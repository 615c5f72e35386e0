use anyhow::{Context, Result, anyhow};
use geoknn::evaluation::FoldSnapshot;
use geoknn::tasks::{TaskRunner, bootstrap_classifier};
use geoknn::ui::cli::drivers::{InquireDriver, PromptDriver};
use geoknn::ui::cli::wizard::{prompt_choice, prompt_config};
use geoknn::ui::types::choices::{TaskChoice, UIChoice};
use geoknn::ui::types::config::AppConfig;
use geoknn::utils::logger;
use std::path::Path;
use std::sync::mpsc;
use std::{env, fs, thread};

const USAGE: &str = "usage: geoknn [config.json] [task | task.json]";

fn load_config(arg: Option<&str>, driver: &InquireDriver) -> Result<AppConfig> {
    if let Some(path) = arg {
        return AppConfig::load(path);
    }
    let config = prompt_config(driver)?;
    if driver.ask_bool("Save this configuration?", "", false)? {
        let path = driver.ask_string("Config file", "", "geoknn.json")?;
        config.save(&path)?;
    }
    Ok(config)
}

fn parse_task(arg: Option<&str>, driver: &InquireDriver) -> Result<TaskChoice> {
    match arg {
        Some(a) if Path::new(a).is_file() => {
            let text = fs::read_to_string(a).with_context(|| format!("failed to read {a}"))?;
            TaskChoice::parse_arg(&text)
        }
        Some(a) => TaskChoice::parse_arg(a),
        None => prompt_choice(driver),
    }
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    if args.len() > 2 || args.iter().any(|a| a == "-h" || a == "--help") {
        println!("{USAGE}");
        return Ok(());
    }
    let driver = InquireDriver;

    let config = load_config(args.first().map(String::as_str), &driver)?;
    let level = logger::parse_level(&config.log_level)
        .ok_or_else(|| anyhow!("unknown log level `{}`", config.log_level))?;
    logger::init(level)?;

    let classifier = bootstrap_classifier(&config)?;
    let task = parse_task(args.get(1).map(String::as_str), &driver)?;

    let (tx, rx) = mpsc::channel::<FoldSnapshot>();
    let result = thread::scope(|s| {
        s.spawn(move || {
            for snapshot in rx {
                log::info!("{snapshot}");
            }
        });
        let mut runner = TaskRunner::new(&classifier, &config.evaluation).with_progress(tx);
        if let Some(path) = &config.report_path {
            runner = runner.with_report(path);
        }
        runner.run(&task)
    })?;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
