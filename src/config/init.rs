use anyhow::{Context, Result};
use std::io::{BufRead, IsTerminal, Write};
use std::path::PathBuf;

use crate::config::{get_config_path, save_config, Config};
use crate::scoring::{validate_scoring, Paper, PaperConfig, ScoringConfig};

/// Prompt user with a message and return their trimmed input.
fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    std::io::stdout()
        .flush()
        .context("Failed to flush stdout")?;
    let mut input = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut input)
        .context("Failed to read input")?;
    Ok(input.trim().to_string())
}

/// Prompt user with a message and a default value. Returns default if input is empty.
fn prompt_with_default(message: &str, default: &str) -> Result<String> {
    let input = prompt(&format!("{} [{}]: ", message, default))?;
    if input.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(input)
    }
}

/// Prompt user with a yes/no question. Returns bool based on input and default.
fn prompt_yes_no(message: &str, default_yes: bool) -> Result<bool> {
    let hint = if default_yes { "Y/n" } else { "y/N" };
    let input = prompt(&format!("{} [{}]: ", message, hint))?;
    let input = input.to_lowercase();
    if input.is_empty() {
        Ok(default_yes)
    } else {
        Ok(input == "y" || input == "yes")
    }
}

/// Prompt for a whole number, re-asking until the input parses.
fn prompt_number(message: &str, default: u32) -> Result<u32> {
    loop {
        let input = prompt_with_default(message, &default.to_string())?;
        match input.parse::<u32>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("  Invalid: must be a whole number. Try again."),
        }
    }
}

/// Print text with a typewriter effect when attached to a terminal.
fn typewriter(text: &str) {
    if !std::io::stdout().is_terminal() {
        println!("{}", text);
        return;
    }
    use std::thread;
    use std::time::Duration;
    for c in text.chars() {
        print!("{}", c);
        std::io::stdout().flush().ok();
        thread::sleep(Duration::from_millis(18));
    }
    println!();
}

/// Ask for one paper's thresholds until they form a valid conversion.
fn prompt_paper(paper: Paper, current: PaperConfig) -> Result<PaperConfig> {
    loop {
        println!();
        println!("{} (raw maximum {})", paper.label(), current.total);
        let low = prompt_number("  Raw score for 140 (low)", current.low)?;
        let pass = prompt_number("  Raw score for 160 (pass)", current.pass)?;
        let high = prompt_number("  Raw score for 180 (high)", current.high)?;
        let candidate = PaperConfig {
            low,
            pass,
            high,
            total: current.total,
        };

        let mut probe = ScoringConfig::default();
        probe.set_paper(paper, candidate);
        match validate_scoring(&probe) {
            Ok(()) => return Ok(candidate),
            Err(errors) => {
                for error in errors {
                    println!("  Invalid: {}", error);
                }
                println!("  Try again.");
            }
        }
    }
}

/// Run the interactive init wizard to create a config file.
///
/// If `default_path` is Some, uses that as the suggested config file path.
/// Otherwise, suggests the default config path.
pub fn run_init_wizard(default_path: Option<PathBuf>) -> Result<()> {
    println!();
    typewriter("FCE Score Configuration Wizard");
    println!("==============================");
    println!();

    // 1. Conversion points
    typewriter("Raw scores are converted to the Cambridge English Scale using three thresholds per paper.");
    typewriter("  low  -> 140   pass -> 160   high -> 180   full marks -> 190");
    typewriter("The built-in thresholds are estimates; adjust them if you have better data.");
    let customize = prompt_yes_no("Customize conversion points? (n accepts defaults)", false)?;

    let scoring = if customize {
        let mut scoring = ScoringConfig::default();
        for paper in Paper::ALL {
            let updated = prompt_paper(paper, scoring.paper(paper))?;
            scoring.set_paper(paper, updated);
        }
        scoring
    } else {
        ScoringConfig::default()
    };

    // 2. Data directory
    println!();
    typewriter("Accounts and saved scores are kept as JSON files in a data directory.");
    let default_data_dir = crate::store::get_data_dir()?;
    let data_dir_str = prompt_with_default(
        "Data directory",
        &default_data_dir.display().to_string(),
    )?;
    let data_dir = PathBuf::from(&data_dir_str);
    let data_dir = if data_dir == default_data_dir {
        None
    } else {
        Some(data_dir)
    };

    // 3. Config path
    let default_config_path = match default_path {
        Some(p) => p,
        None => get_config_path()?,
    };
    println!();
    let path_str = prompt_with_default(
        "Where should the config be saved?",
        &default_config_path.display().to_string(),
    )?;
    let config_path = PathBuf::from(&path_str);

    if config_path.exists() {
        let overwrite = prompt_yes_no(
            &format!(
                "Config already exists at {}. Overwrite?",
                config_path.display()
            ),
            false,
        )?;
        if !overwrite {
            println!("Aborted.");
            return Ok(());
        }
    }

    // 4. Write config
    let config = Config {
        data_dir,
        scoring: Some(scoring),
    };
    save_config(&config_path, &config)?;

    println!();
    println!("Config written to {}", config_path.display());
    println!("Run `fce-score register <username>` to get started.");

    Ok(())
}
