//! Mind Circus command line
//!
//! Usage:
//!   mc stages                   - List the stage catalog
//!   mc simulate                 - Run seeded autoplay sessions
//!   mc config                   - Print the effective arcade configuration

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use mc_arcade::{Arcade, ArcadeConfig, AutoplayConfig, AutoplayReport, Autoplayer, ContentBanks, StageCard};
use mc_stage::{StageCatalog, StageId};

#[derive(Parser)]
#[command(name = "mc", about = "Mind Circus mini-game arcade")]
struct Cli {
    /// Stage catalog file (.json / .yaml); built-in stages when absent
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Content banks file (.json / .yaml); built-in content when absent
    #[arg(long, global = true)]
    content: Option<PathBuf>,

    /// Arcade config file (.json / .yaml); defaults when absent
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the stage catalog
    Stages {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Let a bot play the arcade
    Simulate {
        /// Stage to play; every stage when absent
        #[arg(short, long)]
        stage: Option<String>,
        /// Rounds per stage
        #[arg(short, long, default_value_t = 20)]
        rounds: u32,
        /// Seed for both the arcade and the bot
        #[arg(long, default_value_t = 0)]
        seed: u64,
        /// Bot skill, 0.0 (clueless) to 1.0 (perfect)
        #[arg(long, default_value_t = 0.7)]
        skill: f64,
        /// Print reports as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the effective configuration
    Config {
        #[arg(short, long, value_enum, default_value_t = Format::Yaml)]
        format: Format,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Yaml,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    let catalog = load_catalog(cli.catalog.as_deref())?;
    let content = load_content(cli.content.as_deref())?;
    log::debug!(
        "Loaded {} stages, {} patterns, {} riddles",
        catalog.len(),
        content.patterns.len(),
        content.riddles.len()
    );

    match cli.command {
        Commands::Stages { json } => list_stages(&catalog, json),
        Commands::Simulate {
            stage,
            rounds,
            seed,
            skill,
            json,
        } => {
            let autoplay = AutoplayConfig {
                rounds,
                skill,
                seed,
                ..AutoplayConfig::default()
            };
            simulate(config.with_seed(seed), catalog, content, stage, autoplay, json)
        }
        Commands::Config { format } => print_config(&config, format),
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// LOADING
// ═══════════════════════════════════════════════════════════════════════════════

fn is_yaml(path: &Path) -> Result<bool> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => Ok(false),
        Some("yaml") | Some("yml") => Ok(true),
        _ => bail!("{} must end in .json, .yaml or .yml", path.display()),
    }
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn load_config(path: Option<&Path>) -> Result<ArcadeConfig> {
    let Some(path) = path else {
        return Ok(ArcadeConfig::default());
    };
    ArcadeConfig::load(path).with_context(|| format!("Invalid config {}", path.display()))
}

fn load_catalog(path: Option<&Path>) -> Result<StageCatalog> {
    let Some(path) = path else {
        return Ok(StageCatalog::mind_circus());
    };
    let text = read(path)?;
    let catalog = if is_yaml(path)? {
        StageCatalog::from_yaml(&text)
    } else {
        StageCatalog::from_json(&text)
    };
    catalog.with_context(|| format!("Invalid stage catalog {}", path.display()))
}

fn load_content(path: Option<&Path>) -> Result<ContentBanks> {
    let Some(path) = path else {
        return Ok(ContentBanks::mind_circus());
    };
    let text = read(path)?;
    let content = if is_yaml(path)? {
        ContentBanks::from_yaml(&text)
    } else {
        ContentBanks::from_json(&text)
    };
    content.with_context(|| format!("Invalid content banks {}", path.display()))
}

// ═══════════════════════════════════════════════════════════════════════════════
// COMMANDS
// ═══════════════════════════════════════════════════════════════════════════════

fn list_stages(catalog: &StageCatalog, json: bool) -> Result<()> {
    if json {
        let stages: Vec<_> = catalog.iter().collect();
        println!("{}", serde_json::to_string_pretty(&stages)?);
        return Ok(());
    }

    println!("🎪 Mind Circus stages\n");
    for def in catalog.iter() {
        println!("  {:<10} {}", def.id.as_str(), def.headline());
        if !def.description.is_empty() {
            println!("  {:<10} {}", "", def.description);
        }
    }
    Ok(())
}

fn simulate(
    config: ArcadeConfig,
    catalog: StageCatalog,
    content: ContentBanks,
    stage: Option<String>,
    autoplay: AutoplayConfig,
    json: bool,
) -> Result<()> {
    let mut arcade = Arcade::new(config, catalog, content).context("Failed to open arcade")?;
    let mut bot = Autoplayer::new(autoplay);

    let reports = match stage {
        Some(id) => vec![
            bot.play(&mut arcade, &StageId::new(id.as_str()))
                .with_context(|| format!("Failed to play stage {}", id))?,
        ],
        None => bot.play_all(&mut arcade).context("Autoplay failed")?,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    println!(
        "🤖 Autoplay: {} rounds per stage, skill {:.2}, seed {}\n",
        autoplay.rounds, autoplay.skill, autoplay.seed
    );
    let view = arcade.view();
    for report in &reports {
        let card = view.cards.iter().find(|c| c.id == report.stage);
        println!("{}", report_line(report, card));
    }
    println!("\n{}", view.progress_line());
    Ok(())
}

fn report_line(report: &AutoplayReport, card: Option<&StageCard>) -> String {
    let mut line = format!(
        "  {:<10} {:>3}/{:<3} won ({:>5.1}%)  top streak {}",
        report.stage.as_str(),
        report.successes,
        report.rounds,
        report.success_rate() * 100.0,
        report.stats.top_streak
    );
    if let Some(card) = card {
        line.push_str(&format!("  [{}] {}", card.badge, card.summary()));
    }
    line
}

fn print_config(config: &ArcadeConfig, format: Format) -> Result<()> {
    let text = match format {
        Format::Json => config.to_json()?,
        Format::Yaml => config.to_yaml()?,
    };
    println!("{}", text);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_simulate() {
        let cli = Cli::try_parse_from([
            "mc", "simulate", "--stage", "memory", "--rounds", "5", "--skill", "0.9",
        ])
        .unwrap();
        match cli.command {
            Commands::Simulate {
                stage, rounds, skill, seed, ..
            } => {
                assert_eq!(stage.as_deref(), Some("memory"));
                assert_eq!(rounds, 5);
                assert_eq!(skill, 0.9);
                assert_eq!(seed, 0);
            }
            _ => panic!("expected simulate"),
        }
    }

    #[test]
    fn test_global_file_flags() {
        let cli = Cli::try_parse_from(["mc", "stages", "--catalog", "stages.yaml"]).unwrap();
        assert_eq!(cli.catalog, Some(PathBuf::from("stages.yaml")));
    }

    #[test]
    fn test_extension_detection() {
        assert!(!is_yaml(Path::new("a.json")).unwrap());
        assert!(is_yaml(Path::new("a.yml")).unwrap());
        assert!(is_yaml(Path::new("a.txt")).is_err());
    }

    #[test]
    fn test_defaults_without_files() {
        assert_eq!(load_catalog(None).unwrap().len(), 3);
        assert!(load_content(None).unwrap().validate().is_ok());
        assert_eq!(load_config(None).unwrap(), ArcadeConfig::default());
    }

    #[test]
    fn test_unknown_stage_fails() {
        let result = simulate(
            ArcadeConfig::seeded(1),
            StageCatalog::mind_circus(),
            ContentBanks::mind_circus(),
            Some("trapeze".into()),
            AutoplayConfig::default(),
            true,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_report_line() {
        let mut arcade = Arcade::mind_circus(ArcadeConfig::seeded(2)).unwrap();
        let mut bot = Autoplayer::new(AutoplayConfig {
            rounds: 4,
            skill: 1.0,
            ..AutoplayConfig::default()
        });
        let report = bot.play(&mut arcade, &StageId::new("puzzle")).unwrap();
        let line = report_line(&report, None);
        assert!(line.contains("4/4"));
        assert!(line.contains("100.0%"));
    }
}
