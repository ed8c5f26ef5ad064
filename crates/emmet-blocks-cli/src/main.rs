mod interactive;
mod output;

use anyhow::{Context, Result, bail};
use clap::Parser;
use emmet_blocks_config::{Config, OutputFormat};
use emmet_blocks_engine::{
    BlockKind, BlockMapper, BlockSink, Composer, EmmetExpander, SubmitOutcome, TagTable,
};
use std::fs::File;
use std::io::{self, BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process;

use output::PrintingSink;

#[derive(Parser, Debug)]
#[command(name = "emmet-blocks", version)]
#[command(about = "Expand Emmet abbreviations into editor block trees")]
struct Args {
    /// Abbreviation to expand; without one, each line of stdin is expanded
    abbreviation: Option<String>,

    /// Open a terminal session with an abbreviation prompt
    #[arg(short, long, conflicts_with = "abbreviation")]
    interactive: bool,

    /// Output format [json, pretty, outline]
    #[arg(short, long)]
    format: Option<OutputFormat>,

    /// Print the expanded HTML instead of blocks
    #[arg(long, conflicts_with = "interactive")]
    html: bool,

    /// Config file to use instead of ~/.config/emmet-blocks/config.toml
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write output to a file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Print the tag table in effect and exit
    #[arg(long, conflicts_with_all = ["abbreviation", "interactive", "html"])]
    tags: bool,

    /// Store the format, output and tag settings in effect as the config file
    #[arg(long, conflicts_with_all = ["abbreviation", "interactive", "html", "tags"])]
    save_config: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let mut config = load_config(args.config.as_deref(), !args.save_config)?;
    let format = args.format.unwrap_or(config.format);
    let table = tag_table(&config)?;
    log::debug!("tag table has {} entries", table.len());

    if args.save_config {
        config.format = format;
        if let Some(output) = args.output {
            config.output = Some(output);
        }
        return save_config(&config, args.config.as_deref());
    }

    let out = open_output(args.output.as_ref().or(config.output.as_ref()))?;
    if args.tags {
        return print_tags(&table, out);
    }

    let composer = Composer::emmet(BlockMapper::new(table));

    if args.interactive {
        let document = interactive::run(&composer)?;
        let mut sink = PrintingSink::new(out, format);
        if !document.is_empty() {
            sink.insert_blocks(document);
        }
        sink.finish()?;
        return Ok(());
    }

    if args.html {
        return print_html(&composer, args.abbreviation.as_deref(), out);
    }

    let mut sink = PrintingSink::new(out, format);
    match args.abbreviation {
        Some(abbreviation) => {
            let outcome = composer.submit(&abbreviation, &mut sink);
            sink.finish()?;
            match outcome {
                SubmitOutcome::Inserted { .. } => {}
                SubmitOutcome::NothingGenerated => log::warn!("{abbreviation:?} produced no blocks"),
                // Already logged by the composer.
                SubmitOutcome::Failed(_) => process::exit(1),
                SubmitOutcome::Empty => {
                    log::error!("abbreviation is empty");
                    process::exit(1);
                }
            }
        }
        None => {
            for line in io::stdin().lock().lines() {
                let line = line.context("failed to read stdin")?;
                if let SubmitOutcome::NothingGenerated = composer.submit(&line, &mut sink) {
                    log::warn!("{:?} produced no blocks", line.trim());
                }
            }
            sink.finish()?;
        }
    }

    Ok(())
}

/// Load the config file; an explicitly named one must exist unless
/// `must_exist` is false.
fn load_config(path: Option<&Path>, must_exist: bool) -> Result<Config> {
    let config = match path {
        Some(path) => {
            if must_exist && !path.exists() {
                bail!("config file '{}' does not exist", path.display());
            }
            Config::load_from_path(path)?
        }
        None => Config::load()?,
    };
    if config.is_none() {
        log::debug!("no config file at {}, using defaults", Config::config_path().display());
    }
    Ok(config.unwrap_or_default())
}

/// The built-in tag table with the config's `[tags]` applied.
fn tag_table(config: &Config) -> Result<TagTable> {
    config
        .tags
        .iter()
        .try_fold(TagTable::core(), |table, (tag, name)| {
            let kind = name
                .parse::<BlockKind>()
                .with_context(|| format!("invalid block name for tag `{tag}` in config"))?;
            Ok(table.with_override(tag, kind))
        })
}

fn save_config(config: &Config, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => config.save_to_path(path)?,
        None => config.save()?,
    }
    let path = path.map(Path::to_path_buf).unwrap_or_else(Config::config_path);
    log::info!("saved config to {}", path.display());
    Ok(())
}

fn print_tags(table: &TagTable, mut out: impl Write) -> Result<()> {
    for (tag, kind) in table.iter() {
        writeln!(out, "{tag}\t{kind}")?;
    }
    out.flush()?;
    Ok(())
}

fn open_output(path: Option<&PathBuf>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create output file '{}'", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(io::stdout().lock()),
    })
}

fn print_html(
    composer: &Composer<EmmetExpander>,
    abbreviation: Option<&str>,
    mut out: Box<dyn Write>,
) -> Result<()> {
    match abbreviation {
        Some(abbreviation) => {
            let html = composer.expand_html(abbreviation)?;
            writeln!(out, "{html}")?;
        }
        None => {
            for line in io::stdin().lock().lines() {
                let line = line.context("failed to read stdin")?;
                if line.trim().is_empty() {
                    continue;
                }
                match composer.expand_html(&line) {
                    Ok(html) => writeln!(out, "{html}")?,
                    Err(err) => log::error!("{err}"),
                }
            }
        }
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    #[test]
    fn args_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn parses_format_and_flags() {
        let args = Args::try_parse_from(["emmet-blocks", "-f", "outline", "ul>li*2"]).unwrap();
        assert_eq!(args.format, Some(OutputFormat::Outline));
        assert_eq!(args.abbreviation.as_deref(), Some("ul>li*2"));
        assert!(!args.interactive);

        assert!(Args::try_parse_from(["emmet-blocks", "-f", "yaml"]).is_err());
        assert!(Args::try_parse_from(["emmet-blocks", "-i", "p"]).is_err());
    }

    #[test]
    fn config_tags_override_the_table() {
        let mut config = Config::default();
        config.tags.insert("hero".into(), "cover".into());
        config.tags.insert("p".into(), "core/quote".into());

        let table = tag_table(&config).unwrap();
        assert_eq!(table.lookup("hero").name(), "core/cover");
        assert_eq!(table.lookup("p"), &BlockKind::Quote);
        assert_eq!(table.lookup("div"), &BlockKind::Group);
    }

    #[test]
    fn bad_block_name_in_config_is_an_error() {
        let mut config = Config::default();
        config.tags.insert("hero".into(), "a/b/c".into());

        let err = tag_table(&config).unwrap_err();
        assert!(err.to_string().contains("`hero`"));
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        assert!(load_config(Some(Path::new("/nonexistent/emmet-blocks.toml")), true).is_err());
        assert_eq!(
            load_config(Some(Path::new("/nonexistent/emmet-blocks.toml")), false).unwrap(),
            Config::default()
        );
    }

    #[test]
    fn saved_config_is_loaded_back() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        let mut config = Config {
            format: OutputFormat::Outline,
            ..Default::default()
        };
        config.tags.insert("hero".into(), "cover".into());

        save_config(&config, Some(&path)).unwrap();
        assert_eq!(load_config(Some(&path), true).unwrap(), config);
    }

    #[test]
    fn tags_are_listed_sorted_with_overrides() {
        let table = TagTable::core().with_override("hero", BlockKind::Custom("core/cover".into()));
        let mut out = Vec::new();
        print_tags(&table, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 32);
        assert!(text.starts_with("article\tcore/group\n"));
        assert!(text.contains("hero\tcore/cover\n"));
    }

    #[test]
    fn save_config_conflicts_with_expanding() {
        assert!(Args::try_parse_from(["emmet-blocks", "--save-config", "p"]).is_err());
        let args = Args::try_parse_from(["emmet-blocks", "--save-config", "-f", "pretty"]).unwrap();
        assert!(args.save_config);
    }
}
