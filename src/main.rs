//! Geo-resolver command line entrypoint.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, bail};
use mimalloc::MiMalloc;

use geores::alias::AliasTable;
use geores::candidates::CandidateGenerator;
use geores::config::{Config, ConfigError};
use geores::constants::DEFAULT_BULK_CHUNK_SIZE;
use geores::content::HttpContentExtractor;
use geores::entity::{GeoEntity, HttpEntityExtractor};
use geores::gazetteer::{ElasticsearchIndex, ingest};
use geores::geoparser::Geoparser;
use geores::resolution::Resolver;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const USAGE: &str = "\
usage:
  geores resolve <entities.json>
  geores ingest <allCountries.txt>
  geores from-text <file> <lang>
  geores from-url <url> <lang>
  geores --health-check";

#[derive(Debug, PartialEq)]
enum Command {
    Resolve(PathBuf),
    Ingest(PathBuf),
    FromText(PathBuf, String),
    FromUrl(String, String),
    HealthCheck,
}

fn parse_args(args: &[String]) -> anyhow::Result<Command> {
    if args.iter().any(|arg| arg == "--health-check") {
        return Ok(Command::HealthCheck);
    }

    match args {
        [cmd, path] if cmd == "resolve" => Ok(Command::Resolve(path.into())),
        [cmd, path] if cmd == "ingest" => Ok(Command::Ingest(path.into())),
        [cmd, path, lang] if cmd == "from-text" => Ok(Command::FromText(path.into(), lang.clone())),
        [cmd, url, lang] if cmd == "from-url" => Ok(Command::FromUrl(url.clone(), lang.clone())),
        _ => bail!("{USAGE}"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = parse_args(&args)?;

    let config = Config::from_env()?;
    config.validate()?;

    let index = ElasticsearchIndex::from_config(&config)?;

    match command {
        Command::HealthCheck => {
            let code = match index.health_check().await {
                Ok(()) => 0,
                Err(e) => {
                    tracing::warn!(error = %e, "Health check failed");
                    1
                }
            };
            std::process::exit(code);
        }
        Command::Ingest(path) => {
            let file = File::open(&path)
                .with_context(|| format!("failed to open {}", path.display()))?;

            index.create_index().await?;
            let report = ingest(&index, BufReader::new(file), DEFAULT_BULK_CHUNK_SIZE).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Resolve(path) => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let entities: Vec<GeoEntity> = serde_json::from_str(&raw)
                .with_context(|| format!("{} is not a JSON list of entities", path.display()))?;

            let resolver = build_resolver(&config, index)?;
            let locations = resolver.resolve(entities).await?;
            println!("{}", serde_json::to_string_pretty(&locations)?);
        }
        Command::FromText(path, language) => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;

            let geoparser = build_geoparser(&config, index)?;
            let result = geoparser.locations_from_text(&text, &language).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Command::FromUrl(url, language) => {
            let geoparser = build_geoparser(&config, index)?;
            let result = geoparser.locations_from_url(&url, &language).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    Ok(())
}

fn build_resolver(
    config: &Config,
    index: ElasticsearchIndex,
) -> anyhow::Result<Resolver<ElasticsearchIndex>> {
    let aliases: Arc<AliasTable> = AliasTable::global(config)?;
    Ok(Resolver::new(
        CandidateGenerator::from_config(index, config),
        aliases,
    ))
}

fn build_geoparser(
    config: &Config,
    index: ElasticsearchIndex,
) -> anyhow::Result<Geoparser<ElasticsearchIndex, HttpEntityExtractor, HttpContentExtractor>> {
    let ner_url = required_url(config.ner_url.as_deref(), Config::ENV_NER_URL)?;
    let content_url = required_url(config.content_url.as_deref(), Config::ENV_CONTENT_URL)?;

    Ok(Geoparser::new(
        build_resolver(config, index)?,
        HttpEntityExtractor::new(ner_url, config.request_timeout)?,
        HttpContentExtractor::new(content_url, config.request_timeout)?,
    ))
}

fn required_url<'a>(url: Option<&'a str>, name: &'static str) -> Result<&'a str, ConfigError> {
    url.ok_or(ConfigError::MissingEnvVar { name })
}
