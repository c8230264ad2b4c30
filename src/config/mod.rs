use crate::commands::split::SplitArgs;
use crate::sox::SoxProperties;
use crate::sox::error::SoxResult;
use lazy_static::lazy_static;
use regex::Regex;
use std::path::PathBuf;
use std::time::Duration;

/// Everything the pipeline needs to know for one run.
#[derive(Debug, Clone)]
pub struct Config {
    pub src_path: PathBuf,
    /// Overrides the default `<cue dir>/tracks` output directory.
    pub output_dir: Option<PathBuf>,
    /// Extra `KEY: value` comments, in the order given.
    pub comments: Vec<(String, String)>,
    pub format: String,
    pub naming_spec: String,
    pub cue_encoding: Option<String>,
    pub wait: Duration,
    pub jobs: usize,
    pub sox: SoxProperties,
}

impl Config {
    pub async fn from_args(args: &SplitArgs) -> SoxResult<Self> {
        let sox = SoxProperties::probe(&args.sox_exe, args.compression_level).await?;

        Ok(Self {
            src_path: args.src_path.clone(),
            output_dir: args.output_dir.clone(),
            comments: args
                .comment
                .as_deref()
                .map(parse_comments)
                .unwrap_or_default(),
            format: args.format.clone(),
            naming_spec: args.naming_spec.clone(),
            cue_encoding: args.encoding.clone(),
            wait: Duration::from_secs(args.wait),
            jobs: args.jobs.unwrap_or_else(default_jobs).max(1),
            sox,
        })
    }
}

/// One less than the available cores, so the machine stays usable.
pub fn default_jobs() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get().saturating_sub(1))
        .unwrap_or(1)
        .max(1)
}

/// Parses `'KEY: VALUE NKEY: NVALUE'` into ordered pairs.
///
/// Keys are runs of upper case letters followed by a colon and whitespace.
/// Text before the first key is dropped and a repeated key keeps its first
/// position but takes the last value.
pub fn parse_comments(raw: &str) -> Vec<(String, String)> {
    lazy_static! {
        static ref KEY: Regex = Regex::new(r"[A-Z]*:\s").unwrap();
    }

    let keys: Vec<_> = KEY.find_iter(raw).collect();
    let mut comments = Vec::with_capacity(keys.len());

    for (i, key) in keys.iter().enumerate() {
        let value_end = keys.get(i + 1).map_or(raw.len(), |next| next.start());
        let name = key
            .as_str()
            .trim_matches(|c: char| c == ':' || c.is_whitespace());
        let value = raw[key.end()..value_end].trim();

        upsert(&mut comments, name, value);
    }

    comments
}

/// Inserts or replaces `key` while keeping first-insertion order.
pub fn upsert(pairs: &mut Vec<(String, String)>, key: &str, value: &str) {
    match pairs.iter_mut().find(|(k, _)| k == key) {
        Some((_, existing)) => *existing = value.to_string(),
        None => pairs.push((key.to_string(), value.to_string())),
    }
}
