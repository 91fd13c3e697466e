//! Bucketizer host - runs one bucketizer over a stream of members
//!
//! The host is responsible for:
//! - Reading members as JSON lines (`{"id": ..., "quads": [...]}`)
//! - Forwarding annotated members downstream
//! - Checkpointing the bucketizer state and resuming from it on restart

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use bucketizer::{build, BucketizerKind, BucketizerOptions, BucketizerState, SharedBucketizer};
use ldes_types::Quad;

/// Default number of members between two checkpoints
pub const DEFAULT_CHECKPOINT_EVERY: usize = 1000;

/// One stream member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberRecord {
    pub id: String,
    #[serde(default)]
    pub quads: Vec<Quad>,
}

/// Host configuration
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub strategy: BucketizerKind,
    pub options: BucketizerOptions,
    /// Where state is checkpointed (no persistence when unset)
    pub state_file: Option<PathBuf>,
    pub checkpoint_every: usize,
}

impl CliConfig {
    /// Config for `strategy` with default host settings
    pub fn new(strategy: BucketizerKind, options: BucketizerOptions) -> Self {
        Self {
            strategy,
            options,
            state_file: None,
            checkpoint_every: DEFAULT_CHECKPOINT_EVERY,
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let options = BucketizerOptions::from_env();

        let strategy = match std::env::var("BUCKETIZER_STRATEGY") {
            Ok(strategy) => strategy.parse().context("BUCKETIZER_STRATEGY")?,
            Err(_) if options.property_path.is_some() => BucketizerKind::Substring,
            Err(_) => BucketizerKind::Basic,
        };

        let mut config = CliConfig::new(strategy, options);

        if let Ok(path) = std::env::var("BUCKETIZER_STATE_FILE") {
            if !path.trim().is_empty() {
                config.state_file = Some(PathBuf::from(path.trim()));
            }
        }

        if let Ok(every) = std::env::var("BUCKETIZER_CHECKPOINT_EVERY") {
            if let Ok(every) = every.trim().parse::<usize>() {
                config.checkpoint_every = every.max(1);
            }
        }

        Ok(config)
    }
}

/// Member pipeline around one bucketizer
pub struct Pipeline {
    bucketizer: SharedBucketizer,
    state_file: Option<PathBuf>,
    checkpoint_every: usize,
    since_checkpoint: usize,
    processed: u64,
}

impl Pipeline {
    /// Build the bucketizer, resuming from the state file when it exists
    pub fn new(config: CliConfig) -> Result<Self> {
        let state = match &config.state_file {
            Some(path) if path.exists() => Some(load_state(path)?),
            _ => None,
        };

        let bucketizer = build(config.strategy, config.options, state.as_ref())
            .with_context(|| format!("building {} bucketizer", config.strategy))?;

        info!(
            strategy = %config.strategy,
            resumed = state.is_some(),
            checkpoint_every = config.checkpoint_every,
            "Pipeline started"
        );

        Ok(Self {
            bucketizer: SharedBucketizer::new(bucketizer),
            state_file: config.state_file,
            checkpoint_every: config.checkpoint_every.max(1),
            since_checkpoint: 0,
            processed: 0,
        })
    }

    /// Handle to the underlying bucketizer
    pub fn bucketizer(&self) -> &SharedBucketizer {
        &self.bucketizer
    }

    pub fn processed(&self) -> u64 {
        self.processed
    }

    /// Annotate one member
    pub fn process(&mut self, mut record: MemberRecord) -> MemberRecord {
        self.bucketizer.bucketize(&mut record.quads, &record.id);
        self.processed += 1;
        self.since_checkpoint += 1;
        record
    }

    /// Annotate one JSON line
    pub fn process_line(&mut self, line: &str) -> Result<String> {
        let record: MemberRecord = serde_json::from_str(line)
            .with_context(|| format!("invalid member record after {} members", self.processed))?;
        let record = self.process(record);
        Ok(serde_json::to_string(&record)?)
    }

    /// Whether enough members went through since the last checkpoint
    pub fn checkpoint_due(&self) -> bool {
        self.state_file.is_some() && self.since_checkpoint >= self.checkpoint_every
    }

    /// Write the state file (no-op without one)
    pub fn checkpoint(&mut self) -> Result<()> {
        let Some(path) = &self.state_file else {
            return Ok(());
        };

        let state = self.bucketizer.export_state();
        save_state(path, &state)?;
        self.since_checkpoint = 0;

        info!(
            path = %path.display(),
            processed = self.processed,
            "Checkpointed bucketizer state"
        );
        Ok(())
    }

    /// Stream JSON lines from `input` to `output` until end of input or
    /// `shutdown`
    ///
    /// The state file is written on every exit path, so it always covers
    /// the members already written to `output`. Read and parse errors are
    /// returned after that final checkpoint.
    pub async fn run<R, W, S>(&mut self, input: R, mut output: W, shutdown: S) -> Result<()>
    where
        R: AsyncRead + Unpin + Send + 'static,
        W: AsyncWrite + Unpin,
        S: Future<Output = ()>,
    {
        // Reader task feeds lines in arrival order, a read error ends the stream
        let (line_tx, mut line_rx) = mpsc::channel::<io::Result<String>>(1024);
        let reader = tokio::spawn(async move {
            let mut lines = BufReader::new(input).lines();
            loop {
                let line = match lines.next_line().await {
                    Ok(Some(line)) if line.trim().is_empty() => continue,
                    Ok(Some(line)) => Ok(line),
                    Ok(None) => break,
                    Err(e) => Err(e),
                };
                let failed = line.is_err();
                if line_tx.send(line).await.is_err() || failed {
                    break;
                }
            }
        });

        tokio::pin!(shutdown);
        let outcome: Result<()> = loop {
            tokio::select! {
                line = line_rx.recv() => {
                    let line = match line {
                        Some(Ok(line)) => line,
                        Some(Err(e)) => {
                            let context = format!("reading input after {} members", self.processed);
                            break Err(anyhow::Error::new(e).context(context));
                        }
                        None => break Ok(()),
                    };
                    if let Err(e) = self.forward(&line, &mut output).await {
                        break Err(e);
                    }
                }
                _ = &mut shutdown => {
                    warn!("Interrupted, stopping after current member");
                    break Ok(());
                }
            }
        };
        reader.abort();

        output.flush().await?;
        self.checkpoint()?;

        info!(processed = self.processed, "Bucketizer stopped");
        outcome
    }

    async fn forward<W: AsyncWrite + Unpin>(&mut self, line: &str, output: &mut W) -> Result<()> {
        let out = self.process_line(line)?;
        output.write_all(out.as_bytes()).await?;
        output.write_all(b"\n").await?;

        if self.checkpoint_due() {
            output.flush().await?;
            self.checkpoint()?;
        }
        Ok(())
    }
}

fn load_state(path: &Path) -> Result<BucketizerState> {
    let json = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let state =
        BucketizerState::from_json(&json).with_context(|| format!("parsing {}", path.display()))?;
    debug!(path = %path.display(), "Loaded bucketizer state");
    Ok(state)
}

/// Write through a temporary file so a crash never leaves a torn state
fn save_state(path: &Path, state: &BucketizerState) -> Result<()> {
    let tmp = path.with_extension("tmp");
    let json = state.to_json()?;
    fs::write(&tmp, json).with_context(|| format!("writing {}", tmp.display()))?;
    fs::rename(&tmp, path).with_context(|| format!("replacing {}", path.display()))?;
    Ok(())
}
