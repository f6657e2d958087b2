//! The `quizforge serve` command.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;

pub async fn execute(
    config_path: Option<PathBuf>,
    kb: Option<PathBuf>,
    bind: Option<String>,
) -> Result<()> {
    let (mut config, engine) = super::load_engine(config_path, kb)?;
    if let Some(bind) = bind {
        config.server.bind = bind;
    }

    quizforge_server::serve(Arc::new(engine), &config.server).await
}
