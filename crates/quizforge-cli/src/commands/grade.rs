//! The `quizforge grade` command.

use std::path::PathBuf;

use anyhow::Result;

pub fn execute(
    kb: Option<PathBuf>,
    problem: String,
    answer: String,
    seed: Option<i64>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let (_, engine) = super::load_engine(config_path, kb)?;

    let question = engine.generate(Some(&[problem]), seed)?;
    eprintln!("{}", question.text);

    let result = engine.evaluate(&question.id, &answer)?;
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
