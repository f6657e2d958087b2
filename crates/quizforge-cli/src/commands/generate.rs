//! The `quizforge generate` command.

use std::path::PathBuf;

use anyhow::Result;

use quizforge_core::Question;

pub fn execute(
    kb: Option<PathBuf>,
    count: i64,
    problems: Vec<String>,
    seed: Option<i64>,
    format: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let (_, engine) = super::load_engine(config_path, kb)?;

    let allowed = (!problems.is_empty()).then_some(problems.as_slice());
    let questions = engine.generate_questions(count, allowed, seed)?;

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&questions)?),
        "table" => print_table(&questions),
        other => anyhow::bail!("unknown format: {other} (expected table or json)"),
    }

    Ok(())
}

fn print_table(questions: &[Question]) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["Problem", "Instance", "Question"]);

    for q in questions {
        table.add_row(vec![
            Cell::new(&q.problem_key),
            Cell::new(&q.instance),
            Cell::new(&q.text),
        ]);
    }

    println!("{table}");
}
