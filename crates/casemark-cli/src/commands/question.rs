//! The `casemark question` command.

use anyhow::Result;

use casemark_core::evaluator::GATE_WORDS;
use casemark_core::rubric::Rubric;

pub fn execute() -> Result<()> {
    let rubric = Rubric::standard();
    println!("{}", rubric.question);
    println!("Suggested structure:\n");
    println!("{}", rubric.answer_template);
    println!("Answers under {GATE_WORDS} words are not marked.");
    Ok(())
}
