//! The `casemark init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create casemark.toml
    if std::path::Path::new("casemark.toml").exists() {
        println!("casemark.toml already exists, skipping.");
    } else {
        std::fs::write("casemark.toml", SAMPLE_CONFIG)?;
        println!("Created casemark.toml");
    }

    // Create a sample answer to mark
    std::fs::create_dir_all("answers")?;
    let sample_path = std::path::Path::new("answers/sample.txt");
    if sample_path.exists() {
        println!("answers/sample.txt already exists, skipping.");
    } else {
        std::fs::write(sample_path, SAMPLE_ANSWER)?;
        println!("Created answers/sample.txt");
    }

    println!("\nNext steps:");
    println!("  1. Run: casemark question");
    println!("  2. Edit answers/sample.txt (or add more .txt files)");
    println!("  3. Run: casemark mark --answer answers/sample.txt");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# casemark configuration

# Where saved reports go.
output_dir = "./casemark-results"

# Answers longer than this are rejected before marking.
max_answer_chars = 6000

# Default output format: json, html, markdown, or all.
default_format = "json"
"#;

const SAMPLE_ANSWER: &str = "\
Failure 1: the residents were never asked and only found out about the
cameras from a notice after they were already running, so there was no
consent and no transparency about what was collected.

Failure 2: the cameras keep locking out residents with darker skin tones,
which shows the matching is biased and causes real harm to the people who
live there.

Why these failures matter: people cannot choose a different front door, and
being shut out of your own home damages trust in the association.

What should have been done: the association should have consulted residents
first, kept the fob system as an alternative, and set a clear retention
policy for the data.
";
