//! The `echograde init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    write_if_missing(Path::new("echograde.toml"), SAMPLE_CONFIG)?;

    std::fs::create_dir_all("exercises")?;
    write_if_missing(Path::new("exercises/example.toml"), EXAMPLE_EXERCISE_SET)?;

    std::fs::create_dir_all("answers")?;
    write_if_missing(Path::new("answers/example.toml"), EXAMPLE_ANSWERS)?;

    println!("\nNext steps:");
    println!("  1. Run: echograde validate --exercises exercises/example.toml");
    println!(
        "  2. Run: echograde grade --exercises exercises/example.toml --answers answers/example.toml"
    );
    println!("  3. Try: echograde score --reference \"The cat sat\" --candidate \"the cat sad\" --explain");

    Ok(())
}

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
    } else {
        std::fs::write(path, content)?;
        println!("Created {}", path.display());
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# echograde configuration

output_dir = "./echograde-results"
default_format = "text"
student = "anonymous"
"#;

const EXAMPLE_EXERCISE_SET: &str = r#"[exercise_set]
id = "example"
name = "Example Exercises"
description = "A read-aloud and a dictation exercise to get started"
default_kind = "read_aloud"

[[exercises]]
id = "cat"
title = "The cat"
text = "The cat sat on the mat."
tags = ["basics"]

[[exercises]]
id = "fox"
title = "The quick fox"
kind = "dictation"
text = "The quick brown fox jumps over the lazy dog."
tags = ["basics", "listening"]
"#;

const EXAMPLE_ANSWERS: &str = r#"student = "example-student"

[[answers]]
exercise = "cat"
response = "the cat sat on the mat"

[[answers]]
exercise = "fox"
response = "the quik brown fox jump over the lazy dog"
"#;
