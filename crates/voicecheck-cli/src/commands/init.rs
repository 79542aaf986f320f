//! The `voicecheck init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("voicecheck.toml").exists() {
        println!("voicecheck.toml already exists, skipping.");
    } else {
        std::fs::write("voicecheck.toml", SAMPLE_CONFIG)?;
        println!("Created voicecheck.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit the [question] section of voicecheck.toml");
    println!("  2. Run: voicecheck validate");
    println!("  3. Run: voicecheck chat");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# voicecheck configuration

# Uncomment for reproducible transcripts and phrases.
# seed = 42

[question]
prompt = "Назовите пять основных встроенных типов данных в Python."
reference_answer = "числа строки списки кортежи словари"

[confidence]
high = ["уверенно", "четко", "без пауз", "ровным голосом"]
low = ["с паузами", "неуверенно", "тихим голосом", "с запинками"]

[recognizer]
type = "stub"
latency_ms = 0

[[recognizer.candidates]]
text = "числа строки списки кортежи словари"
weight = 0.6

[[recognizer.candidates]]
text = "числа строки списки кортежи множества"
weight = 0.15

[[recognizer.candidates]]
text = "числа строки списки словари"
weight = 0.15

[[recognizer.candidates]]
text = "я не знаю"
weight = 0.1
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_config_parses_and_builds() {
        let config = voicecheck_recognizers::config::parse_config_str(SAMPLE_CONFIG).unwrap();
        assert_eq!(config, voicecheck_recognizers::VoicecheckConfig::default());
        config.build_question().unwrap();
        config.build_phrases().unwrap();
    }
}
