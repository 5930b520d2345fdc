// Colored terminal output for word verdicts, phrase breakdowns and status.
//
// main.rs delegates all formatting here so the classification code never
// prints anything.

use colored::Colorize;

use crate::classifier::phrase::PhraseAnalysis;
use crate::classifier::word::{LocalePrediction, WordVerdict};
use crate::config::ScorerBackend;
use crate::locale::Locale;
use crate::scorer::ModelStore;

/// Display a single word's verdict with the per-locale breakdown.
pub fn display_word(verdict: &WordVerdict, predictions: &[LocalePrediction]) {
    println!(
        "\n{}",
        format!("=== {} ===", super::truncate_chars(&verdict.token, 60)).bold()
    );
    if verdict.normalized != verdict.token {
        println!("  Normalized: {}", verdict.normalized.dimmed());
    }
    println!("  Verdict: {}", colorize_verdict(verdict.is_profane));
    println!("  Probability: {:.3}", verdict.probability);

    if predictions.len() > 1 {
        println!("\n  Per locale:");
        for p in predictions {
            println!(
                "    {:<18} {:<10} {:.3}",
                p.locale.to_string(),
                colorize_verdict(p.prediction.is_profane),
                p.prediction.probability
            );
        }
    }
}

/// Display a token table for a phrase followed by the phrase verdict.
pub fn display_phrase(analysis: &PhraseAnalysis) {
    if analysis.tokens.is_empty() {
        println!("No tokens to classify.");
        return;
    }

    println!(
        "\n{}",
        format!("=== Phrase ({} tokens) ===", analysis.tokens.len()).bold()
    );
    println!();

    println!(
        "  {:>4}  {:<32} {:<10}  {:>5}",
        "#".dimmed(),
        "Token".dimmed(),
        "Verdict".dimmed(),
        "Prob".dimmed(),
    );
    println!("  {}", "-".repeat(58).dimmed());

    for (i, token) in analysis.tokens.iter().enumerate() {
        println!(
            "  {:>4}. {:<32} {:<10}  {:.3}",
            i + 1,
            super::truncate_chars(&token.token, 30),
            colorize_verdict(token.is_profane),
            token.probability,
        );
    }

    println!();
    let flagged = analysis.profane_tokens().count();
    if flagged > 0 {
        println!("  {} {} profane token(s)", "!!".red().bold(), flagged);
    }
    println!(
        "  Phrase: {} (max probability {:.3})",
        colorize_verdict(analysis.is_profane),
        analysis.probability
    );
}

/// Display configuration and which model files are present.
pub fn display_status(
    store: &ModelStore,
    backend: &ScorerBackend,
    selected: &[Locale],
    threshold: f32,
) {
    println!("Model directory: {}", store.dir().display());
    println!("Scorer backend: {:?}", backend);
    println!("Threshold: {threshold:.2}");
    println!();

    for locale in Locale::ALL {
        let marker = if selected.contains(&locale) { "*" } else { " " };
        let state = if store.files_present(backend, locale) {
            "present".green()
        } else {
            "missing".dimmed()
        };
        println!("  {marker} {:<18} {}", locale.to_string(), state);
    }
    println!("\n  {}", "* = selected".dimmed());
}

fn colorize_verdict(is_profane: bool) -> colored::ColoredString {
    if is_profane {
        "profane".red().bold()
    } else {
        "clean".green()
    }
}
