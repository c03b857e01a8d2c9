use std::fs;
use std::io::Read;
use std::process;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use rune_core::convert::{convert_text, ConvertOptions};
use rune_core::rules::RuleTable;
use rune_session::{EditSession, Selection};

#[derive(Parser)]
#[command(name = "runetool", about = "Rune conversion diagnostics")]
struct Cli {
    /// Path to a custom rules TOML file
    #[arg(long, global = true)]
    rules: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert text (argument or stdin) to runes
    Convert {
        /// Text to convert; read from stdin when omitted
        text: Option<String>,
        /// Replace spaces with the separator mark
        #[arg(long)]
        separators: bool,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Replay text keystroke by keystroke through an editing session
    Type {
        /// Text to type
        text: String,
        /// Replace spaces with the separator mark
        #[arg(long)]
        separators: bool,
    },

    /// Dump the substitution rule table
    Rules {
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Run conversion accuracy tests from a structured TOML corpus
    Accuracy {
        /// Path to the accuracy corpus TOML file
        corpus_file: String,
        /// Filter by category (only run cases in this category)
        #[arg(long)]
        category: Option<String>,
        /// Show passing cases too (default: only failures and skips)
        #[arg(long)]
        verbose: bool,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Serialize)]
struct ConvertOutput {
    input: String,
    output: String,
}

#[derive(Debug, Serialize)]
struct RuleDump {
    phase: &'static str,
    rules: Vec<(String, String)>,
}

// --- Accuracy types ---

#[derive(Debug, Deserialize)]
struct AccuracyCorpus {
    cases: Vec<AccuracyCase>,
}

#[derive(Debug, Deserialize)]
struct AccuracyCase {
    input: String,
    expected: String,
    category: String,
    #[serde(default)]
    separators: bool,
    #[serde(default)]
    skip: bool,
    #[serde(default)]
    note: Option<String>,
}

#[derive(Debug, Serialize)]
struct AccuracyResult {
    input: String,
    expected: String,
    actual: String,
    status: AccuracyStatus,
    category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    note: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
enum AccuracyStatus {
    Pass,
    Fail,
    Skip,
}

#[derive(Debug, Serialize)]
struct AccuracySummary {
    total: usize,
    pass: usize,
    fail: usize,
    skip: usize,
    pass_rate: String,
}

#[derive(Debug, Serialize)]
struct AccuracyReport {
    results: Vec<AccuracyResult>,
    summary: AccuracySummary,
}

fn install_rules(path: &str) {
    let content = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Failed to read rules file {}: {}", path, e);
        process::exit(1);
    });
    RuleTable::init_custom(content).unwrap_or_else(|e| {
        eprintln!("Failed to load rules from {}: {}", path, e);
        process::exit(1);
    });
}

fn read_stdin() -> String {
    let mut buf = String::new();
    std::io::stdin().read_to_string(&mut buf).unwrap_or_else(|e| {
        eprintln!("Failed to read stdin: {}", e);
        process::exit(1);
    });
    buf
}

#[cfg(feature = "trace")]
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("rune_core=debug,rune_session=debug")
            }),
        )
        .init();
}

#[cfg(not(feature = "trace"))]
fn init_tracing() {}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    if let Some(ref path) = cli.rules {
        install_rules(path);
    }

    match cli.command {
        Command::Convert {
            text,
            separators,
            json,
        } => {
            let input = text.unwrap_or_else(read_stdin);
            let options = ConvertOptions {
                mark_separators: separators,
            };
            let output = convert_text(&input, options);

            if json {
                let out = ConvertOutput { input, output };
                println!(
                    "{}",
                    serde_json::to_string_pretty(&out).expect("JSON serialization failed")
                );
            } else {
                println!("{}", output);
            }
        }

        Command::Type { text, separators } => {
            let mut session = EditSession::new();
            session.set_mark_separators(separators);

            let mut value = String::new();
            for ch in text.chars() {
                value.push(ch);
                let caret = value.chars().count();
                let outcome = session.update(&value, Selection::caret(caret));
                value = outcome.text;

                let word = session
                    .tracked_word()
                    .map(|(w, _)| format!("  [word: {}]", w))
                    .unwrap_or_default();
                let completed: Vec<&str> = outcome
                    .completions
                    .iter()
                    .map(|c| c.word.as_str())
                    .collect();
                let done = if completed.is_empty() {
                    String::new()
                } else {
                    format!("  [completed: {}]", completed.join(", "))
                };
                println!("{:?}  {}{}{}", ch, value, word, done);
            }

            let outcome = session.finalize();
            println!("final  {}", outcome.text);
        }

        Command::Rules { json } => {
            let table = RuleTable::global();
            let dump: Vec<RuleDump> = table
                .phases()
                .iter()
                .map(|&(phase, rules)| RuleDump {
                    phase,
                    rules: rules
                        .iter()
                        .map(|r| (r.pattern.clone(), r.replacement.clone()))
                        .collect(),
                })
                .collect();

            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&dump).expect("JSON serialization failed")
                );
            } else {
                for phase in &dump {
                    println!("=== {} ({} rules) ===", phase.phase, phase.rules.len());
                    for (pattern, replacement) in &phase.rules {
                        println!("  {:?} -> {:?}", pattern, replacement);
                    }
                }
            }
        }

        Command::Accuracy {
            corpus_file,
            category,
            verbose,
            json,
        } => {
            let corpus_content = fs::read_to_string(&corpus_file).unwrap_or_else(|e| {
                eprintln!("Failed to read corpus file {}: {}", corpus_file, e);
                process::exit(1);
            });
            let corpus: AccuracyCorpus = toml::from_str(&corpus_content).unwrap_or_else(|e| {
                eprintln!("Failed to parse corpus TOML: {}", e);
                process::exit(1);
            });

            let cases: Vec<&AccuracyCase> = corpus
                .cases
                .iter()
                .filter(|c| match category {
                    Some(ref cat) => c.category == *cat,
                    None => true,
                })
                .collect();

            if cases.is_empty() {
                eprintln!("No cases match the given filters");
                process::exit(1);
            }

            let mut results: Vec<AccuracyResult> = Vec::new();
            for case in &cases {
                if case.skip {
                    results.push(AccuracyResult {
                        input: case.input.clone(),
                        expected: case.expected.clone(),
                        actual: String::new(),
                        status: AccuracyStatus::Skip,
                        category: case.category.clone(),
                        note: case.note.clone(),
                    });
                    continue;
                }

                let options = ConvertOptions {
                    mark_separators: case.separators,
                };
                let actual = convert_text(&case.input, options);
                let status = if actual == case.expected {
                    AccuracyStatus::Pass
                } else {
                    AccuracyStatus::Fail
                };
                results.push(AccuracyResult {
                    input: case.input.clone(),
                    expected: case.expected.clone(),
                    actual,
                    status,
                    category: case.category.clone(),
                    note: case.note.clone(),
                });
            }

            let total = results.len();
            let pass = results
                .iter()
                .filter(|r| matches!(r.status, AccuracyStatus::Pass))
                .count();
            let fail = results
                .iter()
                .filter(|r| matches!(r.status, AccuracyStatus::Fail))
                .count();
            let skip = results
                .iter()
                .filter(|r| matches!(r.status, AccuracyStatus::Skip))
                .count();
            let tested = total - skip;
            let rate = if tested > 0 {
                pass as f64 / tested as f64 * 100.0
            } else {
                0.0
            };
            let summary = AccuracySummary {
                total,
                pass,
                fail,
                skip,
                pass_rate: format!("{:.1}%", rate),
            };

            if json {
                let report = AccuracyReport { results, summary };
                println!(
                    "{}",
                    serde_json::to_string_pretty(&report).expect("JSON serialization failed")
                );
            } else {
                use std::collections::BTreeMap;
                let mut grouped: BTreeMap<&str, Vec<&AccuracyResult>> = BTreeMap::new();
                for r in &results {
                    grouped.entry(&r.category).or_default().push(r);
                }

                for (cat, group) in &grouped {
                    println!("\n=== {} ({} cases) ===", cat, group.len());
                    for r in group {
                        match r.status {
                            AccuracyStatus::Pass => {
                                if verbose {
                                    println!("  \u{2713} {} \u{2192} {}", r.input, r.expected);
                                }
                            }
                            AccuracyStatus::Fail => {
                                println!(
                                    "  \u{2717} {} \u{2192} {} (got: {})",
                                    r.input, r.expected, r.actual
                                );
                            }
                            AccuracyStatus::Skip => {
                                let reason = r.note.as_deref().unwrap_or("known failure");
                                println!("  - {} [skip: {}]", r.input, reason);
                            }
                        }
                    }
                }

                println!();
                println!("=== Summary ===");
                println!("  Total:     {}", summary.total);
                println!("  Pass:      {:>3}", summary.pass);
                println!("  Fail:      {:>3}", summary.fail);
                println!("  Skip:      {:>3}", summary.skip);
                println!(
                    "  Pass rate: {} ({}/{})",
                    summary.pass_rate, summary.pass, tested
                );
            }

            if fail > 0 {
                process::exit(1);
            }
        }
    }
}
