//! Corpus-based conformance testing.
//!
//! This module loads test vectors from a corpus file and runs them against
//! the codec. Supported operations:
//!
//! - `parse` - `input.text` must parse and write back as `expected.ok`, or
//!   fail as described by `expected.err` (optional `line` and `column`)
//! - `number_kind` - `input.text` must parse to a number held in the
//!   representation named by `expected.ok` (`i32`, `i64`, `u64`, `decimal`, `f64`)
//! - `roundtrip` - parsing the canonical form of `input.text` must give back
//!   the same tree

use serde::Deserialize;
use std::fs;
use std::path::Path;

use super::ConformanceResult;
use crate::json::{parse, to_string};

/// Corpus manifest with metadata.
#[derive(Debug, Deserialize)]
pub struct CorpusManifest {
    /// Format version of the corpus file.
    pub format_version: String,
    /// Free-form description of where the vectors come from.
    #[serde(default)]
    pub description: String,
}

/// A corpus containing test vectors.
#[derive(Debug, Deserialize)]
pub struct Corpus {
    /// Corpus metadata.
    pub manifest: CorpusManifest,
    /// List of test vectors.
    pub vectors: Vec<TestVector>,
}

/// A single test vector.
#[derive(Debug, Deserialize)]
pub struct TestVector {
    /// Unique identifier for the test.
    pub id: String,
    /// Operation to test (e.g., "parse", "number_kind").
    pub op: String,
    /// Input parameters for the operation.
    pub input: serde_json::Value,
    /// Expected result (success or error).
    pub expected: serde_json::Value,
}

/// Result of running a single test vector.
#[derive(Debug, PartialEq, Eq)]
pub enum TestResult {
    /// Test passed.
    Pass,
    /// Test failed with mismatch.
    Fail {
        /// Expected result from the corpus.
        expected: String,
        /// Actual result from the codec.
        actual: String,
    },
    /// Test was skipped (operation not known).
    Skip {
        /// Reason for skipping.
        reason: String,
    },
    /// The vector itself is malformed.
    Error {
        /// Error message.
        message: String,
    },
}

impl TestResult {
    /// Returns true if this is a passing result.
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }

    /// Returns true if this is a failing result.
    pub fn is_fail(&self) -> bool {
        matches!(self, Self::Fail { .. })
    }

    /// Returns true if the vector was skipped.
    pub fn is_skip(&self) -> bool {
        matches!(self, Self::Skip { .. })
    }

    /// Returns true if the vector itself was malformed.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    fn compare(expected: &str, actual: &str) -> Self {
        if expected == actual {
            Self::Pass
        } else {
            Self::Fail {
                expected: expected.to_string(),
                actual: actual.to_string(),
            }
        }
    }
}

/// Outcomes of a corpus run, in vector order.
#[derive(Debug, Default)]
pub struct CorpusResults {
    outcomes: Vec<(String, TestResult)>,
}

impl CorpusResults {
    /// Create a new empty results container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of one vector.
    pub fn record(&mut self, id: impl Into<String>, result: TestResult) {
        self.outcomes.push((id.into(), result));
    }

    /// Number of vectors run.
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    /// Outcomes matching `predicate`, e.g. `results.select(TestResult::is_fail)`.
    pub fn select<'a>(
        &'a self,
        predicate: impl Fn(&TestResult) -> bool + 'a,
    ) -> impl Iterator<Item = (&'a str, &'a TestResult)> + 'a {
        self.outcomes
            .iter()
            .filter(move |(_, result)| predicate(result))
            .map(|(id, result)| (id.as_str(), result))
    }

    /// Number of outcomes matching `predicate`.
    pub fn count(&self, predicate: impl Fn(&TestResult) -> bool) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, result)| predicate(result))
            .count()
    }

    /// True when no vector failed or was malformed. Skips are tolerated.
    pub fn all_passed(&self) -> bool {
        self.count(|r| r.is_fail() || r.is_error()) == 0
    }

    /// One-line tally, e.g. `"12 vectors: 11 passed, 1 failed, 0 skipped, 0 malformed"`.
    pub fn summary(&self) -> String {
        format!(
            "{} vectors: {} passed, {} failed, {} skipped, {} malformed",
            self.total(),
            self.count(TestResult::is_pass),
            self.count(TestResult::is_fail),
            self.count(TestResult::is_skip),
            self.count(TestResult::is_error),
        )
    }
}

/// Corpus runner that executes test vectors.
pub struct CorpusRunner {
    corpus: Corpus,
}

impl CorpusRunner {
    /// Load corpus from a file path.
    pub fn load<P: AsRef<Path>>(path: P) -> ConformanceResult<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }

    /// Load corpus from JSON text.
    pub fn from_json(content: &str) -> ConformanceResult<Self> {
        let corpus: Corpus = serde_json::from_str(content)?;
        tracing::debug!(vectors = corpus.vectors.len(), "loaded conformance corpus");
        Ok(Self { corpus })
    }

    /// Get the corpus manifest.
    pub fn manifest(&self) -> &CorpusManifest {
        &self.corpus.manifest
    }

    /// Get the number of test vectors.
    pub fn vector_count(&self) -> usize {
        self.corpus.vectors.len()
    }

    /// Run all test vectors and return results.
    pub fn run_all(&self) -> CorpusResults {
        let mut results = CorpusResults::new();

        for vector in &self.corpus.vectors {
            let result = run_vector(vector);
            if result.is_fail() {
                tracing::warn!(id = %vector.id, op = %vector.op, "conformance vector failed");
            }
            results.record(vector.id.as_str(), result);
        }

        results
    }
}

/// Run a single test vector.
pub fn run_vector(vector: &TestVector) -> TestResult {
    let text = match vector.input.get("text").and_then(|v| v.as_str()) {
        Some(t) => t,
        None => {
            return TestResult::Error {
                message: "Missing 'text' in input".to_string(),
            }
        }
    };

    match vector.op.as_str() {
        "parse" => run_parse(text, &vector.expected),
        "number_kind" => run_number_kind(text, &vector.expected),
        "roundtrip" => run_roundtrip(text),
        _ => TestResult::Skip {
            reason: format!("Unknown operation: {}", vector.op),
        },
    }
}

fn run_parse(text: &str, expected: &serde_json::Value) -> TestResult {
    let result = parse(text);

    if let Some(ok) = expected.get("ok") {
        let Some(canonical) = ok.as_str() else {
            return TestResult::Error {
                message: "'ok' must be the canonical text".to_string(),
            };
        };
        match result {
            Ok(value) => TestResult::compare(canonical, &to_string(&value)),
            Err(e) => TestResult::Fail {
                expected: format!("ok: {}", canonical),
                actual: format!("err: {}", e),
            },
        }
    } else if let Some(err) = expected.get("err") {
        match result {
            Ok(value) => TestResult::Fail {
                expected: format!("err: {}", err),
                actual: format!("ok: {}", to_string(&value)),
            },
            Err(e) => {
                let line = err.get("line").and_then(|v| v.as_u64());
                let column = err.get("column").and_then(|v| v.as_u64());
                let position_matches = line.map_or(true, |l| l == e.line as u64)
                    && column.map_or(true, |c| c == e.column as u64);
                if position_matches {
                    TestResult::Pass
                } else {
                    TestResult::Fail {
                        expected: format!("error at {:?}:{:?}", line, column),
                        actual: e.to_string(),
                    }
                }
            }
        }
    } else {
        TestResult::Error {
            message: "Invalid expected format".to_string(),
        }
    }
}

fn run_number_kind(text: &str, expected: &serde_json::Value) -> TestResult {
    let Some(kind) = expected.get("ok").and_then(|v| v.as_str()) else {
        return TestResult::Error {
            message: "Expected 'ok' kind name for number_kind".to_string(),
        };
    };

    match parse(text) {
        Ok(value) => match value.as_number() {
            Some(n) => TestResult::compare(kind, n.kind().name()),
            None => TestResult::Fail {
                expected: kind.to_string(),
                actual: value.type_name().to_string(),
            },
        },
        Err(e) => TestResult::Fail {
            expected: kind.to_string(),
            actual: format!("err: {}", e),
        },
    }
}

fn run_roundtrip(text: &str) -> TestResult {
    let original = match parse(text) {
        Ok(value) => value,
        Err(e) => {
            return TestResult::Error {
                message: format!("roundtrip input does not parse: {}", e),
            }
        }
    };

    let canonical = to_string(&original);
    match parse(&canonical) {
        Ok(reparsed) if reparsed == original => TestResult::Pass,
        Ok(reparsed) => TestResult::Fail {
            expected: format!("{:?}", original),
            actual: format!("{:?}", reparsed),
        },
        Err(e) => TestResult::Fail {
            expected: canonical,
            actual: format!("err: {}", e),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vector(op: &str, text: &str, expected: serde_json::Value) -> TestVector {
        TestVector {
            id: "t".to_string(),
            op: op.to_string(),
            input: serde_json::json!({ "text": text }),
            expected,
        }
    }

    #[test]
    fn test_parse_vectors() {
        let ok = vector(
            "parse",
            "[1,{\"a\":true}]",
            serde_json::json!({"ok": "[1, {\"a\": true}]"}),
        );
        assert_eq!(run_vector(&ok), TestResult::Pass);

        let err = vector(
            "parse",
            "01",
            serde_json::json!({"err": {"line": 1, "column": 2}}),
        );
        assert_eq!(run_vector(&err), TestResult::Pass);

        let wrong = vector("parse", "[]", serde_json::json!({"err": {}}));
        assert!(run_vector(&wrong).is_fail());
    }

    #[test]
    fn test_number_kind_vector() {
        let v = vector(
            "number_kind",
            "2147483648",
            serde_json::json!({"ok": "i64"}),
        );
        assert_eq!(run_vector(&v), TestResult::Pass);

        let v = vector(
            "number_kind",
            "2147483648",
            serde_json::json!({"ok": "i32"}),
        );
        assert!(run_vector(&v).is_fail());
    }

    #[test]
    fn test_roundtrip_vector() {
        let v = vector(
            "roundtrip",
            r#"{"k": [1.25, "x\ny", null]}"#,
            serde_json::json!({}),
        );
        assert_eq!(run_vector(&v), TestResult::Pass);
    }

    #[test]
    fn test_malformed_vectors() {
        let v = TestVector {
            id: "t".to_string(),
            op: "parse".to_string(),
            input: serde_json::json!({}),
            expected: serde_json::json!({}),
        };
        assert!(matches!(run_vector(&v), TestResult::Error { .. }));

        let v = vector("frobnicate", "1", serde_json::json!({}));
        assert!(matches!(run_vector(&v), TestResult::Skip { .. }));
    }

    #[test]
    fn test_corpus_results() {
        let mut results = CorpusResults::new();
        results.record("a", TestResult::Pass);
        results.record("b", TestResult::compare("x", "y"));
        results.record(
            "c",
            TestResult::Skip {
                reason: "not implemented".to_string(),
            },
        );
        results.record("d", TestResult::Pass);

        assert_eq!(results.total(), 4);
        assert_eq!(results.count(TestResult::is_pass), 2);
        assert!(!results.all_passed());
        assert_eq!(
            results
                .select(TestResult::is_fail)
                .map(|(id, _)| id)
                .collect::<Vec<_>>(),
            vec!["b"]
        );
        assert_eq!(
            results.summary(),
            "4 vectors: 2 passed, 1 failed, 1 skipped, 0 malformed"
        );
    }

    #[test]
    fn test_skips_do_not_fail_a_run() {
        let mut results = CorpusResults::new();
        results.record(
            "a",
            TestResult::Skip {
                reason: "unknown op".to_string(),
            },
        );
        assert!(results.all_passed());

        results.record(
            "b",
            TestResult::Error {
                message: "missing text".to_string(),
            },
        );
        assert!(!results.all_passed());
    }

    #[test]
    fn test_runner_from_json() {
        let runner = CorpusRunner::from_json(
            r#"{
                "manifest": {"format_version": "1"},
                "vectors": [
                    {"id": "a", "op": "parse", "input": {"text": "{}"}, "expected": {"ok": "{}"}}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(runner.vector_count(), 1);
        assert_eq!(runner.manifest().format_version, "1");
        assert!(runner.run_all().all_passed());

        assert!(CorpusRunner::from_json("{").is_err());
    }
}
