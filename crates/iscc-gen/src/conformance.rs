//! Conformance self-check against the published ISCC vectors.
//!
//! Each case runs one generator on fixed inputs and compares the produced
//! code with the reference value. Failures are collected, never raised, so
//! a single report covers every case.

use serde::Serialize;
use tracing::{debug, info, warn};

use iscc_core::IsccResult;

use crate::{
    gen_audio_code, gen_data_code, gen_image_code, gen_instance_code, gen_meta_code,
    gen_text_code,
};

struct Case {
    name: &'static str,
    expected: &'static str,
    run: fn() -> IsccResult<String>,
}

const CASES: &[Case] = &[
    Case {
        name: "meta_title_only",
        expected: "ISCC:AAAZXZ6OU74YAZIM",
        run: || Ok(gen_meta_code("Die Unendliche Geschichte", None, None, 64)?.iscc),
    },
    Case {
        name: "meta_title_description",
        expected: "ISCC:AAAZXZ6OU4E45RB5",
        run: || {
            let description = Some("Von Michael Ende");
            Ok(gen_meta_code("Die Unendliche Geschichte", description, None, 64)?.iscc)
        },
    },
    Case {
        name: "meta_json_object",
        expected: "ISCC:AAAWKLHFXN63LHL2",
        run: || Ok(gen_meta_code("Hello", None, Some(r#"{"some":"object"}"#), 64)?.iscc),
    },
    Case {
        name: "meta_data_url",
        expected: "ISCC:AAAWKLHFXN43ICP2",
        run: || {
            let url = "data:application/json;charset=utf-8;base64,eyJzb21lIjogIm9iamVjdCJ9";
            Ok(gen_meta_code("Hello", None, Some(url), 64)?.iscc)
        },
    },
    Case {
        name: "text_empty",
        expected: "ISCC:EAASL4F2WZY7KBXB",
        run: || Ok(gen_text_code("", 64)?.iscc),
    },
    Case {
        name: "text_hello_world",
        expected: "ISCC:EAASKDNZNYGUUF5A",
        run: || Ok(gen_text_code("Hello World", 64)?.iscc),
    },
    Case {
        name: "image_all_black",
        expected: "ISCC:EEAQAAAAAAAAAAAA",
        run: || Ok(gen_image_code(&[0u8; 1024], 64)?.iscc),
    },
    Case {
        name: "image_all_white",
        expected: "ISCC:EEBYAAAAAAAAAAAAAAAAAAAAAAAAA",
        run: || Ok(gen_image_code(&[255u8; 1024], 128)?.iscc),
    },
    Case {
        name: "audio_empty",
        expected: "ISCC:EIAQAAAAAAAAAAAA",
        run: || Ok(gen_audio_code(&[], 64)?.iscc),
    },
    Case {
        name: "audio_single",
        expected: "ISCC:EIBQAAAAAEAAAAABAAAAAAAAAAAAA",
        run: || Ok(gen_audio_code(&[1], 128)?.iscc),
    },
    Case {
        name: "audio_negative",
        expected: "ISCC:EIDQAAAAAH777777AAAAAAAAAAAACAAAAAAP777774AAAAAAAAAAAAI",
        run: || Ok(gen_audio_code(&[-1, 0, 1], 256)?.iscc),
    },
    Case {
        name: "data_two_bytes",
        expected: "ISCC:GAAXL2XYM5BQIAZ3",
        run: || Ok(gen_data_code(b"\xff\x00", 64)?.iscc),
    },
    Case {
        name: "instance_empty",
        expected: "ISCC:IAA26E2JXH27TING",
        run: || Ok(gen_instance_code(b"", 64)?.iscc),
    },
];

/// A case whose output did not match its reference code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConformanceFailure {
    /// Case name
    pub case: &'static str,
    /// Reference code
    pub expected: &'static str,
    /// Produced code, or the error message
    pub actual: String,
}

/// Outcome of a conformance run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConformanceReport {
    /// Number of matching cases
    pub passed: usize,
    /// Cases that produced a different code or an error
    pub failures: Vec<ConformanceFailure>,
}

impl ConformanceReport {
    /// Returns true if every case matched.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Returns the number of cases run.
    pub fn total(&self) -> usize {
        self.passed + self.failures.len()
    }
}

fn run_cases(cases: &[Case]) -> ConformanceReport {
    let mut report = ConformanceReport::default();
    for case in cases {
        let actual = match (case.run)() {
            Ok(code) if code == case.expected => {
                debug!(case = case.name, "Conformance case passed");
                report.passed += 1;
                continue;
            }
            Ok(code) => code,
            Err(e) => e.to_string(),
        };
        warn!(
            case = case.name,
            expected = case.expected,
            actual = %actual,
            "Conformance case failed"
        );
        report.failures.push(ConformanceFailure {
            case: case.name,
            expected: case.expected,
            actual,
        });
    }
    report
}

/// Runs every reference case and returns the full report.
pub fn conformance_report() -> ConformanceReport {
    let report = run_cases(CASES);
    info!(
        passed = report.passed,
        failed = report.failures.len(),
        "Conformance run complete"
    );
    report
}

/// Returns true if every reference case produces its published code.
pub fn conformance_selftest() -> bool {
    conformance_report().is_success()
}
