//! Converts the oracle's free-text analysis into structured test results.
//!
//! The oracle is prompted to emit consecutive line groups, each starting with
//! a `Test Name:` line followed by `Value:`, `Range:`, `Status:` and
//! `Advice:` lines. Nothing enforces that convention, so this is a tolerant
//! single-pass scan: unrecognized lines either extend an open advice field or
//! are dropped, and a malformed input degrades to partial or empty records
//! rather than an error.

use crate::entities::TestResult;

/// Recognized field markers, checked in this order against each line.
const TEST_NAME_PREFIX: &str = "Test Name: ";
const VALUE_PREFIX: &str = "Value: ";
const RANGE_PREFIX: &str = "Range: ";
const STATUS_PREFIX: &str = "Status: ";
const ADVICE_PREFIX: &str = "Advice: ";

/// Scan one block of oracle output into an ordered list of test results.
///
/// Records are emitted in the order their `Test Name:` lines appear. A new
/// `Test Name:` line closes the record under construction if that record has
/// at least one field set. Lines that match no prefix are appended (with a
/// preceding newline) to the current record's advice, but only once an
/// `Advice:` line has been seen for that record; before that they are
/// silently dropped. The same applies to blank lines, which is how advice
/// paragraphs keep their double-newline boundaries.
///
/// This function cannot fail: input with no `Test Name:` line yields an
/// empty vector, and nothing checks that a record is complete.
pub fn extract_test_results(text: &str) -> Vec<TestResult> {
    let (mut results, current) = text.lines().fold(
        (Vec::new(), TestResult::default()),
        |(mut results, mut current), line| {
            if let Some(rest) = line.strip_prefix(TEST_NAME_PREFIX) {
                if !current.is_empty() {
                    results.push(std::mem::take(&mut current));
                }
                current.name = Some(rest.trim().to_string());
            } else if let Some(rest) = line.strip_prefix(VALUE_PREFIX) {
                current.value = Some(rest.trim().to_string());
            } else if let Some(rest) = line.strip_prefix(RANGE_PREFIX) {
                current.range = Some(rest.trim().to_string());
            } else if let Some(rest) = line.strip_prefix(STATUS_PREFIX) {
                current.status = Some(rest.trim().to_string());
            } else if let Some(rest) = line.strip_prefix(ADVICE_PREFIX) {
                current.advice = Some(rest.trim().to_string());
            } else if let Some(advice) = current.advice.as_mut() {
                advice.push('\n');
                advice.push_str(line);
            }
            // Known quirk: an unprefixed line with no open advice field is
            // dropped, including any text before the first Test Name line.
            (results, current)
        },
    );

    if !current.is_empty() {
        results.push(current);
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(results: &[TestResult]) -> Vec<&str> {
        results
            .iter()
            .map(|r| r.name.as_deref().unwrap_or(""))
            .collect()
    }

    #[test]
    fn test_well_formed_groups_yield_one_record_each() {
        let text = "Test Name: Hemoglobin\n\
                    Value: 13.5 g/dL\n\
                    Range: 12-16 g/dL\n\
                    Status: Within Normal Range\n\
                    Advice: Looks good.\n\
                    Test Name: Ferritin\n\
                    Value: 8 ng/mL\n\
                    Range: 12-150 ng/mL\n\
                    Status: Outside Normal Range - Moderate\n\
                    Advice: Increase iron intake.\n\
                    Test Name: TSH\n\
                    Value: 2.1 mIU/L\n\
                    Range: 0.4-4.0 mIU/L\n\
                    Status: Within Normal Range\n\
                    Advice: No action needed.";

        let results = extract_test_results(text);

        assert_eq!(results.len(), 3);
        assert_eq!(named(&results), vec!["Hemoglobin", "Ferritin", "TSH"]);
    }

    #[test]
    fn test_fields_are_trimmed_after_prefix_strip() {
        let text = "Test Name:   Glucose  \nValue:  95 mg/dL \nRange: 70-100 mg/dL\nStatus:  Within Normal Range ";

        let results = extract_test_results(text);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name.as_deref(), Some("Glucose"));
        assert_eq!(results[0].value.as_deref(), Some("95 mg/dL"));
        assert_eq!(results[0].range.as_deref(), Some("70-100 mg/dL"));
        assert_eq!(results[0].status.as_deref(), Some("Within Normal Range"));
        assert_eq!(results[0].advice, None);
    }

    #[test]
    fn test_multi_line_advice_preserves_newlines_and_order() {
        // The example from the prompt's own format instructions: the advice
        // paragraph break (a blank line in the source) must survive as a
        // double newline in the extracted record.
        let text = "Test Name: Hemoglobin\nValue: 13.5 g/dL\nRange: 12-16 g/dL\nStatus: Within Normal Range\nAdvice: This measures oxygen transport.\n\nFoods to Include:\n- Spinach";

        let results = extract_test_results(text);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name.as_deref(), Some("Hemoglobin"));
        assert_eq!(results[0].value.as_deref(), Some("13.5 g/dL"));
        assert_eq!(results[0].range.as_deref(), Some("12-16 g/dL"));
        assert_eq!(results[0].status.as_deref(), Some("Within Normal Range"));
        assert_eq!(
            results[0].advice.as_deref(),
            Some("This measures oxygen transport.\n\nFoods to Include:\n- Spinach")
        );
    }

    #[test]
    fn test_no_test_name_line_yields_empty_sequence() {
        let text = "The report appears blurry.\n\nPlease upload a clearer image.";
        assert!(extract_test_results(text).is_empty());
    }

    #[test]
    fn test_empty_input_yields_empty_sequence() {
        assert!(extract_test_results("").is_empty());
    }

    #[test]
    fn test_lone_test_name_yields_record_with_only_name() {
        let results = extract_test_results("Test Name: Vitamin D");

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name.as_deref(), Some("Vitamin D"));
        assert_eq!(results[0].value, None);
        assert_eq!(results[0].range, None);
        assert_eq!(results[0].status, None);
        assert_eq!(results[0].advice, None);
    }

    #[test]
    fn test_no_field_bleed_between_consecutive_groups() {
        let text = "Test Name: Hemoglobin\n\
                    Value: 13.5 g/dL\n\
                    Advice: Keep it up.\n\
                    Test Name: Ferritin\n\
                    Range: 12-150 ng/mL";

        let results = extract_test_results(text);

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].name.as_deref(), Some("Hemoglobin"));
        assert_eq!(results[0].value.as_deref(), Some("13.5 g/dL"));
        assert_eq!(results[0].range, None);
        assert_eq!(results[0].advice.as_deref(), Some("Keep it up."));
        assert_eq!(results[1].name.as_deref(), Some("Ferritin"));
        assert_eq!(results[1].value, None);
        assert_eq!(results[1].range.as_deref(), Some("12-150 ng/mL"));
        assert_eq!(results[1].advice, None);
    }

    #[test]
    fn test_unprefixed_lines_before_advice_are_dropped() {
        // Continuation lines only attach once an Advice: line has opened the
        // field; anything earlier vanishes. Preserved as-is from the source
        // behavior, quirky as it is.
        let text = "Test Name: Hemoglobin\n\
                    this line has no prefix\n\
                    Value: 13.5 g/dL\n\
                    Advice: Eat well.\n\
                    this one attaches";

        let results = extract_test_results(text);

        assert_eq!(results.len(), 1);
        assert_eq!(
            results[0].advice.as_deref(),
            Some("Eat well.\nthis one attaches")
        );
    }

    #[test]
    fn test_text_before_first_test_name_is_discarded() {
        let text = "Here is the analysis you asked for:\n\nTest Name: Glucose\nValue: 95 mg/dL";

        let results = extract_test_results(text);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name.as_deref(), Some("Glucose"));
        assert_eq!(results[0].value.as_deref(), Some("95 mg/dL"));
    }

    #[test]
    fn test_prefixed_line_before_first_test_name_starts_nameless_record() {
        // A Value: line ahead of any Test Name: sets a field on the record
        // under construction, so the following Test Name: line flushes it as
        // a nameless record. Faithful to the original accumulation rules.
        let text = "Value: 5.0\nTest Name: Glucose\nValue: 95 mg/dL";

        let results = extract_test_results(text);

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].name, None);
        assert_eq!(results[0].value.as_deref(), Some("5.0"));
        assert_eq!(results[1].name.as_deref(), Some("Glucose"));
        assert_eq!(results[1].value.as_deref(), Some("95 mg/dL"));
    }

    #[test]
    fn test_later_prefix_line_overwrites_earlier_field() {
        let text = "Test Name: Glucose\nValue: 95 mg/dL\nValue: 96 mg/dL";

        let results = extract_test_results(text);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].value.as_deref(), Some("96 mg/dL"));
    }

    #[test]
    fn test_no_deduplication_of_repeated_test_names() {
        let text = "Test Name: Glucose\nValue: 95 mg/dL\nTest Name: Glucose\nValue: 97 mg/dL";

        let results = extract_test_results(text);

        assert_eq!(results.len(), 2);
        assert_eq!(named(&results), vec!["Glucose", "Glucose"]);
    }

    #[test]
    fn test_accumulator_does_not_leak_between_invocations() {
        let first = extract_test_results("Test Name: Glucose\nAdvice: Eat well.");
        let second = extract_test_results("unprefixed line\nmore unprefixed text");

        assert_eq!(first.len(), 1);
        assert!(second.is_empty());
    }
}
