use serde::{Deserialize, Serialize};

/// Classification labels the oracle is instructed to emit for `status`.
///
/// These are a textual convention only — the extractor never rejects a
/// record whose status falls outside this set.
pub const STATUS_LABELS: [&str; 4] = [
    "Within Normal Range",
    "Outside Normal Range - Slight",
    "Outside Normal Range - Moderate",
    "Outside Normal Range - Significant",
];

/// One test result extracted from the oracle's free-text analysis.
///
/// Every field is optional: the extractor emits whatever subset of fields it
/// saw before the next `Test Name:` line, and absent fields are omitted from
/// the JSON output rather than serialized as null.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(utoipa::ToSchema))]
pub struct TestResult {
    /// The test's label, extracted verbatim
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Numeric value plus unit, kept as free text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    /// Reference interval plus unit, free text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,

    /// One of the labels in [`STATUS_LABELS`], by oracle instruction only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Multi-paragraph dietary/lifestyle advice. Paragraph boundaries are
    /// double newlines; the first line of a paragraph may carry a section
    /// keyword (include/avoid/lifestyle/supplements) used by the UI.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advice: Option<String>,
}

impl TestResult {
    /// True when no field has been set yet.
    ///
    /// The extractor uses this to decide whether a record under
    /// construction is worth emitting.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.value.is_none()
            && self.range.is_none()
            && self.status.is_none()
            && self.advice.is_none()
    }
}

/// Parameters for one report analysis: the uploaded image plus the patient
/// context that parameterizes the prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportAnalysisRequest {
    /// Base64-encoded image bytes, passed through to the oracle unmodified
    pub image: String,

    /// MIME type of the uploaded image (e.g. "image/png")
    pub image_type: String,

    /// Patient age in years
    pub age: u32,

    /// Patient sex as free text (the prompt interpolates it verbatim)
    pub sex: String,

    /// Language the advice should be written in
    pub language: String,
}
