//! Builds the fixed instruction template sent to the oracle.
//!
//! The template pins down the exact line format the extractor scans for, so
//! the format block here and the prefixes in `extractor` must stay in sync.

/// Build the analysis prompt for one report, parameterized by the patient
/// context supplied with the upload.
pub fn build_analysis_prompt(age: u32, sex: &str, language: &str) -> String {
    format!(
        r#"Analyze this blood test report for a {age} year old {sex} patient. For each test result:
1. Extract the test name
2. Extract the exact numerical value with its units
3. Extract the reference range with units
4. Compare the value to the reference range and classify as:
   - "Within Normal Range" if within range
   - "Outside Normal Range - Slight" or "Outside Normal Range - Moderate" if slightly or moderately outside range
   - "Outside Normal Range - Significant" if significantly outside range
5. Provide very detailed advice including:
   - Brief explanation of what this test measures and its importance

   Foods to Include:
   - List 4-6 specific foods with exact portions (e.g., "Spinach (2 cups raw)")
   - Include nutritional content for each food
   - Explain why each food helps

   Foods to Avoid:
   - List specific foods that might negatively impact the levels
   - Explain why each should be avoided
   - Include timing considerations if relevant

   Lifestyle Recommendations:
   - Specific exercise recommendations with duration and frequency
   - Sleep recommendations
   - Stress management techniques if relevant
   - Other lifestyle factors that could impact levels

   Supplements if needed:
   - Specific supplements with dosage
   - Best time to take them
   - Potential interactions to watch for
   - Duration of supplementation if applicable

Format each result exactly as:
Test Name: [name]
Value: [numerical value with units]
Range: [reference range with units]
Status: [status based on comparison]
Advice: [detailed advice following the structure above]

Make the advice section very detailed and specific, similar to this example:
"This test measures your hemoglobin levels, which is crucial for oxygen transport throughout your body.

Foods to Include:
- Lean beef (4 oz serving): Rich in heme iron (3.2mg) and B12, highly absorbable
- Spinach (2 cups raw): Contains 3.2mg non-heme iron, vitamin C, and folate
- Lentils (1 cup cooked): Provides 6.6mg iron, fiber, and plant protein
- Oysters (3 oz): Exceptional source of iron (8mg) and zinc
- Quinoa (1 cup cooked): Contains 2.8mg iron, complete protein, and fiber

Foods to Avoid:
- Coffee/Tea within 2 hours of iron-rich meals: Reduces iron absorption by 60%
- Calcium-rich foods with iron sources: Interferes with iron absorption
- High-phytate foods like unleavened whole grains: Bind to iron

Lifestyle Recommendations:
- Perform moderate cardio 30 minutes daily to improve oxygen circulation
- Get 7-9 hours of quality sleep in a cool, dark room
- Practice stress-reduction techniques like deep breathing for 10 minutes daily
- Avoid intense exercise during peak supplementation times

Supplements if needed:
- Iron bisglycinate (25mg daily): More gentle on stomach
- Take on empty stomach 1 hour before meals
- Pair with Vitamin C (500mg) to enhance absorption
- Continue for 3 months, then retest levels"

Write the advice in {language}.

Do not include any explanations or summaries outside of this format."#
    )
}
