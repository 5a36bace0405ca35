//! Field-extraction prompt engineering

use remit_domain::FIELD_KEYS;

/// Builds the instruction prompt for statement field extraction
///
/// The prompt is a pure function of the document text: identical input
/// yields byte-identical output, which is what makes the model call
/// mockable and cacheable in tests.
pub struct PromptBuilder<'a> {
    document_text: &'a str,
}

impl<'a> PromptBuilder<'a> {
    /// Create a prompt builder for the given document text.
    pub fn new(document_text: &'a str) -> Self {
        Self { document_text }
    }

    /// Build the complete extraction prompt.
    ///
    /// The document text is embedded verbatim between fixed delimiter
    /// lines so the model cannot confuse statement content with the
    /// instructions around it.
    pub fn build(&self) -> String {
        let mut prompt = String::new();

        prompt.push_str(EXTRACTION_INSTRUCTIONS);
        prompt.push_str("\n\n");

        prompt.push_str("Statement text:\n");
        prompt.push_str(TEXT_BEGIN);
        prompt.push('\n');
        prompt.push_str(self.document_text);
        prompt.push('\n');
        prompt.push_str(TEXT_END);
        prompt.push_str("\n\n");

        prompt.push_str(OUTPUT_FORMAT_REMINDER);

        prompt
    }
}

/// Opening delimiter around the embedded document text.
pub const TEXT_BEGIN: &str = "-----BEGIN STATEMENT TEXT-----";

/// Closing delimiter around the embedded document text.
pub const TEXT_END: &str = "-----END STATEMENT TEXT-----";

const EXTRACTION_INSTRUCTIONS: &str = r#"You are given the text of a credit-card statement. Extract exactly these six fields:

- "issuer": the bank or card network that issued the card
- "cardLast4": the last 4 digits of the card number
- "statementPeriod": the statement period or billing cycle
- "dueDate": the payment due date
- "totalBalance": the total or new balance for the period
- "minimumPayment": the minimum payment due

Rules:
- Report each value as it appears in the statement text
- If a field cannot be located in the text, use the literal string "Not Found" as its value
- Do not guess or infer values that are not present in the text"#;

const OUTPUT_FORMAT_REMINDER: &str = r#"Respond with a single strict JSON object containing exactly the six keys "issuer", "cardLast4", "statementPeriod", "dueDate", "totalBalance" and "minimumPayment". No markdown code blocks, no commentary, no additional text."#;
