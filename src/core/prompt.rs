use crate::models::{Product, UserProfile};

/// System message for filtering calls
pub const FILTER_SYSTEM_PROMPT: &str = "You are a strict rule-based product filtering engine.";

/// System message for recommendation copy calls
pub const COPY_SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// Line prefix carrying the recommendable / not recommendable label
pub const CONCLUSION_MARKER: &str = "[Conclusion]";

/// Line prefix carrying the one-sentence reason
pub const REASON_MARKER: &str = "[Reason]";

const FILTER_RULES: &str = "\
1. Age restriction: if the product belongs to an age-restricted category and the user's age does not qualify, it is not recommendable.
2. Gender and sensitive categories: if the product has a strong gender orientation that does not match the user's gender, it is not recommendable.
3. User block-list: if the product's category or brand is in the user's blocked_list, it is not recommendable.
4. Price band: if the product price is clearly outside the user's price_range, it is not recommendable.
5. Stock: if stock is 0 or the product is marked unavailable, it is not recommendable.
6. Durable-goods repeat purchase: if the product is a main durable good and the user recently purchased the same kind of item, the main product is not recommendable (accessories and consumables are exempt).";

fn to_pretty_json<T: serde::Serialize>(value: &T) -> String {
    // Plain data records always serialize; fall back to an empty object regardless.
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

/// Build the filtering prompt for one user/product pair
///
/// The output is fully determined by its inputs: the same records always
/// produce the same prompt.
pub fn build_filter_prompt(user: &UserProfile, product: &Product) -> String {
    format!(
        "You act as the product recommendation filter of an e-commerce system.
Decide whether the product below is suitable for proactive recommendation, using the rules that follow.

[User]
{user}

[Product]
{product}

[Filtering rules]
{rules}

Apply the rules above strictly.

Output format (exactly two lines, nothing else):
{conclusion} recommendable / not recommendable
{reason} one sentence explaining why
",
        user = to_pretty_json(user),
        product = to_pretty_json(product),
        rules = FILTER_RULES,
        conclusion = CONCLUSION_MARKER,
        reason = REASON_MARKER,
    )
}

/// Build the prompt asking for one sentence of recommendation copy
pub fn build_copy_prompt(user: &UserProfile, product: &Product) -> String {
    format!(
        "You are a professional e-commerce shopping assistant. Write recommendation copy for the user below.

[User]
{user}

[Product]
{product}

Strict requirements:
1. Output one natural, friendly and useful recommendation sentence.
2. Do not output brackets, notes, summaries, explanations or analysis.
3. Never use forms such as (xxx), [xxx] or {{xxx}}.
4. Do not output word counts, \"reason\", \"key points\" or similar.
5. No more than 60 words.
",
        user = serde_json::to_string(user).unwrap_or_else(|_| "{}".to_string()),
        product = serde_json::to_string(product).unwrap_or_else(|_| "{}".to_string()),
    )
}
