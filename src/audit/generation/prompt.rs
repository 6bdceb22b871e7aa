use std::fmt::Write as _;
use std::io;
use std::path::Path;

use crate::audit::domain::BusinessFacts;

/// The fixed system instruction sent with every generation request. The text
/// itself is an externally versioned asset; this type only carries it.
#[derive(Debug, Clone)]
pub struct SystemPrompt {
    text: String,
}

impl SystemPrompt {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn load(path: &Path) -> io::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self { text })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

fn or_unknown(value: &Option<String>) -> &str {
    value.as_deref().filter(|v| !v.is_empty()).unwrap_or("unknown")
}

fn or_not_provided(value: &Option<String>) -> &str {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .unwrap_or("Not provided")
}

/// Builds the user message by plain field interpolation; no analysis of the
/// facts happens here.
pub(crate) fn user_message(facts: &BusinessFacts) -> String {
    let mut message = String::new();

    let _ = writeln!(
        message,
        "Analyze the following business and generate a comprehensive digital presence audit:"
    );
    let _ = writeln!(message);
    let _ = writeln!(message, "BUSINESS DATA:");
    let _ = writeln!(message, "- Business Name: {}", facts.business_name);
    let _ = writeln!(
        message,
        "- Website URL: {}",
        facts
            .website_url
            .as_deref()
            .filter(|v| !v.is_empty())
            .unwrap_or("No website provided")
    );
    let _ = writeln!(message, "- Industry: {}", or_unknown(&facts.industry));
    let _ = writeln!(message, "- Location: {}", or_unknown(&facts.location));
    let _ = writeln!(message, "- Business Age: {}", or_unknown(&facts.business_age));
    let _ = writeln!(
        message,
        "- Phone Number: {}",
        or_not_provided(&facts.phone_number)
    );
    let _ = writeln!(message);
    let _ = writeln!(message, "SOCIAL MEDIA HANDLES:");
    let handles = &facts.social_handles;
    let _ = writeln!(message, "- Instagram: {}", or_not_provided(&handles.instagram));
    let _ = writeln!(message, "- Facebook: {}", or_not_provided(&handles.facebook));
    let _ = writeln!(message, "- TikTok: {}", or_not_provided(&handles.tiktok));
    let _ = writeln!(message, "- Twitter/X: {}", or_not_provided(&handles.twitter));
    let _ = writeln!(message, "- LinkedIn: {}", or_not_provided(&handles.linkedin));
    let _ = writeln!(message, "- YouTube: {}", or_not_provided(&handles.youtube));
    let _ = writeln!(message);
    let _ = write!(
        message,
        "Generate a complete audit following the JSON schema specified in your instructions. \
         Be thorough but realistic in your scoring based on the provided information."
    );

    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::domain::SocialHandles;

    #[test]
    fn message_interpolates_facts_and_placeholders() {
        let facts = BusinessFacts {
            business_name: "Corner Bakery".to_string(),
            website_url: None,
            industry: Some("food".to_string()),
            location: None,
            business_age: None,
            phone_number: Some("555-0134".to_string()),
            social_handles: SocialHandles {
                instagram: Some("@cornerbakery".to_string()),
                ..SocialHandles::default()
            },
        };

        let message = user_message(&facts);

        assert!(message.contains("- Business Name: Corner Bakery"));
        assert!(message.contains("- Website URL: No website provided"));
        assert!(message.contains("- Industry: food"));
        assert!(message.contains("- Location: unknown"));
        assert!(message.contains("- Phone Number: 555-0134"));
        assert!(message.contains("- Instagram: @cornerbakery"));
        assert!(message.contains("- Facebook: Not provided"));
    }
}
