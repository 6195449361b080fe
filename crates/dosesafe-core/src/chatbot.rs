//! Offline chatbot answers, greeting and stored scan context

use dosesafe_store::{read_json, write_json, Store, StorageKey};
use tracing::error;

use crate::{ChatReply, ChatbotContext, ReplyType, Result};

/// Canned prompts offered to the user, one per fallback category
pub const QUICK_QUESTIONS: [&str; 8] = [
    "What are common drug interactions?",
    "How should I store my medications?",
    "What are the side effects of Ibuprofen?",
    "Can I take medication with alcohol?",
    "What should I do if I miss a dose?",
    "Are there any pregnancy warnings?",
    "How do I know if medications are expired?",
    "What are the signs of allergic reactions?",
];

const INTERACTIONS: &str = "Drug interactions happen when two or more medications affect each other's effectiveness or increase side effects. Common types:
- Drug-drug interactions: between different medications
- Drug-food interactions: medications with certain foods
- Drug-alcohol interactions: medications with alcohol
Always tell your healthcare provider about every medication, supplement and herbal product you take.";

const STORAGE: &str = "Proper storage keeps medications effective:
- Keep them in their original labelled containers
- Store in a cool, dry place away from bathrooms and kitchens
- Avoid extreme temperatures unless refrigeration is required
- Keep them away from children and pets
- Check expiration dates regularly";

const IBUPROFEN: &str = "Ibuprofen is a nonsteroidal anti-inflammatory drug (NSAID). Common side effects: stomach upset or heartburn, nausea, dizziness or headache, raised blood pressure.
Seek medical attention for severe stomach pain or bleeding, difficulty breathing, swelling of the face, lips or throat, or unusual bruising.
Take it with food to reduce stomach irritation.";

const ALCOHOL: &str = "Alcohol and medications can interact dangerously:
- More drowsiness with sedatives and antihistamines
- Liver damage with acetaminophen
- Stomach bleeding with NSAIDs such as ibuprofen and aspirin
- Blood sugar swings with diabetes medications
- More bleeding with blood thinners
Check with your pharmacist before drinking alcohol with any medication.";

const MISSED_DOSE: &str = "If you miss a dose:
- Take it as soon as you remember if it is close to the scheduled time
- Skip it if it is almost time for the next dose
- Never double up to catch up
- Set reminders to avoid missing doses
For critical medications (heart, diabetes, seizure drugs), contact your doctor right away.";

const PREGNANCY: &str = "Medication safety during pregnancy:
- Consult your doctor before taking any medication
- Commonly avoided: aspirin and ibuprofen in the third trimester, some antibiotics, ACE inhibitors
- Generally acceptable with approval: acetaminophen for pain or fever, certain antibiotics, prenatal vitamins
Always tell healthcare providers that you are pregnant.";

const EXPIRY: &str = "Expired medications can lose potency. Do not use expired antibiotics, insulin, nitroglycerin or liquid medications.
Dispose of expired medications through pharmacy take-back programs or approved disposal kits, and never share medications with others.";

const ALLERGY: &str = "Signs of an allergic reaction to a medication:
- Mild: skin rash or hives, itching, mild swelling
- Severe (seek emergency care): difficulty breathing or wheezing, swelling of the face, lips, tongue or throat, rapid pulse, dizziness or fainting
If you suspect a reaction, stop the medication and contact your healthcare provider.";

const GENERIC: &str = "I'm here to help with medication questions! I can provide information about drug interactions, side effects, storage, dosing, and general medication safety. What specific question do you have about your medications?";

const DEFAULT_GREETING: &str = "Hello! I'm your AI medication assistant. How can I help you today?";

/// One keyword rule evaluated against the lower-cased message
#[derive(Clone, Copy)]
pub struct FallbackRule {
    pub category: &'static str,
    matches: fn(&str) -> bool,
    response: &'static str,
}

impl FallbackRule {
    pub fn new(
        category: &'static str,
        matches: fn(&str) -> bool,
        response: &'static str,
    ) -> Self {
        Self {
            category,
            matches,
            response,
        }
    }

    pub fn matches(&self, lowered: &str) -> bool {
        (self.matches)(lowered)
    }
}

impl std::fmt::Debug for FallbackRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FallbackRule")
            .field("category", &self.category)
            .finish_non_exhaustive()
    }
}

/// Ordered rules, first match wins, with one generic default
#[derive(Debug, Clone)]
pub struct FallbackResponder {
    rules: Vec<FallbackRule>,
    default: &'static str,
}

impl FallbackResponder {
    pub fn new() -> Self {
        Self {
            rules: vec![
                FallbackRule::new(
                    "drug interaction",
                    |m| m.contains("drug interaction") || m.contains("interaction"),
                    INTERACTIONS,
                ),
                FallbackRule::new(
                    "storage",
                    |m| m.contains("store") || m.contains("storage"),
                    STORAGE,
                ),
                FallbackRule::new("ibuprofen", |m| m.contains("ibuprofen"), IBUPROFEN),
                FallbackRule::new("alcohol", |m| m.contains("alcohol"), ALCOHOL),
                FallbackRule::new(
                    "missed dose",
                    |m| m.contains("miss") && m.contains("dose"),
                    MISSED_DOSE,
                ),
                FallbackRule::new(
                    "pregnancy",
                    |m| m.contains("pregnancy") || m.contains("pregnant"),
                    PREGNANCY,
                ),
                FallbackRule::new(
                    "expire",
                    |m| m.contains("expire") || m.contains("expiration"),
                    EXPIRY,
                ),
                FallbackRule::new(
                    "allergic",
                    |m| m.contains("allergic") || m.contains("allergy"),
                    ALLERGY,
                ),
            ],
            default: GENERIC,
        }
    }

    /// Category of the first matching rule, `None` for the generic default
    pub fn category(&self, message: &str) -> Option<&'static str> {
        self.find(message).map(|rule| rule.category)
    }

    pub fn respond(&self, message: &str) -> ChatReply {
        let response = self.find(message).map_or(self.default, |rule| rule.response);
        ChatReply {
            response: response.to_string(),
            reply_type: ReplyType::Info,
            fallback: true,
        }
    }

    pub fn rules(&self) -> &[FallbackRule] {
        &self.rules
    }

    fn find(&self, message: &str) -> Option<&FallbackRule> {
        let lowered = message.to_lowercase();
        self.rules.iter().find(|rule| rule.matches(&lowered))
    }
}

impl Default for FallbackResponder {
    fn default() -> Self {
        Self::new()
    }
}

/// Opening message, mentioning a recent scan when one was handed over
pub fn greeting(context: Option<&ChatbotContext>) -> String {
    match context.map(|c| c.medications.len()) {
        Some(count) if count > 0 => format!(
            "Hello! I see you recently scanned {count} medication(s). I can help answer questions about your medications, interactions, or general medication safety. What would you like to know?"
        ),
        _ => DEFAULT_GREETING.to_string(),
    }
}

pub fn save_context<S: Store + ?Sized>(store: &S, context: &ChatbotContext) -> Result<()> {
    Ok(write_json(store, StorageKey::ChatbotContext, context)?)
}

/// Stored chatbot context; unreadable context reads as none
pub fn load_context<S: Store + ?Sized>(store: &S) -> Option<ChatbotContext> {
    read_json(store, StorageKey::ChatbotContext).unwrap_or_else(|e| {
        error!("error parsing scan context: {e}");
        None
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use dosesafe_store::MemoryStore;
    use serde_json::json;

    #[test]
    fn test_quick_questions_each_hit_their_category() {
        let responder = FallbackResponder::new();
        let categories: Vec<_> = QUICK_QUESTIONS
            .iter()
            .map(|q| responder.category(q))
            .collect();
        assert_eq!(
            categories,
            vec![
                Some("drug interaction"),
                Some("storage"),
                Some("ibuprofen"),
                Some("alcohol"),
                Some("missed dose"),
                Some("pregnancy"),
                Some("expire"),
                Some("allergic"),
            ]
        );
    }

    #[test]
    fn test_first_match_wins() {
        let responder = FallbackResponder::new();
        // Mentions both storage and ibuprofen; storage is earlier in the list
        assert_eq!(responder.category("How do I store IBUPROFEN?"), Some("storage"));
    }

    #[test]
    fn test_missed_dose_needs_both_words() {
        let responder = FallbackResponder::new();
        assert_eq!(responder.category("I missed my dose"), Some("missed dose"));
        assert_eq!(responder.category("I missed the bus"), None);
    }

    #[test]
    fn test_generic_default() {
        let responder = FallbackResponder::new();
        let reply = responder.respond("hello there");
        assert_eq!(reply.response, GENERIC);
        assert!(reply.fallback);
        assert_eq!(reply.reply_type, ReplyType::Info);
    }

    #[test]
    fn test_every_response_non_empty() {
        let responder = FallbackResponder::new();
        for question in QUICK_QUESTIONS {
            assert!(!responder.respond(question).response.is_empty());
        }
        assert_eq!(responder.rules().len(), 8);
    }

    #[test]
    fn test_greeting_with_context() {
        let context = ChatbotContext {
            medications: vec![json!({"name": "A"}), json!({"name": "B"})],
            ..Default::default()
        };
        assert!(greeting(Some(&context)).contains("2 medication(s)"));
        assert_eq!(greeting(Some(&ChatbotContext::default())), DEFAULT_GREETING);
        assert_eq!(greeting(None), DEFAULT_GREETING);
    }

    #[test]
    fn test_context_roundtrip_and_malformed() {
        let store = MemoryStore::new();
        assert!(load_context(&store).is_none());

        let context = ChatbotContext {
            clinical_summary: "summary".to_string(),
            ..Default::default()
        };
        save_context(&store, &context).unwrap();
        assert_eq!(load_context(&store), Some(context));

        store.set(StorageKey::ChatbotContext, "nope").unwrap();
        assert!(load_context(&store).is_none());
    }
}
