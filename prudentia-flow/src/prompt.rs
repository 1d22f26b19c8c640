use std::collections::BTreeMap;
use std::fmt::Write;

use crate::{
    error::{FlowError, Result},
    form::{LegalCategory, PetitionLanguage, field_keys},
    session::Session,
    workflow::PromptKind,
};

/// Model used for guidance requests
pub const GUIDANCE_MODEL: &str = "openai/gpt-oss-20b:free";
/// Multilingual model used for petition drafting
pub const PETITION_MODEL: &str = "google/gemma-3n-e4b-it:free";

const NOT_PROVIDED: &str = "Not provided";

const GUIDANCE_INSTRUCTIONS: &str = r#"
Respond with exactly five markdown sections, each starting with a level-two heading spelled as below:

## Legal Analysis & Guidance
Analyse the matter, cite the relevant Indian statutes and precedents, and list immediate, practical steps.

## Required Documents
List every document and piece of evidence needed, with format requirements such as stamp paper or attestation.

## Court Procedure
Describe the filing process step by step for a party-in-person and name the forum with jurisdiction.

## Your Rights & Remedies
Explain the rights the user can rely on and the remedies available.

## A Quick Summary
Summarise the key points in three or four sentences.

Use simple Hinglish where it helps understanding. End with a clear disclaimer that this is general information and not a substitute for advice from a qualified advocate.
"#;

const PETITION_INSTRUCTIONS: &str = r#"
Structure the petition as follows:
1. To: the concerned authority or court, with its address
2. Subject: a concise, formal subject line
3. Respected Sir/Madam,
4. Introduction: introduce the petitioner and the matter
5. Body: the facts of the case and the legal issue, based on the description above, and why the petitioner is approaching the authority
6. Prayer: the relief, compensation or order the petitioner seeks
7. Sincerely, followed by the petitioner's name, address and phone number

Use formal, respectful legal language suited to Indian practice. Use the petitioner details given above directly and never leave placeholders such as [Your Name]. Return a complete petition that is ready to file.
"#;

/// Ephemeral request derived from a session at generation time
#[derive(Debug, Clone, PartialEq)]
pub struct PromptRequest {
    pub kind: PromptKind,
    pub category: LegalCategory,
    pub language: Option<PetitionLanguage>,
    pub fields: BTreeMap<String, String>,
}

impl PromptRequest {
    /// Build the request the session's current step is waiting for
    pub fn from_session(session: &Session) -> Result<Self> {
        let nothing = || FlowError::NothingToGenerate {
            step: session.current_step,
        };
        let kind = session.current_step.prompt_kind().ok_or_else(nothing)?;
        let category = session.selected_category.ok_or_else(nothing)?;

        let language = match kind {
            PromptKind::Guidance => None,
            PromptKind::Petition => Some(session.petition_language.ok_or_else(nothing)?),
        };

        let fields = session
            .collected_fields
            .iter()
            .filter(|(key, _)| Self::is_relevant(kind, key))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        Ok(Self {
            kind,
            category,
            language,
            fields,
        })
    }

    /// Guidance never needs contact details. Petitions carry the phone number
    /// in the signature block but not the email address.
    fn is_relevant(kind: PromptKind, key: &str) -> bool {
        match kind {
            PromptKind::Guidance => key != field_keys::PHONE && key != field_keys::EMAIL,
            PromptKind::Petition => key != field_keys::EMAIL,
        }
    }

    pub fn model(&self) -> &'static str {
        match self.kind {
            PromptKind::Guidance => GUIDANCE_MODEL,
            PromptKind::Petition => PETITION_MODEL,
        }
    }

    fn value(&self, key: &str) -> &str {
        self.fields
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(NOT_PROVIDED)
    }

    /// Category specific answers, everything outside the common keys
    fn case_details(&self) -> String {
        const COMMON: [&str; 9] = [
            field_keys::NAME,
            field_keys::PHONE,
            field_keys::EMAIL,
            field_keys::ADDRESS,
            field_keys::STATE,
            field_keys::DESCRIPTION,
            field_keys::DOCUMENTS,
            field_keys::WITNESSES,
            field_keys::ADDITIONAL_INFO,
        ];

        let mut details = String::new();
        for (key, value) in &self.fields {
            if COMMON.contains(&key.as_str()) || value.trim().is_empty() {
                continue;
            }
            let _ = writeln!(details, "- {}: {}", key.replace('_', " "), value.trim());
        }
        if details.is_empty() {
            details.push_str("- None\n");
        }
        details
    }

    pub fn render(&self) -> String {
        match self.kind {
            PromptKind::Guidance => self.render_guidance(),
            PromptKind::Petition => self.render_petition(),
        }
    }

    fn render_guidance(&self) -> String {
        let state = self.value(field_keys::STATE);
        format!(
            "As Prudentia, an experienced Indian legal advisor, give party-in-person (self-representation) guidance to a user in {state} with the following matter.\n\n\
             **Case Type:** {category}\n\
             **Description:** {description}\n\
             **User:** Name: {name}, Address: {address}, State: {state}\n\
             **Case Details:**\n{details}\
             **Evidence:** Documents: {documents}; Witnesses: {witnesses}; Other: {other}\n\
             {instructions}",
            category = self.category.label(),
            description = self.value(field_keys::DESCRIPTION),
            name = self.value(field_keys::NAME),
            address = self.value(field_keys::ADDRESS),
            details = self.case_details(),
            documents = self.value(field_keys::DOCUMENTS),
            witnesses = self.value(field_keys::WITNESSES),
            other = self.value(field_keys::ADDITIONAL_INFO),
            instructions = GUIDANCE_INSTRUCTIONS,
        )
    }

    fn render_petition(&self) -> String {
        let state = self.value(field_keys::STATE);
        let category = self.category.label();
        let language = self
            .language
            .unwrap_or(PetitionLanguage::English)
            .label();
        format!(
            "Draft a formal petition for a party-in-person in {state}, addressed to the concerned authority or court.\n\n\
             **Case Type:** {category}\n\
             **Petitioner:** Name: {name}, Address: {address}, Phone: {phone}\n\
             **Subject:** Petition regarding {category} in {state}\n\
             **Case Description:** {description}\n\
             **Case Details:**\n{details}\
             **Supporting Documents:** {documents}\n\
             **Witnesses:** {witnesses}\n\
             {instructions}\n\
             Write the entire petition in {language}.\n",
            name = self.value(field_keys::NAME),
            address = self.value(field_keys::ADDRESS),
            phone = self.value(field_keys::PHONE),
            description = self.value(field_keys::DESCRIPTION),
            details = self.case_details(),
            documents = self.value(field_keys::DOCUMENTS),
            witnesses = self.value(field_keys::WITNESSES),
            instructions = PETITION_INSTRUCTIONS,
        )
    }
}
